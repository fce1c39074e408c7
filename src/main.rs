use anyhow::Result;
use autodt::commands::{check, describe, translate, upgrade};
use autodt::completions::{generate_completions, Shell};
use autodt::logging::init_logging;
use autodt::settings::Settings;
use clap::{CommandFactory, Parser, Subcommand};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "autodt")]
#[command(about = "Translate automated-downtime rules into check arguments", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file (default: <config dir>/autodt/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr (AUTODT_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the downtime executable arguments for a rule
    Translate {
        /// Rule file (.json, .yaml or .yml)
        rule: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: translate::OutputFormat,
    },

    /// Print the service description of a rule
    Describe {
        /// Rule file (.json, .yaml or .yml)
        rule: PathBuf,
    },

    /// Validate a rule and report problems
    Check {
        /// Rule file (.json, .yaml or .yml)
        rule: PathBuf,
    },

    /// Rewrite a rule saved by an older editor in the current layout
    Upgrade {
        /// Rule file (.json, .yaml or .yml)
        rule: PathBuf,

        /// Print YAML instead of JSON
        #[arg(long)]
        yaml: bool,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Translate { rule, format } => {
            let settings = Settings::load(cli.config.as_deref())?;
            translate::execute(&rule, &settings, format)
        }
        Commands::Describe { rule } => describe::execute(&rule),
        Commands::Check { rule } => check::execute(&rule),
        Commands::Upgrade { rule, yaml } => upgrade::execute(&rule, yaml),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate_completions(&mut cmd, shell, &mut io::stdout());
            Ok(())
        }
    }
}
