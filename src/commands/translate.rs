//! `autodt translate` - print the argument list for a rule

use anyhow::Result;
use clap::ValueEnum;
use std::path::Path;

use crate::rule::{load_rule, RuleConfig};
use crate::settings::Settings;
use crate::translate::{translate_with, ActiveCheckCommand};

/// How the translated arguments are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One token per line
    #[default]
    Lines,
    /// Executable followed by the shell-quoted arguments
    Shell,
    /// Service description and arguments as JSON
    Json,
}

/// Translate the rule file and print it in `format`
pub fn execute(rule_path: &Path, settings: &Settings, format: OutputFormat) -> Result<()> {
    let rule = load_rule(rule_path)?;
    println!("{}", render(&rule, settings, format)?);
    Ok(())
}

/// Render a decoded rule in the requested format
pub fn render(rule: &RuleConfig, settings: &Settings, format: OutputFormat) -> Result<String> {
    let placeholders = settings.placeholders();

    let output = match format {
        OutputFormat::Lines => translate_with(rule, &placeholders)
            .iter()
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Shell => {
            ActiveCheckCommand::from_rule(rule, &placeholders)?.command_line(&settings.executable)
        }
        OutputFormat::Json => {
            let command = ActiveCheckCommand::from_rule(rule, &placeholders)?;
            serde_json::to_string_pretty(&command)?
        }
    };

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rule() -> RuleConfig {
        RuleConfig::from_value(&json!({
            "display_service_name": "Auto DT",
            "monitor": 100,
            "react_on": {"monitor_state_2": true},
        }))
        .unwrap()
    }

    #[test]
    fn test_lines() {
        let out = render(&rule(), &Settings::default(), OutputFormat::Lines).unwrap();
        assert_eq!(
            out,
            "--host_name\n$HOSTNAME$\n--display_service_name\nAuto DT\n--monitor_host\n$HOSTNAME$\n--monitor_state_2"
        );
    }

    #[test]
    fn test_shell_uses_configured_executable() {
        let settings = Settings {
            executable: "/usr/lib/check_auto_downtimes".to_string(),
            ..Settings::default()
        };

        let out = render(&rule(), &settings, OutputFormat::Shell).unwrap();
        assert!(out.starts_with("/usr/lib/check_auto_downtimes --host_name '$HOSTNAME$'"));
        assert!(out.contains("--display_service_name 'Auto DT'"));
    }

    #[test]
    fn test_json() {
        let out = render(&rule(), &Settings::default(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["service_description"], "Auto DT");
        assert_eq!(value["command_arguments"][0], "--host_name");
    }

    #[test]
    fn test_lines_do_not_need_service_name() {
        let rule = RuleConfig::from_value(&json!({"monitor": "esx01"})).unwrap();
        assert!(render(&rule, &Settings::default(), OutputFormat::Lines).is_ok());
        assert!(render(&rule, &Settings::default(), OutputFormat::Json).is_err());
    }
}
