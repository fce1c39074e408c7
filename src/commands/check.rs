//! `autodt check` - validate a rule and report findings

use anyhow::{bail, Result};
use colored::Colorize;
use std::path::Path;

use crate::lint::lint;
use crate::rule::{decode_rule, load_rule_value};
use crate::translate::{service_description, translate};

/// Validate the rule file.
///
/// Configuration errors fail the command; lint findings and applied legacy
/// upgrades are only reported.
pub fn execute(rule_path: &Path) -> Result<()> {
    let value = load_rule_value(rule_path)?;

    let (rule, report) = match decode_rule(&value) {
        Ok(decoded) => decoded,
        Err(e) => {
            println!("{} {}: {e}", "✗".red(), rule_path.display());
            bail!("Rule is invalid");
        }
    };

    let description = match service_description(&rule) {
        Ok(description) => description,
        Err(e) => {
            println!("{} {}: {e}", "✗".red(), rule_path.display());
            bail!("Rule is invalid");
        }
    };

    for migration in &report.applied {
        println!("  {} legacy rule: {migration}", "↑".cyan());
    }

    let warnings = lint(&rule);
    for warning in &warnings {
        println!("  {} {warning}", "!".yellow());
    }

    let args = translate(&rule);
    println!(
        "{} '{}' translates to {} arguments{}",
        "✓".green(),
        description.cyan(),
        args.len(),
        if warnings.is_empty() {
            String::new()
        } else {
            format!(" ({} warnings)", warnings.len())
        }
    );

    Ok(())
}
