//! `autodt upgrade` - rewrite a legacy rule in the current layout

use anyhow::{bail, Result};
use colored::Colorize;
use serde_json::Value;
use std::path::Path;

use crate::rule::{load_rule_value, upgrade_legacy, UpgradeReport};

/// Print the upgraded rule to stdout, migrations to stderr
pub fn execute(rule_path: &Path, yaml: bool) -> Result<()> {
    let value = load_rule_value(rule_path)?;
    let (upgraded, report) = upgrade_value(value)?;

    for migration in &report.applied {
        eprintln!("{} {migration}", "↑".cyan());
    }
    if report.is_empty() {
        eprintln!("{} rule is already current", "✓".green());
    }

    let rendered = if yaml {
        serde_yaml::to_string(&upgraded)?
    } else {
        serde_json::to_string_pretty(&upgraded)?
    };
    println!("{}", rendered.trim_end());

    Ok(())
}

/// Apply legacy migrations to a rule value
pub fn upgrade_value(value: Value) -> Result<(Value, UpgradeReport)> {
    let Value::Object(mut map) = value else {
        bail!("Rule must be a mapping");
    };

    let report = upgrade_legacy(&mut map);
    Ok((Value::Object(map), report))
}
