//! `autodt describe` - print the service description of a rule

use anyhow::{Context, Result};
use std::path::Path;

use crate::rule::load_rule;
use crate::translate::service_description;

pub fn execute(rule_path: &Path) -> Result<()> {
    let rule = load_rule(rule_path)?;
    let description = service_description(&rule)
        .with_context(|| format!("Cannot describe {}", rule_path.display()))?;

    println!("{description}");
    Ok(())
}
