//! Reading rule files from disk

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

use super::types::RuleConfig;

/// Read a rule file into a generic mapping.
///
/// `.yaml` and `.yml` files are parsed as YAML, everything else as JSON.
pub fn load_rule_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rule file: {}", path.display()))?;

    parse_rule_content(&content, path)
}

/// Parse rule content (for testing without file system)
pub fn parse_rule_content(content: &str, source_path: &Path) -> Result<Value> {
    let is_yaml = source_path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

    if is_yaml {
        serde_yaml::from_str(content)
            .with_context(|| format!("Failed to parse YAML rule: {}", source_path.display()))
    } else {
        serde_json::from_str(content)
            .with_context(|| format!("Failed to parse JSON rule: {}", source_path.display()))
    }
}

/// Read and decode a rule file
pub fn load_rule(path: &Path) -> Result<RuleConfig> {
    let value = load_rule_value(path)?;
    RuleConfig::from_value(&value)
        .with_context(|| format!("Invalid rule in {}", path.display()))
}
