//! Upgrade of rules saved by older versions of the rule editor.
//!
//! Older editors stored the reaction and search options as top-level keys,
//! saved `connect_to` without the proxy flag and kept a spare element in the
//! fully automated detection tuple. These are rewritten in place before the
//! rule is decoded.

use serde_json::{Map, Value};
use tracing::info;

/// Top-level keys that moved into `react_on`, with their defaults
const LEGACY_REACT_ON_KEYS: &[(&str, bool)] = &[
    ("monitor_dts", true),
    ("monitor_state_1", false),
    ("monitor_state_2", false),
    ("monitor_state_3", false),
];

/// Top-level keys that moved into `search_opts`, with their defaults
const LEGACY_SEARCH_OPT_KEYS: &[(&str, bool)] = &[
    ("case_insensitive", false),
    ("hostname_boundary_match", true),
    ("strip_fqdn", false),
];

/// A single migration applied to a rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Migration {
    /// Flat reaction keys were grouped under `react_on`
    ReactOnGrouped,
    /// Flat search keys were grouped under `search_opts`
    SearchOptsGrouped,
    /// `connect_to` was padded with `no_proxy = false`
    ConnectToPadded,
    /// The unused middle element of the fully automated tuple was dropped
    FullyAutomatedCollapsed,
}

impl std::fmt::Display for Migration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Migration::ReactOnGrouped => write!(f, "moved reaction options into 'react_on'"),
            Migration::SearchOptsGrouped => write!(f, "moved search options into 'search_opts'"),
            Migration::ConnectToPadded => write!(f, "added no_proxy=false to 'connect_to'"),
            Migration::FullyAutomatedCollapsed => {
                write!(f, "dropped unused element of 'dependency_detection'")
            }
        }
    }
}

/// Migrations applied by [`upgrade_legacy`], in application order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpgradeReport {
    pub applied: Vec<Migration>,
}

impl UpgradeReport {
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Rewrite a legacy rule mapping into the current layout.
///
/// Rules already in the current layout are left untouched.
pub fn upgrade_legacy(rule: &mut Map<String, Value>) -> UpgradeReport {
    let mut report = UpgradeReport::default();

    if group_flat_keys(rule, "react_on", LEGACY_REACT_ON_KEYS) {
        report.applied.push(Migration::ReactOnGrouped);
    }
    if group_flat_keys(rule, "search_opts", LEGACY_SEARCH_OPT_KEYS) {
        report.applied.push(Migration::SearchOptsGrouped);
    }

    if let Some(Value::Array(connect_to)) = rule.get_mut("connect_to") {
        if connect_to.len() == 4 {
            connect_to.push(Value::Bool(false));
            report.applied.push(Migration::ConnectToPadded);
        }
    }

    if let Some(Value::Array(detection)) = rule.get_mut("dependency_detection") {
        if detection.len() == 3 && detection[0].as_str() == Some("fully_automated") {
            detection.remove(1);
            report.applied.push(Migration::FullyAutomatedCollapsed);
        }
    }

    for migration in &report.applied {
        info!("Upgraded legacy rule: {migration}");
    }

    report
}

/// Move flat `keys` into the `group` sub-mapping.
///
/// The group is only created when the rule does not already carry one; the
/// flat keys are removed either way. Returns true if the rule changed.
fn group_flat_keys(rule: &mut Map<String, Value>, group: &str, keys: &[(&str, bool)]) -> bool {
    if !keys.iter().any(|(key, _)| rule.contains_key(*key)) {
        return false;
    }

    if !rule.contains_key(group) {
        let grouped: Map<String, Value> = keys
            .iter()
            .map(|(key, default)| {
                let value = rule.get(*key).cloned().unwrap_or(Value::Bool(*default));
                (key.to_string(), value)
            })
            .collect();
        rule.insert(group.to_string(), Value::Object(grouped));
    }

    for (key, _) in keys {
        rule.remove(*key);
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a mapping"),
        }
    }

    #[test]
    fn test_current_rule_untouched() {
        let original = as_map(json!({
            "display_service_name": "Maintenance",
            "react_on": {"monitor_dts": true},
            "search_opts": {"strip_fqdn": true},
            "connect_to": ["central", 443, "prod", false, false],
        }));
        let mut rule = original.clone();

        let report = upgrade_legacy(&mut rule);

        assert!(report.is_empty());
        assert_eq!(rule, original);
    }

    #[test]
    fn test_rule_without_groups_untouched() {
        let original = as_map(json!({
            "display_service_name": "M",
            "monitor": "esx01",
        }));
        let mut rule = original.clone();

        let report = upgrade_legacy(&mut rule);

        assert!(report.is_empty());
        assert_eq!(rule, original);
        assert!(!rule.contains_key("react_on"));
        assert!(!rule.contains_key("search_opts"));
    }

    #[test]
    fn test_flat_search_key_only_groups_search_opts() {
        let mut rule = as_map(json!({"strip_fqdn": true}));

        let report = upgrade_legacy(&mut rule);

        assert_eq!(report.applied, vec![Migration::SearchOptsGrouped]);
        assert!(!rule.contains_key("react_on"));
        assert_eq!(rule["search_opts"]["strip_fqdn"], true);
    }

    #[test]
    fn test_flat_react_keys_grouped_with_defaults() {
        let mut rule = as_map(json!({
            "display_service_name": "Maintenance",
            "monitor_dts": false,
            "monitor_state_2": true,
        }));

        let report = upgrade_legacy(&mut rule);

        assert!(report.applied.contains(&Migration::ReactOnGrouped));
        assert_eq!(
            rule["react_on"],
            json!({
                "monitor_dts": false,
                "monitor_state_1": false,
                "monitor_state_2": true,
                "monitor_state_3": false,
            })
        );
        assert!(!rule.contains_key("monitor_dts"));
        assert!(!rule.contains_key("monitor_state_2"));
    }

    #[test]
    fn test_existing_group_wins_over_flat_keys() {
        let mut rule = as_map(json!({
            "strip_fqdn": true,
            "search_opts": {"strip_fqdn": false},
        }));

        let report = upgrade_legacy(&mut rule);

        assert_eq!(report.applied, vec![Migration::SearchOptsGrouped]);
        assert_eq!(rule["search_opts"], json!({"strip_fqdn": false}));
        assert!(!rule.contains_key("strip_fqdn"));
    }

    #[test]
    fn test_connect_to_padded() {
        let mut rule = as_map(json!({"connect_to": ["central", 443, "prod", true]}));

        let report = upgrade_legacy(&mut rule);

        assert_eq!(report.applied, vec![Migration::ConnectToPadded]);
        assert_eq!(rule["connect_to"], json!(["central", 443, "prod", true, false]));
    }

    #[test]
    fn test_short_connect_to_left_for_decoder() {
        let mut rule = as_map(json!({"connect_to": ["central", 443]}));

        let report = upgrade_legacy(&mut rule);

        assert!(report.is_empty());
        assert_eq!(rule["connect_to"], json!(["central", 443]));
    }

    #[test]
    fn test_fully_automated_triple_collapsed() {
        let mut rule = as_map(json!({
            "dependency_detection": ["fully_automated", null, "uplink"],
        }));

        let report = upgrade_legacy(&mut rule);

        assert_eq!(report.applied, vec![Migration::FullyAutomatedCollapsed]);
        assert_eq!(rule["dependency_detection"], json!(["fully_automated", "uplink"]));
    }

    #[test]
    fn test_specify_targets_triple_not_collapsed() {
        let mut rule = as_map(json!({
            "dependency_detection": ["specify_targets", [], "extra"],
        }));

        let report = upgrade_legacy(&mut rule);

        assert!(report.is_empty());
    }
}
