//! Rule schema, decoding and legacy upgrades
//!
//! This module handles:
//! - The typed rule model consumed by the translator
//! - Decoding the host-supplied mapping into that model
//! - Rewriting rules saved by older editor versions
//! - Loading rules from JSON or YAML files

mod decode;
mod legacy;
mod load;
mod types;


pub use decode::{decode_rule, CASE_INSENSITIVE_ALIAS, CASE_INSENSITIVE_KEY};
pub use legacy::{upgrade_legacy, Migration, UpgradeReport};
pub use load::{load_rule, load_rule_value, parse_rule_content};
pub use types::{
    ConnectTo, DependencyDetection, DetectionMode, MonitorTarget, PerfdataNames, RuleConfig,
    Switches, Target, THIS_HOST_SENTINEL,
};
