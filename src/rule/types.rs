//! Typed representation of an automated-downtime rule.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Monitor value the rule editor stores for "monitor the host running this check"
pub const THIS_HOST_SENTINEL: u64 = 100;

/// A decoded monitoring rule.
///
/// Built once from the host-supplied mapping by [`RuleConfig::from_value`];
/// every optional key that was absent is `None` (or an empty switch set).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleConfig {
    pub connect_to: Option<ConnectTo>,
    pub display_service_name: Option<String>,
    pub automation_user: Option<String>,
    pub default_downtime: Option<String>,
    pub dt_end_gracetime_s: Option<String>,
    pub debug_log: bool,
    pub monitor: Option<MonitorTarget>,
    pub react_on: Switches,
    pub dependency_detection: Option<DependencyDetection>,
    pub search_opts: Switches,
}

/// Remote site the downtime executable should talk to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectTo {
    pub host: String,
    pub port: u16,
    pub site: String,
    pub verify_ssl: bool,
    pub no_proxy: bool,
}

/// What the rule watches to decide on a downtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorTarget {
    /// A service on some host, optionally matched on its output
    Service {
        host: String,
        service: String,
        service_regex: String,
        perfdata: PerfdataNames,
    },
    /// The host executing the check (sentinel `100`)
    ThisHost,
    /// A named host
    Host(String),
}

/// Perfdata value names used to read a downtime window from a service
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerfdataNames {
    pub timerange_start: Option<String>,
    pub timerange_end: Option<String>,
    pub set_dt_flag: Option<String>,
}

impl PerfdataNames {
    pub fn is_empty(&self) -> bool {
        self.timerange_start.is_none() && self.timerange_end.is_none() && self.set_dt_flag.is_none()
    }
}

/// Dependency detection modes understood by the downtime executable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectionMode {
    FullyAutomated,
    SearchParentChild,
    SpecifyTargets,
}

impl DetectionMode {
    /// Mode name as written in the rule and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionMode::FullyAutomated => "fully_automated",
            DetectionMode::SearchParentChild => "search_parent_child",
            DetectionMode::SpecifyTargets => "specify_targets",
        }
    }
}

impl fmt::Display for DetectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetectionMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fully_automated" => Ok(DetectionMode::FullyAutomated),
            "search_parent_child" => Ok(DetectionMode::SearchParentChild),
            "specify_targets" => Ok(DetectionMode::SpecifyTargets),
            other => Err(ConfigError::UnknownDetectionMode(other.to_string())),
        }
    }
}

/// How dependencies of the monitored object are found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyDetection {
    FullyAutomated { optional_identifier: Option<String> },
    SearchParentChild { optional_identifier: Option<String> },
    SpecifyTargets { targets: Vec<Target> },
}

impl DependencyDetection {
    pub fn mode(&self) -> DetectionMode {
        match self {
            DependencyDetection::FullyAutomated { .. } => DetectionMode::FullyAutomated,
            DependencyDetection::SearchParentChild { .. } => DetectionMode::SearchParentChild,
            DependencyDetection::SpecifyTargets { .. } => DetectionMode::SpecifyTargets,
        }
    }
}

/// A manually specified downtime target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Free-form label shown to the user
    pub name: String,
    /// Host regex, as entered
    pub host: String,
    /// Service regex, as entered
    pub service: String,
}

/// Boolean options that were explicitly set in a sub-mapping.
///
/// Only keys present in the rule are stored; defaults live with the
/// translator's flag tables so they can be audited in one place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Switches(BTreeMap<String, bool>);

impl Switches {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: bool) {
        self.0.insert(key.into(), value);
    }

    /// Explicit value of `key`, if the rule set one
    pub fn get(&self, key: &str) -> Option<bool> {
        self.0.get(key).copied()
    }

    /// Value of `key`, falling back to `default` when unset
    pub fn resolve(&self, key: &str, default: bool) -> bool {
        self.get(key).unwrap_or(default)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for Switches {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        let mut switches = Switches::new();
        for (key, value) in iter {
            switches.set(key, value);
        }
        switches
    }
}
