//! Non-fatal checks on decoded rules.
//!
//! A rule that decodes always translates; these findings point at settings
//! the downtime executable will reject or silently ignore.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use tracing::warn;

use crate::rule::{DependencyDetection, MonitorTarget, RuleConfig};
use crate::translate::normalize_target_host;

/// A finding about a rule that still translates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintWarning {
    /// No `monitor` set; the executable requires `--monitor_host`
    MissingMonitor,
    /// A regex field does not compile
    InvalidRegex { field: String, error: String },
    /// `specify_targets` without any target
    NoTargets,
    /// `search_opts` given without dependency detection, so never emitted
    UnusedSearchOpts,
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintWarning::MissingMonitor => {
                write!(f, "no 'monitor' set; the downtime check requires a monitored host")
            }
            LintWarning::InvalidRegex { field, error } => {
                write!(f, "{field} is not a valid regex: {error}")
            }
            LintWarning::NoTargets => {
                write!(f, "'specify_targets' has no targets; no dependencies will be found")
            }
            LintWarning::UnusedSearchOpts => {
                write!(f, "'search_opts' has no effect without 'dependency_detection'")
            }
        }
    }
}

/// Check a rule for settings that will not behave as intended
pub fn lint(rule: &RuleConfig) -> Vec<LintWarning> {
    let mut warnings = Vec::new();

    match &rule.monitor {
        None => warnings.push(LintWarning::MissingMonitor),
        Some(MonitorTarget::Service { service_regex, .. }) => {
            check_regex(&mut warnings, "monitor service regex", service_regex);
        }
        Some(_) => {}
    }

    match &rule.dependency_detection {
        Some(DependencyDetection::SpecifyTargets { targets }) => {
            if targets.is_empty() {
                warnings.push(LintWarning::NoTargets);
            }
            for (index, target) in targets.iter().enumerate() {
                check_regex(
                    &mut warnings,
                    &format!("target #{index} host"),
                    normalize_target_host(&target.host),
                );
                check_regex(
                    &mut warnings,
                    &format!("target #{index} service"),
                    &target.service,
                );
            }
        }
        Some(_) => {}
        None => {
            if !rule.search_opts.is_empty() {
                warnings.push(LintWarning::UnusedSearchOpts);
            }
        }
    }

    for warning in &warnings {
        warn!("{warning}");
    }

    warnings
}

fn check_regex(warnings: &mut Vec<LintWarning>, field: &str, pattern: &str) {
    if pattern.is_empty() {
        return;
    }

    let masked = mask_macros(pattern);
    if let Err(e) = Regex::new(&masked) {
        warnings.push(LintWarning::InvalidRegex {
            field: field.to_string(),
            error: e.to_string(),
        });
    }
}

/// Replace macro tokens resolved by the monitoring core with a plain literal
fn mask_macros(pattern: &str) -> String {
    static MACRO: OnceLock<Regex> = OnceLock::new();
    let re = MACRO.get_or_init(|| {
        Regex::new(r"\$[A-Z][A-Z0-9_]*\$|\{\{.*?\}\}").expect("Invalid regex pattern")
    });
    re.replace_all(pattern, "macro").into_owned()
}
