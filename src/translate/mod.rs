//! Translation of a decoded rule into downtime executable arguments
//!
//! The token order produced here is parsed positionally by the executable
//! and is fixed regardless of the key order in the original rule:
//!
//! 1. `--host_name` placeholder
//! 2. remote site connection
//! 3. service name, automation user, default downtime, grace time
//! 4. debug logging
//! 5. monitor target
//! 6. reaction conditions
//! 7. dependency detection, followed by its search options

mod args;
mod command;
pub mod flags;

#[cfg(test)]
mod tests;

pub use args::ArgumentList;
pub use command::{service_description, ActiveCheckCommand, DEFAULT_EXECUTABLE};

use tracing::debug;

use crate::rule::{ConnectTo, DependencyDetection, MonitorTarget, RuleConfig, Target};
use self::flags::*;

/// Macro the monitoring core replaces with the name of the checking host
pub const HOSTNAME_MACRO: &str = "$HOSTNAME$";

/// Placeholder tokens passed through verbatim for the monitoring core to resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
    /// Value of `--host_name`
    pub host_macro: String,
    /// Value of `--monitor_host` when the rule monitors the checking host
    pub self_host_macro: String,
}

fn default_macro() -> String {
    HOSTNAME_MACRO.to_string()
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            host_macro: default_macro(),
            self_host_macro: default_macro(),
        }
    }
}

/// Translate a rule using the default host macros
pub fn translate(rule: &RuleConfig) -> ArgumentList {
    translate_with(rule, &Placeholders::default())
}

/// Translate a rule into the ordered argument list for the downtime executable
pub fn translate_with(rule: &RuleConfig, placeholders: &Placeholders) -> ArgumentList {
    let mut args = ArgumentList::new();

    args.push_option(HOST_NAME, placeholders.host_macro.as_str());

    if let Some(connect_to) = &rule.connect_to {
        push_connect_to(&mut args, connect_to);
    }

    if let Some(name) = &rule.display_service_name {
        args.push_option(DISPLAY_SERVICE_NAME, name.as_str());
    }

    if let Some(user) = &rule.automation_user {
        args.push_option(AUTOMATION_USER, user.as_str());
    }

    if let Some(downtime) = &rule.default_downtime {
        args.push_option(DEFAULT_DOWNTIME, downtime.as_str());
    }

    if let Some(grace) = &rule.dt_end_gracetime_s {
        args.push_option(DT_END_GRACETIME, grace.as_str());
    }

    if rule.debug_log {
        args.push_flag(DEBUG_LOG);
    }

    if let Some(monitor) = &rule.monitor {
        push_monitor(&mut args, monitor, placeholders);
    }

    for flag in active_flags(REACT_ON_FLAGS, &rule.react_on) {
        args.push_flag(flag);
    }

    if let Some(detection) = &rule.dependency_detection {
        push_dependency_detection(&mut args, detection);

        for flag in active_flags(SEARCH_OPT_FLAGS, &rule.search_opts) {
            args.push_flag(flag);
        }
    }

    debug!("Translated rule into {} arguments", args.len());

    args
}

fn push_connect_to(args: &mut ArgumentList, connect_to: &ConnectTo) {
    args.push_option(OMD_HOST, connect_to.host.as_str());
    args.push_option(OMD_PORT, connect_to.port.to_string());
    args.push_option(OMD_SITE, connect_to.site.as_str());

    if connect_to.verify_ssl {
        args.push_flag(VERIFY_SSL);
    }
    if connect_to.no_proxy {
        args.push_flag(NO_PROXY);
    }
}

fn push_monitor(args: &mut ArgumentList, monitor: &MonitorTarget, placeholders: &Placeholders) {
    match monitor {
        MonitorTarget::Service {
            host,
            service,
            service_regex,
            perfdata,
        } => {
            args.push_option(MONITOR_HOST, host.as_str());
            args.push_option(MONITOR_SERVICE, service.as_str());
            args.push_option(MONITOR_SERVICE_REGEX, service_regex.as_str());

            if let Some(start) = &perfdata.timerange_start {
                args.push_option(PERFNAME_START, start.as_str());
            }
            if let Some(end) = &perfdata.timerange_end {
                args.push_option(PERFNAME_END, end.as_str());
            }
            if let Some(flag) = &perfdata.set_dt_flag {
                args.push_option(PERFNAME_SET_DT, flag.as_str());
            }
        }
        MonitorTarget::ThisHost => {
            args.push_option(MONITOR_HOST, placeholders.self_host_macro.as_str());
        }
        MonitorTarget::Host(host) => {
            args.push_option(MONITOR_HOST, host.as_str());
        }
    }
}

fn push_dependency_detection(args: &mut ArgumentList, detection: &DependencyDetection) {
    args.push_option(DEPENDENCY_DETECTION, detection.mode().as_str());

    match detection {
        DependencyDetection::FullyAutomated {
            optional_identifier,
        }
        | DependencyDetection::SearchParentChild {
            optional_identifier,
        } => {
            if let Some(identifier) = optional_identifier {
                args.push_option(OPTIONAL_IDENTIFIER, identifier.as_str());
            }
        }
        DependencyDetection::SpecifyTargets { targets } => {
            for target in targets {
                args.push_option(TARGET, target_value(target));
            }
        }
    }
}

/// Encode a target as `name,host,service`
fn target_value(target: &Target) -> String {
    format!(
        "{},{},{}",
        target.name,
        normalize_target_host(&target.host),
        target.service
    )
}

/// Map the literal host `"None"` to an empty host.
///
/// Compatibility shim: some editor versions stored a missing host regex as the
/// text `None`. It can go once no such rules remain.
pub fn normalize_target_host(host: &str) -> &str {
    if host == "None" {
        ""
    } else {
        host
    }
}
