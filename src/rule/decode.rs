//! Decoding of the host-supplied rule mapping into [`RuleConfig`].
//!
//! Tuples arrive as sequences. A key that is present with a `null` value is
//! treated the same as an absent key.

use serde_json::{Map, Value};
use tracing::debug;

use super::legacy::{upgrade_legacy, UpgradeReport};
use super::types::{
    ConnectTo, DependencyDetection, DetectionMode, MonitorTarget, PerfdataNames, RuleConfig,
    Switches, Target, THIS_HOST_SENTINEL,
};
use crate::error::{describe_value, ConfigError};

/// Schema key for case-insensitive search (the editor's historical spelling)
pub const CASE_INSENSITIVE_KEY: &str = "case_insenstive";

/// Correctly spelled variant written by newer editors and legacy upgrades
pub const CASE_INSENSITIVE_ALIAS: &str = "case_insensitive";

const CONNECT_TO_ARITY: usize = 5;

impl RuleConfig {
    /// Decode a rule mapping, upgrading legacy layouts first.
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        decode_rule(value).map(|(rule, _)| rule)
    }
}

/// Decode a rule mapping and report which legacy migrations were applied
pub fn decode_rule(value: &Value) -> Result<(RuleConfig, UpgradeReport), ConfigError> {
    let mut map = match value {
        Value::Object(map) => map.clone(),
        other => {
            return Err(ConfigError::NotAMapping {
                found: describe_value(other),
            })
        }
    };

    let report = upgrade_legacy(&mut map);

    let rule = RuleConfig {
        connect_to: present(&map, "connect_to").map(decode_connect_to).transpose()?,
        display_service_name: optional_string(&map, "display_service_name")?,
        automation_user: optional_string(&map, "automation_user")?,
        default_downtime: optional_scalar(&map, "default_downtime")?,
        dt_end_gracetime_s: optional_scalar(&map, "dt_end_gracetime_s")?,
        debug_log: present(&map, "debug_log")
            .map(|v| expect_bool("debug_log", v))
            .transpose()?
            .unwrap_or(false),
        monitor: present(&map, "monitor").map(decode_monitor).transpose()?.flatten(),
        react_on: present(&map, "react_on")
            .map(|v| decode_switches("react_on", v))
            .transpose()?
            .unwrap_or_default(),
        dependency_detection: present(&map, "dependency_detection")
            .map(decode_detection)
            .transpose()?,
        search_opts: present(&map, "search_opts")
            .map(decode_search_opts)
            .transpose()?
            .unwrap_or_default(),
    };

    debug!(
        "Decoded rule '{}' ({} legacy migrations)",
        rule.display_service_name.as_deref().unwrap_or("<unnamed>"),
        report.applied.len()
    );

    Ok((rule, report))
}

/// Value of `key`, unless it is absent or null
fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}

fn optional_string(map: &Map<String, Value>, key: &str) -> Result<Option<String>, ConfigError> {
    present(map, key).map(|v| expect_string(key, v)).transpose()
}

fn optional_scalar(map: &Map<String, Value>, key: &str) -> Result<Option<String>, ConfigError> {
    present(map, key).map(|v| scalar_string(key, v)).transpose()
}

fn expect_string(key: &str, value: &Value) -> Result<String, ConfigError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ConfigError::invalid_type(key, "a string", value))
}

/// Like [`expect_string`], with `null` read as an empty string
fn nullable_string(key: &str, value: &Value) -> Result<String, ConfigError> {
    match value {
        Value::Null => Ok(String::new()),
        other => expect_string(key, other),
    }
}

fn expect_bool(key: &str, value: &Value) -> Result<bool, ConfigError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Null => Ok(false),
        other => Err(ConfigError::invalid_type(key, "a boolean", other)),
    }
}

/// A string or a number, rendered the way the executable expects it
fn scalar_string(key: &str, value: &Value) -> Result<String, ConfigError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(ConfigError::invalid_type(key, "a number or string", other)),
    }
}

fn decode_connect_to(value: &Value) -> Result<ConnectTo, ConfigError> {
    let items = value
        .as_array()
        .ok_or_else(|| ConfigError::invalid_type("connect_to", "a sequence", value))?;

    if items.len() != CONNECT_TO_ARITY {
        return Err(ConfigError::InvalidConnectTo { arity: items.len() });
    }

    Ok(ConnectTo {
        host: expect_string("connect_to.host", &items[0])?,
        port: decode_port(&items[1])?,
        site: expect_string("connect_to.site", &items[2])?,
        verify_ssl: expect_bool("connect_to.verify_ssl", &items[3])?,
        no_proxy: expect_bool("connect_to.no_proxy", &items[4])?,
    })
}

fn decode_port(value: &Value) -> Result<u16, ConfigError> {
    let port = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    port.and_then(|p| u16::try_from(p).ok())
        .ok_or_else(|| ConfigError::invalid_type("connect_to.port", "a port number", value))
}

/// Decode `monitor`; an empty host name means nothing is monitored
fn decode_monitor(value: &Value) -> Result<Option<MonitorTarget>, ConfigError> {
    const EXPECTED: &str = "a host name, 100 or a (host, service, regex) sequence";

    match value {
        Value::String(host) if host.is_empty() => Ok(None),
        Value::String(host) => Ok(Some(MonitorTarget::Host(host.clone()))),
        Value::Number(n) if n.as_u64() == Some(THIS_HOST_SENTINEL) => {
            Ok(Some(MonitorTarget::ThisHost))
        }
        Value::Array(items) if items.len() == 3 || items.len() == 4 => {
            let perfdata = match items.get(3) {
                Some(v) => decode_perfdata(v)?,
                None => PerfdataNames::default(),
            };

            Ok(Some(MonitorTarget::Service {
                host: nullable_string("monitor.host", &items[0])?,
                service: nullable_string("monitor.service", &items[1])?,
                service_regex: nullable_string("monitor.service_regex", &items[2])?,
                perfdata,
            }))
        }
        other => Err(ConfigError::invalid_type("monitor", EXPECTED, other)),
    }
}

fn decode_perfdata(value: &Value) -> Result<PerfdataNames, ConfigError> {
    let map = match value {
        Value::Null => return Ok(PerfdataNames::default()),
        Value::Object(map) => map,
        other => return Err(ConfigError::invalid_type("monitor.perfdata", "a mapping", other)),
    };

    let mut names = PerfdataNames::default();

    if let Some(range) = present(map, "timerange") {
        let pair = range
            .as_array()
            .filter(|items| items.len() == 2)
            .ok_or_else(|| {
                ConfigError::invalid_type("monitor.perfdata.timerange", "a (start, end) pair", range)
            })?;
        names.timerange_start = non_empty(nullable_string("monitor.perfdata.timerange", &pair[0])?);
        names.timerange_end = non_empty(nullable_string("monitor.perfdata.timerange", &pair[1])?);
    }

    if let Some(flag) = present(map, "set_dt_flag") {
        names.set_dt_flag = non_empty(expect_string("monitor.perfdata.set_dt_flag", flag)?);
    }

    Ok(names)
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn decode_switches(key: &str, value: &Value) -> Result<Switches, ConfigError> {
    let map = value
        .as_object()
        .ok_or_else(|| ConfigError::invalid_type(key, "a mapping", value))?;

    let mut switches = Switches::new();
    for (name, flag) in map {
        match flag {
            Value::Null => {}
            Value::Bool(b) => switches.set(name.as_str(), *b),
            other => {
                return Err(ConfigError::invalid_type(
                    format!("{key}.{name}"),
                    "a boolean",
                    other,
                ))
            }
        }
    }

    Ok(switches)
}

/// Decode `search_opts`, folding the correctly spelled alias into the schema key
fn decode_search_opts(value: &Value) -> Result<Switches, ConfigError> {
    let mut switches = decode_switches("search_opts", value)?;

    if let Some(alias) = switches.get(CASE_INSENSITIVE_ALIAS) {
        let merged = switches.get(CASE_INSENSITIVE_KEY).unwrap_or(false) || alias;
        switches.set(CASE_INSENSITIVE_KEY, merged);
    }

    Ok(switches)
}

fn decode_detection(value: &Value) -> Result<DependencyDetection, ConfigError> {
    let items = value
        .as_array()
        .filter(|items| items.len() == 1 || items.len() == 2)
        .ok_or_else(|| {
            ConfigError::invalid_type("dependency_detection", "a (mode, parameter) pair", value)
        })?;

    let mode: DetectionMode = expect_string("dependency_detection.mode", &items[0])?.parse()?;
    let param = items.get(1).unwrap_or(&Value::Null);

    Ok(match mode {
        DetectionMode::FullyAutomated => DependencyDetection::FullyAutomated {
            optional_identifier: decode_identifier(param)?,
        },
        DetectionMode::SearchParentChild => DependencyDetection::SearchParentChild {
            optional_identifier: decode_identifier(param)?,
        },
        DetectionMode::SpecifyTargets => DependencyDetection::SpecifyTargets {
            targets: decode_targets(param)?,
        },
    })
}

/// Optional identifier: a string, `null`, or `{"optional_identifier": ...}`
fn decode_identifier(value: &Value) -> Result<Option<String>, ConfigError> {
    const KEY: &str = "dependency_detection.optional_identifier";

    let identifier = match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => present(map, "optional_identifier")
            .map(|v| expect_string(KEY, v))
            .transpose()?,
        other => return Err(ConfigError::invalid_type(KEY, "a string", other)),
    };

    Ok(identifier.and_then(non_empty))
}

fn decode_targets(value: &Value) -> Result<Vec<Target>, ConfigError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(entries) => entries
            .iter()
            .enumerate()
            .map(|(index, entry)| decode_target(index, entry))
            .collect(),
        other => Err(ConfigError::invalid_type(
            "dependency_detection.targets",
            "a sequence of targets",
            other,
        )),
    }
}

/// Decode `(name, (host, service))`; a bare host string stands for `(host, "")`
fn decode_target(index: usize, entry: &Value) -> Result<Target, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidTarget { index, reason };

    let pair = entry
        .as_array()
        .filter(|items| items.len() == 2)
        .ok_or_else(|| invalid(format!("expected (name, (host, service)), found {}", describe_value(entry))))?;

    let name = pair[0]
        .as_str()
        .ok_or_else(|| invalid(format!("name must be a string, found {}", describe_value(&pair[0]))))?
        .to_string();

    let (host, service) = match &pair[1] {
        Value::String(host) => (host.clone(), String::new()),
        Value::Array(scope) if scope.len() == 1 || scope.len() == 2 => {
            let host = text_field(&scope[0]).ok_or_else(|| {
                invalid(format!("host must be a string, found {}", describe_value(&scope[0])))
            })?;
            let service = match scope.get(1) {
                Some(v) => text_field(v).ok_or_else(|| {
                    invalid(format!("service must be a string, found {}", describe_value(v)))
                })?,
                None => String::new(),
            };
            (host, service)
        }
        other => {
            return Err(invalid(format!(
                "expected (host, service), found {}",
                describe_value(other)
            )))
        }
    };

    for (field, text) in [("name", &name), ("host", &host), ("service", &service)] {
        if text.contains(',') {
            return Err(ConfigError::TargetFieldContainsComma { index, field });
        }
    }

    Ok(Target {
        name,
        host,
        service,
    })
}

fn text_field(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}
