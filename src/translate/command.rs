//! Check command assembly: service description plus argument list

use serde::Serialize;

use super::{translate_with, ArgumentList, Placeholders};
use crate::error::ConfigError;
use crate::rule::RuleConfig;

/// Name of the downtime executable the arguments are meant for
pub const DEFAULT_EXECUTABLE: &str = "check_auto_downtimes";

/// Service description identifying the check instance.
///
/// This is `display_service_name` verbatim. A rule without one, or with a
/// blank one, is a configuration error rather than a check with no name.
pub fn service_description(rule: &RuleConfig) -> Result<String, ConfigError> {
    match rule.display_service_name.as_deref() {
        Some(name) if !name.trim().is_empty() => Ok(name.to_string()),
        _ => Err(ConfigError::MissingServiceName),
    }
}

/// Everything the monitoring core needs to schedule the active check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveCheckCommand {
    pub service_description: String,
    pub command_arguments: ArgumentList,
}

impl ActiveCheckCommand {
    pub fn from_rule(rule: &RuleConfig, placeholders: &Placeholders) -> Result<Self, ConfigError> {
        Ok(Self {
            service_description: service_description(rule)?,
            command_arguments: translate_with(rule, placeholders),
        })
    }

    /// Full command line: executable followed by the quoted arguments
    pub fn command_line(&self, executable: &str) -> String {
        if self.command_arguments.is_empty() {
            executable.to_string()
        } else {
            format!("{executable} {}", self.command_arguments.to_command_line())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: Option<&str>) -> RuleConfig {
        RuleConfig {
            display_service_name: name.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_service_description_verbatim() {
        let rule = named(Some("Auto DT $HOSTNAME$"));
        assert_eq!(service_description(&rule).unwrap(), "Auto DT $HOSTNAME$");

        let padded = named(Some(" Maintenance "));
        assert_eq!(service_description(&padded).unwrap(), " Maintenance ");
    }

    #[test]
    fn test_missing_service_name_is_error() {
        assert_eq!(
            service_description(&named(None)).unwrap_err(),
            ConfigError::MissingServiceName
        );
        assert_eq!(
            service_description(&named(Some("  "))).unwrap_err(),
            ConfigError::MissingServiceName
        );
        assert_eq!(
            service_description(&named(Some(""))).unwrap_err(),
            ConfigError::MissingServiceName
        );
    }

    #[test]
    fn test_command_line() {
        let rule = named(Some("Maintenance"));
        let command = ActiveCheckCommand::from_rule(&rule, &Placeholders::default()).unwrap();

        assert_eq!(
            command.command_line(DEFAULT_EXECUTABLE),
            "check_auto_downtimes --host_name '$HOSTNAME$' --display_service_name Maintenance"
        );
    }

    #[test]
    fn test_command_serializes_as_json() {
        let rule = named(Some("Maintenance"));
        let command = ActiveCheckCommand::from_rule(&rule, &Placeholders::default()).unwrap();
        let json = serde_json::to_value(&command).unwrap();

        assert_eq!(json["service_description"], "Maintenance");
        assert_eq!(
            json["command_arguments"],
            serde_json::json!(["--host_name", "$HOSTNAME$", "--display_service_name", "Maintenance"])
        );
    }
}
