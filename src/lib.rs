//! Translate automated-downtime monitoring rules into command-line arguments
//! for the downtime executable.
//!
//! ```
//! use autodt::rule::RuleConfig;
//! use autodt::translate::translate;
//!
//! let rule = RuleConfig::from_value(&serde_json::json!({
//!     "display_service_name": "Maintenance",
//!     "monitor": 100,
//! }))
//! .unwrap();
//!
//! let args = translate(&rule);
//! assert_eq!(
//!     args.as_slice(),
//!     &["--host_name", "$HOSTNAME$", "--display_service_name", "Maintenance", "--monitor_host", "$HOSTNAME$"]
//! );
//! ```

pub mod commands;
pub mod completions;
pub mod error;
pub mod lint;
pub mod logging;
pub mod rule;
pub mod settings;
pub mod translate;

pub use error::ConfigError;
pub use rule::RuleConfig;
pub use translate::{service_description, translate, translate_with, ArgumentList, Placeholders};
