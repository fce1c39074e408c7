//! Flag spellings and switch defaults.
//!
//! The flag names are parsed by the downtime executable and must not change.

use crate::rule::{Switches, CASE_INSENSITIVE_KEY};

pub const HOST_NAME: &str = "--host_name";
pub const OMD_HOST: &str = "--omd_host";
pub const OMD_PORT: &str = "--omd_port";
pub const OMD_SITE: &str = "--omd_site";
pub const VERIFY_SSL: &str = "--verify_ssl";
pub const NO_PROXY: &str = "--no_proxy";
pub const DISPLAY_SERVICE_NAME: &str = "--display_service_name";
pub const AUTOMATION_USER: &str = "--automation_user";
pub const DEFAULT_DOWNTIME: &str = "--default_downtime";
pub const DT_END_GRACETIME: &str = "--dt_end_gracetime_s";
pub const DEBUG_LOG: &str = "--debug_log";
pub const MONITOR_HOST: &str = "--monitor_host";
pub const MONITOR_SERVICE: &str = "--monitor_service";
pub const MONITOR_SERVICE_REGEX: &str = "--monitor_service_regex";
pub const PERFNAME_START: &str = "--perfname_start";
pub const PERFNAME_END: &str = "--perfname_end";
pub const PERFNAME_SET_DT: &str = "--perfname_set_dt";
pub const DEPENDENCY_DETECTION: &str = "--dependency_detection";
pub const OPTIONAL_IDENTIFIER: &str = "--optional_identifier";
pub const TARGET: &str = "--target";

/// A boolean rule option that maps to a bare flag.
///
/// The flag is emitted when the resolved value equals `emit_when`. Since
/// `emit_when` is always the opposite of `default`, only an explicitly set
/// value can produce the flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchFlag {
    pub key: &'static str,
    pub default: bool,
    pub emit_when: bool,
    pub flag: &'static str,
}

impl SwitchFlag {
    pub fn is_active(&self, switches: &Switches) -> bool {
        switches.resolve(self.key, self.default) == self.emit_when
    }
}

/// `react_on` options. `monitor_dts` defaults to true because rules saved
/// before the key existed always reacted on downtimes.
pub const REACT_ON_FLAGS: &[SwitchFlag] = &[
    SwitchFlag {
        key: "monitor_dts",
        default: true,
        emit_when: false,
        flag: "--monitor_no_downtimes",
    },
    SwitchFlag {
        key: "monitor_state_1",
        default: false,
        emit_when: true,
        flag: "--monitor_state_1",
    },
    SwitchFlag {
        key: "monitor_state_2",
        default: false,
        emit_when: true,
        flag: "--monitor_state_2",
    },
    SwitchFlag {
        key: "monitor_state_3",
        default: false,
        emit_when: true,
        flag: "--monitor_state_3",
    },
];

/// `search_opts` options, only evaluated together with dependency detection
pub const SEARCH_OPT_FLAGS: &[SwitchFlag] = &[
    SwitchFlag {
        key: "hostname_boundary_match",
        default: true,
        emit_when: false,
        flag: "--no_hostname_boundary_match",
    },
    SwitchFlag {
        key: CASE_INSENSITIVE_KEY,
        default: false,
        emit_when: true,
        flag: "--case_insensitive",
    },
    SwitchFlag {
        key: "strip_fqdn",
        default: false,
        emit_when: true,
        flag: "--strip_fqdn",
    },
];

/// Flags from `table` that are active for `switches`, in table order
pub fn active_flags<'a>(
    table: &'a [SwitchFlag],
    switches: &'a Switches,
) -> impl Iterator<Item = &'static str> + 'a {
    table
        .iter()
        .filter(move |entry| entry.is_active(switches))
        .map(|entry| entry.flag)
}
