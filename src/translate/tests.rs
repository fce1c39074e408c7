//! Tests for rule translation

use super::*;
use serde_json::json;

fn args_for(value: serde_json::Value) -> Vec<String> {
    let rule = RuleConfig::from_value(&value).unwrap();
    translate(&rule).into_vec()
}

fn tokens(expected: &[&str]) -> Vec<String> {
    expected.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_service_name_only() {
    let args = args_for(json!({"display_service_name": "Maintenance"}));
    assert_eq!(
        args,
        tokens(&["--host_name", "$HOSTNAME$", "--display_service_name", "Maintenance"])
    );
}

#[test]
fn test_empty_rule_emits_host_name_only() {
    let args = translate(&RuleConfig::default()).into_vec();
    assert_eq!(args, tokens(&["--host_name", "$HOSTNAME$"]));
}

#[test]
fn test_full_rule_order() {
    let args = args_for(json!({
        "search_opts": {"strip_fqdn": true, "hostname_boundary_match": false},
        "dependency_detection": ["fully_automated", "uplink"],
        "react_on": {"monitor_dts": false, "monitor_state_2": true},
        "monitor": ["esx01", "Maintenance Mode", "entered"],
        "debug_log": true,
        "dt_end_gracetime_s": 120,
        "default_downtime": 30,
        "automation_user": "automation",
        "display_service_name": "Auto DT",
        "connect_to": ["central", 443, "prod", true, true],
    }));

    assert_eq!(
        args,
        tokens(&[
            "--host_name",
            "$HOSTNAME$",
            "--omd_host",
            "central",
            "--omd_port",
            "443",
            "--omd_site",
            "prod",
            "--verify_ssl",
            "--no_proxy",
            "--display_service_name",
            "Auto DT",
            "--automation_user",
            "automation",
            "--default_downtime",
            "30",
            "--dt_end_gracetime_s",
            "120",
            "--debug_log",
            "--monitor_host",
            "esx01",
            "--monitor_service",
            "Maintenance Mode",
            "--monitor_service_regex",
            "entered",
            "--monitor_no_downtimes",
            "--monitor_state_2",
            "--dependency_detection",
            "fully_automated",
            "--optional_identifier",
            "uplink",
            "--no_hostname_boundary_match",
            "--strip_fqdn",
        ])
    );
}

#[test]
fn test_connect_to_flags() {
    let args = args_for(json!({"connect_to": ["site2", 8080, "remote", true, false]}));
    assert_eq!(
        args,
        tokens(&[
            "--host_name",
            "$HOSTNAME$",
            "--omd_host",
            "site2",
            "--omd_port",
            "8080",
            "--omd_site",
            "remote",
            "--verify_ssl",
        ])
    );
}

#[test]
fn test_debug_log_false_emits_nothing() {
    let args = args_for(json!({"debug_log": false}));
    assert!(!args.contains(&"--debug_log".to_string()));
}

mod monitor_tests {
    use super::*;

    #[test]
    fn test_sentinel_uses_placeholder() {
        let args = args_for(json!({"monitor": 100}));
        assert_eq!(args[2..], tokens(&["--monitor_host", "$HOSTNAME$"])[..]);
        assert!(!args.contains(&"100".to_string()));
    }

    #[test]
    fn test_sentinel_with_custom_placeholder() {
        let rule = RuleConfig::from_value(&json!({"monitor": 100})).unwrap();
        let placeholders = Placeholders {
            host_macro: "$HOSTNAME$".to_string(),
            self_host_macro: "$HOSTADDRESS$".to_string(),
        };

        let args = translate_with(&rule, &placeholders);
        assert_eq!(args.value_of("--monitor_host"), Some("$HOSTADDRESS$"));
        assert_eq!(args.value_of("--host_name"), Some("$HOSTNAME$"));
    }

    #[test]
    fn test_bare_host() {
        let args = args_for(json!({"monitor": "esx01"}));
        assert_eq!(args[2..], tokens(&["--monitor_host", "esx01"])[..]);
    }

    #[test]
    fn test_service_with_perfdata() {
        let args = args_for(json!({
            "monitor": ["esx01", "Patch Window", "", {
                "timerange": ["start", "end"],
                "set_dt_flag": "active",
            }]
        }));

        assert_eq!(
            args[2..],
            tokens(&[
                "--monitor_host",
                "esx01",
                "--monitor_service",
                "Patch Window",
                "--monitor_service_regex",
                "",
                "--perfname_start",
                "start",
                "--perfname_end",
                "end",
                "--perfname_set_dt",
                "active",
            ])[..]
        );
    }
}

mod react_on_tests {
    use super::*;

    #[test]
    fn test_absent_equals_default() {
        let absent = args_for(json!({"display_service_name": "X"}));
        let explicit = args_for(json!({"display_service_name": "X", "react_on": {"monitor_dts": true}}));

        assert_eq!(absent, explicit);
        assert!(!absent.contains(&"--monitor_no_downtimes".to_string()));
    }

    #[test]
    fn test_states_are_independent() {
        let args = args_for(json!({
            "react_on": {
                "monitor_state_1": true,
                "monitor_state_2": false,
                "monitor_state_3": true,
            }
        }));

        assert_eq!(args[2..], tokens(&["--monitor_state_1", "--monitor_state_3"])[..]);
    }
}

mod detection_tests {
    use super::*;

    #[test]
    fn test_target_none_host_normalized() {
        let args = args_for(json!({
            "dependency_detection": ["specify_targets", [["svcA", ["None", "http"]]]]
        }));

        let targets: Vec<_> = args
            .windows(2)
            .filter(|pair| pair[0] == "--target")
            .map(|pair| pair[1].clone())
            .collect();
        assert_eq!(targets, vec!["svcA,,http".to_string()]);
    }

    #[test]
    fn test_targets_keep_input_order() {
        let args = args_for(json!({
            "dependency_detection": ["specify_targets", [
                ["b", ["host-b", "svc-b"]],
                ["a", ["host-a", ""]],
            ]]
        }));

        assert_eq!(
            args[2..],
            tokens(&[
                "--dependency_detection",
                "specify_targets",
                "--target",
                "b,host-b,svc-b",
                "--target",
                "a,host-a,",
            ])[..]
        );
    }

    #[test]
    fn test_case_insensitive_without_identifier() {
        let args = args_for(json!({
            "search_opts": {"case_insenstive": true},
            "dependency_detection": ["fully_automated", null],
        }));

        assert_eq!(
            args[2..],
            tokens(&[
                "--dependency_detection",
                "fully_automated",
                "--case_insensitive",
            ])[..]
        );
    }

    #[test]
    fn test_search_parent_child_identifier() {
        let args = args_for(json!({"dependency_detection": ["search_parent_child", "rack7"]}));
        assert_eq!(
            args[2..],
            tokens(&[
                "--dependency_detection",
                "search_parent_child",
                "--optional_identifier",
                "rack7",
            ])[..]
        );
    }

    #[test]
    fn test_search_opts_ignored_without_detection() {
        let args = args_for(json!({
            "search_opts": {
                "hostname_boundary_match": false,
                "case_insenstive": true,
                "strip_fqdn": true,
            }
        }));

        assert_eq!(args, tokens(&["--host_name", "$HOSTNAME$"]));
    }
}

#[test]
fn test_translation_is_repeatable() {
    let rule = RuleConfig::from_value(&json!({
        "display_service_name": "Maintenance",
        "react_on": {"monitor_state_3": true, "monitor_dts": false, "monitor_state_1": true},
        "search_opts": {"strip_fqdn": true, "case_insenstive": true},
        "dependency_detection": ["specify_targets", [["x", ["h", "s"]]]],
    }))
    .unwrap();

    let first = translate(&rule);
    let second = translate(&rule);

    assert_eq!(first, second);
    assert_eq!(first.to_command_line(), second.to_command_line());
}

#[test]
fn test_normalize_target_host() {
    assert_eq!(normalize_target_host("None"), "");
    assert_eq!(normalize_target_host("none"), "none");
    assert_eq!(normalize_target_host("sw-.*"), "sw-.*");
}
