use std::sync::Arc;

use builtins_cmd::commands::player::next_speed;
use builtins_cmd::host::{PluginContent, WindowId};
use builtins_cmd::{
    format_command, parse_command, BuiltinExecutor, CommandRegistry, HostCall, ParsedCommand,
    RecordingHost, Services,
};
use proptest::prelude::*;

fn setup() -> (Arc<RecordingHost>, BuiltinExecutor) {
    let host = Arc::new(RecordingHost::new());
    let executor = BuiltinExecutor::new(Services::uniform(host.clone()));
    (host, executor)
}

fn mixed_case(name: &str, mask: u64) -> String {
    name.chars()
        .enumerate()
        .map(|(i, c)| {
            if (mask >> (i % 64)) & 1 == 1 {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

fn command_strategy() -> impl Strategy<Value = ParsedCommand> {
    (
        "[A-Za-z][A-Za-z.]{0,15}",
        prop::collection::vec(".{0,12}", 0..5),
    )
        .prop_map(|(name, params)| ParsedCommand { name, params })
}

proptest! {
    #[test]
    fn formatted_commands_parse_back(cmd in command_strategy()) {
        let text = format_command(&cmd);
        prop_assert_eq!(parse_command(&text), cmd);
    }

    #[test]
    fn parsing_is_idempotent(name in "[A-Za-z][A-Za-z.]{0,10}", body in ".{0,30}") {
        let once = parse_command(&format!("{}({}", name, body));
        let twice = parse_command(&format_command(&once));
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn nested_calls_stay_one_parameter(
        keyword in "[a-z]{1,8}",
        inner in prop::collection::vec("[a-z0-9]{1,6}", 1..4),
        tail in "[a-z0-9]{1,6}",
    ) {
        let nested = format!("{}({})", keyword, inner.join(","));
        let cmd = parse_command(&format!("Outer({},{})", nested, tail));
        prop_assert_eq!(cmd.params, vec![nested, tail]);
    }

    #[test]
    fn quoted_commas_stay_in_one_parameter(parts in prop::collection::vec("[a-z ]{0,6}", 2..5)) {
        let joined = parts.join(",");
        let cmd = parse_command(&format!("Notification(\"{}\",x)", joined));
        prop_assert_eq!(cmd.params, vec![joined, "x".to_string()]);
    }

    #[test]
    fn registry_lookup_ignores_case(index in any::<prop::sample::Index>(), mask in any::<u64>()) {
        let registry = CommandRegistry::builtins();
        let spec = registry.all_commands().nth(index.index(registry.len())).unwrap();
        let name = mixed_case(spec.name, mask);

        prop_assert_eq!(registry.lookup(&name).map(|s| s.name), Some(spec.name));
        let with_param = format!("{}(x)", name);
        let empty_call = format!("{}()", name);
        prop_assert!(registry.has_command(&with_param));
        prop_assert_eq!(registry.has_command(&name), !spec.requires_parameters);
        prop_assert_eq!(registry.has_command(&empty_call), !spec.requires_parameters);
    }

    #[test]
    fn unknown_commands_touch_nothing(name in "[a-z]{1,12}") {
        prop_assume!(!CommandRegistry::builtins().contains(&name));
        let (host, mut executor) = setup();
        prop_assert_eq!(executor.execute(&format!("{}(a,b)", name)), -1);
        prop_assert!(host.calls().is_empty());
    }

    #[test]
    fn seek_percentage_is_clamped(percent in -50i32..150) {
        let (host, mut executor) = setup();
        host.set_playing(true);
        let code = executor.execute(&format!("PlayerControl(seekpercentage({}))", percent));
        let seeked = host
            .calls()
            .into_iter()
            .any(|c| c == HostCall::SeekPercentage(percent as f64));

        if (0..=100).contains(&percent) {
            prop_assert_eq!(code, 0);
            prop_assert!(seeked);
        } else {
            prop_assert_eq!(code, -1);
            prop_assert!(!seeked);
        }
    }

    #[test]
    fn run_addon_opens_video_plugins(id in "plugin\\.video\\.[a-z]{1,10}") {
        let (host, mut executor) = setup();
        host.add_plugin(&id, PluginContent { video: true, ..PluginContent::default() });

        prop_assert_eq!(executor.execute(&format!("RunAddon({})", id)), 0);
        prop_assert_eq!(
            host.calls().last().cloned(),
            Some(HostCall::ActivateWindow {
                id: WindowId::VIDEO_NAV,
                params: vec![format!("plugin://{}/", id), "return".to_string()],
                replace: false,
            })
        );
    }
}

#[test]
fn rewind_cycles_through_speeds() {
    let mut speed = 1;
    let mut seen = Vec::new();
    for _ in 0..6 {
        speed = next_speed(speed, true);
        seen.push(speed);
    }
    assert_eq!(seen, vec![-2, -4, -8, -16, -32, 1]);
}

#[test]
fn player_control_cycles_through_speeds() {
    let (host, mut executor) = setup();
    host.set_playing(true);
    host.set_speed(1);

    let mut seen = Vec::new();
    for _ in 0..6 {
        executor.execute("PlayerControl(rewind)");
        seen.push(host.speed());
    }
    assert_eq!(seen, vec![-2, -4, -8, -16, -32, 1]);

    seen.clear();
    for _ in 0..6 {
        executor.execute("PlayerControl(Forward)");
        seen.push(host.speed());
    }
    assert_eq!(seen, vec![2, 4, 8, 16, 32, 1]);
}

#[test]
fn every_registered_command_has_help() {
    let registry = CommandRegistry::builtins();
    let help = registry.help();
    for spec in registry.all_commands() {
        assert!(!spec.help.is_empty(), "{} has no help text", spec.name);
        assert!(help.contains(&format!("{}\t{}\n", spec.name, spec.help)));
    }
}
