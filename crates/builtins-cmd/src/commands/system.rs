//! System commands: help, power, profiles, master mode, shell, display

use crate::args::ParsedCommand;
use crate::command::{CommandContext, Flow};
use crate::error::{CmdError, CmdResult};
use crate::host::{GuiMessage, Resolution, StereoMode, Toast, ToastLevel, WindowId};
use crate::registry::CommandRegistry;

const DEBUG_LOG_SETTING: &str = "debug.showloginfo";

fn warning(title: &str, message: &str) -> Toast {
    Toast {
        level: ToastLevel::Warning,
        icon: String::new(),
        title: title.to_string(),
        message: message.to_string(),
        display_ms: None,
    }
}

/// Log the registry help text
pub fn help(ctx: &CommandContext) -> CmdResult<Flow> {
    ctx.print(&CommandRegistry::builtins().help());
    Ok(Flow::Done)
}

pub fn inhibit_idle_shutdown(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    let inhibit = cmd.len() == 1 && cmd.get_bool(0);
    ctx.services.system.inhibit_idle_shutdown(inhibit);
    Ok(Flow::Done)
}

/// Toggle master mode
///
/// Leaving master mode always succeeds; entering it needs the master lock.
/// Either way the video cache is dropped and all windows refresh.
pub fn mastermode(ctx: &CommandContext) -> CmdResult<Flow> {
    let services = ctx.services;
    let system = services.system.as_ref();

    if system.is_master_user() {
        system.set_master_user(false);
        system.lock_sources(true);
        services.notifier.queue_toast(warning("Master mode", "Master mode disabled"));
    } else if system.unlock_master() {
        system.lock_sources(false);
        system.set_master_user(true);
        services.notifier.queue_toast(warning("Master mode", "Master mode enabled"));
    }

    system.clear_video_cache();
    services.windows.send_message(GuiMessage::UpdateAll);
    Ok(Flow::Done)
}

pub fn set_gui_language(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    if let Some(language) = cmd.get(0) {
        ctx.services.system.set_gui_language(language);
    }
    Ok(Flow::Done)
}

/// Load a profile by name when its lock allows it
pub fn load_profile(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    let system = ctx.services.system.as_ref();
    let prompt = cmd.len() == 2 && cmd.param_is(1, "prompt");

    let Some(index) = system.profile_index(cmd.first()) else {
        ctx.warn(&format!("LoadProfile: no profile named '{}'", cmd.first()));
        return Ok(Flow::Done);
    };

    if system.master_lock_everyone() || system.unlock_profile(index, prompt) {
        system.wake_screensaver();
        system.load_profile(index);
    }
    Ok(Flow::Done)
}

pub fn exec(ctx: &CommandContext, cmd: &ParsedCommand, wait: bool) -> CmdResult<Flow> {
    ctx.services.system.minimize();
    ctx.services.network.exec_shell(cmd.first(), wait);
    Ok(Flow::Done)
}

/// Log off the current profile and return to the login screen
pub fn log_off(ctx: &CommandContext) -> CmdResult<Flow> {
    let services = ctx.services;
    if services.windows.active_window() == WindowId::LOGIN_SCREEN {
        return Err(CmdError::Refused("already at the login screen".into()));
    }

    services.player.stop();
    if services.library.is_music_scanning() {
        services.library.stop_music_scan();
    }
    if services.library.is_video_scanning() {
        services.library.stop_video_scan();
    }
    services.addons.stop_services();
    services.network.services_down();
    services.system.load_master_profile_for_login();
    services.system.set_master_user(false);
    services.windows.activate_window(WindowId::LOGIN_SCREEN, &[], false);

    if !services.network.start_event_server() {
        services
            .notifier
            .queue_toast(warning("Event server", "Failed to start the event server"));
    }
    Ok(Flow::Done)
}

/// Switch display resolution by name, PAL 4:3 when the name is unknown
pub fn resolution(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    let res = Resolution::from_name(cmd.first()).unwrap_or(Resolution::Pal4x3);
    let system = ctx.services.system.as_ref();

    if system.is_valid_resolution(res) {
        system.set_resolution(res);
        ctx.services.skin.reload_skin(false);
    } else {
        ctx.warn(&format!("Resolution: {:?} is not available", res));
    }
    Ok(Flow::Done)
}

pub fn toggle_debug(ctx: &CommandContext) -> CmdResult<Flow> {
    let settings = ctx.services.settings.as_ref();
    let debug = !settings.get_bool(DEBUG_LOG_SETTING);
    settings.set_bool(DEBUG_LOG_SETTING, debug);
    ctx.services.system.set_debug_mode(debug);
    Ok(Flow::Done)
}

pub fn set_stereo_mode(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    let mode = cmd.first();
    if mode.is_empty() {
        return Err(CmdError::missing("SetStereoMode", -1));
    }

    let mode = StereoMode::from_name(mode).ok_or_else(|| CmdError::UnknownParameter {
        command: "SetStereoMode".into(),
        value: mode.to_string(),
        code: -2,
    })?;
    ctx.services.system.set_stereo_mode(mode);
    Ok(Flow::Done)
}

#[cfg(target_os = "android")]
pub fn start_android_activity(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    if cmd.is_empty() {
        return Err(CmdError::missing("StartAndroidActivity", -1));
    }
    ctx.services.system.start_android_activity(&cmd.params);
    Ok(Flow::Done)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::setup;
    use crate::recorder::{HostCall, SystemCall};

    #[test]
    fn test_power_commands() {
        let (host, mut executor) = setup();
        assert_eq!(executor.execute("Reboot"), 0);
        assert_eq!(executor.execute("reset"), 0);
        assert_eq!(executor.execute("ShutDown"), 0);
        assert_eq!(
            host.calls(),
            vec![
                HostCall::System(SystemCall::Restart),
                HostCall::System(SystemCall::Restart),
                HostCall::System(SystemCall::Shutdown),
            ]
        );
    }

    #[test]
    fn test_inhibit_idle_shutdown() {
        let (host, mut executor) = setup();
        executor.execute("InhibitIdleShutdown(TRUE)");
        executor.execute("InhibitIdleShutdown(true,extra)");
        executor.execute("AllowIdleShutdown");
        assert_eq!(
            host.calls(),
            vec![
                HostCall::InhibitIdleShutdown(true),
                HostCall::InhibitIdleShutdown(false),
                HostCall::InhibitIdleShutdown(false),
            ]
        );
    }

    #[test]
    fn test_help_has_no_side_effects() {
        let (host, mut executor) = setup();
        assert_eq!(executor.execute("Help"), 0);
        assert!(host.calls().is_empty());
    }

    #[test]
    fn test_mastermode_leave_and_enter() {
        let (host, mut executor) = setup();
        host.set_master_mode(true);
        executor.execute("Mastermode");
        let calls = host.take_calls();
        assert_eq!(calls[0], HostCall::SetMasterUser(false));
        assert_eq!(calls[1], HostCall::LockSources(true));
        assert_eq!(calls[3], HostCall::System(SystemCall::ClearVideoCache));
        assert_eq!(calls[4], HostCall::Message(GuiMessage::UpdateAll));

        host.set_lock_answers(false, false, false);
        executor.execute("Mastermode");
        assert_eq!(
            host.take_calls(),
            vec![
                HostCall::System(SystemCall::ClearVideoCache),
                HostCall::Message(GuiMessage::UpdateAll),
            ]
        );
    }

    #[test]
    fn test_load_profile_respects_lock() {
        let (host, mut executor) = setup();
        host.add_profile("Kids");
        host.set_lock_answers(false, false, false);
        executor.execute("LoadProfile(Kids,prompt)");
        assert!(host.calls().is_empty());

        host.set_lock_answers(true, false, false);
        executor.execute("LoadProfile(kids)");
        assert_eq!(
            host.calls(),
            vec![HostCall::System(SystemCall::WakeScreensaver), HostCall::LoadProfile(1)]
        );
    }

    #[test]
    fn test_exec_minimizes_first() {
        let (host, mut executor) = setup();
        executor.execute("System.ExecWait(/usr/bin/true)");
        assert_eq!(
            host.calls(),
            vec![
                HostCall::System(SystemCall::Minimize),
                HostCall::ExecShell {
                    command: "/usr/bin/true".into(),
                    wait: true
                },
            ]
        );
    }

    #[test]
    fn test_log_off() {
        let (host, mut executor) = setup();
        host.set_active_window(WindowId::LOGIN_SCREEN);
        assert_eq!(executor.execute("System.LogOff"), -1);
        assert!(host.calls().is_empty());

        host.set_active_window(WindowId::HOME);
        host.set_scanning(true, false);
        host.set_event_server_result(false);
        assert_eq!(executor.execute("System.LogOff"), 0);
        let calls = host.calls();
        assert_eq!(calls[0], HostCall::Stop);
        assert_eq!(calls[1], HostCall::StopMusicScan);
        assert!(calls.contains(&HostCall::ActivateWindow {
            id: WindowId::LOGIN_SCREEN,
            params: vec![],
            replace: false
        }));
        assert!(matches!(calls.last(), Some(HostCall::Toast(t)) if t.level == ToastLevel::Warning));
    }

    #[test]
    fn test_resolution() {
        let (host, mut executor) = setup();
        executor.execute("Resolution(720pSBS)");
        executor.execute("Resolution(bogus)");
        assert_eq!(
            host.take_calls(),
            vec![
                HostCall::SetResolution(Resolution::Hdtv720pSbs),
                HostCall::ReloadSkin { confirm: false },
                HostCall::SetResolution(Resolution::Pal4x3),
                HostCall::ReloadSkin { confirm: false },
            ]
        );

        host.set_resolution_valid(false);
        executor.execute("Resolution(1080i)");
        assert!(host.calls().is_empty());
    }

    #[test]
    fn test_toggle_debug_flips_setting() {
        let (host, mut executor) = setup();
        executor.execute("ToggleDebug");
        assert!(host.setting_bool(DEBUG_LOG_SETTING));
        executor.execute("ToggleDebug");
        assert!(!host.setting_bool(DEBUG_LOG_SETTING));
        assert_eq!(host.calls().last(), Some(&HostCall::SetDebugMode(false)));
    }

    #[test]
    fn test_stereo_mode_codes() {
        let (host, mut executor) = setup();
        assert_eq!(executor.execute("SetStereoMode()"), -1);
        assert_eq!(executor.execute("SetStereoMode(sideways)"), -2);
        assert!(host.calls().is_empty());
        assert_eq!(executor.execute("SetStereoMode(Split_Vertical)"), 0);
        assert_eq!(host.calls(), vec![HostCall::SetStereoMode(StereoMode::SplitVertical)]);
    }
}
