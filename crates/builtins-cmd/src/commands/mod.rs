//! Command implementations
//!
//! Handlers are grouped by the subsystem they drive. `dispatch` maps every
//! registry entry to its handler.

pub mod addon;
pub mod alarm;
pub mod library;
pub mod media;
pub mod peripheral;
pub mod player;
pub mod playlist;
pub mod skin;
pub mod system;
pub mod window;

use crate::args::ParsedCommand;
use crate::command::{CommandContext, Flow};
use crate::error::CmdResult;
use crate::registry::Builtin;

/// Run the handler for `builtin`
#[allow(clippy::unit_arg)]
pub fn dispatch(
    ctx: &mut CommandContext,
    builtin: Builtin,
    cmd: &ParsedCommand,
) -> CmdResult<Flow> {
    use Builtin as B;

    let services = ctx.services;
    let sys = services.system.as_ref();

    match builtin {
        // System
        B::Help => system::help(ctx),
        B::Reboot | B::Restart | B::Reset => done(sys.restart()),
        B::ShutDown => done(sys.shutdown()),
        B::Powerdown => done(sys.powerdown()),
        B::RestartApp => done(sys.restart_app()),
        B::Hibernate => done(sys.hibernate()),
        B::Suspend => done(sys.suspend()),
        B::Quit => done(sys.quit()),
        B::Minimize => done(sys.minimize()),
        B::ActivateScreensaver => done(sys.activate_screensaver()),
        B::InhibitIdleShutdown => system::inhibit_idle_shutdown(ctx, cmd),
        B::AllowIdleShutdown => done(sys.inhibit_idle_shutdown(false)),
        B::Mastermode => system::mastermode(ctx),
        B::SetGuiLanguage => system::set_gui_language(ctx, cmd),
        B::LoadProfile => system::load_profile(ctx, cmd),
        B::SystemExec => system::exec(ctx, cmd, false),
        B::SystemExecWait => system::exec(ctx, cmd, true),
        B::SystemLogOff => system::log_off(ctx),
        B::Resolution => system::resolution(ctx, cmd),
        B::ReloadSkin => done(services.skin.reload_skin(cmd.param_is(0, "confirm"))),
        B::UnloadSkin => done(services.skin.unload_skin()),
        B::RefreshRss => done(sys.refresh_rss()),
        B::ToggleDebug => system::toggle_debug(ctx),
        B::StartPvrManager => done(sys.start_pvr_manager()),
        B::StopPvrManager => done(sys.stop_pvr_manager()),
        B::SetStereoMode => system::set_stereo_mode(ctx, cmd),
        #[cfg(target_os = "android")]
        B::StartAndroidActivity => system::start_android_activity(ctx, cmd),

        // Windows and controls
        B::ActivateWindow => window::activate(ctx, cmd, false),
        B::ReplaceWindow => window::activate(ctx, cmd, true),
        B::ActivateWindowAndFocus => window::activate_and_focus(ctx, cmd, false),
        B::ReplaceWindowAndFocus => window::activate_and_focus(ctx, cmd, true),
        B::SetFocus | B::ControlSetFocus => window::set_focus(ctx, cmd),
        B::PageUp => window::page(ctx, cmd, true),
        B::PageDown => window::page(ctx, cmd, false),
        B::ControlMove => window::control_move(ctx, cmd),
        B::ControlMessage => window::control_message(ctx, cmd),
        B::SendClick => window::send_click(ctx, cmd),
        B::Action => window::action(ctx, cmd),
        B::SetProperty => window::set_property(ctx, cmd),
        B::ClearProperty => window::clear_property(ctx, cmd),
        B::DialogClose => window::dialog_close(ctx, cmd),
        B::ContainerRefresh => window::container_refresh(ctx, cmd),
        B::ContainerUpdate => window::container_update(ctx, cmd),
        B::ContainerNextViewMode => window::view_mode(ctx, 0, 1),
        B::ContainerPreviousViewMode => window::view_mode(ctx, 0, -1),
        B::ContainerSetViewMode => window::view_mode(ctx, cmd.get_int(0), 0),
        B::ContainerNextSortMethod => window::sort_method(ctx, 0, 1),
        B::ContainerPreviousSortMethod => window::sort_method(ctx, 0, -1),
        B::ContainerSetSortMethod => window::sort_method(ctx, cmd.get_int(0), 0),
        B::ContainerSortDirection => window::sort_direction(ctx),
        B::WeatherRefresh => window::weather(ctx, window::WeatherRequest::Refresh),
        B::WeatherLocationNext => window::weather(ctx, window::WeatherRequest::Next),
        B::WeatherLocationPrevious => window::weather(ctx, window::WeatherRequest::Previous),
        B::WeatherLocationSet => window::weather_location_set(ctx, cmd),
        B::VideoLibrarySearch => window::video_library_search(ctx),

        // Player
        B::PlayerControl => player::player_control(ctx, cmd),
        B::PlayMedia => player::play_media(ctx, cmd),
        B::PlayWith => player::play_with(ctx, cmd),
        B::Mute => done(services.player.toggle_mute()),
        B::SetVolume => player::set_volume(ctx, cmd),
        B::PlayDvd => done(services.media.play_disc(cmd.param_is(0, "restart"))),

        // Playlists
        B::PlaylistPlayOffset => playlist::play_offset(ctx, cmd),
        B::PlaylistClear => playlist::clear(ctx, cmd),

        // Skin
        B::SkinToggleSetting => skin::toggle_setting(ctx, cmd),
        B::SkinSetBool => skin::set_bool(ctx, cmd),
        B::SkinReset => skin::reset(ctx, cmd),
        B::SkinResetSettings => skin::reset_settings(ctx),
        B::SkinTheme => skin::theme(ctx, cmd),
        B::SkinSetString => skin::set_string(ctx, cmd),
        B::SkinSetNumeric => skin::set_numeric(ctx, cmd),
        B::SkinSetPath => skin::set_path(ctx, cmd),
        B::SkinSetImage => skin::set_image(ctx, cmd, false),
        B::SkinSetLargeImage => skin::set_image(ctx, cmd, true),
        B::SkinSetFile => skin::set_file(ctx, cmd),
        B::SkinSetAddon => skin::set_addon(ctx, cmd),

        // Alarms
        B::AlarmClock => alarm::alarm_clock(ctx, cmd),
        B::CancelAlarm => alarm::cancel_alarm(ctx, cmd),

        // Add-ons and scripts
        B::RunScript => addon::run_script(ctx, cmd),
        B::StopScript => addon::stop_script(ctx, cmd),
        #[cfg(target_os = "macos")]
        B::RunAppleScript => addon::run_apple_script(ctx, cmd),
        B::RunPlugin => addon::run_plugin(ctx, cmd),
        B::RunAddon => addon::run_addon(ctx, cmd),
        B::AddonDefaultOpenSettings => addon::default_open_settings(ctx, cmd),
        B::AddonDefaultSet => addon::default_set(ctx, cmd),
        B::AddonOpenSettings => addon::open_settings(ctx, cmd),
        B::UpdateAddonRepos => done(services.addons.update_repos()),
        B::UpdateLocalAddons => done(services.addons.find_addons()),

        // Media
        B::TakeScreenshot => media::take_screenshot(ctx, cmd),
        B::SlideShow => media::slideshow(ctx, cmd, false),
        B::RecursiveSlideShow => media::slideshow(ctx, cmd, true),
        B::ShowPicture => media::show_picture(ctx, cmd),
        B::Extract => media::extract(ctx, cmd),
        B::EjectTray => done(services.media.eject_tray()),
        B::RipCd => done(services.media.rip_cd()),
        B::NotifyAll => media::notify_all(ctx, cmd),
        B::Notification => media::notification(ctx, cmd),

        // Library
        B::UpdateLibrary => library::update_library(ctx, cmd),
        B::CleanLibrary => library::clean_library(ctx, cmd),
        B::ExportLibrary => library::export_library(ctx, cmd),

        // Peripherals and network
        B::WakeOnLan => peripheral::wake_on_lan(ctx, cmd),
        B::ToggleDpms => done(sys.toggle_dpms()),
        B::CecToggleState => done(sys.cec_toggle_state()),
        B::CecActivateSource => done(sys.cec_activate_source()),
        B::CecStandby => done(sys.cec_standby()),
        #[cfg(feature = "lirc")]
        B::LircStop => done(sys.lirc_stop()),
        #[cfg(feature = "lirc")]
        B::LircStart => done(sys.lirc_start()),
        #[cfg(feature = "lirc")]
        B::LircSend => peripheral::lirc_send(ctx, cmd),
    }
}

/// Completion for handlers that are a single collaborator call
fn done(_: ()) -> CmdResult<Flow> {
    Ok(Flow::Done)
}

/// Append a path separator unless `path` is empty or already ends with one
///
/// Backslash-only paths get a backslash.
pub(crate) fn with_trailing_slash(path: &str) -> String {
    if path.is_empty() || path.ends_with('/') || path.ends_with('\\') {
        return path.to_string();
    }
    let sep = if path.contains('\\') && !path.contains('/') { '\\' } else { '/' };
    format!("{}{}", path, sep)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use crate::executor::BuiltinExecutor;
    use crate::host::Services;
    use crate::recorder::RecordingHost;

    /// Executor over a fresh recording host
    pub fn setup() -> (Arc<RecordingHost>, BuiltinExecutor) {
        let host = Arc::new(RecordingHost::new());
        let executor = BuiltinExecutor::new(Services::uniform(host.clone()));
        (host, executor)
    }
}
