//! Builtin command registry
//!
//! The registry is a fixed table of command specs in registration order. Name
//! lookup is case-insensitive and goes through an index built once on first
//! use.

use std::sync::OnceLock;

use ahash::AHashMap;

use crate::args::ParsedCommand;
use crate::parser::parse_command;

/// Handler selector, one variant per registered command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Help,
    Reboot,
    Restart,
    ShutDown,
    Powerdown,
    Quit,
    Hibernate,
    Suspend,
    InhibitIdleShutdown,
    AllowIdleShutdown,
    ActivateScreensaver,
    RestartApp,
    Minimize,
    Reset,
    Mastermode,
    SetGuiLanguage,
    ActivateWindow,
    ActivateWindowAndFocus,
    ReplaceWindowAndFocus,
    ReplaceWindow,
    TakeScreenshot,
    RunScript,
    StopScript,
    #[cfg(target_os = "macos")]
    RunAppleScript,
    RunPlugin,
    RunAddon,
    NotifyAll,
    Extract,
    PlayMedia,
    SlideShow,
    RecursiveSlideShow,
    ReloadSkin,
    UnloadSkin,
    RefreshRss,
    PlayerControl,
    PlaylistPlayOffset,
    PlaylistClear,
    EjectTray,
    AlarmClock,
    CancelAlarm,
    Action,
    Notification,
    PlayDvd,
    RipCd,
    SkinToggleSetting,
    SkinSetString,
    SkinSetNumeric,
    SkinSetPath,
    SkinTheme,
    SkinSetImage,
    SkinSetLargeImage,
    SkinSetFile,
    SkinSetAddon,
    SkinSetBool,
    SkinReset,
    SkinResetSettings,
    Mute,
    SetVolume,
    DialogClose,
    SystemLogOff,
    SystemExec,
    SystemExecWait,
    Resolution,
    SetFocus,
    UpdateLibrary,
    CleanLibrary,
    ExportLibrary,
    PageDown,
    PageUp,
    ContainerRefresh,
    ContainerUpdate,
    ContainerNextViewMode,
    ContainerPreviousViewMode,
    ContainerSetViewMode,
    ContainerNextSortMethod,
    ContainerPreviousSortMethod,
    ContainerSetSortMethod,
    ContainerSortDirection,
    ControlMove,
    ControlSetFocus,
    ControlMessage,
    SendClick,
    LoadProfile,
    SetProperty,
    ClearProperty,
    PlayWith,
    WakeOnLan,
    AddonDefaultOpenSettings,
    AddonDefaultSet,
    AddonOpenSettings,
    UpdateAddonRepos,
    UpdateLocalAddons,
    ToggleDpms,
    CecToggleState,
    CecActivateSource,
    CecStandby,
    WeatherRefresh,
    WeatherLocationNext,
    WeatherLocationPrevious,
    WeatherLocationSet,
    #[cfg(feature = "lirc")]
    LircStop,
    #[cfg(feature = "lirc")]
    LircStart,
    #[cfg(feature = "lirc")]
    LircSend,
    VideoLibrarySearch,
    ToggleDebug,
    StartPvrManager,
    StopPvrManager,
    #[cfg(target_os = "android")]
    StartAndroidActivity,
    SetStereoMode,
    /// Legacy picture viewer entry point, never part of the table
    ShowPicture,
}

/// A registered command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    /// Display name, as shown in help
    pub name: &'static str,
    /// True when the command is only valid with at least one parameter
    pub requires_parameters: bool,
    /// One-line description
    pub help: &'static str,
    pub builtin: Builtin,
}

const fn spec(
    name: &'static str,
    requires_parameters: bool,
    help: &'static str,
    builtin: Builtin,
) -> CommandSpec {
    CommandSpec {
        name,
        requires_parameters,
        help,
        builtin,
    }
}

/// Registration order is the order of help output
static BUILTINS: &[CommandSpec] = &[
    spec("Help", false, "This help message", Builtin::Help),
    spec("Reboot", false, "Reboot the system", Builtin::Reboot),
    spec("Restart", false, "Restart the system (same as reboot)", Builtin::Restart),
    spec("ShutDown", false, "Shutdown the system", Builtin::ShutDown),
    spec("Powerdown", false, "Powerdown system", Builtin::Powerdown),
    spec("Quit", false, "Quit XBMC", Builtin::Quit),
    spec("Hibernate", false, "Hibernates the system", Builtin::Hibernate),
    spec("Suspend", false, "Suspends the system", Builtin::Suspend),
    spec("InhibitIdleShutdown", false, "Inhibit idle shutdown", Builtin::InhibitIdleShutdown),
    spec("AllowIdleShutdown", false, "Allow idle shutdown", Builtin::AllowIdleShutdown),
    spec("ActivateScreensaver", false, "Activate Screensaver", Builtin::ActivateScreensaver),
    spec("RestartApp", false, "Restart XBMC", Builtin::RestartApp),
    spec("Minimize", false, "Minimize XBMC", Builtin::Minimize),
    spec("Reset", false, "Reset the system (same as reboot)", Builtin::Reset),
    spec("Mastermode", false, "Control master mode", Builtin::Mastermode),
    spec("SetGUILanguage", true, "Set GUI Language", Builtin::SetGuiLanguage),
    spec("ActivateWindow", true, "Activate the specified window", Builtin::ActivateWindow),
    spec(
        "ActivateWindowAndFocus",
        true,
        "Activate the specified window and sets focus to the specified id",
        Builtin::ActivateWindowAndFocus,
    ),
    spec(
        "ReplaceWindowAndFocus",
        true,
        "Replaces the current window with the new one and sets focus to the specified id",
        Builtin::ReplaceWindowAndFocus,
    ),
    spec(
        "ReplaceWindow",
        true,
        "Replaces the current window with the new one",
        Builtin::ReplaceWindow,
    ),
    spec("TakeScreenshot", false, "Takes a Screenshot", Builtin::TakeScreenshot),
    spec("RunScript", true, "Run the specified script", Builtin::RunScript),
    spec("StopScript", true, "Stop the script by ID or path, if running", Builtin::StopScript),
    #[cfg(target_os = "macos")]
    spec("RunAppleScript", true, "Run the specified AppleScript command", Builtin::RunAppleScript),
    spec("RunPlugin", true, "Run the specified plugin", Builtin::RunPlugin),
    spec("RunAddon", true, "Run the specified plugin/script", Builtin::RunAddon),
    spec("NotifyAll", true, "Notify all connected clients", Builtin::NotifyAll),
    spec("Extract", true, "Extracts the specified archive", Builtin::Extract),
    spec("PlayMedia", true, "Play the specified media file (or playlist)", Builtin::PlayMedia),
    spec("SlideShow", true, "Run a slideshow from the specified directory", Builtin::SlideShow),
    spec(
        "RecursiveSlideShow",
        true,
        "Run a slideshow from the specified directory, including all subdirs",
        Builtin::RecursiveSlideShow,
    ),
    spec("ReloadSkin", false, "Reload XBMC's skin", Builtin::ReloadSkin),
    spec("UnloadSkin", false, "Unload XBMC's skin", Builtin::UnloadSkin),
    spec("RefreshRSS", false, "Reload RSS feeds from RSSFeeds.xml", Builtin::RefreshRss),
    spec("PlayerControl", true, "Control the music or video player", Builtin::PlayerControl),
    spec(
        "Playlist.PlayOffset",
        true,
        "Start playing from a particular offset in the playlist",
        Builtin::PlaylistPlayOffset,
    ),
    spec("Playlist.Clear", false, "Clear the current playlist", Builtin::PlaylistClear),
    spec("EjectTray", false, "Close or open the DVD tray", Builtin::EjectTray),
    spec(
        "AlarmClock",
        true,
        "Prompt for a length of time and start an alarm clock",
        Builtin::AlarmClock,
    ),
    spec("CancelAlarm", true, "Cancels an alarm", Builtin::CancelAlarm),
    spec(
        "Action",
        true,
        "Executes an action for the active window (same as in keymap)",
        Builtin::Action,
    ),
    spec(
        "Notification",
        true,
        "Shows a notification on screen, specify header, then message, and optionally time in milliseconds and a icon.",
        Builtin::Notification,
    ),
    spec(
        "PlayDVD",
        false,
        "Plays the inserted CD or DVD media from the DVD-ROM Drive!",
        Builtin::PlayDvd,
    ),
    spec("RipCD", false, "Rip the currently inserted audio CD", Builtin::RipCd),
    spec(
        "Skin.ToggleSetting",
        true,
        "Toggles a skin setting on or off",
        Builtin::SkinToggleSetting,
    ),
    spec("Skin.SetString", true, "Prompts and sets skin string", Builtin::SkinSetString),
    spec("Skin.SetNumeric", true, "Prompts and sets numeric input", Builtin::SkinSetNumeric),
    spec("Skin.SetPath", true, "Prompts and sets a skin path", Builtin::SkinSetPath),
    spec("Skin.Theme", true, "Control skin theme", Builtin::SkinTheme),
    spec("Skin.SetImage", true, "Prompts and sets a skin image", Builtin::SkinSetImage),
    spec(
        "Skin.SetLargeImage",
        true,
        "Prompts and sets a large skin images",
        Builtin::SkinSetLargeImage,
    ),
    spec("Skin.SetFile", true, "Prompts and sets a file", Builtin::SkinSetFile),
    spec("Skin.SetAddon", true, "Prompts and set an addon", Builtin::SkinSetAddon),
    spec("Skin.SetBool", true, "Sets a skin setting on", Builtin::SkinSetBool),
    spec("Skin.Reset", true, "Resets a skin setting to default", Builtin::SkinReset),
    spec("Skin.ResetSettings", false, "Resets all skin settings", Builtin::SkinResetSettings),
    spec("Mute", false, "Mute the player", Builtin::Mute),
    spec("SetVolume", true, "Set the current volume", Builtin::SetVolume),
    spec("Dialog.Close", true, "Close a dialog", Builtin::DialogClose),
    spec("System.LogOff", false, "Log off current user", Builtin::SystemLogOff),
    spec("System.Exec", true, "Execute shell commands", Builtin::SystemExec),
    spec(
        "System.ExecWait",
        true,
        "Execute shell commands and freezes XBMC until shell is closed",
        Builtin::SystemExecWait,
    ),
    spec("Resolution", true, "Change XBMC's Resolution", Builtin::Resolution),
    spec("SetFocus", true, "Change current focus to a different control id", Builtin::SetFocus),
    spec(
        "UpdateLibrary",
        true,
        "Update the selected library (music or video)",
        Builtin::UpdateLibrary,
    ),
    spec("CleanLibrary", true, "Clean the video/music library", Builtin::CleanLibrary),
    spec("ExportLibrary", true, "Export the video/music library", Builtin::ExportLibrary),
    spec(
        "PageDown",
        true,
        "Send a page down event to the pagecontrol with given id",
        Builtin::PageDown,
    ),
    spec("PageUp", true, "Send a page up event to the pagecontrol with given id", Builtin::PageUp),
    spec("Container.Refresh", false, "Refresh current listing", Builtin::ContainerRefresh),
    spec(
        "Container.Update",
        false,
        "Update current listing. Send Container.Update(path,replace) to reset the path history",
        Builtin::ContainerUpdate,
    ),
    spec(
        "Container.NextViewMode",
        false,
        "Move to the next view type (and refresh the listing)",
        Builtin::ContainerNextViewMode,
    ),
    spec(
        "Container.PreviousViewMode",
        false,
        "Move to the previous view type (and refresh the listing)",
        Builtin::ContainerPreviousViewMode,
    ),
    spec(
        "Container.SetViewMode",
        true,
        "Move to the view with the given id",
        Builtin::ContainerSetViewMode,
    ),
    spec(
        "Container.NextSortMethod",
        false,
        "Change to the next sort method",
        Builtin::ContainerNextSortMethod,
    ),
    spec(
        "Container.PreviousSortMethod",
        false,
        "Change to the previous sort method",
        Builtin::ContainerPreviousSortMethod,
    ),
    spec(
        "Container.SetSortMethod",
        true,
        "Change to the specified sort method",
        Builtin::ContainerSetSortMethod,
    ),
    spec(
        "Container.SortDirection",
        false,
        "Toggle the sort direction",
        Builtin::ContainerSortDirection,
    ),
    spec(
        "Control.Move",
        true,
        "Tells the specified control to 'move' to another entry specified by offset",
        Builtin::ControlMove,
    ),
    spec(
        "Control.SetFocus",
        true,
        "Change current focus to a different control id",
        Builtin::ControlSetFocus,
    ),
    spec(
        "Control.Message",
        true,
        "Send a given message to a control within a given window",
        Builtin::ControlMessage,
    ),
    spec(
        "SendClick",
        true,
        "Send a click message from the given control to the given window",
        Builtin::SendClick,
    ),
    spec(
        "LoadProfile",
        true,
        "Load the specified profile (note; if locks are active it won't work)",
        Builtin::LoadProfile,
    ),
    spec(
        "SetProperty",
        true,
        "Sets a window property for the current focused window/dialog (key,value)",
        Builtin::SetProperty,
    ),
    spec(
        "ClearProperty",
        true,
        "Clears a window property for the current focused window/dialog (key,value)",
        Builtin::ClearProperty,
    ),
    spec("PlayWith", true, "Play the selected item with the specified core", Builtin::PlayWith),
    spec(
        "WakeOnLan",
        true,
        "Sends the wake-up packet to the broadcast address for the specified MAC address",
        Builtin::WakeOnLan,
    ),
    spec(
        "Addon.Default.OpenSettings",
        true,
        "Open a settings dialog for the default addon of the given type",
        Builtin::AddonDefaultOpenSettings,
    ),
    spec(
        "Addon.Default.Set",
        true,
        "Open a select dialog to allow choosing the default addon of the given type",
        Builtin::AddonDefaultSet,
    ),
    spec(
        "Addon.OpenSettings",
        true,
        "Open a settings dialog for the addon of the given id",
        Builtin::AddonOpenSettings,
    ),
    spec(
        "UpdateAddonRepos",
        false,
        "Check add-on repositories for updates",
        Builtin::UpdateAddonRepos,
    ),
    spec("UpdateLocalAddons", false, "Check for local add-on changes", Builtin::UpdateLocalAddons),
    spec("ToggleDPMS", false, "Toggle DPMS mode manually", Builtin::ToggleDpms),
    spec(
        "CECToggleState",
        false,
        "Toggle state of playing device via a CEC peripheral",
        Builtin::CecToggleState,
    ),
    spec(
        "CECActivateSource",
        false,
        "Wake up playing device via a CEC peripheral",
        Builtin::CecActivateSource,
    ),
    spec(
        "CECStandby",
        false,
        "Put playing device on standby via a CEC peripheral",
        Builtin::CecStandby,
    ),
    spec("Weather.Refresh", false, "Force weather data refresh", Builtin::WeatherRefresh),
    spec(
        "Weather.LocationNext",
        false,
        "Switch to next weather location",
        Builtin::WeatherLocationNext,
    ),
    spec(
        "Weather.LocationPrevious",
        false,
        "Switch to previous weather location",
        Builtin::WeatherLocationPrevious,
    ),
    spec(
        "Weather.LocationSet",
        true,
        "Switch to given weather location (parameter can be 1-3)",
        Builtin::WeatherLocationSet,
    ),
    #[cfg(feature = "lirc")]
    spec("LIRC.Stop", false, "Removes XBMC as LIRC client", Builtin::LircStop),
    #[cfg(feature = "lirc")]
    spec("LIRC.Start", false, "Adds XBMC as LIRC client", Builtin::LircStart),
    #[cfg(feature = "lirc")]
    spec("LIRC.Send", true, "Sends a command to LIRC", Builtin::LircSend),
    spec(
        "VideoLibrary.Search",
        false,
        "Brings up a search dialog which will search the library",
        Builtin::VideoLibrarySearch,
    ),
    spec("ToggleDebug", false, "Enables/disables debug mode", Builtin::ToggleDebug),
    spec("StartPVRManager", false, "(Re)Starts the PVR manager", Builtin::StartPvrManager),
    spec("StopPVRManager", false, "Stops the PVR manager", Builtin::StopPvrManager),
    #[cfg(target_os = "android")]
    spec(
        "StartAndroidActivity",
        true,
        "Launch an Android native app with the given package name.  Optional parms (in order): intent, dataType, dataURI.",
        Builtin::StartAndroidActivity,
    ),
    spec(
        "SetStereoMode",
        true,
        "Changes the stereo mode of the GUI. Params can be: toggle, next, previous, select, tomono or any of the supported stereomodes (off, split_vertical, split_horizontal, row_interleaved, hardware_based, anaglyph_cyan_red, anaglyph_green_magenta, monoscopic)",
        Builtin::SetStereoMode,
    ),
];

/// Spec for the opt-in legacy `ShowPicture` command
pub(crate) const SHOW_PICTURE: CommandSpec =
    spec("ShowPicture", true, "Show a picture", Builtin::ShowPicture);

/// Registry of builtin commands
pub struct CommandRegistry {
    /// Specs in registration order
    specs: &'static [CommandSpec],
    /// Lower-cased name -> position in `specs`
    index: AHashMap<String, usize>,
}

impl CommandRegistry {
    fn build(specs: &'static [CommandSpec]) -> Self {
        let mut index = AHashMap::with_capacity(specs.len());
        for (i, spec) in specs.iter().enumerate() {
            index.insert(spec.name.to_ascii_lowercase(), i);
        }
        Self { specs, index }
    }

    /// The shared registry of builtin commands
    pub fn builtins() -> &'static CommandRegistry {
        static REGISTRY: OnceLock<CommandRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| Self::build(BUILTINS))
    }

    /// Look up a command by name (case-insensitive, exact)
    pub fn lookup(&self, name: &str) -> Option<&'static CommandSpec> {
        let specs = self.specs;
        self.index
            .get(name.to_ascii_lowercase().as_str())
            .map(|&i| &specs[i])
    }

    /// Check if a command exists
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// True when `raw` names a known command and satisfies its arity gate
    pub fn has_command(&self, raw: &str) -> bool {
        self.has_parsed(&parse_command(raw))
    }

    pub(crate) fn has_parsed(&self, cmd: &ParsedCommand) -> bool {
        self.lookup(&cmd.name)
            .is_some_and(|spec| !spec.requires_parameters || !cmd.is_empty())
    }

    /// All commands in registration order
    pub fn all_commands(&self) -> impl Iterator<Item = &'static CommandSpec> {
        self.specs.iter()
    }

    /// Get all command names in registration order
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.specs.iter().map(|s| s.name)
    }

    /// Get the number of registered commands
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Help text: one `name\thelp` line per command, in registration order
    pub fn help(&self) -> String {
        let mut text = String::new();
        for spec in self.specs {
            text.push_str(spec.name);
            text.push('\t');
            text.push_str(spec.help);
            text.push('\n');
        }
        text
    }
}
