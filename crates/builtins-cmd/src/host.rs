//! Host collaborator interfaces
//!
//! Builtins act on subsystems they do not own: the window manager, the player,
//! the settings stores and so on. Each subsystem is reached through one trait
//! here, and the executor receives them bundled in `Services`.
//!
//! Methods take `&self`; collaborators are shared host services and handle
//! their own synchronization.

use std::sync::Arc;

use phf::phf_map;

/// Numeric window identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub i32);

impl WindowId {
    pub const INVALID: WindowId = WindowId(9999);
    pub const HOME: WindowId = WindowId(10000);
    pub const VIDEO_NAV: WindowId = WindowId(10025);
    pub const LOGIN_SCREEN: WindowId = WindowId(10029);
    pub const FULLSCREEN_VIDEO: WindowId = WindowId(12005);
    pub const VISUALISATION: WindowId = WindowId(12006);
    pub const SLIDESHOW: WindowId = WindowId(12007);
    pub const WEATHER: WindowId = WindowId(12600);
}

/// Keymap action identifier, as produced by `SystemControl::translate_action`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionId(pub i32);

/// Messages the builtins post to windows and controls
#[derive(Debug, Clone, PartialEq)]
pub enum GuiMessage {
    SetFocus { window: WindowId, control: i32, sub_item: i32 },
    PageUp { window: WindowId, control: i32 },
    PageDown { window: WindowId, control: i32 },
    MoveOffset { window: WindowId, control: i32, offset: i32 },
    Click { window: WindowId, control: i32 },
    /// Refresh or navigate the listing of a media window
    Update { window: WindowId, path: String, reset_history: bool },
    ChangeViewMode { window: WindowId, mode: i32, step: i32 },
    ChangeSortMethod { window: WindowId, method: i32, step: i32 },
    ToggleSortDirection { window: WindowId },
    SelectItem { window: WindowId, item: i32 },
    Search { window: WindowId },
    /// Broadcast asking every window to refresh its content
    UpdateAll,
    VisualisationReload,
    PlaylistShuffled { playlist: PlaylistId, shuffled: bool },
    PlaylistRepeat { playlist: PlaylistId, state: RepeatState },
}

/// Playlists the playlist player manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaylistId {
    None,
    Music,
    Video,
}

impl PlaylistId {
    /// Parse a `music` / `video` selector (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("music") {
            Some(PlaylistId::Music)
        } else if name.eq_ignore_ascii_case("video") {
            Some(PlaylistId::Video)
        } else {
            None
        }
    }
}

/// Playlist repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepeatState {
    Off,
    One,
    All,
}

/// Player-level actions that are not keymap translations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    NextItem,
    PreviousItem,
    ShowVideoMenu,
    Play,
}

/// Party mode content selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartyModeContext {
    Music,
    Video,
    /// Content decided by a smart playlist file
    SmartPlaylist,
}

/// Where playback of an item starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartOffset {
    #[default]
    Beginning,
    Resume,
}

/// A media item handed to the player
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MediaItem {
    pub path: String,
    pub is_folder: bool,
    pub start_offset: StartOffset,
    /// Zero-based track to start a folder playlist at
    pub playlist_start: Option<i32>,
    /// Plugin items that resolve to a single playable file
    pub playable: bool,
}

impl MediaItem {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn is_plugin(&self) -> bool {
        self.path.starts_with("plugin://")
    }
}

/// Broad classification of a media path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
    Picture,
    Other,
}

/// Display resolutions selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    Pal4x3,
    Pal16x9,
    Ntsc4x3,
    Ntsc16x9,
    Hdtv720p,
    Hdtv720pSbs,
    Hdtv720pTb,
    Hdtv1080pSbs,
    Hdtv1080pTb,
    Hdtv1080i,
}

static RESOLUTIONS: phf::Map<&'static str, Resolution> = phf_map! {
    "pal" => Resolution::Pal4x3,
    "pal16x9" => Resolution::Pal16x9,
    "ntsc" => Resolution::Ntsc4x3,
    "ntsc16x9" => Resolution::Ntsc16x9,
    "720p" => Resolution::Hdtv720p,
    "720psbs" => Resolution::Hdtv720pSbs,
    "720ptb" => Resolution::Hdtv720pTb,
    "1080psbs" => Resolution::Hdtv1080pSbs,
    "1080ptb" => Resolution::Hdtv1080pTb,
    "1080i" => Resolution::Hdtv1080i,
};

impl Resolution {
    /// Look up a resolution name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        RESOLUTIONS.get(name.to_ascii_lowercase().as_str()).copied()
    }
}

/// Stereoscopic GUI modes and mode changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StereoMode {
    Toggle,
    Next,
    Previous,
    Select,
    ToMono,
    Off,
    SplitVertical,
    SplitHorizontal,
    RowInterleaved,
    HardwareBased,
    AnaglyphCyanRed,
    AnaglyphGreenMagenta,
    Monoscopic,
}

static STEREO_MODES: phf::Map<&'static str, StereoMode> = phf_map! {
    "toggle" => StereoMode::Toggle,
    "next" => StereoMode::Next,
    "previous" => StereoMode::Previous,
    "select" => StereoMode::Select,
    "tomono" => StereoMode::ToMono,
    "off" => StereoMode::Off,
    "split_vertical" => StereoMode::SplitVertical,
    "split_horizontal" => StereoMode::SplitHorizontal,
    "row_interleaved" => StereoMode::RowInterleaved,
    "hardware_based" => StereoMode::HardwareBased,
    "anaglyph_cyan_red" => StereoMode::AnaglyphCyanRed,
    "anaglyph_green_magenta" => StereoMode::AnaglyphGreenMagenta,
    "monoscopic" => StereoMode::Monoscopic,
};

impl StereoMode {
    pub fn from_name(name: &str) -> Option<Self> {
        STEREO_MODES.get(name.to_ascii_lowercase().as_str()).copied()
    }
}

/// Add-on extension point types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddonType {
    Plugin,
    Script,
    ScriptWeather,
    ScriptLyrics,
    ScriptLibrary,
    ScriptModule,
    Visualization,
    Screensaver,
    Skin,
    Repository,
    Service,
    WebInterface,
    ScraperAlbums,
    ScraperArtists,
    ScraperMovies,
    ScraperMusicVideos,
    ScraperTvShows,
}

static ADDON_TYPES: phf::Map<&'static str, AddonType> = phf_map! {
    "xbmc.python.pluginsource" => AddonType::Plugin,
    "xbmc.python.script" => AddonType::Script,
    "xbmc.python.weather" => AddonType::ScriptWeather,
    "xbmc.python.lyrics" => AddonType::ScriptLyrics,
    "xbmc.python.library" => AddonType::ScriptLibrary,
    "xbmc.python.module" => AddonType::ScriptModule,
    "xbmc.player.musicviz" => AddonType::Visualization,
    "xbmc.ui.screensaver" => AddonType::Screensaver,
    "xbmc.gui.skin" => AddonType::Skin,
    "xbmc.addon.repository" => AddonType::Repository,
    "xbmc.service" => AddonType::Service,
    "xbmc.webinterface" => AddonType::WebInterface,
    "xbmc.metadata.scraper.albums" => AddonType::ScraperAlbums,
    "xbmc.metadata.scraper.artists" => AddonType::ScraperArtists,
    "xbmc.metadata.scraper.movies" => AddonType::ScraperMovies,
    "xbmc.metadata.scraper.musicvideos" => AddonType::ScraperMusicVideos,
    "xbmc.metadata.scraper.tvshows" => AddonType::ScraperTvShows,
};

impl AddonType {
    /// Translate an extension point name, `None` for unknown types
    pub fn from_name(name: &str) -> Option<Self> {
        ADDON_TYPES.get(name.to_ascii_lowercase().as_str()).copied()
    }
}

/// Content a plugin add-on provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PluginContent {
    pub video: bool,
    pub audio: bool,
    pub executable: bool,
    pub image: bool,
}

/// Installed add-on as seen by the builtins
#[derive(Debug, Clone, PartialEq)]
pub struct AddonInfo {
    pub id: String,
    pub addon_type: AddonType,
    /// Entry point script or library
    pub lib_path: String,
    /// Only meaningful for `AddonType::Plugin`
    pub provides: PluginContent,
}

/// On-screen notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    /// Icon path; empty means the default icon
    pub icon: String,
    pub title: String,
    pub message: String,
    /// Display time in milliseconds, `None` for the default
    pub display_ms: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
}

/// Slideshow options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlideshowFlags {
    pub recursive: bool,
    pub random: bool,
    pub not_random: bool,
    pub pause: bool,
}

impl SlideshowFlags {
    /// Bit encoding shared with slideshow windows
    pub fn bits(&self) -> u32 {
        (self.recursive as u32)
            | (self.random as u32) << 1
            | (self.not_random as u32) << 2
            | (self.pause as u32) << 3
    }
}

/// What a browse dialog should offer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseRequest {
    /// Image from local drives, or from picture sources when `large`
    Image { large: bool },
    /// File matching `mask`, optionally with an extra source root
    File { mask: String, extra_source: Option<String> },
    /// Enabled add-on of a type, optionally filtered by content
    Addon { addon_type: AddonType, content: String },
    /// Directory, optionally with an extra source root
    Directory { extra_source: Option<String> },
}

// ============================================================================
// Collaborator traits
// ============================================================================

/// Window and control management
pub trait WindowManager: Send + Sync {
    /// Translate a window name (or numeric id) to a window id
    fn translate_window(&self, name: &str) -> Option<WindowId>;
    fn activate_window(&self, id: WindowId, params: &[String], replace: bool);
    fn previous_window(&self);
    fn send_message(&self, msg: GuiMessage);
    fn focused_window(&self) -> WindowId;
    fn active_window(&self) -> WindowId;
    fn close_dialogs(&self, force: bool);
    /// Close a dialog, returns false when `id` is not an open dialog
    fn close_dialog(&self, id: WindowId, force: bool) -> bool;
    /// Set a window property, returns false when the window does not exist
    fn set_property(&self, window: WindowId, key: &str, value: &str) -> bool;
}

/// The active media player
pub trait Player: Send + Sync {
    fn is_playing(&self) -> bool;
    fn is_paused(&self) -> bool;
    fn play_speed(&self) -> i32;
    fn set_play_speed(&self, speed: i32);
    fn pause(&self);
    fn stop(&self);
    fn seek(&self, forward: bool, big: bool);
    fn seek_percentage(&self, percent: f64);
    fn on_action(&self, action: PlayerAction);
    fn can_record(&self) -> bool;
    fn is_recording(&self) -> bool;
    fn record(&self, on: bool);
    /// Start playing a single item on `playlist`, false when the player refuses
    fn play_media(&self, item: &MediaItem, playlist: PlaylistId) -> bool;
    /// Force the player core used for the next playback
    fn force_core(&self, core: &str);
    fn is_party_mode(&self) -> bool;
    fn enable_party_mode(&self, context: PartyModeContext, smart_playlist: &str);
    fn disable_party_mode(&self);
    fn toggle_mute(&self);
    fn volume(&self) -> f64;
    fn set_volume(&self, volume: f64);
}

/// Playlist player state
pub trait PlaylistPlayer: Send + Sync {
    fn current_playlist(&self) -> PlaylistId;
    fn set_current_playlist(&self, playlist: PlaylistId);
    fn is_shuffled(&self, playlist: PlaylistId) -> bool;
    fn set_shuffle(&self, playlist: PlaylistId, shuffle: bool, notify: bool);
    fn repeat(&self, playlist: PlaylistId) -> RepeatState;
    fn set_repeat(&self, playlist: PlaylistId, state: RepeatState, notify: bool);
    fn clear_playlist(&self, playlist: PlaylistId);
    fn add(&self, playlist: PlaylistId, items: &[MediaItem]);
    fn play(&self, offset: i32);
    fn play_next(&self, offset: i32);
    fn reset(&self);
    fn clear(&self);
}

/// Global settings store
pub trait SettingsStore: Send + Sync {
    fn get_string(&self, key: &str) -> String;
    fn set_string(&self, key: &str, value: &str);
    fn get_bool(&self, key: &str) -> bool;
    fn set_bool(&self, key: &str, value: bool);
    fn set_playlist_shuffled(&self, playlist: PlaylistId, shuffled: bool);
    fn set_playlist_repeat(&self, playlist: PlaylistId, repeat_all: bool);
    fn set_video_start_windowed(&self, windowed: bool);
    fn save(&self);
}

/// Skin-defined string and bool settings
pub trait SkinSettings: Send + Sync {
    fn translate_string(&self, name: &str) -> usize;
    fn translate_bool(&self, name: &str) -> usize;
    fn get_string(&self, id: usize) -> String;
    fn set_string(&self, id: usize, value: &str);
    fn get_bool(&self, id: usize) -> bool;
    fn set_bool(&self, id: usize, value: bool);
    fn reset(&self, name: &str);
    fn reset_all(&self);
    /// Theme names available for the current skin
    fn themes(&self) -> Vec<String>;
    fn reload_skin(&self, confirm: bool);
    fn unload_skin(&self);
}

/// Add-on manager
pub trait AddonManager: Send + Sync {
    /// Look up an installed add-on of one of `types`
    fn get_addon(&self, id: &str, types: &[AddonType]) -> Option<AddonInfo>;
    fn default_addon(&self, addon_type: AddonType) -> Option<AddonInfo>;
    fn set_default(&self, addon_type: AddonType, id: &str);
    fn open_settings(&self, addon: &AddonInfo);
    /// Let the user pick an add-on, `None` when cancelled
    fn select_addon(&self, types: &[AddonType], allow_none: bool) -> Option<String>;
    fn update_repos(&self);
    fn find_addons(&self);
    fn stop_services(&self);
}

/// Named countdown alarms
pub trait AlarmClock: Send + Sync {
    fn is_running(&self) -> bool;
    fn start(&self, name: &str, seconds: f64, command: &str, silent: bool, looping: bool);
    fn stop(&self, name: &str, silent: bool);
}

/// Networking and process execution
pub trait Network: Send + Sync {
    fn wake_on_lan(&self, mac: &str) -> bool;
    /// Run a shell command, blocking until it exits when `wait`
    fn exec_shell(&self, command: &str, wait: bool);
    fn services_down(&self);
    fn start_event_server(&self) -> bool;
}

/// Application lifecycle, power, profiles and input devices
pub trait SystemControl: Send + Sync {
    fn restart(&self);
    fn shutdown(&self);
    fn powerdown(&self);
    fn restart_app(&self);
    fn hibernate(&self);
    fn suspend(&self);
    fn quit(&self);
    fn minimize(&self);
    fn inhibit_idle_shutdown(&self, inhibit: bool);
    fn activate_screensaver(&self);
    fn wake_screensaver(&self);
    fn reset_screensaver(&self);
    fn set_gui_language(&self, language: &str);
    fn show_volume_bar(&self, up: bool);
    fn is_valid_resolution(&self, resolution: Resolution) -> bool;
    fn set_resolution(&self, resolution: Resolution);
    fn refresh_rss(&self);
    fn toggle_dpms(&self);
    fn cec_toggle_state(&self);
    fn cec_activate_source(&self);
    fn cec_standby(&self);
    fn start_pvr_manager(&self);
    fn stop_pvr_manager(&self);
    fn set_debug_mode(&self, enabled: bool);
    fn translate_action(&self, name: &str) -> Option<ActionId>;
    fn send_action(&self, action: ActionId, window: Option<WindowId>);
    fn set_stereo_mode(&self, mode: StereoMode);
    fn start_android_activity(&self, params: &[String]);
    fn lirc_start(&self);
    fn lirc_stop(&self);
    fn lirc_send(&self, command: &str);

    // Profiles and master lock
    fn profile_index(&self, name: &str) -> Option<usize>;
    fn master_lock_everyone(&self) -> bool;
    fn unlock_profile(&self, index: usize, prompt: bool) -> bool;
    fn load_profile(&self, index: usize);
    fn load_master_profile_for_login(&self);
    fn is_master_user(&self) -> bool;
    fn set_master_user(&self, master: bool);
    fn unlock_master(&self) -> bool;
    fn lock_sources(&self, lock: bool);
    fn clear_video_cache(&self);
}

/// Modal input dialogs
pub trait Dialogs: Send + Sync {
    fn keyboard(&self, heading: &str, initial: &str) -> Option<String>;
    fn numeric(&self, heading: &str, initial: &str) -> Option<String>;
    fn browse(&self, heading: &str, request: &BrowseRequest, initial: &str) -> Option<String>;
    /// `None` when the dialog was cancelled
    fn yes_no(&self, heading: &str, text: &str) -> Option<bool>;
    /// Ask whether to resume, false when the user backed out
    fn resume_menu(&self, item: &mut MediaItem) -> bool;
}

/// Media library scanning and export
pub trait Library: Send + Sync {
    fn is_music_scanning(&self) -> bool;
    fn is_video_scanning(&self) -> bool;
    fn start_music_scan(&self, path: &str);
    fn stop_music_scan(&self);
    fn start_video_scan(&self, path: &str);
    fn stop_video_scan(&self);
    fn start_video_cleanup(&self);
    fn clean_music(&self);
    fn export_video(
        &self,
        path: &str,
        single_file: bool,
        thumbs: bool,
        actor_thumbs: bool,
        overwrite: bool,
    );
    fn export_music(&self, path: &str, single_file: bool, thumbs: bool, overwrite: bool);
}

/// Screenshots, slideshows, archives, discs and directory listing
pub trait MediaServices: Send + Sync {
    fn take_screenshot(&self, path: Option<&str>, sync: bool);
    fn directory_exists(&self, path: &str) -> bool;
    /// First unused file name from a `%03d` pattern, `None` when all are taken
    fn next_free_filename(&self, pattern: &str, max: u32) -> Option<String>;
    fn start_slideshow(&self, path: &str, begin_slide: &str, flags: SlideshowFlags);
    fn show_picture(&self, path: &str);
    fn extract_archive(&self, archive: &str, destination: &str) -> bool;
    fn list_directory(&self, path: &str) -> Vec<String>;
    fn media_kind(&self, path: &str) -> MediaKind;
    fn eject_tray(&self);
    fn rip_cd(&self);
    fn play_disc(&self, restart: bool);
}

/// Script and plugin invocation
pub trait ScriptRunner: Send + Sync {
    fn run_script(&self, path: &str, addon: Option<&AddonInfo>, argv: &[String]);
    fn stop_script(&self, path: &str);
    fn run_plugin(&self, url: &str);
    fn run_apple_script(&self, source: &str);
}

/// Notifications to the user and to connected clients
pub trait Notifier: Send + Sync {
    fn queue_toast(&self, toast: Toast);
    fn announce(&self, sender: &str, message: &str, data: serde_json::Value);
}

/// A single value implementing every collaborator
pub trait Host:
    WindowManager
    + Player
    + PlaylistPlayer
    + SettingsStore
    + SkinSettings
    + AddonManager
    + AlarmClock
    + Network
    + SystemControl
    + Dialogs
    + Library
    + MediaServices
    + ScriptRunner
    + Notifier
{
}

impl<T> Host for T where
    T: WindowManager
        + Player
        + PlaylistPlayer
        + SettingsStore
        + SkinSettings
        + AddonManager
        + AlarmClock
        + Network
        + SystemControl
        + Dialogs
        + Library
        + MediaServices
        + ScriptRunner
        + Notifier
{
}

/// Capability bundle handed to the executor
#[derive(Clone)]
pub struct Services {
    pub windows: Arc<dyn WindowManager>,
    pub player: Arc<dyn Player>,
    pub playlists: Arc<dyn PlaylistPlayer>,
    pub settings: Arc<dyn SettingsStore>,
    pub skin: Arc<dyn SkinSettings>,
    pub addons: Arc<dyn AddonManager>,
    pub alarms: Arc<dyn AlarmClock>,
    pub network: Arc<dyn Network>,
    pub system: Arc<dyn SystemControl>,
    pub dialogs: Arc<dyn Dialogs>,
    pub library: Arc<dyn Library>,
    pub media: Arc<dyn MediaServices>,
    pub scripts: Arc<dyn ScriptRunner>,
    pub notifier: Arc<dyn Notifier>,
}

impl Services {
    /// Build a bundle where one host serves every collaborator
    pub fn uniform<H: Host + 'static>(host: Arc<H>) -> Self {
        Self {
            windows: host.clone(),
            player: host.clone(),
            playlists: host.clone(),
            settings: host.clone(),
            skin: host.clone(),
            addons: host.clone(),
            alarms: host.clone(),
            network: host.clone(),
            system: host.clone(),
            dialogs: host.clone(),
            library: host.clone(),
            media: host.clone(),
            scripts: host.clone(),
            notifier: host,
        }
    }
}
