//! Recording host
//!
//! `RecordingHost` implements every collaborator trait in memory. State changing
//! calls are appended to a call log as `HostCall` values; queries answer from
//! scriptable state. Tests assert on the log, and the console example uses
//! the host as a dry-run backend.

use std::collections::VecDeque;

use ahash::AHashMap;
use parking_lot::Mutex;

use crate::host::*;

/// Zero-argument system and device calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemCall {
    Restart,
    Shutdown,
    Powerdown,
    RestartApp,
    Hibernate,
    Suspend,
    Quit,
    Minimize,
    ActivateScreensaver,
    WakeScreensaver,
    ResetScreensaver,
    RefreshRss,
    ToggleDpms,
    CecToggleState,
    CecActivateSource,
    CecStandby,
    StartPvrManager,
    StopPvrManager,
    LoadMasterProfileForLogin,
    ClearVideoCache,
    LircStart,
    LircStop,
    EjectTray,
    RipCd,
}

/// One recorded collaborator call
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    System(SystemCall),
    // Windows
    ActivateWindow { id: WindowId, params: Vec<String>, replace: bool },
    PreviousWindow,
    Message(GuiMessage),
    CloseDialogs { force: bool },
    CloseDialog { id: WindowId, force: bool },
    SetProperty { window: WindowId, key: String, value: String },
    // Player
    SetPlaySpeed(i32),
    Pause,
    Stop,
    Seek { forward: bool, big: bool },
    SeekPercentage(f64),
    PlayerAction(PlayerAction),
    Record(bool),
    PlayMedia { path: String, playlist: PlaylistId, resume: bool },
    ForceCore(String),
    EnablePartyMode { context: PartyModeContext, path: String },
    DisablePartyMode,
    ToggleMute,
    SetVolume(f64),
    // Playlists
    SetCurrentPlaylist(PlaylistId),
    SetShuffle { playlist: PlaylistId, shuffle: bool, notify: bool },
    SetRepeat { playlist: PlaylistId, state: RepeatState, notify: bool },
    ClearPlaylist(PlaylistId),
    AddToPlaylist { playlist: PlaylistId, paths: Vec<String> },
    PlaylistPlay(i32),
    PlaylistPlayNext(i32),
    PlaylistReset,
    PlaylistClearAll,
    // Settings
    SetSetting { key: String, value: String },
    SetSettingBool { key: String, value: bool },
    SetPlaylistShuffled { playlist: PlaylistId, shuffled: bool },
    SetPlaylistRepeat { playlist: PlaylistId, repeat_all: bool },
    SetVideoStartWindowed(bool),
    SaveSettings,
    // Skin
    SetSkinString { name: String, value: String },
    SetSkinBool { name: String, value: bool },
    ResetSkinSetting(String),
    ResetSkinSettings,
    ReloadSkin { confirm: bool },
    UnloadSkin,
    // Add-ons
    SetDefaultAddon { addon_type: AddonType, id: String },
    OpenAddonSettings(String),
    UpdateRepos,
    FindAddons,
    StopAddonServices,
    // Alarms
    StartAlarm { name: String, seconds: f64, command: String, silent: bool, looping: bool },
    StopAlarm { name: String, silent: bool },
    // Network
    WakeOnLan(String),
    ExecShell { command: String, wait: bool },
    ServicesDown,
    StartEventServer,
    // System
    InhibitIdleShutdown(bool),
    SetGuiLanguage(String),
    ShowVolumeBar { up: bool },
    SetResolution(Resolution),
    SetDebugMode(bool),
    SendAction { action: ActionId, window: Option<WindowId> },
    SetStereoMode(StereoMode),
    StartAndroidActivity(Vec<String>),
    LircSend(String),
    LoadProfile(usize),
    SetMasterUser(bool),
    LockSources(bool),
    // Library
    StartMusicScan(String),
    StopMusicScan,
    StartVideoScan(String),
    StopVideoScan,
    StartVideoCleanup,
    CleanMusic,
    ExportVideo {
        path: String,
        single_file: bool,
        thumbs: bool,
        actor_thumbs: bool,
        overwrite: bool,
    },
    ExportMusic { path: String, single_file: bool, thumbs: bool, overwrite: bool },
    // Media
    Screenshot { path: Option<String>, sync: bool },
    StartSlideshow { path: String, begin_slide: String, flags: SlideshowFlags },
    ShowPicture(String),
    ExtractArchive { archive: String, destination: String },
    PlayDisc { restart: bool },
    // Scripts
    RunScript { path: String, addon: Option<String>, argv: Vec<String> },
    StopScript(String),
    RunPlugin(String),
    RunAppleScript(String),
    // Notifications
    Toast(Toast),
    Announce { sender: String, message: String, data: serde_json::Value },
}

#[derive(Debug)]
struct HostState {
    calls: Vec<HostCall>,

    playing: bool,
    paused: bool,
    speed: i32,
    can_record: bool,
    recording: bool,
    party_mode: bool,
    volume: f64,
    play_media_result: bool,

    current_playlist: PlaylistId,
    shuffled: AHashMap<PlaylistId, bool>,
    repeat: AHashMap<PlaylistId, RepeatState>,

    windows: AHashMap<String, WindowId>,
    dialogs: Vec<WindowId>,
    focused: WindowId,
    active: WindowId,

    settings: AHashMap<String, String>,
    setting_bools: AHashMap<String, bool>,

    skin_strings: Vec<(String, String)>,
    skin_bools: Vec<(String, bool)>,
    themes: Vec<String>,

    addons: Vec<AddonInfo>,
    default_addons: AHashMap<AddonType, String>,

    alarm_running: bool,
    music_scanning: bool,
    video_scanning: bool,

    inputs: VecDeque<Option<String>>,
    yes_no: VecDeque<Option<bool>>,
    resume_answer: Option<bool>,

    directories: AHashMap<String, Vec<String>>,
    existing_files: Vec<String>,
    extract_result: bool,
    event_server_result: bool,
    valid_resolution: bool,

    actions: AHashMap<String, ActionId>,
    profiles: Vec<String>,
    master_user: bool,
    master_unlock: bool,
    lock_everyone: bool,
    profile_unlock: bool,
}

impl Default for HostState {
    fn default() -> Self {
        let windows = [
            ("home", WindowId::HOME),
            ("programs", WindowId(10001)),
            ("pictures", WindowId(10002)),
            ("settings", WindowId(10004)),
            ("videos", WindowId::VIDEO_NAV),
            ("music", WindowId(10502)),
            ("loginscreen", WindowId::LOGIN_SCREEN),
            ("fullscreenvideo", WindowId::FULLSCREEN_VIDEO),
            ("visualisation", WindowId::VISUALISATION),
            ("slideshow", WindowId::SLIDESHOW),
            ("weather", WindowId::WEATHER),
            ("yesnodialog", WindowId(10100)),
            ("busydialog", WindowId(10138)),
        ]
        .into_iter()
        .map(|(name, id)| (name.to_string(), id))
        .collect();

        Self {
            calls: Vec::new(),
            playing: false,
            paused: false,
            speed: 1,
            can_record: false,
            recording: false,
            party_mode: false,
            volume: 100.0,
            play_media_result: true,
            current_playlist: PlaylistId::None,
            shuffled: AHashMap::new(),
            repeat: AHashMap::new(),
            windows,
            dialogs: Vec::new(),
            focused: WindowId::HOME,
            active: WindowId::HOME,
            settings: AHashMap::new(),
            setting_bools: AHashMap::new(),
            skin_strings: Vec::new(),
            skin_bools: Vec::new(),
            themes: Vec::new(),
            addons: Vec::new(),
            default_addons: AHashMap::new(),
            alarm_running: false,
            music_scanning: false,
            video_scanning: false,
            inputs: VecDeque::new(),
            yes_no: VecDeque::new(),
            resume_answer: Some(false),
            directories: AHashMap::new(),
            existing_files: Vec::new(),
            extract_result: true,
            event_server_result: true,
            valid_resolution: true,
            actions: AHashMap::new(),
            profiles: vec!["Master user".to_string()],
            master_user: false,
            master_unlock: false,
            lock_everyone: true,
            profile_unlock: false,
        }
    }
}

impl HostState {
    fn record(&mut self, call: HostCall) {
        self.calls.push(call);
    }

    fn skin_string_index(&mut self, name: &str) -> usize {
        match self.skin_strings.iter().position(|(n, _)| n.eq_ignore_ascii_case(name)) {
            Some(i) => i,
            None => {
                self.skin_strings.push((name.to_string(), String::new()));
                self.skin_strings.len() - 1
            }
        }
    }

    fn skin_bool_index(&mut self, name: &str) -> usize {
        match self.skin_bools.iter().position(|(n, _)| n.eq_ignore_ascii_case(name)) {
            Some(i) => i,
            None => {
                self.skin_bools.push((name.to_string(), false));
                self.skin_bools.len() - 1
            }
        }
    }
}

/// In-memory host that records every state changing call
#[derive(Debug, Default)]
pub struct RecordingHost {
    state: Mutex<HostState>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded so far, oldest first
    pub fn calls(&self) -> Vec<HostCall> {
        self.state.lock().calls.clone()
    }

    /// Return and clear the recorded calls
    pub fn take_calls(&self) -> Vec<HostCall> {
        std::mem::take(&mut self.state.lock().calls)
    }

    // --- scripting -----------------------------------------------------------

    pub fn set_playing(&self, playing: bool) {
        self.state.lock().playing = playing;
    }

    pub fn set_paused(&self, paused: bool) {
        self.state.lock().paused = paused;
    }

    pub fn set_speed(&self, speed: i32) {
        self.state.lock().speed = speed;
    }

    pub fn speed(&self) -> i32 {
        self.state.lock().speed
    }

    pub fn set_can_record(&self, can_record: bool) {
        self.state.lock().can_record = can_record;
    }

    pub fn set_party_mode(&self, on: bool) {
        self.state.lock().party_mode = on;
    }

    pub fn set_play_media_result(&self, ok: bool) {
        self.state.lock().play_media_result = ok;
    }

    pub fn select_playlist(&self, playlist: PlaylistId) {
        self.state.lock().current_playlist = playlist;
    }

    pub fn set_shuffled(&self, playlist: PlaylistId, shuffled: bool) {
        self.state.lock().shuffled.insert(playlist, shuffled);
    }

    pub fn set_repeat_state(&self, playlist: PlaylistId, state: RepeatState) {
        self.state.lock().repeat.insert(playlist, state);
    }

    /// Register a window name the translator accepts
    pub fn add_window(&self, name: &str, id: WindowId) {
        self.state.lock().windows.insert(name.to_ascii_lowercase(), id);
    }

    /// Mark a window as an open dialog
    pub fn open_dialog(&self, id: WindowId) {
        self.state.lock().dialogs.push(id);
    }

    pub fn set_focused_window(&self, id: WindowId) {
        self.state.lock().focused = id;
    }

    pub fn set_active_window(&self, id: WindowId) {
        self.state.lock().active = id;
    }

    pub fn add_addon(&self, addon: AddonInfo) {
        self.state.lock().addons.push(addon);
    }

    /// Install a plugin add-on providing `provides`
    pub fn add_plugin(&self, id: &str, provides: PluginContent) {
        self.add_addon(AddonInfo {
            id: id.to_string(),
            addon_type: AddonType::Plugin,
            lib_path: format!("special://home/addons/{}/default.py", id),
            provides,
        });
    }

    /// Install a plain script add-on
    pub fn add_script_addon(&self, id: &str) {
        self.add_addon(AddonInfo {
            id: id.to_string(),
            addon_type: AddonType::Script,
            lib_path: format!("special://home/addons/{}/default.py", id),
            provides: PluginContent::default(),
        });
    }

    pub fn set_default_addon(&self, addon_type: AddonType, id: &str) {
        self.state.lock().default_addons.insert(addon_type, id.to_string());
    }

    pub fn set_skin_string(&self, name: &str, value: &str) {
        let mut state = self.state.lock();
        let i = state.skin_string_index(name);
        state.skin_strings[i].1 = value.to_string();
    }

    pub fn skin_string(&self, name: &str) -> String {
        let state = self.state.lock();
        state
            .skin_strings
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone())
            .unwrap_or_default()
    }

    pub fn skin_bool(&self, name: &str) -> bool {
        let state = self.state.lock();
        state
            .skin_bools
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .is_some_and(|(_, v)| *v)
    }

    pub fn set_themes(&self, themes: &[&str]) {
        self.state.lock().themes = themes.iter().map(|t| t.to_string()).collect();
    }

    pub fn set_setting(&self, key: &str, value: &str) {
        self.state.lock().settings.insert(key.to_string(), value.to_string());
    }

    pub fn setting(&self, key: &str) -> String {
        self.state.lock().settings.get(key).cloned().unwrap_or_default()
    }

    pub fn setting_bool(&self, key: &str) -> bool {
        self.state.lock().setting_bools.get(key).copied().unwrap_or(false)
    }

    pub fn set_alarm_running(&self, running: bool) {
        self.state.lock().alarm_running = running;
    }

    pub fn set_scanning(&self, music: bool, video: bool) {
        let mut state = self.state.lock();
        state.music_scanning = music;
        state.video_scanning = video;
    }

    /// Queue an answer for the next keyboard, numeric, browse or select prompt
    ///
    /// `None` answers as a cancelled prompt. An empty queue cancels.
    pub fn push_input(&self, answer: Option<&str>) {
        self.state.lock().inputs.push_back(answer.map(str::to_string));
    }

    /// Queue an answer for the next yes/no prompt, `None` cancels
    pub fn push_yes_no(&self, answer: Option<bool>) {
        self.state.lock().yes_no.push_back(answer);
    }

    /// Answer to the resume question: `Some(true)` resumes, `None` backs out
    pub fn set_resume_answer(&self, answer: Option<bool>) {
        self.state.lock().resume_answer = answer;
    }

    /// Register a directory and its entries
    pub fn add_directory(&self, path: &str, entries: &[&str]) {
        self.state
            .lock()
            .directories
            .insert(path.to_string(), entries.iter().map(|e| e.to_string()).collect());
    }

    pub fn add_existing_file(&self, path: &str) {
        self.state.lock().existing_files.push(path.to_string());
    }

    pub fn set_extract_result(&self, ok: bool) {
        self.state.lock().extract_result = ok;
    }

    pub fn set_event_server_result(&self, ok: bool) {
        self.state.lock().event_server_result = ok;
    }

    pub fn set_resolution_valid(&self, valid: bool) {
        self.state.lock().valid_resolution = valid;
    }

    pub fn add_action(&self, name: &str, id: ActionId) {
        self.state.lock().actions.insert(name.to_ascii_lowercase(), id);
    }

    pub fn add_profile(&self, name: &str) {
        self.state.lock().profiles.push(name.to_string());
    }

    pub fn set_master_mode(&self, master: bool) {
        self.state.lock().master_user = master;
    }

    /// Whether master lock and profile lock prompts succeed
    pub fn set_lock_answers(&self, lock_everyone: bool, master_unlock: bool, profile_unlock: bool) {
        let mut state = self.state.lock();
        state.lock_everyone = lock_everyone;
        state.master_unlock = master_unlock;
        state.profile_unlock = profile_unlock;
    }

    fn push_call(&self, call: HostCall) {
        self.state.lock().record(call);
    }

    fn system(&self, call: SystemCall) {
        self.push_call(HostCall::System(call));
    }
}

impl WindowManager for RecordingHost {
    fn translate_window(&self, name: &str) -> Option<WindowId> {
        if let Ok(id) = name.trim().parse::<i32>() {
            return Some(WindowId(id));
        }
        self.state.lock().windows.get(&name.to_ascii_lowercase()).copied()
    }

    fn activate_window(&self, id: WindowId, params: &[String], replace: bool) {
        let mut state = self.state.lock();
        state.active = id;
        state.focused = id;
        state.record(HostCall::ActivateWindow {
            id,
            params: params.to_vec(),
            replace,
        });
    }

    fn previous_window(&self) {
        self.push_call(HostCall::PreviousWindow);
    }

    fn send_message(&self, msg: GuiMessage) {
        self.push_call(HostCall::Message(msg));
    }

    fn focused_window(&self) -> WindowId {
        self.state.lock().focused
    }

    fn active_window(&self) -> WindowId {
        self.state.lock().active
    }

    fn close_dialogs(&self, force: bool) {
        let mut state = self.state.lock();
        state.dialogs.clear();
        state.record(HostCall::CloseDialogs { force });
    }

    fn close_dialog(&self, id: WindowId, force: bool) -> bool {
        let mut state = self.state.lock();
        let Some(pos) = state.dialogs.iter().position(|&d| d == id) else {
            return false;
        };
        state.dialogs.remove(pos);
        state.record(HostCall::CloseDialog { id, force });
        true
    }

    fn set_property(&self, window: WindowId, key: &str, value: &str) -> bool {
        let mut state = self.state.lock();
        let exists = state.windows.values().any(|&w| w == window);
        if exists {
            state.record(HostCall::SetProperty {
                window,
                key: key.to_string(),
                value: value.to_string(),
            });
        }
        exists
    }
}

impl Player for RecordingHost {
    fn is_playing(&self) -> bool {
        self.state.lock().playing
    }

    fn is_paused(&self) -> bool {
        self.state.lock().paused
    }

    fn play_speed(&self) -> i32 {
        self.state.lock().speed
    }

    fn set_play_speed(&self, speed: i32) {
        let mut state = self.state.lock();
        state.speed = speed;
        state.record(HostCall::SetPlaySpeed(speed));
    }

    fn pause(&self) {
        let mut state = self.state.lock();
        state.paused = !state.paused;
        state.record(HostCall::Pause);
    }

    fn stop(&self) {
        let mut state = self.state.lock();
        state.playing = false;
        state.paused = false;
        state.record(HostCall::Stop);
    }

    fn seek(&self, forward: bool, big: bool) {
        self.push_call(HostCall::Seek { forward, big });
    }

    fn seek_percentage(&self, percent: f64) {
        self.push_call(HostCall::SeekPercentage(percent));
    }

    fn on_action(&self, action: PlayerAction) {
        self.push_call(HostCall::PlayerAction(action));
    }

    fn can_record(&self) -> bool {
        self.state.lock().can_record
    }

    fn is_recording(&self) -> bool {
        self.state.lock().recording
    }

    fn record(&self, on: bool) {
        let mut state = self.state.lock();
        state.recording = on;
        state.record(HostCall::Record(on));
    }

    fn play_media(&self, item: &MediaItem, playlist: PlaylistId) -> bool {
        let mut state = self.state.lock();
        state.record(HostCall::PlayMedia {
            path: item.path.clone(),
            playlist,
            resume: item.start_offset == StartOffset::Resume,
        });
        if state.play_media_result {
            state.playing = true;
        }
        state.play_media_result
    }

    fn force_core(&self, core: &str) {
        self.push_call(HostCall::ForceCore(core.to_string()));
    }

    fn is_party_mode(&self) -> bool {
        self.state.lock().party_mode
    }

    fn enable_party_mode(&self, context: PartyModeContext, smart_playlist: &str) {
        let mut state = self.state.lock();
        state.party_mode = true;
        state.record(HostCall::EnablePartyMode {
            context,
            path: smart_playlist.to_string(),
        });
    }

    fn disable_party_mode(&self) {
        let mut state = self.state.lock();
        state.party_mode = false;
        state.record(HostCall::DisablePartyMode);
    }

    fn toggle_mute(&self) {
        self.push_call(HostCall::ToggleMute);
    }

    fn volume(&self) -> f64 {
        self.state.lock().volume
    }

    fn set_volume(&self, volume: f64) {
        let mut state = self.state.lock();
        state.volume = volume;
        state.record(HostCall::SetVolume(volume));
    }
}

impl PlaylistPlayer for RecordingHost {
    fn current_playlist(&self) -> PlaylistId {
        self.state.lock().current_playlist
    }

    fn set_current_playlist(&self, playlist: PlaylistId) {
        let mut state = self.state.lock();
        state.current_playlist = playlist;
        state.record(HostCall::SetCurrentPlaylist(playlist));
    }

    fn is_shuffled(&self, playlist: PlaylistId) -> bool {
        self.state.lock().shuffled.get(&playlist).copied().unwrap_or(false)
    }

    fn set_shuffle(&self, playlist: PlaylistId, shuffle: bool, notify: bool) {
        let mut state = self.state.lock();
        state.shuffled.insert(playlist, shuffle);
        state.record(HostCall::SetShuffle {
            playlist,
            shuffle,
            notify,
        });
    }

    fn repeat(&self, playlist: PlaylistId) -> RepeatState {
        self.state.lock().repeat.get(&playlist).copied().unwrap_or(RepeatState::Off)
    }

    fn set_repeat(&self, playlist: PlaylistId, state: RepeatState, notify: bool) {
        let mut guard = self.state.lock();
        guard.repeat.insert(playlist, state);
        guard.record(HostCall::SetRepeat {
            playlist,
            state,
            notify,
        });
    }

    fn clear_playlist(&self, playlist: PlaylistId) {
        self.push_call(HostCall::ClearPlaylist(playlist));
    }

    fn add(&self, playlist: PlaylistId, items: &[MediaItem]) {
        self.push_call(HostCall::AddToPlaylist {
            playlist,
            paths: items.iter().map(|i| i.path.clone()).collect(),
        });
    }

    fn play(&self, offset: i32) {
        let mut state = self.state.lock();
        state.playing = true;
        state.record(HostCall::PlaylistPlay(offset));
    }

    fn play_next(&self, offset: i32) {
        self.push_call(HostCall::PlaylistPlayNext(offset));
    }

    fn reset(&self) {
        self.push_call(HostCall::PlaylistReset);
    }

    fn clear(&self) {
        self.push_call(HostCall::PlaylistClearAll);
    }
}

impl SettingsStore for RecordingHost {
    fn get_string(&self, key: &str) -> String {
        self.setting(key)
    }

    fn set_string(&self, key: &str, value: &str) {
        let mut state = self.state.lock();
        state.settings.insert(key.to_string(), value.to_string());
        state.record(HostCall::SetSetting {
            key: key.to_string(),
            value: value.to_string(),
        });
    }

    fn get_bool(&self, key: &str) -> bool {
        self.setting_bool(key)
    }

    fn set_bool(&self, key: &str, value: bool) {
        let mut state = self.state.lock();
        state.setting_bools.insert(key.to_string(), value);
        state.record(HostCall::SetSettingBool {
            key: key.to_string(),
            value,
        });
    }

    fn set_playlist_shuffled(&self, playlist: PlaylistId, shuffled: bool) {
        self.push_call(HostCall::SetPlaylistShuffled { playlist, shuffled });
    }

    fn set_playlist_repeat(&self, playlist: PlaylistId, repeat_all: bool) {
        self.push_call(HostCall::SetPlaylistRepeat { playlist, repeat_all });
    }

    fn set_video_start_windowed(&self, windowed: bool) {
        self.push_call(HostCall::SetVideoStartWindowed(windowed));
    }

    fn save(&self) {
        self.push_call(HostCall::SaveSettings);
    }
}

impl SkinSettings for RecordingHost {
    fn translate_string(&self, name: &str) -> usize {
        self.state.lock().skin_string_index(name)
    }

    fn translate_bool(&self, name: &str) -> usize {
        self.state.lock().skin_bool_index(name)
    }

    fn get_string(&self, id: usize) -> String {
        let state = self.state.lock();
        state.skin_strings.get(id).map(|(_, v)| v.clone()).unwrap_or_default()
    }

    fn set_string(&self, id: usize, value: &str) {
        let mut state = self.state.lock();
        let Some(entry) = state.skin_strings.get_mut(id) else {
            return;
        };
        entry.1 = value.to_string();
        let name = entry.0.clone();
        state.record(HostCall::SetSkinString {
            name,
            value: value.to_string(),
        });
    }

    fn get_bool(&self, id: usize) -> bool {
        self.state.lock().skin_bools.get(id).is_some_and(|(_, v)| *v)
    }

    fn set_bool(&self, id: usize, value: bool) {
        let mut state = self.state.lock();
        let Some(entry) = state.skin_bools.get_mut(id) else {
            return;
        };
        entry.1 = value;
        let name = entry.0.clone();
        state.record(HostCall::SetSkinBool { name, value });
    }

    fn reset(&self, name: &str) {
        let mut state = self.state.lock();
        for (n, v) in state.skin_strings.iter_mut() {
            if n.eq_ignore_ascii_case(name) {
                v.clear();
            }
        }
        for (n, v) in state.skin_bools.iter_mut() {
            if n.eq_ignore_ascii_case(name) {
                *v = false;
            }
        }
        state.record(HostCall::ResetSkinSetting(name.to_string()));
    }

    fn reset_all(&self) {
        let mut state = self.state.lock();
        state.skin_strings.clear();
        state.skin_bools.clear();
        state.record(HostCall::ResetSkinSettings);
    }

    fn themes(&self) -> Vec<String> {
        self.state.lock().themes.clone()
    }

    fn reload_skin(&self, confirm: bool) {
        self.push_call(HostCall::ReloadSkin { confirm });
    }

    fn unload_skin(&self) {
        self.push_call(HostCall::UnloadSkin);
    }
}

impl AddonManager for RecordingHost {
    fn get_addon(&self, id: &str, types: &[AddonType]) -> Option<AddonInfo> {
        let state = self.state.lock();
        state
            .addons
            .iter()
            .find(|a| a.id == id && (types.is_empty() || types.contains(&a.addon_type)))
            .cloned()
    }

    fn default_addon(&self, addon_type: AddonType) -> Option<AddonInfo> {
        let state = self.state.lock();
        let id = state.default_addons.get(&addon_type)?;
        state.addons.iter().find(|a| &a.id == id).cloned()
    }

    fn set_default(&self, addon_type: AddonType, id: &str) {
        let mut state = self.state.lock();
        state.default_addons.insert(addon_type, id.to_string());
        state.record(HostCall::SetDefaultAddon {
            addon_type,
            id: id.to_string(),
        });
    }

    fn open_settings(&self, addon: &AddonInfo) {
        self.push_call(HostCall::OpenAddonSettings(addon.id.clone()));
    }

    fn select_addon(&self, _types: &[AddonType], _allow_none: bool) -> Option<String> {
        self.state.lock().inputs.pop_front().flatten()
    }

    fn update_repos(&self) {
        self.push_call(HostCall::UpdateRepos);
    }

    fn find_addons(&self) {
        self.push_call(HostCall::FindAddons);
    }

    fn stop_services(&self) {
        self.push_call(HostCall::StopAddonServices);
    }
}

impl AlarmClock for RecordingHost {
    fn is_running(&self) -> bool {
        self.state.lock().alarm_running
    }

    fn start(&self, name: &str, seconds: f64, command: &str, silent: bool, looping: bool) {
        let mut state = self.state.lock();
        state.alarm_running = true;
        state.record(HostCall::StartAlarm {
            name: name.to_string(),
            seconds,
            command: command.to_string(),
            silent,
            looping,
        });
    }

    fn stop(&self, name: &str, silent: bool) {
        let mut state = self.state.lock();
        state.alarm_running = false;
        state.record(HostCall::StopAlarm {
            name: name.to_string(),
            silent,
        });
    }
}

impl Network for RecordingHost {
    fn wake_on_lan(&self, mac: &str) -> bool {
        self.push_call(HostCall::WakeOnLan(mac.to_string()));
        true
    }

    fn exec_shell(&self, command: &str, wait: bool) {
        self.push_call(HostCall::ExecShell {
            command: command.to_string(),
            wait,
        });
    }

    fn services_down(&self) {
        self.push_call(HostCall::ServicesDown);
    }

    fn start_event_server(&self) -> bool {
        let mut state = self.state.lock();
        state.record(HostCall::StartEventServer);
        state.event_server_result
    }
}

impl SystemControl for RecordingHost {
    fn restart(&self) {
        self.system(SystemCall::Restart);
    }

    fn shutdown(&self) {
        self.system(SystemCall::Shutdown);
    }

    fn powerdown(&self) {
        self.system(SystemCall::Powerdown);
    }

    fn restart_app(&self) {
        self.system(SystemCall::RestartApp);
    }

    fn hibernate(&self) {
        self.system(SystemCall::Hibernate);
    }

    fn suspend(&self) {
        self.system(SystemCall::Suspend);
    }

    fn quit(&self) {
        self.system(SystemCall::Quit);
    }

    fn minimize(&self) {
        self.system(SystemCall::Minimize);
    }

    fn inhibit_idle_shutdown(&self, inhibit: bool) {
        self.push_call(HostCall::InhibitIdleShutdown(inhibit));
    }

    fn activate_screensaver(&self) {
        self.system(SystemCall::ActivateScreensaver);
    }

    fn wake_screensaver(&self) {
        self.system(SystemCall::WakeScreensaver);
    }

    fn reset_screensaver(&self) {
        self.system(SystemCall::ResetScreensaver);
    }

    fn set_gui_language(&self, language: &str) {
        self.push_call(HostCall::SetGuiLanguage(language.to_string()));
    }

    fn show_volume_bar(&self, up: bool) {
        self.push_call(HostCall::ShowVolumeBar { up });
    }

    fn is_valid_resolution(&self, _resolution: Resolution) -> bool {
        self.state.lock().valid_resolution
    }

    fn set_resolution(&self, resolution: Resolution) {
        self.push_call(HostCall::SetResolution(resolution));
    }

    fn refresh_rss(&self) {
        self.system(SystemCall::RefreshRss);
    }

    fn toggle_dpms(&self) {
        self.system(SystemCall::ToggleDpms);
    }

    fn cec_toggle_state(&self) {
        self.system(SystemCall::CecToggleState);
    }

    fn cec_activate_source(&self) {
        self.system(SystemCall::CecActivateSource);
    }

    fn cec_standby(&self) {
        self.system(SystemCall::CecStandby);
    }

    fn start_pvr_manager(&self) {
        self.system(SystemCall::StartPvrManager);
    }

    fn stop_pvr_manager(&self) {
        self.system(SystemCall::StopPvrManager);
    }

    fn set_debug_mode(&self, enabled: bool) {
        self.push_call(HostCall::SetDebugMode(enabled));
    }

    fn translate_action(&self, name: &str) -> Option<ActionId> {
        self.state.lock().actions.get(&name.to_ascii_lowercase()).copied()
    }

    fn send_action(&self, action: ActionId, window: Option<WindowId>) {
        self.push_call(HostCall::SendAction { action, window });
    }

    fn set_stereo_mode(&self, mode: StereoMode) {
        self.push_call(HostCall::SetStereoMode(mode));
    }

    fn start_android_activity(&self, params: &[String]) {
        self.push_call(HostCall::StartAndroidActivity(params.to_vec()));
    }

    fn lirc_start(&self) {
        self.system(SystemCall::LircStart);
    }

    fn lirc_stop(&self) {
        self.system(SystemCall::LircStop);
    }

    fn lirc_send(&self, command: &str) {
        self.push_call(HostCall::LircSend(command.to_string()));
    }

    fn profile_index(&self, name: &str) -> Option<usize> {
        self.state.lock().profiles.iter().position(|p| p.eq_ignore_ascii_case(name))
    }

    fn master_lock_everyone(&self) -> bool {
        self.state.lock().lock_everyone
    }

    fn unlock_profile(&self, _index: usize, _prompt: bool) -> bool {
        self.state.lock().profile_unlock
    }

    fn load_profile(&self, index: usize) {
        self.push_call(HostCall::LoadProfile(index));
    }

    fn load_master_profile_for_login(&self) {
        self.system(SystemCall::LoadMasterProfileForLogin);
    }

    fn is_master_user(&self) -> bool {
        self.state.lock().master_user
    }

    fn set_master_user(&self, master: bool) {
        let mut state = self.state.lock();
        state.master_user = master;
        state.record(HostCall::SetMasterUser(master));
    }

    fn unlock_master(&self) -> bool {
        self.state.lock().master_unlock
    }

    fn lock_sources(&self, lock: bool) {
        self.push_call(HostCall::LockSources(lock));
    }

    fn clear_video_cache(&self) {
        self.system(SystemCall::ClearVideoCache);
    }
}

impl Dialogs for RecordingHost {
    fn keyboard(&self, _heading: &str, _initial: &str) -> Option<String> {
        self.state.lock().inputs.pop_front().flatten()
    }

    fn numeric(&self, _heading: &str, _initial: &str) -> Option<String> {
        self.state.lock().inputs.pop_front().flatten()
    }

    fn browse(&self, _heading: &str, _request: &BrowseRequest, _initial: &str) -> Option<String> {
        self.state.lock().inputs.pop_front().flatten()
    }

    fn yes_no(&self, _heading: &str, _text: &str) -> Option<bool> {
        self.state.lock().yes_no.pop_front().flatten()
    }

    fn resume_menu(&self, item: &mut MediaItem) -> bool {
        match self.state.lock().resume_answer {
            Some(true) => {
                item.start_offset = StartOffset::Resume;
                true
            }
            Some(false) => true,
            None => false,
        }
    }
}

impl Library for RecordingHost {
    fn is_music_scanning(&self) -> bool {
        self.state.lock().music_scanning
    }

    fn is_video_scanning(&self) -> bool {
        self.state.lock().video_scanning
    }

    fn start_music_scan(&self, path: &str) {
        let mut state = self.state.lock();
        state.music_scanning = true;
        state.record(HostCall::StartMusicScan(path.to_string()));
    }

    fn stop_music_scan(&self) {
        let mut state = self.state.lock();
        state.music_scanning = false;
        state.record(HostCall::StopMusicScan);
    }

    fn start_video_scan(&self, path: &str) {
        let mut state = self.state.lock();
        state.video_scanning = true;
        state.record(HostCall::StartVideoScan(path.to_string()));
    }

    fn stop_video_scan(&self) {
        let mut state = self.state.lock();
        state.video_scanning = false;
        state.record(HostCall::StopVideoScan);
    }

    fn start_video_cleanup(&self) {
        self.push_call(HostCall::StartVideoCleanup);
    }

    fn clean_music(&self) {
        self.push_call(HostCall::CleanMusic);
    }

    fn export_video(
        &self,
        path: &str,
        single_file: bool,
        thumbs: bool,
        actor_thumbs: bool,
        overwrite: bool,
    ) {
        self.push_call(HostCall::ExportVideo {
            path: path.to_string(),
            single_file,
            thumbs,
            actor_thumbs,
            overwrite,
        });
    }

    fn export_music(&self, path: &str, single_file: bool, thumbs: bool, overwrite: bool) {
        self.push_call(HostCall::ExportMusic {
            path: path.to_string(),
            single_file,
            thumbs,
            overwrite,
        });
    }
}

impl MediaServices for RecordingHost {
    fn take_screenshot(&self, path: Option<&str>, sync: bool) {
        self.push_call(HostCall::Screenshot {
            path: path.map(str::to_string),
            sync,
        });
    }

    fn directory_exists(&self, path: &str) -> bool {
        self.state.lock().directories.contains_key(path)
    }

    fn next_free_filename(&self, pattern: &str, max: u32) -> Option<String> {
        let state = self.state.lock();
        (0..max)
            .map(|i| pattern.replace("%03d", &format!("{:03}", i)))
            .find(|candidate| !state.existing_files.contains(candidate))
    }

    fn start_slideshow(&self, path: &str, begin_slide: &str, flags: SlideshowFlags) {
        self.push_call(HostCall::StartSlideshow {
            path: path.to_string(),
            begin_slide: begin_slide.to_string(),
            flags,
        });
    }

    fn show_picture(&self, path: &str) {
        self.push_call(HostCall::ShowPicture(path.to_string()));
    }

    fn extract_archive(&self, archive: &str, destination: &str) -> bool {
        let mut state = self.state.lock();
        state.record(HostCall::ExtractArchive {
            archive: archive.to_string(),
            destination: destination.to_string(),
        });
        state.extract_result
    }

    fn list_directory(&self, path: &str) -> Vec<String> {
        self.state.lock().directories.get(path).cloned().unwrap_or_default()
    }

    fn media_kind(&self, path: &str) -> MediaKind {
        let ext = path.rsplit_once('.').map(|(_, e)| e.to_ascii_lowercase()).unwrap_or_default();
        match ext.as_str() {
            "mp3" | "flac" | "ogg" | "wav" | "m4a" => MediaKind::Audio,
            "mkv" | "avi" | "mp4" | "m2ts" | "ts" => MediaKind::Video,
            "jpg" | "jpeg" | "png" | "gif" => MediaKind::Picture,
            _ => MediaKind::Other,
        }
    }

    fn eject_tray(&self) {
        self.system(SystemCall::EjectTray);
    }

    fn rip_cd(&self) {
        self.system(SystemCall::RipCd);
    }

    fn play_disc(&self, restart: bool) {
        self.push_call(HostCall::PlayDisc { restart });
    }
}

impl ScriptRunner for RecordingHost {
    fn run_script(&self, path: &str, addon: Option<&AddonInfo>, argv: &[String]) {
        self.push_call(HostCall::RunScript {
            path: path.to_string(),
            addon: addon.map(|a| a.id.clone()),
            argv: argv.to_vec(),
        });
    }

    fn stop_script(&self, path: &str) {
        self.push_call(HostCall::StopScript(path.to_string()));
    }

    fn run_plugin(&self, url: &str) {
        self.push_call(HostCall::RunPlugin(url.to_string()));
    }

    fn run_apple_script(&self, source: &str) {
        self.push_call(HostCall::RunAppleScript(source.to_string()));
    }
}

impl Notifier for RecordingHost {
    fn queue_toast(&self, toast: Toast) {
        self.push_call(HostCall::Toast(toast));
    }

    fn announce(&self, sender: &str, message: &str, data: serde_json::Value) {
        self.push_call(HostCall::Announce {
            sender: sender.to_string(),
            message: message.to_string(),
            data,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queries_are_not_recorded() {
        let host = RecordingHost::new();
        assert!(!Player::is_playing(&host));
        assert_eq!(host.translate_window("Videos"), Some(WindowId::VIDEO_NAV));
        assert_eq!(host.translate_window("12005"), Some(WindowId::FULLSCREEN_VIDEO));
        assert!(host.calls().is_empty());
    }

    #[test]
    fn test_state_follows_calls() {
        let host = RecordingHost::new();
        host.set_play_speed(4);
        assert_eq!(host.speed(), 4);

        let id = SkinSettings::translate_string(&host, "Label");
        SkinSettings::set_string(&host, id, "x");
        assert_eq!(host.skin_string("label"), "x");

        assert_eq!(host.take_calls().len(), 2);
        assert!(host.calls().is_empty());
    }

    #[test]
    fn test_next_free_filename_skips_existing() {
        let host = RecordingHost::new();
        host.add_existing_file("/shots/screenshot000.png");
        assert_eq!(
            host.next_free_filename("/shots/screenshot%03d.png", 999).as_deref(),
            Some("/shots/screenshot001.png")
        );
    }
}
