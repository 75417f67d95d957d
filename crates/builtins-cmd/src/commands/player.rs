//! Player commands
//!
//! `PlayerControl` takes a single sub-command keyword. Keywords are matched
//! case-insensitively; `seekpercentage` and `partymode` carry a nested call
//! argument such as `seekpercentage(50)`, re-parsed here with `split_call`.

use phf::phf_map;

use crate::args::{atof, atoi, strip_prefix_ignore_case, ParsedCommand};
use crate::command::{CommandContext, Flow};
use crate::error::{CmdError, CmdResult};
use crate::host::{
    GuiMessage, MediaItem, MediaKind, PartyModeContext, PlayerAction, PlaylistId, RepeatState,
    StartOffset, WindowId,
};
use crate::parser::split_call;

/// Speed multipliers beyond this magnitude reset to normal playback
const MAX_PLAY_SPEED: i32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Play,
    Stop,
    Rewind,
    Forward,
    Next,
    Previous,
    BigSkipBackward,
    BigSkipForward,
    SmallSkipBackward,
    SmallSkipForward,
    ShowVideoMenu,
    Record,
    SeekPercentage,
    PartyMode,
    Random,
    RandomOn,
    RandomOff,
    Repeat,
    RepeatAll,
    RepeatOne,
    RepeatOff,
}

static VERBS: phf::Map<&'static str, Verb> = phf_map! {
    "play" => Verb::Play,
    "stop" => Verb::Stop,
    "rewind" => Verb::Rewind,
    "forward" => Verb::Forward,
    "next" => Verb::Next,
    "previous" => Verb::Previous,
    "bigskipbackward" => Verb::BigSkipBackward,
    "bigskipforward" => Verb::BigSkipForward,
    "smallskipbackward" => Verb::SmallSkipBackward,
    "smallskipforward" => Verb::SmallSkipForward,
    "showvideomenu" => Verb::ShowVideoMenu,
    "record" => Verb::Record,
    "random" => Verb::Random,
    "randomon" => Verb::RandomOn,
    "randomoff" => Verb::RandomOff,
    "repeat" => Verb::Repeat,
    "repeatall" => Verb::RepeatAll,
    "repeatone" => Verb::RepeatOne,
    "repeatoff" => Verb::RepeatOff,
};

/// Exact keyword first, then the keywords that take a suffix
fn lookup_verb(verb: &str) -> Option<Verb> {
    let verb = verb.to_ascii_lowercase();
    if let Some(v) = VERBS.get(verb.as_str()) {
        return Some(*v);
    }
    if verb.starts_with("seekpercentage") {
        Some(Verb::SeekPercentage)
    } else if verb.starts_with("partymode") {
        Some(Verb::PartyMode)
    } else if verb.starts_with("repeat") {
        Some(Verb::Repeat)
    } else {
        None
    }
}

/// Next speed multiplier for a rewind or fast-forward step
///
/// Rewinding from normal speed starts at -2; stepping towards normal speed
/// halves the multiplier. Leaving the `±MAX_PLAY_SPEED` range resets to 1.
pub fn next_speed(speed: i32, rewind: bool) -> i32 {
    let next = if rewind && speed == 1 {
        -2
    } else if rewind && speed > 1 {
        speed / 2
    } else if !rewind && speed < 1 {
        match speed / 2 {
            -1 => 1,
            s => s,
        }
    } else {
        speed.saturating_mul(2)
    };

    if next.unsigned_abs() > MAX_PLAY_SPEED.unsigned_abs() {
        1
    } else {
        next
    }
}

/// Execute a `PlayerControl` sub-command
pub fn player_control(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    let services = ctx.services;
    services.system.reset_screensaver();
    services.system.wake_screensaver();

    if cmd.is_empty() {
        return Err(CmdError::missing("PlayerControl", -3));
    }

    let param = cmd.first();
    let Some(verb) = lookup_verb(param) else {
        log::debug!("PlayerControl: ignoring unknown sub-command '{}'", param);
        return Ok(Flow::Done);
    };

    let player = services.player.as_ref();
    let playing = player.is_playing();

    match verb {
        Verb::Play => {
            if playing {
                if player.play_speed() != 1 {
                    player.set_play_speed(1);
                } else {
                    player.pause();
                }
            }
        }
        Verb::Stop => player.stop(),
        Verb::Rewind | Verb::Forward => {
            if playing && !player.is_paused() {
                player.set_play_speed(next_speed(player.play_speed(), verb == Verb::Rewind));
            }
        }
        Verb::Next => player.on_action(PlayerAction::NextItem),
        Verb::Previous => player.on_action(PlayerAction::PreviousItem),
        Verb::BigSkipBackward
        | Verb::BigSkipForward
        | Verb::SmallSkipBackward
        | Verb::SmallSkipForward => {
            if playing {
                let forward = matches!(verb, Verb::BigSkipForward | Verb::SmallSkipForward);
                let big = matches!(verb, Verb::BigSkipBackward | Verb::BigSkipForward);
                player.seek(forward, big);
            }
        }
        Verb::ShowVideoMenu => {
            if playing {
                player.on_action(PlayerAction::ShowVideoMenu);
            }
        }
        Verb::Record => {
            if playing && player.can_record() {
                player.record(!player.is_recording());
            }
        }
        Verb::SeekPercentage => seek_percentage(ctx, param)?,
        Verb::PartyMode => party_mode(ctx, param),
        Verb::Random | Verb::RandomOn | Verb::RandomOff => shuffle(ctx, cmd, verb),
        Verb::Repeat | Verb::RepeatAll | Verb::RepeatOne | Verb::RepeatOff => {
            repeat(ctx, cmd, verb)
        }
    }
    Ok(Flow::Done)
}

fn seek_percentage(ctx: &CommandContext, param: &str) -> CmdResult {
    const NAME: &str = "PlayerControl(seekpercentage(n))";

    let arg = match split_call(param).1 {
        None => return Err(CmdError::missing(NAME, -1)),
        Some(arg) if arg.trim().is_empty() => {
            return Err(CmdError::invalid_arg(NAME, format!("invalid argument \"{}\"", param)));
        }
        Some(arg) => arg,
    };

    let percent = atof(arg);
    if !(0.0..=100.0).contains(&percent) {
        return Err(CmdError::invalid_arg(
            NAME,
            format!("argument, {}, must be 0-100", percent),
        ));
    }

    let player = ctx.services.player.as_ref();
    if player.is_playing() {
        player.seek_percentage(percent);
    }
    Ok(())
}

/// Toggle party mode
///
/// `partymode` and `partymode(music)` select music, `partymode(video)` video;
/// anything else is the path of a smart playlist.
fn party_mode(ctx: &CommandContext, param: &str) {
    let player = ctx.services.player.as_ref();
    if player.is_party_mode() {
        player.disable_party_mode();
        return;
    }

    let (context, path) = match split_call(param).1 {
        None => (PartyModeContext::Music, ""),
        Some(arg) if arg.eq_ignore_ascii_case("music") => (PartyModeContext::Music, ""),
        Some(arg) if arg.eq_ignore_ascii_case("video") => (PartyModeContext::Video, ""),
        Some(path) => (PartyModeContext::SmartPlaylist, path),
    };
    player.enable_party_mode(context, path);
}

fn notify_requested(cmd: &ParsedCommand) -> bool {
    cmd.len() == 2 && cmd.param_is(1, "notify")
}

fn shuffle(ctx: &CommandContext, cmd: &ParsedCommand, verb: Verb) {
    let playlists = ctx.services.playlists.as_ref();
    let playlist = playlists.current_playlist();

    let shuffled = playlists.is_shuffled(playlist);
    if (shuffled && verb == Verb::RandomOn) || (!shuffled && verb == Verb::RandomOff) {
        return;
    }

    playlists.set_shuffle(playlist, !shuffled, notify_requested(cmd));
    let shuffled = playlists.is_shuffled(playlist);

    if matches!(playlist, PlaylistId::Music | PlaylistId::Video) {
        let settings = ctx.services.settings.as_ref();
        settings.set_playlist_shuffled(playlist, shuffled);
        settings.save();
    }

    ctx.services
        .windows
        .send_message(GuiMessage::PlaylistShuffled { playlist, shuffled });
}

fn repeat(ctx: &CommandContext, cmd: &ParsedCommand, verb: Verb) {
    let playlists = ctx.services.playlists.as_ref();
    let playlist = playlists.current_playlist();
    let previous = playlists.repeat(playlist);

    let state = match verb {
        Verb::RepeatAll => RepeatState::All,
        Verb::RepeatOne => RepeatState::One,
        Verb::RepeatOff => RepeatState::Off,
        _ => match previous {
            RepeatState::Off => RepeatState::All,
            RepeatState::All => RepeatState::One,
            RepeatState::One => RepeatState::Off,
        },
    };

    if state == previous {
        return;
    }

    playlists.set_repeat(playlist, state, notify_requested(cmd));

    if matches!(playlist, PlaylistId::Music | PlaylistId::Video) {
        let settings = ctx.services.settings.as_ref();
        settings.set_playlist_repeat(playlist, state == RepeatState::All);
        settings.save();
    }

    ctx.services
        .windows
        .send_message(GuiMessage::PlaylistRepeat { playlist, state });
}

/// Play a file, folder or playlist
pub fn play_media(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    if cmd.is_empty() {
        return Err(CmdError::missing("PlayMedia", -3));
    }

    let services = ctx.services;
    let path = cmd.first();
    let mut item = MediaItem::new(path);
    item.is_folder = path.ends_with('/') || path.ends_with('\\');

    let active = services.windows.active_window();
    if matches!(
        active,
        WindowId::SLIDESHOW | WindowId::FULLSCREEN_VIDEO | WindowId::VISUALISATION
    ) {
        services.windows.previous_window();
    }

    services.system.reset_screensaver();
    services.system.wake_screensaver();

    let mut ask_to_resume = true;
    let mut play_offset = 0;
    for flag in cmd.rest(1) {
        if flag.eq_ignore_ascii_case("isdir") {
            item.is_folder = true;
        } else if flag == "1" {
            services.settings.set_video_start_windowed(true);
        } else if flag.eq_ignore_ascii_case("resume") {
            item.start_offset = StartOffset::Resume;
            ask_to_resume = false;
        } else if flag.eq_ignore_ascii_case("noresume") {
            ask_to_resume = false;
        } else if let Some(offset) = strip_prefix_ignore_case(flag, "playoffset=") {
            play_offset = atoi(offset) - 1;
            item.playlist_start = Some(play_offset);
        }
    }

    if !item.is_folder && item.is_plugin() {
        item.playable = true;
    }

    if ask_to_resume && !services.dialogs.resume_menu(&mut item) {
        log::debug!("PlayMedia: resume question declined for '{}'", path);
        return Ok(Flow::Done);
    }

    let playlists = services.playlists.as_ref();
    if item.is_folder {
        let media = services.media.as_ref();
        let entries: Vec<(String, MediaKind)> = media
            .list_directory(&item.path)
            .into_iter()
            .map(|entry| {
                let kind = media.media_kind(&entry);
                (entry, kind)
            })
            .filter(|(_, kind)| matches!(kind, MediaKind::Audio | MediaKind::Video))
            .collect();

        let contains_video = entries.iter().any(|(_, kind)| *kind == MediaKind::Video);
        let playlist = if contains_video { PlaylistId::Video } else { PlaylistId::Music };

        // mixed folders play their videos only
        let items: Vec<MediaItem> = entries
            .into_iter()
            .filter(|(_, kind)| !contains_video || *kind == MediaKind::Video)
            .map(|(entry, _)| MediaItem::new(entry))
            .collect();

        playlists.clear_playlist(playlist);
        playlists.add(playlist, &items);
        playlists.set_current_playlist(playlist);
        playlists.play(play_offset);
    } else {
        let playlist = if services.media.media_kind(&item.path) == MediaKind::Audio {
            PlaylistId::Music
        } else {
            PlaylistId::Video
        };
        playlists.clear_playlist(playlist);
        playlists.set_current_playlist(playlist);

        if !services.player.play_media(&item, playlist) {
            return Err(CmdError::collaborator(format!("could not play media: {}", path)));
        }
    }
    Ok(Flow::Done)
}

/// Play the selected item with a forced player core
pub fn play_with(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    let player = ctx.services.player.as_ref();
    player.force_core(cmd.first());
    player.on_action(PlayerAction::Play);
    Ok(Flow::Done)
}

pub fn set_volume(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    let player = ctx.services.player.as_ref();
    let old = player.volume();
    let volume = cmd.get_float(0);
    player.set_volume(volume);

    if old != volume && cmd.param_is(1, "showVolumeBar") {
        ctx.services.system.show_volume_bar(old < volume);
    }
    Ok(Flow::Done)
}
