//! Playlist commands

use crate::args::ParsedCommand;
use crate::command::{CommandContext, Flow};
use crate::error::{CmdError, CmdResult};
use crate::host::PlaylistId;

fn playlist_named(name: &str) -> CmdResult<PlaylistId> {
    PlaylistId::from_name(name).ok_or_else(|| CmdError::UnknownPlaylist(name.to_string()))
}

/// Play the item at an offset, optionally switching playlists first
///
/// `Playlist.PlayOffset(offset)` or `Playlist.PlayOffset(music|video,offset)`.
/// Parameters after the offset are ignored.
pub fn play_offset(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    let services = ctx.services;
    let playlists = services.playlists.as_ref();

    let position = if cmd.len() > 1 {
        let playlist = playlist_named(cmd.first())?;
        if playlist != playlists.current_playlist() {
            services.player.stop();
            playlists.reset();
            playlists.set_current_playlist(playlist);
        }
        cmd.get_int(1)
    } else {
        cmd.get_int(0)
    };

    if services.player.is_playing() {
        playlists.play_next(position);
    } else {
        playlists.play(position);
    }
    Ok(Flow::Done)
}

/// Clear the current playlist, or the one named by `music|video`
pub fn clear(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    let playlists = ctx.services.playlists.as_ref();
    match cmd.get(0) {
        Some(name) => playlists.clear_playlist(playlist_named(name)?),
        None => playlists.clear(),
    }
    Ok(Flow::Done)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::setup;
    use crate::recorder::HostCall;

    #[test]
    fn test_play_offset_current_playlist() {
        let (host, mut executor) = setup();
        executor.execute("Playlist.PlayOffset(3)");
        host.set_playing(true);
        executor.execute("Playlist.PlayOffset(-1)");
        assert_eq!(
            host.calls(),
            vec![HostCall::PlaylistPlay(3), HostCall::PlaylistPlayNext(-1)]
        );
    }

    #[test]
    fn test_play_offset_switches_playlist() {
        let (host, mut executor) = setup();
        host.select_playlist(PlaylistId::Music);
        executor.execute("Playlist.PlayOffset(Video,2,ignored)");
        assert_eq!(
            host.take_calls(),
            vec![
                HostCall::Stop,
                HostCall::PlaylistReset,
                HostCall::SetCurrentPlaylist(PlaylistId::Video),
                HostCall::PlaylistPlay(2),
            ]
        );

        executor.execute("Playlist.PlayOffset(video,1)");
        assert_eq!(host.take_calls(), vec![HostCall::PlaylistPlayNext(1)]);
    }

    #[test]
    fn test_unknown_playlist_selector() {
        let (host, mut executor) = setup();
        assert_eq!(executor.execute("Playlist.PlayOffset(pictures,2)"), -1);
        assert_eq!(executor.execute("Playlist.Clear(pictures)"), -1);
        assert!(host.calls().is_empty());
    }

    #[test]
    fn test_clear() {
        let (host, mut executor) = setup();
        executor.execute("Playlist.Clear");
        executor.execute("Playlist.Clear(music)");
        assert_eq!(
            host.calls(),
            vec![
                HostCall::PlaylistClearAll,
                HostCall::ClearPlaylist(PlaylistId::Music)
            ]
        );
    }
}
