//! Music and video library maintenance

use crate::args::ParsedCommand;
use crate::command::{CommandContext, Flow};
use crate::error::{CmdError, CmdResult};
use crate::host::BrowseRequest;

const MUSIC_EXPORT_FILE: &str = "musicdb.xml";

/// Start a library scan, or stop the one already running
pub fn update_library(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    if cmd.is_empty() {
        return Err(CmdError::missing("UpdateLibrary", -1));
    }

    let library = ctx.services.library.as_ref();
    let path = cmd.get_or(1, "");
    if cmd.param_is(0, "music") {
        if library.is_music_scanning() {
            library.stop_music_scan();
        } else {
            library.start_music_scan(path);
        }
    } else if cmd.param_is(0, "video") {
        if library.is_video_scanning() {
            library.stop_video_scan();
        } else {
            library.start_video_scan(path);
        }
    }
    Ok(Flow::Done)
}

/// Remove entries whose files are gone. Defaults to the video library.
pub fn clean_library(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    let library = ctx.services.library.as_ref();
    if cmd.is_empty() || cmd.param_is(0, "video") {
        if library.is_video_scanning() {
            log::error!("CleanLibrary: video library is being scanned, not cleaning");
        } else {
            library.start_video_cleanup();
        }
    } else if cmd.param_is(0, "music") {
        if library.is_music_scanning() {
            log::error!("CleanLibrary: music library is being scanned, not cleaning");
        } else {
            library.clean_music();
        }
    }
    Ok(Flow::Done)
}

/// Flag from parameter `index`, or ask the user when it was not given
fn flag_or_ask(
    ctx: &CommandContext,
    cmd: &ParsedCommand,
    index: usize,
    question: &str,
) -> CmdResult<bool> {
    match cmd.get(index) {
        Some(value) => Ok(value.eq_ignore_ascii_case("true")),
        None => ctx
            .services
            .dialogs
            .yes_no("Export library", question)
            .ok_or(CmdError::Cancelled),
    }
}

/// `ExportLibrary(music|video[,singlefile,thumbs,overwrite,actorthumbs])`
///
/// Missing flags are asked for. The third parameter doubles as the export
/// folder; without one the user browses for it unless exporting to a single
/// file.
pub fn export_library(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    if cmd.is_empty() {
        return Err(CmdError::missing("ExportLibrary", -1));
    }
    let video = cmd.param_is(0, "video");

    let single_file = flag_or_ask(ctx, cmd, 1, "Export to a single file?")?;
    let mut thumbs = false;
    let mut actor_thumbs = false;
    let mut overwrite = false;
    if single_file {
        thumbs = flag_or_ask(ctx, cmd, 2, "Export thumbnails?")?;
    }
    if thumbs && video {
        actor_thumbs = flag_or_ask(ctx, cmd, 4, "Export actor thumbnails?")?;
    }
    if single_file {
        overwrite = flag_or_ask(ctx, cmd, 3, "Overwrite old files?")?;
    }

    let mut path = cmd.get(2).unwrap_or("").to_string();
    if !single_file && path.is_empty() {
        match ctx.services.dialogs.browse(
            "Export library to",
            &BrowseRequest::Directory { extra_source: None },
            "",
        ) {
            Some(folder) => path = folder,
            None => {
                log::debug!("ExportLibrary: no destination chosen");
                return Ok(Flow::Done);
            }
        }
    }

    let library = ctx.services.library.as_ref();
    if video {
        library.export_video(&path, single_file, thumbs, actor_thumbs, overwrite);
    } else {
        if path.ends_with('/') || path.ends_with('\\') {
            path.push_str(MUSIC_EXPORT_FILE);
        }
        library.export_music(&path, single_file, thumbs, overwrite);
    }
    Ok(Flow::Done)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::setup;
    use crate::recorder::HostCall;

    #[test]
    fn test_update_library_toggles_scan() {
        let (host, mut executor) = setup();
        assert_eq!(executor.execute("UpdateLibrary"), -1);

        executor.execute("UpdateLibrary(video,/movies)");
        executor.execute("UpdateLibrary(video)");
        executor.execute("UpdateLibrary(MUSIC)");
        assert_eq!(
            host.calls(),
            vec![
                HostCall::StartVideoScan("/movies".into()),
                HostCall::StopVideoScan,
                HostCall::StartMusicScan(String::new()),
            ]
        );
    }

    #[test]
    fn test_clean_library_refuses_while_scanning() {
        let (host, mut executor) = setup();
        executor.execute("CleanLibrary");
        executor.execute("CleanLibrary(music)");
        assert_eq!(
            host.take_calls(),
            vec![HostCall::StartVideoCleanup, HostCall::CleanMusic]
        );

        host.set_scanning(true, true);
        assert_eq!(executor.execute("CleanLibrary(video)"), 0);
        assert_eq!(executor.execute("CleanLibrary(music)"), 0);
        assert!(host.calls().is_empty());
    }

    #[test]
    fn test_export_library_from_params() {
        let (host, mut executor) = setup();
        executor.execute("ExportLibrary(video,true,true,false,true)");
        executor.execute("ExportLibrary(music,false,/backup/)");
        assert_eq!(
            host.calls(),
            vec![
                HostCall::ExportVideo {
                    path: "true".into(),
                    single_file: true,
                    thumbs: true,
                    actor_thumbs: true,
                    overwrite: false
                },
                HostCall::ExportMusic {
                    path: "/backup/musicdb.xml".into(),
                    single_file: false,
                    thumbs: false,
                    overwrite: false
                },
            ]
        );
    }

    #[test]
    fn test_export_library_prompts() {
        let (host, mut executor) = setup();
        assert_eq!(executor.execute("ExportLibrary"), -1);

        host.push_yes_no(None);
        assert_eq!(executor.execute("ExportLibrary(music)"), -1);
        assert!(host.calls().is_empty());

        host.push_yes_no(Some(false));
        host.push_input(Some("/exports/"));
        executor.execute("ExportLibrary(video)");
        assert_eq!(
            host.take_calls(),
            vec![HostCall::ExportVideo {
                path: "/exports/".into(),
                single_file: false,
                thumbs: false,
                actor_thumbs: false,
                overwrite: false
            }]
        );

        host.push_yes_no(Some(false));
        host.push_input(None);
        assert_eq!(executor.execute("ExportLibrary(music)"), 0);
        assert!(host.calls().is_empty());
    }
}
