//! Media and notification commands

use crate::args::{strip_prefix_ignore_case, ParsedCommand};
use crate::command::{CommandContext, Flow};
use crate::commands::with_trailing_slash;
use crate::error::{CmdError, CmdResult};
use crate::host::{SlideshowFlags, Toast, ToastLevel};

const SCREENSHOT_PATTERN: &str = "screenshot%03d.png";
const MAX_SCREENSHOTS: u32 = 999;

/// Take a screenshot
///
/// Without parameters the host picks the destination. An existing folder
/// receives the next free `screenshotNNN.png`; any other path is used as the
/// file name. `sync` as the second parameter waits for the capture.
pub fn take_screenshot(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    let media = ctx.services.media.as_ref();
    let Some(target) = cmd.get(0) else {
        media.take_screenshot(None, false);
        return Ok(Flow::Done);
    };
    if target.is_empty() {
        return Ok(Flow::Done);
    }

    let sync = cmd.param_is(1, "sync");
    if media.directory_exists(target) {
        let pattern = format!("{}{}", with_trailing_slash(target), SCREENSHOT_PATTERN);
        match media.next_free_filename(&pattern, MAX_SCREENSHOTS) {
            Some(file) => media.take_screenshot(Some(&file), sync),
            None => ctx.warn(&format!("Too many screenshots or invalid folder {}", target)),
        }
    } else {
        media.take_screenshot(Some(target), sync);
    }
    Ok(Flow::Done)
}

/// Start a slideshow of a folder
///
/// `SlideShow(dir[,recursive][,[not]random][,pause][,beginslide=path])`.
/// `RecursiveSlideShow` takes no options.
pub fn slideshow(ctx: &CommandContext, cmd: &ParsedCommand, recursive: bool) -> CmdResult<Flow> {
    let Some(path) = cmd.get(0) else {
        return Err(CmdError::missing(cmd.name.as_str(), -2));
    };

    let mut flags = SlideshowFlags::default();
    let mut begin_slide = "";
    if recursive {
        flags.recursive = true;
    } else {
        for option in cmd.rest(1) {
            if option.eq_ignore_ascii_case("recursive") {
                flags.recursive = true;
            } else if option.eq_ignore_ascii_case("random") {
                flags.random = true;
            } else if option.eq_ignore_ascii_case("notrandom") {
                flags.not_random = true;
            } else if option.eq_ignore_ascii_case("pause") {
                flags.pause = true;
            } else if let Some(slide) = strip_prefix_ignore_case(option, "beginslide=") {
                begin_slide = slide;
            }
        }
    }

    ctx.services.media.start_slideshow(path, begin_slide, flags);
    Ok(Flow::Done)
}

pub fn show_picture(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    let Some(path) = cmd.get(0) else {
        return Err(CmdError::missing("ShowPicture", -2));
    };
    ctx.services.media.show_picture(path);
    Ok(Flow::Done)
}

/// Folder part of a path, up to and including the last separator
fn parent_directory(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(i) => &path[..=i],
        None => "",
    }
}

/// Extract an archive next to itself or into the folder given as p[1]
pub fn extract(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    let Some(archive) = cmd.get(0) else {
        return Err(CmdError::missing("Extract", -1));
    };

    let destination = with_trailing_slash(cmd.get(1).unwrap_or_else(|| parent_directory(archive)));
    if !ctx.services.media.extract_archive(archive, &destination) {
        return Err(CmdError::collaborator(format!(
            "could not extract '{}' to '{}'",
            archive, destination
        )));
    }
    Ok(Flow::Done)
}

/// Announce a message to all connected clients
///
/// The optional third parameter is JSON data attached to the announcement.
pub fn notify_all(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    if cmd.len() < 2 {
        log::error!("NotifyAll needs two parameters");
        return Ok(Flow::Done);
    }

    let data = match cmd.get(2) {
        Some(raw) => serde_json::from_str::<serde_json::Value>(raw).unwrap_or_else(|e| {
            ctx.warn(&format!("NotifyAll: ignoring malformed data '{}': {}", raw, e));
            serde_json::Value::Null
        }),
        None => serde_json::Value::Null,
    };

    ctx.services
        .notifier
        .announce(cmd.first(), cmd.get_or(1, ""), data);
    Ok(Flow::Done)
}

/// `Notification(title,message[,time[,icon]])`
pub fn notification(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    if cmd.len() < 2 {
        return Err(CmdError::missing("Notification", -1));
    }

    let (icon, display_ms) = match cmd.len() {
        4 => (cmd.get_or(3, ""), Some(cmd.get_int(2))),
        3 => ("", Some(cmd.get_int(2))),
        _ => ("", None),
    };

    ctx.services.notifier.queue_toast(Toast {
        level: ToastLevel::Info,
        icon: icon.to_string(),
        title: cmd.first().to_string(),
        message: cmd.get_or(1, "").to_string(),
        display_ms,
    });
    Ok(Flow::Done)
}
