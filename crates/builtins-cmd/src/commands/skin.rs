//! Skin setting commands
//!
//! Skin strings and bools are addressed by name and resolved to an index by
//! the skin settings store. Commands that prompt only store a confirmed
//! answer; all of them persist the settings afterwards.

use crate::args::ParsedCommand;
use crate::command::{CommandContext, Flow};
use crate::commands::with_trailing_slash;
use crate::error::{CmdError, CmdResult};
use crate::host::{AddonType, BrowseRequest};

const SKIN_THEME: &str = "lookandfeel.skintheme";
const SKIN_COLORS: &str = "lookandfeel.skincolors";
const DEFAULT_THEME: &str = "SKINDEFAULT";

fn setting_name<'a>(cmd: &'a ParsedCommand, command: &str) -> CmdResult<&'a str> {
    cmd.get(0).ok_or_else(|| CmdError::missing(command, -1))
}

pub fn toggle_setting(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    let name = setting_name(cmd, "Skin.ToggleSetting")?;
    let skin = ctx.services.skin.as_ref();
    let id = skin.translate_bool(name);
    skin.set_bool(id, !skin.get_bool(id));
    ctx.services.settings.save();
    Ok(Flow::Done)
}

/// Set a skin bool, `true` unless a second parameter says otherwise
pub fn set_bool(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    let name = setting_name(cmd, "Skin.SetBool")?;
    let value = if cmd.len() > 1 { cmd.get_bool(1) } else { true };

    let skin = ctx.services.skin.as_ref();
    skin.set_bool(skin.translate_bool(name), value);
    ctx.services.settings.save();
    Ok(Flow::Done)
}

pub fn reset(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    let name = setting_name(cmd, "Skin.Reset")?;
    ctx.services.skin.reset(name);
    ctx.services.settings.save();
    Ok(Flow::Done)
}

pub fn reset_settings(ctx: &CommandContext) -> CmdResult<Flow> {
    ctx.services.skin.reset_all();
    ctx.services.settings.save();
    Ok(Flow::Done)
}

fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) if !name[dot..].contains(['/', '\\']) => &name[..dot],
        _ => name,
    }
}

/// Step through the installed skin themes
///
/// `0` or `1` selects the next theme and `-1` the previous one. Stepping
/// past either end lands on the skin default. The color theme follows the
/// selected theme.
pub fn theme(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    let services = ctx.services;
    let themes = services.skin.themes();
    let last = themes.len() as i64 - 1;

    let current = services.settings.get_string(SKIN_THEME);
    let mut index: i64 = if current.eq_ignore_ascii_case(DEFAULT_THEME) {
        -1
    } else {
        let current = strip_extension(&current);
        themes
            .iter()
            .position(|t| t.eq_ignore_ascii_case(current))
            .map_or(-1, |i| i as i64)
    };

    match cmd.get_int(0) {
        0 | 1 => index += 1,
        -1 => index -= 1,
        _ => {}
    }
    if index > last {
        index = -1;
    }
    if index < -1 {
        index = last;
    }

    let theme = usize::try_from(index)
        .ok()
        .and_then(|i| themes.get(i))
        .map_or(DEFAULT_THEME, String::as_str);

    let mut colors = format!("{}.xml", strip_extension(theme));
    if colors.eq_ignore_ascii_case("Textures.xml") {
        colors = "defaults.xml".to_string();
    }

    log::debug!("Skin.Theme: switching to '{}'", theme);
    services.settings.set_string(SKIN_THEME, theme);
    services.settings.set_string(SKIN_COLORS, &colors);
    services.skin.reload_skin(false);
    Ok(Flow::Done)
}

/// Resolve a skin string, run `prompt` seeded with its value and store a
/// confirmed answer
fn prompt_string<F>(ctx: &CommandContext, name: &str, prompt: F)
where
    F: FnOnce(&str) -> Option<String>,
{
    let skin = ctx.services.skin.as_ref();
    let id = skin.translate_string(name);
    let current = skin.get_string(id);
    if let Some(value) = prompt(&current) {
        skin.set_string(id, &value);
    }
    ctx.services.settings.save();
}

/// Set a skin string, literally with two parameters or else from the keyboard
pub fn set_string(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    let name = setting_name(cmd, "Skin.SetString")?;

    if let Some(value) = cmd.get(1) {
        let skin = ctx.services.skin.as_ref();
        skin.set_string(skin.translate_string(name), value);
        ctx.services.settings.save();
        return Ok(Flow::Done);
    }

    let dialogs = ctx.services.dialogs.as_ref();
    prompt_string(ctx, name, |current| dialogs.keyboard("Enter value", current));
    Ok(Flow::Done)
}

pub fn set_numeric(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    let name = setting_name(cmd, "Skin.SetNumeric")?;
    let dialogs = ctx.services.dialogs.as_ref();
    prompt_string(ctx, name, |current| dialogs.numeric("Enter number", current));
    Ok(Flow::Done)
}

pub fn set_image(ctx: &CommandContext, cmd: &ParsedCommand, large: bool) -> CmdResult<Flow> {
    let command = if large { "Skin.SetLargeImage" } else { "Skin.SetImage" };
    let name = setting_name(cmd, command)?;

    let dialogs = ctx.services.dialogs.as_ref();
    let request = BrowseRequest::Image { large };
    prompt_string(ctx, name, |current| dialogs.browse("Choose image", &request, current));
    Ok(Flow::Done)
}

fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Browse for a file or an add-on and store its path
///
/// When p[1] names an add-on type the browser lists enabled add-ons of that
/// type (p[2] filters by content) and the add-on id is stored. Otherwise p[1]
/// is a file mask and p[2] an extra folder to offer.
pub fn set_file(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    let name = setting_name(cmd, "Skin.SetFile")?;
    let dialogs = ctx.services.dialogs.as_ref();
    let mask = cmd.get_or(1, "").to_ascii_lowercase();

    match AddonType::from_name(&mask) {
        Some(addon_type) => {
            let request = BrowseRequest::Addon {
                addon_type,
                content: cmd.get_or(2, "").to_ascii_lowercase(),
            };
            prompt_string(ctx, name, |current| {
                dialogs.browse("Choose add-on", &request, current).map(|chosen| {
                    if chosen.starts_with("addons://") {
                        file_name(&chosen).to_string()
                    } else {
                        chosen
                    }
                })
            });
        }
        None => {
            let extra_source = cmd.get(2).map(with_trailing_slash);
            let request = BrowseRequest::File {
                mask,
                extra_source: extra_source.clone(),
            };
            prompt_string(ctx, name, |current| {
                let initial = extra_source.as_deref().unwrap_or(current);
                dialogs.browse("Choose file", &request, initial)
            });
        }
    }
    Ok(Flow::Done)
}

pub fn set_path(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    let name = setting_name(cmd, "Skin.SetPath")?;
    let dialogs = ctx.services.dialogs.as_ref();

    let extra_source = cmd.get(1).map(with_trailing_slash);
    let request = BrowseRequest::Directory {
        extra_source: extra_source.clone(),
    };
    prompt_string(ctx, name, |current| {
        let initial = extra_source.as_deref().unwrap_or(current);
        dialogs.browse("Choose folder", &request, initial)
    });
    Ok(Flow::Done)
}

/// Let the user pick an add-on of the listed types and store its id
pub fn set_addon(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    if cmd.len() < 2 {
        return Err(CmdError::missing("Skin.SetAddon", -1));
    }

    let types: Vec<AddonType> = cmd
        .rest(1)
        .iter()
        .filter_map(|t| AddonType::from_name(t))
        .collect();
    if types.is_empty() {
        log::debug!("Skin.SetAddon: no known add-on types in {:?}", cmd.rest(1));
        return Ok(Flow::Done);
    }

    if let Some(id) = ctx.services.addons.select_addon(&types, true) {
        let skin = ctx.services.skin.as_ref();
        skin.set_string(skin.translate_string(cmd.first()), &id);
        ctx.services.settings.save();
    }
    Ok(Flow::Done)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::setup;
    use crate::recorder::HostCall;

    #[test]
    fn test_toggle_and_set_bool() {
        let (host, mut executor) = setup();
        executor.execute("Skin.ToggleSetting(ShowClock)");
        assert!(host.skin_bool("showclock"));
        executor.execute("Skin.ToggleSetting(ShowClock)");
        assert!(!host.skin_bool("showclock"));

        executor.execute("Skin.SetBool(Compact)");
        assert!(host.skin_bool("Compact"));
        executor.execute("Skin.SetBool(Compact,no)");
        assert!(!host.skin_bool("Compact"));
        assert_eq!(host.calls().last(), Some(&HostCall::SaveSettings));
    }

    #[test]
    fn test_missing_setting_name() {
        let (host, mut executor) = setup();
        let bare = [
            "Skin.SetBool",
            "Skin.SetString",
            "Skin.SetPath",
            "Skin.Reset",
            "Skin.ToggleSetting",
            "Skin.SetAddon(x)",
        ];
        for cmd in bare {
            assert_eq!(executor.execute(cmd), -1, "{}", cmd);
        }
        assert!(!executor.has_command("Skin.ToggleSetting"));
        assert!(!executor.has_command("Skin.Reset()"));
        assert!(host.calls().is_empty());
    }

    #[test]
    fn test_set_string_literal_and_prompt() {
        let (host, mut executor) = setup();
        executor.execute("Skin.SetString(Label,Hello)");
        assert_eq!(host.skin_string("label"), "Hello");

        host.push_input(None);
        executor.execute("Skin.SetString(Label)");
        assert_eq!(host.skin_string("label"), "Hello");

        host.push_input(Some("42"));
        executor.execute("Skin.SetNumeric(Label)");
        assert_eq!(host.skin_string("label"), "42");
        assert_eq!(host.calls().last(), Some(&HostCall::SaveSettings));
    }

    #[test]
    fn test_set_file_addon_browse_stores_id() {
        let (host, mut executor) = setup();
        host.push_input(Some("addons://enabled/xbmc.python.script/script.clock"));
        executor.execute("Skin.SetFile(Widget,xbmc.python.script)");
        assert_eq!(host.skin_string("widget"), "script.clock");

        host.push_input(Some("/media/pic.png"));
        executor.execute("Skin.SetFile(Backdrop,.png|.jpg,/media)");
        assert_eq!(host.skin_string("backdrop"), "/media/pic.png");
    }

    #[test]
    fn test_set_path_and_images() {
        let (host, mut executor) = setup();
        host.push_input(Some("/srv/music/"));
        executor.execute("Skin.SetPath(Folder,/srv)");
        host.push_input(Some("/pics/big.jpg"));
        executor.execute("Skin.SetLargeImage(Fanart)");
        assert_eq!(host.skin_string("folder"), "/srv/music/");
        assert_eq!(host.skin_string("fanart"), "/pics/big.jpg");
    }

    #[test]
    fn test_reset_and_reset_settings() {
        let (host, mut executor) = setup();
        host.set_skin_string("Label", "x");
        executor.execute("Skin.Reset(Label)");
        assert_eq!(host.skin_string("label"), "");
        executor.execute("Skin.ResetSettings");
        assert_eq!(
            host.calls(),
            vec![
                HostCall::ResetSkinSetting("Label".into()),
                HostCall::SaveSettings,
                HostCall::ResetSkinSettings,
                HostCall::SaveSettings,
            ]
        );
    }

    #[test]
    fn test_theme_cycles_and_wraps() {
        let (host, mut executor) = setup();
        host.set_themes(&["Blue", "Textures"]);
        host.set_setting(SKIN_THEME, DEFAULT_THEME);

        executor.execute("Skin.Theme(1)");
        assert_eq!(host.setting(SKIN_THEME), "Blue");
        assert_eq!(host.setting(SKIN_COLORS), "Blue.xml");

        executor.execute("Skin.Theme(1)");
        assert_eq!(host.setting(SKIN_THEME), "Textures");
        assert_eq!(host.setting(SKIN_COLORS), "defaults.xml");

        executor.execute("Skin.Theme(1)");
        assert_eq!(host.setting(SKIN_THEME), DEFAULT_THEME);

        executor.execute("Skin.Theme(-1)");
        assert_eq!(host.setting(SKIN_THEME), "Textures");
        assert_eq!(host.calls().last(), Some(&HostCall::ReloadSkin { confirm: false }));
    }

    #[test]
    fn test_theme_with_extension_in_setting() {
        let (host, mut executor) = setup();
        host.set_themes(&["Blue", "Red"]);
        host.set_setting(SKIN_THEME, "Blue.xbt");
        executor.execute("Skin.Theme(0)");
        assert_eq!(host.setting(SKIN_THEME), "Red");
    }

    #[test]
    fn test_set_addon() {
        let (host, mut executor) = setup();
        executor.execute("Skin.SetAddon(Viz,bogus.type)");
        assert!(host.calls().is_empty());

        host.push_input(Some("visualization.spectrum"));
        executor.execute("Skin.SetAddon(Viz,xbmc.player.musicviz)");
        assert_eq!(host.skin_string("viz"), "visualization.spectrum");
    }
}
