//! Add-on, script and plugin commands
//!
//! `RunAddon` performs no action of its own: it rewrites itself into an
//! `ActivateWindow`, `RunPlugin` or `RunScript` command that the executor
//! dispatches next.

use crate::args::ParsedCommand;
use crate::command::{CommandContext, Flow};
use crate::error::{CmdError, CmdResult};
use crate::host::{AddonInfo, AddonType, GuiMessage};
use crate::parser::format_command;

/// Script paths may be add-on ids; resolve those to the add-on entry point
fn resolve_script(ctx: &CommandContext, param: &str) -> (String, Option<AddonInfo>) {
    match ctx.services.addons.get_addon(param, &[]) {
        Some(addon) => (addon.lib_path.clone(), Some(addon)),
        None => (param.to_string(), None),
    }
}

/// Run a script by path or add-on id
///
/// The script sees the parameters as its argument vector, with the first
/// replaced by the last backslash-separated component of the script path.
pub fn run_script(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    if cmd.is_empty() {
        return Err(CmdError::missing("RunScript", -1));
    }

    let script = cmd.first();
    let (path, addon) = resolve_script(ctx, script);

    let mut argv = cmd.params.clone();
    argv[0] = script.rsplit('\\').next().unwrap_or(script).to_string();

    log::debug!("RunScript: running '{}'", path);
    ctx.services.scripts.run_script(&path, addon.as_ref(), &argv);
    Ok(Flow::Done)
}

pub fn stop_script(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    if cmd.is_empty() {
        return Err(CmdError::missing("StopScript", -1));
    }
    let (path, _) = resolve_script(ctx, cmd.first());
    ctx.services.scripts.stop_script(&path);
    Ok(Flow::Done)
}

#[cfg(target_os = "macos")]
pub fn run_apple_script(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    ctx.services.scripts.run_apple_script(cmd.first());
    Ok(Flow::Done)
}

pub fn run_plugin(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    match cmd.get(0) {
        Some(url) => ctx.services.scripts.run_plugin(url),
        None => log::error!("RunPlugin called with no arguments"),
    }
    Ok(Flow::Done)
}

/// URL suffix a plugin is started with
///
/// A single `/...` or `?...` parameter is used as is; several parameters
/// become a query string. Without parameters the suffix is `/`.
fn plugin_url_suffix(params: &[String]) -> String {
    match params {
        [] => "/".to_string(),
        [single] if single.starts_with('/') || single.starts_with('?') => single.clone(),
        many => format!("?{}", many.join("&")),
    }
}

/// Rewrite `RunAddon(id[,params...])` into the command that runs the add-on
pub fn run_addon(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    if cmd.is_empty() {
        log::error!("RunAddon called with no arguments");
        return Ok(Flow::Done);
    }

    let id = cmd.first();
    let addons = ctx.services.addons.as_ref();

    let next = if let Some(plugin) = addons.get_addon(id, &[AddonType::Plugin]) {
        let provides = plugin.provides;
        let window = if provides.video {
            Some("Videos")
        } else if provides.audio {
            Some("Music")
        } else if provides.executable {
            Some("Programs")
        } else if provides.image {
            Some("Pictures")
        } else {
            None
        };

        match window {
            Some(window) => ParsedCommand::new("ActivateWindow")
                .with_param(window)
                .with_param(format!("plugin://{}{}", id, plugin_url_suffix(cmd.rest(1))))
                .with_param("return"),
            None => ParsedCommand {
                name: "RunPlugin".to_string(),
                params: cmd.params.clone(),
            },
        }
    } else if addons
        .get_addon(id, &[AddonType::Script, AddonType::ScriptWeather, AddonType::ScriptLyrics])
        .is_some()
    {
        ParsedCommand {
            name: "RunScript".to_string(),
            params: cmd.params.clone(),
        }
    } else {
        return Err(CmdError::UnknownAddon(id.to_string()));
    };

    Ok(Flow::Redispatch(format_command(&next)))
}

fn addon_type_param(cmd: &ParsedCommand) -> CmdResult<AddonType> {
    AddonType::from_name(cmd.first()).ok_or_else(|| {
        CmdError::invalid_arg("type", format!("unknown add-on type '{}'", cmd.first()))
    })
}

fn single_param(cmd: &ParsedCommand, command: &str) -> CmdResult {
    if cmd.len() == 1 {
        Ok(())
    } else {
        Err(CmdError::missing(command, -1))
    }
}

/// Open the settings of the default add-on of a type
pub fn default_open_settings(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    single_param(cmd, "Addon.Default.OpenSettings")?;
    let addon_type = addon_type_param(cmd)?;

    let Some(addon) = ctx.services.addons.default_addon(addon_type) else {
        ctx.warn(&format!("Addon.Default.OpenSettings: no default add-on for {:?}", addon_type));
        return Ok(Flow::Done);
    };

    ctx.services.addons.open_settings(&addon);
    if addon_type == AddonType::Visualization {
        ctx.services.windows.send_message(GuiMessage::VisualisationReload);
    }
    Ok(Flow::Done)
}

/// Let the user choose the default add-on of a type
pub fn default_set(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    single_param(cmd, "Addon.Default.Set")?;
    let addon_type = addon_type_param(cmd)?;
    let is_viz = addon_type == AddonType::Visualization;

    let addons = ctx.services.addons.as_ref();
    if let Some(id) = addons.select_addon(&[addon_type], is_viz) {
        addons.set_default(addon_type, &id);
        if is_viz {
            ctx.services.windows.send_message(GuiMessage::VisualisationReload);
        }
    }
    Ok(Flow::Done)
}

pub fn open_settings(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    single_param(cmd, "Addon.OpenSettings")?;
    let addons = ctx.services.addons.as_ref();
    let addon = addons
        .get_addon(cmd.first(), &[])
        .ok_or_else(|| CmdError::UnknownAddon(cmd.first().to_string()))?;
    addons.open_settings(&addon);
    Ok(Flow::Done)
}
