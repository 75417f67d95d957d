//! Window and control commands
//!
//! Window activation, focus, control messages, window properties, container
//! listings and the weather window.

use crate::args::{atoi, ParsedCommand};
use crate::command::{CommandContext, Flow};
use crate::error::{CmdError, CmdResult};
use crate::host::{GuiMessage, WindowId};

/// Activate (or replace) a window by name, forwarding the remaining parameters
pub fn activate(ctx: &CommandContext, cmd: &ParsedCommand, replace: bool) -> CmdResult<Flow> {
    let name = cmd.first();
    let windows = ctx.services.windows.as_ref();

    let id = windows
        .translate_window(name)
        .ok_or_else(|| CmdError::UnknownWindow(name.to_string()))?;

    ctx.services.system.wake_screensaver();
    windows.activate_window(id, cmd.rest(1), replace);
    Ok(Flow::Done)
}

/// Activate a window, then focus `(control, sub-item)` pairs from the rest
pub fn activate_and_focus(
    ctx: &CommandContext,
    cmd: &ParsedCommand,
    replace: bool,
) -> CmdResult<Flow> {
    if cmd.is_empty() {
        return Err(CmdError::missing(cmd.name.as_str(), -1));
    }

    let windows = ctx.services.windows.as_ref();
    let name = cmd.first();
    let id = windows
        .translate_window(name)
        .ok_or_else(|| CmdError::UnknownWindow(name.to_string()))?;

    ctx.services.system.wake_screensaver();
    windows.activate_window(id, &[], replace);

    for pair in cmd.rest(1).chunks_exact(2) {
        windows.send_message(GuiMessage::SetFocus {
            window: windows.focused_window(),
            control: atoi(&pair[0]),
            sub_item: atoi(&pair[1]) + 1,
        });
    }
    Ok(Flow::Done)
}

pub fn set_focus(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    if cmd.is_empty() {
        return Err(CmdError::missing(cmd.name.as_str(), -1));
    }

    let windows = ctx.services.windows.as_ref();
    let sub_item = if cmd.len() > 1 { cmd.get_int(1) + 1 } else { 0 };
    windows.send_message(GuiMessage::SetFocus {
        window: windows.focused_window(),
        control: cmd.get_int(0),
        sub_item,
    });
    Ok(Flow::Done)
}

pub fn page(ctx: &CommandContext, cmd: &ParsedCommand, up: bool) -> CmdResult<Flow> {
    let windows = ctx.services.windows.as_ref();
    let window = windows.focused_window();
    let control = cmd.get_int(0);
    windows.send_message(if up {
        GuiMessage::PageUp { window, control }
    } else {
        GuiMessage::PageDown { window, control }
    });
    Ok(Flow::Done)
}

pub fn control_move(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    if cmd.len() < 2 {
        return Err(CmdError::missing("Control.Move", -1));
    }

    let windows = ctx.services.windows.as_ref();
    windows.send_message(GuiMessage::MoveOffset {
        window: windows.focused_window(),
        control: cmd.get_int(0),
        offset: cmd.get_int(1),
    });
    Ok(Flow::Done)
}

/// Send a named message to a control
///
/// The message name is matched case-sensitively; unknown names are ignored.
pub fn control_message(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    if cmd.len() < 2 {
        return Err(CmdError::missing("Control.Message", -1));
    }

    let windows = ctx.services.windows.as_ref();
    let control = cmd.get_int(0);
    let window = if cmd.len() == 3 {
        windows.translate_window(cmd.get_or(2, "")).unwrap_or(WindowId::INVALID)
    } else {
        windows.active_window()
    };

    let msg = match cmd.get_or(1, "") {
        "moveup" => GuiMessage::MoveOffset { window, control, offset: 1 },
        "movedown" => GuiMessage::MoveOffset { window, control, offset: -1 },
        "pageup" => GuiMessage::PageUp { window, control },
        "pagedown" => GuiMessage::PageDown { window, control },
        "click" => GuiMessage::Click { window, control },
        other => {
            log::debug!("Control.Message: ignoring message '{}'", other);
            return Ok(Flow::Done);
        }
    };
    windows.send_message(msg);
    Ok(Flow::Done)
}

/// Click a control, in a named window when two parameters are given
pub fn send_click(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    let windows = ctx.services.windows.as_ref();
    let msg = match cmd.len() {
        0 => return Err(CmdError::missing("SendClick", -1)),
        2 => GuiMessage::Click {
            window: windows.translate_window(cmd.first()).unwrap_or(WindowId::INVALID),
            control: cmd.get_int(1),
        },
        _ => GuiMessage::Click {
            window: windows.active_window(),
            control: cmd.get_int(0),
        },
    };
    windows.send_message(msg);
    Ok(Flow::Done)
}

/// Send a keymap action, optionally to a named window
pub fn action(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    if cmd.is_empty() {
        return Err(CmdError::missing("Action", -1));
    }

    let system = ctx.services.system.as_ref();
    match system.translate_action(cmd.first()) {
        Some(action) => {
            let window = if cmd.len() == 2 {
                ctx.services.windows.translate_window(cmd.get_or(1, ""))
            } else {
                None
            };
            system.send_action(action, window);
        }
        None => ctx.warn(&format!("Action: unknown action '{}'", cmd.first())),
    }
    Ok(Flow::Done)
}

/// Window addressed by an optional trailing parameter, else the focused one
fn property_window(ctx: &CommandContext, cmd: &ParsedCommand, index: usize) -> WindowId {
    let windows = ctx.services.windows.as_ref();
    match cmd.get(index) {
        Some(name) => windows.translate_window(name).unwrap_or(WindowId::INVALID),
        None => windows.focused_window(),
    }
}

pub fn set_property(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    if cmd.len() < 2 {
        return Err(CmdError::missing("SetProperty", -1));
    }

    let window = property_window(ctx, cmd, 2);
    if !ctx.services.windows.set_property(window, cmd.first(), cmd.get_or(1, "")) {
        log::debug!("SetProperty: window {:?} does not exist", window);
    }
    Ok(Flow::Done)
}

pub fn clear_property(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    if cmd.is_empty() {
        return Err(CmdError::missing("ClearProperty", -1));
    }

    let window = property_window(ctx, cmd, 1);
    if !ctx.services.windows.set_property(window, cmd.first(), "") {
        log::debug!("ClearProperty: window {:?} does not exist", window);
    }
    Ok(Flow::Done)
}

pub fn dialog_close(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    if cmd.is_empty() {
        return Err(CmdError::missing("Dialog.Close", -1));
    }

    let windows = ctx.services.windows.as_ref();
    let force = cmd.get_bool(1);
    if cmd.param_is(0, "all") {
        windows.close_dialogs(force);
    } else if let Some(id) = windows.translate_window(cmd.first()) {
        if !windows.close_dialog(id, force) {
            log::debug!("Dialog.Close: '{}' is not an open dialog", cmd.first());
        }
    }
    Ok(Flow::Done)
}

pub fn container_refresh(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    let windows = ctx.services.windows.as_ref();
    windows.send_message(GuiMessage::Update {
        window: windows.active_window(),
        path: cmd.first().to_string(),
        reset_history: true,
    });
    Ok(Flow::Done)
}

pub fn container_update(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    if cmd.is_empty() {
        return Err(CmdError::missing("Container.Update", -1));
    }

    let windows = ctx.services.windows.as_ref();
    windows.send_message(GuiMessage::Update {
        window: windows.active_window(),
        path: cmd.first().to_string(),
        reset_history: cmd.param_is(1, "replace"),
    });
    Ok(Flow::Done)
}

/// `mode` selects a view directly when `step` is zero
pub fn view_mode(ctx: &CommandContext, mode: i32, step: i32) -> CmdResult<Flow> {
    let windows = ctx.services.windows.as_ref();
    windows.send_message(GuiMessage::ChangeViewMode {
        window: windows.active_window(),
        mode,
        step,
    });
    Ok(Flow::Done)
}

/// `method` selects a sort method directly when `step` is zero
pub fn sort_method(ctx: &CommandContext, method: i32, step: i32) -> CmdResult<Flow> {
    let windows = ctx.services.windows.as_ref();
    windows.send_message(GuiMessage::ChangeSortMethod {
        window: windows.active_window(),
        method,
        step,
    });
    Ok(Flow::Done)
}

pub fn sort_direction(ctx: &CommandContext) -> CmdResult<Flow> {
    let windows = ctx.services.windows.as_ref();
    windows.send_message(GuiMessage::ToggleSortDirection {
        window: windows.active_window(),
    });
    Ok(Flow::Done)
}

#[derive(Debug, Clone, Copy)]
pub enum WeatherRequest {
    Refresh,
    Next,
    Previous,
}

/// Location moves and refreshes are offsets on the weather window
pub fn weather(ctx: &CommandContext, request: WeatherRequest) -> CmdResult<Flow> {
    let offset = match request {
        WeatherRequest::Refresh => 0,
        WeatherRequest::Next => 1,
        WeatherRequest::Previous => -1,
    };
    ctx.services.windows.send_message(GuiMessage::MoveOffset {
        window: WindowId::WEATHER,
        control: 0,
        offset,
    });
    Ok(Flow::Done)
}

pub fn weather_location_set(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    if cmd.is_empty() {
        return Err(CmdError::missing("Weather.LocationSet", -1));
    }
    ctx.services.windows.send_message(GuiMessage::SelectItem {
        window: WindowId::WEATHER,
        item: cmd.get_int(0),
    });
    Ok(Flow::Done)
}

pub fn video_library_search(ctx: &CommandContext) -> CmdResult<Flow> {
    ctx.services.windows.send_message(GuiMessage::Search {
        window: WindowId::VIDEO_NAV,
    });
    Ok(Flow::Done)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::setup;
    use crate::host::ActionId;
    use crate::recorder::{HostCall, SystemCall};

    #[test]
    fn test_activate_window_forwards_params() {
        let (host, mut executor) = setup();
        assert_eq!(executor.execute("ActivateWindow(Videos,MovieTitles,return)"), 0);
        assert_eq!(
            host.calls(),
            vec![
                HostCall::System(SystemCall::WakeScreensaver),
                HostCall::ActivateWindow {
                    id: WindowId::VIDEO_NAV,
                    params: vec!["MovieTitles".into(), "return".into()],
                    replace: false,
                },
            ]
        );
    }

    #[test]
    fn test_unknown_window_has_no_side_effects() {
        let (host, mut executor) = setup();
        assert_eq!(executor.execute("ReplaceWindow(NoSuchWindow)"), -1);
        assert_eq!(executor.execute("ActivateWindow"), -1);
        assert!(host.calls().is_empty());
    }

    #[test]
    fn test_activate_and_focus_pairs() {
        let (host, mut executor) = setup();
        assert_eq!(executor.execute("ReplaceWindowAndFocus(Music,50,3,60)"), 0);
        let calls = host.calls();
        assert_eq!(
            calls[1],
            HostCall::ActivateWindow {
                id: WindowId(10502),
                params: vec![],
                replace: true,
            }
        );
        // the unpaired trailing id is ignored
        assert_eq!(
            &calls[2..],
            &[HostCall::Message(GuiMessage::SetFocus {
                window: WindowId(10502),
                control: 50,
                sub_item: 4,
            })]
        );
    }

    #[test]
    fn test_set_focus() {
        let (host, mut executor) = setup();
        executor.execute("SetFocus(50)");
        executor.execute("Control.SetFocus(50,2)");
        assert_eq!(executor.execute("SetFocus()"), -1);
        assert_eq!(
            host.calls(),
            vec![
                HostCall::Message(GuiMessage::SetFocus {
                    window: WindowId::HOME,
                    control: 50,
                    sub_item: 0
                }),
                HostCall::Message(GuiMessage::SetFocus {
                    window: WindowId::HOME,
                    control: 50,
                    sub_item: 3
                }),
            ]
        );
    }

    #[test]
    fn test_control_message_is_case_sensitive() {
        let (host, mut executor) = setup();
        executor.execute("Control.Message(50,MoveUp)");
        assert!(host.calls().is_empty());

        executor.execute("Control.Message(50,click,weather)");
        assert_eq!(
            host.calls(),
            vec![HostCall::Message(GuiMessage::Click {
                window: WindowId::WEATHER,
                control: 50
            })]
        );
        assert_eq!(executor.execute("Control.Message(50)"), -1);
    }

    #[test]
    fn test_send_click_window_forms() {
        let (host, mut executor) = setup();
        executor.execute("SendClick(12)");
        executor.execute("SendClick(weather,12)");
        assert_eq!(
            host.calls(),
            vec![
                HostCall::Message(GuiMessage::Click {
                    window: WindowId::HOME,
                    control: 12
                }),
                HostCall::Message(GuiMessage::Click {
                    window: WindowId::WEATHER,
                    control: 12
                }),
            ]
        );
    }

    #[test]
    fn test_action_translation() {
        let (host, mut executor) = setup();
        host.add_action("Up", ActionId(3));
        executor.execute("Action(up)");
        executor.execute("Action(up,weather)");
        executor.execute("Action(sideways)");
        assert_eq!(
            host.calls(),
            vec![
                HostCall::SendAction {
                    action: ActionId(3),
                    window: None
                },
                HostCall::SendAction {
                    action: ActionId(3),
                    window: Some(WindowId::WEATHER)
                },
            ]
        );
    }

    #[test]
    fn test_properties() {
        let (host, mut executor) = setup();
        executor.execute("SetProperty(label,Hello)");
        executor.execute("ClearProperty(label,weather)");
        executor.execute("SetProperty(label,x,NoSuchWindow)");
        assert_eq!(executor.execute("SetProperty(label)"), -1);
        assert_eq!(
            host.calls(),
            vec![
                HostCall::SetProperty {
                    window: WindowId::HOME,
                    key: "label".into(),
                    value: "Hello".into()
                },
                HostCall::SetProperty {
                    window: WindowId::WEATHER,
                    key: "label".into(),
                    value: String::new()
                },
            ]
        );
    }

    #[test]
    fn test_dialog_close() {
        let (host, mut executor) = setup();
        host.open_dialog(WindowId(10100));
        executor.execute("Dialog.Close(yesnodialog,true)");
        executor.execute("Dialog.Close(busydialog)");
        executor.execute("Dialog.Close(all)");
        assert_eq!(
            host.calls(),
            vec![
                HostCall::CloseDialog {
                    id: WindowId(10100),
                    force: true
                },
                HostCall::CloseDialogs { force: false },
            ]
        );
    }

    #[test]
    fn test_container_messages() {
        let (host, mut executor) = setup();
        executor.execute("Container.Refresh");
        executor.execute("Container.Update(videodb://movies/,replace)");
        executor.execute("Container.SetViewMode(51)");
        executor.execute("Container.PreviousSortMethod");
        assert_eq!(executor.execute("Container.Update"), -1);
        assert_eq!(
            host.calls(),
            vec![
                HostCall::Message(GuiMessage::Update {
                    window: WindowId::HOME,
                    path: String::new(),
                    reset_history: true
                }),
                HostCall::Message(GuiMessage::Update {
                    window: WindowId::HOME,
                    path: "videodb://movies/".into(),
                    reset_history: true
                }),
                HostCall::Message(GuiMessage::ChangeViewMode {
                    window: WindowId::HOME,
                    mode: 51,
                    step: 0
                }),
                HostCall::Message(GuiMessage::ChangeSortMethod {
                    window: WindowId::HOME,
                    method: 0,
                    step: -1
                }),
            ]
        );
    }

    #[test]
    fn test_weather() {
        let (host, mut executor) = setup();
        executor.execute("Weather.LocationNext");
        executor.execute("Weather.LocationSet(2)");
        assert_eq!(executor.execute("Weather.LocationSet"), -1);
        assert_eq!(
            host.calls(),
            vec![
                HostCall::Message(GuiMessage::MoveOffset {
                    window: WindowId::WEATHER,
                    control: 0,
                    offset: 1
                }),
                HostCall::Message(GuiMessage::SelectItem {
                    window: WindowId::WEATHER,
                    item: 2
                }),
            ]
        );
    }
}
