//! Network wake-up and remote-control commands

use crate::args::ParsedCommand;
use crate::command::{CommandContext, Flow};
use crate::error::{CmdError, CmdResult};

pub fn wake_on_lan(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    let Some(mac) = cmd.get(0) else {
        return Err(CmdError::missing("WakeOnLan", -1));
    };
    if !ctx.services.network.wake_on_lan(mac) {
        ctx.warn(&format!("WakeOnLan: could not send magic packet to {}", mac));
    }
    Ok(Flow::Done)
}

/// Forward the parameters to the LIRC daemon as one space-separated command
#[cfg(feature = "lirc")]
pub fn lirc_send(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    ctx.services.system.lirc_send(&cmd.params.join(" "));
    Ok(Flow::Done)
}

#[cfg(test)]
mod tests {
    use crate::commands::testing::setup;
    use crate::recorder::HostCall;

    #[test]
    fn test_wake_on_lan() {
        let (host, mut executor) = setup();
        assert_eq!(executor.execute("WakeOnLan"), -1);
        assert_eq!(executor.execute("WakeOnLan(00:11:22:33:44:55)"), 0);
        assert_eq!(
            host.calls(),
            vec![HostCall::WakeOnLan("00:11:22:33:44:55".into())]
        );
    }

    #[cfg(feature = "lirc")]
    #[test]
    fn test_lirc_send_joins_params() {
        let (host, mut executor) = setup();
        executor.execute("LIRC.Send(SEND_ONCE,tv,KEY_POWER)");
        assert_eq!(
            host.calls(),
            vec![HostCall::LircSend("SEND_ONCE tv KEY_POWER".into())]
        );
    }
}
