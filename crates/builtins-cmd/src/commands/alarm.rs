//! Alarm clock commands
//!
//! `AlarmClock(name,command[,duration[,flags...]])` runs `command` when the
//! alarm named `name` expires. Durations are minutes, or `HH:MM:SS` when they
//! contain a colon.

use nom::{
    bytes::complete::take_till, character::complete::char, multi::separated_list1, IResult,
};

use crate::args::{atoi, ParsedCommand};
use crate::command::{CommandContext, Flow};
use crate::error::{CmdError, CmdResult};

const SHUTDOWN_TIMER: &str = "shutdowntimer";

fn time_segments(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(char(':'), take_till(|c: char| c == ':'))(input)
}

/// Seconds in a `[HH:]MM:SS` or `N min` string
///
/// At most three segments are read; segments that are not numeric count as
/// zero.
pub fn time_string_to_seconds(time: &str) -> i64 {
    let time = time.trim();
    if let Some(minutes) = time.strip_suffix(" min") {
        return 60 * atoi(minutes) as i64;
    }

    match time_segments(time) {
        Ok((_, segments)) => segments
            .iter()
            .take(3)
            .fold(0, |acc, segment| acc * 60 + atoi(segment) as i64),
        Err(_) => 0,
    }
}

/// Start an alarm, replacing a running one
pub fn alarm_clock(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    if cmd.len() < 2 {
        return Err(CmdError::missing("AlarmClock", -1));
    }

    let name = cmd.first();
    let seconds = match cmd.get(2) {
        Some(duration) if duration.contains(':') => time_string_to_seconds(duration),
        Some(duration) => atoi(duration) as i64 * 60,
        None => {
            let heading = if name.eq_ignore_ascii_case(SHUTDOWN_TIMER) {
                "Shutdown timer (minutes)"
            } else {
                "Alarm clock interval (minutes)"
            };
            match ctx.services.dialogs.numeric(heading, "") {
                Some(minutes) => atoi(&minutes) as i64 * 60,
                None => {
                    log::debug!("AlarmClock: prompt for '{}' cancelled", name);
                    return Ok(Flow::Done);
                }
            }
        }
    };

    let mut silent = false;
    let mut looping = false;
    for flag in cmd.rest(3) {
        if flag.eq_ignore_ascii_case("true") || flag.eq_ignore_ascii_case("silent") {
            silent = true;
        } else if flag.eq_ignore_ascii_case("loop") {
            looping = true;
        }
    }

    let alarms = ctx.services.alarms.as_ref();
    if alarms.is_running() {
        alarms.stop(name, silent);
    }

    if seconds < 0 || (seconds == 0 && looping) {
        return Err(CmdError::invalid_arg(
            "duration",
            format!("{} seconds is not a valid alarm time", seconds),
        ));
    }

    alarms.start(name, seconds as f64, cmd.get_or(1, ""), silent, looping);
    Ok(Flow::Done)
}

pub fn cancel_alarm(ctx: &CommandContext, cmd: &ParsedCommand) -> CmdResult<Flow> {
    if cmd.is_empty() {
        return Err(CmdError::missing("CancelAlarm", -1));
    }
    ctx.services.alarms.stop(cmd.first(), cmd.get_bool(1));
    Ok(Flow::Done)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::setup;
    use crate::recorder::HostCall;

    #[test]
    fn test_time_string_to_seconds() {
        assert_eq!(time_string_to_seconds("01:30:00"), 5400);
        assert_eq!(time_string_to_seconds("2:05"), 125);
        assert_eq!(time_string_to_seconds("1:2:3:4"), 3723);
        assert_eq!(time_string_to_seconds(" 90 min "), 5400);
        assert_eq!(time_string_to_seconds("x:10"), 10);
    }

    #[test]
    fn test_alarm_minutes_and_time_string() {
        let (host, mut executor) = setup();
        executor.execute("AlarmClock(tea,Notification(Tea,Ready),5)");
        executor.execute("AlarmClock(nap,Quit,00:00:30,silent)");
        assert_eq!(
            host.calls(),
            vec![
                HostCall::StartAlarm {
                    name: "tea".into(),
                    seconds: 300.0,
                    command: "Notification(Tea,Ready)".into(),
                    silent: false,
                    looping: false
                },
                HostCall::StopAlarm {
                    name: "nap".into(),
                    silent: true
                },
                HostCall::StartAlarm {
                    name: "nap".into(),
                    seconds: 30.0,
                    command: "Quit".into(),
                    silent: true,
                    looping: false
                },
            ]
        );
    }

    #[test]
    fn test_alarm_prompt() {
        let (host, mut executor) = setup();
        host.push_input(None);
        assert_eq!(executor.execute("AlarmClock(shutdowntimer,ShutDown)"), 0);
        assert!(host.calls().is_empty());

        host.push_input(Some("2"));
        executor.execute("AlarmClock(shutdowntimer,ShutDown)");
        assert!(matches!(
            host.calls().as_slice(),
            [HostCall::StartAlarm { seconds, .. }] if *seconds == 120.0
        ));
    }

    #[test]
    fn test_alarm_rejects_bad_durations() {
        let (host, mut executor) = setup();
        assert_eq!(executor.execute("AlarmClock(a)"), -1);
        assert_eq!(executor.execute("AlarmClock(a,Quit,-5)"), -1);
        assert_eq!(executor.execute("AlarmClock(a,Quit,0,loop)"), -1);
        assert!(host.calls().is_empty());

        assert_eq!(executor.execute("AlarmClock(a,Quit,0)"), 0);
        assert_eq!(host.calls().len(), 1);
    }

    #[test]
    fn test_cancel_alarm() {
        let (host, mut executor) = setup();
        assert_eq!(executor.execute("CancelAlarm"), -1);
        executor.execute("CancelAlarm(tea,true)");
        assert_eq!(
            host.calls(),
            vec![HostCall::StopAlarm {
                name: "tea".into(),
                silent: true
            }]
        );
    }
}
