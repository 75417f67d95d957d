//! Builtin executor
//!
//! Parses command strings, resolves them against the registry and dispatches
//! them to their handlers with the host collaborators.

use crate::args::ParsedCommand;
use crate::command::{CommandContext, Flow};
use crate::commands;
use crate::config::ExecutorConfig;
use crate::error::{CmdError, CmdResult, SUCCESS};
use crate::history::CommandHistory;
use crate::host::Services;
use crate::parser::parse_command;
use crate::registry::{CommandRegistry, CommandSpec, SHOW_PICTURE};

/// Builtin command executor
///
/// Holds no state of its own beyond the history; everything a command changes
/// lives in the collaborators.
pub struct BuiltinExecutor {
    services: Services,
    config: ExecutorConfig,
    history: CommandHistory,
}

impl BuiltinExecutor {
    /// Create an executor with the default configuration
    pub fn new(services: Services) -> Self {
        Self::with_config(services, ExecutorConfig::default())
    }

    /// Create an executor with an explicit configuration
    pub fn with_config(services: Services, config: ExecutorConfig) -> Self {
        let history = CommandHistory::with_capacity(config.history_size);
        Self {
            services,
            config,
            history,
        }
    }

    /// Get a reference to the command registry
    pub fn registry(&self) -> &'static CommandRegistry {
        CommandRegistry::builtins()
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// True when `raw` names a known command and satisfies its arity gate
    pub fn has_command(&self, raw: &str) -> bool {
        let parsed = parse_command(raw);
        match self.resolve(&parsed) {
            Some(spec) => !spec.requires_parameters || !parsed.is_empty(),
            None => false,
        }
    }

    /// Registry help text, one `name\thelp` line per command
    pub fn help(&self) -> String {
        self.registry().help()
    }

    /// Execute a command string and return its result code
    ///
    /// 0 is success, negative values are failures. Errors are logged, never
    /// returned.
    ///
    /// # Example
    /// ```ignore
    /// let code = executor.execute("PlayerControl(seekpercentage(50))");
    /// ```
    pub fn execute(&mut self, raw: &str) -> i32 {
        let code = match self.try_execute(raw) {
            Ok(()) => SUCCESS,
            Err(e) => e.code(),
        };
        self.history.push(raw.trim(), code);
        code
    }

    /// Execute a command string, exposing the structured error
    ///
    /// Synthesized commands returned by handlers are dispatched in turn, up to
    /// `max_redispatch_depth` times.
    pub fn try_execute(&self, raw: &str) -> CmdResult {
        let mut parsed = parse_command(raw);
        let mut depth = 0;

        loop {
            let flow = self.dispatch(&parsed).inspect_err(|e| {
                log::error!("{}: {}", parsed.name, e);
            })?;

            match flow {
                Flow::Done => return Ok(()),
                Flow::Redispatch(next) => {
                    depth += 1;
                    if depth > self.config.max_redispatch_depth {
                        let err = CmdError::RedispatchDepth(self.config.max_redispatch_depth);
                        log::error!("{}: {}", next, err);
                        return Err(err);
                    }
                    log::debug!("'{}' re-dispatches as '{}'", parsed.name, next);
                    parsed = parse_command(&next);
                }
            }
        }
    }

    fn resolve(&self, parsed: &ParsedCommand) -> Option<&'static CommandSpec> {
        self.registry().lookup(&parsed.name).or_else(|| {
            let legacy = self.config.legacy_show_picture
                && parsed.name.eq_ignore_ascii_case(SHOW_PICTURE.name);
            legacy.then_some(&SHOW_PICTURE)
        })
    }

    fn dispatch(&self, parsed: &ParsedCommand) -> CmdResult<Flow> {
        let spec = self
            .resolve(parsed)
            .ok_or_else(|| CmdError::UnknownCommand(parsed.name.clone()))?;

        log::debug!("executing builtin '{}'", parsed.normalized_name());

        let mut ctx = CommandContext::new(&self.services, &self.config);
        commands::dispatch(&mut ctx, spec.builtin, parsed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::recorder::{HostCall, RecordingHost};

    fn executor_with(config: ExecutorConfig) -> (Arc<RecordingHost>, BuiltinExecutor) {
        let host = Arc::new(RecordingHost::new());
        let executor = BuiltinExecutor::with_config(Services::uniform(host.clone()), config);
        (host, executor)
    }

    #[test]
    fn test_unknown_command_has_no_side_effects() {
        let (host, mut executor) = executor_with(ExecutorConfig::default());
        assert_eq!(executor.execute("NotARealCommand"), -1);
        assert_eq!(executor.execute("player(play)"), -1);
        assert!(host.calls().is_empty());
    }

    #[test]
    fn test_execute_records_history() {
        let (_host, mut executor) = executor_with(ExecutorConfig::default());
        executor.execute("Quit");
        executor.execute("PlayMedia");

        let history = executor.history();
        let entries: Vec<(&str, i32)> = history
            .iter()
            .map(|e| (e.command.as_str(), e.result))
            .collect();
        assert_eq!(entries, vec![("Quit", 0), ("PlayMedia", -3)]);
    }

    #[test]
    fn test_history_readable_between_executions() {
        let (_host, mut executor) = executor_with(ExecutorConfig::default());
        for raw in ["Quit", "  Mute  ", "Nope(1)"] {
            let before = executor.history().len();
            let code = executor.execute(raw);
            let last = executor.history().last().unwrap();
            assert_eq!((last.command.as_str(), last.result), (raw.trim(), code));
            assert_eq!(executor.history().len(), before + 1);
        }
    }

    #[test]
    fn test_show_picture_is_opt_in() {
        let (host, mut executor) = executor_with(ExecutorConfig::default());
        assert_eq!(executor.execute("ShowPicture(/pics/a.jpg)"), -1);
        assert!(!executor.has_command("ShowPicture(/pics/a.jpg)"));
        assert!(host.calls().is_empty());

        let config = ExecutorConfig {
            legacy_show_picture: true,
            ..ExecutorConfig::default()
        };
        let (host, mut executor) = executor_with(config);
        assert!(executor.has_command("showpicture(/pics/a.jpg)"));
        assert_eq!(executor.execute("ShowPicture(/pics/a.jpg)"), 0);
        assert_eq!(host.calls(), vec![HostCall::ShowPicture("/pics/a.jpg".into())]);
        assert_eq!(executor.execute("ShowPicture"), -2);
        assert!(!executor.help().contains("ShowPicture"));
    }

    #[test]
    fn test_redispatch_depth_is_bounded() {
        let config = ExecutorConfig {
            max_redispatch_depth: 0,
            ..ExecutorConfig::default()
        };
        let (host, mut executor) = executor_with(config);
        host.add_script_addon("script.test");

        let err = executor.try_execute("RunAddon(script.test)").unwrap_err();
        assert_eq!(err, CmdError::RedispatchDepth(0));
        assert_eq!(executor.execute("RunAddon(script.test)"), -1);
        assert!(host.calls().is_empty());
    }

    #[test]
    fn test_try_execute_exposes_errors() {
        let (_host, executor) = executor_with(ExecutorConfig::default());
        assert_eq!(
            executor.try_execute("Foo(1)"),
            Err(CmdError::UnknownCommand("Foo".into()))
        );
        assert!(matches!(
            executor.try_execute("ActivateWindow(NoSuchWindow)"),
            Err(CmdError::UnknownWindow(_))
        ));
    }
}
