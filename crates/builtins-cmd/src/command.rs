//! Command execution context
//!
//! Handlers receive a `CommandContext` giving access to the host collaborators
//! and execution options, and report how dispatch should continue.

use crate::config::ExecutorConfig;
use crate::host::Services;

/// Command execution context
pub struct CommandContext<'a> {
    /// Host collaborators
    pub services: &'a Services,
    /// Executor configuration
    pub config: &'a ExecutorConfig,
    /// Whether to suppress output messages
    pub quiet: bool,
}

impl<'a> CommandContext<'a> {
    /// Create a new command context
    pub fn new(services: &'a Services, config: &'a ExecutorConfig) -> Self {
        Self {
            services,
            config,
            quiet: config.quiet,
        }
    }

    /// Print a message (unless quiet mode is enabled)
    pub fn print(&self, msg: &str) {
        if !self.quiet {
            log::info!("{}", msg);
        }
    }

    /// Print a warning (unless quiet mode is enabled)
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            log::warn!("{}", msg);
        }
    }
}

/// What the executor does after a handler returns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// The command is complete
    Done,
    /// Parse and dispatch this synthesized command next
    Redispatch(String),
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::recorder::RecordingHost;

    #[test]
    fn test_context_takes_quiet_from_config() {
        let services = Services::uniform(Arc::new(RecordingHost::new()));
        let loud = ExecutorConfig::default();
        let quiet = ExecutorConfig::from_json(r#"{ "quiet": true }"#).unwrap();

        assert!(!CommandContext::new(&services, &loud).quiet);
        assert!(CommandContext::new(&services, &quiet).quiet);
    }
}
