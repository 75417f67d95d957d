//! Builtin Action Commands
//!
//! This crate parses, registers and dispatches the textual builtin commands a
//! media center exposes to skins, remotes, scripts and alarms, for example
//! `ActivateWindow(Videos,"plugin://a.b/",return)` or `PlayerControl(Play)`.
//!
//! # Overview
//!
//! - **Parser**: splits `Name(p1,p2,...)` into a `ParsedCommand`, honoring
//!   quotes, escapes and nested parentheses
//! - **CommandRegistry**: the fixed, case-insensitive table of builtins with
//!   their arity and help text
//! - **BuiltinExecutor**: resolves a command string and runs its handler
//!   against the host collaborators in `Services`
//! - **RecordingHost**: an in-memory host that logs every side effect, used by
//!   tests and the console example (behind the `testing` feature)
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use builtins_cmd::{BuiltinExecutor, RecordingHost, Services};
//!
//! let host = Arc::new(RecordingHost::new());
//! let mut executor = BuiltinExecutor::new(Services::uniform(host.clone()));
//!
//! assert!(executor.has_command("playercontrol(play)"));
//! assert_eq!(executor.execute("PlayerControl(Play)"), 0);
//! assert_eq!(executor.execute("NoSuchCommand"), -1);
//! ```

mod args;
mod command;
pub mod commands;
mod config;
mod error;
mod executor;
mod history;
pub mod host;
mod parser;
#[cfg(any(test, feature = "testing"))]
pub mod recorder;
mod registry;

// Re-export main types
pub use args::{atof, atoi, ParsedCommand};
pub use command::{CommandContext, Flow};
pub use config::ExecutorConfig;
pub use error::{CmdError, CmdResult, ConfigError, SUCCESS, UNKNOWN_COMMAND};
pub use executor::BuiltinExecutor;
pub use history::{CommandHistory, HistoryEntry};
pub use host::{Host, Services};
pub use parser::{format_command, parse_command, split_call};
#[cfg(any(test, feature = "testing"))]
pub use recorder::{HostCall, RecordingHost, SystemCall};
pub use registry::{Builtin, CommandRegistry, CommandSpec};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::args::ParsedCommand;
    pub use crate::command::{CommandContext, Flow};
    pub use crate::error::{CmdError, CmdResult};
    pub use crate::executor::BuiltinExecutor;
    pub use crate::host::Services;
    pub use crate::parser::{format_command, parse_command};
    pub use crate::registry::CommandRegistry;
}
