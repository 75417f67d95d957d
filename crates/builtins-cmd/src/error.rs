//! Error types for builtin dispatch
//!
//! Handlers report failures as `CmdError`; the executor turns them into the
//! integer result codes callers see.

use thiserror::Error;

/// Result type for builtin operations
pub type CmdResult<T = ()> = Result<T, CmdError>;

/// Result code for a successful dispatch
pub const SUCCESS: i32 = 0;

/// Result code for a command name the registry does not know
pub const UNKNOWN_COMMAND: i32 = -1;

/// Errors that can occur while dispatching a builtin
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CmdError {
    /// Command not found in registry
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A required parameter was not supplied
    ///
    /// `code` is the legacy result value of the handler that raised it. The
    /// values differ between handlers and carry no further meaning.
    #[error("{command} called with missing parameter")]
    MissingArgument { command: String, code: i32 },

    /// A parameter was supplied but failed a domain check
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    /// A parameter value the handler does not accept
    ///
    /// Carries the handler's legacy result code like `MissingArgument`.
    #[error("{command} called with unknown parameter: {value}")]
    UnknownParameter { command: String, value: String, code: i32 },

    /// Window name could not be translated to a window id
    #[error("invalid destination window: {0}")]
    UnknownWindow(String),

    /// Add-on id did not resolve to an installed add-on
    #[error("unknown add-on: {0}")]
    UnknownAddon(String),

    /// Playlist selector was neither `music` nor `video`
    #[error("unknown playlist: {0}")]
    UnknownPlaylist(String),

    /// A collaborator reported failure
    #[error("{0}")]
    Collaborator(String),

    /// The user cancelled a prompt the command depends on
    #[error("cancelled by user")]
    Cancelled,

    /// The command is not allowed in the current host state
    #[error("refused: {0}")]
    Refused(String),

    /// Synthesized commands nested deeper than the configured bound
    #[error("re-dispatch depth {0} exceeded")]
    RedispatchDepth(usize),
}

impl CmdError {
    /// Create a missing argument error with the handler's legacy result code
    pub fn missing(command: impl Into<String>, code: i32) -> Self {
        CmdError::MissingArgument {
            command: command.into(),
            code,
        }
    }

    /// Create an invalid argument error
    pub fn invalid_arg(name: impl Into<String>, reason: impl Into<String>) -> Self {
        CmdError::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a collaborator failure
    pub fn collaborator(msg: impl Into<String>) -> Self {
        CmdError::Collaborator(msg.into())
    }

    /// Integer result code reported to callers of `execute`
    pub fn code(&self) -> i32 {
        match self {
            CmdError::MissingArgument { code, .. } | CmdError::UnknownParameter { code, .. } => {
                *code
            }
            CmdError::UnknownCommand(_) => UNKNOWN_COMMAND,
            CmdError::InvalidArgument { .. }
            | CmdError::UnknownWindow(_)
            | CmdError::UnknownAddon(_)
            | CmdError::UnknownPlaylist(_)
            | CmdError::Collaborator(_)
            | CmdError::Cancelled
            | CmdError::Refused(_)
            | CmdError::RedispatchDepth(_) => -1,
        }
    }
}

/// Errors raised while loading executor configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document could not be decoded
    #[error("invalid executor config: {0}")]
    Json(#[from] serde_json::Error),
}
