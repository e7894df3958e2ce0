// ABOUTME: Error taxonomy for loading the config, selecting a machine, and launching connections
// ABOUTME: Every variant is reported to the user at the top level instead of aborting the process

use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum WandError {
    ConfigNotFound(PathBuf),
    ConfigParse { path: PathBuf, message: String },
    GroupNotFound(String),
    MachineNotFound(String),
    InvalidSelection(String),
    TempFile(io::Error),
    ChildProcess { program: String, reason: String },
    /// The interactive selector could not take over the terminal.
    Terminal(io::Error),
}

impl WandError {
    pub fn child(program: impl Into<String>, reason: impl fmt::Display) -> Self {
        WandError::ChildProcess {
            program: program.into(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for WandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WandError::ConfigNotFound(path) => {
                write!(f, "config file not found: {}", path.display())
            }
            WandError::ConfigParse { path, message } => {
                write!(f, "failed to parse {}: {}", path.display(), message)
            }
            WandError::GroupNotFound(name) => write!(f, "group not found: {name}"),
            WandError::MachineNotFound(name) => write!(f, "machine not found in group: {name}"),
            WandError::InvalidSelection(input) => write!(f, "invalid selection: {input:?}"),
            WandError::TempFile(e) => write!(f, "temporary file error: {e}"),
            WandError::ChildProcess { program, reason } => write!(f, "{program}: {reason}"),
            WandError::Terminal(e) => write!(f, "terminal error: {e}"),
        }
    }
}

impl std::error::Error for WandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WandError::TempFile(e) | WandError::Terminal(e) => Some(e),
            _ => None,
        }
    }
}
