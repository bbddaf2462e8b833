use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use thiserror::Error;

/// `Result` alias which automatically uses `DispatchError` as the error type.
pub type Result<T> = std::result::Result<T, DispatchError>;

pub trait Handle<T> {
    /// Replaces any error kind with a new one.
    /// The closure receives the original error text so it can be carried along.
    fn replace_err<F: FnOnce(String) -> DispatchError>(self, new_error: F) -> Result<T>;
}

impl<T, E: Display> Handle<T> for std::result::Result<T, E> {
    fn replace_err<F: FnOnce(String) -> DispatchError>(self, new_error: F) -> Result<T> {
        self.map_err(|e| new_error(e.to_string()))
    }
}

/// Error type for the dispatcher.
/// Wraps the kind of error, whose message is shown to the user as-is.
#[derive(Debug)]
pub struct DispatchError {
    kind: ErrorKind,
}

impl Display for DispatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Table(error) => Some(error),
            ErrorKind::Executable(error) => Some(error),
            ErrorKind::Output(error) => Some(error),
        }
    }
}

impl DispatchError {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The status the process should terminate with when this error ends an invocation.
    // * 126 and 127 follow the shell convention for "found but not executable" and "not found"
    pub fn exit_code(&self) -> u8 {
        match self.kind() {
            ErrorKind::Table(_) | ErrorKind::Output(_) => 1,
            ErrorKind::Executable(ExecutableError::NotFound(_)) => 127,
            ErrorKind::Executable(_) => 126,
        }
    }
}

/// Every type of error which can end an invocation of the dispatcher.
/// Unknown commands are reported to the user but are not errors.
#[derive(Debug)]
pub enum ErrorKind {
    Table(TableError),
    Executable(ExecutableError),
    Output(OutputError),
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Table(error) => write!(f, "{}", error),
            ErrorKind::Executable(error) => write!(f, "{}", error),
            ErrorKind::Output(error) => write!(f, "{}", error),
        }
    }
}

/// Errors which occur while loading the command table.
#[derive(Error, Debug)]
pub enum TableError {
    // * The message carries the path already, fs_err includes it in every I/O error
    #[error("Error opening command file: {1}")]
    FailedToOpen(PathBuf, String),
    #[error("Error reading command file: {1}")]
    FailedToRead(PathBuf, String),
}

/// Errors which occur while handing control to a command's target.
#[derive(Error, Debug)]
pub enum ExecutableError {
    #[error("Command script not found: {0}")]
    NotFound(String),
    #[error("Command script is not executable: {} (permission code {1:o})", .0.display())]
    NotExecutable(PathBuf, u32),
    #[error("Failed to read metadata for command script {}: {1}", .0.display())]
    FailedToReadMetadata(PathBuf, String),
    #[error("Failed to execute {}: {1}", .0.display())]
    FailedToReplace(PathBuf, String),
    // * Only the spawning runner used off Unix waits on its child
    #[cfg_attr(unix, allow(dead_code))]
    #[error("Failed to wait for {}: {1}", .0.display())]
    CouldNotWait(PathBuf, String),
}

/// Errors which occur while printing help text or listings.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write to standard output: {0}")]
    FailedToWrite(String),
}

/// Shortcut for creating a `DispatchError::Table` without explicit imports
macro_rules! table_err {
    ($content:expr) => {{
        use crate::errors::DispatchError;
        use crate::errors::ErrorKind;
        #[allow(unused_imports)]
        use crate::errors::TableError::*;
        DispatchError::new(ErrorKind::Table($content))
    }};
}

/// Shortcut for creating a `DispatchError::Executable` without explicit imports
macro_rules! executable_err {
    ($content:expr) => {{
        use crate::errors::DispatchError;
        use crate::errors::ErrorKind;
        #[allow(unused_imports)]
        use crate::errors::ExecutableError::*;
        DispatchError::new(ErrorKind::Executable($content))
    }};
}

/// Shortcut for creating a `DispatchError::Output` without explicit imports
macro_rules! output_err {
    ($content:expr) => {{
        use crate::errors::DispatchError;
        use crate::errors::ErrorKind;
        #[allow(unused_imports)]
        use crate::errors::OutputError::*;
        DispatchError::new(ErrorKind::Output($content))
    }};
}
