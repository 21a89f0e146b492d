use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use thiserror::Error;

/// `Result` alias which automatically uses `ShellError` as the error type.
pub type Result<T> = std::result::Result<T, ShellError>;

pub trait Handle<T> {
    /// Replaces any error kind with a new one, without overriding the default error message.
    /// Useful in situations where additional context provides no additional clarity.
    fn replace_err<F: FnOnce() -> ShellError>(self, new_error: F) -> Result<T>;
}

impl<T, E> Handle<T> for std::result::Result<T, E> {
    fn replace_err<F: FnOnce() -> ShellError>(self, new_error: F) -> Result<T> {
        self.map_err(|_| new_error())
    }
}

impl<T> Handle<T> for std::option::Option<T> {
    fn replace_err<F: FnOnce() -> ShellError>(self, new_error: F) -> Result<T> {
        self.ok_or_else(new_error)
    }
}

/// Error type for the shell.
/// Contains an error kind and optionally a custom message,
/// which is used to override the default error message.
#[derive(Debug)]
pub struct ShellError {
    kind: ErrorKind,
    custom_message: Option<String>,
}

impl Display for ShellError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // If the error has a custom message, use it instead of the default error message.
        match &self.custom_message {
            Some(message) => write!(f, "{}", message),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for ShellError {}

impl ShellError {
    /// Creates a `ShellError` with no custom message.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            custom_message: None,
        }
    }

    /// Takes a `ShellError` and gives it a custom message.
    pub fn set_context(mut self, context: &str) -> Self {
        self.custom_message = Some(context.to_owned());
        self
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The exit code a failed segment reports for this error
    // * 126 and 127 follow the usual shell conventions for "found but not executable"
    // * and "not found", as per https://tldp.org/LDP/abs/html/exitcodes.html
    pub fn exit_code(&self) -> i32 {
        match self.kind {
            ErrorKind::Executable(ExecutableError::NotFound(_)) => 127,
            ErrorKind::Executable(ExecutableError::PermissionDenied(_)) => 126,
            _ => 1,
        }
    }
}

/// Enum representing every type of error which can occur in the shell.
/// Downstream error variants will typically include data providing basic information
/// about how the error occurred, such as the name of a command which was not found.
#[derive(Error, Debug)]
pub enum ErrorKind {
    #[error("{0}")]
    Builtin(#[from] BuiltinError),
    #[error("{0}")]
    Executable(#[from] ExecutableError),
    #[error("{0}")]
    Redirect(#[from] RedirectError),
    #[error("{0}")]
    Terminal(#[from] TerminalError),
    #[error("{0}")]
    State(#[from] StateError),
}

/// Error type for errors which occur during execution of builtins.
#[derive(Error, Debug)]
pub enum BuiltinError {
    #[error("Invalid arguments for {0}")]
    InvalidArguments(String),
    #[error("Failed to change directory: {0}")]
    FailedToChangeDirectory(PathBuf),
}

/// Error type for errors which occur while spawning or waiting on executables.
#[derive(Error, Debug)]
pub enum ExecutableError {
    #[error("Command not found: {0}")]
    NotFound(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("Failed to spawn process: {0}")]
    FailedToSpawn(String),
    #[error("Failed to wait for process: {0}")]
    CouldNotWait(String),
    #[error("Failed to create pipe")]
    FailedToCreatePipe,
}

/// Error type for errors which occur while wiring output redirections.
#[derive(Error, Debug)]
pub enum RedirectError {
    #[error("Failed to open redirection target: {0}")]
    FailedToOpen(PathBuf),
}

/// Error type for errors which occur while toggling terminal attributes.
#[derive(Error, Debug)]
pub enum TerminalError {
    #[error("Standard input is not a terminal")]
    NotATerminal,
    #[error("Failed to read terminal attributes")]
    FailedToReadAttributes,
    #[error("Failed to write terminal attributes")]
    FailedToWriteAttributes,
}

/// Error type for errors which occur during state operations.
#[derive(Error, Debug)]
pub enum StateError {
    #[error("Failed to open configuration file: {0}")]
    FailedToOpenConfigFile(PathBuf),
    #[error("Failed to read configuration file: {0} (line {1})")]
    FailedToReadConfigFile(PathBuf, usize),
    #[error("Unknown configuration key: {0}")]
    UnknownConfigKey(String),
    #[error("Invalid value for configuration key {0}: {1}")]
    InvalidConfigValue(String, String),
}

/// Shortcut for creating a `ShellError::Builtin` without explicit imports
#[macro_export]
macro_rules! builtin_err {
    ($variant:ident) => {
        $crate::errors::ShellError::new($crate::errors::ErrorKind::Builtin(
            $crate::errors::BuiltinError::$variant,
        ))
    };
    ($variant:ident: $($content:expr),+) => {
        $crate::errors::ShellError::new($crate::errors::ErrorKind::Builtin(
            $crate::errors::BuiltinError::$variant($($content.into()),+),
        ))
    };
}

/// Shortcut for creating a `ShellError::Executable` without explicit imports
#[macro_export]
macro_rules! executable_err {
    ($variant:ident) => {
        $crate::errors::ShellError::new($crate::errors::ErrorKind::Executable(
            $crate::errors::ExecutableError::$variant,
        ))
    };
    ($variant:ident: $($content:expr),+) => {
        $crate::errors::ShellError::new($crate::errors::ErrorKind::Executable(
            $crate::errors::ExecutableError::$variant($($content.into()),+),
        ))
    };
}

/// Shortcut for creating a `ShellError::Redirect` without explicit imports
#[macro_export]
macro_rules! redirect_err {
    ($variant:ident: $($content:expr),+) => {
        $crate::errors::ShellError::new($crate::errors::ErrorKind::Redirect(
            $crate::errors::RedirectError::$variant($($content.into()),+),
        ))
    };
}

/// Shortcut for creating a `ShellError::Terminal` without explicit imports
#[macro_export]
macro_rules! terminal_err {
    ($variant:ident) => {
        $crate::errors::ShellError::new($crate::errors::ErrorKind::Terminal(
            $crate::errors::TerminalError::$variant,
        ))
    };
}

/// Shortcut for creating a `ShellError::State` without explicit imports
#[macro_export]
macro_rules! state_err {
    ($variant:ident: $($content:expr),+) => {
        $crate::errors::ShellError::new($crate::errors::ErrorKind::State(
            $crate::errors::StateError::$variant($($content.into()),+),
        ))
    };
}
