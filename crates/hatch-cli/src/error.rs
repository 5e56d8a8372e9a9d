//! Errors that end a `hatch` invocation.
//!
//! An artifact that could not be written is not an error at this level: it
//! is a line in the emission report. It only becomes a [`CliError`] when the
//! run is strict.

use std::error::Error as StdError;
use std::fmt::Write as _;
use std::io;

use owo_colors::OwoColorize;
use thiserror::Error;

use hatch_core::error::{ErrorCategory as CoreCategory, HatchError};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Reading, parsing or writing a config file failed, or a key is unknown.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    #[error(transparent)]
    Hatch(#[from] HatchError),

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl From<io::Error> for CliError {
    fn from(source: io::Error) -> Self {
        Self::Io {
            context: source.to_string(),
            source,
        }
    }
}

/// Coarse outcome class; decides the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    UserError,
    Configuration,
    Internal,
}

impl ErrorCategory {
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Internal => 1,
            Self::UserError => 2,
            Self::Configuration => 4,
        }
    }
}

impl From<CoreCategory> for ErrorCategory {
    fn from(category: CoreCategory) -> Self {
        match category {
            CoreCategory::Validation => Self::UserError,
            CoreCategory::Configuration => Self::Configuration,
            CoreCategory::Internal => Self::Internal,
        }
    }
}

impl CliError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Config { .. } => vec![
                "Inspect the effective settings with 'hatch config list'".into(),
                "Regenerate a default file with 'hatch init --force'".into(),
            ],
            Self::Hatch(inner) => inner.suggestions(),
            Self::Io { source, .. } if source.kind() == io::ErrorKind::PermissionDenied => {
                vec!["Check that you can write to the target location".into()]
            }
            Self::Io { .. } => vec!["Ensure the parent directory exists".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Config { .. } => ErrorCategory::Configuration,
            Self::Hatch(inner) => inner.category().into(),
            Self::Io { .. } => ErrorCategory::Internal,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.category().exit_code()
    }

    /// Message block for stderr: the error, its causes when `verbose`, then
    /// suggestions. `colored` adds ANSI styling.
    pub fn render(&self, verbose: bool, colored: bool) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "\n{} {self}",
            paint(colored, "\u{2717} Error:", |t| t.red().bold().to_string())
        );

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                let _ = writeln!(
                    out,
                    "  {} {err}",
                    paint(colored, "caused by:", |t| t.dimmed().to_string())
                );
                cause = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            let _ = writeln!(
                out,
                "\n{}",
                paint(colored, "Suggestions:", |t| t.yellow().bold().to_string())
            );
            for tip in suggestions {
                let _ = writeln!(out, "  - {tip}");
            }
        }

        if !verbose {
            let _ = writeln!(
                out,
                "\n{}",
                paint(colored, "Re-run with -v for more detail.", |t| t.dimmed().to_string())
            );
        }
        out
    }

    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => {
                tracing::warn!(exit_code = self.exit_code(), "{self}");
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(exit_code = self.exit_code(), "{self}");
            }
        }
        if let Some(cause) = self.source() {
            tracing::debug!(%cause, "underlying error");
        }
    }
}

fn paint(colored: bool, text: &str, style: fn(&str) -> String) -> String {
    if colored { style(text) } else { text.to_owned() }
}

/// Attach a message to a foreign error while converting it to [`CliError`].
pub trait CliContext<T> {
    fn cli_context<S: Into<String>>(self, message: impl FnOnce() -> S) -> CliResult<T>;
}

impl<T> CliContext<T> for Result<T, io::Error> {
    fn cli_context<S: Into<String>>(self, message: impl FnOnce() -> S) -> CliResult<T> {
        self.map_err(|source| CliError::Io {
            context: message().into(),
            source,
        })
    }
}

impl<T> CliContext<T> for Result<T, toml::ser::Error> {
    fn cli_context<S: Into<String>>(self, message: impl FnOnce() -> S) -> CliResult<T> {
        self.map_err(|e| CliError::Config {
            message: message().into(),
            source: Some(Box::new(e)),
        })
    }
}
