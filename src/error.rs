//! Startup error type
//!
//! Request-time failures never reach this type: the handler turns them
//! into HTTP status responses.

use std::fmt;
use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// Configuration could not be loaded or deserialized
    Config(config::ConfigError),
    /// I/O failure while binding, logging or resolving paths
    Io(io::Error),
    /// The root directory could not be determined or is not servable
    Root { path: PathBuf, reason: String },
    /// The bind address could not be resolved
    Address(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Root { path, reason } => {
                write!(f, "cannot serve '{}': {reason}", path.display())
            }
            Self::Address(addr) => write!(f, "invalid bind address: {addr}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Root { .. } | Self::Address(_) => None,
        }
    }
}

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
