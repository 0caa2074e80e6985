use thiserror::Error;

use super::{ConfigError, TransportError, ValidationError};

/// Exit code for a run that was started without any target domain.
const EXIT_USAGE: u8 = 1;
/// Exit code for invalid configuration (bad resolver address, bad values).
const EXIT_CONFIG: u8 = 2;
/// Exit code for runtime failures outside the query loop.
const EXIT_RUNTIME: u8 = 1;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("CLI error: {source}")]
    Clap {
        #[from]
        source: clap::Error,
    },
    #[error("Join error: {source}")]
    Join {
        #[from]
        source: tokio::task::JoinError,
    },
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation<E>(error: E) -> Self
    where
        E: Into<ValidationError>,
    {
        error.into().into()
    }

    pub fn config<E>(error: E) -> Self
    where
        E: Into<ConfigError>,
    {
        error.into().into()
    }

    pub fn transport<E>(error: E) -> Self
    where
        E: Into<TransportError>,
    {
        error.into().into()
    }

    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(ValidationError::MissingDomains) => EXIT_USAGE,
            Self::Validation(_) | Self::Config(_) => EXIT_CONFIG,
            Self::Clap { .. } | Self::Io { .. } | Self::Join { .. } | Self::Transport(_) => {
                EXIT_RUNTIME
            }
        }
    }
}
