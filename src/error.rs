//! Crate-wide error type.
//!
//! Errors fall into three groups. Configuration errors are raised while a
//! graph or engine is being built, lifecycle errors when the delivery
//! pipeline is driven out of order, and device errors when the audio backend
//! refuses to open or start a stream. Underruns and truncated pushes are not
//! errors; the pipeline counts them instead (see `audio::StreamStats`).

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A node has no parameter with this name.
    UnknownParam { name: String },

    /// Oversampling factor other than 2 or 4.
    InvalidFactor(usize),

    /// Modulation range with a non-finite bound.
    InvalidRange { min: f32, max: f32 },

    /// An `EngineConfig` field is out of range.
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },

    /// `start` was called while the stream is already running.
    AlreadyActive,

    /// The stream is stopped.
    NotActive,

    /// The audio backend failed to open or start the stream.
    Device(String),
}

impl Error {
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::UnknownParam { .. }
                | Error::InvalidFactor(_)
                | Error::InvalidRange { .. }
                | Error::InvalidConfig { .. }
        )
    }

    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Error::AlreadyActive | Error::NotActive)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownParam { name } => write!(f, "unknown parameter `{}`", name),
            Error::InvalidFactor(factor) => {
                write!(f, "oversampling factor must be 2 or 4, got {}", factor)
            }
            Error::InvalidRange { min, max } => {
                write!(f, "modulation range {}..={} is not finite", min, max)
            }
            Error::InvalidConfig { field, reason } => {
                write!(f, "invalid engine config `{}`: {}", field, reason)
            }
            Error::AlreadyActive => write!(f, "stream already active"),
            Error::NotActive => write!(f, "stream not active"),
            Error::Device(message) => write!(f, "audio device error: {}", message),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
