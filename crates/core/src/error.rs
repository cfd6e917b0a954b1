// SPDX-License-Identifier: MIT

use thiserror::Error;

/// The six error kinds every component maps its failures onto.
///
/// Variants carry a message rather than structured payloads, matching
/// spec's "surfaced verbatim with context" requirement for object-store
/// and SSH failures.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed precondition: {0}")]
    FailedPrecondition(String),

    #[error("unavailable: {0}")]
    Unavailable(String),

    #[error("unknown: {0}")]
    Unknown(String),
}

impl Error {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self::Unauthenticated(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn failed_precondition(msg: impl Into<String>) -> Self {
        Self::FailedPrecondition(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::Unknown(msg.into())
    }

    /// Stable discriminant used by the RPC facade's status mapping and by
    /// tests asserting on error class without matching the message text.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Unauthenticated(_) => ErrorKind::Unauthenticated,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::FailedPrecondition(_) => ErrorKind::FailedPrecondition,
            Self::Unavailable(_) => ErrorKind::Unavailable,
            Self::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// True for the class the Worker treats as retryable backoff rather
    /// than a terminal failure.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Unauthenticated,
    InvalidArgument,
    FailedPrecondition,
    Unavailable,
    Unknown,
}

crate::simple_display!(ErrorKind {
    NotFound => "not_found",
    Unauthenticated => "unauthenticated",
    InvalidArgument => "invalid_argument",
    FailedPrecondition => "failed_precondition",
    Unavailable => "unavailable",
    Unknown => "unknown",
});

pub type Result<T> = std::result::Result<T, Error>;
