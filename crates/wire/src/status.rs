// SPDX-License-Identifier: MIT

use fc_core::ErrorKind;
use serde::{Deserialize, Serialize};

/// Wire-level status codes the RPC facade maps `fc_core::Error` onto
/// (§4.9): not-found→NotFound, invalid-token→InvalidArgument,
/// missing-token→Unauthenticated, policy violation→InvalidArgument,
/// already-accepted→FailedPrecondition, unknown→Unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Ok,
    NotFound,
    Unauthenticated,
    InvalidArgument,
    FailedPrecondition,
    Unavailable,
    Unknown,
}

impl From<ErrorKind> for Status {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NotFound => Self::NotFound,
            ErrorKind::Unauthenticated => Self::Unauthenticated,
            ErrorKind::InvalidArgument => Self::InvalidArgument,
            ErrorKind::FailedPrecondition => Self::FailedPrecondition,
            ErrorKind::Unavailable => Self::Unavailable,
            ErrorKind::Unknown => Self::Unknown,
        }
    }
}

impl From<&fc_core::Error> for Status {
    fn from(err: &fc_core::Error) -> Self {
        err.kind().into()
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
