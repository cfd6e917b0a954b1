// SPDX-License-Identifier: MIT

//! A small error type that carries a process exit code, so `main` can
//! map a failure to a specific code instead of always exiting `1`.

use std::fmt;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

/// Maps a wire-level error response to an [`ExitError`] with a status
/// specific exit code, so scripts calling `fleetctl` can branch on it.
pub fn from_response_error(status: fc_wire::Status, message: String) -> ExitError {
    let code = match status {
        fc_wire::Status::NotFound => 2,
        fc_wire::Status::Unauthenticated => 3,
        fc_wire::Status::InvalidArgument => 4,
        fc_wire::Status::FailedPrecondition => 5,
        fc_wire::Status::Unavailable => 6,
        fc_wire::Status::Unknown | fc_wire::Status::Ok => 1,
    };
    ExitError::new(code, message)
}
