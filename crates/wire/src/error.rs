// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Framing/transport-level failures, distinct from `fc_core::Error` — a
/// malformed frame or a dead socket is never one of the six RPC error
/// kinds, it's a reason the call never reached that layer at all.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("frame of {0} bytes exceeds the maximum frame size")]
    FrameTooLarge(usize),

    #[error("stream closed before a complete frame was received")]
    UnexpectedEof,
}
