// SPDX-License-Identifier: MIT

use crate::error::{Error, Result};
use md5::{Digest, Md5};

/// Derive a 32-hex-character secret deterministically from `id`.
///
/// Ported from `utils/secret/secret.go`: bcrypt-hash the id, then fold
/// that hash through MD5 and hex-encode. Deterministic in `id` alone —
/// bcrypt's embedded salt is regenerated per call, so this is not a pure
/// function of `id` across calls; callers that need the *same* secret
/// every time must generate it once and persist it (which is exactly what
/// the Agent pre-create hook and `CreateUser` both do).
pub fn derive_secret(id: &str) -> Result<String> {
    let hashed =
        bcrypt::hash(id, bcrypt::DEFAULT_COST).map_err(|e| Error::unknown(e.to_string()))?;
    let mut hasher = Md5::new();
    hasher.update(hashed.as_bytes());
    let folded = hasher.finalize();
    Ok(hex::encode(folded))
}

#[cfg(test)]
#[path = "secret_tests.rs"]
mod tests;
