// SPDX-License-Identifier: MIT

use chrono::{DateTime, Duration, Utc};
use fc_core::clock::Clock;
use fc_core::error::{Error, Result};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Minimum byte length for the signing secret. Shorter is fatal at
/// startup, per §4.1/§7.
pub const MIN_SECRET_LEN: usize = 32;

/// Claims carried by every issued token: `{user, first_issued, issued_at,
/// expires_at}` (§4.1), ported from `TokenClaims` in
/// `examples/original_source/auth/token.go`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Username the token was issued to.
    pub usr: String,
    /// Unix seconds at the *first* issuance in this token's renewal chain.
    pub first_issued: i64,
    /// Standard JWT issued-at, unix seconds.
    pub iat: i64,
    /// Standard JWT expiry, unix seconds.
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs, validates and renews bearer tokens. Stateless except for the
/// configured secret (§5) — it has no store dependency; callers supply
/// whatever persisted facts a decision needs (e.g. the user's
/// `updated_at` for [`TokenService::renew`]).
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    tokens_lifespan: Duration,
    login_lifespan: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Construct a token service. Returns an error if `secret` is shorter
    /// than [`MIN_SECRET_LEN`] bytes — callers at startup should treat
    /// this as fatal, per §7.
    pub fn new(
        secret: &[u8],
        tokens_lifespan: Duration,
        login_lifespan: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(Error::invalid_argument(format!(
                "tokens secret must be at least {MIN_SECRET_LEN} bytes, got {}",
                secret.len()
            )));
        }
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            tokens_lifespan,
            login_lifespan,
            clock,
        })
    }

    /// `Issue(user) → (token, expiresAt)`, stamping `first_issued = now`.
    pub fn issue(&self, user: &str) -> Result<IssuedToken> {
        let now = self.clock.now();
        self.issue_with_first_issued(user, now, now)
    }

    fn issue_with_first_issued(
        &self,
        user: &str,
        first_issued: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken> {
        let expires_at = now + self.tokens_lifespan;
        let claims = TokenClaims {
            usr: user.to_string(),
            first_issued: first_issued.timestamp(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| Error::unknown(e.to_string()))?;
        Ok(IssuedToken { token, expires_at })
    }

    /// Decode and verify signature + expiry. Returns the claims on success.
    pub fn decode_valid(&self, token: &str) -> Result<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| Error::invalid_argument(format!("invalid token: {e}")))
    }

    /// Decode ignoring expiry, for renewal's "still has its signature but
    /// may be expired" case.
    fn decode_ignoring_expiry(&self, token: &str) -> Result<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| Error::invalid_argument(format!("invalid token: {e}")))
    }

    /// `Validate(token) → bool`: signature and not-expired.
    pub fn validate(&self, token: &str) -> bool {
        self.decode_valid(token).is_ok()
    }

    /// The username a token was issued to, ignoring expiry — `renew`
    /// needs this to look up the user's `updated_at` *before* it knows
    /// whether the token is still within its login lifespan, so it has
    /// to be readable off an already-expired token too.
    pub fn subject(&self, token: &str) -> Result<String> {
        self.decode_ignoring_expiry(token).map(|claims| claims.usr)
    }

    /// `Renew(token) → (newToken, expiresAt)`.
    ///
    /// Succeeds if (a) still valid, or (b) expired but
    /// `now - first_issued ≤ login_lifespan` AND `user_updated_at ≤
    /// issued_at` (password unchanged since issuance). `user_updated_at`
    /// is supplied by the caller, which owns the store lookup — this
    /// keeps the token service free of a persistence dependency.
    pub fn renew(&self, token: &str, user_updated_at: DateTime<Utc>) -> Result<IssuedToken> {
        let claims = self.decode_ignoring_expiry(token)?;
        let now = self.clock.now();
        let issued_at = DateTime::<Utc>::from_timestamp(claims.iat, 0)
            .ok_or_else(|| Error::invalid_argument("invalid token: bad issued-at"))?;
        let first_issued = DateTime::<Utc>::from_timestamp(claims.first_issued, 0)
            .ok_or_else(|| Error::invalid_argument("invalid token: bad first-issued"))?;
        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0)
            .ok_or_else(|| Error::invalid_argument("invalid token: bad expiry"))?;

        let still_valid = now < expires_at;
        let within_login_lifespan = now - first_issued <= self.login_lifespan;
        let password_unchanged = user_updated_at <= issued_at;

        if still_valid || (within_login_lifespan && password_unchanged) {
            self.issue_with_first_issued(&claims.usr, first_issued, now)
        } else {
            Err(Error::invalid_argument(
                "token is invalid or cannot be renewed",
            ))
        }
    }
}

#[cfg(test)]
#[path = "token_tests.rs"]
mod tests;
