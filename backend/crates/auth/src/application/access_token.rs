//! Access Tokens
//!
//! Short-lived HS256 JWTs. Each token carries a random `jti` so that a
//! single token can be revoked on logout.

use chrono::{DateTime, Duration, TimeZone, Utc};
use kernel::id::UserId;
use platform::jwt::{JwtCodec, TokenError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::config::AuthConfig;

/// JWT claims of an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// User id as a decimal string
    pub sub: String,
    pub jti: Uuid,
    pub iat: i64,
    pub exp: i64,
}

impl AccessTokenClaims {
    /// Subject as a typed id; `None` if the claim is not a number
    pub fn user_id(&self) -> Option<UserId> {
        self.sub.parse::<i64>().ok().map(UserId::new)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}

/// A freshly signed token together with its claims
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: AccessTokenClaims,
}

/// Signs and verifies access tokens
#[derive(Debug, Clone)]
pub struct TokenService {
    codec: JwtCodec,
    ttl: Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let ttl = Duration::from_std(config.access_token_ttl).unwrap_or(Duration::minutes(15));
        Self {
            codec: JwtCodec::hs256(&config.jwt_secret),
            ttl,
        }
    }

    pub fn issue(&self, user_id: UserId) -> Result<IssuedToken, TokenError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(&self, user_id: UserId, now: DateTime<Utc>) -> Result<IssuedToken, TokenError> {
        let claims = AccessTokenClaims {
            sub: user_id.to_string(),
            jti: Uuid::new_v4(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        let token = self.codec.encode(&claims)?;
        Ok(IssuedToken { token, claims })
    }

    /// Check signature and expiry (no leeway)
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, TokenError> {
        self.codec.decode(token)
    }
}
