//! Token entities for the identity/refresh token pair.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use super::user::User;

/// Identity token lifetime (15 minutes)
pub const DEFAULT_ID_TOKEN_EXPIRY_SECONDS: i64 = 900;

/// Refresh token lifetime (3 days)
pub const DEFAULT_REFRESH_TOKEN_EXPIRY_SECONDS: i64 = 259_200;

/// Payload of an identity token
///
/// Carries a full snapshot of the user so validators never need a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdTokenClaims {
    pub user: User,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl IdTokenClaims {
    /// Claims for `user` valid for `ttl_seconds` from now
    pub fn new(user: &User, ttl_seconds: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            user: user.sanitized(),
            iat: now,
            exp: now + ttl_seconds,
        }
    }
}

/// Payload of a refresh token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenClaims {
    /// Owning user
    pub uid: Uuid,

    /// Token id, the revocation key in the store
    pub jti: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl RefreshTokenClaims {
    /// Claims with a fresh random token id
    pub fn new(uid: Uuid, ttl_seconds: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            uid,
            jti: Uuid::new_v4().to_string(),
            iat: now,
            exp: now + ttl_seconds,
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}

/// A signed refresh token together with the fields needed to revoke it
///
/// Serializes as the bare signed string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    /// Token id
    pub id: Uuid,

    /// Owning user
    pub uid: Uuid,

    /// Signed wire form
    pub signed: String,

    /// Remaining validity at the time the value was produced
    pub expires_in: Duration,
}

impl Serialize for RefreshToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.signed)
    }
}

/// Identity token paired with its refresh token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub id_token: String,
    pub refresh_token: RefreshToken,
}
