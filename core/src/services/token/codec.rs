//! Claims codec: signed wire format for identity and refresh tokens
//!
//! Identity tokens are RS256 JWTs carrying the user snapshot. Refresh tokens
//! are HS256 JWTs carrying the owner id and a random token id (`jti`).
//! Expiry is strict: a token is rejected once `exp <= now`.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::{IdTokenClaims, RefreshToken, RefreshTokenClaims};
use crate::domain::entities::user::User;
use crate::errors::TokenError;

fn strict_validation(algorithm: Algorithm) -> Validation {
    let mut validation = Validation::new(algorithm);
    validation.leeway = 0;
    validation.validate_exp = true;
    validation.validate_aud = false;
    validation
}

fn ensure_not_expired(exp: i64) -> Result<(), TokenError> {
    if exp <= Utc::now().timestamp() {
        return Err(TokenError::Expired);
    }
    Ok(())
}

fn signing_failed(err: jsonwebtoken::errors::Error) -> TokenError {
    TokenError::SigningFailed {
        message: err.to_string(),
    }
}

/// Sign an identity token for `user`, valid for `ttl_seconds`
pub fn encode_identity(
    user: &User,
    key: &EncodingKey,
    ttl_seconds: i64,
) -> Result<String, TokenError> {
    let claims = IdTokenClaims::new(user, ttl_seconds);
    encode(&Header::new(Algorithm::RS256), &claims, key).map_err(signing_failed)
}

/// Verify an identity token and return its claims
pub fn decode_identity(signed: &str, key: &DecodingKey) -> Result<IdTokenClaims, TokenError> {
    let data = decode::<IdTokenClaims>(signed, key, &strict_validation(Algorithm::RS256))?;
    ensure_not_expired(data.claims.exp)?;
    Ok(data.claims)
}

/// Sign a refresh token with a fresh token id for user `uid`
pub fn encode_refresh(
    uid: Uuid,
    key: &EncodingKey,
    ttl_seconds: i64,
) -> Result<RefreshToken, TokenError> {
    let claims = RefreshTokenClaims::new(uid, ttl_seconds);
    let signed = encode(&Header::new(Algorithm::HS256), &claims, key).map_err(signing_failed)?;
    let id = Uuid::parse_str(&claims.jti).map_err(|e| TokenError::malformed(e.to_string()))?;

    Ok(RefreshToken {
        id,
        uid,
        signed,
        expires_in: Duration::seconds(ttl_seconds),
    })
}

/// Verify a refresh token
///
/// `expires_in` of the result is the validity remaining now.
pub fn decode_refresh(signed: &str, key: &DecodingKey) -> Result<RefreshToken, TokenError> {
    let data = decode::<RefreshTokenClaims>(signed, key, &strict_validation(Algorithm::HS256))?;
    let claims = data.claims;
    ensure_not_expired(claims.exp)?;

    let id = Uuid::parse_str(&claims.jti)
        .map_err(|_| TokenError::malformed(format!("token id {:?} is not a UUID", claims.jti)))?;
    let expires_at = claims
        .expires_at()
        .ok_or_else(|| TokenError::malformed(format!("expiry {} is out of range", claims.exp)))?;

    Ok(RefreshToken {
        id,
        uid: claims.uid,
        signed: signed.to_string(),
        expires_in: expires_at - Utc::now(),
    })
}
