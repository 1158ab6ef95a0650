//! Refresh token store interface.

use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::context::RequestContext;
use crate::errors::StoreError;

/// Liveness store for issued refresh tokens
///
/// A refresh token is live exactly while the `(uid, token_id)` entry exists.
/// Implementations must be safe for concurrent use and must honor the
/// request context on every call.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Mark a refresh token live for `expires_in`
    ///
    /// Overwrites an existing entry. Fails with `StoreError::Unavailable`
    /// on backend failure.
    async fn set_refresh_token(
        &self,
        ctx: &RequestContext,
        uid: Uuid,
        token_id: Uuid,
        expires_in: Duration,
    ) -> Result<(), StoreError>;

    /// Remove one refresh token
    ///
    /// Fails with `StoreError::NotFound` when the token was not live, so the
    /// caller can tell a revoked or rotated token apart from a live one.
    async fn delete_refresh_token(
        &self,
        ctx: &RequestContext,
        uid: Uuid,
        token_id: Uuid,
    ) -> Result<(), StoreError>;

    /// Remove every refresh token of a user
    ///
    /// Best effort: keeps deleting after individual failures and reports
    /// `StoreError::Unavailable` afterwards if any delete failed.
    async fn delete_user_refresh_tokens(
        &self,
        ctx: &RequestContext,
        uid: Uuid,
    ) -> Result<(), StoreError>;
}
