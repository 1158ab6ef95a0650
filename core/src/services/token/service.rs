//! Token issuer and validator

use std::sync::Arc;

use uuid::Uuid;

use crate::context::RequestContext;
use crate::domain::entities::token::{RefreshToken, TokenPair};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, StoreError};
use crate::repositories::TokenRepository;

use super::codec;
use super::config::TokenServiceConfig;
use super::keys::SigningKeys;

const INVALID_ID_TOKEN: &str = "invalid identity token";
const INVALID_REFRESH_TOKEN: &str = "unable to verify user from refresh token";
const REVOKED_REFRESH_TOKEN: &str = "refresh token is invalid or has already been used";

/// Stateless identity token check
///
/// Lets the HTTP auth layer validate identity tokens without knowing which
/// store the issuer was built with.
pub trait IdTokenValidator: Send + Sync {
    fn validate_id_token(&self, signed: &str) -> Result<User, DomainError>;
}

/// Issues, validates, rotates and revokes identity/refresh token pairs
///
/// Holds no mutable state of its own. Signing keys are read-only and the
/// store is shared behind an `Arc`.
pub struct TokenService<R: TokenRepository> {
    pub(crate) repository: Arc<R>,
    keys: SigningKeys,
    config: TokenServiceConfig,
}

impl<R: TokenRepository> TokenService<R> {
    pub fn new(repository: Arc<R>, keys: SigningKeys, config: TokenServiceConfig) -> Self {
        Self {
            repository,
            keys,
            config,
        }
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Issue a new token pair for `user`
    ///
    /// When `previous_token_id` is given it is revoked before anything new is
    /// minted. If it is no longer live the call fails with `Unauthorized`
    /// and nothing is stored.
    pub async fn new_pair_from_user(
        &self,
        ctx: &RequestContext,
        user: &User,
        previous_token_id: Option<Uuid>,
    ) -> Result<TokenPair, DomainError> {
        if let Some(previous) = previous_token_id {
            self.repository
                .delete_refresh_token(ctx, user.uid, previous)
                .await
                .map_err(|e| store_failure(e, user.uid, "rotate"))?;
        }

        let id_token = codec::encode_identity(
            user,
            self.keys.id_encoding_key(),
            self.config.id_token_expiry_seconds,
        )
        .map_err(|e| {
            tracing::error!(
                user_id = %user.uid,
                error = %e,
                event = "id_token_signing_failed",
                "Failed to sign identity token"
            );
            DomainError::internal(e.to_string())
        })?;

        let refresh_token = codec::encode_refresh(
            user.uid,
            self.keys.refresh_encoding_key(),
            self.config.refresh_token_expiry_seconds,
        )
        .map_err(|e| {
            tracing::error!(
                user_id = %user.uid,
                error = %e,
                event = "refresh_token_signing_failed",
                "Failed to sign refresh token"
            );
            DomainError::internal(e.to_string())
        })?;

        let ttl = refresh_token.expires_in.to_std().map_err(|_| {
            tracing::error!(
                user_id = %user.uid,
                expires_in = refresh_token.expires_in.num_seconds(),
                event = "refresh_token_ttl_invalid",
                "Refresh token lifetime must be positive"
            );
            DomainError::internal("refresh token lifetime must be positive")
        })?;

        self.repository
            .set_refresh_token(ctx, user.uid, refresh_token.id, ttl)
            .await
            .map_err(|e| store_failure(e, user.uid, "issue"))?;

        tracing::debug!(
            user_id = %user.uid,
            token_id = %refresh_token.id,
            rotated = previous_token_id.is_some(),
            event = "token_pair_issued",
            "Issued token pair"
        );

        Ok(TokenPair {
            id_token,
            refresh_token,
        })
    }

    /// Verify an identity token and return the embedded user
    ///
    /// Never touches the store.
    pub fn validate_id_token(&self, signed: &str) -> Result<User, DomainError> {
        codec::decode_identity(signed, self.keys.id_decoding_key())
            .map(|claims| claims.user)
            .map_err(|e| {
                tracing::debug!(error = %e, event = "id_token_rejected", "Rejected identity token");
                DomainError::unauthorized(INVALID_ID_TOKEN)
            })
    }

    /// Verify a refresh token's signature and expiry
    ///
    /// Liveness is enforced when the token is rotated or revoked, not here.
    pub fn validate_refresh_token(&self, signed: &str) -> Result<RefreshToken, DomainError> {
        codec::decode_refresh(signed, self.keys.refresh_decoding_key()).map_err(|e| {
            tracing::debug!(error = %e, event = "refresh_token_rejected", "Rejected refresh token");
            DomainError::unauthorized(INVALID_REFRESH_TOKEN)
        })
    }

    /// Revoke a single refresh token
    pub async fn revoke_refresh_token(
        &self,
        ctx: &RequestContext,
        token: &RefreshToken,
    ) -> Result<(), DomainError> {
        self.repository
            .delete_refresh_token(ctx, token.uid, token.id)
            .await
            .map_err(|e| store_failure(e, token.uid, "revoke"))
    }

    /// Revoke every refresh token of a user
    pub async fn sign_out(&self, ctx: &RequestContext, uid: Uuid) -> Result<(), DomainError> {
        self.repository
            .delete_user_refresh_tokens(ctx, uid)
            .await
            .map_err(|e| store_failure(e, uid, "sign_out"))?;

        tracing::info!(user_id = %uid, event = "signed_out", "Revoked all refresh tokens");
        Ok(())
    }
}

impl<R: TokenRepository> IdTokenValidator for TokenService<R> {
    fn validate_id_token(&self, signed: &str) -> Result<User, DomainError> {
        TokenService::validate_id_token(self, signed)
    }
}

/// Translate a store failure, logging backend detail once
fn store_failure(err: StoreError, uid: Uuid, operation: &'static str) -> DomainError {
    match err {
        StoreError::NotFound { token_id, .. } => {
            tracing::info!(
                user_id = %uid,
                token_id = %token_id,
                operation,
                event = "refresh_token_not_live",
                "Refresh token was already revoked or rotated"
            );
            DomainError::unauthorized(REVOKED_REFRESH_TOKEN)
        }
        StoreError::Canceled => DomainError::Canceled,
        StoreError::DeadlineExceeded => DomainError::DeadlineExceeded,
        StoreError::Unavailable { message } => {
            tracing::error!(
                user_id = %uid,
                error = %message,
                operation,
                event = "refresh_store_failed",
                "Refresh token store operation failed"
            );
            DomainError::internal(message)
        }
    }
}
