//! Redis implementation of the TokenRepository trait.
//!
//! A live refresh token is a key `{uid}:{token_id}` (optionally prefixed)
//! holding `0`, with a Redis TTL equal to the token's remaining validity.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, warn};
use uuid::Uuid;

use acct_core::context::RequestContext;
use acct_core::errors::StoreError;
use acct_core::repositories::TokenRepository;

use super::redis_client::RedisClient;
use crate::InfrastructureError;

/// Refresh token store backed by Redis
#[derive(Debug, Clone)]
pub struct RedisTokenRepository {
    client: RedisClient,
}

impl RedisTokenRepository {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn token_key(&self, uid: Uuid, token_id: Uuid) -> String {
        self.client.config().make_key(&format!("{}:{}", uid, token_id))
    }

    fn user_pattern(&self, uid: Uuid) -> String {
        self.client.config().make_key(&format!("{}:*", uid))
    }
}

#[async_trait]
impl TokenRepository for RedisTokenRepository {
    async fn set_refresh_token(
        &self,
        ctx: &RequestContext,
        uid: Uuid,
        token_id: Uuid,
        expires_in: Duration,
    ) -> Result<(), StoreError> {
        let key = self.token_key(uid, token_id);
        // SET EX rejects 0, and a sub-second lifetime rounds up
        let seconds = expires_in.as_secs().max(1);

        ctx.run(self.client.set_with_expiry(&key, "0", seconds))
            .await??;

        debug!(user_id = %uid, token_id = %token_id, ttl = seconds, "Stored refresh token");
        Ok(())
    }

    async fn delete_refresh_token(
        &self,
        ctx: &RequestContext,
        uid: Uuid,
        token_id: Uuid,
    ) -> Result<(), StoreError> {
        let key = self.token_key(uid, token_id);

        if !ctx.run(self.client.delete(&key)).await?? {
            return Err(StoreError::NotFound {
                uid: uid.to_string(),
                token_id: token_id.to_string(),
            });
        }
        Ok(())
    }

    async fn delete_user_refresh_tokens(
        &self,
        ctx: &RequestContext,
        uid: Uuid,
    ) -> Result<(), StoreError> {
        let pattern = self.user_pattern(uid);
        let batch_size = self.client.config().scan_batch_size;
        delete_matching(&self.client, ctx, uid, &pattern, batch_size).await
    }
}

/// The two keyspace commands a revoke-all needs
#[async_trait]
pub(crate) trait Keyspace: Send + Sync {
    /// One `SCAN` step: next cursor (0 when done) and the matching keys
    async fn scan_batch(
        &self,
        cursor: u64,
        pattern: &str,
        count: usize,
    ) -> Result<(u64, Vec<String>), InfrastructureError>;

    /// Delete one key, returning whether it existed
    async fn delete(&self, key: &str) -> Result<bool, InfrastructureError>;
}

#[async_trait]
impl Keyspace for RedisClient {
    async fn scan_batch(
        &self,
        cursor: u64,
        pattern: &str,
        count: usize,
    ) -> Result<(u64, Vec<String>), InfrastructureError> {
        RedisClient::scan_batch(self, cursor, pattern, count).await
    }

    async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        RedisClient::delete(self, key).await
    }
}

/// Delete every key matching `pattern`, one scan batch at a time
///
/// The context is checked before each batch. A failed delete does not stop
/// the sweep; once every key has been attempted, any failure is reported as
/// `Unavailable` so the caller can retry.
pub(crate) async fn delete_matching<K: Keyspace + ?Sized>(
    keyspace: &K,
    ctx: &RequestContext,
    uid: Uuid,
    pattern: &str,
    batch_size: usize,
) -> Result<(), StoreError> {
    let mut cursor = 0u64;
    let mut deleted = 0usize;
    let mut failures = 0usize;

    loop {
        ctx.check()?;
        let (next, keys) = ctx
            .run(keyspace.scan_batch(cursor, pattern, batch_size))
            .await??;

        for key in keys {
            match ctx.run(keyspace.delete(&key)).await? {
                Ok(true) => deleted += 1,
                // expired or removed by a concurrent request since the scan
                Ok(false) => {}
                Err(e) => {
                    failures += 1;
                    warn!(user_id = %uid, key = %key, error = %e, "Failed to delete refresh token");
                }
            }
        }

        cursor = next;
        if cursor == 0 {
            break;
        }
    }

    if failures > 0 {
        error!(user_id = %uid, deleted, failures, "Sign-out left refresh tokens behind");
        return Err(StoreError::unavailable(format!(
            "failed to delete {} of the user's refresh tokens",
            failures
        )));
    }

    debug!(user_id = %uid, deleted, "Deleted all refresh tokens of user");
    Ok(())
}
