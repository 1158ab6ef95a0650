//! In-memory refresh token store with lazy expiry

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use uuid::Uuid;

use acct_core::context::RequestContext;
use acct_core::errors::StoreError;
use acct_core::repositories::TokenRepository;

const DELETE_BATCH_SIZE: usize = 100;

/// Refresh token store kept in a map of key to expiry instant
///
/// Expired entries are treated as absent and dropped when touched.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTokenRepository {
    entries: Arc<RwLock<HashMap<String, Instant>>>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(uid: Uuid, token_id: Uuid) -> String {
        format!("{}:{}", uid, token_id)
    }

    /// Whether the token is live right now
    pub async fn contains(&self, uid: Uuid, token_id: Uuid) -> bool {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .get(&Self::key(uid, token_id))
            .is_some_and(|expires_at| *expires_at > now)
    }

    /// Number of live tokens of a user
    pub async fn live_count(&self, uid: Uuid) -> usize {
        let prefix = format!("{}:", uid);
        let now = Instant::now();
        self.entries
            .read()
            .await
            .iter()
            .filter(|(key, expires_at)| key.starts_with(&prefix) && **expires_at > now)
            .count()
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn set_refresh_token(
        &self,
        ctx: &RequestContext,
        uid: Uuid,
        token_id: Uuid,
        expires_in: Duration,
    ) -> Result<(), StoreError> {
        ctx.check()?;
        let mut entries = self.entries.write().await;
        let now = Instant::now();
        entries.retain(|_, expires_at| *expires_at > now);
        entries.insert(Self::key(uid, token_id), now + expires_in);
        Ok(())
    }

    async fn delete_refresh_token(
        &self,
        ctx: &RequestContext,
        uid: Uuid,
        token_id: Uuid,
    ) -> Result<(), StoreError> {
        ctx.check()?;
        let removed = self.entries.write().await.remove(&Self::key(uid, token_id));

        match removed {
            Some(expires_at) if expires_at > Instant::now() => Ok(()),
            _ => Err(StoreError::NotFound {
                uid: uid.to_string(),
                token_id: token_id.to_string(),
            }),
        }
    }

    async fn delete_user_refresh_tokens(
        &self,
        ctx: &RequestContext,
        uid: Uuid,
    ) -> Result<(), StoreError> {
        ctx.check()?;
        let prefix = format!("{}:", uid);
        let keys: Vec<String> = self
            .entries
            .read()
            .await
            .keys()
            .filter(|key| key.starts_with(&prefix))
            .cloned()
            .collect();

        // release the lock between batches so other requests interleave
        for batch in keys.chunks(DELETE_BATCH_SIZE) {
            ctx.check()?;
            let mut entries = self.entries.write().await;
            for key in batch {
                entries.remove(key);
            }
        }
        Ok(())
    }
}
