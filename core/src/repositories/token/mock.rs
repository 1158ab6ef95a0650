//! Mock implementation of TokenRepository for testing

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::context::RequestContext;
use crate::errors::StoreError;

use super::r#trait::TokenRepository;

/// Store operation a failure can be injected into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Set,
    Delete,
    DeleteAll,
}

/// Mock token repository for testing
#[derive(Default)]
pub struct MockTokenRepository {
    live: Arc<RwLock<HashSet<(Uuid, Uuid)>>>,
    failures: Arc<RwLock<HashMap<StoreOp, StoreError>>>,
}

impl MockTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call of `op` fail with `error`
    pub async fn fail_on(&self, op: StoreOp, error: StoreError) {
        self.failures.write().await.insert(op, error);
    }

    pub async fn is_live(&self, uid: Uuid, token_id: Uuid) -> bool {
        self.live.read().await.contains(&(uid, token_id))
    }

    pub async fn live_count(&self, uid: Uuid) -> usize {
        self.live.read().await.iter().filter(|(u, _)| *u == uid).count()
    }

    async fn injected(&self, ctx: &RequestContext, op: StoreOp) -> Result<(), StoreError> {
        ctx.check()?;
        match self.failures.read().await.get(&op) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn set_refresh_token(
        &self,
        ctx: &RequestContext,
        uid: Uuid,
        token_id: Uuid,
        _expires_in: Duration,
    ) -> Result<(), StoreError> {
        self.injected(ctx, StoreOp::Set).await?;
        self.live.write().await.insert((uid, token_id));
        Ok(())
    }

    async fn delete_refresh_token(
        &self,
        ctx: &RequestContext,
        uid: Uuid,
        token_id: Uuid,
    ) -> Result<(), StoreError> {
        self.injected(ctx, StoreOp::Delete).await?;
        if self.live.write().await.remove(&(uid, token_id)) {
            Ok(())
        } else {
            Err(StoreError::NotFound {
                uid: uid.to_string(),
                token_id: token_id.to_string(),
            })
        }
    }

    async fn delete_user_refresh_tokens(
        &self,
        ctx: &RequestContext,
        uid: Uuid,
    ) -> Result<(), StoreError> {
        self.injected(ctx, StoreOp::DeleteAll).await?;
        self.live.write().await.retain(|(u, _)| *u != uid);
        Ok(())
    }
}
