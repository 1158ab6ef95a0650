//! Unit tests for the revoke-all sweep, driven by an in-process keyspace

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use acct_core::context::RequestContext;
use acct_core::errors::StoreError;

use crate::cache::token_repository::{delete_matching, Keyspace};
use crate::InfrastructureError;

/// Sorted keyspace whose cursor is one past an offset into the matching keys
#[derive(Default)]
struct FakeKeyspace {
    keys: Mutex<BTreeMap<String, ()>>,
    failing: HashSet<String>,
    scans: Mutex<usize>,
}

impl FakeKeyspace {
    async fn insert(&self, key: impl Into<String>) {
        self.keys.lock().await.insert(key.into(), ());
    }

    async fn contains(&self, key: &str) -> bool {
        self.keys.lock().await.contains_key(key)
    }

    async fn len(&self) -> usize {
        self.keys.lock().await.len()
    }
}

#[async_trait]
impl Keyspace for FakeKeyspace {
    async fn scan_batch(
        &self,
        cursor: u64,
        pattern: &str,
        count: usize,
    ) -> Result<(u64, Vec<String>), InfrastructureError> {
        *self.scans.lock().await += 1;
        let prefix = pattern.trim_end_matches('*');
        let matching: Vec<String> = self
            .keys
            .lock()
            .await
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect();

        let start = (cursor as usize).saturating_sub(1);
        let end = (start + count).min(matching.len());
        let batch = matching.get(start..end).unwrap_or_default().to_vec();
        // deleted keys shift the remaining ones down
        let kept = batch.iter().filter(|key| self.failing.contains(*key)).count();
        let next = if end >= matching.len() { 0 } else { (start + kept + 1) as u64 };
        Ok((next, batch))
    }

    async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        if self.failing.contains(key) {
            return Err(InfrastructureError::Timeout(format!("DEL {}", key)));
        }
        Ok(self.keys.lock().await.remove(key).is_some())
    }
}

fn pattern(uid: Uuid) -> String {
    format!("{}:*", uid)
}

async fn seed(keyspace: &FakeKeyspace, uid: Uuid, count: usize) -> Vec<String> {
    let mut keys = Vec::new();
    for _ in 0..count {
        let key = format!("{}:{}", uid, Uuid::new_v4());
        keyspace.insert(key.clone()).await;
        keys.push(key);
    }
    keys
}

#[tokio::test]
async fn test_delete_matching_removes_every_batch() {
    let keyspace = FakeKeyspace::default();
    let uid = Uuid::new_v4();
    let other = Uuid::new_v4();
    seed(&keyspace, uid, 7).await;
    let kept = seed(&keyspace, other, 2).await;

    delete_matching(&keyspace, &RequestContext::new(), uid, &pattern(uid), 3)
        .await
        .unwrap();

    assert_eq!(keyspace.len().await, 2);
    for key in kept {
        assert!(keyspace.contains(&key).await);
    }
    assert!(*keyspace.scans.lock().await >= 3);
}

#[tokio::test]
async fn test_delete_matching_continues_past_failed_key() {
    let uid = Uuid::new_v4();
    let failing_key = format!("{}:{}", uid, Uuid::nil());
    let keyspace = FakeKeyspace {
        failing: HashSet::from([failing_key.clone()]),
        ..Default::default()
    };
    keyspace.insert(failing_key.clone()).await;
    let keys = seed(&keyspace, uid, 6).await;

    let result = delete_matching(&keyspace, &RequestContext::new(), uid, &pattern(uid), 2).await;

    match result {
        Err(StoreError::Unavailable { message }) => assert!(message.contains("1")),
        other => panic!("expected Unavailable, got {:?}", other),
    }
    for key in keys {
        assert!(!keyspace.contains(&key).await, "{} should be deleted", key);
    }
    assert!(keyspace.contains(&failing_key).await);
}

#[tokio::test]
async fn test_delete_matching_with_no_keys_succeeds() {
    let keyspace = FakeKeyspace::default();
    let uid = Uuid::new_v4();

    delete_matching(&keyspace, &RequestContext::new(), uid, &pattern(uid), 100)
        .await
        .unwrap();
    assert_eq!(*keyspace.scans.lock().await, 1);
}

#[tokio::test]
async fn test_delete_matching_stops_when_canceled() {
    let keyspace = FakeKeyspace::default();
    let uid = Uuid::new_v4();
    seed(&keyspace, uid, 4).await;

    let ctx = RequestContext::new();
    ctx.cancel();

    let result = delete_matching(&keyspace, &ctx, uid, &pattern(uid), 2).await;
    assert!(matches!(result, Err(StoreError::Canceled)));
    assert_eq!(keyspace.len().await, 4);
    assert_eq!(*keyspace.scans.lock().await, 0);
}
