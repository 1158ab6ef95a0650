//! Redis client with connection retry and per-operation retry
//!
//! Wraps a multiplexed async connection, which is cheap to clone and safe to
//! share across requests. Transient failures are retried with exponential
//! backoff; everything else is returned to the caller immediately.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult};
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use acct_shared::config::CacheConfig;

use crate::InfrastructureError;

/// Upper bound for the backoff delay between retries
const MAX_RETRY_DELAY_MS: u64 = 5_000;

type RedisFuture<T> = Pin<Box<dyn Future<Output = RedisResult<T>> + Send>>;

/// Redis client with automatic retry of transient failures
#[derive(Clone)]
pub struct RedisClient {
    connection: MultiplexedConnection,
    config: CacheConfig,
}

impl std::fmt::Debug for RedisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisClient")
            .field("url", &mask_url(&self.config.url))
            .field("max_retries", &self.config.max_retries)
            .finish()
    }
}

impl RedisClient {
    /// Connect to Redis using `config`
    ///
    /// # Example
    /// ```no_run
    /// use acct_infra::cache::RedisClient;
    /// use acct_shared::config::CacheConfig;
    ///
    /// async fn connect() -> Result<RedisClient, Box<dyn std::error::Error>> {
    ///     let client = RedisClient::new(CacheConfig::new("redis://localhost:6379")).await?;
    ///     Ok(client)
    /// }
    /// ```
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        info!(url = %mask_url(&config.url), "Creating Redis client");

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!(error = %e, "Failed to parse Redis URL");
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection = Self::connect_with_retry(&client, &config).await?;
        info!("Redis client created successfully");

        Ok(Self { connection, config })
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    async fn connect_with_retry(
        client: &Client,
        config: &CacheConfig,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let timeout = Duration::from_secs(config.connection_timeout);
        let mut attempts = 0;
        let mut delay = config.retry_delay_ms;

        loop {
            attempts += 1;
            debug!(attempt = attempts, "Connecting to Redis");

            let result = tokio::time::timeout(timeout, client.get_multiplexed_async_connection()).await;
            let err = match result {
                Ok(Ok(connection)) => return Ok(connection),
                Ok(Err(e)) => InfrastructureError::Cache(e),
                Err(_) => InfrastructureError::Timeout(format!(
                    "connecting to Redis took longer than {}s",
                    config.connection_timeout
                )),
            };

            if attempts >= config.max_retries {
                error!(attempts, error = %err, "Failed to connect to Redis");
                return Err(err);
            }

            warn!(
                attempt = attempts,
                max_retries = config.max_retries,
                error = %err,
                retry_in_ms = delay,
                "Failed to connect to Redis, retrying"
            );
            sleep(Duration::from_millis(delay)).await;
            delay = (delay * 2).min(MAX_RETRY_DELAY_MS);
        }
    }

    /// Set `key` to `value`, expiring after `expiry_seconds`
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        self.execute_with_retry(|mut conn| {
            let key = key.to_string();
            let value = value.to_string();
            Box::pin(async move { conn.set_ex::<_, _, ()>(key, value, expiry_seconds).await })
        })
        .await
        .map_err(|e| {
            error!(key, error = %e, "Failed to set key");
            InfrastructureError::Cache(e)
        })
    }

    /// Delete `key`, returning whether it existed
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        let deleted = self
            .execute_with_retry(|mut conn| {
                let key = key.to_string();
                Box::pin(async move { conn.del::<_, u32>(key).await })
            })
            .await
            .map_err(|e| {
                error!(key, error = %e, "Failed to delete key");
                InfrastructureError::Cache(e)
            })?;

        debug!(key, deleted = deleted > 0, "Deleted key");
        Ok(deleted > 0)
    }

    pub async fn exists(&self, key: &str) -> Result<bool, InfrastructureError> {
        self.execute_with_retry(|mut conn| {
            let key = key.to_string();
            Box::pin(async move { conn.exists::<_, bool>(key).await })
        })
        .await
        .map_err(InfrastructureError::Cache)
    }

    /// One step of an incremental `SCAN`
    ///
    /// Returns the next cursor (0 when the iteration is complete) and the
    /// keys matching `pattern` in this batch. The server never blocks other
    /// clients for longer than one batch.
    pub async fn scan_batch(
        &self,
        cursor: u64,
        pattern: &str,
        count: usize,
    ) -> Result<(u64, Vec<String>), InfrastructureError> {
        self.execute_with_retry(|mut conn| {
            let pattern = pattern.to_string();
            Box::pin(async move {
                redis::cmd("SCAN")
                    .arg(cursor)
                    .arg("MATCH")
                    .arg(pattern)
                    .arg("COUNT")
                    .arg(count)
                    .query_async::<_, (u64, Vec<String>)>(&mut conn)
                    .await
            })
        })
        .await
        .map_err(|e| {
            error!(pattern, cursor, error = %e, "SCAN failed");
            InfrastructureError::Cache(e)
        })
    }

    /// Check connectivity with `PING`
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let response = self
            .execute_with_retry(|mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await
            .map_err(|e| {
                error!(error = %e, "Redis health check failed");
                InfrastructureError::Cache(e)
            })?;

        if response != "PONG" {
            warn!(response = %response, "Redis health check returned unexpected response");
            return Ok(false);
        }
        Ok(true)
    }

    async fn execute_with_retry<F, T>(&self, operation: F) -> RedisResult<T>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        let mut attempts = 0;
        let mut delay = self.config.retry_delay_ms;

        loop {
            attempts += 1;

            match operation(self.connection.clone()).await {
                Ok(result) => return Ok(result),
                Err(e) if attempts < self.config.max_retries && is_retriable_error(&e) => {
                    warn!(
                        attempt = attempts,
                        max_retries = self.config.max_retries,
                        error = %e,
                        retry_in_ms = delay,
                        "Redis operation failed, retrying"
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(MAX_RETRY_DELAY_MS);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Transient errors worth retrying
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Hide credentials in a Redis URL before logging it
pub(crate) fn mask_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(proto_end), Some(at_pos)) if at_pos > proto_end => {
            format!("{}****{}", &url[..proto_end + 3], &url[at_pos..])
        }
        _ => url.to_string(),
    }
}
