use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};
use std::{env, sync::Arc};
use thiserror::Error;
use tokio::sync::OnceCell;

/// Key holding the visit counter. Created by the store on first increment.
pub const VISITS_KEY: &str = "visits";

pub type DynCounterStore = Arc<dyn CounterStore>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Redis(#[from] redis::RedisError),
    #[error("{0}")]
    Unavailable(String),
}

/// Seam between the handlers and the key-value store, so tests can swap in
/// a fake. Use with the extractor Extension<DynCounterStore>.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Atomically add one to the named counter and return the new value.
    async fn increment(&self, key: &str) -> Result<i64, StoreError>;
}

pub struct RedisStore {
    client: redis::Client,
    conn: OnceCell<ConnectionManager>,
}

impl RedisStore {
    /// Builds a store handle from REDIS_HOST. Nothing connects here:
    /// the connection manager is created on the first increment, so a
    /// down store surfaces per-operation rather than at startup.
    pub fn from_env() -> anyhow::Result<Self> {
        let client = redis::Client::open(redis_url())?;
        Ok(Self {
            client,
            conn: OnceCell::new(),
        })
    }
}

#[async_trait]
impl CounterStore for RedisStore {
    async fn increment(&self, key: &str) -> Result<i64, StoreError> {
        let conn = self
            .conn
            .get_or_try_init(|| self.client.get_connection_manager())
            .await?;
        let mut conn = conn.clone();
        let value: i64 = conn.incr(key, 1).await?;
        Ok(value)
    }
}

fn redis_url() -> String {
    let host = env::var("REDIS_HOST")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "localhost:6379".into());
    format!("redis://{host}")
}

#[cfg(test)]
mod tests {
    use super::redis_url;
    use serial_test::serial;

    #[test]
    #[serial]
    fn defaults_to_localhost_when_unset() {
        std::env::remove_var("REDIS_HOST");
        assert_eq!("redis://localhost:6379", redis_url());
    }

    #[test]
    #[serial]
    fn defaults_to_localhost_when_empty() {
        std::env::set_var("REDIS_HOST", "");
        assert_eq!("redis://localhost:6379", redis_url());
        std::env::remove_var("REDIS_HOST");
    }

    #[test]
    #[serial]
    fn uses_configured_host() {
        std::env::set_var("REDIS_HOST", "redis.aiops.svc:6379");
        assert_eq!("redis://redis.aiops.svc:6379", redis_url());
        std::env::remove_var("REDIS_HOST");
    }
}
