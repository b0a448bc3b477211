use std::sync::atomic::{AtomicI64, Ordering};
use visit_counter::prelude::*;

pub fn app(store: DynCounterStore) -> App {
    App::new().router(routes::router()).inject(store)
}

/// In-memory stand-in for the real store. fetch_add gives the same
/// no-lost-updates guarantee the handlers expect from redis INCR.
#[derive(Default)]
pub struct FakeStore {
    value: AtomicI64,
}

impl FakeStore {
    pub fn value(&self) -> i64 {
        self.value.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CounterStore for FakeStore {
    async fn increment(&self, _key: &str) -> Result<i64, StoreError> {
        Ok(self.value.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

/// Store whose every operation fails, as if nothing listened on the
/// configured address.
pub struct DownStore;

#[async_trait]
impl CounterStore for DownStore {
    async fn increment(&self, _key: &str) -> Result<i64, StoreError> {
        Err(StoreError::Unavailable(
            "Connection refused (os error 111)".into(),
        ))
    }
}
