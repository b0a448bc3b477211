pub mod prelude {
    pub use super::routes;
    pub use super::store::{CounterStore, DynCounterStore, RedisStore, StoreError};
    pub use super::App;
    pub use async_trait::async_trait;
    pub use axum::routing::{any, get};
    pub use axum::{Extension, Router};
    pub use tracing::{debug, error, info, trace, warn};
}

mod app;
pub mod routes;
pub mod store;

pub use app::App;
pub use store::{CounterStore, DynCounterStore, RedisStore, StoreError};
