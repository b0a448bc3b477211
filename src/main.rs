use std::sync::Arc;
use tracing::error;
use visit_counter::{routes, App, DynCounterStore, RedisStore};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        error!("Failed to start: {err}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let app = App::new();
    let store: DynCounterStore = Arc::new(RedisStore::from_env()?);
    app.router(routes::router()).inject(store).start().await
}
