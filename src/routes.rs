use crate::store::{DynCounterStore, StoreError, VISITS_KEY};
use axum::{
    response::{IntoResponse, Response},
    routing::any,
    Extension, Router,
};

pub fn router() -> Router {
    Router::new().route("/", any(visits))
}

/// Outcome of one visit. A down store is not an error from the caller's
/// point of view: both variants render as a 200 with a text body, which
/// keeps the route green for probes while the dependency is out.
pub enum VisitCount {
    Counted(i64),
    Degraded(StoreError),
}

impl IntoResponse for VisitCount {
    fn into_response(self) -> Response {
        match self {
            VisitCount::Counted(value) => {
                format!("AIOps Platform - Visitor Count: {value}").into_response()
            }
            VisitCount::Degraded(err) => {
                format!("Welcome! (Redis not connected: {err})").into_response()
            }
        }
    }
}

async fn visits(Extension(store): Extension<DynCounterStore>) -> VisitCount {
    match store.increment(VISITS_KEY).await {
        Ok(value) => VisitCount::Counted(value),
        Err(err) => VisitCount::Degraded(err),
    }
}
