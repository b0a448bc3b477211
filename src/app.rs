use axum::{
    response::IntoResponse,
    routing::{any, MethodRouter},
    Extension, Router,
};
use axum_test::TestServer;
use std::{env, net::SocketAddr};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{
    filter::EnvFilter,
    fmt::{
        self,
        format::{Format, JsonFields},
    },
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// The listen port is part of the service contract (orchestration probes
/// and the k8s service definition point at it), so it is not configurable.
const PORT: u16 = 8080;

pub struct App {
    router: Router,
}

impl App {
    pub fn new() -> Self {
        dotenvy::dotenv().ok();
        logger();
        let router = Router::new().route("/health", any(|| async { "OK".into_response() }));
        Self { router }
    }

    pub async fn start(self) -> anyhow::Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], PORT));
        let listener = TcpListener::bind(addr).await?;
        info!("Master node app starting on :{PORT}");
        axum::serve(listener, self.router).await?;
        Ok(())
    }

    pub fn router(self, router: Router) -> Self {
        Self {
            router: self.router.merge(router),
        }
    }

    pub fn inject<T: Clone + Send + Sync + 'static>(self, t: T) -> Self {
        Self {
            router: self.router.layer(Extension(t)),
        }
    }

    pub fn route(self, path: &str, method_router: MethodRouter<()>) -> Self {
        let mut app = self;
        app.router = app.router.route(path, method_router);
        app
    }

    pub fn as_test_server(self) -> TestServer {
        TestServer::new(self.router).unwrap()
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn logger() {
    let enabled: bool = env::var("STRUCTURED_LOGGING")
        .map(|s| s.parse::<bool>().unwrap_or(false))
        .unwrap_or(false);
    if enabled {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .event_format(Format::default().json())
                    .fmt_fields(JsonFields::new()),
            )
            .with(EnvFilter::from_default_env())
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(EnvFilter::from_default_env())
            .try_init()
            .ok();
    };
}
