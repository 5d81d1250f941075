use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use polling_app::client::{ClientController, HttpPollApi};
use polling_app::{app, config::Config, db, state::AppState};
use tokio::task::JoinHandle;

/// The real router served on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with_refresh(Duration::from_secs(1)).await
    }

    pub async fn start_with_refresh(results_refresh: Duration) -> Self {
        let config = Config {
            session_secret: "integration-secret".to_string(),
            results_refresh,
            ..Config::default()
        };

        let database = db::init_db(&config).expect("seed catalog");
        let state = AppState::new(database, config).expect("session keys");
        let router = app(state).expect("build router");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("local addr");

        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve");
        });

        Self { addr, handle }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn api(&self) -> Arc<HttpPollApi> {
        Arc::new(HttpPollApi::new(self.url()).expect("http client"))
    }

    pub fn controller(&self, refresh: Duration) -> ClientController {
        ClientController::new(self.api(), refresh)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn unique_name(prefix: &str) -> String {
    format!(
        "{}{}",
        prefix,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default()
    )
}
