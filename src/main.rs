use dotenvy::dotenv;
use tracing::{error, info};

use polling_app::{app, config::Config, db, state::AppState};

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let database = match db::init_db(&config) {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to initialize poll store: {}", e);
            std::process::exit(1);
        }
    };

    let addr = config.server_addr;
    let cors_origin = config.cors_origin.clone();
    let app_state = match AppState::new(database, config) {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to initialize sessions: {}", e);
            std::process::exit(1);
        }
    };

    let router = match app(app_state) {
        Ok(router) => router,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to address {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    info!("Server running at http://{}", addr);
    info!("CORS origin: {}", cors_origin);

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
