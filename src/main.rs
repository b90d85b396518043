mod config;
mod dtos;
mod error;
mod handler;
mod middleware;
mod models;
mod routes;
mod service;
mod store;
mod utils;

use std::sync::Arc;

use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Method,
};
use chrono::Duration;
use config::Config;
use dotenv::dotenv;
use routes::create_router;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::filter::LevelFilter;

use crate::service::auth_service::AuthService;
use crate::store::sessions::MemorySessions;
use crate::store::ticketstore::TicketStore;

#[derive(Clone)]
pub struct AppState {
    pub env: Config,
    pub ticket_store: Arc<TicketStore>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, argon2::password_hash::Error> {
        let ticket_store = Arc::new(TicketStore::load(&config.data_file));
        let sessions = Arc::new(MemorySessions::new());
        let auth_service = Arc::new(AuthService::new(
            &config.staff_username,
            &config.staff_password,
            Duration::hours(config.session_max_age_hours),
            sessions,
        )?);

        Ok(Self {
            env: config,
            ticket_store,
            auth_service,
        })
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::INFO)
        .init();

    dotenv().ok();

    let config = Config::init();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE]);

    let app_state = match AppState::new(config.clone()) {
        Ok(state) => Arc::new(state),
        Err(err) => {
            println!("🔥 Failed to prepare staff credentials: {:?}", err);
            std::process::exit(1);
        }
    };

    let app = create_router(app_state).layer(cors);

    println!(
        "🎫 Ticket intake service running on http://localhost:{}",
        config.port
    );
    println!(
        "📊 API endpoints available at http://localhost:{}/api/tickets",
        config.port
    );

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", &config.port))
        .await
        .unwrap();

    axum::serve(listener, app).await.unwrap();
}
