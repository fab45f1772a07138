use axum::{
    Router,
    routing::{get, post},
    http::HeaderValue,
};
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::handlers::AppState;
use super::{
    health_check, get_connection,
    // Matrix queries
    get_user, get_user_exists, get_level_active, get_matrix,
    get_total_cycles, get_partner_count, get_level_price,
    // Transactions
    register, buy_level,
};

pub fn create_v1_router(app_state: AppState) -> Router {
    let allowed_origins = std::env::var("ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://0.0.0.0:3000".to_string())
        .split(',')
        .filter_map(|origin| match origin.trim().parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid origin {}: {}", origin, e);
                None
            }
        })
        .collect::<Vec<_>>();

    let cors = CorsLayer::new()
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_origin(allowed_origins)
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ]);

    // User and matrix queries
    let user_routes = Router::new()
        .route("/:address", get(get_user))
        .route("/:address/exists", get(get_user_exists))
        .route("/:address/:matrix/:level/active", get(get_level_active))
        .route("/:address/:matrix/:level/matrix", get(get_matrix))
        .route("/:address/:matrix/:level/cycles", get(get_total_cycles))
        .route("/:address/:matrix/:level/partners", get(get_partner_count));

    let level_routes = Router::new()
        .route("/:level/price", get(get_level_price));

    // Signed transactions
    let transaction_routes = Router::new()
        .route("/register", post(register))
        .route("/buy-level", post(buy_level));

    Router::new()
        .route("/health", get(health_check))
        .route("/connection", get(get_connection))
        .nest("/users", user_routes)
        .nest("/levels", level_routes)
        .nest("/transactions", transaction_routes)
        .layer(cors)
        .with_state(app_state)
}
