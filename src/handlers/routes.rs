use axum::Router;
use tower_http::trace::TraceLayer;

use crate::api::v1::create_v1_router;
use crate::application::services::GatewayContext;

#[derive(Clone)]
pub struct AppState {
    pub context: GatewayContext,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/v1", create_v1_router(state))
        .layer(TraceLayer::new_for_http())
}
