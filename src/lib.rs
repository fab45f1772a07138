pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod handlers;
pub mod infrastructure;
#[cfg(test)]
mod tests;

// Main exports for external use
pub use application::services::GatewayContext;
pub use domain::{GatewayError, Level, MatrixKind, TransactionRecord, UserRecord, X3Matrix};
pub use handlers::routes::{AppState, create_router};
pub use infrastructure::contracts::{ContractGateway, NetworkConfig, ReadCall, WriteCall};
