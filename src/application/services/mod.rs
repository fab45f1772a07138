pub mod gateway_context;

pub use gateway_context::GatewayContext;
