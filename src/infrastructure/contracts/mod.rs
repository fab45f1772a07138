// Matrix contract integration
// Everything that talks to the chain lives here

pub mod abis;
pub mod addresses;
pub mod calls;
pub mod client;
pub mod config;
pub mod types;
pub mod utils;

// Re-export main components for easy access
pub use calls::{ReadCall, WriteCall};
pub use client::ContractGateway;
pub use types::NetworkConfig;
