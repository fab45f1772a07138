use ethers::types::Address;
use std::collections::HashMap;
use std::fs;
use crate::domain::errors::GatewayError;

// ============ DEPLOYED MATRIX CONTRACT ============

/// Matrix contract on the Sepolia test network.
pub const DEFAULT_MATRIX_ADDRESS: &str = "0x5acc84a3e955bdd76467d3348077d003f00ffb97";

/// Key of the matrix contract inside a deployment file.
const MATRIX_KEY: &str = "matrix";

/// Resolve the matrix contract address from the environment.
///
/// `MATRIX_CONTRACT_ADDRESS` wins, then the deployment file named by
/// `MATRIX_ADDRESSES_FILE`, then [`DEFAULT_MATRIX_ADDRESS`].
pub fn load_matrix_address() -> Result<Address, GatewayError> {
    let explicit = std::env::var("MATRIX_CONTRACT_ADDRESS").ok();
    let file = std::env::var("MATRIX_ADDRESSES_FILE").ok();
    resolve_matrix_address(explicit.as_deref(), file.as_deref())
}

pub fn resolve_matrix_address(explicit: Option<&str>, file: Option<&str>) -> Result<Address, GatewayError> {
    if let Some(address) = explicit {
        return parse_address(address);
    }

    if let Some(path) = file {
        let addresses = load_addresses_from_file(path)?;
        let address = addresses
            .get(MATRIX_KEY)
            .ok_or_else(|| GatewayError::Config(format!("Address not found for contract: {}", MATRIX_KEY)))?;
        return parse_address(address);
    }

    parse_address(DEFAULT_MATRIX_ADDRESS)
}

pub fn parse_address(address: &str) -> Result<Address, GatewayError> {
    address
        .trim()
        .parse::<Address>()
        .map_err(|e| GatewayError::InvalidAddress(format!("{}: {}", address, e)))
}

// Load addresses from JSON file
fn load_addresses_from_file(file_path: &str) -> Result<HashMap<String, String>, GatewayError> {
    let content = fs::read_to_string(file_path)
        .map_err(|e| GatewayError::Config(format!("Failed to read addresses file {}: {}", file_path, e)))?;

    serde_json::from_str(&content)
        .map_err(|e| GatewayError::Config(format!("Failed to parse addresses JSON from {}: {}", file_path, e)))
}
