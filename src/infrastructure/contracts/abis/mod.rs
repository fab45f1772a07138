use ethers::abi::Abi;
use crate::domain::errors::GatewayError;

const MATRIX_ABI: &str = include_str!("matrix.json");

/// Parse the bundled matrix contract ABI.
pub fn load_matrix_abi() -> Result<Abi, GatewayError> {
    parse_abi("matrix.json", MATRIX_ABI)
}

fn parse_abi(filename: &str, content: &str) -> Result<Abi, GatewayError> {
    serde_json::from_str(content)
        .map_err(|e| GatewayError::Abi(format!("Failed to parse ABI file {}: {}", filename, e)))
}
