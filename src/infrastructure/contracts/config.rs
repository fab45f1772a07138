use ethers::signers::LocalWallet;

use crate::domain::errors::GatewayError;
use crate::infrastructure::contracts::addresses;
use crate::infrastructure::contracts::types::NetworkConfig;

/// Hosted Sepolia endpoint; the project id is appended.
pub const DEFAULT_RPC_BASE: &str = "https://sepolia.infura.io/v3/";

/// Build the network configuration from environment variables.
pub fn get_network_config() -> Result<NetworkConfig, GatewayError> {
    let rpc_url = resolve_rpc_url(
        std::env::var("RPC_URL").ok().as_deref(),
        std::env::var("INFURA_PROJECT_ID").ok().as_deref(),
    )?;
    let contract_address = addresses::load_matrix_address()?;
    let signer = parse_signer(std::env::var("PRIVATE_KEY").ok().as_deref())?;

    Ok(NetworkConfig {
        rpc_url,
        contract_address,
        signer,
    })
}

/// `RPC_URL` overrides the hosted endpoint entirely.
pub fn resolve_rpc_url(rpc_url: Option<&str>, project_id: Option<&str>) -> Result<String, GatewayError> {
    if let Some(url) = rpc_url.map(str::trim).filter(|url| !url.is_empty()) {
        return Ok(url.to_string());
    }

    match project_id.map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => Ok(format!("{}{}", DEFAULT_RPC_BASE, id)),
        None => Err(GatewayError::Config(
            "Either RPC_URL or INFURA_PROJECT_ID must be set".to_string(),
        )),
    }
}

/// A missing or empty key means read-only operation.
pub fn parse_signer(private_key: Option<&str>) -> Result<Option<LocalWallet>, GatewayError> {
    match private_key.map(str::trim).filter(|key| !key.is_empty()) {
        Some(key) => key
            .trim_start_matches("0x")
            .parse::<LocalWallet>()
            .map(Some)
            .map_err(|e| GatewayError::InvalidSigner { reason: e.to_string() }),
        None => Ok(None),
    }
}
