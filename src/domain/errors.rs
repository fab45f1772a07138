use ethers::contract::ContractError as EthersContractError;
use ethers::providers::Middleware;

use crate::infrastructure::contracts::utils::redact::scrub_urls;

/// Contract gateway errors
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Gateway not connected")]
    NotConnected,

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Call to {method} reverted: {reason}")]
    Reverted { method: &'static str, reason: String },

    #[error("Contract call {method} failed: {reason}")]
    ContractCall { method: &'static str, reason: String },

    #[error("Transaction error: {0}")]
    Transaction(String),

    #[error("No signer configured")]
    NoSigner,

    #[error("Invalid signer: {reason}")]
    InvalidSigner { reason: String },

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid level: {0}")]
    InvalidLevel(u8),

    #[error("Invalid matrix: {0}")]
    InvalidMatrix(String),

    #[error("Value of {field} exceeds u64: {value}")]
    Overflow { field: &'static str, value: String },

    #[error("ABI error: {0}")]
    Abi(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GatewayError {
    /// Transport failure. Endpoint URLs in the message are redacted.
    pub fn rpc(message: impl AsRef<str>) -> Self {
        GatewayError::Rpc(scrub_urls(message.as_ref()))
    }

    /// Submission or confirmation failure. Endpoint URLs in the message are redacted.
    pub fn transaction(message: impl AsRef<str>) -> Self {
        GatewayError::Transaction(scrub_urls(message.as_ref()))
    }

    /// Classify a failed ethers contract call.
    pub fn from_call<M: Middleware>(method: &'static str, err: EthersContractError<M>) -> Self {
        match &err {
            EthersContractError::Revert(data) => GatewayError::Reverted {
                method,
                reason: data.to_string(),
            },
            EthersContractError::MiddlewareError { .. } | EthersContractError::ProviderError { .. } => {
                GatewayError::rpc(format!("{}: {}", method, err))
            }
            _ => GatewayError::ContractCall {
                method,
                reason: scrub_urls(&err.to_string()),
            },
        }
    }
}

impl From<ethers::contract::AbiError> for GatewayError {
    fn from(err: ethers::contract::AbiError) -> Self {
        GatewayError::Abi(err.to_string())
    }
}

impl From<ethers::providers::ProviderError> for GatewayError {
    fn from(err: ethers::providers::ProviderError) -> Self {
        GatewayError::rpc(err.to_string())
    }
}
