use ethers::signers::{LocalWallet, Signer};
use ethers::types::Address;

use crate::infrastructure::contracts::utils::redact::redact_url;

// ============ CONTRACT CONFIGURATION TYPES ============

/// Everything needed to open the connection and bind the contract.
#[derive(Clone)]
pub struct NetworkConfig {
    pub rpc_url: String,
    pub contract_address: Address,
    pub signer: Option<LocalWallet>,
}

impl std::fmt::Debug for NetworkConfig {
    // rpc_url may embed the access credential
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkConfig")
            .field("rpc_url", &redact_url(&self.rpc_url))
            .field("contract_address", &self.contract_address)
            .field("signer", &self.signer.as_ref().map(|wallet| wallet.address()))
            .finish()
    }
}
