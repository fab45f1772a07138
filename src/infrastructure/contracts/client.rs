use ethers::{
    abi::{Abi, Detokenize, Token},
    contract::Contract,
    middleware::SignerMiddleware,
    providers::{Http, Middleware, Provider},
    signers::{LocalWallet, Signer},
    types::{Address, U256},
};
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::errors::GatewayError;
use crate::domain::models::{Level, MatrixKind, TransactionRecord, UserRecord, X3Matrix};
use crate::infrastructure::contracts::abis;
use crate::infrastructure::contracts::calls::{ReadCall, WriteCall};
use crate::infrastructure::contracts::types::NetworkConfig;
use crate::infrastructure::contracts::utils::redact::redact_url;
use crate::infrastructure::contracts::utils::numeric::to_u64;

/// Connection plus bound matrix contract.
///
/// Reads go straight through the connection. Writes derive a signing
/// contract per call from the configured wallet.
pub struct ContractGateway<M: Middleware> {
    provider: Arc<M>,
    address: Address,
    abi: Abi,
    chain_id: u64,
    signer: Option<LocalWallet>,
    matrix: Contract<M>,
}

impl ContractGateway<Provider<Http>> {
    /// Open the HTTP connection, check the node answers, and bind the contract.
    pub async fn connect(config: &NetworkConfig) -> Result<Self, GatewayError> {
        let provider = Provider::<Http>::try_from(config.rpc_url.as_str())
            .map_err(|e| GatewayError::Config(format!("Invalid RPC URL {}: {}", redact_url(&config.rpc_url), e)))?;

        let chain_id = provider.get_chainid().await?.as_u64();
        info!(chain_id, endpoint = %redact_url(&config.rpc_url), "Connected to RPC endpoint");

        Self::new(
            Arc::new(provider),
            config.contract_address,
            chain_id,
            config.signer.clone(),
        )
    }
}

impl<M: Middleware + 'static> ContractGateway<M> {
    /// Bind the matrix contract to an existing connection.
    pub fn new(
        provider: Arc<M>,
        address: Address,
        chain_id: u64,
        signer: Option<LocalWallet>,
    ) -> Result<Self, GatewayError> {
        let abi = abis::load_matrix_abi()?;
        let matrix = Contract::new(address, abi.clone(), provider.clone());

        Ok(Self {
            provider,
            address,
            abi,
            chain_id,
            signer,
            matrix,
        })
    }

    /// The live connection.
    pub fn provider(&self) -> Arc<M> {
        self.provider.clone()
    }

    pub fn contract_address(&self) -> Address {
        self.address
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn signer_address(&self) -> Option<Address> {
        self.signer.as_ref().map(|wallet| wallet.address())
    }

    // ============ GENERIC ACCESS ============

    /// Invoke any enumerated view method and return the decoded ABI output.
    /// Multiple outputs come back as a `Token::Tuple`.
    pub async fn fetch_data(&self, call: ReadCall) -> Result<Token, GatewayError> {
        let method = call.method();
        self.read(method, Token::Tuple(call.args())).await
    }

    /// Sign and submit a mutating call, then wait until it is mined.
    pub async fn write_data(&self, call: WriteCall) -> Result<TransactionRecord, GatewayError> {
        let method = call.method();
        let wallet = self.signer.clone().ok_or(GatewayError::NoSigner)?;
        let client = SignerMiddleware::new(self.provider.clone(), wallet.with_chain_id(self.chain_id));
        let contract = Contract::new(self.address, self.abi.clone(), Arc::new(client));

        let tx = contract
            .method::<_, ()>(method, Token::Tuple(call.args()))?
            .value(call.value());

        let pending_tx = tx
            .send()
            .await
            .map_err(|e| GatewayError::from_call(method, e))?;
        let tx_hash = *pending_tx;
        debug!(method, ?tx_hash, "Transaction submitted");

        let receipt = pending_tx
            .await
            .map_err(|e| GatewayError::transaction(e.to_string()))?
            .ok_or_else(|| GatewayError::transaction(format!("{} dropped from mempool", method)))?;

        if let Some(status) = receipt.status {
            if status.is_zero() {
                return Err(GatewayError::Reverted {
                    method,
                    reason: format!("transaction {:?} reverted", receipt.transaction_hash),
                });
            }
        }

        info!(method, tx_hash = ?receipt.transaction_hash, "Transaction confirmed");
        Ok(TransactionRecord::from(&receipt))
    }

    // ============ USER QUERIES ============

    pub async fn users(&self, user: Address) -> Result<UserRecord, GatewayError> {
        let (id, referrer, partners_count, registration_timestamp): (U256, Address, U256, U256) =
            self.read("users", (user,)).await?;

        Ok(UserRecord {
            id: to_u64("id", id)?,
            referrer: format!("{:?}", referrer),
            partners_count: to_u64("partners_count", partners_count)?,
            registration_timestamp: to_u64("registration_timestamp", registration_timestamp)?,
        })
    }

    pub async fn is_user_exists(&self, user: Address) -> Result<bool, GatewayError> {
        self.read("isUserExists", (user,)).await
    }

    // ============ MATRIX QUERIES ============

    pub async fn users_active_x3_levels(&self, user: Address, level: Level) -> Result<bool, GatewayError> {
        self.read("usersActiveX3Levels", (user, level.get())).await
    }

    pub async fn users_active_x4_levels(&self, user: Address, level: Level) -> Result<bool, GatewayError> {
        self.read("usersActiveX4Levels", (user, level.get())).await
    }

    /// Raw X3 structure; nothing is normalized.
    pub async fn user_x3_matrix(&self, user: Address, level: Level) -> Result<X3Matrix, GatewayError> {
        let (current_referrer, referrals, blocked): (Address, Vec<Address>, bool) =
            self.read("usersX3Matrix", (user, level.get())).await?;

        Ok(X3Matrix {
            current_referrer,
            referrals,
            blocked,
        })
    }

    pub async fn user_x4_matrix(&self, user: Address, level: Level) -> Result<u64, GatewayError> {
        let value: U256 = self.read("usersX4Matrix", (user, level.get())).await?;
        to_u64("x4_matrix", value)
    }

    pub async fn get_total_cycles(&self, user: Address, matrix: MatrixKind, level: Level) -> Result<u64, GatewayError> {
        let cycles: U256 = self
            .read("getTotalCycles", (user, matrix.as_u8(), level.get()))
            .await?;
        to_u64("total_cycles", cycles)
    }

    pub async fn get_partner_count(&self, user: Address, matrix: MatrixKind, level: Level) -> Result<u64, GatewayError> {
        let partners: U256 = self
            .read("getPartnerCount", (user, matrix.as_u8(), level.get()))
            .await?;
        to_u64("partner_count", partners)
    }

    // ============ CONTRACT PARAMETERS ============

    /// Price of a level in wei.
    pub async fn level_price(&self, level: Level) -> Result<U256, GatewayError> {
        self.read("levelPrice", (level.get(),)).await
    }

    pub async fn last_level(&self) -> Result<u8, GatewayError> {
        self.read("LAST_LEVEL", ()).await
    }

    // ============ TRANSACTIONS ============

    pub async fn register(&self, referrer: Address, value: U256) -> Result<TransactionRecord, GatewayError> {
        self.write_data(WriteCall::Register { referrer, value }).await
    }

    pub async fn buy_new_level(&self, matrix: MatrixKind, level: Level, value: U256) -> Result<TransactionRecord, GatewayError> {
        self.write_data(WriteCall::BuyNewLevel { matrix, level, value }).await
    }

    async fn read<T, D>(&self, method: &'static str, args: T) -> Result<D, GatewayError>
    where
        T: ethers::abi::Tokenize,
        D: Detokenize,
    {
        self.matrix
            .method::<T, D>(method, args)?
            .call()
            .await
            .map_err(|e| GatewayError::from_call(method, e))
    }
}
