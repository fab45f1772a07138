use ethers::abi::Token;
use ethers::providers::{Http, Middleware, Provider};
use ethers::types::{Address, U256};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::domain::errors::GatewayError;
use crate::domain::models::{Level, MatrixKind, TransactionRecord, UserRecord, X3Matrix};
use crate::infrastructure::contracts::calls::{ReadCall, WriteCall};
use crate::infrastructure::contracts::client::ContractGateway;
use crate::infrastructure::contracts::types::NetworkConfig;

/// Shared handle to the contract gateway.
///
/// Clones share one init-once slot. Until the gateway is installed every
/// accessor resolves to `None`; after that each accessor still resolves to
/// `None` on failure, with the cause logged once.
pub struct GatewayContext<M: Middleware = Provider<Http>> {
    gateway: Arc<OnceCell<ContractGateway<M>>>,
}

impl<M: Middleware> Clone for GatewayContext<M> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
        }
    }
}

impl<M: Middleware + 'static> Default for GatewayContext<M> {
    fn default() -> Self {
        Self::unmounted()
    }
}

impl GatewayContext<Provider<Http>> {
    /// Create the context and start connecting in the background.
    pub fn mount(config: NetworkConfig) -> (Self, JoinHandle<()>) {
        let context = Self::unmounted();
        let init = context.clone();
        let handle = tokio::spawn(async move {
            init.connect(&config).await;
        });
        (context, handle)
    }

    /// Connect and install the gateway. Failures are logged and leave the context unset.
    pub async fn connect(&self, config: &NetworkConfig) {
        match ContractGateway::connect(config).await {
            Ok(gateway) => {
                let address = gateway.contract_address();
                if self.install(gateway) {
                    info!(contract = ?address, "Contract gateway ready");
                }
            }
            Err(e) => error!("Failed to initialize contract gateway: {}", e),
        }
    }
}

impl<M: Middleware + 'static> GatewayContext<M> {
    pub fn unmounted() -> Self {
        Self {
            gateway: Arc::new(OnceCell::new()),
        }
    }

    /// Install a gateway. Only the first install takes effect.
    pub fn install(&self, gateway: ContractGateway<M>) -> bool {
        match self.gateway.set(gateway) {
            Ok(()) => true,
            Err(_) => {
                warn!("Contract gateway already initialized, ignoring");
                false
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.gateway.initialized()
    }

    /// Typed access for callers that want the error kind.
    pub fn gateway(&self) -> Result<&ContractGateway<M>, GatewayError> {
        self.gateway.get().ok_or(GatewayError::NotConnected)
    }

    /// The live connection, once established.
    pub fn connection(&self) -> Option<Arc<M>> {
        self.gateway.get().map(ContractGateway::provider)
    }

    pub async fn fetch_data(&self, call: ReadCall) -> Option<Token> {
        let method = call.method();
        let result = match self.gateway() {
            Ok(gateway) => gateway.fetch_data(call).await,
            Err(e) => Err(e),
        };
        settle(method, result)
    }

    pub async fn write_data(&self, call: WriteCall) -> Option<TransactionRecord> {
        let method = call.method();
        let result = match self.gateway() {
            Ok(gateway) => gateway.write_data(call).await,
            Err(e) => Err(e),
        };
        settle(method, result)
    }

    pub async fn users(&self, user: Address) -> Option<UserRecord> {
        let result = match self.gateway() {
            Ok(gateway) => gateway.users(user).await,
            Err(e) => Err(e),
        };
        settle("users", result)
    }

    pub async fn is_user_exists(&self, user: Address) -> Option<bool> {
        let result = match self.gateway() {
            Ok(gateway) => gateway.is_user_exists(user).await,
            Err(e) => Err(e),
        };
        settle("isUserExists", result)
    }

    pub async fn users_active_x3_levels(&self, user: Address, level: Level) -> Option<bool> {
        let result = match self.gateway() {
            Ok(gateway) => gateway.users_active_x3_levels(user, level).await,
            Err(e) => Err(e),
        };
        settle("usersActiveX3Levels", result)
    }

    pub async fn users_active_x4_levels(&self, user: Address, level: Level) -> Option<bool> {
        let result = match self.gateway() {
            Ok(gateway) => gateway.users_active_x4_levels(user, level).await,
            Err(e) => Err(e),
        };
        settle("usersActiveX4Levels", result)
    }

    pub async fn user_x3_matrix(&self, user: Address, level: Level) -> Option<X3Matrix> {
        let result = match self.gateway() {
            Ok(gateway) => gateway.user_x3_matrix(user, level).await,
            Err(e) => Err(e),
        };
        settle("usersX3Matrix", result)
    }

    pub async fn user_x4_matrix(&self, user: Address, level: Level) -> Option<u64> {
        let result = match self.gateway() {
            Ok(gateway) => gateway.user_x4_matrix(user, level).await,
            Err(e) => Err(e),
        };
        settle("usersX4Matrix", result)
    }

    pub async fn get_total_cycles(&self, user: Address, matrix: MatrixKind, level: Level) -> Option<u64> {
        let result = match self.gateway() {
            Ok(gateway) => gateway.get_total_cycles(user, matrix, level).await,
            Err(e) => Err(e),
        };
        settle("getTotalCycles", result)
    }

    pub async fn get_partner_count(&self, user: Address, matrix: MatrixKind, level: Level) -> Option<u64> {
        let result = match self.gateway() {
            Ok(gateway) => gateway.get_partner_count(user, matrix, level).await,
            Err(e) => Err(e),
        };
        settle("getPartnerCount", result)
    }

    pub async fn level_price(&self, level: Level) -> Option<U256> {
        let result = match self.gateway() {
            Ok(gateway) => gateway.level_price(level).await,
            Err(e) => Err(e),
        };
        settle("levelPrice", result)
    }
}

/// Collapse a gateway result to the absence marker, logging the failure.
fn settle<T>(method: &'static str, result: Result<T, GatewayError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(GatewayError::NotConnected) => {
            warn!(method, "Contract gateway not connected");
            None
        }
        Err(e) => {
            error!(method, "Contract call failed: {}", e);
            None
        }
    }
}
