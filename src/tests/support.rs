use ethers::abi::Token;
use ethers::providers::{MockProvider, Provider};
use ethers::signers::LocalWallet;
use ethers::types::{Address, Bytes};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::fmt::MakeWriter;

use crate::infrastructure::contracts::client::ContractGateway;

pub const TEST_CHAIN_ID: u64 = 11155111;

/// BNB Smart Chain. ethers sends legacy transactions there, so a scripted
/// write only needs plain `eth_gasPrice` instead of fee history.
pub const LEGACY_CHAIN_ID: u64 = 56;

/// First anvil/hardhat development key.
pub const DEV_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

pub fn contract_address() -> Address {
    Address::repeat_byte(0x42)
}

pub fn user_address() -> Address {
    "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse().unwrap()
}

/// Gateway bound to a scripted node. Responses are served last-pushed first.
pub fn mocked_gateway() -> (ContractGateway<Provider<MockProvider>>, MockProvider) {
    let (provider, mock) = Provider::mocked();
    let gateway = ContractGateway::new(Arc::new(provider), contract_address(), TEST_CHAIN_ID, None).unwrap();
    (gateway, mock)
}

/// Scripted gateway holding the dev key, polling pending transactions every few milliseconds.
pub fn signing_gateway() -> (ContractGateway<Provider<MockProvider>>, MockProvider) {
    let (provider, mock) = Provider::mocked();
    let provider = provider.interval(Duration::from_millis(5));
    let wallet: LocalWallet = DEV_PRIVATE_KEY.parse().unwrap();
    let gateway = ContractGateway::new(Arc::new(provider), contract_address(), LEGACY_CHAIN_ID, Some(wallet)).unwrap();
    (gateway, mock)
}

/// Queue an `eth_call` result carrying the ABI encoding of `tokens`.
pub fn push_output(mock: &MockProvider, tokens: &[Token]) {
    mock.push::<Bytes, _>(Bytes::from(ethers::abi::encode(tokens))).unwrap();
}

/// In-memory log sink for asserting on emitted events.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes).lines().map(str::to_string).collect()
    }

    /// Install as the thread's subscriber until the guard drops.
    pub fn capture(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
