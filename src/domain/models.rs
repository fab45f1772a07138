use ethers::types::{Address, TransactionReceipt};
use serde::{Deserialize, Serialize};

use crate::domain::errors::GatewayError;

/// Highest level the matrix contract accepts (`LAST_LEVEL` on chain).
pub const LAST_LEVEL: u8 = 12;

// ============ MATRIX MODELS ============

/// Normalized view of the `users(address)` tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    pub referrer: String,
    pub partners_count: u64,
    pub registration_timestamp: u64,
}

impl UserRecord {
    /// Unregistered addresses read back as an all-zero record.
    pub fn is_registered(&self) -> bool {
        self.id != 0
    }
}

/// Raw X3 matrix state for one user and level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct X3Matrix {
    pub current_referrer: Address,
    pub referrals: Vec<Address>,
    pub blocked: bool,
}

/// Participation matrix variant, encoded on chain as `uint8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatrixKind {
    X3 = 1,
    X4 = 2,
}

impl MatrixKind {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl std::str::FromStr for MatrixKind {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x3" | "1" => Ok(MatrixKind::X3),
            "x4" | "2" => Ok(MatrixKind::X4),
            _ => Err(GatewayError::InvalidMatrix(s.to_string())),
        }
    }
}

impl std::fmt::Display for MatrixKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatrixKind::X3 => write!(f, "x3"),
            MatrixKind::X4 => write!(f, "x4"),
        }
    }
}

/// A matrix level in `1..=LAST_LEVEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Level(u8);

impl Level {
    pub fn new(value: u8) -> Result<Self, GatewayError> {
        if (1..=LAST_LEVEL).contains(&value) {
            Ok(Level(value))
        } else {
            Err(GatewayError::InvalidLevel(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Every valid level, lowest first.
    pub fn all() -> impl Iterator<Item = Level> {
        (1..=LAST_LEVEL).map(Level)
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Level::new(value).map_err(serde::de::Error::custom)
    }
}

// ============ TRANSACTION MODELS ============

/// Summary of a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub transaction_hash: String,
    pub block_number: u64,
    pub gas_used: Option<u64>,
    pub from: String,
    pub to: Option<String>,
}

impl From<&TransactionReceipt> for TransactionRecord {
    fn from(receipt: &TransactionReceipt) -> Self {
        Self {
            transaction_hash: format!("{:?}", receipt.transaction_hash),
            block_number: receipt.block_number.unwrap_or_default().as_u64(),
            gas_used: receipt.gas_used.map(|gas| gas.low_u64()),
            from: format!("{:?}", receipt.from),
            to: receipt.to.map(|to| format!("{:?}", to)),
        }
    }
}
