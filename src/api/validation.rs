use ethers::types::{Address, U256};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::models::{Level, MatrixKind, LAST_LEVEL};

lazy_static! {
    static ref ADDRESS_RE: Regex = Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("address regex is valid");
    static ref DECIMAL_RE: Regex = Regex::new(r"^[0-9]{1,78}$").expect("decimal regex is valid");
}

/// Validation error types for API requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, Vec<ValidationError>>;

/// Validation utilities for API requests
pub struct Validator;

impl Validator {
    /// Parse a `0x`-prefixed 20-byte address
    pub fn parse_ethereum_address(address: &str, field_name: &str) -> Result<Address, ValidationError> {
        if address.is_empty() {
            return Err(ValidationError::new(field_name, "Address cannot be empty"));
        }

        if !ADDRESS_RE.is_match(address) {
            return Err(ValidationError::new(
                field_name,
                "Address must be 0x followed by 40 hexadecimal characters",
            ));
        }

        address
            .parse::<Address>()
            .map_err(|_| ValidationError::new(field_name, "Invalid Ethereum address format"))
    }

    /// Parse a matrix level in 1..=LAST_LEVEL from a path segment
    pub fn parse_level(level: &str, field_name: &str) -> Result<Level, ValidationError> {
        level
            .parse::<u8>()
            .ok()
            .and_then(|level| Level::new(level).ok())
            .ok_or_else(|| {
                ValidationError::new(field_name, format!("Level must be between 1 and {}", LAST_LEVEL))
            })
    }

    /// Parse a matrix name (`x3`, `x4`) or selector (`1`, `2`)
    pub fn parse_matrix(matrix: &str, field_name: &str) -> Result<MatrixKind, ValidationError> {
        matrix
            .parse::<MatrixKind>()
            .map_err(|_| ValidationError::new(field_name, "Matrix must be one of: x3, x4"))
    }

    /// Parse a non-negative decimal wei amount
    pub fn parse_wei(value: &str, field_name: &str) -> Result<U256, ValidationError> {
        if !DECIMAL_RE.is_match(value) {
            return Err(ValidationError::new(
                field_name,
                format!("{} must be a non-negative integer amount of wei", field_name),
            ));
        }

        U256::from_dec_str(value)
            .map_err(|_| ValidationError::new(field_name, format!("{} does not fit in uint256", field_name)))
    }
}

/// Trait for validating API request types
pub trait Validate {
    type Output;

    fn validate(&self) -> ValidationResult<Self::Output>;
}
