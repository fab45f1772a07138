use ethers::types::U256;

use crate::domain::errors::GatewayError;

/// Converts an on-chain `uint256` to `u64` without truncation.
pub fn to_u64(field: &'static str, value: U256) -> Result<u64, GatewayError> {
    if value > U256::from(u64::MAX) {
        return Err(GatewayError::Overflow {
            field,
            value: value.to_string(),
        });
    }
    Ok(value.as_u64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_u64_within_range() {
        assert_eq!(to_u64("id", U256::zero()).unwrap(), 0);
        assert_eq!(to_u64("id", U256::from(1_700_000_000u64)).unwrap(), 1_700_000_000);
        assert_eq!(to_u64("id", U256::from(u64::MAX)).unwrap(), u64::MAX);
    }

    #[test]
    fn test_to_u64_overflow() {
        let value = U256::from(u64::MAX) + 1;
        match to_u64("partners_count", value) {
            Err(GatewayError::Overflow { field, value }) => {
                assert_eq!(field, "partners_count");
                assert_eq!(value, "18446744073709551616");
            }
            other => panic!("expected overflow, got {:?}", other),
        }
    }
}
