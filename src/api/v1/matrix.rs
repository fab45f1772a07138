use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    api::errors::{ApiError, ApiResult},
    api::validation::{Validate, ValidationResult, Validator},
    domain::models::{Level, MatrixKind, TransactionRecord, UserRecord, X3Matrix},
    handlers::AppState,
    infrastructure::contracts::WriteCall,
};

// ============ REQUEST/RESPONSE TYPES ============

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConnectionInfo {
    pub connected: bool,
    pub contract_address: Option<String>,
    pub chain_id: Option<u64>,
    pub signer: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatrixState {
    X3(X3Matrix),
    X4 { value: u64 },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LevelPriceResponse {
    pub level: u8,
    pub price_wei: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterApiRequest {
    pub referrer: String,
    pub value: String,
}

impl Validate for RegisterApiRequest {
    type Output = WriteCall;

    fn validate(&self) -> ValidationResult<WriteCall> {
        let referrer = Validator::parse_ethereum_address(&self.referrer, "referrer");
        let value = Validator::parse_wei(&self.value, "value");

        match (referrer, value) {
            (Ok(referrer), Ok(value)) => Ok(WriteCall::Register { referrer, value }),
            (referrer, value) => Err(referrer.err().into_iter().chain(value.err()).collect()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BuyLevelApiRequest {
    pub matrix: String,
    pub level: Level,
    /// Wei to attach; defaults to the on-chain level price.
    pub value: Option<String>,
}

impl Validate for BuyLevelApiRequest {
    type Output = (MatrixKind, Level, Option<ethers::types::U256>);

    fn validate(&self) -> ValidationResult<Self::Output> {
        let matrix = Validator::parse_matrix(&self.matrix, "matrix");
        let value = self
            .value
            .as_deref()
            .map(|value| Validator::parse_wei(value, "value"))
            .transpose();

        match (matrix, value) {
            (Ok(matrix), Ok(value)) => Ok((matrix, self.level, value)),
            (matrix, value) => Err(matrix.err().into_iter().chain(value.err()).collect()),
        }
    }
}

fn parse_matrix_path(address: &str, matrix: &str, level: &str) -> ApiResult<(ethers::types::Address, MatrixKind, Level)> {
    let results = (
        Validator::parse_ethereum_address(address, "address"),
        Validator::parse_matrix(matrix, "matrix"),
        Validator::parse_level(level, "level"),
    );

    match results {
        (Ok(address), Ok(matrix), Ok(level)) => Ok((address, matrix, level)),
        (address, matrix, level) => Err(ApiError::from(
            address
                .err()
                .into_iter()
                .chain(matrix.err())
                .chain(level.err())
                .collect::<Vec<_>>(),
        )),
    }
}

// ============ HANDLERS ============

pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn get_connection(State(state): State<AppState>) -> Json<ApiResponse<ConnectionInfo>> {
    let info = match state.context.gateway() {
        Ok(gateway) => ConnectionInfo {
            connected: true,
            contract_address: Some(format!("{:?}", gateway.contract_address())),
            chain_id: Some(gateway.chain_id()),
            signer: gateway.signer_address().map(|address| format!("{:?}", address)),
        },
        Err(_) => ConnectionInfo {
            connected: false,
            contract_address: None,
            chain_id: None,
            signer: None,
        },
    };
    ApiResponse::ok(info)
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> ApiResult<Json<ApiResponse<UserRecord>>> {
    let user = Validator::parse_ethereum_address(&address, "address")?;
    let record = state.context.gateway()?.users(user).await?;

    if !record.is_registered() {
        return Err(ApiError::not_found(format!("User {} is not registered", address)));
    }
    Ok(ApiResponse::ok(record))
}

pub async fn get_user_exists(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> ApiResult<Json<ApiResponse<bool>>> {
    let user = Validator::parse_ethereum_address(&address, "address")?;
    let exists = state.context.gateway()?.is_user_exists(user).await?;
    Ok(ApiResponse::ok(exists))
}

pub async fn get_level_active(
    State(state): State<AppState>,
    Path((address, matrix, level)): Path<(String, String, String)>,
) -> ApiResult<Json<ApiResponse<bool>>> {
    let (user, matrix, level) = parse_matrix_path(&address, &matrix, &level)?;
    let gateway = state.context.gateway()?;

    let active = match matrix {
        MatrixKind::X3 => gateway.users_active_x3_levels(user, level).await?,
        MatrixKind::X4 => gateway.users_active_x4_levels(user, level).await?,
    };
    Ok(ApiResponse::ok(active))
}

pub async fn get_matrix(
    State(state): State<AppState>,
    Path((address, matrix, level)): Path<(String, String, String)>,
) -> ApiResult<Json<ApiResponse<MatrixState>>> {
    let (user, matrix, level) = parse_matrix_path(&address, &matrix, &level)?;
    let gateway = state.context.gateway()?;

    let matrix_state = match matrix {
        MatrixKind::X3 => MatrixState::X3(gateway.user_x3_matrix(user, level).await?),
        MatrixKind::X4 => MatrixState::X4 {
            value: gateway.user_x4_matrix(user, level).await?,
        },
    };
    Ok(ApiResponse::ok(matrix_state))
}

pub async fn get_total_cycles(
    State(state): State<AppState>,
    Path((address, matrix, level)): Path<(String, String, String)>,
) -> ApiResult<Json<ApiResponse<u64>>> {
    let (user, matrix, level) = parse_matrix_path(&address, &matrix, &level)?;
    let cycles = state.context.gateway()?.get_total_cycles(user, matrix, level).await?;
    Ok(ApiResponse::ok(cycles))
}

pub async fn get_partner_count(
    State(state): State<AppState>,
    Path((address, matrix, level)): Path<(String, String, String)>,
) -> ApiResult<Json<ApiResponse<u64>>> {
    let (user, matrix, level) = parse_matrix_path(&address, &matrix, &level)?;
    let partners = state.context.gateway()?.get_partner_count(user, matrix, level).await?;
    Ok(ApiResponse::ok(partners))
}

pub async fn get_level_price(
    State(state): State<AppState>,
    Path(level): Path<String>,
) -> ApiResult<Json<ApiResponse<LevelPriceResponse>>> {
    let level = Validator::parse_level(&level, "level")?;
    let price = state.context.gateway()?.level_price(level).await?;
    Ok(ApiResponse::ok(LevelPriceResponse {
        level: level.get(),
        price_wei: price.to_string(),
    }))
}

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterApiRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<TransactionRecord>>> {
    let Json(request) = payload?;
    let call = request.validate()?;
    let record = state.context.gateway()?.write_data(call).await?;

    info!(tx_hash = %record.transaction_hash, "Registration confirmed");
    Ok(ApiResponse::ok(record))
}

pub async fn buy_level(
    State(state): State<AppState>,
    payload: Result<Json<BuyLevelApiRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<TransactionRecord>>> {
    let Json(request) = payload?;
    let (matrix, level, value) = request.validate()?;
    let gateway = state.context.gateway()?;

    let value = match value {
        Some(value) => value,
        None => gateway.level_price(level).await?,
    };
    let record = gateway.buy_new_level(matrix, level, value).await?;

    info!(%matrix, level = level.get(), tx_hash = %record.transaction_hash, "Level purchase confirmed");
    Ok(ApiResponse::ok(record))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let request = RegisterApiRequest {
            referrer: "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".to_string(),
            value: "25000000000000000".to_string(),
        };
        match request.validate().unwrap() {
            WriteCall::Register { value, .. } => assert_eq!(value, 25_000_000_000_000_000u64.into()),
            other => panic!("unexpected call {:?}", other),
        }

        let request = RegisterApiRequest {
            referrer: "nope".to_string(),
            value: "-5".to_string(),
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.field == "referrer"));
        assert!(errors.iter().any(|e| e.field == "value"));
    }

    #[test]
    fn test_buy_level_request_validation() {
        let request: BuyLevelApiRequest = serde_json::from_str(r#"{"matrix": "x4", "level": 3}"#).unwrap();
        let (matrix, level, value) = request.validate().unwrap();
        assert_eq!(matrix, MatrixKind::X4);
        assert_eq!(level.get(), 3);
        assert!(value.is_none());

        let request = BuyLevelApiRequest {
            matrix: "x9".to_string(),
            level: Level::new(2).unwrap(),
            value: Some("abc".to_string()),
        };
        assert_eq!(request.validate().unwrap_err().len(), 2);

        // out-of-range levels never make it past deserialization
        assert!(serde_json::from_str::<BuyLevelApiRequest>(r#"{"matrix": "x3", "level": 13}"#).is_err());
    }

    #[test]
    fn test_parse_matrix_path_collects_errors() {
        match parse_matrix_path("0x12", "x5", "0") {
            Err(ApiError::ValidationError(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
