use ethers::abi::Token;
use ethers::types::{Address, U256};

use crate::domain::models::{Level, MatrixKind};

// ============ READ CALLS ============

/// Every view method the gateway may invoke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadCall {
    LastLevel,
    Users { user: Address },
    IsUserExists { user: Address },
    LevelPrice { level: Level },
    UsersActiveX3Levels { user: Address, level: Level },
    UsersActiveX4Levels { user: Address, level: Level },
    UsersX3Matrix { user: Address, level: Level },
    UsersX4Matrix { user: Address, level: Level },
    GetTotalCycles { user: Address, matrix: MatrixKind, level: Level },
    GetPartnerCount { user: Address, matrix: MatrixKind, level: Level },
}

impl ReadCall {
    pub const METHODS: [&'static str; 10] = [
        "LAST_LEVEL",
        "users",
        "isUserExists",
        "levelPrice",
        "usersActiveX3Levels",
        "usersActiveX4Levels",
        "usersX3Matrix",
        "usersX4Matrix",
        "getTotalCycles",
        "getPartnerCount",
    ];

    /// Contract function name.
    pub fn method(&self) -> &'static str {
        match self {
            ReadCall::LastLevel => "LAST_LEVEL",
            ReadCall::Users { .. } => "users",
            ReadCall::IsUserExists { .. } => "isUserExists",
            ReadCall::LevelPrice { .. } => "levelPrice",
            ReadCall::UsersActiveX3Levels { .. } => "usersActiveX3Levels",
            ReadCall::UsersActiveX4Levels { .. } => "usersActiveX4Levels",
            ReadCall::UsersX3Matrix { .. } => "usersX3Matrix",
            ReadCall::UsersX4Matrix { .. } => "usersX4Matrix",
            ReadCall::GetTotalCycles { .. } => "getTotalCycles",
            ReadCall::GetPartnerCount { .. } => "getPartnerCount",
        }
    }

    /// ABI arguments, in declaration order.
    pub fn args(&self) -> Vec<Token> {
        match *self {
            ReadCall::LastLevel => vec![],
            ReadCall::Users { user } | ReadCall::IsUserExists { user } => vec![Token::Address(user)],
            ReadCall::LevelPrice { level } => vec![level_token(level)],
            ReadCall::UsersActiveX3Levels { user, level }
            | ReadCall::UsersActiveX4Levels { user, level }
            | ReadCall::UsersX3Matrix { user, level }
            | ReadCall::UsersX4Matrix { user, level } => vec![Token::Address(user), level_token(level)],
            ReadCall::GetTotalCycles { user, matrix, level }
            | ReadCall::GetPartnerCount { user, matrix, level } => vec![
                Token::Address(user),
                matrix_token(matrix),
                level_token(level),
            ],
        }
    }
}

// ============ WRITE CALLS ============

/// Every mutating method the gateway may submit. `value` is the wei attached to the transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteCall {
    Register { referrer: Address, value: U256 },
    BuyNewLevel { matrix: MatrixKind, level: Level, value: U256 },
}

impl WriteCall {
    pub const METHODS: [&'static str; 2] = ["registrationExt", "buyNewLevel"];

    pub fn method(&self) -> &'static str {
        match self {
            WriteCall::Register { .. } => "registrationExt",
            WriteCall::BuyNewLevel { .. } => "buyNewLevel",
        }
    }

    pub fn args(&self) -> Vec<Token> {
        match *self {
            WriteCall::Register { referrer, .. } => vec![Token::Address(referrer)],
            WriteCall::BuyNewLevel { matrix, level, .. } => vec![matrix_token(matrix), level_token(level)],
        }
    }

    pub fn value(&self) -> U256 {
        match *self {
            WriteCall::Register { value, .. } | WriteCall::BuyNewLevel { value, .. } => value,
        }
    }
}

fn level_token(level: Level) -> Token {
    Token::Uint(U256::from(level.get()))
}

fn matrix_token(matrix: MatrixKind) -> Token {
    Token::Uint(U256::from(matrix.as_u8()))
}
