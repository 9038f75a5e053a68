//! Error kinds for ledger operations.
//!
//! Each operation family has its own closed enum so callers branch on the
//! variant. Display text here is developer-facing; user-facing wording is
//! produced by the presentation layer.

use rust_decimal::Decimal;
use thiserror::Error;

/// Failure to hash or parse a stored credential.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("credential error: {0}")]
pub struct CredentialError(pub String);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("account not found")]
    NotFound,

    #[error("wrong password")]
    WrongPassword,

    #[error("account is blocked")]
    Blocked,

    #[error("account is pending review")]
    PendingReview,

    #[error(transparent)]
    Credential(#[from] CredentialError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegisterError {
    #[error("email already registered")]
    DuplicateEmail,

    #[error("phone already registered")]
    DuplicatePhone,

    #[error("invalid registration data: {0}")]
    InvalidData(String),

    #[error(transparent)]
    Credential(#[from] CredentialError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaymentError {
    #[error("amount must be positive")]
    InvalidAmount,

    #[error("insufficient balance: available {available}, requested {requested}")]
    InsufficientBalance {
        available: Decimal,
        requested: Decimal,
    },

    #[error("user {0} not found")]
    UserNotFound(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("user {0} not found")]
    UserNotFound(String),

    #[error("product {0} not found")]
    ProductNotFound(String),

    #[error("transaction {0} not found")]
    TransactionNotFound(String),

    #[error("invalid product: {0}")]
    InvalidProduct(String),
}

/// Unrecognised enum name when parsing from text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

pub type AuthResult<T> = Result<T, AuthError>;
pub type RegisterResult<T> = Result<T, RegisterError>;
pub type PaymentResult<T> = Result<T, PaymentError>;
pub type LedgerResult<T> = Result<T, LedgerError>;

impl From<argon2::password_hash::Error> for CredentialError {
    fn from(err: argon2::password_hash::Error) -> Self {
        CredentialError(err.to_string())
    }
}
