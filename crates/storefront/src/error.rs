use brandstore_ledger::{AuthError, LedgerError, PaymentError, RegisterError};
use brandstore_session::SessionError;
use thiserror::Error;

/// Everything a page can report back to the shopper.
#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Register(#[from] RegisterError),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("no one is signed in")]
    NotSignedIn,

    #[error("service {0} does not exist")]
    ServiceNotFound(String),

    #[error("product {0} is not available")]
    ProductUnavailable(String),

    #[error("required fields are missing")]
    MissingFields,

    #[error("{0:?} is not a valid amount")]
    InvalidAmount(String),

    #[error("the cart is empty")]
    EmptyCart,

    #[error("action not allowed at this step")]
    StepOutOfOrder,
}

pub type StorefrontResult<T> = Result<T, StorefrontError>;
