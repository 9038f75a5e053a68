//! # Brand Store Ledger
//!
//! The single source of truth for users, products, transactions and wallet
//! balances while the process runs. Nothing is persisted.
//!
//! ## Architecture
//!
//! - **Entities**: plain records (User, Product, Transaction)
//! - **Services**: the [`Ledger`] handle and its demo seed
//! - **Types**: requests, responses and per-operation error kinds
//! - **Utils**: credential hashing and id generation
//!
//! ## Usage
//!
//! ```no_run
//! use brandstore_config::LedgerConfig;
//! use brandstore_ledger::{Ledger, PaymentRequest, TransactionType};
//! use rust_decimal::Decimal;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let ledger = Ledger::with_demo_data(&LedgerConfig::default())?;
//! let user = ledger.login("ahmed@mail.com", "123").await?;
//! let receipt = ledger
//!     .process_payment(&user.id, PaymentRequest::new(TransactionType::Deposit, Decimal::from(50), "Top up"))
//!     .await?;
//! println!("balance is now {}", receipt.new_balance);
//! # Ok(())
//! # }
//! ```

pub mod entities;
pub mod services;
pub mod types;
pub mod utils;

pub use entities::{
    KycDocuments, PriceTier, Product, Transaction, TransactionStatus, TransactionType, User,
    UserStatus, UserType, LOW_STOCK_THRESHOLD,
};
pub use rust_decimal::Decimal;
pub use services::{Ledger, LedgerPolicy};
pub use types::{
    AuthError, CheckoutLine, CredentialError, LedgerError, NewProduct, ParseEnumError,
    PaymentError, PaymentReceipt, PaymentRequest, ProductPatch, RegisterError, RegisterRequest,
    SystemStats,
};
