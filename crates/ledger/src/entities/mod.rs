//! Domain records held by the ledger.

pub mod product;
pub mod transaction;
pub mod user;

pub use product::{PriceTier, Product, LOW_STOCK_THRESHOLD};
pub use transaction::{Transaction, TransactionStatus, TransactionType};
pub use user::{KycDocuments, User, UserStatus, UserType};
