pub mod ledger;
mod seed;

pub use ledger::{Ledger, LedgerPolicy};
