//! Identifier generation for ledger records.

use cuid2::CuidConstructor;
use once_cell::sync::Lazy;
use rand::{distributions::Alphanumeric, Rng};

static CUID: Lazy<CuidConstructor> = Lazy::new(CuidConstructor::new);

const TRANSACTION_PREFIX: &str = "TXN-";
const TRANSACTION_SUFFIX_LEN: usize = 8;

pub fn product_id() -> String {
    CUID.create_id()
}

pub fn user_id(sequence: u64) -> String {
    format!("u{sequence}")
}

/// `TXN-` followed by eight upper-case alphanumerics.
pub fn transaction_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TRANSACTION_SUFFIX_LEN)
        .map(|byte| char::from(byte).to_ascii_uppercase())
        .collect();
    format!("{TRANSACTION_PREFIX}{suffix}")
}
