use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::TransactionStatus;

/// Result of a processed payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub transaction_id: String,
    pub status: TransactionStatus,
    pub new_balance: Decimal,
}

/// Aggregates shown on the admin overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStats {
    pub total_balance: Decimal,
    pub total_users: usize,
    pub total_transactions: usize,
    pub pending_orders: usize,
    pub pending_users: usize,
}
