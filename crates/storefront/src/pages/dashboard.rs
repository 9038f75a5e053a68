use brandstore_ledger::{Ledger, Transaction, User};
use brandstore_session::Session;
use rust_decimal::Decimal;

use super::signed_in_id;
use crate::catalogue::{Service, SERVICES};
use crate::error::StorefrontResult;

/// Wallet card, service shortcuts and recent activity for the signed-in user.
#[derive(Debug, Clone)]
pub struct DashboardPage {
    user: User,
    transactions: Vec<Transaction>,
}

impl DashboardPage {
    /// Re-reads the user from the ledger so the session shows the authoritative balance.
    pub async fn load(ledger: &Ledger, session: &mut Session) -> StorefrontResult<Self> {
        let user_id = signed_in_id(session)?;
        let user = ledger.get_user(&user_id).await?;
        session.refresh_user(user.clone());
        let transactions = ledger.list_user_transactions(&user_id).await;
        Ok(Self { user, transactions })
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn balance(&self) -> Decimal {
        self.user.wallet_balance
    }

    pub fn is_in_debt(&self) -> bool {
        self.user.wallet_balance.is_sign_negative() && !self.user.wallet_balance.is_zero()
    }

    pub fn recent(&self, limit: usize) -> &[Transaction] {
        &self.transactions[..self.transactions.len().min(limit)]
    }

    pub fn pending_count(&self) -> usize {
        self.transactions.iter().filter(|tx| tx.is_pending()).count()
    }

    pub fn services(&self) -> &'static [Service] {
        SERVICES
    }
}
