use brandstore_ledger::{
    Ledger, SystemStats, Transaction, TransactionStatus, User, UserStatus, UserType,
};
use brandstore_session::{Session, SystemSettings, SystemSettingsPatch};
use rust_decimal::Decimal;
use tracing::info;

use crate::catalogue::SERVICES;
use crate::error::{StorefrontError, StorefrontResult};

const RENAME_ACTION: &str = "Store name updated";
const TOGGLE_ACTION: &str = "Store status changed";

/// KPI cards on the overview tab.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminOverview {
    pub stats: SystemStats,
    pub active_services: usize,
}

#[derive(Debug, Clone)]
pub struct AdminPage {
    users: Vec<User>,
    transactions: Vec<Transaction>,
    stats: SystemStats,
}

impl AdminPage {
    pub async fn load(ledger: &Ledger) -> Self {
        Self {
            users: ledger.list_users().await,
            transactions: ledger.list_transactions().await,
            stats: ledger.system_stats().await,
        }
    }

    pub async fn reload(&mut self, ledger: &Ledger) {
        *self = Self::load(ledger).await;
    }

    pub fn overview(&self) -> AdminOverview {
        AdminOverview {
            stats: self.stats.clone(),
            active_services: SERVICES.len(),
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn customers(&self) -> Vec<&User> {
        self.users
            .iter()
            .filter(|user| user.kind == UserType::Customer)
            .collect()
    }

    /// Accounts awaiting KYC review.
    pub fn pending_users(&self) -> Vec<&User> {
        self.users
            .iter()
            .filter(|user| user.status == UserStatus::Pending)
            .collect()
    }

    /// Matches customers by name or phone.
    pub fn search_customers(&self, query: &str) -> Vec<&User> {
        let needle = query.trim().to_lowercase();
        self.customers()
            .into_iter()
            .filter(|user| {
                needle.is_empty()
                    || user.full_name.to_lowercase().contains(&needle)
                    || user.phone.contains(&needle)
            })
            .collect()
    }

    /// All transactions, most recent first.
    pub fn orders(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn pending_orders(&self) -> Vec<&Transaction> {
        self.transactions.iter().filter(|tx| tx.is_pending()).collect()
    }

    pub async fn approve(&mut self, ledger: &Ledger, transaction_id: &str) -> StorefrontResult<Transaction> {
        self.set_transaction_status(ledger, transaction_id, TransactionStatus::Success)
            .await
    }

    /// Rejecting a pending debit refunds its owner.
    pub async fn reject(&mut self, ledger: &Ledger, transaction_id: &str) -> StorefrontResult<Transaction> {
        self.set_transaction_status(ledger, transaction_id, TransactionStatus::Failed)
            .await
    }

    async fn set_transaction_status(
        &mut self,
        ledger: &Ledger,
        transaction_id: &str,
        status: TransactionStatus,
    ) -> StorefrontResult<Transaction> {
        let updated = ledger
            .update_transaction_status(transaction_id, status)
            .await?;
        self.reload(ledger).await;
        Ok(updated)
    }

    pub async fn set_user_status(
        &mut self,
        ledger: &Ledger,
        session: &mut Session,
        user_id: &str,
        status: UserStatus,
    ) -> StorefrontResult<User> {
        let updated = ledger.update_user_status(user_id, status).await?;
        session.refresh_user(updated.clone());
        self.reload(ledger).await;
        Ok(updated)
    }

    /// Manual credit (positive) or debit (negative) on a wallet.
    pub async fn adjust_balance(
        &mut self,
        ledger: &Ledger,
        session: &mut Session,
        user_id: &str,
        delta: Decimal,
    ) -> StorefrontResult<User> {
        let updated = ledger.update_user_balance(user_id, delta).await?;
        session.refresh_user(updated.clone());
        self.reload(ledger).await;
        Ok(updated)
    }

    /// Renames the storefront. Names are stored upper-cased.
    pub fn rename_store<'s>(
        &self,
        session: &'s mut Session,
        name: &str,
    ) -> StorefrontResult<&'s SystemSettings> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StorefrontError::MissingFields);
        }
        info!(name, "store renamed");
        let settings = session.update_system_settings(SystemSettingsPatch {
            app_name: Some(name.to_uppercase()),
            last_action: Some(RENAME_ACTION.to_string()),
            ..SystemSettingsPatch::default()
        })?;
        Ok(settings)
    }

    /// Opens or closes the store and returns the new state.
    pub fn toggle_store(&self, session: &mut Session) -> StorefrontResult<bool> {
        let open = !session.system_settings().system_open;
        session.update_system_settings(SystemSettingsPatch {
            system_open: Some(open),
            last_action: Some(TOGGLE_ACTION.to_string()),
            ..SystemSettingsPatch::default()
        })?;
        info!(open, "store status toggled");
        Ok(open)
    }
}
