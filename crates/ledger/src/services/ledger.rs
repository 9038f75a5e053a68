//! The in-memory ledger: users, products, transactions and wallet balances.

use std::sync::Arc;
use std::time::Duration;

use brandstore_config::{BalancePolicy, LedgerConfig, RegistrationPolicy};
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::entities::user::normalize_identifier;
use crate::entities::{
    Product, Transaction, TransactionStatus, TransactionType, User, UserStatus, UserType,
};
use crate::types::{
    validate_product_fields, AuthError, AuthResult, CheckoutLine, CredentialError, LedgerError,
    LedgerResult, NewProduct, PaymentError, PaymentReceipt, PaymentRequest, PaymentResult,
    ProductPatch, RegisterError, RegisterRequest, RegisterResult, SystemStats,
};
use crate::utils::{ids, password};

/// Behaviour switches resolved from [`LedgerConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerPolicy {
    pub balance: BalancePolicy,
    pub registration_status: UserStatus,
    pub reject_pending_login: bool,
    pub recharge_requires_approval: bool,
}

impl From<&LedgerConfig> for LedgerPolicy {
    fn from(config: &LedgerConfig) -> Self {
        Self {
            balance: config.balance_policy,
            registration_status: match config.registration_status {
                RegistrationPolicy::Pending => UserStatus::Pending,
                RegistrationPolicy::Active => UserStatus::Active,
            },
            reject_pending_login: config.reject_pending_login,
            recharge_requires_approval: config.recharge_requires_approval,
        }
    }
}

impl Default for LedgerPolicy {
    fn default() -> Self {
        Self::from(&LedgerConfig::default())
    }
}

pub(crate) struct Account {
    pub(crate) user: User,
    pub(crate) password_hash: String,
}

#[derive(Default)]
pub(crate) struct LedgerState {
    pub(crate) accounts: Vec<Account>,
    pub(crate) products: Vec<Product>,
    /// Newest first.
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) next_user_seq: u64,
}

impl LedgerState {
    fn account(&self, user_id: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.user.id == user_id)
    }

    fn account_mut(&mut self, user_id: &str) -> Option<&mut Account> {
        self.accounts
            .iter_mut()
            .find(|account| account.user.id == user_id)
    }

    pub(crate) fn insert_account(&mut self, user: User, password_hash: String) {
        self.next_user_seq += 1;
        self.accounts.push(Account {
            user,
            password_hash,
        });
    }

    fn fresh_transaction_id(&self) -> String {
        loop {
            let candidate = ids::transaction_id();
            if !self.transactions.iter().any(|tx| tx.id == candidate) {
                return candidate;
            }
        }
    }
}

/// Shared handle to the shop's ledger.
///
/// Cloning is cheap and every clone sees the same state. One lock guards the
/// whole ledger so each operation is atomic with respect to the others.
#[derive(Clone)]
pub struct Ledger {
    state: Arc<RwLock<LedgerState>>,
    policy: LedgerPolicy,
    latency: Duration,
}

impl Ledger {
    /// An empty ledger.
    pub fn new(config: &LedgerConfig) -> Self {
        Self::from_state(LedgerState::default(), config)
    }

    /// A ledger pre-populated with the shop's demo accounts and catalogue.
    pub fn with_demo_data(config: &LedgerConfig) -> Result<Self, CredentialError> {
        let policy = LedgerPolicy::from(config);
        let state = super::seed::demo_state(&policy)?;
        Ok(Self::from_state(state, config))
    }

    pub(crate) fn from_state(state: LedgerState, config: &LedgerConfig) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            policy: LedgerPolicy::from(config),
            latency: Duration::from_millis(config.latency_ms),
        }
    }

    pub fn policy(&self) -> LedgerPolicy {
        self.policy
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    pub async fn login(&self, identifier: &str, password: &str) -> AuthResult<User> {
        self.simulate_latency().await;

        let state = self.state.read().await;
        let account = state
            .accounts
            .iter()
            .find(|account| account.user.matches_identifier(identifier))
            .ok_or_else(|| {
                warn!(identifier = %normalize_identifier(identifier), "login for unknown account");
                AuthError::NotFound
            })?;

        if !password::verify_password(password, &account.password_hash)? {
            warn!(user_id = %account.user.id, "login with wrong password");
            return Err(AuthError::WrongPassword);
        }

        match account.user.status {
            UserStatus::Blocked => return Err(AuthError::Blocked),
            UserStatus::Pending if self.policy.reject_pending_login => {
                return Err(AuthError::PendingReview)
            }
            _ => {}
        }

        info!(user_id = %account.user.id, kind = %account.user.kind, "user signed in");
        Ok(account.user.clone())
    }

    pub async fn register(&self, request: RegisterRequest) -> RegisterResult<User> {
        self.simulate_latency().await;

        request.validate().map_err(RegisterError::InvalidData)?;

        let email = normalize_identifier(&request.email);
        let phone = normalize_identifier(&request.phone);
        let password_hash = password::hash_password(&request.password)?;

        let mut state = self.state.write().await;
        if state
            .accounts
            .iter()
            .any(|account| normalize_identifier(&account.user.email) == email)
        {
            return Err(RegisterError::DuplicateEmail);
        }
        if state
            .accounts
            .iter()
            .any(|account| normalize_identifier(&account.user.phone) == phone)
        {
            return Err(RegisterError::DuplicatePhone);
        }

        let user = User {
            id: ids::user_id(state.next_user_seq + 1),
            full_name: request.full_name.trim().to_string(),
            nickname: request
                .nickname
                .map(|nickname| nickname.trim().to_string())
                .filter(|nickname| !nickname.is_empty()),
            email: request.email.trim().to_string(),
            phone: request.phone.trim().to_string(),
            kind: UserType::Customer,
            status: self.policy.registration_status,
            wallet_balance: Decimal::ZERO,
            avatar: None,
            kyc: request.kyc,
        };

        state.insert_account(user.clone(), password_hash);
        info!(user_id = %user.id, status = %user.status, "registered new customer");
        Ok(user)
    }

    pub async fn get_user(&self, user_id: &str) -> LedgerResult<User> {
        let state = self.state.read().await;
        state
            .account(user_id)
            .map(|account| account.user.clone())
            .ok_or_else(|| LedgerError::UserNotFound(user_id.to_string()))
    }

    pub async fn get_balance(&self, user_id: &str) -> LedgerResult<Decimal> {
        self.get_user(user_id)
            .await
            .map(|user| user.wallet_balance)
    }

    /// Applies `request` to the wallet of `user_id` and records the transaction.
    pub async fn process_payment(
        &self,
        user_id: &str,
        request: PaymentRequest,
    ) -> PaymentResult<PaymentReceipt> {
        self.simulate_latency().await;

        if request.amount <= Decimal::ZERO {
            return Err(PaymentError::InvalidAmount);
        }

        let mut state = self.state.write().await;
        let transaction_id = state.fresh_transaction_id();

        let account = state
            .account_mut(user_id)
            .ok_or_else(|| PaymentError::UserNotFound(user_id.to_string()))?;

        let available = account.user.wallet_balance;
        if !request.kind.is_credit()
            && self.policy.balance == BalancePolicy::NoDebt
            && request.amount > available
        {
            warn!(
                user_id,
                available = %available,
                requested = %request.amount,
                "payment rejected for insufficient balance"
            );
            return Err(PaymentError::InsufficientBalance {
                available,
                requested: request.amount,
            });
        }

        account.user.wallet_balance += request.kind.signed(request.amount);
        let new_balance = account.user.wallet_balance;
        let user_name = account.user.full_name.clone();

        let status = if request.kind == TransactionType::Recharge
            && self.policy.recharge_requires_approval
        {
            TransactionStatus::Pending
        } else {
            TransactionStatus::Success
        };

        let transaction = Transaction {
            id: transaction_id.clone(),
            user_id: user_id.to_string(),
            user_name: Some(user_name),
            kind: request.kind,
            amount: request.amount,
            status,
            description: request.description,
            target_number: request.target,
            created_at: Utc::now(),
        };
        state.transactions.insert(0, transaction);

        info!(
            user_id,
            transaction_id = %transaction_id,
            kind = %request.kind,
            amount = %request.amount,
            status = %status,
            "payment processed"
        );

        Ok(PaymentReceipt {
            transaction_id,
            status,
            new_balance,
        })
    }

    /// Charges the cart total as one purchase; lines are not itemised.
    pub async fn checkout(
        &self,
        user_id: &str,
        lines: &[CheckoutLine],
        total: Decimal,
    ) -> PaymentResult<PaymentReceipt> {
        let units = lines
            .iter()
            .fold(0u32, |units, line| units.saturating_add(line.quantity));
        let description = format!("Marketplace purchase ({units} items)");
        self.process_payment(
            user_id,
            PaymentRequest::new(TransactionType::Purchase, total, description),
        )
        .await
    }

    pub async fn get_products(&self) -> Vec<Product> {
        self.simulate_latency().await;
        let state = self.state.read().await;
        debug!(count = state.products.len(), "listing products");
        state.products.clone()
    }

    pub async fn add_product(&self, request: NewProduct) -> LedgerResult<Product> {
        self.simulate_latency().await;

        validate_product_fields(
            &request.name,
            request.wholesale_price,
            request.retail_price,
        )
        .map_err(LedgerError::InvalidProduct)?;

        let product = Product {
            id: ids::product_id(),
            name: request.name.trim().to_string(),
            wholesale_price: request.wholesale_price,
            retail_price: request.retail_price,
            quantity: request.quantity,
            category: request.category,
            image: request.image,
            available: request.available.unwrap_or(true),
        };

        let mut state = self.state.write().await;
        state.products.push(product.clone());
        info!(product_id = %product.id, name = %product.name, "product added");
        Ok(product)
    }

    pub async fn update_product(&self, product_id: &str, patch: ProductPatch) -> LedgerResult<Product> {
        self.simulate_latency().await;

        let mut state = self.state.write().await;
        let product = state
            .products
            .iter_mut()
            .find(|product| product.id == product_id)
            .ok_or_else(|| LedgerError::ProductNotFound(product_id.to_string()))?;

        let mut updated = product.clone();
        if let Some(name) = patch.name {
            updated.name = name.trim().to_string();
        }
        if let Some(price) = patch.wholesale_price {
            updated.wholesale_price = price;
        }
        if let Some(price) = patch.retail_price {
            updated.retail_price = price;
        }
        if let Some(quantity) = patch.quantity {
            updated.quantity = quantity;
        }
        if let Some(category) = patch.category {
            updated.category = category;
        }
        if let Some(image) = patch.image {
            updated.image = image;
        }
        if let Some(available) = patch.available {
            updated.available = available;
        }

        validate_product_fields(&updated.name, updated.wholesale_price, updated.retail_price)
            .map_err(LedgerError::InvalidProduct)?;

        *product = updated.clone();
        info!(product_id, "product updated");
        Ok(updated)
    }

    /// Removes a product. Past transactions are untouched.
    pub async fn delete_product(&self, product_id: &str) -> LedgerResult<Product> {
        self.simulate_latency().await;

        let mut state = self.state.write().await;
        let position = state
            .products
            .iter()
            .position(|product| product.id == product_id)
            .ok_or_else(|| LedgerError::ProductNotFound(product_id.to_string()))?;

        let removed = state.products.remove(position);
        info!(product_id, "product deleted");
        Ok(removed)
    }

    pub async fn list_users(&self) -> Vec<User> {
        self.simulate_latency().await;
        let state = self.state.read().await;
        debug!(count = state.accounts.len(), "listing users");
        state
            .accounts
            .iter()
            .map(|account| account.user.clone())
            .collect()
    }

    /// All transactions, most recent first.
    pub async fn list_transactions(&self) -> Vec<Transaction> {
        self.simulate_latency().await;
        let state = self.state.read().await;
        debug!(count = state.transactions.len(), "listing transactions");
        state.transactions.clone()
    }

    pub async fn list_user_transactions(&self, user_id: &str) -> Vec<Transaction> {
        self.simulate_latency().await;
        let state = self.state.read().await;
        let transactions: Vec<Transaction> = state
            .transactions
            .iter()
            .filter(|tx| tx.user_id == user_id)
            .cloned()
            .collect();
        debug!(user_id, count = transactions.len(), "listing user transactions");
        transactions
    }

    /// Overwrites the status with no transition check.
    pub async fn update_user_status(&self, user_id: &str, status: UserStatus) -> LedgerResult<User> {
        self.simulate_latency().await;

        let mut state = self.state.write().await;
        let account = state
            .account_mut(user_id)
            .ok_or_else(|| LedgerError::UserNotFound(user_id.to_string()))?;

        let previous = account.user.status;
        account.user.status = status;
        info!(user_id, from = %previous, to = %status, "user status updated");
        Ok(account.user.clone())
    }

    /// Overwrites the status with no transition check.
    ///
    /// A transaction's balance effect is held exactly while it is not failed:
    /// entering `Failed` reverses it and leaving `Failed` applies it again.
    pub async fn update_transaction_status(
        &self,
        transaction_id: &str,
        status: TransactionStatus,
    ) -> LedgerResult<Transaction> {
        self.simulate_latency().await;

        let mut state = self.state.write().await;
        let transaction = state
            .transactions
            .iter_mut()
            .find(|tx| tx.id == transaction_id)
            .ok_or_else(|| LedgerError::TransactionNotFound(transaction_id.to_string()))?;

        let previous = transaction.status;
        transaction.status = status;
        let updated = transaction.clone();

        let was_applied = previous != TransactionStatus::Failed;
        let is_applied = status != TransactionStatus::Failed;
        if was_applied != is_applied {
            let delta = if is_applied {
                updated.signed_amount()
            } else {
                -updated.signed_amount()
            };
            match state.account_mut(&updated.user_id) {
                Some(account) => {
                    account.user.wallet_balance += delta;
                    info!(
                        user_id = %updated.user_id,
                        delta = %delta,
                        balance = %account.user.wallet_balance,
                        "wallet settled for transaction status change"
                    );
                }
                None => warn!(user_id = %updated.user_id, "transaction owner no longer exists"),
            }
        }

        info!(transaction_id, from = %previous, to = %status, "transaction status updated");
        Ok(updated)
    }

    /// Manual admin adjustment; `delta` may be negative.
    pub async fn update_user_balance(&self, user_id: &str, delta: Decimal) -> LedgerResult<User> {
        self.simulate_latency().await;

        let mut state = self.state.write().await;
        let account = state
            .account_mut(user_id)
            .ok_or_else(|| LedgerError::UserNotFound(user_id.to_string()))?;

        account.user.wallet_balance += delta;
        info!(
            user_id,
            delta = %delta,
            balance = %account.user.wallet_balance,
            "balance adjusted by admin"
        );
        Ok(account.user.clone())
    }

    pub async fn system_stats(&self) -> SystemStats {
        self.simulate_latency().await;

        let state = self.state.read().await;
        SystemStats {
            total_balance: state
                .accounts
                .iter()
                .map(|account| account.user.wallet_balance)
                .sum(),
            total_users: state.accounts.len(),
            total_transactions: state.transactions.len(),
            pending_orders: state.transactions.iter().filter(|tx| tx.is_pending()).count(),
            pending_users: state
                .accounts
                .iter()
                .filter(|account| account.user.status == UserStatus::Pending)
                .count(),
        }
    }
}
