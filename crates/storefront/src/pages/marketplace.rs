use std::collections::BTreeSet;

use brandstore_ledger::{Ledger, PaymentError, PaymentReceipt, PriceTier, Product};
use brandstore_session::Session;
use rust_decimal::Decimal;
use tracing::{info, warn};

use super::signed_in_id;
use crate::error::{StorefrontError, StorefrontResult};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum CheckoutStatus {
    #[default]
    Idle,
    Success(PaymentReceipt),
    Failed(PaymentError),
}

#[derive(Debug, Clone)]
pub struct MarketplacePage {
    products: Vec<Product>,
    /// `None` shows every category.
    pub category: Option<String>,
    pub search: String,
    pub tier: PriceTier,
    checkout: CheckoutStatus,
}

impl MarketplacePage {
    pub async fn load(ledger: &Ledger) -> Self {
        Self {
            products: ledger.get_products().await,
            category: None,
            search: String::new(),
            tier: PriceTier::Retail,
            checkout: CheckoutStatus::Idle,
        }
    }

    pub async fn reload(&mut self, ledger: &Ledger) {
        self.products = ledger.get_products().await;
    }

    pub fn checkout_status(&self) -> &CheckoutStatus {
        &self.checkout
    }

    /// Distinct categories of listed products, sorted.
    pub fn categories(&self) -> Vec<&str> {
        self.products
            .iter()
            .filter(|product| product.available)
            .map(|product| product.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Available products matching the category filter and name search.
    pub fn visible(&self) -> Vec<&Product> {
        let needle = self.search.trim().to_lowercase();
        self.products
            .iter()
            .filter(|product| product.available)
            .filter(|product| {
                self.category
                    .as_deref()
                    .map_or(true, |category| product.category == category)
            })
            .filter(|product| needle.is_empty() || product.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn price_of(&self, product: &Product) -> Decimal {
        product.price(self.tier)
    }

    pub fn add_to_cart(
        &self,
        session: &mut Session,
        product_id: &str,
        quantity: u32,
    ) -> StorefrontResult<()> {
        let product = self
            .products
            .iter()
            .find(|product| product.id == product_id && product.available)
            .ok_or_else(|| StorefrontError::ProductUnavailable(product_id.to_string()))?;
        session.add_to_cart(product.clone(), quantity);
        Ok(())
    }

    pub fn cart_total(&self, session: &Session) -> Decimal {
        session.cart_total(self.tier)
    }

    /// Charges the cart at the selected tier as one purchase and empties it on success.
    pub async fn checkout(
        &mut self,
        ledger: &Ledger,
        session: &mut Session,
    ) -> StorefrontResult<&CheckoutStatus> {
        let user_id = signed_in_id(session)?;
        if session.cart().is_empty() {
            return Err(StorefrontError::EmptyCart);
        }

        let lines = session.cart().checkout_lines();
        let total = session.cart_total(self.tier);

        self.checkout = match ledger.checkout(&user_id, &lines, total).await {
            Ok(receipt) => {
                info!(user_id = %user_id, total = %total, transaction_id = %receipt.transaction_id, "checkout complete");
                session.update_balance(receipt.new_balance);
                session.clear_cart();
                CheckoutStatus::Success(receipt)
            }
            Err(error) => {
                warn!(user_id = %user_id, %error, "checkout rejected");
                CheckoutStatus::Failed(error)
            }
        };
        Ok(&self.checkout)
    }

    pub fn dismiss_checkout(&mut self) {
        self.checkout = CheckoutStatus::Idle;
    }
}
