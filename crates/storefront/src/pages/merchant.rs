use brandstore_ledger::{Ledger, NewProduct, Product, ProductPatch};
use rust_decimal::Decimal;
use tracing::info;

use crate::error::StorefrontResult;

/// Inventory management for merchants and admins.
#[derive(Debug, Clone, Default)]
pub struct MerchantPage {
    products: Vec<Product>,
}

impl MerchantPage {
    pub async fn load(ledger: &Ledger) -> Self {
        Self {
            products: ledger.get_products().await,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn low_stock_count(&self) -> usize {
        self.products.iter().filter(|p| p.is_low_stock()).count()
    }

    /// Stock valued at wholesale prices.
    pub fn inventory_value(&self) -> Decimal {
        self.products
            .iter()
            .map(|p| p.wholesale_price * Decimal::from(p.quantity))
            .sum()
    }

    pub async fn add(&mut self, ledger: &Ledger, product: NewProduct) -> StorefrontResult<Product> {
        let created = ledger.add_product(product).await?;
        info!(product_id = %created.id, "product listed");
        self.refresh(ledger).await;
        Ok(created)
    }

    pub async fn update(
        &mut self,
        ledger: &Ledger,
        product_id: &str,
        patch: ProductPatch,
    ) -> StorefrontResult<Product> {
        let updated = ledger.update_product(product_id, patch).await?;
        self.refresh(ledger).await;
        Ok(updated)
    }

    pub async fn toggle_availability(
        &mut self,
        ledger: &Ledger,
        product_id: &str,
    ) -> StorefrontResult<Product> {
        let current = self
            .products
            .iter()
            .find(|p| p.id == product_id)
            .map(|p| p.available)
            .unwrap_or(false);
        let patch = ProductPatch {
            available: Some(!current),
            ..ProductPatch::default()
        };
        self.update(ledger, product_id, patch).await
    }

    pub async fn delete(&mut self, ledger: &Ledger, product_id: &str) -> StorefrontResult<Product> {
        let removed = ledger.delete_product(product_id).await?;
        info!(product_id, "product removed");
        self.refresh(ledger).await;
        Ok(removed)
    }

    async fn refresh(&mut self, ledger: &Ledger) {
        self.products = ledger.get_products().await;
    }
}
