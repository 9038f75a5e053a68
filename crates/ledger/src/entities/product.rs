use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stock below this quantity is flagged on the merchant dashboard.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// A catalogue item sold at either tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub wholesale_price: Decimal,
    pub retail_price: Decimal,
    pub quantity: u32,
    pub category: String,
    pub image: String,
    pub available: bool,
}

/// Price column used when totalling a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTier {
    Retail,
    Wholesale,
}

impl Product {
    pub fn price(&self, tier: PriceTier) -> Decimal {
        match tier {
            PriceTier::Retail => self.retail_price,
            PriceTier::Wholesale => self.wholesale_price,
        }
    }

    pub fn is_low_stock(&self) -> bool {
        self.quantity < LOW_STOCK_THRESHOLD
    }

    /// Retail minus wholesale.
    pub fn margin(&self) -> Decimal {
        self.retail_price - self.wholesale_price
    }
}
