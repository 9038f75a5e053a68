use brandstore_ledger::{CheckoutLine, PriceTier, Product};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self, tier: PriceTier) -> Decimal {
        self.product.price(tier) * Decimal::from(self.quantity)
    }
}

/// Lines keyed by product id, in the order first added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Adds `quantity` units, merging with an existing line for the same product.
    /// A merged line saturates at `u32::MAX` units.
    pub fn add(&mut self, product: Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product.id)
        {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(CartLine { product, quantity }),
        }
    }

    pub fn remove(&mut self, product_id: &str) -> Option<CartLine> {
        let position = self
            .lines
            .iter()
            .position(|line| line.product.id == product_id)?;
        Some(self.lines.remove(position))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |count, line| count.saturating_add(line.quantity))
    }

    pub fn total(&self, tier: PriceTier) -> Decimal {
        self.lines.iter().map(|line| line.subtotal(tier)).sum()
    }

    pub fn checkout_lines(&self) -> Vec<CheckoutLine> {
        self.lines
            .iter()
            .map(|line| CheckoutLine {
                product_id: line.product.id.clone(),
                quantity: line.quantity,
            })
            .collect()
    }
}
