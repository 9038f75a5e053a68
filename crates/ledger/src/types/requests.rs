//! Inputs accepted by ledger operations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::{KycDocuments, TransactionType};

/// Sign-up form contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub nickname: Option<String>,
    pub email: String,
    pub phone: String,
    pub password: String,
    #[serde(default)]
    pub kyc: KycDocuments,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.full_name.trim().is_empty() {
            return Err("full name is required".to_string());
        }
        if self.phone.trim().is_empty() {
            return Err("phone is required".to_string());
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err("email is required".to_string());
        }
        if !email.contains('@') {
            return Err("email is malformed".to_string());
        }
        if self.password.is_empty() {
            return Err("password is required".to_string());
        }
        Ok(())
    }
}

/// A wallet operation requested by the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub description: String,
    pub target: Option<String>,
}

impl PaymentRequest {
    pub fn new(kind: TransactionType, amount: Decimal, description: impl Into<String>) -> Self {
        Self {
            amount,
            kind,
            description: description.into(),
            target: None,
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

/// One cart line handed to checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLine {
    pub product_id: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub wholesale_price: Decimal,
    pub retail_price: Decimal,
    pub quantity: u32,
    pub category: String,
    pub image: String,
    /// Defaults to available when omitted.
    pub available: Option<bool>,
}

/// Partial product update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub wholesale_price: Option<Decimal>,
    pub retail_price: Option<Decimal>,
    pub quantity: Option<u32>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub available: Option<bool>,
}

pub(crate) fn validate_product_fields(
    name: &str,
    wholesale_price: Decimal,
    retail_price: Decimal,
) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("name is required".to_string());
    }
    if wholesale_price.is_sign_negative() || retail_price.is_sign_negative() {
        return Err("prices cannot be negative".to_string());
    }
    Ok(())
}
