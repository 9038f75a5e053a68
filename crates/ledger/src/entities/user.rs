use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ParseEnumError;

/// A shop account. Credentials are held by the ledger and never travel with this record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub nickname: Option<String>,
    pub email: String,
    pub phone: String,
    #[serde(rename = "type")]
    pub kind: UserType,
    pub status: UserStatus,
    /// Negative values record debt owed to the shop.
    pub wallet_balance: Decimal,
    pub avatar: Option<String>,
    #[serde(default)]
    pub kyc: KycDocuments,
}

/// Identity-verification images reviewed by an admin before activation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycDocuments {
    pub id_front: Option<String>,
    pub id_back: Option<String>,
    pub personal_photo: Option<String>,
}

impl KycDocuments {
    pub fn is_submitted(&self) -> bool {
        self.id_front.is_some()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    Customer,
    Merchant,
    Admin,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    Pending,
    Active,
    Blocked,
}

impl User {
    pub fn is_admin(&self) -> bool {
        matches!(self.kind, UserType::Admin)
    }

    /// Nickname when set, otherwise the full name.
    pub fn display_name(&self) -> &str {
        self.nickname
            .as_deref()
            .filter(|nickname| !nickname.trim().is_empty())
            .unwrap_or(&self.full_name)
    }

    /// Case- and whitespace-insensitive match against email or phone.
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        let needle = normalize_identifier(identifier);
        normalize_identifier(&self.email) == needle || normalize_identifier(&self.phone) == needle
    }
}

pub(crate) fn normalize_identifier(value: &str) -> String {
    value.trim().to_lowercase()
}

impl UserType {
    pub fn as_str(self) -> &'static str {
        match self {
            UserType::Customer => "CUSTOMER",
            UserType::Merchant => "MERCHANT",
            UserType::Admin => "ADMIN",
        }
    }
}

impl UserStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            UserStatus::Pending => "PENDING",
            UserStatus::Active => "ACTIVE",
            UserStatus::Blocked => "BLOCKED",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CUSTOMER" => Ok(UserType::Customer),
            "MERCHANT" => Ok(UserType::Merchant),
            "ADMIN" => Ok(UserType::Admin),
            _ => Err(ParseEnumError::new("user type", s)),
        }
    }
}

impl FromStr for UserStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PENDING" => Ok(UserStatus::Pending),
            "ACTIVE" => Ok(UserStatus::Active),
            "BLOCKED" => Ok(UserStatus::Blocked),
            _ => Err(ParseEnumError::new("user status", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
        User {
            id: "u9".to_string(),
            full_name: "Ahmed Ali".to_string(),
            nickname: None,
            email: "Ahmed@Mail.com".to_string(),
            phone: "01111111111".to_string(),
            kind: UserType::Customer,
            status: UserStatus::Active,
            wallet_balance: Decimal::ZERO,
            avatar: None,
            kyc: KycDocuments::default(),
        }
    }

    #[test]
    fn identifier_match_ignores_case_and_whitespace() {
        let user = sample();
        assert!(user.matches_identifier("  ahmed@mail.COM "));
        assert!(user.matches_identifier("01111111111\n"));
        assert!(!user.matches_identifier("ahmed@mail.net"));
    }

    #[test]
    fn display_name_prefers_nickname() {
        let mut user = sample();
        assert_eq!(user.display_name(), "Ahmed Ali");
        user.nickname = Some("Hamada".to_string());
        assert_eq!(user.display_name(), "Hamada");
    }

    #[test]
    fn serializes_with_wire_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["type"], "CUSTOMER");
        assert_eq!(value["status"], "ACTIVE");
        assert_eq!(value["fullName"], "Ahmed Ali");
    }

    #[test]
    fn parses_status_case_insensitively() {
        assert_eq!("blocked".parse::<UserStatus>().unwrap(), UserStatus::Blocked);
        assert!("frozen".parse::<UserStatus>().is_err());
        assert_eq!("Merchant".parse::<UserType>().unwrap(), UserType::Merchant);
    }
}
