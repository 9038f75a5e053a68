//! UI preferences persisted between runs.

use std::fmt;

use brandstore_ledger::User;
use serde::{Deserialize, Serialize};

pub const THEME_KEY: &str = "app-theme";
pub const LANGUAGE_KEY: &str = "app-language";
pub const SYSTEM_SETTINGS_KEY: &str = "app-system-settings";
pub const REMEMBERED_ACCOUNTS_KEY: &str = "app-remembered-accounts";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ar,
    En,
}

impl Language {
    pub fn toggled(self) -> Self {
        match self {
            Language::Ar => Language::En,
            Language::En => Language::Ar,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::Ar => "ar",
            Language::En => "en",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "ar" => Some(Language::Ar),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    pub fn is_rtl(self) -> bool {
        matches!(self, Language::Ar)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shop-wide switches edited from the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSettings {
    pub app_name: String,
    pub system_open: bool,
    pub last_action: Option<String>,
    /// Display only; never reconciled with the ledger.
    pub user_count: u32,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            app_name: "BRAND STORE".to_string(),
            system_open: true,
            last_action: None,
            user_count: 0,
        }
    }
}

/// Merge-patch for [`SystemSettings`]; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSettingsPatch {
    pub app_name: Option<String>,
    pub system_open: Option<bool>,
    pub last_action: Option<String>,
    pub user_count: Option<u32>,
}

impl SystemSettings {
    pub fn apply(&mut self, patch: SystemSettingsPatch) {
        if let Some(app_name) = patch.app_name {
            self.app_name = app_name;
        }
        if let Some(system_open) = patch.system_open {
            self.system_open = system_open;
        }
        if let Some(last_action) = patch.last_action {
            self.last_action = Some(last_action);
        }
        if let Some(user_count) = patch.user_count {
            self.user_count = user_count;
        }
    }
}

/// Quick re-login entry. Holds no secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RememberedAccount {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub photo: Option<String>,
}

impl From<&User> for RememberedAccount {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.full_name.clone(),
            phone: user.phone.clone(),
            photo: user.kyc.personal_photo.clone().or_else(|| user.avatar.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_flip_between_two_values() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
        assert_eq!(Language::Ar.toggled(), Language::En);
    }

    #[test]
    fn patch_only_touches_given_fields() {
        let mut settings = SystemSettings::default();
        settings.apply(SystemSettingsPatch {
            system_open: Some(false),
            last_action: Some("store closed".to_string()),
            ..SystemSettingsPatch::default()
        });

        assert_eq!(settings.app_name, "BRAND STORE");
        assert!(!settings.system_open);
        assert_eq!(settings.last_action.as_deref(), Some("store closed"));
    }
}
