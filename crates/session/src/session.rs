//! The single holder of "who is signed in" plus cart and UI preferences.

use brandstore_ledger::{PriceTier, Product, User};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cart::Cart;
use crate::error::SessionResult;
use crate::preferences::{
    Language, RememberedAccount, SystemSettings, SystemSettingsPatch, Theme, LANGUAGE_KEY,
    REMEMBERED_ACCOUNTS_KEY, SYSTEM_SETTINGS_KEY, THEME_KEY,
};
use crate::store::KeyValueStore;

pub struct Session {
    store: Box<dyn KeyValueStore>,
    user: Option<User>,
    cart: Cart,
    theme: Theme,
    language: Language,
    settings: SystemSettings,
    remembered: Vec<RememberedAccount>,
}

impl Session {
    /// Restores preferences from `store`. Missing or corrupt values fall back to defaults.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let theme = store
            .get(THEME_KEY)
            .and_then(|raw| {
                let parsed = Theme::parse(&raw);
                if parsed.is_none() {
                    warn!(key = THEME_KEY, value = %raw, "ignoring unknown theme");
                }
                parsed
            })
            .unwrap_or_default();
        let language = store
            .get(LANGUAGE_KEY)
            .and_then(|raw| {
                let parsed = Language::parse(&raw);
                if parsed.is_none() {
                    warn!(key = LANGUAGE_KEY, value = %raw, "ignoring unknown language");
                }
                parsed
            })
            .unwrap_or_default();
        let settings = read_json(store.as_ref(), SYSTEM_SETTINGS_KEY).unwrap_or_default();
        let remembered = read_json(store.as_ref(), REMEMBERED_ACCOUNTS_KEY).unwrap_or_default();

        debug!(%theme, %language, "session preferences restored");

        Self {
            store,
            user: None,
            cart: Cart::default(),
            theme,
            language,
            settings,
            remembered,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn set_user(&mut self, user: User) {
        info!(user_id = %user.id, "session signed in");
        self.user = Some(user);
    }

    /// Signs out and empties the cart. Preferences are kept.
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!(user_id = %user.id, "session signed out");
        }
        self.cart.clear();
    }

    /// Replaces the cached wallet balance after a ledger call.
    pub fn update_balance(&mut self, balance: Decimal) {
        if let Some(user) = self.user.as_mut() {
            user.wallet_balance = balance;
        }
    }

    /// Refreshes the cached user from an authoritative copy with the same id.
    pub fn refresh_user(&mut self, fresh: User) {
        if self.user.as_ref().is_some_and(|user| user.id == fresh.id) {
            self.user = Some(fresh);
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn add_to_cart(&mut self, product: Product, quantity: u32) {
        debug!(product_id = %product.id, quantity, "cart add");
        self.cart.add(product, quantity);
    }

    pub fn remove_from_cart(&mut self, product_id: &str) -> bool {
        self.cart.remove(product_id).is_some()
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    pub fn cart_total(&self, tier: PriceTier) -> Decimal {
        self.cart.total(tier)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn toggle_theme(&mut self) -> SessionResult<Theme> {
        self.theme = self.theme.toggled();
        self.store.set(THEME_KEY, self.theme.as_str())?;
        Ok(self.theme)
    }

    pub fn set_language(&mut self, language: Language) -> SessionResult<()> {
        self.language = language;
        self.store.set(LANGUAGE_KEY, language.as_str())
    }

    pub fn toggle_language(&mut self) -> SessionResult<Language> {
        self.set_language(self.language.toggled())?;
        Ok(self.language)
    }

    pub fn system_settings(&self) -> &SystemSettings {
        &self.settings
    }

    pub fn update_system_settings(
        &mut self,
        patch: SystemSettingsPatch,
    ) -> SessionResult<&SystemSettings> {
        self.settings.apply(patch);
        write_json(self.store.as_mut(), SYSTEM_SETTINGS_KEY, &self.settings)?;
        Ok(&self.settings)
    }

    /// Most recent first.
    pub fn remembered_accounts(&self) -> &[RememberedAccount] {
        &self.remembered
    }

    /// Moves the account to the front, replacing any entry with the same id.
    pub fn remember_account(&mut self, account: RememberedAccount) -> SessionResult<()> {
        self.remembered.retain(|existing| existing.id != account.id);
        self.remembered.insert(0, account);
        write_json(self.store.as_mut(), REMEMBERED_ACCOUNTS_KEY, &self.remembered)
    }

    pub fn forget_account(&mut self, id: &str) -> SessionResult<bool> {
        let before = self.remembered.len();
        self.remembered.retain(|existing| existing.id != id);
        if self.remembered.len() == before {
            return Ok(false);
        }
        write_json(self.store.as_mut(), REMEMBERED_ACCOUNTS_KEY, &self.remembered)?;
        Ok(true)
    }
}

fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(key, %error, "resetting unreadable preference");
            None
        }
    }
}

fn write_json<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> SessionResult<()> {
    let encoded = serde_json::to_string(value)?;
    store.set(key, &encoded)
}
