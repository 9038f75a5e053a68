use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "brandstore.toml",
    "config/brandstore.toml",
    "crates/config/brandstore.toml",
    "../brandstore.toml",
    "../config/brandstore.toml",
    "../crates/config/brandstore.toml",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub ledger: LedgerConfig,
    pub preferences: PreferencesConfig,
    pub support: SupportConfig,
}

/// Shop identity shown in navigation chrome and support fallbacks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub name: String,
    pub tagline: String,
    pub address: String,
    pub support_phone: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "Brand Store".to_string(),
            tagline: "Your all-in-one financial services counter".to_string(),
            address: "Mohamed Ali & El Nasr St., Port Said".to_string(),
            support_phone: "01274790388".to_string(),
        }
    }
}

/// Whether a wallet may go below zero to record store debt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BalancePolicy {
    NoDebt,
    AllowDebt,
}

impl BalancePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            BalancePolicy::NoDebt => "no_debt",
            BalancePolicy::AllowDebt => "allow_debt",
        }
    }
}

/// Status assigned to freshly registered accounts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationPolicy {
    Pending,
    Active,
}

impl RegistrationPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            RegistrationPolicy::Pending => "pending",
            RegistrationPolicy::Active => "active",
        }
    }
}

/// Ledger behaviour switches.
///
/// ```
/// use brandstore_config::{BalancePolicy, LedgerConfig, RegistrationPolicy};
///
/// let ledger = LedgerConfig::default();
/// assert_eq!(ledger.balance_policy, BalancePolicy::NoDebt);
/// assert_eq!(ledger.registration_status, RegistrationPolicy::Pending);
/// assert!(ledger.reject_pending_login);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    #[serde(default = "LedgerConfig::default_latency")]
    pub latency_ms: u64,
    #[serde(default = "LedgerConfig::default_balance_policy")]
    pub balance_policy: BalancePolicy,
    #[serde(default = "LedgerConfig::default_registration_status")]
    pub registration_status: RegistrationPolicy,
    #[serde(default = "LedgerConfig::default_true")]
    pub reject_pending_login: bool,
    #[serde(default = "LedgerConfig::default_true")]
    pub recharge_requires_approval: bool,
    #[serde(default = "LedgerConfig::default_true")]
    pub seed_demo_data: bool,
}

impl LedgerConfig {
    const fn default_latency() -> u64 {
        600
    }

    const fn default_balance_policy() -> BalancePolicy {
        BalancePolicy::NoDebt
    }

    const fn default_registration_status() -> RegistrationPolicy {
        RegistrationPolicy::Pending
    }

    const fn default_true() -> bool {
        true
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            latency_ms: Self::default_latency(),
            balance_policy: Self::default_balance_policy(),
            registration_status: Self::default_registration_status(),
            reject_pending_login: true,
            recharge_requires_approval: true,
            seed_demo_data: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesConfig {
    pub path: String,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            path: "brandstore-prefs.json".to_string(),
        }
    }
}

/// Configuration for the generative-text support assistant.
///
/// ```
/// use brandstore_config::SupportConfig;
///
/// let support = SupportConfig::default();
/// assert_eq!(support.base_url, "https://generativelanguage.googleapis.com/v1beta");
/// assert_eq!(support.request_timeout_seconds, 30);
/// assert!(support.api_key.is_none());
/// ```
///
/// The API key is redacted from `Debug` output.
#[derive(Clone, Serialize, Deserialize)]
pub struct SupportConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "SupportConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "SupportConfig::default_model")]
    pub model: String,
    #[serde(default = "SupportConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl SupportConfig {
    fn default_base_url() -> String {
        "https://generativelanguage.googleapis.com/v1beta".to_string()
    }

    fn default_model() -> String {
        "gemini-1.5-flash".to_string()
    }

    const fn default_request_timeout() -> u64 {
        30
    }
}

impl fmt::Debug for SupportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupportConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .finish()
    }
}

impl Default for SupportConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: Self::default_base_url(),
            model: Self::default_model(),
            request_timeout_seconds: Self::default_request_timeout(),
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use brandstore_config::load;
///
/// std::env::remove_var("BRANDSTORE_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.store.name.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let latency = i64::try_from(defaults.ledger.latency_ms).unwrap_or(i64::MAX);
    let timeout = i64::try_from(defaults.support.request_timeout_seconds).unwrap_or(i64::MAX);

    let mut builder = config::Config::builder()
        .set_default("store.name", defaults.store.name.clone())?
        .set_default("store.tagline", defaults.store.tagline.clone())?
        .set_default("store.address", defaults.store.address.clone())?
        .set_default("store.support_phone", defaults.store.support_phone.clone())?
        .set_default("ledger.latency_ms", latency)?
        .set_default(
            "ledger.balance_policy",
            defaults.ledger.balance_policy.as_str(),
        )?
        .set_default(
            "ledger.registration_status",
            defaults.ledger.registration_status.as_str(),
        )?
        .set_default(
            "ledger.reject_pending_login",
            defaults.ledger.reject_pending_login,
        )?
        .set_default(
            "ledger.recharge_requires_approval",
            defaults.ledger.recharge_requires_approval,
        )?
        .set_default("ledger.seed_demo_data", defaults.ledger.seed_demo_data)?
        .set_default("preferences.path", defaults.preferences.path.clone())?
        .set_default("support.base_url", defaults.support.base_url.clone())?
        .set_default("support.model", defaults.support.model.clone())?
        .set_default("support.request_timeout_seconds", timeout)?;

    let environment_overrides = config::Environment::with_prefix("BRANDSTORE").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("BRANDSTORE_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via BRANDSTORE_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    debug!(?config, "loaded storefront configuration");
    Ok(config)
}
