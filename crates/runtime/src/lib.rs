use std::path::PathBuf;

use anyhow::{Context, Result};
use brandstore_config::{AppConfig, StoreConfig};
use brandstore_ledger::Ledger;
use brandstore_session::{FileStore, Session};
use brandstore_support::{SupportBot, SupportChat};
use tracing::info;

pub mod telemetry {
    use anyhow::Result;
    use tracing::Level;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

        let subscriber = SubscriberBuilder::default()
            .with_max_level(Level::INFO)
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

/// Process-wide collaborators, built once at startup.
#[derive(Clone)]
pub struct ShopServices {
    pub ledger: Ledger,
    pub support: SupportBot,
    pub store: StoreConfig,
    preferences_path: PathBuf,
}

impl ShopServices {
    pub fn initialise(config: &AppConfig) -> Result<Self> {
        let ledger = if config.ledger.seed_demo_data {
            Ledger::with_demo_data(&config.ledger).context("failed to seed demo ledger")?
        } else {
            Ledger::new(&config.ledger)
        };

        let support = SupportBot::new(config).context("failed to build support client")?;

        info!(
            store = %config.store.name,
            seeded = config.ledger.seed_demo_data,
            balance_policy = config.ledger.balance_policy.as_str(),
            support = support.is_configured(),
            "shop services ready"
        );

        Ok(Self {
            ledger,
            support,
            store: config.store.clone(),
            preferences_path: PathBuf::from(&config.preferences.path),
        })
    }

    /// A session whose preferences persist to the configured file.
    pub fn open_session(&self) -> Session {
        Session::load(Box::new(FileStore::open(&self.preferences_path)))
    }

    pub fn support_chat(&self) -> SupportChat {
        SupportChat::new(self.support.clone())
    }

    pub fn preferences_path(&self) -> &PathBuf {
        &self.preferences_path
    }
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
