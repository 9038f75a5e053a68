//! Controllers behind each screen. They hold transient form state only;
//! durable state lives in the ledger and the session.

mod admin;
mod auth;
mod dashboard;
mod marketplace;
mod merchant;
mod service_flow;
mod settings;

pub use admin::{AdminOverview, AdminPage};
pub use auth::{AuthPage, DocumentSlot};
pub use dashboard::DashboardPage;
pub use marketplace::{CheckoutStatus, MarketplacePage};
pub use merchant::MerchantPage;
pub use service_flow::{FlowStep, ServiceFlow};
pub use settings::SettingsPage;

use brandstore_session::Session;

use crate::error::{StorefrontError, StorefrontResult};

fn signed_in_id(session: &Session) -> StorefrontResult<String> {
    session
        .user()
        .map(|user| user.id.clone())
        .ok_or(StorefrontError::NotSignedIn)
}
