use brandstore_ledger::{Ledger, RegisterRequest, User, UserStatus};
use brandstore_session::{RememberedAccount, Session};
use tracing::{info, warn};

use crate::error::StorefrontResult;
use crate::routes::{AuthMode, Route};

/// Staff shortcuts accepted in `/auth?admin=<name>`.
const ADMIN_SHORTCUTS: &[(&str, &str)] = &[
    ("shaher", "01010452456"),
    ("mostfa", "01274790388"),
    ("mostafa", "01274790388"),
];

const PHOTO_PLACEHOLDER: &str = "https://via.placeholder.com/150?text=User";
const ID_PLACEHOLDER: &str = "https://via.placeholder.com/400x250?text=ID+Preview";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSlot {
    PersonalPhoto,
    IdFront,
    IdBack,
}

#[derive(Debug, Clone, Default)]
pub struct AuthPage {
    mode: AuthMode,
    pub identifier: String,
    pub registration: RegisterRequest,
}

impl AuthPage {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Builds the form for an auth route, preselecting a staff identity when named.
    pub fn from_route(route: &Route) -> Self {
        match route {
            Route::Auth { mode, admin } => {
                let mut page = Self::new(*mode);
                if let Some(phone) = admin.as_deref().and_then(admin_phone) {
                    page.identifier = phone.to_string();
                }
                page
            }
            _ => Self::default(),
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
    }

    /// Stands in for an image upload by attaching a placeholder reference.
    pub fn attach_document(&mut self, slot: DocumentSlot) {
        let kyc = &mut self.registration.kyc;
        match slot {
            DocumentSlot::PersonalPhoto => kyc.personal_photo = Some(PHOTO_PLACEHOLDER.to_string()),
            DocumentSlot::IdFront => kyc.id_front = Some(ID_PLACEHOLDER.to_string()),
            DocumentSlot::IdBack => kyc.id_back = Some(ID_PLACEHOLDER.to_string()),
        }
    }

    pub async fn login(
        &self,
        ledger: &Ledger,
        session: &mut Session,
        password: &str,
    ) -> StorefrontResult<Route> {
        let user = ledger.login(&self.identifier, password).await?;
        Ok(sign_in(session, user))
    }

    /// Creates the account. A pending account is only signed in when the
    /// ledger would also let it log in; otherwise the login form is returned.
    pub async fn register(&self, ledger: &Ledger, session: &mut Session) -> StorefrontResult<Route> {
        let user = ledger.register(self.registration.clone()).await?;
        info!(user_id = %user.id, status = %user.status, "registration accepted");

        if user.status == UserStatus::Pending && ledger.policy().reject_pending_login {
            info!(user_id = %user.id, "awaiting review, not signed in");
            return Ok(Route::login());
        }
        Ok(sign_in(session, user))
    }
}

fn admin_phone(name: &str) -> Option<&'static str> {
    let name = name.trim().to_lowercase();
    ADMIN_SHORTCUTS
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, phone)| *phone)
}

fn sign_in(session: &mut Session, user: User) -> Route {
    if let Err(error) = session.remember_account(RememberedAccount::from(&user)) {
        warn!(%error, "could not remember account");
    }
    session.set_user(user);
    Route::Dashboard
}
