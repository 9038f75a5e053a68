use brandstore_session::{Language, Session, Theme};

use crate::error::StorefrontResult;
use crate::routes::Route;

/// Profile summary and appearance toggles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsPage {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub verified: bool,
    pub theme: Theme,
    pub language: Language,
}

impl SettingsPage {
    pub fn load(session: &Session) -> Self {
        let user = session.user();
        Self {
            name: user.map(|u| u.display_name().to_string()),
            phone: user.map(|u| u.phone.clone()),
            verified: user.is_some_and(|u| u.kyc.is_submitted()),
            theme: session.theme(),
            language: session.language(),
        }
    }

    pub fn toggle_theme(&mut self, session: &mut Session) -> StorefrontResult<Theme> {
        self.theme = session.toggle_theme()?;
        Ok(self.theme)
    }

    pub fn toggle_language(&mut self, session: &mut Session) -> StorefrontResult<Language> {
        self.language = session.toggle_language()?;
        Ok(self.language)
    }

    pub fn logout(&self, session: &mut Session) -> Route {
        session.logout();
        Route::Landing
    }
}
