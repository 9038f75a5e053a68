//! Client-side session state for Brand Store: the signed-in user, the
//! marketplace cart, and preferences that survive restarts.
//!
//! ```
//! use brandstore_session::{MemoryStore, Session, Theme};
//!
//! let mut session = Session::load(Box::new(MemoryStore::new()));
//! assert_eq!(session.theme(), Theme::Light);
//! session.toggle_theme().unwrap();
//! assert_eq!(session.theme(), Theme::Dark);
//! ```

mod cart;
mod error;
mod preferences;
mod session;
mod store;

pub use cart::{Cart, CartLine};
pub use error::{SessionError, SessionResult};
pub use preferences::{
    Language, RememberedAccount, SystemSettings, SystemSettingsPatch, Theme, LANGUAGE_KEY,
    REMEMBERED_ACCOUNTS_KEY, SYSTEM_SETTINGS_KEY, THEME_KEY,
};
pub use session::Session;
pub use store::{FileStore, KeyValueStore, MemoryStore};
