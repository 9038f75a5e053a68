//! # Brand Store storefront
//!
//! The boundary between a front end and the ledger. It parses routes, gates them
//! by role, and hosts one controller per screen. Controllers call the ledger,
//! mirror confirmed results into the [`Session`](brandstore_session::Session),
//! and surface failures as [`StorefrontError`] kinds. [`messages::describe`]
//! turns those kinds into Arabic or English text.
//!
//! ```
//! use brandstore_storefront::{guard, Navigation, Route};
//!
//! // Signed-out visitors are sent back to the landing page.
//! assert_eq!(
//!     guard(Route::parse("/admin"), None),
//!     Navigation::Redirect(Route::Landing)
//! );
//! ```

pub mod catalogue;
mod error;
pub mod messages;
pub mod nav;
pub mod pages;
mod routes;

pub use catalogue::{find_service, Service, SERVICES};
pub use error::{StorefrontError, StorefrontResult};
pub use nav::{bottom_bar, nav_items, NavItem};
pub use routes::{guard, AuthMode, Navigation, Route};
