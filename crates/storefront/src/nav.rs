use brandstore_ledger::{User, UserType};
use brandstore_session::Language;

use crate::routes::Route;

const EVERYONE: &[UserType] = &[UserType::Customer, UserType::Merchant, UserType::Admin];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label_ar: &'static str,
    pub label_en: &'static str,
    pub route: Route,
    roles: &'static [UserType],
}

impl NavItem {
    pub fn label(&self, language: Language) -> &'static str {
        match language {
            Language::Ar => self.label_ar,
            Language::En => self.label_en,
        }
    }

    pub fn allows(&self, kind: UserType) -> bool {
        self.roles.contains(&kind)
    }
}

fn all_items() -> Vec<NavItem> {
    vec![
        NavItem {
            label_ar: "الرئيسية",
            label_en: "Home",
            route: Route::Dashboard,
            roles: EVERYONE,
        },
        NavItem {
            label_ar: "المتجر",
            label_en: "Store",
            route: Route::Marketplace,
            roles: EVERYONE,
        },
        NavItem {
            label_ar: "المحفظة",
            label_en: "Wallet",
            route: Route::Wallet,
            roles: EVERYONE,
        },
        NavItem {
            label_ar: "إدارة المتجر",
            label_en: "Manage store",
            route: Route::Merchant,
            roles: &[UserType::Merchant, UserType::Admin],
        },
        NavItem {
            label_ar: "لوحة التحكم",
            label_en: "Control panel",
            route: Route::Admin,
            roles: &[UserType::Admin],
        },
    ]
}

/// Sidebar entries visible to `user`. Empty when signed out.
pub fn nav_items(user: Option<&User>) -> Vec<NavItem> {
    let Some(user) = user else {
        return Vec::new();
    };
    all_items()
        .into_iter()
        .filter(|item| item.allows(user.kind))
        .collect()
}

/// The mobile bottom bar holds at most four entries.
pub fn bottom_bar(user: Option<&User>) -> Vec<NavItem> {
    let mut items = nav_items(user);
    items.truncate(4);
    items
}
