//! Path parsing and role gating.
//!
//! Gating only decides where the shopper lands. It is not an authorization
//! boundary; the ledger accepts any call made to it.

use std::fmt;

use brandstore_ledger::{User, UserType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Landing,
    Auth {
        mode: AuthMode,
        admin: Option<String>,
    },
    Dashboard,
    Marketplace,
    Service(String),
    Admin,
    Merchant,
    Wallet,
    Settings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
}

impl Navigation {
    pub fn route(&self) -> &Route {
        match self {
            Navigation::Render(route) | Navigation::Redirect(route) => route,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Navigation::Redirect(_))
    }
}

const ADMIN_ONLY: &[UserType] = &[UserType::Admin];
const MERCHANT_OR_ADMIN: &[UserType] = &[UserType::Merchant, UserType::Admin];

impl Route {
    /// Parses a path with optional query string. Unknown paths land on [`Route::Landing`].
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let input = input.strip_prefix('#').unwrap_or(input);
        let (path, query) = match input.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (input, None),
        };
        let path = path.trim_end_matches('/');
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Landing,
            ["auth"] => {
                let mut mode = AuthMode::Login;
                let mut admin = None;
                for (key, value) in query.into_iter().flat_map(query_pairs) {
                    match key {
                        "mode" if value == "register" => mode = AuthMode::Register,
                        "admin" if !value.is_empty() => admin = Some(value.to_string()),
                        _ => {}
                    }
                }
                Route::Auth { mode, admin }
            }
            ["dashboard"] => Route::Dashboard,
            ["marketplace"] => Route::Marketplace,
            ["service", id] => Route::Service((*id).to_string()),
            ["admin"] => Route::Admin,
            ["merchant"] => Route::Merchant,
            ["wallet"] => Route::Wallet,
            ["settings"] => Route::Settings,
            _ => Route::Landing,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::Auth { mode, admin } => {
                let mut params = Vec::new();
                if *mode == AuthMode::Register {
                    params.push("mode=register".to_string());
                }
                if let Some(admin) = admin {
                    params.push(format!("admin={admin}"));
                }
                if params.is_empty() {
                    "/auth".to_string()
                } else {
                    format!("/auth?{}", params.join("&"))
                }
            }
            Route::Dashboard => "/dashboard".to_string(),
            Route::Marketplace => "/marketplace".to_string(),
            Route::Service(id) => format!("/service/{id}"),
            Route::Admin => "/admin".to_string(),
            Route::Merchant => "/merchant".to_string(),
            Route::Wallet => "/wallet".to_string(),
            Route::Settings => "/settings".to_string(),
        }
    }

    pub fn login() -> Self {
        Route::Auth {
            mode: AuthMode::Login,
            admin: None,
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Route::Landing | Route::Auth { .. })
    }

    /// Roles allowed on this route; `None` means any signed-in user.
    pub fn required_roles(&self) -> Option<&'static [UserType]> {
        match self {
            Route::Admin => Some(ADMIN_ONLY),
            Route::Merchant => Some(MERCHANT_OR_ADMIN),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn query_pairs(query: &str) -> impl Iterator<Item = (&str, &str)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
}

/// Decides whether `route` renders for `user` or where to send them instead.
pub fn guard(route: Route, user: Option<&User>) -> Navigation {
    if route.is_public() {
        return Navigation::Render(route);
    }

    let Some(user) = user else {
        return Navigation::Redirect(Route::Landing);
    };

    match route.required_roles() {
        Some(roles) if !roles.contains(&user.kind) => Navigation::Redirect(Route::Dashboard),
        _ => Navigation::Render(route),
    }
}
