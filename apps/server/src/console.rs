//! Line-oriented shell that drives the storefront pages.

use std::str::FromStr;

use anyhow::Context;
use brandstore_ledger::{AuthError, NewProduct, PriceTier, RegisterRequest, UserStatus};
use brandstore_runtime::ShopServices;
use brandstore_session::Session;
use brandstore_storefront::messages::{describe, kind_label, status_label};
use brandstore_storefront::pages::{
    AdminPage, AuthPage, CheckoutStatus, DashboardPage, FlowStep, MarketplacePage, MerchantPage,
    ServiceFlow, SettingsPage,
};
use brandstore_storefront::{
    guard, nav_items, AuthMode, Navigation, Route, StorefrontError, SERVICES,
};
use brandstore_support::SupportChat;
use colored::*;
use rust_decimal::Decimal;
use tokio::io::{AsyncBufReadExt, BufReader};

pub struct Console {
    services: ShopServices,
    session: Session,
    marketplace: MarketplacePage,
    chat: SupportChat,
    route: Route,
}

impl Console {
    pub async fn new(services: ShopServices) -> Self {
        let session = services.open_session();
        let marketplace = MarketplacePage::load(&services.ledger).await;
        let chat = services.support_chat();
        Self {
            services,
            session,
            marketplace,
            chat,
            route: Route::Landing,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        println!("{} Interactive Console", self.session.system_settings().app_name.bold());
        println!("{}", self.services.store.tagline);
        println!("Type '/help' for commands, '/quit' to exit");
        println!("---");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut line = String::new();

        loop {
            print!("{} > ", self.prompt());
            std::io::Write::flush(&mut std::io::stdout())?;

            line.clear();
            let bytes_read = reader
                .read_line(&mut line)
                .await
                .context("failed to read from stdin")?;
            if bytes_read == 0 {
                break;
            }

            let input = line.trim();
            if input.is_empty() {
                continue;
            }

            let (command, rest) = input.split_once(' ').unwrap_or((input, ""));
            let rest = rest.trim().to_string();

            match command {
                "/quit" | "/exit" | "/q" => {
                    println!("Goodbye!");
                    break;
                }
                "/help" | "/h" => print_help(),
                "/login" => self.login(&rest).await,
                "/register" => self.register(&rest).await,
                "/logout" => self.logout(),
                "/remembered" => self.remembered(),
                "/go" => self.go(&rest).await,
                "/nav" => self.nav(),
                "/dashboard" | "/d" => self.dashboard().await,
                "/services" => self.list_services(),
                "/pay" => self.pay(&rest).await,
                "/products" | "/p" => self.products(&rest).await,
                "/tier" => self.tier(&rest),
                "/add" => self.add_to_cart(&rest),
                "/remove" => self.remove_from_cart(&rest),
                "/cart" | "/c" => self.cart(),
                "/checkout" => self.checkout().await,
                "/merchant" => self.merchant(&rest).await,
                "/admin" => self.admin(&rest).await,
                "/theme" => self.toggle_theme(),
                "/lang" => self.toggle_language(),
                "/chat" => self.chat(&rest).await,
                "/dialect" => {
                    let dialect = self.chat.toggle_dialect();
                    println!("Support dialect: {dialect} ({})", dialect.input_hint());
                }
                other => println!("Unknown command: {other}. Type '/help' for a list."),
            }
        }

        Ok(())
    }

    fn prompt(&self) -> String {
        match self.session.user() {
            Some(user) => format!(
                "{} [{} EGP] {}",
                user.display_name().cyan(),
                user.wallet_balance,
                self.route
            ),
            None => self.route.to_string(),
        }
    }

    fn report(&self, error: StorefrontError) {
        tracing::debug!(%error, "command failed");
        println!("{}", describe(&error, self.session.language()).red());
    }

    /// Navigates to `route`, honouring role gating. Returns whether it rendered.
    fn enter(&mut self, route: Route) -> bool {
        match guard(route, self.session.user()) {
            Navigation::Render(route) => {
                self.route = route;
                true
            }
            Navigation::Redirect(route) => {
                println!("{} {}", "Redirected to".yellow(), route);
                self.route = route;
                false
            }
        }
    }

    async fn login(&mut self, rest: &str) {
        let mut parts = rest.split_whitespace();
        let (Some(identifier), Some(password)) = (parts.next(), parts.next()) else {
            println!("Usage: /login <email-or-phone> <password>");
            return;
        };

        let mut page = AuthPage::new(AuthMode::Login);
        page.identifier = identifier.to_string();
        match page
            .login(&self.services.ledger, &mut self.session, password)
            .await
        {
            Ok(route) => {
                if let Some(user) = self.session.user() {
                    println!("{} {}", "Welcome back,".green(), user.display_name());
                }
                self.enter(route);
            }
            Err(error) => self.report(error),
        }
    }

    async fn register(&mut self, rest: &str) {
        let fields: Vec<&str> = rest.split('|').map(str::trim).collect();
        let [full_name, email, phone, password] = fields.as_slice() else {
            println!("Usage: /register <full name> | <email> | <phone> | <password>");
            return;
        };

        let mut page = AuthPage::new(AuthMode::Register);
        page.registration = RegisterRequest {
            full_name: full_name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            password: password.to_string(),
            ..RegisterRequest::default()
        };

        match page.register(&self.services.ledger, &mut self.session).await {
            Ok(route) => {
                match self.session.user() {
                    Some(user) => println!(
                        "{} {} ({})",
                        "Account created:".green(),
                        user.full_name,
                        user.status
                    ),
                    None => {
                        let pending = StorefrontError::Auth(AuthError::PendingReview);
                        println!(
                            "{} {}",
                            "Account created.".green(),
                            describe(&pending, self.session.language()).yellow()
                        );
                    }
                }
                self.enter(route);
            }
            Err(error) => self.report(error),
        }
    }

    fn logout(&mut self) {
        let route = SettingsPage::load(&self.session).logout(&mut self.session);
        self.route = route;
        println!("Signed out.");
    }

    fn remembered(&self) {
        let accounts = self.session.remembered_accounts();
        if accounts.is_empty() {
            println!("No remembered accounts");
            return;
        }
        for account in accounts {
            println!("  {} {} ({})", account.id, account.name, account.phone);
        }
    }

    async fn go(&mut self, rest: &str) {
        let route = Route::parse(rest);
        if !self.enter(route) {
            return;
        }
        match self.route.clone() {
            Route::Dashboard | Route::Wallet => self.dashboard().await,
            Route::Marketplace => self.products("").await,
            Route::Merchant => self.merchant("list").await,
            Route::Admin => self.admin("stats").await,
            Route::Settings => self.settings(),
            Route::Service(id) => match ServiceFlow::open(&id) {
                Ok(flow) => println!(
                    "{}: /pay {} <number> <amount>",
                    flow.service().name(self.session.language()),
                    id
                ),
                Err(error) => self.report(error),
            },
            Route::Auth { mode, admin } => {
                let page = AuthPage::from_route(&Route::Auth { mode, admin });
                match page.mode() {
                    AuthMode::Login if !page.identifier.is_empty() => {
                        println!("/login {} <password>", page.identifier)
                    }
                    AuthMode::Login => println!("/login <email-or-phone> <password>"),
                    AuthMode::Register => {
                        println!("/register <full name> | <email> | <phone> | <password>")
                    }
                }
            }
            Route::Landing => println!(
                "{} - {}",
                self.session.system_settings().app_name,
                self.services.store.address
            ),
        }
    }

    fn nav(&self) {
        let language = self.session.language();
        for item in nav_items(self.session.user()) {
            println!("  {:<16} {}", item.label(language), item.route);
        }
    }

    fn settings(&self) {
        let page = SettingsPage::load(&self.session);
        println!("Name:     {}", page.name.unwrap_or_default());
        println!("Phone:    {}", page.phone.unwrap_or_default());
        println!("Verified: {}", page.verified);
        println!("Theme:    {}", page.theme);
        println!("Language: {}", page.language);
    }

    async fn dashboard(&mut self) {
        if !self.enter(Route::Dashboard) {
            return;
        }
        let page = match DashboardPage::load(&self.services.ledger, &mut self.session).await {
            Ok(page) => page,
            Err(error) => return self.report(error),
        };

        let language = self.session.language();
        let balance = format!("{} EGP", page.balance());
        if page.is_in_debt() {
            println!("Balance: {} (owed to the shop)", balance.red());
        } else {
            println!("Balance: {}", balance.green());
        }
        println!("Pending: {}", page.pending_count());
        for tx in page.recent(10) {
            println!(
                "  {:<14} {:<12} {:>10} {:<14} {}",
                tx.id,
                kind_label(tx.kind, language),
                tx.signed_amount(),
                status_label(tx.status, language),
                tx.created_at.format("%Y-%m-%d %H:%M")
            );
        }
    }

    fn list_services(&self) {
        let language = self.session.language();
        for service in SERVICES {
            println!("  {:<14} {}", service.id, service.name(language));
        }
    }

    async fn pay(&mut self, rest: &str) {
        let parts: Vec<&str> = rest.split_whitespace().collect();
        let [service_id, number, amount] = parts.as_slice() else {
            println!("Usage: /pay <service> <number> <amount>");
            return;
        };
        if !self.enter(Route::Service(service_id.to_string())) {
            return;
        }

        let mut flow = match ServiceFlow::open(service_id) {
            Ok(flow) => flow,
            Err(error) => return self.report(error),
        };
        flow.number = number.to_string();
        flow.amount = amount.to_string();
        if let Err(error) = flow.next() {
            return self.report(error);
        }

        match flow.confirm(&self.services.ledger, &mut self.session).await {
            Ok(FlowStep::Success(receipt)) => println!(
                "{} {} ({}), new balance {} EGP",
                "Done:".green(),
                receipt.transaction_id,
                status_label(receipt.status, self.session.language()),
                receipt.new_balance
            ),
            Ok(FlowStep::Failed(error)) => {
                let error = StorefrontError::from(error.clone());
                self.report(error);
            }
            Ok(_) => {}
            Err(error) => self.report(error),
        }
    }

    async fn products(&mut self, rest: &str) {
        if !self.enter(Route::Marketplace) {
            return;
        }
        self.marketplace.reload(&self.services.ledger).await;
        self.marketplace.category = None;
        self.marketplace.search.clear();
        match rest.split_once(' ') {
            Some(("category", category)) => {
                self.marketplace.category = Some(category.trim().to_string())
            }
            Some(("search", needle)) => self.marketplace.search = needle.trim().to_string(),
            _ if !rest.is_empty() => self.marketplace.search = rest.to_string(),
            _ => {}
        }

        println!("Categories: {}", self.marketplace.categories().join(", "));
        for product in self.marketplace.visible() {
            let stock = if product.is_low_stock() {
                format!("{} left", product.quantity).yellow()
            } else {
                format!("{} in stock", product.quantity).normal()
            };
            println!(
                "  {:<28} {:<30} {:>8} EGP  {}",
                product.id,
                product.name,
                self.marketplace.price_of(product),
                stock
            );
        }
    }

    fn tier(&mut self, rest: &str) {
        self.marketplace.tier = match rest {
            "wholesale" => PriceTier::Wholesale,
            "retail" | "" => PriceTier::Retail,
            other => {
                println!("Unknown tier: {other}. Use 'retail' or 'wholesale'.");
                return;
            }
        };
        println!("Prices shown at {:?}", self.marketplace.tier);
    }

    fn add_to_cart(&mut self, rest: &str) {
        let mut parts = rest.split_whitespace();
        let Some(product_id) = parts.next() else {
            println!("Usage: /add <product-id> [quantity]");
            return;
        };
        let quantity = parts.next().and_then(|q| q.parse().ok()).unwrap_or(1);
        match self
            .marketplace
            .add_to_cart(&mut self.session, product_id, quantity)
        {
            Ok(()) => self.cart(),
            Err(error) => self.report(error),
        }
    }

    fn remove_from_cart(&mut self, product_id: &str) {
        if !self.session.remove_from_cart(product_id) {
            println!("Not in cart: {product_id}");
        }
        self.cart();
    }

    fn cart(&self) {
        let cart = self.session.cart();
        if cart.is_empty() {
            println!("Cart is empty");
            return;
        }
        for line in cart.lines() {
            println!(
                "  {:<30} x{:<3} {:>10}",
                line.product.name,
                line.quantity,
                line.subtotal(self.marketplace.tier)
            );
        }
        println!(
            "  {:<35} {:>10} EGP",
            "Total",
            self.marketplace.cart_total(&self.session)
        );
    }

    async fn checkout(&mut self) {
        match self
            .marketplace
            .checkout(&self.services.ledger, &mut self.session)
            .await
        {
            Ok(CheckoutStatus::Success(receipt)) => println!(
                "{} {} - new balance {} EGP",
                "Order placed:".green(),
                receipt.transaction_id,
                receipt.new_balance
            ),
            Ok(CheckoutStatus::Failed(error)) => {
                let error = StorefrontError::from(error.clone());
                self.marketplace.dismiss_checkout();
                self.report(error);
            }
            Ok(CheckoutStatus::Idle) => {}
            Err(error) => self.report(error),
        }
    }

    async fn merchant(&mut self, rest: &str) {
        if !self.enter(Route::Merchant) {
            return;
        }
        let ledger = &self.services.ledger;
        let mut page = MerchantPage::load(ledger).await;
        let (action, args) = rest.split_once(' ').unwrap_or((rest, ""));

        let outcome = match action {
            "" | "list" => Ok(()),
            "add" => match parse_new_product(args) {
                Some(product) => page.add(ledger, product).await.map(|_| ()),
                None => {
                    println!("Usage: /merchant add <name> | <wholesale> | <retail> | <qty> | <category>");
                    return;
                }
            },
            "toggle" => page.toggle_availability(ledger, args.trim()).await.map(|_| ()),
            "delete" => page.delete(ledger, args.trim()).await.map(|_| ()),
            other => {
                println!("Unknown merchant action: {other}");
                return;
            }
        };
        if let Err(error) = outcome {
            return self.report(error);
        }

        println!(
            "{} products, {} low on stock, stock value {} EGP",
            page.products().len(),
            page.low_stock_count(),
            page.inventory_value()
        );
        for product in page.products() {
            let state = if product.available { "listed" } else { "hidden" };
            println!(
                "  {:<28} {:<30} {:>4} {}",
                product.id, product.name, product.quantity, state
            );
        }
    }

    async fn admin(&mut self, rest: &str) {
        if !self.enter(Route::Admin) {
            return;
        }
        let ledger = self.services.ledger.clone();
        let mut page = AdminPage::load(&ledger).await;
        let parts: Vec<&str> = rest.split_whitespace().collect();
        let language = self.session.language();

        let outcome: Result<(), StorefrontError> = match parts.as_slice() {
            [] | ["stats"] => {
                let overview = page.overview();
                println!("Total balance:   {} EGP", overview.stats.total_balance);
                println!("Pending orders:  {}", overview.stats.pending_orders);
                println!("Transactions:    {}", overview.stats.total_transactions);
                println!("Pending users:   {}", overview.stats.pending_users);
                println!("Active services: {}", overview.active_services);
                Ok(())
            }
            ["users", query @ ..] => {
                for user in page.search_customers(&query.join(" ")) {
                    println!(
                        "  {:<6} {:<24} {:<12} {:<8} {:>10} kyc:{}",
                        user.id,
                        user.full_name,
                        user.phone,
                        user.status,
                        user.wallet_balance,
                        user.kyc.is_submitted()
                    );
                }
                Ok(())
            }
            ["orders"] => {
                for tx in page.orders() {
                    println!(
                        "  {:<14} {:<20} {:<10} {:>10} {}",
                        tx.id,
                        tx.user_name.as_deref().unwrap_or(&tx.user_id),
                        kind_label(tx.kind, language),
                        tx.amount,
                        status_label(tx.status, language)
                    );
                }
                Ok(())
            }
            ["approve", id] => page.approve(&ledger, id).await.map(|tx| {
                println!("{} {}", "Approved".green(), tx.id);
            }),
            ["reject", id] => page.reject(&ledger, id).await.map(|tx| {
                println!("{} {}", "Rejected".yellow(), tx.id);
            }),
            ["status", user_id, status] => match UserStatus::from_str(status) {
                Ok(status) => page
                    .set_user_status(&ledger, &mut self.session, user_id, status)
                    .await
                    .map(|user| println!("{} is now {}", user.full_name, user.status)),
                Err(error) => {
                    println!("{error}");
                    Ok(())
                }
            },
            ["balance", user_id, delta] => match Decimal::from_str(delta) {
                Ok(delta) => page
                    .adjust_balance(&ledger, &mut self.session, user_id, delta)
                    .await
                    .map(|user| println!("{} balance {} EGP", user.full_name, user.wallet_balance)),
                Err(_) => Err(StorefrontError::InvalidAmount(delta.to_string())),
            },
            ["rename", name @ ..] => page
                .rename_store(&mut self.session, &name.join(" "))
                .map(|settings| println!("Store renamed to {}", settings.app_name.bold())),
            ["toggle"] => page.toggle_store(&mut self.session).map(|open| {
                if open {
                    println!("{}", "Store is open".green());
                } else {
                    println!("{}", "Store is in maintenance mode".yellow());
                }
            }),
            _ => {
                println!("Usage: /admin [stats|users [query]|orders|approve <tx>|reject <tx>|status <user> <STATUS>|balance <user> <delta>|rename <name>|toggle]");
                Ok(())
            }
        };

        if let Err(error) = outcome {
            self.report(error);
        }
    }

    fn toggle_theme(&mut self) {
        let mut page = SettingsPage::load(&self.session);
        match page.toggle_theme(&mut self.session) {
            Ok(theme) => println!("Theme: {theme}"),
            Err(error) => self.report(error),
        }
    }

    fn toggle_language(&mut self) {
        let mut page = SettingsPage::load(&self.session);
        match page.toggle_language(&mut self.session) {
            Ok(language) => println!("Language: {language}"),
            Err(error) => self.report(error),
        }
    }

    async fn chat(&mut self, message: &str) {
        if message.is_empty() {
            if let Some(last) = self.chat.transcript().last() {
                println!("{} {}", "Doghry:".blue().bold(), last.text);
            }
            return;
        }
        if let Some(reply) = self.chat.send(message).await {
            println!("{} {}", "Doghry:".blue().bold(), reply.text);
        }
    }
}

fn parse_new_product(args: &str) -> Option<NewProduct> {
    let fields: Vec<&str> = args.split('|').map(str::trim).collect();
    let [name, wholesale, retail, quantity, category] = fields.as_slice() else {
        return None;
    };
    Some(NewProduct {
        name: name.to_string(),
        wholesale_price: Decimal::from_str(wholesale).ok()?,
        retail_price: Decimal::from_str(retail).ok()?,
        quantity: quantity.parse().ok()?,
        category: category.to_string(),
        image: String::new(),
        available: None,
    })
}

fn print_help() {
    println!("Available commands:");
    println!("  /login <id> <password>         - Sign in with email or phone");
    println!("  /register a | b | c | d        - Register: name | email | phone | password");
    println!("  /logout                        - Sign out and empty the cart");
    println!("  /remembered                    - Accounts used on this device");
    println!("  /go <path>                     - Open a route, e.g. /go /auth?admin=shaher");
    println!("  /nav                           - Menu entries for your role");
    println!("  /dashboard, /d                 - Balance and recent activity");
    println!("  /services                      - Payment services");
    println!("  /pay <service> <number> <amt>  - Pay through a service");
    println!("  /products, /p [category <c>|search <s>]");
    println!("  /tier retail|wholesale         - Price column for the cart");
    println!("  /add <id> [qty], /remove <id>  - Edit the cart");
    println!("  /cart, /c                      - Show the cart");
    println!("  /checkout                      - Pay for the cart");
    println!("  /merchant [list|add|toggle|delete]");
    println!("  /admin [stats|users|orders|approve|reject|status|balance|rename|toggle]");
    println!("  /theme, /lang                  - Toggle appearance and language");
    println!("  /chat <message>, /dialect      - Talk to support");
    println!("  /quit, /exit, /q               - Exit console");
}
