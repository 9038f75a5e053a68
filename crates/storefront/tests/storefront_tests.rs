//! End-to-end page flows against a seeded ledger.

use brandstore_config::{BalancePolicy, LedgerConfig};
use brandstore_ledger::{
    Decimal, Ledger, NewProduct, PaymentError, TransactionStatus, TransactionType, UserStatus,
    UserType,
};
use brandstore_session::{Language, MemoryStore, Session};
use brandstore_storefront::messages::describe;
use brandstore_storefront::pages::{
    AdminPage, AuthPage, CheckoutStatus, DashboardPage, DocumentSlot, FlowStep, MarketplacePage,
    MerchantPage, ServiceFlow, SettingsPage,
};
use brandstore_storefront::{
    bottom_bar, guard, nav_items, AuthMode, Navigation, Route, StorefrontError,
};

fn test_config() -> LedgerConfig {
    LedgerConfig {
        latency_ms: 0,
        ..LedgerConfig::default()
    }
}

fn debt_config() -> LedgerConfig {
    LedgerConfig {
        balance_policy: BalancePolicy::AllowDebt,
        ..test_config()
    }
}

fn fresh_session() -> Session {
    Session::load(Box::new(MemoryStore::new()))
}

fn dec(value: i64) -> Decimal {
    Decimal::from(value)
}

async fn signed_in(ledger: &Ledger, identifier: &str, password: &str) -> Session {
    let mut session = fresh_session();
    let mut page = AuthPage::new(AuthMode::Login);
    page.identifier = identifier.to_string();
    page.login(ledger, &mut session, password)
        .await
        .expect("login should succeed");
    session
}

#[tokio::test]
async fn guard_redirects_by_role() {
    let ledger = Ledger::with_demo_data(&test_config()).unwrap();
    let customer = ledger.get_user("u3").await.unwrap();
    let admin = ledger.get_user("u1").await.unwrap();
    let mut merchant = customer.clone();
    merchant.kind = UserType::Merchant;

    assert_eq!(
        guard(Route::Dashboard, None),
        Navigation::Redirect(Route::Landing)
    );
    assert_eq!(
        guard(Route::login(), None),
        Navigation::Render(Route::login())
    );
    assert_eq!(
        guard(Route::Admin, Some(&customer)),
        Navigation::Redirect(Route::Dashboard)
    );
    assert_eq!(
        guard(Route::Merchant, Some(&customer)),
        Navigation::Redirect(Route::Dashboard)
    );
    assert_eq!(
        guard(Route::Merchant, Some(&merchant)),
        Navigation::Render(Route::Merchant)
    );
    assert_eq!(
        guard(Route::Admin, Some(&merchant)),
        Navigation::Redirect(Route::Dashboard)
    );
    assert_eq!(
        guard(Route::Merchant, Some(&admin)),
        Navigation::Render(Route::Merchant)
    );
    assert_eq!(
        guard(Route::Service("recharge".into()), Some(&customer)),
        Navigation::Render(Route::Service("recharge".into()))
    );
}

#[tokio::test]
async fn nav_items_follow_role() {
    let ledger = Ledger::with_demo_data(&test_config()).unwrap();
    let customer = ledger.get_user("u3").await.unwrap();
    let admin = ledger.get_user("u1").await.unwrap();

    let routes: Vec<_> = nav_items(Some(&customer))
        .into_iter()
        .map(|item| item.route)
        .collect();
    assert_eq!(
        routes,
        vec![Route::Dashboard, Route::Marketplace, Route::Wallet]
    );

    assert_eq!(nav_items(Some(&admin)).len(), 5);
    assert_eq!(bottom_bar(Some(&admin)).len(), 4);
    assert!(nav_items(None).is_empty());
    assert_eq!(nav_items(Some(&admin))[4].label(Language::En), "Control panel");
}

#[tokio::test]
async fn admin_query_preselects_identity_and_login_remembers_account() {
    let ledger = Ledger::with_demo_data(&test_config()).unwrap();
    let mut session = fresh_session();

    let page = AuthPage::from_route(&Route::parse("/auth?admin=shaher"));
    assert_eq!(page.mode(), AuthMode::Login);
    assert_eq!(page.identifier, "01010452456");

    let next = page.login(&ledger, &mut session, "0000#").await.unwrap();
    assert_eq!(next, Route::Dashboard);
    assert_eq!(session.user().unwrap().id, "u1");
    assert_eq!(session.remembered_accounts()[0].id, "u1");
}

#[tokio::test]
async fn failed_login_leaves_session_untouched() {
    let ledger = Ledger::with_demo_data(&test_config()).unwrap();
    let mut session = fresh_session();
    let mut page = AuthPage::new(AuthMode::Login);
    page.identifier = "ahmed@mail.com".to_string();

    let err = page.login(&ledger, &mut session, "wrong").await.unwrap_err();
    assert_eq!(
        describe(&err, Language::Ar),
        "كلمة المرور غير صحيحة."
    );
    assert!(!session.is_signed_in());
    assert!(session.remembered_accounts().is_empty());
}

#[tokio::test]
async fn pending_registration_returns_to_login_without_signing_in() {
    let ledger = Ledger::with_demo_data(&test_config()).unwrap();
    let mut session = fresh_session();

    let mut page = AuthPage::from_route(&Route::parse("/auth?mode=register"));
    assert_eq!(page.mode(), AuthMode::Register);
    page.registration.full_name = "Mona Samir".to_string();
    page.registration.email = "mona@mail.com".to_string();
    page.registration.phone = "01222222222".to_string();
    page.registration.password = "s3cret".to_string();
    page.attach_document(DocumentSlot::IdFront);
    page.attach_document(DocumentSlot::PersonalPhoto);

    let route = page.register(&ledger, &mut session).await.unwrap();
    assert_eq!(route, Route::login());
    assert!(!session.is_signed_in());
    assert!(session.remembered_accounts().is_empty());

    let created = ledger
        .list_users()
        .await
        .into_iter()
        .find(|user| user.email == "mona@mail.com")
        .unwrap();
    assert_eq!(created.status, UserStatus::Pending);
    assert!(created.kyc.is_submitted());

    let mut login = AuthPage::new(AuthMode::Login);
    login.identifier = "mona@mail.com".to_string();
    let err = login.login(&ledger, &mut session, "s3cret").await.unwrap_err();
    assert!(matches!(
        err,
        StorefrontError::Auth(brandstore_ledger::AuthError::PendingReview)
    ));
    assert!(!session.is_signed_in());
}

#[tokio::test]
async fn pending_registration_signs_in_when_pending_logins_are_allowed() {
    let config = LedgerConfig {
        reject_pending_login: false,
        ..test_config()
    };
    let ledger = Ledger::with_demo_data(&config).unwrap();
    let mut session = fresh_session();

    let mut page = AuthPage::new(AuthMode::Register);
    page.registration.full_name = "Mona Samir".to_string();
    page.registration.email = "mona@mail.com".to_string();
    page.registration.phone = "01222222222".to_string();
    page.registration.password = "s3cret".to_string();

    let route = page.register(&ledger, &mut session).await.unwrap();
    assert_eq!(route, Route::Dashboard);
    assert_eq!(session.user().unwrap().status, UserStatus::Pending);
    assert_eq!(session.remembered_accounts().len(), 1);
}

#[tokio::test]
async fn service_flow_validates_form() {
    assert!(matches!(
        ServiceFlow::open("lottery"),
        Err(StorefrontError::ServiceNotFound(_))
    ));

    let mut flow = ServiceFlow::open("bills").unwrap();
    assert!(matches!(flow.next(), Err(StorefrontError::MissingFields)));

    flow.number = "01012345678".to_string();
    flow.amount = "ten".to_string();
    assert!(matches!(flow.next(), Err(StorefrontError::InvalidAmount(_))));

    flow.amount = "25.50".to_string();
    flow.next().unwrap();
    assert_eq!(
        flow.step(),
        &FlowStep::Confirm {
            amount: Decimal::new(2550, 2)
        }
    );

    flow.edit();
    assert_eq!(flow.step(), &FlowStep::Form);
}

#[tokio::test]
async fn recharge_goes_pending_and_admin_approval_clears_it() {
    let ledger = Ledger::with_demo_data(&test_config()).unwrap();
    let mut customer = signed_in(&ledger, "ahmed@mail.com", "123").await;

    let mut flow = ServiceFlow::open("recharge").unwrap();
    flow.number = "01012345678".to_string();
    flow.amount = "50".to_string();
    flow.next().unwrap();

    let receipt = match flow.confirm(&ledger, &mut customer).await.unwrap() {
        FlowStep::Success(receipt) => receipt.clone(),
        other => panic!("unexpected step: {other:?}"),
    };
    assert_eq!(receipt.status, TransactionStatus::Pending);
    assert_eq!(customer.user().unwrap().wallet_balance, dec(70));

    let mut admin_session = signed_in(&ledger, "shaher@admin.local", "0000#").await;
    let mut admin = AdminPage::load(&ledger).await;
    let before = admin.overview().stats.pending_orders;
    assert_eq!(admin.pending_orders().len(), before);

    let approved = admin.approve(&ledger, &receipt.transaction_id).await.unwrap();
    assert_eq!(approved.status, TransactionStatus::Success);
    assert_eq!(admin.overview().stats.pending_orders, before - 1);
    assert_eq!(admin.overview().active_services, 7);

    admin.set_user_status(&ledger, &mut admin_session, "u3", UserStatus::Blocked)
        .await
        .unwrap();
    assert_eq!(
        ledger.get_user("u3").await.unwrap().status,
        UserStatus::Blocked
    );
}

#[tokio::test]
async fn rejected_recharge_is_refunded() {
    let ledger = Ledger::with_demo_data(&test_config()).unwrap();
    let mut customer = signed_in(&ledger, "ahmed@mail.com", "123").await;

    let mut flow = ServiceFlow::open("recharge").unwrap();
    flow.number = "01012345678".to_string();
    flow.amount = "20".to_string();
    flow.next().unwrap();
    let FlowStep::Success(receipt) = flow.confirm(&ledger, &mut customer).await.unwrap().clone()
    else {
        panic!("recharge should be accepted");
    };

    let mut admin = AdminPage::load(&ledger).await;
    admin.reject(&ledger, &receipt.transaction_id).await.unwrap();

    let dashboard = DashboardPage::load(&ledger, &mut customer).await.unwrap();
    assert_eq!(dashboard.balance(), dec(120));
    assert_eq!(customer.user().unwrap().wallet_balance, dec(120));
}

#[tokio::test]
async fn overdraft_fails_flow_and_keeps_balance() {
    let ledger = Ledger::with_demo_data(&test_config()).unwrap();
    let mut session = signed_in(&ledger, "ahmed@mail.com", "123").await;
    let transactions_before = ledger.list_transactions().await.len();

    let mut flow = ServiceFlow::open("bills").unwrap();
    flow.number = "0663333333".to_string();
    flow.amount = "150".to_string();
    flow.next().unwrap();

    let step = flow.confirm(&ledger, &mut session).await.unwrap().clone();
    assert_eq!(
        step,
        FlowStep::Failed(PaymentError::InsufficientBalance {
            available: dec(120),
            requested: dec(150),
        })
    );
    assert_eq!(session.user().unwrap().wallet_balance, dec(120));
    assert_eq!(ledger.list_transactions().await.len(), transactions_before);

    flow.retry();
    assert_eq!(flow.step(), &FlowStep::Form);
    assert_eq!(flow.amount, "150");
}

#[tokio::test]
async fn confirm_requires_signed_in_user_and_confirm_step() {
    let ledger = Ledger::with_demo_data(&test_config()).unwrap();
    let mut session = fresh_session();

    let mut flow = ServiceFlow::open("instapay").unwrap();
    assert!(matches!(
        flow.confirm(&ledger, &mut session).await,
        Err(StorefrontError::StepOutOfOrder)
    ));

    flow.number = "01012345678".to_string();
    flow.amount = "5".to_string();
    flow.next().unwrap();
    assert!(matches!(
        flow.confirm(&ledger, &mut session).await,
        Err(StorefrontError::NotSignedIn)
    ));
}

#[tokio::test]
async fn marketplace_filters_by_category_and_search() {
    let ledger = Ledger::with_demo_data(&test_config()).unwrap();
    let mut page = MarketplacePage::load(&ledger).await;

    assert_eq!(page.categories(), vec!["Cases", "Chargers", "Headphones"]);
    assert_eq!(page.visible().len(), 3);

    page.category = Some("Chargers".to_string());
    let names: Vec<_> = page.visible().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Samsung 45W Charger"]);

    page.category = None;
    page.search = "case".to_string();
    assert_eq!(page.visible().len(), 1);
    assert_eq!(page.visible()[0].id, "3");
}

#[tokio::test]
async fn checkout_at_retail_charges_single_purchase_and_clears_cart() {
    let ledger = Ledger::with_demo_data(&debt_config()).unwrap();
    let mut session = signed_in(&ledger, "01111111111", "123").await;
    let mut page = MarketplacePage::load(&ledger).await;

    page.add_to_cart(&mut session, "1", 1).unwrap();
    page.add_to_cart(&mut session, "2", 1).unwrap();
    page.add_to_cart(&mut session, "1", 1).unwrap();
    assert_eq!(page.cart_total(&session), dec(850));

    let status = page.checkout(&ledger, &mut session).await.unwrap().clone();
    let CheckoutStatus::Success(receipt) = status else {
        panic!("checkout should succeed under the debt policy");
    };
    assert_eq!(receipt.new_balance, dec(-1350));
    assert!(session.cart().is_empty());
    assert_eq!(session.user().unwrap().wallet_balance, dec(-1350));

    let latest = &ledger.list_transactions().await[0];
    assert_eq!(latest.kind, TransactionType::Purchase);
    assert_eq!(latest.amount, dec(850));

    let dashboard = DashboardPage::load(&ledger, &mut session).await.unwrap();
    assert!(dashboard.is_in_debt());
    assert_eq!(dashboard.recent(1)[0].id, receipt.transaction_id);
}

#[tokio::test]
async fn checkout_without_funds_keeps_cart() {
    let ledger = Ledger::with_demo_data(&test_config()).unwrap();
    let mut session = signed_in(&ledger, "ahmed@mail.com", "123").await;
    let mut page = MarketplacePage::load(&ledger).await;

    assert!(matches!(
        page.checkout(&ledger, &mut session).await,
        Err(StorefrontError::EmptyCart)
    ));

    page.add_to_cart(&mut session, "1", 1).unwrap();
    let status = page.checkout(&ledger, &mut session).await.unwrap();
    assert!(matches!(
        status,
        CheckoutStatus::Failed(PaymentError::InsufficientBalance { .. })
    ));
    assert_eq!(session.cart().item_count(), 1);

    page.dismiss_checkout();
    assert_eq!(page.checkout_status(), &CheckoutStatus::Idle);
}

#[tokio::test]
async fn merchant_changes_show_up_in_marketplace() {
    let ledger = Ledger::with_demo_data(&test_config()).unwrap();
    let mut merchant = MerchantPage::load(&ledger).await;
    assert_eq!(merchant.low_stock_count(), 0);

    let created = merchant
        .add(
            &ledger,
            NewProduct {
                name: "USB-C Cable".to_string(),
                wholesale_price: dec(30),
                retail_price: dec(55),
                quantity: 3,
                category: "Chargers".to_string(),
                image: String::new(),
                available: None,
            },
        )
        .await
        .unwrap();
    assert!(created.available);
    assert_eq!(merchant.low_stock_count(), 1);
    assert_eq!(merchant.products().len(), 4);

    merchant.toggle_availability(&ledger, "1").await.unwrap();
    let mut session = fresh_session();
    let shop = MarketplacePage::load(&ledger).await;
    assert!(shop.visible().iter().all(|p| p.id != "1"));
    assert!(matches!(
        shop.add_to_cart(&mut session, "1", 1),
        Err(StorefrontError::ProductUnavailable(_))
    ));

    merchant.delete(&ledger, &created.id).await.unwrap();
    assert_eq!(merchant.products().len(), 3);
    assert!(matches!(
        merchant.delete(&ledger, &created.id).await,
        Err(StorefrontError::Ledger(_))
    ));
}

#[tokio::test]
async fn admin_system_settings_and_balance_adjustment() {
    let ledger = Ledger::with_demo_data(&test_config()).unwrap();
    let mut session = signed_in(&ledger, "shaher@admin.local", "0000#").await;
    let mut admin = AdminPage::load(&ledger).await;

    let settings = admin.rename_store(&mut session, "  port said hub ").unwrap();
    assert_eq!(settings.app_name, "PORT SAID HUB");
    assert_eq!(settings.last_action.as_deref(), Some("Store name updated"));
    assert!(matches!(
        admin.rename_store(&mut session, "   "),
        Err(StorefrontError::MissingFields)
    ));

    assert!(!admin.toggle_store(&mut session).unwrap());
    assert!(!session.system_settings().system_open);
    assert_eq!(
        session.system_settings().last_action.as_deref(),
        Some("Store status changed")
    );

    admin
        .adjust_balance(&ledger, &mut session, "u1", dec(-450))
        .await
        .unwrap();
    assert_eq!(
        session.user().unwrap().wallet_balance,
        Decimal::new(200075, 2)
    );
    assert_eq!(admin.search_customers("0111").len(), 1);
    assert_eq!(admin.customers().len(), 1);
}

#[tokio::test]
async fn settings_toggles_and_logout() {
    let ledger = Ledger::with_demo_data(&test_config()).unwrap();
    let mut session = signed_in(&ledger, "ahmed@mail.com", "123").await;

    let mut settings = SettingsPage::load(&session);
    assert_eq!(settings.name.as_deref(), Some("Hamada"));
    assert!(settings.verified);
    assert_eq!(settings.toggle_language(&mut session).unwrap(), Language::En);
    assert_eq!(session.language(), Language::En);

    assert_eq!(settings.logout(&mut session), Route::Landing);
    assert!(!session.is_signed_in());
    assert!(matches!(
        DashboardPage::load(&ledger, &mut session).await,
        Err(StorefrontError::NotSignedIn)
    ));
}
