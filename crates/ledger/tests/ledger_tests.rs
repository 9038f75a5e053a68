//! Behavioural tests for the in-memory ledger.

use brandstore_config::{BalancePolicy, LedgerConfig, RegistrationPolicy};
use brandstore_ledger::{
    AuthError, CheckoutLine, Decimal, Ledger, LedgerError, NewProduct, PaymentError,
    PaymentRequest, ProductPatch, RegisterError, RegisterRequest, TransactionStatus,
    TransactionType, UserStatus, UserType,
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

fn demo_ledger(config: &LedgerConfig) -> Ledger {
    Ledger::with_demo_data(config).expect("demo data should seed")
}

fn registration(email: &str, phone: &str) -> RegisterRequest {
    RegisterRequest {
        full_name: "Mona Samir".to_string(),
        nickname: Some("Mona".to_string()),
        email: email.to_string(),
        phone: phone.to_string(),
        password: "s3cret".to_string(),
        ..RegisterRequest::default()
    }
}

fn dec(value: i64) -> Decimal {
    Decimal::from(value)
}

#[tokio::test]
async fn login_matches_email_or_phone_ignoring_case_and_whitespace() {
    let ledger = demo_ledger(&test_config());

    let by_email = ledger.login("  AHMED@mail.com ", "123").await.unwrap();
    assert_eq!(by_email.id, "u3");

    let by_phone = ledger.login("01010452456", "0000#").await.unwrap();
    assert_eq!(by_phone.kind, UserType::Admin);
}

#[tokio::test]
async fn login_distinguishes_failure_kinds() {
    let ledger = demo_ledger(&test_config());

    assert_eq!(
        ledger.login("nobody@mail.com", "123").await.unwrap_err(),
        AuthError::NotFound
    );
    assert_eq!(
        ledger.login("ahmed@mail.com", "124").await.unwrap_err(),
        AuthError::WrongPassword
    );

    ledger
        .update_user_status("u3", UserStatus::Blocked)
        .await
        .unwrap();
    assert_eq!(
        ledger.login("ahmed@mail.com", "123").await.unwrap_err(),
        AuthError::Blocked
    );
}

#[tokio::test]
async fn pending_accounts_are_rejected_only_when_configured() {
    let ledger = demo_ledger(&test_config());
    ledger
        .register(registration("mona@mail.com", "01200000000"))
        .await
        .unwrap();
    assert_eq!(
        ledger.login("mona@mail.com", "s3cret").await.unwrap_err(),
        AuthError::PendingReview
    );

    let lenient = demo_ledger(&LedgerConfig {
        reject_pending_login: false,
        ..test_config()
    });
    lenient
        .register(registration("mona@mail.com", "01200000000"))
        .await
        .unwrap();
    let user = lenient.login("mona@mail.com", "s3cret").await.unwrap();
    assert_eq!(user.status, UserStatus::Pending);
}

#[tokio::test]
async fn register_creates_customer_with_configured_status() {
    let ledger = demo_ledger(&test_config());
    let user = ledger
        .register(registration("mona@mail.com", "01200000000"))
        .await
        .unwrap();

    assert_eq!(user.id, "u4");
    assert_eq!(user.kind, UserType::Customer);
    assert_eq!(user.status, UserStatus::Pending);
    assert_eq!(user.wallet_balance, Decimal::ZERO);

    let active = demo_ledger(&LedgerConfig {
        registration_status: RegistrationPolicy::Active,
        ..test_config()
    });
    let user = active
        .register(registration("mona@mail.com", "01200000000"))
        .await
        .unwrap();
    assert_eq!(user.status, UserStatus::Active);
}

#[tokio::test]
async fn duplicate_registration_fails_without_creating_a_user() {
    let ledger = demo_ledger(&test_config());
    let before = ledger.list_users().await.len();

    let err = ledger
        .register(registration("Ahmed@Mail.com", "01200000000"))
        .await
        .unwrap_err();
    assert_eq!(err, RegisterError::DuplicateEmail);

    let err = ledger
        .register(registration("fresh@mail.com", "01111111111"))
        .await
        .unwrap_err();
    assert_eq!(err, RegisterError::DuplicatePhone);

    assert_eq!(ledger.list_users().await.len(), before);
}

#[tokio::test]
async fn register_rejects_missing_fields() {
    let ledger = Ledger::new(&test_config());
    let mut request = registration("mona@mail.com", "01200000000");
    request.full_name = "  ".to_string();

    let err = ledger.register(request).await.unwrap_err();
    assert!(matches!(err, RegisterError::InvalidData(_)));
    assert!(ledger.list_users().await.is_empty());
}

#[tokio::test]
async fn deposit_adds_and_debits_subtract() {
    let ledger = demo_ledger(&test_config());
    let start = ledger.get_balance("u3").await.unwrap();

    let receipt = ledger
        .process_payment(
            "u3",
            PaymentRequest::new(TransactionType::Deposit, dec(30), "Cash in"),
        )
        .await
        .unwrap();
    assert_eq!(receipt.new_balance, start + dec(30));
    assert_eq!(receipt.status, TransactionStatus::Success);

    let receipt = ledger
        .process_payment(
            "u3",
            PaymentRequest::new(TransactionType::Bill, dec(100), "Electricity"),
        )
        .await
        .unwrap();
    assert_eq!(receipt.new_balance, start + dec(30) - dec(100));
    assert_eq!(ledger.get_balance("u3").await.unwrap(), receipt.new_balance);
}

#[tokio::test]
async fn overdraft_is_rejected_without_side_effects_under_no_debt() {
    let ledger = demo_ledger(&test_config());
    assert_eq!(ledger.get_balance("u3").await.unwrap(), dec(120));
    let before = ledger.list_transactions().await.len();

    let err = ledger
        .process_payment(
            "u3",
            PaymentRequest::new(TransactionType::Withdraw, dec(150), "Cash out"),
        )
        .await
        .unwrap_err();

    assert_eq!(
        err,
        PaymentError::InsufficientBalance {
            available: dec(120),
            requested: dec(150),
        }
    );
    assert_eq!(ledger.get_balance("u3").await.unwrap(), dec(120));
    assert_eq!(ledger.list_transactions().await.len(), before);
}

#[tokio::test]
async fn debt_policy_allows_negative_balances() {
    let ledger = demo_ledger(&debt_config());
    assert_eq!(ledger.get_balance("u3").await.unwrap(), dec(-500));

    let receipt = ledger
        .process_payment(
            "u3",
            PaymentRequest::new(TransactionType::Withdraw, dec(150), "Cash out"),
        )
        .await
        .unwrap();
    assert_eq!(receipt.new_balance, dec(-650));
}

#[tokio::test]
async fn non_positive_amounts_are_rejected() {
    let ledger = demo_ledger(&test_config());
    for amount in [Decimal::ZERO, dec(-5)] {
        let err = ledger
            .process_payment(
                "u3",
                PaymentRequest::new(TransactionType::Deposit, amount, "Nothing"),
            )
            .await
            .unwrap_err();
        assert_eq!(err, PaymentError::InvalidAmount);
    }
}

#[tokio::test]
async fn each_payment_appends_one_unique_transaction_at_the_front() {
    let ledger = demo_ledger(&debt_config());
    let before = ledger.list_transactions().await;

    let first = ledger
        .process_payment(
            "u3",
            PaymentRequest::new(TransactionType::Purchase, dec(10), "Case")
                .with_target("01012345678"),
        )
        .await
        .unwrap();
    let second = ledger
        .process_payment(
            "u3",
            PaymentRequest::new(TransactionType::Deposit, dec(10), "Refill"),
        )
        .await
        .unwrap();

    let after = ledger.list_transactions().await;
    assert_eq!(after.len(), before.len() + 2);
    assert_ne!(first.transaction_id, second.transaction_id);
    assert_eq!(after[0].id, second.transaction_id);
    assert_eq!(after[1].id, first.transaction_id);
    assert_eq!(after[1].target_number.as_deref(), Some("01012345678"));
    assert_eq!(after[1].user_name.as_deref(), Some("Ahmed Ali Hassan"));
    assert!(before.iter().all(|tx| tx.id != first.transaction_id));
}

#[tokio::test]
async fn recharge_waits_for_approval_and_approval_reduces_pending_count() {
    let ledger = demo_ledger(&test_config());

    let receipt = ledger
        .process_payment(
            "u3",
            PaymentRequest::new(TransactionType::Recharge, dec(50), "Airtime")
                .with_target("01099999999"),
        )
        .await
        .unwrap();
    assert_eq!(receipt.status, TransactionStatus::Pending);
    assert_eq!(receipt.new_balance, dec(70));

    let pending_before = ledger.system_stats().await.pending_orders;
    let approved = ledger
        .update_transaction_status(&receipt.transaction_id, TransactionStatus::Success)
        .await
        .unwrap();
    assert_eq!(approved.status, TransactionStatus::Success);
    assert_eq!(ledger.system_stats().await.pending_orders, pending_before - 1);
    assert_eq!(ledger.get_balance("u3").await.unwrap(), dec(70));
}

#[tokio::test]
async fn rejecting_a_pending_recharge_refunds_the_wallet() {
    let ledger = demo_ledger(&test_config());
    let receipt = ledger
        .process_payment(
            "u3",
            PaymentRequest::new(TransactionType::Recharge, dec(50), "Airtime"),
        )
        .await
        .unwrap();

    ledger
        .update_transaction_status(&receipt.transaction_id, TransactionStatus::Failed)
        .await
        .unwrap();
    assert_eq!(ledger.get_balance("u3").await.unwrap(), dec(120));
}

#[tokio::test]
async fn reopening_and_rejecting_again_refunds_only_once() {
    let ledger = demo_ledger(&test_config());
    let receipt = ledger
        .process_payment(
            "u3",
            PaymentRequest::new(TransactionType::Recharge, dec(50), "Airtime"),
        )
        .await
        .unwrap();
    let id = receipt.transaction_id;
    assert_eq!(ledger.get_balance("u3").await.unwrap(), dec(70));

    let steps = [
        (TransactionStatus::Failed, dec(120)),
        (TransactionStatus::Pending, dec(70)),
        (TransactionStatus::Failed, dec(120)),
        (TransactionStatus::Failed, dec(120)),
        (TransactionStatus::Success, dec(70)),
        (TransactionStatus::Pending, dec(70)),
        (TransactionStatus::Success, dec(70)),
    ];
    for (status, expected) in steps {
        ledger.update_transaction_status(&id, status).await.unwrap();
        assert_eq!(
            ledger.get_balance("u3").await.unwrap(),
            expected,
            "balance after moving to {status}"
        );
    }
}

#[tokio::test]
async fn rejecting_then_approving_charges_the_wallet_again() {
    let ledger = demo_ledger(&test_config());
    let receipt = ledger
        .process_payment(
            "u3",
            PaymentRequest::new(TransactionType::Recharge, dec(50), "Airtime"),
        )
        .await
        .unwrap();

    ledger
        .update_transaction_status(&receipt.transaction_id, TransactionStatus::Failed)
        .await
        .unwrap();
    assert_eq!(ledger.get_balance("u3").await.unwrap(), dec(120));

    let approved = ledger
        .update_transaction_status(&receipt.transaction_id, TransactionStatus::Success)
        .await
        .unwrap();
    assert_eq!(approved.status, TransactionStatus::Success);
    assert_eq!(ledger.get_balance("u3").await.unwrap(), dec(70));
}

#[tokio::test]
async fn failing_and_restoring_a_deposit_moves_the_credit() {
    let ledger = demo_ledger(&test_config());
    let receipt = ledger
        .process_payment(
            "u3",
            PaymentRequest::new(TransactionType::Deposit, dec(30), "Cash in"),
        )
        .await
        .unwrap();
    assert_eq!(receipt.new_balance, dec(150));

    ledger
        .update_transaction_status(&receipt.transaction_id, TransactionStatus::Failed)
        .await
        .unwrap();
    assert_eq!(ledger.get_balance("u3").await.unwrap(), dec(120));

    ledger
        .update_transaction_status(&receipt.transaction_id, TransactionStatus::Success)
        .await
        .unwrap();
    assert_eq!(ledger.get_balance("u3").await.unwrap(), dec(150));
}

#[tokio::test]
async fn recharge_settles_immediately_without_approval_workflow() {
    let ledger = demo_ledger(&LedgerConfig {
        recharge_requires_approval: false,
        ..test_config()
    });
    let receipt = ledger
        .process_payment(
            "u3",
            PaymentRequest::new(TransactionType::Recharge, dec(20), "Airtime"),
        )
        .await
        .unwrap();
    assert_eq!(receipt.status, TransactionStatus::Success);
}

#[tokio::test]
async fn status_updates_are_unconditional_overwrites() {
    let ledger = demo_ledger(&test_config());
    let statuses = [UserStatus::Pending, UserStatus::Active, UserStatus::Blocked];

    for from in statuses {
        for to in statuses {
            ledger.update_user_status("u3", from).await.unwrap();
            ledger.update_user_status("u3", to).await.unwrap();
            assert_eq!(ledger.get_user("u3").await.unwrap().status, to);
        }
    }

    assert_eq!(
        ledger
            .update_user_status("u99", UserStatus::Active)
            .await
            .unwrap_err(),
        LedgerError::UserNotFound("u99".to_string())
    );
}

#[tokio::test]
async fn admin_balance_adjustment_applies_signed_delta() {
    let ledger = demo_ledger(&test_config());
    let user = ledger.update_user_balance("u3", dec(-200)).await.unwrap();
    assert_eq!(user.wallet_balance, dec(-80));
    let user = ledger.update_user_balance("u3", dec(80)).await.unwrap();
    assert_eq!(user.wallet_balance, Decimal::ZERO);
}

#[tokio::test]
async fn system_stats_aggregate_users_and_transactions() {
    let ledger = demo_ledger(&test_config());
    ledger
        .register(registration("mona@mail.com", "01200000000"))
        .await
        .unwrap();

    let stats = ledger.system_stats().await;
    assert_eq!(stats.total_users, 4);
    assert_eq!(stats.total_transactions, 2);
    assert_eq!(stats.pending_orders, 0);
    assert_eq!(stats.pending_users, 1);
    assert_eq!(
        stats.total_balance,
        Decimal::new(245075, 2) + dec(5000) + dec(120)
    );
}

#[tokio::test]
async fn listings_are_stable_without_mutation() {
    let ledger = demo_ledger(&test_config());

    assert_eq!(ledger.get_products().await, ledger.get_products().await);
    assert_eq!(
        ledger.list_transactions().await,
        ledger.list_transactions().await
    );
    assert_eq!(ledger.list_users().await, ledger.list_users().await);
}

#[tokio::test]
async fn product_crud_round_trip() {
    let ledger = demo_ledger(&test_config());

    let created = ledger
        .add_product(NewProduct {
            name: "USB-C Cable".to_string(),
            wholesale_price: dec(30),
            retail_price: dec(55),
            quantity: 3,
            category: "Chargers".to_string(),
            image: String::new(),
            available: None,
        })
        .await
        .unwrap();
    assert!(created.available);
    assert!(created.is_low_stock());
    assert_eq!(ledger.get_products().await.len(), 4);

    let updated = ledger
        .update_product(
            &created.id,
            ProductPatch {
                retail_price: Some(dec(60)),
                available: Some(false),
                ..ProductPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.retail_price, dec(60));
    assert_eq!(updated.wholesale_price, dec(30));
    assert_eq!(updated.name, "USB-C Cable");
    assert!(!updated.available);

    ledger.delete_product(&created.id).await.unwrap();
    assert_eq!(ledger.get_products().await.len(), 3);
    assert_eq!(
        ledger.delete_product(&created.id).await.unwrap_err(),
        LedgerError::ProductNotFound(created.id.clone())
    );
}

#[tokio::test]
async fn product_validation_rejects_negative_prices() {
    let ledger = demo_ledger(&test_config());
    let err = ledger
        .update_product(
            "1",
            ProductPatch {
                wholesale_price: Some(dec(-1)),
                ..ProductPatch::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidProduct(_)));

    let products = ledger.get_products().await;
    assert_eq!(products[0].wholesale_price, dec(250));
}

#[tokio::test]
async fn deleting_a_product_keeps_past_transactions() {
    let ledger = demo_ledger(&debt_config());
    ledger
        .checkout(
            "u3",
            &[CheckoutLine {
                product_id: "1".to_string(),
                quantity: 1,
            }],
            dec(350),
        )
        .await
        .unwrap();
    let before = ledger.list_transactions().await.len();

    ledger.delete_product("1").await.unwrap();
    assert_eq!(ledger.list_transactions().await.len(), before);
}

#[tokio::test]
async fn checkout_records_a_single_purchase_for_the_cart_total() {
    let ledger = demo_ledger(&debt_config());
    let lines = [
        CheckoutLine {
            product_id: "1".to_string(),
            quantity: 2,
        },
        CheckoutLine {
            product_id: "2".to_string(),
            quantity: 1,
        },
    ];

    let before = ledger.list_transactions().await.len();
    let receipt = ledger.checkout("u3", &lines, dec(850)).await.unwrap();
    let transactions = ledger.list_transactions().await;

    assert_eq!(transactions.len(), before + 1);
    assert_eq!(transactions[0].id, receipt.transaction_id);
    assert_eq!(transactions[0].kind, TransactionType::Purchase);
    assert_eq!(transactions[0].amount, dec(850));
    assert_eq!(receipt.new_balance, dec(-1350));
}

#[tokio::test]
async fn checkout_unit_count_saturates_for_huge_quantities() {
    let ledger = demo_ledger(&test_config());
    let lines = [
        CheckoutLine {
            product_id: "3".to_string(),
            quantity: u32::MAX,
        },
        CheckoutLine {
            product_id: "2".to_string(),
            quantity: 1,
        },
    ];

    ledger.checkout("u3", &lines, dec(10)).await.unwrap();
    let transactions = ledger.list_transactions().await;
    assert_eq!(
        transactions[0].description,
        format!("Marketplace purchase ({} items)", u32::MAX)
    );
}

#[tokio::test]
async fn user_transactions_are_filtered_by_owner() {
    let ledger = demo_ledger(&test_config());
    let mine = ledger.list_user_transactions("u3").await;
    assert_eq!(mine.len(), 1);
    assert!(mine.iter().all(|tx| tx.user_id == "u3"));
}

#[tokio::test]
async fn clones_share_state() {
    let ledger = demo_ledger(&test_config());
    let view = ledger.clone();
    ledger.update_user_balance("u1", dec(1)).await.unwrap();
    assert_eq!(
        view.get_balance("u1").await.unwrap(),
        Decimal::new(245175, 2)
    );
}

#[tokio::test(start_paused = true)]
async fn operations_wait_for_simulated_latency() {
    let ledger = demo_ledger(&LedgerConfig {
        latency_ms: 1_000,
        ..LedgerConfig::default()
    });

    let started = tokio::time::Instant::now();
    ledger.get_products().await;
    assert!(started.elapsed() >= std::time::Duration::from_millis(1_000));
}
