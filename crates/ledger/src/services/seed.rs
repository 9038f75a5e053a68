//! Demo accounts, catalogue and history the shop starts with.

use brandstore_config::BalancePolicy;
use chrono::Utc;
use rust_decimal::Decimal;

use super::ledger::{LedgerPolicy, LedgerState};
use crate::entities::{
    KycDocuments, Product, Transaction, TransactionStatus, TransactionType, User, UserStatus,
    UserType,
};
use crate::types::CredentialError;
use crate::utils::password::hash_password;

struct SeedAccount {
    id: &'static str,
    full_name: &'static str,
    nickname: &'static str,
    email: &'static str,
    phone: &'static str,
    kind: UserType,
    balance: Decimal,
    password: &'static str,
    kyc: KycDocuments,
}

fn customer_kyc() -> KycDocuments {
    KycDocuments {
        id_front: Some("https://via.placeholder.com/400x250?text=ID+Front+Preview".to_string()),
        id_back: Some("https://via.placeholder.com/400x250?text=ID+Back+Preview".to_string()),
        personal_photo: Some("https://via.placeholder.com/150?text=Face".to_string()),
    }
}

fn accounts(policy: &LedgerPolicy) -> Vec<SeedAccount> {
    // Debt only exists where the policy allows it.
    let customer_balance = match policy.balance {
        BalancePolicy::AllowDebt => Decimal::from(-500),
        BalancePolicy::NoDebt => Decimal::from(120),
    };

    vec![
        SeedAccount {
            id: "u1",
            full_name: "Shaher Magde",
            nickname: "Shaher",
            email: "shaher@admin.local",
            phone: "01010452456",
            kind: UserType::Admin,
            balance: Decimal::new(245075, 2),
            password: "0000#",
            kyc: KycDocuments::default(),
        },
        SeedAccount {
            id: "u2",
            full_name: "Mostafa Eldarsh",
            nickname: "Eldarsh",
            email: "mostafa@admin.local",
            phone: "01274790388",
            kind: UserType::Admin,
            balance: Decimal::from(5000),
            password: "5555@",
            kyc: KycDocuments::default(),
        },
        SeedAccount {
            id: "u3",
            full_name: "Ahmed Ali Hassan",
            nickname: "Hamada",
            email: "ahmed@mail.com",
            phone: "01111111111",
            kind: UserType::Customer,
            balance: customer_balance,
            password: "123",
            kyc: customer_kyc(),
        },
    ]
}

fn product(
    id: &str,
    name: &str,
    wholesale: i64,
    retail: i64,
    quantity: u32,
    category: &str,
    image: &str,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        wholesale_price: Decimal::from(wholesale),
        retail_price: Decimal::from(retail),
        quantity,
        category: category.to_string(),
        image: image.to_string(),
        available: true,
    }
}

fn products() -> Vec<Product> {
    vec![
        product(
            "1",
            "Samsung 45W Charger",
            250,
            350,
            15,
            "Chargers",
            "https://images.unsplash.com/photo-1583863788434-e58a36330cf0?auto=format&fit=crop&q=80&w=400",
        ),
        product(
            "2",
            "iPhone Wired Earphones",
            80,
            150,
            50,
            "Headphones",
            "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?auto=format&fit=crop&q=80&w=400",
        ),
        product(
            "3",
            "Clear iPhone 13 Case",
            20,
            60,
            100,
            "Cases",
            "https://images.unsplash.com/photo-1541807084-5c52b6b3adef?auto=format&fit=crop&q=80&w=400",
        ),
    ]
}

fn history() -> Vec<Transaction> {
    let now = Utc::now();
    vec![
        Transaction {
            id: "tr1".to_string(),
            user_id: "u1".to_string(),
            user_name: Some("Shaher Magde".to_string()),
            kind: TransactionType::Deposit,
            amount: Decimal::from(1000),
            status: TransactionStatus::Success,
            description: "Wallet deposit".to_string(),
            target_number: None,
            created_at: now,
        },
        Transaction {
            id: "tr2".to_string(),
            user_id: "u3".to_string(),
            user_name: Some("Ahmed Ali Hassan".to_string()),
            kind: TransactionType::Recharge,
            amount: Decimal::from(500),
            status: TransactionStatus::Success,
            description: "Airtime recharge".to_string(),
            target_number: Some("01012345678".to_string()),
            created_at: now,
        },
    ]
}

pub(crate) fn demo_state(policy: &LedgerPolicy) -> Result<LedgerState, CredentialError> {
    let mut state = LedgerState::default();

    for seed in accounts(policy) {
        let password_hash = hash_password(seed.password)?;
        let user = User {
            id: seed.id.to_string(),
            full_name: seed.full_name.to_string(),
            nickname: Some(seed.nickname.to_string()),
            email: seed.email.to_string(),
            phone: seed.phone.to_string(),
            kind: seed.kind,
            status: UserStatus::Active,
            wallet_balance: seed.balance,
            avatar: None,
            kyc: seed.kyc,
        };
        state.insert_account(user, password_hash);
    }

    state.products = products();
    state.transactions = history();
    Ok(state)
}
