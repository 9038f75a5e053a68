//! Shopper-facing wording. Error kinds become text only here.

use brandstore_ledger::{
    AuthError, LedgerError, PaymentError, RegisterError, TransactionStatus, TransactionType,
};
use brandstore_session::Language;

use crate::error::StorefrontError;

pub fn describe(error: &StorefrontError, language: Language) -> String {
    let ar = language == Language::Ar;
    match error {
        StorefrontError::Auth(error) => describe_auth(error, ar).to_string(),
        StorefrontError::Register(error) => describe_register(error, ar),
        StorefrontError::Payment(error) => describe_payment(error, ar),
        StorefrontError::Ledger(error) => describe_ledger(error, ar),
        StorefrontError::Session(_) => pick(
            ar,
            "تعذر حفظ الإعدادات على هذا الجهاز.",
            "Could not save settings on this device.",
        ),
        StorefrontError::NotSignedIn => pick(ar, "يرجى تسجيل الدخول أولاً.", "Please sign in first."),
        StorefrontError::ServiceNotFound(_) => {
            pick(ar, "الخدمة غير موجودة.", "Service not found.")
        }
        StorefrontError::ProductUnavailable(_) => {
            pick(ar, "هذا المنتج غير متاح حالياً.", "This product is not available.")
        }
        StorefrontError::MissingFields => pick(
            ar,
            "يرجى ملء جميع الحقول المطلوبة.",
            "Please fill in all required fields.",
        ),
        StorefrontError::InvalidAmount(raw) => {
            if ar {
                format!("المبلغ \"{raw}\" غير صالح.")
            } else {
                format!("\"{raw}\" is not a valid amount.")
            }
        }
        StorefrontError::EmptyCart => pick(ar, "السلة فارغة.", "Your cart is empty."),
        StorefrontError::StepOutOfOrder => pick(
            ar,
            "لا يمكن تنفيذ هذا الإجراء الآن.",
            "That action is not available right now.",
        ),
    }
}

fn pick(ar: bool, arabic: &str, english: &str) -> String {
    let text = if ar { arabic } else { english };
    text.to_string()
}

fn describe_auth(error: &AuthError, ar: bool) -> &'static str {
    match (error, ar) {
        (AuthError::NotFound, true) => "هذا الحساب غير مسجل لدينا.",
        (AuthError::NotFound, false) => "This account is not registered.",
        (AuthError::WrongPassword, true) => "كلمة المرور غير صحيحة.",
        (AuthError::WrongPassword, false) => "The password is incorrect.",
        (AuthError::Blocked, true) => "لقد تم حظر هذا الحساب.",
        (AuthError::Blocked, false) => "This account has been blocked.",
        (AuthError::PendingReview, true) => "حسابك قيد المراجعة من الإدارة.",
        (AuthError::PendingReview, false) => "Your account is awaiting admin review.",
        (AuthError::Credential(_), true) => "حدث خطأ أثناء تسجيل الدخول.",
        (AuthError::Credential(_), false) => "Something went wrong while signing in.",
    }
}

fn describe_register(error: &RegisterError, ar: bool) -> String {
    match error {
        RegisterError::DuplicateEmail => pick(
            ar,
            "البريد الإلكتروني مسجل بالفعل.",
            "This email is already registered.",
        ),
        RegisterError::DuplicatePhone => pick(
            ar,
            "رقم الهاتف مسجل بالفعل.",
            "This phone number is already registered.",
        ),
        RegisterError::InvalidData(reason) => {
            if ar {
                format!("بيانات التسجيل غير مكتملة: {reason}")
            } else {
                format!("Registration details are incomplete: {reason}")
            }
        }
        RegisterError::Credential(_) => pick(
            ar,
            "حدث خطأ أثناء إنشاء الحساب.",
            "Something went wrong while creating the account.",
        ),
    }
}

fn describe_payment(error: &PaymentError, ar: bool) -> String {
    match error {
        PaymentError::InvalidAmount => pick(
            ar,
            "يجب أن يكون المبلغ أكبر من صفر.",
            "The amount must be greater than zero.",
        ),
        PaymentError::InsufficientBalance { available, .. } => {
            if ar {
                format!("رصيد المحفظة غير كافٍ. المتاح {available} ج.م")
            } else {
                format!("Insufficient wallet balance. Available: {available} EGP")
            }
        }
        PaymentError::UserNotFound(_) => pick(ar, "الحساب غير موجود.", "Account not found."),
    }
}

fn describe_ledger(error: &LedgerError, ar: bool) -> String {
    match error {
        LedgerError::UserNotFound(_) => pick(ar, "المستخدم غير موجود.", "User not found."),
        LedgerError::ProductNotFound(_) => pick(ar, "المنتج غير موجود.", "Product not found."),
        LedgerError::TransactionNotFound(_) => {
            pick(ar, "العملية غير موجودة.", "Transaction not found.")
        }
        LedgerError::InvalidProduct(reason) => {
            if ar {
                format!("بيانات المنتج غير صالحة: {reason}")
            } else {
                format!("Invalid product details: {reason}")
            }
        }
    }
}

pub fn status_label(status: TransactionStatus, language: Language) -> &'static str {
    match (status, language) {
        (TransactionStatus::Success, Language::Ar) => "ناجحة",
        (TransactionStatus::Success, Language::En) => "Successful",
        (TransactionStatus::Pending, Language::Ar) => "قيد المراجعة",
        (TransactionStatus::Pending, Language::En) => "Under review",
        (TransactionStatus::Failed, Language::Ar) => "مرفوضة",
        (TransactionStatus::Failed, Language::En) => "Rejected",
    }
}

pub fn kind_label(kind: TransactionType, language: Language) -> &'static str {
    match (kind, language) {
        (TransactionType::Deposit, Language::Ar) => "إيداع",
        (TransactionType::Deposit, Language::En) => "Deposit",
        (TransactionType::Withdraw, Language::Ar) => "سحب",
        (TransactionType::Withdraw, Language::En) => "Withdrawal",
        (TransactionType::Recharge, Language::Ar) => "شحن رصيد",
        (TransactionType::Recharge, Language::En) => "Recharge",
        (TransactionType::Bill, Language::Ar) => "فاتورة",
        (TransactionType::Bill, Language::En) => "Bill",
        (TransactionType::Purchase, Language::Ar) => "شراء",
        (TransactionType::Purchase, Language::En) => "Purchase",
    }
}
