//! Payment services offered on the dashboard.

use brandstore_ledger::TransactionType;
use brandstore_session::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Service {
    pub id: &'static str,
    pub name_ar: &'static str,
    pub name_en: &'static str,
    pub kind: TransactionType,
}

impl Service {
    pub fn name(&self, language: Language) -> &'static str {
        match language {
            Language::Ar => self.name_ar,
            Language::En => self.name_en,
        }
    }

    pub fn path(&self) -> String {
        format!("/service/{}", self.id)
    }
}

pub const SERVICES: &[Service] = &[
    Service {
        id: "recharge",
        name_ar: "شحن على الهواء",
        name_en: "Airtime recharge",
        kind: TransactionType::Recharge,
    },
    Service {
        id: "vodafone-cash",
        name_ar: "فودافون كاش",
        name_en: "Vodafone Cash",
        kind: TransactionType::Withdraw,
    },
    Service {
        id: "instapay",
        name_ar: "إنستا باي",
        name_en: "InstaPay",
        kind: TransactionType::Withdraw,
    },
    Service {
        id: "bills",
        name_ar: "دفع فواتير",
        name_en: "Bill payment",
        kind: TransactionType::Bill,
    },
    Service {
        id: "bank",
        name_ar: "إيداع بنكي",
        name_en: "Bank deposit",
        kind: TransactionType::Withdraw,
    },
    Service {
        id: "talabat",
        name_ar: "شحن طلبات",
        name_en: "Talabat top-up",
        kind: TransactionType::Bill,
    },
    Service {
        id: "fawry",
        name_ar: "فوري باي",
        name_en: "Fawry Pay",
        kind: TransactionType::Bill,
    },
];

pub fn find_service(id: &str) -> Option<&'static Service> {
    SERVICES.iter().find(|service| service.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        for (index, service) in SERVICES.iter().enumerate() {
            assert!(SERVICES[index + 1..].iter().all(|other| other.id != service.id));
        }
    }

    #[test]
    fn only_recharge_maps_to_recharge() {
        let recharges: Vec<_> = SERVICES
            .iter()
            .filter(|service| service.kind == TransactionType::Recharge)
            .map(|service| service.id)
            .collect();
        assert_eq!(recharges, vec!["recharge"]);
        assert!(find_service("lottery").is_none());
    }
}
