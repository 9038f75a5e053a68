use std::str::FromStr;

use brandstore_ledger::{Ledger, PaymentError, PaymentReceipt, PaymentRequest};
use brandstore_session::Session;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::signed_in_id;
use crate::catalogue::{find_service, Service};
use crate::error::{StorefrontError, StorefrontResult};

#[derive(Debug, Clone, PartialEq)]
pub enum FlowStep {
    Form,
    Confirm { amount: Decimal },
    Success(PaymentReceipt),
    Failed(PaymentError),
}

/// The FORM → CONFIRM → SUCCESS | ERROR wizard behind `/service/<id>`.
#[derive(Debug, Clone)]
pub struct ServiceFlow {
    service: &'static Service,
    step: FlowStep,
    pub number: String,
    pub amount: String,
}

impl ServiceFlow {
    pub fn open(service_id: &str) -> StorefrontResult<Self> {
        let service = find_service(service_id)
            .ok_or_else(|| StorefrontError::ServiceNotFound(service_id.to_string()))?;
        Ok(Self {
            service,
            step: FlowStep::Form,
            number: String::new(),
            amount: String::new(),
        })
    }

    pub fn service(&self) -> &'static Service {
        self.service
    }

    pub fn step(&self) -> &FlowStep {
        &self.step
    }

    /// Validates the form and moves to confirmation.
    pub fn next(&mut self) -> StorefrontResult<()> {
        if self.step != FlowStep::Form {
            return Err(StorefrontError::StepOutOfOrder);
        }
        let number = self.number.trim();
        let raw_amount = self.amount.trim();
        if number.is_empty() || raw_amount.is_empty() {
            return Err(StorefrontError::MissingFields);
        }
        let amount = Decimal::from_str(raw_amount)
            .map_err(|_| StorefrontError::InvalidAmount(raw_amount.to_string()))?;

        self.step = FlowStep::Confirm { amount };
        Ok(())
    }

    /// Back from confirmation to the form, keeping the entered values.
    pub fn edit(&mut self) {
        if matches!(self.step, FlowStep::Confirm { .. }) {
            self.step = FlowStep::Form;
        }
    }

    /// Submits the payment. Ledger rejections land in [`FlowStep::Failed`].
    pub async fn confirm(
        &mut self,
        ledger: &Ledger,
        session: &mut Session,
    ) -> StorefrontResult<&FlowStep> {
        let FlowStep::Confirm { amount } = self.step else {
            return Err(StorefrontError::StepOutOfOrder);
        };
        let user_id = signed_in_id(session)?;
        let number = self.number.trim().to_string();

        let request = PaymentRequest::new(
            self.service.kind,
            amount,
            format!("{} for {}", self.service.name_en, number),
        )
        .with_target(number);

        self.step = match ledger.process_payment(&user_id, request).await {
            Ok(receipt) => {
                debug!(service = self.service.id, transaction_id = %receipt.transaction_id, "service payment accepted");
                session.update_balance(receipt.new_balance);
                FlowStep::Success(receipt)
            }
            Err(error) => {
                warn!(service = self.service.id, %error, "service payment rejected");
                FlowStep::Failed(error)
            }
        };
        Ok(&self.step)
    }

    /// From a failure back to the form for another attempt.
    pub fn retry(&mut self) {
        if matches!(self.step, FlowStep::Failed(_)) {
            self.step = FlowStep::Form;
        }
    }
}
