//! Send Contact use case
//!
//! Validates a [`ContactForm`] and delivers it through a [`LeadGateway`].

use crate::ports::event_log::{EventRecord, NoEventLog, WizardEventLog};
use crate::ports::lead_gateway::{GatewayError, LeadGateway, LeadKind, SubmissionReceipt};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use quote_domain::{ContactErrors, ContactForm};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while sending a contact request
#[derive(Error, Debug)]
pub enum ContactFormError {
    /// One or more fields failed validation; nothing was sent
    #[error("Invalid contact form: {0}")]
    Invalid(ContactErrors),

    #[error("Delivery failed: {0}")]
    Gateway(#[from] GatewayError),
}

impl ContactFormError {
    /// Field messages when the form itself was rejected.
    pub fn field_errors(&self) -> Option<&ContactErrors> {
        match self {
            ContactFormError::Invalid(errors) => Some(errors),
            ContactFormError::Gateway(_) => None,
        }
    }
}

/// Use case for sending a contact request
pub struct SendContactUseCase {
    gateway: Arc<dyn LeadGateway>,
    event_log: Arc<dyn WizardEventLog>,
}

impl SendContactUseCase {
    pub fn new(gateway: Arc<dyn LeadGateway>) -> Self {
        Self {
            gateway,
            event_log: Arc::new(NoEventLog),
        }
    }

    pub fn with_event_log(mut self, event_log: Arc<dyn WizardEventLog>) -> Self {
        self.event_log = event_log;
        self
    }

    pub async fn execute(
        &self,
        form: &mut ContactForm,
    ) -> Result<SubmissionReceipt, ContactFormError> {
        self.execute_with_progress(form, &NoProgress).await
    }

    /// Validate and deliver the form.
    ///
    /// The form is cleared only after a successful delivery; on any error it
    /// is left as entered so the user can correct or retry.
    pub async fn execute_with_progress(
        &self,
        form: &mut ContactForm,
        progress: &dyn ProgressNotifier,
    ) -> Result<SubmissionReceipt, ContactFormError> {
        if let Err(errors) = form.validate() {
            debug!(count = errors.len(), "Contact form rejected");
            return Err(ContactFormError::Invalid(errors));
        }

        progress.on_send_start(LeadKind::Contact, self.gateway.channel());
        let result = self.gateway.send_contact(form).await;
        progress.on_send_complete(LeadKind::Contact, result.is_ok());

        match result {
            Ok(receipt) => {
                info!(
                    channel = %receipt.channel,
                    reference = %receipt.reference,
                    "Contact request delivered"
                );
                self.event_log.log(EventRecord::new(
                    "contact_sent",
                    json!({
                        "channel": receipt.channel,
                        "reference": receipt.reference,
                    }),
                ));
                form.clear();
                Ok(receipt)
            }
            Err(e) => {
                warn!(error = %e, "Contact delivery failed");
                self.event_log.log(EventRecord::new(
                    "contact_failed",
                    json!({ "error": e.to_string() }),
                ));
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quote_domain::{ContactField, WizardAnswers};
    use std::sync::Mutex;

    struct FakeGateway {
        fail: bool,
        sent: Mutex<Vec<ContactForm>>,
    }

    impl FakeGateway {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                fail,
                sent: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LeadGateway for FakeGateway {
        fn channel(&self) -> &'static str {
            "fake"
        }

        async fn send_quote(
            &self,
            _answers: &WizardAnswers,
        ) -> Result<SubmissionReceipt, GatewayError> {
            unreachable!("contact tests never send quotes")
        }

        async fn send_contact(&self, form: &ContactForm) -> Result<SubmissionReceipt, GatewayError> {
            if self.fail {
                return Err(GatewayError::Timeout);
            }
            self.sent.lock().unwrap().push(form.clone());
            Ok(SubmissionReceipt::new("c-1", "fake"))
        }
    }

    fn filled_form() -> ContactForm {
        let mut form = ContactForm::new();
        form.set(ContactField::Name, "Ann Lee");
        form.set(ContactField::Phone, "(555) 000-0000");
        form.set(ContactField::Email, "ann@example.com");
        form
    }

    #[tokio::test]
    async fn test_valid_form_is_sent_and_cleared() {
        let gateway = FakeGateway::new(false);
        let use_case = SendContactUseCase::new(gateway.clone());
        let mut form = filled_form();

        let receipt = use_case.execute(&mut form).await.unwrap();

        assert_eq!(receipt.reference, "c-1");
        assert_eq!(gateway.sent.lock().unwrap()[0].name, "Ann Lee");
        assert_eq!(form, ContactForm::default());
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_sent() {
        let gateway = FakeGateway::new(false);
        let use_case = SendContactUseCase::new(gateway.clone());
        let mut form = filled_form();
        form.set(ContactField::Email, "ann@example");

        let err = use_case.execute(&mut form).await.unwrap_err();

        let errors = err.field_errors().unwrap();
        assert_eq!(
            errors.get(ContactField::Email),
            Some("Please enter a valid email address")
        );
        assert!(gateway.sent.lock().unwrap().is_empty());
        assert_eq!(form.email, "ann@example");
    }

    #[tokio::test]
    async fn test_gateway_failure_keeps_form() {
        let use_case = SendContactUseCase::new(FakeGateway::new(true));
        let mut form = filled_form();

        let err = use_case.execute(&mut form).await.unwrap_err();

        assert!(matches!(err, ContactFormError::Gateway(GatewayError::Timeout)));
        assert!(err.field_errors().is_none());
        assert_eq!(form, filled_form());
    }
}
