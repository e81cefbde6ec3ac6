//! Submit Quote use case
//!
//! Finalizes a [`QuoteWizard`] and hands the answers to a [`LeadGateway`].

use crate::ports::event_log::{EventRecord, NoEventLog, WizardEventLog};
use crate::ports::lead_gateway::{GatewayError, LeadGateway, LeadKind, SubmissionReceipt};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::quote_wizard::QuoteWizard;
use quote_domain::{AnswerField, WizardAnswers, WizardError};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur while submitting a quote request
#[derive(Error, Debug)]
pub enum SubmitQuoteError {
    /// The wizard refused the operation; nothing was sent
    #[error("{0}")]
    Wizard(#[from] WizardError),

    /// The wizard was submitted but delivery failed.
    ///
    /// Carries the submitted answers, since the wizard may already have
    /// reset by the time the failure is reported.
    #[error("Delivery failed: {source}")]
    Gateway {
        source: GatewayError,
        answers: WizardAnswers,
    },
}

/// Result of a successful submission
#[derive(Debug, Clone)]
pub struct SubmitQuoteOutput {
    pub answers: WizardAnswers,
    pub receipt: SubmissionReceipt,
}

/// Use case for submitting a finished quote request
pub struct SubmitQuoteUseCase {
    gateway: Arc<dyn LeadGateway>,
    event_log: Arc<dyn WizardEventLog>,
}

impl SubmitQuoteUseCase {
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

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        wizard: &mut QuoteWizard,
    ) -> Result<SubmitQuoteOutput, SubmitQuoteError> {
        self.execute_with_progress(wizard, &NoProgress).await
    }

    /// Submit the wizard, then deliver the answers.
    ///
    /// The wizard is marked submitted (and its reset scheduled) before the
    /// gateway is called, so a delivery failure does not keep the form
    /// around. The caller decides how to surface or retry the failure.
    pub async fn execute_with_progress(
        &self,
        wizard: &mut QuoteWizard,
        progress: &dyn ProgressNotifier,
    ) -> Result<SubmitQuoteOutput, SubmitQuoteError> {
        let answers = wizard.submit()?;

        progress.on_send_start(LeadKind::Quote, self.gateway.channel());
        let result = self.gateway.send_quote(&answers).await;
        progress.on_send_complete(LeadKind::Quote, result.is_ok());

        match result {
            Ok(receipt) => {
                info!(
                    channel = %receipt.channel,
                    reference = %receipt.reference,
                    "Quote request delivered"
                );
                self.event_log.log(EventRecord::new(
                    "quote_sent",
                    json!({
                        "channel": receipt.channel,
                        "reference": receipt.reference,
                    }),
                ));
                Ok(SubmitQuoteOutput { answers, receipt })
            }
            Err(e) => {
                warn!(error = %e, transient = e.is_transient(), "Quote delivery failed");
                self.event_log.log(EventRecord::new(
                    "quote_failed",
                    json!({ "error": e.to_string() }),
                ));
                Err(SubmitQuoteError::Gateway { source: e, answers })
            }
        }
    }

    /// Walk a wizard through every step with prepared answers and submit.
    ///
    /// Used for non-interactive runs. Each step is advanced through the
    /// normal gate, so incomplete answers stop at the first incomplete step.
    pub async fn execute_scripted(
        &self,
        wizard: &mut QuoteWizard,
        answers: &WizardAnswers,
        progress: &dyn ProgressNotifier,
    ) -> Result<SubmitQuoteOutput, SubmitQuoteError> {
        fill(wizard, answers);
        while !wizard.current_step().is_last() {
            wizard.advance()?;
        }
        self.execute_with_progress(wizard, progress).await
    }
}

/// Copy every answer into the wizard, replacing the feature selection.
fn fill(wizard: &mut QuoteWizard, answers: &WizardAnswers) {
    for field in AnswerField::ALL {
        let value = answers.get(field);
        if !value.is_empty() {
            wizard.set_field(field, value);
        }
    }
    for feature in wizard.answers().features() {
        wizard.toggle_feature(feature.clone());
    }
    for feature in answers.clone().normalized().features() {
        wizard.toggle_feature(feature.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WizardParams;
    use async_trait::async_trait;
    use quote_domain::{ContactForm, Step};
    use std::sync::Mutex;
    use std::time::Duration;

    struct FakeGateway {
        fail: bool,
        latency: Duration,
        sent: Mutex<Vec<WizardAnswers>>,
    }

    impl FakeGateway {
        fn new(fail: bool) -> Arc<Self> {
            Self::with_latency(fail, Duration::ZERO)
        }

        fn with_latency(fail: bool, latency: Duration) -> Arc<Self> {
            Arc::new(Self {
                fail,
                latency,
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
            answers: &WizardAnswers,
        ) -> Result<SubmissionReceipt, GatewayError> {
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            if self.fail {
                return Err(GatewayError::Rejected { status: 502 });
            }
            let mut sent = self.sent.lock().unwrap();
            sent.push(answers.clone());
            Ok(SubmissionReceipt::new(sent.len().to_string(), "fake"))
        }

        async fn send_contact(
            &self,
            _form: &ContactForm,
        ) -> Result<SubmissionReceipt, GatewayError> {
            unreachable!("quote tests never send contacts")
        }
    }

    #[derive(Default)]
    struct RecordingLog(Mutex<Vec<&'static str>>);

    impl WizardEventLog for RecordingLog {
        fn log(&self, event: EventRecord) {
            self.0.lock().unwrap().push(event.event_type);
        }
    }

    fn complete_answers() -> WizardAnswers {
        let mut answers = WizardAnswers::default();
        answers.set(AnswerField::ServiceType, "web");
        answers.set(AnswerField::ProjectType, "ecom");
        answers.set(AnswerField::Budget, "mid");
        answers.set(AnswerField::Timeline, "fast");
        answers.set(AnswerField::Name, "Ann");
        answers.set(AnswerField::Email, "a@x.com");
        answers.toggle_feature("Blog");
        answers
    }

    #[tokio::test(start_paused = true)]
    async fn test_scripted_submission_delivers_answers() {
        let gateway = FakeGateway::new(false);
        let log = Arc::new(RecordingLog::default());
        let use_case = SubmitQuoteUseCase::new(gateway.clone()).with_event_log(log.clone());
        let mut wizard = QuoteWizard::new(WizardParams::default());

        let output = use_case
            .execute_scripted(&mut wizard, &complete_answers(), &NoProgress)
            .await
            .unwrap();

        assert_eq!(output.receipt.reference, "1");
        assert_eq!(output.answers, complete_answers());
        assert_eq!(gateway.sent.lock().unwrap().len(), 1);
        assert!(wizard.is_submitted());
        assert_eq!(*log.0.lock().unwrap(), vec!["quote_sent"]);
    }

    #[tokio::test]
    async fn test_incomplete_answers_stop_at_step() {
        let gateway = FakeGateway::new(false);
        let use_case = SubmitQuoteUseCase::new(gateway.clone());
        let mut wizard = QuoteWizard::default();

        let mut answers = complete_answers();
        answers.set(AnswerField::Budget, "");
        let err = use_case
            .execute_scripted(&mut wizard, &answers, &NoProgress)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SubmitQuoteError::Wizard(WizardError::StepIncomplete {
                step: Step::ProjectDetails
            })
        ));
        assert!(gateway.sent.lock().unwrap().is_empty());
        assert_eq!(wizard.current_step(), Step::ProjectDetails);
    }

    #[tokio::test]
    async fn test_submit_from_wrong_step_sends_nothing() {
        let gateway = FakeGateway::new(false);
        let use_case = SubmitQuoteUseCase::new(gateway.clone());
        let mut wizard = QuoteWizard::default();

        let err = use_case.execute(&mut wizard).await.unwrap_err();
        assert!(matches!(
            err,
            SubmitQuoteError::Wizard(WizardError::WrongStep { .. })
        ));
        assert!(gateway.sent.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_gateway_failure_still_submits_wizard() {
        let use_case = SubmitQuoteUseCase::new(FakeGateway::new(true));
        let mut wizard = QuoteWizard::default();

        let err = use_case
            .execute_scripted(&mut wizard, &complete_answers(), &NoProgress)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SubmitQuoteError::Gateway {
                source: GatewayError::Rejected { status: 502 },
                ..
            }
        ));
        assert!(wizard.is_submitted());
        assert!(wizard.has_pending_reset());
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_failure_keeps_answers_after_reset() {
        let gateway = FakeGateway::with_latency(true, Duration::from_secs(5));
        let use_case = SubmitQuoteUseCase::new(gateway);
        let mut wizard = QuoteWizard::new(WizardParams::default());

        let err = use_case
            .execute_scripted(&mut wizard, &complete_answers(), &NoProgress)
            .await
            .unwrap_err();

        // Reset fired while the gateway was still waiting
        assert_eq!(wizard.current_step(), Step::Service);
        assert_eq!(wizard.answers(), WizardAnswers::default());
        match err {
            SubmitQuoteError::Gateway { answers, .. } => {
                assert_eq!(answers, complete_answers());
                assert_eq!(answers.get(AnswerField::Email), "a@x.com");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_scripted_run_replaces_feature_selection() {
        let use_case = SubmitQuoteUseCase::new(FakeGateway::new(false));
        let mut wizard = QuoteWizard::default();
        wizard.toggle_feature("SEO");

        let output = use_case
            .execute_scripted(&mut wizard, &complete_answers(), &NoProgress)
            .await
            .unwrap();
        assert_eq!(output.answers.features(), ["Blog".to_string()]);
    }
}
