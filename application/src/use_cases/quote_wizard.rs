//! Quote Wizard
//!
//! Owns a [`WizardState`] on behalf of a single host screen and adds the two
//! things a plain state value cannot do: publishing every change to the
//! host, and resetting itself a fixed delay after a successful submission.
//!
//! The reset is a Tokio task racing the delay against a
//! [`CancellationToken`]. The token is cancelled while holding the state
//! lock, and the task re-checks it under the same lock, so a disposed or
//! manually reset wizard is never mutated by a stale timer.

use crate::config::WizardParams;
use crate::ports::event_log::{EventRecord, NoEventLog, WizardEventLog};
use crate::ports::wizard_event::{ResetReason, WizardEvent, WizardSnapshot};
use quote_domain::{AnswerField, Step, WizardAnswers, WizardError, WizardState};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Publishes wizard events to the host channel and the structured log.
#[derive(Clone)]
struct EventSink {
    tx: Option<mpsc::UnboundedSender<WizardEvent>>,
    log: Arc<dyn WizardEventLog>,
}

impl EventSink {
    fn publish(&self, event: WizardEvent) {
        self.log.log(EventRecord::from(&event));
        if let Some(tx) = &self.tx {
            // Host may have stopped listening
            let _ = tx.send(event);
        }
    }
}

/// Multi-step quote wizard with a self-owned auto-reset timer.
///
/// Exclusively owned by its host. All operations are synchronous; only
/// [`QuoteWizard::submit`] schedules deferred work, and it must be called
/// from within a Tokio runtime for the reset to be scheduled.
pub struct QuoteWizard {
    state: Arc<Mutex<WizardState>>,
    params: WizardParams,
    sink: EventSink,
    /// Cancellation handle of the pending auto-reset, if any
    pending_reset: Option<CancellationToken>,
    disposed: bool,
}

impl QuoteWizard {
    /// Create a wizard at step 1 with empty answers.
    pub fn new(params: WizardParams) -> Self {
        Self {
            state: Arc::new(Mutex::new(WizardState::new())),
            params,
            sink: EventSink {
                tx: None,
                log: Arc::new(NoEventLog),
            },
            pending_reset: None,
            disposed: false,
        }
    }

    /// Subscribe the host to change events.
    pub fn with_events(mut self, tx: mpsc::UnboundedSender<WizardEvent>) -> Self {
        self.sink.tx = Some(tx);
        self
    }

    /// Set a structured event log.
    pub fn with_event_log(mut self, log: Arc<dyn WizardEventLog>) -> Self {
        self.sink.log = log;
        self
    }

    pub fn params(&self) -> &WizardParams {
        &self.params
    }

    fn lock(&self) -> MutexGuard<'_, WizardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ==================== Reads ====================

    /// Everything the host needs to render the current screen.
    pub fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot::of(&self.lock())
    }

    pub fn current_step(&self) -> Step {
        self.lock().current_step()
    }

    pub fn answers(&self) -> WizardAnswers {
        self.lock().answers().clone()
    }

    pub fn is_step_valid(&self, number: u8) -> bool {
        self.lock().is_step_valid(number)
    }

    pub fn is_submitted(&self) -> bool {
        self.lock().is_submitted()
    }

    /// Whether an auto-reset is scheduled and not yet fired or cancelled.
    pub fn has_pending_reset(&self) -> bool {
        self.pending_reset
            .as_ref()
            .is_some_and(|token| !token.is_cancelled())
            && self.is_submitted()
    }

    // ==================== Edits ====================

    /// Overwrite a text field. Never fails.
    pub fn set_field(&mut self, field: AnswerField, value: impl Into<String>) {
        let value = value.into();
        self.lock().set_field(field, value.clone());
        debug!(field = %field, "Wizard field set");
        self.sink.publish(WizardEvent::FieldChanged { field, value });
    }

    /// Add or remove a feature. Returns whether it is now selected.
    pub fn toggle_feature(&mut self, feature: impl Into<String>) -> bool {
        let feature = feature.into();
        let selected = self.lock().toggle_feature(&feature);
        debug!(feature = %feature, selected, "Wizard feature toggled");
        self.sink
            .publish(WizardEvent::FeatureToggled { feature, selected });
        selected
    }

    // ==================== Navigation ====================

    pub fn advance(&mut self) -> Result<Step, WizardError> {
        let (from, result) = {
            let mut state = self.lock();
            let from = state.current_step();
            (from, state.advance())
        };
        self.after_navigation(from, result)
    }

    pub fn retreat(&mut self) -> Result<Step, WizardError> {
        let (from, result) = {
            let mut state = self.lock();
            let from = state.current_step();
            (from, state.retreat())
        };
        self.after_navigation(from, result)
    }

    fn after_navigation(
        &self,
        from: Step,
        result: Result<Step, WizardError>,
    ) -> Result<Step, WizardError> {
        match result {
            Ok(to) => {
                debug!(from = from.number(), to = to.number(), "Wizard step changed");
                self.sink.publish(WizardEvent::StepChanged { from, to });
                Ok(to)
            }
            Err(e) => {
                debug!(step = from.number(), error = %e, "Wizard navigation refused");
                Err(e)
            }
        }
    }

    // ==================== Submission ====================

    /// Finalize the answers and schedule the auto-reset.
    ///
    /// Returns the answers snapshot for the submission collaborator; the
    /// wizard itself performs no I/O.
    pub fn submit(&mut self) -> Result<WizardAnswers, WizardError> {
        let answers = self.lock().submit()?;
        info!("Quote request submitted");

        // Published before the timer exists so `Reset` can never precede it
        self.sink.publish(WizardEvent::Submitted {
            answers: answers.clone(),
            reset_in: self.params.reset_delay,
        });
        self.schedule_reset();
        Ok(answers)
    }

    fn schedule_reset(&mut self) {
        self.cancel_pending_reset();

        if self.disposed {
            debug!("Wizard disposed; auto-reset not scheduled");
            return;
        }

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                warn!("No Tokio runtime; auto-reset not scheduled, call reset() instead");
                return;
            }
        };

        let token = CancellationToken::new();
        let task_token = token.clone();
        let state = Arc::clone(&self.state);
        let sink = self.sink.clone();
        let deadline = tokio::time::Instant::now() + self.params.reset_delay;

        handle.spawn(async move {
            tokio::select! {
                biased;
                _ = task_token.cancelled() => {
                    debug!("Auto-reset cancelled");
                }
                _ = tokio::time::sleep_until(deadline) => {
                    {
                        let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
                        if task_token.is_cancelled() {
                            debug!("Auto-reset cancelled at deadline");
                            return;
                        }
                        state.reset();
                    }
                    task_token.cancel();
                    info!("Wizard reset after submission");
                    sink.publish(WizardEvent::Reset {
                        reason: ResetReason::AfterSubmit,
                    });
                }
            }
        });

        self.pending_reset = Some(token);
    }

    /// Cancel the pending reset while holding the state lock, so the timer
    /// task cannot be between its deadline check and its mutation.
    fn cancel_pending_reset(&mut self) {
        if let Some(token) = self.pending_reset.take() {
            let _state = self.lock();
            token.cancel();
        }
    }

    /// Return to step 1 with empty answers immediately, cancelling any
    /// pending auto-reset.
    pub fn reset(&mut self) {
        self.cancel_pending_reset();
        self.lock().reset();
        info!("Wizard reset by host");
        self.sink.publish(WizardEvent::Reset {
            reason: ResetReason::Manual,
        });
    }

    /// Release the auto-reset timer. Idempotent; also runs on drop.
    ///
    /// The state stays readable but is never touched by a timer again.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.cancel_pending_reset();
        self.disposed = true;
        debug!("Wizard disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Default for QuoteWizard {
    fn default() -> Self {
        Self::new(WizardParams::default())
    }
}

impl Drop for QuoteWizard {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const DELAY: Duration = Duration::from_secs(3);

    fn wizard() -> QuoteWizard {
        QuoteWizard::new(WizardParams::default().with_reset_delay(DELAY))
    }

    fn fill_to_contact(wizard: &mut QuoteWizard) {
        wizard.set_field(AnswerField::ServiceType, "web");
        wizard.advance().unwrap();
        wizard.set_field(AnswerField::ProjectType, "ecom");
        wizard.set_field(AnswerField::Budget, "mid");
        wizard.advance().unwrap();
        wizard.set_field(AnswerField::Timeline, "fast");
        wizard.advance().unwrap();
        wizard.set_field(AnswerField::Name, "Ann");
        wizard.set_field(AnswerField::Email, "a@x.com");
    }

    /// Let spawned tasks observe the advanced clock.
    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_then_auto_reset() {
        let mut wizard = wizard();
        fill_to_contact(&mut wizard);

        let answers = wizard.submit().unwrap();
        assert_eq!(answers, wizard.answers());
        assert!(wizard.is_submitted());
        assert!(wizard.has_pending_reset());

        tokio::time::advance(DELAY - Duration::from_millis(1)).await;
        settle().await;
        assert!(wizard.is_submitted());
        assert_eq!(wizard.current_step(), Step::Contact);

        tokio::time::advance(Duration::from_millis(2)).await;
        settle().await;
        let snapshot = wizard.snapshot();
        assert_eq!(snapshot.current_step, Step::Service);
        assert!(snapshot.answers.is_empty());
        assert!(!snapshot.submitted);
        assert!(!wizard.has_pending_reset());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispose_prevents_reset() {
        let mut wizard = wizard();
        fill_to_contact(&mut wizard);
        wizard.submit().unwrap();

        wizard.dispose();
        tokio::time::advance(DELAY * 2).await;
        settle().await;

        assert!(wizard.is_disposed());
        assert!(wizard.is_submitted());
        assert_eq!(wizard.answers().service_type, "web");
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_releases_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        {
            let mut wizard = wizard().with_events(tx);
            fill_to_contact(&mut wizard);
            wizard.submit().unwrap();
        }
        tokio::time::advance(DELAY * 2).await;
        settle().await;

        let mut saw_reset = false;
        while let Ok(event) = rx.try_recv() {
            saw_reset |= matches!(event, WizardEvent::Reset { .. });
        }
        assert!(!saw_reset);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_reset_cancels_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut wizard = wizard().with_events(tx);
        fill_to_contact(&mut wizard);
        wizard.submit().unwrap();
        wizard.reset();

        // Start a new session before the old deadline
        wizard.set_field(AnswerField::ServiceType, "seo");
        tokio::time::advance(DELAY * 2).await;
        settle().await;

        assert_eq!(wizard.answers().service_type, "seo");
        let resets: Vec<ResetReason> = std::iter::from_fn(|| rx.try_recv().ok())
            .filter_map(|event| match event {
                WizardEvent::Reset { reason } => Some(reason),
                _ => None,
            })
            .collect();
        assert_eq!(resets, vec![ResetReason::Manual]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resubmission_refused_while_reset_pending() {
        let mut wizard = wizard();
        fill_to_contact(&mut wizard);
        wizard.submit().unwrap();
        assert_eq!(wizard.submit(), Err(WizardError::AlreadySubmitted));
    }

    #[tokio::test]
    async fn test_failed_operations_publish_nothing() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut wizard = wizard().with_events(tx);

        assert_eq!(wizard.retreat(), Err(WizardError::AtFirstStep));
        assert!(matches!(
            wizard.advance(),
            Err(WizardError::StepIncomplete { .. })
        ));
        assert!(matches!(
            wizard.submit(),
            Err(WizardError::WrongStep { .. })
        ));
        assert!(rx.try_recv().is_err());
        assert_eq!(wizard.current_step(), Step::Service);
    }

    #[tokio::test]
    async fn test_events_follow_operations() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut wizard = wizard().with_events(tx);

        wizard.set_field(AnswerField::ServiceType, "web");
        assert!(wizard.toggle_feature("Blog"));
        wizard.advance().unwrap();
        wizard.retreat().unwrap();

        assert_eq!(
            rx.try_recv().unwrap(),
            WizardEvent::FieldChanged {
                field: AnswerField::ServiceType,
                value: "web".to_string()
            }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            WizardEvent::FeatureToggled {
                feature: "Blog".to_string(),
                selected: true
            }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            WizardEvent::StepChanged {
                from: Step::Service,
                to: Step::ProjectDetails
            }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            WizardEvent::StepChanged {
                from: Step::ProjectDetails,
                to: Step::Service
            }
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_submitted_event_precedes_immediate_reset() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut wizard =
            QuoteWizard::new(WizardParams::default().with_reset_delay(Duration::ZERO))
                .with_events(tx);
        fill_to_contact(&mut wizard);
        while rx.try_recv().is_ok() {}

        wizard.submit().unwrap();

        let first = rx.recv().await.unwrap();
        assert!(matches!(first, WizardEvent::Submitted { .. }));
        let second = rx.recv().await.unwrap();
        assert_eq!(
            second,
            WizardEvent::Reset {
                reason: ResetReason::AfterSubmit
            }
        );
    }

    #[test]
    fn test_submit_without_runtime_keeps_state() {
        let mut wizard = wizard();
        fill_to_contact(&mut wizard);
        assert!(wizard.submit().is_ok());
        assert!(wizard.is_submitted());
        assert!(!wizard.has_pending_reset());

        wizard.reset();
        assert!(!wizard.is_submitted());
        assert_eq!(wizard.current_step(), Step::Service);
    }

    #[test]
    fn test_toggle_feature_twice_is_identity() {
        let mut wizard = wizard();
        wizard.toggle_feature("SEO");
        let before = wizard.answers();
        wizard.toggle_feature("Analytics");
        wizard.toggle_feature("Analytics");
        assert_eq!(wizard.answers(), before);
    }
}
