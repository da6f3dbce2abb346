//! Wizard controller: the only writer of the listing record and step cursor.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use itemforge_core::{DomainError, DomainResult, MediaSlot, SessionId, SubmissionId};
use itemforge_events::{EventBus, InMemoryEventBus, Subscription};
use itemforge_media::{ImageDecoder, MediaChange, MediaIntake, RawFile};

use crate::config::WizardConfig;
use crate::edit::RecordEdit;
use crate::notification::WizardNotification;
use crate::publisher::{ListingPublisher, PublishReceipt, SimulatedPublisher};
use crate::record::ListingRecord;
use crate::steps::StepSequence;
use crate::validation::{self, SectionProgress};

/// Submission lifecycle: `Idle -> Submitting -> Idle`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SubmitState {
    Idle,
    Submitting { submission_id: SubmissionId },
}

/// A submission that passed validation and is waiting for its publish outcome.
///
/// Holds the record as it was when the submission began.
#[derive(Debug)]
#[must_use = "a pending submission keeps the wizard busy until passed to finish_submit"]
pub struct PendingSubmission {
    submission_id: SubmissionId,
    record: ListingRecord,
}

impl PendingSubmission {
    pub fn submission_id(&self) -> SubmissionId {
        self.submission_id
    }

    pub fn record(&self) -> &ListingRecord {
        &self.record
    }
}

pub const SUBMIT_CANCELLED: &str = "cancelled";

fn cancelled(session_id: SessionId, submission_id: SubmissionId) -> WizardNotification {
    tracing::warn!(%session_id, %submission_id, "submission abandoned before publish finished");
    WizardNotification::SubmitFailed {
        session_id,
        submission_id,
        reason: SUBMIT_CANCELLED.to_string(),
        occurred_at: Utc::now(),
    }
}

/// Puts the wizard back to idle if `submit` is dropped while publishing.
struct InFlightSubmit<'a> {
    state: &'a mut SubmitState,
    notifications: &'a InMemoryEventBus<WizardNotification>,
    session_id: SessionId,
    submission_id: SubmissionId,
    armed: bool,
}

impl InFlightSubmit<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlightSubmit<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        *self.state = SubmitState::Idle;
        if let Err(err) = self.notifications.publish(cancelled(self.session_id, self.submission_id)) {
            tracing::warn!(session_id = %self.session_id, ?err, "failed to publish wizard notification");
        }
    }
}

/// Orchestrates one editing session.
///
/// Forward movement and submission are gated by the section rules; direct
/// jumps are not. While a submission is in flight, advance, retreat, save
/// draft and submit are rejected with `DomainError::Busy`.
pub struct WizardController<P = SimulatedPublisher> {
    session_id: SessionId,
    config: WizardConfig,
    steps: StepSequence,
    record: ListingRecord,
    media: MediaIntake,
    state: SubmitState,
    notifications: Arc<InMemoryEventBus<WizardNotification>>,
    publisher: P,
}

impl WizardController<SimulatedPublisher> {
    /// A session backed by the simulated publisher.
    pub fn new(config: WizardConfig) -> Self {
        let publisher = SimulatedPublisher::new(config.submit_latency);
        Self::with_publisher(config, publisher)
    }
}

impl<P: ListingPublisher> WizardController<P> {
    pub fn with_publisher(config: WizardConfig, publisher: P) -> Self {
        let media = MediaIntake::new(config.intake_limits());
        Self::from_parts(config, publisher, media)
    }

    /// Session with a custom image decoder (e.g. one that resizes).
    pub fn with_decoder(config: WizardConfig, publisher: P, decoder: Arc<dyn ImageDecoder>) -> Self {
        let media = MediaIntake::with_decoder(config.intake_limits(), decoder);
        Self::from_parts(config, publisher, media)
    }

    fn from_parts(config: WizardConfig, publisher: P, media: MediaIntake) -> Self {
        let session_id = SessionId::new();
        tracing::info!(%session_id, "wizard session started");
        Self {
            session_id,
            config,
            steps: StepSequence::listing(),
            record: ListingRecord::new(),
            media,
            state: SubmitState::Idle,
            notifications: Arc::new(InMemoryEventBus::new()),
            publisher,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    /// Read-only view of the record.
    pub fn record(&self) -> &ListingRecord {
        &self.record
    }

    pub fn steps(&self) -> &StepSequence {
        &self.steps
    }

    pub fn current_step(&self) -> usize {
        self.steps.current()
    }

    pub fn step_count(&self) -> usize {
        self.steps.step_count()
    }

    pub fn submit_state(&self) -> SubmitState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, SubmitState::Submitting { .. })
    }

    /// Decodes admitted but not yet applied to the record.
    pub fn media_in_flight(&self) -> usize {
        self.media.in_flight()
    }

    pub fn progress(&self, step: usize) -> SectionProgress {
        validation::progress(step, &self.record)
    }

    pub fn subscribe(&self) -> Subscription<WizardNotification> {
        self.notifications.subscribe()
    }

    fn notify(&self, notification: WizardNotification) {
        if let Err(err) = self.notifications.publish(notification) {
            tracing::warn!(session_id = %self.session_id, ?err, "failed to publish wizard notification");
        }
    }

    fn ensure_idle(&self, operation: &'static str) -> DomainResult<()> {
        if self.is_submitting() {
            tracing::debug!(session_id = %self.session_id, operation, "rejected while submitting");
            return Err(DomainError::Busy);
        }
        Ok(())
    }

    fn moved(&self, from: usize) -> usize {
        let to = self.steps.current();
        tracing::debug!(session_id = %self.session_id, from, to, "step changed");
        self.notify(WizardNotification::StepChanged {
            session_id: self.session_id,
            from,
            to,
            occurred_at: Utc::now(),
        });
        to
    }

    fn reject(&self, err: DomainError) -> DomainError {
        if let DomainError::Validation { field, step, message } = &err {
            tracing::info!(session_id = %self.session_id, %field, step, "validation failed");
            self.notify(WizardNotification::ValidationFailed {
                session_id: self.session_id,
                field: *field,
                step: *step,
                message: message.clone(),
                occurred_at: Utc::now(),
            });
        }
        err
    }

    /// Apply a field edit. Titles are truncated to the configured length.
    pub fn apply_edit(&mut self, edit: RecordEdit) {
        let edit = match edit {
            RecordEdit::Title(title) => {
                RecordEdit::Title(title.chars().take(self.config.title_max_chars).collect())
            }
            other => other,
        };
        tracing::trace!(session_id = %self.session_id, section = ?edit.section(), field = edit.field(), "field edited");
        self.record.apply(edit);
    }

    /// Move forward one step, unless the current step's rule fails.
    pub fn request_advance(&mut self) -> DomainResult<usize> {
        self.ensure_idle("advance")?;
        let from = self.steps.current();
        validation::check_advance(from, &self.record).map_err(|err| self.reject(err))?;
        self.steps.advance();
        Ok(self.moved(from))
    }

    pub fn request_retreat(&mut self) -> DomainResult<usize> {
        self.ensure_idle("retreat")?;
        let from = self.steps.current();
        self.steps.retreat();
        Ok(self.moved(from))
    }

    /// Jump straight to a step. Never validated; out-of-range indices clamp.
    pub fn jump_to_step(&mut self, index: usize) -> usize {
        let from = self.steps.current();
        self.steps.go_to(index);
        self.moved(from)
    }

    pub fn save_draft(&mut self) -> DomainResult<()> {
        self.ensure_idle("save_draft")?;
        tracing::info!(session_id = %self.session_id, step = self.steps.current(), "draft saved");
        self.notify(WizardNotification::DraftSaved {
            session_id: self.session_id,
            occurred_at: Utc::now(),
        });
        Ok(())
    }

    /// Validate and enter the submitting state.
    ///
    /// On a validation failure the cursor moves to the offending step and the
    /// wizard stays idle.
    pub fn begin_submit(&mut self) -> DomainResult<PendingSubmission> {
        self.ensure_idle("submit")?;

        if let Err(err) = validation::check_submit(&self.record) {
            if let Some(step) = err.redirect_step() {
                let from = self.steps.current();
                self.steps.go_to(step);
                self.moved(from);
            }
            return Err(self.reject(err));
        }

        let submission_id = SubmissionId::new();
        self.state = SubmitState::Submitting { submission_id };
        tracing::info!(session_id = %self.session_id, %submission_id, "submission started");
        self.notify(WizardNotification::SubmitStarted {
            session_id: self.session_id,
            submission_id,
            occurred_at: Utc::now(),
        });

        Ok(PendingSubmission {
            submission_id,
            record: self.record.clone(),
        })
    }

    /// Leave the submitting state with the publisher's outcome.
    pub fn finish_submit(
        &mut self,
        pending: PendingSubmission,
        outcome: DomainResult<PublishReceipt>,
    ) -> DomainResult<PublishReceipt> {
        let submission_id = pending.submission_id;
        self.leave_submitting(submission_id)?;

        match outcome {
            Ok(receipt) => {
                tracing::info!(
                    session_id = %self.session_id,
                    %submission_id,
                    listing_id = %receipt.listing_id,
                    "listing published"
                );
                self.notify(WizardNotification::SubmitSucceeded {
                    session_id: self.session_id,
                    receipt: receipt.clone(),
                    occurred_at: Utc::now(),
                });
                Ok(receipt)
            }
            Err(err) => {
                let reason = match err {
                    DomainError::SubmissionFailed(reason) => reason,
                    other => other.to_string(),
                };
                tracing::warn!(session_id = %self.session_id, %submission_id, %reason, "submission failed");
                self.notify(WizardNotification::SubmitFailed {
                    session_id: self.session_id,
                    submission_id,
                    reason: reason.clone(),
                    occurred_at: Utc::now(),
                });
                Err(DomainError::SubmissionFailed(reason))
            }
        }
    }

    /// Give up on a pending submission without a publish outcome.
    pub fn abandon_submit(&mut self, pending: PendingSubmission) -> DomainResult<()> {
        let submission_id = pending.submission_id;
        self.leave_submitting(submission_id)?;
        if let Err(err) = self.notifications.publish(cancelled(self.session_id, submission_id)) {
            tracing::warn!(session_id = %self.session_id, ?err, "failed to publish wizard notification");
        }
        Ok(())
    }

    fn leave_submitting(&mut self, submission_id: SubmissionId) -> DomainResult<()> {
        if self.state != (SubmitState::Submitting { submission_id }) {
            return Err(DomainError::invariant(format!(
                "submission {submission_id} is not the one in flight"
            )));
        }
        self.state = SubmitState::Idle;
        Ok(())
    }

    /// Validate, publish and return to idle.
    ///
    /// Dropping the returned future mid-publish abandons the submission.
    pub async fn submit(&mut self) -> DomainResult<PublishReceipt> {
        let pending = self.begin_submit()?;
        let guard = InFlightSubmit {
            state: &mut self.state,
            notifications: &self.notifications,
            session_id: self.session_id,
            submission_id: pending.submission_id,
            armed: true,
        };
        let outcome = self.publisher.publish(pending.submission_id, &pending.record).await;
        guard.disarm();
        self.finish_submit(pending, outcome)
    }

    /// Admit a batch of files into a slot. Must be called within a Tokio runtime.
    pub fn accept_media(&mut self, slot: MediaSlot, files: Vec<RawFile>) -> DomainResult<usize> {
        match self.media.accept(slot, files) {
            Err(DomainError::CapacityExceeded { slot, cap }) => {
                self.notify(WizardNotification::MediaRejected {
                    session_id: self.session_id,
                    slot,
                    cap,
                    occurred_at: Utc::now(),
                });
                Err(DomainError::CapacityExceeded { slot, cap })
            }
            other => other,
        }
    }

    pub fn remove_media(&mut self, slot: MediaSlot, index: usize) -> DomainResult<()> {
        let change = self.media.remove(slot, index, self.record.media_mut())?;
        self.report_media(change);
        Ok(())
    }

    /// Apply decodes that have already finished. Returns how many were applied.
    pub fn pump_media(&mut self) -> usize {
        let changes = self.media.pump(self.record.media_mut());
        let applied = changes.len();
        changes.into_iter().for_each(|change| self.report_media(change));
        applied
    }

    /// Wait until every admitted decode has been applied.
    pub async fn settle_media(&mut self) -> usize {
        let mut applied = 0;
        while let Some(change) = self.media.next_change(self.record.media_mut()).await {
            self.report_media(change);
            applied += 1;
        }
        applied
    }

    fn report_media(&self, change: MediaChange) {
        let slot = change.slot();
        let notification = match change {
            MediaChange::Appended { .. } | MediaChange::Removed { .. } => WizardNotification::MediaChanged {
                session_id: self.session_id,
                slot,
                count: self.record.media().images(slot).len(),
                occurred_at: Utc::now(),
            },
            MediaChange::DecodeFailed { file_name, error, .. } => WizardNotification::MediaDecodeFailed {
                session_id: self.session_id,
                slot,
                file_name,
                reason: error.to_string(),
                occurred_at: Utc::now(),
            },
        };
        self.notify(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use async_trait::async_trait;
    use itemforge_core::FieldKey;
    use itemforge_events::Event;

    use crate::money::Money;
    use crate::steps::step;

    const PNG: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    fn config() -> WizardConfig {
        WizardConfig::default().with_submit_latency(Duration::from_millis(5))
    }

    fn png(name: &str) -> RawFile {
        RawFile::from_bytes(name, PNG.to_vec())
    }

    fn event_types(sub: &Subscription<WizardNotification>) -> Vec<&'static str> {
        sub.drain().iter().map(|n| n.event_type()).collect()
    }

    struct FailingPublisher;

    #[async_trait]
    impl ListingPublisher for FailingPublisher {
        async fn publish(&self, _submission_id: SubmissionId, _record: &ListingRecord) -> DomainResult<PublishReceipt> {
            Err(DomainError::submission_failed("backend unavailable"))
        }
    }

    async fn ready_to_submit<P: ListingPublisher>(wizard: &mut WizardController<P>) {
        wizard.apply_edit(RecordEdit::Title("Lamp".into()));
        wizard.accept_media(MediaSlot::Primary, vec![png("img1.png")]).unwrap();
        wizard.settle_media().await;
        wizard.apply_edit(RecordEdit::SalePrice(Money::from_minor(1250)));
    }

    #[test]
    fn advance_from_first_step_requires_title() {
        let mut wizard = WizardController::new(config());
        let sub = wizard.subscribe();

        let err = wizard.request_advance().unwrap_err();
        assert_eq!(err.redirect_step(), Some(0));
        assert_eq!(wizard.current_step(), 0);
        assert_eq!(event_types(&sub), vec!["wizard.validation.failed"]);

        wizard.apply_edit(RecordEdit::Title("Lamp".into()));
        assert_eq!(wizard.request_advance(), Ok(1));
        assert_eq!(event_types(&sub), vec!["wizard.step.changed"]);
    }

    #[test]
    fn retreat_and_jump_are_never_gated() {
        let mut wizard = WizardController::new(config());

        assert_eq!(wizard.jump_to_step(3), 3);
        assert_eq!(wizard.jump_to_step(3), 3);
        assert_eq!(wizard.request_advance(), Ok(4));
        assert_eq!(wizard.request_advance(), Ok(4));
        assert_eq!(wizard.request_retreat(), Ok(3));
        assert_eq!(wizard.jump_to_step(99), 4);
    }

    #[test]
    fn long_titles_are_truncated() {
        let mut wizard = WizardController::new(config().with_title_max_chars(5));
        wizard.apply_edit(RecordEdit::Title("Lämpchen".into()));
        assert_eq!(wizard.record().title(), "Lämpc");
    }

    #[test]
    fn save_draft_skips_validation() {
        let mut wizard = WizardController::new(config());
        let sub = wizard.subscribe();

        assert!(wizard.save_draft().is_ok());
        assert_eq!(event_types(&sub), vec!["wizard.draft.saved"]);
    }

    #[tokio::test]
    async fn submit_with_everything_missing_reports_title_first() {
        let mut wizard = WizardController::new(config());
        wizard.jump_to_step(step::DETAILS);
        let sub = wizard.subscribe();

        let err = wizard.submit().await.unwrap_err();

        assert_eq!(
            err,
            DomainError::validation(FieldKey::Title, 0, validation::TITLE_REQUIRED)
        );
        assert_eq!(wizard.current_step(), 0);
        assert!(!wizard.is_submitting());
        assert_eq!(
            event_types(&sub),
            vec!["wizard.step.changed", "wizard.validation.failed"]
        );
    }

    #[tokio::test]
    async fn submit_redirects_to_media_then_pricing() {
        let mut wizard = WizardController::new(config());
        wizard.apply_edit(RecordEdit::Title("Lamp".into()));
        wizard.jump_to_step(step::DETAILS);

        let err = wizard.submit().await.unwrap_err();
        assert_eq!(err.redirect_step(), Some(step::MEDIA));
        assert_eq!(wizard.current_step(), step::MEDIA);

        wizard.accept_media(MediaSlot::Primary, vec![png("a.png")]).unwrap();
        wizard.settle_media().await;
        let err = wizard.submit().await.unwrap_err();
        assert_eq!(err.redirect_step(), Some(step::PRICING));
        assert_eq!(wizard.current_step(), step::PRICING);
    }

    #[tokio::test]
    async fn successful_submit_goes_idle_submitting_idle() {
        let mut wizard = WizardController::new(config());
        ready_to_submit(&mut wizard).await;
        let sub = wizard.subscribe();

        let receipt = wizard.submit().await.unwrap();

        assert_eq!(wizard.submit_state(), SubmitState::Idle);
        let events = sub.drain();
        let types: Vec<_> = events.iter().map(|n| n.event_type()).collect();
        assert_eq!(types, vec!["wizard.submit.started", "wizard.submit.succeeded"]);
        match &events[1] {
            WizardNotification::SubmitSucceeded { receipt: r, .. } => assert_eq!(r, &receipt),
            other => panic!("expected SubmitSucceeded, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn busy_wizard_rejects_reentrant_submit_and_navigation() {
        let mut wizard = WizardController::new(config());
        ready_to_submit(&mut wizard).await;

        let pending = wizard.begin_submit().unwrap();
        assert!(wizard.is_submitting());

        assert_eq!(wizard.begin_submit().unwrap_err(), DomainError::Busy);
        assert_eq!(wizard.submit().await.unwrap_err(), DomainError::Busy);
        assert_eq!(wizard.request_advance(), Err(DomainError::Busy));
        assert_eq!(wizard.request_retreat(), Err(DomainError::Busy));
        assert_eq!(wizard.save_draft(), Err(DomainError::Busy));
        // Step indicators stay clickable.
        assert_eq!(wizard.jump_to_step(2), 2);

        let outcome = SimulatedPublisher::new(Duration::ZERO)
            .publish(pending.submission_id(), pending.record())
            .await;
        wizard.finish_submit(pending, outcome).unwrap();
        assert!(!wizard.is_submitting());
        assert!(wizard.request_advance().is_ok());
    }

    #[tokio::test]
    async fn pending_submission_keeps_its_snapshot() {
        let mut wizard = WizardController::new(config());
        ready_to_submit(&mut wizard).await;

        let pending = wizard.begin_submit().unwrap();
        wizard.apply_edit(RecordEdit::Title("Changed".into()));

        assert_eq!(pending.record().title(), "Lamp");
        assert_eq!(wizard.record().title(), "Changed");
    }

    #[tokio::test]
    async fn publisher_failure_returns_to_idle() {
        let mut wizard = WizardController::with_publisher(config(), FailingPublisher);
        ready_to_submit(&mut wizard).await;
        let sub = wizard.subscribe();

        let err = wizard.submit().await.unwrap_err();

        assert_eq!(err, DomainError::submission_failed("backend unavailable"));
        assert_eq!(wizard.submit_state(), SubmitState::Idle);
        assert_eq!(
            event_types(&sub),
            vec!["wizard.submit.started", "wizard.submit.failed"]
        );
    }

    #[tokio::test]
    async fn dropped_submit_returns_to_idle() {
        let mut wizard =
            WizardController::new(config().with_submit_latency(Duration::from_millis(200)));
        ready_to_submit(&mut wizard).await;
        let sub = wizard.subscribe();

        let timed_out = tokio::time::timeout(Duration::from_millis(10), wizard.submit()).await;
        assert!(timed_out.is_err());

        assert_eq!(wizard.submit_state(), SubmitState::Idle);
        let events = sub.drain();
        match events.as_slice() {
            [
                WizardNotification::SubmitStarted { .. },
                WizardNotification::SubmitFailed { reason, .. },
            ] => assert_eq!(reason, SUBMIT_CANCELLED),
            other => panic!("expected started then failed, got {other:?}"),
        }
        assert!(wizard.save_draft().is_ok());
        assert!(wizard.submit().await.is_ok());
    }

    #[tokio::test]
    async fn abandoned_pending_submission_frees_the_wizard() {
        let mut wizard = WizardController::new(config());
        ready_to_submit(&mut wizard).await;
        let sub = wizard.subscribe();

        let pending = wizard.begin_submit().unwrap();
        let submission_id = pending.submission_id();
        assert_eq!(wizard.request_advance(), Err(DomainError::Busy));

        wizard.abandon_submit(pending).unwrap();

        assert!(!wizard.is_submitting());
        assert!(wizard.request_advance().is_ok());
        assert!(sub.drain().iter().any(|n| matches!(
            n,
            WizardNotification::SubmitFailed { submission_id: id, .. } if *id == submission_id
        )));
    }

    #[tokio::test]
    async fn stale_pending_submission_is_rejected() {
        let mut wizard = WizardController::new(config());
        ready_to_submit(&mut wizard).await;

        let first = wizard.begin_submit().unwrap();
        let first_id = first.submission_id();
        let receipt = SimulatedPublisher::new(Duration::ZERO)
            .publish(first_id, first.record())
            .await;
        wizard.finish_submit(first, receipt).unwrap();

        let forged = PendingSubmission {
            submission_id: first_id,
            record: wizard.record().clone(),
        };
        let err = wizard.finish_submit(forged, Err(DomainError::submission_failed("late"))).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[tokio::test]
    async fn media_changes_flow_into_record() {
        let mut wizard = WizardController::new(config());
        let sub = wizard.subscribe();

        wizard
            .accept_media(MediaSlot::Secondary, vec![png("d1.png"), png("d2.png")])
            .unwrap();
        assert_eq!(wizard.settle_media().await, 2);
        assert_eq!(wizard.record().media().secondary.len(), 2);

        wizard.remove_media(MediaSlot::Secondary, 0).unwrap();
        assert_eq!(wizard.record().media().secondary.len(), 1);
        assert_eq!(
            wizard.remove_media(MediaSlot::Secondary, 1),
            Err(DomainError::index_out_of_range(1, 1))
        );

        let counts: Vec<usize> = sub
            .drain()
            .into_iter()
            .filter_map(|n| match n {
                WizardNotification::MediaChanged { count, .. } => Some(count),
                _ => None,
            })
            .collect();
        assert_eq!(counts, vec![1, 2, 1]);
    }

    #[tokio::test]
    async fn over_cap_batch_is_reported_and_leaves_record_alone() {
        let mut wizard = WizardController::new(config());
        let batch: Vec<_> = (0..4).map(|i| png(&format!("{i}.png"))).collect();
        wizard.accept_media(MediaSlot::Primary, batch).unwrap();
        wizard.settle_media().await;
        let before = wizard.record().media().primary.clone();
        let sub = wizard.subscribe();

        let err = wizard
            .accept_media(MediaSlot::Primary, vec![png("x.png"), png("y.png")])
            .unwrap_err();

        assert_eq!(err, DomainError::capacity_exceeded(MediaSlot::Primary, 5));
        assert_eq!(wizard.record().media().primary, before);
        assert_eq!(wizard.media_in_flight(), 0);
        assert_eq!(event_types(&sub), vec!["wizard.media.rejected"]);
    }

    #[tokio::test]
    async fn undecodable_file_is_reported_not_stored() {
        let mut wizard = WizardController::new(config());
        let sub = wizard.subscribe();

        wizard
            .accept_media(MediaSlot::Primary, vec![RawFile::from_bytes("notes.txt", b"hi".to_vec())])
            .unwrap();
        wizard.settle_media().await;

        assert!(wizard.record().media().primary.is_empty());
        assert_eq!(event_types(&sub), vec!["wizard.media.decode_failed"]);
    }

    #[tokio::test]
    async fn progress_follows_required_fields() {
        let mut wizard = WizardController::new(config());
        assert!(!wizard.progress(step::PRICING).is_complete());

        ready_to_submit(&mut wizard).await;

        for required in [step::GENERAL, step::MEDIA, step::PRICING] {
            assert!(wizard.progress(required).is_complete());
        }
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: `jump_to_step(k)` is idempotent from any starting step.
            #[test]
            fn jump_is_idempotent(start in 0usize..5, k in any::<usize>()) {
                let mut once = WizardController::new(config());
                let mut twice = WizardController::new(config());
                once.jump_to_step(start);
                twice.jump_to_step(start);

                once.jump_to_step(k);
                twice.jump_to_step(k);
                twice.jump_to_step(k);

                prop_assert_eq!(once.current_step(), twice.current_step());
            }

            /// Property: with an empty title, advancing from step 0 never moves;
            /// with any non-empty title it always lands on step 1.
            #[test]
            fn advance_gate_on_first_step(title in "\\PC{0,60}") {
                let mut wizard = WizardController::new(config());
                wizard.apply_edit(RecordEdit::Title(title.clone()));

                let result = wizard.request_advance();
                if title.is_empty() {
                    prop_assert!(result.is_err());
                    prop_assert_eq!(wizard.current_step(), 0);
                } else {
                    prop_assert_eq!(result, Ok(1));
                }
            }
        }
    }
}
