//! Notifications published by the wizard for its presentation layer.

use chrono::{DateTime, Utc};
use serde::Serialize;

use itemforge_core::{FieldKey, MediaSlot, SessionId, SubmissionId};
use itemforge_events::Event;

use crate::publisher::PublishReceipt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WizardNotification {
    /// The cursor was moved; the view should scroll back to the top.
    StepChanged {
        session_id: SessionId,
        from: usize,
        to: usize,
        occurred_at: DateTime<Utc>,
    },
    ValidationFailed {
        session_id: SessionId,
        field: FieldKey,
        step: usize,
        message: String,
        occurred_at: DateTime<Utc>,
    },
    DraftSaved {
        session_id: SessionId,
        occurred_at: DateTime<Utc>,
    },
    /// Controls should be disabled until the matching success or failure.
    SubmitStarted {
        session_id: SessionId,
        submission_id: SubmissionId,
        occurred_at: DateTime<Utc>,
    },
    SubmitSucceeded {
        session_id: SessionId,
        receipt: PublishReceipt,
        occurred_at: DateTime<Utc>,
    },
    SubmitFailed {
        session_id: SessionId,
        submission_id: SubmissionId,
        reason: String,
        occurred_at: DateTime<Utc>,
    },
    MediaChanged {
        session_id: SessionId,
        slot: MediaSlot,
        count: usize,
        occurred_at: DateTime<Utc>,
    },
    MediaRejected {
        session_id: SessionId,
        slot: MediaSlot,
        cap: usize,
        occurred_at: DateTime<Utc>,
    },
    MediaDecodeFailed {
        session_id: SessionId,
        slot: MediaSlot,
        file_name: String,
        reason: String,
        occurred_at: DateTime<Utc>,
    },
}

impl Event for WizardNotification {
    fn event_type(&self) -> &'static str {
        match self {
            WizardNotification::StepChanged { .. } => "wizard.step.changed",
            WizardNotification::ValidationFailed { .. } => "wizard.validation.failed",
            WizardNotification::DraftSaved { .. } => "wizard.draft.saved",
            WizardNotification::SubmitStarted { .. } => "wizard.submit.started",
            WizardNotification::SubmitSucceeded { .. } => "wizard.submit.succeeded",
            WizardNotification::SubmitFailed { .. } => "wizard.submit.failed",
            WizardNotification::MediaChanged { .. } => "wizard.media.changed",
            WizardNotification::MediaRejected { .. } => "wizard.media.rejected",
            WizardNotification::MediaDecodeFailed { .. } => "wizard.media.decode_failed",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            WizardNotification::StepChanged { occurred_at, .. }
            | WizardNotification::ValidationFailed { occurred_at, .. }
            | WizardNotification::DraftSaved { occurred_at, .. }
            | WizardNotification::SubmitStarted { occurred_at, .. }
            | WizardNotification::SubmitSucceeded { occurred_at, .. }
            | WizardNotification::SubmitFailed { occurred_at, .. }
            | WizardNotification::MediaChanged { occurred_at, .. }
            | WizardNotification::MediaRejected { occurred_at, .. }
            | WizardNotification::MediaDecodeFailed { occurred_at, .. } => *occurred_at,
        }
    }
}
