use chrono::{DateTime, Utc};

/// A notification emitted by the wizard core.
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - **named** with a stable dotted type (e.g. "wizard.step.changed")
/// - stamped with the time they occurred
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier.
    fn event_type(&self) -> &'static str;

    /// When the event occurred.
    fn occurred_at(&self) -> DateTime<Utc>;
}
