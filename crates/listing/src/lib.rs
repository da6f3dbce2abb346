//! `itemforge-listing`: the listing wizard core.
//!
//! **Responsibility:** own one listing record per editing session, move the
//! user through the wizard steps, gate forward/submit progression behind the
//! section rules, and feed media from the intake into the record.
//!
//! The presentation layer calls into [`WizardController`] and re-reads state
//! (or drains notifications) to render; the controller never calls back into
//! rendering.

pub mod config;
pub mod controller;
pub mod edit;
pub mod money;
pub mod notification;
pub mod publisher;
pub mod record;
pub mod steps;
pub mod validation;

pub use config::WizardConfig;
pub use controller::{PendingSubmission, SubmitState, WizardController};
pub use edit::{RecordEdit, Section};
pub use money::Money;
pub use notification::WizardNotification;
pub use publisher::{ListingPublisher, PublishReceipt, SimulatedPublisher};
pub use record::{
    DetailsSection, FulfillmentSection, GeneralAttribute, GeneralSection, ListingRecord,
    ListingStatus, MediaSection, PriceType, PricingSection,
};
pub use steps::StepSequence;
pub use validation::SectionProgress;
