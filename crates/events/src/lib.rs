//! Notification plumbing between the wizard core and its presentation layer.
//!
//! The controller publishes facts (step changed, validation failed, media
//! changed, ...) and any number of subscribers re-read state or show messages.

pub mod bus;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
