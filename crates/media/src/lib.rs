//! Media intake for listing images.
//!
//! Each listing has two independent, capped image slots. Files are admitted
//! per batch (all or nothing against the cap), decoded concurrently on the
//! Tokio runtime, and appended to their slot in completion order. Only the
//! owning [`MediaIntake`] mutates the collections; decode tasks report back
//! over a channel.

pub mod decoder;
pub mod file;
pub mod image;
pub mod intake;
pub mod slot;

pub use decoder::{DataUrlDecoder, ImageDecoder};
pub use file::{FileSource, RawFile};
pub use image::EncodedImage;
pub use intake::{IntakeLimits, MediaChange, MediaConsumer, MediaIntake};
pub use itemforge_core::MediaSlot;
pub use slot::SlotCollection;
