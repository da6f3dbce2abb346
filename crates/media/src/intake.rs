//! Bounded asynchronous intake of media files.

use std::sync::Arc;

use tokio::sync::mpsc;

use itemforge_core::{DomainError, DomainResult, MediaSlot};

use crate::decoder::{DataUrlDecoder, ImageDecoder};
use crate::file::RawFile;
use crate::image::EncodedImage;
use crate::slot::SlotCollection;

/// Caps and size limit applied by the intake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeLimits {
    pub primary_cap: usize,
    pub secondary_cap: usize,
    /// Largest accepted file, in bytes.
    pub max_image_bytes: usize,
}

impl Default for IntakeLimits {
    fn default() -> Self {
        Self {
            primary_cap: 5,
            secondary_cap: 8,
            max_image_bytes: 2 * 1024 * 1024,
        }
    }
}

impl IntakeLimits {
    pub fn cap(&self, slot: MediaSlot) -> usize {
        match slot {
            MediaSlot::Primary => self.primary_cap,
            MediaSlot::Secondary => self.secondary_cap,
        }
    }
}

/// Receives the full collection of a slot every time it changes.
pub trait MediaConsumer {
    fn republish(&mut self, slot: MediaSlot, images: &[EncodedImage]);
}

/// What happened to a slot as a result of a completion or a removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaChange {
    Appended {
        slot: MediaSlot,
        index: usize,
        file_name: String,
    },
    Removed {
        slot: MediaSlot,
        index: usize,
        file_name: String,
    },
    DecodeFailed {
        slot: MediaSlot,
        file_name: String,
        error: DomainError,
    },
}

impl MediaChange {
    pub fn slot(&self) -> MediaSlot {
        match self {
            MediaChange::Appended { slot, .. }
            | MediaChange::Removed { slot, .. }
            | MediaChange::DecodeFailed { slot, .. } => *slot,
        }
    }
}

/// Message sent by a decode task when it finishes.
#[derive(Debug)]
struct Completion {
    slot: MediaSlot,
    file_name: String,
    result: DomainResult<EncodedImage>,
}

/// Two capped image slots fed by concurrent decode tasks.
///
/// Decode tasks never touch the collections. Each one sends a single
/// [`Completion`] over an unbounded channel, and the intake applies them one at a
/// time from `pump`/`next_change`/`settle`, republishing the slot to the
/// consumer after every completion. Completion order, not submission order,
/// decides where an image lands.
pub struct MediaIntake {
    limits: IntakeLimits,
    primary: SlotCollection,
    secondary: SlotCollection,
    decoder: Arc<dyn ImageDecoder>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
}

impl core::fmt::Debug for MediaIntake {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MediaIntake")
            .field("limits", &self.limits)
            .field("primary", &self.primary)
            .field("secondary", &self.secondary)
            .finish_non_exhaustive()
    }
}

impl MediaIntake {
    pub fn new(limits: IntakeLimits) -> Self {
        let decoder = Arc::new(DataUrlDecoder::new(limits.max_image_bytes));
        Self::with_decoder(limits, decoder)
    }

    pub fn with_decoder(limits: IntakeLimits, decoder: Arc<dyn ImageDecoder>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            primary: SlotCollection::new(MediaSlot::Primary, limits.primary_cap),
            secondary: SlotCollection::new(MediaSlot::Secondary, limits.secondary_cap),
            limits,
            decoder,
            completions_tx,
            completions_rx,
        }
    }

    pub fn limits(&self) -> &IntakeLimits {
        &self.limits
    }

    pub fn slot(&self, slot: MediaSlot) -> &SlotCollection {
        match slot {
            MediaSlot::Primary => &self.primary,
            MediaSlot::Secondary => &self.secondary,
        }
    }

    fn slot_mut(&mut self, slot: MediaSlot) -> &mut SlotCollection {
        match slot {
            MediaSlot::Primary => &mut self.primary,
            MediaSlot::Secondary => &mut self.secondary,
        }
    }

    pub fn images(&self, slot: MediaSlot) -> &[EncodedImage] {
        self.slot(slot).images()
    }

    /// Decodes started but not yet applied, across both slots.
    pub fn in_flight(&self) -> usize {
        self.primary.in_flight() + self.secondary.in_flight()
    }

    /// Admit a batch into `slot` and start one decode task per file.
    ///
    /// Fails with `CapacityExceeded` when the batch does not fit next to the
    /// current images and in-flight decodes; in that case nothing is decoded
    /// and the slot is untouched. Must be called from within a Tokio runtime.
    /// Returns the number of decodes started.
    pub fn accept(&mut self, slot: MediaSlot, files: Vec<RawFile>) -> DomainResult<usize> {
        if files.is_empty() {
            return Ok(0);
        }

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|_| DomainError::invariant("media intake requires a tokio runtime"))?;

        let batch = files.len();
        if let Err(err) = self.slot_mut(slot).reserve(batch) {
            tracing::info!(%slot, batch, cap = self.limits.cap(slot), "media batch rejected");
            return Err(err);
        }

        for file in files {
            let decoder = Arc::clone(&self.decoder);
            let tx = self.completions_tx.clone();
            let file_name = file.name().to_string();

            runtime.spawn(async move {
                // A panicking decoder still has to hand its reservation back.
                let result = match tokio::spawn(async move { decoder.decode(file).await }).await {
                    Ok(result) => result,
                    Err(join_err) => Err(DomainError::decode(format!("{file_name}: {join_err}"))),
                };

                if tx.send(Completion { slot, file_name, result }).is_err() {
                    tracing::debug!(%slot, "media intake dropped before decode finished");
                }
            });
        }

        tracing::debug!(%slot, batch, in_flight = self.slot(slot).in_flight(), "media batch admitted");
        Ok(batch)
    }

    /// Remove the image at `index` and republish the slot.
    pub fn remove<C>(&mut self, slot: MediaSlot, index: usize, consumer: &mut C) -> DomainResult<MediaChange>
    where
        C: MediaConsumer + ?Sized,
    {
        let removed = self.slot_mut(slot).remove(index).inspect_err(|err| {
            tracing::warn!(%slot, index, error = %err, "media remove with invalid index");
        })?;

        consumer.republish(slot, self.images(slot));

        Ok(MediaChange::Removed {
            slot,
            index,
            file_name: removed.file_name().to_string(),
        })
    }

    /// Apply every completion that has already arrived, without waiting.
    pub fn pump<C>(&mut self, consumer: &mut C) -> Vec<MediaChange>
    where
        C: MediaConsumer + ?Sized,
    {
        let mut changes = Vec::new();
        while let Ok(completion) = self.completions_rx.try_recv() {
            changes.push(self.apply(completion, consumer));
        }
        changes
    }

    /// Wait for and apply the next completion.
    ///
    /// Returns `None` immediately when no decode is in flight.
    pub async fn next_change<C>(&mut self, consumer: &mut C) -> Option<MediaChange>
    where
        C: MediaConsumer + ?Sized,
    {
        if self.in_flight() == 0 {
            return None;
        }
        tracing::debug!(in_flight = self.in_flight(), "waiting for media decode");
        // The intake keeps a sender alive, so the channel cannot close here.
        let completion = self.completions_rx.recv().await?;
        Some(self.apply(completion, consumer))
    }

    /// Wait until every in-flight decode has been applied.
    pub async fn settle<C>(&mut self, consumer: &mut C) -> Vec<MediaChange>
    where
        C: MediaConsumer + ?Sized,
    {
        let mut changes = Vec::new();
        while let Some(change) = self.next_change(consumer).await {
            changes.push(change);
        }
        changes
    }

    fn apply<C>(&mut self, completion: Completion, consumer: &mut C) -> MediaChange
    where
        C: MediaConsumer + ?Sized,
    {
        let Completion { slot, file_name, result } = completion;
        let collection = self.slot_mut(slot);

        match result {
            Ok(image) => {
                let index = collection.complete(image);
                consumer.republish(slot, collection.images());
                tracing::debug!(%slot, index, file = %file_name, "media appended");
                MediaChange::Appended { slot, index, file_name }
            }
            Err(error) => {
                collection.release();
                tracing::warn!(%slot, file = %file_name, error = %error, "media decode failed");
                MediaChange::DecodeFailed { slot, file_name, error }
            }
        }
    }
}
