//! Capped, ordered image collection for one media slot.

use itemforge_core::{DomainError, DomainResult, MediaSlot};

use crate::image::EncodedImage;

/// Images of one slot plus the decodes admitted but not yet finished.
///
/// In-flight decodes hold a reservation against the cap, so
/// `images.len() + in_flight <= cap` holds at all times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCollection {
    slot: MediaSlot,
    cap: usize,
    images: Vec<EncodedImage>,
    in_flight: usize,
}

impl SlotCollection {
    pub fn new(slot: MediaSlot, cap: usize) -> Self {
        Self {
            slot,
            cap,
            images: Vec::new(),
            in_flight: 0,
        }
    }

    pub fn slot(&self) -> MediaSlot {
        self.slot
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn images(&self) -> &[EncodedImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Slots still free once every in-flight decode lands.
    pub fn remaining(&self) -> usize {
        self.cap.saturating_sub(self.images.len() + self.in_flight)
    }

    /// Reserve room for a whole batch, or nothing at all.
    pub fn reserve(&mut self, batch: usize) -> DomainResult<()> {
        if batch > self.remaining() {
            return Err(DomainError::capacity_exceeded(self.slot, self.cap));
        }
        self.in_flight += batch;
        Ok(())
    }

    /// Land a finished decode: release its reservation and append.
    pub(crate) fn complete(&mut self, image: EncodedImage) -> usize {
        self.release();
        self.images.push(image);
        self.images.len() - 1
    }

    /// Release the reservation of a decode that failed.
    pub(crate) fn release(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    pub fn remove(&mut self, index: usize) -> DomainResult<EncodedImage> {
        if index >= self.images.len() {
            return Err(DomainError::index_out_of_range(index, self.images.len()));
        }
        Ok(self.images.remove(index))
    }
}
