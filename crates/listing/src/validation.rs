//! Section rules that gate forward movement and submission.

use serde::Serialize;

use itemforge_core::{DomainError, DomainResult, FieldKey};

use crate::record::ListingRecord;
use crate::steps::step;

pub const TITLE_REQUIRED: &str = "Product title is required";
pub const PRIMARY_IMAGE_REQUIRED: &str = "At least one main image is required";
pub const SALE_PRICE_REQUIRED: &str = "Sale price must be greater than 0";

/// Required fields filled in a section, for the step header.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct SectionProgress {
    pub filled: usize,
    pub total: usize,
}

impl SectionProgress {
    pub fn is_complete(&self) -> bool {
        self.filled == self.total
    }
}

fn require_title(record: &ListingRecord) -> DomainResult<()> {
    if record.title().is_empty() {
        return Err(DomainError::validation(FieldKey::Title, step::GENERAL, TITLE_REQUIRED));
    }
    Ok(())
}

fn require_primary_image(record: &ListingRecord) -> DomainResult<()> {
    if record.media().primary.is_empty() {
        return Err(DomainError::validation(
            FieldKey::PrimaryImage,
            step::MEDIA,
            PRIMARY_IMAGE_REQUIRED,
        ));
    }
    Ok(())
}

fn require_sale_price(record: &ListingRecord) -> DomainResult<()> {
    if !record.pricing().sale_price.is_positive() {
        return Err(DomainError::validation(
            FieldKey::SalePrice,
            step::PRICING,
            SALE_PRICE_REQUIRED,
        ));
    }
    Ok(())
}

/// Rule for leaving `current` in the forward direction.
///
/// Only the first step is gated; the other steps are checked at submit time.
pub fn check_advance(current: usize, record: &ListingRecord) -> DomainResult<()> {
    if current == step::GENERAL {
        require_title(record)?;
    }
    Ok(())
}

/// Submit rules, in fixed order; the first failure wins.
///
/// Shipping method and returns window are deliberately not checked.
pub fn check_submit(record: &ListingRecord) -> DomainResult<()> {
    require_title(record)?;
    require_primary_image(record)?;
    require_sale_price(record)
}

pub fn progress(step_index: usize, record: &ListingRecord) -> SectionProgress {
    let check: fn(&ListingRecord) -> DomainResult<()> = match step_index {
        step::GENERAL => require_title,
        step::MEDIA => require_primary_image,
        step::PRICING => require_sale_price,
        _ => return SectionProgress { filled: 0, total: 0 },
    };
    SectionProgress {
        filled: usize::from(check(record).is_ok()),
        total: 1,
    }
}
