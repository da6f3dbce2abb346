//! Identifiers for the record fields and media slots that errors and
//! notifications refer to.

use serde::{Deserialize, Serialize};

/// A field that a validation rule can reject.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    Title,
    PrimaryImage,
    SalePrice,
}

impl FieldKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Title => "title",
            FieldKey::PrimaryImage => "primary_image",
            FieldKey::SalePrice => "sale_price",
        }
    }
}

impl core::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the two independent media collections of a listing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaSlot {
    /// Main images shown first; at least one is required to submit.
    Primary,
    /// Optional detail images.
    Secondary,
}

impl MediaSlot {
    pub const ALL: [MediaSlot; 2] = [MediaSlot::Primary, MediaSlot::Secondary];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaSlot::Primary => "primary",
            MediaSlot::Secondary => "secondary",
        }
    }
}

impl core::fmt::Display for MediaSlot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
