//! The listing record: one aggregate, organized in independent sections.

use core::str::FromStr;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use itemforge_core::{DomainError, MediaSlot};
use itemforge_media::{EncodedImage, MediaConsumer};

use crate::edit::RecordEdit;
use crate::money::Money;

/// Categorical attributes of the general section.
///
/// Their values come from an external, closed vocabulary and are stored as
/// opaque identifiers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneralAttribute {
    Brand,
    Audience,
    Material,
    Style,
    Feature,
    Craft,
    Packaging,
}

impl GeneralAttribute {
    pub const ALL: [GeneralAttribute; 7] = [
        GeneralAttribute::Brand,
        GeneralAttribute::Audience,
        GeneralAttribute::Material,
        GeneralAttribute::Style,
        GeneralAttribute::Feature,
        GeneralAttribute::Craft,
        GeneralAttribute::Packaging,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GeneralAttribute::Brand => "brand",
            GeneralAttribute::Audience => "audience",
            GeneralAttribute::Material => "material",
            GeneralAttribute::Style => "style",
            GeneralAttribute::Feature => "feature",
            GeneralAttribute::Craft => "craft",
            GeneralAttribute::Packaging => "packaging",
        }
    }
}

impl FromStr for GeneralAttribute {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeneralAttribute::ALL
            .into_iter()
            .find(|attr| attr.as_str() == s)
            .ok_or_else(|| DomainError::invalid_value(format!("unknown attribute: {s}")))
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    /// One price, ready to ship.
    #[default]
    Fixed,
    /// Price depends on order stage (pre-sale).
    Staged,
}

impl FromStr for PriceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(PriceType::Fixed),
            "staged" => Ok(PriceType::Staged),
            other => Err(DomainError::invalid_value(format!("unknown price type: {other}"))),
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    #[default]
    Active,
    Inactive,
}

impl FromStr for ListingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ListingStatus::Active),
            "inactive" => Ok(ListingStatus::Inactive),
            other => Err(DomainError::invalid_value(format!("unknown status: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralSection {
    pub title: String,
    pub attributes: BTreeMap<GeneralAttribute, String>,
}

impl GeneralSection {
    pub fn attribute(&self, attribute: GeneralAttribute) -> Option<&str> {
        self.attributes.get(&attribute).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSection {
    pub primary: Vec<EncodedImage>,
    pub secondary: Vec<EncodedImage>,
}

impl MediaSection {
    pub fn images(&self, slot: MediaSlot) -> &[EncodedImage] {
        match slot {
            MediaSlot::Primary => &self.primary,
            MediaSlot::Secondary => &self.secondary,
        }
    }
}

impl MediaConsumer for MediaSection {
    fn republish(&mut self, slot: MediaSlot, images: &[EncodedImage]) {
        let target = match slot {
            MediaSlot::Primary => &mut self.primary,
            MediaSlot::Secondary => &mut self.secondary,
        };
        target.clear();
        target.extend_from_slice(images);
    }
}

/// Pricing and stock.
///
/// `original_price` only means something when `has_discount` is set; no
/// ordering against `sale_price` is enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSection {
    pub price_type: PriceType,
    pub sale_price: Money,
    pub original_price: Money,
    pub has_discount: bool,
    pub stock_quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentSection {
    pub shipping_method: Option<String>,
    pub free_shipping: bool,
    pub after_sales_enabled: bool,
    pub returns_allowed: bool,
    pub returns_window_days: u32,
    /// Reserved for after-sales option identifiers; nothing fills it yet.
    pub after_sales_options: BTreeSet<String>,
}

impl Default for FulfillmentSection {
    fn default() -> Self {
        Self {
            shipping_method: None,
            free_shipping: false,
            after_sales_enabled: false,
            returns_allowed: true,
            returns_window_days: 7,
            after_sales_options: BTreeSet::new(),
        }
    }
}

/// Free-text metadata from the last step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailsSection {
    pub description: String,
    pub tags: Vec<String>,
}

/// Split comma-separated tag input; blanks are dropped, duplicates keep their first position.
pub fn parse_tags(input: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .filter(|tag| seen.insert(tag.to_string()))
        .map(str::to_string)
        .collect()
}

/// Aggregate root: the listing being created.
///
/// Created once per session with default values and only mutated in place
/// through [`ListingRecord::apply`] and the media republish path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    general: GeneralSection,
    media: MediaSection,
    pricing: PricingSection,
    fulfillment: FulfillmentSection,
    details: DetailsSection,
    status: ListingStatus,
}

impl ListingRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn general(&self) -> &GeneralSection {
        &self.general
    }

    pub fn media(&self) -> &MediaSection {
        &self.media
    }

    pub(crate) fn media_mut(&mut self) -> &mut MediaSection {
        &mut self.media
    }

    pub fn pricing(&self) -> &PricingSection {
        &self.pricing
    }

    pub fn fulfillment(&self) -> &FulfillmentSection {
        &self.fulfillment
    }

    pub fn details(&self) -> &DetailsSection {
        &self.details
    }

    pub fn status(&self) -> ListingStatus {
        self.status
    }

    pub fn title(&self) -> &str {
        &self.general.title
    }

    /// Evolve the record with a single field edit.
    pub fn apply(&mut self, edit: RecordEdit) {
        match edit {
            RecordEdit::Title(title) => self.general.title = title,
            RecordEdit::Attribute(attribute, Some(value)) => {
                self.general.attributes.insert(attribute, value);
            }
            RecordEdit::Attribute(attribute, None) => {
                self.general.attributes.remove(&attribute);
            }
            RecordEdit::PriceType(price_type) => self.pricing.price_type = price_type,
            RecordEdit::SalePrice(price) => self.pricing.sale_price = price,
            RecordEdit::OriginalPrice(price) => self.pricing.original_price = price,
            RecordEdit::HasDiscount(flag) => self.pricing.has_discount = flag,
            RecordEdit::StockQuantity(quantity) => self.pricing.stock_quantity = quantity,
            RecordEdit::ShippingMethod(method) => self.fulfillment.shipping_method = method,
            RecordEdit::FreeShipping(flag) => self.fulfillment.free_shipping = flag,
            RecordEdit::AfterSalesEnabled(flag) => self.fulfillment.after_sales_enabled = flag,
            RecordEdit::ReturnsAllowed(flag) => self.fulfillment.returns_allowed = flag,
            RecordEdit::ReturnsWindowDays(days) => self.fulfillment.returns_window_days = days,
            RecordEdit::Description(text) => self.details.description = text,
            RecordEdit::Tags(raw) => self.details.tags = parse_tags(&raw),
            RecordEdit::Status(status) => self.status = status,
        }
    }
}
