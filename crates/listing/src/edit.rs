//! Field edits sent by the presentation layer.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use itemforge_core::{DomainError, DomainResult};

use crate::money::Money;
use crate::record::{GeneralAttribute, ListingStatus, PriceType};

/// Record section an edit belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    General,
    Pricing,
    Fulfillment,
    Details,
    Status,
}

impl FromStr for Section {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(Section::General),
            "pricing" => Ok(Section::Pricing),
            "fulfillment" => Ok(Section::Fulfillment),
            "details" => Ok(Section::Details),
            "status" => Ok(Section::Status),
            other => Err(DomainError::invalid_value(format!("unknown section: {other}"))),
        }
    }
}

/// One field edit. Media slots are not editable this way; they change only
/// through the media intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordEdit {
    Title(String),
    /// `None` clears the selection.
    Attribute(GeneralAttribute, Option<String>),
    PriceType(PriceType),
    SalePrice(Money),
    OriginalPrice(Money),
    HasDiscount(bool),
    StockQuantity(u32),
    /// `None` clears the selection.
    ShippingMethod(Option<String>),
    FreeShipping(bool),
    AfterSalesEnabled(bool),
    ReturnsAllowed(bool),
    ReturnsWindowDays(u32),
    Description(String),
    /// Raw comma-separated tag input.
    Tags(String),
    Status(ListingStatus),
}

impl RecordEdit {
    pub fn section(&self) -> Section {
        match self {
            RecordEdit::Title(_) | RecordEdit::Attribute(..) => Section::General,
            RecordEdit::PriceType(_)
            | RecordEdit::SalePrice(_)
            | RecordEdit::OriginalPrice(_)
            | RecordEdit::HasDiscount(_)
            | RecordEdit::StockQuantity(_) => Section::Pricing,
            RecordEdit::ShippingMethod(_)
            | RecordEdit::FreeShipping(_)
            | RecordEdit::AfterSalesEnabled(_)
            | RecordEdit::ReturnsAllowed(_)
            | RecordEdit::ReturnsWindowDays(_) => Section::Fulfillment,
            RecordEdit::Description(_) | RecordEdit::Tags(_) => Section::Details,
            RecordEdit::Status(_) => Section::Status,
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            RecordEdit::Title(_) => "title",
            RecordEdit::Attribute(attribute, _) => attribute.as_str(),
            RecordEdit::PriceType(_) => "price_type",
            RecordEdit::SalePrice(_) => "sale_price",
            RecordEdit::OriginalPrice(_) => "original_price",
            RecordEdit::HasDiscount(_) => "has_discount",
            RecordEdit::StockQuantity(_) => "stock_quantity",
            RecordEdit::ShippingMethod(_) => "shipping_method",
            RecordEdit::FreeShipping(_) => "free_shipping",
            RecordEdit::AfterSalesEnabled(_) => "after_sales_enabled",
            RecordEdit::ReturnsAllowed(_) => "returns_allowed",
            RecordEdit::ReturnsWindowDays(_) => "returns_window_days",
            RecordEdit::Description(_) => "description",
            RecordEdit::Tags(_) => "tags",
            RecordEdit::Status(_) => "status",
        }
    }

    /// Build an edit from an untyped `(section, field, value)` triple, as sent
    /// by form widgets. An empty value clears optional selections.
    pub fn parse(section: &str, field: &str, value: &str) -> DomainResult<Self> {
        let section: Section = section.parse()?;
        let unknown = || DomainError::invalid_value(format!("unknown field: {section:?}.{field}"));

        let edit = match (section, field) {
            (Section::General, "title") => RecordEdit::Title(value.to_string()),
            (Section::General, attribute) => {
                let attribute = attribute.parse::<GeneralAttribute>().map_err(|_| unknown())?;
                RecordEdit::Attribute(attribute, optional(value))
            }
            (Section::Pricing, "price_type") => RecordEdit::PriceType(value.parse()?),
            (Section::Pricing, "sale_price") => RecordEdit::SalePrice(value.parse()?),
            (Section::Pricing, "original_price") => RecordEdit::OriginalPrice(value.parse()?),
            (Section::Pricing, "has_discount") => RecordEdit::HasDiscount(flag(value)?),
            (Section::Pricing, "stock_quantity") => RecordEdit::StockQuantity(count(value)?),
            (Section::Fulfillment, "shipping_method") => RecordEdit::ShippingMethod(optional(value)),
            (Section::Fulfillment, "free_shipping") => RecordEdit::FreeShipping(flag(value)?),
            (Section::Fulfillment, "after_sales_enabled") => RecordEdit::AfterSalesEnabled(flag(value)?),
            (Section::Fulfillment, "returns_allowed") => RecordEdit::ReturnsAllowed(flag(value)?),
            (Section::Fulfillment, "returns_window_days") => RecordEdit::ReturnsWindowDays(count(value)?),
            (Section::Details, "description") => RecordEdit::Description(value.to_string()),
            (Section::Details, "tags") => RecordEdit::Tags(value.to_string()),
            (Section::Status, "status") => RecordEdit::Status(value.parse()?),
            _ => return Err(unknown()),
        };
        Ok(edit)
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn flag(value: &str) -> DomainResult<bool> {
    match value.trim() {
        "true" | "on" | "yes" => Ok(true),
        "false" | "off" | "no" => Ok(false),
        other => Err(DomainError::invalid_value(format!("not a boolean: {other:?}"))),
    }
}

fn count(value: &str) -> DomainResult<u32> {
    value
        .trim()
        .parse()
        .map_err(|_| DomainError::invalid_value(format!("not a non-negative integer: {value:?}")))
}
