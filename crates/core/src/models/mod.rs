//! Domain models for storefront catalog and cart data.
//!
//! These models are adapter-agnostic and represent the canonical form of
//! catalog data within the domain layer. Field naming follows the remote
//! Storefront API wire shape (camelCase) so adapters can decode straight
//! into them without an intermediate mapping layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};
use crate::ports::RawProduct;

// =============================================================================
// Money & Images
// =============================================================================

/// A monetary amount with its currency.
///
/// Amounts are kept as the decimal strings the API returns; this layer
/// never does arithmetic on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub amount: String,
    pub currency_code: String,
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.currency_code)
    }
}

/// Product image metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: Option<String>,
    pub alt_text: Option<String>,
    pub url: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

// =============================================================================
// Products & Variants
// =============================================================================

/// Minimum and maximum variant prices of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub min_variant_price: Money,
    pub max_variant_price: Money,
}

/// One selected option of a variant (e.g. `Size` = `M`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

/// Back-reference from a variant to its parent product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentProduct {
    pub handle: String,
    pub title: String,
}

/// A purchasable product variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: String,
    pub image: Option<Image>,
    pub price: Money,
    pub compare_at_price: Option<Money>,
    pub selected_options: Vec<SelectedOption>,
    pub product: ParentProduct,
}

/// Read-only projection of a catalog product for listing pages.
///
/// Ephemeral: reconstructed on every query response, never mutated.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    pub id: String,
    pub title: String,
    pub published_at: Option<DateTime<Utc>>,
    pub handle: String,
    pub vendor: String,
    pub price_range: PriceRange,
    /// Absent images must not break rendering; display is conditional.
    pub featured_image: Option<Image>,
    pub first_variant: ProductVariant,
}

impl ProductCard {
    /// Project a raw catalog node into a card.
    ///
    /// Pure, total over well-formed input. A product without any variant
    /// is malformed catalog data and is rejected with
    /// [`CatalogError::MissingVariant`] rather than silently patched.
    pub fn project(raw: RawProduct) -> CatalogResult<Self> {
        let first_variant = raw
            .variants
            .nodes
            .into_iter()
            .next()
            .ok_or(CatalogError::MissingVariant(raw.id.clone()))?;

        Ok(Self {
            id: raw.id,
            title: raw.title,
            published_at: raw.published_at,
            handle: raw.handle,
            vendor: raw.vendor,
            price_range: raw.price_range,
            featured_image: raw.featured_image,
            first_variant,
        })
    }
}

// =============================================================================
// Cart
// =============================================================================

fn default_quantity() -> i32 {
    1
}

/// One line item of a cart-add request.
///
/// The payload is forwarded to the remote mutation as-is; beyond its
/// shape, its contents are not validated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineInput {
    pub merchandise_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<LineAttribute>,
}

impl CartLineInput {
    /// A single unit of the given variant.
    pub fn new(merchandise_id: impl Into<String>) -> Self {
        Self {
            merchandise_id: merchandise_id.into(),
            quantity: 1,
            attributes: Vec::new(),
        }
    }
}

/// Custom key/value attribute attached to a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAttribute {
    pub key: String,
    pub value: String,
}

/// Action identifier of a cart form submission.
///
/// The inbound cart route dispatches on this; only lines-add is
/// supported by the storefront front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartAction {
    LinesAdd,
}
