//! Port trait for the remote product catalog.
//!
//! This trait defines the interface for reading paginated product
//! listings from the hosted Storefront API. Implementations live in the
//! infrastructure layer (e.g., `vitrine-storefront`).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::CatalogResult;
use crate::models::{Image, PriceRange, ProductVariant};
use crate::ports::{Connection, PaginationVariables};

/// Raw product node as returned by the catalog query, before projection
/// into a [`crate::models::ProductCard`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    /// Platform-global product id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Publication timestamp.
    pub published_at: Option<DateTime<Utc>>,
    /// URL slug.
    pub handle: String,
    /// Vendor name.
    pub vendor: String,
    /// Min/max variant prices.
    pub price_range: PriceRange,
    /// Featured image, if any.
    pub featured_image: Option<Image>,
    /// Variant connection, requested with `first: 1`.
    pub variants: RawVariantConnection,
}

/// Inner variants connection of a raw product node.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVariantConnection {
    pub nodes: Vec<ProductVariant>,
}

/// Port trait for catalog reads.
///
/// The implementation is responsible for issuing exactly one read query
/// per call and for forwarding the pagination variables unmodified; all
/// cursor semantics (stability, boundary inclusivity) belong to the
/// remote service.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch one page of the product listing.
    async fn all_products(
        &self,
        variables: PaginationVariables,
    ) -> CatalogResult<Connection<RawProduct>>;
}
