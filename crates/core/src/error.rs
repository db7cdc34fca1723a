//! Error types for the storefront domain layer.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`ApiError`] - Transport/GraphQL errors from the remote Storefront API
//! - [`CatalogError`] - Product catalog read errors
//! - [`CartError`] - Cart mutation errors
//! - [`StorefrontError`] - Top-level errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// API Errors
// =============================================================================

/// Errors raised while talking to the remote Storefront API.
///
/// Both the catalog and the cart go through the same GraphQL endpoint,
/// so transport-level failures are shared between them.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failed (connect, TLS, timeout, body read).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The API answered with a non-success HTTP status.
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    /// The API answered 200 but the GraphQL response carries errors.
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// The response had neither data nor errors.
    #[error("Response contained no data")]
    MissingData,
}

// =============================================================================
// Catalog Errors
// =============================================================================

/// Product catalog read errors.
///
/// The catalog query is the critical data path of a listing page: any
/// of these errors must propagate to a page-level failure.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Remote API call failed.
    #[error("Storefront API error: {0}")]
    Api(#[from] ApiError),

    /// A product came back without any variant.
    ///
    /// The card projection requires at least one variant; a product
    /// without one is malformed catalog data and is rejected loudly.
    #[error("Product {0} has no variants")]
    MissingVariant(String),

    /// Response body could not be decoded into the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),
}

// =============================================================================
// Cart Errors
// =============================================================================

/// Cart mutation errors.
///
/// These never surface as page failures: the submission control leaves
/// error display to the remote mutation's own response handling.
#[derive(Debug, Error)]
pub enum CartError {
    /// Remote API call failed.
    #[error("Storefront API error: {0}")]
    Api(#[from] ApiError),

    /// The mutation was executed but the platform rejected the lines.
    #[error("Cart mutation rejected: {0}")]
    Rejected(String),

    /// A lines-add submission carried no line items.
    #[error("No line items to add")]
    EmptyLines,
}

// =============================================================================
// Storefront Errors
// =============================================================================

/// Top-level storefront errors.
///
/// This is the main error type crossing the web layer boundary. It wraps
/// all lower-level errors and adds configuration variants.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Catalog read error (critical data path).
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Cart mutation error.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for Storefront API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Result type for cart operations.
pub type CartResult<T> = Result<T, CartError>;

/// Result type for top-level storefront operations.
pub type StorefrontResult<T> = Result<T, StorefrontError>;

#[cfg(test)]
mod tests {
    use super::*;

    // Test critique: la chaîne de conversion d'erreurs fonctionne
    // Permet d'utiliser ? à travers les couches
    #[test]
    fn test_error_conversion_chain() {
        // Api -> Catalog -> Storefront
        let api_err = ApiError::Transport("connection refused".into());
        let catalog_err: CatalogError = api_err.into();
        let storefront_err: StorefrontError = catalog_err.into();

        // Le message original est préservé
        assert!(storefront_err.to_string().contains("connection refused"));

        // Api -> Cart -> Storefront
        let cart_err: CartError = ApiError::Status(429).into();
        let storefront_err: StorefrontError = cart_err.into();
        assert!(storefront_err.to_string().contains("429"));
    }

    // Test critique: MissingVariant identifie le produit fautif
    #[test]
    fn test_missing_variant_includes_product_id() {
        let err = CatalogError::MissingVariant("gid://shop/Product/42".into());
        assert!(err.to_string().contains("gid://shop/Product/42"));
    }
}
