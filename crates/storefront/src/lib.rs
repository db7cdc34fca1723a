//! Storefront API adapter for Vitrine.
//!
//! Implements the `vitrine-core` catalog and cart ports against the
//! hosted platform's Storefront GraphQL API over HTTPS. Queries are
//! fixed text with typed serde responses; the adapter forwards
//! pagination variables and cart lines unmodified and owns nothing but
//! transport and decoding.

mod client;
mod queries;

pub use client::{StorefrontClient, StorefrontConfig};
