//! Core domain layer for the Vitrine storefront.
//!
//! This crate contains the domain models, port traits (interfaces), and
//! business logic services for the headless storefront front-end. It follows
//! hexagonal architecture principles - this is the innermost layer with
//! no dependencies on infrastructure.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     vitrine (binary)                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │        vitrine-web         │      vitrine-storefront        │
//! │    (HTTP pages, forms)     │   (Storefront GraphQL API)     │
//! ├────────────────────────────┴────────────────────────────────┤
//! │                     vitrine-core  ← YOU ARE HERE            │
//! │               (models, ports, services)                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`models`] - Domain models (ProductCard, Money, CartLineInput, etc.)
//! - [`ports`] - Interface traits for adapters to implement
//! - [`services`] - Core business logic (ListingService, SubmissionBoundary)
//! - [`error`] - Domain error types
//! - [`metrics`] - Prometheus metrics definitions
//!
//! # Key Concepts
//!
//! ## Ports
//!
//! Ports define interfaces that external adapters must implement:
//!
//! - [`ports::CatalogSource`] - Read product listings from the remote catalog
//! - [`ports::CartService`] - Submit cart mutations to the remote cart
//!
//! ## Critical vs deferred data
//!
//! A listing page load is split into two asymmetric tasks. The critical
//! catalog query is awaited and its failure fails the whole page. The
//! deferred task (below-the-fold data) is started before the critical query
//! is awaited and any failure inside it is neutralized to an empty result,
//! so it can never fail the page.
//!
//! ## Submission boundary
//!
//! Cart mutations go through a [`services::SubmissionBoundary`] which owns a
//! tri-state status (`Idle` / `Submitting` / `Loading`) published through a
//! watch channel. UI controls only ever read the status; the boundary is the
//! single writer.

pub mod error;
pub mod metrics;
pub mod models;
pub mod ports;
pub mod services;
