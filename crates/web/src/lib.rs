//! HTTP front-end for Vitrine.
//!
//! Serves the server-rendered storefront pages: the paginated product
//! listing and the cart form action, plus a health endpoint.
//!
//! # Building the app
//!
//! ```ignore
//! use vitrine_web::{serve_with_shutdown, AppState, ServerConfig};
//!
//! let state = AppState::new(listing_service, cart_service);
//! serve_with_shutdown(state, ServerConfig::default(), shutdown_signal).await?;
//! ```

pub mod components;
mod routes;
mod server;

pub use server::{serve, serve_with_shutdown, AppState, ServerConfig};
