//! HTTP route handlers.

mod cart;
mod listing;

pub use cart::cart_action;
pub use listing::products_page;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use vitrine_core::error::StorefrontError;

/// Page-level failure of a critical data load.
///
/// The catalog query is the one query whose failure is fatal to the
/// response: it surfaces as a bad-gateway page, never a partial render.
pub struct PageError(StorefrontError);

impl From<StorefrontError> for PageError {
    fn from(err: StorefrontError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "Critical page data failed to load");
        (
            StatusCode::BAD_GATEWAY,
            "The product listing is unavailable right now.",
        )
            .into_response()
    }
}
