//! Paginated product listing page.

use axum::extract::{RawQuery, State};
use axum::response::Html;
use tracing::instrument;

use crate::components;
use crate::routes::PageError;
use crate::server::AppState;

/// `GET /products` - one page of the product listing.
///
/// The deferred data task is detached before this handler returns: the
/// page is sent as soon as critical data resolved, and the deferred
/// result is discarded when it arrives (nothing renders below the fold
/// yet). If the client aborts, the dropped future abandons the load.
#[instrument(skip_all)]
pub async fn products_page(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, PageError> {
    let variables = state.listing.pagination_variables(query.as_deref());
    let page = state.listing.load(variables).await?;

    page.deferred.detach();

    let page_by = state.listing.page_by() as usize;
    Ok(Html(components::listing_page(&page.products, page_by)))
}
