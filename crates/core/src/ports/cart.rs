//! Port trait for the remote cart.
//!
//! The cart is entirely owned by the hosted platform: this side never
//! mutates local cart state, never applies optimistic updates, and never
//! interprets the mutation response beyond surfacing errors.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CartResult;
use crate::models::CartLineInput;

/// Input of one lines-add submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLinesAddInput {
    /// Existing cart to add to; a new cart is created when absent.
    #[serde(default)]
    pub cart_id: Option<String>,
    /// Line items to add.
    pub lines: Vec<CartLineInput>,
}

/// Port trait for cart mutations.
#[async_trait]
pub trait CartService: Send + Sync {
    /// Add line items to the remote cart.
    ///
    /// Returns the id of the cart the lines landed in.
    async fn lines_add(&self, input: CartLinesAddInput) -> CartResult<String>;
}
