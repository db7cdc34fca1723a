//! Cart form action.

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use vitrine_core::models::CartAction;
use vitrine_core::ports::CartLinesAddInput;
use vitrine_core::services::SubmissionBoundary;

use crate::server::AppState;

/// Form body of a cart submission.
///
/// The cart form serializes its action and inputs into one JSON field;
/// the analytics payload rides alongside as an opaque side channel.
#[derive(Debug, Deserialize)]
pub struct CartFormBody {
    #[serde(rename = "cartFormInput")]
    cart_form_input: String,
    #[serde(default)]
    analytics: Option<String>,
}

/// Decoded `cartFormInput` field.
#[derive(Debug, Deserialize)]
struct CartFormInput {
    action: CartAction,
    inputs: CartLinesAddInput,
}

/// `POST /cart` - dispatch a cart form submission to the remote cart.
///
/// Mutation errors are not displayed here: response handling belongs to
/// the remote collaborator, so the handler logs and redirects back to
/// the listing either way.
#[instrument(skip_all)]
pub async fn cart_action(State(state): State<AppState>, Form(body): Form<CartFormBody>) -> Response {
    let input: CartFormInput = match serde_json::from_str(&body.cart_form_input) {
        Ok(input) => input,
        Err(e) => {
            warn!(error = %e, "Malformed cart form input");
            return (StatusCode::BAD_REQUEST, "Malformed cart form").into_response();
        }
    };

    if let Some(analytics) = &body.analytics {
        // Opaque payload for downstream tracking; never interpreted here.
        debug!(analytics = %analytics, "Cart submission analytics");
    }

    // One boundary per submission; status is never shared across requests.
    let boundary = SubmissionBoundary::new(state.cart.clone());

    match input.action {
        CartAction::LinesAdd => {
            if let Err(e) = boundary.submit(input.inputs).await {
                warn!(error = %e, "Cart lines-add failed");
            }
        }
    }

    Redirect::to("/products").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_form_input_decodes_lines_add() {
        let raw = r#"{
          "action": "LinesAdd",
          "inputs": {
            "lines": [{"merchandiseId": "gid://shop/ProductVariant/1", "quantity": 2}]
          }
        }"#;

        let input: CartFormInput = serde_json::from_str(raw).unwrap();
        assert_eq!(input.action, CartAction::LinesAdd);
        assert_eq!(input.inputs.lines.len(), 1);
        assert_eq!(input.inputs.lines[0].quantity, 2);
        assert!(input.inputs.cart_id.is_none());
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let raw = r#"{"action": "LinesRemove", "inputs": {"lines": []}}"#;
        assert!(serde_json::from_str::<CartFormInput>(raw).is_err());
    }
}
