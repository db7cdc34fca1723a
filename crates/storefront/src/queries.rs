//! GraphQL operation texts and wire types for the Storefront API.
//!
//! The query field sets are fixed: the catalog listing requests exactly
//! the product card fragment the domain layer projects from.

use serde::{Deserialize, Serialize};

use vitrine_core::error::{ApiError, ApiResult, CartError, CartResult};
use vitrine_core::ports::{Connection, RawProduct};

// =============================================================================
// Operation texts
// =============================================================================

/// Paginated product listing query.
pub const ALL_PRODUCTS_QUERY: &str = r#"
fragment MoneyProductItem on MoneyV2 {
  amount
  currencyCode
}
fragment ProductCard on Product {
  id
  title
  publishedAt
  handle
  vendor
  priceRange {
    minVariantPrice {
      ...MoneyProductItem
    }
    maxVariantPrice {
      ...MoneyProductItem
    }
  }
  featuredImage {
    id
    altText
    url
    width
    height
  }
  variants(first: 1) {
    nodes {
      id
      image {
        url
        altText
        width
        height
      }
      price {
        amount
        currencyCode
      }
      compareAtPrice {
        amount
        currencyCode
      }
      selectedOptions {
        name
        value
      }
      product {
        handle
        title
      }
    }
  }
}
query AllProducts(
  $first: Int
  $last: Int
  $startCursor: String
  $endCursor: String
) {
  products(first: $first, last: $last, before: $startCursor, after: $endCursor) {
    nodes {
      ...ProductCard
    }
    pageInfo {
      hasPreviousPage
      hasNextPage
      startCursor
      endCursor
    }
  }
}
"#;

/// Add lines to an existing cart.
pub const CART_LINES_ADD_MUTATION: &str = r#"
mutation CartLinesAdd($cartId: ID!, $lines: [CartLineInput!]!) {
  cartLinesAdd(cartId: $cartId, lines: $lines) {
    cart {
      id
    }
    userErrors {
      field
      message
    }
  }
}
"#;

/// Create a cart seeded with the given lines.
pub const CART_CREATE_MUTATION: &str = r#"
mutation CartCreate($lines: [CartLineInput!]!) {
  cartCreate(input: {lines: $lines}) {
    cart {
      id
    }
    userErrors {
      field
      message
    }
  }
}
"#;

// =============================================================================
// Request/response envelope
// =============================================================================

/// Body of one GraphQL POST.
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

/// Standard GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// One entry of the GraphQL `errors` array.
#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

impl<T> GraphQlResponse<T> {
    /// Collapse the envelope into data or an [`ApiError`].
    pub fn into_result(self) -> ApiResult<T> {
        if !self.errors.is_empty() {
            let messages: Vec<_> = self.errors.into_iter().map(|e| e.message).collect();
            return Err(ApiError::GraphQl(messages.join("; ")));
        }
        self.data.ok_or(ApiError::MissingData)
    }
}

// =============================================================================
// Operation payloads
// =============================================================================

/// `data` shape of the `AllProducts` query.
#[derive(Debug, Deserialize)]
pub struct AllProductsData {
    pub products: Connection<RawProduct>,
}

/// `data` shape of the `CartLinesAdd` mutation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLinesAddData {
    pub cart_lines_add: CartMutationPayload,
}

/// `data` shape of the `CartCreate` mutation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCreateData {
    pub cart_create: CartMutationPayload,
}

/// Shared payload of cart mutations: the touched cart plus platform-side
/// validation errors.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMutationPayload {
    pub cart: Option<CartRef>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

/// Reference to the remote cart.
#[derive(Debug, Deserialize)]
pub struct CartRef {
    pub id: String,
}

/// Platform-side validation error of a cart mutation.
#[derive(Debug, Deserialize)]
pub struct UserError {
    pub field: Option<Vec<String>>,
    pub message: String,
}

impl CartMutationPayload {
    /// Collapse the payload into the cart id or a [`CartError`].
    pub fn into_result(self) -> CartResult<String> {
        if !self.user_errors.is_empty() {
            let messages: Vec<_> = self.user_errors.into_iter().map(|e| e.message).collect();
            return Err(CartError::Rejected(messages.join("; ")));
        }
        match self.cart {
            Some(cart) => Ok(cart.id),
            None => Err(ApiError::MissingData.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PRODUCTS_FIXTURE: &str = r#"{
      "data": {
        "products": {
          "nodes": [
            {
              "id": "gid://shop/Product/1",
              "title": "Tote Bag",
              "publishedAt": "2024-05-01T10:00:00Z",
              "handle": "tote-bag",
              "vendor": "Vitrine",
              "priceRange": {
                "minVariantPrice": {"amount": "19.9", "currencyCode": "EUR"},
                "maxVariantPrice": {"amount": "24.9", "currencyCode": "EUR"}
              },
              "featuredImage": {
                "id": "gid://shop/Image/1",
                "altText": "A tote bag",
                "url": "https://cdn.example/tote.jpg",
                "width": 800,
                "height": 800
              },
              "variants": {
                "nodes": [
                  {
                    "id": "gid://shop/ProductVariant/11",
                    "image": null,
                    "price": {"amount": "19.9", "currencyCode": "EUR"},
                    "compareAtPrice": null,
                    "selectedOptions": [{"name": "Color", "value": "Natural"}],
                    "product": {"handle": "tote-bag", "title": "Tote Bag"}
                  }
                ]
              }
            },
            {
              "id": "gid://shop/Product/2",
              "title": "Mug",
              "publishedAt": null,
              "handle": "mug",
              "vendor": "Vitrine",
              "priceRange": {
                "minVariantPrice": {"amount": "9.0", "currencyCode": "EUR"},
                "maxVariantPrice": {"amount": "9.0", "currencyCode": "EUR"}
              },
              "featuredImage": null,
              "variants": {
                "nodes": [
                  {
                    "id": "gid://shop/ProductVariant/21",
                    "image": null,
                    "price": {"amount": "9.0", "currencyCode": "EUR"},
                    "compareAtPrice": null,
                    "selectedOptions": [{"name": "Title", "value": "Default Title"}],
                    "product": {"handle": "mug", "title": "Mug"}
                  }
                ]
              }
            }
          ],
          "pageInfo": {
            "hasPreviousPage": false,
            "hasNextPage": true,
            "startCursor": "c1",
            "endCursor": "c2"
          }
        }
      }
    }"#;

    #[test]
    fn test_all_products_fixture_decodes() {
        let envelope: GraphQlResponse<AllProductsData> =
            serde_json::from_str(ALL_PRODUCTS_FIXTURE).unwrap();
        let data = envelope.into_result().unwrap();

        assert_eq!(data.products.nodes.len(), 2);
        assert!(data.products.page_info.has_next_page);
        assert_eq!(data.products.page_info.end_cursor.as_deref(), Some("c2"));

        let first = &data.products.nodes[0];
        assert_eq!(first.variants.nodes[0].id, "gid://shop/ProductVariant/11");
        assert_eq!(first.price_range.min_variant_price.amount, "19.9");

        // Un produit sans image reste décodable
        assert!(data.products.nodes[1].featured_image.is_none());
    }

    #[test]
    fn test_envelope_surfaces_graphql_errors() {
        let body = r#"{"data": null, "errors": [{"message": "Field 'foo' doesn't exist"}]}"#;
        let envelope: GraphQlResponse<AllProductsData> = serde_json::from_str(body).unwrap();

        let err = envelope.into_result().unwrap_err();
        assert!(matches!(err, ApiError::GraphQl(msg) if msg.contains("foo")));
    }

    #[test]
    fn test_envelope_without_data_or_errors_is_missing_data() {
        let envelope: GraphQlResponse<AllProductsData> =
            serde_json::from_str(r#"{"data": null}"#).unwrap();
        assert!(matches!(envelope.into_result(), Err(ApiError::MissingData)));
    }

    #[test]
    fn test_cart_payload_user_errors_become_rejections() {
        let body = r#"{
          "cart": null,
          "userErrors": [
            {"field": ["lines", "0", "merchandiseId"], "message": "Merchandise not found"}
          ]
        }"#;
        let payload: CartMutationPayload = serde_json::from_str(body).unwrap();

        let err = payload.into_result().unwrap_err();
        assert!(matches!(err, CartError::Rejected(msg) if msg.contains("Merchandise not found")));
    }

    #[test]
    fn test_cart_payload_returns_cart_id() {
        let body = r#"{"cart": {"id": "gid://shop/Cart/99"}, "userErrors": []}"#;
        let payload: CartMutationPayload = serde_json::from_str(body).unwrap();
        assert_eq!(payload.into_result().unwrap(), "gid://shop/Cart/99");
    }

    // Garde-fou: le texte de la requête embarque bien le jeu de champs attendu
    #[test]
    fn test_all_products_query_requests_card_fields() {
        for field in [
            "publishedAt",
            "vendor",
            "priceRange",
            "featuredImage",
            "variants(first: 1)",
            "selectedOptions",
            "compareAtPrice",
            "pageInfo",
        ] {
            assert!(
                ALL_PRODUCTS_QUERY.contains(field),
                "missing field {field} in AllProducts"
            );
        }
    }
}
