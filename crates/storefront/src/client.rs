//! Storefront API HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, trace};

use vitrine_core::error::{ApiError, ApiResult, CartResult, CatalogResult};
use vitrine_core::ports::{
    CartLinesAddInput, CartService, CatalogSource, Connection, PaginationVariables, RawProduct,
};

use crate::queries::{
    AllProductsData, CartCreateData, CartLinesAddData, GraphQlRequest, GraphQlResponse,
    ALL_PRODUCTS_QUERY, CART_CREATE_MUTATION, CART_LINES_ADD_MUTATION,
};

/// Header carrying the public storefront access token.
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

/// Configuration for the Storefront API client.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Shop domain (e.g., "demo.myshopify.com").
    pub shop_domain: String,
    /// Storefront API version (e.g., "2024-10").
    pub api_version: String,
    /// Public storefront access token.
    pub access_token: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            shop_domain: "demo.myshopify.com".to_string(),
            api_version: "2024-10".to_string(),
            access_token: String::new(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl StorefrontConfig {
    /// GraphQL endpoint URL for this shop.
    pub fn endpoint(&self) -> String {
        format!(
            "https://{}/api/{}/graphql.json",
            self.shop_domain, self.api_version
        )
    }
}

/// Storefront API adapter implementing the catalog and cart ports.
pub struct StorefrontClient {
    http: reqwest::Client,
    endpoint: String,
    access_token: String,
}

impl StorefrontClient {
    /// Build a client for the configured shop.
    pub fn new(config: StorefrontConfig) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        debug!(endpoint = %config.endpoint(), "Storefront client ready");

        Ok(Self {
            http,
            endpoint: config.endpoint(),
            access_token: config.access_token,
        })
    }

    /// Execute one GraphQL operation and decode its `data`.
    async fn execute<V, T>(&self, query: &'static str, variables: V) -> ApiResult<T>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(&self.endpoint)
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        let envelope: GraphQlResponse<T> = response
            .json()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        envelope.into_result()
    }
}

#[async_trait]
impl CatalogSource for StorefrontClient {
    #[instrument(skip_all)]
    async fn all_products(
        &self,
        variables: PaginationVariables,
    ) -> CatalogResult<Connection<RawProduct>> {
        trace!(?variables, "Querying product listing");

        let data: AllProductsData = self.execute(ALL_PRODUCTS_QUERY, variables).await?;

        debug!(nodes = data.products.nodes.len(), "Product listing fetched");
        Ok(data.products)
    }
}

#[async_trait]
impl CartService for StorefrontClient {
    #[instrument(skip_all, fields(lines = input.lines.len()))]
    async fn lines_add(&self, input: CartLinesAddInput) -> CartResult<String> {
        // An existing cart gets the lines appended; otherwise the
        // platform creates a cart seeded with them.
        let payload = match &input.cart_id {
            Some(cart_id) => {
                let variables = serde_json::json!({
                    "cartId": cart_id,
                    "lines": input.lines,
                });
                let data: CartLinesAddData =
                    self.execute(CART_LINES_ADD_MUTATION, variables).await?;
                data.cart_lines_add
            }
            None => {
                let variables = serde_json::json!({ "lines": input.lines });
                let data: CartCreateData = self.execute(CART_CREATE_MUTATION, variables).await?;
                data.cart_create
            }
        };

        payload.into_result()
    }
}
