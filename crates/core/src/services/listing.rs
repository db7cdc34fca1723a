//! Listing page loader - orchestrates the critical/deferred data split.
//!
//! A page load runs two asymmetric tasks. The critical catalog query is
//! awaited and its failure fails the whole page. The deferred task is
//! detached before the critical query is awaited; it carries
//! below-the-fold data, and any failure inside it is neutralized to an
//! empty result so it can never fail the page.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

use crate::error::{CatalogResult, StorefrontError, StorefrontResult};
use crate::metrics::{
    record_catalog_query, record_catalog_query_duration, record_deferred_failure,
};
use crate::models::ProductCard;
use crate::ports::{CatalogSource, Connection, PaginationVariables};

// =============================================================================
// Configuration
// =============================================================================

/// Default number of products per listing page.
pub const DEFAULT_PAGE_BY: i32 = 8;

/// Configuration for the listing service.
#[derive(Debug, Clone)]
pub struct ListingConfig {
    /// Products per page.
    pub page_by: i32,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_by: DEFAULT_PAGE_BY,
        }
    }
}

// =============================================================================
// Deferred data
// =============================================================================

/// Below-the-fold data of a listing page.
///
/// Currently empty: a placeholder for future deferred sections. The
/// failure-isolation machinery around it is load-bearing regardless.
#[derive(Debug, Clone, Default)]
pub struct DeferredData {}

/// Handle to an in-flight deferred data task.
///
/// The task is detached from the page load: the loader returns before it
/// resolves, and its result is attached to the rendered page whenever it
/// arrives. Dropping the section without resolving it is fine - the task
/// keeps running and its result is discarded.
pub struct DeferredSection {
    handle: JoinHandle<DeferredData>,
}

impl DeferredSection {
    /// Spawn a deferred data task with failure isolation.
    ///
    /// Any error the future returns is swallowed into an empty
    /// [`DeferredData`]; so is a panic inside the task (surfaced as a
    /// join error in [`resolve`](Self::resolve)).
    pub fn spawn<F>(fut: F) -> Self
    where
        F: Future<Output = CatalogResult<DeferredData>> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            fut.await.unwrap_or_else(|e| {
                record_deferred_failure();
                warn!(error = %e, "Deferred data failed; page renders without it");
                DeferredData::default()
            })
        });

        Self { handle }
    }

    /// Wait for the deferred data. Never fails.
    pub async fn resolve(self) -> DeferredData {
        match self.handle.await {
            Ok(data) => data,
            Err(e) => {
                record_deferred_failure();
                warn!(error = %e, "Deferred task died; page renders without it");
                DeferredData::default()
            }
        }
    }

    /// Let the deferred task finish in the background and discard it.
    pub fn detach(self) {
        tokio::spawn(async move {
            let _ = self.resolve().await;
            debug!("Deferred data resolved after response");
        });
    }
}

// =============================================================================
// ListingService
// =============================================================================

/// One loaded listing page: critical data plus the deferred handle.
pub struct ListingPage {
    /// Product connection for the current page (critical data).
    pub products: Connection<ProductCard>,
    /// Detached below-the-fold data task.
    pub deferred: DeferredSection,
}

/// Loader for the paginated product listing.
///
/// # Flow
///
/// 1. Spawn the deferred data task (non-blocking, failure-isolated)
/// 2. Issue exactly one catalog query with the pagination variables
/// 3. Project each raw node into a [`ProductCard`]
/// 4. Return the connection with page info passed through unmodified
pub struct ListingService {
    config: ListingConfig,
    catalog: Arc<dyn CatalogSource>,
}

impl ListingService {
    pub fn new(config: ListingConfig, catalog: Arc<dyn CatalogSource>) -> Self {
        Self { config, catalog }
    }

    /// Products per page, as configured.
    pub fn page_by(&self) -> i32 {
        self.config.page_by
    }

    /// Derive pagination variables for this listing from a query string.
    pub fn pagination_variables(&self, query: Option<&str>) -> PaginationVariables {
        PaginationVariables::from_query_str(query, self.config.page_by)
    }

    /// Load one listing page.
    ///
    /// The deferred task starts before the critical query is awaited, but
    /// this function returns only once critical data resolved. A critical
    /// failure propagates; a deferred failure never does.
    #[instrument(skip_all, fields(first = ?variables.first, last = ?variables.last))]
    pub async fn load(&self, variables: PaginationVariables) -> StorefrontResult<ListingPage> {
        let deferred = DeferredSection::spawn(Self::load_deferred());

        let started = Instant::now();
        let result = self.catalog.all_products(variables).await;
        record_catalog_query_duration(started.elapsed().as_secs_f64());

        let raw = match result {
            Ok(raw) => {
                record_catalog_query("ok");
                raw
            }
            Err(e) => {
                record_catalog_query("error");
                return Err(StorefrontError::from(e));
            }
        };

        let products = raw
            .try_map(ProductCard::project)
            .map_err(StorefrontError::from)?;

        debug!(nodes = products.nodes.len(), "Listing page loaded");

        Ok(ListingPage { products, deferred })
    }

    /// Load below-the-fold data.
    ///
    /// Currently returns an empty placeholder. Whatever lands here must
    /// keep the contract: errors are fine, they are neutralized by
    /// [`DeferredSection::spawn`] and never fail the page.
    async fn load_deferred() -> CatalogResult<DeferredData> {
        Ok(DeferredData::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;

    use crate::error::{ApiError, CatalogError};
    use crate::models::{Money, ParentProduct, PriceRange, ProductVariant};
    use crate::ports::{PageInfo, RawProduct, RawVariantConnection};

    fn money(amount: &str) -> Money {
        Money {
            amount: amount.into(),
            currency_code: "EUR".into(),
        }
    }

    fn raw_product(n: usize, variants: usize) -> RawProduct {
        RawProduct {
            id: format!("gid://shop/Product/{}", n),
            title: format!("Product {}", n),
            published_at: None,
            handle: format!("product-{}", n),
            vendor: "Vitrine".into(),
            price_range: PriceRange {
                min_variant_price: money("10.00"),
                max_variant_price: money("20.00"),
            },
            featured_image: None,
            variants: RawVariantConnection {
                nodes: (0..variants)
                    .map(|v| ProductVariant {
                        id: format!("gid://shop/ProductVariant/{}-{}", n, v),
                        image: None,
                        price: money("10.00"),
                        compare_at_price: None,
                        selected_options: vec![],
                        product: ParentProduct {
                            handle: format!("product-{}", n),
                            title: format!("Product {}", n),
                        },
                    })
                    .collect(),
            },
        }
    }

    /// In-memory catalog returning a fixed page, or failing on demand.
    struct FixedCatalog {
        page: Option<Connection<RawProduct>>,
    }

    #[async_trait]
    impl CatalogSource for FixedCatalog {
        async fn all_products(
            &self,
            _variables: PaginationVariables,
        ) -> CatalogResult<Connection<RawProduct>> {
            match &self.page {
                Some(page) => Ok(page.clone()),
                None => Err(ApiError::Status(500).into()),
            }
        }
    }

    fn service(page: Option<Connection<RawProduct>>) -> ListingService {
        ListingService::new(ListingConfig::default(), Arc::new(FixedCatalog { page }))
    }

    // Scenario: catalogue de 20 produits, page de 8, pas de curseur
    #[tokio::test]
    async fn test_first_page_of_twenty_products() {
        let page = Connection {
            nodes: (0..8).map(|n| raw_product(n, 1)).collect(),
            page_info: PageInfo {
                has_previous_page: false,
                has_next_page: true,
                start_cursor: Some("c0".into()),
                end_cursor: Some("c7".into()),
            },
        };

        let loaded = service(Some(page)).load(PaginationVariables::forward(8, None)).await.unwrap();

        assert_eq!(loaded.products.nodes.len(), 8);
        assert!(loaded.products.page_info.has_next_page);
        assert!(!loaded.products.page_info.has_previous_page);
        // L'ordre serveur est préservé
        let titles: Vec<_> = loaded.products.nodes.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles[0], "Product 0");
        assert_eq!(titles[7], "Product 7");
    }

    #[tokio::test]
    async fn test_critical_failure_propagates() {
        let result = service(None).load(PaginationVariables::forward(8, None)).await;
        assert!(matches!(
            result,
            Err(StorefrontError::Catalog(CatalogError::Api(ApiError::Status(500))))
        ));
    }

    #[tokio::test]
    async fn test_malformed_product_fails_the_page() {
        let page = Connection {
            nodes: vec![raw_product(0, 1), raw_product(1, 0)],
            page_info: PageInfo::default(),
        };

        let result = service(Some(page)).load(PaginationVariables::forward(8, None)).await;
        assert!(matches!(
            result,
            Err(StorefrontError::Catalog(CatalogError::MissingVariant(_)))
        ));
    }

    #[tokio::test]
    async fn test_deferred_error_is_neutralized() {
        let section = DeferredSection::spawn(async {
            Err(CatalogError::Decode("deferred exploded".into()))
        });

        // resolve() aboutit toujours, même si la tâche a échoué
        let _data = section.resolve().await;
    }

    #[tokio::test]
    async fn test_deferred_panic_is_neutralized() {
        let section = DeferredSection {
            handle: tokio::spawn(async {
                if true {
                    panic!("deferred task panicked");
                }
                DeferredData::default()
            }),
        };

        let _data = section.resolve().await;
    }

    #[tokio::test]
    async fn test_load_succeeds_while_deferred_fails() {
        let page = Connection {
            nodes: vec![raw_product(0, 1)],
            page_info: PageInfo::default(),
        };

        let loaded = service(Some(page)).load(PaginationVariables::forward(8, None)).await.unwrap();
        assert_eq!(loaded.products.nodes.len(), 1);

        // Une section différée défaillante n'affecte pas la page déjà chargée
        let failing = DeferredSection::spawn(async {
            Err(CatalogError::Decode("boom".into()))
        });
        let _data = failing.resolve().await;
    }

    #[test]
    fn test_pagination_variables_use_configured_page_size() {
        let svc = ListingService::new(
            ListingConfig { page_by: 12 },
            Arc::new(FixedCatalog { page: None }),
        );
        let vars = svc.pagination_variables(Some("cursor=abc"));
        assert_eq!(vars.first, Some(12));
        assert_eq!(vars.end_cursor.as_deref(), Some("abc"));
    }
}
