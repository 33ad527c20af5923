//! QR-code lookup and enrichment.
//!
//! Read paths fetch base records and supplement each one with live product
//! data and a rendered image. Enrichment of a batch is an ordered
//! scatter-gather: items run concurrently, results come back in store order.

use futures::future::try_join_all;
use sqlx::PgPool;
use tracing::instrument;

use merchant_qr_core::QrCodeId;

use crate::db::QrCodeRepository;
use crate::error::Result;
use crate::models::{EnrichedQrCode, QrCode};
use crate::qr_image;
use crate::shopify::ProductCatalog;

/// Lookup and enrichment operations over QR-code records.
///
/// Generic over the product catalog so request handlers use the live
/// [`crate::shopify::AdminClient`] and tests substitute a fake.
pub struct QrCodeService<C> {
    pool: PgPool,
    catalog: C,
    app_base_url: String,
}

impl<C: ProductCatalog> QrCodeService<C> {
    /// Create a new service.
    pub const fn new(pool: PgPool, catalog: C, app_base_url: String) -> Self {
        Self {
            pool,
            catalog,
            app_base_url,
        }
    }

    /// Fetch one record by id, enriched. Unknown ids are `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `QrCodeError` if the store, catalog, or image encoder fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_qr_code(&self, id: QrCodeId) -> Result<Option<EnrichedQrCode>> {
        let repo = QrCodeRepository::new(&self.pool);

        match repo.find_by_id(id).await? {
            Some(qr) => {
                let enriched =
                    supplement_qr_code(&self.catalog, &self.app_base_url, qr).await?;
                Ok(Some(enriched))
            }
            None => Ok(None),
        }
    }

    /// Fetch all records for a shop, newest id first, each enriched.
    ///
    /// Enrichment runs concurrently per record; the result preserves store
    /// order regardless of completion order. Any single failure fails the
    /// whole batch.
    ///
    /// # Errors
    ///
    /// Returns `QrCodeError` if the store, catalog, or image encoder fails.
    #[instrument(skip(self), fields(shop = %shop))]
    pub async fn get_qr_codes(&self, shop: &str) -> Result<Vec<EnrichedQrCode>> {
        let repo = QrCodeRepository::new(&self.pool);

        let records = repo.list_for_shop(shop).await?;
        if records.is_empty() {
            return Ok(Vec::new());
        }

        supplement_all(&self.catalog, &self.app_base_url, records).await
    }

    /// Count a scan and return the destination URL to redirect to.
    ///
    /// Unknown ids are `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `QrCodeError` if the store fails.
    ///
    /// # Panics
    ///
    /// Panics on a cart record whose variant id is malformed, as
    /// [`QrCode::destination_url`] does.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn record_scan(&self, id: QrCodeId) -> Result<Option<String>> {
        let repo = QrCodeRepository::new(&self.pool);

        let Some(qr) = repo.find_by_id(id).await? else {
            return Ok(None);
        };
        repo.increment_scan_count(id).await?;

        Ok(Some(qr.destination_url()))
    }
}

/// Enrich every record concurrently, preserving input order.
async fn supplement_all<C: ProductCatalog>(
    catalog: &C,
    app_base_url: &str,
    records: Vec<QrCode>,
) -> Result<Vec<EnrichedQrCode>> {
    try_join_all(
        records
            .into_iter()
            .map(|qr| supplement_qr_code(catalog, app_base_url, qr)),
    )
    .await
}

/// Enrich one record with catalog data, a rendered image, and its
/// destination URL.
///
/// Image encoding is CPU work and independent of product data, so it runs on
/// the blocking pool concurrently with the catalog query; both are joined
/// before returning. Catalog failures propagate unchanged.
async fn supplement_qr_code<C: ProductCatalog>(
    catalog: &C,
    app_base_url: &str,
    qr: QrCode,
) -> Result<EnrichedQrCode> {
    let image_task = {
        let base_url = app_base_url.to_string();
        let id = qr.id;
        tokio::task::spawn_blocking(move || qr_image::qr_image_data_url(&base_url, id))
    };

    let (image_result, product_result) =
        tokio::join!(image_task, catalog.product_summary(&qr.product_id));

    let image = image_result??;
    let product = product_result?;

    let destination_url = qr.destination_url();

    Ok(EnrichedQrCode {
        product_deleted: product.is_none(),
        product_title: product.as_ref().map(|p| p.title.clone()),
        product_image: product.as_ref().and_then(|p| p.image_url.clone()),
        product_alt: product.and_then(|p| p.image_alt),
        destination_url,
        image,
        qr_code: qr,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use chrono::Utc;

    use merchant_qr_core::Destination;

    use crate::error::QrCodeError;
    use crate::shopify::{CatalogError, ProductSummary};

    use super::*;

    /// In-memory catalog: known products resolve after an optional delay,
    /// the `FAIL_ID` product errors, everything else is deleted.
    struct FakeCatalog {
        products: HashMap<String, ProductSummary>,
        delays_ms: HashMap<String, u64>,
    }

    const FAIL_ID: &str = "gid://shopify/Product/boom";

    impl FakeCatalog {
        fn new() -> Self {
            Self {
                products: HashMap::new(),
                delays_ms: HashMap::new(),
            }
        }

        fn with_product(mut self, id: &str, title: &str) -> Self {
            self.products.insert(
                id.to_string(),
                ProductSummary {
                    title: title.to_string(),
                    image_url: Some(format!("https://cdn.example/{title}.jpg")),
                    image_alt: Some(title.to_string()),
                },
            );
            self
        }

        fn with_delay(mut self, id: &str, ms: u64) -> Self {
            self.delays_ms.insert(id.to_string(), ms);
            self
        }
    }

    impl ProductCatalog for FakeCatalog {
        async fn product_summary(
            &self,
            product_id: &str,
        ) -> std::result::Result<Option<ProductSummary>, CatalogError> {
            if let Some(ms) = self.delays_ms.get(product_id) {
                tokio::time::sleep(Duration::from_millis(*ms)).await;
            }
            if product_id == FAIL_ID {
                return Err(CatalogError::GraphQL(vec![]));
            }
            Ok(self.products.get(product_id).cloned())
        }
    }

    fn record(id: i64, product_id: &str) -> QrCode {
        QrCode {
            id: QrCodeId::new(id),
            shop: "test-store.myshopify.com".to_string(),
            title: format!("Code {id}"),
            product_id: product_id.to_string(),
            product_handle: "linen-shirt".to_string(),
            product_variant_id: "gid://shopify/ProductVariant/42".to_string(),
            destination: Destination::Product,
            scans: 0,
            created_at: Utc::now(),
        }
    }

    const BASE_URL: &str = "https://qr.example.com";

    #[tokio::test]
    async fn test_supplement_includes_product_and_image() {
        let catalog = FakeCatalog::new().with_product("gid://shopify/Product/1", "Linen Shirt");

        let enriched = supplement_qr_code(&catalog, BASE_URL, record(5, "gid://shopify/Product/1"))
            .await
            .unwrap();

        assert!(!enriched.product_deleted);
        assert_eq!(enriched.product_title.as_deref(), Some("Linen Shirt"));
        assert!(enriched.product_image.is_some());
        assert!(enriched.image.starts_with("data:image/png;base64,"));
        assert_eq!(
            enriched.destination_url,
            "https://test-store.myshopify.com/products/linen-shirt"
        );
    }

    #[tokio::test]
    async fn test_supplement_marks_deleted_product() {
        let catalog = FakeCatalog::new();

        let enriched = supplement_qr_code(&catalog, BASE_URL, record(5, "gid://shopify/Product/9"))
            .await
            .unwrap();

        assert!(enriched.product_deleted);
        assert!(enriched.product_title.is_none());
        assert!(enriched.product_image.is_none());
        assert!(enriched.product_alt.is_none());
    }

    #[tokio::test]
    async fn test_supplement_propagates_catalog_failure() {
        let catalog = FakeCatalog::new();

        let result = supplement_qr_code(&catalog, BASE_URL, record(5, FAIL_ID)).await;

        assert!(matches!(result, Err(QrCodeError::Catalog(_))));
    }

    #[tokio::test]
    async fn test_batch_preserves_order_despite_completion_timing() {
        // Newest record resolves slowest; order must still match the input.
        let catalog = FakeCatalog::new()
            .with_product("gid://shopify/Product/1", "First")
            .with_product("gid://shopify/Product/2", "Second")
            .with_product("gid://shopify/Product/3", "Third")
            .with_delay("gid://shopify/Product/3", 50)
            .with_delay("gid://shopify/Product/2", 20);

        let records = vec![
            record(3, "gid://shopify/Product/3"),
            record(2, "gid://shopify/Product/2"),
            record(1, "gid://shopify/Product/1"),
        ];

        let enriched = supplement_all(&catalog, BASE_URL, records).await.unwrap();

        let ids: Vec<i64> = enriched.iter().map(|e| e.qr_code.id.as_i64()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_batch_fails_when_one_item_fails() {
        let catalog = FakeCatalog::new().with_product("gid://shopify/Product/1", "First");

        let records = vec![
            record(2, FAIL_ID),
            record(1, "gid://shopify/Product/1"),
        ];

        let result = supplement_all(&catalog, BASE_URL, records).await;

        assert!(matches!(result, Err(QrCodeError::Catalog(_))));
    }
}
