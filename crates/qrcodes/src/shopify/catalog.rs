//! Shopify Admin API client implementation.
//!
//! Posts GraphQL documents with `reqwest` 0.13 and parses responses through
//! `graphql_client::Response`.

use std::sync::Arc;

use graphql_client::Response;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::instrument;

use crate::config::ShopifyAdminConfig;

use super::{CatalogError, ProductCatalog, ProductSummary};

const PRODUCT_SUMMARY_QUERY: &str = r"
query productSummary($id: ID!) {
  product(id: $id) {
    title
    images(first: 1) {
      nodes {
        url
        altText
      }
    }
  }
}";

/// Client for the Shopify Admin GraphQL API.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
}

impl AdminClient {
    /// Create a new Admin API client.
    #[must_use]
    pub fn new(config: &ShopifyAdminConfig) -> Self {
        let endpoint = format!(
            "https://{}/admin/api/{}/graphql.json",
            config.store, config.api_version
        );

        Self {
            inner: Arc::new(AdminClientInner {
                client: reqwest::Client::new(),
                endpoint,
                access_token: config.admin_token.expose_secret().to_string(),
            }),
        }
    }

    /// Execute a GraphQL query.
    async fn execute<D: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<D, CatalogError> {
        let request_body = json!({
            "query": query,
            "variables": variables,
        });

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .header("X-Shopify-Access-Token", &self.inner.access_token)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CatalogError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Shopify API returned non-success status"
            );
            return Err(CatalogError::GraphQL(vec![super::GraphQLError {
                message: format!(
                    "HTTP {status}: {}",
                    response_text.chars().take(200).collect::<String>()
                ),
                locations: vec![],
                path: vec![],
            }]));
        }

        let response: Response<D> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse Shopify GraphQL response"
                );
                return Err(CatalogError::Parse(e));
            }
        };

        // Check for GraphQL errors
        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            tracing::debug!(errors = ?errors, "GraphQL errors in response");

            return Err(CatalogError::GraphQL(
                errors
                    .into_iter()
                    .map(|e| super::GraphQLError {
                        message: e.message,
                        locations: e.locations.map_or_else(Vec::new, |locs| {
                            locs.into_iter()
                                .map(|l| super::GraphQLErrorLocation {
                                    line: i64::from(l.line),
                                    column: i64::from(l.column),
                                })
                                .collect()
                        }),
                        path: e.path.map_or_else(Vec::new, |p| {
                            p.into_iter()
                                .map(|fragment| match fragment {
                                    graphql_client::PathFragment::Key(s) => {
                                        serde_json::Value::String(s)
                                    }
                                    graphql_client::PathFragment::Index(i) => {
                                        serde_json::Value::Number(i.into())
                                    }
                                })
                                .collect()
                        }),
                    })
                    .collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                body = %response_text.chars().take(500).collect::<String>(),
                "Shopify GraphQL response has no data and no errors"
            );
            CatalogError::GraphQL(vec![super::GraphQLError {
                message: "No data in response".to_string(),
                locations: vec![],
                path: vec![],
            }])
        })
    }
}

impl ProductCatalog for AdminClient {
    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn product_summary(
        &self,
        product_id: &str,
    ) -> Result<Option<ProductSummary>, CatalogError> {
        let data: ProductSummaryData = self
            .execute(PRODUCT_SUMMARY_QUERY, json!({ "id": product_id }))
            .await?;

        Ok(data.into_summary())
    }
}

// =============================================================================
// Response shapes
// =============================================================================

#[derive(Debug, Deserialize)]
struct ProductSummaryData {
    product: Option<ProductNode>,
}

#[derive(Debug, Deserialize)]
struct ProductNode {
    title: Option<String>,
    images: Option<ImageConnection>,
}

#[derive(Debug, Deserialize)]
struct ImageConnection {
    #[serde(default)]
    nodes: Vec<ImageNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageNode {
    url: Option<String>,
    alt_text: Option<String>,
}

impl ProductSummaryData {
    /// A product with no title counts as deleted.
    fn into_summary(self) -> Option<ProductSummary> {
        let product = self.product?;
        let title = product.title?;

        let first_image = product
            .images
            .and_then(|images| images.nodes.into_iter().next());
        let (image_url, image_alt) = first_image
            .map_or((None, None), |image| (image.url, image.alt_text));

        Some(ProductSummary {
            title,
            image_url,
            image_alt,
        })
    }
}
