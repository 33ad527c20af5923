//! Shopify Admin API product catalog.
//!
//! # Architecture
//!
//! - Shopify is source of truth - NO local sync, direct API calls
//! - Hand-written GraphQL documents posted with `reqwest`; responses parsed
//!   through the `graphql_client` response envelope
//! - Enrichment needs product data fresh on every read, so nothing here is
//!   cached
//!
//! The [`ProductCatalog`] trait is the seam between enrichment and the API:
//! production uses [`AdminClient`], tests substitute an in-memory fake.

mod catalog;

pub use catalog::AdminClient;

use std::future::Future;

use thiserror::Error;

/// Errors that can occur when querying the product catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

/// A GraphQL error returned by the Shopify API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

/// Product title and first image, as needed by enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSummary {
    /// Current product title.
    pub title: String,
    /// URL of the first product image, if any.
    pub image_url: Option<String>,
    /// Alt text of the first product image, if any.
    pub image_alt: Option<String>,
}

/// Query interface returning product title/image by product GID.
pub trait ProductCatalog: Send + Sync {
    /// Fetch the summary for one product.
    ///
    /// `Ok(None)` means the catalog no longer knows the product (deleted);
    /// transport and parse failures are errors.
    fn product_summary(
        &self,
        product_id: &str,
    ) -> impl Future<Output = Result<Option<ProductSummary>, CatalogError>> + Send;
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let mut parts = Vec::new();

            if !e.message.is_empty() {
                parts.push(e.message.clone());
            }

            if !e.path.is_empty() {
                let path_str = e
                    .path
                    .iter()
                    .map(|p| match p {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(".");
                parts.push(format!("path: {path_str}"));
            }

            if let Some(loc) = e.locations.first() {
                parts.push(format!("at line {}:{}", loc.line, loc.column));
            }

            if parts.is_empty() {
                format!("[error {}]: (no details)", i + 1)
            } else {
                parts.join(" ")
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}
