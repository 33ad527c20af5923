//! Unified error type for the QR-code library.
//!
//! Enrichment composes the record store, the product catalog, and the image
//! encoder; any of them can fail. Callers map `QrCodeError` onto their own
//! HTTP or UI layer. Absent records are `Ok(None)`, never an error, and form
//! validation failures are plain values (`ValidationErrors`), never `Err`.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::qr_image::ImageError;
use crate::shopify::CatalogError;

/// Errors surfaced by [`crate::QrCodeService`] operations.
#[derive(Debug, Error)]
pub enum QrCodeError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Product catalog query failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// QR image encoding failed.
    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    /// The blocking image-encode task was cancelled or panicked.
    #[error("Image task failed: {0}")]
    ImageTask(#[from] tokio::task::JoinError),
}

/// Result type alias for `QrCodeError`.
pub type Result<T> = std::result::Result<T, QrCodeError>;
