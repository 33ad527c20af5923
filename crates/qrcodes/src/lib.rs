//! Merchant QR - QR-code records for a Shopify storefront.
//!
//! This library is the data-access and presentation layer for QR codes that
//! merchants attach to products: look up records, enrich them with live
//! product data from the Shopify Admin API, render scannable PNG images, and
//! validate create/update form input. It is consumed by an enclosing web
//! application's request handlers and exposes no routes of its own.
//!
//! # Architecture
//!
//! - `PostgreSQL` via `sqlx` for QR-code records (Shopify is source of truth
//!   for product data - no local product sync)
//! - Shopify Admin GraphQL API via `reqwest` for product title and image
//! - `qrcode` + `image` for PNG encoding, returned as base64 data URLs
//!
//! # Example
//!
//! ```rust,ignore
//! use merchant_qr::{AppConfig, QrCodeService, shopify::AdminClient};
//!
//! let config = AppConfig::from_env()?;
//! let pool = merchant_qr::db::create_pool(&config.database_url).await?;
//! let catalog = AdminClient::new(&config.shopify);
//! let service = QrCodeService::new(pool, catalog, config.app_base_url.clone());
//!
//! // Look up one enriched record; unknown ids are Ok(None)
//! let qr = service.get_qr_code(id).await?;
//!
//! // All records for a shop, newest first
//! let all = service.get_qr_codes("my-store.myshopify.com").await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod qr_image;
pub mod service;
pub mod shopify;

pub use config::AppConfig;
pub use error::QrCodeError;
pub use models::{EnrichedQrCode, QrCode, QrCodeForm, QrCodeInput, ValidationErrors};
pub use service::QrCodeService;
