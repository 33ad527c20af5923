//! The persisted QR-code record and its enriched projection.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;

use merchant_qr_core::{Destination, QrCodeId};

/// A persisted QR-code record.
///
/// Base records are created and updated by the enclosing app's form handlers;
/// read paths here only construct the enriched projection on top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    /// Unique record ID.
    pub id: QrCodeId,
    /// Owning shop domain (e.g., my-store.myshopify.com).
    pub shop: String,
    /// Merchant-assigned title.
    pub title: String,
    /// Shopify product GID (e.g., `gid://shopify/Product/123`).
    pub product_id: String,
    /// Product URL handle, used for product destinations.
    pub product_handle: String,
    /// Shopify variant GID (e.g., `gid://shopify/ProductVariant/123`),
    /// used for cart destinations.
    pub product_variant_id: String,
    /// What scanning the code does.
    pub destination: Destination,
    /// How many times the code has been scanned.
    pub scans: i64,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

fn variant_gid_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"gid://shopify/ProductVariant/(\d+)").expect("valid variant GID pattern")
    })
}

impl QrCode {
    /// The storefront URL a scan of this code should resolve to.
    ///
    /// Product destinations link to the product page; cart destinations use a
    /// cart permalink that adds one unit of the variant.
    ///
    /// # Panics
    ///
    /// Panics if the destination is `cart` and `product_variant_id` does not
    /// contain `gid://shopify/ProductVariant/<digits>`. Well-formed variant
    /// ids are guaranteed upstream at record creation; a mismatch here is a
    /// data-integrity bug, not a recoverable condition.
    #[must_use]
    pub fn destination_url(&self) -> String {
        match self.destination {
            Destination::Product => {
                format!("https://{}/products/{}", self.shop, self.product_handle)
            }
            Destination::Cart => {
                let digits = variant_gid_pattern()
                    .captures(&self.product_variant_id)
                    .and_then(|caps| caps.get(1))
                    .unwrap_or_else(|| {
                        panic!("Unrecognized product variant ID: {}", self.product_variant_id)
                    });
                // Quantity is always 1
                format!("https://{}/cart/{}:1", self.shop, digits.as_str())
            }
        }
    }
}

/// A QR-code record enriched with live product data.
///
/// Derived fresh on every read and never persisted; product fields come from
/// the catalog, `image` from the QR encoder, `destination_url` from the
/// record itself.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedQrCode {
    /// The base record, flattened into the projection.
    #[serde(flatten)]
    pub qr_code: QrCode,
    /// True iff the catalog no longer returns a title for the product.
    pub product_deleted: bool,
    /// Current product title, if the product still exists.
    pub product_title: Option<String>,
    /// URL of the product's first image, if any.
    pub product_image: Option<String>,
    /// Alt text of the product's first image, if any.
    pub product_alt: Option<String>,
    /// Where a scan resolves to.
    pub destination_url: String,
    /// PNG data URL of the rendered QR code.
    pub image: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(destination: Destination, variant_id: &str) -> QrCode {
        QrCode {
            id: QrCodeId::new(1),
            shop: "test-store.myshopify.com".to_string(),
            title: "Back of house poster".to_string(),
            product_id: "gid://shopify/Product/111".to_string(),
            product_handle: "linen-shirt".to_string(),
            product_variant_id: variant_id.to_string(),
            destination,
            scans: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_product_destination_url() {
        let qr = record(Destination::Product, "gid://shopify/ProductVariant/222");
        assert_eq!(
            qr.destination_url(),
            "https://test-store.myshopify.com/products/linen-shirt"
        );
    }

    #[test]
    fn test_cart_destination_url_extracts_variant_digits() {
        let qr = record(Destination::Cart, "gid://shopify/ProductVariant/987654321");
        assert_eq!(
            qr.destination_url(),
            "https://test-store.myshopify.com/cart/987654321:1"
        );
    }

    #[test]
    #[should_panic(expected = "Unrecognized product variant ID")]
    fn test_cart_destination_url_panics_on_malformed_variant_id() {
        let qr = record(Destination::Cart, "gid://shopify/ProductVariant/oops");
        let _ = qr.destination_url();
    }

    #[test]
    fn test_enriched_serializes_camel_case() {
        let qr = record(Destination::Product, "gid://shopify/ProductVariant/222");
        let enriched = EnrichedQrCode {
            destination_url: qr.destination_url(),
            qr_code: qr,
            product_deleted: false,
            product_title: Some("Linen Shirt".to_string()),
            product_image: None,
            product_alt: None,
            image: "data:image/png;base64,AAAA".to_string(),
        };

        let value = serde_json::to_value(&enriched).expect("serialize");
        assert_eq!(value["productDeleted"], false);
        assert_eq!(value["productTitle"], "Linen Shirt");
        assert_eq!(value["productHandle"], "linen-shirt");
        assert!(value["destinationUrl"].as_str().is_some());
    }
}
