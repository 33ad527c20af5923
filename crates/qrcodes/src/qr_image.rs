//! QR image encoding.
//!
//! Codes never encode the destination directly; they encode a scan URL under
//! the app's base URL so the enclosing app can count the scan before
//! redirecting. Output is a PNG rendered as a base64 data URL, suitable for
//! an `<img src>` without any asset hosting. Deterministic for a given id
//! and base URL; recomputed on every call, no caching.

use std::io::Cursor;

use base64::{Engine, engine::general_purpose::STANDARD};
use image::{DynamicImage, ImageFormat, Luma};
use thiserror::Error;

use merchant_qr_core::QrCodeId;

/// Errors that can occur while encoding a QR image.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The payload could not be encoded as a QR code.
    #[error("QR encoding error: {0}")]
    Qr(#[from] qrcode::types::QrError),

    /// PNG serialization failed.
    #[error("PNG encoding error: {0}")]
    Png(#[from] image::ImageError),
}

/// The URL a rendered code points at: `<base_url>/qrcodes/<id>/scan`.
#[must_use]
pub fn scan_url(base_url: &str, id: QrCodeId) -> String {
    format!("{base_url}/qrcodes/{id}/scan")
}

/// Render the scan URL for a record as a PNG data URL.
///
/// # Errors
///
/// Returns `ImageError` if QR or PNG encoding fails.
pub fn qr_image_data_url(base_url: &str, id: QrCodeId) -> Result<String, ImageError> {
    let url = scan_url(base_url, id);

    let code = qrcode::QrCode::new(url.as_bytes())?;
    let rendered = code.render::<Luma<u8>>().build();

    let mut png = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(rendered).write_to(&mut png, ImageFormat::Png)?;

    Ok(format!(
        "data:image/png;base64,{}",
        STANDARD.encode(png.into_inner())
    ))
}
