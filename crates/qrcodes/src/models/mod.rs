//! QR-code domain types.
//!
//! These types represent validated domain objects separate from transport
//! concerns: the persisted record, its per-request enriched projection, and
//! the create/update form input.

pub mod form;
pub mod qr_code;

pub use form::{QrCodeForm, QrCodeInput, ValidationErrors};
pub use qr_code::{EnrichedQrCode, QrCode};
