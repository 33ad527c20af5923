//! Create/update form input and field validation.

use serde::{Deserialize, Serialize};

use merchant_qr_core::Destination;

/// Raw form data for creating or updating a QR code.
///
/// All fields are optional at this layer; [`QrCodeForm::validate`] reports
/// which required ones are missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeForm {
    pub title: Option<String>,
    pub product_id: Option<String>,
    pub product_handle: Option<String>,
    pub product_variant_id: Option<String>,
    pub destination: Option<String>,
}

/// Field-keyed validation messages for display next to form fields.
///
/// Serialized camelCase so keys line up with the submitted field names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

impl ValidationErrors {
    /// True when no field has a message.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.product_id.is_none() && self.destination.is_none()
    }
}

/// A validated payload ready for the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCodeInput {
    pub shop: String,
    pub title: String,
    pub product_id: String,
    pub product_handle: String,
    pub product_variant_id: String,
    pub destination: Destination,
}

fn missing(field: &Option<String>) -> bool {
    field.as_deref().is_none_or(str::is_empty)
}

impl QrCodeForm {
    /// Check the three required fields: title, product, destination.
    ///
    /// Presence-only; no format or cross-field validation. An empty string
    /// counts as missing.
    ///
    /// # Errors
    ///
    /// Returns the field-keyed messages when any required field is absent.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let errors = ValidationErrors {
            title: missing(&self.title).then(|| "Title is required".to_string()),
            product_id: missing(&self.product_id).then(|| "Product is required".to_string()),
            destination: missing(&self.destination)
                .then(|| "Destination is required".to_string()),
        };

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Validate and convert into a repository payload for the given shop.
    ///
    /// # Errors
    ///
    /// Returns presence errors from [`Self::validate`], or a destination
    /// message when the submitted value is neither `product` nor `cart`.
    pub fn try_into_input(self, shop: &str) -> Result<QrCodeInput, ValidationErrors> {
        self.validate()?;

        // validate() guarantees the required fields are present and non-empty
        let destination_raw = self.destination.unwrap_or_default();
        let destination = destination_raw.parse::<Destination>().map_err(|_| {
            ValidationErrors {
                destination: Some("Destination must be product or cart".to_string()),
                ..ValidationErrors::default()
            }
        })?;

        Ok(QrCodeInput {
            shop: shop.to_string(),
            title: self.title.unwrap_or_default(),
            product_id: self.product_id.unwrap_or_default(),
            product_handle: self.product_handle.unwrap_or_default(),
            product_variant_id: self.product_variant_id.unwrap_or_default(),
            destination,
        })
    }
}
