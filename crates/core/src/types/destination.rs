//! Scan destination for a QR code.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The behavior a scanned code triggers.
///
/// Stored as lowercase text in the database and in form submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    /// Navigate to the product page.
    Product,
    /// Add one unit of the product variant to the cart.
    Cart,
}

impl Destination {
    /// The lowercase string form used in the database and forms.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Cart => "cart",
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown destination value.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown destination: {0}")]
pub struct DestinationParseError(pub String);

impl FromStr for Destination {
    type Err = DestinationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "product" => Ok(Self::Product),
            "cart" => Ok(Self::Cart),
            other => Err(DestinationParseError(other.to_string())),
        }
    }
}
