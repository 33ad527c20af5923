//! Core types for Merchant QR.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod destination;
pub mod id;

pub use destination::{Destination, DestinationParseError};
pub use id::*;
