//! Merchant QR Core - Shared types library.
//!
//! This crate provides common types used across Merchant QR components:
//! - `qrcodes` - QR-code data-access and presentation library
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype ID wrappers and the QR-code destination enum

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
