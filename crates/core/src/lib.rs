//! Mountain Harvest Core - Shared types library.
//!
//! This crate provides common types used across all Mountain Harvest components:
//! - `storefront` - Cart store, catalog client, configuration
//! - `cli` - Command-line front end for the cart and catalog
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no storage. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, money and currency formatting, catalog types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
