//! Mountain Harvest Storefront library.
//!
//! This crate provides the storefront functionality as a library, allowing
//! it to be tested and reused by the CLI:
//!
//! - [`cart`] - The shopper's cart: an owned store persisted to key-value
//!   storage that notifies subscribed views after every change
//! - [`catalog`] - HTTP client for the product and news catalog
//! - [`config`] - Environment-driven configuration
//! - [`error`] - Application error type
//! - [`state`] - Shared application state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod state;
