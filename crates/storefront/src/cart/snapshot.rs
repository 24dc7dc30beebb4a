//! Persisted form of the cart.
//!
//! A snapshot is a JSON array of [`CartLine`]s in cart order. Decoding checks
//! the cart invariants as well as the shape, so a snapshot written by an
//! older or buggy client cannot smuggle in a zero quantity or a duplicate
//! product.

use std::collections::HashSet;

use mountain_harvest_core::ProductId;
use thiserror::Error;

use super::line::CartLine;

/// Reasons a stored snapshot is rejected.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Not JSON, or not an array of cart lines.
    #[error("malformed cart snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A line with quantity 0.
    #[error("cart line for product {0} has zero quantity")]
    ZeroQuantity(ProductId),

    /// The same product on two lines.
    #[error("product {0} appears on more than one cart line")]
    DuplicateProduct(ProductId),
}

/// Encode cart lines for storage.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode_snapshot(lines: &[CartLine]) -> Result<String, serde_json::Error> {
    serde_json::to_string(lines)
}

/// Decode and validate a stored snapshot.
///
/// # Errors
///
/// Returns an error if the input is not a JSON array of cart lines, or if
/// any line breaks a cart invariant.
pub fn decode_snapshot(raw: &str) -> Result<Vec<CartLine>, SnapshotError> {
    let lines: Vec<CartLine> = serde_json::from_str(raw)?;

    let mut seen = HashSet::with_capacity(lines.len());
    for line in &lines {
        let id = line.product_id();
        if line.quantity == 0 {
            return Err(SnapshotError::ZeroQuantity(id));
        }
        if !seen.insert(id) {
            return Err(SnapshotError::DuplicateProduct(id));
        }
    }

    Ok(lines)
}
