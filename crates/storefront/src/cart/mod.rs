//! The shopper's cart.
//!
//! [`CartStore`] owns the ordered list of [`CartLine`]s and is the only way
//! to change it. Every mutation is written through to a [`CartStorage`]
//! backend under a single key and then delivered to subscribers as a
//! [`CartView`].
//!
//! # Failure policy
//!
//! Nothing here returns an error to the caller. A snapshot that cannot be
//! read or decoded is discarded and the cart starts empty; a failed write is
//! logged and the in-memory cart stays authoritative for the session.
//!
//! # Example
//!
//! ```
//! use mountain_harvest_core::ProductId;
//! use mountain_harvest_storefront::cart::{CartItem, CartStore, MemoryStorage};
//!
//! let mut cart = CartStore::open(MemoryStorage::default());
//! cart.add_item(CartItem::new(ProductId::new(1), "Cherry Tomato", 45_000), 2);
//! assert_eq!(cart.item_count(), 2);
//! assert_eq!(cart.total(), 90_000);
//! ```

mod line;
mod snapshot;
mod storage;
mod store;

pub use line::{CartItem, CartLine, parse_quantity};
pub use snapshot::{SnapshotError, decode_snapshot, encode_snapshot};
pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError};
pub use store::{CART_KEY, CartStore, CartView, SubscriptionId};
