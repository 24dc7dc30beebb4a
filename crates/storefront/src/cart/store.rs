//! The cart store.

use core::fmt;

use mountain_harvest_core::ProductId;
use tracing::{debug, warn};

use super::line::{CartItem, CartLine};
use super::snapshot::{decode_snapshot, encode_snapshot};
use super::storage::CartStorage;

/// Storage key the cart snapshot lives under.
pub const CART_KEY: &str = "cart";

/// Read-only view of the cart delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartView<'a> {
    pub lines: &'a [CartLine],
    /// Sum of quantities, for the cart badge.
    pub item_count: u64,
    /// Sum of line totals in minor units.
    pub total: u64,
}

impl<'a> CartView<'a> {
    fn of(lines: &'a [CartLine]) -> Self {
        Self {
            lines,
            item_count: item_count(lines),
            total: total(lines),
        }
    }
}

fn item_count(lines: &[CartLine]) -> u64 {
    lines
        .iter()
        .fold(0u64, |acc, line| acc.saturating_add(u64::from(line.quantity)))
}

fn total(lines: &[CartLine]) -> u64 {
    lines
        .iter()
        .fold(0u64, |acc, line| acc.saturating_add(line.line_total()))
}

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&CartView<'_>)>;

/// The shopper's cart.
///
/// Holds the ordered cart lines, writes every change through to `S` and
/// then calls each subscriber with the new [`CartView`]. A store only
/// exists once its snapshot has been loaded (or defaulted), so every
/// operation is always available.
///
/// # Invariants
///
/// - At most one line per product.
/// - Every line has a quantity of at least 1.
/// - Lines keep insertion order.
///
/// No operation fails or panics. Unknown product IDs are no-ops, and a
/// storage failure only costs durability.
pub struct CartStore<S: CartStorage> {
    storage: S,
    lines: Vec<CartLine>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl<S: CartStorage> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl<S: CartStorage> CartStore<S> {
    /// Load the cart from `storage`.
    ///
    /// A missing snapshot gives an empty cart. So does one that cannot be
    /// read, parsed, or that breaks a cart invariant; the bad value is
    /// logged and left to be overwritten by the next change.
    pub fn open(storage: S) -> Self {
        let lines = match storage.load(CART_KEY) {
            Ok(Some(raw)) => decode_snapshot(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "Discarding stored cart");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read stored cart, starting empty");
                Vec::new()
            }
        };

        debug!(lines = lines.len(), "Cart loaded");

        Self {
            storage,
            lines,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add `quantity` units of `item`.
    ///
    /// If the product is already in the cart its quantity grows and the
    /// existing name, price and metadata are kept. Otherwise a new line is
    /// appended. Adding zero units changes nothing.
    pub fn add_item(&mut self, item: CartItem, quantity: u32) {
        if quantity == 0 {
            debug!(product_id = %item.product_id, "Ignoring add of zero units");
            return;
        }

        if let Some(line) = self.line_mut(item.product_id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            debug!(product_id = %item.product_id, quantity, "Adding new cart line");
            self.lines.push(CartLine { item, quantity });
        }

        self.commit();
    }

    /// Add a single unit of `item`.
    pub fn add_one(&mut self, item: CartItem) {
        self.add_item(item, 1);
    }

    /// Remove the line for `product_id`, if any.
    pub fn remove_item(&mut self, product_id: ProductId) {
        self.lines.retain(|line| line.product_id() != product_id);
        self.commit();
    }

    /// Set the quantity of the line for `product_id`.
    ///
    /// Zero or negative removes the line. There is no upper bound beyond
    /// `u32::MAX`, which larger values saturate to.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(line) = self.line_mut(product_id) {
            line.quantity = quantity;
        }

        self.commit();
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.commit();
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines
            .iter()
            .find(|line| line.product_id() == product_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        item_count(&self.lines)
    }

    /// Sum of `unit_price × quantity` over all lines, in minor units.
    #[must_use]
    pub fn total(&self) -> u64 {
        total(&self.lines)
    }

    #[must_use]
    pub fn view(&self) -> CartView<'_> {
        CartView::of(&self.lines)
    }

    /// The storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Call `subscriber` after every change, in subscription order.
    ///
    /// The subscriber is not called with the current state; use
    /// [`CartStore::view`] for the initial render.
    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&CartView<'_>) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Stop notifying a subscriber. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id() == product_id)
    }

    fn commit(&mut self) {
        self.persist();
        self.notify();
    }

    fn persist(&mut self) {
        let raw = match encode_snapshot(&self.lines) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Failed to encode cart, keeping it in memory");
                return;
            }
        };

        if let Err(e) = self.storage.save(CART_KEY, &raw) {
            warn!(error = %e, "Failed to persist cart, keeping it in memory");
        }
    }

    fn notify(&mut self) {
        let view = CartView::of(&self.lines);
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&view);
        }
    }
}
