//! Cart line items.

use mountain_harvest_core::{Product, ProductId, Tags, null_as_default};
use serde::{Deserialize, Serialize};

/// Display and pricing data copied from the catalog when a product is
/// first added to the cart.
///
/// The cart never re-fetches this data: if the catalog changes a price or
/// name later, lines already in the cart keep what they were added with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(rename = "id")]
    pub product_id: ProductId,
    pub name: String,
    /// Price of one unit in the smallest currency unit.
    #[serde(rename = "price")]
    pub unit_price: u64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default)]
    pub tags: Tags,
    /// Unit label such as `500g` or `hộp`.
    #[serde(default)]
    pub unit: Option<String>,
}

impl CartItem {
    /// Create an item with no display metadata.
    #[must_use]
    pub fn new(product_id: ProductId, name: impl Into<String>, unit_price: u64) -> Self {
        Self {
            product_id,
            name: name.into(),
            unit_price,
            image: None,
            category: String::new(),
            tags: Tags::default(),
            unit: None,
        }
    }
}

impl From<Product> for CartItem {
    fn from(product: Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name,
            unit_price: product.price,
            image: product.image,
            category: product.category,
            tags: product.tags,
            unit: product.unit,
        }
    }
}

impl From<&Product> for CartItem {
    fn from(product: &Product) -> Self {
        Self::from(product.clone())
    }
}

/// One product in the cart with its quantity.
///
/// Serialized flat, in the same shape the storefront has always stored:
/// `{"id", "name", "price", "image", "category", "tags", "unit", "quantity"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub item: CartItem,
    /// Always at least 1 while the line is in a cart.
    pub quantity: u32,
}

impl CartLine {
    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.item.product_id
    }

    /// `unit_price × quantity`, saturating at `u64::MAX`.
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.item.unit_price.saturating_mul(u64::from(self.quantity))
    }
}

/// Read a quantity typed into the product page's stepper.
///
/// Leading digits are taken (`"3 hộp"` is 3); anything that does not start
/// with a positive integer becomes 1. Values beyond `u32::MAX` saturate.
///
/// ```
/// use mountain_harvest_storefront::cart::parse_quantity;
///
/// assert_eq!(parse_quantity("4"), 4);
/// assert_eq!(parse_quantity("abc"), 1);
/// assert_eq!(parse_quantity("-2"), 1);
/// ```
#[must_use]
pub fn parse_quantity(input: &str) -> u32 {
    let input = input.trim();
    let unsigned = input.strip_prefix('+').unwrap_or(input);
    let digits_len = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let Some(digits) = unsigned.get(..digits_len).filter(|d| !d.is_empty()) else {
        return 1;
    };

    digits
        .parse::<u64>()
        .map_or(u32::MAX, |n| u32::try_from(n).unwrap_or(u32::MAX))
        .max(1)
}
