//! Core types for Mountain Harvest.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod catalog;
pub mod id;
pub mod money;
pub mod tags;

pub use catalog::{
    Article, Brand, Brochure, CatalogResponse, Footer, Hero, Page, PriceBand, Product,
    ProductFilter, ProductQuery, QueryError, SiteConfig, SortOrder, Topbar, null_as_default,
};
pub use id::*;
pub use money::{CurrencyCode, Locale, LocaleError, format_currency};
pub use tags::Tags;
