//! Money in minor currency units and locale-aware display.
//!
//! Amounts are always integers in the currency's smallest unit (đồng for
//! VND, cents for USD). Arithmetic never goes through floating point; the
//! decimal point only appears when a value is formatted for display.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Locale`] or [`CurrencyCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    /// The locale tag is not one the storefront is translated into.
    #[error("unsupported locale: {0}")]
    UnknownLocale(String),
    /// The currency code is not one the storefront prices in.
    #[error("unsupported currency: {0}")]
    UnknownCurrency(String),
}

/// Display language of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Vietnamese (`vi-VN`).
    #[default]
    Vi,
    /// English (`en-US`).
    En,
}

impl Locale {
    /// Short language tag (`vi` or `en`).
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Vi => "vi",
            Self::En => "en",
        }
    }

    const fn group_separator(self) -> char {
        match self {
            Self::Vi => '.',
            Self::En => ',',
        }
    }

    const fn decimal_separator(self) -> char {
        match self {
            Self::Vi => ',',
            Self::En => '.',
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    /// Accepts a bare language tag or a language-region tag (`vi-VN`, `en_US`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let language = s
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match language.as_str() {
            "vi" => Ok(Self::Vi),
            "en" => Ok(Self::En),
            _ => Err(LocaleError::UnknownLocale(s.to_string())),
        }
    }
}

/// ISO 4217 currency codes the storefront prices in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    VND,
    USD,
}

impl CurrencyCode {
    /// Number of decimal digits between the minor and the major unit.
    #[must_use]
    pub const fn minor_units(self) -> u32 {
        match self {
            Self::VND => 0,
            Self::USD => 2,
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::VND => "VND",
            Self::USD => "USD",
        }
    }

    /// Currency symbol as written in the given locale.
    #[must_use]
    pub const fn symbol(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::VND, _) => "₫",
            (Self::USD, Locale::Vi) => "US$",
            (Self::USD, Locale::En) => "$",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "VND" => Ok(Self::VND),
            "USD" => Ok(Self::USD),
            _ => Err(LocaleError::UnknownCurrency(s.to_string())),
        }
    }
}

/// Format an amount in minor units for display.
///
/// Vietnamese groups with `.`, uses `,` as the decimal mark and puts the
/// symbol after a no-break space; English groups with `,`, uses `.` and
/// puts the symbol first. The output depends only on the arguments.
///
/// ```
/// use mountain_harvest_core::{CurrencyCode, Locale, format_currency};
///
/// assert_eq!(format_currency(45_000, CurrencyCode::VND, Locale::Vi), "45.000\u{a0}₫");
/// assert_eq!(format_currency(45_000, CurrencyCode::VND, Locale::En), "₫45,000");
/// assert_eq!(format_currency(1_999, CurrencyCode::USD, Locale::En), "$19.99");
/// ```
#[must_use]
pub fn format_currency(amount: u64, currency: CurrencyCode, locale: Locale) -> String {
    let major = Decimal::try_from_i128_with_scale(i128::from(amount), currency.minor_units())
        .map_or_else(|_| amount.to_string(), |value| value.to_string());

    let (integer, fraction) = match major.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (major.as_str(), None),
    };

    let mut number = group_thousands(integer, locale.group_separator());
    if let Some(fraction) = fraction {
        number.push(locale.decimal_separator());
        number.push_str(fraction);
    }

    let symbol = currency.symbol(locale);
    match locale {
        Locale::Vi => format!("{number}\u{a0}{symbol}"),
        Locale::En => format!("{symbol}{number}"),
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
