//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are exact [`Decimal`] values. Binary floating point never touches a
//! currency amount anywhere in WhatsStore: `0.1 + 0.2` is `0.3` here.

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Maximum fractional digits shown by [`format_amount`].
const DISPLAY_FRACTION_DIGITS: u32 = 3;

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is not a decimal number.
    #[error("price must be a number, got {0:?}")]
    NotANumber(String),
    /// The amount is below zero.
    #[error("price must be non-negative, got {0}")]
    Negative(Decimal),
    /// The amount is above [`Price::MAX`].
    #[error("price must be at most {max}, got {amount}")]
    TooLarge { amount: Decimal, max: Decimal },
}

/// A non-negative unit price in the store's currency, at most [`Price::MAX`].
///
/// The ceiling keeps `price * quantity` for any `u32` quantity far inside
/// [`Decimal`]'s range, so cart totals never overflow.
///
/// ## Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use whatsstore_core::Price;
///
/// assert!(Price::parse("1500").is_ok());
/// assert!(Price::parse("19.99").is_ok());
///
/// assert!(Price::parse("").is_err());      // not a number
/// assert!(Price::parse("abc").is_err());   // not a number
/// assert!(Price::parse("-5").is_err());    // negative
/// assert!(Price::new(Decimal::NEGATIVE_ONE).is_err());
/// assert!(Price::new(Decimal::MAX).is_err());      // above the ceiling
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest accepted unit price (one trillion).
    pub const MAX: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the amount is below zero and
    /// [`PriceError::TooLarge`] if it is above [`Price::MAX`].
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        if amount > Self::MAX {
            return Err(PriceError::TooLarge {
                amount,
                max: Self::MAX,
            });
        }
        Ok(Self(amount))
    }

    /// Parse a price from user or store input.
    ///
    /// Surrounding whitespace is ignored. Anything that is not a plain decimal
    /// number is rejected rather than coerced.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotANumber`] for non-numeric input and
    /// [`PriceError::Negative`] or [`PriceError::TooLarge`] for amounts out of
    /// range.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let amount = Decimal::from_str(s.trim())
            .map_err(|_| PriceError::NotANumber(s.to_owned()))?;
        Self::new(amount)
    }

    /// Returns the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Decimal {
        self.0.saturating_mul(Decimal::from(quantity))
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_amount(self.0))
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    NGN,
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol placed in front of amounts.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::NGN => "₦",
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NGN => "NGN",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }

    /// Format an amount with this currency's symbol, e.g. `₦3,300`.
    #[must_use]
    pub fn display(&self, amount: Decimal) -> String {
        format!("{}{}", self.symbol(), format_amount(amount))
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NGN" => Ok(Self::NGN),
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            _ => Err(format!("unsupported currency code: {s}")),
        }
    }
}

/// Format an amount for display with thousands separators.
///
/// Matches the en-US number display shoppers see in the storefront: at most
/// three fractional digits (rounded half away from zero), no trailing
/// fractional zeros, and a comma between every group of three integer digits.
///
/// ```
/// use rust_decimal::Decimal;
/// use whatsstore_core::format_amount;
///
/// assert_eq!(format_amount(Decimal::new(3300, 0)), "3,300");
/// assert_eq!(format_amount(Decimal::new(12_345_675, 1)), "1,234,567.5");
/// assert_eq!(format_amount(Decimal::new(150, 2)), "1.5");
/// ```
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(
            DISPLAY_FRACTION_DIGITS,
            RoundingStrategy::MidpointAwayFromZero,
        )
        .normalize();

    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().to_string();
    let (integer, fraction) = digits
        .split_once('.')
        .map_or((digits.as_str(), None), |(i, f)| (i, Some(f)));

    let mut out = String::with_capacity(digits.len() + integer.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    let len = integer.len();
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}
