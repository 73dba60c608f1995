//! # Money Module
//!
//! Exchange rate type and BRL → USD conversion.
//!
//! ## Why Decimal?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  Product values and quotes are kept as rust_decimal::Decimal and only  │
//! │  become JSON numbers at the wire boundary.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use estoque_core::money::UsdRate;
//! use rust_decimal::Decimal;
//!
//! let rate = UsdRate::new(Decimal::new(5, 0)).unwrap();
//! assert_eq!(rate.to_usd(Decimal::new(1000, 2)), Decimal::new(2, 0));
//! ```

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use crate::error::ValidationError;

/// Decimal places kept in converted USD values.
pub const USD_SCALE: u32 = 4;

// =============================================================================
// USD Rate
// =============================================================================

/// Spot price of one US dollar in BRL.
///
/// Always strictly positive, so conversion never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UsdRate(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl UsdRate {
    /// Wraps a quote, rejecting zero and negative values.
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value <= Decimal::ZERO {
            return Err(ValidationError::MustBePositive {
                field: "cotacao".to_string(),
            });
        }
        Ok(UsdRate(value))
    }

    /// Returns the raw quote.
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Converts a BRL amount to USD, rounded to [`USD_SCALE`] places.
    pub fn to_usd(&self, brl: Decimal) -> Decimal {
        (brl / self.0).round_dp(USD_SCALE)
    }
}

impl TryFrom<Decimal> for UsdRate {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        UsdRate::new(value)
    }
}

impl fmt::Display for UsdRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
