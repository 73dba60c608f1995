//! # Stock Status
//!
//! Classifies a product's stock against its suggested quantity.
//!
//! ```text
//!   stock < suggested                 → Red     ("vermelho")
//!   0 <= stock - suggested <= 5       → Yellow  ("amarelo")
//!   stock - suggested > 5             → Green   ("verde")
//! ```
//!
//! Status is computed on demand from current quantities and never stored.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::YELLOW_MARGIN;

/// Stock adequacy tag shown next to each product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum StockStatus {
    /// Below the suggested quantity.
    #[serde(rename = "vermelho")]
    Red,
    /// At or slightly above the suggested quantity.
    #[serde(rename = "amarelo")]
    Yellow,
    /// Comfortably above the suggested quantity.
    #[serde(rename = "verde")]
    Green,
}

impl StockStatus {
    /// English tag, used in logs.
    pub const fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Red => "red",
            StockStatus::Yellow => "yellow",
            StockStatus::Green => "green",
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps (stock, suggested) to a status tag. Total over all inputs.
///
/// ## Example
/// ```rust
/// use estoque_core::status::{classify, StockStatus};
///
/// assert_eq!(classify(5, 5), StockStatus::Yellow);
/// assert_eq!(classify(2, 10), StockStatus::Red);
/// ```
pub fn classify(stock_quantity: i64, suggested_quantity: i64) -> StockStatus {
    if stock_quantity < suggested_quantity {
        StockStatus::Red
    } else if stock_quantity - suggested_quantity <= YELLOW_MARGIN {
        StockStatus::Yellow
    } else {
        StockStatus::Green
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(3, 5), StockStatus::Red);
        assert_eq!(classify(5, 5), StockStatus::Yellow);
        assert_eq!(classify(10, 5), StockStatus::Yellow);
        assert_eq!(classify(11, 5), StockStatus::Green);
    }

    #[test]
    fn test_classify_zero_suggested() {
        assert_eq!(classify(0, 0), StockStatus::Yellow);
        assert_eq!(classify(6, 0), StockStatus::Green);
    }

    #[test]
    fn test_classify_is_total() {
        for stock in 0..30 {
            for suggested in 0..30 {
                let status = classify(stock, suggested);
                let expected = if stock < suggested {
                    StockStatus::Red
                } else if stock - suggested <= 5 {
                    StockStatus::Yellow
                } else {
                    StockStatus::Green
                };
                assert_eq!(status, expected, "stock={stock} suggested={suggested}");
            }
        }
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(serde_json::to_string(&StockStatus::Red).unwrap(), "\"vermelho\"");
        assert_eq!(serde_json::to_string(&StockStatus::Yellow).unwrap(), "\"amarelo\"");
        assert_eq!(serde_json::to_string(&StockStatus::Green).unwrap(), "\"verde\"");
    }
}
