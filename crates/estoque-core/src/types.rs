//! # Domain Types
//!
//! Core domain types used throughout Estoque.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────┐   ┌─────────────────┐   │
//! │  │    Category     │◄──│      Product        │◄──│      Sale       │   │
//! │  │  ─────────────  │   │  ─────────────────  │   │  ─────────────  │   │
//! │  │  id             │   │  id                 │   │  id             │   │
//! │  │  description    │   │  description        │   │  product_id     │   │
//! │  └─────────────────┘   │  unit_value         │   │  quantity       │   │
//! │                        │  stock_quantity     │   │  sale_timestamp │   │
//! │                        │  suggested_quantity │   └─────────────────┘   │
//! │                        │  category_id        │                         │
//! │                        └──────────┬──────────┘                         │
//! │                                   │ + status + value_in_usd            │
//! │                                   ▼                                     │
//! │                        ┌─────────────────────┐                         │
//! │                        │    ProductView      │                         │
//! │                        └─────────────────────┘                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Names
//! Field names on the wire follow the frontend contract (Portuguese). Request
//! bodies also accept the English field names.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::UsdRate;
use crate::status::{classify, StockStatus};
use crate::validation::{
    validate_description, validate_non_negative, validate_sale_quantity, validate_unit_value,
    ValidationResult,
};

// =============================================================================
// Category
// =============================================================================

/// A product grouping. Created once, never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    pub id: i64,

    #[serde(rename = "descricao")]
    pub description: String,
}

/// Payload for `POST /api/categorias`.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct NewCategory {
    #[serde(rename = "descricao", alias = "description")]
    pub description: String,
}

impl NewCategory {
    /// Checks the description rules.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_description(&self.description)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
///
/// `stock_quantity` is only ever changed by registering a sale and never
/// goes below zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: i64,

    #[serde(rename = "descricao")]
    pub description: String,

    /// Unit price in BRL.
    #[serde(rename = "valor", with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub unit_value: Decimal,

    #[serde(rename = "quantidade_estoque")]
    pub stock_quantity: i64,

    #[serde(rename = "quantidade_sugerida")]
    pub suggested_quantity: i64,

    #[serde(rename = "categoria_id")]
    pub category_id: i64,
}

impl Product {
    /// Current stock status. Computed on every call, never cached.
    #[inline]
    pub fn status(&self) -> StockStatus {
        classify(self.stock_quantity, self.suggested_quantity)
    }

    /// Builds the client-facing view using the given quote.
    pub fn view(&self, rate: UsdRate) -> ProductView {
        ProductView {
            status: self.status(),
            value_in_usd: rate.to_usd(self.unit_value),
            product: self.clone(),
        }
    }
}

/// Payload for `POST /api/produtos`.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct NewProduct {
    #[serde(rename = "descricao", alias = "description")]
    pub description: String,

    #[serde(
        rename = "valor",
        alias = "unit_value",
        with = "rust_decimal::serde::float"
    )]
    #[ts(type = "number")]
    pub unit_value: Decimal,

    #[serde(rename = "quantidade_estoque", alias = "stock_quantity")]
    pub stock_quantity: i64,

    #[serde(rename = "quantidade_sugerida", alias = "suggested_quantity")]
    pub suggested_quantity: i64,

    #[serde(rename = "categoria_id", alias = "category_id")]
    pub category_id: i64,
}

impl NewProduct {
    /// Checks field rules. Category existence is checked by the store.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_description(&self.description)?;
        validate_unit_value(self.unit_value)?;
        validate_non_negative("quantidade_estoque", self.stock_quantity)?;
        validate_non_negative("quantidade_sugerida", self.suggested_quantity)?;
        Ok(())
    }
}

/// A product as returned to clients: the record plus derived fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,

    pub status: StockStatus,

    /// `unit_value` divided by the USD quote.
    #[serde(rename = "valor_dolar", with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub value_in_usd: Decimal,
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sale {
    pub id: i64,

    #[serde(rename = "produto_id")]
    pub product_id: i64,

    #[serde(rename = "quantidade")]
    pub quantity: i64,

    /// Assigned by the server at creation (UTC).
    #[serde(rename = "data_venda")]
    #[ts(type = "string")]
    pub sale_timestamp: DateTime<Utc>,
}

/// Payload for `POST /api/vendas`.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct NewSale {
    #[serde(rename = "produto_id", alias = "product_id")]
    pub product_id: i64,

    #[serde(rename = "quantidade", alias = "quantity")]
    pub quantity: i64,
}

impl NewSale {
    /// Quantity must be strictly positive.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_sale_quantity(self.quantity)
    }
}

// =============================================================================
// Dashboard Views
// =============================================================================

/// Total units sold for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategorySales {
    #[serde(rename = "nome")]
    pub name: String,

    #[serde(rename = "quantidade")]
    pub quantity: i64,
}

/// Top categories by units sold, with everything else summed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryBreakdown {
    #[serde(rename = "categorias")]
    pub ranked: Vec<CategorySales>,

    #[serde(rename = "outros")]
    pub other_total: i64,
}

/// One row of the best-sellers dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TopProduct {
    #[serde(rename = "id")]
    pub product_id: i64,

    #[serde(rename = "descricao")]
    pub description: String,

    #[serde(rename = "quantidade_vendida")]
    pub quantity_sold: i64,

    #[serde(rename = "valor", with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub unit_value: Decimal,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_product() -> Product {
        Product {
            id: 1,
            description: "Refrigerante".to_string(),
            unit_value: dec!(10.00),
            stock_quantity: 2,
            suggested_quantity: 10,
            category_id: 1,
        }
    }

    #[test]
    fn test_product_view_fields() {
        let rate = UsdRate::new(dec!(5)).unwrap();
        let view = sample_product().view(rate);

        assert_eq!(view.status, StockStatus::Red);
        assert_eq!(view.value_in_usd, dec!(2));

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["descricao"], "Refrigerante");
        assert_eq!(json["quantidade_estoque"], 2);
        assert_eq!(json["status"], "vermelho");
        assert_eq!(json["valor"], 10.0);
        assert_eq!(json["valor_dolar"], 2.0);
    }

    #[test]
    fn test_new_product_accepts_both_names() {
        let pt: NewProduct = serde_json::from_str(
            r#"{"descricao":"A","valor":1.5,"quantidade_estoque":3,"quantidade_sugerida":1,"categoria_id":2}"#,
        )
        .unwrap();
        let en: NewProduct = serde_json::from_str(
            r#"{"description":"A","unit_value":1.5,"stock_quantity":3,"suggested_quantity":1,"category_id":2}"#,
        )
        .unwrap();

        assert_eq!(pt.unit_value, dec!(1.5));
        assert_eq!(en.unit_value, dec!(1.5));
        assert_eq!(pt.category_id, en.category_id);
    }

    #[test]
    fn test_new_product_validation() {
        let mut input = NewProduct {
            description: "Suco".to_string(),
            unit_value: dec!(4.50),
            stock_quantity: 0,
            suggested_quantity: 0,
            category_id: 1,
        };
        assert!(input.validate().is_ok());

        input.unit_value = dec!(-1);
        assert!(input.validate().is_err());

        input.unit_value = dec!(1);
        input.stock_quantity = -3;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_new_sale_validation() {
        let sale = NewSale {
            product_id: 1,
            quantity: 0,
        };
        assert!(sale.validate().is_err());
    }

    #[test]
    fn test_category_breakdown_wire_names() {
        let breakdown = CategoryBreakdown {
            ranked: vec![CategorySales {
                name: "Bebidas".to_string(),
                quantity: 4,
            }],
            other_total: 1,
        };
        let json = serde_json::to_value(&breakdown).unwrap();
        assert_eq!(json["categorias"][0]["nome"], "Bebidas");
        assert_eq!(json["categorias"][0]["quantidade"], 4);
        assert_eq!(json["outros"], 1);
    }
}
