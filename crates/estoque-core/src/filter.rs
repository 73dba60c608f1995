//! # List Filters
//!
//! Filters for product and sale listings.
//!
//! ```text
//!   GET /api/produtos?categorias=1,2&descricao=suco
//!        │
//!        ▼
//!   ProductFilter { category_ids: Some([1, 2]), description: Some("suco") }
//!        │
//!        ▼
//!   keep p  ⇔  p.stock_quantity > 0
//!              ∧ (no ids      ∨ p.category_id ∈ ids)
//!              ∧ (no text     ∨ lower(p.description) ⊇ lower(text))
//! ```

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::ValidationError;
use crate::types::{Product, Sale};
use crate::validation::ValidationResult;

// =============================================================================
// Product Filter
// =============================================================================

/// Optional narrowing of `list_products`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Keep only products in these categories. `None` keeps all.
    pub category_ids: Option<Vec<i64>>,

    /// Case-insensitive substring of the description.
    pub description: Option<String>,
}

impl ProductFilter {
    /// Whether a product shows up in listings.
    ///
    /// Products without stock are never listed, regardless of the filter.
    pub fn matches(&self, product: &Product) -> bool {
        if product.stock_quantity == 0 {
            return false;
        }

        if let Some(ids) = &self.category_ids {
            if !ids.contains(&product.category_id) {
                return false;
            }
        }

        match &self.description {
            Some(needle) => product
                .description
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            None => true,
        }
    }

    /// Adds category ids from one raw query value (`"1,2"` or `"3"`).
    pub fn push_category_ids(&mut self, raw: &str) -> ValidationResult<()> {
        let ids = self.category_ids.get_or_insert_with(Vec::new);
        for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let id = part
                .parse::<i64>()
                .map_err(|e| ValidationError::InvalidFormat {
                    field: "categorias".to_string(),
                    reason: format!("'{part}': {e}"),
                })?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Ok(())
    }

    /// Sets the description filter; blank text means no filter.
    pub fn set_description(&mut self, raw: &str) {
        let raw = raw.trim();
        self.description = (!raw.is_empty()).then(|| raw.to_string());
    }
}

// =============================================================================
// Sale Filter
// =============================================================================

/// Optional inclusive time window for `list_sales`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaleFilter {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl SaleFilter {
    /// Parses `data_inicio` / `data_fim`.
    ///
    /// Accepts RFC 3339 timestamps or plain dates. A plain start date means
    /// the start of that day; a plain end date means its last instant.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> ValidationResult<Self> {
        let start = start
            .filter(|s| !s.trim().is_empty())
            .map(|s| parse_bound("data_inicio", s, NaiveTime::MIN))
            .transpose()?;
        let end_of_day = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
            .unwrap_or(NaiveTime::MIN);
        let end = end
            .filter(|s| !s.trim().is_empty())
            .map(|s| parse_bound("data_fim", s, end_of_day))
            .transpose()?;
        Ok(SaleFilter { start, end })
    }

    /// Whether a sale falls within the window (both ends inclusive).
    pub fn matches(&self, sale: &Sale) -> bool {
        self.start.map_or(true, |s| sale.sale_timestamp >= s)
            && self.end.map_or(true, |e| sale.sale_timestamp <= e)
    }
}

fn parse_bound(field: &str, raw: &str, time_of_day: NaiveTime) -> ValidationResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(time_of_day).and_utc())
        .map_err(|e| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("'{raw}': {e}"),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
