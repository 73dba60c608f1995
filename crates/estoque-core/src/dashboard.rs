//! # Dashboard Aggregation
//!
//! Read-only rankings over the catalog and the sales ledger.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Dashboard Queries                                  │
//! │                                                                         │
//! │  sales ──┬──► recent_sales          newest first, first N              │
//! │          │                                                              │
//! │          ├──► sales_by_category     Σ quantity per category            │
//! │          │      + products            top N ranked, rest → other_total │
//! │          │      + categories                                            │
//! │          │                                                              │
//! │          └──► top_selling_products  Σ quantity per product, top N      │
//! │                 + products                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ordering
//! All sorts are stable. Equal timestamps keep ledger order; equal totals
//! keep the order in which the group first appears in the ledger. Sales
//! pointing at a product or category that cannot be found are skipped.

use std::collections::HashMap;

use crate::types::{Category, CategoryBreakdown, CategorySales, Product, Sale, TopProduct};

/// Sales ordered newest first, truncated to `limit`.
pub fn recent_sales(sales: &[Sale], limit: usize) -> Vec<Sale> {
    let mut sorted = sales.to_vec();
    sorted.sort_by(|a, b| b.sale_timestamp.cmp(&a.sale_timestamp));
    sorted.truncate(limit);
    sorted
}

/// Units sold per category: the `top_n` largest by quantity, the rest summed.
///
/// Totals saturate at `i64::MAX` instead of wrapping.
///
/// ## Example
/// ```text
/// totals {A: 10, B: 7, C: 5, D: 2}, top_n = 3
///   → ranked [A: 10, B: 7, C: 5], other_total 2
/// ```
pub fn sales_by_category(
    sales: &[Sale],
    products: &[Product],
    categories: &[Category],
    top_n: usize,
) -> CategoryBreakdown {
    let products: HashMap<i64, &Product> = products.iter().map(|p| (p.id, p)).collect();
    let categories: HashMap<i64, &Category> = categories.iter().map(|c| (c.id, c)).collect();

    let mut totals = Totals::default();
    for sale in sales {
        let Some(product) = products.get(&sale.product_id) else {
            continue;
        };
        let Some(category) = categories.get(&product.category_id) else {
            continue;
        };
        totals.add(category.id, sale.quantity);
    }

    let ranked = totals.into_ranked();
    let other_total = ranked
        .iter()
        .skip(top_n)
        .fold(0i64, |acc, (_, qty)| acc.saturating_add(*qty));

    CategoryBreakdown {
        ranked: ranked
            .into_iter()
            .take(top_n)
            .filter_map(|(id, quantity)| {
                categories.get(&id).map(|c| CategorySales {
                    name: c.description.clone(),
                    quantity,
                })
            })
            .collect(),
        other_total,
    }
}

/// Best-selling products with their current description and value.
pub fn top_selling_products(sales: &[Sale], products: &[Product], top_n: usize) -> Vec<TopProduct> {
    let products: HashMap<i64, &Product> = products.iter().map(|p| (p.id, p)).collect();

    let mut totals = Totals::default();
    for sale in sales.iter().filter(|s| products.contains_key(&s.product_id)) {
        totals.add(sale.product_id, sale.quantity);
    }

    totals
        .into_ranked()
        .into_iter()
        .take(top_n)
        .filter_map(|(id, quantity_sold)| {
            products.get(&id).map(|p| TopProduct {
                product_id: p.id,
                description: p.description.clone(),
                quantity_sold,
                unit_value: p.unit_value,
            })
        })
        .collect()
}

// =============================================================================
// Totals
// =============================================================================

/// Per-key sums that remember first-appearance order.
#[derive(Default)]
struct Totals {
    order: Vec<(i64, i64)>,
    index: HashMap<i64, usize>,
}

impl Totals {
    fn add(&mut self, key: i64, quantity: i64) {
        match self.index.get(&key) {
            Some(&i) => self.order[i].1 = self.order[i].1.saturating_add(quantity),
            None => {
                self.index.insert(key, self.order.len());
                self.order.push((key, quantity));
            }
        }
    }

    fn into_ranked(mut self) -> Vec<(i64, i64)> {
        self.order.sort_by(|a, b| b.1.cmp(&a.1));
        self.order
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn category(id: i64, description: &str) -> Category {
        Category {
            id,
            description: description.to_string(),
        }
    }

    fn product(id: i64, category_id: i64) -> Product {
        Product {
            id,
            description: format!("Produto {id}"),
            unit_value: dec!(2.50),
            stock_quantity: 100,
            suggested_quantity: 10,
            category_id,
        }
    }

    fn sales(entries: &[(i64, i64)]) -> Vec<Sale> {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        entries
            .iter()
            .enumerate()
            .map(|(i, &(product_id, quantity))| Sale {
                id: i as i64 + 1,
                product_id,
                quantity,
                sale_timestamp: base + Duration::minutes(i as i64),
            })
            .collect()
    }

    #[test]
    fn test_recent_sales_newest_first() {
        let ledger = sales(&[(1, 1), (1, 2), (1, 3), (1, 4), (1, 5)]);
        let recent = recent_sales(&ledger, 4);
        let ids: Vec<i64> = recent.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![5, 4, 3, 2]);
    }

    #[test]
    fn test_recent_sales_ties_keep_ledger_order() {
        let mut ledger = sales(&[(1, 1), (1, 1), (1, 1)]);
        let ts = ledger[0].sale_timestamp;
        for sale in &mut ledger {
            sale.sale_timestamp = ts;
        }
        let ids: Vec<i64> = recent_sales(&ledger, 4).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_recent_sales_empty() {
        assert!(recent_sales(&[], 4).is_empty());
    }

    #[test]
    fn test_sales_by_category_top_three_and_other() {
        let categories = vec![
            category(1, "A"),
            category(2, "B"),
            category(3, "C"),
            category(4, "D"),
        ];
        let products = vec![product(1, 1), product(2, 2), product(3, 3), product(4, 4)];
        let ledger = sales(&[(4, 2), (3, 5), (2, 7), (1, 4), (1, 6)]);

        let breakdown = sales_by_category(&ledger, &products, &categories, 3);
        let names: Vec<(&str, i64)> = breakdown
            .ranked
            .iter()
            .map(|c| (c.name.as_str(), c.quantity))
            .collect();
        assert_eq!(names, vec![("A", 10), ("B", 7), ("C", 5)]);
        assert_eq!(breakdown.other_total, 2);
    }

    #[test]
    fn test_sales_by_category_ties_by_first_appearance() {
        let categories = vec![category(1, "A"), category(2, "B")];
        let products = vec![product(1, 1), product(2, 2)];
        let ledger = sales(&[(2, 3), (1, 3)]);

        let breakdown = sales_by_category(&ledger, &products, &categories, 3);
        assert_eq!(breakdown.ranked[0].name, "B");
        assert_eq!(breakdown.ranked[1].name, "A");
        assert_eq!(breakdown.other_total, 0);
    }

    #[test]
    fn test_sales_by_category_skips_unresolved() {
        let categories = vec![category(1, "A")];
        let products = vec![product(1, 1), product(2, 99)];
        let ledger = sales(&[(1, 2), (2, 5), (42, 7)]);

        let breakdown = sales_by_category(&ledger, &products, &categories, 3);
        assert_eq!(breakdown.ranked.len(), 1);
        assert_eq!(breakdown.ranked[0].quantity, 2);
        assert_eq!(breakdown.other_total, 0);
    }

    #[test]
    fn test_top_selling_products() {
        let products: Vec<Product> = (1..=12).map(|id| product(id, 1)).collect();
        let entries: Vec<(i64, i64)> = (1..=12).map(|id| (id, id)).collect();
        let ledger = sales(&entries);

        let top = top_selling_products(&ledger, &products, 10);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].product_id, 12);
        assert_eq!(top[0].quantity_sold, 12);
        assert_eq!(top[0].unit_value, dec!(2.50));
        assert_eq!(top[9].product_id, 3);
    }

    #[test]
    fn test_top_selling_products_sums_and_skips_unknown() {
        let products = vec![product(1, 1), product(2, 1)];
        let ledger = sales(&[(2, 1), (1, 1), (2, 1), (9, 50)]);

        let top = top_selling_products(&ledger, &products, 10);
        let rows: Vec<(i64, i64)> = top.iter().map(|t| (t.product_id, t.quantity_sold)).collect();
        assert_eq!(rows, vec![(2, 2), (1, 1)]);
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let categories = vec![category(1, "A"), category(2, "B"), category(3, "C")];
        let products = vec![product(1, 1), product(2, 1), product(3, 2), product(4, 3)];
        let ledger = sales(&[(1, i64::MAX), (2, i64::MAX), (3, i64::MAX), (4, i64::MAX)]);

        let breakdown = sales_by_category(&ledger, &products, &categories, 1);
        assert_eq!(breakdown.ranked[0].name, "A");
        assert_eq!(breakdown.ranked[0].quantity, i64::MAX);
        assert_eq!(breakdown.other_total, i64::MAX);

        let top = top_selling_products(&sales(&[(1, i64::MAX), (1, 1)]), &products, 10);
        assert_eq!(top[0].quantity_sold, i64::MAX);
    }
}
