//! HTTP handlers, one module per resource.

pub mod categories;
pub mod dashboard;
pub mod health;
pub mod products;
pub mod quotes;
pub mod sales;
pub mod users;
