//! Price series models

use chrono::NaiveDate;

/// A single daily observation of the price series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}
