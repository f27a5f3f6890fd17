//! Summary statistics models

/// Mean and median price of a series, recomputed after filtering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceStatistics {
    pub mean: f64,
    pub median: f64,
}
