//! Data models shared across the pipeline stages
//!
//! Each model is a plain value struct; the series itself is just an
//! ordered `Vec<PricePoint>` and stays immutable once fetched.

pub mod change;
pub mod price;
pub mod stats;

// Re-export commonly used types for convenience
pub use change::DailyChange;
pub use price::PricePoint;
pub use stats::PriceStatistics;
