//! Pipeline stages: statistics, outlier filtering and chart rendering

pub mod chart_service;
pub mod filter_service;
pub mod stats_service;
