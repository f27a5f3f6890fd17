//! Day-over-day change models

/// Change of a point relative to the immediately preceding point.
///
/// Derived as a parallel sequence alongside the series; the first point
/// has no preceding point and therefore no `DailyChange`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyChange {
    pub absolute: f64,
    pub percent: f64,
}
