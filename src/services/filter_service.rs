use crate::models::{PricePoint, PriceStatistics};

/// Lower edge of the outlier band, as a multiple of the statistic
pub const LOWER_BAND: f64 = 0.55;
/// Upper edge of the outlier band, as a multiple of the statistic
pub const UPPER_BAND: f64 = 1.55;

/// Drop points whose price falls outside the mean band or the median band.
///
/// A point survives only if it lies within `[0.55*mean, 1.55*mean]` AND
/// within `[0.55*median, 1.55*median]`. The two bands can disagree and
/// the intersection is intentional. Order is preserved and the result may
/// be empty; recomputing statistics on an empty result fails explicitly
/// downstream instead of producing NaN here.
pub fn filter_outliers(series: &[PricePoint], stats: &PriceStatistics) -> Vec<PricePoint> {
    let mean_low = LOWER_BAND * stats.mean;
    let mean_high = UPPER_BAND * stats.mean;
    let median_low = LOWER_BAND * stats.median;
    let median_high = UPPER_BAND * stats.median;

    series
        .iter()
        .filter(|p| {
            p.price >= mean_low
                && p.price <= mean_high
                && p.price >= median_low
                && p.price <= median_high
        })
        .copied()
        .collect()
}
