use thiserror::Error;

use crate::models::{PricePoint, PriceStatistics};

/// Statistics errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    #[error("Cannot compute statistics over an empty price series")]
    EmptyInput,
}

/// Compute the arithmetic mean and the median of a price series.
///
/// Median uses the standard definition: the average of the two middle
/// values for an even-length series. The series itself is not reordered;
/// the median works on a sorted copy of the prices.
pub fn calculate_statistics(series: &[PricePoint]) -> Result<PriceStatistics, StatsError> {
    if series.is_empty() {
        return Err(StatsError::EmptyInput);
    }

    let sum: f64 = series.iter().map(|p| p.price).sum();
    let mean = sum / series.len() as f64;

    let mut prices: Vec<f64> = series.iter().map(|p| p.price).collect();
    prices.sort_by(|a, b| a.total_cmp(b));

    let mid = prices.len() / 2;
    let median = if prices.len() % 2 == 0 {
        (prices[mid - 1] + prices[mid]) / 2.0
    } else {
        prices[mid]
    };

    Ok(PriceStatistics { mean, median })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series_of(prices: &[f64]) -> Vec<PricePoint> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        prices
            .iter()
            .enumerate()
            .map(|(i, &price)| PricePoint {
                date: start + chrono::Days::new(i as u64),
                price,
            })
            .collect()
    }

    #[test]
    fn test_mean_and_median_even_length() {
        let series = series_of(&[100.0, 115.0, 90.0, 100.0]);
        let stats = calculate_statistics(&series).unwrap();
        assert_eq!(stats.mean, 101.25);
        assert_eq!(stats.median, 100.0);
    }

    #[test]
    fn test_median_odd_length() {
        let series = series_of(&[5.0, 1.0, 3.0]);
        let stats = calculate_statistics(&series).unwrap();
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.mean, 3.0);
    }

    #[test]
    fn test_single_point_mean_equals_median() {
        let series = series_of(&[42.5]);
        let stats = calculate_statistics(&series).unwrap();
        assert_eq!(stats.mean, 42.5);
        assert_eq!(stats.median, 42.5);
    }

    #[test]
    fn test_empty_series_is_an_error() {
        assert_eq!(calculate_statistics(&[]), Err(StatsError::EmptyInput));
    }

    #[test]
    fn test_mean_and_median_within_price_bounds() {
        for prices in [
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            vec![1000.0, 2.0, 3.5],
            vec![7.0, 7.0, 7.0, 7.0],
            vec![0.001, 9999.0],
        ] {
            let series = series_of(&prices);
            let stats = calculate_statistics(&series).unwrap();
            let min = prices.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            assert!(stats.mean >= min && stats.mean <= max);
            assert!(stats.median >= min && stats.median <= max);
        }
    }
}
