use std::path::Path;

use plotters::element::DashedPathElement;
use plotters::prelude::*;
use plotters::style::full_palette::ORANGE;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{DailyChange, PricePoint, PriceStatistics};

/// Day-over-day move of at least this many percent counts as a jump/drop
pub const MOVE_THRESHOLD_PCT: f64 = 10.0;

const CHART_WIDTH: u32 = 1280;
const CHART_HEIGHT: u32 = 600;

const JUMP_COLOR: RGBColor = RGBColor(0x00, 0x7b, 0xff);
const DROP_COLOR: RGBColor = RGBColor(0xff, 0x00, 0x33);

/// Chart rendering errors
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Not enough price data to generate chart (minimum 2 points required)")]
    NotEnoughData,
    #[error("Failed to render chart: {0}")]
    Render(String),
}

/// Derive per-point changes from the immediately preceding point.
///
/// The result runs parallel to the input; the first point has no prior
/// point and carries `None`. The series itself stays untouched.
pub fn compute_daily_changes(series: &[PricePoint]) -> Vec<Option<DailyChange>> {
    series
        .iter()
        .enumerate()
        .map(|(i, point)| {
            if i == 0 {
                return None;
            }
            let prev = series[i - 1].price;
            let absolute = point.price - prev;
            Some(DailyChange {
                absolute,
                percent: absolute / prev * 100.0,
            })
        })
        .collect()
}

/// Split a series into jump points (>= +10% day-over-day) and drop points
/// (<= -10%). The first point has no defined change and is never
/// classified.
pub fn classify_moves(
    series: &[PricePoint],
    changes: &[Option<DailyChange>],
) -> (Vec<PricePoint>, Vec<PricePoint>) {
    let mut jumps = Vec::new();
    let mut drops = Vec::new();

    for (point, change) in series.iter().zip(changes) {
        if let Some(change) = change {
            if change.percent >= MOVE_THRESHOLD_PCT {
                jumps.push(*point);
            } else if change.percent <= -MOVE_THRESHOLD_PCT {
                drops.push(*point);
            }
        }
    }

    (jumps, drops)
}

/// Render the annotated price chart as an SVG file.
///
/// Draws the full original series as a thin black line, triangle markers
/// on jumps, cross markers on drops, and four dashed reference lines for
/// the original and filtered mean/median. Jump/drop classification always
/// runs over the original series, not the filtered one.
pub fn render_chart(
    series: &[PricePoint],
    original: &PriceStatistics,
    filtered: &PriceStatistics,
    output_path: &Path,
) -> Result<(), ChartError> {
    if series.len() < 2 {
        return Err(ChartError::NotEnoughData);
    }

    let changes = compute_daily_changes(series);
    let (jumps, drops) = classify_moves(series, &changes);
    info!(
        "Classified {} jumps and {} drops over {} points",
        jumps.len(),
        drops.len(),
        series.len()
    );

    let root = SVGBackend::new(output_path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::Render(e.to_string()))?;

    // Y range must cover the prices and all four reference lines
    let reference_values = [
        original.mean,
        original.median,
        filtered.mean,
        filtered.median,
    ];
    let min_price = series
        .iter()
        .map(|p| p.price)
        .chain(reference_values)
        .fold(f64::INFINITY, f64::min);
    let max_price = series
        .iter()
        .map(|p| p.price)
        .chain(reference_values)
        .fold(f64::NEG_INFINITY, f64::max);

    let price_range = (max_price - min_price).max(1e-8);
    let padding = price_range * 0.1;
    let y_min = (min_price - padding).max(0.0);
    let y_max = max_price + padding;

    let x_min = series[0].date;
    let x_max = series[series.len() - 1].date;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Ethereum Price - Last 365 Days",
            ("sans-serif", 30.0).into_font(),
        )
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| ChartError::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Price (USD)")
        .draw()
        .map_err(|e| ChartError::Render(e.to_string()))?;

    chart
        .draw_series(LineSeries::new(
            series.iter().map(|p| (p.date, p.price)),
            BLACK.stroke_width(1),
        ))
        .map_err(|e| ChartError::Render(e.to_string()))?
        .label("ETH Price")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK));

    chart
        .draw_series(
            jumps
                .iter()
                .map(|p| TriangleMarker::new((p.date, p.price), 6, JUMP_COLOR.filled())),
        )
        .map_err(|e| ChartError::Render(e.to_string()))?
        .label("Jumps > 10%")
        .legend(|(x, y)| TriangleMarker::new((x + 10, y), 6, JUMP_COLOR.filled()));

    chart
        .draw_series(
            drops
                .iter()
                .map(|p| Cross::new((p.date, p.price), 5, DROP_COLOR.stroke_width(2))),
        )
        .map_err(|e| ChartError::Render(e.to_string()))?
        .label("Drops > 10%")
        .legend(|(x, y)| Cross::new((x + 10, y), 5, DROP_COLOR.stroke_width(2)));

    let references = [
        (original.mean, RED, format!("Avg: ${:.2}", original.mean)),
        (
            original.median,
            ORANGE,
            format!("Median: ${:.2}", original.median),
        ),
        (
            filtered.mean,
            GREEN,
            format!("Filtered Avg: ${:.2}", filtered.mean),
        ),
        (
            filtered.median,
            BLUE,
            format!("Filtered Median: ${:.2}", filtered.median),
        ),
    ];

    for (value, color, label) in references {
        chart
            .draw_series(std::iter::once(DashedPathElement::new(
                vec![(x_min, value), (x_max, value)],
                6,
                4,
                color.stroke_width(1),
            )))
            .map_err(|e| ChartError::Render(e.to_string()))?
            .label(label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(1))
            });
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()
        .map_err(|e| ChartError::Render(e.to_string()))?;

    root.present()
        .map_err(|e| ChartError::Render(e.to_string()))?;

    Ok(())
}

/// Open the rendered chart in the platform's default viewer, best effort.
/// A missing opener only logs a warning; the file is already on disk.
pub fn open_in_viewer(path: &Path) {
    let result = if cfg!(target_os = "windows") {
        std::process::Command::new("cmd")
            .args(["/C", "start", ""])
            .arg(path)
            .spawn()
    } else if cfg!(target_os = "macos") {
        std::process::Command::new("open").arg(path).spawn()
    } else {
        std::process::Command::new("xdg-open").arg(path).spawn()
    };

    match result {
        Ok(_) => info!("Opened {} in the default viewer", path.display()),
        Err(e) => warn!(
            "Could not open {} automatically: {}",
            path.display(),
            e
        ),
    }
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

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_first_point_has_no_change() {
        let series = series_of(&[100.0, 110.0]);
        let changes = compute_daily_changes(&series);
        assert_eq!(changes.len(), 2);
        assert!(changes[0].is_none());
        assert!(changes[1].is_some());
    }

    #[test]
    fn test_change_formula() {
        let series = series_of(&[100.0, 115.0, 90.0, 100.0]);
        let changes = compute_daily_changes(&series);

        assert!(changes[0].is_none());
        let second = changes[1].unwrap();
        assert_close(second.absolute, 15.0);
        assert_close(second.percent, 15.0);

        let third = changes[2].unwrap();
        assert_close(third.absolute, -25.0);
        assert_close(third.percent, -25.0 / 115.0 * 100.0);

        let fourth = changes[3].unwrap();
        assert_close(fourth.absolute, 10.0);
        assert_close(fourth.percent, 10.0 / 90.0 * 100.0);
    }

    #[test]
    fn test_scenario_jumps_and_drops() {
        // +15%, -21.74%, +11.11% -> jumps on days 2 and 4, drop on day 3
        let series = series_of(&[100.0, 115.0, 90.0, 100.0]);
        let changes = compute_daily_changes(&series);
        let (jumps, drops) = classify_moves(&series, &changes);

        assert_eq!(
            jumps.iter().map(|p| p.date).collect::<Vec<_>>(),
            vec![series[1].date, series[3].date]
        );
        assert_eq!(
            drops.iter().map(|p| p.date).collect::<Vec<_>>(),
            vec![series[2].date]
        );
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let series = series_of(&[100.0, 110.0, 99.0]);
        let changes = compute_daily_changes(&series);
        let (jumps, drops) = classify_moves(&series, &changes);
        // exactly +10% counts as a jump; exactly -10% counts as a drop
        assert_eq!(jumps.len(), 1);
        assert_eq!(drops.len(), 1);
    }

    #[test]
    fn test_quiet_series_has_no_moves() {
        let series = series_of(&[100.0, 105.0, 101.0, 97.0]);
        let changes = compute_daily_changes(&series);
        let (jumps, drops) = classify_moves(&series, &changes);
        assert!(jumps.is_empty());
        assert!(drops.is_empty());
    }

    #[test]
    fn test_render_needs_two_points() {
        let series = series_of(&[100.0]);
        let stats = PriceStatistics {
            mean: 100.0,
            median: 100.0,
        };
        let out = std::env::temp_dir().join("ethwatch_too_small.svg");
        assert!(matches!(
            render_chart(&series, &stats, &stats, &out),
            Err(ChartError::NotEnoughData)
        ));
    }

    #[test]
    fn test_render_writes_svg_file() {
        let series = series_of(&[100.0, 115.0, 90.0, 100.0]);
        let original = PriceStatistics {
            mean: 101.25,
            median: 100.0,
        };
        let filtered = original;

        let out = std::env::temp_dir().join("ethwatch_chart_test.svg");
        render_chart(&series, &original, &filtered, &out).unwrap();

        let contents = std::fs::read_to_string(&out).unwrap();
        assert!(contents.contains("<svg"));
        let _ = std::fs::remove_file(&out);
    }
}
