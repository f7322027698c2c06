//! Chart inputs derived from the forecast outlook.
//!
//! Everything here is pure and recomputed on every render; nothing is
//! cached between frames.

use crate::model::ForecastEntry;

/// Padding applied around the observed series for the suggested axis bounds.
const BOUNDS_MARGIN: f64 = 5.0;

/// Everything the temperature chart needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureTrend {
    /// Short weekday name per entry.
    pub labels: Vec<String>,
    /// (slot index, temperature °C) per entry, in entry order.
    pub points: Vec<(f64, f64)>,
    /// Suggested vertical bounds: min − margin / max + margin.
    pub bounds: (f64, f64),
}

impl TemperatureTrend {
    /// `None` when the outlook is empty; bounds are never computed from an
    /// empty series.
    pub fn from_outlook(outlook: &[ForecastEntry]) -> Option<Self> {
        if outlook.is_empty() {
            return None;
        }

        let labels = outlook
            .iter()
            .map(|e| e.stamp.format("%a").to_string())
            .collect();
        let points: Vec<(f64, f64)> = outlook
            .iter()
            .enumerate()
            .map(|(i, e)| (i as f64, e.temperature_c))
            .collect();

        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &(_, temp) in &points {
            lo = lo.min(temp);
            hi = hi.max(temp);
        }

        Some(Self {
            labels,
            points,
            bounds: (lo - BOUNDS_MARGIN, hi + BOUNDS_MARGIN),
        })
    }
}
