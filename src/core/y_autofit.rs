use serde::{Deserialize, Serialize};

use crate::core::DataPoint;
use crate::core::windowing::ordered_bounds;
use crate::error::{ChartError, ChartResult};

#[cfg(feature = "parallel-autofit")]
use rayon::prelude::*;

/// Vertical range used when nothing poolable is visible.
pub const DEFAULT_Y_DOMAIN: (f64, f64) = (-1.0, 1.0);

/// Tuning controls for the vertical auto-fit.
///
/// Zero is always forced into the fitted range; that part is not tunable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YAutofitTuning {
    /// Flat data is inflated by `max(min_flat_inflation, |y| * flat_inflation_ratio)`.
    pub flat_inflation_ratio: f64,
    pub min_flat_inflation: f64,
    /// Both ends are padded by `padding_ratio * max(min_padding_span, span)`.
    pub padding_ratio: f64,
    pub min_padding_span: f64,
}

impl Default for YAutofitTuning {
    fn default() -> Self {
        Self {
            flat_inflation_ratio: 0.1,
            min_flat_inflation: 1.0,
            padding_ratio: 0.08,
            min_padding_span: 1.0,
        }
    }
}

impl YAutofitTuning {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.flat_inflation_ratio.is_finite()
            || !self.padding_ratio.is_finite()
            || self.flat_inflation_ratio < 0.0
            || self.padding_ratio < 0.0
        {
            return Err(ChartError::InvalidData(
                "auto-fit ratios must be finite and >= 0".to_owned(),
            ));
        }

        if !self.min_flat_inflation.is_finite() || self.min_flat_inflation <= 0.0 {
            return Err(ChartError::InvalidData(
                "auto-fit flat inflation must be finite and > 0".to_owned(),
            ));
        }

        if !self.min_padding_span.is_finite() || self.min_padding_span < 0.0 {
            return Err(ChartError::InvalidData(
                "auto-fit padding span must be finite and >= 0".to_owned(),
            ));
        }

        Ok(self)
    }
}

/// Fits a vertical range to every active curve sample inside `domain`.
///
/// `domain` bounds may be given in either order. The result always brackets 0
/// and has `min < max`; an empty pool yields [`DEFAULT_Y_DOMAIN`].
#[must_use]
pub fn compute_y_domain<'a, I>(curves: I, domain: (f64, f64)) -> (f64, f64)
where
    I: IntoIterator<Item = &'a [DataPoint]>,
{
    compute_y_domain_tuned(curves, domain, YAutofitTuning::default())
}

#[must_use]
pub fn compute_y_domain_tuned<'a, I>(
    curves: I,
    domain: (f64, f64),
    tuning: YAutofitTuning,
) -> (f64, f64)
where
    I: IntoIterator<Item = &'a [DataPoint]>,
{
    let (min_x, max_x) = ordered_bounds(domain.0, domain.1);
    let curves: Vec<&[DataPoint]> = curves.into_iter().collect();

    let (mut min_y, mut max_y) = match pooled_extrema(&curves, min_x, max_x) {
        Some((min_y, max_y)) if min_y.is_finite() && max_y.is_finite() => (min_y, max_y),
        _ => return DEFAULT_Y_DOMAIN,
    };

    if min_y == max_y {
        let inflation = tuning
            .min_flat_inflation
            .max(min_y.abs() * tuning.flat_inflation_ratio);
        min_y -= inflation;
        max_y += inflation;
    }

    min_y = min_y.min(0.0);
    max_y = max_y.max(0.0);

    let pad = tuning.padding_ratio * tuning.min_padding_span.max((max_y - min_y).abs());
    let (low, high) = (min_y - pad, max_y + pad);

    // Extrema near f64::MAX overflow once padded.
    if !low.is_finite() || !high.is_finite() {
        return DEFAULT_Y_DOMAIN;
    }
    (low, high)
}

fn pooled_extrema(curves: &[&[DataPoint]], min_x: f64, max_x: f64) -> Option<(f64, f64)> {
    #[cfg(feature = "parallel-autofit")]
    {
        curves
            .par_iter()
            .filter_map(|curve| curve_extrema(curve, min_x, max_x))
            .reduce_with(merge_extrema)
    }

    #[cfg(not(feature = "parallel-autofit"))]
    {
        curves
            .iter()
            .filter_map(|curve| curve_extrema(curve, min_x, max_x))
            .reduce(merge_extrema)
    }
}

// NaN samples never win a comparison, so they drop out of the pool.
fn curve_extrema(points: &[DataPoint], min_x: f64, max_x: f64) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    let mut seen = false;

    for point in points {
        if point.x >= min_x && point.x <= max_x {
            seen = true;
            if point.y < min_y {
                min_y = point.y;
            }
            if point.y > max_y {
                max_y = point.y;
            }
        }
    }

    seen.then_some((min_y, max_y))
}

fn merge_extrema(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    let min_y = if b.0 < a.0 { b.0 } else { a.0 };
    let max_y = if b.1 > a.1 { b.1 } else { a.1 };
    (min_y, max_y)
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_Y_DOMAIN, YAutofitTuning, compute_y_domain, compute_y_domain_tuned};
    use crate::core::DataPoint;

    #[test]
    fn nan_samples_are_skipped() {
        let points = vec![
            DataPoint::new(0.0, f64::NAN),
            DataPoint::new(1.0, 2.0),
            DataPoint::new(2.0, -1.0),
        ];
        let (min_y, max_y) = compute_y_domain([points.as_slice()], (0.0, 2.0));
        let pad = 0.08 * 3.0;
        assert!((min_y - (-1.0 - pad)).abs() <= 1e-12);
        assert!((max_y - (2.0 + pad)).abs() <= 1e-12);
    }

    #[test]
    fn infinite_extrema_fall_back_to_default() {
        let points = vec![DataPoint::new(0.0, f64::INFINITY), DataPoint::new(1.0, 3.0)];
        assert_eq!(
            compute_y_domain([points.as_slice()], (-1.0, 1.0)),
            DEFAULT_Y_DOMAIN
        );
    }

    #[test]
    fn all_nan_pool_falls_back_to_default() {
        let points = vec![DataPoint::new(0.0, f64::NAN)];
        assert_eq!(
            compute_y_domain([points.as_slice()], (-1.0, 1.0)),
            DEFAULT_Y_DOMAIN
        );
    }

    #[test]
    fn tuning_rejects_negative_ratios() {
        let tuning = YAutofitTuning {
            padding_ratio: -0.1,
            ..YAutofitTuning::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn zero_padding_tuning_keeps_raw_envelope() {
        let tuning = YAutofitTuning {
            padding_ratio: 0.0,
            ..YAutofitTuning::default()
        };
        let points = vec![DataPoint::new(0.0, -2.0), DataPoint::new(1.0, 4.0)];
        assert_eq!(
            compute_y_domain_tuned([points.as_slice()], (0.0, 1.0), tuning),
            (-2.0, 4.0)
        );
    }

    #[test]
    fn padding_overflow_falls_back_to_default() {
        let wide = vec![DataPoint::new(0.0, 1e308), DataPoint::new(1.0, -1e308)];
        assert_eq!(
            compute_y_domain([wide.as_slice()], (0.0, 1.0)),
            DEFAULT_Y_DOMAIN
        );

        let near_max = vec![DataPoint::new(0.0, 1.7e308)];
        assert_eq!(
            compute_y_domain([near_max.as_slice()], (0.0, 1.0)),
            DEFAULT_Y_DOMAIN
        );
    }
}
