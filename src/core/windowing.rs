use crate::core::DataPoint;

/// Returns points whose x falls inside an inclusive window.
///
/// Window bounds may be given in either order.
#[must_use]
pub fn points_in_x_window(points: &[DataPoint], start: f64, end: f64) -> Vec<DataPoint> {
    let (min_x, max_x) = ordered_bounds(start, end);

    points
        .iter()
        .copied()
        .filter(|point| point.x >= min_x && point.x <= max_x)
        .collect()
}

/// Thins a dense curve by keeping every `ceil(len / max_points)`-th sample.
///
/// Curves already within budget, or a zero budget, are returned untouched.
#[must_use]
pub fn downsample_points(points: &[DataPoint], max_points: usize) -> Vec<DataPoint> {
    if max_points == 0 || points.len() <= max_points {
        return points.to_vec();
    }

    let step = points.len().div_ceil(max_points);
    points.iter().copied().step_by(step).collect()
}

#[must_use]
pub(crate) fn ordered_bounds(start: f64, end: f64) -> (f64, f64) {
    if start <= end {
        (start, end)
    } else {
        (end, start)
    }
}

#[cfg(test)]
mod tests {
    use super::{downsample_points, points_in_x_window};
    use crate::core::DataPoint;

    fn ramp(len: usize) -> Vec<DataPoint> {
        (0..len)
            .map(|i| DataPoint::new(i as f64, 2.0 * i as f64))
            .collect()
    }

    #[test]
    fn window_filter_accepts_reversed_bounds() {
        let points = ramp(10);
        let visible = points_in_x_window(&points, 6.0, 3.0);
        let xs: Vec<f64> = visible.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn downsample_keeps_short_curves() {
        let points = ramp(10);
        assert_eq!(downsample_points(&points, 500), points);
    }

    #[test]
    fn downsample_uses_ceil_step() {
        let points = ramp(1501);
        let thinned = downsample_points(&points, 500);
        // step = ceil(1501 / 500) = 4
        assert_eq!(thinned.len(), 376);
        assert_eq!(thinned[1].x, 4.0);
        assert_eq!(thinned[0], points[0]);
    }
}
