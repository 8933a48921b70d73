use serde::Serialize;

use crate::api::Marker;
use crate::api::response::TangentSegment;
use crate::core::Curve;
use crate::error::{ChartError, ChartResult};

/// Backend-agnostic scene for one chart draw pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotFrame {
    pub x_domain: (f64, f64),
    pub y_domain: (f64, f64),
    pub curves: Vec<Curve>,
    pub markers: Vec<Marker>,
    pub segments: Vec<TangentSegment>,
}

impl PlotFrame {
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.curves.iter().map(Curve::len).sum()
    }

    /// The x window may collapse to a single value; the y range may not.
    pub fn validate(&self) -> ChartResult<()> {
        let (x_start, x_end) = self.x_domain;
        if !x_start.is_finite() || !x_end.is_finite() || x_start > x_end {
            return Err(ChartError::InvalidData(format!(
                "x domain must be finite and ordered, got [{x_start}, {x_end}]"
            )));
        }

        let (y_start, y_end) = self.y_domain;
        if !y_start.is_finite() || !y_end.is_finite() || y_start >= y_end {
            return Err(ChartError::InvalidData(format!(
                "y domain must be finite and increasing, got [{y_start}, {y_end}]"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::PlotFrame;

    fn frame(x_domain: (f64, f64), y_domain: (f64, f64)) -> PlotFrame {
        PlotFrame {
            x_domain,
            y_domain,
            curves: Vec::new(),
            markers: Vec::new(),
            segments: Vec::new(),
        }
    }

    #[test]
    fn rejects_degenerate_domains() {
        assert!(frame((0.0, 1.0), (-1.0, 1.0)).validate().is_ok());
        assert!(frame((1.0, 1.0), (-1.0, 1.0)).validate().is_ok());
        assert!(frame((2.0, 1.0), (-1.0, 1.0)).validate().is_err());
        assert!(frame((0.0, 1.0), (1.0, 1.0)).validate().is_err());
        assert!(frame((0.0, 1.0), (f64::NAN, 1.0)).validate().is_err());
    }
}
