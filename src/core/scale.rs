use crate::core::types::Viewport;
use crate::error::{ChartError, ChartResult};

/// Linear mapping between a data interval and the horizontal pixel span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    /// Builds a scale over a `(min, max)` window such as the controller domain.
    pub fn from_window(window: (f64, f64)) -> ChartResult<Self> {
        Self::new(window.0, window.1)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn domain_to_pixel(self, value: f64, viewport: Viewport) -> ChartResult<f64> {
        ensure_viewport(viewport)?;

        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        Ok(normalized * f64::from(viewport.width))
    }

    pub fn pixel_to_domain(self, pixel: f64, viewport: Viewport) -> ChartResult<f64> {
        ensure_viewport(viewport)?;

        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = pixel / f64::from(viewport.width);
        Ok(self.domain_start + normalized * span)
    }
}

fn ensure_viewport(viewport: Viewport) -> ChartResult<()> {
    if viewport.is_valid() {
        return Ok(());
    }
    Err(ChartError::InvalidViewport {
        width: viewport.width,
        height: viewport.height,
    })
}

#[cfg(test)]
mod tests {
    use super::LinearScale;
    use crate::core::Viewport;
    use crate::error::ChartError;

    #[test]
    fn maps_window_edges_to_viewport_edges() {
        let scale = LinearScale::from_window((-15.0, 15.0)).expect("scale");
        let viewport = Viewport::new(600, 300);

        let left = scale.domain_to_pixel(-15.0, viewport).expect("left");
        let right = scale.domain_to_pixel(15.0, viewport).expect("right");
        assert!(left.abs() <= 1e-12);
        assert!((right - 600.0).abs() <= 1e-9);

        let center = scale.pixel_to_domain(300.0, viewport).expect("center");
        assert!(center.abs() <= 1e-12);
    }

    #[test]
    fn rejects_zero_width_viewport() {
        let scale = LinearScale::new(0.0, 1.0).expect("scale");
        let err = scale
            .pixel_to_domain(10.0, Viewport::new(0, 100))
            .expect_err("zero width must fail");
        assert!(matches!(err, ChartError::InvalidViewport { width: 0, .. }));
    }

    #[test]
    fn rejects_degenerate_domain() {
        assert!(LinearScale::new(2.0, 2.0).is_err());
        assert!(LinearScale::new(f64::NAN, 2.0).is_err());
    }
}
