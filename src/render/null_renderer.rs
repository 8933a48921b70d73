use crate::error::ChartResult;
use crate::render::{PlotFrame, PlotSurface};

/// Surface that draws nothing, used by tests and the CLI.
///
/// It still validates every frame so invalid domains surface before a real
/// backend is attached.
#[derive(Debug, Default)]
pub struct NullSurface {
    pub frames_presented: usize,
    pub last_curve_count: usize,
    pub last_marker_count: usize,
    pub last_x_domain: Option<(f64, f64)>,
    pub last_y_domain: Option<(f64, f64)>,
}

impl PlotSurface for NullSurface {
    fn present(&mut self, frame: &PlotFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_presented += 1;
        self.last_curve_count = frame.curves.len();
        self.last_marker_count = frame.markers.len();
        self.last_x_domain = Some(frame.x_domain);
        self.last_y_domain = Some(frame.y_domain);
        Ok(())
    }
}
