mod frame;
mod null_renderer;

pub use frame::PlotFrame;
pub use null_renderer::NullSurface;

use crate::error::ChartResult;

/// Contract implemented by whatever draws a chart.
///
/// Surfaces receive a fully resolved `PlotFrame` (both domains already
/// computed) so drawing code never touches viewport or auto-fit logic.
pub trait PlotSurface {
    fn present(&mut self, frame: &PlotFrame) -> ChartResult<()>;
}
