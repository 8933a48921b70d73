use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::api::{
    ClientConfig, ComputationService, MethodKind, MethodRequest, MethodResponse, PlotData,
};
use crate::core::{DataPoint, LinearScale, Viewport, ViewportController};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{ViewportCommand, apply_command};
use crate::render::{PlotFrame, PlotSurface};

/// One chart view: a method, its last good result and its viewport.
///
/// A new result replaces the plot and reseeds the viewport in one step.
/// A failed submission only records a message; everything on screen stays.
#[derive(Debug, Clone)]
pub struct ChartSession {
    method: MethodKind,
    controller: ViewportController,
    plot: PlotData,
    last_result: Option<MethodResponse>,
    last_error: Option<String>,
    received_at: Option<DateTime<Utc>>,
    max_curve_points: usize,
}

impl ChartSession {
    #[must_use]
    pub fn new(method: MethodKind) -> Self {
        Self {
            method,
            controller: ViewportController::default(),
            plot: PlotData::empty(),
            last_result: None,
            last_error: None,
            received_at: None,
            max_curve_points: ClientConfig::default().max_curve_points,
        }
    }

    #[must_use]
    pub fn from_config(method: MethodKind, config: &ClientConfig) -> Self {
        Self::new(method).with_max_curve_points(config.max_curve_points)
    }

    #[must_use]
    pub fn with_max_curve_points(mut self, max_curve_points: usize) -> Self {
        self.max_curve_points = max_curve_points;
        self
    }

    #[must_use]
    pub fn method(&self) -> MethodKind {
        self.method
    }

    #[must_use]
    pub fn controller(&self) -> &ViewportController {
        &self.controller
    }

    #[must_use]
    pub fn plot(&self) -> &PlotData {
        &self.plot
    }

    #[must_use]
    pub fn last_result(&self) -> Option<&MethodResponse> {
        self.last_result.as_ref()
    }

    /// User-facing message of the most recent failed submission.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn received_at(&self) -> Option<DateTime<Utc>> {
        self.received_at
    }

    /// Sends `request` and applies the result, or records the failure.
    pub fn submit<S>(&mut self, service: &S, request: &MethodRequest) -> ChartResult<()>
    where
        S: ComputationService + ?Sized,
    {
        let outcome = self
            .ensure_method(request.kind())
            .and_then(|()| service.compute(request))
            .and_then(|response| self.apply_response(response));

        if let Err(err) = &outcome {
            self.record_failure(err);
        }
        outcome
    }

    /// Installs a decoded result: new plot, reseeded viewport, cleared error.
    pub fn apply_response(&mut self, response: MethodResponse) -> ChartResult<()> {
        self.ensure_method(response.kind())?;

        let plot = PlotData::from_response(&response, self.max_curve_points);
        self.controller
            .set_full_range(plot.full_range.0, plot.full_range.1);
        self.plot = plot;
        self.last_result = Some(response);
        self.last_error = None;
        self.received_at = Some(Utc::now());
        debug!(
            method = %self.method,
            full_start = self.controller.full_range().0,
            full_end = self.controller.full_range().1,
            "applied computation result"
        );
        Ok(())
    }

    pub fn record_failure(&mut self, err: &ChartError) {
        warn!(method = %self.method, error = %err, "computation failed; keeping last result");
        self.last_error = Some(err.to_string());
    }

    pub fn handle(&mut self, command: ViewportCommand) {
        apply_command(&mut self.controller, self.plot.reference_points(), command);
    }

    /// Maps a pointer pixel reported by the surface to a data x coordinate.
    pub fn pointer_pixel_to_x(&self, pixel: f64, viewport: Viewport) -> ChartResult<f64> {
        LinearScale::from_window(self.controller.domain())?.pixel_to_domain(pixel, viewport)
    }

    /// Pixel flavour of [`ViewportCommand::PointerMove`]; `None` means outside the plot.
    pub fn on_pointer_pixel(&mut self, pixel: Option<f64>, viewport: Viewport) -> ChartResult<()> {
        let x = pixel
            .map(|pixel| self.pointer_pixel_to_x(pixel, viewport))
            .transpose()?;
        self.controller.on_pointer_move(x);
        Ok(())
    }

    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        self.controller.domain()
    }

    /// Vertical range over the auto-fit curves and poolable markers.
    #[must_use]
    pub fn y_domain(&self) -> (f64, f64) {
        let marker_points: Vec<DataPoint> = self.plot.autofit_marker_points();
        self.controller.y_domain(
            self.plot
                .autofit_curves()
                .chain(std::iter::once(marker_points.as_slice())),
        )
    }

    #[must_use]
    pub fn frame(&self) -> PlotFrame {
        PlotFrame {
            x_domain: self.domain(),
            y_domain: self.y_domain(),
            curves: self.plot.curves.values().cloned().collect(),
            markers: self.plot.markers.clone(),
            segments: self.plot.segments.clone(),
        }
    }

    pub fn present<S>(&self, surface: &mut S) -> ChartResult<()>
    where
        S: PlotSurface + ?Sized,
    {
        surface.present(&self.frame())
    }

    fn ensure_method(&self, kind: MethodKind) -> ChartResult<()> {
        if kind != self.method {
            return Err(ChartError::InvalidRequest(format!(
                "session shows {} results, got {kind}",
                self.method
            )));
        }
        Ok(())
    }
}
