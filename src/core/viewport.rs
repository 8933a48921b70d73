use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::DataPoint;
use crate::core::windowing::ordered_bounds;
use crate::core::y_autofit::{YAutofitTuning, compute_y_domain_tuned};
use crate::error::ChartResult;

/// Narrowest horizontal window the controller will ever produce.
///
/// The floor is applied as `start + MIN_DOMAIN_WIDTH`, so away from zero it
/// only holds up to the f64 spacing at `start`: the stored width may round
/// below it, or to zero once that spacing exceeds the floor.
pub const MIN_DOMAIN_WIDTH: f64 = 1e-15;

/// Full range assumed before any computation result arrives.
pub const DEFAULT_FULL_RANGE: (f64, f64) = (-1.0, 1.0);

/// Width multiplier of one mouse-wheel notch.
pub const WHEEL_ZOOM_STEP: f64 = 1.2;

/// Width multiplier of the zoom-in/zoom-out buttons.
pub const BUTTON_ZOOM_STEP: f64 = 1.5;

/// Translates a wheel delta into a width factor.
///
/// Scrolling down (`delta_y > 0`) widens the window; any other delta,
/// zero included, narrows it.
#[must_use]
pub fn resolve_wheel_zoom_factor(delta_y: f64) -> f64 {
    if delta_y > 0.0 {
        WHEEL_ZOOM_STEP
    } else {
        1.0 / WHEEL_ZOOM_STEP
    }
}

/// Zoomable, pannable horizontal window over one chart's curves.
///
/// `full_*` is the data extent reported by the computation service.
/// `visible_*` is the user-driven window and always stays inside it.
/// The vertical range is never stored: [`ViewportController::y_domain`]
/// derives it from the visible window on every call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportController {
    full_start: f64,
    full_end: f64,
    visible_start: f64,
    visible_end: f64,
    anchor: Option<f64>,
    autofit_tuning: YAutofitTuning,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(DEFAULT_FULL_RANGE.0, DEFAULT_FULL_RANGE.1)
    }
}

impl ViewportController {
    /// Creates a controller whose visible window equals the full range.
    #[must_use]
    pub fn new(full_start: f64, full_end: f64) -> Self {
        let (start, end) = normalize_full_range(full_start, full_end);
        Self {
            full_start: start,
            full_end: end,
            visible_start: start,
            visible_end: end,
            anchor: None,
            autofit_tuning: YAutofitTuning::default(),
        }
    }

    pub fn with_autofit_tuning(mut self, tuning: YAutofitTuning) -> ChartResult<Self> {
        self.autofit_tuning = tuning.validate()?;
        Ok(self)
    }

    #[must_use]
    pub fn autofit_tuning(&self) -> YAutofitTuning {
        self.autofit_tuning
    }

    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        (self.visible_start, self.visible_end)
    }

    #[must_use]
    pub fn full_range(&self) -> (f64, f64) {
        (self.full_start, self.full_end)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.visible_end - self.visible_start
    }

    #[must_use]
    pub fn anchor(&self) -> Option<f64> {
        self.anchor
    }

    #[must_use]
    pub fn midpoint(&self) -> f64 {
        (self.visible_start + self.visible_end) / 2.0
    }

    /// Replaces the full range with a fresh computation extent and reseeds the window.
    ///
    /// Reversed bounds are swapped, non-finite bounds fall back to
    /// [`DEFAULT_FULL_RANGE`], and a range narrower than
    /// [`MIN_DOMAIN_WIDTH`] is widened to one unit around its center.
    pub fn set_full_range(&mut self, full_start: f64, full_end: f64) {
        let (start, end) = normalize_full_range(full_start, full_end);
        self.full_start = start;
        self.full_end = end;
        self.reset_to_full();
    }

    pub fn reset_to_full(&mut self) {
        self.visible_start = self.full_start;
        self.visible_end = self.full_end;
        debug!(
            start = self.visible_start,
            end = self.visible_end,
            "viewport reset to full range"
        );
    }

    /// Scales the window width by `factor` around `anchor`.
    ///
    /// `factor < 1` zooms in, `factor > 1` zooms out. Without a finite
    /// explicit anchor the last pointer position is used, then the window
    /// midpoint.
    pub fn zoom_around(&mut self, factor: f64, anchor: Option<f64>) {
        let midpoint = self.midpoint();
        let center = anchor
            .filter(|value| value.is_finite())
            .or(self.anchor)
            .unwrap_or(midpoint);
        let width = self.width() * factor;
        let (start, end) = self.clamp_to_full(center - width / 2.0, center + width / 2.0);
        trace!(factor, center, start, end, "viewport zoom");
        self.visible_start = start;
        self.visible_end = end;
    }

    pub fn zoom_in(&mut self) {
        self.zoom_around(1.0 / BUTTON_ZOOM_STEP, None);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_around(BUTTON_ZOOM_STEP, None);
    }

    /// Applies one wheel notch: positive `delta_y` zooms out, anything else zooms in.
    pub fn zoom_by_wheel(&mut self, delta_y: f64) {
        let factor = resolve_wheel_zoom_factor(delta_y);
        self.zoom_around(factor, None);
    }

    /// Fits a candidate window inside the full range without shrinking it.
    ///
    /// The low bound is checked first, then the high bound, so a window wider
    /// than the full range ends pinned to the high bound and its low edge is
    /// then held at the full start, giving exactly the full range.
    #[must_use]
    pub fn clamp_to_full(&self, start: f64, end: f64) -> (f64, f64) {
        let start = if start.is_finite() {
            start
        } else {
            self.full_start
        };
        let width = MIN_DOMAIN_WIDTH.max(end - start);
        let mut a = start;
        let mut b = start + width;

        if a < self.full_start {
            b += self.full_start - a;
            a = self.full_start;
        }

        if b > self.full_end {
            a -= b - self.full_end;
            b = self.full_end;
        }

        if a < self.full_start {
            a = self.full_start;
        }

        (a, b)
    }

    /// Moves the window to the x span selected by a brush drag over `reference`.
    ///
    /// Indices may arrive in either order and are clamped to the curve.
    /// An empty reference curve leaves the window unchanged.
    pub fn pan_by_brush(&mut self, reference: &[DataPoint], start_index: usize, end_index: usize) {
        let Some(last) = reference.len().checked_sub(1) else {
            return;
        };

        let start_index = start_index.min(last);
        let end_index = end_index.min(last);
        let low = reference[start_index.min(end_index)].x;
        let high = reference[start_index.max(end_index)].x;
        let (start, end) = self.clamp_to_full(low, high);
        debug!(start_index, end_index, start, end, "viewport brush");
        self.visible_start = start;
        self.visible_end = end;
    }

    /// Records the horizontal coordinate under the pointer, if any.
    pub fn on_pointer_move(&mut self, active_x: Option<f64>) {
        if let Some(x) = active_x.filter(|value| value.is_finite()) {
            self.anchor = Some(x);
            trace!(anchor = x, "viewport anchor");
        }
    }

    /// Vertical range fitted to the given curves over the current window.
    #[must_use]
    pub fn y_domain<'a, I>(&self, curves: I) -> (f64, f64)
    where
        I: IntoIterator<Item = &'a [DataPoint]>,
    {
        compute_y_domain_tuned(curves, self.domain(), self.autofit_tuning)
    }
}

const COLLAPSED_RANGE_HALF_WIDTH: f64 = 0.5;

fn normalize_full_range(start: f64, end: f64) -> (f64, f64) {
    if !start.is_finite() || !end.is_finite() {
        return DEFAULT_FULL_RANGE;
    }

    let (start, end) = ordered_bounds(start, end);
    if end - start < MIN_DOMAIN_WIDTH {
        let center = (start + end) / 2.0;
        return (center - COLLAPSED_RANGE_HALF_WIDTH, center + COLLAPSED_RANGE_HALF_WIDTH);
    }

    (start, end)
}
