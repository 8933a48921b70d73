//! Gesture vocabulary reported by a rendering surface.
//!
//! Every gesture maps onto one [`ViewportController`] operation and runs to
//! completion before the next one is applied.

use serde::{Deserialize, Serialize};

use crate::core::{DataPoint, ViewportController};

/// Index pair reported by a brush (range selector) drag.
///
/// Surfaces may report a missing end while the drag is being set up; such a
/// selection is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrushSelection {
    pub start_index: Option<usize>,
    pub end_index: Option<usize>,
}

impl BrushSelection {
    #[must_use]
    pub fn new(start_index: usize, end_index: usize) -> Self {
        Self {
            start_index: Some(start_index),
            end_index: Some(end_index),
        }
    }

    #[must_use]
    pub fn indices(self) -> Option<(usize, usize)> {
        Some((self.start_index?, self.end_index?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ViewportCommand {
    /// Pointer moved; `x` is the data coordinate under it, when inside the plot.
    PointerMove { x: Option<f64> },
    Brush(BrushSelection),
    ZoomIn,
    ZoomOut,
    /// Programmatic zoom; `anchor` overrides the hover anchor for this step.
    Zoom { factor: f64, anchor: Option<f64> },
    Reset,
    Wheel { delta_y: f64 },
}

/// Applies one gesture to `controller`.
///
/// `reference` is the curve brush indices point into.
pub fn apply_command(
    controller: &mut ViewportController,
    reference: &[DataPoint],
    command: ViewportCommand,
) {
    match command {
        ViewportCommand::PointerMove { x } => controller.on_pointer_move(x),
        ViewportCommand::Brush(selection) => {
            if let Some((start, end)) = selection.indices() {
                controller.pan_by_brush(reference, start, end);
            }
        }
        ViewportCommand::ZoomIn => controller.zoom_in(),
        ViewportCommand::ZoomOut => controller.zoom_out(),
        ViewportCommand::Zoom { factor, anchor } => controller.zoom_around(factor, anchor),
        ViewportCommand::Reset => controller.reset_to_full(),
        ViewportCommand::Wheel { delta_y } => controller.zoom_by_wheel(delta_y),
    }
}

#[cfg(test)]
mod tests {
    use super::{BrushSelection, ViewportCommand, apply_command};
    use crate::core::{DataPoint, ViewportController};

    fn reference() -> Vec<DataPoint> {
        (0..=10)
            .map(|i| DataPoint::new(f64::from(i), 0.0))
            .collect()
    }

    #[test]
    fn incomplete_brush_is_ignored() {
        let mut controller = ViewportController::new(0.0, 10.0);
        let selection = BrushSelection {
            start_index: Some(2),
            end_index: None,
        };
        apply_command(&mut controller, &reference(), ViewportCommand::Brush(selection));
        assert_eq!(controller.domain(), (0.0, 10.0));
    }

    #[test]
    fn reset_restores_full_range_after_zoom() {
        let mut controller = ViewportController::new(0.0, 10.0);
        let reference = reference();
        apply_command(&mut controller, &reference, ViewportCommand::ZoomIn);
        assert!(controller.width() < 10.0);
        apply_command(&mut controller, &reference, ViewportCommand::Reset);
        assert_eq!(controller.domain(), (0.0, 10.0));
    }

    #[test]
    fn command_round_trips_through_json() {
        let command = ViewportCommand::Wheel { delta_y: -120.0 };
        let raw = serde_json::to_string(&command).expect("serialize");
        let parsed: ViewportCommand = serde_json::from_str(&raw).expect("parse");
        assert_eq!(parsed, command);
    }
}
