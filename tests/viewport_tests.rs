use approx::assert_abs_diff_eq;
use numview::core::{
    BUTTON_ZOOM_STEP, DataPoint, MIN_DOMAIN_WIDTH, ViewportController, WHEEL_ZOOM_STEP,
};
use numview::interaction::{BrushSelection, ViewportCommand, apply_command};

fn parabola_half_steps() -> Vec<DataPoint> {
    (0..=60)
        .map(|i| {
            let x = f64::from(i) * 0.5 - 15.0;
            DataPoint::new(x, x * x)
        })
        .collect()
}

fn integer_ramp(len: u32) -> Vec<DataPoint> {
    (0..len)
        .map(|i| DataPoint::new(f64::from(i), f64::from(i)))
        .collect()
}

#[test]
fn new_controller_shows_full_range() {
    let controller = ViewportController::new(-15.0, 15.0);
    assert_eq!(controller.domain(), (-15.0, 15.0));
    assert_eq!(controller.full_range(), (-15.0, 15.0));
    assert_eq!(controller.anchor(), None);
}

#[test]
fn zoom_in_around_origin_halves_window_and_refits_parabola() {
    let curve = parabola_half_steps();
    let mut controller = ViewportController::new(-15.0, 15.0);

    controller.zoom_around(0.5, Some(0.0));
    assert_eq!(controller.domain(), (-7.5, 7.5));

    let (y_min, y_max) = controller.y_domain([curve.as_slice()]);
    let pad = 0.08 * 56.25;
    assert_abs_diff_eq!(y_min, -pad, epsilon = 1e-9);
    assert_abs_diff_eq!(y_max, 56.25 + pad, epsilon = 1e-9);
}

#[test]
fn zoom_near_edge_slides_window_back_inside() {
    let mut controller = ViewportController::new(0.0, 10.0);
    controller.zoom_around(0.5, Some(9.0));
    let (start, end) = controller.domain();
    assert_abs_diff_eq!(start, 5.0, epsilon = 1e-12);
    assert_abs_diff_eq!(end, 10.0, epsilon = 1e-12);
}

#[test]
fn zoom_out_past_full_range_pins_to_full_range() {
    let mut controller = ViewportController::new(0.0, 10.0);
    controller.zoom_around(0.5, Some(2.0));
    controller.zoom_around(10.0, Some(2.0));
    assert_eq!(controller.domain(), (0.0, 10.0));
}

#[test]
fn zoom_uses_pointer_anchor_when_none_given() {
    let mut controller = ViewportController::new(0.0, 100.0);
    controller.on_pointer_move(Some(40.0));
    controller.zoom_around(0.5, None);
    assert_eq!(controller.domain(), (15.0, 65.0));
}

#[test]
fn pointer_leaving_plot_keeps_previous_anchor() {
    let mut controller = ViewportController::new(0.0, 100.0);
    controller.on_pointer_move(Some(40.0));
    controller.on_pointer_move(None);
    controller.on_pointer_move(Some(f64::NAN));
    assert_eq!(controller.anchor(), Some(40.0));
}

#[test]
fn button_zoom_scales_width_by_button_step() {
    let mut controller = ViewportController::new(0.0, 90.0);
    controller.zoom_in();
    assert_abs_diff_eq!(controller.width(), 90.0 / BUTTON_ZOOM_STEP, epsilon = 1e-9);
    assert_abs_diff_eq!(controller.midpoint(), 45.0, epsilon = 1e-9);

    controller.zoom_out();
    let (start, end) = controller.domain();
    assert_abs_diff_eq!(start, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(end, 90.0, epsilon = 1e-9);
}

#[test]
fn wheel_down_zooms_out_and_wheel_up_zooms_in() {
    let mut controller = ViewportController::new(0.0, 10.0);
    controller.zoom_by_wheel(120.0);
    assert_eq!(controller.domain(), (0.0, 10.0));

    controller.zoom_by_wheel(-120.0);
    assert_abs_diff_eq!(controller.width(), 10.0 / WHEEL_ZOOM_STEP, epsilon = 1e-9);
    assert_abs_diff_eq!(controller.midpoint(), 5.0, epsilon = 1e-9);
}

#[test]
fn zero_wheel_delta_zooms_in() {
    let mut controller = ViewportController::new(0.0, 12.0);
    controller.zoom_by_wheel(0.0);
    assert_abs_diff_eq!(controller.width(), 10.0, epsilon = 1e-9);
}

#[test]
fn brush_with_reversed_indices_selects_ordered_span() {
    let reference = integer_ramp(100);
    let mut controller = ViewportController::new(0.0, 99.0);

    controller.pan_by_brush(&reference, 40, 20);
    assert_eq!(controller.domain(), (20.0, 40.0));
}

#[test]
fn brush_indices_past_curve_end_are_clamped() {
    let reference = integer_ramp(10);
    let mut controller = ViewportController::new(0.0, 9.0);

    controller.pan_by_brush(&reference, 5, 500);
    assert_eq!(controller.domain(), (5.0, 9.0));
}

#[test]
fn brush_on_single_point_keeps_minimum_width() {
    let reference = integer_ramp(10);
    let mut controller = ViewportController::new(0.0, 9.0);

    controller.pan_by_brush(&reference, 3, 3);
    let (start, end) = controller.domain();
    assert_eq!(start, 3.0);
    assert!(end > start);
    assert!(end - start <= 2.0 * MIN_DOMAIN_WIDTH + f64::EPSILON * 4.0);
}

#[test]
fn brush_over_empty_reference_is_ignored() {
    let mut controller = ViewportController::new(0.0, 9.0);
    controller.zoom_around(0.5, Some(4.5));
    let before = controller.domain();

    controller.pan_by_brush(&[], 0, 3);
    assert_eq!(controller.domain(), before);
}

#[test]
fn reset_follows_latest_full_range() {
    let mut controller = ViewportController::new(-15.0, 15.0);
    controller.zoom_around(0.5, Some(0.0));

    controller.set_full_range(0.0, 100.0);
    assert_eq!(controller.domain(), (0.0, 100.0));

    controller.zoom_around(0.25, Some(50.0));
    controller.reset_to_full();
    assert_eq!(controller.domain(), (0.0, 100.0));
}

#[test]
fn clamp_shifts_windows_without_shrinking() {
    let controller = ViewportController::new(0.0, 10.0);
    assert_eq!(controller.clamp_to_full(-2.0, 3.0), (0.0, 5.0));
    assert_eq!(controller.clamp_to_full(8.0, 13.0), (5.0, 10.0));
    assert_eq!(controller.clamp_to_full(-5.0, 20.0), (0.0, 10.0));
}

#[test]
fn clamp_replaces_non_finite_start_with_full_start() {
    let controller = ViewportController::new(0.0, 10.0);
    let (start, end) = controller.clamp_to_full(f64::NAN, 4.0);
    assert_eq!((start, end), (0.0, 4.0));
}

#[test]
fn commands_drive_the_same_operations() {
    let reference = integer_ramp(100);
    let mut controller = ViewportController::new(0.0, 99.0);

    apply_command(
        &mut controller,
        &reference,
        ViewportCommand::Brush(BrushSelection::new(60, 30)),
    );
    assert_eq!(controller.domain(), (30.0, 60.0));

    apply_command(
        &mut controller,
        &reference,
        ViewportCommand::Zoom {
            factor: 2.0,
            anchor: Some(45.0),
        },
    );
    assert_eq!(controller.domain(), (15.0, 75.0));

    apply_command(&mut controller, &reference, ViewportCommand::Reset);
    assert_eq!(controller.domain(), (0.0, 99.0));
}
