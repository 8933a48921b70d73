pub mod scale;
pub mod types;
pub mod viewport;
pub mod windowing;
pub mod y_autofit;

pub use scale::LinearScale;
pub use types::{Curve, DataPoint, Viewport};
pub use viewport::{
    BUTTON_ZOOM_STEP, DEFAULT_FULL_RANGE, MIN_DOMAIN_WIDTH, ViewportController, WHEEL_ZOOM_STEP,
    resolve_wheel_zoom_factor,
};
pub use windowing::{downsample_points, points_in_x_window};
pub use y_autofit::{DEFAULT_Y_DOMAIN, YAutofitTuning, compute_y_domain, compute_y_domain_tuned};
