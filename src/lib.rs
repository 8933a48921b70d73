//! numview: client and chart controller for a remote numeric-methods service.
//!
//! The crate builds typed requests for five methods (bisection, fixed point,
//! Newton-Raphson, Lagrange interpolation, numerical integration), decodes
//! the service's results, and drives an interactive horizontal viewport with
//! vertical auto-fit over the returned curves.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartSession, ClientConfig, MethodKind, MethodRequest, MethodResponse};
pub use core::ViewportController;
pub use error::{ChartError, ChartResult};
