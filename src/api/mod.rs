//! Client side of the computation service: configuration, typed
//! requests/responses, plot extraction and per-chart sessions.

mod client;
mod config;
pub mod plot;
mod request;
pub mod response;
mod session;

pub use client::{ComputationService, HttpComputationClient};
pub use config::{API_URL_ENV, ClientConfig, DEFAULT_API_URL, TIMEOUT_ENV};
pub use plot::{Marker, MarkerKind, PlotData, normalize_fills};
pub use request::{
    BisectionRequest, DEFAULT_MAX_ITER, DEFAULT_SUBINTERVALS, DEFAULT_TOLERANCE,
    FixedPointRequest, GraphWindow, IntegrationRequest, IntegrationRule, LagrangeRequest,
    MAX_ITER_LIMIT, MethodKind, MethodRequest, NewtonRaphsonRequest,
};
pub use response::{MethodResponse, ResultSummary};
pub use session::ChartSession;
