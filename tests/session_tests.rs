use std::cell::Cell;

use numview::api::{
    BisectionRequest, ChartSession, ClientConfig, ComputationService, MethodKind, MethodRequest,
    MethodResponse, NewtonRaphsonRequest,
};
use numview::core::Viewport;
use numview::interaction::{BrushSelection, ViewportCommand};
use numview::render::NullSurface;
use numview::{ChartError, ChartResult};
use serde_json::json;

struct ScriptedService {
    response: Option<MethodResponse>,
    status: u16,
    calls: Cell<usize>,
}

impl ScriptedService {
    fn ok(response: MethodResponse) -> Self {
        Self {
            response: Some(response),
            status: 200,
            calls: Cell::new(0),
        }
    }

    fn failing(status: u16) -> Self {
        Self {
            response: None,
            status,
            calls: Cell::new(0),
        }
    }
}

impl ComputationService for ScriptedService {
    fn compute(&self, _request: &MethodRequest) -> ChartResult<MethodResponse> {
        self.calls.set(self.calls.get() + 1);
        self.response.clone().ok_or(ChartError::Http {
            status: self.status,
        })
    }
}

fn newton_response(x_min: f64, x_max: f64) -> MethodResponse {
    let f_curve: Vec<serde_json::Value> = (0..=100)
        .map(|i| {
            let x = x_min + (x_max - x_min) * f64::from(i) / 100.0;
            json!({ "x": x, "y": x * x - 2.0 })
        })
        .collect();
    MethodResponse::from_value(
        MethodKind::NewtonRaphson,
        json!({
            "resultado": { "raiz": 1.4142, "iteraciones": [] },
            "detalles": { "convergio": true },
            "extras": { "grafico": { "x_range": [x_min, x_max], "f_curve": f_curve } }
        }),
    )
    .expect("valid newton payload")
}

fn newton_request() -> MethodRequest {
    NewtonRaphsonRequest::new("x**2 - 2", 1.0, &ClientConfig::default()).into()
}

#[test]
fn successful_submit_installs_plot_and_resets_viewport() {
    let service = ScriptedService::ok(newton_response(-15.0, 15.0));
    let mut session = ChartSession::new(MethodKind::NewtonRaphson);

    session.submit(&service, &newton_request()).expect("submit");

    assert_eq!(service.calls.get(), 1);
    assert_eq!(session.domain(), (-15.0, 15.0));
    assert!(session.last_error().is_none());
    assert!(session.received_at().is_some());
    assert_eq!(session.plot().curves.len(), 1);
}

#[test]
fn failed_submit_keeps_previous_chart_and_records_message() {
    let mut session = ChartSession::new(MethodKind::NewtonRaphson);
    session
        .submit(
            &ScriptedService::ok(newton_response(-15.0, 15.0)),
            &newton_request(),
        )
        .expect("first submit");
    session.handle(ViewportCommand::Zoom {
        factor: 0.5,
        anchor: Some(0.0),
    });
    let domain_before = session.domain();
    let plot_before = session.plot().clone();

    let err = session
        .submit(&ScriptedService::failing(500), &newton_request())
        .expect_err("service failure");

    assert!(matches!(err, ChartError::Http { status: 500 }));
    assert_eq!(session.domain(), domain_before);
    assert_eq!(session.plot(), &plot_before);
    assert!(session.last_result().is_some());
    assert_eq!(
        session.last_error(),
        Some("computation service returned HTTP status 500")
    );
}

#[test]
fn next_success_clears_error_and_replaces_full_range() {
    let mut session = ChartSession::new(MethodKind::NewtonRaphson);
    let _ = session.submit(&ScriptedService::failing(503), &newton_request());
    assert!(session.last_error().is_some());
    assert!(session.last_result().is_none());

    session
        .submit(
            &ScriptedService::ok(newton_response(0.0, 100.0)),
            &newton_request(),
        )
        .expect("submit");
    assert!(session.last_error().is_none());
    assert_eq!(session.controller().full_range(), (0.0, 100.0));
    assert_eq!(session.domain(), (0.0, 100.0));
}

#[test]
fn mismatched_method_is_rejected_before_calling_service() {
    let service = ScriptedService::ok(newton_response(-1.0, 1.0));
    let mut session = ChartSession::new(MethodKind::NewtonRaphson);
    let request: MethodRequest = BisectionRequest::new("x - 1", 0.0, 2.0).into();

    let err = session.submit(&service, &request).expect_err("mismatch");
    assert!(matches!(err, ChartError::InvalidRequest(_)));
    assert_eq!(service.calls.get(), 0);
    assert!(session.last_error().is_some());
}

#[test]
fn brush_resolves_against_reference_curve() {
    let mut session = ChartSession::new(MethodKind::NewtonRaphson);
    session
        .apply_response(newton_response(0.0, 100.0))
        .expect("apply");

    session.handle(ViewportCommand::Brush(BrushSelection::new(70, 20)));
    assert_eq!(session.domain(), (20.0, 70.0));
}

#[test]
fn pointer_pixels_map_through_visible_window() {
    let mut session = ChartSession::new(MethodKind::NewtonRaphson);
    session
        .apply_response(newton_response(0.0, 100.0))
        .expect("apply");
    let viewport = Viewport::new(400, 300);

    let x = session.pointer_pixel_to_x(160.0, viewport).expect("map");
    assert!((x - 40.0).abs() <= 1e-9);

    session
        .on_pointer_pixel(Some(160.0), viewport)
        .expect("pointer");
    session.handle(ViewportCommand::ZoomIn);
    let (start, end) = session.domain();
    assert!(((start + end) / 2.0 - 40.0).abs() <= 1e-9);

    session.on_pointer_pixel(None, viewport).expect("leave");
    assert_eq!(session.controller().anchor(), Some(x));
}

#[test]
fn present_hands_resolved_domains_to_surface() {
    let mut session = ChartSession::new(MethodKind::NewtonRaphson);
    session
        .apply_response(newton_response(0.0, 2.0))
        .expect("apply");
    let mut surface = NullSurface::default();

    session.present(&mut surface).expect("present");

    assert_eq!(surface.frames_presented, 1);
    assert_eq!(surface.last_curve_count, 1);
    assert_eq!(surface.last_x_domain, Some((0.0, 2.0)));
    let (y_min, y_max) = surface.last_y_domain.expect("y domain");
    // f(x) = x^2 - 2 over [0, 2] spans [-2, 2], padded by 0.32
    assert!((y_min + 2.32).abs() <= 1e-9);
    assert!((y_max - 2.32).abs() <= 1e-9);
}

#[test]
fn empty_session_frame_uses_default_ranges() {
    let session = ChartSession::new(MethodKind::Lagrange);
    let frame = session.frame();
    assert_eq!(frame.x_domain, (-1.0, 1.0));
    assert_eq!(frame.y_domain, (-1.0, 1.0));
    assert!(frame.curves.is_empty());
}
