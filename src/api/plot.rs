use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::response::{AreaFill, FillKind, MethodResponse, TangentSegment};
use crate::core::{Curve, DEFAULT_FULL_RANGE, DataPoint, downsample_points};

pub const CURVE_G: &str = "g(x)";
pub const CURVE_IDENTITY: &str = "y = x";
pub const CURVE_COBWEB: &str = "cobweb";
pub const CURVE_F: &str = "f(x)";
pub const CURVE_INTERPOLANT: &str = "P(x)";
pub const CURVE_ERROR: &str = "error";
pub const CURVE_AREA: &str = "area";
pub const CURVE_FILLS: &str = "fills";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerKind {
    InterpolationNode,
    QuadratureNode,
    Root,
    RootOnCurve,
}

impl MarkerKind {
    /// Quadrature nodes take part in the vertical auto-fit; other markers do not.
    #[must_use]
    pub fn feeds_autofit(self) -> bool {
        matches!(self, Self::QuadratureNode)
    }
}

/// Fixed reference dot drawn on top of the curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub kind: MarkerKind,
    pub point: DataPoint,
}

/// Everything one chart draws for a computation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotData {
    pub full_range: (f64, f64),
    /// Insertion order is draw order.
    pub curves: IndexMap<String, Curve>,
    /// Curve whose indices brush drags refer to.
    pub reference_curve: Option<String>,
    pub markers: Vec<Marker>,
    pub segments: Vec<TangentSegment>,
}

impl Default for PlotData {
    fn default() -> Self {
        Self::empty()
    }
}

impl PlotData {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            full_range: DEFAULT_FULL_RANGE,
            curves: IndexMap::new(),
            reference_curve: None,
            markers: Vec::new(),
            segments: Vec::new(),
        }
    }

    /// Extracts the plot of a result.
    ///
    /// Dense integration curves are thinned to `max_curve_points` samples.
    #[must_use]
    pub fn from_response(response: &MethodResponse, max_curve_points: usize) -> Self {
        let mut plot = Self::empty();
        if let Some(range) = response.x_range() {
            plot.full_range = range;
        }

        match response {
            MethodResponse::Bisection(_) => {}
            MethodResponse::FixedPoint(response) => {
                let graph = &response.extras.graph;
                let identity = graph
                    .g_curve
                    .iter()
                    .map(|point| DataPoint::new(point.x, point.x))
                    .collect();
                plot.push_curve(Curve::new(CURVE_G, graph.g_curve.clone()));
                plot.push_curve(Curve::new(CURVE_IDENTITY, identity));
                plot.push_curve(Curve::new(CURVE_COBWEB, graph.cobweb.clone()));
                plot.select_reference(&[CURVE_G]);
            }
            MethodResponse::NewtonRaphson(response) => {
                let graph = &response.extras.graph;
                plot.push_curve(Curve::new(CURVE_F, graph.f_curve.clone()));
                plot.select_reference(&[CURVE_F]);
                if let Some(root) = graph.root {
                    plot.push_marker(MarkerKind::Root, root);
                }
                if let Some(root) = graph.root_on_curve {
                    plot.push_marker(MarkerKind::RootOnCurve, root);
                }
                plot.segments = graph.segments.clone();
            }
            MethodResponse::Lagrange(response) => {
                let graph = &response.extras.graph;
                plot.push_curve(Curve::new(CURVE_INTERPOLANT, graph.p_curve.clone()));
                if let Some(points) = &graph.f_curve {
                    plot.push_curve(Curve::new(CURVE_F, points.clone()));
                }
                if let Some(points) = &graph.error_curve {
                    plot.push_curve(Curve::new(CURVE_ERROR, points.clone()).without_autofit());
                }
                plot.select_reference(&[CURVE_INTERPOLANT, CURVE_F]);
                for node in &graph.points {
                    plot.push_marker(MarkerKind::InterpolationNode, *node);
                }
            }
            MethodResponse::Integration(response) => {
                let graph = &response.outcome.graph;
                plot.push_curve(Curve::new(
                    CURVE_F,
                    downsample_points(&graph.f_curve, max_curve_points),
                ));
                if let Some(points) = &graph.area_under_curve {
                    plot.push_curve(
                        Curve::new(CURVE_AREA, downsample_points(points, max_curve_points))
                            .without_autofit(),
                    );
                }
                if let Some(fills) = &graph.fills {
                    plot.push_curve(
                        Curve::new(CURVE_FILLS, normalize_fills(fills)).without_autofit(),
                    );
                }
                plot.select_reference(&[CURVE_F]);
                for node in &graph.nodes {
                    plot.push_marker(MarkerKind::QuadratureNode, node.point());
                }
            }
        }

        plot.markers.sort_by_key(|marker| OrderedFloat(marker.point.x));
        debug!(
            method = %response.kind(),
            curves = plot.curves.len(),
            markers = plot.markers.len(),
            "extracted plot data"
        );
        plot
    }

    #[must_use]
    pub fn curve(&self, name: &str) -> Option<&Curve> {
        self.curves.get(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty() && self.markers.is_empty()
    }

    /// Points brush indices are resolved against; empty when no curve qualifies.
    #[must_use]
    pub fn reference_points(&self) -> &[DataPoint] {
        self.reference_curve
            .as_deref()
            .and_then(|name| self.curves.get(name))
            .map(|curve| curve.points.as_slice())
            .unwrap_or(&[])
    }

    /// Curves flagged for the vertical auto-fit, in draw order.
    pub fn autofit_curves(&self) -> impl Iterator<Item = &[DataPoint]> {
        self.curves
            .values()
            .filter(|curve| curve.autofit)
            .map(|curve| curve.points.as_slice())
    }

    #[must_use]
    pub fn autofit_marker_points(&self) -> Vec<DataPoint> {
        self.markers
            .iter()
            .filter(|marker| marker.kind.feeds_autofit())
            .map(|marker| marker.point)
            .collect()
    }

    fn push_curve(&mut self, curve: Curve) {
        if curve.is_empty() {
            return;
        }
        self.curves.insert(curve.name.clone(), curve);
    }

    fn push_marker(&mut self, kind: MarkerKind, point: DataPoint) {
        self.markers.push(Marker { kind, point });
    }

    // First candidate that made it into the curve set wins.
    fn select_reference(&mut self, candidates: &[&str]) {
        self.reference_curve = candidates
            .iter()
            .find(|name| self.curves.contains_key(**name))
            .map(|name| (*name).to_owned());
    }
}

/// Flattens quadrature panel fills into one drawable point series.
///
/// Rectangles contribute their top edge `(xs[0], ys[1])`, `(xs[2], ys[1])`;
/// curved panels contribute every `(xs[i], ys[i])`.
#[must_use]
pub fn normalize_fills(fills: &[AreaFill]) -> Vec<DataPoint> {
    let mut out = Vec::new();
    for fill in fills {
        match fill.kind {
            FillKind::Rect => {
                let (Some(&left), Some(&right), Some(&top)) =
                    (fill.xs.first(), fill.xs.get(2), fill.ys.get(1))
                else {
                    warn!(panel = fill.i, "skipping malformed rectangle fill");
                    continue;
                };
                out.push(DataPoint::new(left, top));
                out.push(DataPoint::new(right, top));
            }
            FillKind::Curve => {
                out.extend(
                    fill.xs
                        .iter()
                        .zip(&fill.ys)
                        .map(|(&x, &y)| DataPoint::new(x, y)),
                );
            }
        }
    }
    out
}
