//! Typed computation results.
//!
//! Wire keys are the service's own (`resultado`, `iteraciones`, ...); Rust
//! names are English. Unknown keys are ignored and most blocks default when
//! absent so older service builds still decode.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::MethodKind;
use crate::core::DataPoint;
use crate::error::{ChartError, ChartResult};

/// Root-finding outcome shared by the iterative methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationOutcome<R> {
    #[serde(rename = "raiz")]
    pub root: f64,
    #[serde(rename = "iteraciones", default = "Vec::new")]
    pub iterations: Vec<R>,
    /// Termination reason as worded by the service.
    #[serde(rename = "motivo", default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BisectionIteration {
    #[serde(rename = "iteracion")]
    pub iteration: u32,
    pub a: f64,
    pub b: f64,
    pub fa: f64,
    pub fb: f64,
    #[serde(rename = "media")]
    pub midpoint: f64,
    #[serde(rename = "fmedia")]
    pub f_midpoint: f64,
    #[serde(rename = "error_absoluto", default)]
    pub absolute_error: Option<f64>,
    #[serde(rename = "error_relativo", default)]
    pub relative_error: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BisectionResponse {
    #[serde(rename = "resultado")]
    pub outcome: IterationOutcome<BisectionIteration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedPointIteration {
    #[serde(rename = "iteracion")]
    pub iteration: u32,
    pub x0: f64,
    pub x1: f64,
    #[serde(rename = "error_absoluto", default)]
    pub absolute_error: Option<f64>,
    #[serde(rename = "error_relativo", default)]
    pub relative_error: Option<f64>,
    #[serde(rename = "residuo", default)]
    pub residual: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedPointDetails {
    #[serde(rename = "convergio")]
    pub converged: bool,
    pub n_iter: u32,
    #[serde(rename = "g_evaluaciones")]
    pub g_evaluations: u32,
    pub tol: f64,
    #[serde(rename = "criterio")]
    pub criterion: String,
    #[serde(rename = "x0_inicial")]
    pub initial_x0: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedPointGraph {
    pub x_range: Option<[f64; 2]>,
    pub g_curve: Vec<DataPoint>,
    pub cobweb: Vec<DataPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AitkenStats {
    #[serde(rename = "habilitado")]
    pub enabled: bool,
    #[serde(rename = "usos")]
    pub uses: u32,
    #[serde(rename = "descartes")]
    pub discards: u32,
    pub eps_denom: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedPointExtras {
    #[serde(rename = "grafico")]
    pub graph: FixedPointGraph,
    pub aitken: Option<AitkenStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedPointResponse {
    #[serde(rename = "resultado")]
    pub outcome: IterationOutcome<FixedPointIteration>,
    #[serde(rename = "detalles", default)]
    pub details: FixedPointDetails,
    #[serde(default)]
    pub extras: FixedPointExtras,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewtonIteration {
    #[serde(rename = "iteracion")]
    pub iteration: u32,
    pub x0: f64,
    #[serde(default)]
    pub fx: Option<f64>,
    #[serde(default)]
    pub dfx: Option<f64>,
    pub x1: f64,
    #[serde(rename = "error_absoluto", default)]
    pub absolute_error: Option<f64>,
    #[serde(rename = "error_relativo", default)]
    pub relative_error: Option<f64>,
    #[serde(rename = "f_en_x1", default)]
    pub f_at_x1: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewtonDetails {
    #[serde(rename = "convergio")]
    pub converged: bool,
    pub n_iter: u32,
    pub x0: f64,
    #[serde(rename = "f_evaluaciones")]
    pub f_evaluations: u32,
    #[serde(rename = "df_evaluaciones")]
    pub df_evaluations: u32,
    pub tol: f64,
    #[serde(rename = "criterio")]
    pub criterion: String,
}

/// Tangent step drawn from `(x_n, f(x_n))` to `(x_{n+1}, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TangentSegment {
    #[serde(rename = "desde")]
    pub from: DataPoint,
    #[serde(rename = "hasta")]
    pub to: DataPoint,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewtonGraph {
    pub x_range: Option<[f64; 2]>,
    pub f_curve: Vec<DataPoint>,
    #[serde(rename = "segmentos")]
    pub segments: Vec<TangentSegment>,
    #[serde(rename = "raiz")]
    pub root: Option<DataPoint>,
    #[serde(rename = "raiz_en_curva")]
    pub root_on_curve: Option<DataPoint>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewtonExtras {
    #[serde(rename = "grafico")]
    pub graph: NewtonGraph,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewtonRaphsonResponse {
    #[serde(rename = "resultado")]
    pub outcome: IterationOutcome<NewtonIteration>,
    #[serde(rename = "detalles", default)]
    pub details: NewtonDetails,
    #[serde(default)]
    pub extras: NewtonExtras,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolicExpression {
    pub expr: String,
    pub latex: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LagrangeBasis {
    pub i: u32,
    pub expr: String,
    pub latex: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LagrangeTableRow {
    pub x: f64,
    pub y: f64,
    #[serde(rename = "P(x)")]
    pub interpolated: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeError {
    pub x: f64,
    pub y: f64,
    pub error: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TheoreticalError {
    pub pi_x: String,
    #[serde(rename = "orden_derivada")]
    pub derivative_order: u32,
    #[serde(rename = "f_derivada_n")]
    pub nth_derivative: Option<String>,
    pub formula: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LagrangeErrors {
    pub max_abs_error: Option<f64>,
    pub mae: Option<f64>,
    pub rmse: Option<f64>,
    #[serde(rename = "en_nodos")]
    pub at_nodes: Vec<NodeError>,
    #[serde(rename = "teorico")]
    pub theoretical: Option<TheoreticalError>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LagrangeGraph {
    pub x_range: Option<[f64; 2]>,
    pub y_range: Option<[f64; 2]>,
    pub p_curve: Vec<DataPoint>,
    pub f_curve: Option<Vec<DataPoint>>,
    pub points: Vec<DataPoint>,
    pub error_curve: Option<Vec<DataPoint>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LagrangeExtras {
    #[serde(rename = "polinomio")]
    pub polynomial: SymbolicExpression,
    pub bases: Vec<LagrangeBasis>,
    #[serde(rename = "tabla")]
    pub table: Vec<LagrangeTableRow>,
    #[serde(rename = "errores")]
    pub errors: Option<LagrangeErrors>,
    #[serde(rename = "grafico")]
    pub graph: LagrangeGraph,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LagrangeResponse {
    pub extras: LagrangeExtras,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TheoreticalBound {
    pub formula: String,
    #[serde(rename = "cota")]
    pub bound: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadratureRow {
    pub i: u32,
    pub x: f64,
    pub fx: f64,
    #[serde(default)]
    pub w: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadratureNode {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub w: Option<f64>,
}

impl QuadratureNode {
    #[must_use]
    pub fn point(self) -> DataPoint {
        DataPoint::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillKind {
    Rect,
    Curve,
}

/// Shaded region of one quadrature panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaFill {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub kind: FillKind,
    pub i: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationGraph {
    pub x_range: Option<[f64; 2]>,
    pub y_range: Option<[f64; 2]>,
    pub f_curve: Vec<DataPoint>,
    pub nodes: Vec<QuadratureNode>,
    #[serde(rename = "area_bajo_curva")]
    pub area_under_curve: Option<Vec<DataPoint>>,
    pub fills: Option<Vec<AreaFill>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationOutcome {
    #[serde(rename = "I")]
    pub integral: f64,
    #[serde(rename = "integral_simbolica", default)]
    pub symbolic_integral: Option<String>,
    #[serde(rename = "error_teorico", default)]
    pub theoretical_error: Option<TheoreticalBound>,
    #[serde(rename = "tabla", default)]
    pub table: Vec<QuadratureRow>,
    #[serde(rename = "grafico", default)]
    pub graph: IntegrationGraph,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationDetails {
    /// Rule name as labelled by the service, e.g. "Simpson 1/3".
    #[serde(rename = "regla")]
    pub rule: Option<String>,
    pub a: Option<f64>,
    pub b: Option<f64>,
    pub n: Option<u32>,
    #[serde(rename = "n_ajustado")]
    pub adjusted_n: Option<u32>,
    pub h: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationResponse {
    #[serde(rename = "resultado")]
    pub outcome: IntegrationOutcome,
    #[serde(rename = "detalles", default)]
    pub details: Option<IntegrationDetails>,
}

/// Decoded result of one submission.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodResponse {
    Bisection(BisectionResponse),
    FixedPoint(FixedPointResponse),
    NewtonRaphson(NewtonRaphsonResponse),
    Lagrange(LagrangeResponse),
    Integration(IntegrationResponse),
}

/// Headline numbers of a result, independent of the method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub method: MethodKind,
    pub root: Option<f64>,
    pub integral: Option<f64>,
    pub iterations: usize,
    pub converged: Option<bool>,
    pub reason: Option<String>,
    pub polynomial: Option<String>,
}

impl MethodResponse {
    /// Decodes a raw body; the shape is chosen by the method that was submitted.
    pub fn decode(kind: MethodKind, body: &str) -> ChartResult<Self> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| ChartError::Decode(format!("response is not json: {e}")))?;
        Self::from_value(kind, value)
    }

    pub fn from_value(kind: MethodKind, value: Value) -> ChartResult<Self> {
        let decoded = match kind {
            MethodKind::Bisection => serde_json::from_value(value).map(Self::Bisection),
            MethodKind::FixedPoint => serde_json::from_value(value).map(Self::FixedPoint),
            MethodKind::NewtonRaphson => serde_json::from_value(value).map(Self::NewtonRaphson),
            MethodKind::Lagrange => serde_json::from_value(value).map(Self::Lagrange),
            MethodKind::Integration => serde_json::from_value(value).map(Self::Integration),
        };
        decoded.map_err(|e| ChartError::Decode(format!("unexpected {kind} payload: {e}")))
    }

    #[must_use]
    pub fn kind(&self) -> MethodKind {
        match self {
            Self::Bisection(_) => MethodKind::Bisection,
            Self::FixedPoint(_) => MethodKind::FixedPoint,
            Self::NewtonRaphson(_) => MethodKind::NewtonRaphson,
            Self::Lagrange(_) => MethodKind::Lagrange,
            Self::Integration(_) => MethodKind::Integration,
        }
    }

    /// Horizontal extent hint sent with the plot, if any.
    #[must_use]
    pub fn x_range(&self) -> Option<(f64, f64)> {
        let range = match self {
            Self::Bisection(_) => None,
            Self::FixedPoint(response) => response.extras.graph.x_range,
            Self::NewtonRaphson(response) => response.extras.graph.x_range,
            Self::Lagrange(response) => response.extras.graph.x_range,
            Self::Integration(response) => response.outcome.graph.x_range,
        };
        range.map(|[start, end]| (start, end))
    }

    #[must_use]
    pub fn summary(&self) -> ResultSummary {
        let mut summary = ResultSummary {
            method: self.kind(),
            root: None,
            integral: None,
            iterations: 0,
            converged: None,
            reason: None,
            polynomial: None,
        };

        match self {
            Self::Bisection(response) => {
                summary.root = Some(response.outcome.root);
                summary.iterations = response.outcome.iterations.len();
                summary.reason = response.outcome.reason.clone();
            }
            Self::FixedPoint(response) => {
                summary.root = Some(response.outcome.root);
                summary.iterations = response.outcome.iterations.len();
                summary.converged = Some(response.details.converged);
                summary.reason = response.outcome.reason.clone();
            }
            Self::NewtonRaphson(response) => {
                summary.root = Some(response.outcome.root);
                summary.iterations = response.outcome.iterations.len();
                summary.converged = Some(response.details.converged);
                summary.reason = response.outcome.reason.clone();
            }
            Self::Lagrange(response) => {
                let expr = &response.extras.polynomial.expr;
                summary.polynomial = (!expr.is_empty()).then(|| expr.clone());
            }
            Self::Integration(response) => {
                summary.integral = Some(response.outcome.integral);
            }
        }

        summary
    }
}
