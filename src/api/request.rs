use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::api::ClientConfig;
use crate::core::DataPoint;
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_TOLERANCE: f64 = 1e-8;
pub const DEFAULT_MAX_ITER: u32 = 50;
pub const MAX_ITER_LIMIT: u32 = 10_000;
pub const DEFAULT_SUBINTERVALS: u32 = 5;

/// Method discriminator shared by requests, responses and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MethodKind {
    #[serde(rename = "biseccion")]
    Bisection,
    #[serde(rename = "punto_fijo")]
    FixedPoint,
    #[serde(rename = "newton_raphson")]
    NewtonRaphson,
    #[serde(rename = "lagrange")]
    Lagrange,
    #[serde(rename = "integracion")]
    Integration,
}

impl MethodKind {
    pub const ALL: [Self; 5] = [
        Self::Bisection,
        Self::FixedPoint,
        Self::NewtonRaphson,
        Self::Lagrange,
        Self::Integration,
    ];

    /// Wire name sent in the `metodo` field.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Bisection => "biseccion",
            Self::FixedPoint => "punto_fijo",
            Self::NewtonRaphson => "newton_raphson",
            Self::Lagrange => "lagrange",
            Self::Integration => "integracion",
        }
    }

    /// Only bisection comes back without a plot.
    #[must_use]
    pub fn has_chart(self) -> bool {
        !matches!(self, Self::Bisection)
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for MethodKind {
    type Err = ChartError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "biseccion" | "bisection" => Ok(Self::Bisection),
            "punto_fijo" | "fixed_point" => Ok(Self::FixedPoint),
            "newton_raphson" | "newton" => Ok(Self::NewtonRaphson),
            "lagrange" => Ok(Self::Lagrange),
            "integracion" | "integration" | "newton_cotes" => Ok(Self::Integration),
            _ => Err(ChartError::InvalidRequest(format!(
                "unknown method `{value}`"
            ))),
        }
    }
}

/// Horizontal sampling window the service uses for plotted curves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphWindow {
    pub graph_mode: String,
    pub x_min: f64,
    pub x_max: f64,
    pub samples: u32,
}

impl GraphWindow {
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            graph_mode: config.graph_mode.clone(),
            x_min: config.x_min,
            x_max: config.x_max,
            samples: config.samples,
        }
    }

    fn validate(&self) -> ChartResult<()> {
        if !self.x_min.is_finite() || !self.x_max.is_finite() || self.x_min >= self.x_max {
            return Err(ChartError::InvalidRequest(
                "graph window must be finite with x_min < x_max".to_owned(),
            ));
        }
        if self.samples == 0 {
            return Err(ChartError::InvalidRequest(
                "graph samples must be > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BisectionRequest {
    #[serde(rename = "func")]
    pub function: String,
    pub a: f64,
    pub b: f64,
    #[serde(rename = "tol")]
    pub tolerance: f64,
    pub max_iter: u32,
}

impl BisectionRequest {
    #[must_use]
    pub fn new(function: impl Into<String>, a: f64, b: f64) -> Self {
        Self {
            function: function.into(),
            a,
            b,
            tolerance: DEFAULT_TOLERANCE,
            max_iter: DEFAULT_MAX_ITER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedPointRequest {
    /// Iteration function `g` of `x = g(x)`.
    #[serde(rename = "g")]
    pub g_function: String,
    pub x0: f64,
    #[serde(rename = "tol")]
    pub tolerance: f64,
    pub max_iter: u32,
    /// Aitken acceleration; the service key keeps its historical spelling.
    #[serde(
        rename = "habilitar_aikten",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub enable_aitken: Option<bool>,
}

impl FixedPointRequest {
    #[must_use]
    pub fn new(g_function: impl Into<String>, x0: f64) -> Self {
        Self {
            g_function: g_function.into(),
            x0,
            tolerance: DEFAULT_TOLERANCE,
            max_iter: DEFAULT_MAX_ITER,
            enable_aitken: None,
        }
    }

    #[must_use]
    pub fn with_aitken(mut self, enabled: bool) -> Self {
        self.enable_aitken = Some(enabled);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewtonRaphsonRequest {
    #[serde(rename = "func")]
    pub function: String,
    /// Left empty, the service differentiates `function` itself.
    #[serde(rename = "df", default)]
    pub derivative: String,
    pub x0: f64,
    #[serde(rename = "tol")]
    pub tolerance: f64,
    pub max_iter: u32,
    #[serde(flatten)]
    pub graph: GraphWindow,
}

impl NewtonRaphsonRequest {
    #[must_use]
    pub fn new(function: impl Into<String>, x0: f64, config: &ClientConfig) -> Self {
        Self {
            function: function.into(),
            derivative: String::new(),
            x0,
            tolerance: DEFAULT_TOLERANCE,
            max_iter: DEFAULT_MAX_ITER,
            graph: GraphWindow::from_config(config),
        }
    }

    #[must_use]
    pub fn with_derivative(mut self, derivative: impl Into<String>) -> Self {
        self.derivative = derivative.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LagrangeRequest {
    #[serde(rename = "pares")]
    pub pairs: Vec<DataPoint>,
    /// Optional reference function plotted against the interpolant.
    #[serde(rename = "fx", default)]
    pub reference_function: Option<String>,
    #[serde(flatten)]
    pub graph: GraphWindow,
}

impl LagrangeRequest {
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            pairs: Vec::new(),
            reference_function: None,
            graph: GraphWindow::from_config(config),
        }
    }

    /// Adds an interpolation node unless an identical one is already present.
    ///
    /// Returns `false` for duplicates and non-finite coordinates.
    pub fn add_pair(&mut self, point: DataPoint) -> bool {
        if !point.x.is_finite() || !point.y.is_finite() || self.pairs.contains(&point) {
            return false;
        }
        self.pairs.push(point);
        true
    }

    /// Removes the nodes at `indices`; unknown indices are ignored.
    pub fn remove_pairs(&mut self, indices: &[usize]) {
        let mut index = 0;
        self.pairs.retain(|_| {
            let keep = !indices.contains(&index);
            index += 1;
            keep
        });
    }

    #[must_use]
    pub fn with_reference_function(mut self, function: impl Into<String>) -> Self {
        let function = function.into();
        self.reference_function = (!function.trim().is_empty()).then_some(function);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntegrationRule {
    #[serde(rename = "rectangle")]
    Rectangle,
    #[serde(rename = "trapezoid")]
    Trapezoid,
    #[serde(rename = "simpson_1_3")]
    Simpson13,
    #[serde(rename = "simpson_3_8")]
    Simpson38,
    #[serde(rename = "boole")]
    Boole,
    #[serde(rename = "gauss_legendre")]
    GaussLegendre,
}

impl IntegrationRule {
    pub const ALL: [Self; 6] = [
        Self::Rectangle,
        Self::Trapezoid,
        Self::Simpson13,
        Self::Simpson38,
        Self::Boole,
        Self::GaussLegendre,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Rectangle => "Rectangle (degree 0)",
            Self::Trapezoid => "Trapezoid (degree 1)",
            Self::Simpson13 => "Simpson 1/3 (degree 2)",
            Self::Simpson38 => "Simpson 3/8 (degree 3)",
            Self::Boole => "Boole (degree 4)",
            Self::GaussLegendre => "Gauss-Legendre",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationRequest {
    #[serde(rename = "regla")]
    pub rule: IntegrationRule,
    #[serde(rename = "func")]
    pub function: String,
    /// Bounds stay textual so the service can read `pi`, `π` and friends.
    pub a: String,
    pub b: String,
    pub n: u32,
    pub show_areas: bool,
    pub samples: u32,
}

impl IntegrationRequest {
    #[must_use]
    pub fn new(
        rule: IntegrationRule,
        function: impl Into<String>,
        a: impl Into<String>,
        b: impl Into<String>,
        config: &ClientConfig,
    ) -> Self {
        Self {
            rule,
            function: function.into(),
            a: a.into(),
            b: b.into(),
            n: DEFAULT_SUBINTERVALS,
            show_areas: true,
            samples: config.samples,
        }
    }

    #[must_use]
    pub fn with_subintervals(mut self, n: u32) -> Self {
        self.n = n;
        self
    }
}

/// One submission to the computation service, tagged by `metodo` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "metodo")]
pub enum MethodRequest {
    #[serde(rename = "biseccion")]
    Bisection(BisectionRequest),
    #[serde(rename = "punto_fijo")]
    FixedPoint(FixedPointRequest),
    #[serde(rename = "newton_raphson")]
    NewtonRaphson(NewtonRaphsonRequest),
    #[serde(rename = "lagrange")]
    Lagrange(LagrangeRequest),
    #[serde(rename = "integracion")]
    Integration(IntegrationRequest),
}

impl MethodRequest {
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

    /// Rejects requests the service would refuse before any network round trip.
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Bisection(request) => {
                validate_expression(&request.function, "function")?;
                validate_finite(request.a, "a")?;
                validate_finite(request.b, "b")?;
                validate_iteration_controls(request.tolerance, request.max_iter)
            }
            Self::FixedPoint(request) => {
                validate_expression(&request.g_function, "g(x)")?;
                validate_finite(request.x0, "x0")?;
                validate_iteration_controls(request.tolerance, request.max_iter)
            }
            Self::NewtonRaphson(request) => {
                validate_expression(&request.function, "function")?;
                validate_finite(request.x0, "x0")?;
                validate_iteration_controls(request.tolerance, request.max_iter)?;
                request.graph.validate()
            }
            Self::Lagrange(request) => {
                if request.pairs.is_empty() {
                    return Err(ChartError::InvalidRequest(
                        "lagrange needs at least one (x, y) pair".to_owned(),
                    ));
                }
                if request
                    .pairs
                    .iter()
                    .any(|pair| !pair.x.is_finite() || !pair.y.is_finite())
                {
                    return Err(ChartError::InvalidRequest(
                        "lagrange pairs must be finite".to_owned(),
                    ));
                }
                request.graph.validate()
            }
            Self::Integration(request) => {
                validate_expression(&request.function, "function")?;
                validate_expression(&request.a, "a")?;
                validate_expression(&request.b, "b")?;
                if request.n == 0 {
                    return Err(ChartError::InvalidRequest(
                        "integration needs n > 0 subintervals".to_owned(),
                    ));
                }
                if request.samples == 0 {
                    return Err(ChartError::InvalidRequest(
                        "integration samples must be > 0".to_owned(),
                    ));
                }
                Ok(())
            }
        }
    }

    pub fn to_json(&self) -> ChartResult<String> {
        serde_json::to_string(self)
            .map_err(|e| ChartError::InvalidRequest(format!("failed to serialize request: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidRequest(format!("failed to parse request json: {e}")))
    }
}

impl From<BisectionRequest> for MethodRequest {
    fn from(request: BisectionRequest) -> Self {
        Self::Bisection(request)
    }
}

impl From<FixedPointRequest> for MethodRequest {
    fn from(request: FixedPointRequest) -> Self {
        Self::FixedPoint(request)
    }
}

impl From<NewtonRaphsonRequest> for MethodRequest {
    fn from(request: NewtonRaphsonRequest) -> Self {
        Self::NewtonRaphson(request)
    }
}

impl From<LagrangeRequest> for MethodRequest {
    fn from(request: LagrangeRequest) -> Self {
        Self::Lagrange(request)
    }
}

impl From<IntegrationRequest> for MethodRequest {
    fn from(request: IntegrationRequest) -> Self {
        Self::Integration(request)
    }
}

fn validate_expression(value: &str, field: &str) -> ChartResult<()> {
    if value.trim().is_empty() {
        return Err(ChartError::InvalidRequest(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}

fn validate_finite(value: f64, field: &str) -> ChartResult<()> {
    if !value.is_finite() {
        return Err(ChartError::InvalidRequest(format!(
            "{field} must be finite"
        )));
    }
    Ok(())
}

fn validate_iteration_controls(tolerance: f64, max_iter: u32) -> ChartResult<()> {
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(ChartError::InvalidRequest(
            "tolerance must be finite and > 0".to_owned(),
        ));
    }
    if max_iter == 0 || max_iter > MAX_ITER_LIMIT {
        return Err(ChartError::InvalidRequest(format!(
            "max_iter must be within 1..={MAX_ITER_LIMIT}"
        )));
    }
    Ok(())
}
