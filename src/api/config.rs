use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Service endpoint used when neither config nor environment names one.
pub const DEFAULT_API_URL: &str =
    "https://rsutll09m9.execute-api.sa-east-1.amazonaws.com/dev/modelado";

pub const API_URL_ENV: &str = "NUMVIEW_API_URL";
pub const TIMEOUT_ENV: &str = "NUMVIEW_TIMEOUT_MS";

/// Client bootstrap configuration.
///
/// Serializable so host applications can keep it next to their own settings.
/// Missing fields fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Sampling style requested for plotted curves.
    #[serde(default = "default_graph_mode")]
    pub graph_mode: String,
    #[serde(default = "default_x_min")]
    pub x_min: f64,
    #[serde(default = "default_x_max")]
    pub x_max: f64,
    #[serde(default = "default_samples")]
    pub samples: u32,
    /// Dense curves are thinned to this many points before plotting.
    #[serde(default = "default_max_curve_points")]
    pub max_curve_points: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(default_base_url())
    }
}

impl ClientConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: default_timeout_ms(),
            graph_mode: default_graph_mode(),
            x_min: default_x_min(),
            x_max: default_x_max(),
            samples: default_samples(),
            max_curve_points: default_max_curve_points(),
        }
    }

    /// Builds a config from `NUMVIEW_API_URL` / `NUMVIEW_TIMEOUT_MS`.
    pub fn from_env() -> ChartResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> ChartResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(API_URL_ENV).filter(|value| !value.trim().is_empty()) {
            config.base_url = url.trim().to_owned();
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            config.timeout_ms = raw.trim().parse().map_err(|_| {
                ChartError::InvalidConfig(format!("{TIMEOUT_ENV} must be an integer, got `{raw}`"))
            })?;
        }

        config.validate()
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config json: {e}")))?;
        config.validate()
    }

    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Sets the horizontal span requested for sampled curves.
    #[must_use]
    pub fn with_graph_range(mut self, x_min: f64, x_max: f64) -> Self {
        self.x_min = x_min;
        self.x_max = x_max;
        self
    }

    #[must_use]
    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples = samples;
        self
    }

    #[must_use]
    pub fn with_max_curve_points(mut self, max_curve_points: usize) -> Self {
        self.max_curve_points = max_curve_points;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ChartError::InvalidConfig(format!(
                "base url must be http(s), got `{}`",
                self.base_url
            )));
        }

        if self.timeout_ms == 0 {
            return Err(ChartError::InvalidConfig(
                "timeout must be > 0 ms".to_owned(),
            ));
        }

        if !self.x_min.is_finite() || !self.x_max.is_finite() || self.x_min >= self.x_max {
            return Err(ChartError::InvalidConfig(
                "graph range must be finite with x_min < x_max".to_owned(),
            ));
        }

        if self.samples == 0 || self.max_curve_points == 0 {
            return Err(ChartError::InvalidConfig(
                "sample counts must be > 0".to_owned(),
            ));
        }

        Ok(self)
    }
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_owned()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_graph_mode() -> String {
    "geogebra".to_owned()
}

fn default_x_min() -> f64 {
    -15.0
}

fn default_x_max() -> f64 {
    15.0
}

fn default_samples() -> u32 {
    1_500
}

fn default_max_curve_points() -> usize {
    500
}
