use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use tracing::{debug, warn};

use crate::api::{ClientConfig, MethodRequest, MethodResponse};
use crate::error::{ChartError, ChartResult};

/// Remote collaborator that runs the numerical methods.
///
/// Sessions only talk to this trait so tests and hosts can swap the transport.
pub trait ComputationService {
    fn compute(&self, request: &MethodRequest) -> ChartResult<MethodResponse>;
}

/// Blocking JSON-over-HTTP client for the computation service.
#[derive(Debug, Clone)]
pub struct HttpComputationClient {
    http: Client,
    base_url: String,
}

impl HttpComputationClient {
    pub fn new(config: &ClientConfig) -> ChartResult<Self> {
        let config = config.clone().validate()?;
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ChartError::Transport(format!("failed to build http client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl ComputationService for HttpComputationClient {
    fn compute(&self, request: &MethodRequest) -> ChartResult<MethodResponse> {
        request.validate()?;
        let kind = request.kind();
        debug!(method = %kind, url = %self.base_url, "submitting computation");

        let response = self
            .http
            .post(&self.base_url)
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .map_err(|e| ChartError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(method = %kind, status = status.as_u16(), "computation request rejected");
            return Err(ChartError::Http {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .map_err(|e| ChartError::Transport(format!("failed to read response body: {e}")))?;
        MethodResponse::decode(kind, &body)
    }
}
