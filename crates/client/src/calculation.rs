//! HTTP client for the external price-calculation service.

use tracing::debug;

use listra_core::calculation::{CalculationClient, CalculationRequest, CalculationResponse};
use listra_shared::config::CalculationServiceConfig;
use listra_shared::error::{AppError, AppResult};

/// Calculation service client over HTTP.
pub struct HttpCalculationClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpCalculationClient {
    /// Creates a client from configuration.
    pub fn new(config: &CalculationServiceConfig) -> AppResult<Self> {
        Ok(Self {
            http: crate::build_http_client(config.timeout_secs)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl CalculationClient for HttpCalculationClient {
    async fn calculate(
        &self,
        request: &CalculationRequest,
    ) -> Result<CalculationResponse, AppError> {
        let url = format!("{}/price-calculations", self.base_url);
        debug!(url = %url, products = request.products.len(), "requesting price calculation");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|err| AppError::ExternalService(format!("calculation request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ExternalService(format!(
                "calculation service returned {status}"
            )));
        }

        response.json().await.map_err(|err| {
            AppError::ExternalService(format!("invalid calculation response: {err}"))
        })
    }
}
