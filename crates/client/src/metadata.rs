//! HTTP client for the SKU-family / seller metadata service.

use tracing::debug;

use listra_core::calculation::{MetadataLookup, SellerMeta, SkuFamilyMeta};
use listra_shared::config::MetadataServiceConfig;
use listra_shared::error::{AppError, AppResult};
use listra_shared::types::{SellerId, SkuFamilyId};

/// Metadata lookup client over HTTP.
pub struct HttpMetadataClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpMetadataClient {
    /// Creates a client from configuration.
    pub fn new(config: &MetadataServiceConfig) -> AppResult<Self> {
        Ok(Self {
            http: crate::build_http_client(config.timeout_secs)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let url = format!("{}/{path}", self.base_url);
        debug!(url = %url, "metadata lookup");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| AppError::ExternalService(format!("metadata request failed: {err}")))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("metadata entity at {path}")));
        }
        if !status.is_success() {
            return Err(AppError::ExternalService(format!(
                "metadata service returned {status}"
            )));
        }

        response
            .json()
            .await
            .map_err(|err| AppError::ExternalService(format!("invalid metadata response: {err}")))
    }
}

impl MetadataLookup for HttpMetadataClient {
    async fn sku_family(&self, id: SkuFamilyId) -> Result<SkuFamilyMeta, AppError> {
        self.get_json(&format!("sku-families/{id}")).await
    }

    async fn seller(&self, id: SellerId) -> Result<SellerMeta, AppError> {
        self.get_json(&format!("sellers/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client = HttpMetadataClient::new(&MetadataServiceConfig {
            base_url: "http://metadata.internal///".into(),
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(client.base_url, "http://metadata.internal");
    }
}
