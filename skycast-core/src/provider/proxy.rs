use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{FetchOutcome, ForecastEnvelope, ForecastProvider, ProviderError};

/// Thin adapter over the forecast backend proxy. Performs no provider logic
/// of its own: one GET per lookup, no caching, no retry.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    base_url: String,
    http: Client,
}

impl ProxyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http: Client::new() }
    }

    async fn fetch(&self, params: &[(&str, String)]) -> Result<ForecastEnvelope, ProviderError> {
        let url = format!("{}/forecast", self.base_url);
        debug!(url = %url, "requesting forecast");

        let res = self.http.get(&url).query(params).send().await?;
        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            debug!(status = %status, body = %truncate_body(&body), "forecast request rejected");
            return Err(rejection_from_body(&body));
        }

        Ok(ForecastEnvelope::from_json(&body)?)
    }
}

#[async_trait]
impl ForecastProvider for ProxyClient {
    async fn forecast_by_query(&self, query: &str) -> FetchOutcome {
        self.fetch(&[("q", query.to_string())]).await
    }

    async fn forecast_by_coordinates(&self, lat: f64, lon: f64) -> FetchOutcome {
        self.fetch(&[("lat", lat.to_string()), ("lon", lon.to_string())]).await
    }
}

/// Rejection bodies are `{"message": "..."}`-shaped when the proxy has
/// anything to say; anything else becomes an opaque rejection.
fn rejection_from_body(body: &str) -> ProviderError {
    #[derive(Deserialize)]
    struct ErrorBody {
        #[serde(default)]
        message: Option<String>,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { message: Some(message) }) if !message.is_empty() => {
            ProviderError::Rejected { message }
        }
        _ => ProviderError::Opaque,
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}
