use crate::model::WeatherSnapshot;
use async_trait::async_trait;
use serde::Deserialize;
use std::fmt::Debug;

pub mod proxy;

/// Discriminated response envelope from the forecast backend: either a full
/// report or a structured failure carrying an optional message.
#[derive(Debug, Clone)]
pub enum ForecastEnvelope {
    Report(WeatherSnapshot),
    Failure { message: Option<String> },
}

impl ForecastEnvelope {
    /// Decode an envelope body, branching on the `success` discriminant.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        #[derive(Deserialize)]
        struct Probe {
            #[serde(default)]
            success: bool,
        }

        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct FailureBody {
            #[serde(default)]
            error_message: Option<String>,
        }

        let probe: Probe = serde_json::from_str(body)?;
        if probe.success {
            Ok(ForecastEnvelope::Report(serde_json::from_str(body)?))
        } else {
            let failure: FailureBody = serde_json::from_str(body)?;
            Ok(ForecastEnvelope::Failure { message: failure.error_message })
        }
    }
}

/// Failure of the provider call itself, as opposed to a structured failure
/// envelope. Only rejections that carried a usable body message surface that
/// message to the user; everything else falls back to the generic text.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("failed to reach the forecast service")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Rejected { message: String },

    #[error("failed to decode the forecast response")]
    Decode(#[from] serde_json::Error),

    #[error("the forecast service rejected the request")]
    Opaque,
}

impl ProviderError {
    /// Message suitable for the error display field, when the rejection
    /// carried one.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            ProviderError::Rejected { message } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

/// What one provider call produces.
pub type FetchOutcome = Result<ForecastEnvelope, ProviderError>;

/// A forecast backend queried by free-text location or by coordinates.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn forecast_by_query(&self, query: &str) -> FetchOutcome;

    async fn forecast_by_coordinates(&self, lat: f64, lon: f64) -> FetchOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_body_decodes_to_report() {
        let body = r#"{
            "success": true,
            "locationName": "Berlin",
            "country": "DE",
            "lat": 52.52,
            "lon": 13.4,
            "current": {"temp": 21.0, "weatherCode": 2, "isDay": true}
        }"#;

        match ForecastEnvelope::from_json(body).expect("envelope should parse") {
            ForecastEnvelope::Report(snapshot) => {
                assert_eq!(snapshot.location_name, "Berlin");
                assert_eq!(snapshot.current.temp, Some(21.0));
            }
            ForecastEnvelope::Failure { .. } => panic!("expected a report"),
        }
    }

    #[test]
    fn failure_body_keeps_its_message() {
        let body = r#"{"success": false, "errorMessage": "City not found"}"#;

        match ForecastEnvelope::from_json(body).expect("envelope should parse") {
            ForecastEnvelope::Failure { message } => {
                assert_eq!(message.as_deref(), Some("City not found"));
            }
            ForecastEnvelope::Report(_) => panic!("expected a failure"),
        }
    }

    #[test]
    fn failure_body_without_message() {
        let body = r#"{"success": false}"#;

        match ForecastEnvelope::from_json(body).expect("envelope should parse") {
            ForecastEnvelope::Failure { message } => assert_eq!(message, None),
            ForecastEnvelope::Report(_) => panic!("expected a failure"),
        }
    }

    #[test]
    fn garbage_body_is_a_decode_error() {
        assert!(ForecastEnvelope::from_json("not json").is_err());
    }

    #[test]
    fn only_rejections_expose_a_user_message() {
        let rejected = ProviderError::Rejected { message: "quota exceeded".into() };
        assert_eq!(rejected.user_message(), Some("quota exceeded"));

        let empty = ProviderError::Rejected { message: String::new() };
        assert_eq!(empty.user_message(), None);

        assert_eq!(ProviderError::Opaque.user_message(), None);
    }
}
