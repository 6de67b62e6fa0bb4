//! HTTP client for the remote recommendation service.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sofra_corpus::{ConciergeError, Mode, RestaurantRecord};

/// Production endpoint; tests point the client at a mock server instead.
pub const DEFAULT_BASE_URL: &str = "https://api.sofra.app";

const MATCH_PATH: &str = "/v1/concierge/match";

/// Response language requested from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    /// English.
    En,
    /// Azerbaijani.
    Az,
    /// Russian.
    Ru,
}

/// Request body for a match call.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRequest {
    /// Raw user prompt.
    pub prompt: String,
    /// Maximum number of results wanted.
    pub limit: usize,
    /// Optional response language.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<Lang>,
}

/// Mode the service reports having used for this answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireMode {
    /// Service echoed a local-style heuristic answer.
    Local,
    /// Full semantic ("AI") ranking.
    Ai,
    /// A/B experiment arm.
    Ab,
}

impl WireMode {
    /// Map the wire value onto the session routing mode space.
    #[must_use]
    pub fn into_mode(self) -> Mode {
        match self {
            WireMode::Local => Mode::Local,
            WireMode::Ai => Mode::Remote,
            WireMode::Ab => Mode::Ab,
        }
    }
}

/// Response body from a match call. Provenance maps are keyed by the
/// restaurant's lowercased slug-or-id.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchResponse {
    /// Ranked restaurant records, best first.
    #[serde(default)]
    pub results: Vec<RestaurantRecord>,
    /// Matched keywords per restaurant key.
    #[serde(default)]
    pub match_reason: HashMap<String, Vec<String>>,
    /// Human-readable explanation per restaurant key.
    #[serde(default)]
    pub explanations: HashMap<String, String>,
    /// Mode the service says it used.
    #[serde(default)]
    pub mode: Option<WireMode>,
}

/// Thin client over the recommendation service's match endpoint.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteClient {
    /// Create a client against the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch ranked matches for a prompt.
    ///
    /// Transport failures, non-success statuses, and undecodable payloads
    /// all map to [`ConciergeError::Unavailable`]; a decodable payload whose
    /// records are corrupt maps to [`ConciergeError::BadRecord`].
    pub async fn fetch_matches(
        &self,
        request: &MatchRequest,
    ) -> Result<MatchResponse, ConciergeError> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), MATCH_PATH);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|error| ConciergeError::Unavailable {
                message: error.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConciergeError::Unavailable {
                message: format!("HTTP {status}"),
            });
        }

        let payload: MatchResponse =
            response
                .json()
                .await
                .map_err(|error| ConciergeError::Unavailable {
                    message: format!("malformed payload: {error}"),
                })?;

        for record in &payload.results {
            record.validate()?;
        }

        Ok(payload)
    }
}

impl Default for RemoteClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(prompt: &str) -> MatchRequest {
        MatchRequest {
            prompt: prompt.to_string(),
            limit: 5,
            lang: Some(Lang::En),
        }
    }

    #[test]
    fn test_request_serialization_skips_missing_lang() {
        let mut req = request("rooftop");
        req.lang = None;
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body, json!({"prompt": "rooftop", "limit": 5}));
    }

    #[test]
    fn test_wire_mode_mapping() {
        assert_eq!(WireMode::Ai.into_mode(), Mode::Remote);
        assert_eq!(WireMode::Local.into_mode(), Mode::Local);
        assert_eq!(WireMode::Ab.into_mode(), Mode::Ab);
    }

    #[tokio::test]
    async fn test_fetch_matches_success() {
        let server = MockServer::start().await;
        let body = json!({
            "results": [
                {"id": "R1", "slug": "Old-Mill", "name": "Old Mill"},
                {"id": "R2", "name": "Harbor View"}
            ],
            "match_reason": {"old-mill": ["rooftop", "romantic"]},
            "explanations": {"old-mill": "Rooftop terrace over the bay."},
            "mode": "ai"
        });
        Mock::given(method("POST"))
            .and(path("/v1/concierge/match"))
            .and(body_partial_json(json!({"prompt": "rooftop", "limit": 5})))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let client = RemoteClient::new(server.uri());
        let response = client.fetch_matches(&request("rooftop")).await.unwrap();

        assert_eq!(response.results.len(), 2);
        assert_eq!(response.mode, Some(WireMode::Ai));
        assert_eq!(
            response.match_reason.get("old-mill").map(Vec::len),
            Some(2)
        );
    }

    #[tokio::test]
    async fn test_fetch_matches_http_error_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/concierge/match"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = RemoteClient::new(server.uri());
        let error = client.fetch_matches(&request("rooftop")).await.unwrap_err();
        assert!(error.is_retryable());
        assert!(error.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_fetch_matches_malformed_payload_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/concierge/match"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
            .mount(&server)
            .await;

        let client = RemoteClient::new(server.uri());
        let error = client.fetch_matches(&request("rooftop")).await.unwrap_err();
        assert!(error.is_retryable());
    }

    #[tokio::test]
    async fn test_fetch_matches_corrupt_record_is_bad_record() {
        let server = MockServer::start().await;
        let body = json!({"results": [{"id": "  ", "name": "No Id"}]});
        Mock::given(method("POST"))
            .and(path("/v1/concierge/match"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let client = RemoteClient::new(server.uri());
        let error = client.fetch_matches(&request("rooftop")).await.unwrap_err();
        assert!(!error.is_retryable());
    }

    #[tokio::test]
    async fn test_fetch_matches_network_error_is_unavailable() {
        // Nothing is listening on this port.
        let client = RemoteClient::new("http://127.0.0.1:1");
        let error = client.fetch_matches(&request("rooftop")).await.unwrap_err();
        assert!(error.is_retryable());
    }
}
