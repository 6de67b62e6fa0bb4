//! Hybrid orchestration: remote-first routing with local fallback.

use parking_lot::{Mutex, RwLock};
use sofra_corpus::{ConciergeError, MatchResult, Mode, RestaurantRecord, ScoredCandidate, Source};

use crate::cache::{CacheLookup, ResponseCache};
use crate::remote::{Lang, MatchRequest, MatchResponse, RemoteClient};

const ADVISORY_OFFLINE: &str = "Offline mode: results ranked on-device.";
const ADVISORY_REMOTE_EMPTY: &str =
    "The concierge service had no suggestions; showing on-device picks.";
const ADVISORY_REMOTE_FAILED: &str =
    "The concierge service is unreachable; showing on-device picks.";

/// Session configuration for the orchestrator. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Routing mode for the whole session.
    pub mode: Mode,
    /// Maximum shortlist length.
    pub limit: usize,
    /// Optional response language for remote calls.
    pub lang: Option<Lang>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Remote,
            limit: 10,
            lang: None,
        }
    }
}

/// Lifecycle of the current query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState {
    /// No query submitted yet.
    Idle,
    /// A query is in flight.
    Pending {
        /// The prompt being resolved.
        prompt: String,
    },
    /// The latest query settled with a result.
    Settled(MatchResult),
}

#[derive(Debug)]
struct Inner {
    /// Bumped on every submit; settlements carrying an older generation
    /// are stale and get discarded.
    generation: u64,
    last_prompt: Option<String>,
    state: QueryState,
}

/// Owns the local/remote decision policy, fallback, and refresh behavior.
///
/// The orchestrator is the only component in the engine that performs I/O;
/// its public query surface never returns an error for remote failures --
/// those settle as local-sourced results with an advisory instead.
#[derive(Debug)]
pub struct HybridOrchestrator {
    config: OrchestratorConfig,
    remote: RemoteClient,
    corpus: RwLock<Vec<RestaurantRecord>>,
    inner: Mutex<Inner>,
    mode_cache: ResponseCache<Mode>,
}

impl HybridOrchestrator {
    /// Create an orchestrator over an initial corpus.
    pub fn new(
        config: OrchestratorConfig,
        remote: RemoteClient,
        corpus: Vec<RestaurantRecord>,
    ) -> Result<Self, ConciergeError> {
        for record in &corpus {
            record.validate()?;
        }
        Ok(Self {
            config,
            remote,
            corpus: RwLock::new(corpus),
            inner: Mutex::new(Inner {
                generation: 0,
                last_prompt: None,
                state: QueryState::Idle,
            }),
            mode_cache: ResponseCache::new(),
        })
    }

    /// Current query state (idle, pending, or the last settled result).
    #[must_use]
    pub fn current(&self) -> QueryState {
        self.inner.lock().state.clone()
    }

    /// The last settled result, if any.
    #[must_use]
    pub fn last_result(&self) -> Option<MatchResult> {
        match self.inner.lock().state.clone() {
            QueryState::Settled(result) => Some(result),
            _ => None,
        }
    }

    /// Submit a prompt and resolve it to a match result.
    ///
    /// Always returns a result; remote trouble degrades to local scoring.
    /// If a newer prompt is submitted while this one is in flight, this
    /// call's settlement is discarded from the orchestrator state (the
    /// returned value still reflects this call's own prompt).
    pub async fn query(&self, prompt: &str) -> MatchResult {
        let generation = {
            let mut inner = self.inner.lock();
            inner.generation += 1;
            inner.last_prompt = Some(prompt.to_string());
            inner.state = QueryState::Pending {
                prompt: prompt.to_string(),
            };
            inner.generation
        };

        let result = match self.resolve_mode() {
            Mode::Local => self.local_result(prompt, Some(ADVISORY_OFFLINE)),
            Mode::Remote | Mode::Ab => self.remote_first(prompt).await,
        };

        self.settle(generation, result.clone());
        result
    }

    /// Replace the backing corpus.
    ///
    /// When the last settled result is local-sourced, it is re-ranked for
    /// the same prompt immediately, without a remote call. Remote-sourced
    /// results are left alone.
    pub fn set_corpus(&self, corpus: Vec<RestaurantRecord>) -> Result<(), ConciergeError> {
        for record in &corpus {
            record.validate()?;
        }
        *self.corpus.write() = corpus;

        let mut inner = self.inner.lock();
        let advisory = match &inner.state {
            QueryState::Settled(result) if result.source == Source::Local => {
                result.advisory.clone()
            }
            _ => return Ok(()),
        };
        if let Some(prompt) = inner.last_prompt.clone() {
            tracing::debug!(%prompt, "corpus changed; re-ranking local result");
            let candidates = {
                let corpus = self.corpus.read();
                sofra_engine::rank(&prompt, &corpus, self.config.limit)
            };
            inner.state = QueryState::Settled(MatchResult {
                candidates,
                source: Source::Local,
                advisory,
            });
        }
        Ok(())
    }

    fn resolve_mode(&self) -> Mode {
        match self.mode_cache.get() {
            CacheLookup::Hit(mode) => mode,
            CacheLookup::Pending | CacheLookup::Miss => {
                let _ = self.mode_cache.begin_fill();
                let mode = self.config.mode;
                self.mode_cache.fill(mode);
                mode
            }
        }
    }

    async fn remote_first(&self, prompt: &str) -> MatchResult {
        let request = MatchRequest {
            prompt: prompt.to_string(),
            limit: self.config.limit,
            lang: self.config.lang,
        };
        match self.remote.fetch_matches(&request).await {
            Ok(response) if !response.results.is_empty() => {
                tracing::debug!(
                    results = response.results.len(),
                    mode = ?response.mode,
                    "remote service answered"
                );
                remote_result(response)
            }
            Ok(_) => {
                tracing::debug!("remote service had no matches; falling back to local scoring");
                self.local_result(prompt, Some(ADVISORY_REMOTE_EMPTY))
            }
            Err(error) => {
                tracing::warn!(%error, "remote call failed; falling back to local scoring");
                self.local_result(prompt, Some(ADVISORY_REMOTE_FAILED))
            }
        }
    }

    fn local_result(&self, prompt: &str, advisory: Option<&str>) -> MatchResult {
        let corpus = self.corpus.read();
        let candidates = sofra_engine::rank(prompt, &corpus, self.config.limit);
        MatchResult {
            candidates,
            source: Source::Local,
            advisory: advisory.map(String::from),
        }
    }

    fn settle(&self, generation: u64, result: MatchResult) {
        let mut inner = self.inner.lock();
        if inner.generation != generation {
            tracing::debug!(
                settled = generation,
                current = inner.generation,
                "discarding stale settlement"
            );
            return;
        }
        inner.state = QueryState::Settled(result);
    }
}

/// Build a remote-sourced result, attaching per-candidate provenance from
/// the response's lowercased slug-or-id keyed maps.
fn remote_result(response: MatchResponse) -> MatchResult {
    let candidates = response
        .results
        .into_iter()
        .map(|record| {
            let key = record.key();
            let match_reasons = response.match_reason.get(&key).cloned().unwrap_or_default();
            let explanation = response.explanations.get(&key).cloned();
            ScoredCandidate {
                restaurant: record,
                score: 0.0,
                breakdown: Default::default(),
                match_reasons,
                explanation,
            }
        })
        .collect();
    MatchResult {
        candidates,
        source: Source::Remote,
        advisory: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sofra_corpus::Tags;
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn rooftop(id: &str, name: &str) -> RestaurantRecord {
        RestaurantRecord {
            id: id.to_string(),
            slug: None,
            name: name.to_string(),
            cuisine: vec![],
            tags: Tags::Flat(["rooftop".to_string()].into()),
            price_level: None,
            average_spend: None,
            short_description: String::new(),
            city: "Baku".to_string(),
            neighborhood: String::new(),
            address: String::new(),
        }
    }

    fn corpus() -> Vec<RestaurantRecord> {
        vec![rooftop("r1", "Skyline"), rooftop("r2", "Terrace 19")]
    }

    fn orchestrator(mode: Mode, base_url: &str) -> HybridOrchestrator {
        let config = OrchestratorConfig {
            mode,
            limit: 10,
            lang: None,
        };
        HybridOrchestrator::new(config, RemoteClient::new(base_url), corpus()).unwrap()
    }

    #[tokio::test]
    async fn test_local_mode_never_calls_remote() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/concierge/match"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .expect(0)
            .mount(&server)
            .await;

        let orch = orchestrator(Mode::Local, &server.uri());
        let result = orch.query("rooftop dinner").await;

        assert_eq!(result.source, Source::Local);
        assert!(!result.candidates.is_empty());
        assert!(result.advisory.as_deref().unwrap().contains("Offline"));
    }

    #[tokio::test]
    async fn test_remote_success_attaches_provenance() {
        let server = MockServer::start().await;
        let body = json!({
            "results": [{"id": "R9", "slug": "Panorama", "name": "Panorama"}],
            "match_reason": {"panorama": ["rooftop"]},
            "explanations": {"panorama": "Skyline terrace over the old city."},
            "mode": "ai"
        });
        Mock::given(method("POST"))
            .and(path("/v1/concierge/match"))
            .and(body_partial_json(json!({"prompt": "rooftop dinner"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&server)
            .await;

        let orch = orchestrator(Mode::Remote, &server.uri());
        let result = orch.query("rooftop dinner").await;

        assert_eq!(result.source, Source::Remote);
        assert!(result.advisory.is_none());
        assert_eq!(result.candidates.len(), 1);
        assert_eq!(result.candidates[0].match_reasons, vec!["rooftop"]);
        assert!(result.candidates[0]
            .explanation
            .as_deref()
            .unwrap()
            .contains("Skyline"));
    }

    #[tokio::test]
    async fn test_remote_empty_results_fall_back_to_local() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/concierge/match"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .mount(&server)
            .await;

        let orch = orchestrator(Mode::Remote, &server.uri());
        let result = orch.query("rooftop dinner").await;

        assert_eq!(result.source, Source::Local);
        assert!(!result.candidates.is_empty());
        assert!(result.advisory.as_deref().unwrap().contains("no suggestions"));
    }

    #[tokio::test]
    async fn test_remote_http_error_falls_back_to_local() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/concierge/match"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let orch = orchestrator(Mode::Ab, &server.uri());
        let result = orch.query("rooftop dinner").await;

        assert_eq!(result.source, Source::Local);
        assert!(!result.candidates.is_empty());
        assert!(result.advisory.as_deref().unwrap().contains("unreachable"));
    }

    #[tokio::test]
    async fn test_remote_malformed_payload_falls_back_to_local() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/concierge/match"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let orch = orchestrator(Mode::Remote, &server.uri());
        let result = orch.query("rooftop dinner").await;

        assert_eq!(result.source, Source::Local);
        assert!(!result.candidates.is_empty());
    }

    #[tokio::test]
    async fn test_corpus_change_refreshes_local_result_without_remote_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/concierge/match"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let orch = orchestrator(Mode::Remote, &server.uri());
        let first = orch.query("rooftop dinner").await;
        assert_eq!(first.source, Source::Local);
        assert_eq!(first.candidates.len(), 2);

        orch.set_corpus(vec![rooftop("r3", "New Heights")]).unwrap();

        match orch.current() {
            QueryState::Settled(result) => {
                assert_eq!(result.source, Source::Local);
                assert_eq!(result.candidates.len(), 1);
                assert_eq!(result.candidates[0].restaurant.id, "r3");
                // The fallback advisory survives the refresh.
                assert!(result.advisory.is_some());
            }
            other => panic!("expected settled state, got {other:?}"),
        }
        // Mock expectation (exactly one call) is verified on drop.
    }

    #[tokio::test]
    async fn test_corpus_change_leaves_remote_result_alone() {
        let server = MockServer::start().await;
        let body = json!({"results": [{"id": "R9", "name": "Panorama"}]});
        Mock::given(method("POST"))
            .and(path("/v1/concierge/match"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&server)
            .await;

        let orch = orchestrator(Mode::Remote, &server.uri());
        let first = orch.query("rooftop dinner").await;
        assert_eq!(first.source, Source::Remote);

        orch.set_corpus(vec![rooftop("r3", "New Heights")]).unwrap();

        match orch.current() {
            QueryState::Settled(result) => {
                assert_eq!(result.source, Source::Remote);
                assert_eq!(result.candidates[0].restaurant.id, "R9");
            }
            other => panic!("expected settled state, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_stale_remote_response_is_discarded() {
        let server = MockServer::start().await;
        let slow_body = json!({"results": [{"id": "SLOW", "name": "Slow Answer"}]});
        Mock::given(method("POST"))
            .and(path("/v1/concierge/match"))
            .and(body_partial_json(json!({"prompt": "first"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(&slow_body)
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;
        let fast_body = json!({"results": [{"id": "FAST", "name": "Fast Answer"}]});
        Mock::given(method("POST"))
            .and(path("/v1/concierge/match"))
            .and(body_partial_json(json!({"prompt": "second"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(&fast_body))
            .mount(&server)
            .await;

        let orch = Arc::new(orchestrator(Mode::Remote, &server.uri()));
        let slow = tokio::spawn({
            let orch = Arc::clone(&orch);
            async move { orch.query("first").await }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
        let fast = orch.query("second").await;
        assert_eq!(fast.candidates[0].restaurant.id, "FAST");

        // The slow call still resolves for its own caller...
        let slow_result = slow.await.unwrap();
        assert_eq!(slow_result.candidates[0].restaurant.id, "SLOW");

        // ...but the orchestrator keeps the newer settlement.
        match orch.current() {
            QueryState::Settled(result) => {
                assert_eq!(result.candidates[0].restaurant.id, "FAST");
            }
            other => panic!("expected settled state, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_prompt_settles_empty_local() {
        let server = MockServer::start().await;
        let orch = orchestrator(Mode::Local, &server.uri());
        let result = orch.query("   ").await;
        assert!(result.candidates.is_empty());
        assert_eq!(result.source, Source::Local);
    }

    #[tokio::test]
    async fn test_set_corpus_rejects_corrupt_record() {
        let server = MockServer::start().await;
        let orch = orchestrator(Mode::Local, &server.uri());
        let mut bad = rooftop("", "Nameless");
        bad.id = "   ".to_string();
        let error = orch.set_corpus(vec![bad]).unwrap_err();
        assert!(!error.is_retryable());
    }

    #[test]
    fn test_initial_state_is_idle() {
        let orch = orchestrator(Mode::Local, "http://127.0.0.1:1");
        assert_eq!(orch.current(), QueryState::Idle);
        assert!(orch.last_result().is_none());
    }
}
