//! Turn orchestration. One [`AssistantEngine`] owns the whole pipeline for a
//! session: normalize the query, run the classifier, hand any tool call to
//! the injected executor, synthesize the reply, then fold the turn into the
//! persisted profile. The executor is a trait so the server can back it with
//! the live catalog while tests substitute doubles.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::backend::RemoteBackend;
use crate::config::AssistantConfig;
use crate::intent::decide_tool_call;
use crate::learning::{FeedbackEntry, FeedbackStore};
use crate::normalize::normalize_query;
use crate::profile::UserProfile;
use crate::store::{load_json, save_json, StateStore, PROFILE_KEY};
use crate::synthesis::ResponseSynthesizer;
use crate::translate::TranslationChain;
use crate::types::{Message, ToolCall, ToolDescriptor, ToolInput, ToolResult};

/// Runs a classified tool call against the catalog. Implemented by the
/// serving layer; tests inject doubles.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute(&self, call: &ToolCall, catalog: &[ToolDescriptor]) -> ToolResult;
}

/// What one processed turn produced.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub reply: String,
    pub tool_call: Option<ToolCall>,
}

pub struct AssistantEngine {
    synthesizer: ResponseSynthesizer,
    backend: Arc<RemoteBackend>,
    executor: Arc<dyn ToolExecutor>,
    store: Arc<dyn StateStore>,
    profile: Mutex<UserProfile>,
    feedback: Mutex<FeedbackStore>,
}

impl AssistantEngine {
    pub fn new(
        config: &AssistantConfig,
        store: Arc<dyn StateStore>,
        executor: Arc<dyn ToolExecutor>,
    ) -> anyhow::Result<Self> {
        let backend = Arc::new(RemoteBackend::new(&config.backend)?);
        let chain = TranslationChain::new(
            &config.translation,
            backend.clone(),
            Duration::from_secs(config.backend.translate_timeout_secs),
        )?;
        let synthesizer = ResponseSynthesizer::new(
            chain,
            backend.clone(),
            Duration::from_secs(config.backend.fallback_timeout_secs),
            config.random_seed,
        );

        let profile: UserProfile = load_json(store.as_ref(), PROFILE_KEY);
        let feedback = FeedbackStore::load(store.clone());

        Ok(Self {
            synthesizer,
            backend,
            executor,
            store,
            profile: Mutex::new(profile),
            feedback: Mutex::new(feedback),
        })
    }

    /// Process one user turn end to end. The classifier sees the normalized
    /// query; the synthesizer cascades over the original text.
    pub async fn process_turn(
        &self,
        query: &str,
        history: &[Message],
        catalog: &[ToolDescriptor],
    ) -> TurnOutcome {
        let normalized = normalize_query(query);
        let call = decide_tool_call(&normalized, catalog);
        if let Some(call) = &call {
            tracing::info!(tool = %call.tool_name, "Classifier resolved a tool call");
        }

        let tool_result = match &call {
            Some(call) => Some(self.executor.execute(call, catalog).await),
            None => None,
        };

        let profile_snapshot = self.profile.lock().clone();
        let reply = self
            .synthesizer
            .synthesize(query, history, &profile_snapshot, tool_result.as_ref())
            .await;

        let intent_label = call
            .as_ref()
            .map(|c| c.tool_name.as_str())
            .unwrap_or("chat");
        let named_tools = named_catalog_tools(&call, catalog);
        {
            let mut profile = self.profile.lock();
            profile.observe_turn(&normalized, intent_label, &named_tools);
            if let Err(e) = save_json(self.store.as_ref(), PROFILE_KEY, &*profile) {
                tracing::warn!(error = %e, "Failed to persist profile");
            }
        }

        TurnOutcome {
            reply,
            tool_call: call,
        }
    }

    /// Record explicit feedback and return the updated accuracy.
    pub fn record_feedback(&self, entry: FeedbackEntry) -> anyhow::Result<f64> {
        let mut feedback = self.feedback.lock();
        feedback.record(entry)?;
        Ok(feedback.model().accuracy())
    }

    pub fn accuracy(&self) -> f64 {
        self.feedback.lock().model().accuracy()
    }

    pub fn profile(&self) -> UserProfile {
        self.profile.lock().clone()
    }

    pub fn backend(&self) -> Arc<RemoteBackend> {
        self.backend.clone()
    }
}

/// Catalog names this call is explicitly about: the call's own tool name when
/// it is a catalog entry, or the ids of a comparison.
fn named_catalog_tools<'a>(call: &'a Option<ToolCall>, catalog: &[ToolDescriptor]) -> Vec<&'a str> {
    let Some(call) = call else {
        return Vec::new();
    };
    if catalog.iter().any(|t| t.name == call.tool_name) {
        return vec![call.tool_name.as_str()];
    }
    match &call.tool_input {
        ToolInput::ToolIds { tool_ids } => tool_ids.iter().map(String::as_str).collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BackendConfig, ServerConfig, TranslationConfig};
    use crate::store::MemoryStore;
    use crate::synthesis::knowledge::SELF_IDENTIFICATION;
    use crate::types::{Feedback, ToolKind, RECOMMEND_TOOL};
    use serde_json::json;

    fn offline_config() -> AssistantConfig {
        AssistantConfig {
            storage_dir: std::env::temp_dir(),
            backend: BackendConfig {
                endpoint: "http://127.0.0.1:9/v1/chat/completions".into(),
                model: "test-model".into(),
                api_key: None,
                fallback_timeout_secs: 1,
                translate_timeout_secs: 1,
            },
            translation: TranslationConfig {
                endpoint: "http://127.0.0.1:9/v2/translate".into(),
                api_key: None,
                api_timeout_secs: 1,
            },
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
            },
            random_seed: Some(21),
        }
    }

    fn catalog() -> Vec<ToolDescriptor> {
        let tool = |name: &str, purpose: &str, tags: &[&str]| ToolDescriptor {
            name: name.into(),
            purpose: purpose.into(),
            best_use: String::new(),
            audience: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            kind: ToolKind::Internal,
        };
        vec![
            tool("Concierge", "Internal Q&A assistant", &["chatbot", "knowledge"]),
            tool("ChatGPT", "General drafting assistant", &["chatbot", "writing"]),
            tool("PlantView", "Production analytics", &["manufacturing", "analytics"]),
            tool("LineSight", "Quality inspection", &["manufacturing", "quality"]),
        ]
    }

    #[derive(Default)]
    struct RecordingExecutor {
        calls: Mutex<Vec<ToolCall>>,
    }

    #[async_trait]
    impl ToolExecutor for RecordingExecutor {
        async fn execute(&self, call: &ToolCall, _catalog: &[ToolDescriptor]) -> ToolResult {
            self.calls.lock().push(call.clone());
            ToolResult::success(
                call,
                json!([{
                    "name": "PlantView",
                    "purpose": "Production analytics",
                    "bestUse": "Shift dashboards",
                    "kind": "internal",
                }]),
            )
        }
    }

    fn engine_with_executor(executor: Arc<RecordingExecutor>) -> AssistantEngine {
        AssistantEngine::new(
            &offline_config(),
            Arc::new(MemoryStore::default()),
            executor,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn classified_turn_runs_the_executor_and_renders_the_result() {
        let executor = Arc::new(RecordingExecutor::default());
        let engine = engine_with_executor(executor.clone());

        let outcome = engine
            .process_turn("recomend a tool for manufacturing", &[], &catalog())
            .await;

        let calls = executor.calls.lock();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].tool_name, RECOMMEND_TOOL);
        assert!(outcome.reply.contains("1. **PlantView**"), "{}", outcome.reply);
        assert_eq!(
            outcome.tool_call.as_ref().map(|c| c.tool_name.as_str()),
            Some(RECOMMEND_TOOL)
        );
    }

    #[tokio::test]
    async fn small_talk_never_reaches_the_executor() {
        let executor = Arc::new(RecordingExecutor::default());
        let engine = engine_with_executor(executor.clone());

        let outcome = engine.process_turn("hello", &[], &catalog()).await;

        assert!(executor.calls.lock().is_empty());
        assert!(outcome.reply.contains(SELF_IDENTIFICATION));
        assert!(outcome.tool_call.is_none());
    }

    #[tokio::test]
    async fn comparison_turns_track_the_named_tools() {
        let executor = Arc::new(RecordingExecutor::default());
        let engine = engine_with_executor(executor.clone());

        engine
            .process_turn("compare Concierge vs ChatGPT", &[], &catalog())
            .await;

        let profile = engine.profile();
        assert!(profile.tools_asked_about.contains(&"Concierge".to_string()));
        assert!(profile.tools_asked_about.contains(&"ChatGPT".to_string()));
        assert_eq!(
            profile.recent_intents.back().map(String::as_str),
            Some("compareTools")
        );
    }

    #[tokio::test]
    async fn profile_persists_through_the_injected_store() {
        let store = Arc::new(MemoryStore::default());
        let engine = AssistantEngine::new(
            &offline_config(),
            store.clone(),
            Arc::new(RecordingExecutor::default()),
        )
        .unwrap();

        engine
            .process_turn("my name is Priya, recommend analytics tools", &[], &catalog())
            .await;

        let stored = store.load(PROFILE_KEY).unwrap().unwrap();
        assert!(stored.contains("Priya"), "{stored}");
    }

    #[tokio::test]
    async fn feedback_updates_accuracy() {
        let engine = engine_with_executor(Arc::new(RecordingExecutor::default()));
        assert_eq!(engine.accuracy(), 0.0);

        let first = engine
            .record_feedback(FeedbackEntry::new("good", "reply", Feedback::Positive))
            .unwrap();
        assert_eq!(first, 1.0);

        let second = engine
            .record_feedback(FeedbackEntry::new("bad", "reply", Feedback::Negative))
            .unwrap();
        assert!((second - 0.5).abs() < 1e-9);
    }
}
