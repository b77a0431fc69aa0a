//! Feedback history and the derived learning model. Every explicit thumbs
//! up/down becomes a [`FeedbackEntry`]; the [`LearningModel`] is rebuilt
//! incrementally from each entry and never rolled back. History is a FIFO
//! capped at [`MAX_FEEDBACK_ENTRIES`].

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{load_json, save_json, StateStore, FEEDBACK_KEY, LEARNING_KEY};
use crate::types::Feedback;

pub const MAX_FEEDBACK_ENTRIES: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEntry {
    pub query: String,
    pub response: String,
    pub feedback: Feedback,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_used: Option<String>,
    /// Pattern tags derived from the query at record time.
    #[serde(default)]
    pub context: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl FeedbackEntry {
    pub fn new(query: impl Into<String>, response: impl Into<String>, feedback: Feedback) -> Self {
        let query = query.into();
        let context = extract_patterns(&query);
        Self {
            query,
            response: response.into(),
            feedback,
            timestamp: Utc::now(),
            tool_used: None,
            context,
            reason: None,
            message_id: Some(Uuid::new_v4().to_string()),
            user_id: None,
        }
    }
}

/// Frequency counters over pattern tags, split by outcome.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LearningModel {
    pub successful_patterns: HashMap<String, u32>,
    pub failed_patterns: HashMap<String, u32>,
    pub total_feedback: u64,
    pub positive_count: u64,
}

impl LearningModel {
    /// Share of positive feedback, 0.0 when nothing has been recorded yet.
    pub fn accuracy(&self) -> f64 {
        if self.total_feedback == 0 {
            return 0.0;
        }
        self.positive_count as f64 / self.total_feedback as f64
    }

    pub fn absorb(&mut self, entry: &FeedbackEntry) {
        self.total_feedback += 1;
        let counters = match entry.feedback {
            Feedback::Positive => {
                self.positive_count += 1;
                &mut self.successful_patterns
            }
            Feedback::Negative => &mut self.failed_patterns,
        };
        for pattern in &entry.context {
            *counters.entry(pattern.clone()).or_insert(0) += 1;
        }
    }
}

/// Derive coarse pattern tags from a query: length class, intent markers,
/// and topic words. These are the keys the learning model counts.
pub fn extract_patterns(query: &str) -> Vec<String> {
    let lower = query.trim().to_lowercase();
    let mut patterns = Vec::new();

    let words = lower.split_whitespace().count();
    if words < 4 {
        patterns.push("short-query".to_string());
    } else if words > 12 {
        patterns.push("long-query".to_string());
    }

    if ["compare", " vs ", "versus", "difference between"]
        .iter()
        .any(|m| lower.contains(m))
    {
        patterns.push("comparison".to_string());
    }
    if lower.contains("recommend") || lower.contains("suggest") {
        patterns.push("recommendation".to_string());
    }
    if lower.contains('?')
        || ["who", "what", "where", "when", "why", "how"]
            .iter()
            .any(|w| lower.starts_with(w))
    {
        patterns.push("question".to_string());
    }
    if lower.contains("translate") || lower.contains("translation") {
        patterns.push("translation".to_string());
    }

    for topic in [
        "analytics",
        "automation",
        "chatbot",
        "data",
        "documentation",
        "manufacturing",
        "writing",
    ] {
        if lower.contains(topic) {
            patterns.push(format!("topic:{topic}"));
        }
    }

    patterns
}

/// Bounded feedback history plus the learning model, persisted together
/// through the injected store under two separate keys.
pub struct FeedbackStore {
    store: Arc<dyn StateStore>,
    history: VecDeque<FeedbackEntry>,
    model: LearningModel,
}

impl FeedbackStore {
    pub fn load(store: Arc<dyn StateStore>) -> Self {
        let history: Vec<FeedbackEntry> = load_json(store.as_ref(), FEEDBACK_KEY);
        let model: LearningModel = load_json(store.as_ref(), LEARNING_KEY);
        Self {
            store,
            history: history.into(),
            model,
        }
    }

    /// Absorb one entry, evict the oldest past the cap, persist both keys.
    pub fn record(&mut self, entry: FeedbackEntry) -> anyhow::Result<()> {
        self.model.absorb(&entry);
        self.history.push_back(entry);
        while self.history.len() > MAX_FEEDBACK_ENTRIES {
            self.history.pop_front();
        }
        self.persist()
    }

    fn persist(&self) -> anyhow::Result<()> {
        let history: Vec<&FeedbackEntry> = self.history.iter().collect();
        save_json(self.store.as_ref(), FEEDBACK_KEY, &history)?;
        save_json(self.store.as_ref(), LEARNING_KEY, &self.model)
    }

    pub fn model(&self) -> &LearningModel {
        &self.model
    }

    pub fn history(&self) -> &VecDeque<FeedbackEntry> {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn entry(query: &str, feedback: Feedback) -> FeedbackEntry {
        FeedbackEntry::new(query, "a reply", feedback)
    }

    #[test]
    fn accuracy_is_zero_without_feedback() {
        let model = LearningModel::default();
        assert_eq!(model.accuracy(), 0.0);
    }

    #[test]
    fn accuracy_is_the_positive_share() {
        let mut model = LearningModel::default();
        model.absorb(&entry("good one", Feedback::Positive));
        model.absorb(&entry("good two", Feedback::Positive));
        model.absorb(&entry("bad one", Feedback::Negative));
        assert!((model.accuracy() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn history_evicts_the_oldest_past_one_hundred() {
        let mut store = FeedbackStore::load(Arc::new(MemoryStore::default()));
        for i in 0..101 {
            store
                .record(entry(&format!("query number {i}"), Feedback::Positive))
                .unwrap();
        }
        assert_eq!(store.history().len(), MAX_FEEDBACK_ENTRIES);
        assert!(!store.history().iter().any(|e| e.query == "query number 0"));
        assert!(store
            .history()
            .iter()
            .any(|e| e.query == "query number 100"));
    }

    #[test]
    fn recorded_feedback_survives_a_reload() {
        let backing = Arc::new(MemoryStore::default());
        {
            let mut store = FeedbackStore::load(backing.clone());
            store
                .record(entry("compare Concierge vs ChatGPT", Feedback::Positive))
                .unwrap();
        }
        let reloaded = FeedbackStore::load(backing);
        assert_eq!(reloaded.history().len(), 1);
        assert_eq!(reloaded.model().total_feedback, 1);
        assert_eq!(reloaded.model().positive_count, 1);
    }

    #[test]
    fn patterns_tag_intent_and_topic() {
        let patterns = extract_patterns("compare analytics tools?");
        assert!(patterns.contains(&"short-query".to_string()));
        assert!(patterns.contains(&"comparison".to_string()));
        assert!(patterns.contains(&"question".to_string()));
        assert!(patterns.contains(&"topic:analytics".to_string()));

        let counters = {
            let mut model = LearningModel::default();
            model.absorb(&FeedbackEntry::new(
                "compare analytics tools?",
                "reply",
                Feedback::Negative,
            ));
            model
        };
        assert_eq!(counters.failed_patterns.get("comparison"), Some(&1));
        assert!(counters.successful_patterns.is_empty());
    }
}
