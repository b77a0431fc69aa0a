//! Accumulated per-user personalization state. Bounded on every axis so the
//! persisted blob cannot grow without limit: interests cap at 15, tools asked
//! about at 10, intent labels at 20.

use std::collections::VecDeque;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const MAX_INTERESTS: usize = 15;
pub const MAX_TOOLS_ASKED_ABOUT: usize = 10;
pub const MAX_RECENT_INTENTS: usize = 20;

static MY_NAME_IS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:my\s+name\s+is|call\s+me)\s+([[:alpha:]][[:alpha:]'-]*)")
        .expect("name capture regex is valid")
});

const FORMAL_MARKERS: &[&str] = &["please", "could you", "would you", "kindly", "may i"];
const TECHNICAL_MARKERS: &[&str] = &[
    "api", "integration", "pipeline", "deploy", "sdk", "endpoint", "schema", "database", "latency",
];
const CASUAL_MARKERS: &[&str] = &["hey", "cool", "awesome", "btw", "gonna", "wanna"];

const INTEREST_TAGS: &[&str] = &[
    "analytics",
    "automation",
    "chatbot",
    "data",
    "documentation",
    "finance",
    "hr",
    "imaging",
    "knowledge",
    "manufacturing",
    "marketing",
    "quality",
    "sales",
    "translation",
    "writing",
];

/// Inferred register of the conversation. Updated whenever a turn carries a
/// clear marker; otherwise the previous value sticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationStyle {
    #[default]
    Casual,
    Formal,
    Technical,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub name: Option<String>,
    pub style: ConversationStyle,
    pub interests: Vec<String>,
    pub tools_asked_about: VecDeque<String>,
    pub recent_intents: VecDeque<String>,
    pub last_interaction: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Fold one user turn into the profile. `intent_label` is whatever the
    /// classifier resolved ("compareTools", "chat", ...), `tools` the catalog
    /// names the turn was about, when known.
    pub fn observe_turn(&mut self, query: &str, intent_label: &str, tools: &[&str]) {
        let lower = query.to_lowercase();

        if let Some(caps) = MY_NAME_IS_RE.captures(query) {
            if let Some(name) = caps.get(1) {
                self.name = Some(capitalize(name.as_str()));
            }
        }

        if TECHNICAL_MARKERS.iter().any(|m| lower.contains(m)) {
            self.style = ConversationStyle::Technical;
        } else if FORMAL_MARKERS.iter().any(|m| lower.contains(m)) {
            self.style = ConversationStyle::Formal;
        } else if CASUAL_MARKERS.iter().any(|m| lower.contains(m)) {
            self.style = ConversationStyle::Casual;
        }

        for tag in INTEREST_TAGS {
            if lower.contains(tag) && !self.interests.iter().any(|i| i == tag) {
                if self.interests.len() == MAX_INTERESTS {
                    self.interests.remove(0);
                }
                self.interests.push((*tag).to_string());
            }
        }

        for tool in tools {
            if !self.tools_asked_about.iter().any(|t| t == tool) {
                self.tools_asked_about.push_back((*tool).to_string());
                while self.tools_asked_about.len() > MAX_TOOLS_ASKED_ABOUT {
                    self.tools_asked_about.pop_front();
                }
            }
        }

        self.recent_intents.push_back(intent_label.to_string());
        while self.recent_intents.len() > MAX_RECENT_INTENTS {
            self.recent_intents.pop_front();
        }

        self.last_interaction = Some(Utc::now());
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_a_declared_name() {
        let mut profile = UserProfile::default();
        profile.observe_turn("hi, my name is priya", "chat", &[]);
        assert_eq!(profile.name.as_deref(), Some("Priya"));

        profile.observe_turn("call me Sam", "chat", &[]);
        assert_eq!(profile.name.as_deref(), Some("Sam"));
    }

    #[test]
    fn style_follows_the_latest_clear_marker() {
        let mut profile = UserProfile::default();
        profile.observe_turn("could you please compare these", "compareTools", &[]);
        assert_eq!(profile.style, ConversationStyle::Formal);

        profile.observe_turn("does it have an api endpoint", "chat", &[]);
        assert_eq!(profile.style, ConversationStyle::Technical);
    }

    #[test]
    fn recent_intents_rotate_at_twenty() {
        let mut profile = UserProfile::default();
        for i in 0..25 {
            profile.observe_turn("anything", &format!("intent-{i}"), &[]);
        }
        assert_eq!(profile.recent_intents.len(), MAX_RECENT_INTENTS);
        assert_eq!(profile.recent_intents.front().map(String::as_str), Some("intent-5"));
        assert_eq!(
            profile.recent_intents.back().map(String::as_str),
            Some("intent-24")
        );
    }

    #[test]
    fn tools_asked_about_deduplicate_and_rotate() {
        let mut profile = UserProfile::default();
        for _ in 0..3 {
            profile.observe_turn("tell me about Concierge", "toolDetails", &["Concierge"]);
        }
        assert_eq!(profile.tools_asked_about.len(), 1);

        for i in 0..12 {
            let name = format!("Tool{i}");
            profile.observe_turn("details", "toolDetails", &[name.as_str()]);
        }
        assert_eq!(profile.tools_asked_about.len(), MAX_TOOLS_ASKED_ABOUT);
        assert!(!profile.tools_asked_about.contains(&"Concierge".to_string()));
    }

    #[test]
    fn interests_accumulate_from_topic_words() {
        let mut profile = UserProfile::default();
        profile.observe_turn("recommend analytics tools for manufacturing", "recommendTool", &[]);
        assert!(profile.interests.contains(&"analytics".to_string()));
        assert!(profile.interests.contains(&"manufacturing".to_string()));
    }
}
