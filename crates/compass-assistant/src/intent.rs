//! Intent classification: maps a normalized query plus the tool catalog to an
//! optional structured tool call. The cascade is a declared rule list
//! evaluated in array order; the first matching rule short-circuits the rest.
//! That ordering is part of the contract: a query naming two catalog tools
//! *and* an audience resolves as a comparison because the comparison rule
//! runs first.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::{
    ToolCall, ToolDescriptor, ToolInput, COMPARE_TOOLS, COMPASS_FEATURES, DAILY_TIP, RANDOM_FACT,
    RANDOM_JOKE, RECOMMEND_TOOL, SANOFI_INFO,
};

static RECOMMEND_FOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:recommend|suggest)\b.*?\btools?\b.*?\bfor\b\s+(.+)$")
        .expect("recommend-for regex is valid")
});
static WHICH_TOOL_FOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:which|what)\b.*?\btools?\b.*?\b(?:best|good|use|suited|right)\b.*?\bfor\b\s+(.+)$")
        .expect("which-tool-for regex is valid")
});
static FIND_TOOL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:find|show|give|get)\b.*\btools?\b").expect("find-tool regex is valid")
});

const COMPARISON_MARKERS: &[&str] = &["compare", " vs ", " vs. ", "versus", "difference between"];

/// Category keywords that can select a tag shared by several catalog items.
const CATEGORY_KEYWORDS: &[&str] = &[
    "chatbot",
    "analytics",
    "automation",
    "translation",
    "documentation",
    "writing",
    "knowledge",
    "imaging",
    "manufacturing",
    "data",
];

/// Multi-word audience phrases, checked before single tokens.
const PHRASE_SYNONYMS: &[(&str, &[&str])] = &[
    ("shop floor qa", &["quality", "inspection", "manufacturing", "plant"]),
    ("field reps", &["sales", "crm", "field"]),
    ("sales team", &["sales", "crm", "customers"]),
    ("data scientists", &["data", "analytics", "models"]),
    ("hr team", &["hr", "people", "onboarding"]),
    ("medical writers", &["medical", "writing", "regulatory", "documents"]),
    ("lab technicians", &["lab", "research", "samples", "quality"]),
];

const TOKEN_SYNONYMS: &[(&str, &[&str])] = &[
    ("manufacturing", &["plant", "production", "quality"]),
    ("marketing", &["campaign", "content", "brand"]),
    ("sales", &["crm", "field", "customers"]),
    ("research", &["lab", "science", "data"]),
    ("finance", &["budget", "reporting", "numbers"]),
    ("quality", &["inspection", "compliance", "qa"]),
    ("qa", &["quality", "inspection", "testing"]),
    ("hr", &["people", "recruiting", "onboarding"]),
    ("engineers", &["engineering", "technical", "automation"]),
    ("scientists", &["research", "data", "lab"]),
];

const ACTION_VERBS: &[&str] = &[
    "analyze", "automate", "write", "generate", "summarize", "create", "build", "draft",
    "track", "monitor",
];

const TOPIC_KEYWORDS: &[&str] = &[
    "analytics",
    "data",
    "documents",
    "content",
    "chatbot",
    "automation",
    "reporting",
    "images",
    "slides",
    "knowledge",
    "emails",
    "meetings",
];

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "our", "your", "my", "of", "and", "or", "to", "in", "on", "at", "team",
];

const FEATURE_WORDS: &[&str] = &[
    "feature",
    "features",
    "capability",
    "capabilities",
    "function",
    "functions",
    "offer",
    "do",
    "help",
];

/// Classifier rules in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Comparison,
    AudienceRecommendation,
    BareAudience,
    ActionTopic,
    FindTool,
    ExactName,
    SanofiInfo,
    CompassFeatures,
    Ancillary,
}

pub const RULE_ORDER: [Rule; 9] = [
    Rule::Comparison,
    Rule::AudienceRecommendation,
    Rule::BareAudience,
    Rule::ActionTopic,
    Rule::FindTool,
    Rule::ExactName,
    Rule::SanofiInfo,
    Rule::CompassFeatures,
    Rule::Ancillary,
];

/// Decide whether the query maps to a tool call. Deterministic; `None` is a
/// valid outcome and defers to the response synthesizer's own cascade.
pub fn decide_tool_call(query: &str, catalog: &[ToolDescriptor]) -> Option<ToolCall> {
    if query.trim().is_empty() {
        return None;
    }
    let lower = query.to_lowercase();

    for rule in RULE_ORDER {
        if let Some(call) = apply_rule(rule, &lower, query, catalog) {
            tracing::debug!(rule = ?rule, tool = %call.tool_name, "Classifier rule matched");
            return Some(call);
        }
    }
    tracing::debug!("No classifier rule matched");
    None
}

fn apply_rule(rule: Rule, lower: &str, query: &str, catalog: &[ToolDescriptor]) -> Option<ToolCall> {
    match rule {
        Rule::Comparison => comparison_call(lower, catalog),
        Rule::AudienceRecommendation => audience_recommendation_call(lower),
        Rule::BareAudience => bare_audience_call(lower),
        Rule::ActionTopic => action_topic_call(lower, query),
        Rule::FindTool => find_tool_call(lower, query),
        Rule::ExactName => exact_name_call(lower, query, catalog),
        Rule::SanofiInfo => has_word(lower, "sanofi")
            .then(|| ToolCall::new(SANOFI_INFO, ToolInput::Empty {})),
        Rule::CompassFeatures => compass_features_call(lower),
        Rule::Ancillary => ancillary_call(lower),
    }
}

fn has_word(lower: &str, word: &str) -> bool {
    lower
        .split(|c: char| !c.is_alphanumeric())
        .any(|token| token == word)
}

fn mentions_name(lower: &str, name: &str) -> bool {
    let pattern = format!(r"(?i)\b{}\b", regex::escape(name));
    Regex::new(&pattern)
        .map(|re| re.is_match(lower))
        .unwrap_or(false)
}

fn comparison_call(lower: &str, catalog: &[ToolDescriptor]) -> Option<ToolCall> {
    if !COMPARISON_MARKERS.iter().any(|m| lower.contains(m)) {
        return None;
    }

    // Exact catalog names first, kept in catalog order.
    let named: Vec<String> = catalog
        .iter()
        .filter(|tool| mentions_name(lower, &tool.name))
        .map(|tool| tool.name.clone())
        .collect();
    if named.len() >= 2 {
        return Some(ToolCall::new(
            COMPARE_TOOLS,
            ToolInput::ToolIds { tool_ids: named },
        ));
    }

    // Otherwise a category keyword whose tag at least two items share.
    for category in CATEGORY_KEYWORDS {
        if !has_word(lower, category) {
            continue;
        }
        let tagged: Vec<String> = catalog
            .iter()
            .filter(|tool| tool.tags.iter().any(|tag| tag.eq_ignore_ascii_case(category)))
            .map(|tool| tool.name.clone())
            .collect();
        if tagged.len() >= 2 {
            return Some(ToolCall::new(
                COMPARE_TOOLS,
                ToolInput::ToolIds { tool_ids: tagged },
            ));
        }
    }
    None
}

fn audience_recommendation_call(lower: &str) -> Option<ToolCall> {
    let capture = RECOMMEND_FOR_RE
        .captures(lower)
        .or_else(|| WHICH_TOOL_FOR_RE.captures(lower))?;
    let audience = capture.get(1)?.as_str();
    Some(ToolCall::new(
        RECOMMEND_TOOL,
        ToolInput::Keywords {
            keywords: expand_audience(audience),
        },
    ))
}

fn bare_audience_call(lower: &str) -> Option<ToolCall> {
    let trimmed = lower.trim().trim_end_matches(['?', '.', '!']);
    let known = PHRASE_SYNONYMS.iter().any(|(key, _)| *key == trimmed)
        || TOKEN_SYNONYMS.iter().any(|(key, _)| *key == trimmed);
    known.then(|| {
        ToolCall::new(
            RECOMMEND_TOOL,
            ToolInput::Keywords {
                keywords: expand_audience(trimmed),
            },
        )
    })
}

fn action_topic_call(lower: &str, query: &str) -> Option<ToolCall> {
    let has_action = ACTION_VERBS.iter().any(|v| has_word(lower, v));
    let has_topic = TOPIC_KEYWORDS.iter().any(|t| has_word(lower, t));
    let mentions_tool = has_word(lower, "tool") || has_word(lower, "tools");

    let fires = (has_action && has_topic) || (has_action && mentions_tool) || (has_topic && !has_action);
    fires.then(|| {
        ToolCall::new(
            RECOMMEND_TOOL,
            ToolInput::Query {
                query: query.to_string(),
            },
        )
    })
}

fn find_tool_call(lower: &str, query: &str) -> Option<ToolCall> {
    FIND_TOOL_RE.is_match(lower).then(|| {
        ToolCall::new(
            RECOMMEND_TOOL,
            ToolInput::Query {
                query: query.to_string(),
            },
        )
    })
}

fn exact_name_call(lower: &str, query: &str, catalog: &[ToolDescriptor]) -> Option<ToolCall> {
    catalog
        .iter()
        .find(|tool| mentions_name(lower, &tool.name))
        .map(|tool| {
            ToolCall::new(
                tool.name.clone(),
                ToolInput::Query {
                    query: query.to_string(),
                },
            )
        })
}

fn compass_features_call(lower: &str) -> Option<ToolCall> {
    let fires = has_word(lower, "compass") && FEATURE_WORDS.iter().any(|w| has_word(lower, w));
    fires.then(|| ToolCall::new(COMPASS_FEATURES, ToolInput::Empty {}))
}

fn ancillary_call(lower: &str) -> Option<ToolCall> {
    if has_word(lower, "fact") || has_word(lower, "facts") {
        return Some(ToolCall::new(RANDOM_FACT, ToolInput::Empty {}));
    }
    if has_word(lower, "joke") || has_word(lower, "jokes") {
        return Some(ToolCall::new(RANDOM_JOKE, ToolInput::Empty {}));
    }
    if has_word(lower, "tip") || has_word(lower, "tips") {
        return Some(ToolCall::new(DAILY_TIP, ToolInput::Empty {}));
    }
    None
}

/// Expand an audience phrase into a keyword set: multi-word phrase synonyms
/// first, then each remaining non-stop-word token plus its token synonyms.
/// Insertion order is kept and duplicates are skipped.
fn expand_audience(phrase: &str) -> Vec<String> {
    let lower = phrase.trim().trim_end_matches(['?', '.', '!']).to_lowercase();
    let mut keywords: Vec<String> = Vec::new();

    for (key, synonyms) in PHRASE_SYNONYMS {
        if lower.contains(key) {
            for synonym in *synonyms {
                push_unique(&mut keywords, synonym);
            }
        }
    }

    for token in lower.split(|c: char| !c.is_alphanumeric()) {
        if token.is_empty() || STOP_WORDS.contains(&token) {
            continue;
        }
        push_unique(&mut keywords, token);
        if let Some((_, synonyms)) = TOKEN_SYNONYMS.iter().find(|(key, _)| *key == token) {
            for synonym in *synonyms {
                push_unique(&mut keywords, synonym);
            }
        }
    }

    keywords
}

fn push_unique(keywords: &mut Vec<String>, keyword: &str) {
    if !keywords.iter().any(|k| k == keyword) {
        keywords.push(keyword.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ToolKind;

    fn tool(name: &str, tags: &[&str]) -> ToolDescriptor {
        ToolDescriptor {
            name: name.to_string(),
            purpose: format!("{} purpose", name),
            best_use: String::new(),
            audience: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            kind: ToolKind::Internal,
        }
    }

    fn catalog() -> Vec<ToolDescriptor> {
        vec![
            tool("Concierge", &["chatbot", "knowledge"]),
            tool("ChatGPT", &["chatbot", "writing"]),
            tool("PlantView", &["manufacturing", "analytics"]),
            tool("LineSight", &["manufacturing", "quality"]),
        ]
    }

    #[test]
    fn rule_order_is_pinned() {
        assert_eq!(RULE_ORDER[0], Rule::Comparison);
        assert_eq!(RULE_ORDER[1], Rule::AudienceRecommendation);
        assert_eq!(RULE_ORDER[5], Rule::ExactName);
        assert_eq!(RULE_ORDER[8], Rule::Ancillary);
    }

    #[test]
    fn comparison_preserves_catalog_order() {
        let call = decide_tool_call("Compare Concierge vs ChatGPT", &catalog()).unwrap();
        assert_eq!(call.tool_name, COMPARE_TOOLS);
        assert_eq!(
            call.tool_input,
            ToolInput::ToolIds {
                tool_ids: vec!["Concierge".into(), "ChatGPT".into()]
            }
        );

        // Mention order reversed, catalog order still wins.
        let call = decide_tool_call("chatgpt versus concierge", &catalog()).unwrap();
        assert_eq!(
            call.tool_input,
            ToolInput::ToolIds {
                tool_ids: vec!["Concierge".into(), "ChatGPT".into()]
            }
        );
    }

    #[test]
    fn category_comparison_needs_two_tagged_items() {
        let call = decide_tool_call("compare the chatbot options", &catalog()).unwrap();
        assert_eq!(call.tool_name, COMPARE_TOOLS);
        assert_eq!(
            call.tool_input,
            ToolInput::ToolIds {
                tool_ids: vec!["Concierge".into(), "ChatGPT".into()]
            }
        );
        assert!(decide_tool_call("compare the imaging options", &catalog()).is_none());
    }

    #[test]
    fn comparison_wins_over_audience_recommendation() {
        let call = decide_tool_call("compare tools for manufacturing", &catalog()).unwrap();
        assert_eq!(call.tool_name, COMPARE_TOOLS);
        assert_eq!(
            call.tool_input,
            ToolInput::ToolIds {
                tool_ids: vec!["PlantView".into(), "LineSight".into()]
            }
        );
    }

    #[test]
    fn audience_phrase_expands_through_synonyms() {
        let call = decide_tool_call("recommend a tool for shop floor qa", &catalog()).unwrap();
        assert_eq!(call.tool_name, RECOMMEND_TOOL);
        match call.tool_input {
            ToolInput::Keywords { keywords } => {
                assert!(keywords.contains(&"quality".to_string()));
                assert!(keywords.contains(&"inspection".to_string()));
                assert!(keywords.contains(&"plant".to_string()));
            }
            other => panic!("expected keywords, got {:?}", other),
        }
    }

    #[test]
    fn bare_audience_mention_recommends() {
        let call = decide_tool_call("manufacturing", &catalog()).unwrap();
        assert_eq!(call.tool_name, RECOMMEND_TOOL);
        match call.tool_input {
            ToolInput::Keywords { keywords } => {
                assert_eq!(keywords[0], "manufacturing");
                assert!(keywords.contains(&"plant".to_string()));
                assert!(keywords.contains(&"production".to_string()));
            }
            other => panic!("expected keywords, got {:?}", other),
        }
    }

    #[test]
    fn topic_without_action_verb_recommends_raw_query() {
        let call = decide_tool_call("something for reporting please", &catalog()).unwrap();
        assert_eq!(call.tool_name, RECOMMEND_TOOL);
        assert_eq!(
            call.tool_input,
            ToolInput::Query {
                query: "something for reporting please".into()
            }
        );
    }

    #[test]
    fn exact_name_resolves_to_that_tool() {
        let call = decide_tool_call("tell me about Concierge", &catalog()).unwrap();
        assert_eq!(call.tool_name, "Concierge");
    }

    #[test]
    fn knowledge_rules_fire_on_keywords() {
        assert_eq!(
            decide_tool_call("what is sanofi", &catalog()).unwrap().tool_name,
            SANOFI_INFO
        );
        assert_eq!(
            decide_tool_call("what can compass offer", &catalog())
                .unwrap()
                .tool_name,
            COMPASS_FEATURES
        );
        assert_eq!(
            decide_tool_call("tell me a joke", &catalog()).unwrap().tool_name,
            RANDOM_JOKE
        );
    }

    #[test]
    fn unmatched_queries_return_none() {
        assert!(decide_tool_call("pondering the orb", &catalog()).is_none());
        assert!(decide_tool_call("", &catalog()).is_none());
        assert!(decide_tool_call("   ", &catalog()).is_none());
    }
}
