//! Shared wire and catalog types for the assistant pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Explicit user verdict on an assistant reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Positive,
    Negative,
}

/// One turn of conversation history. Append-only from the UI side; the
/// pipeline only reads past messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Feedback>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Some(Utc::now()),
            feedback: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: Some(Utc::now()),
            feedback: None,
        }
    }
}

/// Whether a catalog entry is built in-house or licensed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    Internal,
    External,
}

/// One catalog item. Owned by the catalog provider; read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub purpose: String,
    #[serde(default)]
    pub best_use: String,
    #[serde(default)]
    pub audience: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub kind: ToolKind,
}

/// Structured input attached to a classified tool call. The shape depends on
/// the tool: a list of catalog names for comparison, an expanded keyword set
/// for audience recommendation, the raw query for everything else, or nothing
/// for the zero-argument knowledge tools.
///
/// `Empty` matches any leftover object on deserialization, so it stays last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolInput {
    ToolIds {
        #[serde(rename = "toolIds")]
        tool_ids: Vec<String>,
    },
    Keywords {
        keywords: Vec<String>,
    },
    Query {
        query: String,
    },
    Empty {},
}

/// The classifier's sole output: which tool to run and with what input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCall {
    pub tool_name: String,
    pub tool_input: ToolInput,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>, tool_input: ToolInput) -> Self {
        Self {
            tool_name: tool_name.into(),
            tool_input,
        }
    }
}

/// Echo of the call that produced a result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResultMeta {
    pub tool_name: String,
    pub tool_input: ToolInput,
}

/// Outcome of running a tool. `ok: false` is a recoverable, user-facing
/// condition, never a pipeline error. `data` stays free-form: an array
/// renders as a list, an object as a detail card, a string verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ToolResultMeta>,
}

impl ToolResult {
    pub fn success(call: &ToolCall, data: serde_json::Value) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
            meta: Some(ToolResultMeta {
                tool_name: call.tool_name.clone(),
                tool_input: call.tool_input.clone(),
            }),
        }
    }

    pub fn failure(call: &ToolCall, error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
            meta: Some(ToolResultMeta {
                tool_name: call.tool_name.clone(),
                tool_input: call.tool_input.clone(),
            }),
        }
    }
}

// Tool names the classifier can emit.
pub const RECOMMEND_TOOL: &str = "recommendTool";
pub const COMPARE_TOOLS: &str = "compareTools";
pub const SANOFI_INFO: &str = "getSanofiInfo";
pub const COMPASS_FEATURES: &str = "getAICompassFeatures";
pub const RANDOM_FACT: &str = "getRandomFact";
pub const RANDOM_JOKE: &str = "getRandomJoke";
pub const DAILY_TIP: &str = "getDailyTip";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_call_uses_camel_case_wire_names() {
        let call = ToolCall::new(
            COMPARE_TOOLS,
            ToolInput::ToolIds {
                tool_ids: vec!["Concierge".into(), "ChatGPT".into()],
            },
        );
        let json = serde_json::to_value(&call).unwrap();
        assert_eq!(json["toolName"], "compareTools");
        assert_eq!(json["toolInput"]["toolIds"][0], "Concierge");
    }

    #[test]
    fn tool_input_round_trips_each_shape() {
        let keywords: ToolInput = serde_json::from_str(r#"{"keywords":["quality"]}"#).unwrap();
        assert_eq!(
            keywords,
            ToolInput::Keywords {
                keywords: vec!["quality".into()]
            }
        );
        let empty: ToolInput = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, ToolInput::Empty {});
    }
}
