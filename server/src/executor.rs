//! Catalog-backed tool execution. The classifier decides *which* tool runs;
//! this executor resolves it against the catalog the request carried.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use serde_json::{json, Value};

use compass_assistant::engine::ToolExecutor;
use compass_assistant::synthesis::knowledge;
use compass_assistant::types::{
    ToolCall, ToolDescriptor, ToolInput, ToolResult, COMPARE_TOOLS, COMPASS_FEATURES, DAILY_TIP,
    RANDOM_FACT, RANDOM_JOKE, RECOMMEND_TOOL, SANOFI_INFO,
};

pub struct CatalogExecutor;

#[async_trait]
impl ToolExecutor for CatalogExecutor {
    async fn execute(&self, call: &ToolCall, catalog: &[ToolDescriptor]) -> ToolResult {
        match call.tool_name.as_str() {
            RECOMMEND_TOOL => recommend(call, catalog),
            COMPARE_TOOLS => compare(call, catalog),
            SANOFI_INFO => ToolResult::success(call, json!(knowledge::SANOFI_OVERVIEW)),
            COMPASS_FEATURES => ToolResult::success(call, json!(knowledge::PRODUCT_FEATURES)),
            RANDOM_FACT => ToolResult::success(call, json!(random_pick(knowledge::FACTS))),
            RANDOM_JOKE => ToolResult::success(call, json!(random_pick(knowledge::JOKES))),
            DAILY_TIP => ToolResult::success(call, json!(knowledge::tip_of_the_day())),
            name => detail(call, name, catalog),
        }
    }
}

fn random_pick(pool: &'static [&'static str]) -> &'static str {
    pool.choose(&mut rand::thread_rng()).copied().unwrap_or("")
}

/// Score catalog items by keyword overlap across name, purpose, best-use,
/// audience and tags; return the top three matches.
fn recommend(call: &ToolCall, catalog: &[ToolDescriptor]) -> ToolResult {
    let keywords: Vec<String> = match &call.tool_input {
        ToolInput::Keywords { keywords } => keywords.clone(),
        ToolInput::Query { query } => query
            .to_lowercase()
            .split_whitespace()
            .filter(|w| w.len() > 2)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    let mut scored: Vec<(usize, &ToolDescriptor)> = catalog
        .iter()
        .map(|item| (overlap_score(item, &keywords), item))
        .filter(|(score, _)| *score > 0)
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let items: Vec<Value> = scored
        .into_iter()
        .take(3)
        .map(|(_, item)| to_wire(item))
        .collect();
    ToolResult::success(call, Value::Array(items))
}

fn overlap_score(item: &ToolDescriptor, keywords: &[String]) -> usize {
    let haystack = format!(
        "{} {} {} {} {}",
        item.name,
        item.purpose,
        item.best_use,
        item.audience,
        item.tags.join(" ")
    )
    .to_lowercase();
    keywords
        .iter()
        .filter(|keyword| haystack.contains(keyword.to_lowercase().as_str()))
        .count()
}

fn compare(call: &ToolCall, catalog: &[ToolDescriptor]) -> ToolResult {
    let ToolInput::ToolIds { tool_ids } = &call.tool_input else {
        return ToolResult::failure(call, "comparison needs a list of tool names");
    };

    let items: Vec<Value> = tool_ids
        .iter()
        .filter_map(|id| {
            catalog
                .iter()
                .find(|item| item.name.eq_ignore_ascii_case(id))
        })
        .map(to_wire)
        .collect();

    if items.len() < 2 {
        return ToolResult::failure(call, "I could only find one of those tools in the catalog");
    }
    ToolResult::success(call, Value::Array(items))
}

fn detail(call: &ToolCall, name: &str, catalog: &[ToolDescriptor]) -> ToolResult {
    match catalog
        .iter()
        .find(|item| item.name.eq_ignore_ascii_case(name))
    {
        Some(item) => ToolResult::success(call, to_wire(item)),
        None => ToolResult::failure(call, format!("no catalog entry named {name}")),
    }
}

fn to_wire(item: &ToolDescriptor) -> Value {
    serde_json::to_value(item).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_assistant::types::ToolKind;

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
            tool("PlantView", "Production analytics", &["manufacturing", "analytics"]),
            tool("LineSight", "Quality inspection", &["manufacturing", "quality"]),
        ]
    }

    #[tokio::test]
    async fn recommendation_ranks_by_keyword_overlap() {
        let call = ToolCall::new(
            RECOMMEND_TOOL,
            ToolInput::Keywords {
                keywords: vec!["manufacturing".into(), "quality".into()],
            },
        );
        let result = CatalogExecutor.execute(&call, &catalog()).await;
        assert!(result.ok);
        let items = result.data.unwrap();
        assert_eq!(items[0]["name"], "LineSight");
        assert_eq!(items.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn comparison_resolves_ids_against_the_catalog() {
        let call = ToolCall::new(
            COMPARE_TOOLS,
            ToolInput::ToolIds {
                tool_ids: vec!["PlantView".into(), "LineSight".into()],
            },
        );
        let result = CatalogExecutor.execute(&call, &catalog()).await;
        assert!(result.ok);
        let items = result.data.unwrap();
        assert_eq!(items[0]["name"], "PlantView");
        assert_eq!(items[1]["name"], "LineSight");
    }

    #[tokio::test]
    async fn unknown_tool_name_fails_recoverably() {
        let call = ToolCall::new("Nonexistent", ToolInput::Query { query: "x".into() });
        let result = CatalogExecutor.execute(&call, &catalog()).await;
        assert!(!result.ok);
        assert!(result.error.unwrap().contains("Nonexistent"));
    }

    #[tokio::test]
    async fn knowledge_tools_return_string_data() {
        let call = ToolCall::new(SANOFI_INFO, ToolInput::Empty {});
        let result = CatalogExecutor.execute(&call, &catalog()).await;
        assert!(result.ok);
        assert!(result.data.unwrap().as_str().unwrap().contains("Sanofi"));
    }
}
