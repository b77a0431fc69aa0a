//! Rendering of executor output into user-facing markdown. The formatter is
//! shape-driven: arrays become lists, lone objects become a detail card,
//! strings pass through verbatim. Field access is permissive since the
//! executor lives on the other side of a JSON boundary.

use serde_json::Value;

use crate::types::{ToolResult, COMPARE_TOOLS};

/// Render a tool result as reply text.
pub fn format_tool_result(result: &ToolResult) -> String {
    if !result.ok {
        let detail = result
            .error
            .as_deref()
            .unwrap_or("something went wrong on the tool side");
        return format!(
            "Sorry, that lookup did not go through: {detail}. \
             Mind trying again, or rephrasing the question?"
        );
    }

    let tool_name = result
        .meta
        .as_ref()
        .map(|meta| meta.tool_name.as_str())
        .unwrap_or_default();

    match &result.data {
        Some(Value::Array(items)) if items.is_empty() => {
            "I couldn't find matching tools in the catalog. \
             Try different keywords, or tell me which team you're on."
                .to_string()
        }
        Some(Value::Array(items)) if tool_name == COMPARE_TOOLS => comparison_sections(items),
        Some(Value::Array(items)) => numbered_recommendations(items),
        Some(value @ Value::Object(_)) => detail_card(value),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => "Done — nothing to report back.".to_string(),
    }
}

fn numbered_recommendations(items: &[Value]) -> String {
    let mut out = String::from("Here's what I'd recommend:\n");
    for (index, item) in items.iter().enumerate() {
        let name = str_field(item, &["name"]).unwrap_or("Unnamed tool");
        let purpose = str_field(item, &["purpose"]).unwrap_or("");
        out.push_str(&format!("\n{}. **{}** — {}\n", index + 1, name, purpose));
        if let Some(best_use) = str_field(item, &["bestUse"]) {
            if !best_use.is_empty() {
                out.push_str(&format!("   Best use: {}\n", best_use));
            }
        }
        if let Some(kind) = str_field(item, &["kind", "type"]) {
            out.push_str(&format!("   Type: {}\n", kind));
        }
    }
    out.push_str("\nWant a closer look at any of these? Just ask.");
    out
}

fn comparison_sections(items: &[Value]) -> String {
    let mut out = String::from("Here's how they stack up:\n");
    for item in items {
        let name = str_field(item, &["name"]).unwrap_or("Unnamed tool");
        out.push_str(&format!("\n### {}\n", name));
        if let Some(purpose) = str_field(item, &["purpose"]) {
            out.push_str(&format!("- Purpose: {}\n", purpose));
        }
        if let Some(best_use) = str_field(item, &["bestUse"]) {
            if !best_use.is_empty() {
                out.push_str(&format!("- Best use: {}\n", best_use));
            }
        }
        if let Some(audience) = str_field(item, &["audience"]) {
            if !audience.is_empty() {
                out.push_str(&format!("- Audience: {}\n", audience));
            }
        }
        if let Some(kind) = str_field(item, &["kind", "type"]) {
            out.push_str(&format!("- Type: {}\n", kind));
        }
    }
    out.push_str("\nBoth are in the catalog, so the better fit depends on your workflow.");
    out
}

fn detail_card(item: &Value) -> String {
    let name = str_field(item, &["name"]).unwrap_or("Catalog entry");
    let mut out = format!("**{}**\n", name);
    if let Some(purpose) = str_field(item, &["purpose"]) {
        out.push_str(&format!("\n{}\n", purpose));
    }
    if let Some(best_use) = str_field(item, &["bestUse"]) {
        if !best_use.is_empty() {
            out.push_str(&format!("\n- Best use: {}", best_use));
        }
    }
    if let Some(audience) = str_field(item, &["audience"]) {
        if !audience.is_empty() {
            out.push_str(&format!("\n- Audience: {}", audience));
        }
    }
    if let Some(kind) = str_field(item, &["kind", "type"]) {
        out.push_str(&format!("\n- Type: {}", kind));
    }
    if let Some(Value::Array(tags)) = item.get("tags") {
        let tags: Vec<&str> = tags.iter().filter_map(Value::as_str).collect();
        if !tags.is_empty() {
            out.push_str(&format!("\n- Tags: {}", tags.join(", ")));
        }
    }
    out
}

fn str_field<'a>(item: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| item.get(key)?.as_str())
}
