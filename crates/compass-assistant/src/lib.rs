pub mod backend;
pub mod config;
pub mod engine;
pub mod intent;
pub mod language;
pub mod learning;
pub mod normalize;
pub mod profile;
pub mod store;
pub mod stream;
pub mod synthesis;
pub mod translate;
pub mod types;

// Re-export primary types for convenience
pub use config::AssistantConfig;
pub use engine::{AssistantEngine, ToolExecutor, TurnOutcome};
pub use intent::decide_tool_call;
pub use synthesis::ResponseSynthesizer;
pub use types::{Message, ToolCall, ToolDescriptor, ToolInput, ToolResult};

// Re-export common types
pub use anyhow::{Error, Result};
pub use uuid::Uuid;
