//! Remote language-model backend: an OpenAI-compatible chat-completions
//! client used by the synthesizer's fallback stage and the model tier of the
//! translation chain. Every call carries its own time budget; the budget is
//! enforced with `tokio::time::timeout`, and the losing future is dropped,
//! which tears down the in-flight request.

use futures_util::StreamExt;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::config::BackendConfig;
use crate::language::LanguageCode;
use crate::stream::{DeltaStream, SseParser};
use crate::types::Message;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("no API key configured")]
    MissingKey,
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("backend returned HTTP {status}: {body}")]
    Http { status: StatusCode, body: String },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned no choices")]
    EmptyResponse,
}

pub struct RemoteBackend {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl RemoteBackend {
    pub fn new(config: &BackendConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .tcp_nodelay(true)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn has_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn wire_messages(messages: &[Message]) -> Vec<serde_json::Value> {
        messages
            .iter()
            .map(|m| json!({ "role": m.role, "content": m.content }))
            .collect()
    }

    /// One non-streaming completion, raced against `budget`.
    pub async fn chat(&self, messages: &[Message], budget: Duration) -> Result<String, BackendError> {
        let api_key = self.api_key.as_deref().ok_or(BackendError::MissingKey)?;

        let body = json!({
            "model": self.model,
            "messages": Self::wire_messages(messages),
            "stream": false,
        });

        let request = async {
            let response = self
                .client
                .post(&self.endpoint)
                .header("Authorization", format!("Bearer {}", api_key))
                .json(&body)
                .send()
                .await
                .map_err(|e| {
                    if e.is_connect() {
                        tracing::warn!(endpoint = %self.endpoint, error = %e, "Backend connection failed");
                    }
                    BackendError::Transport(e)
                })?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let preview: String = body.chars().take(300).collect();
                return Err(BackendError::Http {
                    status,
                    body: preview,
                });
            }

            let completion: ChatCompletion = response.json().await?;
            completion
                .choices
                .into_iter()
                .next()
                .map(|choice| choice.message.content)
                .ok_or(BackendError::EmptyResponse)
        };

        tokio::time::timeout(budget, request)
            .await
            .map_err(|_| BackendError::Timeout(budget))?
    }

    /// Open a streaming completion and hand back the raw HTTP response.
    /// The proxy route forwards its body verbatim; [`Self::chat_stream`]
    /// parses it into deltas.
    pub async fn open_stream(&self, messages: &[Message]) -> Result<reqwest::Response, BackendError> {
        let api_key = self.api_key.as_deref().ok_or(BackendError::MissingKey)?;

        let body = json!({
            "model": self.model,
            "messages": Self::wire_messages(messages),
            "stream": true,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let preview: String = body.chars().take(300).collect();
            return Err(BackendError::Http {
                status,
                body: preview,
            });
        }

        Ok(response)
    }

    /// Streaming completion. The returned [`DeltaStream`] yields text
    /// fragments in arrival order; an event-stream body goes through the
    /// incremental parser, anything else is forwarded as raw text chunks.
    pub async fn chat_stream(&self, messages: &[Message]) -> Result<DeltaStream, BackendError> {
        let response = self.open_stream(messages).await?;

        let framed = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("text/event-stream"))
            .unwrap_or(false);

        let (tx, rx) = mpsc::channel::<String>(256);
        let mut byte_stream = response.bytes_stream();

        tokio::spawn(async move {
            if framed {
                let mut parser = SseParser::new();
                while let Some(chunk_result) = byte_stream.next().await {
                    let chunk = match chunk_result {
                        Ok(c) => c,
                        Err(e) => {
                            tracing::warn!(error = %e, "Stream chunk error");
                            break;
                        }
                    };
                    for delta in parser.feed(&chunk) {
                        if tx.send(delta).await.is_err() {
                            return;
                        }
                    }
                }
                if let Some(delta) = parser.finish() {
                    let _ = tx.send(delta).await;
                }
            } else {
                while let Some(chunk_result) = byte_stream.next().await {
                    let chunk = match chunk_result {
                        Ok(c) => c,
                        Err(e) => {
                            tracing::warn!(error = %e, "Stream chunk error");
                            break;
                        }
                    };
                    let text = String::from_utf8_lossy(&chunk).into_owned();
                    if !text.is_empty() && tx.send(text).await.is_err() {
                        return;
                    }
                }
            }
        });

        Ok(DeltaStream::new(rx))
    }

    /// Model tier of the translation chain: ask for the bare translation.
    pub async fn translate(
        &self,
        phrase: &str,
        target: LanguageCode,
        budget: Duration,
    ) -> Result<String, BackendError> {
        let prompt = format!(
            "Translate the following text to {}. Reply with only the translation, nothing else.\n\n{}",
            target.display_name(),
            phrase
        );
        let messages = [Message::user(prompt)];
        let text = self.chat(&messages, budget).await?;
        Ok(text.trim().trim_matches('"').to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AssistantConfig;

    fn keyless_backend() -> RemoteBackend {
        let mut config = AssistantConfig::default().backend;
        config.api_key = None;
        RemoteBackend::new(&config).unwrap()
    }

    #[tokio::test]
    async fn missing_key_fails_fast() {
        let backend = keyless_backend();
        let result = backend.chat(&[Message::user("hi")], Duration::from_secs(1)).await;
        assert!(matches!(result, Err(BackendError::MissingKey)));
        assert!(!backend.has_key());
    }

    #[test]
    fn wire_messages_use_lowercase_roles() {
        let wire = RemoteBackend::wire_messages(&[
            Message::user("hello"),
            Message::assistant("hi there"),
        ]);
        assert_eq!(wire[0]["role"], "user");
        assert_eq!(wire[1]["role"], "assistant");
        assert_eq!(wire[1]["content"], "hi there");
    }
}
