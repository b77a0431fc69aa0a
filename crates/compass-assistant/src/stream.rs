//! Streaming transport, client side: an incremental parser for the
//! chat-completion event stream and the delta sequence handed to consumers.
//!
//! The parser owns a byte buffer that grows across chunk deliveries. Network
//! buffering can split an event line anywhere, including inside a multi-byte
//! UTF-8 sequence, so decoding happens per complete line, never per chunk.

use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

/// Incremental parser for `data: `-framed event-stream bodies.
///
/// Feed raw chunks as they arrive; each call yields the text deltas completed
/// by that chunk. Call [`SseParser::finish`] once the stream ends to parse a
/// leftover un-terminated final line.
#[derive(Default)]
pub struct SseParser {
    buffer: Vec<u8>,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut deltas = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            let line = String::from_utf8_lossy(&line);
            if let Some(delta) = parse_event_line(line.trim()) {
                deltas.push(delta);
            }
        }
        deltas
    }

    /// The stream is over; the remaining buffer may be a complete line that
    /// never got its newline.
    pub fn finish(self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let line = String::from_utf8_lossy(&self.buffer);
        parse_event_line(line.trim())
    }
}

/// Extract the text delta from one event line. `[DONE]` and unparseable
/// payloads are "no delta", not errors; the stream carries on.
fn parse_event_line(line: &str) -> Option<String> {
    let data = line.strip_prefix("data: ").or_else(|| line.strip_prefix("data:"))?;
    let data = data.trim();
    if data == "[DONE]" {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(data) {
        Ok(parsed) => parsed["choices"][0]["delta"]["content"]
            .as_str()
            .filter(|content| !content.is_empty())
            .map(|content| content.to_string()),
        Err(_) => None,
    }
}

/// Lazy, finite, non-restartable sequence of streamed text fragments.
/// Consumers either poll [`DeltaStream::next`] or treat it as a `Stream`;
/// either way fragments arrive in send order and the sequence ends when the
/// producing task closes its channel.
pub struct DeltaStream {
    receiver: mpsc::Receiver<String>,
}

impl DeltaStream {
    pub fn new(receiver: mpsc::Receiver<String>) -> Self {
        Self { receiver }
    }

    pub async fn next(&mut self) -> Option<String> {
        self.receiver.recv().await
    }

    /// Accumulate every remaining fragment into one message.
    pub async fn collect_text(mut self) -> String {
        let mut text = String::new();
        while let Some(delta) = self.next().await {
            text.push_str(&delta);
        }
        text
    }
}

impl Stream for DeltaStream {
    type Item = String;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_STREAM: &str = concat!(
        "data: {\"choices\":[{\"delta\":{\"content\":\"Hello \"}}]}\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"from \"}}]}\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"local API \u{1F44B}\"}}]}\n",
        "data: [DONE]\n",
    );

    fn reassemble(chunk_size: usize) -> String {
        let bytes = EXAMPLE_STREAM.as_bytes();
        let mut parser = SseParser::new();
        let mut text = String::new();
        for chunk in bytes.chunks(chunk_size) {
            for delta in parser.feed(chunk) {
                text.push_str(&delta);
            }
        }
        if let Some(delta) = parser.finish() {
            text.push_str(&delta);
        }
        text
    }

    #[test]
    fn reconstructs_text_at_any_chunk_boundary() {
        // Sizes below the emoji's four bytes force splits inside it.
        for chunk_size in [1, 2, 3, 7, 16, 64, EXAMPLE_STREAM.len()] {
            assert_eq!(
                reassemble(chunk_size),
                "Hello from local API \u{1F44B}",
                "chunk size {}",
                chunk_size
            );
        }
    }

    #[test]
    fn done_and_garbage_lines_yield_no_delta() {
        let mut parser = SseParser::new();
        assert!(parser.feed(b"data: [DONE]\n").is_empty());
        assert!(parser.feed(b"data: {not json}\n").is_empty());
        assert!(parser.feed(b": keep-alive comment\n").is_empty());
        assert!(parser.feed(b"event: ping\n").is_empty());
    }

    #[test]
    fn unterminated_final_line_parses_on_finish() {
        let mut parser = SseParser::new();
        assert!(parser
            .feed(b"data: {\"choices\":[{\"delta\":{\"content\":\"tail\"}}]}")
            .is_empty());
        assert_eq!(parser.finish().as_deref(), Some("tail"));
    }

    #[tokio::test]
    async fn delta_stream_collects_in_order() {
        let (tx, rx) = mpsc::channel(8);
        let stream = DeltaStream::new(rx);
        tx.send("a".to_string()).await.unwrap();
        tx.send("b".to_string()).await.unwrap();
        drop(tx);
        assert_eq!(stream.collect_text().await, "ab");
    }
}
