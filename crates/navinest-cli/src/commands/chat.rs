//! Chat command handler
//!
//! Thin proxy to an OpenAI-style chat-completion endpoint. The response is
//! requested as a stream and consumed line-buffered: each `data: ` line
//! carries one JSON chunk whose delta content is printed as it arrives.
//!
//! Endpoint and model come from the app config when set, falling back to
//! the document's `aiConfig` map. The API key comes from its own storage
//! entry.

use anyhow::{bail, Context, Result};
use futures_util::StreamExt;
use serde_json::json;
use std::io::Write;

use navinest_core::DashboardStore;

const DEFAULT_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Send one prompt and stream the reply to stdout
pub async fn send(store: &DashboardStore, prompt: String) -> Result<()> {
    let Some(api_key) = store.load_api_key()? else {
        bail!("No API key stored. Set one with: navinest key set <key>");
    };

    let config = store.config();
    let ai_config = &store.dashboard().ai_config;

    let url = config
        .chat_url
        .clone()
        .or_else(|| ai_config.get("apiUrl").and_then(|v| v.as_str()).map(String::from))
        .unwrap_or_else(|| DEFAULT_CHAT_URL.to_string());
    let model = config
        .chat_model
        .clone()
        .or_else(|| ai_config.get("model").and_then(|v| v.as_str()).map(String::from))
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let client = reqwest::Client::new();
    let response = client
        .post(&url)
        .bearer_auth(&api_key)
        .json(&json!({
            "model": model,
            "messages": [{"role": "user", "content": prompt}],
            "stream": true
        }))
        .send()
        .await
        .with_context(|| format!("Chat request to {} failed", url))?;

    if !response.status().is_success() {
        bail!("API error: {}", response.status());
    }

    let mut stream = response.bytes_stream();
    let mut buffer = String::new();
    let mut stdout = std::io::stdout();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.context("Error while reading chat stream")?;
        buffer.push_str(&String::from_utf8_lossy(&chunk));

        // Consume complete lines, keep the partial tail buffered
        while let Some(newline) = buffer.find('\n') {
            let line: String = buffer.drain(..=newline).collect();
            let line = line.trim();

            let Some(data) = line.strip_prefix("data: ") else {
                continue;
            };
            if data == "[DONE]" {
                println!();
                return Ok(());
            }

            // Malformed chunks are skipped, not fatal
            if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(data) {
                if let Some(content) = parsed["choices"][0]["delta"]["content"].as_str() {
                    print!("{}", content);
                    stdout.flush()?;
                }
            }
        }
    }

    println!();
    if !buffer.trim().is_empty() {
        tracing::debug!("Unterminated trailing data in chat stream");
    }
    Ok(())
}
