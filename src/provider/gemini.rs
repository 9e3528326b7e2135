use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use super::{Provider, Result};
use crate::config::Config;
use crate::errors::GenerateError;
use crate::wire::{GenerationReply, GenerationRequest, TokenUsage};

/// Google Gemini over the generateContent REST API.
pub struct Gemini {
    model: String,
    api_base: String,
    api_key: String,
    timeout: Duration,
    probe_timeout: Duration,
    client: Client,
}

impl Gemini {
    /// The API key is read at construction so a missing key fails fast,
    /// before any request is committed to this backend.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GenerateError::Config("GEMINI_API_KEY env var is not set".into()))?;
        Ok(Self {
            model: cfg.gemini_model.clone(),
            api_base: cfg.gemini_base.trim_end_matches('/').to_string(),
            api_key,
            timeout: Duration::from_secs(cfg.timeout_secs),
            probe_timeout: Duration::from_secs(cfg.probe_timeout_secs),
            client: Client::new(),
        })
    }

    fn request_body(req: &GenerationRequest) -> Value {
        json!({
            "contents": [
                { "parts": [ { "text": req.prompt } ] }
            ],
            "generationConfig": {
                "temperature": req.temperature,
                "maxOutputTokens": req.max_tokens
            }
        })
    }
}

#[async_trait]
impl Provider for Gemini {
    fn id(&self) -> &'static str {
        "gemini"
    }

    async fn probe(&self) -> bool {
        let url = format!("{}/v1beta/models?key={}", self.api_base, self.api_key);
        let send = self.client.get(&url).send();
        matches!(
            tokio::time::timeout(self.probe_timeout, send).await,
            Ok(Ok(resp)) if resp.status().is_success()
        )
    }

    async fn generate(&self, req: &GenerationRequest, debug: bool) -> Result<GenerationReply> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.api_base, self.model, self.api_key
        );
        let body = Self::request_body(req);

        if debug {
            // Never echo the full URL: it carries the key.
            eprintln!("debug[gemini]: POST /v1beta/models/{}:generateContent", self.model);
        }

        let resp = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerateError::Transport(format!("gemini request failed: {e}")))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| GenerateError::Transport(format!("gemini read body failed: {e}")))?;

        if debug {
            eprintln!("debug[gemini]: raw status: {status}");
            eprintln!("debug[gemini]: raw response:\n{text}");
        }

        if !status.is_success() {
            return Err(GenerateError::Transport(format!(
                "gemini API error ({status}): {text}"
            )));
        }

        // Minimal structs to parse the HTTP envelope
        #[derive(Deserialize)]
        struct Reply {
            #[serde(default)]
            candidates: Vec<Candidate>,
            #[serde(rename = "usageMetadata")]
            usage: Option<Usage>,
        }
        #[derive(Deserialize)]
        struct Candidate {
            content: Content,
        }
        #[derive(Deserialize)]
        struct Content {
            #[serde(default)]
            parts: Vec<Part>,
        }
        #[derive(Deserialize)]
        struct Part {
            #[serde(default)]
            text: String,
        }
        #[derive(Deserialize)]
        struct Usage {
            #[serde(rename = "promptTokenCount", default)]
            prompt: u32,
            #[serde(rename = "candidatesTokenCount", default)]
            completion: u32,
            #[serde(rename = "totalTokenCount", default)]
            total: u32,
        }

        let parsed: Reply = serde_json::from_str(&text)
            .map_err(|e| GenerateError::Transport(format!("failed to parse gemini envelope: {e}")))?;

        let content: String = parsed
            .candidates
            .first()
            .map(|c| c.content.parts.iter().map(|p| p.text.as_str()).collect())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(GenerateError::Transport("gemini: empty candidates".into()));
        }

        Ok(GenerationReply {
            text: content,
            token_usage: parsed.usage.map(|u| TokenUsage {
                prompt: u.prompt,
                completion: u.completion,
                total: u.total,
            }),
        })
    }
}
