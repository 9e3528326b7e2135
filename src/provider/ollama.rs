use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{Provider, Result};
use crate::config::Config;
use crate::errors::GenerateError;
use crate::wire::{GenerationReply, GenerationRequest, TokenUsage};

/// Local Ollama server over /api/generate.
pub struct Ollama {
    model: String,
    url: String,
    timeout: Duration,
    probe_timeout: Duration,
}

#[derive(Serialize)]
struct GenRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenOptions,
}

#[derive(Serialize)]
struct GenOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct GenResponse {
    response: String,
    #[serde(default)]
    prompt_eval_count: u32,
    #[serde(default)]
    eval_count: u32,
}

impl Ollama {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            model: cfg.ollama_model.clone(),
            url: cfg.ollama_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(cfg.timeout_secs),
            probe_timeout: Duration::from_secs(cfg.probe_timeout_secs),
        }
    }
}

#[async_trait]
impl Provider for Ollama {
    fn id(&self) -> &'static str {
        "ollama"
    }

    async fn probe(&self) -> bool {
        let url = format!("{}/api/tags", self.url);
        let send = Client::new().get(&url).send();
        matches!(
            tokio::time::timeout(self.probe_timeout, send).await,
            Ok(Ok(resp)) if resp.status().is_success()
        )
    }

    async fn generate(&self, req: &GenerationRequest, debug: bool) -> Result<GenerationReply> {
        let url = format!("{}/api/generate", self.url);
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| GenerateError::Transport(format!("ollama client build failed: {e}")))?;
        let body = GenRequest {
            model: &self.model,
            prompt: &req.prompt,
            stream: false,
            options: GenOptions {
                temperature: req.temperature,
                num_predict: req.max_tokens,
            },
        };

        if debug {
            eprintln!("debug[ollama]: POST {url}");
        }

        let resp = client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerateError::Transport(format!("ollama request failed: {e}")))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| GenerateError::Transport(format!("ollama read body failed: {e}")))?;

        if debug {
            eprintln!("debug[ollama]: raw body:\n{text}");
        }

        if !status.is_success() {
            return Err(GenerateError::Transport(format!(
                "ollama API error ({status}): {text}"
            )));
        }

        let parsed: GenResponse = serde_json::from_str(&text)
            .map_err(|e| GenerateError::Transport(format!("failed to parse ollama envelope: {e}")))?;

        Ok(GenerationReply {
            text: parsed.response,
            token_usage: Some(TokenUsage {
                prompt: parsed.prompt_eval_count,
                completion: parsed.eval_count,
                total: parsed.prompt_eval_count + parsed.eval_count,
            }),
        })
    }
}
