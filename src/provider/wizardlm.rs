use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use super::{Provider, Result};
use crate::config::Config;
use crate::errors::GenerateError;
use crate::wire::{GenerationReply, GenerationRequest, TokenUsage};

/// Self-hosted WizardLM behind an OpenAI-compatible completions endpoint.
pub struct WizardLm {
    model: String,
    url: String,
    timeout: Duration,
    probe_timeout: Duration,
}

impl WizardLm {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            model: cfg.wizardlm_model.clone(),
            url: cfg.wizardlm_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(cfg.timeout_secs),
            probe_timeout: Duration::from_secs(cfg.probe_timeout_secs),
        }
    }
}

#[async_trait]
impl Provider for WizardLm {
    fn id(&self) -> &'static str {
        "wizardlm"
    }

    async fn probe(&self) -> bool {
        let url = format!("{}/v1/models", self.url);
        let send = Client::new().get(&url).send();
        matches!(
            tokio::time::timeout(self.probe_timeout, send).await,
            Ok(Ok(resp)) if resp.status().is_success()
        )
    }

    async fn generate(&self, req: &GenerationRequest, debug: bool) -> Result<GenerationReply> {
        let url = format!("{}/v1/completions", self.url);
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| GenerateError::Transport(format!("wizardlm client build failed: {e}")))?;
        let body = json!({
            "model": self.model,
            "prompt": req.prompt,
            "temperature": req.temperature,
            "max_tokens": req.max_tokens
        });

        if debug {
            eprintln!("debug[wizardlm]: POST {url}");
        }

        let resp = client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerateError::Transport(format!("wizardlm request failed: {e}")))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| GenerateError::Transport(format!("wizardlm read body failed: {e}")))?;

        if debug {
            eprintln!("debug[wizardlm]: raw body:\n{text}");
        }

        if !status.is_success() {
            return Err(GenerateError::Transport(format!(
                "wizardlm API error ({status}): {text}"
            )));
        }

        #[derive(Deserialize)]
        struct Completion {
            #[serde(default)]
            choices: Vec<Choice>,
            usage: Option<Usage>,
        }
        #[derive(Deserialize)]
        struct Choice {
            #[serde(default)]
            text: String,
        }
        #[derive(Deserialize)]
        struct Usage {
            #[serde(default)]
            prompt_tokens: u32,
            #[serde(default)]
            completion_tokens: u32,
            #[serde(default)]
            total_tokens: u32,
        }

        let parsed: Completion = serde_json::from_str(&text).map_err(|e| {
            GenerateError::Transport(format!("failed to parse wizardlm envelope: {e}"))
        })?;

        let content = parsed
            .choices
            .first()
            .map(|c| c.text.clone())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(GenerateError::Transport("wizardlm: empty choices".into()));
        }

        Ok(GenerationReply {
            text: content,
            token_usage: parsed.usage.map(|u| TokenUsage {
                prompt: u.prompt_tokens,
                completion: u.completion_tokens,
                total: u.total_tokens,
            }),
        })
    }
}
