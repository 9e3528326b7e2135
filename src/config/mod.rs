use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::cli::ProviderKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub root: String,
    pub provider: ProviderKind,
    pub gemini_model: String,
    pub gemini_base: String,
    pub ollama_model: String,
    pub ollama_url: String,
    pub wizardlm_model: String,
    pub wizardlm_url: String,
    pub timeout_secs: u64,
    pub probe_timeout_secs: u64,
    pub component_count: usize,
    pub doc_limit: usize,
    pub temperature: f32,
    pub max_tokens: u32,
    pub save_request: bool,
    pub save_response: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: ".".into(),
            provider: ProviderKind::Auto,
            gemini_model: "gemini-1.5-flash".into(),
            gemini_base: "https://generativelanguage.googleapis.com".into(),
            ollama_model: "llama3".into(),
            ollama_url: "http://localhost:11434".into(),
            wizardlm_model: "wizardlm-13b".into(),
            wizardlm_url: "http://localhost:8000".into(),
            timeout_secs: 120,
            probe_timeout_secs: 3,
            component_count: 10,
            doc_limit: 3,
            temperature: 0.7,
            max_tokens: 8192,
            save_request: true,
            save_response: true,
        }
    }
}

impl Config {
    /// Defaults, optionally overlaid by a TOML file. Missing keys in the file
    /// keep their default values.
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        match path {
            None => Ok(Self::default()),
            Some(p) => {
                let s = fs_err::read_to_string(p).with_context(|| format!("reading config {p}"))?;
                let cfg = toml::from_str(&s).with_context(|| format!("parsing config {p}"))?;
                Ok(cfg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg: Config = toml::from_str("ollama_model = \"mistral\"\ncomponent_count = 12\n").unwrap();
        assert_eq!(cfg.ollama_model, "mistral");
        assert_eq!(cfg.component_count, 12);
        assert_eq!(cfg.probe_timeout_secs, 3);
        assert_eq!(cfg.provider, ProviderKind::Auto);
    }
}
