use async_trait::async_trait;

use crate::cli::ProviderKind;
use crate::config::Config;
use crate::errors::GenerateError;
use crate::wire::{GenerationReply, GenerationRequest};

pub mod gemini;
pub mod ollama;
pub mod wizardlm;

pub type Result<T> = std::result::Result<T, GenerateError>;

/// A generation backend: prompt in, raw text out. No further contract; the
/// repair pipeline owns everything that happens to the returned text.
#[async_trait]
pub trait Provider: Send + Sync {
    fn id(&self) -> &'static str;

    /// Cheap availability check, bounded by the configured probe timeout.
    /// Run before committing to a backend; a failed probe routes the request
    /// to the deterministic fallback instead of erroring.
    async fn probe(&self) -> bool;

    async fn generate(&self, req: &GenerationRequest, debug: bool) -> Result<GenerationReply>;
}

pub type DynProvider = Box<dyn Provider + Send + Sync>;

/// Resolve the configured kind to a ready backend.
///
/// Explicit kinds are constructed and probed; an unavailable backend yields
/// `None` (fallback path), while missing configuration (no API key) is a
/// hard `Config` error, reported immediately rather than masked by fallback.
/// `Auto` probes every constructible backend concurrently and takes the
/// first available in priority order (gemini, ollama, wizardlm).
pub async fn select_provider(
    kind: &ProviderKind,
    cfg: &Config,
    debug: bool,
) -> Result<Option<DynProvider>> {
    let provider: DynProvider = match kind {
        ProviderKind::None => return Ok(None),
        ProviderKind::Gemini => Box::new(gemini::Gemini::from_config(cfg)?),
        ProviderKind::Ollama => Box::new(ollama::Ollama::from_config(cfg)),
        ProviderKind::WizardLm => Box::new(wizardlm::WizardLm::from_config(cfg)),
        ProviderKind::Auto => {
            let mut candidates: Vec<DynProvider> = Vec::new();
            match gemini::Gemini::from_config(cfg) {
                Ok(p) => candidates.push(Box::new(p)),
                Err(e) => {
                    if debug {
                        eprintln!("debug[provider]: skipping gemini: {e}");
                    }
                }
            }
            candidates.push(Box::new(ollama::Ollama::from_config(cfg)));
            candidates.push(Box::new(wizardlm::WizardLm::from_config(cfg)));

            let probes = futures::future::join_all(candidates.iter().map(|p| p.probe())).await;
            for (candidate, available) in candidates.into_iter().zip(probes) {
                if available {
                    if debug {
                        eprintln!("debug[provider]: auto-selected {}", candidate.id());
                    }
                    return Ok(Some(candidate));
                }
            }
            return Ok(None);
        }
    };

    if provider.probe().await {
        Ok(Some(provider))
    } else {
        if debug {
            eprintln!("debug[provider]: {} did not answer the probe", provider.id());
        }
        Ok(None)
    }
}
