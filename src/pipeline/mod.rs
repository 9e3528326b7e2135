use chrono::Utc;

use crate::fallback::{build_fallback, FALLBACK_BACKEND};
use crate::knowledge::KnowledgeBase;
use crate::prompt;
use crate::provider::DynProvider;
use crate::registry::SchemaRegistry;
use crate::repair;
use crate::retrieval::DocumentCorpus;
use crate::wire::{
    GeneratedWebsite, GenerationParams, GenerationReply, GenerationRequest, SiteMetadata,
};

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub temperature: f32,
    pub max_tokens: u32,
    pub doc_limit: usize,
    pub debug: bool,
}

/// What happened during one request, for dashboards and artifact logging.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub backend: String,
    pub request: Option<GenerationRequest>,
    pub reply: Option<GenerationReply>,
    pub warnings: Vec<String>,
    pub fallback_reason: Option<String>,
}

impl RunReport {
    fn new() -> Self {
        Self {
            backend: FALLBACK_BACKEND.to_string(),
            request: None,
            reply: None,
            warnings: Vec::new(),
            fallback_reason: None,
        }
    }
}

/// The consolidated generation pipeline: retrieval, prompt, one backend
/// attempt, repair, deterministic fallback. Holds only the read-only static
/// tables; each call is an independent request with no shared mutable state.
pub struct Generator {
    registry: SchemaRegistry,
    kb: KnowledgeBase,
    corpus: DocumentCorpus,
}

impl Generator {
    pub fn new(registry: SchemaRegistry, kb: KnowledgeBase, corpus: DocumentCorpus) -> Self {
        Self { registry, kb, corpus }
    }

    /// Always returns a renderable website. The backend is attempted at most
    /// once; transport errors and hard parse failures route to the fallback
    /// rather than retrying another backend mid-request.
    pub async fn generate(
        &self,
        params: &GenerationParams,
        provider: Option<&DynProvider>,
        opts: &RunOptions,
    ) -> (GeneratedWebsite, RunReport) {
        let mut report = RunReport::new();

        let docs = self
            .corpus
            .retrieve(&self.kb, &params.industry, &params.description, opts.doc_limit);

        let Some(provider) = provider else {
            report.fallback_reason = Some("no generation backend available".into());
            return (build_fallback(params, &self.registry, &self.kb), report);
        };

        let request = GenerationRequest {
            prompt: prompt::build_prompt(params, &docs, self.registry.all()),
            temperature: opts.temperature,
            max_tokens: opts.max_tokens,
        };
        report.request = Some(request.clone());

        let reply = match provider.generate(&request, opts.debug).await {
            Ok(r) => r,
            Err(e) => {
                report.fallback_reason = Some(e.to_string());
                return (build_fallback(params, &self.registry, &self.kb), report);
            }
        };
        report.reply = Some(reply.clone());

        match repair::parse_and_repair(&reply.text, params, &self.registry, &self.kb) {
            Ok((mut site, warnings)) => {
                site.generated_by = provider.id().to_string();
                report.backend = provider.id().to_string();
                report.warnings = warnings;
                (site, report)
            }
            Err(e) => {
                report.fallback_reason = Some(e.to_string());
                (build_fallback(params, &self.registry, &self.kb), report)
            }
        }
    }
}

/// The explicit user-facing error object: a human-readable message plus a
/// best-effort palette, never a blank page. Used when configuration errors
/// abort a request before the pipeline can run.
pub fn error_site(params: &GenerationParams, kb: &KnowledgeBase, message: &str) -> GeneratedWebsite {
    GeneratedWebsite {
        success: false,
        sections: Vec::new(),
        metadata: SiteMetadata {
            title: params.website_name.clone(),
            description: message.to_string(),
            keywords: Vec::new(),
            industry: kb.get(&params.industry).key.to_string(),
            style: params.style.clone(),
            components_used: 0,
        },
        colors: kb.palette(&params.industry, &params.style),
        generated_at: Utc::now(),
        generated_by: "error".to_string(),
        message: Some(message.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GenerateError;
    use crate::provider::Provider;
    use async_trait::async_trait;
    use serde_json::json;

    struct FixedProvider {
        text: String,
    }

    #[async_trait]
    impl Provider for FixedProvider {
        fn id(&self) -> &'static str {
            "mock"
        }
        async fn probe(&self) -> bool {
            true
        }
        async fn generate(
            &self,
            _req: &GenerationRequest,
            _debug: bool,
        ) -> Result<GenerationReply, GenerateError> {
            Ok(GenerationReply {
                text: self.text.clone(),
                token_usage: None,
            })
        }
    }

    struct DeadProvider;

    #[async_trait]
    impl Provider for DeadProvider {
        fn id(&self) -> &'static str {
            "dead"
        }
        async fn probe(&self) -> bool {
            false
        }
        async fn generate(
            &self,
            _req: &GenerationRequest,
            _debug: bool,
        ) -> Result<GenerationReply, GenerateError> {
            Err(GenerateError::Transport("connection refused".into()))
        }
    }

    fn generator() -> Generator {
        Generator::new(
            SchemaRegistry::new(),
            KnowledgeBase::new(),
            DocumentCorpus::new(),
        )
    }

    fn params() -> GenerationParams {
        GenerationParams {
            website_name: "Luigi's".into(),
            industry: "restaurant".into(),
            description: "A cozy Italian bistro".into(),
            style: "modern".into(),
            target_audience: "families".into(),
            goals: vec![],
            unique_selling_points: vec![],
            component_count: 10,
        }
    }

    fn opts() -> RunOptions {
        RunOptions {
            temperature: 0.7,
            max_tokens: 4096,
            doc_limit: 3,
            debug: false,
        }
    }

    #[tokio::test]
    async fn no_backend_means_deterministic_fallback() {
        let (site, report) = generator().generate(&params(), None, &opts()).await;
        assert!(site.success);
        assert_eq!(site.generated_by, FALLBACK_BACKEND);
        assert!(report.fallback_reason.is_some());
        assert!(report.request.is_none(), "no prompt was sent anywhere");
    }

    #[tokio::test]
    async fn transport_error_routes_to_fallback() {
        let provider: DynProvider = Box::new(DeadProvider);
        let (site, report) = generator().generate(&params(), Some(&provider), &opts()).await;
        assert_eq!(site.generated_by, FALLBACK_BACKEND);
        assert!(report.fallback_reason.as_deref().unwrap().contains("transport"));
        assert!(report.request.is_some(), "the attempt was made and recorded");
    }

    #[tokio::test]
    async fn unparseable_reply_routes_to_fallback() {
        let provider: DynProvider = Box::new(FixedProvider {
            text: "I am sorry, I cannot do that.".into(),
        });
        let (site, report) = generator().generate(&params(), Some(&provider), &opts()).await;
        assert_eq!(site.generated_by, FALLBACK_BACKEND);
        assert!(report
            .fallback_reason
            .as_deref()
            .unwrap()
            .contains("malformed"));
    }

    #[tokio::test]
    async fn valid_reply_is_repaired_and_attributed() {
        let text = serde_json::to_string(&json!({
            "components": [
                {"type": "ClassicHeader", "props": {"logo": "Luigi's"}},
                {"type": "HeroBanner", "props": {"title": "Benvenuti"}},
                {"type": "SimpleFooter", "props": {}}
            ]
        }))
        .unwrap();
        let provider: DynProvider = Box::new(FixedProvider { text });
        let (site, report) = generator().generate(&params(), Some(&provider), &opts()).await;
        assert!(site.success);
        assert_eq!(site.generated_by, "mock");
        assert_eq!(report.backend, "mock");
        assert!(site.sections.len() >= 10, "backfilled to the minimum");
        assert_eq!(site.metadata.components_used, site.sections.len());
        assert_eq!(site.sections[0].component, "ClassicHeader");
    }

    #[test]
    fn error_site_carries_message_and_palette() {
        let kb = KnowledgeBase::new();
        let site = error_site(&params(), &kb, "GEMINI_API_KEY env var is not set");
        assert!(!site.success);
        assert_eq!(site.message.as_deref(), Some("GEMINI_API_KEY env var is not set"));
        assert_eq!(site.colors, kb.palette("restaurant", "modern"));
        assert_eq!(site.metadata.components_used, 0);
    }
}
