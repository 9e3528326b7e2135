use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// ========================================
/// Pipeline wire types
/// ========================================

/// Business facts collected from the user; the input of one generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationParams {
    pub website_name: String,
    pub industry: String,
    pub description: String,
    pub style: String,
    pub target_audience: String,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub unique_selling_points: Vec<String>,
    /// Lower bound of the section count; the page may carry up to
    /// `component_count + 3` sections.
    #[serde(default = "default_component_count")]
    pub component_count: usize,
}

fn default_component_count() -> usize {
    10
}

/// One page block. `component` serializes as `type`; the renderer dispatches
/// on `{type, variant, props}` and that field name is part of its contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "type")]
    pub component: String,
    #[serde(default = "default_variant")]
    pub variant: String,
    #[serde(default)]
    pub props: Map<String, Value>,
}

fn default_variant() -> String {
    "default".into()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteMetadata {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub industry: String,
    pub style: String,
    /// Always equals `sections.len()` on a finalized website.
    #[serde(rename = "componentsUsed")]
    pub components_used: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub text: String,
}

/// The output artifact. Constructed fresh per request and never mutated after
/// being handed to the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedWebsite {
    pub success: bool,
    pub sections: Vec<Section>,
    pub metadata: SiteMetadata,
    pub colors: Palette,
    #[serde(rename = "generatedAt")]
    pub generated_at: DateTime<Utc>,
    /// Backend id ("gemini", "ollama", "wizardlm") or "template-fallback".
    #[serde(rename = "generatedBy")]
    pub generated_by: String,
    /// Human-readable message, set only on the explicit error object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// ========================================
/// Backend request/response
/// ========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt: u32,
    pub completion: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReply {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_usage: Option<TokenUsage>,
}

/// A scored knowledge snippet handed to the prompt builder. Ephemeral:
/// produced per request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub title: String,
    pub content: String,
    pub industry: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}
