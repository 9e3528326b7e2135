use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(ValueEnum, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini,
    Ollama,
    #[value(alias = "wizardlm")]
    WizardLm,
    /// Probe every configured backend and take the first available.
    Auto,
    /// Skip generation entirely; always use the deterministic templates.
    None,
}

#[derive(Parser, Debug)]
#[command(name = "siteforge", version, about = "AI-assisted website generator: describe a business, get a structured page")]
pub struct Args {
    #[arg(long, default_value = ".")]
    pub root: String,

    /// Business / website name.
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "technology")]
    pub industry: String,

    /// Free-text description of the business.
    #[arg(long, default_value = "")]
    pub description: String,

    /// Visual style: modern, classic, bold, minimal.
    #[arg(long, default_value = "modern")]
    pub style: String,

    #[arg(long, default_value = "")]
    pub audience: String,

    /// May be repeated.
    #[arg(long)]
    pub goal: Vec<String>,

    /// Unique selling point; may be repeated.
    #[arg(long)]
    pub usp: Vec<String>,

    /// Overrides the configured backend when given.
    #[arg(long, value_enum)]
    pub provider: Option<ProviderKind>,

    /// Override the configured model for the chosen backend.
    #[arg(long)]
    pub model: Option<String>,

    /// Minimum section count; the page carries at most this plus three.
    #[arg(long)]
    pub components: Option<usize>,

    /// Write the final website JSON here (defaults to the tx directory only).
    #[arg(long)]
    pub out: Option<String>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    #[arg(long)]
    pub ollama_url: Option<String>,

    #[arg(long)]
    pub wizardlm_url: Option<String>,

    /// Skip all network calls and build the deterministic fallback page.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    #[arg(long, default_value_t = true)]
    pub save_request: bool,

    #[arg(long, default_value_t = true)]
    pub save_response: bool,

    #[arg(long, default_value_t = false)]
    pub debug: bool,

    #[arg(long)]
    pub config: Option<String>,
}
