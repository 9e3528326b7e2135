use clap::Parser;
use fs_err as fs;
use std::path::Path;
use uuid::Uuid;

mod cli;
mod config;
mod errors;
mod fallback;
mod knowledge;
mod log;
mod pipeline;
mod prompt;
mod provider;
mod registry;
mod repair;
mod retrieval;
mod ux;
mod wire;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    let mut cfg = config::Config::load(args.config.as_deref())?;
    cfg.root = args.root.clone();
    cfg.save_request = args.save_request;
    cfg.save_response = args.save_response;
    if let Some(secs) = args.timeout_secs {
        cfg.timeout_secs = secs;
    }
    if let Some(count) = args.components {
        cfg.component_count = count;
    }
    if let Some(url) = &args.ollama_url {
        cfg.ollama_url = url.clone();
    }
    if let Some(url) = &args.wizardlm_url {
        cfg.wizardlm_url = url.clone();
    }

    let provider_kind = if args.dry_run {
        cli::ProviderKind::None
    } else {
        args.provider.clone().unwrap_or_else(|| cfg.provider.clone())
    };

    if let Some(model) = &args.model {
        match &provider_kind {
            cli::ProviderKind::Gemini => cfg.gemini_model = model.clone(),
            cli::ProviderKind::Ollama => cfg.ollama_model = model.clone(),
            cli::ProviderKind::WizardLm => cfg.wizardlm_model = model.clone(),
            // With auto-selection the override applies to whichever wins.
            cli::ProviderKind::Auto => {
                cfg.gemini_model = model.clone();
                cfg.ollama_model = model.clone();
                cfg.wizardlm_model = model.clone();
            }
            cli::ProviderKind::None => {}
        }
    }

    let txid = Uuid::new_v4();
    if args.debug {
        println!("debug: transaction {txid}");
    }

    let kb = knowledge::KnowledgeBase::new();
    let registry = registry::SchemaRegistry::new();
    let corpus = retrieval::DocumentCorpus::new();
    if args.debug {
        println!(
            "debug: {} industry profiles, {} component schemas ({} applicable to {})",
            kb.profiles().len(),
            registry.all().len(),
            registry.for_industry(&args.industry).len(),
            args.industry
        );
    }

    let params = wire::GenerationParams {
        website_name: args.name.clone(),
        industry: args.industry.clone(),
        description: args.description.clone(),
        style: args.style.clone(),
        target_audience: args.audience.clone(),
        goals: args.goal.clone(),
        unique_selling_points: args.usp.clone(),
        component_count: cfg.component_count,
    };

    // Configuration errors (missing API key for an explicitly requested
    // backend) fail fast with the explicit error object; availability
    // problems fall through as None and take the template fallback.
    let provider = match provider::select_provider(&provider_kind, &cfg, args.debug).await {
        Ok(p) => p,
        Err(e) => {
            let site = pipeline::error_site(&params, &kb, &e.to_string());
            eprintln!("{e}");
            println!("{}", serde_json::to_string_pretty(&site)?);
            std::process::exit(1);
        }
    };

    let generator = pipeline::Generator::new(registry, kb, corpus);
    let opts = pipeline::RunOptions {
        temperature: cfg.temperature,
        max_tokens: cfg.max_tokens,
        doc_limit: cfg.doc_limit,
        debug: args.debug,
    };

    let pb = provider
        .as_ref()
        .map(|p| ux::spinner(&format!("generating with {}", p.id())));
    let (site, report) = generator.generate(&params, provider.as_ref(), &opts).await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    ux::show_website(&site, &report);

    let saved = log::save_run(
        Path::new(&cfg.root),
        txid,
        &report,
        &site,
        cfg.save_request,
        cfg.save_response,
    )?;
    if args.debug {
        log::print_saved_paths(&saved);
    }

    if let Some(out) = &args.out {
        write_atomic(Path::new(out), &serde_json::to_string_pretty(&site)?)?;
        println!("website written to {out}");
    }

    Ok(())
}

/// Write-then-rename so a crash never leaves a half-written website file.
fn write_atomic(path: &Path, contents: &str) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => {
            fs::create_dir_all(p)?;
            p
        }
        _ => Path::new("."),
    };
    let tmp = tempfile::NamedTempFile::new_in(dir)?;
    fs::write(tmp.path(), contents)?;
    tmp.persist(path)?;
    Ok(())
}
