use fs_err as fs;
use serde_json::to_string_pretty;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::pipeline::RunReport;
use crate::wire::GeneratedWebsite;

pub struct SavedPaths {
    pub dir: PathBuf,
    pub request: Option<PathBuf>,
    pub response: Option<PathBuf>,
    pub website: PathBuf,
}

fn tx_dir(root: &Path, tx: Uuid) -> PathBuf {
    root.join(".siteforge").join("tx").join(tx.to_string())
}

/// Persist the request/response artifacts and the final website under the
/// per-request tx directory.
pub fn save_run(
    root: &Path,
    tx: Uuid,
    report: &RunReport,
    site: &GeneratedWebsite,
    save_request: bool,
    save_response: bool,
) -> anyhow::Result<SavedPaths> {
    let dir = tx_dir(root, tx);
    fs::create_dir_all(&dir)?;

    let mut request_path = None;
    let mut response_path = None;

    if save_request {
        if let Some(req) = &report.request {
            let p = dir.join("generate.request.json");
            fs::write(&p, to_string_pretty(req)?)?;
            request_path = Some(p);
        }
    }

    if save_response {
        if let Some(reply) = &report.reply {
            let p = dir.join("generate.response.json");
            fs::write(&p, to_string_pretty(reply)?)?;
            response_path = Some(p);
        }
    }

    let website = dir.join("website.json");
    fs::write(&website, to_string_pretty(site)?)?;

    Ok(SavedPaths {
        dir,
        request: request_path,
        response: response_path,
        website,
    })
}

pub fn print_saved_paths(saved: &SavedPaths) {
    println!("debug[save]: artifacts directory: {}", saved.dir.display());
    if let Some(p) = &saved.request {
        println!("debug[save]: request saved at: {}", p.display());
    } else {
        println!("debug[save]: request not saved (flag off or never sent)");
    }
    if let Some(p) = &saved.response {
        println!("debug[save]: response saved at: {}", p.display());
    } else {
        println!("debug[save]: response not saved (flag off or never received)");
    }
    println!("debug[save]: website saved at: {}", saved.website.display());
    std::io::stdout().flush().ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::build_fallback;
    use crate::knowledge::KnowledgeBase;
    use crate::registry::SchemaRegistry;
    use crate::wire::{GenerationParams, GenerationRequest};

    #[test]
    fn saves_website_and_honors_flags() {
        let tmp = tempfile::tempdir().unwrap();
        let params = GenerationParams {
            website_name: "Acme".into(),
            industry: "technology".into(),
            description: String::new(),
            style: "modern".into(),
            target_audience: String::new(),
            goals: vec![],
            unique_selling_points: vec![],
            component_count: 10,
        };
        let site = build_fallback(&params, &SchemaRegistry::new(), &KnowledgeBase::new());
        let report = RunReport {
            backend: "template-fallback".into(),
            request: Some(GenerationRequest {
                prompt: "p".into(),
                temperature: 0.7,
                max_tokens: 64,
            }),
            reply: None,
            warnings: vec![],
            fallback_reason: None,
        };

        let saved = save_run(tmp.path(), Uuid::new_v4(), &report, &site, true, true).unwrap();
        assert!(saved.website.exists());
        assert!(saved.request.as_ref().unwrap().exists());
        assert!(saved.response.is_none(), "no reply was recorded");

        let saved = save_run(tmp.path(), Uuid::new_v4(), &report, &site, false, false).unwrap();
        assert!(saved.request.is_none());
        assert!(saved.website.exists());
    }
}
