use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::pipeline::RunReport;
use crate::wire::GeneratedWebsite;

pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

pub fn show_website(site: &GeneratedWebsite, report: &RunReport) {
    println!("\n=== WEBSITE ===");
    println!("{}", site.metadata.title.bold());
    if site.sections.is_empty() {
        println!("(no sections)");
    }
    for (i, s) in site.sections.iter().enumerate() {
        let t = s.component.to_lowercase();
        let tag = if t.contains("header") {
            "[HEADER]".green().bold()
        } else if t.contains("hero") {
            "[HERO]".cyan().bold()
        } else if t.contains("footer") {
            "[FOOTER]".magenta().bold()
        } else {
            "[SECTION]".yellow().bold()
        };
        let title = s
            .props
            .get("title")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        println!("{}. {}  {}", i + 1, tag, format!("{} — {}", s.component, title));
    }

    println!(
        "\n{}",
        "┏━━━━━━━━━━━━━━━━━━━━━━━━ Summary ━━━━━━━━━━━━━━━━━━━━━━━━┓".bold()
    );
    println!(
        "  {}: {}   {}: {}   {}: {}",
        "Sections".bold(),
        site.metadata.components_used,
        "Backend".bold(),
        site.generated_by,
        "Industry".bold(),
        site.metadata.industry
    );
    println!(
        "  {}: {} / {} / {}",
        "Palette".bold(),
        site.colors.primary,
        site.colors.secondary,
        site.colors.accent
    );
    if let Some(usage) = report.reply.as_ref().and_then(|r| r.token_usage.as_ref()) {
        println!(
            "  {}: {} prompt + {} completion = {}",
            "Tokens".bold(),
            usage.prompt,
            usage.completion,
            usage.total
        );
    }
    println!("{}", "┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┛".bold());

    if let Some(reason) = &report.fallback_reason {
        println!("{} {}", "fallback:".yellow().bold(), reason);
    }

    if !report.warnings.is_empty() {
        println!("\nRepair warnings:");
        for w in &report.warnings {
            println!(" - {}", w.yellow());
        }
    }

    if let Some(message) = &site.message {
        println!("{} {}", "error:".red().bold(), message);
    }
}
