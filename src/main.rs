use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use doctriage::{
    triage, FileConfig, HeuristicTokenCounter, RawDocument, TokenCounter, TriageConfig,
    TriageReport,
};

/// Triage a folder of text documents for an embedding pipeline.
///
/// Assigns each document a length tier, detects exact duplicates by
/// checksum, and clusters near-duplicates by tf-idf cosine similarity.
#[derive(Parser, Debug)]
#[command(name = "doctriage", about = "Length tiers and near-duplicate groups for a document folder")]
struct Cli {
    /// Folder containing the documents (.md, .markdown, .txt)
    folder: PathBuf,

    /// Similarity threshold in [0, 1] (overrides the config file)
    #[arg(long)]
    threshold: Option<f32>,

    /// Path to a YAML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the report to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Emit the report as JSON
    #[arg(long)]
    json: bool,

    /// Parallelize the pairwise similarity computation
    #[arg(long)]
    parallel: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Cli::parse();

    let mut config = match &args.config {
        Some(path) => FileConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?
            .to_triage_config(),
        None => TriageConfig::default(),
    };
    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    if args.parallel {
        config.similarity.use_parallel = true;
    }

    let documents = read_folder(&args.folder)?;
    info!(count = documents.len(), folder = %args.folder.display(), "documents loaded");

    let report = triage(documents, &config)?;

    let rendered = if args.json {
        serde_json::to_string_pretty(&report)?
    } else {
        render_text(&report)
    };

    match &args.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("failed to write report to {}", path.display()))?,
        None => println!("{rendered}"),
    }
    Ok(())
}

/// Read every supported text file directly under `folder`.
fn read_folder(folder: &PathBuf) -> Result<Vec<RawDocument>> {
    let counter = HeuristicTokenCounter::default();
    let mut documents = Vec::new();

    let entries = fs::read_dir(folder)
        .with_context(|| format!("failed to read folder {}", folder.display()))?;
    for entry in entries {
        let path = entry?.path();
        let supported = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| matches!(ext, "md" | "markdown" | "txt"));
        if !path.is_file() || !supported {
            continue;
        }
        let id = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string();
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let token_count = counter.count_tokens(&text);
        documents.push(RawDocument::new(id, text, token_count));
    }
    Ok(documents)
}

fn render_text(report: &TriageReport) -> String {
    let mut out = Vec::new();

    out.push("== Tiers ==".to_string());
    for (id, tier) in &report.tiers {
        out.push(format!("{id}: {tier:?}"));
    }

    out.push(String::new());
    out.push("== Groups ==".to_string());
    for (representative, members) in &report.groups {
        out.push(format!("Group {representative}:"));
        for member in members {
            if member != representative {
                out.push(format!(" - {member}"));
            }
        }
    }
    if !report.ungrouped.is_empty() {
        out.push(format!(
            "Ungrouped: {}",
            report
                .ungrouped
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }

    if !report.duplicates.is_empty() {
        out.push(String::new());
        out.push("== Exact duplicates ==".to_string());
        for (duplicate, representative) in &report.duplicates {
            out.push(format!("{duplicate} duplicates {representative}"));
        }
    }

    if !report.rejected.is_empty() {
        out.push(String::new());
        out.push("== Rejected ==".to_string());
        for (id, reason) in &report.rejected {
            out.push(format!("{id}: {reason}"));
        }
    }

    out.join("\n")
}
