//! Batch driver: load a document, convert every conversation, tally results.

use eyre::{Context, Result};
use serde_json::Value;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::ExportError;
use crate::importer::{self, Conversation};
use crate::renderer;
use crate::utils::sanitize_title;

/// Everything the conversion run needs, passed in explicitly.
/// This decouples the logic from how the paths were collected (form/CLI).
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub input_file: PathBuf,
    pub output_dir: PathBuf,
}

/// Per-run tally, reported back to the shell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Conversations found in the document.
    pub attempted: usize,
    /// Conversations written out as `.txt` files.
    pub converted: usize,
    /// Conversations with no extractable messages (nothing to export).
    pub skipped: usize,
    /// Conversations that faulted while extracting or writing.
    pub failed: usize,
}

enum Outcome {
    Written(PathBuf),
    Empty,
}

/// Run the whole conversion: parse the export document, create the output
/// directory and write one transcript per non-empty conversation.
///
/// Document-level problems (unreadable file, malformed JSON, uncreatable
/// output directory) abort the run before any file is written. A fault in a
/// single conversation only bumps the failure count; the batch continues.
pub fn execute(config: &ExportConfig) -> Result<ExportSummary, ExportError> {
    let document = importer::load_document(&config.input_file)?;
    let conversations = importer::normalize_document(document);

    fs::create_dir_all(&config.output_dir).map_err(|source| ExportError::CreateDir {
        path: config.output_dir.clone(),
        source,
    })?;

    let mut registry: HashSet<String> = HashSet::new();
    let mut summary = ExportSummary {
        attempted: conversations.len(),
        ..ExportSummary::default()
    };

    for (index, conversation) in conversations.iter().enumerate() {
        match convert_conversation(conversation, &config.output_dir, &mut registry) {
            Ok(Outcome::Written(path)) => {
                summary.converted += 1;
                debug!(conversation = index, path = %path.display(), "written");
            }
            Ok(Outcome::Empty) => {
                summary.skipped += 1;
                debug!(conversation = index, "no messages, skipped");
            }
            Err(error) => {
                summary.failed += 1;
                warn!(conversation = index, "conversion failed: {error:#}");
            }
        }
    }

    Ok(summary)
}

/// Convert one conversation value into a transcript file.
///
/// Returns `Empty` (no file) when the conversation has no messages; any other
/// fault is an error for this conversation only.
fn convert_conversation(
    value: &Value,
    output_dir: &Path,
    registry: &mut HashSet<String>,
) -> Result<Outcome> {
    let conversation: Conversation = serde_json::from_value(value.clone())
        .wrap_err("conversation is not an object with the expected shape")?;

    let title = conversation.resolve_title();
    let messages = conversation
        .collect_messages()
        .wrap_err("failed to decode messages")?;
    if messages.is_empty() {
        return Ok(Outcome::Empty);
    }

    let stem = allocate_filename(&title, registry);
    let path = output_dir.join(format!("{stem}.txt"));

    let file = File::create(&path)
        .wrap_err_with(|| format!("failed to create: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    renderer::render_conversation(&mut writer, &title, &messages)
        .wrap_err_with(|| format!("failed to write: {}", path.display()))?;
    writer.flush().wrap_err("failed to flush transcript")?;

    Ok(Outcome::Written(path))
}

/// Pick a unique filename stem for this run.
///
/// Different conversations can sanitize to the same stem (the original export
/// tool silently overwrote the earlier file in that case); colliding stems get
/// a numeric suffix instead, so every converted conversation keeps its file.
fn allocate_filename(title: &str, registry: &mut HashSet<String>) -> String {
    let stem = sanitize_title(title);
    let mut candidate = stem.clone();
    let mut n = 1usize;
    while !registry.insert(candidate.clone()) {
        n += 1;
        candidate = format!("{stem}_{n}");
    }
    candidate
}
