use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::json;
use tally_core::WordCounts;
use tally_logging::tally_info;
use tempfile::NamedTempFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub total_tokens: u64,
    pub distinct_words: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("export path has no file name: {0}")]
    MissingFileName(PathBuf),
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writes the counts and their top `top` entries to `path` as JSON.
///
/// The file is written to a temporary sibling and renamed into place, so a
/// reader never sees a half-written export. Words in `counts` are sorted.
pub fn export_counts(
    path: &Path,
    counts: &WordCounts,
    top: usize,
) -> Result<ExportSummary, ExportError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| ExportError::MissingFileName(path.to_path_buf()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let sorted: BTreeMap<&str, u64> = counts.iter().collect();
    let document = json!({
        "total_tokens": counts.total(),
        "distinct_words": counts.len(),
        "top": counts.top_n(top).iter().map(|ranked| {
            json!({ "word": ranked.word, "count": ranked.count })
        }).collect::<Vec<_>>(),
        "counts": sorted,
    });
    let content = serde_json::to_string_pretty(&document)?;

    let target = dir.join(file_name);
    write_atomically(&dir, &target, &content)?;
    tally_info!("Exported {} words to {:?}", counts.len(), target);

    Ok(ExportSummary {
        path: target,
        total_tokens: counts.total(),
        distinct_words: counts.len(),
    })
}

fn write_atomically(dir: &Path, target: &Path, content: &str) -> Result<(), ExportError> {
    if dir.exists() {
        if !dir.is_dir() {
            return Err(ExportError::OutputDir(format!("{} is not a directory", dir.display())));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| ExportError::OutputDir(e.to_string()))?;
    }

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(target).map_err(|e| ExportError::Io(e.error))?;
    Ok(())
}
