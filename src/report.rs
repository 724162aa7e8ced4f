use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::batch::Batch;

pub const DEFAULT_WORKSPACE: &str = "workspace";
const DRAFT_NAME: &str = "draft.md";
const FINAL_NAME: &str = "final.md";

const INDENT_UNIT: &str = "  ";
const RULE: &str = "\n---\n\n";

/// Where and under what names the report artifacts are written.
pub struct ReportConfig {
    pub workspace_root: PathBuf,
    /// Aggregated outline, regenerated on every run.
    pub draft_name: String,
    /// Companion file for manual authoring; always created empty.
    pub final_name: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            workspace_root: PathBuf::from(DEFAULT_WORKSPACE),
            draft_name: DRAFT_NAME.to_string(),
            final_name: FINAL_NAME.to_string(),
        }
    }
}

impl ReportConfig {
    pub fn with_workspace(root: impl Into<PathBuf>) -> Self {
        ReportConfig {
            workspace_root: root.into(),
            ..Default::default()
        }
    }
}

/// Render the aggregated report: a link index over all pages, a rule, then
/// each page's indented heading outline in batch order, a rule after every
/// page block.
pub fn render(batch: &Batch) -> String {
    let mut out = String::new();

    for page in &batch.pages {
        out.push_str(&format!(
            "## Headings from: [{}]({})\n",
            page.title, page.url
        ));
    }
    out.push_str(RULE);

    for page in &batch.pages {
        for h in &page.headings {
            let level = h.level.number();
            let indent = INDENT_UNIT.repeat((level - 1) as usize);
            out.push_str(&format!("{}- H{}: {}\n", indent, level, h.text));
        }
        out.push_str(RULE);
    }

    out
}

/// Persist the rendered draft and the empty final file under
/// `workspace_root/<subdir>/`, overwriting both. Returns the draft path.
pub fn write(config: &ReportConfig, subdir: &str, batch: &Batch) -> Result<PathBuf> {
    let dir = config.workspace_root.join(subdir);
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;

    let draft_path = dir.join(&config.draft_name);
    let final_path = dir.join(&config.final_name);

    write_file(&draft_path, &render(batch))?;
    // Contract: exists and is empty after this call, prior content discarded.
    write_file(&final_path, "")?;

    Ok(draft_path)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

// ── Tests ──
