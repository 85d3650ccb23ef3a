//! CLI command for dialog summaries and transcripts

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use super::emit;
use crate::config::LsxConfig;
use crate::context::ReadContext;
use crate::dialog::export::generate_transcript;
use crate::dialog::summarize_dialog;
use crate::localization::{DirectorySource, HandleMap, load_handle_map};
use crate::region::normalize;

pub fn execute(
    source: &Path,
    loca_dirs: &[PathBuf],
    transcript: bool,
    output: Option<&Path>,
    config: &LsxConfig,
) -> anyhow::Result<()> {
    let handles = load_handles(loca_dirs, config)?;
    let ctx = ReadContext::new(config, &handles);

    let data = fs::read(source)?;
    let document = normalize(&data, &ctx)?;
    let summary = summarize_dialog(&document.tree, ctx.handles)
        .with_context(|| format!("{} is not a dialog document", source.display()))?;

    if !summary.problems.is_empty() {
        tracing::warn!(
            "{}: {} problems ({} orphan edges)",
            source.display(),
            summary.problems.count(),
            summary.problems.edges.orphans.len()
        );
    }

    let content = if transcript {
        generate_transcript(&summary)
    } else {
        serde_json::to_string_pretty(&summary)?
    };
    emit(output, &content)
}

/// Merge the handle maps of every directory, in the order given.
pub(crate) fn load_handles(dirs: &[PathBuf], config: &LsxConfig) -> anyhow::Result<HandleMap> {
    let mut handles = HandleMap::new();
    for dir in dirs {
        let map = load_handle_map(&DirectorySource::new(dir), config.merge_policy, &config.limits)
            .with_context(|| format!("Failed to load localization from {}", dir.display()))?;
        handles.merge(map, config.merge_policy);
    }
    Ok(handles)
}
