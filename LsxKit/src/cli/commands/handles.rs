//! CLI command for inspecting localization handle maps

use std::path::Path;

use crate::config::LsxConfig;
use crate::localization::{DirectorySource, MergePolicy, load_handle_map};

pub fn execute(
    source: &Path,
    lookup: &[String],
    first_wins: bool,
    config: &LsxConfig,
) -> anyhow::Result<()> {
    let policy = if first_wins {
        MergePolicy::FirstWins
    } else {
        config.merge_policy
    };
    let handles = load_handle_map(&DirectorySource::new(source), policy, &config.limits)?;

    if lookup.is_empty() {
        println!("{} handles", handles.len());
        return Ok(());
    }

    for handle in lookup {
        match handles.get(handle) {
            Some(entry) => match entry.version {
                Some(version) => println!("{handle} (v{version}): {}", entry.text),
                None => println!("{handle}: {}", entry.text),
            },
            None => println!("{handle}: (not found)"),
        }
    }
    Ok(())
}
