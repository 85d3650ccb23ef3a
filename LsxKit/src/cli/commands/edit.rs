//! CLI command for applying edit requests

use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::config::LsxConfig;
use crate::edit::{EditCommand, EditRequest, apply_edits};
use crate::formats::lsx::{WriteOptions, parse_lsx, write_lsx};

pub fn execute(
    source: &Path,
    edits: &Path,
    output: Option<&Path>,
    lslib: bool,
    config: &LsxConfig,
) -> anyhow::Result<()> {
    let content = fs::read_to_string(edits)
        .with_context(|| format!("Failed to read {}", edits.display()))?;
    let requests: Vec<EditRequest> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse edit requests from {}", edits.display()))?;
    let commands = requests
        .into_iter()
        .map(EditCommand::try_from)
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Invalid edit request in {}", edits.display()))?;

    let data = fs::read(source).with_context(|| format!("Failed to read {}", source.display()))?;
    let mut tree = parse_lsx(&data, &config.limits)?;
    let report = apply_edits(&mut tree, &commands);

    let options = if lslib {
        WriteOptions::lslib()
    } else {
        WriteOptions::default()
    };
    let destination = output.unwrap_or(source);
    write_lsx(&tree, destination, &options)?;

    println!(
        "Applied {} of {} edits to {}",
        report.applied,
        commands.len(),
        destination.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_edits_file_names_the_path() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("dialog.lsx");
        fs::write(&source, "<save/>").unwrap();
        let edits = temp.path().join("edits.json");

        let err = execute(&source, &edits, None, false, &LsxConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains(&edits.display().to_string()));
        assert_eq!(fs::read_to_string(&source).unwrap(), "<save/>");
    }

    #[test]
    fn test_malformed_edits_name_the_path() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("dialog.lsx");
        fs::write(&source, "<save/>").unwrap();
        let edits = temp.path().join("edits.json");
        fs::write(&edits, r#"[{"targetKind":"children","nodeUuid":"A"}"#).unwrap();

        let err = execute(&source, &edits, None, false, &LsxConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("edits.json"));
    }
}
