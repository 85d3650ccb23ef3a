//! CLI command for re-serializing a document

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::config::LsxConfig;
use crate::formats::lsx::{WriteOptions, parse_lsx, serialize_lsx};

pub fn execute(
    source: &Path,
    output: Option<&Path>,
    lslib: bool,
    compact: bool,
    config: &LsxConfig,
) -> anyhow::Result<()> {
    let tree = parse_lsx(&fs::read(source)?, &config.limits)?;

    let options = if lslib {
        WriteOptions::lslib()
    } else if compact {
        WriteOptions::compact()
    } else {
        WriteOptions::default()
    };
    let bytes = serialize_lsx(&tree, &options)?;

    match output {
        Some(path) => fs::write(path, bytes)?,
        None => std::io::stdout().write_all(&bytes)?,
    }
    Ok(())
}
