//! CLI command for dumping the canonical tree as JSON

use std::fs;
use std::path::Path;

use super::emit;
use crate::config::LsxConfig;
use crate::context::ReadContext;
use crate::localization::HandleMap;
use crate::region::normalize;

pub fn execute(
    source: &Path,
    output: Option<&Path>,
    pretty: bool,
    config: &LsxConfig,
) -> anyhow::Result<()> {
    let data = fs::read(source)?;
    let handles = HandleMap::new();
    let ctx = ReadContext::new(config, &handles);

    let document = normalize(&data, &ctx)?;
    let json = if pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };

    emit(output, &json)
}
