//! CLI command for bounded region detection

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use crate::config::LsxConfig;
use crate::region::{RegionGroup, peek_region};

/// Print `path: region (group)` for each file, reading at most `max_bytes` of each.
pub fn execute(sources: &[PathBuf], max_bytes: usize, config: &LsxConfig) -> anyhow::Result<()> {
    let table = config.region_table();

    for path in sources {
        let mut head = Vec::with_capacity(max_bytes);
        File::open(path)?
            .take(max_bytes as u64)
            .read_to_end(&mut head)?;

        match peek_region(&head, max_bytes) {
            Some(region) => {
                let group = table.group_of(&region);
                println!("{}: {} ({})", path.display(), region, group);
            }
            None => println!("{}: - ({})", path.display(), RegionGroup::Unknown),
        }
    }

    Ok(())
}
