//! Read context threaded through parsing and resolution

use crate::config::LsxConfig;
use crate::formats::lsx::ParseLimits;
use crate::localization::HandleMap;
use crate::region::RegionGroupTable;

/// Everything a read needs besides the document bytes.
#[derive(Debug, Clone)]
pub struct ReadContext<'a> {
    pub limits: ParseLimits,
    pub peek_bytes: usize,
    pub groups: RegionGroupTable,
    pub handles: &'a HandleMap,
}

impl<'a> ReadContext<'a> {
    #[must_use]
    pub fn new(config: &LsxConfig, handles: &'a HandleMap) -> Self {
        Self {
            limits: config.limits,
            peek_bytes: config.peek_bytes,
            groups: config.region_table(),
            handles,
        }
    }

    /// Default configuration over the given handle map.
    #[must_use]
    pub fn with_handles(handles: &'a HandleMap) -> Self {
        Self::new(&LsxConfig::default(), handles)
    }
}
