//! Region detection and document normalization
//!
//! Every LSX document declares one `<region id="..">`. The region decides how
//! the rest of the document is interpreted; only the `dialog` group gets a
//! graph summary.

mod groups;
mod peek;

pub use groups::{RegionGroup, RegionGroupTable, region_group};
pub use peek::{DEFAULT_PEEK_BYTES, peek_region};

use serde::{Deserialize, Serialize};

use crate::context::ReadContext;
use crate::dialog::{DialogSummary, summarize_dialog};
use crate::error::Result;
use crate::formats::lsx::{Element, parse_lsx};

const REGION_TAG: &str = "region";

/// Region metadata kept beside the tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub region_group: RegionGroup,
}

/// A parsed document with its region metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedDocument {
    pub tree: Element,
    pub meta: DocumentMeta,
}

/// Everything the read path produces for one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentView {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    pub tree: Element,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialog: Option<DialogSummary>,
}

/// The `id` (or `name`) of the first `region` element of a parsed tree.
#[must_use]
pub fn tree_region(tree: &Element) -> Option<&str> {
    tree.find_first(|el| el.is_tag(REGION_TAG))
        .and_then(|region| region.attr("id").or_else(|| region.attr("name")))
        .map(str::trim)
        .filter(|id| !id.is_empty())
}

/// Parse `data` and attach region metadata.
///
/// # Errors
/// Returns an error if the document fails to parse or exceeds the context's limits.
pub fn normalize(data: &[u8], ctx: &ReadContext<'_>) -> Result<NormalizedDocument> {
    let tree = parse_lsx(data, &ctx.limits)?;
    let region = tree_region(&tree)
        .map(str::to_string)
        .or_else(|| peek_region(data, ctx.peek_bytes));
    let region_group = region
        .as_deref()
        .map_or(RegionGroup::Unknown, |r| ctx.groups.group_of(r));

    tracing::debug!(
        "Normalized document: region={:?}, group={}, {} elements",
        region,
        region_group,
        tree.node_count()
    );
    Ok(NormalizedDocument {
        tree,
        meta: DocumentMeta {
            region,
            region_group,
        },
    })
}

/// Normalize `data`, then summarize it when it is a dialog.
///
/// # Errors
/// Returns an error if the document fails to parse, or if a dialog-group
/// document has no `dialog` node.
pub fn read_document(data: &[u8], ctx: &ReadContext<'_>) -> Result<DocumentView> {
    let NormalizedDocument { tree, meta } = normalize(data, ctx)?;
    let dialog = if meta.region_group == RegionGroup::Dialog {
        Some(summarize_dialog(&tree, ctx.handles)?)
    } else {
        None
    };
    Ok(DocumentView { meta, tree, dialog })
}
