//! Dialog graph summaries for Baldur's Gate 3 dialog documents
//!
//! # Overview
//!
//! A dialog LSX keeps everything under `<node id="dialog">`:
//! - `speakerlist` maps speaker indices to speaker mapping ids
//! - `nodes` holds one `<node id="node">` per dialog node plus the `RootNodes` list
//! - each dialog node carries a constructor, child references, text lines and flags
//!
//! [`summarize_dialog`] projects that structure into a [`DialogSummary`]: a
//! graph keyed by node UUID with classified edges and collected diagnostics.
//!
//! # Usage
//!
//! ```no_run
//! use lsxkit::dialog::{summarize_dialog, export::generate_transcript};
//! use lsxkit::formats::lsx::{ParseLimits, read_lsx};
//! use lsxkit::localization::HandleMap;
//!
//! let tree = read_lsx("path/to/dialog.lsx", &ParseLimits::default())?;
//! let summary = summarize_dialog(&tree, &HandleMap::new())?;
//!
//! for uuid in &summary.problems.edges.orphans {
//!     println!("orphan edge to {uuid}");
//! }
//! print!("{}", generate_transcript(&summary));
//! # Ok::<(), lsxkit::Error>(())
//! ```

mod constructor;
mod flags;
mod speakers;
mod summarize;
mod texts;
mod types;
pub mod export;

pub use constructor::NodeConstructor;
pub use flags::DEFAULT_FLAG_TYPE;
pub use summarize::{
    DIALOG_ENTRY_ID, DIALOG_NODE_ID, NODES_CONTAINER_ID, child_uuids, find_dialog_node,
    find_nodes_container, summarize_dialog,
};
pub use texts::tag_text_nodes;
pub use types::*;
