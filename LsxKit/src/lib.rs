//! # LsxKit
//!
//! A pure-Rust library for reading, summarizing and editing Baldur's Gate 3
//! LSX documents.
//!
//! ## Features
//!
//! - **LSX codec** - Tolerant parsing into an ordered element tree and
//!   byte-stable serialization back to XML
//! - **Region detection** - Cheap region sniffing and region group classification
//! - **Localization** - Handle maps built from localization XML, with a
//!   pattern-based fallback for damaged files
//! - **Dialog summaries** - Speakers, roots, classified edges, text lines,
//!   flags and diagnostics for dialog documents
//! - **Edits** - Targeted edit commands applied to the raw tree
//!
//! ## Quick Start
//!
//! ### Reading a Document
//!
//! ```no_run
//! use lsxkit::config::LsxConfig;
//! use lsxkit::context::ReadContext;
//! use lsxkit::localization::{DirectorySource, load_handle_map};
//! use lsxkit::region::read_document;
//!
//! let config = LsxConfig::default();
//! let handles = load_handle_map(
//!     &DirectorySource::new("Localization/English"),
//!     config.merge_policy,
//!     &config.limits,
//! )?;
//! let ctx = ReadContext::new(&config, &handles);
//!
//! let data = std::fs::read("Dialogs/Camp/CampNight.lsx")?;
//! let view = read_document(&data, &ctx)?;
//! println!("{:?} ({})", view.meta.region, view.meta.region_group);
//! # Ok::<(), lsxkit::Error>(())
//! ```
//!
//! ### Editing a Dialog
//!
//! ```no_run
//! use lsxkit::edit::{EditCommand, HeaderField, apply_edit};
//! use lsxkit::formats::lsx::{ParseLimits, WriteOptions, read_lsx, write_lsx};
//!
//! let mut tree = read_lsx("dialog.lsx", &ParseLimits::default())?;
//! apply_edit(&mut tree, &EditCommand::Header {
//!     node_uuid: "0b1e4e2a-0000-0000-0000-000000000001".to_string(),
//!     field: HeaderField::Root,
//! });
//! write_lsx(&tree, "dialog.lsx", &WriteOptions::default())?;
//! # Ok::<(), lsxkit::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `lsxkit` command-line binary

pub mod config;
pub mod context;
pub mod dialog;
pub mod edit;
pub mod error;
pub mod formats;
pub mod localization;
pub mod region;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::config::LsxConfig;
    pub use crate::context::ReadContext;
    pub use crate::error::{Error, Result};
    pub use crate::formats::lsx::{
        Element, ParseLimits, WriteOptions, parse_lsx, read_lsx, serialize_lsx, write_lsx,
    };

    // Document reading
    pub use crate::region::{
        DocumentMeta, DocumentView, NormalizedDocument, RegionGroup, normalize, peek_region,
        read_document,
    };

    // Localization
    pub use crate::localization::{
        DirectorySource, HandleMap, LocalizedEntry, MergePolicy, build_handle_map, load_handle_map,
    };

    // Dialogs and edits
    pub use crate::dialog::{DialogSummary, EdgeKind, FlagTarget, summarize_dialog};
    pub use crate::edit::{EditCommand, EditOutcome, EditRequest, apply_edit, apply_edits};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
