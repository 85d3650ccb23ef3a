//! Dialog graph summary types
//!
//! The summary is a read-only projection of the `dialog` region. It serializes
//! to camelCase JSON for editor front-ends.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Speaker index meaning "no speaker".
pub const NO_SPEAKER: i32 = -1;
/// Speaker index of the narrator.
pub const NARRATOR_INDEX: i32 = -666;
/// Mapping id reported for the narrator pseudo-speaker.
pub const NARRATOR_MAPPING_ID: &str = "narrator";

/// Summary of one dialog document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// UUID of the dialog itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline_id: Option<String>,
    pub default_addressed_speakers: Vec<AddressedSpeaker>,
    /// Declared speakers in document order, then the narrator.
    pub speakers: Vec<Speaker>,
    pub roots: Roots,
    /// Dialog nodes by UUID, in document order
    pub nodes: IndexMap<String, NodeSummary>,
    pub problems: Problems,
    pub stats: Stats,
}

impl DialogSummary {
    /// Get a node by UUID
    #[must_use]
    pub fn node(&self, uuid: &str) -> Option<&NodeSummary> {
        self.nodes.get(uuid)
    }

    /// Speaker entry for an index
    #[must_use]
    pub fn speaker(&self, index: i32) -> Option<&Speaker> {
        self.speakers.iter().find(|s| s.index == index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressedSpeaker {
    pub from_index: i32,
    pub to_index: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Speaker {
    pub index: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping_id: Option<String>,
}

/// Root nodes reconciled from the `RootNodes` list and per-node `Root` flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roots {
    /// List order first, then attribute-only roots.
    pub ordered: Vec<String>,
    pub from_list: Vec<String>,
    pub from_attribute: Vec<String>,
}

/// A single dialog node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constructor: Option<String>,
    pub is_root: bool,
    pub is_end: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker_index: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_index: Option<i32>,
    pub texts: Vec<TextLine>,
    pub children: Vec<ChildEdge>,
    pub flags: NodeFlags,
}

/// One `TagText` line of a node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    /// Inline text, or the localized text of `handle`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stub: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Target is declared in the same dialog.
    Local,
    /// Target lives in the namespace of a nested dialog.
    Nested,
    /// Target is not declared anywhere this document knows of.
    Orphan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildEdge {
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    pub uuid: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeFlags {
    pub checks: Vec<FlagEntry>,
    pub sets: Vec<FlagEntry>,
}

impl NodeFlags {
    #[must_use]
    pub fn len(&self) -> usize {
        self.checks.len() + self.sets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty() && self.sets.is_empty()
    }
}

/// Which flag list of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagBucket {
    Checkflags,
    Setflags,
}

impl FlagBucket {
    /// Node id of the bucket container
    #[must_use]
    pub fn node_id(self) -> &'static str {
        match self {
            FlagBucket::Checkflags => "checkflags",
            FlagBucket::Setflags => "setflags",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagEntry {
    #[serde(rename = "type")]
    pub flag_type: String,
    pub uuid: String,
    pub value: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paramval: Option<i32>,
    pub target: FlagTarget,
}

/// What a flag's `paramval` points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FlagTarget {
    None,
    Narrator,
    Speaker {
        index: i32,
        #[serde(rename = "mappingId", default, skip_serializing_if = "Option::is_none")]
        mapping_id: Option<String>,
    },
    Invalid,
}

/// Diagnostics collected while summarizing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problems {
    pub edges: EdgeProblems,
    pub constructors: ConstructorProblems,
    pub speakers: SpeakerProblems,
    pub flags: FlagProblems,
    pub roots: RootProblems,
    pub nodes: NodeProblems,
}

impl Problems {
    /// Total number of recorded diagnostics
    #[must_use]
    pub fn count(&self) -> usize {
        self.edges.orphans.len()
            + self.constructors.unknown.len()
            + self.speakers.unmapped.len()
            + self.flags.invalid_param_index.len()
            + self.roots.list_only.len()
            + self.roots.attribute_only.len()
            + self.nodes.missing_uuid.len()
            + self.nodes.duplicate_uuid.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeProblems {
    /// Orphan target UUIDs, first-seen order, no duplicates.
    pub orphans: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorProblems {
    pub unknown: Vec<UnknownConstructor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnknownConstructor {
    pub node: String,
    pub constructor: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerProblems {
    pub unmapped: Vec<UnmappedSpeaker>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmappedSpeaker {
    pub node: String,
    pub index: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagProblems {
    pub invalid_param_index: Vec<InvalidParamIndex>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidParamIndex {
    pub node: String,
    pub bucket: FlagBucket,
    /// Position of the flag within its bucket
    pub index: usize,
    /// Raw `paramval` as written in the document
    pub paramval: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootProblems {
    /// In the `RootNodes` list but not flagged `Root`.
    pub list_only: Vec<String>,
    /// Flagged `Root` but missing from the `RootNodes` list.
    pub attribute_only: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProblems {
    /// Positions (within the nodes container) of dialog nodes without a UUID.
    pub missing_uuid: Vec<usize>,
    pub duplicate_uuid: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeCounts {
    pub local: usize,
    pub nested: usize,
    pub orphan: usize,
}

/// Aggregate counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub nodes: usize,
    pub roots: usize,
    pub end_nodes: usize,
    pub edges: usize,
    pub edges_by_kind: EdgeCounts,
    pub text_lines: usize,
    pub flags: usize,
    /// Node count per constructor
    pub constructors: BTreeMap<String, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_target_json() {
        let speaker = FlagTarget::Speaker {
            index: 2,
            mapping_id: Some("m-2".to_string()),
        };
        assert_eq!(
            serde_json::to_string(&speaker).unwrap(),
            r#"{"kind":"speaker","index":2,"mappingId":"m-2"}"#
        );
        assert_eq!(serde_json::to_string(&FlagTarget::None).unwrap(), r#"{"kind":"none"}"#);
    }

    #[test]
    fn test_child_edge_json() {
        let edge = ChildEdge {
            kind: EdgeKind::Orphan,
            uuid: "c".to_string(),
        };
        assert_eq!(serde_json::to_string(&edge).unwrap(), r#"{"type":"orphan","uuid":"c"}"#);
    }

    #[test]
    fn test_problem_count() {
        let mut problems = Problems::default();
        assert!(problems.is_empty());
        problems.edges.orphans.push("c".to_string());
        problems.roots.list_only.push("r".to_string());
        assert_eq!(problems.count(), 2);
    }
}
