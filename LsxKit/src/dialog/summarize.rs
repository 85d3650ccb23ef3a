//! Projection of the `dialog` region into a [`DialogSummary`]

use indexmap::IndexMap;
use std::collections::HashSet;

use super::constructor::NodeConstructor;
use super::flags::read_bucket;
use super::speakers::{SpeakerTable, default_addressed_speakers};
use super::texts::read_lines;
use super::types::{
    ChildEdge, DialogSummary, EdgeKind, FlagBucket, NodeFlags, NodeSummary, Problems, Roots,
    Stats, UnknownConstructor, UnmappedSpeaker,
};
use crate::error::{Error, Result};
use crate::formats::lsx::Element;
use crate::localization::HandleMap;

/// Node id of the dialog root inside the `dialog` region.
pub const DIALOG_NODE_ID: &str = "dialog";
/// Node id of the container holding the dialog nodes.
pub const NODES_CONTAINER_ID: &str = "nodes";
/// Node id of a single dialog node.
pub const DIALOG_ENTRY_ID: &str = "node";

/// The first `<node id="dialog">` in document order.
#[must_use]
pub fn find_dialog_node(tree: &Element) -> Option<&Element> {
    tree.find_first(|el| el.is_lsx_node(DIALOG_NODE_ID))
}

/// The dialog nodes container of a tree.
#[must_use]
pub fn find_nodes_container(tree: &Element) -> Option<&Element> {
    find_dialog_node(tree)?.lsx_child_node(NODES_CONTAINER_ID)
}

/// Summarize the dialog of a tree
///
/// The tree is not modified. Missing optional structure yields empty parts of
/// the summary.
///
/// # Errors
/// Returns [`Error::StructuralPathMissing`] when the tree has no `dialog` node.
pub fn summarize_dialog(tree: &Element, handles: &HandleMap) -> Result<DialogSummary> {
    let dialog = find_dialog_node(tree)
        .ok_or_else(|| Error::StructuralPathMissing("node id=\"dialog\"".to_string()))?;

    let mut problems = Problems::default();
    let speakers = SpeakerTable::from_dialog(dialog);

    let container = dialog.lsx_child_node(NODES_CONTAINER_ID);
    let entries: Vec<&Element> = container
        .map(|c| c.lsx_nodes(DIALOG_ENTRY_ID).collect())
        .unwrap_or_default();

    // Pass 1: declared UUIDs, so children can be classified in one pass afterwards.
    let mut declared: Vec<(&str, &Element)> = Vec::with_capacity(entries.len());
    let mut seen = HashSet::new();
    for (position, entry) in entries.into_iter().enumerate() {
        let Some(uuid) = entry.lsx_value("UUID").map(str::trim).filter(|u| !u.is_empty()) else {
            problems.nodes.missing_uuid.push(position);
            continue;
        };
        if !seen.insert(uuid) {
            problems.nodes.duplicate_uuid.push(uuid.to_string());
            continue;
        }
        declared.push((uuid, entry));
    }

    let mut nodes = IndexMap::with_capacity(declared.len());
    let mut orphans_seen = HashSet::new();
    for &(uuid, entry) in &declared {
        let summary = summarize_node(
            entry,
            uuid,
            &seen,
            &speakers,
            handles,
            &mut problems,
            &mut orphans_seen,
        );
        nodes.insert(uuid.to_string(), summary);
    }

    let roots = reconcile_roots(container, &nodes, &mut problems);
    let stats = aggregate_stats(&nodes, &roots);

    let summary = DialogSummary {
        category: scalar(dialog, "category"),
        uuid: scalar(dialog, "UUID"),
        timeline_id: scalar(dialog, "TimelineId"),
        default_addressed_speakers: default_addressed_speakers(dialog),
        speakers: speakers.into_speakers(),
        roots,
        nodes,
        problems,
        stats,
    };

    tracing::info!(
        "Summarized dialog: {} nodes, {} roots, {} problems",
        summary.stats.nodes,
        summary.stats.roots,
        summary.problems.count()
    );
    Ok(summary)
}

fn scalar(dialog: &Element, id: &str) -> Option<String> {
    dialog
        .lsx_value(id)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn summarize_node(
    entry: &Element,
    uuid: &str,
    declared: &HashSet<&str>,
    speakers: &SpeakerTable,
    handles: &HandleMap,
    problems: &mut Problems,
    orphans_seen: &mut HashSet<String>,
) -> NodeSummary {
    let constructor = scalar(entry, "constructor");
    let parsed = constructor.as_deref().map(NodeConstructor::parse);
    if let Some(NodeConstructor::Other(value)) = &parsed {
        problems.constructors.unknown.push(UnknownConstructor {
            node: uuid.to_string(),
            constructor: value.clone(),
        });
    }
    let nested = parsed.as_ref().is_some_and(NodeConstructor::has_nested_children);

    let speaker_index = entry.lsx_int("speaker");
    if let Some(index) = speaker_index
        && !speakers.is_mapped(index)
    {
        problems.speakers.unmapped.push(UnmappedSpeaker {
            node: uuid.to_string(),
            index,
        });
    }

    let children = child_uuids(entry)
        .map(|target| {
            let kind = if declared.contains(target) {
                EdgeKind::Local
            } else if nested {
                EdgeKind::Nested
            } else {
                if orphans_seen.insert(target.to_string()) {
                    problems.edges.orphans.push(target.to_string());
                }
                EdgeKind::Orphan
            };
            ChildEdge {
                kind,
                uuid: target.to_string(),
            }
        })
        .collect();

    let flags = NodeFlags {
        checks: read_bucket(entry, uuid, FlagBucket::Checkflags, speakers, problems),
        sets: read_bucket(entry, uuid, FlagBucket::Setflags, speakers, problems),
    };

    NodeSummary {
        constructor,
        is_root: entry.lsx_bool("Root").unwrap_or(false),
        is_end: entry.lsx_bool("endnode").unwrap_or(false),
        speaker_index,
        group_id: scalar(entry, "GroupID"),
        group_index: entry.lsx_int("GroupIndex"),
        texts: read_lines(entry, handles),
        children,
        flags,
    }
}

/// Child UUIDs of a dialog node: `children -> child -> UUID`.
pub fn child_uuids(entry: &Element) -> impl Iterator<Item = &str> {
    entry
        .lsx_nodes("children")
        .flat_map(|list| list.lsx_nodes("child"))
        .filter_map(|child| child.lsx_value("UUID"))
        .map(str::trim)
        .filter(|uuid| !uuid.is_empty())
}

fn reconcile_roots(
    container: Option<&Element>,
    nodes: &IndexMap<String, NodeSummary>,
    problems: &mut Problems,
) -> Roots {
    let mut from_list: Vec<String> = Vec::new();
    if let Some(container) = container {
        for entry in container.lsx_nodes("RootNodes") {
            let Some(uuid) = entry.lsx_value("RootNodes").map(str::trim).filter(|u| !u.is_empty())
            else {
                continue;
            };
            if !from_list.iter().any(|u| u == uuid) {
                from_list.push(uuid.to_string());
            }
        }
    }

    let from_attribute: Vec<String> = nodes
        .iter()
        .filter(|(_, node)| node.is_root)
        .map(|(uuid, _)| uuid.clone())
        .collect();

    let mut ordered = from_list.clone();
    for uuid in &from_list {
        if !from_attribute.contains(uuid) {
            problems.roots.list_only.push(uuid.clone());
        }
    }
    for uuid in &from_attribute {
        if !from_list.contains(uuid) {
            problems.roots.attribute_only.push(uuid.clone());
            ordered.push(uuid.clone());
        }
    }

    Roots {
        ordered,
        from_list,
        from_attribute,
    }
}

fn aggregate_stats(nodes: &IndexMap<String, NodeSummary>, roots: &Roots) -> Stats {
    let mut stats = Stats {
        nodes: nodes.len(),
        roots: roots.ordered.len(),
        ..Stats::default()
    };
    for node in nodes.values() {
        if node.is_end {
            stats.end_nodes += 1;
        }
        stats.edges += node.children.len();
        for edge in &node.children {
            match edge.kind {
                EdgeKind::Local => stats.edges_by_kind.local += 1,
                EdgeKind::Nested => stats.edges_by_kind.nested += 1,
                EdgeKind::Orphan => stats.edges_by_kind.orphan += 1,
            }
        }
        stats.text_lines += node.texts.len();
        stats.flags += node.flags.len();
        let key = node.constructor.clone().unwrap_or_else(|| "(none)".to_string());
        *stats.constructors.entry(key).or_insert(0) += 1;
    }
    stats
}
