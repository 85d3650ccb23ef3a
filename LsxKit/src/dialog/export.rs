//! Plain-text transcript export for dialog summaries

use std::collections::HashSet;
use std::fmt::Write as _;

use super::constructor::NodeConstructor;
use super::types::{DialogSummary, EdgeKind, NARRATOR_INDEX, NodeSummary};

const INDENT: &str = "  ";

/// Generate an indented transcript of a dialog
///
/// Walks from each root along local edges. A node reached a second time is
/// printed as a back-reference instead of being expanded again.
#[must_use]
pub fn generate_transcript(summary: &DialogSummary) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Dialog: {}", summary.uuid.as_deref().unwrap_or("(no uuid)"));
    if let Some(category) = &summary.category {
        let _ = writeln!(out, "Category: {category}");
    }
    let _ = writeln!(
        out,
        "Nodes: {}, roots: {}, problems: {}",
        summary.stats.nodes,
        summary.stats.roots,
        summary.problems.count()
    );
    out.push('\n');

    let mut visited = HashSet::new();
    for root in &summary.roots.ordered {
        render_node(summary, root, 0, &mut out, &mut visited);
    }
    out
}

fn render_node<'a>(
    summary: &'a DialogSummary,
    uuid: &'a str,
    depth: usize,
    out: &mut String,
    visited: &mut HashSet<&'a str>,
) {
    let indent = INDENT.repeat(depth);
    let Some(node) = summary.node(uuid) else {
        let _ = writeln!(out, "{indent}[missing] {uuid}");
        return;
    };
    if !visited.insert(uuid) {
        let _ = writeln!(out, "{indent}-> {uuid}");
        return;
    }

    let constructor = node
        .constructor
        .as_deref()
        .map_or_else(|| "?".to_string(), |c| NodeConstructor::parse(c).display_name().to_string());
    let mut line = format!("{indent}[{constructor}]");
    if let Some(speaker) = speaker_label(summary, node) {
        let _ = write!(line, " {speaker}:");
    }
    let text = node
        .texts
        .first()
        .and_then(|t| t.text.as_deref().or(t.handle.as_deref()))
        .unwrap_or("");
    if !text.is_empty() {
        let _ = write!(line, " {text}");
    }
    if node.is_end {
        line.push_str(" [END]");
    }
    out.push_str(line.trim_end());
    out.push('\n');

    for edge in &node.children {
        match edge.kind {
            EdgeKind::Local => render_node(summary, &edge.uuid, depth + 1, out, visited),
            EdgeKind::Nested => {
                let _ = writeln!(out, "{indent}{INDENT}(nested) {}", edge.uuid);
            }
            EdgeKind::Orphan => {
                let _ = writeln!(out, "{indent}{INDENT}(orphan) {}", edge.uuid);
            }
        }
    }
}

fn speaker_label(summary: &DialogSummary, node: &NodeSummary) -> Option<String> {
    let index = node.speaker_index.filter(|i| *i >= 0 || *i == NARRATOR_INDEX)?;
    if index == NARRATOR_INDEX {
        return Some("Narrator".to_string());
    }
    Some(match summary.speaker(index).and_then(|s| s.mapping_id.as_deref()) {
        Some(mapping) => format!("Speaker {index} ({mapping})"),
        None => format!("Speaker {index}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::types::{ChildEdge, Roots, Speaker, TextLine};

    fn node(constructor: &str, text: &str, children: &[(EdgeKind, &str)]) -> NodeSummary {
        NodeSummary {
            constructor: Some(constructor.to_string()),
            texts: vec![TextLine {
                text: Some(text.to_string()),
                ..TextLine::default()
            }],
            children: children
                .iter()
                .map(|(kind, uuid)| ChildEdge {
                    kind: *kind,
                    uuid: (*uuid).to_string(),
                })
                .collect(),
            ..NodeSummary::default()
        }
    }

    #[test]
    fn test_transcript_walks_roots_and_stops_on_cycles() {
        let mut summary = DialogSummary {
            uuid: Some("dlg".to_string()),
            roots: Roots {
                ordered: vec!["A".to_string()],
                ..Roots::default()
            },
            speakers: vec![Speaker {
                index: 0,
                mapping_id: Some("m0".to_string()),
            }],
            ..DialogSummary::default()
        };
        let mut a = node("TagQuestion", "Hello?", &[(EdgeKind::Local, "B"), (EdgeKind::Orphan, "C")]);
        a.speaker_index = Some(0);
        summary.nodes.insert("A".to_string(), a);
        summary
            .nodes
            .insert("B".to_string(), node("TagAnswer", "Bye.", &[(EdgeKind::Local, "A")]));

        let transcript = generate_transcript(&summary);
        assert!(transcript.starts_with("Dialog: dlg\n"));
        assert!(transcript.contains("[Question] Speaker 0 (m0): Hello?\n"));
        assert!(transcript.contains("  [Answer] Bye.\n"));
        assert!(transcript.contains("    -> A\n"));
        assert!(transcript.contains("  (orphan) C\n"));
    }

    #[test]
    fn test_empty_summary() {
        let transcript = generate_transcript(&DialogSummary::default());
        assert!(transcript.contains("Nodes: 0"));
    }
}
