//! Applying edit commands to the canonical tree
//!
//! Edits address dialog nodes by UUID. A target that cannot be found leaves the
//! tree untouched and reports [`EditOutcome::NoTarget`]; one stale reference never
//! fails a batch.

use serde::{Deserialize, Serialize};

use super::command::{EditCommand, FlagField, HeaderField, LineField};
use crate::dialog::{DIALOG_ENTRY_ID, DIALOG_NODE_ID, FlagBucket, NODES_CONTAINER_ID};
use crate::formats::lsx::Element;

/// Result of one edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditOutcome {
    /// The tree was changed.
    Applied,
    /// The addressed node, line or flag group does not exist.
    NoTarget,
    /// The target exists but the edit has no structural effect.
    Ignored,
}

/// Counts for a batch of edits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditReport {
    pub applied: usize,
    pub skipped: usize,
}

/// Apply one edit in place.
pub fn apply_edit(tree: &mut Element, command: &EditCommand) -> EditOutcome {
    let outcome = match find_dialog_entry_mut(tree, command.node_uuid()) {
        None => EditOutcome::NoTarget,
        Some(node) => match command {
            EditCommand::Header { field, .. } => apply_header(node, field),
            EditCommand::Children { uuids, .. } => {
                replace_children(node, uuids);
                EditOutcome::Applied
            }
            EditCommand::Line { index, field, .. } => apply_line(node, *index, field),
            EditCommand::Flag {
                bucket, index, field, ..
            } => apply_flag(node, *bucket, *index, field),
        },
    };

    if outcome != EditOutcome::Applied {
        tracing::debug!("Edit {:?} not applied: {:?}", command, outcome);
    }
    outcome
}

/// Apply a batch of edits in order.
pub fn apply_edits(tree: &mut Element, commands: &[EditCommand]) -> EditReport {
    let mut report = EditReport::default();
    for command in commands {
        match apply_edit(tree, command) {
            EditOutcome::Applied => report.applied += 1,
            EditOutcome::NoTarget | EditOutcome::Ignored => report.skipped += 1,
        }
    }
    tracing::debug!("Applied {} edits, skipped {}", report.applied, report.skipped);
    report
}

/// The `<node id="node">` entry of the dialog nodes container whose `UUID` is `uuid`.
fn find_dialog_entry_mut<'a>(tree: &'a mut Element, uuid: &str) -> Option<&'a mut Element> {
    let uuid = uuid.trim();
    tree.find_first_mut(|el| el.is_lsx_node(DIALOG_NODE_ID))?
        .lsx_child_node_mut(NODES_CONTAINER_ID)?
        .lsx_children_mut()
        .find(|entry| {
            entry.is_lsx_node(DIALOG_ENTRY_ID) && entry.lsx_value("UUID").map(str::trim) == Some(uuid)
        })
}

fn apply_header(node: &mut Element, field: &HeaderField) -> EditOutcome {
    match field {
        HeaderField::Constructor(value) => {
            node.upsert_lsx_attribute("constructor", "FixedString", value);
        }
        HeaderField::Speaker(value) => {
            let index = value.trim().parse::<i32>().unwrap_or(0);
            node.upsert_lsx_attribute("speaker", "int32", &index.to_string());
        }
        HeaderField::Root => {
            node.toggle_lsx_bool("Root");
        }
        HeaderField::EndNode => {
            node.toggle_lsx_bool("endnode");
        }
    }
    EditOutcome::Applied
}

/// Split a freeform UUID list on commas, semicolons and whitespace.
#[must_use]
pub fn split_uuid_list(list: &str) -> Vec<&str> {
    list.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect()
}

fn replace_children(node: &mut Element, uuids: &str) {
    let children = split_uuid_list(uuids)
        .into_iter()
        .map(|uuid| Element::lsx_node("child").with_child(Element::lsx_attribute("UUID", "guid", uuid)))
        .collect();
    node.ensure_lsx_child_node("children").set_lsx_children(children);
}

fn tagged_texts_mut(node: &mut Element) -> impl Iterator<Item = &mut Element> {
    node.lsx_children_mut()
        .filter(|c| c.is_lsx_node("TaggedTexts"))
        .flat_map(|list| list.lsx_children_mut().filter(|c| c.is_lsx_node("TaggedText")))
}

fn tag_texts_mut(tagged: &mut Element) -> impl Iterator<Item = &mut Element> {
    tagged
        .lsx_children_mut()
        .filter(|c| c.is_lsx_node("TagTexts"))
        .flat_map(|list| list.lsx_children_mut().filter(|c| c.is_lsx_node("TagText")))
}

/// `(TaggedText position, TagText position within it)` of the `index`-th line.
fn locate_line(node: &Element, index: usize) -> Option<(usize, usize)> {
    let mut remaining = index;
    let tagged_texts = node
        .lsx_nodes("TaggedTexts")
        .flat_map(|list| list.lsx_nodes("TaggedText"));
    for (position, tagged) in tagged_texts.enumerate() {
        let count = tagged
            .lsx_nodes("TagTexts")
            .flat_map(|list| list.lsx_nodes("TagText"))
            .count();
        if remaining < count {
            return Some((position, remaining));
        }
        remaining -= count;
    }
    None
}

fn apply_line(node: &mut Element, index: usize, field: &LineField) -> EditOutcome {
    let Some((tagged_position, line_position)) = locate_line(node, index) else {
        return EditOutcome::NoTarget;
    };
    let Some(tagged) = tagged_texts_mut(node).nth(tagged_position) else {
        return EditOutcome::NoTarget;
    };

    match field {
        LineField::HasTagRule => {
            tagged.toggle_lsx_bool("HasTagRule");
            EditOutcome::Applied
        }
        LineField::Text(_) => EditOutcome::Ignored,
        LineField::Handle(_) | LineField::Version(_) | LineField::LineId(_) | LineField::Stub => {
            match tag_texts_mut(tagged).nth(line_position) {
                Some(tag_text) => {
                    write_tag_text_field(tag_text, field);
                    EditOutcome::Applied
                }
                None => EditOutcome::NoTarget,
            }
        }
    }
}

fn write_tag_text_field(tag_text: &mut Element, field: &LineField) {
    match field {
        LineField::Handle(handle) => {
            tag_text
                .ensure_lsx_attribute("TagText", "TranslatedString")
                .set_attr("handle", handle.trim());
        }
        LineField::Version(value) => {
            let version = value.trim().parse::<u16>().unwrap_or(1);
            tag_text
                .ensure_lsx_attribute("TagText", "TranslatedString")
                .set_attr("version", version.to_string());
        }
        LineField::LineId(value) => {
            tag_text.upsert_lsx_attribute("LineId", "guid", value.trim());
        }
        LineField::Stub => {
            tag_text.toggle_lsx_bool("stub");
        }
        LineField::HasTagRule | LineField::Text(_) => {}
    }
}

fn apply_flag(node: &mut Element, bucket: FlagBucket, index: usize, field: &FlagField) -> EditOutcome {
    let Some(group) = node
        .lsx_child_node_ignore_case_mut(bucket.node_id())
        .and_then(|container| container.nth_lsx_child_node_mut("flaggroup", index))
    else {
        return EditOutcome::NoTarget;
    };

    match field {
        FlagField::Type(value) => {
            group.upsert_lsx_attribute("type", "FixedString", value);
            EditOutcome::Applied
        }
        FlagField::Uuid(_) | FlagField::Value | FlagField::ParamVal(_) => match group.lsx_child_node_mut("flag") {
            Some(flag) => {
                write_flag_field(flag, field);
                EditOutcome::Applied
            }
            None => EditOutcome::NoTarget,
        },
    }
}

fn write_flag_field(flag: &mut Element, field: &FlagField) {
    match field {
        FlagField::Uuid(value) => {
            flag.upsert_lsx_attribute("UUID", "guid", value.trim());
        }
        FlagField::Value => {
            flag.toggle_lsx_bool("value");
        }
        FlagField::ParamVal(value) => {
            let paramval = value.trim().parse::<i32>().unwrap_or(0);
            flag.upsert_lsx_attribute("paramval", "int32", &paramval.to_string());
        }
        FlagField::Type(_) => {}
    }
}
