//! Field-level edits of dialog documents
//!
//! Edits mutate the canonical tree in place and leave everything they do not
//! address untouched. New attribute children are prepended to their node;
//! existing ones only get their value (or extended fields) updated.
//!
//! ```no_run
//! use lsxkit::edit::{EditCommand, HeaderField, apply_edit};
//! use lsxkit::formats::lsx::{ParseLimits, WriteOptions, read_lsx, write_lsx};
//!
//! let mut tree = read_lsx("dialog.lsx", &ParseLimits::default())?;
//! apply_edit(
//!     &mut tree,
//!     &EditCommand::Header {
//!         node_uuid: "a1b2...".to_string(),
//!         field: HeaderField::Root,
//!     },
//! );
//! write_lsx(&tree, "dialog.lsx", &WriteOptions::default())?;
//! # Ok::<(), lsxkit::Error>(())
//! ```

mod apply;
mod command;

pub use apply::{EditOutcome, EditReport, apply_edit, apply_edits, split_uuid_list};
pub use command::{
    CLEAR_CHILDREN, EditCommand, EditRequest, FlagField, HeaderField, LineField, TargetKind,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::{FlagBucket, child_uuids, find_nodes_container};
    use crate::formats::lsx::{Element, ParseLimits, WriteOptions, parse_lsx, serialize_lsx};
    use pretty_assertions::assert_eq;

    const DIALOG: &str = r#"<save><region id="dialog"><node id="dialog"><children><node id="nodes"><children>
        <node id="node">
            <attribute id="UUID" type="FixedString" value="A"/>
            <attribute id="constructor" type="FixedString" value="TagQuestion"/>
            <children>
                <node id="checkflags"><children>
                    <node id="flaggroup">
                        <attribute id="type" type="FixedString" value="Local"/>
                        <children><node id="flag">
                            <attribute id="UUID" type="FixedString" value="f-1"/>
                            <attribute id="value" type="bool" value="True"/>
                        </node></children>
                    </node>
                </children></node>
                <node id="TaggedTexts"><children>
                    <node id="TaggedText">
                        <attribute id="HasTagRule" type="bool" value="False"/>
                        <children><node id="TagTexts"><children>
                            <node id="TagText">
                                <attribute id="TagText" type="TranslatedString" handle="h-old" version="1"/>
                            </node>
                        </children></node></children>
                    </node>
                </children></node>
            </children>
        </node>
        <node id="node"><attribute id="UUID" type="FixedString" value="B"/></node>
    </children></node></children></node></region></save>"#;

    fn tree() -> Element {
        parse_lsx(DIALOG.as_bytes(), &ParseLimits::default()).unwrap()
    }

    fn node<'a>(tree: &'a Element, uuid: &str) -> &'a Element {
        find_nodes_container(tree)
            .unwrap()
            .lsx_nodes("node")
            .find(|n| n.lsx_value("UUID") == Some(uuid))
            .unwrap()
    }

    fn header(uuid: &str, field: HeaderField) -> EditCommand {
        EditCommand::Header {
            node_uuid: uuid.to_string(),
            field,
        }
    }

    #[test]
    fn test_header_edits() {
        let mut tree = tree();
        assert_eq!(
            apply_edit(&mut tree, &header("B", HeaderField::Speaker("x".into()))),
            EditOutcome::Applied
        );
        assert_eq!(apply_edit(&mut tree, &header("B", HeaderField::EndNode)), EditOutcome::Applied);
        apply_edit(&mut tree, &header("A", HeaderField::Constructor("TagAnswer".into())));

        let b = node(&tree, "B");
        assert_eq!(b.lsx_value("speaker"), Some("0"));
        assert_eq!(b.lsx_value("endnode"), Some("True"));
        // Created attributes go in front of existing ones.
        assert_eq!(b.children()[0].attr("id"), Some("endnode"));
        assert_eq!(b.children()[2].attr("id"), Some("UUID"));

        let a = node(&tree, "A");
        assert_eq!(a.lsx_value("constructor"), Some("TagAnswer"));
        assert_eq!(a.children()[1].attr("id"), Some("constructor"));
    }

    #[test]
    fn test_unknown_node_is_no_target() {
        let mut tree = tree();
        let before = tree.clone();
        assert_eq!(apply_edit(&mut tree, &header("Z", HeaderField::Root)), EditOutcome::NoTarget);
        assert_eq!(tree, before);
    }

    #[test]
    fn test_line_edits() {
        let mut tree = tree();
        let line = |field| EditCommand::Line {
            node_uuid: "A".to_string(),
            index: 0,
            field,
        };
        apply_edit(&mut tree, &line(LineField::Handle("h-new".into())));
        apply_edit(&mut tree, &line(LineField::Version("oops".into())));
        apply_edit(&mut tree, &line(LineField::LineId("line-1".into())));
        apply_edit(&mut tree, &line(LineField::HasTagRule));
        apply_edit(&mut tree, &line(LineField::Stub));
        assert_eq!(
            apply_edit(&mut tree, &line(LineField::Text("ignored".into()))),
            EditOutcome::Ignored
        );

        let a = node(&tree, "A");
        let tagged = a
            .lsx_child_node("TaggedTexts")
            .and_then(|t| t.lsx_child_node("TaggedText"))
            .unwrap();
        assert_eq!(tagged.lsx_value("HasTagRule"), Some("True"));
        let tag_text = tagged
            .lsx_child_node("TagTexts")
            .and_then(|t| t.lsx_child_node("TagText"))
            .unwrap();
        let attribute = tag_text.lsx_attribute_child("TagText").unwrap();
        assert_eq!(attribute.attr("handle"), Some("h-new"));
        assert_eq!(attribute.attr("version"), Some("1"));
        assert_eq!(attribute.attr("value"), None);
        assert_eq!(tag_text.lsx_value("LineId"), Some("line-1"));
        assert_eq!(tag_text.lsx_value("stub"), Some("True"));

        let missing = EditCommand::Line {
            node_uuid: "A".to_string(),
            index: 1,
            field: LineField::Stub,
        };
        assert_eq!(apply_edit(&mut tree, &missing), EditOutcome::NoTarget);
    }

    #[test]
    fn test_flag_edits() {
        let mut tree = tree();
        let flag = |index, field| EditCommand::Flag {
            node_uuid: "A".to_string(),
            bucket: FlagBucket::Checkflags,
            index,
            field,
        };
        let report = apply_edits(
            &mut tree,
            &[
                flag(0, FlagField::Type("Global".into())),
                flag(0, FlagField::Uuid("f-2".into())),
                flag(0, FlagField::Value),
                flag(0, FlagField::ParamVal("two".into())),
                flag(1, FlagField::Value),
            ],
        );
        assert_eq!(report, EditReport { applied: 4, skipped: 1 });

        let group = node(&tree, "A")
            .lsx_child_node("checkflags")
            .and_then(|c| c.lsx_child_node("flaggroup"))
            .unwrap();
        assert_eq!(group.lsx_value("type"), Some("Global"));
        let flag = group.lsx_child_node("flag").unwrap();
        assert_eq!(flag.lsx_value("UUID"), Some("f-2"));
        assert_eq!(flag.lsx_value("value"), Some("False"));
        assert_eq!(flag.lsx_value("paramval"), Some("0"));
        assert_eq!(flag.children()[0].attr("type"), Some("int32"));
    }

    #[test]
    fn test_children_replace_creates_scaffold() {
        let mut tree = tree();
        let edit = EditCommand::Children {
            node_uuid: "B".to_string(),
            uuids: "X; Y,\n Z".to_string(),
        };
        assert_eq!(apply_edit(&mut tree, &edit), EditOutcome::Applied);
        let uuids: Vec<_> = child_uuids(node(&tree, "B")).collect();
        assert_eq!(uuids, ["X", "Y", "Z"]);

        let bytes = serialize_lsx(&tree, &WriteOptions::compact()).unwrap();
        let xml = String::from_utf8(bytes).unwrap();
        assert!(xml.contains(
            r#"<node id="children"><children><node id="child"><attribute id="UUID" type="guid" value="X"/></node>"#
        ));
    }

    #[test]
    fn test_split_uuid_list() {
        assert_eq!(split_uuid_list(" a,,b ;c\td "), ["a", "b", "c", "d"]);
        assert!(split_uuid_list(" ; ").is_empty());
    }
}
