//! Text lines of a dialog node
//!
//! Lines live at `TaggedTexts -> TaggedText -> TagTexts -> TagText`. The handle
//! sits on the extended fields of the `TagText` attribute:
//!
//! ```xml
//! <node id="TagText">
//!     <attribute id="LineId" type="guid" value="..."/>
//!     <attribute id="TagText" type="TranslatedString" handle="h..." version="1"/>
//!     <attribute id="stub" type="bool" value="True"/>
//! </node>
//! ```

use super::types::TextLine;
use crate::formats::lsx::{ATTRIBUTE_TAG, Element};
use crate::localization::HandleMap;

/// Every `TagText` node of a dialog node, flattened across `TaggedText` entries.
pub fn tag_text_nodes(node: &Element) -> impl Iterator<Item = &Element> {
    node.lsx_nodes("TaggedTexts")
        .flat_map(|list| list.lsx_nodes("TaggedText"))
        .flat_map(|tagged| tagged.lsx_nodes("TagTexts"))
        .flat_map(|texts| texts.lsx_nodes("TagText"))
}

/// Read the lines of a node, resolving handles through `handles`.
pub(crate) fn read_lines(node: &Element, handles: &HandleMap) -> Vec<TextLine> {
    tag_text_nodes(node).map(|tag_text| read_line(tag_text, handles)).collect()
}

fn read_line(tag_text: &Element, handles: &HandleMap) -> TextLine {
    let (handle, inline, inline_version) = match tag_text.lsx_attribute_child("TagText") {
        Some(attribute) => (
            non_empty(attribute.attr("handle")),
            non_empty(attribute.attr("value")),
            attribute.attr("version"),
        ),
        None => legacy_fields(tag_text),
    };
    let mut version = inline_version.and_then(|v| v.trim().parse().ok());

    let text = match (inline, handle) {
        (Some(text), _) => Some(text.to_string()),
        (None, Some(handle)) => handles.get(handle).map(|entry| {
            version = version.or(entry.version);
            entry.text.clone()
        }),
        (None, None) => None,
    };

    TextLine {
        line_id: non_empty(tag_text.lsx_value("LineId")).map(str::to_string),
        handle: handle.map(str::to_string),
        text,
        version,
        stub: tag_text.lsx_bool("stub"),
    }
}

/// Older exports keep the handle on a nested `TranslatedString` element or on a
/// `handle`/`contentuid` attribute.
fn legacy_fields(tag_text: &Element) -> (Option<&str>, Option<&str>, Option<&str>) {
    let source = tag_text.descendants().skip(1).find(|el| {
        el.is_tag("TranslatedString")
            || (el.is_tag(ATTRIBUTE_TAG) && (el.attr("handle").is_some() || el.attr("contentuid").is_some()))
    });
    let Some(source) = source else {
        return (None, None, None);
    };
    (
        non_empty(source.attr("handle").or_else(|| source.attr("contentuid"))),
        non_empty(source.attr("value").or_else(|| source.text())),
        source.attr("version"),
    )
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::lsx::CHILDREN_TAG;
    use crate::localization::{LocalizedEntry, MergePolicy};

    fn wrap(id: &str, child: Element) -> Element {
        Element::lsx_node(id).with_child(Element::new(CHILDREN_TAG).with_child(child))
    }

    fn node_with(tag_text: Element) -> Element {
        Element::lsx_node("node").with_child(Element::new(CHILDREN_TAG).with_child(wrap(
            "TaggedTexts",
            wrap("TaggedText", wrap("TagTexts", tag_text)),
        )))
    }

    fn handles() -> HandleMap {
        let mut map = HandleMap::new();
        map.insert(
            "h1".to_string(),
            LocalizedEntry {
                text: "From map".to_string(),
                version: Some(4),
            },
            MergePolicy::LaterWins,
        );
        map
    }

    #[test]
    fn test_handle_resolves_through_map() {
        let tag_text = Element::lsx_node("TagText")
            .with_child(Element::lsx_attribute("LineId", "guid", "line-1"))
            .with_child(
                Element::new(ATTRIBUTE_TAG)
                    .with_attr("id", "TagText")
                    .with_attr("type", "TranslatedString")
                    .with_attr("handle", "H1"),
            )
            .with_child(Element::lsx_attribute("stub", "bool", "True"));
        let lines = read_lines(&node_with(tag_text), &handles());
        assert_eq!(
            lines,
            [TextLine {
                line_id: Some("line-1".to_string()),
                handle: Some("H1".to_string()),
                text: Some("From map".to_string()),
                version: Some(4),
                stub: Some(true),
            }]
        );
    }

    #[test]
    fn test_inline_text_wins() {
        let tag_text = Element::lsx_node("TagText").with_child(
            Element::new(ATTRIBUTE_TAG)
                .with_attr("id", "TagText")
                .with_attr("type", "TranslatedString")
                .with_attr("handle", "h1")
                .with_attr("version", "2")
                .with_attr("value", "Inline"),
        );
        let line = &read_lines(&node_with(tag_text), &handles())[0];
        assert_eq!(line.text.as_deref(), Some("Inline"));
        assert_eq!(line.version, Some(2));
    }

    #[test]
    fn test_legacy_shape_and_unresolved_handle() {
        let tag_text = Element::lsx_node("TagText")
            .with_child(Element::new("TranslatedString").with_attr("handle", "missing"));
        let line = &read_lines(&node_with(tag_text), &handles())[0];
        assert_eq!(line.handle.as_deref(), Some("missing"));
        assert_eq!(line.text, None);
    }
}
