//! Check/set flag extraction for dialog nodes
//!
//! ```xml
//! <node id="checkflags">
//!     <children>
//!         <node id="flaggroup">
//!             <attribute id="type" type="FixedString" value="Global"/>
//!             <children>
//!                 <node id="flag">
//!                     <attribute id="UUID" type="FixedString" value="..."/>
//!                     <attribute id="value" type="bool" value="True"/>
//!                     <attribute id="paramval" type="int32" value="1"/>
//!                 </node>
//!             </children>
//!         </node>
//!     </children>
//! </node>
//! ```

use super::speakers::SpeakerTable;
use super::types::{
    FlagBucket, FlagEntry, FlagTarget, InvalidParamIndex, NARRATOR_INDEX, NO_SPEAKER, Problems,
};
use crate::formats::lsx::Element;

/// Type of flags that sit directly in a bucket without a `flaggroup`.
pub const DEFAULT_FLAG_TYPE: &str = "Local";

/// Flags of one bucket, in document order.
pub(crate) fn read_bucket(
    node: &Element,
    node_uuid: &str,
    bucket: FlagBucket,
    speakers: &SpeakerTable,
    problems: &mut Problems,
) -> Vec<FlagEntry> {
    let Some(container) = node.lsx_nodes_ignore_case(bucket.node_id()).next() else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    let mut position = 0usize;
    for child in container.lsx_children() {
        let (flag_type, flags): (&str, Vec<&Element>) = match child.lsx_id() {
            Some(id) if id.eq_ignore_ascii_case("flaggroup") => (
                child
                    .lsx_value("type")
                    .filter(|t| !t.is_empty())
                    .unwrap_or(DEFAULT_FLAG_TYPE),
                child.lsx_nodes_ignore_case("flag").collect(),
            ),
            Some(id) if id.eq_ignore_ascii_case("flag") => (DEFAULT_FLAG_TYPE, vec![child]),
            _ => continue,
        };

        for flag in flags {
            let index = position;
            position += 1;

            let Some(uuid) = flag.lsx_value("UUID").map(str::trim).filter(|u| !u.is_empty()) else {
                continue;
            };
            let Some(value) = flag.lsx_bool("value") else {
                continue;
            };

            let raw = flag.lsx_value("paramval").map(str::trim).filter(|p| !p.is_empty());
            let paramval = raw.and_then(|p| p.parse::<i32>().ok());
            let target = match (raw, paramval) {
                (None, _) => FlagTarget::None,
                (Some(_), Some(p)) => resolve_target(p, speakers),
                (Some(_), None) => FlagTarget::Invalid,
            };
            if target == FlagTarget::Invalid {
                problems.flags.invalid_param_index.push(InvalidParamIndex {
                    node: node_uuid.to_string(),
                    bucket,
                    index,
                    paramval: raw.unwrap_or_default().to_string(),
                });
            }

            entries.push(FlagEntry {
                flag_type: flag_type.to_string(),
                uuid: uuid.to_string(),
                value,
                paramval,
                target,
            });
        }
    }
    entries
}

/// Resolve a `paramval` against the speaker table.
fn resolve_target(paramval: i32, speakers: &SpeakerTable) -> FlagTarget {
    match paramval {
        NARRATOR_INDEX => FlagTarget::Narrator,
        NO_SPEAKER => FlagTarget::None,
        index if index >= 0 => match speakers.lookup(index) {
            Some(mapping_id) => FlagTarget::Speaker {
                index,
                mapping_id: mapping_id.map(str::to_string),
            },
            None => FlagTarget::Invalid,
        },
        _ => FlagTarget::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::lsx::CHILDREN_TAG;

    fn flag(uuid: &str, value: &str, paramval: Option<&str>) -> Element {
        let mut flag = Element::lsx_node("flag")
            .with_child(Element::lsx_attribute("UUID", "FixedString", uuid))
            .with_child(Element::lsx_attribute("value", "bool", value));
        if let Some(p) = paramval {
            flag.push_child(Element::lsx_attribute("paramval", "int32", p));
        }
        flag
    }

    #[test]
    fn test_bare_and_grouped_flags() {
        let node = Element::lsx_node("node").with_child(
            Element::new(CHILDREN_TAG).with_child(
                Element::lsx_node("setflags").with_child(
                    Element::new(CHILDREN_TAG)
                        .with_child(flag("bare", "True", None))
                        .with_child(
                            Element::lsx_node("flaggroup")
                                .with_child(Element::lsx_attribute("type", "FixedString", "Global"))
                                .with_child(
                                    Element::new(CHILDREN_TAG)
                                        .with_child(flag("g1", "false", Some("-1")))
                                        .with_child(flag("", "True", None))
                                        .with_child(flag("g3", "maybe", None)),
                                ),
                        ),
                ),
            ),
        );

        let mut problems = Problems::default();
        let entries = read_bucket(
            &node,
            "n",
            FlagBucket::Setflags,
            &SpeakerTable::default(),
            &mut problems,
        );
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].flag_type, "Local");
        assert_eq!(entries[1].flag_type, "Global");
        assert!(!entries[1].value);
        assert_eq!(entries[1].target, FlagTarget::None);
        assert!(problems.is_empty());

        let checks = read_bucket(
            &node,
            "n",
            FlagBucket::Checkflags,
            &SpeakerTable::default(),
            &mut problems,
        );
        assert!(checks.is_empty());
    }

    #[test]
    fn test_unparsable_paramval_is_invalid() {
        let node = Element::lsx_node("node").with_child(
            Element::new(CHILDREN_TAG).with_child(
                Element::lsx_node("CheckFlags")
                    .with_child(Element::new(CHILDREN_TAG).with_child(flag("f", "True", Some("abc")))),
            ),
        );
        let mut problems = Problems::default();
        let entries = read_bucket(
            &node,
            "n",
            FlagBucket::Checkflags,
            &SpeakerTable::default(),
            &mut problems,
        );
        assert_eq!(entries[0].target, FlagTarget::Invalid);
        assert_eq!(problems.flags.invalid_param_index[0].paramval, "abc");
    }
}
