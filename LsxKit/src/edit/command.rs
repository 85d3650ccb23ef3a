//! Edit commands and their wire form

use serde::{Deserialize, Serialize};

use crate::dialog::FlagBucket;
use crate::error::Error;

/// A single identity-addressed edit of a dialog tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Field on the dialog node itself
    Header { node_uuid: String, field: HeaderField },
    /// Replace the whole child list; `uuids` is split on commas, semicolons or whitespace
    Children { node_uuid: String, uuids: String },
    /// Field of the `index`-th text line, counted across all `TaggedText` entries
    Line {
        node_uuid: String,
        index: usize,
        field: LineField,
    },
    /// Field of the `index`-th flag group of a bucket
    Flag {
        node_uuid: String,
        bucket: FlagBucket,
        index: usize,
        field: FlagField,
    },
}

impl EditCommand {
    /// UUID of the dialog node the edit addresses.
    #[must_use]
    pub fn node_uuid(&self) -> &str {
        match self {
            EditCommand::Header { node_uuid, .. }
            | EditCommand::Children { node_uuid, .. }
            | EditCommand::Line { node_uuid, .. }
            | EditCommand::Flag { node_uuid, .. } => node_uuid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderField {
    Constructor(String),
    /// Parsed as an integer; unparsable input writes 0.
    Speaker(String),
    Root,
    EndNode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineField {
    Handle(String),
    /// Parsed as an integer; unparsable input writes 1.
    Version(String),
    LineId(String),
    HasTagRule,
    Stub,
    /// Localized text is not stored in the dialog document; this edit is a no-op.
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagField {
    Type(String),
    Uuid(String),
    Value,
    /// Parsed as an integer; unparsable input writes 0.
    ParamVal(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Header,
    Children,
    Line,
    Flag,
}

/// Request value that empties a child list.
pub const CLEAR_CHILDREN: &str = "[]";

/// Edit as sent by an editor front-end
///
/// ```json
/// {"targetKind": "flag", "nodeUuid": "...", "bucket": "setflags", "index": 0, "field": "paramval", "value": "2"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    pub target_kind: TargetKind,
    pub node_uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(default)]
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<FlagBucket>,
}

impl EditRequest {
    fn require_value(&self) -> Result<String, Error> {
        self.value
            .clone()
            .ok_or_else(|| self.invalid(&format!("field '{}' needs a value", self.field)))
    }

    fn require_index(&self) -> Result<usize, Error> {
        self.index
            .ok_or_else(|| self.invalid("an index is required"))
    }

    fn invalid(&self, message: &str) -> Error {
        Error::InvalidEdit(format!("{:?} edit of node {}: {}", self.target_kind, self.node_uuid, message))
    }
}

impl TryFrom<EditRequest> for EditCommand {
    type Error = Error;

    fn try_from(request: EditRequest) -> Result<Self, Self::Error> {
        if request.node_uuid.trim().is_empty() {
            return Err(request.invalid("nodeUuid is empty"));
        }
        let field = request.field.to_ascii_lowercase();

        let command = match request.target_kind {
            TargetKind::Header => {
                let field = match field.as_str() {
                    "constructor" => HeaderField::Constructor(request.require_value()?),
                    "speaker" => HeaderField::Speaker(request.require_value()?),
                    "root" => HeaderField::Root,
                    "endnode" => HeaderField::EndNode,
                    _ => return Err(request.invalid(&format!("unknown field '{}'", request.field))),
                };
                EditCommand::Header {
                    node_uuid: request.node_uuid,
                    field,
                }
            }
            TargetKind::Children => {
                let value = request.require_value()?;
                let uuids = if value.trim() == CLEAR_CHILDREN {
                    String::new()
                } else {
                    value
                };
                EditCommand::Children {
                    node_uuid: request.node_uuid,
                    uuids,
                }
            }
            TargetKind::Line => {
                let index = request.require_index()?;
                let field = match field.as_str() {
                    "handle" => LineField::Handle(request.require_value()?),
                    "version" => LineField::Version(request.require_value()?),
                    "lineid" => LineField::LineId(request.require_value()?),
                    "hastagrule" => LineField::HasTagRule,
                    "stub" => LineField::Stub,
                    "text" => LineField::Text(request.value.clone().unwrap_or_default()),
                    _ => return Err(request.invalid(&format!("unknown field '{}'", request.field))),
                };
                EditCommand::Line {
                    node_uuid: request.node_uuid,
                    index,
                    field,
                }
            }
            TargetKind::Flag => {
                let index = request.require_index()?;
                let bucket = request
                    .bucket
                    .ok_or_else(|| request.invalid("a bucket is required"))?;
                let field = match field.as_str() {
                    "type" => FlagField::Type(request.require_value()?),
                    "uuid" => FlagField::Uuid(request.require_value()?),
                    "value" => FlagField::Value,
                    "paramval" => FlagField::ParamVal(request.require_value()?),
                    _ => return Err(request.invalid(&format!("unknown field '{}'", request.field))),
                };
                EditCommand::Flag {
                    node_uuid: request.node_uuid,
                    bucket,
                    index,
                    field,
                }
            }
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> Result<EditCommand, Error> {
        let request: EditRequest = serde_json::from_str(json).unwrap();
        EditCommand::try_from(request)
    }

    #[test]
    fn test_header_requests() {
        assert_eq!(
            request(r#"{"targetKind":"header","nodeUuid":"A","field":"root"}"#).unwrap(),
            EditCommand::Header {
                node_uuid: "A".to_string(),
                field: HeaderField::Root
            }
        );
        assert!(matches!(
            request(r#"{"targetKind":"header","nodeUuid":"A","field":"constructor"}"#),
            Err(Error::InvalidEdit(_))
        ));
    }

    #[test]
    fn test_flag_request_needs_bucket_and_index() {
        let ok = request(
            r#"{"targetKind":"flag","nodeUuid":"A","bucket":"setflags","index":1,"field":"paramVal","value":"2"}"#,
        )
        .unwrap();
        assert_eq!(
            ok,
            EditCommand::Flag {
                node_uuid: "A".to_string(),
                bucket: FlagBucket::Setflags,
                index: 1,
                field: FlagField::ParamVal("2".to_string())
            }
        );
        assert!(request(r#"{"targetKind":"flag","nodeUuid":"A","index":0,"field":"value"}"#).is_err());
        assert!(
            request(r#"{"targetKind":"flag","nodeUuid":"A","bucket":"checkflags","field":"value"}"#).is_err()
        );
    }

    #[test]
    fn test_line_and_children_requests() {
        assert_eq!(
            request(r#"{"targetKind":"line","nodeUuid":"A","index":0,"field":"lineId","value":"l"}"#)
                .unwrap(),
            EditCommand::Line {
                node_uuid: "A".to_string(),
                index: 0,
                field: LineField::LineId("l".to_string())
            }
        );
        assert_eq!(
            request(r#"{"targetKind":"children","nodeUuid":"A","field":"children","value":"X, Y"}"#)
                .unwrap()
                .node_uuid(),
            "A"
        );
        assert!(request(r#"{"targetKind":"line","nodeUuid":"","index":0,"field":"stub"}"#).is_err());
    }

    #[test]
    fn test_children_request_needs_explicit_value() {
        assert!(matches!(
            request(r#"{"targetKind":"children","nodeUuid":"A"}"#),
            Err(Error::InvalidEdit(_))
        ));
        assert_eq!(
            request(r#"{"targetKind":"children","nodeUuid":"A","value":" [] "}"#).unwrap(),
            EditCommand::Children {
                node_uuid: "A".to_string(),
                uuids: String::new()
            }
        );
    }
}
