//! Speaker table and default addressed speakers

use std::collections::HashMap;

use super::types::{AddressedSpeaker, NARRATOR_INDEX, NARRATOR_MAPPING_ID, NO_SPEAKER, Speaker};
use crate::formats::lsx::Element;

/// Speakers declared in `speakerlist`, indexed for `paramval` and node lookups.
#[derive(Debug, Clone, Default)]
pub(crate) struct SpeakerTable {
    ordered: Vec<Speaker>,
    by_index: HashMap<i32, Option<String>>,
}

impl SpeakerTable {
    /// Read `speakerlist -> speaker` entries. Entries without an integer `index` are skipped.
    pub(crate) fn from_dialog(dialog: &Element) -> Self {
        let mut table = SpeakerTable::default();
        let Some(list) = dialog.lsx_child_node("speakerlist") else {
            return table;
        };

        for speaker in list.lsx_nodes("speaker") {
            let Some(index) = speaker.lsx_int("index") else {
                tracing::debug!("Skipping speaker without a valid index");
                continue;
            };
            if table.by_index.contains_key(&index) {
                continue;
            }
            let mapping_id = speaker
                .lsx_value("SpeakerMappingId")
                .filter(|v| !v.is_empty())
                .map(str::to_string);
            table.by_index.insert(index, mapping_id.clone());
            table.ordered.push(Speaker { index, mapping_id });
        }
        table
    }

    /// Mapping id of a declared speaker; `None` when the index is not declared.
    pub(crate) fn lookup(&self, index: i32) -> Option<Option<&str>> {
        self.by_index.get(&index).map(Option::as_deref)
    }

    /// Whether a node speaker index needs no table entry or has one.
    pub(crate) fn is_mapped(&self, index: i32) -> bool {
        index == NO_SPEAKER || index == NARRATOR_INDEX || self.by_index.contains_key(&index)
    }

    /// Declared speakers followed by the narrator pseudo-speaker.
    pub(crate) fn into_speakers(self) -> Vec<Speaker> {
        let mut speakers = self.ordered;
        speakers.push(Speaker {
            index: NARRATOR_INDEX,
            mapping_id: Some(NARRATOR_MAPPING_ID.to_string()),
        });
        speakers
    }
}

/// `DefaultAddressedSpeakers -> Object` pairs of `MapKey`/`MapValue`.
pub(crate) fn default_addressed_speakers(dialog: &Element) -> Vec<AddressedSpeaker> {
    let Some(container) = dialog.lsx_child_node("DefaultAddressedSpeakers") else {
        return Vec::new();
    };
    container
        .lsx_nodes("Object")
        .filter_map(|object| {
            Some(AddressedSpeaker {
                from_index: object.lsx_int("MapKey")?,
                to_index: object.lsx_int("MapValue")?,
            })
        })
        .collect()
}
