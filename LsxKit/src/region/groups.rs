//! Region to region-group classification

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Coarse family a region belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionGroup {
    Dialog,
    Gameplay,
    Assets,
    Meta,
    #[default]
    Unknown,
}

impl fmt::Display for RegionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RegionGroup::Dialog => "dialog",
            RegionGroup::Gameplay => "gameplay",
            RegionGroup::Assets => "assets",
            RegionGroup::Meta => "meta",
            RegionGroup::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

const DEFAULT_TABLE: &[(&str, RegionGroup)] = &[
    ("dialog", RegionGroup::Dialog),
    ("editorData", RegionGroup::Dialog),
    ("DialogBank", RegionGroup::Dialog),
    ("Flags", RegionGroup::Gameplay),
    ("Tags", RegionGroup::Gameplay),
    ("Origins", RegionGroup::Gameplay),
    ("Races", RegionGroup::Gameplay),
    ("ClassDescriptions", RegionGroup::Gameplay),
    ("Progressions", RegionGroup::Gameplay),
    ("ActionResourceDefinitions", RegionGroup::Gameplay),
    ("Feats", RegionGroup::Gameplay),
    ("Backgrounds", RegionGroup::Gameplay),
    ("Gods", RegionGroup::Gameplay),
    ("SpellLists", RegionGroup::Gameplay),
    ("Gossips", RegionGroup::Gameplay),
    ("Templates", RegionGroup::Gameplay),
    ("Quests", RegionGroup::Gameplay),
    ("MaterialBank", RegionGroup::Assets),
    ("TextureBank", RegionGroup::Assets),
    ("VisualBank", RegionGroup::Assets),
    ("EffectBank", RegionGroup::Assets),
    ("AnimationBank", RegionGroup::Assets),
    ("SkeletonBank", RegionGroup::Assets),
    ("PhysicsBank", RegionGroup::Assets),
    ("TimelineBank", RegionGroup::Assets),
    ("VirtualTextureBank", RegionGroup::Assets),
    ("Config", RegionGroup::Meta),
    ("MetaData", RegionGroup::Meta),
];

/// Substring vocabulary, checked group by group in this order.
const KEYWORDS: &[(RegionGroup, &[&str])] = &[
    (RegionGroup::Dialog, &["dialog", "timeline", "voice"]),
    (
        RegionGroup::Gameplay,
        &[
            "spell", "flag", "quest", "progression", "class", "race", "origin", "feat", "status",
            "passive", "template", "gossip",
        ],
    ),
    (
        RegionGroup::Assets,
        &[
            "texture", "material", "visual", "effect", "animation", "skeleton", "mesh", "physics",
            "sound", "bank",
        ],
    ),
    (RegionGroup::Meta, &["config", "meta", "dependenc", "module"]),
];

/// Lookup table from region id to [`RegionGroup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionGroupTable {
    exact: HashMap<String, RegionGroup>,
    folded: HashMap<String, RegionGroup>,
}

impl Default for RegionGroupTable {
    fn default() -> Self {
        let mut table = RegionGroupTable {
            exact: HashMap::new(),
            folded: HashMap::new(),
        };
        for (region, group) in DEFAULT_TABLE {
            table.insert(region, *group);
        }
        table
    }
}

impl RegionGroupTable {
    /// The built-in table with `overrides` applied on top.
    #[must_use]
    pub fn with_overrides(overrides: &BTreeMap<String, RegionGroup>) -> Self {
        let mut table = Self::default();
        for (region, group) in overrides {
            table.insert(region, *group);
        }
        table
    }

    /// Add or replace one mapping.
    pub fn insert(&mut self, region: &str, group: RegionGroup) {
        self.exact.insert(region.to_string(), group);
        self.folded.insert(region.to_lowercase(), group);
    }

    /// Classify a region: exact table entry, then case-insensitive entry, then keywords.
    #[must_use]
    pub fn group_of(&self, region: &str) -> RegionGroup {
        if let Some(group) = self.exact.get(region) {
            return *group;
        }
        let lower = region.to_lowercase();
        if let Some(group) = self.folded.get(&lower) {
            return *group;
        }
        KEYWORDS
            .iter()
            .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
            .map_or(RegionGroup::Unknown, |(group, _)| *group)
    }
}

/// Classify a region with the built-in table.
#[must_use]
pub fn region_group(region: &str) -> RegionGroup {
    RegionGroupTable::default().group_of(region)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_then_keywords() {
        let table = RegionGroupTable::default();
        assert_eq!(table.group_of("dialog"), RegionGroup::Dialog);
        assert_eq!(table.group_of("FLAGS"), RegionGroup::Gameplay);
        assert_eq!(table.group_of("CharacterVisualBank"), RegionGroup::Assets);
        assert_eq!(table.group_of("TimelineContent"), RegionGroup::Dialog);
        assert_eq!(table.group_of("ModuleInfo"), RegionGroup::Meta);
        assert_eq!(table.group_of("Something"), RegionGroup::Unknown);
    }

    #[test]
    fn test_table_entry_beats_keyword() {
        // "TimelineBank" would match the dialog keyword "timeline".
        assert_eq!(region_group("TimelineBank"), RegionGroup::Assets);
    }

    #[test]
    fn test_overrides() {
        let mut overrides = BTreeMap::new();
        overrides.insert("Flags".to_string(), RegionGroup::Meta);
        overrides.insert("Custom".to_string(), RegionGroup::Dialog);
        let table = RegionGroupTable::with_overrides(&overrides);
        assert_eq!(table.group_of("flags"), RegionGroup::Meta);
        assert_eq!(table.group_of("Custom"), RegionGroup::Dialog);
    }

    #[test]
    fn test_group_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RegionGroup::Gameplay).unwrap(), "\"gameplay\"");
        assert_eq!(RegionGroup::Assets.to_string(), "assets");
    }
}
