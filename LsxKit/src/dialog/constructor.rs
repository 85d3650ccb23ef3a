//! Dialog node constructors

use serde::{Deserialize, Serialize};

/// Node constructor/type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeConstructor {
    TagAnswer,
    TagQuestion,
    ActiveRoll,
    PassiveRoll,
    Alias,
    VisualState,
    RollResult,
    TagCinematic,
    Trade,
    /// Children point into an externally resolved node namespace.
    Nested,
    NestedDialog,
    FallibleQuestionResult,
    Jump,
    Pop,
    TagGreeting,
    Other(String),
}

impl NodeConstructor {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "TagAnswer" => NodeConstructor::TagAnswer,
            "TagQuestion" => NodeConstructor::TagQuestion,
            "ActiveRoll" => NodeConstructor::ActiveRoll,
            "PassiveRoll" => NodeConstructor::PassiveRoll,
            "Alias" => NodeConstructor::Alias,
            "VisualState" | "Visual State" => NodeConstructor::VisualState,
            "RollResult" => NodeConstructor::RollResult,
            "TagCinematic" => NodeConstructor::TagCinematic,
            "Trade" => NodeConstructor::Trade,
            "NestedDialog" | "Nested Dialog" => NodeConstructor::NestedDialog,
            "FallibleQuestionResult" => NodeConstructor::FallibleQuestionResult,
            "Jump" => NodeConstructor::Jump,
            "Pop" => NodeConstructor::Pop,
            "TagGreeting" => NodeConstructor::TagGreeting,
            other if other.eq_ignore_ascii_case("Nested") => NodeConstructor::Nested,
            other => NodeConstructor::Other(other.to_string()),
        }
    }

    /// Whether this is one of the constructors the game defines.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, NodeConstructor::Other(_))
    }

    /// Whether child references of this node are nested rather than local.
    #[must_use]
    pub fn has_nested_children(&self) -> bool {
        matches!(self, NodeConstructor::Nested)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            NodeConstructor::TagAnswer => "TagAnswer",
            NodeConstructor::TagQuestion => "TagQuestion",
            NodeConstructor::ActiveRoll => "ActiveRoll",
            NodeConstructor::PassiveRoll => "PassiveRoll",
            NodeConstructor::Alias => "Alias",
            NodeConstructor::VisualState => "Visual State",
            NodeConstructor::RollResult => "RollResult",
            NodeConstructor::TagCinematic => "TagCinematic",
            NodeConstructor::Trade => "Trade",
            NodeConstructor::Nested => "Nested",
            NodeConstructor::NestedDialog => "NestedDialog",
            NodeConstructor::FallibleQuestionResult => "FallibleQuestionResult",
            NodeConstructor::Jump => "Jump",
            NodeConstructor::Pop => "Pop",
            NodeConstructor::TagGreeting => "TagGreeting",
            NodeConstructor::Other(s) => s,
        }
    }

    /// Returns a display-friendly name
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            NodeConstructor::TagAnswer => "Answer",
            NodeConstructor::TagQuestion => "Question",
            NodeConstructor::ActiveRoll => "Active Roll",
            NodeConstructor::PassiveRoll => "Passive Roll",
            NodeConstructor::Alias => "Alias",
            NodeConstructor::VisualState => "Visual State",
            NodeConstructor::RollResult => "Roll Result",
            NodeConstructor::TagCinematic => "Cinematic",
            NodeConstructor::Trade => "Trade",
            NodeConstructor::Nested => "Nested",
            NodeConstructor::NestedDialog => "Nested Dialog",
            NodeConstructor::FallibleQuestionResult => "Fallible Result",
            NodeConstructor::Jump => "Jump",
            NodeConstructor::Pop => "Pop",
            NodeConstructor::TagGreeting => "Greeting",
            NodeConstructor::Other(s) => s,
        }
    }
}
