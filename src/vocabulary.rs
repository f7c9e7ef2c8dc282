//! Vocabulary kinds - shared term sets attached to components
//!
//! Tags, moods, industries and visual styles are four structurally identical
//! many-to-many relations. Each kind owns a term table (`name` is the key) and
//! a join table keyed by `(component_id, name)`; all SQL that touches them is
//! derived from this enum.

use crate::component::Component;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Term set kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vocabulary {
    Tag,
    Mood,
    Industry,
    VisualStyle,
}

impl Vocabulary {
    /// Get the string representation of the vocabulary kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Vocabulary::Tag => "tag",
            Vocabulary::Mood => "mood",
            Vocabulary::Industry => "industry",
            Vocabulary::VisualStyle => "visual_style",
        }
    }

    /// Get all vocabulary kinds
    pub fn all() -> &'static [Vocabulary] {
        &[
            Vocabulary::Tag,
            Vocabulary::Mood,
            Vocabulary::Industry,
            Vocabulary::VisualStyle,
        ]
    }

    /// Table holding the deduplicated terms
    pub fn term_table(&self) -> &'static str {
        match self {
            Vocabulary::Tag => "tags",
            Vocabulary::Mood => "moods",
            Vocabulary::Industry => "industries",
            Vocabulary::VisualStyle => "visual_styles",
        }
    }

    /// Join table linking components to terms
    pub fn join_table(&self) -> &'static str {
        match self {
            Vocabulary::Tag => "component_tags",
            Vocabulary::Mood => "component_moods",
            Vocabulary::Industry => "component_industries",
            Vocabulary::VisualStyle => "component_visual_styles",
        }
    }

    /// Terms of this kind carried by a component
    pub fn terms<'a>(&self, component: &'a Component) -> &'a [String] {
        match self {
            Vocabulary::Tag => &component.tags,
            Vocabulary::Mood => &component.mood,
            Vocabulary::Industry => &component.industry,
            Vocabulary::VisualStyle => &component.visual_styles,
        }
    }

    /// Mutable access to the matching collection on a component
    pub fn terms_mut<'a>(&self, component: &'a mut Component) -> &'a mut Vec<String> {
        match self {
            Vocabulary::Tag => &mut component.tags,
            Vocabulary::Mood => &mut component.mood,
            Vocabulary::Industry => &mut component.industry,
            Vocabulary::VisualStyle => &mut component.visual_styles,
        }
    }
}

impl FromStr for Vocabulary {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tag" | "tags" => Ok(Vocabulary::Tag),
            "mood" | "moods" => Ok(Vocabulary::Mood),
            "industry" | "industries" => Ok(Vocabulary::Industry),
            "style" | "styles" | "visual_style" | "visual-style" | "visualstyles" => {
                Ok(Vocabulary::VisualStyle)
            }
            _ => Err(crate::Error::InvalidVocabulary(s.to_string())),
        }
    }
}

impl std::fmt::Display for Vocabulary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
