//! Query criteria and scoring weights

use serde::{Deserialize, Serialize};
use crate::component::Category;

/// Fixed scoring weights. Callers rely on the relative order these produce.
pub mod weights {
    pub const TYPE_EXACT: i64 = 10;
    pub const TYPE_PARTIAL: i64 = 5;
    pub const VARIANT_EXACT: i64 = 8;
    pub const VARIANT_PARTIAL: i64 = 4;
    pub const CATEGORY: i64 = 4;
    pub const MOOD: i64 = 6;
    pub const INDUSTRY: i64 = 5;
    pub const INDUSTRY_GENERAL: i64 = 2;
    pub const STYLE: i64 = 6;

    /// Industry term that earns the fallback score
    pub const GENERAL_INDUSTRY: &str = "general";
}

/// A sparse design request. Every field is optional; absent fields do not
/// contribute to the score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryCriteria {
    /// Component type; exact or substring match is required
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Variant; exact or substring match is required
    pub variant: Option<String>,
    pub category: Option<Category>,
    pub mood: Option<String>,
    pub industry: Option<String>,
    pub style: Option<String>,
}

impl QueryCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn mood(mut self, mood: impl Into<String>) -> Self {
        self.mood = Some(mood.into());
        self
    }

    pub fn industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
