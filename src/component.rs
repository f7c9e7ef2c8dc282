//! Component types - the catalog entry model
//!
//! Every snippet in the catalog is a [`Component`] tagged with one of three
//! granularity tiers:
//! - `Atom`: a single control (button, input, badge)
//! - `Molecule`: a small composition of atoms (search bar, card header)
//! - `Organism`: a full section (hero, pricing table, navbar)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Granularity tier of a component snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Atom,
    Molecule,
    Organism,
}

impl Category {
    /// Get the string representation of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Atom => "atom",
            Category::Molecule => "molecule",
            Category::Organism => "organism",
        }
    }

    /// Get all categories
    pub fn all() -> &'static [Category] {
        &[Category::Atom, Category::Molecule, Category::Organism]
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        let singular = wanted.strip_suffix('s').unwrap_or(&wanted);
        Category::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == singular)
            .ok_or_else(|| Error::InvalidCategory(s.to_string()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Accessibility annotations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct A11y {
    /// ARIA roles the markup exposes
    pub roles: Vec<String>,
    /// ARIA attributes the markup sets
    pub aria_attributes: Vec<String>,
    /// Human description of keyboard navigation
    pub keyboard_nav: String,
    /// Foreground/background contrast ratio (e.g. 4.5). Non-finite ratios are
    /// stored as JSON `null` and read back as 0.
    #[serde(deserialize_with = "ratio_or_zero")]
    pub contrast_ratio: f64,
    pub focus_visible: bool,
    pub reduced_motion: bool,
}

fn ratio_or_zero<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

/// SEO annotations. Only present on components that render content landmarks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Seo {
    pub semantic_element: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
}

impl Default for Seo {
    fn default() -> Self {
        Self {
            semantic_element: "div".to_string(),
            heading_level: None,
            landmark: None,
        }
    }
}

/// Responsive behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Responsive {
    pub strategy: String,
    pub breakpoints: Vec<String>,
}

impl Default for Responsive {
    fn default() -> Self {
        Self {
            strategy: "mobile-first".to_string(),
            breakpoints: Vec::new(),
        }
    }
}

/// Craft notes that keep a snippet from looking generic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Quality {
    pub anti_generic: Vec<String>,
    pub craft_details: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspiration: Option<String>,
}

/// A component snippet in the catalog.
///
/// The JSON shape (camelCase) is the ingest contract: every field is required
/// except `css` and `seo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// Unique catalog key
    pub id: String,
    pub name: String,
    pub category: Category,
    /// Free-form classifier, e.g. "button"
    #[serde(rename = "type")]
    pub kind: String,
    /// Free-form sub-classifier, e.g. "ghost"
    pub variant: String,
    pub tags: Vec<String>,
    pub mood: Vec<String>,
    pub industry: Vec<String>,
    pub visual_styles: Vec<String>,
    /// Markup body, stored verbatim
    pub jsx: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css: Option<String>,
    /// Semantic role name -> class list
    pub tailwind_classes: BTreeMap<String, String>,
    pub a11y: A11y,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<Seo>,
    pub responsive: Responsive,
    pub quality: Quality,
}

impl Component {
    /// Create a component with the required scalar fields and empty metadata
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        kind: impl Into<String>,
        variant: impl Into<String>,
        jsx: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            kind: kind.into(),
            variant: variant.into(),
            tags: Vec::new(),
            mood: Vec::new(),
            industry: Vec::new(),
            visual_styles: Vec::new(),
            jsx: jsx.into(),
            css: None,
            tailwind_classes: BTreeMap::new(),
            a11y: A11y::default(),
            seo: None,
            responsive: Responsive::default(),
            quality: Quality::default(),
        }
    }

    /// Builder: set tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set moods
    pub fn with_mood<I, S>(mut self, mood: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mood = mood.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set industries
    pub fn with_industry<I, S>(mut self, industry: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.industry = industry.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set visual styles
    pub fn with_visual_styles<I, S>(mut self, styles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.visual_styles = styles.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: add one tailwind role mapping
    pub fn with_tailwind(mut self, role: impl Into<String>, classes: impl Into<String>) -> Self {
        self.tailwind_classes.insert(role.into(), classes.into());
        self
    }
}
