//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - components(id, name, category, type, variant, jsx, css, a11y, seo, responsive, quality)
//! - tags / moods / industries / visual_styles(name)
//! - component_tags / component_moods / component_industries / component_visual_styles(component_id, name)
//! - tailwind_classes(component_id, role, classes)
//! - meta(key, value)

pub mod schema;
pub mod sqlite;
pub mod decode;
pub mod hydrate;
pub mod manager;

pub use sqlite::{ComponentStore, SeedReport, CatalogStats};
pub use hydrate::MAX_BOUND_PARAMS;
pub use manager::StoreManager;
