//! # uiforge-rag - UI component retrieval engine
//!
//! Persistent catalog of reusable UI-component snippets with weighted
//! retrieval for design requests.
//!
//! uiforge-rag provides:
//! - A normalized SQLite schema for components and their shared vocabularies
//! - Atomic bulk ingest with full-replace upsert semantics
//! - Weighted multi-criteria ranking compiled into one SQL statement
//! - Relationship discovery over shared moods and industries
//! - Chunked batch hydration that never exceeds SQLite's parameter limit

pub mod component;
pub mod vocabulary;
pub mod storage;
pub mod query;
pub mod catalog;
pub mod index;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use component::{A11y, Category, Component, Quality, Responsive, Seo};
pub use vocabulary::Vocabulary;
pub use storage::{ComponentStore, StoreManager};
pub use query::{QueryCriteria, QueryEngine, RelationshipFinder};

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for catalog operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Component not found: {0}")]
    NotFound(String),

    #[error("Unknown category: {0}")]
    InvalidCategory(String),

    #[error("Unknown vocabulary kind: {0}")]
    InvalidVocabulary(String),

    #[error("Invalid catalog: {0}")]
    Catalog(String),
}
