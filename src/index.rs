//! Vector index seam
//!
//! Similarity search lives outside this crate. Whatever implements it is
//! handed the live store once per open so it can build or refresh its index
//! over the same component rows.

use crate::Result;
use crate::storage::ComponentStore;

/// Builds or refreshes an embedding index when a store is opened.
pub trait VectorIndex {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Called once per open. Errors are logged by the caller and otherwise ignored.
    fn initialize(&self, store: &ComponentStore) -> Result<()>;
}

/// Index that does nothing. The default when no similarity backend is wired in.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopIndex;

impl VectorIndex for NoopIndex {
    fn name(&self) -> &str {
        "noop"
    }

    fn initialize(&self, _store: &ComponentStore) -> Result<()> {
        Ok(())
    }
}
