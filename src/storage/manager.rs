//! Store lifecycle owner
//!
//! `StoreManager` holds at most one open [`ComponentStore`] for a configured
//! path. Callers construct it once at startup and pass it (or the store it
//! hands out) to whatever needs the catalog.

use std::path::{Path, PathBuf};
use crate::Result;
use crate::index::{NoopIndex, VectorIndex};
use super::sqlite::ComponentStore;

pub struct StoreManager {
    path: PathBuf,
    store: Option<ComponentStore>,
    index: Box<dyn VectorIndex>,
}

impl StoreManager {
    /// Manage the database at `path`. Nothing is opened until [`open`](Self::open).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            store: None,
            index: Box::new(NoopIndex),
        }
    }

    /// Manage the default database under a project root
    pub fn for_project(root: &Path) -> Self {
        Self::new(crate::config::default_database_path_in(root))
    }

    /// Run `index` every time a new connection is opened
    pub fn with_vector_index(mut self, index: impl VectorIndex + 'static) -> Self {
        self.index = Box::new(index);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.store.is_some()
    }

    /// Return the open store, opening it first if needed
    pub fn open(&mut self) -> Result<&ComponentStore> {
        let store = match self.store.take() {
            Some(store) => store,
            None => {
                let store = ComponentStore::open(&self.path)?;
                if let Err(e) = self.index.initialize(&store) {
                    tracing::warn!("Vector index '{}' failed to initialize: {}", self.index.name(), e);
                }
                store
            }
        };
        let store: &ComponentStore = self.store.insert(store);
        Ok(store)
    }

    /// Close the open store, if any. A later `open` creates a new connection.
    pub fn close(&mut self) -> Result<()> {
        if let Some(store) = self.store.take() {
            store.close()?;
            tracing::debug!("Closed component store at {}", self.path.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Category, Component};
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingIndex(Rc<Cell<usize>>);

    impl VectorIndex for CountingIndex {
        fn name(&self) -> &str {
            "counting"
        }

        fn initialize(&self, _store: &ComponentStore) -> Result<()> {
            self.0.set(self.0.get() + 1);
            Ok(())
        }
    }

    struct FailingIndex;

    impl VectorIndex for FailingIndex {
        fn name(&self) -> &str {
            "failing"
        }

        fn initialize(&self, _store: &ComponentStore) -> Result<()> {
            Err(crate::Error::NotFound("model".into()))
        }
    }

    #[test]
    fn test_open_is_reused_until_closed() {
        let dir = tempfile::tempdir().unwrap();
        let calls = Rc::new(Cell::new(0));
        let mut manager = StoreManager::for_project(dir.path())
            .with_vector_index(CountingIndex(calls.clone()));

        assert!(!manager.is_open());
        manager.open().unwrap();
        manager.open().unwrap();
        assert_eq!(calls.get(), 1);
        assert!(manager.path().ends_with(".uiforge/rag.sqlite"));

        manager.close().unwrap();
        assert!(!manager.is_open());
        manager.open().unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = StoreManager::new(dir.path().join("rag.sqlite"));

        let store = manager.open().unwrap();
        store
            .upsert(&Component::new("a", "A", Category::Atom, "button", "solid", "<button/>"))
            .unwrap();
        manager.close().unwrap();

        assert_eq!(manager.open().unwrap().count().unwrap(), 1);
    }

    #[test]
    fn test_index_failure_does_not_fail_open() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = StoreManager::new(dir.path().join("rag.sqlite")).with_vector_index(FailingIndex);
        assert!(manager.open().is_ok());
    }

    #[test]
    fn test_open_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"file").unwrap();

        let mut manager = StoreManager::new(blocker.join("rag.sqlite"));
        assert!(manager.open().is_err());
        assert!(!manager.is_open());
    }
}
