//! SQLite storage implementation

use std::path::{Path, PathBuf};
use rusqlite::{Connection, OptionalExtension, params};
use crate::{Error, Result};
use crate::component::{Category, Component};
use crate::vocabulary::Vocabulary;
use super::schema;

/// SQLite-backed storage for the component catalog
pub struct ComponentStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl ComponentStore {
    /// Open a database file (creates it and its directory if missing)
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        let store = Self {
            conn,
            path: Some(path.to_path_buf()),
        };
        store.apply_pragmas()?;
        store.initialize_schema()?;
        tracing::debug!("Opened component store at {}", path.display());
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn, path: None };
        store.apply_pragmas()?;
        store.initialize_schema()?;
        Ok(store)
    }

    /// Release the connection, surfacing any error from SQLite
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| Error::Storage(e))
    }

    /// Backing file, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    fn apply_pragmas(&self) -> Result<()> {
        self.conn.pragma_update(None, "foreign_keys", "ON")?;
        // In-memory databases answer "memory" here
        let mode: String = self
            .conn
            .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        self.conn.pragma_update(None, "synchronous", "NORMAL")?;
        tracing::debug!("journal_mode = {}", mode);
        Ok(())
    }

    /// Initialize the database schema and stamp the schema version
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(&stmt, [])?;
        }
        set_meta(&self.conn, schema::META_SCHEMA_VERSION, schema::SCHEMA_VERSION)?;
        Ok(())
    }

    // ========== Ingest ==========

    /// Load snippets into the catalog inside one transaction.
    ///
    /// Each snippet fully replaces any existing row with the same id,
    /// including its term sets and tailwind roles. Nothing is written unless
    /// every snippet succeeds.
    pub fn seed(&self, snippets: &[Component]) -> Result<SeedReport> {
        let tx = self.conn.unchecked_transaction()?;

        let mut links = 0;
        let mut roles = 0;
        for snippet in snippets {
            let (l, r) = write_component(&tx, snippet)?;
            links += l;
            roles += r;
        }

        set_meta(&tx, schema::META_SEEDED, "true")?;
        set_meta(&tx, schema::META_SEED_COUNT, &snippets.len().to_string())?;
        tx.commit()?;

        tracing::info!(
            "Seeded {} components ({} term links, {} tailwind roles)",
            snippets.len(),
            links,
            roles
        );
        Ok(SeedReport {
            components: snippets.len(),
            term_links: links,
            tailwind_roles: roles,
        })
    }

    /// Insert or fully replace a single component
    pub fn upsert(&self, snippet: &Component) -> Result<()> {
        self.seed(std::slice::from_ref(snippet))?;
        Ok(())
    }

    /// Delete a component. Returns true if a row was removed.
    ///
    /// Join and role rows cascade; vocabulary terms are kept.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let removed = self.conn.execute("DELETE FROM components WHERE id = ?1", [id])?;
        if removed > 0 {
            tracing::info!("Deleted component {}", id);
        }
        Ok(removed > 0)
    }

    /// Delete all catalog data and seed markers. The schema version is kept.
    pub fn reset(&self) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        for vocab in Vocabulary::all() {
            tx.execute(&format!("DELETE FROM {}", vocab.join_table()), [])?;
            tx.execute(&format!("DELETE FROM {}", vocab.term_table()), [])?;
        }
        tx.execute("DELETE FROM tailwind_classes", [])?;
        tx.execute("DELETE FROM components", [])?;
        tx.execute(
            "DELETE FROM meta WHERE key != ?1",
            [schema::META_SCHEMA_VERSION],
        )?;
        tx.commit()?;
        Ok(())
    }

    // ========== Meta ==========

    /// True once any seed transaction has committed
    pub fn is_seeded(&self) -> Result<bool> {
        Ok(get_meta(&self.conn, schema::META_SEEDED)?.as_deref() == Some("true"))
    }

    /// Number of snippets written by the last seed call
    pub fn seed_count(&self) -> Result<Option<usize>> {
        Ok(get_meta(&self.conn, schema::META_SEED_COUNT)?.and_then(|v| v.parse().ok()))
    }

    pub fn schema_version(&self) -> Result<Option<String>> {
        get_meta(&self.conn, schema::META_SCHEMA_VERSION)
    }

    // ========== Lookups ==========

    /// Count all components
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM components", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// All component ids, sorted
    pub fn all_ids(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT id FROM components ORDER BY id")?;
        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(ids)
    }

    /// Ids of components in one category, sorted
    pub fn ids_by_category(&self, category: Category) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM components WHERE category = ?1 ORDER BY id")?;
        let ids = stmt
            .query_map([category.as_str()], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(ids)
    }

    /// Get a fully hydrated component by id
    pub fn get_by_id(&self, id: &str) -> Result<Component> {
        self.hydrate(&[id.to_string()])?
            .pop()
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Every component, hydrated in batch
    pub fn get_all(&self) -> Result<Vec<Component>> {
        let ids = self.all_ids()?;
        self.hydrate(&ids)
    }

    /// Every component in one category, hydrated in batch
    pub fn get_by_category(&self, category: Category) -> Result<Vec<Component>> {
        let ids = self.ids_by_category(category)?;
        self.hydrate(&ids)
    }

    /// Known terms of one vocabulary kind, including orphaned ones
    pub fn vocabulary_terms(&self, vocab: Vocabulary) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT name FROM {} ORDER BY name", vocab.term_table()))?;
        let terms = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(terms)
    }

    /// Get catalog statistics
    pub fn stats(&self) -> Result<CatalogStats> {
        let mut terms = Vec::with_capacity(Vocabulary::all().len());
        for vocab in Vocabulary::all() {
            let n: i64 = self.conn.query_row(
                &format!("SELECT COUNT(*) FROM {}", vocab.term_table()),
                [],
                |row| row.get(0),
            )?;
            terms.push((*vocab, n as usize));
        }

        Ok(CatalogStats {
            components: self.count()?,
            terms,
            seeded: self.is_seeded()?,
            seed_count: self.seed_count()?,
        })
    }
}

/// Write one component and its related rows. Returns (term links, roles).
fn write_component(conn: &Connection, snippet: &Component) -> Result<(usize, usize)> {
    let a11y = serde_json::to_string(&snippet.a11y)?;
    let seo = snippet.seo.as_ref().map(serde_json::to_string).transpose()?;
    let responsive = serde_json::to_string(&snippet.responsive)?;
    let quality = serde_json::to_string(&snippet.quality)?;

    conn.prepare_cached(
        r#"
        INSERT INTO components (id, name, category, type, variant, jsx, css, a11y, seo, responsive, quality)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
        ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            category = excluded.category,
            type = excluded.type,
            variant = excluded.variant,
            jsx = excluded.jsx,
            css = excluded.css,
            a11y = excluded.a11y,
            seo = excluded.seo,
            responsive = excluded.responsive,
            quality = excluded.quality
        "#,
    )?
    .execute(params![
        snippet.id,
        snippet.name,
        snippet.category.as_str(),
        snippet.kind,
        snippet.variant,
        snippet.jsx,
        snippet.css,
        a11y,
        seo,
        responsive,
        quality,
    ])?;

    // Replace, not merge: drop whatever the previous version linked
    for vocab in Vocabulary::all() {
        conn.prepare_cached(&format!("DELETE FROM {} WHERE component_id = ?1", vocab.join_table()))?
            .execute([&snippet.id])?;
    }
    conn.prepare_cached("DELETE FROM tailwind_classes WHERE component_id = ?1")?
        .execute([&snippet.id])?;

    let mut links = 0;
    for vocab in Vocabulary::all() {
        let mut insert_term = conn.prepare_cached(&format!(
            "INSERT OR IGNORE INTO {} (name) VALUES (?1)",
            vocab.term_table()
        ))?;
        let mut insert_link = conn.prepare_cached(&format!(
            "INSERT OR IGNORE INTO {} (component_id, name) VALUES (?1, ?2)",
            vocab.join_table()
        ))?;
        for term in vocab.terms(snippet) {
            insert_term.execute([term])?;
            links += insert_link.execute(params![snippet.id, term])?;
        }
    }

    let mut insert_role = conn.prepare_cached(
        "INSERT OR REPLACE INTO tailwind_classes (component_id, role, classes) VALUES (?1, ?2, ?3)",
    )?;
    for (role, classes) in &snippet.tailwind_classes {
        insert_role.execute(params![snippet.id, role, classes])?;
    }

    Ok((links, snippet.tailwind_classes.len()))
}

fn set_meta(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO meta (key, value) VALUES (?1, ?2) ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

fn get_meta(conn: &Connection, key: &str) -> Result<Option<String>> {
    conn.query_row("SELECT value FROM meta WHERE key = ?1", [key], |row| row.get(0))
        .optional()
        .map_err(Into::into)
}

/// Outcome of a seed call
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SeedReport {
    pub components: usize,
    pub term_links: usize,
    pub tailwind_roles: usize,
}

/// Catalog statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct CatalogStats {
    pub components: usize,
    pub terms: Vec<(Vocabulary, usize)>,
    pub seeded: bool,
    pub seed_count: Option<usize>,
}

impl std::fmt::Display for CatalogStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Catalog Statistics:")?;
        writeln!(f, "  Components: {}", self.components)?;
        for (vocab, n) in &self.terms {
            writeln!(f, "  {} terms: {}", vocab, n)?;
        }
        match self.seed_count {
            Some(n) if self.seeded => write!(f, "  Seeded: yes (last seed: {} components)", n),
            _ => write!(f, "  Seeded: no"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{A11y, Quality};

    fn sample(id: &str, kind: &str) -> Component {
        Component::new(id, id.to_uppercase(), Category::Atom, kind, "solid", "<div/>")
            .with_tags(["cta"])
            .with_mood(["calm"])
            .with_industry(["fintech"])
            .with_visual_styles(["flat"])
            .with_tailwind("button", "px-4 py-2")
    }

    #[test]
    fn test_seed_and_count() {
        let store = ComponentStore::open_in_memory().unwrap();
        assert!(!store.is_seeded().unwrap());

        let report = store.seed(&[sample("a", "button"), sample("b", "card")]).unwrap();
        assert_eq!(report.components, 2);
        assert_eq!(report.term_links, 8);
        assert_eq!(store.count().unwrap(), 2);
        assert!(store.is_seeded().unwrap());
        assert_eq!(store.seed_count().unwrap(), Some(2));
    }

    #[test]
    fn test_empty_seed_is_noop() {
        let store = ComponentStore::open_in_memory().unwrap();
        let report = store.seed(&[]).unwrap();
        assert_eq!(report.components, 0);
        assert_eq!(store.count().unwrap(), 0);
        assert_eq!(store.seed_count().unwrap(), Some(0));
    }

    #[test]
    fn test_vocabulary_deduplicated() {
        let store = ComponentStore::open_in_memory().unwrap();
        store.seed(&[sample("a", "button"), sample("b", "button")]).unwrap();
        assert_eq!(store.vocabulary_terms(Vocabulary::Mood).unwrap(), vec!["calm"]);
    }

    #[test]
    fn test_upsert_replaces_sets() {
        let store = ComponentStore::open_in_memory().unwrap();
        store.seed(&[sample("a", "button")]).unwrap();

        let mut replacement = Component::new("a", "Renamed", Category::Molecule, "card", "outline", "<section/>")
            .with_mood(["bold"])
            .with_tailwind("icon", "w-4 h-4");
        replacement.a11y = A11y {
            roles: vec!["region".into()],
            ..A11y::default()
        };
        store.upsert(&replacement).unwrap();

        assert_eq!(store.count().unwrap(), 1);
        let got = store.get_by_id("a").unwrap();
        assert_eq!(got.name, "Renamed");
        assert_eq!(got.category, Category::Molecule);
        assert_eq!(got.mood, vec!["bold"]);
        assert!(got.tags.is_empty());
        assert!(got.industry.is_empty());
        assert_eq!(got.tailwind_classes.len(), 1);
        assert_eq!(got.tailwind_classes["icon"], "w-4 h-4");

        // Old terms stay in the vocabulary
        assert!(store.vocabulary_terms(Vocabulary::Mood).unwrap().contains(&"calm".to_string()));
    }

    #[test]
    fn test_delete() {
        let store = ComponentStore::open_in_memory().unwrap();
        store.seed(&[sample("a", "button"), sample("b", "card")]).unwrap();

        assert!(store.delete("a").unwrap());
        assert!(!store.delete("a").unwrap());
        assert_eq!(store.count().unwrap(), 1);
        assert!(matches!(store.get_by_id("a"), Err(Error::NotFound(_))));

        // Join rows cascade with the component
        let links: i64 = store
            .conn()
            .query_row("SELECT COUNT(*) FROM component_moods WHERE component_id = 'a'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(links, 0);
    }

    #[test]
    fn test_failed_seed_rolls_back() {
        let store = ComponentStore::open_in_memory().unwrap();
        store.seed(&[sample("a", "button")]).unwrap();

        // Make the second write fail half way through the batch
        store
            .conn()
            .execute_batch(
                "CREATE TRIGGER reject_boom BEFORE INSERT ON components
                 WHEN NEW.id = 'boom' BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
            )
            .unwrap();

        let result = store.seed(&[sample("b", "card"), sample("boom", "card")]);
        assert!(result.is_err());
        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(store.seed_count().unwrap(), Some(1));
    }

    #[test]
    fn test_by_category() {
        let store = ComponentStore::open_in_memory().unwrap();
        let mut organism = sample("hero", "hero");
        organism.category = Category::Organism;
        store.seed(&[sample("a", "button"), organism]).unwrap();

        let organisms = store.get_by_category(Category::Organism).unwrap();
        assert_eq!(organisms.len(), 1);
        assert_eq!(organisms[0].id, "hero");
        assert!(store.get_by_category(Category::Molecule).unwrap().is_empty());
    }

    #[test]
    fn test_reset() {
        let store = ComponentStore::open_in_memory().unwrap();
        store.seed(&[sample("a", "button")]).unwrap();
        store.reset().unwrap();

        assert_eq!(store.count().unwrap(), 0);
        assert!(!store.is_seeded().unwrap());
        assert!(store.vocabulary_terms(Vocabulary::Tag).unwrap().is_empty());
        assert_eq!(store.schema_version().unwrap().as_deref(), Some(schema::SCHEMA_VERSION));
    }

    #[test]
    fn test_metadata_round_trip() {
        let store = ComponentStore::open_in_memory().unwrap();
        let mut component = sample("a", "button");
        component.a11y = A11y {
            roles: vec!["button".into(), "switch".into()],
            aria_attributes: vec!["aria-pressed".into()],
            keyboard_nav: "Space toggles".into(),
            contrast_ratio: 7.1,
            focus_visible: true,
            reduced_motion: true,
        };
        component.quality = Quality {
            anti_generic: vec!["off-grid shadow".into()],
            craft_details: vec!["optical kerning".into()],
            inspiration: Some("Swiss posters".into()),
        };
        component.css = Some(".x { color: red }".into());
        store.upsert(&component).unwrap();

        assert_eq!(store.get_by_id("a").unwrap(), component);
    }

    #[test]
    fn test_stats_display() {
        let store = ComponentStore::open_in_memory().unwrap();
        store.seed(&[sample("a", "button")]).unwrap();
        let stats = store.stats().unwrap();
        assert_eq!(stats.components, 1);
        assert!(stats.terms.iter().all(|(_, n)| *n == 1));
        assert!(stats.to_string().contains("Components: 1"));
    }

    #[test]
    fn test_open_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("rag.sqlite");

        let store = ComponentStore::open(&path).unwrap();
        store.seed(&[sample("a", "button")]).unwrap();
        store.close().unwrap();

        let reopened = ComponentStore::open(&path).unwrap();
        assert_eq!(reopened.count().unwrap(), 1);
        assert!(reopened.is_seeded().unwrap());
    }
}
