//! Batch hydration of components
//!
//! Rebuilds full [`Component`] values for a list of ids with one query per
//! table per chunk instead of one query per id. Chunks stay below SQLite's
//! bound-parameter ceiling.

use std::collections::{HashMap, HashSet};
use rusqlite::{Connection, params_from_iter};
use crate::Result;
use crate::component::{A11y, Component, Quality, Responsive, Seo};
use crate::vocabulary::Vocabulary;
use super::decode::{decode_or, decode_optional_or};
use super::sqlite::ComponentStore;

/// Largest number of ids bound into one `IN (...)` list
pub const MAX_BOUND_PARAMS: usize = 900;

impl ComponentStore {
    /// Hydrate components for `ids`.
    ///
    /// Output follows the first occurrence of each id in `ids`; ids with no
    /// component row are skipped. Term collections come back sorted.
    pub fn hydrate(&self, ids: &[String]) -> Result<Vec<Component>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut seen = HashSet::with_capacity(ids.len());
        let unique: Vec<&str> = ids
            .iter()
            .map(String::as_str)
            .filter(|id| seen.insert(*id))
            .collect();

        let conn = self.conn();
        let mut components: HashMap<String, Component> = HashMap::with_capacity(unique.len());
        let mut chunks = 0;

        for chunk in unique.chunks(MAX_BOUND_PARAMS) {
            chunks += 1;
            let marks = placeholders(chunk.len());
            fetch_core(conn, chunk, &marks, &mut components)?;
            for vocab in Vocabulary::all() {
                fetch_terms(conn, *vocab, chunk, &marks, &mut components)?;
            }
            fetch_tailwind(conn, chunk, &marks, &mut components)?;
        }

        let hydrated: Vec<Component> = unique
            .iter()
            .filter_map(|id| components.remove(*id))
            .map(|mut component| {
                for vocab in Vocabulary::all() {
                    vocab.terms_mut(&mut component).sort();
                }
                component
            })
            .collect();

        tracing::debug!(
            "Hydrated {}/{} components in {} chunk(s)",
            hydrated.len(),
            unique.len(),
            chunks
        );
        Ok(hydrated)
    }
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

fn fetch_core(
    conn: &Connection,
    chunk: &[&str],
    marks: &str,
    out: &mut HashMap<String, Component>,
) -> Result<()> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, name, category, type, variant, jsx, css, a11y, seo, responsive, quality
         FROM components WHERE id IN ({marks})"
    ))?;

    let rows = stmt.query_map(params_from_iter(chunk.iter()), row_to_component)?;
    for row in rows {
        match row {
            Ok(component) => {
                out.insert(component.id.clone(), component);
            }
            Err(e @ rusqlite::Error::FromSqlConversionFailure(..)) => {
                tracing::warn!("Skipping unreadable component row: {}", e);
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

fn fetch_terms(
    conn: &Connection,
    vocab: Vocabulary,
    chunk: &[&str],
    marks: &str,
    out: &mut HashMap<String, Component>,
) -> Result<()> {
    let mut stmt = conn.prepare(&format!(
        "SELECT component_id, name FROM {} WHERE component_id IN ({marks})",
        vocab.join_table()
    ))?;

    let mut rows = stmt.query(params_from_iter(chunk.iter()))?;
    while let Some(row) = rows.next()? {
        let id: String = row.get(0)?;
        let name: String = row.get(1)?;
        // Rows without a component are stale and ignored
        if let Some(component) = out.get_mut(&id) {
            vocab.terms_mut(component).push(name);
        }
    }
    Ok(())
}

fn fetch_tailwind(
    conn: &Connection,
    chunk: &[&str],
    marks: &str,
    out: &mut HashMap<String, Component>,
) -> Result<()> {
    let mut stmt = conn.prepare(&format!(
        "SELECT component_id, role, classes FROM tailwind_classes WHERE component_id IN ({marks})"
    ))?;

    let mut rows = stmt.query(params_from_iter(chunk.iter()))?;
    while let Some(row) = rows.next()? {
        let id: String = row.get(0)?;
        if let Some(component) = out.get_mut(&id) {
            component.tailwind_classes.insert(row.get(1)?, row.get(2)?);
        }
    }
    Ok(())
}

/// Helper to convert a core row to a Component with empty term sets
fn row_to_component(row: &rusqlite::Row) -> rusqlite::Result<Component> {
    let id: String = row.get(0)?;
    let category_str: String = row.get(2)?;
    let category = category_str.parse().map_err(|e: crate::Error| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let a11y: String = row.get(7)?;
    let seo: Option<String> = row.get(8)?;
    let responsive: String = row.get(9)?;
    let quality: String = row.get(10)?;

    Ok(Component {
        name: row.get(1)?,
        category,
        kind: row.get(3)?,
        variant: row.get(4)?,
        tags: Vec::new(),
        mood: Vec::new(),
        industry: Vec::new(),
        visual_styles: Vec::new(),
        jsx: row.get(5)?,
        css: row.get(6)?,
        tailwind_classes: Default::default(),
        a11y: decode_or(&a11y, "a11y", &id, A11y::default),
        seo: decode_optional_or(seo.as_deref(), "seo", &id, Seo::default),
        responsive: decode_or(&responsive, "responsive", &id, Responsive::default),
        quality: decode_or(&quality, "quality", &id, Quality::default),
        id,
    })
}
