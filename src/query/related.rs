//! Relationship discovery
//!
//! Two components are related when they share at least one mood or one
//! industry term.

use rusqlite::named_params;
use crate::Result;
use crate::component::Component;
use crate::storage::ComponentStore;
use crate::vocabulary::Vocabulary;

/// Default cap on related components
pub const DEFAULT_RELATED_LIMIT: usize = 10;

/// Vocabulary kinds that make two components related
const RELATING_KINDS: &[Vocabulary] = &[Vocabulary::Mood, Vocabulary::Industry];

pub struct RelationshipFinder<'a> {
    store: &'a ComponentStore,
    limit: usize,
}

impl<'a> RelationshipFinder<'a> {
    pub fn new(store: &'a ComponentStore) -> Self {
        Self {
            store,
            limit: DEFAULT_RELATED_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Ids of components related to `id`, sorted, never including `id`
    pub fn related_ids(&self, id: &str) -> Result<Vec<String>> {
        let branches: Vec<String> = RELATING_KINDS
            .iter()
            .map(|vocab| {
                let join = vocab.join_table();
                format!(
                    "SELECT DISTINCT other.component_id FROM {join} src
                     JOIN {join} other ON other.name = src.name
                     WHERE src.component_id = :id AND other.component_id != :id"
                )
            })
            .collect();

        // Stale join rows are excluded by requiring a live component
        let sql = format!(
            "SELECT component_id FROM ({})
             WHERE component_id IN (SELECT id FROM components)
             ORDER BY component_id LIMIT {}",
            branches.join(" UNION "),
            self.limit
        );

        let mut stmt = self.store.conn().prepare(&sql)?;
        let ids = stmt
            .query_map(named_params! { ":id": id }, |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(ids)
    }

    /// Components related to `id`, hydrated in batch
    pub fn related(&self, id: &str) -> Result<Vec<Component>> {
        let ids = self.related_ids(id)?;
        tracing::debug!("Found {} components related to {}", ids.len(), id);
        self.store.hydrate(&ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Category;

    fn component(id: &str, mood: &[&str], industry: &[&str]) -> Component {
        Component::new(id, id, Category::Molecule, "card", "flat", "<article/>")
            .with_mood(mood.iter().copied())
            .with_industry(industry.iter().copied())
            .with_tags(["shared-tag"])
    }

    #[test]
    fn test_related_by_mood_or_industry() {
        let store = ComponentStore::open_in_memory().unwrap();
        store
            .seed(&[
                component("src", &["calm"], &["fintech"]),
                component("same-mood", &["calm"], &["health"]),
                component("same-industry", &["bold"], &["fintech"]),
                component("both", &["calm"], &["fintech"]),
                component("tag-only", &["bold"], &["health"]),
            ])
            .unwrap();

        let related: Vec<_> = RelationshipFinder::new(&store)
            .related("src")
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(related, vec!["both", "same-industry", "same-mood"]);
    }

    #[test]
    fn test_never_includes_self_and_caps() {
        let store = ComponentStore::open_in_memory().unwrap();
        let mut all = vec![component("src", &["calm"], &[])];
        all.extend((0..15).map(|i| component(&format!("peer-{i:02}"), &["calm"], &[])));
        store.seed(&all).unwrap();

        let ids = RelationshipFinder::new(&store).related_ids("src").unwrap();
        assert_eq!(ids.len(), DEFAULT_RELATED_LIMIT);
        assert!(!ids.contains(&"src".to_string()));
    }

    #[test]
    fn test_deleted_components_are_not_related() {
        let store = ComponentStore::open_in_memory().unwrap();
        store
            .seed(&[component("src", &["calm"], &[]), component("gone", &["calm"], &[])])
            .unwrap();
        store.delete("gone").unwrap();

        assert!(RelationshipFinder::new(&store).related("src").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_id_has_no_relations() {
        let store = ComponentStore::open_in_memory().unwrap();
        store.seed(&[component("a", &["calm"], &[])]).unwrap();
        assert!(RelationshipFinder::new(&store).related("nope").unwrap().is_empty());
    }
}
