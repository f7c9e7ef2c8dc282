//! Query engine implementation
//!
//! Compiles a [`QueryCriteria`] into a single ranked SQL statement:
//! - each present criterion adds a weighted `CASE` term to the score column
//! - `type` and `variant` also add a filter to the `WHERE` clause
//! - rows scoring zero are dropped, the rest sorted by score
//!
//! All values are bound as named parameters, so the order in which terms are
//! emitted has no bearing on binding.

use std::collections::HashMap;
use rusqlite::ToSql;
use crate::Result;
use crate::component::Component;
use crate::storage::ComponentStore;
use crate::vocabulary::Vocabulary;
use super::criteria::{QueryCriteria, weights};

/// Default cap on ranked results
pub const DEFAULT_RESULT_LIMIT: usize = 20;

/// A ranked id
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScoredId {
    pub id: String,
    pub score: i64,
}

/// A ranked, hydrated component
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RankedComponent {
    pub component: Component,
    pub score: i64,
}

/// Query engine for ranked component retrieval
pub struct QueryEngine<'a> {
    store: &'a ComponentStore,
    limit: usize,
}

impl<'a> QueryEngine<'a> {
    /// Create a new query engine
    pub fn new(store: &'a ComponentStore) -> Self {
        Self {
            store,
            limit: DEFAULT_RESULT_LIMIT,
        }
    }

    /// Override the result cap
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Rank component ids for `criteria`, best first.
    ///
    /// Ties are broken by id. Empty criteria rank nothing.
    pub fn rank(&self, criteria: &QueryCriteria) -> Result<Vec<ScoredId>> {
        let Some(query) = ScoreQuery::compile(criteria, self.limit) else {
            return Ok(Vec::new());
        };
        tracing::debug!(sql = %query.sql, params = query.params.len(), "ranking components");

        let named: Vec<(&str, &dyn ToSql)> = query
            .params
            .iter()
            .map(|(name, value)| (*name, value as &dyn ToSql))
            .collect();

        let mut stmt = self.store.conn().prepare(&query.sql)?;
        let ranked = stmt
            .query_map(named.as_slice(), |row| {
                Ok(ScoredId {
                    id: row.get(0)?,
                    score: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(ranked)
    }

    /// Rank and hydrate, keeping rank order
    pub fn search(&self, criteria: &QueryCriteria) -> Result<Vec<RankedComponent>> {
        let ranked = self.rank(criteria)?;
        let ids: Vec<String> = ranked.iter().map(|r| r.id.clone()).collect();
        let scores: HashMap<String, i64> = ranked.into_iter().map(|r| (r.id, r.score)).collect();

        let results = self
            .store
            .hydrate(&ids)?
            .into_iter()
            .map(|component| RankedComponent {
                score: scores.get(&component.id).copied().unwrap_or_default(),
                component,
            })
            .collect();
        Ok(results)
    }
}

/// A compiled ranking statement and its named parameters
struct ScoreQuery {
    sql: String,
    params: Vec<(&'static str, String)>,
}

impl ScoreQuery {
    fn compile(criteria: &QueryCriteria, limit: usize) -> Option<Self> {
        let mut builder = ScoreBuilder::default();

        if let Some(kind) = &criteria.kind {
            builder.text_match("c.type", ":type", ":type_like", kind, weights::TYPE_EXACT, weights::TYPE_PARTIAL);
        }
        if let Some(variant) = &criteria.variant {
            builder.text_match(
                "c.variant",
                ":variant",
                ":variant_like",
                variant,
                weights::VARIANT_EXACT,
                weights::VARIANT_PARTIAL,
            );
        }
        if let Some(category) = &criteria.category {
            let p = builder.bind(":category", category.as_str());
            builder
                .terms
                .push(format!("CASE WHEN c.category = {p} THEN {} ELSE 0 END", weights::CATEGORY));
        }
        if let Some(mood) = &criteria.mood {
            let p = builder.bind(":mood", mood);
            builder.terms.push(format!(
                "CASE WHEN {} THEN {} ELSE 0 END",
                has_term(Vocabulary::Mood, p),
                weights::MOOD
            ));
        }
        if let Some(industry) = &criteria.industry {
            let p = builder.bind(":industry", industry);
            let general = builder.bind(":industry_general", weights::GENERAL_INDUSTRY);
            builder.terms.push(format!(
                "CASE WHEN {} THEN {} WHEN {} THEN {} ELSE 0 END",
                has_term(Vocabulary::Industry, p),
                weights::INDUSTRY,
                has_term(Vocabulary::Industry, general),
                weights::INDUSTRY_GENERAL
            ));
        }
        if let Some(style) = &criteria.style {
            let p = builder.bind(":style", style);
            builder.terms.push(format!(
                "CASE WHEN {} THEN {} ELSE 0 END",
                has_term(Vocabulary::VisualStyle, p),
                weights::STYLE
            ));
        }

        if builder.terms.is_empty() {
            return None;
        }

        let filter = if builder.filters.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", builder.filters.join(" AND "))
        };
        let sql = format!(
            "SELECT id, score FROM (
                SELECT c.id AS id, ({}) AS score FROM components c {filter}
            ) WHERE score > 0 ORDER BY score DESC, id ASC LIMIT {limit}",
            builder.terms.join(" + ")
        );

        Some(Self {
            sql,
            params: builder.params,
        })
    }
}

#[derive(Default)]
struct ScoreBuilder {
    terms: Vec<String>,
    filters: Vec<String>,
    params: Vec<(&'static str, String)>,
}

impl ScoreBuilder {
    /// Record a parameter value and hand back its placeholder
    fn bind(&mut self, name: &'static str, value: impl Into<String>) -> &'static str {
        self.params.push((name, value.into()));
        name
    }

    /// Exact-or-substring match on a text column: scores and filters
    fn text_match(
        &mut self,
        column: &str,
        exact: &'static str,
        like: &'static str,
        value: &str,
        exact_weight: i64,
        partial_weight: i64,
    ) {
        let exact = self.bind(exact, value);
        let like = self.bind(like, like_pattern(value));
        self.terms.push(format!(
            r"CASE WHEN {column} = {exact} THEN {exact_weight} WHEN {column} LIKE {like} ESCAPE '\' THEN {partial_weight} ELSE 0 END"
        ));
        self.filters
            .push(format!(r"({column} = {exact} OR {column} LIKE {like} ESCAPE '\')"));
    }
}

/// `EXISTS` test for a term on the current component
fn has_term(vocab: Vocabulary, param: &str) -> String {
    format!(
        "EXISTS (SELECT 1 FROM {} j WHERE j.component_id = c.id AND j.name = {param})",
        vocab.join_table()
    )
}

/// `%value%` with LIKE wildcards in `value` escaped
fn like_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
