use crate::query::RankedComponent;
use crate::storage::CatalogStats;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Tabled)]
pub struct ComponentRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    #[tabled(rename = "Id")]
    pub id: String,
    #[tabled(rename = "Type")]
    pub kind: String,
    #[tabled(rename = "Variant")]
    pub variant: String,
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Score")]
    pub score: String,
}

pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn stats_table(stats: &CatalogStats) -> String {
    let mut builder = TableBuilder::new();
    builder.add_row("Components", &stats.components.to_string());
    for (vocab, n) in &stats.terms {
        builder.add_row(&format!("{} terms", vocab), &n.to_string());
    }
    builder.add_row("Seeded", if stats.seeded { "yes" } else { "no" });
    if let Some(n) = stats.seed_count {
        builder.add_row("Last seed size", &n.to_string());
    }
    builder.build()
}

/// Ranked results; pass `None` scores for unranked listings
pub fn component_table<'a, I>(rows: I) -> String
where
    I: IntoIterator<Item = (&'a crate::Component, Option<i64>)>,
{
    let rows: Vec<ComponentRow> = rows
        .into_iter()
        .enumerate()
        .map(|(i, (c, score))| ComponentRow {
            rank: i + 1,
            id: c.id.clone(),
            kind: c.kind.clone(),
            variant: c.variant.clone(),
            category: c.category.to_string(),
            score: score.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    if rows.is_empty() {
        return String::new();
    }
    Table::new(&rows).with(Style::rounded()).to_string()
}

pub fn ranked_table(results: &[RankedComponent]) -> String {
    component_table(results.iter().map(|r| (&r.component, Some(r.score))))
}
