//! Database schema definitions

use crate::vocabulary::Vocabulary;

/// Version stamped into `meta` on every open
pub const SCHEMA_VERSION: &str = "1";

/// Meta keys
pub const META_SCHEMA_VERSION: &str = "schema_version";
pub const META_SEEDED: &str = "seeded";
pub const META_SEED_COUNT: &str = "seed_count";

/// SQL to create the components table
///
/// Structured metadata (a11y, seo, responsive, quality) is stored as JSON text.
pub const CREATE_COMPONENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS components (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    category TEXT NOT NULL,
    type TEXT NOT NULL,
    variant TEXT NOT NULL,
    jsx TEXT NOT NULL,
    css TEXT,
    a11y TEXT NOT NULL,
    seo TEXT,
    responsive TEXT NOT NULL,
    quality TEXT NOT NULL
)
"#;

/// SQL to create the tailwind role map
pub const CREATE_TAILWIND_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS tailwind_classes (
    component_id TEXT NOT NULL REFERENCES components(id) ON DELETE CASCADE,
    role TEXT NOT NULL,
    classes TEXT NOT NULL,
    PRIMARY KEY (component_id, role)
)
"#;

/// SQL to create the meta key/value table
pub const CREATE_META_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
"#;

/// SQL to create indexes on the core tables
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_components_type ON components(type)",
    "CREATE INDEX IF NOT EXISTS idx_components_category ON components(category)",
    "CREATE INDEX IF NOT EXISTS idx_tailwind_component ON tailwind_classes(component_id)",
];

/// Term table, join table and lookup index for one vocabulary kind
fn vocabulary_statements(vocab: Vocabulary) -> [String; 3] {
    let terms = vocab.term_table();
    let join = vocab.join_table();
    [
        format!("CREATE TABLE IF NOT EXISTS {terms} (name TEXT PRIMARY KEY)"),
        format!(
            "CREATE TABLE IF NOT EXISTS {join} (
                component_id TEXT NOT NULL REFERENCES components(id) ON DELETE CASCADE,
                name TEXT NOT NULL REFERENCES {terms}(name),
                PRIMARY KEY (component_id, name)
            )"
        ),
        format!("CREATE INDEX IF NOT EXISTS idx_{join}_name ON {join}(name)"),
    ]
}

/// All schema creation statements, in dependency order
pub fn all_schema_statements() -> Vec<String> {
    let mut stmts: Vec<String> = vec![
        CREATE_COMPONENTS_TABLE.to_string(),
        CREATE_TAILWIND_TABLE.to_string(),
        CREATE_META_TABLE.to_string(),
    ];
    for vocab in Vocabulary::all() {
        stmts.extend(vocabulary_statements(*vocab));
    }
    stmts.extend(CREATE_INDEXES.iter().map(|s| s.to_string()));
    stmts
}
