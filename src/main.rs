//! uiforge-rag CLI - Command-line interface for the UI component catalog

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uiforge_rag::catalog;
use uiforge_rag::config::{self, UiforgeConfig};
use uiforge_rag::query::{QueryCriteria, QueryEngine, RelationshipFinder};
use uiforge_rag::storage::{ComponentStore, StoreManager};
use uiforge_rag::ui::{self, theme, Icons, Spinner};
use uiforge_rag::{Category, Component, Vocabulary};

#[derive(Parser)]
#[command(name = "uiforge-rag")]
#[command(version)]
#[command(about = "UI component catalog - weighted retrieval of reusable snippets")]
#[command(long_about = r#"
uiforge-rag stores reusable UI-component snippets in a local SQLite catalog and
ranks them against design requests.

Example usage:
  uiforge-rag seed --file components.json
  uiforge-rag query --type button --mood calm --industry fintech
  uiforge-rag related btn-primary
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON instead of human-readable output
    #[arg(long, global = true)]
    json: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the database file (overrides config)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default uiforge.toml and ignore the data directory in git
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Load a catalog file into the store (one transaction)
    Seed {
        /// Catalog JSON file (defaults to `catalog` from the config)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Skip seeding when the store is already seeded
        #[arg(long)]
        if_empty: bool,
    },

    /// Rank components against a design request
    Query {
        #[arg(short = 't', long = "type")]
        kind: Option<String>,

        #[arg(long)]
        variant: Option<String>,

        #[arg(long, value_parser = category_values())]
        category: Option<String>,

        #[arg(short, long)]
        mood: Option<String>,

        #[arg(short, long)]
        industry: Option<String>,

        #[arg(short, long)]
        style: Option<String>,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show one component
    Get {
        id: String,
    },

    /// Components sharing a mood or industry with the given one
    Related {
        id: String,
    },

    /// List components, optionally by category
    List {
        #[arg(long, value_parser = category_values())]
        category: Option<String>,
    },

    /// Insert or replace components from a JSON file (object or array)
    Upsert {
        file: PathBuf,
    },

    /// Delete a component
    Delete {
        id: String,
    },

    /// List known terms of a vocabulary (tag, mood, industry, style)
    Terms {
        kind: String,
    },

    /// Show catalog statistics
    Stats,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stderr keeps --json output clean
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "info" }));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let root = std::env::current_dir()?;

    if let Commands::Init { force } = cli.command {
        return run_init(&root, cli.config.as_deref(), force, cli.json);
    }

    let config = config::load_config(cli.config.as_deref())?.unwrap_or_default();
    let database = config.database_path(&root, cli.database.as_deref());
    let mut manager = StoreManager::new(database);
    let store = manager.open()?;

    match cli.command {
        // Handled before the store is opened
        Commands::Init { .. } => {}

        Commands::Seed { file, if_empty } => {
            run_seed(store, &root, &config, file, if_empty, cli.json)?;
        }

        Commands::Query { kind, variant, category, mood, industry, style, limit } => {
            let criteria = QueryCriteria {
                kind,
                variant,
                category: category.as_deref().map(str::parse::<Category>).transpose()?,
                mood,
                industry,
                style,
            };
            let limit = limit
                .or(config.result_limit)
                .unwrap_or(uiforge_rag::query::DEFAULT_RESULT_LIMIT);

            let results = QueryEngine::new(store).with_limit(limit).search(&criteria)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else if results.is_empty() {
                println!("{} No components matched.", Icons::CROSS);
            } else {
                println!("{} {} match(es)", Icons::SEARCH, results.len());
                println!("{}", ui::ranked_table(&results));
            }
        }

        Commands::Get { id } => {
            let component = store.get_by_id(&id)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&component)?);
            } else {
                print_component(&component);
            }
        }

        Commands::Related { id } => {
            // Surface a missing source as not-found rather than an empty list
            store.get_by_id(&id)?;
            let related = RelationshipFinder::new(store).related(&id)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&related)?);
            } else if related.is_empty() {
                println!("{} Nothing shares a mood or industry with {}.", Icons::CROSS, id);
            } else {
                println!("{} Related to {}:", Icons::LINK, id.bold());
                println!("{}", ui::component_table(related.iter().map(|c| (c, None))));
            }
        }

        Commands::List { category } => {
            let components = match category {
                Some(c) => store.get_by_category(c.parse()?)?,
                None => store.get_all()?,
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&components)?);
            } else if components.is_empty() {
                println!("∅ Catalog is empty.");
            } else {
                println!("{}", ui::component_table(components.iter().map(|c| (c, None))));
            }
        }

        Commands::Upsert { file } => {
            let components = catalog::parse_components(&std::fs::read_to_string(&file)?)?;
            // One transaction for the whole batch, seed_count tracks its size
            store.seed(&components)?;
            if cli.json {
                let ids: Vec<&str> = components.iter().map(|c| c.id.as_str()).collect();
                println!("{}", serde_json::json!({ "upserted": ids }));
            } else {
                ui::success(&format!("Upserted {} component(s)", components.len()));
            }
        }

        Commands::Delete { id } => {
            let removed = store.delete(&id)?;
            if cli.json {
                println!("{}", serde_json::json!({ "id": id, "deleted": removed }));
            } else if removed {
                println!("{} Deleted {}", Icons::DEL, id);
            } else {
                ui::warn(&format!("No component with id {}", id));
            }
        }

        Commands::Terms { kind } => {
            let vocab: Vocabulary = kind.parse()?;
            let terms = store.vocabulary_terms(vocab)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&terms)?);
            } else {
                ui::section(&format!("{} terms ({})", vocab, terms.len()));
                for term in terms {
                    println!("  {}", term);
                }
            }
        }

        Commands::Stats => {
            let stats = store.stats()?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("{} Catalog Statistics ({})", Icons::STATS, manager_path(store));
                println!("{}", ui::stats_table(&stats));
            }
        }
    }

    manager.close()?;
    Ok(())
}

fn category_values() -> clap::builder::PossibleValuesParser {
    clap::builder::PossibleValuesParser::new(Category::all().iter().map(Category::as_str))
}

fn run_init(root: &Path, config_path: Option<&Path>, force: bool, json: bool) -> anyhow::Result<()> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.join(config::default_config_path()));
    let config = UiforgeConfig {
        database: Some(".uiforge/rag.sqlite".to_string()),
        catalog: Some("components.json".to_string()),
        result_limit: Some(uiforge_rag::query::DEFAULT_RESULT_LIMIT),
    };

    config::write_config(&path, &config, force)?;
    config::ensure_gitignore(root)?;

    if json {
        println!("{}", serde_json::json!({ "config": path }));
    } else {
        ui::success(&format!("Wrote {}", path.display()));
    }
    Ok(())
}

fn run_seed(
    store: &ComponentStore,
    root: &Path,
    config: &UiforgeConfig,
    file: Option<PathBuf>,
    if_empty: bool,
    json: bool,
) -> anyhow::Result<()> {
    if if_empty && store.is_seeded()? {
        tracing::info!("Store already seeded, skipping");
        if json {
            println!("{}", serde_json::json!({ "skipped": true }));
        } else {
            ui::status(Icons::DATABASE, "Already seeded", &manager_path(store));
        }
        return Ok(());
    }

    let file = match (file, &config.catalog) {
        (Some(file), _) => file,
        (None, Some(catalog)) => root.join(catalog),
        (None, None) => anyhow::bail!("no catalog file given (use --file or set `catalog` in uiforge.toml)"),
    };

    let components = catalog::load_catalog(&file)?;
    let spinner = Spinner::new(&format!("Seeding {} components", components.len()));
    let started = Instant::now();

    let report = match store.seed(&components) {
        Ok(report) => report,
        Err(e) => {
            spinner.fail("Seeding failed, nothing was written");
            return Err(e.into());
        }
    };

    if json {
        spinner.finish_with_message("Done");
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        spinner.finish_with_summary(started.elapsed(), report.components, report.term_links, report.tailwind_roles);
        ui::summary_row("Catalog:", &file.display().to_string());
        ui::summary_row("Database:", &manager_path(store));
    }
    Ok(())
}

fn manager_path(store: &ComponentStore) -> String {
    store
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| ":memory:".to_string())
}

fn print_component(component: &Component) {
    ui::header(&format!(
        "{} {} ({})",
        ui::category_icon(component.category),
        component.name,
        component.id
    ));
    ui::summary_row("Type:", &format!("{} / {}", component.kind, component.variant));
    ui::summary_row("Category:", component.category.as_str());
    ui::summary_row("Tags:", &ui::term_list(&component.tags));
    ui::summary_row("Mood:", &ui::term_list(&component.mood));
    ui::summary_row("Industry:", &ui::term_list(&component.industry));
    ui::summary_row("Styles:", &ui::term_list(&component.visual_styles));

    ui::section("Accessibility");
    ui::summary_row("Roles:", &ui::term_list(&component.a11y.roles));
    ui::summary_row("Keyboard:", &component.a11y.keyboard_nav);
    ui::summary_row("Contrast:", &format!("{:.1}", component.a11y.contrast_ratio));

    if !component.tailwind_classes.is_empty() {
        ui::section("Tailwind");
        for (role, classes) in &component.tailwind_classes {
            println!("  {} {}", role.style(theme().info.clone()), classes);
        }
    }

    ui::section("Markup");
    println!("{}", component.jsx);
}
