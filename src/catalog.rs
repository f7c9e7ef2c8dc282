//! Catalog loader - reads component definitions for seeding
//!
//! The catalog file is a JSON array of component objects in the ingest
//! shape (see [`Component`]).

use std::collections::HashSet;
use std::path::Path;
use crate::{Error, Result};
use crate::component::Component;

/// Read and parse a catalog file
pub fn load_catalog(path: &Path) -> Result<Vec<Component>> {
    let contents = std::fs::read_to_string(path)?;
    parse_catalog(&contents).map_err(|e| match e {
        Error::Catalog(msg) => Error::Catalog(format!("{}: {}", path.display(), msg)),
        other => other,
    })
}

/// Parse catalog JSON. Duplicate ids are kept (the last one wins on seed) but logged.
pub fn parse_catalog(contents: &str) -> Result<Vec<Component>> {
    let components: Vec<Component> =
        serde_json::from_str(contents).map_err(|e| Error::Catalog(e.to_string()))?;

    let mut seen = HashSet::new();
    for component in &components {
        if !seen.insert(component.id.as_str()) {
            tracing::warn!("Duplicate component id in catalog: {}", component.id);
        }
    }
    Ok(components)
}

/// Parse either a single component object or an array of them
pub fn parse_components(contents: &str) -> Result<Vec<Component>> {
    if contents.trim_start().starts_with('[') {
        parse_catalog(contents)
    } else {
        let component = serde_json::from_str(contents).map_err(|e| Error::Catalog(e.to_string()))?;
        Ok(vec![component])
    }
}
