use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiforgeConfig {
    /// Database file, relative to the project root
    pub database: Option<String>,
    /// Catalog JSON used by `seed` when no file is given
    pub catalog: Option<String>,
    /// Cap on ranked query results
    pub result_limit: Option<usize>,
}

impl UiforgeConfig {
    /// Database path: explicit override, then config, then the default location
    pub fn database_path(&self, root: &Path, cli: Option<&Path>) -> PathBuf {
        match (cli, &self.database) {
            (Some(path), _) => path.to_path_buf(),
            (None, Some(db)) => root.join(db),
            (None, None) => default_database_path_in(root),
        }
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("uiforge.toml")
}

pub fn default_database_path_in(base: &Path) -> PathBuf {
    base.join(".uiforge").join("rag.sqlite")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<UiforgeConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: UiforgeConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &UiforgeConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_gitignore(project_root: &Path) -> anyhow::Result<()> {
    let gitignore_path = project_root.join(".gitignore");
    let entry = ".uiforge/";

    let mut content = String::new();
    if gitignore_path.exists() {
        content = std::fs::read_to_string(&gitignore_path)?;
        if content.lines().any(|line| line.trim() == entry) {
            return Ok(());
        }
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
    }
    content.push_str(entry);
    content.push('\n');
    std::fs::write(&gitignore_path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path_precedence() {
        let root = Path::new("/project");
        let config = UiforgeConfig::default();
        assert_eq!(config.database_path(root, None), PathBuf::from("/project/.uiforge/rag.sqlite"));

        let config = UiforgeConfig {
            database: Some("data/catalog.sqlite".into()),
            ..Default::default()
        };
        assert_eq!(config.database_path(root, None), PathBuf::from("/project/data/catalog.sqlite"));
        assert_eq!(
            config.database_path(root, Some(Path::new("/tmp/x.sqlite"))),
            PathBuf::from("/tmp/x.sqlite")
        );
    }

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uiforge.toml");
        let config = UiforgeConfig {
            database: None,
            catalog: Some("components.json".into()),
            result_limit: Some(5),
        };

        write_config(&path, &config, false).unwrap();
        assert!(write_config(&path, &config, false).is_err());

        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded.catalog.as_deref(), Some("components.json"));
        assert_eq!(loaded.result_limit, Some(5));
        assert!(load_config(Some(&dir.path().join("missing.toml"))).unwrap().is_none());
    }

    #[test]
    fn test_gitignore_entry_added_once() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".gitignore"), "target").unwrap();

        ensure_gitignore(dir.path()).unwrap();
        ensure_gitignore(dir.path()).unwrap();

        let contents = std::fs::read_to_string(dir.path().join(".gitignore")).unwrap();
        assert_eq!(contents, "target\n.uiforge/\n");
    }
}
