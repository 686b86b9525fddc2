use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_HOST: &str = "https://yougile.com/api-v2/";

const APP_DIR: &str = "yougile";
const CONFIG_FILE: &str = "config.json";

fn default_api_host() -> String {
    DEFAULT_API_HOST.to_string()
}

/// Local settings persisted between invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_host")]
    pub api_host: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_project_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_board_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_board_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_column_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_column_name: Option<String>,
}

impl Config {
    pub fn new(api_key: impl Into<String>, api_host: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_host: api_host.into(),
            default_project_id: None,
            default_project_name: None,
            default_board_id: None,
            default_board_name: None,
            default_column_id: None,
            default_column_name: None,
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub fn clear_defaults(&mut self) {
        self.default_project_id = None;
        self.default_project_name = None;
        self.default_board_id = None;
        self.default_board_name = None;
        self.default_column_id = None;
        self.default_column_name = None;
    }

    /// Breadcrumb of the default location, e.g. `Work → Sprint → To do`.
    ///
    /// Missing names fall back to their ids, or `?` when neither is set.
    pub fn default_location(&self) -> String {
        fn part(name: &Option<String>, id: &Option<String>) -> String {
            name.clone()
                .or_else(|| id.clone())
                .unwrap_or_else(|| "?".to_string())
        }

        format!(
            "{} → {} → {}",
            part(&self.default_project_name, &self.default_project_id),
            part(&self.default_board_name, &self.default_board_id),
            part(&self.default_column_name, &self.default_column_id),
        )
    }

    /// Masked form of the key suitable for display.
    pub fn masked_api_key(&self) -> String {
        let prefix: String = self.api_key.chars().take(8).collect();
        format!("{}...", prefix)
    }
}

/// Reads and writes the single configuration file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store at `<home>/.config/yougile/config.json`.
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: Self::default_path()?,
        })
    }

    /// Store backed by an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".config").join(APP_DIR).join(CONFIG_FILE))
            .context("Failed to determine home directory")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `None` when the file is missing, unreadable or malformed.
    pub fn load(&self) -> Option<Config> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "failed to read config file");
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => Some(config),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "ignoring malformed config file");
                None
            }
        }
    }

    /// Writes the whole record, replacing any previous file.
    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(config).context("Failed to serialize config")?;

        // Rename over the target so readers never observe a half-written record.
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content).context("Failed to write config file")?;
        if let Err(err) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(err).context("Failed to replace config file");
        }

        tracing::debug!(path = %self.path.display(), "saved config");
        Ok(())
    }

    pub fn has_valid_config(&self) -> bool {
        self.load().map(|config| config.has_api_key()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> ConfigStore {
        ConfigStore::at(dir.path().join("nested").join("yougile").join(CONFIG_FILE))
    }

    fn full_config() -> Config {
        Config {
            api_key: "key-123".into(),
            api_host: DEFAULT_API_HOST.into(),
            default_project_id: Some("p1".into()),
            default_project_name: Some("Work".into()),
            default_board_id: Some("b1".into()),
            default_board_name: Some("Sprint".into()),
            default_column_id: Some("col1".into()),
            default_column_name: Some("To do".into()),
        }
    }

    #[test]
    fn default_path_lives_under_dot_config() {
        let path = ConfigStore::default_path().unwrap();
        assert!(path.ends_with(".config/yougile/config.json"));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let config = full_config();
        store.save(&config).unwrap();
        assert_eq!(store.load(), Some(config));

        let minimal = Config::new("other", "https://example.com/api/");
        store.save(&minimal).unwrap();
        assert_eq!(store.load(), Some(minimal));
    }

    #[test]
    fn save_creates_parent_directories_and_pretty_prints() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&Config::new("k", DEFAULT_API_HOST)).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\n  \"apiKey\": \"k\""));
        assert!(!raw.contains("defaultProjectId"));
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn load_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        assert_eq!(store_in(&dir).load(), None);
    }

    #[test]
    fn load_invalid_json_is_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{ not json").unwrap();

        let store = ConfigStore::at(&path);
        assert_eq!(store.load(), None);
        assert!(!store.has_valid_config());
    }

    #[test]
    fn has_valid_config_requires_non_empty_key() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(!store.has_valid_config());

        store.save(&Config::new("", DEFAULT_API_HOST)).unwrap();
        assert!(!store.has_valid_config());

        fs::write(store.path(), r#"{"apiHost":"https://yougile.com/api-v2/"}"#).unwrap();
        assert!(!store.has_valid_config());

        store.save(&Config::new("key", DEFAULT_API_HOST)).unwrap();
        assert!(store.has_valid_config());
    }

    #[test]
    fn whitespace_key_still_counts_as_configured() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&Config::new("   ", DEFAULT_API_HOST)).unwrap();
        assert!(store.has_valid_config());
    }

    #[test]
    fn load_unreadable_path_is_none() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::at(dir.path());
        assert_eq!(store.load(), None);
        assert!(!store.has_valid_config());
    }

    #[test]
    fn failed_replace_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "occupied").unwrap();

        let store = ConfigStore::at(&path);
        assert!(store.save(&Config::new("k", DEFAULT_API_HOST)).is_err());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn save_fails_when_directory_cannot_be_created() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();

        let store = ConfigStore::at(blocker.join(CONFIG_FILE));
        assert!(store.save(&Config::new("k", DEFAULT_API_HOST)).is_err());
    }

    #[test]
    fn clear_defaults_keeps_credentials() {
        let mut config = full_config();
        config.clear_defaults();
        assert_eq!(config, Config::new("key-123", DEFAULT_API_HOST));
    }

    #[test]
    fn default_location_falls_back_to_ids() {
        let mut config = full_config();
        assert_eq!(config.default_location(), "Work → Sprint → To do");

        config.default_board_name = None;
        config.default_column_name = None;
        config.default_column_id = None;
        assert_eq!(config.default_location(), "Work → b1 → ?");
    }

    #[test]
    fn masked_api_key_shows_prefix_only() {
        let config = Config::new("abcdefghijklmnop", DEFAULT_API_HOST);
        assert_eq!(config.masked_api_key(), "abcdefgh...");
    }
}
