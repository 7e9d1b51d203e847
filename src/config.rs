use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const ROOT_DIR_NAME: &str = "codepad";
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub root_dir: PathBuf,
    pub theme: String,
}

impl Default for Config {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::with_home(&home)
    }
}

impl Config {
    /// Loads the config file, writing one with defaults on first run.
    pub fn init() -> Result<Self> {
        let home = dirs::home_dir().context("Failed to determine home directory")?;
        let config_path = Self::get_config_path()?;
        Self::load_or_create(&config_path, &home)
    }

    pub fn with_home(home: &Path) -> Self {
        Config {
            root_dir: home.join(ROOT_DIR_NAME),
            theme: DEFAULT_THEME.to_string(),
        }
    }

    pub fn load_or_create(config_path: &Path, home: &Path) -> Result<Self> {
        // Load existing config
        if config_path.exists() {
            let config_str = fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            let config: Config = serde_json::from_str(&config_str)
                .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;
            tracing::debug!(path = ?config_path, "loaded config");
            return Ok(config);
        }

        // First run: save defaults, but still run if that fails
        let config = Self::with_home(home);
        match Self::save(&config, config_path) {
            Ok(()) => tracing::debug!(path = ?config_path, "wrote default config"),
            Err(e) => tracing::warn!(error = %format!("{:#}", e), "using default config"),
        }

        Ok(config)
    }

    fn save(config: &Config, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }
        let config_str =
            serde_json::to_string_pretty(config).context("Failed to serialize config")?;
        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Applies command-line overrides. These are never persisted.
    pub fn with_overrides(mut self, root_dir: Option<PathBuf>, theme: Option<String>) -> Self {
        if let Some(root_dir) = root_dir {
            self.root_dir = root_dir;
        }
        if let Some(theme) = theme {
            self.theme = theme;
        }
        self
    }

    fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .context("Failed to determine config directory")?;

        Ok(config_dir.join(ROOT_DIR_NAME).join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn first_run_writes_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cfg").join("config.json");

        let config = Config::load_or_create(&path, tmp.path()).unwrap();

        assert_eq!(config.root_dir, tmp.path().join("codepad"));
        assert_eq!(config.theme, DEFAULT_THEME);
        assert!(path.exists());
        let reloaded = Config::load_or_create(&path, Path::new("/elsewhere")).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, r#"{ "root_dir": "/srv/snips" }"#).unwrap();

        let config = Config::load_or_create(&path, tmp.path()).unwrap();

        assert_eq!(config.root_dir, PathBuf::from("/srv/snips"));
        assert_eq!(config.theme, DEFAULT_THEME);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        let err = Config::load_or_create(&path, tmp.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn unwritable_config_dir_falls_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "file").unwrap();
        let path = blocker.join("codepad").join("config.json");

        let config = Config::load_or_create(&path, tmp.path()).unwrap();

        assert_eq!(config, Config::with_home(tmp.path()));
        assert!(!path.exists());
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let config = Config::with_home(Path::new("/home/u"))
            .with_overrides(Some(PathBuf::from("/tmp/pad")), None);
        assert_eq!(config.root_dir, PathBuf::from("/tmp/pad"));
        assert_eq!(config.theme, DEFAULT_THEME);
    }
}
