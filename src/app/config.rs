use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{
    COOKIE_FILE_NAME, DEFAULT_DIRECTORY_URL, HTTP_REQUEST_TIMEOUT_SECS, SESSION_LIFETIME_HOURS,
};
use crate::session::CredentialTable;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote country directory
    #[serde(default)]
    pub directory: DirectoryConfig,

    /// Session and favorites persistence
    #[serde(default)]
    pub session: SessionConfig,

    /// Accepted logins
    #[serde(default)]
    pub credentials: CredentialTable,

    /// UI configuration
    #[serde(default)]
    pub ui: UIConfig,
}

/// Remote directory settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Base URL of the REST Countries compatible API
    pub base_url: String,
    /// Request timeout in seconds, 0 for the HTTP client default
    pub timeout_secs: u64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DIRECTORY_URL.to_string(),
            timeout_secs: HTTP_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Session persistence settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Cookie file, defaults to `cookies.json` in the data directory
    pub cookie_file: Option<PathBuf>,
    /// How long a login (and the favorites cookie) stays valid
    pub lifetime_hours: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_file: None,
            lifetime_hours: SESSION_LIFETIME_HOURS,
        }
    }
}

impl SessionConfig {
    /// Configured cookie file or the default location
    pub fn cookie_path(&self) -> Result<PathBuf> {
        match &self.cookie_file {
            Some(path) => Ok(path.clone()),
            None => Ok(get_data_dir()?.join(COOKIE_FILE_NAME)),
        }
    }
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UIConfig {
    /// Colored output
    pub color: bool,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Load configuration from multiple sources
///
/// Later sources win: defaults, global file, local `.atlas/config.toml`,
/// an explicit `--config` file, then `ATLAS_` environment variables
/// (`ATLAS_DIRECTORY__BASE_URL` sets `directory.base_url`).
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let global_config = get_config_dir()?.join("config.toml");
    let local_config = PathBuf::from(".atlas/config.toml");

    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    if global_config.exists() {
        figment = figment.merge(Toml::file(&global_config));
    }

    if local_config.exists() {
        figment = figment.merge(Toml::file(&local_config));
    }

    if let Some(path) = explicit {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed("ATLAS_").split("__"));

    figment
        .extract()
        .context("Failed to load configuration")
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "atlas")
}

fn home_fallback(kind: &str) -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Could not determine home directory")?;
    Ok(PathBuf::from(home).join(kind).join("atlas"))
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = match project_dirs() {
        Some(dirs) => dirs.config_dir().to_path_buf(),
        None => home_fallback(".config")?,
    };
    std::fs::create_dir_all(&config_dir)?;
    Ok(config_dir)
}

/// Get the data directory holding the cookie jar
pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = match project_dirs() {
        Some(dirs) => dirs.data_dir().to_path_buf(),
        None => home_fallback(".local/share")?,
    };
    std::fs::create_dir_all(&data_dir)?;
    Ok(data_dir)
}

/// Save configuration to file
pub fn save_config(config: &Config, path: Option<PathBuf>) -> Result<()> {
    let path = match path {
        Some(p) => p,
        None => get_config_dir()?.join("config.toml"),
    };

    let toml_string = toml::to_string_pretty(config)?;
    std::fs::write(&path, toml_string)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

/// Create a default configuration file if it doesn't exist
///
/// Returns the path of the file that was written, if any.
pub fn init_config() -> Result<Option<PathBuf>> {
    let config_file = get_config_dir()?.join("config.toml");
    if config_file.exists() {
        return Ok(None);
    }

    save_config(&Config::default(), Some(config_file.clone()))?;
    Ok(Some(config_file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.directory.base_url, "https://restcountries.com/v3.1");
        assert_eq!(config.session.lifetime_hours, 24);
        assert_eq!(config.credentials.users.len(), 2);
    }

    #[test]
    fn test_toml_round_trip_keeps_credentials() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.credentials, CredentialTable::default());
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("atlas.toml");
        std::fs::write(
            &path,
            r#"
[directory]
base_url = "http://localhost:9999/v3.1"
timeout_secs = 7

[[credentials.users]]
username = "ada"
password = "lovelace"
"#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.directory.base_url, "http://localhost:9999/v3.1");
        assert_eq!(config.directory.timeout_secs, 7);
        assert_eq!(config.credentials.verify("ada", "lovelace"), Some("ada"));
        assert_eq!(config.session.lifetime_hours, 24);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(load_config(Some(Path::new("/nonexistent/atlas.toml"))).is_err());
    }
}
