use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to build http client: {0}")]
    Client(String),

    #[error("invalid base url '{0}': {1}")]
    BaseUrl(String, String),

    #[error("config file not found '{}'", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to write config '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {field} '{value}': {reason}")]
    Invalid {
        field: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct ConfigFile {
    pub base_url: Option<String>,
    pub timeout: Option<u64>,
    pub proxy: Option<String>,
    pub view: Option<String>,
    pub format: Option<String>,
    pub output: Option<String>,
    pub no_color: Option<bool>,
    #[serde(alias = "poll_interval")]
    pub interval: Option<u64>,
    pub live_logs: Option<bool>,
    pub level: Option<String>,
    pub days: Option<u32>,
    pub companies_limit: Option<u32>,
    pub per_page: Option<u32>,
    #[serde(alias = "debounce_ms")]
    pub debounce: Option<u64>,
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("USERPROFILE").map(PathBuf::from))
        .or_else(|| {
            let drive = env::var_os("HOMEDRIVE")?;
            let path = env::var_os("HOMEPATH")?;
            Some(PathBuf::from(drive).join(path))
        })
}

pub fn default_config_path() -> Option<PathBuf> {
    Some(home_dir()?.join(".jobwatch").join("config.yml"))
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        if let Some(home) = home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

pub fn parse_config(path: &Path, contents: &str) -> Result<ConfigFile, ConfigError> {
    // an empty or comment-only file deserializes to unit, not a mapping
    if contents
        .lines()
        .all(|l| l.trim().is_empty() || l.trim_start().starts_with('#'))
    {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str::<ConfigFile>(contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_config(path: &Path, allow_missing: bool) -> Result<ConfigFile, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_config(path, &contents),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
            Ok(ConfigFile::default())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ConfigError::NotFound(path.to_path_buf()))
        }
        Err(source) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn default_config_yaml() -> &'static str {
    r#"# jobwatch config
#
# Location (default):
#   ~/.jobwatch/config.yml
#
# Command-line flags override every value set here.

# Connection
base_url: http://localhost:8080/
timeout: 10
# proxy: http://127.0.0.1:8080

# Page shown when --view is not given: overview, analytics or jobs
view: overview

# Output
format: text
# output: ./frame.html
no_color: false

# Overview
interval: 5000
live_logs: false

# Analytics
level: junior
days: 30
companies_limit: 15

# Jobs
per_page: 50
debounce: 300
"#
}

/// Writes the commented default config to `path` unless a file is already
/// there. Returns whether a file was created.
pub fn ensure_default_config_file(path: &Path) -> Result<bool, ConfigError> {
    if path.exists() {
        return Ok(false);
    }
    let parent = path.parent().ok_or_else(|| ConfigError::Invalid {
        field: "config path",
        value: path.display().to_string(),
        reason: "has no parent directory".to_string(),
    })?;
    std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
        path: parent.to_path_buf(),
        source,
    })?;
    std::fs::write(path, default_config_yaml()).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_yaml_parses() {
        let cfg = parse_config(Path::new("default.yml"), default_config_yaml()).unwrap();
        assert_eq!(cfg.base_url.as_deref(), Some("http://localhost:8080/"));
        assert_eq!(cfg.interval, Some(5000));
        assert_eq!(cfg.per_page, Some(50));
        assert_eq!(cfg.proxy, None);
    }

    #[test]
    fn comment_only_file_is_empty_config() {
        let cfg = parse_config(Path::new("c.yml"), "# nothing\n\n").unwrap();
        assert!(cfg.base_url.is_none());
    }

    #[test]
    fn aliases_are_accepted() {
        let cfg = parse_config(Path::new("c.yml"), "poll_interval: 1000\ndebounce_ms: 50\n").unwrap();
        assert_eq!(cfg.interval, Some(1000));
        assert_eq!(cfg.debounce, Some(50));
    }

    #[test]
    fn bad_yaml_reports_path() {
        let err = parse_config(Path::new("broken.yml"), "timeout: [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.yml"));
    }

    #[test]
    fn missing_file_respects_allow_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        assert!(load_config(&path, true).is_ok());
        assert!(matches!(
            load_config(&path, false),
            Err(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn ensure_default_writes_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".jobwatch").join("config.yml");

        assert!(ensure_default_config_file(&path).unwrap());
        assert!(!ensure_default_config_file(&path).unwrap());
        let cfg = load_config(&path, false).unwrap();
        assert_eq!(cfg.level.as_deref(), Some("junior"));
    }

    #[test]
    fn tilde_is_expanded() {
        if let Some(home) = home_dir() {
            assert_eq!(expand_tilde("~/x.yml"), home.join("x.yml"));
        }
        assert_eq!(expand_tilde("/etc/x.yml"), PathBuf::from("/etc/x.yml"));
    }
}
