//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.mural/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::comments::DEFAULT_INITIAL_COMMENTS;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MuralConfig {
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Path to a `.json` or `.toml` feed, relative paths resolve against `~/.mural/`.
    pub feed_file: Option<String>,
    pub commenter_name: Option<String>,
    pub commenter_role: Option<String>,
    /// Comments every post starts with.
    pub initial_comments: Option<Vec<String>>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_COMMENTER_NAME: &str = "Guilherme Vieira";
pub const DEFAULT_COMMENTER_ROLE: &str = "Web Developer";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// `None` means use the built-in sample feed.
    pub feed_file: Option<PathBuf>,
    pub commenter_name: String,
    pub commenter_role: String,
    pub initial_comments: Vec<String>,
}

/// Values given on the command line; `None` = flag not passed.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub feed_file: Option<PathBuf>,
    pub commenter_name: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.mural/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".mural"))
}

/// Returns the path to `~/.mural/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `override_path`, or from `~/.mural/config.toml`.
///
/// A missing default file is generated (commented out) and yields
/// `MuralConfig::default()`. A missing explicit path is an I/O error.
pub fn load_config(override_path: Option<&Path>) -> Result<MuralConfig, ConfigError> {
    if let Some(path) = override_path {
        return load_from(path);
    }

    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(MuralConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(MuralConfig::default());
    }

    load_from(&path)
}

fn load_from(path: &Path) -> Result<MuralConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: MuralConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Mural Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# feed_file = "feed.json"              # .json or .toml, relative to ~/.mural/ (or MURAL_FEED)
# commenter_name = "Guilherme Vieira"  # Name shown on your comments (or MURAL_COMMENTER)
# commenter_role = "Web Developer"
# initial_comments = ["post muito bacana"]
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &MuralConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Feed: CLI → env → config (relative to ~/.mural/) → sample
    let feed_file = cli
        .feed_file
        .clone()
        .or_else(|| std::env::var("MURAL_FEED").ok().map(PathBuf::from))
        .or_else(|| config.general.feed_file.as_deref().map(resolve_feed_path));

    // Commenter: CLI → env → config → default
    let commenter_name = cli
        .commenter_name
        .clone()
        .or_else(|| std::env::var("MURAL_COMMENTER").ok())
        .or_else(|| config.general.commenter_name.clone())
        .unwrap_or_else(|| DEFAULT_COMMENTER_NAME.to_string());

    let commenter_role = config
        .general
        .commenter_role
        .clone()
        .unwrap_or_else(|| DEFAULT_COMMENTER_ROLE.to_string());

    let initial_comments = config.general.initial_comments.clone().unwrap_or_else(|| {
        DEFAULT_INITIAL_COMMENTS
            .iter()
            .map(|s| s.to_string())
            .collect()
    });

    ResolvedConfig {
        feed_file,
        commenter_name,
        commenter_role,
        initial_comments,
    }
}

/// Absolute paths pass through; relative ones hang off `~/.mural/`.
fn resolve_feed_path(file: &str) -> PathBuf {
    let path = PathBuf::from(file);
    if path.is_absolute() {
        return path;
    }
    match config_dir() {
        Some(dir) => dir.join(path),
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_parses() {
        let config = MuralConfig::default();
        assert!(config.general.feed_file.is_none());
        assert!(config.general.initial_comments.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = MuralConfig::default();
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.commenter_role, DEFAULT_COMMENTER_ROLE);
        assert_eq!(resolved.initial_comments, ["post muito bacana"]);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = MuralConfig {
            general: GeneralConfig {
                feed_file: Some("/tmp/feed.json".to_string()),
                commenter_name: Some("Ana".to_string()),
                commenter_role: Some("Designer".to_string()),
                initial_comments: Some(vec![]),
            },
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.commenter_role, "Designer");
        assert!(resolved.initial_comments.is_empty());
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = MuralConfig {
            general: GeneralConfig {
                feed_file: Some("/tmp/from-config.json".to_string()),
                commenter_name: Some("Config Name".to_string()),
                ..Default::default()
            },
        };
        let cli = CliOverrides {
            feed_file: Some(PathBuf::from("/tmp/from-cli.toml")),
            commenter_name: Some("Cli Name".to_string()),
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.feed_file, Some(PathBuf::from("/tmp/from-cli.toml")));
        assert_eq!(resolved.commenter_name, "Cli Name");
    }

    #[test]
    fn test_absolute_feed_path_passes_through() {
        assert_eq!(
            resolve_feed_path("/srv/feed.json"),
            PathBuf::from("/srv/feed.json")
        );
    }

    #[test]
    fn test_relative_feed_path_resolves_under_config_dir() {
        let resolved = resolve_feed_path("feed.json");
        assert!(resolved.ends_with("feed.json"));
        if let Some(dir) = config_dir() {
            assert!(resolved.starts_with(dir));
        }
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[general]
commenter_name = "Ana"
"#;
        let config: MuralConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.commenter_name.as_deref(), Some("Ana"));
        assert!(config.general.feed_file.is_none());
        assert!(config.general.initial_comments.is_none());
    }

    #[test]
    fn test_load_config_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[general]\ninitial_comments = [\"first\", \"second\"]").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(
            config.general.initial_comments,
            Some(vec!["first".to_string(), "second".to_string()])
        );
    }

    #[test]
    fn test_load_config_malformed_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[general\nbroken").unwrap();
        assert!(matches!(
            load_config(Some(file.path())),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_config_missing_explicit_path_is_io_error() {
        assert!(matches!(
            load_config(Some(Path::new("/nope/mural.toml"))),
            Err(ConfigError::Io(_))
        ));
    }
}
