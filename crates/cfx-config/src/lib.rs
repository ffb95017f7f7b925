//! Configuration management for cfx.
//!
//! Parses `cfx.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String values in the `[confluence]` section support environment variable
//! expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "cfx.toml";

/// Default number of pages requested per listing call.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override data directory.
    pub data_dir: Option<PathBuf>,
    /// Override incremental mode.
    pub incremental: Option<bool>,
    /// Override HTML-to-text conversion.
    pub beautify: Option<bool>,
    /// Override listing page size.
    pub page_size: Option<usize>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Confluence connection settings.
    pub confluence: Option<ConfluenceConfig>,
    /// Extraction settings.
    pub extract: ExtractConfig,
    /// Output settings (paths are relative strings from TOML).
    output: OutputConfigRaw,

    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Confluence connection settings.
#[derive(Deserialize)]
pub struct ConfluenceConfig {
    /// Confluence base URL, e.g. `https://example.atlassian.net/wiki`.
    pub base_url: String,
    /// Account username (usually an email address).
    pub username: String,
    /// API token or password.
    pub api_token: String,
}

impl fmt::Debug for ConfluenceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfluenceConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("api_token", &"***")
            .finish()
    }
}

impl ConfluenceConfig {
    /// Validate that all required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty or has invalid format.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.base_url, "confluence.base_url")?;
        require_http_url(&self.base_url, "confluence.base_url")?;
        require_non_empty(&self.username, "confluence.username")?;
        require_non_empty(&self.api_token, "confluence.api_token")?;
        Ok(())
    }
}

/// Extraction settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Filter pages by the stored `last_run` watermark and append to the output table.
    pub incremental: bool,
    /// Convert page bodies from storage markup to plain text.
    pub beautify: bool,
    /// Number of pages requested per listing call.
    pub page_size: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            incremental: false,
            beautify: true,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Raw output configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    data_dir: Option<String>,
}

/// Resolved output configuration with absolute paths.
#[derive(Debug, Default)]
pub struct OutputConfig {
    /// Root of the `in/` and `out/` data directories.
    pub data_dir: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`confluence.api_token`").
        field: String,
        /// Error message (e.g., "${`CONFLUENCE_API_TOKEN`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `cfx.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, so CLI
    /// arguments take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(data_dir) = &settings.data_dir {
            self.output_resolved.data_dir.clone_from(data_dir);
        }
        if let Some(incremental) = settings.incremental {
            self.extract.incremental = incremental;
        }
        if let Some(beautify) = settings.beautify {
            self.extract.beautify = beautify;
        }
        if let Some(page_size) = settings.page_size {
            self.extract.page_size = page_size;
        }
    }

    /// Get validated Confluence configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_confluence(&self) -> Result<&ConfluenceConfig, ConfigError> {
        let conf = self.confluence.as_ref().ok_or_else(|| {
            ConfigError::Validation("[confluence] section required in config".into())
        })?;
        conf.validate()?;
        Ok(conf)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            confluence: None,
            extract: ExtractConfig::default(),
            output: OutputConfigRaw::default(),
            output_resolved: OutputConfig {
                data_dir: base.join("data"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// The `[confluence]` section is not checked here; commands that talk to
    /// the server call [`Config::require_confluence`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extract.page_size == 0 {
            return Err(ConfigError::Validation(
                "extract.page_size must be greater than 0".to_owned(),
            ));
        }
        if self.output_resolved.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "output.data_dir cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref mut confluence) = self.confluence {
            confluence.base_url = expand::expand_env(&confluence.base_url, "confluence.base_url")?;
            confluence.username = expand::expand_env(&confluence.username, "confluence.username")?;
            confluence.api_token =
                expand::expand_env(&confluence.api_token, "confluence.api_token")?;
        }
        Ok(())
    }

    /// Resolve relative paths against the config file directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let data_dir = self.output.data_dir.as_deref().unwrap_or("data");
        self.output_resolved = OutputConfig {
            data_dir: config_dir.join(data_dir),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn valid_confluence_config() -> ConfluenceConfig {
        ConfluenceConfig {
            base_url: "https://acme.atlassian.net/wiki".to_owned(),
            username: "bot@acme.io".to_owned(),
            api_token: "token".to_owned(),
        }
    }

    fn assert_validation_error(result: Result<(), ConfigError>, expected_substrings: &[&str]) {
        let err = result.expect_err("Expected validation to fail");
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.confluence.is_none());
        assert!(!config.extract.incremental);
        assert!(config.extract.beautify);
        assert_eq!(config.extract.page_size, 100);
        assert_eq!(config.output_resolved.data_dir, PathBuf::from("/test/data"));
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.extract.beautify);
        assert_eq!(config.extract.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[confluence]
base_url = "https://acme.atlassian.net/wiki"
username = "bot@acme.io"
api_token = "secret"

[extract]
incremental = true
beautify = false
page_size = 25

[output]
data_dir = "/var/cfx"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        let confluence = config.confluence.as_ref().unwrap();
        assert_eq!(confluence.base_url, "https://acme.atlassian.net/wiki");
        assert_eq!(confluence.username, "bot@acme.io");
        assert_eq!(confluence.api_token, "secret");
        assert!(config.extract.incremental);
        assert!(!config.extract.beautify);
        assert_eq!(config.extract.page_size, 25);
        assert_eq!(config.output_resolved.data_dir, PathBuf::from("/var/cfx"));
    }

    #[test]
    fn test_resolve_relative_data_dir() {
        let toml = r#"
[output]
data_dir = "export"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(
            config.output_resolved.data_dir,
            PathBuf::from("/project/export")
        );
    }

    #[test]
    fn test_debug_redacts_api_token() {
        let rendered = format!("{:?}", valid_confluence_config());
        assert!(!rendered.contains("\"token\""));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn test_apply_cli_settings_overrides() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            data_dir: Some(PathBuf::from("/tmp/out")),
            incremental: Some(true),
            beautify: Some(false),
            page_size: Some(10),
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.output_resolved.data_dir, PathBuf::from("/tmp/out"));
        assert!(config.extract.incremental);
        assert!(!config.extract.beautify);
        assert_eq!(config.extract.page_size, 10);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert!(!config.extract.incremental);
        assert!(config.extract.beautify);
        assert_eq!(config.output_resolved.data_dir, PathBuf::from("/test/data"));
    }

    #[test]
    fn test_expand_env_vars_confluence() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("CFX_TEST_URL", "https://wiki.test.com");
            std::env::set_var("CFX_TEST_TOKEN", "my-token");
        }

        let toml = r#"
[confluence]
base_url = "${CFX_TEST_URL}"
username = "${CFX_TEST_USER:-robot}"
api_token = "${CFX_TEST_TOKEN}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        let confluence = config.confluence.unwrap();
        assert_eq!(confluence.base_url, "https://wiki.test.com");
        assert_eq!(confluence.username, "robot");
        assert_eq!(confluence.api_token, "my-token");

        unsafe {
            std::env::remove_var("CFX_TEST_URL");
            std::env::remove_var("CFX_TEST_TOKEN");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("CFX_MISSING_TOKEN");
        }

        let toml = r#"
[confluence]
base_url = "https://wiki.test.com"
username = "bot"
api_token = "${CFX_MISSING_TOKEN}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("CFX_MISSING_TOKEN"));
        assert!(err.to_string().contains("confluence.api_token"));
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_page_size_zero() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.extract.page_size = 0;
        assert_validation_error(config.validate(), &["page_size", "greater than 0"]);
    }

    #[test]
    fn test_confluence_config_validate_empty_token() {
        let config = ConfluenceConfig {
            api_token: String::new(),
            ..valid_confluence_config()
        };
        assert_validation_error(config.validate(), &["api_token", "empty"]);
    }

    #[test]
    fn test_confluence_config_validate_invalid_url() {
        let config = ConfluenceConfig {
            base_url: "acme.atlassian.net".to_owned(),
            ..valid_confluence_config()
        };
        assert_validation_error(config.validate(), &["base_url", "http"]);
    }

    #[test]
    fn test_config_require_confluence_missing_section() {
        let config = Config::default_with_base(Path::new("/test"));
        let err = config.require_confluence().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("[confluence]"));
    }

    #[test]
    fn test_config_require_confluence_returns_validated() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.confluence = Some(valid_confluence_config());
        assert_eq!(
            config.require_confluence().unwrap().username,
            "bot@acme.io"
        );
    }

    #[test]
    fn test_load_explicit_path_not_found() {
        let err = Config::load(Some(Path::new("/nonexistent/cfx.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file_resolves_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfx.toml");
        std::fs::write(
            &path,
            r#"
[confluence]
base_url = "https://acme.atlassian.net/wiki"
username = "bot"
api_token = "secret"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.output_resolved.data_dir, dir.path().join("data"));
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert!(config.require_confluence().is_ok());
    }

    #[test]
    fn test_load_rejects_zero_page_size_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfx.toml");
        std::fs::write(&path, "").unwrap();
        let settings = CliSettings {
            page_size: Some(0),
            ..Default::default()
        };

        let err = Config::load(Some(&path), Some(&settings)).unwrap_err();

        assert!(err.to_string().contains("page_size"));
    }
}
