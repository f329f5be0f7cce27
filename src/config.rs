/// Runtime configuration.
///
/// Settings come from a TOML file, looked up in this order:
///   1. an explicit path (the `--config` flag),
///   2. `$UWRISK_CONFIG`,
///   3. `./uwrisk.toml` if it exists.
/// With no file, built-in defaults apply. A `.env` file in the working
/// directory is loaded first so either variable can be set there.
///
/// `UWRISK_ELEVATION_URL` overrides `[elevation] base_url` after the file is
/// read, which is handy for pointing at a self-hosted Open-Elevation.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::analysis::assessment::AssessmentOptions;
use crate::analysis::exposure::{DEFAULT_EXPOSURE_COUNT, DEFAULT_EXPOSURE_SEED};
use crate::ingest::elevation::OPEN_ELEVATION_BASE_URL;
use crate::logging::LogLevel;
use crate::stations::DEFAULT_AVERAGE_SPEED_KMH;

pub const CONFIG_ENV_VAR: &str = "UWRISK_CONFIG";
pub const ELEVATION_URL_ENV_VAR: &str = "UWRISK_ELEVATION_URL";
pub const DEFAULT_CONFIG_FILE: &str = "uwrisk.toml";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, message: String },
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "Failed to read config {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, message } => {
                write!(f, "Failed to parse config {}: {}", path.display(), message)
            }
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ElevationConfig {
    pub base_url: String,
    /// Request timeout; unset means the HTTP client's default.
    pub timeout_secs: Option<u64>,
}

impl Default for ElevationConfig {
    fn default() -> Self {
        Self {
            base_url: OPEN_ELEVATION_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl ElevationConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResponseConfig {
    pub average_speed_kmh: f64,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self { average_speed_kmh: DEFAULT_AVERAGE_SPEED_KMH }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExposureConfig {
    pub count: usize,
    pub seed: u64,
}

impl Default for ExposureConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_EXPOSURE_COUNT,
            seed: DEFAULT_EXPOSURE_SEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            timestamps: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub elevation: ElevationConfig,
    pub response: ResponseConfig,
    pub exposure: ExposureConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl AppConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates the file at `path`.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Resolves the config file per the lookup order above and applies the
    /// environment override. Returns the config and the file it came from.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        dotenv::dotenv().ok();
        Self::load_from(explicit, Path::new("."), |key| std::env::var(key).ok())
    }

    /// `load` with the environment and working directory supplied by the
    /// caller. `env` returns the value of a variable, if set.
    pub fn load_from<F>(
        explicit: Option<&Path>,
        working_dir: &Path,
        env: F,
    ) -> Result<(Self, Option<PathBuf>), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => match env(CONFIG_ENV_VAR) {
                Some(p) if !p.trim().is_empty() => Some(PathBuf::from(p.trim())),
                _ => {
                    let default = working_dir.join(DEFAULT_CONFIG_FILE);
                    default.exists().then_some(default)
                }
            },
        };

        let mut config = match &path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };

        if let Some(url) = env(ELEVATION_URL_ENV_VAR) {
            if !url.trim().is_empty() {
                config.elevation.base_url = url.trim().to_string();
            }
        }
        config.validate()?;

        Ok((config, path))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.response.average_speed_kmh.is_finite() && self.response.average_speed_kmh > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "response.average_speed_kmh must be a positive number, got {}",
                self.response.average_speed_kmh
            )));
        }
        if self.exposure.count == 0 {
            return Err(ConfigError::Invalid("exposure.count must be at least 1".to_string()));
        }
        if self.elevation.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("elevation.base_url must not be empty".to_string()));
        }
        self.log_level()?;
        Ok(())
    }

    pub fn log_level(&self) -> Result<LogLevel, ConfigError> {
        self.logging.level.parse().map_err(ConfigError::Invalid)
    }

    pub fn assessment_options(&self) -> AssessmentOptions {
        AssessmentOptions {
            average_speed_kmh: self.response.average_speed_kmh,
            exposure_count: self.exposure.count,
            exposure_seed: self.exposure.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<AppConfig, ConfigError> {
        AppConfig::from_toml_str(text, Path::new("test.toml"))
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = parse("").expect("empty config is valid");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.elevation.base_url, "https://api.open-elevation.com");
        assert_eq!(config.assessment_options(), AssessmentOptions::default());
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = parse(
            r#"
            [exposure]
            seed = 7

            [elevation]
            timeout_secs = 15
            "#,
        )
        .expect("valid config");
        assert_eq!(config.exposure.seed, 7);
        assert_eq!(config.exposure.count, 5);
        assert_eq!(config.elevation.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.response.average_speed_kmh, 40.0);
    }

    #[test]
    fn test_zero_speed_is_rejected() {
        let result = parse("[response]\naverage_speed_kmh = 0.0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))), "got {:?}", result);
    }

    #[test]
    fn test_zero_exposure_count_is_rejected() {
        let result = parse("[exposure]\ncount = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_unknown_log_level_is_rejected() {
        let result = parse("[logging]\nlevel = \"chatty\"\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_toml_reports_path() {
        let err = parse("[exposure\ncount = 3").expect_err("malformed");
        assert!(err.to_string().contains("test.toml"), "{}", err);
    }

    fn write_config(dir: &Path, name: &str, seed: u64) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, format!("[exposure]\nseed = {}\n", seed)).expect("write config");
        path
    }

    fn env_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let vars: Vec<(String, String)> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    }

    #[test]
    fn test_explicit_path_wins_over_env_and_working_dir() {
        let dir = tempfile::tempdir().expect("temp dir");
        let explicit = write_config(dir.path(), "explicit.toml", 1);
        let from_env = write_config(dir.path(), "env.toml", 2);
        write_config(dir.path(), DEFAULT_CONFIG_FILE, 3);

        let env = env_from(&[(CONFIG_ENV_VAR, from_env.to_str().expect("utf-8 path"))]);
        let (config, used) =
            AppConfig::load_from(Some(explicit.as_path()), dir.path(), env).expect("loads");

        assert_eq!(config.exposure.seed, 1);
        assert_eq!(used, Some(explicit));
    }

    #[test]
    fn test_env_path_is_used_without_explicit_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let from_env = write_config(dir.path(), "env.toml", 2);
        write_config(dir.path(), DEFAULT_CONFIG_FILE, 3);

        let env = env_from(&[(CONFIG_ENV_VAR, from_env.to_str().expect("utf-8 path"))]);
        let (config, used) = AppConfig::load_from(None, dir.path(), env).expect("loads");

        assert_eq!(config.exposure.seed, 2);
        assert_eq!(used, Some(from_env));
    }

    #[test]
    fn test_working_dir_file_then_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");

        let (config, used) = AppConfig::load_from(None, dir.path(), env_from(&[])).expect("loads");
        assert_eq!(config, AppConfig::default());
        assert_eq!(used, None);

        let local = write_config(dir.path(), DEFAULT_CONFIG_FILE, 3);
        // A blank variable counts as unset.
        let env = env_from(&[(CONFIG_ENV_VAR, "  ")]);
        let (config, used) = AppConfig::load_from(None, dir.path(), env).expect("loads");
        assert_eq!(config.exposure.seed, 3);
        assert_eq!(used, Some(local));
    }

    #[test]
    fn test_url_override_replaces_file_value() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[elevation]\nbase_url = \"http://from-file:8080\"\n")
            .expect("write config");

        let env = env_from(&[(ELEVATION_URL_ENV_VAR, " http://localhost:9000 ")]);
        let (config, _) = AppConfig::load_from(Some(path.as_path()), dir.path(), env).expect("loads");
        assert_eq!(config.elevation.base_url, "http://localhost:9000");

        let env = env_from(&[(ELEVATION_URL_ENV_VAR, "")]);
        let (config, _) = AppConfig::load_from(Some(path.as_path()), dir.path(), env).expect("loads");
        assert_eq!(config.elevation.base_url, "http://from-file:8080");
    }

    #[test]
    fn test_loaded_file_is_still_validated() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[response]\naverage_speed_kmh = -5.0\n").expect("write config");

        let env = env_from(&[(ELEVATION_URL_ENV_VAR, "http://localhost:9000")]);
        let result = AppConfig::load_from(Some(path.as_path()), dir.path(), env);
        assert!(matches!(result, Err(ConfigError::Invalid(_))), "got {:?}", result);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error_not_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("absent.toml");
        let result = AppConfig::load_from(Some(missing.as_path()), dir.path(), env_from(&[]));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AppConfig::from_file(Path::new("/nonexistent/uwrisk.toml")).expect_err("missing");
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
