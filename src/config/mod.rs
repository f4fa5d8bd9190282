//! Configuration management.
//!
//! Settings are read from an optional TOML file and can be overridden with
//! `MODS2DOT_<SECTION>__<KEY>` environment variables.
//!
//! # Configuration File Format
//!
//! ```toml
//! [parser]
//! namespace = "http://www.loc.gov/mods/v3"
//! default_year = "1900"
//!
//! [render]
//! shape = "record"
//! font_size = 12
//! splines = true
//! rank_dir = "LR"
//! fill_color = "white"
//!
//! [logging]
//! level = "warn"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::dot::DotStyle;
use crate::models::DEFAULT_YEAR;
use crate::mods::{ModsParser, MODS_NAMESPACE};

/// Config file name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "mods2dot.toml";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// MODS parsing settings
    #[serde(default)]
    pub parser: ParserConfig,

    /// Graph rendering settings
    #[serde(default)]
    pub render: RenderConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// MODS parsing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Namespace URI of record elements
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Year used for records without `originInfo`
    #[serde(default = "default_year")]
    pub default_year: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            default_year: default_year(),
        }
    }
}

fn default_namespace() -> String {
    MODS_NAMESPACE.to_string()
}

fn default_year() -> String {
    DEFAULT_YEAR.to_string()
}

/// Graph rendering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_shape")]
    pub shape: String,

    #[serde(default = "default_font_size")]
    pub font_size: u32,

    #[serde(default = "default_true")]
    pub splines: bool,

    #[serde(default = "default_rank_dir")]
    pub rank_dir: String,

    #[serde(default = "default_fill_color")]
    pub fill_color: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            shape: default_shape(),
            font_size: default_font_size(),
            splines: true,
            rank_dir: default_rank_dir(),
            fill_color: default_fill_color(),
        }
    }
}

fn default_shape() -> String {
    "record".to_string()
}

fn default_font_size() -> u32 {
    12
}

fn default_true() -> bool {
    true
}

fn default_rank_dir() -> String {
    "LR".to_string()
}

fn default_fill_color() -> String {
    "white".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level used when neither `RUST_LOG` nor `-v`/`-q` is given
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl From<&ParserConfig> for ModsParser {
    fn from(config: &ParserConfig) -> Self {
        ModsParser::new()
            .with_namespace(config.namespace.clone())
            .with_default_year(config.default_year.clone())
    }
}

impl From<&RenderConfig> for DotStyle {
    fn from(config: &RenderConfig) -> Self {
        DotStyle {
            shape: config.shape.clone(),
            font_size: config.font_size,
            splines: config.splines,
            rank_dir: config.rank_dir.clone(),
            fill_color: config.fill_color.clone(),
        }
    }
}

impl Config {
    /// Effective configuration as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    build_config(Some(path), env_overrides())
}

/// Configuration from defaults and environment variables only
pub fn get_config() -> Result<Config, ConfigError> {
    build_config(None, env_overrides())
}

/// `MODS2DOT_<SECTION>__<KEY>` variables, e.g. `MODS2DOT_RENDER__RANK_DIR=TB`
fn env_overrides() -> config::Environment {
    config::Environment::with_prefix("MODS2DOT")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn build_config(file: Option<&Path>, env: config::Environment) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = file {
        builder = builder.add_source(config::File::from(path).format(config::FileFormat::Toml));
    }
    let settings = builder.add_source(env).build()?;

    Ok(settings.try_deserialize()?)
}

/// Locate a config file: `./mods2dot.toml`, then `<config dir>/mods2dot/config.toml`
pub fn find_config_file() -> Option<PathBuf> {
    find_config_file_in(Path::new("."), dirs::config_dir().as_deref())
}

fn find_config_file_in(working_dir: &Path, config_dir: Option<&Path>) -> Option<PathBuf> {
    let local = working_dir.join(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    config_dir
        .map(|dir| dir.join("mods2dot").join("config.toml"))
        .filter(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.parser.namespace, MODS_NAMESPACE);
        assert_eq!(config.parser.default_year, "1900");
        assert_eq!(DotStyle::from(&config.render), DotStyle::default());
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_parser_from_config() {
        let config = ParserConfig {
            namespace: String::new(),
            default_year: "n.d.".to_string(),
        };
        let parser = ModsParser::from(&config);
        assert_eq!(parser.namespace(), "");

        let references = parser.parse_str(r#"<mods ID="plain"/>"#).unwrap();
        assert_eq!(references.len(), 1);
        assert_eq!(references[0].year, "n.d.");
    }

    #[test]
    fn test_load_partial_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mods2dot.toml");
        std::fs::write(
            &path,
            r#"
[render]
rank_dir = "TB"
font_size = 9

[parser]
default_year = "n.d."
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.render.rank_dir, "TB");
        assert_eq!(config.render.font_size, 9);
        assert_eq!(config.render.shape, "record");
        assert!(config.render.splines);
        assert_eq!(config.parser.default_year, "n.d.");
        assert_eq!(config.parser.namespace, MODS_NAMESPACE);
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.render.fill_color = "lightgrey".to_string();
        std::fs::write(&path, config.to_toml().unwrap()).unwrap();

        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn test_load_nonexistent() {
        assert!(load_config(Path::new("/nonexistent/mods2dot.toml")).is_err());
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid.toml");
        std::fs::write(&path, "invalid = toml = content").unwrap();

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: config::Map<String, String> = [
            ("MODS2DOT_RENDER__RANK_DIR", "TB"),
            ("MODS2DOT_RENDER__FONT_SIZE", "9"),
            ("MODS2DOT_PARSER__DEFAULT_YEAR", "n.d."),
            ("OTHER_RENDER__SHAPE", "box"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = build_config(None, env_overrides().source(Some(vars))).unwrap();
        assert_eq!(config.render.rank_dir, "TB");
        assert_eq!(config.render.font_size, 9);
        assert_eq!(config.render.shape, "record");
        assert_eq!(config.parser.default_year, "n.d.");
    }

    #[test]
    fn test_env_overrides_file_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mods2dot.toml");
        std::fs::write(&path, "[render]\nrank_dir = \"BT\"\nfill_color = \"gold\"\n").unwrap();

        let vars: config::Map<String, String> =
            [("MODS2DOT_RENDER__RANK_DIR".to_string(), "TB".to_string())].into();

        let config = build_config(Some(&path), env_overrides().source(Some(vars))).unwrap();
        assert_eq!(config.render.rank_dir, "TB");
        assert_eq!(config.render.fill_color, "gold");
    }

    #[test]
    fn test_find_config_file_prefers_working_dir() {
        let work = tempdir().unwrap();
        let home = tempdir().unwrap();
        let user_file = home.path().join("mods2dot").join("config.toml");
        std::fs::create_dir_all(user_file.parent().unwrap()).unwrap();
        std::fs::write(&user_file, "").unwrap();

        assert_eq!(
            find_config_file_in(work.path(), Some(home.path())),
            Some(user_file)
        );

        let local_file = work.path().join(LOCAL_CONFIG_FILE);
        std::fs::write(&local_file, "").unwrap();
        assert_eq!(
            find_config_file_in(work.path(), Some(home.path())),
            Some(local_file)
        );
    }

    #[test]
    fn test_find_config_file_none() {
        let work = tempdir().unwrap();
        let home = tempdir().unwrap();
        assert_eq!(find_config_file_in(work.path(), Some(home.path())), None);
        assert_eq!(find_config_file_in(work.path(), None), None);
    }
}
