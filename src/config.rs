use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::model::DateFormats;

/// Configuration file structure for jenkins-state.
///
/// Lets users override the upstream date formats and the default output
/// style. Files are looked up in the current directory, then in the user's
/// configuration directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Date formats for the workspace and RSS sources
    #[serde(default)]
    pub dates: DateFormats,

    /// Output format preferences
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Default output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[serde(default)]
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
}

const CANDIDATES: [&str; 4] = [
    "jenkins-state.toml",
    "jenkins-state.json",
    "jenkins-state.yaml",
    "jenkins-state.yml",
];

impl Config {
    /// Load configuration from a file.
    ///
    /// Searches for configuration files in this order:
    /// 1. Specified path
    /// 2. ./jenkins-state.toml
    /// 3. ./jenkins-state.json
    /// 4. ./jenkins-state.yaml
    /// 5. ./jenkins-state.yml
    /// 6. `<config dir>/jenkins-state/config.toml`
    ///
    /// Returns default configuration if no file is found.
    ///
    /// # Errors
    ///
    /// Returns an error if a found file cannot be read or parsed, or if it
    /// names an invalid date format.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_path(path);
        }

        let user_config =
            dirs::config_dir().map(|dir| dir.join("jenkins-state").join("config.toml"));
        let candidates = CANDIDATES
            .into_iter()
            .map(PathBuf::from)
            .chain(user_config);

        for candidate in candidates {
            if candidate.exists() {
                return Self::load_from_path(&candidate);
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file path.
    fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");

        let config: Self = match extension {
            "toml" => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?,
            "json" => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?,
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?,
            _ => toml::from_str(&contents)
                .or_else(|_| serde_json::from_str(&contents))
                .or_else(|_| serde_yaml::from_str(&contents))
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?,
        };

        config
            .dates
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        debug!("Loaded configuration from: {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::dates::{RSS_DATE_FORMAT, WORKSPACE_DATE_FORMAT};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.dates.workspace_format, WORKSPACE_DATE_FORMAT);
        assert_eq!(config.dates.rss_format, RSS_DATE_FORMAT);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_load_toml_config() {
        let mut temp_file = NamedTempFile::with_suffix(".toml").unwrap();
        let toml_content = r#"
[dates]
workspace-format = "%Y%m%d-%H%M%S"

[output]
format = "table"
pretty = true
"#;
        write!(temp_file, "{}", toml_content).unwrap();

        let config = Config::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config.dates.workspace_format, "%Y%m%d-%H%M%S");
        assert_eq!(config.dates.rss_format, RSS_DATE_FORMAT);
        assert_eq!(config.output.format, OutputFormat::Table);
        assert!(config.output.pretty);
    }

    #[test]
    fn test_load_json_config() {
        let mut temp_file = NamedTempFile::with_suffix(".json").unwrap();
        let json_content = r#"{
  "dates": {
    "rss-format": "%a, %d %b %Y %H:%M:%S GMT"
  }
}"#;
        write!(temp_file, "{}", json_content).unwrap();

        let config = Config::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config.dates.rss_format, "%a, %d %b %Y %H:%M:%S GMT");
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_load_yaml_config() {
        let mut temp_file = NamedTempFile::with_suffix(".yml").unwrap();
        write!(temp_file, "output:\n  format: table\n").unwrap();

        let config = Config::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config.output.format, OutputFormat::Table);
        assert_eq!(config.dates, DateFormats::default());
    }

    #[test]
    fn test_invalid_date_format_is_rejected() {
        let mut temp_file = NamedTempFile::with_suffix(".toml").unwrap();
        write!(temp_file, "[dates]\nrss-format = \"%Q\"\n").unwrap();

        let err = Config::load_from_path(temp_file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("rss-format"));
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let result = Config::load(Some(Path::new("does-not-exist.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_serializes_to_toml() {
        let config = Config {
            output: OutputConfig {
                format: OutputFormat::Table,
                pretty: true,
            },
            ..Config::default()
        };

        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("workspace-format"));
        assert_eq!(toml::from_str::<Config>(&toml).unwrap(), config);
    }
}
