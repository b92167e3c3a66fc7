//! CLI configuration, loadable from TOML.

use anyhow::Context;
use serde::Deserialize;

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "EEP_CONFIG";

/// Top-level configuration for the `eep` binary.
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Reject input and output files without a `.bin` extension.
    #[serde(default = "default_true")]
    pub require_bin_extension: bool,
    /// Where patched dumps go.
    #[serde(default)]
    pub output: OutputConfig,
    /// Log format and default filter.
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// File name used next to the source when `--output` is not given.
    #[serde(default = "default_output_name")]
    pub file_name: String,
    /// Back up the source before overwriting it in place.
    #[serde(default = "default_true")]
    pub backup: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

fn default_true() -> bool {
    true
}

fn default_output_name() -> String {
    "modified.bin".to_string()
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            require_bin_extension: true,
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_name: default_output_name(),
            backup: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: default_filter(),
        }
    }
}

impl CliConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents =
            std::fs::read_to_string(path).with_context(|| format!("reading config {path}"))?;
        let config: Self =
            toml::from_str(&contents).with_context(|| format!("parsing config {path}"))?;
        Ok(config)
    }

    /// `--config` path, else `$EEP_CONFIG`, else defaults.
    pub fn load(explicit: Option<&str>) -> anyhow::Result<Self> {
        let from_env = std::env::var(CONFIG_ENV).ok();
        Self::resolve(explicit, from_env.as_deref())
    }

    pub fn resolve(explicit: Option<&str>, from_env: Option<&str>) -> anyhow::Result<Self> {
        match explicit.or(from_env) {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_empty_config() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert!(config.require_bin_extension);
        assert_eq!(config.output.file_name, "modified.bin");
        assert!(config.output.backup);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn deserialize_full_config() {
        let toml = r#"
require_bin_extension = false

[output]
file_name = "patched.bin"
backup = false

[logging]
format = "json"
filter = "eep_tools=debug"
"#;
        let config: CliConfig = toml::from_str(toml).unwrap();
        assert!(!config.require_bin_extension);
        assert_eq!(config.output.file_name, "patched.bin");
        assert!(!config.output.backup);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.filter, "eep_tools=debug");
    }

    #[test]
    fn partial_section_keeps_defaults() {
        let toml = r#"
[output]
backup = false
"#;
        let config: CliConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.output.file_name, "modified.bin");
        assert!(!config.output.backup);
    }

    #[test]
    fn unknown_log_format_rejected() {
        let toml = r#"
[logging]
format = "xml"
"#;
        assert!(toml::from_str::<CliConfig>(toml).is_err());
    }

    #[test]
    fn resolve_without_paths_uses_defaults() {
        let config = CliConfig::resolve(None, None).unwrap();
        assert!(config.require_bin_extension);
    }

    #[test]
    fn resolve_missing_explicit_file_fails() {
        let err = CliConfig::resolve(Some("/nonexistent/eep.toml"), None).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/eep.toml"));
    }

    #[test]
    fn explicit_path_wins_over_env() {
        let err = CliConfig::resolve(Some("/nonexistent/a.toml"), Some("/nonexistent/b.toml"))
            .unwrap_err();
        assert!(err.to_string().contains("a.toml"));
    }
}
