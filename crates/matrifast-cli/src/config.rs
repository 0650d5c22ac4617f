//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `NO_COLOR`, then `MATRIFAST_*` variables with `__` between nesting
//!    levels (`MATRIFAST_OUTPUT__FORMAT=json`,
//!    `MATRIFAST_REGISTRATION__DEFAULT_KIND=docente`)
//! 3. Config file (`--config`, else the platform config directory)
//! 4. Built-in defaults (`#[serde(default)]`)

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use ::config::{Config, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;

/// Prefix of the environment variables read into [`AppConfig`].
pub const ENV_PREFIX: &str = "MATRIFAST";
/// Separates nesting levels in variable names.
const ENV_SEPARATOR: &str = "__";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Output settings.
    pub output: OutputConfig,
    /// Defaults for `register`.
    pub registration: RegistrationConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// One of `auto`, `human`, `plain`, `json`.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationConfig {
    /// `docente` or `representante`; used when neither `--as` nor the
    /// submission names a kind.
    pub default_kind: Option<String>,
    /// Stop at the first invalid submission.
    pub fail_fast: bool,
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// An explicit `config_file` must exist. The default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        match config_file {
            Some(path) => Self::resolve(path, true, None, no_color),
            None => Self::resolve(&Self::config_path(), false, None, no_color),
        }
    }

    /// Layer file, environment and overrides, then validate.
    ///
    /// `env` replaces the process environment when given (tests).
    fn resolve(
        path: &Path,
        required: bool,
        env: Option<Map<String, String>>,
        no_color: bool,
    ) -> anyhow::Result<Self> {
        let layered = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR)
                    .source(env),
            )
            .set_override_option("output.no_color", no_color.then_some(true))?
            .build()
            .with_context(|| format!("reading config file '{}'", path.display()))?;

        let config: Self = layered
            .try_deserialize()
            .with_context(|| format!("parsing config file '{}'", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if OutputFormat::from_name(&self.output.format).is_none() {
            bail!(
                "unknown output format '{}' (expected auto, human, plain or json)",
                self.output.format
            );
        }
        if let Some(kind) = &self.registration.default_kind {
            if !matches!(kind.as_str(), "docente" | "representante") {
                bail!("unknown registration.default_kind '{kind}' (expected docente or representante)");
            }
        }
        Ok(())
    }

    /// The configured output format (already validated by [`AppConfig::load`]).
    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from_name(&self.output.format).unwrap_or_default()
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.matrifast.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("pe", "matrifast", "matrifast")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".matrifast.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn env(vars: &[(&str, &str)]) -> Option<Map<String, String>> {
        Some(
            vars.iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        )
    }

    fn write_config(temp: &TempDir, contents: &str) -> PathBuf {
        let path = temp.path().join("config.toml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.output.format, "auto");
        assert!(!cfg.output.no_color);
        assert_eq!(cfg.registration.default_kind, None);
        assert_eq!(cfg.output_format(), OutputFormat::Auto);
    }

    #[test]
    fn missing_optional_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.toml");
        let cfg = AppConfig::resolve(&path, false, env(&[]), false).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "[registration]\ndefault_kind = \"docente\"\n");

        let cfg = AppConfig::resolve(&path, true, env(&[]), false).unwrap();
        assert_eq!(cfg.registration.default_kind.as_deref(), Some("docente"));
        assert_eq!(cfg.output.format, "auto");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let missing = PathBuf::from("/absolutely/does/not/exist.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "output = 3");
        assert!(AppConfig::resolve(&path, true, env(&[]), false).is_err());
    }

    #[test]
    fn env_overrides_file_values() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "[output]\nformat = \"plain\"\n");

        let cfg = AppConfig::resolve(
            &path,
            true,
            env(&[
                ("MATRIFAST_OUTPUT__FORMAT", "json"),
                ("MATRIFAST_REGISTRATION__DEFAULT_KIND", "representante"),
                ("UNRELATED", "x"),
            ]),
            true,
        )
        .unwrap();
        assert_eq!(cfg.output_format(), OutputFormat::Json);
        assert_eq!(cfg.registration.default_kind.as_deref(), Some("representante"));
        assert!(cfg.output.no_color);
    }

    #[test]
    fn no_color_off_keeps_file_value() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "[output]\nno_color = true\n");
        let cfg = AppConfig::resolve(&path, true, env(&[]), false).unwrap();
        assert!(cfg.output.no_color);
    }

    #[test]
    fn unknown_values_fail_validation() {
        let mut cfg = AppConfig::default();
        cfg.output.format = "yaml".into();
        assert!(cfg.validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.registration.default_kind = Some("alumno".into());
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn unknown_env_value_fails_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.toml");
        let result =
            AppConfig::resolve(&path, false, env(&[("MATRIFAST_OUTPUT__FORMAT", "yaml")]), false);
        assert!(result.is_err());
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
