//! Tool settings.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns it; the core crate never sees it. It is distinct from the
//! project configuration (`tachi.yaml`), which describes what to generate.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `TACHI_DEFAULTS__STRATEGY=trunk-release`
//! 3. Settings file (TOML): `--settings FILE` or [`AppConfig::settings_path`]
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use tachi_core::domain::{Strategy, defaults};

/// Tool settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Defaults offered by `init` and interactive mode.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defaults {
    pub strategy: String,
    pub location: String,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: Defaults {
                strategy: Strategy::default().to_string(),
                location: defaults::location(),
                output_dir: PathBuf::from("."),
            },
            output: OutputConfig { no_color: false },
        }
    }
}

impl AppConfig {
    /// Load settings, layering file and environment over the defaults.
    ///
    /// An explicit `settings_file` must exist; the default location is
    /// optional.
    pub fn load(settings_file: Option<&Path>) -> anyhow::Result<Self> {
        let (path, required) = match settings_file {
            Some(path) => (path.to_path_buf(), true),
            None => (Self::settings_path(), false),
        };

        let built = Config::builder()
            .add_source(Config::try_from(&Self::default()).context("serialising defaults")?)
            .add_source(File::from(path.clone()).format(FileFormat::Toml).required(required))
            .add_source(Self::environment())
            .build()
            .with_context(|| format!("reading settings from {}", path.display()))?;

        let config: Self = built
            .try_deserialize()
            .context("settings have an unexpected shape")?;

        config
            .default_strategy()
            .with_context(|| format!("defaults.strategy = {:?}", config.defaults.strategy))?;

        Ok(config)
    }

    /// `TACHI_<SECTION>__<KEY>` variables, e.g. `TACHI_DEFAULTS__LOCATION`.
    fn environment() -> Environment {
        Environment::with_prefix("TACHI")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// The configured default strategy.
    pub fn default_strategy(&self) -> anyhow::Result<Strategy> {
        Ok(self.defaults.strategy.parse::<Strategy>()?)
    }

    /// Path to the default settings file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.tachi.toml` in the current directory.
    pub fn settings_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "tachi", "tachi")
            .map(|d| d.config_dir().join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from(".tachi.toml"))
    }
}
