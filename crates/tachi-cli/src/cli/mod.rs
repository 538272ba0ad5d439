//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use tachi_core::domain::Strategy;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "tachi",
    bin_name = "tachi",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "tachi - GitHub Actions CI/CD generator",
    long_about = "tachi generates GitHub Actions workflows, Azure Container Apps \
                  configurations and a setup guide from one YAML project file.",
    after_help = "EXAMPLES:\n\
        \x20 tachi init\n\
        \x20 tachi validate -c tachi.yaml\n\
        \x20 tachi generate -c tachi.yaml -o . --dry-run\n\
        \x20 tachi completions bash > /usr/share/bash-completion/completions/tachi",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate a tachi configuration file.
    #[command(
        visible_alias = "check",
        about = "Validate a tachi configuration file",
        after_help = "EXAMPLES:\n\
            \x20 tachi validate -c tachi.yaml\n\
            \x20 tachi validate -c tachi.yaml --verbose-config\n\
            \x20 tachi --output-format json validate -c tachi.yaml"
    )]
    Validate(ValidateArgs),

    /// Generate workflows, service configs and the setup guide.
    #[command(
        visible_alias = "gen",
        about = "Generate GitHub Actions workflows and configurations",
        after_help = "EXAMPLES:\n\
            \x20 tachi generate -c tachi.yaml\n\
            \x20 tachi generate -c tachi.yaml -o deploy --dry-run\n\
            \x20 tachi generate -c tachi.yaml -o deploy --force\n\
            \x20 tachi generate               # interactive mode"
    )]
    Generate(GenerateArgs),

    /// Write a starter project configuration.
    #[command(
        about = "Create a starter tachi.yaml",
        after_help = "EXAMPLES:\n\
            \x20 tachi init\n\
            \x20 tachi init -o infra/tachi.yaml --strategy trunk-release-stage"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 tachi completions bash > ~/.local/share/bash-completion/completions/tachi\n\
            \x20 tachi completions zsh  > ~/.zfunc/_tachi\n\
            \x20 tachi completions fish > ~/.config/fish/completions/tachi.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect tool settings.
    #[command(
        about = "Show tool settings",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 tachi settings get defaults.strategy\n\
            \x20 tachi settings list\n\
            \x20 tachi settings path"
    )]
    Settings(SettingsCommands),
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `tachi validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Project configuration file.
    #[arg(short = 'c', long = "config", value_name = "FILE", help = "Configuration file")]
    pub config: PathBuf,

    /// Also print the raw document and per-service build settings.
    #[arg(long = "verbose-config", help = "Show raw configuration and build details")]
    pub verbose_config: bool,
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `tachi generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Project configuration file. Omit to answer prompts instead.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Configuration file (omit for interactive mode)"
    )]
    pub config: Option<PathBuf>,

    /// Directory the generated tree is written under.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: settings or current directory)"
    )]
    pub output: Option<PathBuf>,

    /// List what would be written without writing anything.
    #[arg(long = "dry-run", help = "Show what would be generated without writing")]
    pub dry_run: bool,

    /// Write into a non-empty directory without asking.
    #[arg(long = "force", help = "Overwrite files in a non-empty output directory")]
    pub force: bool,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation prompts")]
    pub yes: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `tachi init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Where to write the starter file.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        default_value = "tachi.yaml",
        help = "File to create"
    )]
    pub output: PathBuf,

    /// Strategy for the starter file (default: settings).
    #[arg(long = "strategy", value_enum, help = "Deployment strategy")]
    pub strategy: Option<StrategyArg>,

    /// Overwrite an existing file.
    #[arg(short = 'f', long = "force", help = "Overwrite an existing file")]
    pub force: bool,
}

/// Deployment strategies accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    TrunkDirect,
    TrunkRelease,
    TrunkReleaseStage,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::TrunkDirect => Strategy::TrunkDirect,
            StrategyArg::TrunkRelease => Strategy::TrunkRelease,
            StrategyArg::TrunkReleaseStage => Strategy::TrunkReleaseStage,
        }
    }
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `tachi completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── settings subcommands ──────────────────────────────────────────────────────

/// Subcommands for `tachi settings`.
#[derive(Debug, Subcommand)]
pub enum SettingsCommands {
    /// Print the value of a settings key.
    Get {
        /// Dotted key path, e.g. `defaults.strategy`.
        key: String,
    },
    /// Print all settings.
    List,
    /// Print the path of the default settings file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_validate_command() {
        let cli = Cli::parse_from(["tachi", "validate", "-c", "tachi.yaml"]);
        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.config, PathBuf::from("tachi.yaml"));
                assert!(!args.verbose_config);
            }
            other => panic!("expected Validate, got {other:?}"),
        }
    }

    #[test]
    fn validate_requires_config() {
        assert!(Cli::try_parse_from(["tachi", "validate"]).is_err());
    }

    #[test]
    fn generate_config_is_optional() {
        let cli = Cli::parse_from(["tachi", "generate", "--dry-run"]);
        match cli.command {
            Commands::Generate(args) => {
                assert!(args.config.is_none());
                assert!(args.dry_run);
            }
            other => panic!("expected Generate, got {other:?}"),
        }
    }

    #[test]
    fn strategy_values_use_kebab_case() {
        let cli = Cli::parse_from(["tachi", "init", "--strategy", "trunk-release-stage"]);
        match cli.command {
            Commands::Init(args) => {
                assert_eq!(args.strategy.map(Strategy::from), Some(Strategy::TrunkReleaseStage));
            }
            other => panic!("expected Init, got {other:?}"),
        }
    }

    #[test]
    fn strategy_arg_covers_every_strategy() {
        let from_cli: Vec<Strategy> = StrategyArg::value_variants()
            .iter()
            .map(|a| Strategy::from(*a))
            .collect();
        assert_eq!(from_cli, Strategy::all().collect::<Vec<_>>());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["tachi", "--quiet", "--verbose", "settings", "path"]);
        assert!(result.is_err());
    }

    #[test]
    fn settings_flag_is_global() {
        let cli = Cli::parse_from(["tachi", "settings", "list", "--settings", "s.toml"]);
        assert_eq!(cli.global.settings, Some(PathBuf::from("s.toml")));
    }
}
