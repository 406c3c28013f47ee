//! Command-line interface definitions.

use clap::Parser;
use std::path::PathBuf;

/// Config file read when `--config` is not given. Missing is fine.
pub const DEFAULT_CONFIG: &str = "coinpulse.toml";

/// Crypto portfolio valuation sampler
#[derive(Parser, Debug)]
#[command(name = "coinpulse")]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Run a single sampling cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Color output mode [auto, always, never]
    #[arg(long, default_value = "auto", hide_possible_values = true)]
    pub color: ColorChoice,
}

impl Cli {
    /// Whether the config path is the implicit default.
    #[must_use]
    pub fn uses_default_config(&self) -> bool {
        self.config.as_os_str() == DEFAULT_CONFIG
    }
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Apply this choice to all styled output.
    pub fn apply(self) {
        match self {
            ColorChoice::Auto => owo_colors::unset_override(),
            ColorChoice::Always => owo_colors::set_override(true),
            ColorChoice::Never => owo_colors::set_override(false),
        }
    }
}
