//! Command-line argument parsing
//!
//! Supports:
//! - Highlighting one file to stdout
//! - Overriding the theme and bracket set from the config file
//! - Disabling coloring without touching the config

use clap::Parser;
use std::path::PathBuf;

use crate::brackets::BracketSet;
use crate::config::HighlightConfig;

/// Rainbow bracket highlighter for Lisp sources
#[derive(Parser, Debug)]
#[command(
    name = "rainbow-parens",
    version,
    about = "Print a Lisp file with brackets colored by nesting depth"
)]
pub struct CliArgs {
    /// File to highlight
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Theme id (built-in or from the themes directory)
    #[arg(short = 't', long, value_name = "ID")]
    pub theme: Option<String>,

    /// Which brackets to pair: parens or all
    #[arg(short = 'b', long, value_name = "SET")]
    pub brackets: Option<BracketSet>,

    /// Print the file without bracket colors
    #[arg(long)]
    pub no_color: bool,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// File to open
    pub file: PathBuf,
    /// Effective highlighting configuration
    pub config: HighlightConfig,
}

impl CliArgs {
    /// Layer the CLI overrides on top of the loaded configuration
    pub fn into_config(self, base: HighlightConfig) -> Result<StartupConfig, String> {
        if self.file.is_dir() {
            return Err(format!("{} is a directory", self.file.display()));
        }

        let mut config = base;
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if let Some(brackets) = self.brackets {
            config.brackets = brackets;
        }
        if self.no_color {
            config.colored_parentheses = false;
        }

        Ok(StartupConfig {
            file: self.file,
            config,
        })
    }
}
