//! mkge-picker - MadKitGroupExtension download picker
//!
//! Scans a downloads directory of `mkge-*` release archives and turns it into
//! a cascading version picker.
//!
//! # Directory Layout
//!
//! ```text
//! downloads/
//! ├── mkge-1.2/
//! │   ├── WithMadKit/      # mkge-1.2.3Stable+madkit-5.1.0.0[_withsrc][_withdoc.zip|.jar]
//! │   └── WithoutMadKit/   # mkge-1.2.3Stable[_withsrc][_withdoc.zip|.jar]
//! └── ...
//! ```
//!
//! # Configuration
//!
//! Settings come from `--config` (or `MKGE_CONFIG`), then environment
//! variables, then flags; later sources win.

#![allow(clippy::missing_errors_doc)]

pub mod cmd;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mkge_core::{InvalidNamePolicy, PickerConfig};
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "mkge-picker")]
#[command(author, version, about = "MadKitGroupExtension download picker")]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, global = true, env = "MKGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the mkge-* release directories
    #[arg(long, global = true, env = "MKGE_DOWNLOADS_DIR")]
    pub downloads_dir: Option<PathBuf>,

    /// Public URL the downloads directory is served from
    #[arg(long, global = true, env = "MKGE_BASE_URL")]
    pub base_url: Option<String>,

    /// Skip archives with malformed names instead of failing
    #[arg(long, global = true)]
    pub skip_invalid: bool,

    /// Show debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render the HTML download page
    Render {
        /// Write the page here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the version tree as JSON
    Tree {
        /// Indent the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// List every available archive, most recent first
    List,
    /// Print the download URL for a selection
    Url(UrlArgs),
}

/// Selection replayed by the `url` command; omitted levels keep the most recent entry.
#[derive(Debug, Args)]
pub struct UrlArgs {
    /// Major version
    #[arg(long)]
    pub major: Option<String>,
    /// Minor version
    #[arg(long)]
    pub minor: Option<String>,
    /// Revision
    #[arg(long)]
    pub revision: Option<String>,
    /// Release type (Stable, Alpha<N>, Beta<N>)
    #[arg(long = "type")]
    pub release: Option<String>,
    /// Bundled MadKit version, or "none"
    #[arg(long)]
    pub madkit: Option<String>,
    /// Leave the source code out
    #[arg(long)]
    pub no_src: bool,
    /// Leave the documentation out
    #[arg(long)]
    pub no_doc: bool,
}

impl Cli {
    /// Resolve the effective configuration.
    pub fn settings(&self) -> Result<PickerConfig> {
        let mut config = match &self.config {
            Some(path) => PickerConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => PickerConfig::default(),
        };

        if let Some(dir) = &self.downloads_dir {
            config.downloads_dir.clone_from(dir);
        }
        if let Some(url) = &self.base_url {
            config.base_url.clone_from(url);
        }
        if self.skip_invalid {
            config.on_invalid = InvalidNamePolicy::Skip;
        }
        Ok(config.normalized())
    }
}
