use clap::Parser;
use std::path::PathBuf;

use crate::config::{Config, DEFAULT_EXTENSIONS, DEFAULT_SUFFIX, FileConfig};
use crate::error::{HashError, Result};

#[derive(Parser, Debug)]
#[command(name = "hash-assets", version)]
#[command(about = "Copy static assets to content-hashed file names and write a manifest")]
pub struct Cli {
    /// Assets directory holding one sub-directory per extension
    pub assets_dir: Option<PathBuf>,

    /// Extensions to hash, repeatable or comma separated [default: js,css]
    #[arg(short, long = "ext", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Suffix for the hashed output directories, as in `js-<SUFFIX>` [default: hashed]
    #[arg(short, long)]
    pub suffix: Option<String>,

    /// TOML file providing assets_dir, extensions and suffix
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Do not draw a progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl Cli {
    /// Command line values win over the config file, which wins over the
    /// built-in defaults.
    pub fn resolve(&self) -> Result<Config> {
        let file = match &self.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        let assets_dir = self
            .assets_dir
            .clone()
            .or(file.assets_dir)
            .ok_or_else(|| HashError::InvalidConfig("no assets directory given".into()))?;

        let extensions = if !self.extensions.is_empty() {
            self.extensions.clone()
        } else if let Some(exts) = file.extensions {
            exts
        } else {
            DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
        };

        let suffix = self
            .suffix
            .clone()
            .or(file.suffix)
            .unwrap_or_else(|| DEFAULT_SUFFIX.to_string());

        Config::new(assets_dir, extensions, suffix)
    }
}
