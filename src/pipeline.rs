use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};

use crate::classify::{Classifier, manifest_key};
use crate::cleaner::clean_outputs;
use crate::config::Config;
use crate::error::{HashError, Result};
use crate::hasher::hash_file;
use crate::manifest::{Manifest, ManifestEntry};
use crate::scanner::discover_assets;

/// What a completed run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub hashed: usize,
    pub skipped: usize,
    /// Where the manifest was written, `None` when nothing was hashed.
    pub manifest: Option<PathBuf>,
}

enum Outcome {
    Skipped,
    Hashed(ManifestEntry),
}

/// Runs clean, discover, hash and copy, then writes the manifest.
///
/// Files are handled one at a time. The first failure aborts the run
/// without writing a manifest; copies made before it stay on disk.
pub struct Generator<'a> {
    config: &'a Config,
    progress: bool,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            progress: false,
            cancel: None,
        }
    }

    /// Show a progress bar while hashing.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Checked between files; once set the run stops with
    /// [`HashError::Cancelled`] and no manifest is written.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn run(&self) -> Result<Summary> {
        self.config.check_assets_dir()?;
        clean_outputs(self.config)?;

        let files = discover_assets(self.config)?;
        let classifier = Classifier::new(self.config);
        let pb = self.progress_bar(files.len() as u64);

        let mut entries = Vec::with_capacity(files.len());
        let mut skipped = 0;

        for path in &files {
            if self.is_cancelled() {
                pb.abandon_with_message("Cancelled");
                return Err(HashError::Cancelled(entries.len()));
            }

            match self.process_file(&classifier, path) {
                Ok(Outcome::Hashed(entry)) => entries.push(entry),
                Ok(Outcome::Skipped) => skipped += 1,
                Err(e) => {
                    pb.abandon();
                    return Err(e);
                }
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        let hashed = entries.len();
        let manifest = if hashed > 0 {
            let path = self.config.manifest_path();
            Manifest::from_entries(entries).write(&path)?;
            Some(path)
        } else {
            info!("No files hashed, manifest left untouched");
            None
        };

        Ok(Summary {
            hashed,
            skipped,
            manifest,
        })
    }

    fn process_file(&self, classifier: &Classifier, path: &Path) -> Result<Outcome> {
        let class = classifier.classify(path)?;

        if class.already_hashed {
            let shown = path.strip_prefix(&self.config.assets_dir).unwrap_or(path);
            info!(
                "skipping {}, seems to be hashed already",
                shown.display().to_string().cyan()
            );
            return Ok(Outcome::Skipped);
        }

        let hash = hash_file(path)?;
        let target = class.output_dir.join(hashed_file_name(path, &hash));

        copy_asset(path, &target)?;
        debug!("Copied '{}' -> '{}'", path.display(), target.display());

        Ok(Outcome::Hashed(ManifestEntry {
            source: class.key,
            hashed: manifest_key(&target)?,
        }))
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.set_message("Hashing assets...");
        pb
    }
}

/// Runs a [`Generator`] with no progress bar and no cancellation.
pub fn generate(config: &Config) -> Result<Summary> {
    Generator::new(config).run()
}

/// `name.ext` becomes `name.<hash>.ext`.
pub fn hashed_file_name(path: &Path, hash: &str) -> OsString {
    let mut name = path.file_stem().map(OsString::from).unwrap_or_default();
    name.push(".");
    name.push(hash);
    if let Some(ext) = path.extension() {
        name.push(".");
        name.push(ext);
    }
    name
}

fn copy_asset(from: &Path, to: &Path) -> Result<()> {
    let copy_err = |source| HashError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(copy_err)?;
    }
    fs::copy(from, to).map_err(copy_err)?;
    Ok(())
}
