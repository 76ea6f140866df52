//! Per-file path decisions: skip or hash, where the copy goes, and which
//! manifest key it gets.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::config::Config;
use crate::error::{HashError, Result};
use crate::utils::to_slash;

/// `.` or `-`, eight word characters, `.`, then an extension.
///
/// This is a filename heuristic only. Names such as `release-20231201.tar`
/// match it too and are treated as already hashed.
static HASHED_FILENAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.-][0-9A-Za-z_]{8}\.[0-9A-Za-z_]+$").unwrap());

const ASSETS_SEGMENT: &str = "assets/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub already_hashed: bool,
    pub output_dir: PathBuf,
    pub key: String,
}

pub struct Classifier<'a> {
    config: &'a Config,
}

impl<'a> Classifier<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn classify(&self, path: &Path) -> Result<Classification> {
        let file_name = path.file_name().map(OsStr::to_string_lossy).unwrap_or_default();
        let dir = path.parent().unwrap_or(Path::new(""));

        Ok(Classification {
            already_hashed: is_already_hashed(&file_name),
            output_dir: output_dir(dir, &self.config.assets_dir, &self.config.extensions, &self.config.suffix),
            key: manifest_key(path)?,
        })
    }
}

pub fn is_already_hashed(file_name: &str) -> bool {
    HASHED_FILENAME.is_match(file_name)
}

/// Maps a source directory to its hashed sibling.
///
/// Only the first segment below `root` is considered: when it names a
/// tracked extension it becomes `<ext>-<suffix>` and the rest of the path is
/// kept. Deeper segments, segments above `root`, and directories outside
/// `root` are returned unchanged.
pub fn output_dir(dir: &Path, root: &Path, extensions: &[String], suffix: &str) -> PathBuf {
    let Ok(rel) = dir.strip_prefix(root) else {
        return dir.to_path_buf();
    };
    let mut segments = rel.components();

    let ext = match segments.next() {
        Some(Component::Normal(top)) => extensions.iter().find(|ext| top == OsStr::new(ext.as_str())),
        _ => None,
    };
    match ext {
        Some(ext) => {
            let mut out = root.join(format!("{ext}-{suffix}"));
            let rest = segments.as_path();
            if !rest.as_os_str().is_empty() {
                out.push(rest);
            }
            out
        }
        None => dir.to_path_buf(),
    }
}

/// The path from its last `assets/` onwards, always `/`-separated.
pub fn manifest_key(path: &Path) -> Result<String> {
    let slashed = to_slash(path);
    match slashed.rfind(ASSETS_SEGMENT) {
        Some(start) => Ok(slashed[start..].to_string()),
        None => Err(HashError::MissingAssetsSegment(path.to_path_buf())),
    }
}
