use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::error::{HashError, Result};

pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "css"];
pub const DEFAULT_SUFFIX: &str = "hashed";
pub const MANIFEST_FILE: &str = "manifest.json";

/// Validated, immutable settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root holding one sub-directory per tracked extension.
    pub assets_dir: PathBuf,
    /// Tracked extensions without the leading dot, in priority order.
    pub extensions: Vec<String>,
    /// Appended as `<ext>-<suffix>` to name the hashed output directories.
    pub suffix: String,
}

impl Config {
    /// Normalizes the extension list and rejects settings that cannot
    /// produce a sane output layout.
    ///
    /// Extensions are trimmed, lose a single leading `.`, and duplicates are
    /// dropped keeping the first occurrence.
    pub fn new<I, S>(assets_dir: impl Into<PathBuf>, extensions: I, suffix: impl Into<String>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for ext in extensions {
            let ext = ext.as_ref().trim();
            let ext = ext.strip_prefix('.').unwrap_or(ext);
            if !normalized.iter().any(|e| e == ext) {
                normalized.push(ext.to_string());
            }
        }

        let config = Self {
            assets_dir: assets_dir.into(),
            extensions: normalized,
            suffix: suffix.into().trim().to_string(),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.extensions.is_empty() {
            return Err(HashError::InvalidConfig("no extensions given".into()));
        }
        for ext in &self.extensions {
            if ext.is_empty() || ext.starts_with('.') || has_separator(ext) {
                return Err(HashError::InvalidConfig(format!("bad extension '{ext}'")));
            }
        }
        if self.suffix.is_empty() || has_separator(&self.suffix) {
            return Err(HashError::InvalidConfig(format!("bad suffix '{}'", self.suffix)));
        }
        // Cleanup deletes every output directory, so none may be a source directory.
        for ext in &self.extensions {
            let output = format!("{}-{}", ext, self.suffix);
            if self.is_tracked(&output) {
                return Err(HashError::InvalidConfig(format!(
                    "extension '{output}' collides with the output directory of '{ext}'"
                )));
            }
        }
        Ok(())
    }

    /// Fails unless the assets directory exists and is a directory.
    pub fn check_assets_dir(&self) -> Result<()> {
        if !self.assets_dir.is_dir() {
            return Err(HashError::InvalidConfig(format!(
                "assets directory '{}' does not exist or is not a directory",
                self.assets_dir.display()
            )));
        }
        Ok(())
    }

    /// `<assets_dir>/<ext>-<suffix>`
    pub fn output_dir(&self, ext: &str) -> PathBuf {
        self.assets_dir.join(format!("{}-{}", ext, self.suffix))
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.assets_dir.join(MANIFEST_FILE)
    }

    pub fn is_tracked(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e == ext)
    }
}

fn has_separator(s: &str) -> bool {
    s.contains('/') || s.contains('\\')
}

/// Optional settings read from a TOML file. Every key may be omitted.
///
/// ```toml
/// assets_dir = "public/assets"
/// extensions = ["js", "css", "svg"]
/// suffix = "hashed"
/// ```
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub assets_dir: Option<PathBuf>,
    pub extensions: Option<Vec<String>>,
    pub suffix: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading config file: '{}'", path.display());
        let text = fs::read_to_string(path).map_err(|source| HashError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        let mut parsed: Self = toml::from_str(&text).map_err(|source| HashError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        // A relative assets_dir is taken relative to the file that names it.
        if let Some(dir) = parsed.assets_dir.take() {
            let base = path.parent().unwrap_or(Path::new(""));
            parsed.assets_dir = Some(if dir.is_relative() { base.join(dir) } else { dir });
        }
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn extensions_are_normalized() {
        let config = Config::new("assets", [" .js", "css", "js", "css "], "hashed").unwrap();
        assert_eq!(config.extensions, vec!["js", "css"]);
        assert!(config.is_tracked("css"));
        assert!(!config.is_tracked("json"));
    }

    #[test]
    fn rejects_unusable_settings() {
        let empty: [&str; 0] = [];
        assert!(Config::new("assets", empty, "hashed").is_err());
        assert!(Config::new("assets", ["js/x"], "hashed").is_err());
        assert!(Config::new("assets", [".."], "hashed").is_err());
        assert!(Config::new("assets", ["js"], "").is_err());
        assert!(Config::new("assets", ["js"], "a\\b").is_err());
    }

    #[test]
    fn rejects_extension_named_like_an_output_dir() {
        let err = Config::new("assets", ["js", "js-hashed"], "hashed").unwrap_err();
        assert!(matches!(err, HashError::InvalidConfig(_)));
        assert!(Config::new("assets", ["js", "js-hashed"], "v").is_ok());
    }

    #[test]
    fn derived_paths() {
        let config = Config::new("/proj/assets", ["js"], "hashed").unwrap();
        assert_eq!(config.output_dir("js"), PathBuf::from("/proj/assets/js-hashed"));
        assert_eq!(config.manifest_path(), PathBuf::from("/proj/assets/manifest.json"));
    }

    #[test]
    fn missing_assets_dir_is_rejected() {
        let dir = TempDir::new().unwrap();
        let config = Config::new(dir.path().join("nope"), ["js"], "hashed").unwrap();
        assert!(matches!(config.check_assets_dir(), Err(HashError::InvalidConfig(_))));

        let config = Config::new(dir.path(), ["js"], "hashed").unwrap();
        assert!(config.check_assets_dir().is_ok());
    }

    #[test]
    fn file_config_resolves_relative_dir() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("hash-assets.toml");
        fs::write(&file, "assets_dir = \"public/assets\"\nextensions = [\"svg\"]\n").unwrap();

        let parsed = FileConfig::load(&file).unwrap();
        assert_eq!(parsed.assets_dir, Some(dir.path().join("public/assets")));
        assert_eq!(parsed.extensions, Some(vec!["svg".to_string()]));
        assert_eq!(parsed.suffix, None);
    }

    #[test]
    fn file_config_rejects_unknown_keys() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("bad.toml");
        fs::write(&file, "assets = \"x\"\n").unwrap();
        assert!(matches!(FileConfig::load(&file), Err(HashError::ConfigParse { .. })));
    }
}
