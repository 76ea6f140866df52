use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use log::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::error::{HashError, Result};
use crate::utils::format_number;

/// Lists `<assets_dir>/<ext>/**/*.<ext>` for every tracked extension.
///
/// Both the top-level directory and the file's own extension must be
/// tracked, though not necessarily the same one. Only the tracked
/// extension directories are walked. Dot files and dot directories are not
/// matched. Entries come back sorted by file name within each directory.
pub fn discover_assets(config: &Config) -> Result<Vec<PathBuf>> {
    let root = &config.assets_dir;
    info!("Scanning {}", root.display());

    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| match entry.depth() {
            0 => true,
            1 => !is_hidden(entry) && is_tracked_dir(entry, config),
            _ => !is_hidden(entry),
        });

    for entry in walker {
        let entry = entry.map_err(|source| HashError::Walk {
            path: source.path().unwrap_or(root.as_path()).to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if is_candidate(path, root, config) {
            debug!("Found asset: '{}'", path.display());
            files.push(path.to_path_buf());
        }
    }

    info!("Found {} candidate files", format_number(files.len()));
    Ok(files)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|name| name.starts_with('.'))
}

fn is_tracked_dir(entry: &DirEntry, config: &Config) -> bool {
    entry.file_type().is_dir() && entry.file_name().to_str().is_some_and(|name| config.is_tracked(name))
}

fn is_candidate(path: &Path, root: &Path, config: &Config) -> bool {
    let Ok(rel) = path.strip_prefix(root) else {
        return false;
    };

    let mut components = rel.components();
    let in_tracked_dir = match components.next() {
        Some(Component::Normal(top)) => top.to_str().is_some_and(|top| config.is_tracked(top)),
        _ => false,
    };
    // The file itself must sit below the extension directory.
    let nested = components.next().is_some();
    let tracked_ext = path
        .extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| config.is_tracked(ext));

    in_tracked_dir && nested && tracked_ext
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, rel).unwrap();
    }

    fn rel_names(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| crate::utils::to_slash(p.strip_prefix(root).unwrap()))
            .collect()
    }

    #[test]
    fn requires_tracked_dir_and_tracked_extension() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "js/app.js");
        touch(root, "js/deep/nested/util.js");
        touch(root, "js/readme.md");
        touch(root, "css/site.css");
        touch(root, "css/inline.js");
        touch(root, "img/logo.js");
        touch(root, "top.js");
        touch(root, "json/data.js");
        touch(root, "js-hashed/app.12345678.js");

        let config = Config::new(root, ["js", "css"], "hashed").unwrap();
        let mut found = rel_names(root, &discover_assets(&config).unwrap());
        found.sort();

        assert_eq!(
            found,
            vec!["css/inline.js", "css/site.css", "js/app.js", "js/deep/nested/util.js"]
        );
    }

    #[test]
    fn skips_dot_entries() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "js/.hidden.js");
        touch(root, "js/.cache/app.js");
        touch(root, "js/app.js");

        let config = Config::new(root, ["js"], "hashed").unwrap();
        assert_eq!(rel_names(root, &discover_assets(&config).unwrap()), vec!["js/app.js"]);
    }

    #[cfg(unix)]
    #[test]
    fn untracked_symlink_loop_is_not_walked() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "js/app.js");
        fs::create_dir_all(root.join("img")).unwrap();
        std::os::unix::fs::symlink(root, root.join("img/up")).unwrap();

        let config = Config::new(root, ["js"], "hashed").unwrap();
        assert_eq!(rel_names(root, &discover_assets(&config).unwrap()), vec!["js/app.js"]);
    }

    #[cfg(unix)]
    #[test]
    fn walk_error_names_failing_entry() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "js/app.js");
        std::os::unix::fs::symlink(root.join("js"), root.join("js/loop")).unwrap();

        let config = Config::new(root, ["js"], "hashed").unwrap();
        match discover_assets(&config) {
            Err(HashError::Walk { path, .. }) => assert_eq!(path, root.join("js/loop")),
            other => panic!("expected walk error, got {other:?}"),
        }
    }

    #[test]
    fn empty_tree_finds_nothing() {
        let dir = TempDir::new().unwrap();
        let config = Config::new(dir.path(), ["js"], "hashed").unwrap();
        assert!(discover_assets(&config).unwrap().is_empty());
    }
}
