use std::fs;
use std::io::ErrorKind;

use colored::Colorize;
use log::info;

use crate::config::Config;
use crate::error::{HashError, Result};

/// Deletes every `<ext>-<suffix>` directory under the assets root.
///
/// A missing directory is skipped. Any other failure stops immediately and
/// directories already removed stay removed. Returns how many were deleted.
pub fn clean_outputs(config: &Config) -> Result<usize> {
    let mut deleted = 0;

    for ext in &config.extensions {
        let dir_path = config.output_dir(ext);
        match fs::remove_dir_all(&dir_path) {
            Ok(()) => {
                info!("Deleted: {}", dir_path.display().to_string().cyan());
                deleted += 1;
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("Skipping: {} - does not exist", dir_path.display().to_string().cyan());
            }
            Err(source) => return Err(HashError::Clean { path: dir_path, source }),
        }
    }

    Ok(deleted)
}
