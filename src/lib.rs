pub mod classify;
pub mod cleaner;
pub mod cli;
pub mod config;
pub mod error;
pub mod hasher;
pub mod manifest;
pub mod pipeline;
pub mod scanner;
pub mod utils;

pub use classify::{Classification, Classifier, is_already_hashed, manifest_key};
pub use cleaner::clean_outputs;
pub use cli::Cli;
pub use config::{Config, FileConfig};
pub use error::HashError;
pub use hasher::{hash_bytes, hash_file};
pub use manifest::{Manifest, ManifestEntry};
pub use pipeline::{Generator, Summary, generate};
pub use scanner::discover_assets;
pub use utils::{format_human_elapsed, format_number};
