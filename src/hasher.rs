use std::fs;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::error::{HashError, Result};

/// Number of hex characters kept from the digest.
pub const HASH_LEN: usize = 8;

/// Short content token for an in-memory buffer.
pub fn hash_bytes(data: &[u8]) -> String {
    let digest = blake3::hash(data);
    digest.to_hex()[..HASH_LEN].to_string()
}

/// Streams the file through blake3 and returns its short content token.
pub fn hash_file(file_path: &Path) -> Result<String> {
    let read_err = |source| HashError::Read {
        path: file_path.to_path_buf(),
        source,
    };

    let mut file = fs::File::open(file_path).map_err(read_err)?;
    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0; 8192];
    let mut total_bytes = 0;

    loop {
        let bytes_read = file.read(&mut buffer).map_err(read_err)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
        total_bytes += bytes_read;
    }

    let hash = hasher.finalize().to_hex()[..HASH_LEN].to_string();
    debug!(
        "Hash calculated for '{}': {} ({} bytes)",
        file_path.display(),
        hash,
        total_bytes
    );

    Ok(hash)
}
