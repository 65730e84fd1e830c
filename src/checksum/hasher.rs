//! Content hashing for tracked files

use crate::types::Hash;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Size of chunks for streaming hash computation
const CHUNK_SIZE: usize = 64 * 1024;

/// Compute the digest of a byte slice.
pub fn hash_bytes(data: &[u8]) -> Hash {
    *blake3::hash(data).as_bytes()
}

/// Compute the digest of a file's full contents.
///
/// Follows symlinks: the digest is of whatever the path resolves to.
pub fn hash_file(path: &Path) -> io::Result<Hash> {
    let mut file = File::open(path)?;
    let mut hasher = blake3::Hasher::new();
    let mut buffer = vec![0; CHUNK_SIZE];

    loop {
        let n = match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..n]);
    }

    Ok(*hasher.finalize().as_bytes())
}
