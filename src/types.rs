//! Core types shared across the checksum and manifest layers.

/// Hash: 256-bit BLAKE3 content digest
pub type Hash = [u8; 32];

/// Render a hash as lowercase hex.
pub fn hash_hex(hash: &Hash) -> String {
    hex::encode(hash)
}
