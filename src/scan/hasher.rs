//! Content fingerprinting using BLAKE3

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Digest size in bytes (128 bits, 32 hex characters).
pub const DIGEST_BYTES: usize = 16;

/// Produces a hex fingerprint for a byte stream.
///
/// The output is not trusted: callers validate it against the fingerprint
/// format before storing it.
pub trait ContentHasher {
    fn hash_reader(&self, reader: &mut dyn Read) -> io::Result<String>;

    fn hash_file(&self, path: &Path) -> io::Result<String> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        self.hash_reader(&mut reader)
    }
}

/// BLAKE3 truncated to 128 bits through its extendable output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Fingerprinter;

impl ContentHasher for Blake3Fingerprinter {
    fn hash_reader(&self, reader: &mut dyn Read) -> io::Result<String> {
        let mut hasher = blake3::Hasher::new();
        io::copy(reader, &mut hasher)?;
        let mut digest = [0u8; DIGEST_BYTES];
        hasher.finalize_xof().fill(&mut digest);
        Ok(hex::encode(digest))
    }
}

/// Fingerprint an in-memory buffer.
pub fn fingerprint_bytes(content: &[u8]) -> String {
    let mut digest = [0u8; DIGEST_BYTES];
    blake3::Hasher::new()
        .update(content)
        .finalize_xof()
        .fill(&mut digest);
    hex::encode(digest)
}
