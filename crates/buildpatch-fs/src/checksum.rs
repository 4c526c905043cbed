//! SHA-256 checksums of file content
//!
//! Checksums use the form `sha256:<hex>` and are reported alongside each
//! patched file so a pipeline can tell whether a rerun changed anything.

use sha2::{Digest, Sha256};

const PREFIX: &str = "sha256:";

/// Compute the SHA-256 checksum of string content.
pub fn compute_content_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{}{:x}", PREFIX, hasher.finalize())
}
