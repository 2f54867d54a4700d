//! Content fingerprinting and media type sniffing using BLAKE3

use crate::types::Fingerprint;
use blake3::Hasher;

/// Compute the fingerprint for file bytes
///
/// Uses BLAKE3 to hash file content deterministically. Two same-key files
/// with equal fingerprints are treated as identical by the merge engine.
pub fn content_fingerprint(content: &[u8]) -> Fingerprint {
    let mut hasher = Hasher::new();
    hasher.update(content);
    *hasher.finalize().as_bytes()
}

/// Sniff a media type from the leading bytes of file content
///
/// Best-effort: returns `None` when the content matches no known signature.
pub fn sniff_content_type(content: &[u8]) -> Option<String> {
    infer::get(content).map(|kind| kind.mime_type().to_string())
}
