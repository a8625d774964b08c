use sha2::{Digest, Sha512};

#[derive(Clone)]
pub struct ChainDigest;

impl ChainDigest {
    pub fn new() -> Self {
        ChainDigest
    }

    /// SHA-512 of `text`, rendered as the hexadecimal form of the digest
    /// interpreted as an unsigned big integer. Each round of the chain
    /// re-feeds this text as input, so the encoding must stay fixed.
    pub fn digest(&self, text: &str) -> String {
        let raw = Sha512::digest(text.as_bytes());
        encode_magnitude(&raw)
    }
}

impl Default for ChainDigest {
    fn default() -> Self {
        ChainDigest::new()
    }
}

// Minimal big-integer hex: leading zeros stripped, an all-zero input
// renders as "0". The sign bit never leaks since the bytes are taken
// as an unsigned magnitude.
fn encode_magnitude(bytes: &[u8]) -> String {
    let full = hex::encode(bytes);
    let trimmed = full.trim_start_matches('0');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
