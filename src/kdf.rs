use sha2::{Digest, Sha256};

/// Length of the derived key material in bytes (one SHA-256 digest).
pub const KEY_LEN: usize = 32;

/// Key material shared by both cipher layers.
///
/// The stream cipher and the block cipher are keyed from the same digest.
/// This couples their security properties; it is kept for container
/// compatibility. Independent per-algorithm derivation would be a local
/// change to this function only.
#[derive(Clone)]
pub struct KeyMaterial([u8; KEY_LEN]);

impl KeyMaterial {
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

/// Derive key material from an arbitrary-length passphrase.
///
/// The passphrase may be empty; the result is then the SHA-256 digest of
/// empty input.
pub fn derive_keys(passphrase: &[u8]) -> KeyMaterial {
    let mut hasher = Sha256::new();
    hasher.update(passphrase);
    KeyMaterial(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivation_is_deterministic() {
        let a = derive_keys(b"correct horse battery staple");
        let b = derive_keys(b"correct horse battery staple");
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_distinct_passphrases_distinct_keys() {
        let a = derive_keys(b"alpha");
        let b = derive_keys(b"beta");
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_empty_passphrase_accepted() {
        let key = derive_keys(b"");
        // SHA-256 of empty input, well-known value
        assert_eq!(
            key.as_bytes()[..4],
            [0xe3, 0xb0, 0xc4, 0x42],
            "empty-input digest prefix"
        );
    }
}
