//! Shared key material for unit tests, generated once per test binary.

use std::sync::OnceLock;

use rsa::RsaPrivateKey;

use crate::crypto::generate_private_key;

/// Student-side key. Small so that its signature fits under [`verifier_key`].
pub fn signer_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| generate_private_key(1024).unwrap())
}

/// A second key the same size as [`signer_key`].
pub fn other_signer_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| generate_private_key(1024).unwrap())
}

/// Instructor-side key, large enough to seal a 1024-bit signature.
pub fn verifier_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| generate_private_key(2048).unwrap())
}
