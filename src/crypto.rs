//! RSA operations for commitproof: key generation, RSA-PSS signing and RSA-OAEP sealing.

use base64::{engine::general_purpose, Engine as _};
use rand::rngs::OsRng;
use rsa::{
    pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey},
    pkcs8::{spki, DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey},
    pss::{BlindedSigningKey, Signature, VerifyingKey},
    signature::{RandomizedSigner, SignatureEncoding, Verifier},
    traits::PublicKeyParts,
    BigUint, Oaep, RsaPrivateKey, RsaPublicKey,
};
use sha2::{Digest, Sha256};
use std::error::Error as StdError;
use std::fmt;

/// Modulus size used for new key pairs.
pub const DEFAULT_KEY_BITS: usize = 4096;

/// Public exponent used for new key pairs.
pub const PUBLIC_EXPONENT: u64 = 65537;

/// Custom error type for cryptographic operations
#[derive(Debug)]
pub enum Error {
    /// RSA key generation, encryption or decryption error
    Rsa(rsa::Error),
    /// PKCS#8 encoding/decoding error
    Pkcs8(rsa::pkcs8::Error),
    /// SPKI encoding/decoding error
    Spki(spki::Error),
    /// Base64 encoding/decoding error
    Base64(base64::DecodeError),
    /// Signature creation or verification error
    Signature(String),
    /// The signature does not fit in a single OAEP block of the verifier key
    SignatureTooLarge { signature_len: usize, capacity: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Rsa(e) => write!(f, "RSA error: {}", e),
            Error::Pkcs8(e) => write!(f, "PKCS#8 error: {}", e),
            Error::Spki(e) => write!(f, "SPKI error: {}", e),
            Error::Base64(e) => write!(f, "Base64 error: {}", e),
            Error::Signature(e) => write!(f, "Signature error: {}", e),
            Error::SignatureTooLarge {
                signature_len,
                capacity,
            } => write!(
                f,
                "signature is {} bytes but the verifier key can only encrypt {} bytes",
                signature_len, capacity
            ),
        }
    }
}

impl StdError for Error {}

impl From<rsa::Error> for Error {
    fn from(err: rsa::Error) -> Self {
        Error::Rsa(err)
    }
}

impl From<rsa::pkcs8::Error> for Error {
    fn from(err: rsa::pkcs8::Error) -> Self {
        Error::Pkcs8(err)
    }
}

impl From<spki::Error> for Error {
    fn from(err: spki::Error) -> Self {
        Error::Spki(err)
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error::Base64(err)
    }
}

impl From<rsa::signature::Error> for Error {
    fn from(err: rsa::signature::Error) -> Self {
        Error::Signature(err.to_string())
    }
}

/// Key pair containing private and public keys in PEM format
#[derive(Debug, Clone)]
pub struct KeyPair {
    /// Unencrypted PKCS#8 (`BEGIN PRIVATE KEY`)
    pub private_key_pem: String,
    /// SubjectPublicKeyInfo (`BEGIN PUBLIC KEY`)
    pub public_key_pem: String,
}

impl KeyPair {
    /// Export both halves of `private_key` to PEM.
    pub fn from_private_key(private_key: &RsaPrivateKey) -> Result<Self, Error> {
        let private_key_pem = private_key
            .to_pkcs8_pem(rsa::pkcs8::LineEnding::LF)?
            .to_string();
        let public_key_pem = private_key
            .to_public_key()
            .to_public_key_pem(rsa::pkcs8::LineEnding::LF)?;

        Ok(KeyPair {
            private_key_pem,
            public_key_pem,
        })
    }
}

/// Generate a fresh RSA private key with exponent 65537.
pub fn generate_private_key(bits: usize) -> Result<RsaPrivateKey, Error> {
    let mut rng = OsRng;
    let exponent = BigUint::from(PUBLIC_EXPONENT);
    Ok(RsaPrivateKey::new_with_exp(&mut rng, bits, &exponent)?)
}

/// Generate a new RSA key pair and return the private and public keys in PEM format.
///
/// # Errors
///
/// Returns an error if key generation or PEM export fails.
pub fn generate_key_pair(bits: usize) -> Result<KeyPair, Error> {
    let private_key = generate_private_key(bits)?;
    KeyPair::from_private_key(&private_key)
}

/// Load a private key from PEM. PKCS#8 is expected; PKCS#1 is accepted as a fallback.
pub fn load_private_key_pem(pem_data: &str) -> Result<RsaPrivateKey, Error> {
    match RsaPrivateKey::from_pkcs8_pem(pem_data) {
        Ok(key) => Ok(key),
        Err(pkcs8_err) => {
            RsaPrivateKey::from_pkcs1_pem(pem_data).map_err(|_| Error::Pkcs8(pkcs8_err))
        }
    }
}

/// Load a public key from PEM. SubjectPublicKeyInfo is expected; PKCS#1 is accepted as a fallback.
pub fn load_public_key_pem(pem_data: &str) -> Result<RsaPublicKey, Error> {
    match RsaPublicKey::from_public_key_pem(pem_data) {
        Ok(key) => Ok(key),
        Err(spki_err) => {
            RsaPublicKey::from_pkcs1_pem(pem_data).map_err(|_| Error::Spki(spki_err))
        }
    }
}

/// Largest PSS salt for a SHA-256 signature under `key` (the `MAX_LENGTH` rule).
pub fn max_pss_salt_len<K: PublicKeyParts>(key: &K) -> usize {
    let em_bits = key.n().bits().saturating_sub(1);
    let em_len = (em_bits + 7) / 8;
    em_len.saturating_sub(<Sha256 as Digest>::output_size() + 2)
}

/// Largest plaintext that RSA-OAEP with SHA-256 accepts under `key`.
pub fn oaep_capacity(key: &RsaPublicKey) -> usize {
    key.size()
        .saturating_sub(2 * <Sha256 as Digest>::output_size() + 2)
}

/// Sign `message` with RSA-PSS (MGF1-SHA256, SHA-256, maximum salt length).
///
/// The salt is random, so repeated calls produce different bytes that all verify.
pub fn sign_pss(private_key: &RsaPrivateKey, message: &[u8]) -> Result<Vec<u8>, Error> {
    let mut rng = OsRng;
    let salt_len = max_pss_salt_len(private_key);
    let signing_key = BlindedSigningKey::<Sha256>::new_with_salt_len(private_key.clone(), salt_len);
    let signature = signing_key.try_sign_with_rng(&mut rng, message)?;
    Ok(signature.to_vec())
}

/// Verify an RSA-PSS signature produced by [`sign_pss`].
///
/// # Returns
///
/// `true` if the signature is valid, `false` otherwise.
///
/// # Errors
///
/// Returns an error if the signature bytes are not a well-formed signature.
pub fn verify_pss(public_key: &RsaPublicKey, message: &[u8], signature: &[u8]) -> Result<bool, Error> {
    let salt_len = max_pss_salt_len(public_key);
    let verifying_key = VerifyingKey::<Sha256>::new_with_salt_len(public_key.clone(), salt_len);
    let signature_obj = Signature::try_from(signature)?;

    match verifying_key.verify(message, &signature_obj) {
        Ok(()) => Ok(true),
        Err(_) => Ok(false),
    }
}

/// Encrypt `plaintext` with RSA-OAEP (MGF1-SHA256, SHA-256, no label).
pub fn encrypt_oaep(public_key: &RsaPublicKey, plaintext: &[u8]) -> Result<Vec<u8>, Error> {
    let capacity = oaep_capacity(public_key);
    if plaintext.len() > capacity {
        return Err(Error::SignatureTooLarge {
            signature_len: plaintext.len(),
            capacity,
        });
    }

    let mut rng = OsRng;
    Ok(public_key.encrypt(&mut rng, Oaep::new::<Sha256>(), plaintext)?)
}

/// Decrypt an RSA-OAEP ciphertext produced by [`encrypt_oaep`].
pub fn decrypt_oaep(private_key: &RsaPrivateKey, ciphertext: &[u8]) -> Result<Vec<u8>, Error> {
    Ok(private_key.decrypt(Oaep::new::<Sha256>(), ciphertext)?)
}

/// Standard base64 with padding.
pub fn encode_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

pub fn decode_base64(text: &str) -> Result<Vec<u8>, Error> {
    Ok(general_purpose::STANDARD.decode(text.trim())?)
}

/// Calculate the SHA-256 hash of the public key to be used as the key ID.
///
/// # Returns
///
/// SHA-256 hash of the SPKI DER encoding as a hexadecimal string prefixed with "sha256:".
pub fn calculate_key_id(public_key: &RsaPublicKey) -> Result<String, Error> {
    let der_bytes = public_key.to_public_key_der()?;

    let mut hasher = Sha256::new();
    hasher.update(der_bytes.as_bytes());
    let hash = hasher.finalize();

    Ok(format!("sha256:{}", hex::encode(hash)))
}

/// Same as [`calculate_key_id`], starting from a PEM-encoded public key.
pub fn calculate_key_id_from_pem(public_key_pem: &str) -> Result<String, Error> {
    let public_key = load_public_key_pem(public_key_pem)?;
    calculate_key_id(&public_key)
}
