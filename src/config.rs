//! Paths and parameters for the key generator and the proof generator.
//!
//! Every field has a default matching the conventional file names, so the
//! binaries work with no arguments from inside a student's repository.

use std::path::PathBuf;

use crate::crypto::DEFAULT_KEY_BITS;

pub const STUDENT_PRIVATE_KEY: &str = "student_private.pem";
pub const STUDENT_PUBLIC_KEY: &str = "student_public.pem";
pub const INSTRUCTOR_PUBLIC_KEY: &str = "instructor_public.pem";
pub const INSTRUCTOR_PRIVATE_KEY: &str = "instructor_private.pem";

/// Where the proof generator finds its two credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofConfig {
    /// The caller's PEM private key, used to sign.
    pub private_key_path: PathBuf,
    /// The verifier's PEM public key, used to encrypt the signature.
    pub verifier_public_key_path: PathBuf,
}

impl Default for ProofConfig {
    fn default() -> Self {
        Self {
            private_key_path: PathBuf::from(STUDENT_PRIVATE_KEY),
            verifier_public_key_path: PathBuf::from(INSTRUCTOR_PUBLIC_KEY),
        }
    }
}

/// Parameters for generating and saving a key pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyGenConfig {
    /// RSA modulus size in bits.
    pub bits: usize,
    pub private_key_path: PathBuf,
    pub public_key_path: PathBuf,
}

impl Default for KeyGenConfig {
    fn default() -> Self {
        Self {
            bits: DEFAULT_KEY_BITS,
            private_key_path: PathBuf::from(STUDENT_PRIVATE_KEY),
            public_key_path: PathBuf::from(STUDENT_PUBLIC_KEY),
        }
    }
}
