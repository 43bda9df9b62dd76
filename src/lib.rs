//! # commitproof
//!
//! Proof of authorship for git commits.
//!
//! A student signs the hash of their latest commit with their own RSA key,
//! then encrypts that signature with the instructor's public key. The result
//! is a single base64 line that only the instructor can open, and that only
//! the student's key could have produced.
//!
//! ## Features
//!
//! - **RSA Key Generation**: 4096-bit keys, exponent 65537, PKCS#8 / SPKI PEM files
//! - **Signing**: RSA-PSS with MGF1-SHA256, SHA-256 and maximum salt length
//! - **Sealing**: RSA-OAEP with MGF1-SHA256 and SHA-256, no label
//! - **Verification**: decrypt and verify a proof on the instructor's side
//! - **Key ID Calculation**: SHA-256 fingerprints of public keys
//!
//! ## Quick Start
//!
//! ```rust
//! use commitproof::crypto::generate_private_key;
//! use commitproof::proof::{seal, ProofKeys};
//! use commitproof::revision::Revision;
//! use commitproof::verify::open_proof;
//!
//! // The verifier's modulus must be larger than the signer's by at least 66 bytes
//! let student = generate_private_key(1024).unwrap();
//! let instructor = generate_private_key(2048).unwrap();
//!
//! let revision = Revision::parse("0123456789abcdef0123456789abcdef01234567").unwrap();
//! let keys = ProofKeys {
//!     signer: student.clone(),
//!     verifier: instructor.to_public_key(),
//! };
//! let proof = seal(&revision, &keys).unwrap();
//!
//! let valid = open_proof(&proof.artifact, &revision, &instructor, &student.to_public_key()).unwrap();
//! assert!(valid);
//! ```
//!
//! ## Error Handling
//!
//! All operations return `Result<T, Error>`. [`error::Error::kind`] classifies
//! failures, and [`error::Error::exit_code`] / [`error::Error::remedy`] drive
//! the binaries' reports.

pub mod config;
pub mod crypto;
pub mod error;
pub mod keygen;
pub mod output;
pub mod proof;
pub mod revision;
pub mod verify;

#[cfg(test)]
mod test_support;
