//! Proof generation: sign the current revision, seal the signature for the verifier.
//!
//! Steps run strictly in order and each one gates the next:
//! 1. Resolve and validate the revision identifier
//! 2. Load the signer's private key
//! 3. Load the verifier's public key
//! 4. RSA-PSS sign the identifier's ASCII bytes
//! 5. RSA-OAEP encrypt the raw signature
//! 6. Base64-encode the ciphertext

use std::fs;
use std::io;
use std::path::Path;

use rsa::{RsaPrivateKey, RsaPublicKey};
use tracing::{debug, info};

use crate::config::ProofConfig;
use crate::crypto;
use crate::error::{Error, KeyRole};
use crate::revision::{Revision, RevisionSource};

/// Progress events emitted after each completed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage<'a> {
    RevisionResolved(&'a Revision),
    Signed,
    Encrypted,
}

/// The submission: the revision and its sealed signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proof {
    pub revision: Revision,
    /// Base64 of the OAEP ciphertext of the PSS signature.
    pub artifact: String,
}

/// Key material for sealing a proof.
#[derive(Debug, Clone)]
pub struct ProofKeys {
    /// The caller's private key.
    pub signer: RsaPrivateKey,
    /// The verifier's public key.
    pub verifier: RsaPublicKey,
}

impl ProofKeys {
    /// Load both keys from the paths in `config`, signer first.
    pub fn load(config: &ProofConfig) -> Result<Self, Error> {
        let signer = read_private_key(&config.private_key_path, KeyRole::SignerPrivate)?;
        let verifier = read_public_key(&config.verifier_public_key_path, KeyRole::VerifierPublic)?;
        Ok(Self { signer, verifier })
    }
}

fn read_pem(path: &Path, role: KeyRole) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::MissingKey {
            role,
            path: path.to_path_buf(),
        },
        _ => Error::KeyLoad {
            role,
            path: path.to_path_buf(),
            message: e.to_string(),
        },
    })
}

/// Read a PEM private key. A missing file and an unparseable one are reported separately.
pub fn read_private_key(path: &Path, role: KeyRole) -> Result<RsaPrivateKey, Error> {
    let pem = read_pem(path, role)?;
    let key = crypto::load_private_key_pem(&pem).map_err(|e| Error::KeyLoad {
        role,
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    debug!(path = %path.display(), %role, "loaded private key");
    Ok(key)
}

/// Read a PEM public key. A missing file and an unparseable one are reported separately.
pub fn read_public_key(path: &Path, role: KeyRole) -> Result<RsaPublicKey, Error> {
    let pem = read_pem(path, role)?;
    let key = crypto::load_public_key_pem(&pem).map_err(|e| Error::KeyLoad {
        role,
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    debug!(path = %path.display(), %role, "loaded public key");
    Ok(key)
}

/// Run the whole flow against `source` and the key files named in `config`.
///
/// The revision is validated before any key file is touched, and nothing is
/// signed unless both keys loaded.
pub fn generate_proof<F>(
    source: &dyn RevisionSource,
    config: &ProofConfig,
    mut on_stage: F,
) -> Result<Proof, Error>
where
    F: FnMut(Stage<'_>),
{
    let raw = source.current_revision()?;
    let revision = Revision::parse(&raw)?;
    on_stage(Stage::RevisionResolved(&revision));

    let keys = ProofKeys::load(config)?;
    seal_with(revision, &keys, on_stage)
}

/// Sign and seal `revision` with in-memory keys.
pub fn seal(revision: &Revision, keys: &ProofKeys) -> Result<Proof, Error> {
    seal_with(revision.clone(), keys, |_| {})
}

fn seal_with<F>(revision: Revision, keys: &ProofKeys, mut on_stage: F) -> Result<Proof, Error>
where
    F: FnMut(Stage<'_>),
{
    let signature = crypto::sign_pss(&keys.signer, revision.message_bytes())?;
    debug!(len = signature.len(), "signed revision");
    on_stage(Stage::Signed);

    let ciphertext = crypto::encrypt_oaep(&keys.verifier, &signature)?;
    debug!(len = ciphertext.len(), "encrypted signature");
    on_stage(Stage::Encrypted);

    let artifact = crypto::encode_base64(&ciphertext);
    info!(revision = %revision, "proof generated");

    Ok(Proof { revision, artifact })
}
