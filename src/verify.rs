//! Opening a proof on the verifier's side.

use rsa::{RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::crypto;
use crate::error::{Error, ErrorCode};
use crate::revision::Revision;

/// Structured verification result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    pub valid: bool,
    pub revision: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signer_key_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl VerificationResult {
    pub fn success(revision: &Revision, signer_key_id: Option<String>) -> Self {
        Self {
            valid: true,
            revision: revision.to_string(),
            signer_key_id,
            error_code: None,
            error_message: None,
        }
    }

    pub fn failure(revision: &Revision, code: ErrorCode, message: &str) -> Self {
        Self {
            valid: false,
            revision: revision.to_string(),
            signer_key_id: None,
            error_code: Some(code),
            error_message: Some(message.to_string()),
        }
    }
}

/// Decode, decrypt and verify `artifact` for `revision`.
///
/// # Returns
///
/// `Ok(true)` if the recovered signature verifies against `signer_public`,
/// `Ok(false)` if it decrypts but does not verify.
///
/// # Errors
///
/// Returns an error if the artifact is not base64 or does not decrypt under
/// `verifier_private`.
pub fn open_proof(
    artifact: &str,
    revision: &Revision,
    verifier_private: &RsaPrivateKey,
    signer_public: &RsaPublicKey,
) -> Result<bool, Error> {
    let ciphertext = crypto::decode_base64(artifact)?;
    let signature = crypto::decrypt_oaep(verifier_private, &ciphertext)?;
    debug!(len = signature.len(), "decrypted signature");

    Ok(crypto::verify_pss(
        signer_public,
        revision.message_bytes(),
        &signature,
    )?)
}

/// Verify a proof and describe the outcome as a [`VerificationResult`].
///
/// Implements a 3-step verification flow:
/// 1. Base64-decode the artifact
/// 2. Decrypt the signature with the verifier's private key
/// 3. Verify the signature over the revision with the signer's public key
pub fn verify_proof(
    artifact: &str,
    revision: &Revision,
    verifier_private: &RsaPrivateKey,
    signer_public: &RsaPublicKey,
) -> VerificationResult {
    // Step 1: Decode
    let ciphertext = match crypto::decode_base64(artifact) {
        Ok(bytes) => bytes,
        Err(e) => {
            return VerificationResult::failure(
                revision,
                ErrorCode::ProofMalformed,
                &format!("Proof is not valid base64: {}", e),
            )
        }
    };

    // Step 2: Decrypt
    let signature = match crypto::decrypt_oaep(verifier_private, &ciphertext) {
        Ok(sig) => sig,
        Err(e) => {
            return VerificationResult::failure(
                revision,
                ErrorCode::DecryptionFailed,
                &format!("Proof does not decrypt with the instructor key: {}", e),
            )
        }
    };

    // Step 3: Verify
    match crypto::verify_pss(signer_public, revision.message_bytes(), &signature) {
        Ok(true) => {
            let key_id = crypto::calculate_key_id(signer_public).ok();
            VerificationResult::success(revision, key_id)
        }
        Ok(false) => VerificationResult::failure(
            revision,
            ErrorCode::SignatureInvalid,
            "Signature does not match this commit and student key",
        ),
        Err(e) => VerificationResult::failure(
            revision,
            ErrorCode::SignatureInvalid,
            &format!("Signature is malformed: {}", e),
        ),
    }
}
