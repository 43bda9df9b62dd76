use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which of the credentials a key-file failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    /// The student's private key, used to sign.
    SignerPrivate,
    /// The student's public key, used by the instructor to verify.
    SignerPublic,
    /// The instructor's public key, used to encrypt the signature.
    VerifierPublic,
    /// The instructor's private key, used to decrypt a proof.
    VerifierPrivate,
}

impl KeyRole {
    fn is_signer(self) -> bool {
        matches!(self, KeyRole::SignerPrivate | KeyRole::SignerPublic)
    }
}

impl fmt::Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            KeyRole::SignerPrivate => "student private",
            KeyRole::SignerPublic => "student public",
            KeyRole::VerifierPublic => "instructor public",
            KeyRole::VerifierPrivate => "instructor private",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Error getting git commit hash: {0}")]
    Environment(String),

    #[error("Invalid commit hash {revision:?}: {reason}")]
    Integrity { revision: String, reason: String },

    #[error("Error: {} not found ({role} key)", .path.display())]
    MissingKey { role: KeyRole, path: PathBuf },

    #[error("Error: cannot load {role} key from {}: {message}", .path.display())]
    KeyLoad {
        role: KeyRole,
        path: PathBuf,
        message: String,
    },

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Signature is {signature_len} bytes but the verifier key can only encrypt {capacity} bytes")]
    SignatureTooLarge {
        signature_len: usize,
        capacity: usize,
    },

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of [`Error`], one per reported failure condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Environment,
    Integrity,
    MissingKey,
    KeyLoad,
    Crypto,
    Io,
    Base64,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Environment(_) => ErrorKind::Environment,
            Error::Integrity { .. } => ErrorKind::Integrity,
            Error::MissingKey { .. } => ErrorKind::MissingKey,
            Error::KeyLoad { .. } => ErrorKind::KeyLoad,
            Error::Crypto(_) | Error::SignatureTooLarge { .. } => ErrorKind::Crypto,
            Error::Base64(_) => ErrorKind::Base64,
            Error::Write { .. } | Error::Io(_) | Error::Json(_) => ErrorKind::Io,
        }
    }

    /// Process exit status for this failure. Never zero.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::MissingKey { role, .. } if role.is_signer() => 4,
            Error::MissingKey { .. } => 5,
            _ => match self.kind() {
                ErrorKind::Environment => 2,
                ErrorKind::Integrity => 3,
                ErrorKind::MissingKey => 5,
                ErrorKind::KeyLoad => 6,
                ErrorKind::Crypto => 7,
                ErrorKind::Io => 8,
                ErrorKind::Base64 => 9,
            },
        }
    }

    /// Suggested fix, printed under the failure line.
    pub fn remedy(&self) -> String {
        match self {
            Error::Environment(_) => {
                "Are you in the git repository? Did you commit your changes?".to_string()
            }
            Error::Integrity { .. } => {
                "`git log -1 --format=%H` must print a full 40-character SHA-1 commit hash."
                    .to_string()
            }
            Error::MissingKey { role, .. } => match role {
                KeyRole::SignerPrivate => {
                    "Run `commitproof-keygen` first, or pass --private-key.".to_string()
                }
                KeyRole::VerifierPublic => {
                    "Save the instructor's public key at this path, or pass --verifier-key."
                        .to_string()
                }
                KeyRole::SignerPublic => {
                    "Pass the student's public key with --signer-public-key.".to_string()
                }
                KeyRole::VerifierPrivate => {
                    "Pass the instructor's private key with --verifier-private-key.".to_string()
                }
            },
            Error::KeyLoad { .. } => {
                "The file must hold an unencrypted RSA key in PEM form (PKCS#8, SPKI or PKCS#1)."
                    .to_string()
            }
            Error::SignatureTooLarge { signature_len, .. } => format!(
                "The instructor key must be at least {} bits to seal a {}-bit signature.",
                (signature_len + 66) * 8,
                signature_len * 8
            ),
            Error::Crypto(_) => "Check that both key files belong to the expected parties.".to_string(),
            Error::Base64(_) => "Copy the proof exactly as printed, on a single line.".to_string(),
            Error::Write { .. } | Error::Io(_) | Error::Json(_) => {
                "Check permissions on the working directory.".to_string()
            }
        }
    }
}

impl From<crate::crypto::Error> for Error {
    fn from(err: crate::crypto::Error) -> Self {
        match err {
            crate::crypto::Error::Base64(e) => Error::Base64(e),
            crate::crypto::Error::SignatureTooLarge {
                signature_len,
                capacity,
            } => Error::SignatureTooLarge {
                signature_len,
                capacity,
            },
            other => Error::Crypto(other.to_string()),
        }
    }
}

/// Error codes for structured verification results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "PROOF_MALFORMED")]
    ProofMalformed,
    #[serde(rename = "DECRYPTION_FAILED")]
    DecryptionFailed,
    #[serde(rename = "SIGNATURE_INVALID")]
    SignatureInvalid,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ProofMalformed => "PROOF_MALFORMED",
            ErrorCode::DecryptionFailed => "DECRYPTION_FAILED",
            ErrorCode::SignatureInvalid => "SIGNATURE_INVALID",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let errors = vec![
            Error::Environment("git failed".into()),
            Error::Integrity {
                revision: "abc".into(),
                reason: "too short".into(),
            },
            Error::MissingKey {
                role: KeyRole::SignerPrivate,
                path: "student_private.pem".into(),
            },
            Error::MissingKey {
                role: KeyRole::VerifierPublic,
                path: "instructor_public.pem".into(),
            },
            Error::KeyLoad {
                role: KeyRole::SignerPrivate,
                path: "student_private.pem".into(),
                message: "bad".into(),
            },
            Error::Crypto("boom".into()),
            Error::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk")),
            Error::Base64(base64::DecodeError::InvalidLength),
        ];

        let mut codes: Vec<i32> = errors.iter().map(Error::exit_code).collect();
        assert!(codes.iter().all(|c| *c != 0));
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_missing_key_message_names_path() {
        let err = Error::MissingKey {
            role: KeyRole::SignerPrivate,
            path: "keys/student_private.pem".into(),
        };
        assert!(err.to_string().contains("keys/student_private.pem"));
        assert!(err.remedy().contains("commitproof-keygen"));
    }

    #[test]
    fn test_signature_too_large_remedy() {
        let err = Error::SignatureTooLarge {
            signature_len: 512,
            capacity: 446,
        };
        assert_eq!(err.kind(), ErrorKind::Crypto);
        assert!(err.remedy().contains("4624 bits"));
    }

    #[test]
    fn test_from_crypto_error() {
        let err: Error = crate::crypto::Error::Signature("bad".into()).into();
        assert_eq!(err.kind(), ErrorKind::Crypto);

        let err: Error = crate::crypto::Error::SignatureTooLarge {
            signature_len: 128,
            capacity: 62,
        }
        .into();
        assert!(matches!(err, Error::SignatureTooLarge { capacity: 62, .. }));
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::SignatureInvalid).unwrap();
        assert_eq!(json, "\"SIGNATURE_INVALID\"");
        assert_eq!(ErrorCode::DecryptionFailed.to_string(), "DECRYPTION_FAILED");
    }
}
