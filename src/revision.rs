//! Revision identifiers and the sources they come from.
//!
//! The proof signs the ASCII text of the identifier, so [`Revision`] keeps
//! the exact string it was built from and exposes its bytes unchanged.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::Error;

/// Length of a full SHA-1 commit hash in hex.
pub const REVISION_LEN: usize = 40;

/// A validated 40-character hexadecimal commit identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision(String);

impl Revision {
    /// Validate `raw` (surrounding whitespace is ignored).
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let revision = raw.trim();

        if revision.len() != REVISION_LEN {
            return Err(Error::Integrity {
                revision: revision.to_string(),
                reason: format!(
                    "expected {} characters, got {}",
                    REVISION_LEN,
                    revision.len()
                ),
            });
        }
        if !revision.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::Integrity {
                revision: revision.to_string(),
                reason: "not a hexadecimal string".to_string(),
            });
        }

        Ok(Self(revision.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The bytes that get signed: the UTF-8 text, not the decoded digest.
    pub fn message_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Obtain the identifier of the current state of a tracked source tree.
///
/// Implementations return the raw identifier; validation happens in
/// [`Revision::parse`].
pub trait RevisionSource {
    fn current_revision(&self) -> Result<String, Error>;
}

/// Asks `git log -1 --format=%H` for the latest commit.
#[derive(Debug, Clone)]
pub struct GitRevision {
    program: PathBuf,
    repo_dir: Option<PathBuf>,
}

impl GitRevision {
    /// Use `git` from `PATH` in the current working directory.
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("git"),
            repo_dir: None,
        }
    }

    /// Run git inside `repo_dir` instead of the working directory.
    pub fn in_dir(mut self, repo_dir: &Path) -> Self {
        self.repo_dir = Some(repo_dir.to_path_buf());
        self
    }

    /// Use a specific git executable.
    pub fn with_program(mut self, program: &Path) -> Self {
        self.program = program.to_path_buf();
        self
    }
}

impl Default for GitRevision {
    fn default() -> Self {
        Self::new()
    }
}

impl RevisionSource for GitRevision {
    fn current_revision(&self) -> Result<String, Error> {
        let mut command = Command::new(&self.program);
        command.args(["log", "-1", "--format=%H"]);
        if let Some(dir) = &self.repo_dir {
            command.current_dir(dir);
        }

        debug!(program = %self.program.display(), "running git log");
        let output = command.output().map_err(|e| {
            Error::Environment(format!("failed to run {}: {}", self.program.display(), e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Environment(format!(
                "git log failed ({}): {}",
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|e| Error::Environment(format!("git output is not valid UTF-8: {}", e)))?;
        Ok(stdout.trim().to_string())
    }
}

/// A fixed identifier, for callers that already know the revision.
#[derive(Debug, Clone)]
pub struct StaticRevision(pub String);

impl RevisionSource for StaticRevision {
    fn current_revision(&self) -> Result<String, Error> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::fs;
    use tempfile::tempdir;

    fn git_available() -> bool {
        Command::new("git").arg("--version").output().is_ok()
    }

    fn git(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .args(["-c", "user.name=Test", "-c", "user.email=test@example.com"])
            .args(["-c", "commit.gpgsign=false"])
            .args(args)
            .current_dir(dir)
            .output()
            .unwrap()
            .status;
        assert!(status.success(), "git {:?} failed", args);
    }

    #[test]
    fn test_parse_valid_revision() {
        let raw = "0123456789abcdef0123456789ABCDEF01234567\n";
        let revision = Revision::parse(raw).unwrap();
        assert_eq!(revision.as_str(), raw.trim());
        assert_eq!(revision.message_bytes(), raw.trim().as_bytes());
        assert_eq!(revision.message_bytes().len(), 40);
    }

    #[test]
    fn test_parse_wrong_length() {
        let inputs = vec![
            String::new(),
            "abc".to_string(),
            "a".repeat(39),
            "a".repeat(41),
            "a".repeat(64),
        ];
        for raw in &inputs {
            let err = Revision::parse(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Integrity, "input {:?}", raw);
        }
    }

    #[test]
    fn test_parse_non_hex() {
        let err = Revision::parse(&"g".repeat(40)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Integrity);
        assert!(err.to_string().contains("hexadecimal"));
    }

    #[test]
    fn test_static_revision() {
        let source = StaticRevision("a".repeat(40));
        assert_eq!(source.current_revision().unwrap(), "a".repeat(40));
    }

    #[test]
    fn test_git_missing_program() {
        let source = GitRevision::new().with_program(Path::new("/nonexistent/git-binary"));
        let err = source.current_revision().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Environment);
    }

    #[test]
    fn test_git_repository_without_commits() {
        if !git_available() {
            return;
        }
        let dir = tempdir().unwrap();
        git(dir.path(), &["init", "-q"]);
        let err = GitRevision::new()
            .in_dir(dir.path())
            .current_revision()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Environment);
    }

    #[test]
    fn test_git_head_commit() {
        if !git_available() {
            return;
        }
        let dir = tempdir().unwrap();
        git(dir.path(), &["init", "-q"]);
        fs::write(dir.path().join("README.md"), "hello\n").unwrap();
        git(dir.path(), &["add", "README.md"]);
        git(dir.path(), &["commit", "-q", "-m", "initial"]);

        let raw = GitRevision::new()
            .in_dir(dir.path())
            .current_revision()
            .unwrap();
        let revision = Revision::parse(&raw).unwrap();
        assert_eq!(revision.as_str().len(), 40);
    }
}
