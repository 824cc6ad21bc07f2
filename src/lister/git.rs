//! `git for-each-ref` based lister

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::error::ListError;
use super::traits::RefLister;
use crate::domain::RefState;

/// Output format passed to `git for-each-ref`: name, object id and HEAD marker, NUL separated
pub const FOR_EACH_REF_FORMAT: &str = "%(refname)%00%(objectname)%00%(HEAD)";

/// Lists branches and tags of a local repository by running `git for-each-ref`
#[derive(Debug, Clone)]
pub struct GitCliLister {
    repo_path: PathBuf,
}

impl GitCliLister {
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }
}

#[async_trait]
impl RefLister for GitCliLister {
    async fn list_refs(&self) -> Result<Vec<RefState>, ListError> {
        debug!(repo = %self.repo_path.display(), "Listing refs");

        let output = Command::new("git")
            .arg("for-each-ref")
            .arg(format!("--format={}", FOR_EACH_REF_FORMAT))
            .arg("refs/heads")
            .arg("refs/tags")
            .current_dir(&self.repo_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            return Err(ListError::CommandFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_for_each_ref(&String::from_utf8_lossy(&output.stdout))
    }

    fn describe(&self) -> String {
        self.repo_path.display().to_string()
    }
}

/// Parse `git for-each-ref` output produced with [`FOR_EACH_REF_FORMAT`]
///
/// Blank lines are skipped. The HEAD marker is `*` for the checked-out branch.
pub fn parse_for_each_ref(output: &str) -> Result<Vec<RefState>, ListError> {
    let mut refs = Vec::new();

    for line in output.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split('\0');
        let (Some(ref_name), Some(object), Some(head), None) = (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(ListError::Parse { line: line.to_string() });
        };

        if ref_name.is_empty() || object.is_empty() {
            return Err(ListError::Parse { line: line.to_string() });
        }

        refs.push(RefState::new(ref_name, object, head.trim() == "*"));
    }

    Ok(refs)
}
