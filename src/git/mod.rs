//! Git text collection.
//!
//! The generate flow only needs two pieces of text from the repository:
//! the pending changes and a few recent commit subjects. Both come from the
//! git CLI so that the user's git config (aliases, diff drivers) applies.

use std::path::PathBuf;
use std::process::Command;

use crate::error::{CommitlyError, Result};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Source of the diff and commit history used to build the prompt.
///
/// Main implementation: [`GitCli`]. Tests substitute `MockDiffSource`.
///
/// # Example
/// ```no_run
/// use commitly::git::{DiffSource, GitCli};
///
/// # fn main() -> commitly::error::Result<()> {
/// let git = GitCli::new();
/// println!("{}", git.diff()?);
/// println!("{}", git.history(10)?);
/// # Ok(())
/// # }
/// ```
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait DiffSource {
    /// Pending changes as unified diff text (may be empty).
    fn diff(&self) -> Result<String>;

    /// Subjects of the last `n` commits, one per line.
    fn history(&self, n: usize) -> Result<String>;
}

/// [`DiffSource`] backed by the `git` executable.
#[derive(Debug, Default, Clone)]
pub struct GitCli {
    dir: Option<PathBuf>,
}

impl GitCli {
    /// Runs git in the current directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs git in `dir` instead of the current directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(dir) = &self.dir {
            cmd.current_dir(dir);
        }

        tracing::debug!("Running: git {}", args.join(" "));
        let output = cmd.output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let error_msg = if stderr.trim().is_empty() {
                // Some git errors are output to stdout instead of stderr
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(CommitlyError::GitCommand(error_msg));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl DiffSource for GitCli {
    /// Latest stash diff if there is one, otherwise the working-tree diff.
    fn diff(&self) -> Result<String> {
        match self.run(&["stash", "show", "-p"]) {
            Ok(stash) if !stash.trim().is_empty() => {
                tracing::debug!("Using stash diff ({} bytes)", stash.len());
                return Ok(stash);
            }
            Ok(_) => tracing::debug!("Stash diff empty, falling back to git diff"),
            Err(e) => tracing::debug!("Stash lookup failed, falling back to git diff: {}", e),
        }
        self.run(&["diff"])
    }

    fn history(&self, n: usize) -> Result<String> {
        let depth = n.to_string();
        self.run(&["log", "--pretty=format:%s", "-n", &depth])
    }
}
