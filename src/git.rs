//! Current-branch detection.
//!
//! "Not a repository", "git is not installed" and "detached HEAD" are ordinary
//! answers here, reported as no branch rather than as errors.

use std::path::Path;
use tokio::process::Command;
use tracing::debug;

#[allow(async_fn_in_trait)]
pub trait BranchResolver {
    /// Name of the checked out branch, if there is one
    async fn current_branch(&self, workspace: &Path) -> Option<String>;
    async fn is_repository(&self, workspace: &Path) -> bool;
}

/// Asks the `git` executable
#[derive(Debug, Clone, Default)]
pub struct GitBranchResolver;

impl GitBranchResolver {
    pub fn new() -> Self {
        Self
    }

    async fn git(&self, workspace: &Path, args: &[&str]) -> Option<String> {
        let output = match Command::new("git")
            .args(args)
            .current_dir(workspace)
            .kill_on_drop(true)
            .output()
            .await
        {
            Ok(output) => output,
            Err(err) => {
                debug!(error = %err, "git is not available");
                return None;
            }
        };

        if !output.status.success() {
            debug!(
                args = ?args,
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "git exited with failure"
            );
            return None;
        }

        non_empty(&String::from_utf8_lossy(&output.stdout))
    }
}

impl BranchResolver for GitBranchResolver {
    async fn current_branch(&self, workspace: &Path) -> Option<String> {
        let branch = self.git(workspace, &["branch", "--show-current"]).await;
        debug!(workspace = %workspace.display(), branch = ?branch, "resolved current branch");
        branch
    }

    async fn is_repository(&self, workspace: &Path) -> bool {
        self.git(workspace, &["rev-parse", "--is-inside-work-tree"])
            .await
            .is_some_and(|answer| answer == "true")
    }
}

/// Always answers with the same branch
#[derive(Debug, Clone, Default)]
pub struct FixedBranch(pub Option<String>);

impl FixedBranch {
    pub fn new(branch: Option<&str>) -> Self {
        Self(branch.map(str::to_string))
    }
}

impl BranchResolver for FixedBranch {
    async fn current_branch(&self, _workspace: &Path) -> Option<String> {
        self.0.clone()
    }

    async fn is_repository(&self, _workspace: &Path) -> bool {
        self.0.is_some()
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_output_means_no_branch() {
        assert_eq!(non_empty("\n"), None);
        assert_eq!(non_empty("  main\n"), Some("main".to_string()));
    }

    #[tokio::test]
    async fn fixed_branch_answers_both_questions() {
        let resolver = FixedBranch::new(Some("feature/x"));
        assert_eq!(
            resolver.current_branch(Path::new(".")).await.as_deref(),
            Some("feature/x")
        );
        assert!(resolver.is_repository(Path::new(".")).await);

        let none = FixedBranch::new(None);
        assert_eq!(none.current_branch(Path::new(".")).await, None);
        assert!(!none.is_repository(Path::new(".")).await);
    }

    #[tokio::test]
    async fn missing_directory_is_not_a_repository() {
        let resolver = GitBranchResolver::new();
        let path = Path::new("/definitely/not/a/real/workspace/for/tabhero");
        assert!(!resolver.is_repository(path).await);
        assert_eq!(resolver.current_branch(path).await, None);
    }
}
