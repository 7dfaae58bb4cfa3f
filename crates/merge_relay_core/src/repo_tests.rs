//! Tests for the git collaborator.
//!
//! Behavior against a live repository is covered indirectly through the
//! resolver seam; these tests pin down construction and error formatting,
//! which do not need a git binary.

use super::*;

#[test]
fn test_repository_remembers_remote_name() {
    let repo = GitRepository::new("upstream");
    assert_eq!(repo.remote(), "upstream");
}

#[cfg(unix)]
#[test]
fn test_exited_error_keeps_args_and_stderr() {
    use std::os::unix::process::ExitStatusExt;

    let err = GitError::Exited {
        args: "remote get-url origin".to_string(),
        status: std::process::ExitStatus::from_raw(256),
        stderr: "fatal: No such remote 'origin'".to_string(),
    };
    let message = err.to_string();
    assert!(message.contains("`git remote get-url origin`"));
    assert!(message.contains("No such remote"));
}
