//! # MergeRelay Core
//!
//! Core domain logic for MergeRelay, a per-repository command server that
//! mediates merge-request operations between an editor plugin and GitLab.
//!
//! This crate knows nothing about HTTP. It provides:
//! 1. Repository identity resolution - deriving the GitLab namespace,
//!    project name and checked-out branch from local git metadata
//! 2. The git collaborator - thin wrappers around the system `git` binary
//!    that produce the raw strings the resolver consumes
//! 3. Connection configuration - explicit settings passed in by the caller,
//!    never read from ambient global state
//!
//! ## Main entry points
//!
//! - [`GitRepository::resolve`] - resolve the identity of the repository in
//!   the current working directory
//! - [`extract_git_info`] - the pure resolution algorithm, with all three
//!   git effects injected as closures so it can be tested without git
//! - [`ConnectionSettings::from_env`] - build configuration from the
//!   environment the editor plugin sets up

pub mod config;
pub mod errors;
pub mod git;
pub mod repo;

pub use config::{ConfigError, ConnectionSettings};
pub use errors::{Error, GitError};
pub use git::{extract_git_info, latest_remote_commit, RepositoryIdentity};
pub use repo::GitRepository;
