//! Error types for resource limit operations

use std::io;

use nix::errno::Errno;
use thiserror::Error;

use crate::category::ResourceCategory;
use crate::limit::LimitPair;

/// Result type for resource limit operations
pub type Result<T> = std::result::Result<T, RlimitError>;

/// Errors that can occur while reading or changing resource limits
#[derive(Error, Debug)]
pub enum RlimitError {
    #[error("Unsupported resource category: {0}")]
    UnsupportedCategory(String),

    #[error("Invalid limit pair for {category}: {limits} (soft exceeds hard)")]
    InvalidLimitPair {
        category: ResourceCategory,
        limits: LimitPair,
    },

    #[error("Permission denied setting {category} to {requested}: {errno}")]
    PermissionDenied {
        category: ResourceCategory,
        requested: LimitPair,
        errno: Errno,
    },

    #[error("getrlimit({category}) failed: {errno}")]
    SystemQueryFailure {
        category: ResourceCategory,
        errno: Errno,
    },

    #[error("setrlimit({category}) to {requested} failed: {errno}")]
    SystemCallFailure {
        category: ResourceCategory,
        requested: LimitPair,
        errno: Errno,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl RlimitError {
    /// Native error code reported by the kernel, if the failure came from a syscall
    pub fn errno(&self) -> Option<Errno> {
        match self {
            RlimitError::PermissionDenied { errno, .. }
            | RlimitError::SystemQueryFailure { errno, .. }
            | RlimitError::SystemCallFailure { errno, .. } => Some(*errno),
            RlimitError::Io(e) => e.raw_os_error().map(Errno::from_raw),
            _ => None,
        }
    }

    /// Category the failure refers to, when one was resolved
    pub fn category(&self) -> Option<ResourceCategory> {
        match self {
            RlimitError::InvalidLimitPair { category, .. }
            | RlimitError::PermissionDenied { category, .. }
            | RlimitError::SystemQueryFailure { category, .. }
            | RlimitError::SystemCallFailure { category, .. } => Some(*category),
            _ => None,
        }
    }

    /// None of these failures clear up on their own; retrying is left to the caller.
    pub fn is_retriable(&self) -> bool {
        false
    }
}
