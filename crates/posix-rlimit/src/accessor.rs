//! getrlimit/setrlimit access for the current process
//!
//! All state lives in the kernel. The accessor holds nothing, takes no locks,
//! and can be used from any thread; concurrent writers to the same category
//! race and the last successful call wins.

use log::{debug, trace, warn};
use nix::errno::Errno;
use nix::sys::resource::{self, Resource};
use rlimit_core::{LimitPair, LimitRequest, ResourceCategory, Result, RlimitError};

use crate::platform::{self, limit_from_raw, limit_to_raw};

/// Reads and writes resource limits of the calling process
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceLimitAccessor;

impl ResourceLimitAccessor {
    pub fn new() -> Self {
        Self
    }

    /// Whether the running platform has a native id for `category`
    pub fn supports(&self, category: ResourceCategory) -> bool {
        platform::native_resource(category).is_some()
    }

    /// Categories the running platform supports
    pub fn supported_categories(&self) -> Vec<ResourceCategory> {
        platform::supported_categories()
    }

    /// Read the limits currently in effect for `category`.
    ///
    /// The snapshot may be stale as soon as it is returned if another thread
    /// changes the same limit.
    pub fn get(&self, category: ResourceCategory) -> Result<LimitPair> {
        let resource = resolve(category)?;
        let (soft, hard) = resource::getrlimit(resource)
            .map_err(|errno| RlimitError::SystemQueryFailure { category, errno })?;

        let limits = LimitPair::new(limit_from_raw(soft), limit_from_raw(hard));
        trace!("getrlimit({}) -> {}", category, limits);
        Ok(limits)
    }

    /// Apply both soft and hard limits for `category` in one call.
    ///
    /// The pair is checked for `soft <= hard` before anything reaches the
    /// kernel. Either both values are applied or neither is. Children forked
    /// afterwards inherit the new limits.
    pub fn set(&self, category: ResourceCategory, limits: LimitPair) -> Result<()> {
        let resource = resolve(category)?;
        if !limits.is_ordered() {
            return Err(RlimitError::InvalidLimitPair { category, limits });
        }

        resource::setrlimit(resource, limit_to_raw(limits.soft), limit_to_raw(limits.hard))
            .map_err(|errno| set_failure(category, limits, errno))?;

        debug!("setrlimit({}) applied {}", category, limits);
        Ok(())
    }

    /// Apply a possibly partial request, keeping omitted sides as they are.
    ///
    /// Returns the pair that was applied.
    pub fn update(&self, category: ResourceCategory, request: LimitRequest) -> Result<LimitPair> {
        let limits = match request.as_pair() {
            Some(pair) => pair,
            None => request.resolve(self.get(category)?),
        };
        self.set(category, limits)?;
        Ok(limits)
    }

    /// Read every supported category
    pub fn snapshot(&self) -> Result<Vec<(ResourceCategory, LimitPair)>> {
        self.supported_categories()
            .into_iter()
            .map(|category| Ok((category, self.get(category)?)))
            .collect()
    }
}

fn resolve(category: ResourceCategory) -> Result<Resource> {
    platform::native_resource(category)
        .ok_or_else(|| RlimitError::UnsupportedCategory(category.to_string()))
}

fn set_failure(category: ResourceCategory, requested: LimitPair, errno: Errno) -> RlimitError {
    match errno {
        Errno::EPERM | Errno::EACCES => {
            warn!(
                "setrlimit({}) to {} refused: insufficient privilege",
                category, requested
            );
            RlimitError::PermissionDenied {
                category,
                requested,
                errno,
            }
        }
        _ => RlimitError::SystemCallFailure {
            category,
            requested,
            errno,
        },
    }
}
