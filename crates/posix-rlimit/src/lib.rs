//! posix-rlimit: typed access to the current process's resource limits
//!
//! Wraps getrlimit(2)/setrlimit(2) behind [`ResourceLimitAccessor`], with an
//! explicit unbounded value, pre-validated soft/hard pairs, and a typed error
//! for every way the kernel can refuse. Which categories exist is fixed at
//! compile time per platform.
//!
//! # Example
//!
//! ```no_run
//! use posix_rlimit::{LimitPair, ResourceCategory, ResourceLimitAccessor};
//!
//! let accessor = ResourceLimitAccessor::new();
//! let current = accessor.get(ResourceCategory::OpenFileCount)?;
//! println!("nofile: {}", current);
//!
//! accessor.set(ResourceCategory::OpenFileCount, LimitPair::finite(256, 1024))?;
//! # Ok::<(), posix_rlimit::RlimitError>(())
//! ```

pub mod accessor;
pub mod config;
pub mod platform;

pub use accessor::ResourceLimitAccessor;
pub use config::RlimitConfig;
pub use platform::supported_categories;
pub use rlimit_core::{
    self as core, Limit, LimitPair, LimitRequest, ResourceCategory, Result, RlimitError,
    SystemCapabilities,
};

/// Read limits by short name (`"nofile"`, `"core"`, ...)
pub fn getrlimit(name: &str) -> Result<LimitPair> {
    let category = ResourceCategory::from_name(name)?;
    ResourceLimitAccessor::new().get(category)
}

/// Change limits by short name.
///
/// Sides left out of `request` keep their current values. Returns the pair
/// that was applied.
pub fn setrlimit(name: &str, request: impl Into<LimitRequest>) -> Result<LimitPair> {
    let category = ResourceCategory::from_name(name)?;
    ResourceLimitAccessor::new().update(category, request.into())
}
