//! rlimit-core: shared types, errors, and privilege detection for posix-rlimit
//!
//! This crate provides the foundational types used by the accessor crate:
//! - Resource categories and their canonical names
//! - Limit values with an explicit unbounded representation
//! - Error types and Result alias
//! - Runtime privilege detection

pub mod capabilities;
pub mod category;
pub mod error;
pub mod limit;

pub use capabilities::SystemCapabilities;
pub use category::ResourceCategory;
pub use error::{Result, RlimitError};
pub use limit::{Limit, LimitPair, LimitRequest};
