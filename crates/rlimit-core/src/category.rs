//! Resource categories addressed by getrlimit/setrlimit
//!
//! The enum is the same on every platform. Which variants the running
//! platform can actually service is decided by the accessor's capability
//! table, not here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RlimitError;

/// Which resource limit an operation addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceCategory {
    /// Maximum size of a core dump in bytes (RLIMIT_CORE)
    #[serde(rename = "core")]
    CoreDumpSize,
    /// CPU time in seconds (RLIMIT_CPU)
    #[serde(rename = "cpu")]
    CpuTime,
    /// Data segment size in bytes (RLIMIT_DATA)
    #[serde(rename = "data")]
    DataSize,
    /// Largest file the process may create, in bytes (RLIMIT_FSIZE)
    #[serde(rename = "fsize")]
    FileSize,
    /// One more than the highest file descriptor number (RLIMIT_NOFILE)
    #[serde(rename = "nofile")]
    OpenFileCount,
    /// Bytes of memory that may be locked into RAM (RLIMIT_MEMLOCK)
    #[serde(rename = "memlock")]
    LockedMemory,
    /// Resident set size (RLIMIT_RSS)
    #[serde(rename = "rss")]
    ResidentMemory,
    /// Processes (threads on Linux) for the real user ID (RLIMIT_NPROC)
    #[serde(rename = "nproc")]
    ProcessCount,
    /// Main thread stack size in bytes (RLIMIT_STACK)
    #[serde(rename = "stack")]
    StackSize,
    /// Virtual address space in bytes (RLIMIT_AS)
    #[serde(rename = "as")]
    AddressSpace,
}

impl ResourceCategory {
    pub const ALL: [ResourceCategory; 10] = [
        ResourceCategory::CoreDumpSize,
        ResourceCategory::CpuTime,
        ResourceCategory::DataSize,
        ResourceCategory::FileSize,
        ResourceCategory::OpenFileCount,
        ResourceCategory::LockedMemory,
        ResourceCategory::ResidentMemory,
        ResourceCategory::ProcessCount,
        ResourceCategory::StackSize,
        ResourceCategory::AddressSpace,
    ];

    /// Canonical short name, as used by `ulimit`-style tooling
    pub fn name(&self) -> &'static str {
        match self {
            ResourceCategory::CoreDumpSize => "core",
            ResourceCategory::CpuTime => "cpu",
            ResourceCategory::DataSize => "data",
            ResourceCategory::FileSize => "fsize",
            ResourceCategory::OpenFileCount => "nofile",
            ResourceCategory::LockedMemory => "memlock",
            ResourceCategory::ResidentMemory => "rss",
            ResourceCategory::ProcessCount => "nproc",
            ResourceCategory::StackSize => "stack",
            ResourceCategory::AddressSpace => "as",
        }
    }

    /// Look up a category by short name.
    ///
    /// Matching ignores case and an optional `rlimit_` prefix, so `nofile`,
    /// `NOFILE` and `RLIMIT_NOFILE` all resolve to [`ResourceCategory::OpenFileCount`].
    pub fn from_name(name: &str) -> Result<Self, RlimitError> {
        let lowered = name.trim().to_ascii_lowercase();
        let short = lowered.strip_prefix("rlimit_").unwrap_or(lowered.as_str());

        Self::ALL
            .into_iter()
            .find(|category| category.name() == short)
            .ok_or_else(|| RlimitError::UnsupportedCategory(name.to_string()))
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResourceCategory {
    type Err = RlimitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
