//! Runtime detection of limit-related privileges
//!
//! Raising a hard limit needs root or `CAP_SYS_RESOURCE`. The accessor never
//! consults this before a syscall; it is here so callers and tests can tell
//! which outcome to expect.

use nix::unistd::geteuid;

/// Bit index of CAP_SYS_RESOURCE in the capability sets
#[cfg(any(target_os = "linux", target_os = "android"))]
const CAP_SYS_RESOURCE: u32 = 24;

/// Detected privileges of the current process
#[derive(Debug, Clone)]
pub struct SystemCapabilities {
    /// Running as root (euid == 0)
    pub has_root: bool,
    /// CAP_SYS_RESOURCE is in the effective set
    pub has_sys_resource: bool,
}

impl SystemCapabilities {
    /// Detect privileges of the current process
    pub fn detect() -> Self {
        let has_root = detect_root();
        Self {
            has_root,
            has_sys_resource: detect_sys_resource().unwrap_or(has_root),
        }
    }

    /// Whether the kernel should allow raising hard limits.
    ///
    /// Linux checks CAP_SYS_RESOURCE alone, so a root process that dropped it
    /// is refused too.
    pub fn can_raise_hard_limits(&self) -> bool {
        self.has_sys_resource
    }

    /// Get a human-readable summary of capabilities
    pub fn summary(&self) -> String {
        let check = |available: bool| if available { "[ok]" } else { "[--]" };
        [
            format!("{} Root privileges", check(self.has_root)),
            format!("{} CAP_SYS_RESOURCE", check(self.has_sys_resource)),
        ]
        .join("\n")
    }
}

fn detect_root() -> bool {
    geteuid().is_root()
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn detect_sys_resource() -> Option<bool> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    parse_cap_eff(&status).map(|caps| caps & (1 << CAP_SYS_RESOURCE) != 0)
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn detect_sys_resource() -> Option<bool> {
    None
}

/// Extract the effective capability mask from /proc/<pid>/status contents
#[cfg(any(target_os = "linux", target_os = "android"))]
fn parse_cap_eff(status: &str) -> Option<u64> {
    status
        .lines()
        .find_map(|line| line.strip_prefix("CapEff:"))
        .and_then(|hex| u64::from_str_radix(hex.trim(), 16).ok())
}
