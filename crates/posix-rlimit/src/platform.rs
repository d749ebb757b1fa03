//! Compile-time capability table
//!
//! Maps each [`ResourceCategory`] to the host's native resource id. Rows that
//! do not exist on every unix carry their own `cfg`, so a category missing
//! from the running platform simply has no row.

use libc::{RLIM_INFINITY, rlim_t};
use nix::sys::resource::Resource;
use rlimit_core::{Limit, ResourceCategory};

const CAPABILITY_TABLE: &[(ResourceCategory, Resource)] = &[
    (ResourceCategory::CoreDumpSize, Resource::RLIMIT_CORE),
    (ResourceCategory::CpuTime, Resource::RLIMIT_CPU),
    (ResourceCategory::DataSize, Resource::RLIMIT_DATA),
    (ResourceCategory::FileSize, Resource::RLIMIT_FSIZE),
    (ResourceCategory::OpenFileCount, Resource::RLIMIT_NOFILE),
    #[cfg(any(
        target_os = "linux",
        target_os = "android",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd"
    ))]
    (ResourceCategory::LockedMemory, Resource::RLIMIT_MEMLOCK),
    #[cfg(any(
        target_os = "linux",
        target_os = "android",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd"
    ))]
    (ResourceCategory::ResidentMemory, Resource::RLIMIT_RSS),
    #[cfg(any(
        target_os = "linux",
        target_os = "android",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd"
    ))]
    (ResourceCategory::ProcessCount, Resource::RLIMIT_NPROC),
    (ResourceCategory::StackSize, Resource::RLIMIT_STACK),
    #[cfg(not(any(
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd"
    )))]
    (ResourceCategory::AddressSpace, Resource::RLIMIT_AS),
];

/// Native resource id for `category`, if the platform has one
pub(crate) fn native_resource(category: ResourceCategory) -> Option<Resource> {
    CAPABILITY_TABLE
        .iter()
        .find(|(known, _)| *known == category)
        .map(|(_, resource)| *resource)
}

/// Categories the running platform supports, in [`ResourceCategory::ALL`] order
pub fn supported_categories() -> Vec<ResourceCategory> {
    ResourceCategory::ALL
        .into_iter()
        .filter(|category| native_resource(*category).is_some())
        .collect()
}

/// Read a native value; RLIM_INFINITY becomes [`Limit::Unbounded`].
#[allow(clippy::useless_conversion)]
pub(crate) fn limit_from_raw(raw: rlim_t) -> Limit {
    if raw == RLIM_INFINITY {
        Limit::Unbounded
    } else {
        Limit::Finite(u64::from(raw))
    }
}

/// Finite values that do not fit the native width saturate to RLIM_INFINITY.
#[allow(clippy::useless_conversion)]
pub(crate) fn limit_to_raw(limit: Limit) -> rlim_t {
    match limit {
        Limit::Unbounded => RLIM_INFINITY,
        Limit::Finite(value) => rlim_t::try_from(value)
            .unwrap_or(RLIM_INFINITY)
            .min(RLIM_INFINITY),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posix_core_categories_are_always_supported() {
        for category in [
            ResourceCategory::CoreDumpSize,
            ResourceCategory::CpuTime,
            ResourceCategory::DataSize,
            ResourceCategory::FileSize,
            ResourceCategory::OpenFileCount,
            ResourceCategory::StackSize,
        ] {
            assert!(native_resource(category).is_some(), "{} missing", category);
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn linux_supports_every_category() {
        assert_eq!(supported_categories(), ResourceCategory::ALL.to_vec());
        assert_eq!(
            native_resource(ResourceCategory::ProcessCount),
            Some(Resource::RLIMIT_NPROC)
        );
    }

    #[cfg(any(target_os = "freebsd", target_os = "netbsd", target_os = "openbsd"))]
    #[test]
    fn bsd_supports_memlock_rss_and_nproc() {
        assert_eq!(
            native_resource(ResourceCategory::LockedMemory),
            Some(Resource::RLIMIT_MEMLOCK)
        );
        assert_eq!(
            native_resource(ResourceCategory::ResidentMemory),
            Some(Resource::RLIMIT_RSS)
        );
        assert_eq!(
            native_resource(ResourceCategory::ProcessCount),
            Some(Resource::RLIMIT_NPROC)
        );
        assert!(native_resource(ResourceCategory::AddressSpace).is_none());
    }

    #[test]
    fn table_has_no_duplicate_rows() {
        let supported = supported_categories();
        assert_eq!(supported.len(), CAPABILITY_TABLE.len());
    }

    #[test]
    fn infinity_maps_to_unbounded() {
        assert_eq!(limit_from_raw(RLIM_INFINITY), Limit::Unbounded);
        assert_eq!(limit_to_raw(Limit::Unbounded), RLIM_INFINITY);
        assert_eq!(limit_from_raw(1024), Limit::Finite(1024));
        assert_eq!(limit_to_raw(Limit::Finite(1024)), 1024);
    }

    #[test]
    fn oversized_finite_saturates() {
        assert_eq!(limit_to_raw(Limit::Finite(u64::MAX)), RLIM_INFINITY);
    }
}
