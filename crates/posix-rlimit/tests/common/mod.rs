//! Helpers shared by the integration tests

#![allow(dead_code)]

use std::panic::{AssertUnwindSafe, catch_unwind};

use nix::sys::wait::{WaitStatus, waitpid};
use nix::unistd::{ForkResult, fork};

/// Exit code a child uses when the host cannot exercise the scenario
pub const SKIPPED: i32 = 77;

/// Run `body` in a forked child and return its exit code.
///
/// Limits changed by the child die with it, so the test runner keeps its own.
/// A panic in the child is reported as exit code 101.
pub fn in_child(body: impl FnOnce() -> i32) -> i32 {
    match unsafe { fork() } {
        Ok(ForkResult::Child) => {
            let code = catch_unwind(AssertUnwindSafe(body)).unwrap_or(101);
            unsafe { libc::_exit(code) }
        }
        Ok(ForkResult::Parent { child }) => loop {
            match waitpid(child, None) {
                Ok(WaitStatus::Exited(_, code)) => return code,
                Ok(WaitStatus::Signaled(_, signal, _)) => {
                    panic!("child killed by signal {:?}", signal)
                }
                Ok(_) => continue,
                Err(e) => panic!("waitpid failed: {}", e),
            }
        },
        Err(e) => panic!("fork failed: {}", e),
    }
}

/// Assert a child exited with 0, tolerating a skip
pub fn assert_child_ok(code: i32, what: &str) {
    if code == SKIPPED {
        eprintln!("skipped: {}", what);
        return;
    }
    assert_eq!(code, 0, "{}", what);
}
