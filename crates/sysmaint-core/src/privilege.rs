//! Privilege check.

/// Error returned when the process lacks root privileges.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("this command must be run as root (effective uid {euid})")]
pub struct PrivilegeError {
    /// Effective uid of the process.
    pub euid: u32,
}

/// Effective user id of the current process.
#[allow(unsafe_code)]
pub fn effective_uid() -> u32 {
    // SAFETY: geteuid(2) has no preconditions and cannot fail.
    unsafe { libc::geteuid() }
}

/// Ensure the process runs with an effective uid of 0.
///
/// # Errors
///
/// Returns [`PrivilegeError`] for any other effective uid.
pub fn require_root() -> Result<(), PrivilegeError> {
    check_uid(effective_uid())
}

fn check_uid(euid: u32) -> Result<(), PrivilegeError> {
    if euid == 0 {
        Ok(())
    } else {
        Err(PrivilegeError { euid })
    }
}
