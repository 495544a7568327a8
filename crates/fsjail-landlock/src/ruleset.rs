//! Landlock ruleset lifecycle: create, add rules, enforce
//!
//! A [`Ruleset`] is the building state of the kernel object. [`Ruleset::enforce`]
//! consumes it, so adding a rule after enforcement or enforcing twice is
//! rejected by the compiler instead of discovered at runtime.

use std::io;
use std::mem;
use std::os::fd::{AsRawFd, BorrowedFd, FromRawFd, OwnedFd};

use fsjail_core::{JailError, Result};

use crate::abi::Abi;
use crate::access::{translate, Permissions};
use crate::inspect::is_directory;

const LANDLOCK_RULE_PATH_BENEATH: u32 = 1;

// Kernel argument structs for the landlock syscalls
#[repr(C)]
struct RulesetAttr {
    handled_access_fs: u64,
    handled_access_net: u64,
}

#[repr(C)]
struct PathBeneathAttr {
    allowed_access: u64,
    parent_fd: libc::c_int,
}

/// An in-progress Landlock ruleset.
///
/// Owns the underlying kernel object; the descriptor is released on drop
/// and on every exit of [`Ruleset::enforce`]. There is no internal
/// synchronization: the `&mut self` receiver serializes rule additions.
#[derive(Debug)]
pub struct Ruleset {
    fd: OwnedFd,
    abi: Abi,
}

impl Ruleset {
    /// Create a ruleset declaring every access right this crate can ever
    /// request, filtered by the negotiated ABI.
    ///
    /// The declared set uses directory framing on purpose: it must stay a
    /// superset of anything a later rule may request, and file-narrowing it
    /// here would silently truncate rights granted to directories later.
    pub fn create(abi: Abi) -> Result<Self> {
        let attr = RulesetAttr {
            handled_access_fs: translate(Permissions::all(), true, abi).bits(),
            handled_access_net: 0,
        };

        let ret = unsafe {
            libc::syscall(
                libc::SYS_landlock_create_ruleset,
                &attr as *const RulesetAttr,
                mem::size_of::<RulesetAttr>(),
                0u32,
            )
        };

        if ret < 0 {
            return Err(JailError::Ruleset(io::Error::last_os_error()));
        }

        // The syscall returned a fresh ruleset descriptor that we now own
        let fd = unsafe { OwnedFd::from_raw_fd(ret as libc::c_int) };

        Ok(Self { fd, abi })
    }

    /// Attach one rule granting `perms` beneath the path open at `path_fd`.
    ///
    /// The descriptor stays owned by the caller and is only inspected and
    /// referenced for the duration of the call. Rules accumulate: adding a
    /// rule never alters previously added ones, and resolution between
    /// overlapping or nested rules happens in the kernel at access time.
    pub fn add_rule(&mut self, path_fd: BorrowedFd<'_>, perms: Permissions) -> Result<()> {
        let is_dir = is_directory(path_fd)?;

        let attr = PathBeneathAttr {
            allowed_access: translate(perms, is_dir, self.abi).bits(),
            parent_fd: path_fd.as_raw_fd(),
        };

        let ret = unsafe {
            libc::syscall(
                libc::SYS_landlock_add_rule,
                self.fd.as_raw_fd(),
                LANDLOCK_RULE_PATH_BENEATH,
                &attr as *const PathBeneathAttr,
                0u32,
            )
        };

        if ret < 0 {
            return Err(JailError::Rule(io::Error::last_os_error()));
        }

        Ok(())
    }

    /// Irreversibly restrict the calling process, and everything it will
    /// ever spawn or exec, to the accumulated rules.
    ///
    /// Sets `no_new_privs` first; if that fails the ruleset is never
    /// committed. If committing fails afterwards the operation still fails,
    /// but the privilege-escalation block stays in place.
    pub fn enforce(self) -> Result<Enforced> {
        let ret = unsafe { libc::prctl(libc::PR_SET_NO_NEW_PRIVS, 1, 0, 0, 0) };
        if ret != 0 {
            return Err(JailError::NoNewPrivs(io::Error::last_os_error()));
        }

        let ret =
            unsafe { libc::syscall(libc::SYS_landlock_restrict_self, self.fd.as_raw_fd(), 0u32) };
        if ret < 0 {
            return Err(JailError::Enforce(io::Error::last_os_error()));
        }

        // self.fd drops here and on the error paths above, closing the
        // ruleset descriptor; the restriction itself outlives it.
        Ok(Enforced {
            version: self.abi.version(),
        })
    }
}

/// Proof that a ruleset has been committed to the kernel.
#[derive(Debug)]
pub struct Enforced {
    version: u32,
}

impl Enforced {
    /// ABI version the restriction was negotiated under.
    pub fn abi_version(&self) -> u32 {
        self.version
    }
}
