//! Landlock ABI negotiation
//!
//! The kernel reports the highest ruleset ABI version it supports; newer
//! versions add access rights. Probing once up front lets the translator
//! drop rights the running kernel would reject.

use std::io;
use std::ptr;

use fsjail_core::{JailError, Result};

use crate::access::AccessFs;

const LANDLOCK_CREATE_RULESET_VERSION: u32 = 1;

/// Negotiated Landlock ABI: the kernel's version and the access rights it
/// does not understand.
///
/// Obtained once from [`Abi::negotiate`] before any ruleset is created and
/// passed by value from then on; there is no hidden global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Abi {
    version: u32,
    unsupported: AccessFs,
}

impl Abi {
    /// Probe the kernel for its highest supported Landlock ABI version.
    ///
    /// Must precede every other Landlock operation. Fails if the mechanism
    /// is unavailable on this kernel entirely (not compiled in, disabled by
    /// the security policy, or the syscall does not exist).
    pub fn negotiate() -> Result<Self> {
        let ret = unsafe {
            libc::syscall(
                libc::SYS_landlock_create_ruleset,
                ptr::null::<libc::c_void>(),
                0usize,
                LANDLOCK_CREATE_RULESET_VERSION,
            )
        };

        if ret < 0 {
            return Err(JailError::NotAvailable(io::Error::last_os_error()));
        }

        Ok(Self::for_version(ret as u32))
    }

    /// Build the ABI description for a known version number.
    pub(crate) fn for_version(version: u32) -> Self {
        let mut unsupported = AccessFs::empty();

        if version < 3 {
            unsupported |= AccessFs::TRUNCATE;
        }
        if version < 2 {
            unsupported |= AccessFs::REFER;
        }

        Self {
            version,
            unsupported,
        }
    }

    /// The kernel's highest supported ABI version.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Access rights this kernel cannot handle.
    pub(crate) fn unsupported(&self) -> AccessFs {
        self.unsupported
    }
}
