//! Runtime detection of Landlock support
//!
//! Probes the running kernel so callers can report missing features before
//! attempting to build a jail.

use std::ptr;

const LANDLOCK_CREATE_RULESET_VERSION: u32 = 1;

/// Detected sandboxing capabilities of the current system
#[derive(Debug, Clone)]
pub struct SystemCapabilities {
    /// Landlock LSM is available (Linux 5.13+)
    pub has_landlock: bool,
    /// Highest Landlock ABI version the kernel supports (0 when unavailable)
    pub landlock_abi: u32,
    /// no_new_privs is already set for this process
    pub no_new_privs: bool,
}

impl SystemCapabilities {
    /// Detect all capabilities relevant to jailing on the current system
    pub fn detect() -> Self {
        let abi = probe_landlock_abi();
        Self {
            has_landlock: abi > 0,
            landlock_abi: abi,
            no_new_privs: probe_no_new_privs(),
        }
    }

    /// Get a human-readable summary of capabilities
    pub fn summary(&self) -> String {
        let check = |available: bool| if available { "[ok]" } else { "[--]" };
        let mut lines = Vec::new();

        lines.push(format!("{} Landlock LSM", check(self.has_landlock)));
        if self.has_landlock {
            lines.push(format!("     highest ABI version: {}", self.landlock_abi));
        }
        lines.push(format!(
            "{} no_new_privs already set",
            check(self.no_new_privs)
        ));

        lines.join("\n")
    }
}

fn probe_landlock_abi() -> u32 {
    // With flags=LANDLOCK_CREATE_RULESET_VERSION and NULL attrs the syscall
    // returns the highest supported ABI version, not a file descriptor.
    let ret = unsafe {
        libc::syscall(
            libc::SYS_landlock_create_ruleset,
            ptr::null::<libc::c_void>(),
            0usize,
            LANDLOCK_CREATE_RULESET_VERSION,
        )
    };

    if ret < 0 {
        0
    } else {
        ret as u32
    }
}

fn probe_no_new_privs() -> bool {
    unsafe { libc::prctl(libc::PR_GET_NO_NEW_PRIVS, 0, 0, 0, 0) == 1 }
}
