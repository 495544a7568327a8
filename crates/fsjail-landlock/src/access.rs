//! Abstract permissions and their translation to Landlock access rights
//!
//! Two separate flag types keep the caller-facing mask and the
//! kernel-facing mask from being mixed up: [`Permissions`] is what a grant
//! requests, [`AccessFs`] is what the kernel enforces.

use bitflags::bitflags;

use crate::abi::Abi;

bitflags! {
    /// Caller-facing permission request for one path grant
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Permissions: u32 {
        const READ = 1;
        const WRITE = 1 << 1;
        const EXECUTE = 1 << 2;
    }
}

bitflags! {
    /// Landlock `LANDLOCK_ACCESS_FS_*` access rights
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AccessFs: u64 {
        const EXECUTE = 1;
        const WRITE_FILE = 1 << 1;
        const READ_FILE = 1 << 2;
        const READ_DIR = 1 << 3;
        const REMOVE_DIR = 1 << 4;
        const REMOVE_FILE = 1 << 5;
        const MAKE_CHAR = 1 << 6;
        const MAKE_DIR = 1 << 7;
        const MAKE_REG = 1 << 8;
        const MAKE_SOCK = 1 << 9;
        const MAKE_FIFO = 1 << 10;
        const MAKE_BLOCK = 1 << 11;
        const MAKE_SYM = 1 << 12;
        /// Re-linking and reparenting across directories, ABI v2+
        const REFER = 1 << 13;
        /// Truncation, ABI v3+
        const TRUNCATE = 1 << 14;
    }
}

impl AccessFs {
    /// Rights requested by [`Permissions::READ`].
    const READ_SET: Self = Self::READ_FILE.union(Self::READ_DIR);

    /// Rights requested by [`Permissions::WRITE`].
    const WRITE_SET: Self = Self::WRITE_FILE
        .union(Self::REMOVE_DIR)
        .union(Self::REMOVE_FILE)
        .union(Self::MAKE_CHAR)
        .union(Self::MAKE_DIR)
        .union(Self::MAKE_REG)
        .union(Self::MAKE_SOCK)
        .union(Self::MAKE_FIFO)
        .union(Self::MAKE_BLOCK)
        .union(Self::MAKE_SYM)
        .union(Self::REFER)
        .union(Self::TRUNCATE);

    /// The only rights that apply to a non-directory target.
    const FILE_SET: Self = Self::EXECUTE
        .union(Self::WRITE_FILE)
        .union(Self::READ_FILE);
}

/// Translate an abstract permission request into the Landlock access mask
/// for one rule.
///
/// Narrowing is two-stage and order-independent: rights that are
/// meaningless for a plain file are dropped when `is_dir` is false, and
/// rights the negotiated ABI cannot handle are dropped unconditionally.
/// Ruleset creation calls this with `is_dir = true` so the declared set
/// stays a superset of anything a later rule can request.
pub fn translate(perms: Permissions, is_dir: bool, abi: Abi) -> AccessFs {
    let mut access = AccessFs::empty();

    if perms.contains(Permissions::READ) {
        access |= AccessFs::READ_SET;
    }
    if perms.contains(Permissions::WRITE) {
        access |= AccessFs::WRITE_SET;
    }
    if perms.contains(Permissions::EXECUTE) {
        access |= AccessFs::EXECUTE;
    }

    if !is_dir {
        access &= AccessFs::FILE_SET;
    }

    access.difference(abi.unsupported())
}
