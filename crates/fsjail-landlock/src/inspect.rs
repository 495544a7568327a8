//! Classification of already-open path descriptors

use std::io;
use std::mem::MaybeUninit;
use std::os::fd::{AsRawFd, BorrowedFd};

use fsjail_core::{JailError, Result};

/// Report whether `fd` refers to a directory.
///
/// Nothing is cached: the answer is valid only for the instant of the call,
/// and the caller owns any time-of-check/time-of-use concern when resolving
/// paths. Fails only if the status query itself fails (stale or invalid
/// descriptor).
pub fn is_directory(fd: BorrowedFd<'_>) -> Result<bool> {
    let mut stat = MaybeUninit::<libc::stat>::uninit();

    let ret = unsafe { libc::fstat(fd.as_raw_fd(), stat.as_mut_ptr()) };
    if ret == -1 {
        return Err(JailError::Inspect(io::Error::last_os_error()));
    }

    let stat = unsafe { stat.assume_init() };
    Ok((stat.st_mode & libc::S_IFMT) == libc::S_IFDIR)
}
