//! fsjail-landlock: Landlock ruleset lifecycle and permission translation
//!
//! Landlock (Linux 5.13+) provides unprivileged filesystem access control.
//! This crate owns the hard part of using it: negotiating which access
//! rights the running kernel understands, translating abstract
//! read/write/execute grants into the kernel's fine-grained masks narrowed
//! for file-vs-directory targets, and driving a ruleset from creation
//! through rule accumulation to one-shot, irrevocable enforcement.
//!
//! ```no_run
//! use fsjail_landlock::{Abi, Permissions, Ruleset};
//! use std::fs::File;
//! use std::os::fd::AsFd;
//!
//! # fn main() -> fsjail_core::Result<()> {
//! let abi = Abi::negotiate()?;
//! let mut ruleset = Ruleset::create(abi)?;
//!
//! let usr = File::open("/usr")?;
//! ruleset.add_rule(usr.as_fd(), Permissions::READ | Permissions::EXECUTE)?;
//!
//! // Terminal: from here the restriction binds this process and all
//! // descendants, surviving exec.
//! ruleset.enforce()?;
//! # Ok(())
//! # }
//! ```

mod abi;
mod access;
mod inspect;
mod ruleset;

pub use abi::Abi;
pub use access::{translate, AccessFs, Permissions};
pub use inspect::is_directory;
pub use ruleset::{Enforced, Ruleset};
