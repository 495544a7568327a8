use std::ffi::CString;
use std::fs::{File, OpenOptions};
use std::io;
use std::os::fd::AsFd;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use fsjail_core::JailError;
use fsjail_landlock::{Abi, Permissions, Ruleset};
use log::{debug, info};
use nix::unistd::execvp;

use crate::cli::Cli;

const RO_PERMS: Permissions = Permissions::READ.union(Permissions::EXECUTE);
const RW_PERMS: Permissions = Permissions::READ
    .union(Permissions::WRITE)
    .union(Permissions::EXECUTE);

/// One path grant assembled from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant {
    pub path: PathBuf,
    pub perms: Permissions,
    pub optional: bool,
}

impl Grant {
    fn required(path: PathBuf, perms: Permissions) -> Self {
        Self {
            path,
            perms,
            optional: false,
        }
    }

    fn optional(path: PathBuf, perms: Permissions) -> Self {
        Self {
            path,
            perms,
            optional: true,
        }
    }
}

/// Flatten the CLI options into the ordered grant list.
pub fn collect_grants(cli: &Cli) -> Vec<Grant> {
    let mut grants = Vec::new();

    if cli.dev {
        grants.push(Grant::required(PathBuf::from("/dev"), RW_PERMS));
    }
    if cli.proc {
        grants.push(Grant::required(PathBuf::from("/proc"), RW_PERMS));
    }

    for path in &cli.ro {
        grants.push(Grant::required(path.clone(), RO_PERMS));
    }
    for path in &cli.ro_try {
        grants.push(Grant::optional(path.clone(), RO_PERMS));
    }
    for path in &cli.rw {
        grants.push(Grant::required(path.clone(), RW_PERMS));
    }
    for path in &cli.rw_try {
        grants.push(Grant::optional(path.clone(), RW_PERMS));
    }

    grants
}

/// Open a path for use as a Landlock rule anchor.
///
/// `O_PATH` works for both files and directories and does not require read
/// permission on the target.
fn open_grant_path(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .read(true)
        .custom_flags(libc::O_PATH)
        .open(path)
}

/// Build the jail from the command line, enforce it, and exec the command.
///
/// Any failure aborts before exec: the target never runs unrestricted.
pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let abi = Abi::negotiate()?;
    debug!("negotiated Landlock ABI v{}", abi.version());

    let mut ruleset = Ruleset::create(abi)?;

    for grant in collect_grants(&cli) {
        let file = match open_grant_path(&grant.path) {
            Ok(file) => file,
            Err(err) if grant.optional && err.kind() == io::ErrorKind::NotFound => {
                debug!("skipping missing path {}", grant.path.display());
                continue;
            }
            Err(err) => {
                return Err(Box::new(JailError::Open {
                    path: grant.path.clone(),
                    source: err,
                }));
            }
        };

        ruleset
            .add_rule(file.as_fd(), grant.perms)
            .map_err(|err| format!("cannot grant access to {}: {}", grant.path.display(), err))?;

        debug!("granted {:?} on {}", grant.perms, grant.path.display());
    }

    let enforced = ruleset.enforce()?;
    info!("Landlock ABI v{} ruleset enforced", enforced.abi_version());

    exec_command(&cli.command)
}

/// Replace the current process image with the jailed command.
fn exec_command(command: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let program = CString::new(command[0].as_str())?;
    let args = command
        .iter()
        .map(|arg| CString::new(arg.as_str()))
        .collect::<Result<Vec<_>, _>>()?;

    // Only reachable on failure; on success the image is replaced
    let errno = match execvp(&program, &args) {
        Err(errno) => errno,
        Ok(never) => match never {},
    };

    Err(Box::new(JailError::Exec {
        program: command[0].clone(),
        source: errno.into(),
    }))
}
