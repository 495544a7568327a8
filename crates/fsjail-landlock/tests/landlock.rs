//! Landlock enforcement tests
//!
//! Enforcement is irreversible for the calling process, so every test that
//! commits a ruleset does so in a forked child and asserts on its exit
//! code. They do NOT require root (Landlock is designed for unprivileged
//! use) but DO require Linux 5.13+ with Landlock enabled; tests skip
//! gracefully where the kernel lacks support.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use std::os::fd::AsFd;

use fsjail_landlock::{Abi, Permissions, Ruleset};

fn landlock_available() -> bool {
    Abi::negotiate().is_ok()
}

/// Run `child` in a forked process and return its exit code.
fn run_forked(child: impl FnOnce() -> i32) -> i32 {
    unsafe {
        let pid = libc::fork();
        assert!(pid >= 0, "fork failed: {}", std::io::Error::last_os_error());

        if pid == 0 {
            libc::_exit(child());
        }

        let mut status: i32 = 0;
        libc::waitpid(pid, &mut status, 0);
        assert!(libc::WIFEXITED(status), "child should exit normally");
        libc::WEXITSTATUS(status)
    }
}

/// Open `path` and attach a rule for it; false on any failure.
fn grant(ruleset: &mut Ruleset, path: &Path, perms: Permissions) -> bool {
    match fs::File::open(path) {
        Ok(file) => ruleset.add_rule(file.as_fd(), perms).is_ok(),
        Err(_) => false,
    }
}

fn denied(err: &std::io::Error) -> bool {
    err.raw_os_error() == Some(libc::EACCES)
}

#[test]
fn negotiation_check_is_safe() {
    let _ = Abi::negotiate();
}

/// Grant read on /tmp and /proc only, then try to read /etc/hostname.
#[test]
fn enforcement_denies_ungranted_reads() {
    if !landlock_available() {
        eprintln!("SKIP: Landlock not available on this kernel");
        return;
    }

    let code = run_forked(|| {
        let Ok(abi) = Abi::negotiate() else { return 99 };
        let Ok(mut ruleset) = Ruleset::create(abi) else {
            return 99;
        };
        if !grant(
            &mut ruleset,
            Path::new("/tmp"),
            Permissions::READ | Permissions::WRITE,
        ) {
            return 99;
        }
        if !grant(&mut ruleset, Path::new("/proc"), Permissions::READ) {
            return 99;
        }
        if ruleset.enforce().is_err() {
            return 99;
        }

        match fs::File::open("/etc/hostname") {
            Ok(_) => 1,
            Err(err) if denied(&err) => 0,
            Err(_) => 2,
        }
    });

    assert!(
        code == 0 || code == 2,
        "read outside the granted paths should be denied (exit={code})"
    );
}

/// Granted paths must stay accessible after enforcement.
#[test]
fn enforcement_allows_granted_paths() {
    if !landlock_available() {
        eprintln!("SKIP: Landlock not available on this kernel");
        return;
    }

    let path = PathBuf::from(format!("/tmp/fsjail-test-read-{}", std::process::id()));
    fs::write(&path, b"test data").unwrap();

    let target = path.clone();
    let code = run_forked(move || {
        let Ok(abi) = Abi::negotiate() else { return 99 };
        let Ok(mut ruleset) = Ruleset::create(abi) else {
            return 99;
        };
        if !grant(
            &mut ruleset,
            Path::new("/tmp"),
            Permissions::READ | Permissions::WRITE,
        ) {
            return 99;
        }
        if ruleset.enforce().is_err() {
            return 99;
        }

        match fs::read(&target) {
            Ok(data) if data == b"test data" => 0,
            Ok(_) => 2,
            Err(_) => 1,
        }
    });

    let _ = fs::remove_file(&path);
    assert_eq!(code, 0, "granted path should remain readable");
}

/// Read-only grant must not allow creating files.
#[test]
fn enforcement_denies_writes_under_read_only_grant() {
    if !landlock_available() {
        eprintln!("SKIP: Landlock not available on this kernel");
        return;
    }

    let code = run_forked(|| {
        let Ok(abi) = Abi::negotiate() else { return 99 };
        let Ok(mut ruleset) = Ruleset::create(abi) else {
            return 99;
        };
        if !grant(&mut ruleset, Path::new("/tmp"), Permissions::READ) {
            return 99;
        }
        if ruleset.enforce().is_err() {
            return 99;
        }

        let path = format!("/tmp/fsjail-test-write-deny-{}", std::process::id());
        match fs::File::create(&path) {
            Ok(_) => {
                let _ = fs::remove_file(&path);
                1
            }
            Err(_) => 0,
        }
    });

    assert_eq!(code, 0, "write under a read-only grant should be denied");
}

/// A read-only directory rule and a read-write rule for a file nested under
/// it stay independently in force: the file is writable, the directory is
/// listable, and creating a new file in the directory is still denied.
#[test]
fn nested_rules_remain_independently_in_force() {
    if !landlock_available() {
        eprintln!("SKIP: Landlock not available on this kernel");
        return;
    }

    let dir = PathBuf::from(format!("/tmp/fsjail-test-nested-{}", std::process::id()));
    let file = dir.join("data");
    fs::create_dir(&dir).unwrap();
    fs::write(&file, b"seed").unwrap();

    let (dir_path, file_path) = (dir.clone(), file.clone());
    let code = run_forked(move || {
        let Ok(abi) = Abi::negotiate() else { return 99 };
        let Ok(mut ruleset) = Ruleset::create(abi) else {
            return 99;
        };
        if !grant(
            &mut ruleset,
            &dir_path,
            Permissions::READ | Permissions::EXECUTE,
        ) {
            return 99;
        }
        if !grant(
            &mut ruleset,
            &file_path,
            Permissions::READ | Permissions::WRITE,
        ) {
            return 99;
        }
        if ruleset.enforce().is_err() {
            return 99;
        }

        // Directory rule: listing works
        if fs::read_dir(&dir_path).is_err() {
            return 1;
        }

        // File rule: writing the nested file works
        let opened = fs::OpenOptions::new().write(true).open(&file_path);
        match opened {
            Ok(mut f) => {
                if f.write_all(b"more").is_err() {
                    return 2;
                }
            }
            Err(_) => return 2,
        }

        // Not granted anywhere: creating a sibling file is denied
        match fs::File::create(dir_path.join("intruder")) {
            Ok(_) => 3,
            Err(err) if denied(&err) => 0,
            Err(_) => 4,
        }
    });

    let _ = fs::remove_dir_all(&dir);
    assert_eq!(
        code, 0,
        "nested rules should compose without widening (exit={code})"
    );
}

/// Enforcing a ruleset with zero rules succeeds and denies all filesystem
/// access covered by the declared set.
#[test]
fn empty_ruleset_enforces_default_deny() {
    if !landlock_available() {
        eprintln!("SKIP: Landlock not available on this kernel");
        return;
    }

    let code = run_forked(|| {
        let Ok(abi) = Abi::negotiate() else { return 99 };
        let Ok(ruleset) = Ruleset::create(abi) else {
            return 99;
        };
        if ruleset.enforce().is_err() {
            return 99;
        }

        match fs::File::open("/tmp") {
            Ok(_) => 1,
            Err(err) if denied(&err) => 0,
            Err(_) => 2,
        }
    });

    assert_eq!(code, 0, "zero-rule enforcement should deny everything");
}
