use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fsjail-ctl")]
#[command(version, about = "Run a command under Landlock filesystem restrictions", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Read-only system, writable scratch directory
    fsjail-ctl --ro /usr --ro /etc --rw /tmp -- ls -l /tmp

    # Convenience grants for /dev and /proc
    fsjail-ctl --dev --proc --ro /usr -- sh -c 'echo ok > /dev/null'

    # Tolerate a path that may not exist
    fsjail-ctl --ro /usr --ro-try /opt/tools -- my-tool

    # Probe kernel support
    fsjail-ctl --check
")]
pub struct Cli {
    /// Grant read-only access to PATH (repeatable)
    #[arg(long, value_name = "PATH")]
    pub ro: Vec<PathBuf>,

    /// Same as --ro but skip PATH if it does not exist
    #[arg(long = "ro-try", value_name = "PATH")]
    pub ro_try: Vec<PathBuf>,

    /// Grant read-write access to PATH (repeatable)
    #[arg(long, value_name = "PATH")]
    pub rw: Vec<PathBuf>,

    /// Same as --rw but skip PATH if it does not exist
    #[arg(long = "rw-try", value_name = "PATH")]
    pub rw_try: Vec<PathBuf>,

    /// Grant basic access to /dev
    #[arg(long)]
    pub dev: bool,

    /// Grant basic access to /proc
    #[arg(long)]
    pub proc: bool,

    /// Check Landlock support and exit
    #[arg(long)]
    pub check: bool,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to run inside the jail, with its arguments
    #[arg(value_name = "COMMAND", trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_grants_and_command() {
        let cli = Cli::try_parse_from([
            "fsjail-ctl",
            "--ro",
            "/usr",
            "--rw",
            "/tmp",
            "--ro-try",
            "/opt",
            "--",
            "ls",
            "-l",
        ])
        .unwrap();

        assert_eq!(cli.ro, vec![PathBuf::from("/usr")]);
        assert_eq!(cli.rw, vec![PathBuf::from("/tmp")]);
        assert_eq!(cli.ro_try, vec![PathBuf::from("/opt")]);
        assert_eq!(cli.command, vec!["ls".to_string(), "-l".to_string()]);
    }

    #[test]
    fn repeated_options_accumulate() {
        let cli =
            Cli::try_parse_from(["fsjail-ctl", "--ro", "/usr", "--ro", "/etc", "true"]).unwrap();
        assert_eq!(
            cli.ro,
            vec![PathBuf::from("/usr"), PathBuf::from("/etc")]
        );
        assert_eq!(cli.command, vec!["true".to_string()]);
    }

    #[test]
    fn check_needs_no_command() {
        let cli = Cli::try_parse_from(["fsjail-ctl", "--check"]).unwrap();
        assert!(cli.check);
        assert!(cli.command.is_empty());
    }

    #[test]
    fn command_may_contain_hyphenated_args() {
        let cli =
            Cli::try_parse_from(["fsjail-ctl", "--dev", "grep", "-r", "pattern"]).unwrap();
        assert!(cli.dev);
        assert_eq!(
            cli.command,
            vec!["grep".to_string(), "-r".to_string(), "pattern".to_string()]
        );
    }
}
