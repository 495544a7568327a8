//! fsjail-ctl - run a command under Landlock filesystem restrictions
//!
//! Grants are declared per path on the command line, committed to the
//! kernel, and then the command replaces this process. The restriction is
//! irreversible and inherited by everything the command spawns.

mod cli;
mod commands;
mod logging;
mod runner;

use clap::Parser;
use cli::Cli;
use console::style;

fn main() {
    let cli = Cli::parse();

    logging::init_logger(cli.verbose);

    if cli.check {
        commands::check_requirements();
        return;
    }

    if cli.command.is_empty() {
        eprintln!("{} no command specified", style("error:").red().bold());
        eprintln!(
            "Try {} for more information",
            style("fsjail-ctl --help").cyan()
        );
        std::process::exit(1);
    }

    if let Err(err) = runner::run(cli) {
        eprintln!("{} {}", style("error:").red().bold(), err);
        std::process::exit(1);
    }
}
