use console::style;
use env_logger::{Builder, Env};
use log::Level;
use std::io::Write;

/// Initialize the logger; `--verbose` lowers the default filter to debug.
///
/// `RUST_LOG` still wins over the flag when set.
pub fn init_logger(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };

    Builder::from_env(Env::default().filter_or("RUST_LOG", default))
        .format(|buf, record| {
            let tag = match record.level() {
                Level::Error => style("error").red().bold(),
                Level::Warn => style("warn").yellow().bold(),
                Level::Info => style("info").green(),
                Level::Debug => style("debug").cyan(),
                Level::Trace => style("trace").dim(),
            };
            writeln!(buf, "{tag:>5} {}", record.args())
        })
        .init();
}
