use std::process;

use clap::Parser;
use flash_fuse::{
    cli::{self, config::Config, FuseArgs},
    logging::initialize_logger,
};
use log::{debug, LevelFilter};
use miette::Result;

#[derive(Debug, Parser)]
#[clap(
    about,
    version,
    after_help = "Fuses can only be programmed once, changes are permanent and irreversible."
)]
struct Cli {
    #[clap(flatten)]
    args: FuseArgs,

    /// Log level, `RUST_LOG` takes precedence
    #[clap(long, default_value = "warn", env = "FLASH_FUSE_LOG")]
    log_level: LevelFilter,
}

fn main() -> Result<()> {
    miette::set_panic_hook();

    // Every failure exits with 1, including invalid arguments.
    let cli = Cli::try_parse().unwrap_or_else(|error| {
        error.print().ok();
        process::exit(if error.use_stderr() { 1 } else { 0 });
    });

    initialize_logger(cli.log_level);
    debug!("{:#?}", cli.args);

    // Load any user configuration, if present.
    let config = Config::load()?;

    cli::run(cli.args, &config)
}
