//! Command-line interface
//!
//! Resolves the requested fuse and backing store, then queries, verifies or
//! commits the fuse. Exactly one line is printed to stdout on success.

use std::path::PathBuf;

use clap::Args;
use comfy_table::{modifiers, presets::UTF8_FULL, Attribute, Cell, Color, Table};
use log::{debug, info};
use miette::Result;

use self::config::Config;
use crate::{
    controller::{CommitOutcome, FuseController},
    error::Error,
    fuse::{FuseDescriptor, ProgrammedState},
    store::{open_store, FuseStore, StoreLayout},
    targets::Chip,
};

pub mod config;

/// Fuse selection and operating mode
#[derive(Debug, Args)]
#[non_exhaustive]
pub struct FuseArgs {
    /// Name of the fuse, see `--list`
    #[clap(long, required_unless_present = "list")]
    pub fuse: Option<String>,
    /// Value to verify or program, flags take no value
    pub value: Option<String>,
    /// Program the fuse if it is unprogrammed. Changes are permanent
    #[clap(long)]
    pub commit: bool,
    /// Only verify, overrides `--commit`
    #[clap(long)]
    pub verify: bool,
    /// Print the current value of the fuse
    #[clap(long)]
    pub get: bool,
    /// List the fuses available on the chip
    #[clap(long)]
    pub list: bool,
    /// Target chip
    #[clap(long, env = "FLASH_FUSE_CHIP", value_enum)]
    pub chip: Option<Chip>,
    /// Location of the OTP registers, defaults to the driver's location
    #[clap(long, env = "FLASH_FUSE_PATH")]
    pub path: Option<PathBuf>,
    /// Layout of the OTP registers at `--path`
    #[clap(long, value_enum)]
    pub layout: Option<StoreLayout>,
}

impl FuseArgs {
    /// The operating mode, verifying when nothing else was requested
    pub fn mode(&self) -> Mode {
        if self.get {
            Mode::Query
        } else if self.commit && !self.verify {
            Mode::Commit
        } else {
            Mode::Verify
        }
    }
}

/// What to do with the selected fuse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Print the current value
    Query,
    /// Compare against the requested value
    Verify,
    /// Program the requested value
    Commit,
}

/// Run a single invocation
pub fn run(args: FuseArgs, config: &Config) -> Result<()> {
    let chip = args.chip.or(config.chip).unwrap_or_default();

    if args.list {
        println!("{}", fuse_table(chip));
        return Ok(());
    }

    let name = args.fuse.as_deref().ok_or(Error::InternalError)?;
    let descriptor = chip.find_fuse(name)?;

    let path = args
        .path
        .clone()
        .or_else(|| config.path.clone())
        .unwrap_or_else(|| PathBuf::from(chip.default_path()));
    let layout = args
        .layout
        .or(config.layout)
        .unwrap_or_else(|| chip.default_layout());

    debug!("Using {layout} store at {} for {chip}", path.display());

    let mut store = open_store(layout, path);
    let status = execute(
        descriptor,
        store.as_mut(),
        args.mode(),
        args.value.as_deref(),
    )?;

    println!("{status}");

    Ok(())
}

/// Drive `descriptor` in the given mode, returning the status line
///
/// The value is parsed before the store is accessed, a malformed value never
/// causes a read or write.
pub fn execute(
    descriptor: &FuseDescriptor,
    store: &mut dyn FuseStore,
    mode: Mode,
    value: Option<&str>,
) -> Result<String, Error> {
    if mode == Mode::Query {
        if let Some(value) = value {
            debug!("Ignoring '{value}' while querying {}", descriptor.name);
        }

        return match FuseController::new(descriptor, store).query()? {
            ProgrammedState::Unfused => Ok(descriptor
                .default_choice()
                .unwrap_or("unfused")
                .to_string()),
            state => Ok(state.to_string()),
        };
    }

    match value {
        Some(value) if !descriptor.takes_argument() => {
            info!("{} takes no value, ignoring '{value}'", descriptor.name);
        }
        _ => {}
    }

    let desired = descriptor.parse_value(value)?;
    let mut controller = FuseController::new(descriptor, store);

    match mode {
        Mode::Commit => match controller.commit(&desired)? {
            CommitOutcome::AlreadyProgrammed => Ok(format!(
                "{}: {} (already programmed)",
                descriptor.name, desired.value
            )),
            CommitOutcome::Programmed => Ok(format!(
                "{}: {} (programmed)",
                descriptor.name, desired.value
            )),
        },
        _ => {
            controller.verify(&desired)?;
            Ok(format!("{}: {} (verified)", descriptor.name, desired.value))
        }
    }
}

/// Table of every fuse available on `chip`
pub fn fuse_table(chip: Chip) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Fuse")
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
            Cell::new("Value")
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new("Registers")
                .fg(Color::Magenta)
                .add_attribute(Attribute::Bold),
            Cell::new("Description")
                .fg(Color::Yellow)
                .add_attribute(Attribute::Bold),
        ]);

    for fuse in chip.fuses() {
        let mut registers = fuse
            .fields()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        if let Some(lock) = fuse.lock {
            registers.push(format!("{lock} (lock)"));
        }

        table.add_row(vec![
            Cell::new(fuse.name).fg(Color::Green),
            Cell::new(fuse.argument_hint()).fg(Color::Cyan),
            Cell::new(registers.join("\n")).fg(Color::Magenta),
            Cell::new(fuse.description).fg(Color::Yellow),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{error::FormatError, store::MemoryStore, targets::ocotp};

    #[derive(Parser)]
    struct Cli {
        #[clap(flatten)]
        args: FuseArgs,
    }

    fn args(extra: &[&str]) -> FuseArgs {
        let mut argv = vec!["flash-fuse"];
        argv.extend_from_slice(extra);
        Cli::try_parse_from(argv).unwrap().args
    }

    #[test]
    fn test_mode() {
        assert_eq!(args(&["--fuse", "MAC"]).mode(), Mode::Verify);
        assert_eq!(args(&["--fuse", "MAC", "--commit"]).mode(), Mode::Commit);
        assert_eq!(
            args(&["--fuse", "MAC", "--commit", "--verify"]).mode(),
            Mode::Verify
        );
        assert_eq!(
            args(&["--fuse", "MAC", "--commit", "--get"]).mode(),
            Mode::Query
        );
    }

    #[test]
    fn test_fuse_required_unless_listing() {
        assert!(Cli::try_parse_from(["flash-fuse", "--commit"]).is_err());
        assert!(Cli::try_parse_from(["flash-fuse", "--list"]).is_ok());
    }

    #[test]
    fn test_format_error_before_store_access() {
        let srk = Chip::Imx6.find_fuse("SRK").unwrap();
        let mut store = MemoryStore::new();

        let result = execute(srk, &mut store, Mode::Commit, Some("0x1,0x2,0x3"));

        assert!(matches!(
            result,
            Err(Error::Format(FormatError::WordCount {
                expected: 8,
                found: 3
            }))
        ));
        assert!(store.writes().is_empty());
    }

    #[test]
    fn test_missing_argument() {
        let mac = Chip::Imx6.find_fuse("MAC").unwrap();
        let mut store = MemoryStore::new();

        assert!(matches!(
            execute(mac, &mut store, Mode::Verify, None),
            Err(Error::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_query() {
        let lock = Chip::Imx8mm.find_fuse("LOCK_MAC").unwrap();
        let mac = Chip::Imx8mm.find_fuse("MAC").unwrap();
        let mut store = MemoryStore::new();

        assert_eq!(execute(lock, &mut store, Mode::Query, None).unwrap(), "NONE");
        assert_eq!(execute(mac, &mut store, Mode::Query, None).unwrap(), "unfused");

        let mut store = MemoryStore::new()
            .with_register(ocotp::imx8mm::HW_OCOTP_LOCK, 0x0000_4000)
            .with_register(ocotp::imx8mm::HW_OCOTP_MAC_ADDR0, 0x2233_4455)
            .with_register(ocotp::imx8mm::HW_OCOTP_MAC_ADDR1, 0x0000_ff11);

        assert_eq!(execute(lock, &mut store, Mode::Query, None).unwrap(), "WP");
        assert_eq!(
            execute(mac, &mut store, Mode::Query, None).unwrap(),
            "ff:11:22:33:44:55"
        );
    }

    #[test]
    fn test_flag_ignores_value() {
        let flag = Chip::Imx6.find_fuse("CFG5_SJC_DISABLE").unwrap();
        let mut store = MemoryStore::new();

        let status = execute(flag, &mut store, Mode::Commit, Some("1")).unwrap();

        assert_eq!(status, "CFG5_SJC_DISABLE: SET (programmed)");
        assert_eq!(
            store.register(&ocotp::imx6::HW_OCOTP_CFG5),
            0x0010_0000
        );
    }

    #[test]
    fn test_fuse_table() {
        let table = fuse_table(Chip::Imx8mm).to_string();

        assert!(table.contains("LOCK_MAC"));
        assert!(table.contains("NONE, WP, OP, WP+OP"));
        assert!(table.contains("HW_OCOTP_MAC_ADDR0"));
    }
}
