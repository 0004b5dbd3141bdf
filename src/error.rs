//! Library and application errors

use std::{io, path::PathBuf};

use miette::Diagnostic;
use thiserror::Error;

use crate::targets::Chip;

/// All possible errors returned by flash-fuse
#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("Fuse '{name}' is not available on the {chip}")]
    #[diagnostic(
        code(flash_fuse::unknown_fuse),
        help("Available fuses are: {available}")
    )]
    UnknownFuse {
        name: String,
        chip: Chip,
        available: String,
    },

    #[error("Fuse {fuse} requires a value")]
    #[diagnostic(
        code(flash_fuse::missing_argument),
        help("Provide the value to verify or program, e.g. {hint}")
    )]
    MissingArgument { fuse: String, hint: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Format(#[from] FormatError),

    #[error("Fuse {fuse} is locked but was never programmed")]
    #[diagnostic(
        code(flash_fuse::locked),
        help("The lock bits are already set, the hardware will refuse to program the value")
    )]
    Locked { fuse: String },

    #[error("Fuse {fuse} is already programmed to \"{fused}\", refusing to program \"{requested}\"")]
    #[diagnostic(
        code(flash_fuse::conflict),
        help("Fuses can not be reprogrammed, set bits are permanent")
    )]
    Conflict {
        fuse: String,
        fused: String,
        requested: String,
    },

    #[error("Fuse {fuse} is not programmed")]
    #[diagnostic(
        code(flash_fuse::not_programmed),
        help("Use `--commit` to program the fuse")
    )]
    NotProgrammed { fuse: String },

    #[error("Fuse {fuse} is programmed to \"{fused}\", which does not match \"{requested}\"")]
    #[diagnostic(code(flash_fuse::mismatch))]
    Mismatch {
        fuse: String,
        fused: String,
        requested: String,
    },

    #[error("Error while accessing the fuse store")]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to read configuration file {}", .0.display())]
    #[diagnostic(code(flash_fuse::read_config))]
    ReadConfig(PathBuf, #[source] io::Error),

    #[error("Failed to parse configuration file {}", .0.display())]
    #[diagnostic(
        code(flash_fuse::invalid_config),
        help("Supported keys are `chip`, `path` and `layout`")
    )]
    InvalidConfig(PathBuf, #[source] toml::de::Error),

    #[error("Internal Error")]
    InternalError,
}

/// Errors caused by a malformed fuse value
#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum FormatError {
    #[error("'{0}' is not a valid MAC address")]
    #[diagnostic(
        code(flash_fuse::format::mac_address),
        help("Expected 12 hex digits, optionally separated by ':' or '-', e.g. 00:11:22:33:44:55")
    )]
    MacAddress(String),

    #[error("Expected {expected} comma separated words, found {found}")]
    #[diagnostic(
        code(flash_fuse::format::word_count),
        help("Provide every word of the key hash, e.g. 0x12345678,0x9abcdef0,...")
    )]
    WordCount { expected: usize, found: usize },

    #[error("'{0}' is not a 32-bit hexadecimal word")]
    #[diagnostic(code(flash_fuse::format::word))]
    Word(String),

    #[error("'{value}' is not a valid selection")]
    #[diagnostic(
        code(flash_fuse::format::choice),
        help("Valid selections are: {choices}")
    )]
    Choice { value: String, choices: String },

    #[error("'{0}' would leave the fuse unprogrammed")]
    #[diagnostic(
        code(flash_fuse::format::blank),
        help("An all-zero value is indistinguishable from an unprogrammed fuse")
    )]
    Blank(String),
}

/// Errors originating from the backing store of the OTP registers
#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("Failed to read register {register} from {}", path.display())]
    #[diagnostic(
        code(flash_fuse::store::read),
        help("Make sure the OTP driver is loaded and the path points at its register files or nvmem image")
    )]
    Read {
        register: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write register {register} to {}", path.display())]
    #[diagnostic(
        code(flash_fuse::store::write),
        help("Programming fuses usually requires root privileges")
    )]
    Write {
        register: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Register {register} in {} holds '{contents}', which is not a hexadecimal word", path.display())]
    #[diagnostic(code(flash_fuse::store::invalid_contents))]
    InvalidContents {
        register: String,
        path: PathBuf,
        contents: String,
    },
}
