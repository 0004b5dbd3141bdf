//! Backing stores for the OTP registers
//!
//! The kernel exposes the OCOTP array either through the legacy `fsl_otp`
//! driver, as one file per register, or through the `imx-ocotp` nvmem driver,
//! as a single flat image. Writing a register to either of them programs the
//! corresponding fuses.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum::Display;

pub use self::{directory::DirectoryStore, image::ImageStore, memory::MemoryStore};
use crate::{error::StoreError, targets::ocotp::Register};

mod directory;
mod image;
mod memory;

/// Register level access to the OTP array
pub trait FuseStore {
    /// Read the current value of a register
    fn read_register(&mut self, register: &Register) -> Result<u32, StoreError>;

    /// Program a register
    ///
    /// Fuses can only transition from 0 to 1, bits which are clear in `value`
    /// but already set in the register remain set.
    fn write_register(&mut self, register: &Register, value: u32) -> Result<(), StoreError>;
}

/// How the registers are laid out in the backing store
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    Display,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[non_exhaustive]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StoreLayout {
    /// A directory holding one text file per register, named after it
    Directory,
    /// A binary image holding every register as a little-endian word
    Image,
}

/// Open the store at `path`
///
/// No file is touched until a register is accessed.
pub fn open_store(layout: StoreLayout, path: impl Into<PathBuf>) -> Box<dyn FuseStore> {
    match layout {
        StoreLayout::Directory => Box::new(DirectoryStore::new(path)),
        StoreLayout::Image => Box::new(ImageStore::new(path)),
    }
}
