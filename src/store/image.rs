use std::{
    fs::{File, OpenOptions},
    io::{self, Read, Seek, SeekFrom, Write},
    path::PathBuf,
};

use super::FuseStore;
use crate::{error::StoreError, targets::ocotp::Register};

/// A flat nvmem image as exposed by the `imx-ocotp` driver
///
/// Registers are little-endian words at their byte offset. The image is never
/// created, resized or truncated.
#[derive(Debug, Clone)]
pub struct ImageStore {
    path: PathBuf,
}

impl ImageStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_word(&self, offset: u32) -> io::Result<u32> {
        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(offset.into()))?;

        let mut buf = [0u8; 4];
        file.read_exact(&mut buf)?;

        Ok(u32::from_le_bytes(buf))
    }

    fn write_word(&self, offset: u32, value: u32) -> io::Result<()> {
        let mut file = OpenOptions::new().write(true).open(&self.path)?;
        file.seek(SeekFrom::Start(offset.into()))?;
        file.write_all(&value.to_le_bytes())?;
        file.flush()
    }
}

impl FuseStore for ImageStore {
    fn read_register(&mut self, register: &Register) -> Result<u32, StoreError> {
        self.read_word(register.offset())
            .map_err(|source| StoreError::Read {
                register: register.to_string(),
                path: self.path.clone(),
                source,
            })
    }

    fn write_register(&mut self, register: &Register, value: u32) -> Result<(), StoreError> {
        self.write_word(register.offset(), value)
            .map_err(|source| StoreError::Write {
                register: register.to_string(),
                path: self.path.clone(),
                source,
            })
    }
}
