use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};

use super::FuseStore;
use crate::{codec::parse_hex_word, error::StoreError, targets::ocotp::Register};

/// A directory of register files as exposed by the `fsl_otp` driver
///
/// Each file holds a single hexadecimal word, e.g. `0x00100000`.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn register_path(&self, register: &Register) -> PathBuf {
        self.root.join(register.name())
    }
}

impl FuseStore for DirectoryStore {
    fn read_register(&mut self, register: &Register) -> Result<u32, StoreError> {
        let path = self.register_path(register);

        let contents = fs::read_to_string(&path).map_err(|source| StoreError::Read {
            register: register.name().to_string(),
            path: path.clone(),
            source,
        })?;

        parse_word(&contents).ok_or_else(|| StoreError::InvalidContents {
            register: register.name().to_string(),
            contents: contents.trim().to_string(),
            path,
        })
    }

    fn write_register(&mut self, register: &Register, value: u32) -> Result<(), StoreError> {
        let path = self.register_path(register);
        let write_error = |source| StoreError::Write {
            register: register.name().to_string(),
            path: path.clone(),
            source,
        };

        // The driver creates the register files, a missing one is an error
        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&path)
            .map_err(write_error)?;

        writeln!(file, "{value:#010x}").map_err(write_error)
    }
}

fn parse_word(contents: &str) -> Option<u32> {
    parse_hex_word(contents).ok()
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    const CFG5: Register = Register::new("HW_OCOTP_CFG5", 0x18);

    #[test]
    fn test_parse_word() {
        assert_eq!(parse_word("0x00100000\n"), Some(0x0010_0000));
        assert_eq!(parse_word("0x0011"), Some(0x11));
        assert_eq!(parse_word("  22334455 "), Some(0x2233_4455));
        assert_eq!(parse_word("0x"), None);
        assert_eq!(parse_word("0x123456789"), None);
        assert_eq!(parse_word("+5"), None);
        assert_eq!(parse_word("0x+5"), None);
        assert_eq!(parse_word("fuse"), None);
    }

    #[test]
    fn test_read_write() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("HW_OCOTP_CFG5"), "0x00000000\n").unwrap();

        let mut store = DirectoryStore::new(dir.path());
        assert_eq!(store.read_register(&CFG5).unwrap(), 0);

        store.write_register(&CFG5, 0x0010_0000).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("HW_OCOTP_CFG5")).unwrap(),
            "0x00100000\n"
        );
        assert_eq!(store.read_register(&CFG5).unwrap(), 0x0010_0000);
    }

    #[test]
    fn test_missing_register() {
        let dir = TempDir::new().unwrap();
        let mut store = DirectoryStore::new(dir.path());

        assert!(matches!(
            store.read_register(&CFG5),
            Err(StoreError::Read { .. })
        ));
        assert!(matches!(
            store.write_register(&CFG5, 1),
            Err(StoreError::Write { .. })
        ));
        assert!(!dir.path().join("HW_OCOTP_CFG5").exists());
    }

    #[test]
    fn test_invalid_contents() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("HW_OCOTP_CFG5"), "not a word\n").unwrap();

        let mut store = DirectoryStore::new(dir.path());
        match store.read_register(&CFG5) {
            Err(StoreError::InvalidContents { contents, .. }) => {
                assert_eq!(contents, "not a word")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
