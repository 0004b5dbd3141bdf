//! Command-line interface configuration
//!
//! Boards are usually provisioned over and over with the same chip and store
//! settings, these can be kept in a `flash-fuse.toml` file instead of being
//! repeated on every invocation. Command-line arguments and environment
//! variables take precedence over the file.

use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::debug;
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};

use crate::{error::Error, store::StoreLayout, targets::Chip};

const CONFIG_FILE: &str = "flash-fuse.toml";

/// Default values for the command-line arguments
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Target chip
    #[serde(default)]
    pub chip: Option<Chip>,
    /// Location of the OTP registers
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Layout of the OTP registers
    #[serde(default)]
    pub layout: Option<StoreLayout>,
}

impl Config {
    /// Load the configuration file, if one exists
    pub fn load() -> Result<Self> {
        match Self::find_config_path()? {
            Some(path) if path.exists() => Ok(Self::from_file(&path)?),
            _ => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse the configuration file at `path`
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let raw_data = read_to_string(path)
            .map_err(|error| Error::ReadConfig(path.to_path_buf(), error))?;
        let config = toml::from_str(&raw_data)
            .map_err(|error| Error::InvalidConfig(path.to_path_buf(), error))?;

        debug!("Config from {}: {:#?}", path.display(), &config);

        Ok(config)
    }

    fn find_config_path() -> Result<Option<PathBuf>> {
        let current_dir = std::env::current_dir()
            .into_diagnostic()
            .wrap_err("Failed to determine the current directory")?;

        let local_config = current_dir.join(CONFIG_FILE);
        if local_config.exists() {
            return Ok(Some(local_config));
        }
        if let Some(parent_folder) = current_dir.parent() {
            let workspace_config = parent_folder.join(CONFIG_FILE);
            if workspace_config.exists() {
                return Ok(Some(workspace_config));
            }
        }

        Ok(ProjectDirs::from("", "", "flash-fuse")
            .map(|project_dirs| project_dirs.config_dir().join(CONFIG_FILE)))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            "chip = \"imx8mp\"\npath = \"/tmp/nvmem\"\nlayout = \"image\"\n",
        )
        .unwrap();

        assert_eq!(
            Config::from_file(&path).unwrap(),
            Config {
                chip: Some(Chip::Imx8mp),
                path: Some(PathBuf::from("/tmp/nvmem")),
                layout: Some(StoreLayout::Image),
            }
        );
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "chip = \"imx6\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.chip, Some(Chip::Imx6));
        assert_eq!(config.path, None);
        assert_eq!(config.layout, None);
    }

    #[test]
    fn test_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        fs::write(&path, "chip = \"imx7\"\n").unwrap();
        assert!(matches!(
            Config::from_file(&path),
            Err(Error::InvalidConfig(..))
        ));

        fs::write(&path, "baudrate = 115200\n").unwrap();
        assert!(matches!(
            Config::from_file(&path),
            Err(Error::InvalidConfig(..))
        ));
    }

    #[test]
    fn test_unreadable_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::create_dir(&path).unwrap();

        assert!(matches!(
            Config::from_file(&path),
            Err(Error::ReadConfig(..))
        ));
    }
}
