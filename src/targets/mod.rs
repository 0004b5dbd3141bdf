//! Supported SoC families
//!
//! Each [Chip] owns a static table of [FuseDescriptor]s along with the
//! location and layout the kernel exposes its OCOTP registers at.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, VariantNames};

use crate::{error::Error, fuse::FuseDescriptor, store::StoreLayout};

pub mod ocotp;

/// Location of the `imx-ocotp` nvmem image
const NVMEM_PATH: &str = "/sys/bus/nvmem/devices/imx-ocotp0/nvmem";
/// Location of the legacy `fsl_otp` register directory
const FSL_OTP_PATH: &str = "/sys/fsl_otp";

/// All supported devices
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    Display,
    EnumIter,
    EnumString,
    VariantNames,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[non_exhaustive]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Chip {
    /// i.MX6Q/D, through the `fsl_otp` driver
    #[default]
    Imx6,
    /// i.MX6DL/S
    Imx6dl,
    /// i.MX8M Mini
    Imx8mm,
    /// i.MX8M Nano
    Imx8mn,
    /// i.MX8M Plus
    Imx8mp,
}

impl Chip {
    /// Every fuse known for this chip
    pub fn fuses(&self) -> &'static [FuseDescriptor] {
        match self {
            Chip::Imx6 => ocotp::imx6::FUSES,
            Chip::Imx6dl => ocotp::imx6dl::FUSES,
            Chip::Imx8mm => ocotp::imx8mm::FUSES,
            Chip::Imx8mn => ocotp::imx8mn::FUSES,
            Chip::Imx8mp => ocotp::imx8mp::FUSES,
        }
    }

    /// Look up a fuse by name, ignoring case
    pub fn find_fuse(&self, name: &str) -> Result<&'static FuseDescriptor, Error> {
        self.fuses()
            .iter()
            .find(|fuse| fuse.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownFuse {
                name: name.to_string(),
                chip: *self,
                available: self
                    .fuses()
                    .iter()
                    .map(|fuse| fuse.name)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    pub fn default_path(&self) -> &'static str {
        match self {
            Chip::Imx6 => FSL_OTP_PATH,
            _ => NVMEM_PATH,
        }
    }

    pub fn default_layout(&self) -> StoreLayout {
        match self {
            Chip::Imx6 => StoreLayout::Directory,
            _ => StoreLayout::Image,
        }
    }
}
