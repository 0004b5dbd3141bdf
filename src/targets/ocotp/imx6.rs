//! i.MX6 fuses, as exposed by the `fsl_otp` register directory

use super::{offset, BitField, Register};
use crate::fuse::{FuseDescriptor, FuseShape, MacLayout};

const WORDS_PER_BANK: u32 = 8;

/// Lock bits for the other fuse banks
pub(crate) const HW_OCOTP_LOCK: Register =
    Register::new("HW_OCOTP_LOCK", offset(0, 0, WORDS_PER_BANK));
/// Boot configuration, boot device selection
pub(crate) const HW_OCOTP_CFG4: Register =
    Register::new("HW_OCOTP_CFG4", offset(0, 5, WORDS_PER_BANK));
/// Boot configuration, security and JTAG
pub(crate) const HW_OCOTP_CFG5: Register =
    Register::new("HW_OCOTP_CFG5", offset(0, 6, WORDS_PER_BANK));
/// Super root key hash
pub(crate) const HW_OCOTP_SRK: &[Register] = &[
    Register::new("HW_OCOTP_SRK0", offset(3, 0, WORDS_PER_BANK)),
    Register::new("HW_OCOTP_SRK1", offset(3, 1, WORDS_PER_BANK)),
    Register::new("HW_OCOTP_SRK2", offset(3, 2, WORDS_PER_BANK)),
    Register::new("HW_OCOTP_SRK3", offset(3, 3, WORDS_PER_BANK)),
    Register::new("HW_OCOTP_SRK4", offset(3, 4, WORDS_PER_BANK)),
    Register::new("HW_OCOTP_SRK5", offset(3, 5, WORDS_PER_BANK)),
    Register::new("HW_OCOTP_SRK6", offset(3, 6, WORDS_PER_BANK)),
    Register::new("HW_OCOTP_SRK7", offset(3, 7, WORDS_PER_BANK)),
];
/// Ethernet MAC address, octets 2 to 5
pub(crate) const HW_OCOTP_MAC0: Register =
    Register::new("HW_OCOTP_MAC0", offset(4, 2, WORDS_PER_BANK));
/// Ethernet MAC address, octets 0 and 1
pub(crate) const HW_OCOTP_MAC1: Register =
    Register::new("HW_OCOTP_MAC1", offset(4, 3, WORDS_PER_BANK));

/// Write and override protection of the MAC address
const LOCK_MAC_ADDR: BitField = BitField::new(HW_OCOTP_LOCK, 0x0000_0300);
/// Write protection of the SRK hash
const LOCK_SRK: BitField = BitField::new(HW_OCOTP_LOCK, 0x0000_4000);

const fn flag(register: Register, mask: u32) -> FuseShape {
    FuseShape::Flag(BitField::new(register, mask))
}

pub(crate) const FUSES: &[FuseDescriptor] = &[
    FuseDescriptor::new(
        "CFG5_SJC_DISABLE",
        "Disable the secure JTAG controller",
        flag(HW_OCOTP_CFG5, 0x0010_0000),
    ),
    FuseDescriptor::new(
        "MAC",
        "Ethernet MAC address",
        FuseShape::MacAddress(MacLayout::HeadInLowHalf {
            tail: HW_OCOTP_MAC0,
            head: HW_OCOTP_MAC1,
        }),
    )
    .with_lock(LOCK_MAC_ADDR),
    FuseDescriptor::new(
        "SRK",
        "Super root key hash used by HAB",
        FuseShape::WordArray(HW_OCOTP_SRK),
    )
    .with_lock(LOCK_SRK),
    FuseDescriptor::new(
        "CFG5_DIR_BT_DIS",
        "Disable NXP reserved boot modes",
        flag(HW_OCOTP_CFG5, 0x0000_0008),
    ),
    FuseDescriptor::new(
        "CFG5_BT_FUSE_SEL",
        "Boot from the fuse configuration instead of the boot pins",
        flag(HW_OCOTP_CFG5, 0x0000_0010),
    ),
    FuseDescriptor::new(
        "CFG5_SEC_CONFIG",
        "Close the device, HAB rejects unsigned images",
        flag(HW_OCOTP_CFG5, 0x0000_0002),
    ),
    FuseDescriptor::new(
        "CFG4_EMMC",
        "Boot from MMC/eMMC",
        flag(HW_OCOTP_CFG4, 0x0000_0060),
    ),
    FuseDescriptor::new(
        "CFG4_SERIALROM",
        "Boot from serial ROM",
        flag(HW_OCOTP_CFG4, 0x0000_0030),
    ),
    FuseDescriptor::new(
        "CFG4_EMMC_SDHC3",
        "Boot from uSDHC3",
        flag(HW_OCOTP_CFG4, 0x0000_1000),
    ),
    FuseDescriptor::new(
        "CFG4_EMMC_8BIT",
        "Use an 8-bit eMMC bus",
        flag(HW_OCOTP_CFG4, 0x0000_4000),
    ),
    FuseDescriptor::new(
        "CFG4_SERIALROM_SPI2",
        "Boot from serial ROM on ECSPI2",
        flag(HW_OCOTP_CFG4, 0x0100_0000),
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_offsets() {
        assert_eq!(HW_OCOTP_CFG4.offset(), 0x14);
        assert_eq!(HW_OCOTP_CFG5.offset(), 0x18);
        assert_eq!(HW_OCOTP_SRK[0].offset(), 0x60);
        assert_eq!(HW_OCOTP_SRK[7].offset(), 0x7c);
        assert_eq!(HW_OCOTP_MAC0.offset(), 0x88);
        assert_eq!(HW_OCOTP_MAC1.offset(), 0x8c);
    }
}
