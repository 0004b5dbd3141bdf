//! i.MX6DL/S fuses in the `imx-ocotp` nvmem image
//!
//! The register map is shared with the i.MX6Q, only the fuse table differs.

use super::{
    bit,
    imx6::{HW_OCOTP_CFG4, HW_OCOTP_CFG5, HW_OCOTP_LOCK, HW_OCOTP_MAC0, HW_OCOTP_MAC1, HW_OCOTP_SRK},
    mask, BitField,
};
use crate::fuse::{FuseDescriptor, FuseShape, MacLayout};

pub(crate) const FUSES: &[FuseDescriptor] = &[
    FuseDescriptor::new(
        "MAC",
        "Ethernet MAC address",
        FuseShape::MacAddress(MacLayout::HeadInLowHalf {
            tail: HW_OCOTP_MAC0,
            head: HW_OCOTP_MAC1,
        }),
    ),
    FuseDescriptor::new(
        "SRK",
        "Super root key hash used by HAB",
        FuseShape::WordArray(HW_OCOTP_SRK),
    ),
    FuseDescriptor::new(
        "MAC_LOCK",
        "Write (WP) and override (OP) protection of the MAC address",
        FuseShape::Choice {
            field: BitField::new(HW_OCOTP_LOCK, mask(8, 9)),
            choices: &[
                ("NONE", 0x0),
                ("WP", bit(8)),
                ("OP", bit(9)),
                ("WP+OP", mask(8, 9)),
            ],
        },
    ),
    FuseDescriptor::new(
        "BT_FUSE_SEL",
        "Take the boot configuration from the board or from fuses",
        FuseShape::Choice {
            field: BitField::new(HW_OCOTP_CFG5, bit(4)),
            choices: &[("BOARD", 0x0), ("FUSE", bit(4))],
        },
    ),
    FuseDescriptor::new(
        "SJC_DISABLE",
        "Secure JTAG controller",
        FuseShape::Choice {
            field: BitField::new(HW_OCOTP_CFG5, bit(20)),
            choices: &[("SJC_ENABLED", 0x0), ("SJC_DISABLED", bit(20))],
        },
    ),
    FuseDescriptor::new(
        "SEC_DISABLE",
        "Security configuration, CLOSED rejects unsigned images",
        FuseShape::Choice {
            field: BitField::new(HW_OCOTP_CFG5, bit(1)),
            choices: &[("OPEN", 0x0), ("CLOSED", bit(1))],
        },
    ),
    FuseDescriptor::new(
        "DIR_BT_DIS",
        "NXP reserved boot modes",
        FuseShape::Choice {
            field: BitField::new(HW_OCOTP_CFG5, bit(3)),
            choices: &[("NXP_RESERVED", 0x0), ("PRODUCTION", bit(3))],
        },
    ),
    FuseDescriptor::new(
        "BOOT_DEVICE",
        "Boot device",
        FuseShape::Choice {
            field: BitField::new(HW_OCOTP_CFG4, mask(3, 7)),
            choices: &[
                ("NOR_Flash", 0x0),
                ("OneNAND", bit(3)),
                ("SERIAL_ROM", mask(4, 5)),
                ("SD/eSD", bit(6)),
                ("MMC/eMMC", mask(5, 6)),
                ("NAND_Flash", bit(7)),
            ],
        },
    ),
    FuseDescriptor::new(
        "BOOT_MMC_PORT",
        "uSDHC port used for MMC boot",
        FuseShape::Choice {
            field: BitField::new(HW_OCOTP_CFG4, mask(11, 12)),
            choices: &[
                ("uSDHC1", 0x0),
                ("uSDHC2", bit(11)),
                ("uSDHC3", bit(12)),
                ("uSDHC4", mask(11, 12)),
            ],
        },
    ),
    // Two encodings select a 4-bit bus; the first one is programmed.
    FuseDescriptor::new(
        "BOOT_MMC_WIDTH",
        "Bus width used for MMC boot",
        FuseShape::Choice {
            field: BitField::new(HW_OCOTP_CFG5, mask(13, 15)),
            choices: &[
                ("1-BIT", 0x0),
                ("4-BIT", bit(13)),
                ("8-BIT", bit(14)),
                ("4-BIT", bit(13) | bit(15)),
                ("8-BIT-DDR", mask(14, 15)),
            ],
        },
    ),
];
