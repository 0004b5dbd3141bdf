//! i.MX8M Nano fuses in the `imx-ocotp` nvmem image

use super::{
    imx8mm::{HW_OCOTP_LOCK, HW_OCOTP_MAC_ADDR0, HW_OCOTP_MAC_ADDR1, WORDS_PER_BANK},
    offset, BitField, Register,
};
use crate::fuse::{FuseDescriptor, FuseShape, MacLayout};

pub(crate) const HW_OCOTP_BOOT_CFG0: Register =
    Register::new("HW_OCOTP_BOOT_CFG0", offset(1, 3, WORDS_PER_BANK));
pub(crate) const HW_OCOTP_BOOT_CFG1: Register =
    Register::new("HW_OCOTP_BOOT_CFG1", offset(2, 0, WORDS_PER_BANK));
pub(crate) const HW_OCOTP_SRK: &[Register] = &[
    Register::new("HW_OCOTP_SRK0", offset(6, 0, WORDS_PER_BANK)),
    Register::new("HW_OCOTP_SRK1", offset(6, 1, WORDS_PER_BANK)),
    Register::new("HW_OCOTP_SRK2", offset(6, 2, WORDS_PER_BANK)),
    Register::new("HW_OCOTP_SRK3", offset(6, 3, WORDS_PER_BANK)),
    Register::new("HW_OCOTP_SRK4", offset(7, 0, WORDS_PER_BANK)),
    Register::new("HW_OCOTP_SRK5", offset(7, 1, WORDS_PER_BANK)),
    Register::new("HW_OCOTP_SRK6", offset(7, 2, WORDS_PER_BANK)),
    Register::new("HW_OCOTP_SRK7", offset(7, 3, WORDS_PER_BANK)),
];

pub(crate) const FUSES: &[FuseDescriptor] = &[
    FuseDescriptor::new(
        "MAC",
        "Ethernet MAC address",
        FuseShape::MacAddress(MacLayout::HeadInLowHalf {
            tail: HW_OCOTP_MAC_ADDR0,
            head: HW_OCOTP_MAC_ADDR1,
        }),
    ),
    FuseDescriptor::new(
        "SRK",
        "Super root key hash used by HAB",
        FuseShape::WordArray(HW_OCOTP_SRK),
    ),
    FuseDescriptor::new(
        "MAC_ADDR_LOCK",
        "Write (WP) and override (OP) protection of the MAC address",
        FuseShape::Choice {
            field: BitField::new(HW_OCOTP_LOCK, 0xc000),
            choices: &[("NONE", 0x0), ("WP", 0x4000), ("OP", 0x8000), ("WP+OP", 0xc000)],
        },
    ),
    FuseDescriptor::new(
        "USB_ID_LOCK",
        "Write (WP) and override (OP) protection of the USB IDs",
        FuseShape::Choice {
            field: BitField::new(HW_OCOTP_LOCK, 0x3000),
            choices: &[("NONE", 0x0), ("WP", 0x1000), ("OP", 0x2000), ("WP+OP", 0x3000)],
        },
    ),
    FuseDescriptor::new(
        "BOOT_CFG_LOCK",
        "Write (WP) and override (OP) protection of the boot configuration",
        FuseShape::Choice {
            field: BitField::new(HW_OCOTP_LOCK, 0xc),
            choices: &[("NONE", 0x0), ("WP", 0x4), ("OP", 0x8), ("WP+OP", 0xc)],
        },
    ),
    FuseDescriptor::new(
        "SRK_LOCK",
        "Protection of the SRK hash",
        FuseShape::Choice {
            field: BitField::new(HW_OCOTP_LOCK, 0x200),
            choices: &[("NONE", 0x0), ("WP+OP", 0x200)],
        },
    ),
    FuseDescriptor::new(
        "BT_FUSE_SEL",
        "Take the boot configuration from the board or from fuses",
        FuseShape::Choice {
            field: BitField::new(HW_OCOTP_BOOT_CFG0, 0x1000_0000),
            choices: &[("BOARD", 0x0), ("FUSE", 0x1000_0000)],
        },
    ),
    FuseDescriptor::new(
        "SJC_DISABLE",
        "Secure JTAG controller",
        FuseShape::Choice {
            field: BitField::new(HW_OCOTP_BOOT_CFG0, 0x0020_0000),
            choices: &[("ENABLED", 0x0), ("DISABLED", 0x0020_0000)],
        },
    ),
    FuseDescriptor::new(
        "JTAG_SMODE",
        "JTAG security mode",
        FuseShape::Choice {
            field: BitField::new(HW_OCOTP_BOOT_CFG0, 0x00c0_0000),
            choices: &[
                ("JTAG", 0x0),
                ("SECURE", 0x0040_0000),
                ("DISABLED", 0x00c0_0000),
            ],
        },
    ),
    FuseDescriptor::new(
        "SEC_CONFIG",
        "Security configuration, CLOSED rejects unsigned images",
        FuseShape::Choice {
            field: BitField::new(HW_OCOTP_BOOT_CFG0, 0x0200_0000),
            choices: &[("OPEN", 0x0), ("CLOSED", 0x0200_0000)],
        },
    ),
    FuseDescriptor::new(
        "BOOT_DEVICE",
        "Boot device",
        FuseShape::Choice {
            field: BitField::new(HW_OCOTP_BOOT_CFG0, 0xf000),
            choices: &[
                ("FUSES", 0x0 << 12),
                ("SDP", 0x1 << 12),
                ("USDHC3", 0x2 << 12),
                ("USDHC2", 0x3 << 12),
                ("NAND-256", 0x4 << 12),
                ("NAND-512", 0x5 << 12),
                ("FLEXSPI-3b", 0x6 << 12),
                ("FLEXSPI-HYPERFLASH", 0x7 << 12),
                ("ECSPI", 0x8 << 12),
            ],
        },
    ),
    FuseDescriptor::new(
        "BOOT_ECSPI_PORT",
        "ECSPI instance used for serial NOR boot",
        FuseShape::Choice {
            field: BitField::new(HW_OCOTP_BOOT_CFG1, 0xe000_0000),
            choices: &[
                ("ECSPI1", 0x0),
                ("ECSPI2", 0x2000_0000),
                ("ECSPI3", 0x4000_0000),
            ],
        },
    ),
    FuseDescriptor::new(
        "BOOT_ECSPI_ADDR",
        "Address width of the serial NOR",
        FuseShape::Choice {
            field: BitField::new(HW_OCOTP_BOOT_CFG1, 0x1000_0000),
            choices: &[("3-BYTES", 0x0), ("2-BYTES", 0x1000_0000)],
        },
    ),
    FuseDescriptor::new(
        "BOOT_ECSPI_CS",
        "Chip select of the serial NOR",
        FuseShape::Choice {
            field: BitField::new(HW_OCOTP_BOOT_CFG1, 0x0c00_0000),
            choices: &[
                ("CS0", 0x0),
                ("CS1", 0x0400_0000),
                ("CS2", 0x0800_0000),
                ("CS3", 0x0c00_0000),
            ],
        },
    ),
];
