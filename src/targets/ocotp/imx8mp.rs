//! i.MX8M Plus fuses in the `imx-ocotp` nvmem image
//!
//! The i.MX8M Plus has two Ethernet controllers. Their addresses share
//! `HW_OCOTP_MAC_ADDR1`: the first MAC uses its low half, the second its
//! high half.

use super::{
    bit,
    imx8mm::{HW_OCOTP_LOCK, HW_OCOTP_MAC_ADDR0, HW_OCOTP_MAC_ADDR1, WORDS_PER_BANK},
    imx8mn::{HW_OCOTP_BOOT_CFG0, HW_OCOTP_BOOT_CFG1},
    mask, offset, BitField, Register,
};
use crate::fuse::{FuseDescriptor, FuseShape, MacLayout};

pub(crate) const HW_OCOTP_BOOT_CFG2: Register =
    Register::new("HW_OCOTP_BOOT_CFG2", offset(2, 1, WORDS_PER_BANK));
pub(crate) const HW_OCOTP_MAC_ADDR2: Register =
    Register::new("HW_OCOTP_MAC_ADDR2", offset(9, 2, WORDS_PER_BANK));

pub(crate) const FUSES: &[FuseDescriptor] = &[
    FuseDescriptor::new(
        "MAC",
        "Ethernet MAC address of the first controller",
        FuseShape::MacAddress(MacLayout::HeadInLowHalf {
            tail: HW_OCOTP_MAC_ADDR0,
            head: HW_OCOTP_MAC_ADDR1,
        }),
    ),
    FuseDescriptor::new(
        "MAC2",
        "Ethernet MAC address of the second controller",
        FuseShape::MacAddress(MacLayout::TailInUpperHalf {
            head: HW_OCOTP_MAC_ADDR2,
            tail: HW_OCOTP_MAC_ADDR1,
        }),
    ),
    FuseDescriptor::new(
        "MAC_ADDR_LOCK",
        "Write (WP) and override (OP) protection of the MAC addresses",
        FuseShape::Choice {
            field: BitField::new(HW_OCOTP_LOCK, mask(14, 15)),
            choices: &[
                ("NONE", 0x0),
                ("WP", bit(14)),
                ("OP", bit(15)),
                ("WP+OP", mask(14, 15)),
            ],
        },
    ),
    FuseDescriptor::new(
        "USB_ID_LOCK",
        "Write (WP) and override (OP) protection of the USB IDs",
        FuseShape::Choice {
            field: BitField::new(HW_OCOTP_LOCK, mask(12, 13)),
            choices: &[
                ("NONE", 0x0),
                ("WP", bit(12)),
                ("OP", bit(13)),
                ("WP+OP", mask(12, 13)),
            ],
        },
    ),
    FuseDescriptor::new(
        "BT_FUSE_SEL",
        "Take the boot configuration from fuses",
        FuseShape::Choice {
            field: BitField::new(HW_OCOTP_BOOT_CFG0, bit(28)),
            choices: &[("NONE", 0x0), ("PROGRAMMED", bit(28))],
        },
    ),
    FuseDescriptor::new(
        "BOOT_DEVICE",
        "Boot device",
        FuseShape::Choice {
            field: BitField::new(HW_OCOTP_BOOT_CFG0, mask(12, 15)),
            choices: &[
                ("FUSES", 0x0),
                ("SDP", bit(12)),
                ("USDHC3", bit(13)),
                ("USDHC2", mask(12, 13)),
                ("NAND-256", bit(14)),
                ("NAND-512", bit(12) | bit(14)),
                ("FLEXSPI-3b", mask(13, 14)),
                ("FLEXSPI-HYPERFLASH", mask(12, 14)),
                ("ECSPI", bit(15)),
                ("FLEXSPI-SNAND-2K", bit(13) | bit(15)),
                ("FLEXSPI-SNAND-4K", bit(12) | bit(13) | bit(15)),
            ],
        },
    ),
    FuseDescriptor::new(
        "FORCE_BT_FROM_FUSE",
        "Ignore the boot mode pins and always boot from fuses",
        FuseShape::Choice {
            field: BitField::new(HW_OCOTP_BOOT_CFG1, bit(20)),
            choices: &[("DISABLED", 0x0), ("ENABLED", bit(20))],
        },
    ),
    FuseDescriptor::new(
        "BOOT_ECSPI_PORT",
        "ECSPI instance used for serial NOR boot",
        FuseShape::Choice {
            field: BitField::new(HW_OCOTP_BOOT_CFG1, mask(29, 31)),
            choices: &[("ECSPI1", 0x0), ("ECSPI2", bit(29)), ("ECSPI3", bit(30))],
        },
    ),
    FuseDescriptor::new(
        "BOOT_ECSPI_ADDR",
        "Address width of the serial NOR",
        FuseShape::Choice {
            field: BitField::new(HW_OCOTP_BOOT_CFG1, bit(28)),
            choices: &[("3-BYTES", 0x0), ("2-BYTES", bit(28))],
        },
    ),
    FuseDescriptor::new(
        "BOOT_ECSPI_CS",
        "Chip select of the serial NOR",
        FuseShape::Choice {
            field: BitField::new(HW_OCOTP_BOOT_CFG1, mask(26, 27)),
            choices: &[
                ("CS0", 0x0),
                ("CS1", bit(26)),
                ("CS2", bit(27)),
                ("CS3", mask(26, 27)),
            ],
        },
    ),
    FuseDescriptor::new(
        "IMG_CNTN_SET1_OFFSET",
        "Offset of the secondary image container set",
        FuseShape::Choice {
            field: BitField::new(HW_OCOTP_BOOT_CFG2, mask(19, 22)),
            choices: &[
                ("N_0", 0x0),
                ("N_1", bit(19)),
                ("N_2", bit(20)),
                ("N_3", mask(19, 20)),
                ("N_4", bit(21)),
                ("N_5", bit(19) | bit(21)),
                ("N_6", mask(20, 21)),
                ("N_7", mask(19, 21)),
                ("N_8", bit(22)),
                ("N_9", bit(19) | bit(22)),
                ("N_10", bit(20) | bit(22)),
            ],
        },
    ),
];
