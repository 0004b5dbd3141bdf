//! i.MX8M Mini fuses in the `imx-ocotp` nvmem image

use super::{bit, mask, offset, BitField, Register};
use crate::fuse::{FuseDescriptor, FuseShape, MacLayout};

pub(crate) const WORDS_PER_BANK: u32 = 4;

pub(crate) const HW_OCOTP_LOCK: Register =
    Register::new("HW_OCOTP_LOCK", offset(0, 0, WORDS_PER_BANK));
pub(crate) const HW_OCOTP_MAC_ADDR0: Register =
    Register::new("HW_OCOTP_MAC_ADDR0", offset(9, 0, WORDS_PER_BANK));
pub(crate) const HW_OCOTP_MAC_ADDR1: Register =
    Register::new("HW_OCOTP_MAC_ADDR1", offset(9, 1, WORDS_PER_BANK));

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
        "LOCK_MAC",
        "Write (WP) and override (OP) protection of the MAC address",
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
];
