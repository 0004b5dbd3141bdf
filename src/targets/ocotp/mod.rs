//! OCOTP register maps and fuse tables
//!
//! Every register carries its name, as exposed by the legacy `fsl_otp`
//! driver, and its byte offset within the `imx-ocotp` nvmem image. The
//! offset of a register is `(bank * words_per_bank + word) * 4`.

use std::fmt;

pub(crate) mod imx6;
pub(crate) mod imx6dl;
pub(crate) mod imx8mm;
pub(crate) mod imx8mn;
pub(crate) mod imx8mp;

/// A 32-bit OTP register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Register {
    name: &'static str,
    offset: u32,
}

impl Register {
    pub const fn new(name: &'static str, offset: u32) -> Self {
        Self { name, offset }
    }

    /// Name of the register file in a register directory
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Byte offset of the register in an nvmem image
    pub const fn offset(&self) -> u32 {
        self.offset
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#x})", self.name, self.offset)
    }
}

/// A subset of the bits of a register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitField {
    pub register: Register,
    pub mask: u32,
}

impl BitField {
    pub const fn new(register: Register, mask: u32) -> Self {
        Self { register, mask }
    }

    /// All 32 bits of `register`
    pub const fn word(register: Register) -> Self {
        Self::new(register, u32::MAX)
    }
}

impl fmt::Display for BitField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mask == u32::MAX {
            write!(f, "{}", self.register.name)
        } else {
            write!(f, "{}[{:#010x}]", self.register.name, self.mask)
        }
    }
}

/// Offset of a word in a bank of `words_per_bank` words
pub(crate) const fn offset(bank: u32, word: u32, words_per_bank: u32) -> u32 {
    (bank * words_per_bank + word) * 4
}

/// A single bit
pub(crate) const fn bit(n: u32) -> u32 {
    1 << n
}

/// Bits `start` through `end`, inclusive
pub(crate) const fn mask(start: u32, end: u32) -> u32 {
    (u32::MAX >> (31 - end)) & (u32::MAX << start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask() {
        assert_eq!(mask(14, 15), 0x0000_c000);
        assert_eq!(mask(3, 7), 0x0000_00f8);
        assert_eq!(mask(29, 31), 0xe000_0000);
        assert_eq!(mask(0, 31), u32::MAX);
        assert_eq!(mask(4, 4), bit(4));
    }

    #[test]
    fn test_offset() {
        // i.MX6: MAC0 lives in bank 4, word 2
        assert_eq!(offset(4, 2, 8), 0x88);
        // i.MX8M: MAC_ADDR0 lives in bank 9, word 0
        assert_eq!(offset(9, 0, 4), 0x90);
        assert_eq!(offset(9, 1, 4), 0x94);
    }

    #[test]
    fn test_bit_field_display() {
        let reg = Register::new("HW_OCOTP_CFG5", 0x18);
        assert_eq!(BitField::word(reg).to_string(), "HW_OCOTP_CFG5");
        assert_eq!(
            BitField::new(reg, bit(20)).to_string(),
            "HW_OCOTP_CFG5[0x00100000]"
        );
        assert_eq!(reg.to_string(), "HW_OCOTP_CFG5 (0x18)");
    }
}
