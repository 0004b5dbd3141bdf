//! Fuse descriptors
//!
//! A [FuseDescriptor] is pure data: it names a fuse, describes which bits it
//! occupies and how those bits translate to a human readable value. The
//! [FuseController](crate::controller::FuseController) drives every shape the
//! same way, so supporting a new fuse only requires a new table entry.

use std::fmt;

use crate::{
    codec::{
        self, choice_names, encode_choice, pack_key_hash_words, unpack_key_hash_words,
        MacAddress,
    },
    error::{Error, FormatError},
    targets::ocotp::{BitField, Register},
};

/// Placement of a MAC address within its two registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacLayout {
    /// Octets 2 to 5 fill `tail`, octets 0 and 1 sit in bits 15:0 of `head`
    HeadInLowHalf { tail: Register, head: Register },
    /// Octets 0 to 3 fill `head`, octets 4 and 5 sit in bits 31:16 of `tail`
    TailInUpperHalf { head: Register, tail: Register },
}

impl MacLayout {
    /// Bit fields holding the address, the full word first
    pub fn fields(&self) -> [BitField; 2] {
        match *self {
            MacLayout::HeadInLowHalf { tail, head } => {
                [BitField::word(tail), BitField::new(head, 0x0000_ffff)]
            }
            MacLayout::TailInUpperHalf { head, tail } => {
                [BitField::word(head), BitField::new(tail, 0xffff_0000)]
            }
        }
    }

    pub fn pack(&self, mac: &MacAddress) -> [u32; 2] {
        let (reg0, reg1) = match self {
            MacLayout::HeadInLowHalf { .. } => codec::pack_mac_address(mac),
            MacLayout::TailInUpperHalf { .. } => codec::pack_mac_address_upper(mac),
        };

        [reg0, reg1]
    }

    pub fn unpack(&self, words: [u32; 2]) -> MacAddress {
        match self {
            MacLayout::HeadInLowHalf { .. } => codec::unpack_mac_address(words[0], words[1]),
            MacLayout::TailInUpperHalf { .. } => {
                codec::unpack_mac_address_upper(words[0], words[1])
            }
        }
    }
}

/// How the bits of a fuse are interpreted
#[derive(Debug, Clone, Copy)]
pub enum FuseShape {
    /// Set once every bit of the field is set; takes no argument
    Flag(BitField),
    /// A selector with named encodings, stored unshifted
    Choice {
        field: BitField,
        choices: &'static [(&'static str, u32)],
    },
    /// An Ethernet MAC address spanning two registers
    MacAddress(MacLayout),
    /// Full 32-bit words, e.g. the SRK hash
    WordArray(&'static [Register]),
}

/// Static description of a fuse
#[derive(Debug, Clone, Copy)]
pub struct FuseDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub shape: FuseShape,
    /// Bits marking the value as final, programmed after the value itself
    pub lock: Option<BitField>,
}

impl FuseDescriptor {
    pub const fn new(name: &'static str, description: &'static str, shape: FuseShape) -> Self {
        Self {
            name,
            description,
            shape,
            lock: None,
        }
    }

    pub const fn with_lock(mut self, lock: BitField) -> Self {
        self.lock = Some(lock);
        self
    }

    /// Whether a value has to be supplied to verify or commit this fuse
    pub fn takes_argument(&self) -> bool {
        !matches!(self.shape, FuseShape::Flag(_))
    }

    /// Example of the accepted argument, for help output
    pub fn argument_hint(&self) -> String {
        match self.shape {
            FuseShape::Flag(_) => String::from("-"),
            FuseShape::Choice { choices, .. } => choice_names(choices),
            FuseShape::MacAddress(_) => String::from("XX:XX:XX:XX:XX:XX"),
            FuseShape::WordArray(registers) => {
                format!("{} comma separated words, 0xXXXXXXXX,...", registers.len())
            }
        }
    }

    /// Value bit fields in programming order
    pub fn fields(&self) -> Vec<BitField> {
        match self.shape {
            FuseShape::Flag(field) | FuseShape::Choice { field, .. } => vec![field],
            FuseShape::MacAddress(layout) => layout.fields().to_vec(),
            FuseShape::WordArray(registers) => {
                registers.iter().copied().map(BitField::word).collect()
            }
        }
    }

    /// Parse and encode a caller supplied value.
    ///
    /// Flags ignore `arg`; every other shape requires it.
    pub fn parse_value(&self, arg: Option<&str>) -> Result<DesiredValue, Error> {
        let (value, bits) = match self.shape {
            FuseShape::Flag(field) => (FuseValue::Set, vec![field.mask]),
            FuseShape::Choice { field, choices } => {
                let (label, bits) = encode_choice(self.argument(arg)?, choices)?;
                if bits & !field.mask != 0 {
                    return Err(Error::InternalError);
                }
                (FuseValue::Choice(label), vec![bits])
            }
            FuseShape::MacAddress(layout) => {
                let arg = self.argument(arg)?;
                let mac = arg.parse::<MacAddress>()?;
                if mac.is_zero() {
                    return Err(FormatError::Blank(arg.to_string()).into());
                }
                (FuseValue::Mac(mac), layout.pack(&mac).to_vec())
            }
            FuseShape::WordArray(registers) => {
                let arg = self.argument(arg)?;
                let words = pack_key_hash_words(arg)?;
                if words.len() != registers.len() {
                    return Err(Error::InternalError);
                }
                if words.iter().all(|word| *word == 0) {
                    return Err(FormatError::Blank(arg.to_string()).into());
                }
                (FuseValue::Words(words.to_vec()), words.to_vec())
            }
        };

        let writes = self.fields().into_iter().zip(bits).collect();

        Ok(DesiredValue { value, writes })
    }

    /// Decode the masked words of [FuseDescriptor::fields], `None` when
    /// nothing is programmed.
    pub fn decode(&self, words: &[u32]) -> Option<FuseValue> {
        match self.shape {
            FuseShape::Flag(field) => words
                .first()
                .is_some_and(|word| codec::is_fully_set(*word, field.mask))
                .then_some(FuseValue::Set),
            FuseShape::Choice { choices, .. } => match words.first() {
                None | Some(0) => None,
                Some(&bits) => Some(
                    codec::decode_choice(bits, choices)
                        .map(FuseValue::Choice)
                        .unwrap_or(FuseValue::Unknown(bits)),
                ),
            },
            FuseShape::MacAddress(layout) => match words {
                [0, 0] => None,
                [reg0, reg1] => Some(FuseValue::Mac(layout.unpack([*reg0, *reg1]))),
                _ => None,
            },
            FuseShape::WordArray(_) => {
                if words.iter().all(|word| *word == 0) {
                    None
                } else {
                    Some(FuseValue::Words(words.to_vec()))
                }
            }
        }
    }

    /// Label of the all-zero encoding of a selector
    pub fn default_choice(&self) -> Option<&'static str> {
        match self.shape {
            FuseShape::Choice { choices, .. } => codec::decode_choice(0, choices),
            _ => None,
        }
    }

    fn argument<'a>(&self, arg: Option<&'a str>) -> Result<&'a str, Error> {
        arg.ok_or_else(|| Error::MissingArgument {
            fuse: self.name.to_string(),
            hint: self.argument_hint(),
        })
    }
}

/// A decoded, human readable fuse value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FuseValue {
    /// Every bit of a flag is set
    Set,
    Choice(&'static str),
    /// Bits matching none of the known selections
    Unknown(u32),
    Mac(MacAddress),
    Words(Vec<u32>),
}

impl fmt::Display for FuseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FuseValue::Set => write!(f, "SET"),
            FuseValue::Choice(label) => write!(f, "{label}"),
            FuseValue::Unknown(bits) => write!(f, "UNKNOWN ({bits:#010x})"),
            FuseValue::Mac(mac) => write!(f, "{mac}"),
            FuseValue::Words(words) => write!(f, "{}", unpack_key_hash_words(words)),
        }
    }
}

/// A validated value together with the bits it programs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredValue {
    pub value: FuseValue,
    writes: Vec<(BitField, u32)>,
}

impl DesiredValue {
    /// Bits to program per field, in programming order
    pub fn writes(&self) -> &[(BitField, u32)] {
        &self.writes
    }

    /// Whether the value is what an unprogrammed fuse reads as
    pub fn is_blank(&self) -> bool {
        self.writes.iter().all(|(_, bits)| *bits == 0)
    }

    /// Whether every bit in `words` (masked, in field order) is also set by
    /// this value
    pub fn covers(&self, words: &[u32]) -> bool {
        self.writes.len() == words.len()
            && self
                .writes
                .iter()
                .zip(words)
                .all(|((_, bits), word)| word & !bits == 0)
    }
}

/// Programming state of a fuse, derived from the store on every call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgrammedState {
    /// No value bits set
    Unfused,
    /// Value bits set and, where the fuse has one, the lock set
    Fused(FuseValue),
    /// Value bits set but the lock is missing, as left by an interrupted commit
    Unsealed(FuseValue),
}

impl fmt::Display for ProgrammedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgrammedState::Unfused => write!(f, "unfused"),
            ProgrammedState::Fused(value) => write!(f, "{value}"),
            ProgrammedState::Unsealed(value) => write!(f, "{value} (not locked)"),
        }
    }
}
