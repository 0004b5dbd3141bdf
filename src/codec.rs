//! Conversions between raw OTP register words and logical fuse values
//!
//! Everything in this module operates on plain values; none of these
//! functions touch a [FuseStore](crate::store::FuseStore).

use std::{fmt, str::FromStr};

use crate::error::FormatError;

/// Number of words making up a Super Root Key hash
pub const KEY_HASH_WORDS: usize = 8;

/// Return the bits of `word` selected by `mask`
pub const fn extract_field(word: u32, mask: u32) -> u32 {
    word & mask
}

/// Whether every bit of `mask` is set in `word`
pub const fn is_fully_set(word: u32, mask: u32) -> bool {
    word & mask == mask
}

/// An Ethernet MAC address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|octet| *octet == 0)
    }
}

impl FromStr for MacAddress {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ':' | '-'))
            .collect::<String>();

        if digits.len() != 12 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(FormatError::MacAddress(s.to_string()));
        }

        let mut octets = [0u8; 6];
        for (i, octet) in octets.iter_mut().enumerate() {
            *octet = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16)
                .map_err(|_| FormatError::MacAddress(s.to_string()))?;
        }

        Ok(Self(octets))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

/// Pack a MAC address into its two register words.
///
/// The first word holds octets 2 to 5 with octet 2 in the most significant
/// byte. The second word holds octets 0 and 1 in its lower half, octet 0 in
/// bits 15:8. This matches the OCOTP `MAC0`/`MAC1` layout, where
/// `00:11:22:33:44:55` is stored as `0x22334455` and `0x00000011`.
pub fn pack_mac_address(mac: &MacAddress) -> (u32, u32) {
    let [a, b, c, d, e, g] = mac.octets();

    (
        u32::from_be_bytes([c, d, e, g]),
        u32::from_be_bytes([0, 0, a, b]),
    )
}

/// Inverse of [pack_mac_address]; bits 31:16 of `reg1` are ignored
pub fn unpack_mac_address(reg0: u32, reg1: u32) -> MacAddress {
    let [c, d, e, g] = reg0.to_be_bytes();
    let [_, _, a, b] = reg1.to_be_bytes();

    MacAddress::new([a, b, c, d, e, g])
}

/// Pack a MAC address stored after another one in the same register pair.
///
/// The first word holds octets 0 to 3 with octet 0 in the most significant
/// byte; octets 4 and 5 occupy bits 31:16 of the second word, whose lower
/// half belongs to the preceding address.
pub fn pack_mac_address_upper(mac: &MacAddress) -> (u32, u32) {
    let [a, b, c, d, e, g] = mac.octets();

    (
        u32::from_be_bytes([a, b, c, d]),
        u32::from_be_bytes([e, g, 0, 0]),
    )
}

/// Inverse of [pack_mac_address_upper]; bits 15:0 of `reg1` are ignored
pub fn unpack_mac_address_upper(reg0: u32, reg1: u32) -> MacAddress {
    let [a, b, c, d] = reg0.to_be_bytes();
    let [e, g, _, _] = reg1.to_be_bytes();

    MacAddress::new([a, b, c, d, e, g])
}

/// Parse a single hexadecimal word, with or without a `0x` prefix
pub fn parse_hex_word(s: &str) -> Result<u32, FormatError> {
    let trimmed = s.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.is_empty() || digits.len() > 8 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(FormatError::Word(s.to_string()));
    }

    u32::from_str_radix(digits, 16).map_err(|_| FormatError::Word(s.to_string()))
}

/// Split a comma separated list of key hash words
pub fn pack_key_hash_words(csv: &str) -> Result<[u32; KEY_HASH_WORDS], FormatError> {
    let fields = csv.trim().split(',').collect::<Vec<_>>();
    if fields.len() != KEY_HASH_WORDS {
        return Err(FormatError::WordCount {
            expected: KEY_HASH_WORDS,
            found: fields.len(),
        });
    }

    let mut words = [0u32; KEY_HASH_WORDS];
    for (word, field) in words.iter_mut().zip(fields) {
        *word = parse_hex_word(field)?;
    }

    Ok(words)
}

/// Render key hash words as `0x%08x` values joined by commas
pub fn unpack_key_hash_words(words: &[u32]) -> String {
    words
        .iter()
        .map(|word| format!("{word:#010x}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Look up the raw bits of a named selection.
///
/// Labels compare case-insensitively, the canonical spelling is returned
/// along with the bits. When a label appears more than once the first
/// encoding wins.
pub fn encode_choice(
    label: &str,
    choices: &[(&'static str, u32)],
) -> Result<(&'static str, u32), FormatError> {
    choices
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(label.trim()))
        .copied()
        .ok_or_else(|| FormatError::Choice {
            value: label.to_string(),
            choices: choice_names(choices),
        })
}

/// Name the selection encoded by `bits`, if any
pub fn decode_choice(bits: u32, choices: &[(&'static str, u32)]) -> Option<&'static str> {
    choices
        .iter()
        .find(|(_, encoding)| *encoding == bits)
        .map(|(name, _)| *name)
}

/// Distinct selection names, in table order
pub fn choice_names(choices: &[(&'static str, u32)]) -> String {
    let mut names: Vec<&str> = Vec::with_capacity(choices.len());
    for (name, _) in choices {
        if !names.contains(name) {
            names.push(name);
        }
    }

    names.join(", ")
}
