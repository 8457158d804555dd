use crate::{Bitmap, Config, DecodeError};
use alloc::vec::Vec;
use core::fmt::{self, Display, Formatter, Write};
use core::str::FromStr;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Written in place of an all-zero buffer, whatever its length.
const ZERO_BYTE: &str = "00";

/// Decodes pairs of hex digits into bytes, first pair first.
///
/// Both cases are accepted. Rejects odd-length input and anything that is
/// not a hex digit rather than decoding a prefix.
pub(crate) fn decode(persisted: &str) -> Result<Vec<u8>, DecodeError> {
    if let Some((index, found)) = persisted
        .char_indices()
        .find(|(_, c)| !c.is_ascii_hexdigit())
    {
        return Err(DecodeError::InvalidDigit { index, found });
    }
    if persisted.len() % 2 != 0 {
        return Err(DecodeError::OddLength {
            len: persisted.len(),
        });
    }
    Ok(persisted
        .as_bytes()
        .chunks_exact(2)
        .map(|pair| (nibble(pair[0]) << 4) | nibble(pair[1]))
        .collect())
}

// only called on validated ascii hex digits
#[inline]
const fn nibble(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}

/// Writes `bytes` as lowercase hex with trailing zero bytes dropped.
///
/// An all-zero (or empty) buffer is written as a single `"00"`.
pub(crate) fn encode<W: Write>(bytes: &[u8], out: &mut W) -> fmt::Result {
    let used = bytes
        .iter()
        .rposition(|&byte| byte != 0)
        .map_or(0, |last| last + 1);
    if used == 0 {
        return out.write_str(ZERO_BYTE);
    }
    for &byte in &bytes[..used] {
        out.write_char(char::from(HEX_DIGITS[usize::from(byte >> 4)]))?;
        out.write_char(char::from(HEX_DIGITS[usize::from(byte & 0x0f)]))?;
    }
    Ok(())
}

/// Formats the bitmap in its canonical persistable form.
///
/// See [`Bitmap::to_persistable`].
impl Display for Bitmap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        encode(self.as_bytes(), f)
    }
}

/// Parses a persisted bitmap with the default [`Config`].
///
/// See [`Bitmap::from_persisted`].
impl FromStr for Bitmap {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_persisted_with_config(s, Config::default())
    }
}
