use crate::codec;
use crate::iter::{Bits, IterOnes};
use crate::{Config, DecodeError, IndexPolicy};
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};
use core::hash::{Hash, Hasher};
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign};

/// Mask selecting bits `first..=last` of a byte, bit 0 being the most
/// significant one.
#[inline]
pub(crate) const fn span_mask(first: usize, last: usize) -> u8 {
    (0xff >> first) & (0xff << (7 - last))
}

/// Number of set bits in `byte`, summed pairwise over 2-bit, 4-bit and
/// 8-bit groups.
#[inline]
pub(crate) const fn byte_population(byte: u8) -> usize {
    let pairs = ((byte & 0xaa) >> 1) + (byte & 0x55);
    let quads = ((pairs & 0xcc) >> 2) + (pairs & 0x33);
    (((quads & 0xf0) >> 4) + (quads & 0x0f)) as usize
}

/// A growable bitmap backed by a byte buffer.
///
/// Bit `n` lives in byte `n / 8`, at position `n % 8` counted from the most
/// significant bit. Bits beyond the end of the buffer read as unset; writing
/// to them grows the buffer in whole chunks of [`Config::chunk_size`] bytes.
/// The buffer never shrinks.
///
/// Positions taken by accessors are `isize`. How negative positions are
/// treated is decided by the [`IndexPolicy`] of the bitmap's [`Config`].
///
/// Two bitmaps are equal when their buffers hold the same bytes, whatever
/// their configuration.
#[derive(Clone)]
pub struct Bitmap {
    bytes: Vec<u8>,
    config: Config,
}

impl Bitmap {
    /// Creates a bitmap of one default-sized chunk with all bits unset.
    ///
    /// # Examples
    /// ```
    /// use persistable_bitmap::{Bitmap, DEFAULT_CHUNK_SIZE};
    ///
    /// let bm = Bitmap::new();
    /// assert_eq!(bm.byte_len(), DEFAULT_CHUNK_SIZE.get());
    /// assert!(bm.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a bitmap of one chunk with all bits unset, using `config`.
    pub fn with_config(config: Config) -> Self {
        Self {
            bytes: vec![0u8; config.chunk_size.get()],
            config,
        }
    }

    /// Wraps `bytes` as the buffer of a new bitmap, verbatim.
    ///
    /// The length is not rounded to a chunk boundary.
    ///
    /// # Examples
    /// ```
    /// use persistable_bitmap::Bitmap;
    ///
    /// let bm = Bitmap::from_bytes(vec![0x80, 0x01]);
    /// assert_eq!(bm.byte_len(), 2);
    /// assert_eq!(bm.to_offsets(), [0, 15]);
    /// ```
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self::from_bytes_with_config(bytes, Config::default())
    }

    /// Wraps `bytes` as the buffer of a new bitmap using `config`.
    pub fn from_bytes_with_config(bytes: Vec<u8>, config: Config) -> Self {
        Self { bytes, config }
    }

    /// Decodes a persisted bitmap: each pair of hex digits becomes one byte.
    ///
    /// The decoded bytes are used verbatim, so the bitmap holds exactly half
    /// as many bytes as `persisted` has digits.
    ///
    /// # Errors
    /// Returns [`DecodeError::InvalidDigit`] for a character that is not a
    /// hex digit and [`DecodeError::OddLength`] when a digit is unpaired.
    ///
    /// # Examples
    /// ```
    /// use persistable_bitmap::{Bitmap, DecodeError};
    ///
    /// let bm = Bitmap::from_persisted("8f1200000000000001").unwrap();
    /// assert_eq!(bm.byte_len(), 9);
    /// assert_eq!(bm.to_offsets(), [0, 4, 5, 6, 7, 11, 14, 71]);
    ///
    /// assert_eq!(
    ///     Bitmap::from_persisted("8f1"),
    ///     Err(DecodeError::OddLength { len: 3 })
    /// );
    /// ```
    pub fn from_persisted(persisted: &str) -> Result<Self, DecodeError> {
        Self::from_persisted_with_config(persisted, Config::default())
    }

    /// Decodes a persisted bitmap using `config`.
    ///
    /// # Errors
    /// Same as [`from_persisted`](Bitmap::from_persisted).
    pub fn from_persisted_with_config(
        persisted: &str,
        config: Config,
    ) -> Result<Self, DecodeError> {
        let bytes = codec::decode(persisted)?;
        Ok(Self { bytes, config })
    }

    /// Returns the configuration this bitmap was created with.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the number of bytes in the buffer.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns the number of addressable bits, `8 * byte_len()`.
    #[inline]
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8
    }

    /// Returns the underlying buffer.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the bitmap and returns the underlying buffer.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Grows the buffer so that `byte_idx` is in bounds.
    ///
    /// The new length is the smallest multiple of the chunk size covering
    /// `byte_idx`. Existing bytes keep their place and the rest are zeroed.
    fn ensure_capacity(&mut self, byte_idx: usize) {
        let needed = byte_idx + 1;
        if needed > self.bytes.len() {
            self.bytes.resize(self.config.round_to_chunks(needed), 0);
        }
    }

    /// Applies the index policy to a caller-supplied position.
    ///
    /// Returns `None` for a negative position under the tolerant policy.
    ///
    /// # Panics
    /// Panics on a negative position under the strict policy.
    #[inline]
    fn checked_position(&self, n: isize) -> Option<usize> {
        match usize::try_from(n) {
            Ok(idx) => Some(idx),
            Err(_) => match self.config.policy {
                IndexPolicy::Tolerant => None,
                IndexPolicy::Strict => panic!("Bit index {n} out of bounds"),
            },
        }
    }

    #[inline]
    fn idxs(idx: usize) -> (usize, usize) {
        (idx / 8, idx % 8)
    }

    /// Returns `true` if the bit at position `n` is set.
    ///
    /// Positions beyond the buffer read as unset and never grow it. Negative
    /// positions read as unset under [`IndexPolicy::Tolerant`].
    ///
    /// # Panics
    /// Panics if `n` is negative under [`IndexPolicy::Strict`].
    ///
    /// # Examples
    /// ```
    /// use persistable_bitmap::Bitmap;
    ///
    /// let mut bm = Bitmap::new();
    /// bm.set(1);
    /// assert!(bm.get(1));
    /// assert!(!bm.get(0));
    /// assert!(!bm.get(-1));
    /// assert!(!bm.get(1_000_000_000));
    /// ```
    #[inline]
    pub fn get(&self, n: isize) -> bool {
        let Some(idx) = self.checked_position(n) else {
            return false;
        };
        let (byte_idx, bit_idx) = Self::idxs(idx);
        self.bytes
            .get(byte_idx)
            .is_some_and(|byte| byte & (0x80 >> bit_idx) != 0)
    }

    /// Sets the bit at position `n`, growing the buffer if needed.
    ///
    /// A negative position is ignored under [`IndexPolicy::Tolerant`]; such
    /// a bit can never become set.
    ///
    /// # Panics
    /// Panics if `n` is negative under [`IndexPolicy::Strict`].
    ///
    /// # Examples
    /// ```
    /// use persistable_bitmap::Bitmap;
    ///
    /// let mut bm = Bitmap::new();
    /// bm.set(3).set(200);
    /// assert!(bm.get(3));
    /// assert!(bm.get(200));
    /// assert_eq!(bm.byte_len(), 32);
    /// ```
    #[inline]
    pub fn set(&mut self, n: isize) -> &mut Self {
        if let Some(idx) = self.checked_position(n) {
            self.set_bit(idx);
        }
        self
    }

    #[inline]
    pub(crate) fn set_bit(&mut self, idx: usize) {
        let (byte_idx, bit_idx) = Self::idxs(idx);
        self.ensure_capacity(byte_idx);
        self.bytes[byte_idx] |= 0x80 >> bit_idx;
    }

    /// Unsets the bit at position `n`.
    ///
    /// Like [`set`](Bitmap::set), this grows the buffer to cover `n`.
    ///
    /// # Panics
    /// Panics if `n` is negative under [`IndexPolicy::Strict`].
    ///
    /// # Examples
    /// ```
    /// use persistable_bitmap::Bitmap;
    ///
    /// let mut bm = Bitmap::new();
    /// bm.set(4).set(5).unset(4);
    /// assert!(!bm.get(4));
    /// assert!(bm.get(5));
    /// ```
    #[inline]
    pub fn unset(&mut self, n: isize) -> &mut Self {
        if let Some(idx) = self.checked_position(n) {
            let (byte_idx, bit_idx) = Self::idxs(idx);
            self.ensure_capacity(byte_idx);
            self.bytes[byte_idx] &= !(0x80 >> bit_idx);
        }
        self
    }

    /// Sets every bit in `start..=end` (inclusive) to `value`.
    ///
    /// A negative `end` is taken as 0 and the bounds are swapped if `start`
    /// is greater than `end`. Under [`IndexPolicy::Tolerant`] a negative
    /// `start` is then taken as 0. The buffer grows to cover `end`.
    ///
    /// # Panics
    /// Panics if `start` is negative under [`IndexPolicy::Strict`].
    ///
    /// # Examples
    /// ```
    /// use persistable_bitmap::Bitmap;
    ///
    /// let mut bm = Bitmap::new();
    /// bm.fill_range(2, 5, true);
    /// assert_eq!(bm.to_offsets(), [2, 3, 4, 5]);
    /// bm.fill_range(4, 3, false);
    /// assert_eq!(bm.to_offsets(), [2, 5]);
    /// ```
    pub fn fill_range(&mut self, start: isize, end: isize, value: bool) -> &mut Self {
        let end = end.max(0);
        let (start, end) = if start > end { (end, start) } else { (start, end) };
        let start = self.checked_position(start).unwrap_or(0);
        let end = end.unsigned_abs();

        let (start_byte, start_bit) = Self::idxs(start);
        let (end_byte, end_bit) = Self::idxs(end);
        self.ensure_capacity(end_byte);

        // all within one byte
        if start_byte == end_byte {
            self.apply_mask(start_byte, span_mask(start_bit, end_bit), value);
            return self;
        }

        self.apply_mask(start_byte, span_mask(start_bit, 7), value);
        self.bytes[start_byte + 1..end_byte].fill(if value { !0 } else { 0 });
        self.apply_mask(end_byte, span_mask(0, end_bit), value);
        self
    }

    /// Sets every bit in `start..=end`. Shorthand for
    /// [`fill_range(start, end, true)`](Bitmap::fill_range).
    ///
    /// # Examples
    /// ```
    /// use persistable_bitmap::Bitmap;
    ///
    /// let mut bm = Bitmap::new();
    /// bm.set_range(6, 9);
    /// assert_eq!(bm.to_offsets(), [6, 7, 8, 9]);
    /// ```
    #[inline]
    pub fn set_range(&mut self, start: isize, end: isize) -> &mut Self {
        self.fill_range(start, end, true)
    }

    /// Unsets every bit in `start..=end`. Shorthand for
    /// [`fill_range(start, end, false)`](Bitmap::fill_range).
    #[inline]
    pub fn unset_range(&mut self, start: isize, end: isize) -> &mut Self {
        self.fill_range(start, end, false)
    }

    #[inline]
    fn apply_mask(&mut self, byte_idx: usize, mask: u8, value: bool) {
        if value {
            self.bytes[byte_idx] |= mask;
        } else {
            self.bytes[byte_idx] &= !mask;
        }
    }

    /// Returns the canonical persisted form of the bitmap.
    ///
    /// The buffer is written as lowercase hex, two digits per byte, with
    /// trailing zero bytes removed. A bitmap with no set bits is written as
    /// `"00"` whatever its length. Decoding the result and persisting again
    /// yields the same string.
    ///
    /// # Examples
    /// ```
    /// use persistable_bitmap::Bitmap;
    ///
    /// let mut bm = Bitmap::new();
    /// assert_eq!(bm.to_persistable(), "00");
    /// bm.set(0).set(11);
    /// assert_eq!(bm.to_persistable(), "8010");
    /// ```
    pub fn to_persistable(&self) -> String {
        self.to_string()
    }

    /// Returns a new bitmap holding the bitwise AND of `self` and `other`.
    ///
    /// The result is as long as the shorter operand; bytes past its end are
    /// dropped.
    ///
    /// # Examples
    /// ```
    /// use persistable_bitmap::Bitmap;
    ///
    /// let a = Bitmap::from_persisted("800000111122224444888801ffffff").unwrap();
    /// let b = Bitmap::from_persisted("808421842184218421842101").unwrap();
    /// let c = a.and(&b);
    /// assert_eq!(c.byte_len(), 12);
    /// assert_eq!(c.to_persistable(), "800000000100200400800001");
    /// ```
    pub fn and(&self, other: &Self) -> Self {
        let bytes = self
            .bytes
            .iter()
            .zip(&other.bytes)
            .map(|(lhs, rhs)| lhs & rhs)
            .collect();
        Self {
            bytes,
            config: self.config,
        }
    }

    /// Returns a new bitmap holding the bitwise OR of `self` and `other`.
    ///
    /// The result is as long as the longer operand, whose trailing bytes
    /// are copied unchanged.
    ///
    /// # Examples
    /// ```
    /// use persistable_bitmap::Bitmap;
    ///
    /// let a = Bitmap::from_persisted("8421842184218421").unwrap();
    /// let b = Bitmap::from_persisted("00001111222288881111").unwrap();
    /// assert_eq!(a.or(&b).to_persistable(), "84219531a6238ca91111");
    /// ```
    pub fn or(&self, other: &Self) -> Self {
        self.combine_onto_longer(other, |lhs, rhs| lhs | rhs)
    }

    /// Returns a new bitmap holding the bitwise XOR of `self` and `other`.
    ///
    /// The result is as long as the longer operand, whose trailing bytes
    /// are copied unchanged.
    ///
    /// # Examples
    /// ```
    /// use persistable_bitmap::Bitmap;
    ///
    /// let a = Bitmap::from_persisted("fedcba9876543210").unwrap();
    /// let b = Bitmap::from_persisted("ffffffffffffffff").unwrap();
    /// assert_eq!(a.xor(&b).to_persistable(), "0123456789abcdef");
    /// ```
    pub fn xor(&self, other: &Self) -> Self {
        self.combine_onto_longer(other, |lhs, rhs| lhs ^ rhs)
    }

    fn combine_onto_longer(&self, other: &Self, op: impl Fn(u8, u8) -> u8) -> Self {
        let (longer, shorter) = if self.bytes.len() >= other.bytes.len() {
            (&self.bytes, &other.bytes)
        } else {
            (&other.bytes, &self.bytes)
        };
        let mut bytes = longer.clone();
        for (dest, src) in bytes.iter_mut().zip(shorter) {
            *dest = op(*dest, *src);
        }
        Self {
            bytes,
            config: self.config,
        }
    }

    /// Performs an in-place bitwise AND with another bitmap, truncating
    /// `self` to the shorter length.
    pub fn in_place_and(&mut self, other: &Self) {
        self.bytes.truncate(other.bytes.len());
        for (self_byte, other_byte) in self.bytes.iter_mut().zip(&other.bytes) {
            *self_byte &= other_byte;
        }
    }

    /// Performs an in-place bitwise OR with another bitmap, extending `self`
    /// with the tail of a longer `other`.
    pub fn in_place_or(&mut self, other: &Self) {
        self.combine_in_place(other, |dest, src| *dest |= src);
    }

    /// Performs an in-place bitwise XOR with another bitmap, extending `self`
    /// with the tail of a longer `other`.
    pub fn in_place_xor(&mut self, other: &Self) {
        self.combine_in_place(other, |dest, src| *dest ^= src);
    }

    fn combine_in_place(&mut self, other: &Self, op: impl Fn(&mut u8, u8)) {
        for (self_byte, other_byte) in self.bytes.iter_mut().zip(&other.bytes) {
            op(self_byte, *other_byte);
        }
        if let Some(tail) = other.bytes.get(self.bytes.len()..) {
            self.bytes.extend_from_slice(tail);
        }
    }

    /// Returns the number of set bits in the bitmap.
    ///
    /// # Examples
    /// ```
    /// use persistable_bitmap::Bitmap;
    ///
    /// let bm = Bitmap::from_persisted("f0e1d2c3b4a5968778695a4b3c2d1e0f").unwrap();
    /// assert_eq!(bm.count(), 64);
    /// ```
    pub fn count(&self) -> usize {
        self.bytes.iter().map(|&byte| byte_population(byte)).sum()
    }

    /// Returns the number of set bits in the bitmap. Same as
    /// [`count`](Bitmap::count).
    #[inline]
    pub fn population(&self) -> usize {
        self.count()
    }

    /// Returns `true` if no bit is set.
    ///
    /// Stops at the first nonzero byte.
    pub fn is_empty(&self) -> bool {
        self.bytes.iter().all(|&byte| byte == 0)
    }

    /// Returns an iterator over all `bit_len()` bits as `bool`, position 0
    /// first.
    #[inline]
    pub fn iter(&self) -> Bits<'_> {
        Bits::new(&self.bytes)
    }

    /// Returns a lazy iterator over the positions of set bits, in ascending
    /// order.
    ///
    /// Nothing is computed ahead of what is pulled, which makes this the way
    /// to walk bitmaps too large for [`to_offsets`](Bitmap::to_offsets).
    /// Running through the whole iterator is O(max(k, b)) where k is the
    /// number of set bits and b the number of bytes.
    ///
    /// # Examples
    /// ```
    /// use persistable_bitmap::Bitmap;
    ///
    /// let bm = Bitmap::from_persisted("8f1200811800188101").unwrap();
    /// let mut ones = bm.iter_ones();
    /// assert_eq!(ones.next(), Some(0));
    /// assert_eq!(ones.next(), Some(4));
    /// // the rest is produced on demand
    /// assert_eq!(ones.last(), Some(71));
    /// ```
    #[inline]
    pub fn iter_ones(&self) -> IterOnes<'_> {
        IterOnes::new(&self.bytes)
    }

    /// Returns the positions of all set bits, in ascending order.
    pub fn to_offsets(&self) -> Vec<usize> {
        self.iter_ones().collect()
    }
}

impl Default for Bitmap {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Bitmap {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for Bitmap {}

impl Hash for Bitmap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl From<Vec<u8>> for Bitmap {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<&[u8]> for Bitmap {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes.to_vec())
    }
}

impl AsRef<[u8]> for Bitmap {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl<'bitmap> IntoIterator for &'bitmap Bitmap {
    type Item = bool;
    type IntoIter = Bits<'bitmap>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Debug for Bitmap {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "Bitmap[")?;
        for (i, byte) in self.bytes.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}: {byte:08b}", i * 8)?;
        }
        write!(f, "]")
    }
}

/// Constructs a bitmap with the default [`Config`] by setting each
/// position yielded by the iterator.
impl FromIterator<usize> for Bitmap {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        let mut bm = Self::new();
        bm.extend(iter);
        bm
    }
}

impl Extend<usize> for Bitmap {
    fn extend<T: IntoIterator<Item = usize>>(&mut self, iter: T) {
        for idx in iter {
            self.set_bit(idx);
        }
    }
}

macro_rules! impl_bit_op {
    ($op:ident, $op_fn:ident, $assign:ident, $assign_fn:ident, $method:ident, $in_place:ident) => {
        impl $op<&Bitmap> for &Bitmap {
            type Output = Bitmap;

            fn $op_fn(self, rhs: &Bitmap) -> Self::Output {
                self.$method(rhs)
            }
        }

        impl $op for Bitmap {
            type Output = Self;

            fn $op_fn(mut self, rhs: Self) -> Self::Output {
                self.$in_place(&rhs);
                self
            }
        }

        impl $assign<&Bitmap> for Bitmap {
            fn $assign_fn(&mut self, rhs: &Bitmap) {
                self.$in_place(rhs)
            }
        }

        impl $assign for Bitmap {
            fn $assign_fn(&mut self, rhs: Self) {
                self.$in_place(&rhs)
            }
        }
    };
}

impl_bit_op!(BitAnd, bitand, BitAndAssign, bitand_assign, and, in_place_and);
impl_bit_op!(BitOr, bitor, BitOrAssign, bitor_assign, or, in_place_or);
impl_bit_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, xor, in_place_xor);
