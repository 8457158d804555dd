use core::iter::{FusedIterator, Iterator};

/// Iterator over all bits in the bitmap as `bool` values.
///
/// Yields `true` for set bits and `false` for unset bits, starting from
/// position 0 (the most significant bit of the first byte).
///
/// Returned by [`Bitmap::iter()`].
///
/// [`Bitmap::iter()`]: crate::Bitmap::iter
#[derive(Debug, Clone)]
pub struct Bits<'bitmap> {
    bytes: &'bitmap [u8],
    bit_idx: usize,
}

impl<'bitmap> Bits<'bitmap> {
    pub(crate) fn new(bytes: &'bitmap [u8]) -> Self {
        Self { bytes, bit_idx: 0 }
    }
}

impl Iterator for Bits<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        let byte = *self.bytes.get(self.bit_idx / 8)?;
        let bit = byte & (0x80 >> (self.bit_idx % 8));
        self.bit_idx += 1;
        Some(bit != 0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bytes.len() * 8 - self.bit_idx;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Bits<'_> {}

impl FusedIterator for Bits<'_> {}

/// Lazy iterator over the positions of set bits, in ascending order.
///
/// Each position is produced only when pulled, so a consumer that stops
/// pulling holds the traversal where it is and may drop it at any time.
/// Once the last byte is exhausted the iterator keeps returning `None`.
/// A new traversal starts from position 0 with another call to
/// [`Bitmap::iter_ones()`].
///
/// [`Bitmap::iter_ones()`]: crate::Bitmap::iter_ones
#[derive(Debug, Clone)]
pub struct IterOnes<'bitmap> {
    bytes: &'bitmap [u8],
    byte_idx: usize,
    current: u8,
    base_bit_idx: usize,
}

impl<'bitmap> IterOnes<'bitmap> {
    pub(crate) fn new(bytes: &'bitmap [u8]) -> Self {
        Self {
            bytes,
            byte_idx: 0,
            current: bytes.first().copied().unwrap_or(0),
            base_bit_idx: 0,
        }
    }
}

impl Iterator for IterOnes<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.byte_idx < self.bytes.len() {
            if self.current != 0 {
                let lz = self.current.leading_zeros() as usize;
                self.current &= !(0x80 >> lz); // unset highest remaining bit
                return Some(self.base_bit_idx + lz);
            }

            self.byte_idx += 1;
            self.base_bit_idx += 8;
            self.current = self.bytes.get(self.byte_idx).copied().unwrap_or(0);
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = self.current.count_ones() as usize;
        let unread = self
            .bytes
            .get(self.byte_idx + 1..)
            .map_or(0, |rest| rest.len() * 8);
        (pending, Some(pending + unread))
    }
}

impl FusedIterator for IterOnes<'_> {}
