use core::num::NonZeroUsize;

/// Number of bytes a freshly created bitmap holds, and the granularity by
/// which its buffer grows.
pub const DEFAULT_CHUNK_SIZE: NonZeroUsize = match NonZeroUsize::new(16) {
    Some(size) => size,
    None => unreachable!(),
};

/// How a [`Bitmap`] treats negative bit positions.
///
/// [`Bitmap`]: crate::Bitmap
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexPolicy {
    /// Negative positions are legal inputs. They always read as unset and
    /// writes to them are ignored.
    #[default]
    Tolerant,
    /// Negative positions are out of bounds and cause a panic.
    Strict,
}

/// Construction-time settings of a [`Bitmap`].
///
/// # Examples
/// ```
/// use core::num::NonZeroUsize;
/// use persistable_bitmap::{Bitmap, Config, IndexPolicy};
///
/// const SMALL: Config = Config::new()
///     .chunk_size(NonZeroUsize::new(4).unwrap())
///     .policy(IndexPolicy::Strict);
///
/// let bm = Bitmap::with_config(SMALL);
/// assert_eq!(bm.byte_len(), 4);
/// assert_eq!(bm.config().policy, IndexPolicy::Strict);
/// ```
///
/// [`Bitmap`]: crate::Bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Config {
    /// Size of a new buffer and growth granularity, in bytes.
    pub chunk_size: NonZeroUsize,
    /// Handling of negative bit positions.
    pub policy: IndexPolicy,
}

impl Config {
    /// Returns the default configuration: [`DEFAULT_CHUNK_SIZE`] bytes per
    /// chunk and [`IndexPolicy::Tolerant`].
    pub const fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            policy: IndexPolicy::Tolerant,
        }
    }

    /// Sets the chunk size.
    pub const fn chunk_size(mut self, chunk_size: NonZeroUsize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Sets the index policy.
    pub const fn policy(mut self, policy: IndexPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Rounds `needed` bytes up to a whole number of chunks.
    #[inline]
    pub(crate) const fn round_to_chunks(&self, needed: usize) -> usize {
        needed.div_ceil(self.chunk_size.get()) * self.chunk_size.get()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
