/// Marker trait for byte-oriented buffers with incremental append operations
///
/// In most ways, it is convenient to think of `Target` as an analogous trait to
/// [`std::io::Write`]. The principal difference between the two is the fact
/// that the `push_XXX` methods on `Target` are infallible and total; while they
/// return a `usize` value representing the number of bytes written, this is used
/// only for book-keeping on the caller side, such as the zero-padding that a
/// [`List`](crate::seq::lim::List) codec appends after its last element.
///
/// All implementors of `Target` must define these methods as infallible and total.
pub trait Target {
    /// Returns a fresh object of the `Self` type with an initially empty buffer.
    fn create() -> Self;

    /// Appends a single byte to a Target object.
    ///
    /// The return value must be `1`.
    fn push_one(&mut self, b: u8) -> usize;

    /// Appends the bytes in an arbitrary-length byte-slice to a Target object.
    ///
    /// The return value must be the total length of the slice.
    fn push_all(&mut self, buf: &[u8]) -> usize;

    /// Appends `n` NIL bytes.
    ///
    /// The return value must be `n`.
    fn push_zeros(&mut self, n: usize) -> usize {
        for _ in 0..n {
            self.push_one(0x00);
        }
        n
    }
}

/// Zero-sized target that counts the bytes written to it without storing them
///
/// Useful to determine the encoded length of a value without allocating.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ByteCounter(usize);

impl ByteCounter {
    /// Total number of bytes pushed so far
    #[must_use]
    pub const fn count(&self) -> usize {
        self.0
    }
}

impl Target for ByteCounter {
    #[inline]
    fn create() -> Self {
        Self(0)
    }

    #[inline]
    fn push_one(&mut self, _: u8) -> usize {
        self.0 += 1;
        1
    }

    #[inline]
    fn push_all(&mut self, buf: &[u8]) -> usize {
        self.0 += buf.len();
        buf.len()
    }

    #[inline]
    fn push_zeros(&mut self, n: usize) -> usize {
        self.0 += n;
        n
    }
}

impl Target for Vec<u8> {
    #[inline]
    #[must_use]
    fn create() -> Self {
        Self::new()
    }

    #[inline]
    fn push_one(&mut self, b: u8) -> usize {
        self.push(b);
        1
    }

    #[inline]
    fn push_all(&mut self, buf: &[u8]) -> usize {
        self.extend_from_slice(buf);
        buf.len()
    }

    #[inline]
    fn push_zeros(&mut self, n: usize) -> usize {
        self.resize(self.len() + n, 0x00);
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_matches_vec() {
        let mut counter = ByteCounter::create();
        let mut buf = Vec::create();
        let n = counter.push_all(b"did") + counter.push_zeros(2) + counter.push_one(1);
        let m = buf.push_all(b"did") + buf.push_zeros(2) + buf.push_one(1);
        assert_eq!(n, m);
        assert_eq!(counter.count(), buf.len());
        assert_eq!(buf, b"did\x00\x00\x01");
    }
}
