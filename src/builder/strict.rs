//! Builder type implemented as a newtype around `Vec<u8>`
//!
//! StrictBuilder is named after Haskell's `Data.ByteString.Strict`.

use crate::conv::target::Target;

/// Newtype around `Vec<u8>` to use as Builder
///
/// Most of the methods on `StrictBuilder` are implemented directly on the
/// underlying `Vec<u8>` and are not explicitly documented due to how trivial
/// they are.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Clone)]
#[repr(transparent)]
pub struct StrictBuilder(Vec<u8>);

impl Target for StrictBuilder {
    fn create() -> Self {
        Self(Vec::create())
    }

    fn push_one(&mut self, b: u8) -> usize {
        self.0.push_one(b)
    }

    fn push_all(&mut self, buf: &[u8]) -> usize {
        self.0.push_all(buf)
    }

    fn push_zeros(&mut self, n: usize) -> usize {
        self.0.push_zeros(n)
    }
}

impl super::Builder for StrictBuilder {
    /// In order to distinguish between finalized and non-finalized
    /// `StrictBuilders`, `Final := Vec<u8>` is used over `Final := Self`
    type Final = Vec<u8>;

    fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Finalizes a `StrictBuilder` by destructing it
    fn finalize(self) -> Self::Final {
        self.0
    }

    fn len(&self) -> usize {
        Vec::len(&self.0)
    }
}
