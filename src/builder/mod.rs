//! Extension trait for Targets that own their contents
//!
//! This module is dedicated to the definition of the `Builder` trait,
//! a sub-trait of `Target`, borrowing the name from the ubiquitous
//! Haskell package `bytestring`.
//!
//! A `Builder` is the buffer a codec writes into during
//! [`Transcode::encode`](crate::conv::Transcode::encode). It is private
//! to a single call, so a failing encode never leaves partially written
//! bytes where the caller can see them. Finalizing a `Builder` with the
//! terminal operation `finalize` consumes it and returns a `Self::Final`
//! value holding the same bytes in the same order.

use crate::conv::target::Target;

/// `Target` extension trait with a terminal `finalize` operation
pub trait Builder
where
    Self: Target + Sized,
{
    /// Type suitable for presenting the finalized contents of a `Builder` object
    type Final: Into<Vec<u8>>;

    /// Creates an empty builder with room for `capacity` bytes
    fn with_capacity(capacity: usize) -> Self;

    /// Converts a `Self` value into a `Self::Final` value once
    /// it is fully built.
    fn finalize(self) -> Self::Final;

    /// Determine the length of the Builder value in bytes
    fn len(&self) -> usize;

    /// Returns `true` if the receiver contains no bytes
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub mod strict;
