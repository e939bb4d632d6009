//! Byte-level parsing model
//!
//! This module provides the cursor abstraction that every codec decodes
//! through. Codecs never index into caller buffers directly; they consume
//! bytes from a [`Parser`], which guarantees that no read goes past either
//! the end of the buffer or the innermost *context window*.
//!
//! # Context windows
//!
//! A context window is a bounded, contiguous view of the section of the
//! buffer starting at the current offset. While a window is open, bytes
//! beyond its upper bound cannot be consumed. A window can only be closed by
//! calling [`Parser::enforce_target`] once every byte inside it has been
//! consumed.
//!
//! Composite codecs open a window of exactly their declared byte-length
//! before decoding their members, which turns any disagreement between the
//! declared length and the layout of the members into an error instead of a
//! silent misread.

pub mod error;

use byteorder::{BigEndian, ByteOrder as _, LittleEndian};
pub use error::{ParseError, ParseResult};
use error::WindowError;

use crate::int::ByteOrder;

/// # Parser
///
/// Stateful, non-backtracking cursor over an immutable byte-buffer.
///
/// The following properties should be respected by each implementation:
///
/// * A fresh parser has `offset() == 0` and `view_len()` equal to the length of the buffer
/// * `remainder()` is the largest `n` for which `consume(n)` succeeds
/// * A failed `consume(n)` leaves the offset unchanged
/// * Immediately after a successful `set_fit(n)`, `remainder()` returns `n`
/// * `enforce_target()` removes the innermost window if `remainder() == 0`, and fails otherwise
pub trait Parser {
    /// Length of the current view of the buffer: the innermost window
    /// bound, or the buffer length if no window is open.
    fn view_len(&self) -> usize;

    /// Current offset into the buffer.
    fn offset(&self) -> usize;

    /// Number of bytes that can be consumed in the current context.
    fn remainder(&self) -> usize {
        self.view_len() - self.offset()
    }

    /// Attempt to consume and return a slice of length `nbytes`,
    /// starting from the first unconsumed byte in the buffer.
    fn consume(&mut self, nbytes: usize) -> ParseResult<&[u8]>;

    /// Opens a context-window that permits exactly `n` more bytes to be consumed.
    fn set_fit(&mut self, n: usize) -> ParseResult<()>;

    /// Closes the innermost context-window.
    fn enforce_target(&mut self) -> ParseResult<()>;

    /// Consumes and discards `nbytes` bytes.
    #[inline]
    fn skip(&mut self, nbytes: usize) -> ParseResult<()> {
        self.consume(nbytes).map(|_| ())
    }

    /// Consumes one byte and returns it as a `u8` value
    #[inline]
    fn take_u8(&mut self) -> ParseResult<u8> {
        Ok(self.consume(1)?[0])
    }

    /// Consumes `nbytes` (at most 8) and interprets them as an unsigned
    /// integer in the given byte order.
    fn take_uint(&mut self, nbytes: usize, order: ByteOrder) -> ParseResult<u64> {
        let raw = self.consume(nbytes)?;
        Ok(match order {
            ByteOrder::Little => LittleEndian::read_uint(raw, nbytes),
            ByteOrder::Big => BigEndian::read_uint(raw, nbytes),
        })
    }

    /// Consumes `nbytes` (at most 8) and interprets them as a two's-complement
    /// signed integer in the given byte order.
    fn take_int(&mut self, nbytes: usize, order: ByteOrder) -> ParseResult<i64> {
        let raw = self.consume(nbytes)?;
        Ok(match order {
            ByteOrder::Little => LittleEndian::read_int(raw, nbytes),
            ByteOrder::Big => BigEndian::read_int(raw, nbytes),
        })
    }
}

/// Slice-backed [`Parser`] with a stack of context-window limits
#[derive(Debug, Clone)]
pub struct SliceParser<'a> {
    buf: &'a [u8],
    offset: usize,
    windows: Vec<usize>,
}

impl<'a> SliceParser<'a> {
    /// Creates a parser positioned at the start of `buf`, with no open windows
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            offset: 0,
            windows: Vec::new(),
        }
    }

    /// Checks that the entire buffer has been consumed
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Trailing`] if any bytes remain.
    pub fn finish(&self) -> ParseResult<()> {
        match self.buf.len() - self.offset {
            0 => Ok(()),
            residual => Err(ParseError::Trailing { residual }),
        }
    }
}

impl<'a> From<&'a [u8]> for SliceParser<'a> {
    fn from(buf: &'a [u8]) -> Self {
        Self::new(buf)
    }
}

impl Parser for SliceParser<'_> {
    #[inline]
    fn view_len(&self) -> usize {
        self.windows.last().copied().unwrap_or(self.buf.len())
    }

    #[inline]
    fn offset(&self) -> usize {
        self.offset
    }

    fn consume(&mut self, nbytes: usize) -> ParseResult<&[u8]> {
        let limit = self.view_len();
        if self.offset + nbytes > limit {
            return Err(WindowError::ConsumeWouldExceedLimit {
                offset: self.offset,
                requested: nbytes,
                limit,
            }
            .into());
        }
        let start = self.offset;
        self.offset += nbytes;
        Ok(&self.buf[start..self.offset])
    }

    fn set_fit(&mut self, n: usize) -> ParseResult<()> {
        let target = self.offset + n;
        if target > self.buf.len() {
            return Err(WindowError::OpenWouldExceedBuffer {
                bytes_left: self.buf.len() - self.offset,
                request: n,
            }
            .into());
        }
        if let Some(&limit) = self.windows.last() {
            if target > limit {
                return Err(WindowError::OpenWouldExceedWindow {
                    limit: limit - self.offset,
                    request: n,
                }
                .into());
            }
        }
        self.windows.push(target);
        Ok(())
    }

    fn enforce_target(&mut self) -> ParseResult<()> {
        match self.windows.last() {
            None => Err(WindowError::CloseWithoutWindow.into()),
            Some(&target) if target == self.offset => {
                self.windows.pop();
                Ok(())
            }
            Some(&target) => Err(WindowError::CloseWithResidue {
                residual: target - self.offset,
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_respects_buffer() {
        let mut p = SliceParser::new(&[1, 2, 3]);
        assert_eq!(p.consume(2).unwrap(), &[1, 2]);
        assert!(p.consume(2).is_err());
        assert_eq!(p.offset(), 2);
        assert_eq!(p.take_u8().unwrap(), 3);
        assert!(p.finish().is_ok());
    }

    #[test]
    fn windows_nest_and_close() {
        let mut p = SliceParser::new(&[0xaa, 0xbb, 0xcc, 0xdd]);
        p.set_fit(3).unwrap();
        assert_eq!(p.remainder(), 3);
        p.set_fit(1).unwrap();
        assert!(matches!(
            p.set_fit(2),
            Err(ParseError::Window(WindowError::OpenWouldExceedWindow { .. }))
        ));
        assert_eq!(p.take_u8().unwrap(), 0xaa);
        assert!(p.consume(1).is_err());
        p.enforce_target().unwrap();
        assert_eq!(
            p.enforce_target(),
            Err(ParseError::Window(WindowError::CloseWithResidue { residual: 2 }))
        );
        p.skip(2).unwrap();
        p.enforce_target().unwrap();
        assert_eq!(
            p.enforce_target(),
            Err(ParseError::Window(WindowError::CloseWithoutWindow))
        );
        assert_eq!(p.finish(), Err(ParseError::Trailing { residual: 1 }));
    }

    #[test]
    fn integers_by_order() {
        let bytes = [0x34, 0x12, 0xfe, 0xff];
        let mut p = SliceParser::new(&bytes);
        assert_eq!(p.take_uint(2, ByteOrder::Little).unwrap(), 0x1234);
        assert_eq!(p.take_int(2, ByteOrder::Little).unwrap(), -2);

        let mut p = SliceParser::new(&bytes);
        assert_eq!(p.take_uint(2, ByteOrder::Big).unwrap(), 0x3412);
    }
}
