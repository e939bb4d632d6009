//! Error types used to report failure in low-level parsing
//!
//! This module contains the types representing classes of error that
//! may arise as a result of calls to [`Parser`](super::Parser) methods.
//! Every failure at this level is a buffer-shape problem: the caller
//! supplied fewer bytes than a codec's layout requires, or a context
//! window was left with unconsumed residue.

use thiserror::Error;

/// Enumeration type over all errors that may be encountered when calling
/// methods on `Parser` types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Error class encountered when opening, closing, or checking context windows.
    #[error(transparent)]
    Window(#[from] WindowError),
    /// Bytes left over after a complete top-level parse
    ///
    /// Only reported when the `check_complete_parse` feature is enabled.
    #[error("{residual} trailing byte(s) left after decoding")]
    Trailing { residual: usize },
}

/// Type alias for Result with an error type of [`ParseError`]
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Errors related to context-windows
///
/// opening, closing, and adhering to context-windows for `Parser`
/// types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WindowError {
    /// Error case when a method that attempts to consume some number
    /// of bytes from the buffer of a `Parser` would violate either
    /// the absolute end-of-buffer or the current context-window in
    /// doing so.
    #[error("cannot increment offset by {requested} bytes (currently at byte {offset} out of limit {limit})")]
    ConsumeWouldExceedLimit {
        offset: usize,
        requested: usize,
        limit: usize,
    },
    /// Error case when a method call attempts to open a window
    /// that, if created, would extend beyond the final byte in
    /// the parse-buffer.
    #[error("cannot open {request}-byte context window: parse-buffer has only {bytes_left} bytes remaining")]
    OpenWouldExceedBuffer { bytes_left: usize, request: usize },
    /// Error case when a method call attempts to open a window
    /// that, if created, would be wider than the narrowest
    /// open context-window.
    #[error("cannot open {request}-byte context window: wider than current window ({limit} bytes)")]
    OpenWouldExceedWindow { limit: usize, request: usize },
    /// Error case when a method call attempts to close the narrowest open
    /// context-window but there are unconsumed bytes remaining within said
    /// window.
    #[error("cannot close context window with {residual} residual bytes")]
    CloseWithResidue { residual: usize },
    /// Error case when a method call attempts to close the narrowest open
    /// context-window, but there are no open context-windows to begin with.
    #[error("no context window to close")]
    CloseWithoutWindow,
}
