//! Sequence codecs
//!
//! Two composites repeat their sub-codecs over a fixed-size window:
//!   - Fixed repetition count: [`Array`](fix::Array), decode-only
//!   - Run-time count read from an embedded field: [`List`](lim::List)
//!
//! Both are bounded by their declared byte-length. An `Array` fills it
//! exactly; a `List` holds at most as many elements as fit after its count
//! field, with the unused tail of the window zero-padded on encode and
//! skipped on decode.

pub mod fix;
pub mod lim;

pub use fix::Array;
pub use lim::List;
