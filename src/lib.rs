//! Time-frame resolution and timestamp filtering for media-download runs.

pub mod filter;
pub mod timeframe;

pub use timeframe::{resolve, resolve_at, FormatError, Keyword, TimeFrame};
