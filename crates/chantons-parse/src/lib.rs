//! Lyrics segmentation for catalogue song pages.
//!
//! Raw lyric text goes through three stages:
//! - [`normalize`] truncates copyright footers and splits the text into
//!   trimmed lines separated by block breaks,
//! - [`classify`] tags each line as metadata, a refrain marker, a verse
//!   marker, or plain content,
//! - [`segment`] runs the tagged lines through a small state machine and
//!   consolidates the refrain.

pub mod classify;
pub mod normalize;
pub mod segment;

pub use classify::{classify_line, LineKind};
pub use segment::segment;
