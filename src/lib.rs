// src/lib.rs
//
// linefold: rejoin one-sentence-per-line Markdown prose into paragraphs.
//
// Authors who keep one sentence per line get clean diffs, but typesetters turn
// each of those breaks into a visible space. This crate removes the soft wraps
// and leaves every break that means something alone: front matter, fenced
// code, list items, blank lines and lines ending in full-width `？` or `！`.

pub mod error;
pub mod fold;
pub mod line;
pub mod stream;

pub use error::{Error, Result};
pub use fold::{fold, fold_str, FoldSummary, LineFolder, Mode};
pub use stream::{fold_file, fold_stream};
