//! Transforms applied around the node walk: AST rewrites before it, HTML
//! rewrites on raw HTML nodes and on the realized output.

pub mod breaks;
pub mod fence;
pub mod file_block;
pub mod raw_links;

pub use breaks::soft_breaks_to_hard;
pub use fence::{language_from_filename, wrap_in_fence};
pub use file_block::normalize_file_blocks;
pub use raw_links::{RawLinks, rewrite_raw_links};
