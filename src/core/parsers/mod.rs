//! File parsers for source code and dictionary files.
//!
//! - `json`: Locale dictionary loader and key-path flattener
//! - `source`: Line-based translation reference extractor (TS/TSX/JS/JSX)

pub mod json;
pub mod source;
