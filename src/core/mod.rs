//! Core analysis engine.
//!
//! ## Module Structure
//!
//! - `data`: Dictionary and source reference types
//! - `parsers`: JSON dictionary loading and line-based source extraction
//! - `resolve`: Raw key to (namespace, key) resolution
//! - `context`: Per-run context (config, locales, reference key index)
//! - `extract`: Parallel per-file extraction over the source tree
//! - `json_writer`: Write-back of missing keys in fix mode
//! - `report`: Serializable report documents for `--json`

pub mod context;
pub mod data;
pub mod extract;
pub mod file_scanner;
pub mod json_writer;
pub mod parsers;
pub mod report;
pub mod resolve;

pub use context::{CheckContext, KeyIndex};
pub use data::*;
