//! keycheck - translation key checker for i18next-style projects
//!
//! Two independent analyses over `<locale>/<namespace>.json` dictionaries:
//! the checker compares every locale against a reference locale, and the
//! scanner finds keys referenced in source that the dictionaries lack.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands and console reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Loading, extraction, resolution and write-back
//! - `issues`: Issue type definitions and reporting
//! - `rules`: Comparison and classification rules

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod rules;
