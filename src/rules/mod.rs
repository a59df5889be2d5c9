//! Rule implementations.
//!
//! Pure functions over already-loaded data. Each takes only the inputs it
//! needs (not a full context) and returns plain results or issues.
//!
//! ## Module Structure
//!
//! - `consistency`: Missing/extra/empty keys between two dictionaries
//! - `exposure`: EXPOSED/COVERED/VALID classification with deduplication
//! - `unused`: Reference-locale keys never referenced statically

pub mod consistency;
pub mod exposure;
pub mod unused;
