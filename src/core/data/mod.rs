//! Core data types shared by the checker and the scanner.
//!
//! ## Module Structure
//!
//! - `message`: Dictionary types (LocaleDictionary, MessageContext, MessageLocation)
//! - `source`: Source code types (SourceContext, SourceLocation, references)

pub mod message;
pub mod source;

pub use message::{LocaleDictionary, MessageContext, MessageLocation};
pub use source::{
    DynamicReference, Provenance, RawReference, SourceContext, SourceLocation, SourceReference,
};
