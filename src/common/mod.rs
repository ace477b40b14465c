//!
//! Common utilities across lexing and syntax-parsing.
//!

pub mod location;
pub mod source;

pub use location::*;
pub use source::*;
