//! Reference data lookup.
//!
//! Responsibilities:
//!
//! - build the postal code and plan rate indices from validated rows
//! - resolve a queried postal code to its second lowest distinct rate

pub mod index;
pub mod resolver;

pub use index::*;
pub use resolver::*;
