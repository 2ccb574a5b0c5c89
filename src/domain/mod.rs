//! Domain types used throughout the lookup pipeline.
//!
//! This module defines:
//!
//! - the closed metal tier enumeration and region descriptors (`types`)
//! - the fixed-point plan rate (`rate`)
//! - raw CSV rows and their validated record forms (`records`)

pub mod rate;
pub mod records;
pub mod types;

pub use rate::*;
pub use records::*;
pub use types::*;
