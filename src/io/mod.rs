//! Input/output helpers.
//!
//! - CSV ingest of reference data and the query list (`ingest`)
//! - results export (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
