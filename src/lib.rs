//! `slcsp` library crate.
//!
//! Computes the second lowest cost silver plan (SLCSP) rate for a list of
//! postal codes from two reference datasets: zipcode → rate area, and plan
//! rates by rate area and metal level.
//!
//! The binary (`slcsp`) is a thin wrapper around this library so the lookup
//! core is testable without spawning processes.

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod lookup;
pub mod report;
