//! Error types.
//!
//! Two layers:
//!
//! - typed library errors (`ValidationError`, `IndexError`, `LookupError`) that
//!   callers can match on
//! - `AppError`, the process boundary error carrying an exit code

use thiserror::Error;

use crate::domain::{MetalTier, PlanKey};

/// Exit code for unreadable inputs, bad query files, and failed exports.
pub const EXIT_IO: u8 = 2;
/// Exit code for reference data that fails validation.
pub const EXIT_INVALID_DATA: u8 = 3;

/// A single reference row failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required column `{field}`")]
    MissingField { field: &'static str },

    #[error("state code must be a 2 letter abbreviation, got '{value}'")]
    InvalidStateCode { value: String },

    #[error("`{field}` must be a non-negative integer, got '{value}'")]
    InvalidNumericField { field: &'static str, value: String },

    #[error("'{value}' is not a valid metal level; allowed values are {allowed}")]
    InvalidMetalTier { value: String, allowed: String },

    #[error("rate must be a positive decimal, got '{value}'")]
    InvalidRate { value: String },
}

/// Which reference dataset a row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Zips,
    Plans,
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dataset::Zips => f.write_str("zips"),
            Dataset::Plans => f.write_str("plans"),
        }
    }
}

/// Index construction aborted on the first invalid row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{dataset} line {line}: {source}")]
pub struct IndexError {
    pub dataset: Dataset,
    /// 1-based line in the source CSV (the header is line 1).
    pub line: usize,
    #[source]
    pub source: ValidationError,
}

/// Why a single query produced no rate. None of these stop the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("zipcode '{raw}' is not a valid integer")]
    InvalidPostalCode { raw: String },

    #[error("zipcode {postal_code} does not exist in our dataset")]
    UnknownPostalCode { postal_code: u32 },

    #[error("medical plan data does not exist for zipcode {postal_code} (lookup key {key})")]
    NoRatesForRegion { postal_code: u32, key: PlanKey },

    #[error(
        "cannot determine second lowest {tier} rate for zipcode {postal_code}: only {distinct} distinct rate(s) available"
    )]
    Undeterminable {
        postal_code: u32,
        tier: MetalTier,
        distinct: usize,
    },
}

impl LookupError {
    /// Short stable label used for summary counts.
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::InvalidPostalCode { .. } => "invalid_postal_code",
            LookupError::UnknownPostalCode { .. } => "unknown_postal_code",
            LookupError::NoRatesForRegion { .. } => "no_rates_for_region",
            LookupError::Undeterminable { .. } => "undeterminable",
        }
    }
}

/// Process-level error: a message plus the exit code `main` should return.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<IndexError> for AppError {
    fn from(err: IndexError) -> Self {
        AppError::new(EXIT_INVALID_DATA, format!("Invalid reference data: {err}"))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
