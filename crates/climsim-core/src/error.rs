use thiserror::Error;

/// Errors raised for inputs the calculation core cannot interpret.
///
/// Expected gaps in the data (a year missing from a series, a region with no
/// matching cities) are not errors; they yield zeroed results instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClimateError {
    #[error("Unknown scenario '{0}'. Expected one of: optimistic, moderate, pessimistic")]
    UnknownScenario(String),
    #[error("Unknown energy source '{0}'")]
    UnknownEnergySource(String),
    #[error("Unknown energy preset '{0}'. Expected one of: renewable, mixed, fossil")]
    UnknownPreset(String),
    #[error("Percentage for {source_name} must be a finite value in [0, 100], got {value}")]
    PercentageOutOfRange { source_name: String, value: f64 },
    #[error("Invalid year range {start}..={end} with step {step}")]
    InvalidYearRange { start: i32, end: i32, step: i32 },
    #[error("Invalid dashboard state: {0}")]
    InvalidState(String),
}

/// Convenience type for `Result<T, ClimateError>`.
pub type ClimateResult<T> = Result<T, ClimateError>;
