use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("amount `{value}` must have exactly 3 decimal digits")]
    InvalidPrecision { value: String },
    #[error("amount `{value}` is not a valid decimal")]
    InvalidAmount { value: String },
    #[error("date `{value}` must be of the form YYYY-MM-DD or YYYYMMDD")]
    InvalidDate { value: String },
}
