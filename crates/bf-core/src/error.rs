use thiserror::Error;

pub type BfResult<T> = Result<T, BfError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BfError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Negative value for {what}: {value}")]
    Negative { what: &'static str, value: f64 },

    #[error("Invariant violated: {what}")]
    Invariant { what: String },
}
