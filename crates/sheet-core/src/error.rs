use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    /// The remote service answered HTTP 429.
    #[error("rate limited by the spreadsheet service")]
    RateLimited,
    #[error("sheet index {index} out of range, document has {count} sheet(s)")]
    SheetIndexOutOfRange { index: usize, count: usize },
    #[error("still rate limited after {attempts} attempt(s)")]
    RetriesExhausted { attempts: u32 },
    #[error(transparent)]
    Remote(#[from] anyhow::Error),
}

impl SheetError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, SheetError::RateLimited)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LadderError {
    #[error("cool-down ladder must have at least one step")]
    Empty,
    #[error("cool-down step {index} must be greater than zero")]
    ZeroStep { index: usize },
    #[error("cool-down step {index} ({value}s) is not greater than the step before it")]
    NotAscending { index: usize, value: u64 },
}
