use thiserror::Error;

pub type Result<T> = std::result::Result<T, QueryError>;

/// Faults that can escape the data layer during a query. The dispatcher
/// folds every one of these into a success=false envelope; none of them
/// becomes a transport-level error.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The active-balance sheet could not be located in the workbook.
    #[error("Aba principal não encontrada")]
    MissingPrimarySheet,

    #[error(transparent)]
    Source(#[from] anyhow::Error),
}
