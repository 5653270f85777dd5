// Domain error taxonomy
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    /// No readings fall inside the selected range
    #[error("no readings in the selected range")]
    EmptyRange,

    /// The range has readings, but fewer than the computation needs
    #[error("at least {needed} readings are needed, the selected range has {found}")]
    InsufficientReadings { needed: usize, found: usize },

    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("unknown chart type: {0}")]
    UnknownChartKind(String),

    /// Load-time invariant violation, the store refuses the data
    #[error("invalid series at row {index}: {reason}")]
    InvalidSeries { index: usize, reason: String },
}
