/// Which collection an out-of-bounds index referred to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Dataset,
    Entry,
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexKind::Dataset => write!(f, "dataset"),
            IndexKind::Entry => write!(f, "entry"),
        }
    }
}

/// Errors reported by the chart engine.
///
/// None of these are fatal. Query paths degrade to `None`, zero ranges or an
/// identity transform; only explicit mutation APIs return them.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartError {
    /// An axis range with zero or negative width was requested.
    DegenerateRange { min: f64, max: f64 },

    /// A dataset had no entries to work with.
    EmptyDataset,

    /// A dataset or entry index no longer exists.
    OutOfBoundsIndex {
        kind: IndexKind,
        index: usize,
        len: usize,
    },

    /// A NaN or infinite value was passed where a finite one is required.
    NonFiniteValue(&'static str),

    /// The chart owning a command channel was dropped.
    ChannelDisconnected,
}

impl std::fmt::Display for ChartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartError::DegenerateRange { min, max } => {
                write!(f, "Degenerate axis range: [{}, {}]", min, max)
            }
            ChartError::EmptyDataset => write!(f, "Dataset has no entries"),
            ChartError::OutOfBoundsIndex { kind, index, len } => {
                write!(f, "{} index {} out of bounds (len {})", kind, index, len)
            }
            ChartError::NonFiniteValue(what) => write!(f, "Non-finite value for {}", what),
            ChartError::ChannelDisconnected => write!(f, "Chart command channel disconnected"),
        }
    }
}

impl std::error::Error for ChartError {}

/// Result type for chart operations.
pub type ChartResult<T> = Result<T, ChartError>;

/// Return `value` if finite, otherwise a [`ChartError::NonFiniteValue`] naming it.
pub(crate) fn ensure_finite(value: f64, what: &'static str) -> ChartResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ChartError::NonFiniteValue(what))
    }
}
