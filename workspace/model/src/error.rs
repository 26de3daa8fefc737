use thiserror::Error;

/// Why a fetch against the catalog API produced no usable data.
///
/// Both kinds are handled the same way by the dashboard: logged, recorded on
/// the dataset, and the previously held data is kept.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Host unreachable, transport error or a non-2xx status.
    #[error("Network failure: {0}")]
    Network(String),

    /// Body did not decode or violated an entity invariant.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    pub fn network(message: impl Into<String>) -> Self {
        FetchError::Network(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        FetchError::Malformed(message.into())
    }

    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Network(_))
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, FetchError::Malformed(_))
    }
}
