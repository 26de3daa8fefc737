use model::{DatasetKind, Generation};
use std::cell::Cell;

/// Hands out increasing request generations, one sequence per dataset.
///
/// Lives next to the controller rather than in the state so a generation is
/// known before the request marker is dispatched.
#[derive(Debug, Default)]
pub struct RequestTracker {
    issued: [Cell<u64>; DatasetKind::ALL.len()],
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self, dataset: DatasetKind) -> Generation {
        let counter = &self.issued[dataset.index()];
        let next = Generation(counter.get()).next();
        counter.set(next.0);
        next
    }

    /// Most recent generation issued for `dataset`.
    pub fn latest(&self, dataset: DatasetKind) -> Generation {
        Generation(self.issued[dataset.index()].get())
    }
}
