//! Per-dataset fetch bookkeeping.
//!
//! A [`Dataset`] remembers the generation of the newest request issued for
//! it. A result is applied only if it answers that request; anything older
//! is a stale response and is dropped. Failures never clear data that is
//! already there.

use crate::error::FetchError;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// Sequence number of a request for one dataset. Zero means "never requested".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Uninitialized,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug)]
pub struct Dataset<T> {
    data: Option<Rc<T>>,
    status: LoadStatus,
    latest: Generation,
    last_error: Option<FetchError>,
}

impl<T> Default for Dataset<T> {
    fn default() -> Self {
        Self {
            data: None,
            status: LoadStatus::Uninitialized,
            latest: Generation::default(),
            last_error: None,
        }
    }
}

impl<T> Clone for Dataset<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            status: self.status,
            latest: self.latest,
            last_error: self.last_error.clone(),
        }
    }
}

impl<T: PartialEq> PartialEq for Dataset<T> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
            && self.status == other.status
            && self.latest == other.latest
            && self.last_error == other.last_error
    }
}

impl<T> Dataset<T> {
    /// Data of the last successful load, kept across later failures.
    pub fn data(&self) -> Option<&T> {
        self.data.as_deref()
    }

    pub fn shared(&self) -> Option<Rc<T>> {
        self.data.clone()
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn latest(&self) -> Generation {
        self.latest
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    /// Marks `generation` as the request whose answer will be applied.
    /// Requests older than the current one are ignored.
    pub fn request(&mut self, generation: Generation) {
        if generation <= self.latest {
            debug!(%generation, latest = %self.latest, "Ignoring out-of-order request marker");
            return;
        }
        self.latest = generation;
        self.status = LoadStatus::Loading;
    }

    /// Applies the outcome of request `generation`.
    ///
    /// Returns `false` when the outcome is stale and was dropped.
    pub fn resolve(&mut self, generation: Generation, outcome: Result<T, FetchError>) -> bool {
        if generation == Generation::default() || generation != self.latest {
            debug!(%generation, latest = %self.latest, "Discarding stale response");
            return false;
        }
        match outcome {
            Ok(value) => {
                self.data = Some(Rc::new(value));
                self.status = LoadStatus::Ready;
                self.last_error = None;
            }
            Err(err) => {
                self.status = LoadStatus::Failed;
                self.last_error = Some(err);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generations_count_up_from_never_requested() {
        let first = Generation::default().next();
        assert_eq!(first, Generation(1));
        assert!(first.next() > first);
    }

    #[test]
    fn newer_request_wins_over_late_older_response() {
        let mut dataset = Dataset::<u32>::default();
        dataset.request(Generation(1));
        dataset.request(Generation(2));

        assert!(dataset.resolve(Generation(2), Ok(20)));
        assert!(!dataset.resolve(Generation(1), Ok(10)));

        assert_eq!(dataset.data(), Some(&20));
        assert_eq!(dataset.status(), LoadStatus::Ready);
    }

    #[test]
    fn failure_keeps_previous_data() {
        let mut dataset = Dataset::<&str>::default();
        dataset.request(Generation(1));
        dataset.resolve(Generation(1), Ok("first"));

        dataset.request(Generation(2));
        dataset.resolve(Generation(2), Err(FetchError::network("connection refused")));

        assert_eq!(dataset.data(), Some(&"first"));
        assert_eq!(dataset.status(), LoadStatus::Failed);
        assert!(dataset.last_error().unwrap().is_network());
    }

    #[test]
    fn success_clears_last_error() {
        let mut dataset = Dataset::<u8>::default();
        dataset.request(Generation(1));
        dataset.resolve(Generation(1), Err(FetchError::malformed("bad json")));
        dataset.request(Generation(2));
        dataset.resolve(Generation(2), Ok(1));
        assert!(dataset.last_error().is_none());
    }

    #[test]
    fn unrequested_result_is_stale() {
        let mut dataset = Dataset::<u8>::default();
        assert!(!dataset.resolve(Generation(3), Ok(1)));
        assert_eq!(dataset.status(), LoadStatus::Uninitialized);
    }
}
