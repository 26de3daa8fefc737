//! Entities received from the catalog API.
//!
//! Each one is built from its wire DTO in `common` through `TryFrom`, which
//! is where shape invariants are checked. A violation is reported as
//! [`FetchError::Malformed`](crate::FetchError::Malformed).

pub mod aggregate;
pub mod catalog;
pub mod content;
