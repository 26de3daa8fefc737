#[allow(clippy::module_inception)]
pub mod layout;
pub mod navbar;
