//! Admin services.

pub mod passwords;
pub mod sessions;
