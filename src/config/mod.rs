//! JSON configuration for the demo tools.
pub mod dem;
