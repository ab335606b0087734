//! Configuration types
//!
//! Board-agnostic bridge settings, stored as postcard binary data.

pub mod types;

pub use types::*;
