//! Interfaces between the core logic and its host
//!
//! The host owns scheduling. It creates a component, initializes it once
//! and then calls it periodically.

pub mod lifecycle;

pub use lifecycle::Component;
