//! Closed-loop height control
//!
//! The desk has no "go to height" command. Movement is done by repeating
//! drive pulses until the height reported on the desk bus reaches the
//! target.

pub mod controller;
pub mod operation;

pub use controller::MovementController;
pub use operation::Operation;
