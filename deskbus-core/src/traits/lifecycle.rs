//! Component lifecycle

use core::fmt;

/// A unit of logic driven by an external scheduler
///
/// Every call must return promptly: a component never blocks and never
/// sleeps. How often [`on_cycle`](Component::on_cycle) runs is entirely
/// up to the host.
pub trait Component {
    /// What one cycle produced, for the host to publish
    type Report;

    /// One-time setup after construction, before the first cycle
    fn initialize(&mut self);

    /// Run one control cycle
    fn on_cycle(&mut self) -> Self::Report;

    /// Write a human-readable summary of the configuration
    fn describe(&self, out: &mut dyn fmt::Write) -> fmt::Result;
}
