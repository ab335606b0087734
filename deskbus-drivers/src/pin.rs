//! Digital pin adapters
//!
//! The bridge treats its signal lines as infallible. These wrappers take an
//! `embedded-hal` pin, swallow its errors and count them instead. A failed
//! input sample reads as low.

use deskbus_hal::{InputPin, OutputPin};
use embedded_hal::digital;

/// Output line on top of an `embedded-hal` pin
pub struct HalOutputPin<P> {
    pin: P,
    faults: u32,
}

impl<P: digital::OutputPin> HalOutputPin<P> {
    /// Wrap a pin
    pub fn new(pin: P) -> Self {
        Self { pin, faults: 0 }
    }

    /// Number of writes the pin rejected
    pub fn faults(&self) -> u32 {
        self.faults
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: digital::OutputPin> OutputPin for HalOutputPin<P> {
    fn set_high(&mut self) {
        if self.pin.set_high().is_err() {
            self.faults = self.faults.saturating_add(1);
        }
    }

    fn set_low(&mut self) {
        if self.pin.set_low().is_err() {
            self.faults = self.faults.saturating_add(1);
        }
    }
}

/// Input line on top of an `embedded-hal` pin
pub struct HalInputPin<P> {
    pin: P,
    faults: u32,
}

impl<P: digital::InputPin> HalInputPin<P> {
    /// Wrap a pin
    pub fn new(pin: P) -> Self {
        Self { pin, faults: 0 }
    }

    /// Number of samples the pin failed to take
    pub fn faults(&self) -> u32 {
        self.faults
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: digital::InputPin> InputPin for HalInputPin<P> {
    fn is_high(&mut self) -> bool {
        match self.pin.is_high() {
            Ok(level) => level,
            Err(_) => {
                self.faults = self.faults.saturating_add(1);
                false
            }
        }
    }
}
