//! Placeholder for capabilities a board does not wire up

use core::convert::Infallible;

use crate::gpio::{InputPin, OutputPin};
use crate::uart::{UartRx, UartTx};

/// A transport or pin that is not connected
///
/// Never has data, swallows writes and reads low. The bridge uses it as the
/// type of capabilities that were never configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Unconnected;

impl UartTx for Unconnected {
    type Error = Infallible;

    fn write_all(&mut self, _data: &[u8]) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl UartRx for Unconnected {
    type Error = Infallible;

    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        Ok(0)
    }
}

impl OutputPin for Unconnected {
    fn set_high(&mut self) {}

    fn set_low(&mut self) {}
}

impl InputPin for Unconnected {
    fn is_high(&mut self) -> bool {
        false
    }
}
