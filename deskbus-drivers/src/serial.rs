//! Serial port adapter
//!
//! Wraps any blocking `embedded-io` port that can report read readiness.
//! The bridge only reads after [`ReadReady::read_ready`] says a byte is
//! waiting, so the wrapped port never blocks the control cycle.

use core::fmt;

use deskbus_hal::{UartRx, UartTx};
use embedded_io::{Read, ReadReady, Write};

/// Errors from a wrapped serial port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerialError<E> {
    /// The underlying port failed
    Io(E),
    /// The port reported ready but returned no data
    EndOfStream,
}

impl<E: fmt::Debug> fmt::Display for SerialError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerialError::Io(err) => write!(f, "serial I/O error: {:?}", err),
            SerialError::EndOfStream => write!(f, "serial port closed"),
        }
    }
}

/// Desk or keypad bus on top of an `embedded-io` port
pub struct SerialPort<T> {
    inner: T,
}

impl<T> SerialPort<T> {
    /// Wrap a port
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Get the wrapped port
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Release the wrapped port
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Write> UartTx for SerialPort<T> {
    type Error = SerialError<T::Error>;

    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.write_all(data).map_err(SerialError::Io)
    }
}

impl<T: Read + ReadReady> UartRx for SerialPort<T> {
    type Error = SerialError<T::Error>;

    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        self.inner.read_ready().map_err(SerialError::Io)
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut byte = [0u8; 1];
        match self.inner.read(&mut byte).map_err(SerialError::Io)? {
            0 => Err(SerialError::EndOfStream),
            _ => Ok(byte[0]),
        }
    }
}
