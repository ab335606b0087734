//! UART serial communication abstractions
//!
//! The bridge never blocks waiting for data: each control cycle it asks the
//! receiver whether a byte is ready and drains until it is not.

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Queue all of `data` for transmission
    ///
    /// Transmission is fire-and-forget: no acknowledgement is expected.
    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

/// UART receiver
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Check whether at least one byte can be read without blocking
    fn read_ready(&mut self) -> Result<bool, Self::Error>;

    /// Read a single byte
    ///
    /// Only called after [`read_ready`](Self::read_ready) returned `true`.
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Read a byte if one is available, without blocking
    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        if self.read_ready()? {
            self.read_byte().map(Some)
        } else {
            Ok(None)
        }
    }
}

/// Combined UART interface
///
/// Both buses are full duplex: the bridge reads from and writes to each.
pub trait Uart: UartTx + UartRx {}

// Blanket implementation
impl<T: UartTx + UartRx> Uart for T {}
