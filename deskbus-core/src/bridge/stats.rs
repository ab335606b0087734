//! Bus health counters

/// Counters for both buses since start-up
///
/// All counters saturate instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    /// Desk frames that changed the reported height
    pub height_updates: u32,
    /// Desk frames rejected for a bad checksum
    pub desk_checksum_errors: u32,
    /// Desk frames dropped quietly (other types, blank, not digits)
    pub desk_discarded: u32,
    /// Valid keypad frames
    pub remote_frames: u32,
    /// Keypad frames rejected for a bad checksum
    pub remote_checksum_errors: u32,
    /// Raw bytes copied between the buses
    pub bytes_forwarded: u32,
    /// Command frames written to the desk
    pub commands_sent: u32,
    /// Failed reads or writes on either transport
    pub transport_errors: u32,
}

impl LinkStats {
    /// Total frames rejected for a bad checksum on either bus
    pub fn checksum_errors(&self) -> u32 {
        self.desk_checksum_errors
            .saturating_add(self.remote_checksum_errors)
    }
}

/// Saturating increment
pub(crate) fn bump(counter: &mut u32) {
    *counter = counter.saturating_add(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bump_saturates() {
        let mut counter = u32::MAX - 1;
        bump(&mut counter);
        bump(&mut counter);
        assert_eq!(counter, u32::MAX);
    }

    #[test]
    fn test_checksum_errors_sum() {
        let stats = LinkStats {
            desk_checksum_errors: 2,
            remote_checksum_errors: 3,
            ..Default::default()
        };
        assert_eq!(stats.checksum_errors(), 5);
    }
}
