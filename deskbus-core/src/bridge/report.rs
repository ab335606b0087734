//! Output of one control cycle

use deskbus_protocol::{Button, ButtonMask, Height};

use crate::motion::Operation;

/// What changed during one control cycle
///
/// Each field is `Some` only when the host should publish a new value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    /// New height from the desk display
    pub height: Option<Height>,
    /// Keypad button state from the last valid keypad frame
    pub buttons: Option<ButtonMask>,
    /// Operation, when it differs from the last reported one
    pub operation: Option<Operation>,
}

impl CycleReport {
    /// Whether nothing needs publishing
    pub fn is_empty(&self) -> bool {
        self.height.is_none() && self.buttons.is_none() && self.operation.is_none()
    }

    /// One boolean per keypad button, when buttons were reported
    pub fn button_states(&self) -> Option<[(Button, bool); 5]> {
        let mask = self.buttons?;
        Some(Button::ALL.map(|button| (button, mask.is_pressed(button))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        assert!(CycleReport::default().is_empty());
        assert_eq!(CycleReport::default().button_states(), None);
    }

    #[test]
    fn test_button_states() {
        let report = CycleReport {
            buttons: Some(ButtonMask::UP),
            ..Default::default()
        };
        assert!(!report.is_empty());

        let states = report.button_states().unwrap();
        assert_eq!(states[0], (Button::Up, true));
        assert!(states[1..].iter().all(|&(_, pressed)| !pressed));
    }
}
