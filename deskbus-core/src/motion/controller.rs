//! Movement controller
//!
//! Tracks the last reported height and the requested target, and decides
//! once per control cycle whether another drive pulse is needed.
//!
//! # Usage
//!
//! ```ignore
//! let mut movement = MovementController::new();
//! movement.update_position(Height::new(50.0));
//! movement.move_to(Height::new(80.0));
//!
//! // Every control cycle:
//! if let Some(command) = movement.poll() {
//!     desk.write_all(command.encode().as_bytes())?;
//! }
//! ```
//!
//! The operation switches to raising/lowering as soon as a move is
//! requested, before the desk has reported any motion. The direction is
//! chosen once per request and never flips mid-move, so an overshoot ends
//! the move instead of reversing it.

use deskbus_protocol::{Command, Height};

use super::Operation;

/// Closed-loop movement towards a target height
#[derive(Debug, Clone)]
pub struct MovementController {
    /// Last height accepted from the desk
    current: Height,
    /// Target of the move in progress
    target: Option<Height>,
    /// Current operation
    operation: Operation,
}

impl Default for MovementController {
    fn default() -> Self {
        Self::new()
    }
}

impl MovementController {
    /// Create an idle controller at height 0
    pub const fn new() -> Self {
        Self {
            current: Height::new(0.0),
            target: None,
            operation: Operation::Idle,
        }
    }

    /// Last height accepted from the desk
    pub fn current_position(&self) -> Height {
        self.current
    }

    /// Target of the move in progress
    pub fn target_position(&self) -> Option<Height> {
        self.target
    }

    /// Current operation
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Check if a move is in progress
    pub fn is_moving(&self) -> bool {
        self.operation.is_moving()
    }

    /// Start moving towards `target`
    ///
    /// Replaces any move in progress. Returns the new operation.
    pub fn move_to(&mut self, target: Height) -> Operation {
        self.target = Some(target);
        self.operation = if target > self.current {
            Operation::Raising
        } else {
            Operation::Lowering
        };
        self.operation
    }

    /// Abandon the move in progress
    pub fn stop(&mut self) {
        self.target = None;
        self.operation = Operation::Idle;
    }

    /// Feed back a height reported by the desk
    pub fn update_position(&mut self, height: Height) {
        self.current = height;
    }

    /// Run one control step
    ///
    /// Returns the drive command to send this cycle, or `None` when idle or
    /// when the target has just been reached.
    pub fn poll(&mut self) -> Option<Command> {
        let target = self.target?;
        let reached = match self.operation {
            Operation::Idle => return None,
            Operation::Raising => self.current >= target,
            Operation::Lowering => self.current <= target,
        };

        if reached {
            self.stop();
            return None;
        }

        self.operation.direction().map(Command::Drive)
    }
}
