//! What the desk is currently being asked to do

use core::fmt;

use deskbus_protocol::Direction;

/// Current operation of the movement controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Operation {
    /// No move in progress
    #[default]
    Idle,
    /// Driving up towards the target
    Raising,
    /// Driving down towards the target
    Lowering,
}

impl Operation {
    /// Upper-case name, as shown to the host
    pub const fn as_str(self) -> &'static str {
        match self {
            Operation::Idle => "IDLE",
            Operation::Raising => "RAISING",
            Operation::Lowering => "LOWERING",
        }
    }

    /// Check if a move is in progress
    pub fn is_moving(&self) -> bool {
        !matches!(self, Operation::Idle)
    }

    /// Drive direction of this operation
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Operation::Idle => None,
            Operation::Raising => Some(Direction::Up),
            Operation::Lowering => Some(Direction::Down),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
