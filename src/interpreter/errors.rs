//! Fault types for the interpreter
//!
//! A [`Fault`] ends a run. It is reported by the stepper as
//! [`StepOutcome::Faulted`](super::engine::StepOutcome::Faulted) together with
//! the cursor position of the instruction that raised it.
//!
//! Malformed answers to `&` and `~` are *not* faults: they are retried inside
//! the instruction. Only a collaborator that cannot answer at all (closed
//! input) or an exhausted retry cap surfaces here.

use super::state::Position;
use thiserror::Error;

/// Broad classes of fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// Division or modulo by zero, or a value that is not a character code
    Structural,
    /// The cursor reached a character with no meaning
    UnsupportedInstruction,
    /// `p` targeted a cell outside the grid, or the grid has no cells
    OutOfBoundsAccess,
    /// The input collaborator could not supply an answer
    Input,
}

/// Fatal errors raised while executing an instruction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("'{instruction}' with a zero divisor at {position}")]
    DivisionByZero {
        instruction: char,
        position: Position,
    },

    #[error("'{instruction}' given {value}, which is not a valid character code, at {position}")]
    InvalidCodePoint {
        instruction: char,
        value: i64,
        position: Position,
    },

    #[error("Unsupported instruction '{instruction}' at {position}")]
    UnsupportedInstruction {
        instruction: char,
        position: Position,
    },

    #[error("'p' target ({x}, {y}) is outside the {width}x{height} grid, at {position}")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
        position: Position,
    },

    #[error("Program grid has no cells to execute")]
    EmptyProgram,

    #[error("No input available for '{instruction}' at {position}: {reason}")]
    InputUnavailable {
        instruction: char,
        reason: String,
        position: Position,
    },

    #[error("'{instruction}' received no valid input after {attempts} attempts at {position}")]
    InputAttemptsExceeded {
        instruction: char,
        attempts: usize,
        position: Position,
    },
}

impl Fault {
    pub fn kind(&self) -> FaultKind {
        match self {
            Fault::DivisionByZero { .. } | Fault::InvalidCodePoint { .. } => FaultKind::Structural,
            Fault::UnsupportedInstruction { .. } => FaultKind::UnsupportedInstruction,
            Fault::OutOfBounds { .. } | Fault::EmptyProgram => FaultKind::OutOfBoundsAccess,
            Fault::InputUnavailable { .. } | Fault::InputAttemptsExceeded { .. } => FaultKind::Input,
        }
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            Fault::DivisionByZero { position, .. } => Some(*position),
            Fault::InvalidCodePoint { position, .. } => Some(*position),
            Fault::UnsupportedInstruction { position, .. } => Some(*position),
            Fault::OutOfBounds { position, .. } => Some(*position),
            Fault::InputUnavailable { position, .. } => Some(*position),
            Fault::InputAttemptsExceeded { position, .. } => Some(*position),
            Fault::EmptyProgram => None,
        }
    }
}
