//! Befunge execution engine
//!
//! This module provides the core execution logic:
//! - [`state`]: The mutable run context (stack, cursor, heading, output)
//! - [`instructions`]: Character-to-effect dispatch
//! - [`engine`]: The [`Stepper`](engine::Stepper) fetch-execute-advance cycle
//! - [`io`]: Injected input and randomness collaborators
//! - [`errors`]: Fault types
//!
//! # Execution Model
//!
//! A driver creates an [`ExecutionState`](state::ExecutionState) from a loaded
//! [`Grid`](crate::grid::Grid) and calls `step` until it gets back
//! `Terminated` or `Faulted`. Output accumulates on the state and can be
//! drained at any point, including after a fault.

pub mod constants;
pub mod engine;
pub mod errors;
pub mod instructions;
pub mod io;
pub mod state;

pub use engine::{create_initial_state, load_program, StepOutcome, Stepper, StepperConfig};
pub use errors::{Fault, FaultKind};
pub use state::{ExecutionState, Heading, Position, RunStatus};
