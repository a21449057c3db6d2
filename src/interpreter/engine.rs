// Fetch-execute-advance stepping

use super::errors::Fault;
use super::instructions::{execute, Collaborators, Flow};
use super::io::{HeadingSource, InputSource};
use super::state::{ExecutionState, RunStatus};
use crate::grid::Grid;

/// Result of a single [`Stepper::step`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The instruction ran and the cursor moved on
    Continue,
    /// `@` was reached; the state stays terminated
    Terminated,
    /// The run cannot continue
    Faulted(Fault),
}

impl StepOutcome {
    pub fn is_final(&self) -> bool {
        !matches!(self, StepOutcome::Continue)
    }
}

/// Tunables for a [`Stepper`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepperConfig {
    /// Rejected answers tolerated per `&`/`~` before faulting (`None` = unlimited)
    pub max_input_attempts: Option<usize>,
}

/// Load program text into a grid
pub fn load_program(text: &str) -> Grid {
    Grid::load(text)
}

/// Fresh execution state for `grid`
pub fn create_initial_state(grid: Grid) -> ExecutionState {
    ExecutionState::new(grid)
}

/// Drives an [`ExecutionState`] one instruction at a time
pub struct Stepper<I, H> {
    input: I,
    headings: H,
    config: StepperConfig,
}

impl<I: InputSource, H: HeadingSource> Stepper<I, H> {
    pub fn new(input: I, headings: H) -> Self {
        Stepper {
            input,
            headings,
            config: StepperConfig::default(),
        }
    }

    pub fn with_config(mut self, config: StepperConfig) -> Self {
        self.config = config;
        self
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Execute the instruction under the cursor and, unless it halted or
    /// faulted, advance one cell along the heading (wrapping at the edges).
    ///
    /// A faulted step leaves the cursor on the offending instruction.
    pub fn step(&mut self, state: &mut ExecutionState) -> StepOutcome {
        if state.status() == RunStatus::Terminated {
            return StepOutcome::Terminated;
        }

        let instruction = match state.current_instruction() {
            Some(instruction) => instruction,
            None => return StepOutcome::Faulted(Fault::EmptyProgram),
        };

        let mut io = Collaborators {
            input: &mut self.input,
            headings: &mut self.headings,
            max_input_attempts: self.config.max_input_attempts,
        };

        match execute(state, instruction, &mut io) {
            Ok(Flow::Proceed) => {
                state.advance();
                state.count_step();
                StepOutcome::Continue
            }
            Ok(Flow::Halt) => {
                state.mark_terminated();
                StepOutcome::Terminated
            }
            Err(fault) => StepOutcome::Faulted(fault),
        }
    }

    /// Step until the run ends or `max_steps` steps have completed.
    /// Returns `Continue` only when the step budget ran out.
    pub fn run(&mut self, state: &mut ExecutionState, max_steps: Option<u64>) -> StepOutcome {
        let mut taken = 0;
        loop {
            if max_steps.is_some_and(|max| taken >= max) {
                return StepOutcome::Continue;
            }
            let outcome = self.step(state);
            if outcome.is_final() {
                return outcome;
            }
            taken += 1;
        }
    }
}
