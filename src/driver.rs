//! Headless driver
//!
//! Runs a program to completion without any rendering, writing output to a
//! [`Write`] as soon as each step produces it. Output is drained after every
//! step, so whatever was printed before a fault or an interrupt has already
//! reached the writer.

use crate::interpreter::io::{HeadingSource, InputSource};
use crate::interpreter::{ExecutionState, StepOutcome, Stepper};
use std::io::{self, Write};

/// Step until `Terminated` or `Faulted`, streaming output to `out`.
///
/// A trailing newline is written once the run ends. The final outcome is
/// returned so the caller can report faults.
pub fn run_to_exit<I, H, W>(
    stepper: &mut Stepper<I, H>,
    state: &mut ExecutionState,
    out: &mut W,
) -> io::Result<StepOutcome>
where
    I: InputSource,
    H: HeadingSource,
    W: Write,
{
    let outcome = loop {
        let outcome = stepper.step(state);
        let text = state.drain_output();
        if !text.is_empty() {
            out.write_all(text.as_bytes())?;
            out.flush()?;
        }
        if outcome.is_final() {
            break outcome;
        }
    };
    writeln!(out)?;
    out.flush()?;
    Ok(outcome)
}
