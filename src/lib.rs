//! # Introduction
//!
//! befx runs programs written in Befunge-93, a two-dimensional stack language.
//! Source code is a grid of characters; a cursor walks the grid in one of four
//! directions and each character it lands on manipulates a stack of integers,
//! turns the cursor, reads or writes text, or rewrites the grid itself.
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Grid → ExecutionState ⇄ Stepper → output (headless or TUI)
//! ```
//!
//! 1. [`grid`] — fixed-shape, mutable character grid with virtual padding.
//! 2. [`interpreter`] — execution state, instruction dispatch, and the
//!    [`Stepper`](interpreter::Stepper) that advances the cursor.
//! 3. [`driver`] — headless loop that streams output to a writer.
//! 4. [`ui`] — ratatui-based animated view; not part of the stable library API.
//!
//! ## Instruction set
//!
//! Arithmetic `+ - * / %`, logic `` ! ` ``, movement `> v < ^ ? #`, branches
//! `_ |`, string mode `"`, stack `: \ $`, output `. ,`, grid access `g p`,
//! input `& ~`, digits `0-9`, and `@` to stop.

pub mod driver;
pub mod grid;
pub mod interpreter;
pub mod ui;
