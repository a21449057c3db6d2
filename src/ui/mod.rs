//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]** — application state, keyboard event loop, auto-play timing, input mode
//! - **[`panes`]** — stateless render functions for each visible pane (program grid,
//!   stack, output, status bar)
//! - **[`theme`]** — centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a [`Stepper`] and an
//! [`ExecutionState`] and call [`App::run`] to start the event loop.
//!
//! [`Stepper`]: crate::interpreter::Stepper
//! [`ExecutionState`]: crate::interpreter::ExecutionState
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
