//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`grid`]: Program grid with the cursor cell highlighted
//! - [`stack`]: Data stack, top first, as integers and characters
//! - [`output`]: Text printed by `.` and `,`, plus the input prompt
//! - [`status`]: Status bar with keybindings and execution state
//! - `utils`: Shared border and value formatting helpers
//!
//! Each pane module exports a primary `render_*` function taking a `Frame`,
//! a target `Rect`, and whatever borrowed data it needs.

mod utils;

pub mod grid;
pub mod output;
pub mod stack;
pub mod status;

pub use grid::{render_grid_pane, CursorStyle};
pub use output::{render_output_pane, PendingPrompt};
pub use stack::render_stack_pane;
pub use status::{render_status_bar, RunIndicator, StatusRenderData};
