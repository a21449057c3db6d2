//! Mutable run context
//!
//! [`ExecutionState`] is everything that changes while a program runs: the data
//! stack, the cursor and its heading, string mode, and the output accumulator.
//! It owns the [`Grid`] being executed so that `p` has exactly one mutable
//! buffer to write into.

use crate::grid::Grid;
use std::fmt;

/// Direction the cursor moves after each instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    Right,
    Down,
    Left,
    Up,
}

impl Heading {
    /// All headings, in the order `?` draws from
    pub const ALL: [Heading; 4] = [Heading::Right, Heading::Down, Heading::Left, Heading::Up];

    /// Unit step `(dx, dy)` for this heading
    pub fn delta(self) -> (i64, i64) {
        match self {
            Heading::Right => (1, 0),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
            Heading::Up => (0, -1),
        }
    }

    /// Arrow glyph used by the status bar
    pub fn arrow(self) -> char {
        match self {
            Heading::Right => '→',
            Heading::Down => '↓',
            Heading::Left => '←',
            Heading::Up => '↑',
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Heading::Right => "right",
            Heading::Down => "down",
            Heading::Left => "left",
            Heading::Up => "up",
        };
        f.write_str(name)
    }
}

/// Grid coordinate of the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Persistent run status. Faults are reported per step, not stored here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    Terminated,
}

/// Accumulates text emitted by `.` and `,` until the driver drains it
#[derive(Debug, Clone, Default)]
pub struct OutputBuffer {
    fragments: Vec<String>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        OutputBuffer {
            fragments: Vec::new(),
        }
    }

    pub fn push(&mut self, text: String) {
        self.fragments.push(text);
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.iter().all(String::is_empty)
    }

    /// Everything accumulated so far, without clearing
    pub fn contents(&self) -> String {
        self.fragments.concat()
    }

    /// Return the accumulated text and clear the buffer
    pub fn drain(&mut self) -> String {
        let text = self.fragments.concat();
        self.fragments.clear();
        text
    }
}

/// The state of one program run
#[derive(Debug, Clone)]
pub struct ExecutionState {
    grid: Grid,
    stack: Vec<i64>,
    cursor: Position,
    heading: Heading,
    string_mode: bool,
    output: OutputBuffer,
    status: RunStatus,
    steps: u64,
}

impl ExecutionState {
    /// Fresh state at `(0, 0)` heading right, with an empty stack
    pub fn new(grid: Grid) -> Self {
        ExecutionState {
            grid,
            stack: Vec::new(),
            cursor: Position::default(),
            heading: Heading::Right,
            string_mode: false,
            output: OutputBuffer::new(),
            status: RunStatus::Running,
            steps: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn push_value(&mut self, value: i64) {
        self.stack.push(value);
    }

    /// Pop the top value; an empty stack yields 0 and stays empty
    pub fn pop_value(&mut self) -> i64 {
        self.stack.pop().unwrap_or(0)
    }

    /// Stack contents, bottom first
    pub fn stack(&self) -> &[i64] {
        &self.stack
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn set_heading(&mut self, heading: Heading) {
        self.heading = heading;
    }

    pub fn is_string_mode(&self) -> bool {
        self.string_mode
    }

    pub fn toggle_string_mode(&mut self) {
        self.string_mode = !self.string_mode;
    }

    pub fn emit_text(&mut self, text: impl Into<String>) {
        self.output.push(text.into());
    }

    /// Return everything emitted since the last drain and clear the buffer
    pub fn drain_output(&mut self) -> String {
        self.output.drain()
    }

    pub fn output(&self) -> &OutputBuffer {
        &self.output
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub(crate) fn mark_terminated(&mut self) {
        self.status = RunStatus::Terminated;
    }

    /// Number of completed (`Continue`) steps
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub(crate) fn count_step(&mut self) {
        self.steps += 1;
    }

    /// Character under the cursor, or `None` on an empty grid
    pub fn current_instruction(&self) -> Option<char> {
        self.grid
            .read(self.cursor.x as i64, self.cursor.y as i64)
            .ok()
    }

    /// Move the cursor one cell along the heading, wrapping at the grid edges
    pub fn advance(&mut self) {
        let width = self.grid.width() as i64;
        let height = self.grid.height() as i64;
        if width == 0 || height == 0 {
            return;
        }
        let (dx, dy) = self.heading.delta();
        let x = (self.cursor.x as i64 + dx).rem_euclid(width);
        let y = (self.cursor.y as i64 + dy).rem_euclid(height);
        self.cursor = Position::new(x as usize, y as usize);
    }
}
