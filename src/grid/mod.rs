//! Program grid
//!
//! A [`Grid`] holds the program text as ragged rows of characters. Its logical
//! shape is fixed when the program is loaded:
//!
//! - width: length (in characters) of the longest row
//! - height: number of rows
//!
//! Rows shorter than the width are *virtually* padded with spaces. Reading past
//! the end of a short row yields `' '`; writing there materializes the padding
//! for that row only. The shape never changes after load, even as `p` rewrites
//! cells.

use thiserror::Error;

/// Character returned for cells beyond the end of a short row
pub const PADDING: char = ' ';

/// Access outside the logical `[0, width) x [0, height)` rectangle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("({x}, {y}) is outside the {width}x{height} program grid")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n'
            | '\r'
            | '\x0b'
            | '\x0c'
            | '\x1c'
            | '\x1d'
            | '\x1e'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Split on every Unicode line boundary, treating `\r\n` as one break.
/// A trailing break does not start an extra row.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + c.len_utf8();
        if c == '\r' {
            if let Some(&(j, '\n')) = chars.peek() {
                chars.next();
                start = j + 1;
            }
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Fixed-shape, mutable-content character grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<char>>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Split source text into rows on line boundaries. Never fails.
    pub fn load(text: &str) -> Self {
        let rows: Vec<Vec<char>> = split_lines(text)
            .into_iter()
            .map(|line| line.chars().collect())
            .collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let height = rows.len();
        Grid {
            rows,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True when there is no cell the cursor could occupy
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check that `(x, y)` is inside the grid and convert it to indices
    fn index(&self, x: i64, y: i64) -> Result<(usize, usize), GridError> {
        let out_of_bounds = || GridError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        };
        let col = usize::try_from(x).map_err(|_| out_of_bounds())?;
        let row = usize::try_from(y).map_err(|_| out_of_bounds())?;
        if col >= self.width || row >= self.height {
            return Err(out_of_bounds());
        }
        Ok((col, row))
    }

    /// Read the character at `(x, y)`, returning [`PADDING`] past the end of a short row
    pub fn read(&self, x: i64, y: i64) -> Result<char, GridError> {
        let (col, row) = self.index(x, y)?;
        Ok(self.rows[row].get(col).copied().unwrap_or(PADDING))
    }

    /// Replace the character at `(x, y)`, padding the row with spaces if needed
    pub fn write(&mut self, x: i64, y: i64, ch: char) -> Result<(), GridError> {
        let (col, row) = self.index(x, y)?;
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, PADDING);
        }
        cells[col] = ch;
        Ok(())
    }

    /// Stored (unpadded) characters of row `y`
    pub fn row(&self, y: usize) -> &[char] {
        self.rows.get(y).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Row `y` padded out to the full grid width, for display
    pub fn padded_row(&self, y: usize) -> impl Iterator<Item = char> + '_ {
        let cells = self.row(y);
        (0..self.width).map(move |x| cells.get(x).copied().unwrap_or(PADDING))
    }
}
