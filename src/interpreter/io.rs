//! Injected collaborators
//!
//! The instruction set only touches the outside world in two places: `&`/`~`
//! ask for a line of input and `?` picks a random heading. Both go through the
//! traits here so the stepper stays deterministic under test.
//!
//! - [`InputSource`]: [`LinePrompt`] for interactive/headless runs,
//!   [`ScriptedInput`] for tests and the TUI
//! - [`HeadingSource`]: [`RandomHeadings`] (thread or seeded RNG),
//!   [`ScriptedHeadings`] for tests

use super::state::Heading;
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use rand::rngs::{StdRng, ThreadRng};
use rand::{RngExt, SeedableRng};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Supplies lines of text to `&` and `~`
pub trait InputSource {
    /// Block until a line is available. An `Err` means no answer will ever come.
    fn request_line(&mut self, prompt: &str) -> io::Result<String>;

    /// Told when the previous answer was rejected, before the next request
    fn reject(&mut self, _message: &str) {}
}

/// Chooses the heading for `?`
pub trait HeadingSource {
    fn choose_heading(&mut self) -> Heading;
}

impl<T: InputSource + ?Sized> InputSource for &mut T {
    fn request_line(&mut self, prompt: &str) -> io::Result<String> {
        (**self).request_line(prompt)
    }

    fn reject(&mut self, message: &str) {
        (**self).reject(message)
    }
}

impl<T: HeadingSource + ?Sized> HeadingSource for &mut T {
    fn choose_heading(&mut self) -> Heading {
        (**self).choose_heading()
    }
}

/// Writes a highlighted prompt and reads one line from a reader
pub struct LinePrompt<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        LinePrompt { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl LinePrompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on stdout, read from stdin
    pub fn stdio() -> Self {
        LinePrompt::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> InputSource for LinePrompt<R, W> {
    fn request_line(&mut self, prompt: &str) -> io::Result<String> {
        queue!(
            self.writer,
            Print("\n"),
            SetForegroundColor(Color::Yellow),
            Print(prompt),
            ResetColor
        )?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed",
            ));
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    fn reject(&mut self, message: &str) {
        // A failed notice must not abort the instruction; the next prompt retries.
        let _ = writeln!(self.writer, "{}", message);
        let _ = self.writer.flush();
    }
}

/// Answers from a queue of prepared lines
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
    prompts: Vec<String>,
    rejections: usize,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedInput {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            rejections: 0,
        }
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }

    /// Every prompt that was shown, in order
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// How many answers were rejected as invalid
    pub fn rejections(&self) -> usize {
        self.rejections
    }
}

impl InputSource for ScriptedInput {
    fn request_line(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_string());
        self.lines.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "input script exhausted")
        })
    }

    fn reject(&mut self, _message: &str) {
        self.rejections += 1;
    }
}

enum HeadingRng {
    Thread(ThreadRng),
    Seeded(StdRng),
}

/// Uniformly random headings
pub struct RandomHeadings {
    rng: HeadingRng,
}

impl RandomHeadings {
    /// Draw from the thread-local generator
    pub fn thread() -> Self {
        RandomHeadings {
            rng: HeadingRng::Thread(rand::rng()),
        }
    }

    /// Reproducible sequence for a given seed
    pub fn seeded(seed: u64) -> Self {
        RandomHeadings {
            rng: HeadingRng::Seeded(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomHeadings {
    fn default() -> Self {
        Self::thread()
    }
}

impl HeadingSource for RandomHeadings {
    fn choose_heading(&mut self) -> Heading {
        let index = match &mut self.rng {
            HeadingRng::Thread(rng) => rng.random_range(0..Heading::ALL.len()),
            HeadingRng::Seeded(rng) => rng.random_range(0..Heading::ALL.len()),
        };
        Heading::ALL[index]
    }
}

/// Replays a fixed sequence of headings, cycling when it runs out
#[derive(Debug, Clone)]
pub struct ScriptedHeadings {
    sequence: Vec<Heading>,
    next: usize,
}

impl ScriptedHeadings {
    pub fn new(sequence: Vec<Heading>) -> Self {
        ScriptedHeadings { sequence, next: 0 }
    }
}

impl HeadingSource for ScriptedHeadings {
    fn choose_heading(&mut self) -> Heading {
        if self.sequence.is_empty() {
            return Heading::Right;
        }
        let heading = self.sequence[self.next % self.sequence.len()];
        self.next += 1;
        heading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::constants::INVALID_INPUT_MESSAGE;

    #[test]
    fn test_line_prompt_strips_line_ending() {
        let mut prompt = LinePrompt::new(&b"42\r\nrest\n"[..], Vec::new());
        assert_eq!(prompt.request_line("> ").unwrap(), "42");
        assert_eq!(prompt.request_line("> ").unwrap(), "rest");
        let written = String::from_utf8(prompt.into_writer()).unwrap();
        assert!(written.contains("> "));
    }

    #[test]
    fn test_line_prompt_eof() {
        let mut prompt = LinePrompt::new(&b""[..], Vec::new());
        let err = prompt.request_line("> ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_line_prompt_reject_prints_message() {
        let mut prompt = LinePrompt::new(&b""[..], Vec::new());
        prompt.reject(INVALID_INPUT_MESSAGE);
        let written = String::from_utf8(prompt.into_writer()).unwrap();
        assert_eq!(written, "Invalid input\n");
    }

    #[test]
    fn test_scripted_input_records_prompts() {
        let mut input = ScriptedInput::new(["a"]);
        assert_eq!(input.request_line("first").unwrap(), "a");
        assert!(input.request_line("second").is_err());
        assert_eq!(input.prompts(), &["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn test_scripted_headings_cycle() {
        let mut headings = ScriptedHeadings::new(vec![Heading::Up, Heading::Left]);
        assert_eq!(headings.choose_heading(), Heading::Up);
        assert_eq!(headings.choose_heading(), Heading::Left);
        assert_eq!(headings.choose_heading(), Heading::Up);
    }

    #[test]
    fn test_seeded_headings_are_reproducible() {
        let mut a = RandomHeadings::seeded(7);
        let mut b = RandomHeadings::seeded(7);
        let first: Vec<Heading> = (0..32).map(|_| a.choose_heading()).collect();
        let second: Vec<Heading> = (0..32).map(|_| b.choose_heading()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_random_headings_cover_all_directions() {
        let mut headings = RandomHeadings::seeded(1);
        let seen: std::collections::HashSet<Heading> =
            (0..200).map(|_| headings.choose_heading()).collect();
        assert_eq!(seen.len(), 4);
    }
}
