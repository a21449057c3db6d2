//! Main TUI application state and logic

use crate::interpreter::constants::{CHARACTER_PROMPT, INTEGER_PROMPT, INVALID_INPUT_MESSAGE};
use crate::interpreter::instructions::{needs_input, parse_character_input, parse_integer_input};
use crate::interpreter::io::{HeadingSource, ScriptedInput};
use crate::interpreter::{ExecutionState, RunStatus, StepOutcome, Stepper, StepperConfig};
use crate::ui::panes::{
    render_grid_pane, render_output_pane, render_stack_pane, render_status_bar, CursorStyle,
    PendingPrompt, RunIndicator, StatusRenderData,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Grid,
    Output,
    Stack,
}

impl FocusedPane {
    /// Move focus to the next pane (grid -> output -> stack)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Grid => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Stack,
            FocusedPane::Stack => FocusedPane::Grid,
        }
    }
}

/// A line being typed for `&` or `~`
#[derive(Debug, Clone)]
struct InputMode {
    instruction: char,
    buffer: String,
}

impl InputMode {
    fn prompt(&self) -> &'static str {
        if self.instruction == '&' {
            INTEGER_PROMPT
        } else {
            CHARACTER_PROMPT
        }
    }

    fn is_valid(&self) -> bool {
        if self.instruction == '&' {
            parse_integer_input(&self.buffer).is_some()
        } else {
            parse_character_input(&self.buffer).is_some()
        }
    }
}

/// The main application state
pub struct App<H> {
    /// Stepper fed by lines typed into the output pane
    stepper: Stepper<ScriptedInput, H>,

    state: ExecutionState,

    /// Everything drained from the state so far
    transcript: String,

    focused_pane: FocusedPane,
    stack_scroll: usize,
    output_scroll: usize,

    /// Time between steps while playing
    frame_interval: Duration,

    is_playing: bool,
    last_step_time: Instant,

    /// Last time space was pressed (for debouncing)
    last_space_press: Instant,

    status_message: String,

    /// Set once the run terminated or faulted
    final_outcome: Option<StepOutcome>,

    input_mode: Option<InputMode>,

    should_quit: bool,
}

impl<H: HeadingSource> App<H> {
    pub fn new(state: ExecutionState, headings: H, config: StepperConfig, framerate: u32) -> Self {
        let now = Instant::now();
        App {
            stepper: Stepper::new(ScriptedInput::default(), headings).with_config(config),
            state,
            transcript: String::new(),
            focused_pane: FocusedPane::Grid,
            stack_scroll: 0,
            output_scroll: usize::MAX,
            frame_interval: Duration::from_secs(1) / framerate.max(1),
            is_playing: true,
            last_step_time: now,
            last_space_press: now.checked_sub(Duration::from_secs(1)).unwrap_or(now),
            status_message: String::from("Playing..."),
            final_outcome: None,
            input_mode: None,
            should_quit: false,
        }
    }

    pub fn state(&self) -> &ExecutionState {
        &self.state
    }

    /// All output produced so far
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn outcome(&self) -> Option<&StepOutcome> {
        self.final_outcome.as_ref()
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn is_awaiting_input(&self) -> bool {
        self.input_mode.is_some()
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let poll_timeout = self.frame_interval.min(Duration::from_millis(50));
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_playing && self.last_step_time.elapsed() >= self.frame_interval {
                self.step_once();
                self.last_step_time = Instant::now();
            }

            if event::poll(poll_timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(main_chunks[0]);

        // Left column: Grid (top) | Output (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[0]);

        let cursor_style = match (&self.final_outcome, &self.input_mode) {
            (Some(StepOutcome::Faulted(_)), _) => CursorStyle::Fault,
            (_, Some(_)) => CursorStyle::Input,
            _ => CursorStyle::Normal,
        };

        render_grid_pane(
            frame,
            left_rows[0],
            self.state.grid(),
            self.state.cursor(),
            cursor_style,
            self.focused_pane == FocusedPane::Grid,
        );

        let prompt = self.input_mode.as_ref().map(|mode| PendingPrompt {
            prompt: mode.prompt(),
            buffer: &mode.buffer,
        });
        render_output_pane(
            frame,
            left_rows[1],
            &self.transcript,
            prompt,
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
        );

        render_stack_pane(
            frame,
            columns[1],
            self.state.stack(),
            self.focused_pane == FocusedPane::Stack,
            &mut self.stack_scroll,
        );

        render_status_bar(
            frame,
            main_chunks[1],
            StatusRenderData {
                message: &self.status_message,
                steps: self.state.steps(),
                heading: self.state.heading(),
                string_mode: self.state.is_string_mode(),
                indicator: self.indicator(),
            },
        );
    }

    fn indicator(&self) -> RunIndicator {
        match &self.final_outcome {
            Some(StepOutcome::Faulted(_)) => RunIndicator::Faulted,
            Some(_) => RunIndicator::Finished,
            None if self.input_mode.is_some() => RunIndicator::Input,
            None if self.is_playing => RunIndicator::Playing,
            None => RunIndicator::Paused,
        }
    }

    /// True when the next step would ask for input that has not been typed yet
    fn needs_typed_input(&self) -> bool {
        self.state.status() == RunStatus::Running
            && !self.state.is_string_mode()
            && self.stepper.input().remaining() == 0
            && self.state.current_instruction().is_some_and(needs_input)
    }

    /// Take one step. Returns false if nothing was executed.
    fn step_once(&mut self) -> bool {
        if self.final_outcome.is_some() || self.input_mode.is_some() {
            return false;
        }

        if self.needs_typed_input() {
            if let Some(instruction) = self.state.current_instruction() {
                self.input_mode = Some(InputMode {
                    instruction,
                    buffer: String::new(),
                });
                self.status_message = "Waiting for input".to_string();
                self.output_scroll = usize::MAX;
            }
            return false;
        }

        let outcome = self.stepper.step(&mut self.state);
        self.collect_output();

        match outcome {
            StepOutcome::Continue => true,
            StepOutcome::Terminated => {
                self.is_playing = false;
                self.status_message = "Program finished".to_string();
                self.final_outcome = Some(StepOutcome::Terminated);
                true
            }
            StepOutcome::Faulted(fault) => {
                self.is_playing = false;
                self.status_message = format!("Fault: {}", fault);
                self.final_outcome = Some(StepOutcome::Faulted(fault));
                false
            }
        }
    }

    fn collect_output(&mut self) {
        let text = self.state.drain_output();
        if !text.is_empty() {
            self.transcript.push_str(&text);
            self.output_scroll = usize::MAX;
        }
    }

    fn submit_input(&mut self) {
        let Some(mode) = self.input_mode.as_mut() else {
            return;
        };
        if !mode.is_valid() {
            mode.buffer.clear();
            self.status_message = INVALID_INPUT_MESSAGE.to_string();
            return;
        }
        let line = std::mem::take(&mut mode.buffer);
        self.input_mode = None;
        self.stepper.input_mut().push_line(line);
        self.status_message = "Input accepted".to_string();
        self.step_once();
        self.last_step_time = Instant::now();
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_input(),
            KeyCode::Esc => {
                self.input_mode = None;
                self.is_playing = false;
                self.status_message = "Input cancelled".to_string();
            }
            KeyCode::Backspace => {
                if let Some(mode) = self.input_mode.as_mut() {
                    mode.buffer.pop();
                }
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                if let Some(mode) = self.input_mode.as_mut() {
                    mode.buffer.push(c);
                }
            }
            _ => {}
        }
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        // Raw mode delivers Ctrl+C as a key press instead of a signal
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.is_playing = false;
            self.status_message = "Interrupted".to_string();
            self.should_quit = true;
            return;
        }

        if self.input_mode.is_some() {
            self.handle_input_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1);
                let mut stepped = 0;
                for _ in 0..n {
                    if !self.step_once() {
                        break;
                    }
                    stepped += 1;
                }
                if self.final_outcome.is_none() && self.input_mode.is_none() {
                    self.status_message = format!("Stepped forward {} step(s)", stepped);
                }
            }
            KeyCode::Right | KeyCode::Char('n') => {
                self.is_playing = false;
                if self.step_once() && self.final_outcome.is_none() {
                    self.status_message = "Stepped forward".to_string();
                }
            }
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    if self.final_outcome.is_some() {
                        return;
                    }
                    self.is_playing = !self.is_playing;
                    self.status_message = if self.is_playing {
                        "Playing...".to_string()
                    } else {
                        "Paused".to_string()
                    };
                }
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Grid => {}
                FocusedPane::Stack => self.stack_scroll = self.stack_scroll.saturating_sub(1),
                FocusedPane::Output => self.output_scroll = self.output_scroll.saturating_sub(1),
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Grid => {}
                FocusedPane::Stack => self.stack_scroll = self.stack_scroll.saturating_add(1),
                FocusedPane::Output => self.output_scroll = self.output_scroll.saturating_add(1),
            },
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::io::ScriptedHeadings;
    use crate::interpreter::{create_initial_state, load_program, Fault};
    use ratatui::backend::TestBackend;

    fn app(text: &str) -> App<ScriptedHeadings> {
        App::new(
            create_initial_state(load_program(text)),
            ScriptedHeadings::new(vec![]),
            StepperConfig::default(),
            30,
        )
    }

    fn press(app: &mut App<ScriptedHeadings>, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_line(app: &mut App<ScriptedHeadings>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
        press(app, KeyCode::Enter);
    }

    #[test]
    fn test_single_steps_collect_output() {
        let mut app = app("45+.@");
        for _ in 0..4 {
            press(&mut app, KeyCode::Char('n'));
        }
        assert_eq!(app.transcript(), "9");
        assert!(app.outcome().is_none());
        press(&mut app, KeyCode::Right);
        assert_eq!(app.outcome(), Some(&StepOutcome::Terminated));
        assert_eq!(app.indicator(), RunIndicator::Finished);
    }

    #[test]
    fn test_input_mode_rejects_then_accepts() {
        let mut app = app("&.@");
        press(&mut app, KeyCode::Char('n'));
        assert!(app.is_awaiting_input());
        assert_eq!(app.indicator(), RunIndicator::Input);

        type_line(&mut app, "x");
        assert!(app.is_awaiting_input());
        assert_eq!(app.status_message(), INVALID_INPUT_MESSAGE);

        type_line(&mut app, "42");
        assert!(!app.is_awaiting_input());
        assert_eq!(app.state().stack(), &[42]);

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.transcript(), "42");
    }

    #[test]
    fn test_digit_key_stops_at_fault() {
        let mut app = app("1.0%");
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.transcript(), "1");
        assert!(matches!(
            app.outcome(),
            Some(StepOutcome::Faulted(Fault::DivisionByZero { .. }))
        ));
        assert_eq!(app.indicator(), RunIndicator::Faulted);
    }

    #[test]
    fn test_string_mode_ampersand_does_not_prompt() {
        let mut app = app("\"&\"@");
        press(&mut app, KeyCode::Char('3'));
        assert!(!app.is_awaiting_input());
        assert_eq!(app.state().stack(), &['&' as i64]);
    }

    #[test]
    fn test_quit_and_focus() {
        let mut app = app("@");
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Output);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    fn ctrl(app: &mut App<ScriptedHeadings>, c: char) {
        app.handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    #[test]
    fn test_ctrl_c_quits_while_playing() {
        let mut app = app("1.2.3.@");
        assert!(app.is_playing);
        ctrl(&mut app, 'c');
        assert!(app.should_quit);
        assert!(!app.is_playing);
        assert_eq!(app.status_message(), "Interrupted");
    }

    #[test]
    fn test_ctrl_c_quits_from_input_mode() {
        let mut app = app("&.@");
        press(&mut app, KeyCode::Char('n'));
        assert!(app.is_awaiting_input());
        ctrl(&mut app, 'c');
        assert!(app.should_quit);
        assert_eq!(app.input_mode.as_ref().map(|m| m.buffer.as_str()), Some(""));
    }

    #[test]
    fn test_modified_keys_are_not_typed() {
        let mut app = app("&.@");
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Char('4'));
        ctrl(&mut app, 'u');
        app.handle_key_event(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT));
        assert!(!app.should_quit);
        assert_eq!(app.input_mode.as_ref().map(|m| m.buffer.as_str()), Some("4"));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state().stack(), &[4]);
    }

    #[test]
    fn test_render_does_not_panic() {
        let mut app = app("\"olleh\",,,,,@\n v\n >  ^");
        press(&mut app, KeyCode::Char('8'));
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let mut tiny = Terminal::new(TestBackend::new(4, 3)).unwrap();
        tiny.draw(|f| app.render(f)).unwrap();
    }
}
