//! Instruction dispatch
//!
//! [`execute`] applies one character to the state. In string mode every
//! character except `"` is pushed as its code point; otherwise dispatch is a
//! single exhaustive `match` whose fallback arm raises
//! [`Fault::UnsupportedInstruction`].
//!
//! # Operand order
//!
//! Binary operators pop `a` (top) and then `b` (second) and push `b op a`:
//!
//! ```text
//! [.., b, a]  -  →  [.., b - a]
//! [.., b, a]  /  →  [.., floor(b / a)]
//! ```
//!
//! # Integer width
//!
//! Values are `i64`. `+`, `-` and `*` wrap on overflow, and `/`/`%` wrap for
//! the single overflowing case `i64::MIN / -1`.

use super::constants::{CHARACTER_PROMPT, INTEGER_PROMPT, INVALID_INPUT_MESSAGE};
use super::errors::Fault;
use super::io::{HeadingSource, InputSource};
use super::state::{ExecutionState, Heading};

/// Control signal returned by a successfully executed instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep running; the stepper advances the cursor
    Proceed,
    /// `@` was executed
    Halt,
}

/// Outside collaborators an instruction may call
pub struct Collaborators<'a> {
    pub input: &'a mut dyn InputSource,
    pub headings: &'a mut dyn HeadingSource,
    /// Give up on `&`/`~` after this many rejected answers (`None` = retry forever)
    pub max_input_attempts: Option<usize>,
}

/// Floor division (rounds toward negative infinity). `divisor` must be non-zero.
pub fn floor_div(dividend: i64, divisor: i64) -> i64 {
    let quotient = dividend.wrapping_div(divisor);
    let remainder = dividend.wrapping_rem(divisor);
    if remainder != 0 && ((remainder < 0) != (divisor < 0)) {
        quotient.wrapping_sub(1)
    } else {
        quotient
    }
}

/// Modulo with the sign of the divisor, matching [`floor_div`]
pub fn floor_mod(dividend: i64, divisor: i64) -> i64 {
    let remainder = dividend.wrapping_rem(divisor);
    if remainder != 0 && ((remainder < 0) != (divisor < 0)) {
        remainder + divisor
    } else {
        remainder
    }
}

/// Parse an answer to `&`
pub fn parse_integer_input(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

/// Parse an answer to `~`: exactly one character
pub fn parse_character_input(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// True for instructions that call the input collaborator
pub fn needs_input(instruction: char) -> bool {
    matches!(instruction, '&' | '~')
}

fn code_point(value: i64) -> Option<char> {
    u32::try_from(value).ok().and_then(char::from_u32)
}

/// Execute `instruction` against `state`
pub fn execute(
    state: &mut ExecutionState,
    instruction: char,
    io: &mut Collaborators<'_>,
) -> Result<Flow, Fault> {
    if state.is_string_mode() && instruction != '"' {
        state.push_value(instruction as i64);
        return Ok(Flow::Proceed);
    }

    let position = state.cursor();

    match instruction {
        ' ' => {}
        '+' => {
            let a = state.pop_value();
            let b = state.pop_value();
            state.push_value(b.wrapping_add(a));
        }
        '-' => {
            let a = state.pop_value();
            let b = state.pop_value();
            state.push_value(b.wrapping_sub(a));
        }
        '*' => {
            let a = state.pop_value();
            let b = state.pop_value();
            state.push_value(b.wrapping_mul(a));
        }
        '/' | '%' => {
            let a = state.pop_value();
            let b = state.pop_value();
            if a == 0 {
                return Err(Fault::DivisionByZero {
                    instruction,
                    position,
                });
            }
            let result = if instruction == '/' {
                floor_div(b, a)
            } else {
                floor_mod(b, a)
            };
            state.push_value(result);
        }
        '!' => {
            let a = state.pop_value();
            state.push_value(i64::from(a == 0));
        }
        '`' => {
            let a = state.pop_value();
            let b = state.pop_value();
            state.push_value(i64::from(b > a));
        }
        '>' => state.set_heading(Heading::Right),
        'v' => state.set_heading(Heading::Down),
        '<' => state.set_heading(Heading::Left),
        '^' => state.set_heading(Heading::Up),
        '?' => {
            let heading = io.headings.choose_heading();
            state.set_heading(heading);
        }
        '_' => {
            let heading = if state.pop_value() == 0 {
                Heading::Right
            } else {
                Heading::Left
            };
            state.set_heading(heading);
        }
        '|' => {
            let heading = if state.pop_value() == 0 {
                Heading::Down
            } else {
                Heading::Up
            };
            state.set_heading(heading);
        }
        '"' => state.toggle_string_mode(),
        ':' => {
            let a = state.pop_value();
            state.push_value(a);
            state.push_value(a);
        }
        '\\' => {
            let a = state.pop_value();
            let b = state.pop_value();
            state.push_value(a);
            state.push_value(b);
        }
        '$' => {
            state.pop_value();
        }
        '.' => {
            let a = state.pop_value();
            state.emit_text(a.to_string());
        }
        ',' => {
            let a = state.pop_value();
            let ch = code_point(a).ok_or(Fault::InvalidCodePoint {
                instruction,
                value: a,
                position,
            })?;
            state.emit_text(ch.to_string());
        }
        '#' => state.advance(),
        'g' => {
            let y = state.pop_value();
            let x = state.pop_value();
            // Out-of-range reads are defined as 0 rather than a fault
            let value = state.grid().read(x, y).map(|c| c as i64).unwrap_or(0);
            state.push_value(value);
        }
        'p' => {
            let y = state.pop_value();
            let x = state.pop_value();
            let v = state.pop_value();
            let ch = code_point(v).ok_or(Fault::InvalidCodePoint {
                instruction,
                value: v,
                position,
            })?;
            let (width, height) = (state.grid().width(), state.grid().height());
            state
                .grid_mut()
                .write(x, y, ch)
                .map_err(|_| Fault::OutOfBounds {
                    x,
                    y,
                    width,
                    height,
                    position,
                })?;
        }
        '&' => {
            let value = read_until_valid(state, instruction, INTEGER_PROMPT, parse_integer_input, io)?;
            state.push_value(value);
        }
        '~' => {
            let ch = read_until_valid(state, instruction, CHARACTER_PROMPT, parse_character_input, io)?;
            state.push_value(ch as i64);
        }
        '@' => return Ok(Flow::Halt),
        '0'..='9' => {
            let digit = instruction.to_digit(10).unwrap_or_default();
            state.push_value(i64::from(digit));
        }
        _ => {
            return Err(Fault::UnsupportedInstruction {
                instruction,
                position,
            })
        }
    }

    Ok(Flow::Proceed)
}

/// Prompt until `parse` accepts an answer. Nothing in `state` changes meanwhile.
fn read_until_valid<T>(
    state: &ExecutionState,
    instruction: char,
    prompt: &str,
    parse: fn(&str) -> Option<T>,
    io: &mut Collaborators<'_>,
) -> Result<T, Fault> {
    let position = state.cursor();
    let mut attempts = 0;
    loop {
        let line = io
            .input
            .request_line(prompt)
            .map_err(|e| Fault::InputUnavailable {
                instruction,
                reason: e.to_string(),
                position,
            })?;
        attempts += 1;

        if let Some(value) = parse(&line) {
            return Ok(value);
        }
        io.input.reject(INVALID_INPUT_MESSAGE);

        if io.max_input_attempts.is_some_and(|max| attempts >= max) {
            return Err(Fault::InputAttemptsExceeded {
                instruction,
                attempts,
                position,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::interpreter::errors::FaultKind;
    use crate::interpreter::io::{ScriptedHeadings, ScriptedInput};
    use crate::interpreter::state::Position;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    /// Run `instructions` one after another on a fresh state seeded with `stack`
    fn run_on(stack: &[i64], instructions: &str) -> (ExecutionState, Result<Flow, Fault>) {
        run_with_input(stack, instructions, ScriptedInput::default())
    }

    fn run_with_input(
        stack: &[i64],
        instructions: &str,
        mut input: ScriptedInput,
    ) -> (ExecutionState, Result<Flow, Fault>) {
        let mut state = ExecutionState::new(Grid::load("     \n     \n     "));
        for &v in stack {
            state.push_value(v);
        }
        let mut headings = ScriptedHeadings::new(vec![Heading::Up]);
        let mut io = Collaborators {
            input: &mut input,
            headings: &mut headings,
            max_input_attempts: None,
        };
        let mut result = Ok(Flow::Proceed);
        for c in instructions.chars() {
            result = execute(&mut state, c, &mut io);
            if result.is_err() {
                break;
            }
        }
        (state, result)
    }

    #[rstest]
    #[case(&[2, 3], "+", &[5])]
    #[case(&[2, 3], "-", &[-1])]
    #[case(&[4, 3], "*", &[12])]
    #[case(&[20, 3], "/", &[6])]
    #[case(&[-7, 2], "/", &[-4])]
    #[case(&[7, -2], "/", &[-4])]
    #[case(&[-7, -2], "/", &[3])]
    #[case(&[3, 7], "/", &[0])]
    #[case(&[-7, 2], "%", &[1])]
    #[case(&[7, -2], "%", &[-1])]
    #[case(&[7, 3], "%", &[1])]
    #[case(&[0], "!", &[1])]
    #[case(&[9], "!", &[0])]
    #[case(&[5, 2], "`", &[1])]
    #[case(&[2, 5], "`", &[0])]
    #[case(&[2, 2], "`", &[0])]
    #[case(&[5], ":", &[5, 5])]
    #[case(&[], ":", &[0, 0])]
    #[case(&[3, 7], "\\", &[7, 3])]
    #[case(&[9], "$", &[])]
    #[case(&[], "$", &[])]
    #[case(&[], "09", &[0, 9])]
    #[case(&[], "+", &[0])]
    #[case(&[1], " ", &[1])]
    fn test_stack_effects(#[case] stack: &[i64], #[case] program: &str, #[case] expected: &[i64]) {
        let (state, result) = run_on(stack, program);
        assert_eq!(result, Ok(Flow::Proceed));
        assert_eq!(state.stack(), expected);
    }

    #[test]
    fn test_arithmetic_wraps() {
        let (state, _) = run_on(&[i64::MAX, 1], "+");
        assert_eq!(state.stack(), &[i64::MIN]);
        let (state, _) = run_on(&[i64::MIN, -1], "/");
        assert_eq!(state.stack(), &[i64::MIN]);
        let (state, _) = run_on(&[i64::MIN, -1], "%");
        assert_eq!(state.stack(), &[0]);
    }

    #[rstest]
    #[case('/')]
    #[case('%')]
    fn test_zero_divisor_faults(#[case] op: char) {
        let (state, result) = run_on(&[1, 20, 0], &op.to_string());
        let fault = result.unwrap_err();
        assert_eq!(fault.kind(), FaultKind::Structural);
        assert_eq!(
            fault,
            Fault::DivisionByZero {
                instruction: op,
                position: Position::new(0, 0)
            }
        );
        // only the two operands were consumed
        assert_eq!(state.stack(), &[1]);
    }

    #[rstest]
    #[case('>', Heading::Right)]
    #[case('v', Heading::Down)]
    #[case('<', Heading::Left)]
    #[case('^', Heading::Up)]
    #[case('?', Heading::Up)]
    fn test_heading_changes(#[case] instruction: char, #[case] expected: Heading) {
        let (state, _) = run_on(&[], &format!("v{}", instruction));
        assert_eq!(state.heading(), expected);
    }

    #[rstest]
    #[case(0, '_', Heading::Right)]
    #[case(3, '_', Heading::Left)]
    #[case(0, '|', Heading::Down)]
    #[case(-1, '|', Heading::Up)]
    fn test_conditional_branches(#[case] top: i64, #[case] instruction: char, #[case] expected: Heading) {
        let (state, _) = run_on(&[top], &format!("<{}", instruction));
        assert_eq!(state.heading(), expected);
        assert!(state.stack().is_empty());
    }

    #[test]
    fn test_string_mode_pushes_code_points() {
        let (state, _) = run_on(&[], "\"a@1 \"");
        assert!(!state.is_string_mode());
        assert_eq!(state.stack(), &['a' as i64, '@' as i64, '1' as i64, ' ' as i64]);
    }

    #[test]
    fn test_string_mode_ignores_unsupported_characters() {
        let (state, result) = run_on(&[], "\"Z");
        assert_eq!(result, Ok(Flow::Proceed));
        assert!(state.is_string_mode());
        assert_eq!(state.stack(), &['Z' as i64]);
    }

    #[test]
    fn test_print_number_and_character() {
        let (mut state, _) = run_on(&[-12, 72, 105], ",,.");
        assert_eq!(state.drain_output(), "iH-12");
    }

    #[test]
    fn test_print_invalid_code_point_faults() {
        for bad in [-1, 0xD800, 0x110000] {
            let (_, result) = run_on(&[bad], ",");
            assert_eq!(
                result,
                Err(Fault::InvalidCodePoint {
                    instruction: ',',
                    value: bad,
                    position: Position::new(0, 0)
                })
            );
        }
    }

    #[test]
    fn test_put_then_get_round_trip() {
        let (state, result) = run_on(&[2, 0, 88, 2, 0], "pg");
        assert_eq!(result, Ok(Flow::Proceed));
        assert_eq!(state.stack(), &[88]);
        assert_eq!(state.grid().read(2, 0), Ok('X'));
    }

    #[test]
    fn test_get_out_of_bounds_pushes_zero() {
        let (state, result) = run_on(&[0, -1, 100, 100], "gg");
        assert_eq!(result, Ok(Flow::Proceed));
        assert_eq!(state.stack(), &[0, 0]);
    }

    #[test]
    fn test_put_out_of_bounds_faults() {
        let (state, result) = run_on(&[65, 5, 0], "p");
        let fault = result.unwrap_err();
        assert_eq!(fault.kind(), FaultKind::OutOfBoundsAccess);
        assert_eq!(
            fault,
            Fault::OutOfBounds {
                x: 5,
                y: 0,
                width: 5,
                height: 3,
                position: Position::new(0, 0)
            }
        );
        assert!(state.stack().is_empty());
    }

    #[test]
    fn test_skip_moves_cursor() {
        let (state, _) = run_on(&[], "#");
        assert_eq!(state.cursor(), Position::new(1, 0));
    }

    #[test]
    fn test_halt() {
        let (_, result) = run_on(&[], "@");
        assert_eq!(result, Ok(Flow::Halt));
    }

    #[test]
    fn test_unsupported_instruction() {
        let (_, result) = run_on(&[], "x");
        let fault = result.unwrap_err();
        assert_eq!(fault.kind(), FaultKind::UnsupportedInstruction);
        assert_eq!(fault.position(), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_read_integer_retries_until_valid() {
        let input = ScriptedInput::new(["abc", "", " -17 "]);
        let (state, result) = run_with_input(&[], "&", input);
        assert_eq!(result, Ok(Flow::Proceed));
        assert_eq!(state.stack(), &[-17]);
        assert_eq!(state.cursor(), Position::new(0, 0));
    }

    #[test]
    fn test_read_character_requires_exactly_one() {
        let input = ScriptedInput::new(["", "ab", "é"]);
        let (state, result) = run_with_input(&[], "~", input);
        assert_eq!(result, Ok(Flow::Proceed));
        assert_eq!(state.stack(), &['é' as i64]);
    }

    #[test]
    fn test_closed_input_faults() {
        let (_, result) = run_with_input(&[], "&", ScriptedInput::new(["x"]));
        let fault = result.unwrap_err();
        assert_eq!(fault.kind(), FaultKind::Input);
        assert!(matches!(fault, Fault::InputUnavailable { instruction: '&', .. }));
    }

    #[test]
    fn test_input_attempt_cap() {
        let mut state = ExecutionState::new(Grid::load("&"));
        let mut input = ScriptedInput::new(["x", "y", "z", "4"]);
        let mut headings = ScriptedHeadings::new(vec![]);
        let mut io = Collaborators {
            input: &mut input,
            headings: &mut headings,
            max_input_attempts: Some(2),
        };
        let result = execute(&mut state, '&', &mut io);
        assert_eq!(
            result,
            Err(Fault::InputAttemptsExceeded {
                instruction: '&',
                attempts: 2,
                position: Position::new(0, 0)
            })
        );
        assert_eq!(input.rejections(), 2);
        assert!(state.stack().is_empty());
    }

    #[test]
    fn test_floor_helpers() {
        assert_eq!(floor_div(-7, 2), -4);
        assert_eq!(floor_mod(-7, 2), 1);
        assert_eq!(floor_div(6, 3), 2);
        assert_eq!(floor_mod(-6, 3), 0);
        assert_eq!(floor_mod(7, -3), -2);
    }

    #[test]
    fn test_input_parsers() {
        assert_eq!(parse_integer_input("+5"), Some(5));
        assert_eq!(parse_integer_input("5.0"), None);
        assert_eq!(parse_character_input(" "), Some(' '));
        assert_eq!(parse_character_input(""), None);
    }
}
