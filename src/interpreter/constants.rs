// Constants for the interpreter and its drivers

/// Prompt shown by `&`
pub const INTEGER_PROMPT: &str = "Input integer > ";

/// Prompt shown by `~`
pub const CHARACTER_PROMPT: &str = "Input character > ";

/// Notice given to the input collaborator before re-prompting
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input";

/// Frames per second for the animated view
pub const DEFAULT_FRAMERATE: u32 = 30;
