//! Input mapping from text commands to semantic actions
//!
//! Each line of driver input is one command:
//!
//! ```text
//! move <vertex> <x> <y>       step <vertex> <up|down|left|right>
//! side <side> <dx> <dy>       press <vertex> / release <vertex>
//! mode <standard|reduced|device>
//! measure <top> <right> <bottom> <left> <a> <b> <c> <d>   (angles in degrees)
//! reset  show  dump  help  quit
//! ```

use std::fmt;
use std::str::FromStr;

use quadrilateral_core::{InputMode, SideLabel, Vec2, VertexLabel};
use quadrilateral_input::{StepDirection, TangibleMeasurements};

/// Actions requested by a command line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    /// Drag a vertex to a position
    MoveVertex { vertex: VertexLabel, position: Vec2 },
    /// Keyboard-step a vertex one grid cell
    StepVertex { vertex: VertexLabel, direction: StepDirection },
    /// Drag a side by an offset
    MoveSide { side: SideLabel, delta: Vec2 },
    /// Start dragging a vertex
    Press(VertexLabel),
    /// Stop dragging a vertex
    Release(VertexLabel),
    SetMode(InputMode),
    /// A reading from a tangible device
    Measure(TangibleMeasurements),
    Reset,
    /// Print the current report
    Show,
    /// Print the full snapshot
    Dump,
    Help,
    Exit,
}

/// Why a command line couldn't be mapped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnknownCommand(String),
    MissingArgument { command: &'static str, argument: &'static str },
    InvalidArgument { command: &'static str, value: String },
    TooManyArguments(&'static str),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnknownCommand(c) => write!(f, "Unknown command '{}' (try 'help')", c),
            ParseError::MissingArgument { command, argument } => {
                write!(f, "'{}' is missing <{}>", command, argument)
            }
            ParseError::InvalidArgument { command, value } => {
                write!(f, "'{}' can't use '{}'", command, value)
            }
            ParseError::TooManyArguments(c) => write!(f, "Too many arguments for '{}'", c),
        }
    }
}

impl std::error::Error for ParseError {}

/// Usage text printed by `help`
pub const HELP: &str = "\
Commands:
  move <A-D> <x> <y>          drag a vertex to a position
  step <A-D> <direction>      step a vertex up, down, left or right
  side <AB|BC|CD|DA> <dx> <dy> drag a side by an offset
  press <A-D> / release <A-D> start or stop dragging a vertex
  mode <standard|reduced|device>
  measure <top> <right> <bottom> <left> <a> <b> <c> <d>
                              tangible reading, angles in degrees
  reset                       restore the default square
  show                        describe the current shape
  dump                        print the full snapshot
  help                        this text
  quit                        exit";

/// Maps command lines to actions
pub struct InputMapper;

impl InputMapper {
    /// Map one line of input to an action
    ///
    /// Returns `Ok(None)` for blank lines and `#` comments.
    pub fn map_line(line: &str) -> Result<Option<InputAction>, ParseError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut args = Args::new(line);
        let command = canonical_name(args.command)
            .ok_or_else(|| ParseError::UnknownCommand(args.command.to_string()))?;
        let action = match command {
            "move" => {
                let vertex = args.vertex("move")?;
                let position = Vec2::new(args.number("move", "x")?, args.number("move", "y")?);
                InputAction::MoveVertex { vertex, position }
            }
            "step" => {
                let vertex = args.vertex("step")?;
                let value = args.next("step", "direction")?;
                let direction = StepDirection::parse(value).ok_or_else(|| invalid("step", value))?;
                InputAction::StepVertex { vertex, direction }
            }
            "side" => {
                let value = args.next("side", "side")?;
                let side = SideLabel::parse(value).ok_or_else(|| invalid("side", value))?;
                let delta = Vec2::new(args.number("side", "dx")?, args.number("side", "dy")?);
                InputAction::MoveSide { side, delta }
            }
            "press" => InputAction::Press(args.vertex("press")?),
            "release" => InputAction::Release(args.vertex("release")?),
            "mode" => {
                let value = args.next("mode", "mode")?;
                InputAction::SetMode(InputMode::parse(value).ok_or_else(|| invalid("mode", value))?)
            }
            "measure" => {
                const NAMES: [&str; 8] = ["top", "right", "bottom", "left", "a", "b", "c", "d"];
                let mut values = [0.0; 8];
                for (value, name) in values.iter_mut().zip(NAMES) {
                    *value = args.number("measure", name)?;
                }
                InputAction::Measure(TangibleMeasurements::from_degrees(
                    [values[0], values[1], values[2], values[3]],
                    [values[4], values[5], values[6], values[7]],
                ))
            }
            "reset" => InputAction::Reset,
            "show" => InputAction::Show,
            "dump" => InputAction::Dump,
            "help" => InputAction::Help,
            _ => InputAction::Exit,
        };

        args.finish(command)?;
        Ok(Some(action))
    }
}

fn invalid(command: &'static str, value: &str) -> ParseError {
    ParseError::InvalidArgument {
        command,
        value: value.to_string(),
    }
}

/// Command word with aliases resolved
fn canonical_name(word: &str) -> Option<&'static str> {
    let name = match word.to_ascii_lowercase().as_str() {
        "move" | "m" => "move",
        "step" | "s" => "step",
        "side" => "side",
        "press" => "press",
        "release" => "release",
        "mode" => "mode",
        "measure" => "measure",
        "reset" | "r" => "reset",
        "show" => "show",
        "dump" => "dump",
        "help" | "?" => "help",
        "quit" | "exit" | "q" => "quit",
        _ => return None,
    };
    Some(name)
}

/// Whitespace-separated arguments after the command word
struct Args<'a> {
    command: &'a str,
    rest: std::str::SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn new(line: &'a str) -> Self {
        let mut rest = line.split_whitespace();
        let command = rest.next().unwrap_or_default();
        Self { command, rest }
    }

    fn next(&mut self, command: &'static str, argument: &'static str) -> Result<&'a str, ParseError> {
        self.rest
            .next()
            .ok_or(ParseError::MissingArgument { command, argument })
    }

    fn number(&mut self, command: &'static str, argument: &'static str) -> Result<f64, ParseError> {
        let value = self.next(command, argument)?;
        match f64::from_str(value) {
            Ok(n) if n.is_finite() => Ok(n),
            _ => Err(invalid(command, value)),
        }
    }

    fn vertex(&mut self, command: &'static str) -> Result<VertexLabel, ParseError> {
        let value = self.next(command, "vertex")?;
        VertexLabel::parse(value).ok_or_else(|| invalid(command, value))
    }

    fn finish(mut self, command: &'static str) -> Result<(), ParseError> {
        match self.rest.next() {
            Some(_) => Err(ParseError::TooManyArguments(command)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(line: &str) -> InputAction {
        InputMapper::map_line(line).unwrap().unwrap()
    }

    #[test]
    fn test_blank_and_comment_lines_ignored() {
        assert_eq!(InputMapper::map_line("   "), Ok(None));
        assert_eq!(InputMapper::map_line("# a comment"), Ok(None));
    }

    #[test]
    fn test_move_vertex() {
        assert_eq!(
            map("move d 0 0"),
            InputAction::MoveVertex {
                vertex: VertexLabel::D,
                position: Vec2::ZERO,
            }
        );
    }

    #[test]
    fn test_step_and_side() {
        assert_eq!(
            map("step B left"),
            InputAction::StepVertex {
                vertex: VertexLabel::B,
                direction: StepDirection::Left,
            }
        );
        assert_eq!(
            map("side ab 0.25 -0.5"),
            InputAction::MoveSide {
                side: SideLabel::AB,
                delta: Vec2::new(0.25, -0.5),
            }
        );
    }

    #[test]
    fn test_mode_and_simple_commands() {
        assert_eq!(map("mode device"), InputAction::SetMode(InputMode::Device));
        assert_eq!(map("press C"), InputAction::Press(VertexLabel::C));
        assert_eq!(map("RESET"), InputAction::Reset);
        assert_eq!(map("quit"), InputAction::Exit);
    }

    #[test]
    fn test_measure_converts_degrees() {
        match map("measure 1 1 1 1 90 90 90 90") {
            InputAction::Measure(m) => {
                assert_eq!(m.top_length, 1.0);
                assert!((m.angles[0] - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
            }
            other => panic!("Expected Measure, got {:?}", other),
        }
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            InputMapper::map_line("jump"),
            Err(ParseError::UnknownCommand("jump".to_string()))
        );
        assert_eq!(
            InputMapper::map_line("move A 1"),
            Err(ParseError::MissingArgument {
                command: "move",
                argument: "y",
            })
        );
        assert_eq!(
            InputMapper::map_line("move E 0 0"),
            Err(ParseError::InvalidArgument {
                command: "move",
                value: "E".to_string(),
            })
        );
        assert_eq!(
            InputMapper::map_line("move A nan 0"),
            Err(ParseError::InvalidArgument {
                command: "move",
                value: "nan".to_string(),
            })
        );
        assert_eq!(
            InputMapper::map_line("show everything"),
            Err(ParseError::TooManyArguments("show"))
        );
    }
}
