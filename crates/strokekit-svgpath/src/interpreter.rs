//! Stateful interpreter turning path tokens into resolved drawing ops.
//!
//! The interpreter is a small state machine folded over the token stream:
//! a command letter arms a command family, numbers accumulate in a FIFO
//! buffer, and whenever the armed family has a full invocation's worth of
//! arguments it drains them and emits one absolute [`PathOp`]. Surplus
//! numbers stay buffered so the same family repeats without a new letter.

use strokekit_geom::Point;
use thiserror::Error;
use tracing::trace;

use crate::tokenizer::Token;

/// Errors that abort path interpretation.
///
/// "Not enough arguments yet" is deliberately not here: it is the ordinary
/// [`Dispatch::Pending`] outcome, never an error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SvgPathError {
    #[error("Invalid path command: {0:?}")]
    InvalidCommand(char),
}

/// A resolved path-construction operation. All coordinates are absolute;
/// relative commands are resolved against the pen before emission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathOp {
    MoveTo(Point),
    LineTo(Point),
    CurveTo { c1: Point, c2: Point, end: Point },
    ClosePath,
}

/// Outcome of feeding one token to the state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dispatch {
    /// A full invocation was consumed and produced an operation.
    Emitted(PathOp),
    /// The armed command (if any) is still waiting for arguments.
    Pending,
}

/// Interpreter state for a single parse.
///
/// Owned exclusively by one run; nothing is shared or reused across calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathState {
    /// The pen position, updated by every command that moves it.
    pub current_point: Point,
    /// Second control point of the last emitted curve, normalized to the
    /// cubic frame. Move and line commands reset it to the pen position, so
    /// a smooth curve after a line reflects against the pen.
    pub last_control_point: Point,
    /// Numeric arguments collected since the last dispatch, drained from
    /// the front in arity-sized chunks.
    pub pending_values: Vec<f64>,
    /// The armed command letter. `None` before the first command and after
    /// a close, which takes no arguments and cannot repeat.
    pub active_command: Option<char>,
}

impl PathState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one token and attempt a dispatch.
    ///
    /// At most one operation can come out per token: numbers arrive one at
    /// a time, so the buffer crosses a family's arity at most once per call.
    pub fn step(&mut self, token: Token) -> Result<Dispatch, SvgPathError> {
        match token {
            Token::Command(c) => {
                self.active_command = Some(c);
                self.pending_values.clear();
            }
            Token::Number(v) => self.pending_values.push(v),
        }
        self.dispatch()
    }

    fn dispatch(&mut self) -> Result<Dispatch, SvgPathError> {
        let Some(command) = self.active_command else {
            return Ok(Dispatch::Pending);
        };

        let op = match command {
            'M' | 'm' => {
                let Some([x, y]) = self.take() else {
                    return Ok(Dispatch::Pending);
                };
                let target = self.resolve(command, x, y);
                self.current_point = target;
                self.last_control_point = target;
                PathOp::MoveTo(target)
            }

            'L' | 'l' => {
                let Some([x, y]) = self.take() else {
                    return Ok(Dispatch::Pending);
                };
                let target = self.resolve(command, x, y);
                self.current_point = target;
                self.last_control_point = target;
                PathOp::LineTo(target)
            }

            'H' | 'h' => {
                let Some([x]) = self.take() else {
                    return Ok(Dispatch::Pending);
                };
                let x = if command == 'h' {
                    self.current_point.x + x
                } else {
                    x
                };
                let target = Point::new(x, self.current_point.y);
                self.current_point = target;
                self.last_control_point = target;
                PathOp::LineTo(target)
            }

            'V' | 'v' => {
                let Some([y]) = self.take() else {
                    return Ok(Dispatch::Pending);
                };
                let y = if command == 'v' {
                    self.current_point.y + y
                } else {
                    y
                };
                let target = Point::new(self.current_point.x, y);
                self.current_point = target;
                self.last_control_point = target;
                PathOp::LineTo(target)
            }

            'C' | 'c' => {
                let Some([x1, y1, x2, y2, x, y]) = self.take() else {
                    return Ok(Dispatch::Pending);
                };
                let c1 = self.resolve(command, x1, y1);
                let c2 = self.resolve(command, x2, y2);
                let end = self.resolve(command, x, y);
                self.last_control_point = c2;
                self.current_point = end;
                PathOp::CurveTo { c1, c2, end }
            }

            'S' | 's' => {
                let Some([x2, y2, x, y]) = self.take() else {
                    return Ok(Dispatch::Pending);
                };
                let c1 = self
                    .last_control_point
                    .reflected_through(self.current_point);
                let c2 = self.resolve(command, x2, y2);
                let end = self.resolve(command, x, y);
                self.last_control_point = c2;
                self.current_point = end;
                PathOp::CurveTo { c1, c2, end }
            }

            'Q' | 'q' => {
                let Some([cx, cy, x, y]) = self.take() else {
                    return Ok(Dispatch::Pending);
                };
                // Quadratic control point doubles as both cubic controls.
                let control = self.resolve(command, cx, cy);
                let end = self.resolve(command, x, y);
                self.last_control_point = control;
                self.current_point = end;
                PathOp::CurveTo {
                    c1: control,
                    c2: control,
                    end,
                }
            }

            'T' | 't' => {
                let Some([x, y]) = self.take() else {
                    return Ok(Dispatch::Pending);
                };
                let control = self
                    .last_control_point
                    .reflected_through(self.current_point);
                let end = self.resolve(command, x, y);
                self.last_control_point = control;
                self.current_point = end;
                PathOp::CurveTo {
                    c1: control,
                    c2: control,
                    end,
                }
            }

            'Z' | 'z' => {
                // Close takes no arguments and never repeats implicitly.
                // The pen intentionally stays where it was (not moved back
                // to the subpath start).
                self.active_command = None;
                PathOp::ClosePath
            }

            other => return Err(SvgPathError::InvalidCommand(other)),
        };

        trace!(?op, "dispatched path op");
        Ok(Dispatch::Emitted(op))
    }

    /// Drain the first `N` buffered values, or `None` if not enough arrived.
    fn take<const N: usize>(&mut self) -> Option<[f64; N]> {
        if self.pending_values.len() < N {
            return None;
        }
        let mut out = [0.0; N];
        for (slot, value) in out.iter_mut().zip(self.pending_values.drain(..N)) {
            *slot = value;
        }
        Some(out)
    }

    /// Resolve a coordinate pair against the pen for lowercase commands.
    fn resolve(&self, command: char, x: f64, y: f64) -> Point {
        let p = Point::new(x, y);
        if command.is_ascii_lowercase() {
            self.current_point + p
        } else {
            p
        }
    }
}

/// Fold a token stream into the resolved operation sequence.
///
/// Incomplete trailing arguments are dropped silently; an unrecognized
/// command letter voids the whole result.
pub fn interpret<I>(tokens: I) -> Result<Vec<PathOp>, SvgPathError>
where
    I: IntoIterator<Item = Token>,
{
    let mut state = PathState::new();
    let mut ops = Vec::new();
    for token in tokens {
        if let Dispatch::Emitted(op) = state.step(token)? {
            ops.push(op);
        }
    }
    Ok(ops)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn step_accumulates_until_arity() {
        let mut state = PathState::new();
        assert_eq!(state.step(Token::Command('M')), Ok(Dispatch::Pending));
        assert_eq!(state.step(Token::Number(1.0)), Ok(Dispatch::Pending));
        assert_eq!(
            state.step(Token::Number(2.0)),
            Ok(Dispatch::Emitted(PathOp::MoveTo(pt(1.0, 2.0))))
        );
        assert_eq!(state.current_point, pt(1.0, 2.0));
        assert_eq!(state.last_control_point, pt(1.0, 2.0));
        assert!(state.pending_values.is_empty());
    }

    #[test]
    fn command_letter_clears_stale_arguments() {
        let mut state = PathState::new();
        state.step(Token::Command('L')).unwrap();
        state.step(Token::Number(7.0)).unwrap();
        // A new command arrives before the second coordinate.
        assert_eq!(state.step(Token::Command('L')), Ok(Dispatch::Pending));
        assert!(state.pending_values.is_empty());
        assert_eq!(state.step(Token::Number(1.0)), Ok(Dispatch::Pending));
        assert_eq!(
            state.step(Token::Number(2.0)),
            Ok(Dispatch::Emitted(PathOp::LineTo(pt(1.0, 2.0))))
        );
    }

    #[test]
    fn unknown_letter_is_fatal() {
        let mut state = PathState::new();
        assert_eq!(
            state.step(Token::Command('X')),
            Err(SvgPathError::InvalidCommand('X'))
        );
    }

    #[test]
    fn close_disarms_the_active_command() {
        let mut state = PathState::new();
        state.step(Token::Command('M')).unwrap();
        state.step(Token::Number(0.0)).unwrap();
        state.step(Token::Number(0.0)).unwrap();
        assert_eq!(
            state.step(Token::Command('Z')),
            Ok(Dispatch::Emitted(PathOp::ClosePath))
        );
        assert_eq!(state.active_command, None);
        // Numbers after a close have no command to serve and just buffer.
        assert_eq!(state.step(Token::Number(5.0)), Ok(Dispatch::Pending));
        assert_eq!(state.step(Token::Number(5.0)), Ok(Dispatch::Pending));
    }

    #[test]
    fn numbers_before_any_command_are_ignored() {
        let ops = interpret(vec![
            Token::Number(9.0),
            Token::Number(9.0),
            Token::Command('M'),
            Token::Number(1.0),
            Token::Number(2.0),
        ])
        .unwrap();
        assert_eq!(ops, vec![PathOp::MoveTo(pt(1.0, 2.0))]);
    }

    #[test]
    fn trailing_incomplete_arguments_are_dropped() {
        let ops = interpret(vec![
            Token::Command('M'),
            Token::Number(1.0),
            Token::Number(2.0),
            Token::Command('L'),
            Token::Number(3.0),
        ])
        .unwrap();
        assert_eq!(ops, vec![PathOp::MoveTo(pt(1.0, 2.0))]);
    }
}
