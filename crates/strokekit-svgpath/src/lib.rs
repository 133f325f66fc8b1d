//! # Strokekit SVG Path
//!
//! SVG path data parsing for the Strokekit shape engine.
//!
//! ## Features
//!
//! - **Tokenizer**: Scan `d` attribute text into command/number tokens
//! - **Interpreter**: Resolve commands (M, L, H, V, C, S, Q, T, Z) into
//!   absolute move/line/cubic-curve/close operations
//! - **Relative commands**: Lowercase variants resolved against the pen
//! - **Implicit repetition**: Extra argument groups reuse the last command
//! - **Smooth curves**: `S`/`T` reflect the previous control point
//!
//! ## Architecture
//!
//! ```text
//! &str (path data)
//!    └── Tokenizer ── Token stream
//!           └── PathState::step ── PathOp sequence (Path)
//! ```
//!
//! Malformed trailing input degrades to "stop emitting"; only an
//! unrecognized command letter fails the parse, and then the caller gets no
//! partial result.

use tracing::debug;

pub mod interpreter;
pub mod tokenizer;

pub use interpreter::{interpret, Dispatch, PathOp, PathState, SvgPathError};
pub use strokekit_geom::{Point, Rect};
pub use tokenizer::{Token, Tokenizer};

/// A parsed path: an ordered sequence of resolved operations.
///
/// Replaying the operations in order through any move/line/curve/close
/// consumer reconstructs the geometry the source text described, including
/// multiple disjoint subpaths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    pub ops: Vec<PathOp>,
}

impl Path {
    /// Parse SVG path data.
    ///
    /// Each call owns a fresh tokenizer and interpreter; nothing is cached
    /// between calls.
    pub fn parse(d: &str) -> Result<Self, SvgPathError> {
        debug!(len = d.len(), "parsing svg path data");
        let ops = interpret(Tokenizer::new(d))?;
        Ok(Self { ops })
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Serialize back to path data using absolute `M`/`L`/`C`/`Z` commands.
    ///
    /// Reparsing the result yields an equal operation sequence.
    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        for op in &self.ops {
            if !out.is_empty() {
                out.push(' ');
            }
            match op {
                PathOp::MoveTo(p) => out.push_str(&format!("M {} {}", p.x, p.y)),
                PathOp::LineTo(p) => out.push_str(&format!("L {} {}", p.x, p.y)),
                PathOp::CurveTo { c1, c2, end } => out.push_str(&format!(
                    "C {} {} {} {} {} {}",
                    c1.x, c1.y, c2.x, c2.y, end.x, end.y
                )),
                PathOp::ClosePath => out.push('Z'),
            }
        }
        out
    }

    /// Bounding box of every emitted point, control points included.
    ///
    /// This is the control-polygon box, not the tight curve extent; it is
    /// what shape-view consumers need for sizing a backing layer.
    pub fn bounds(&self) -> Option<Rect> {
        let mut bounds: Option<Rect> = None;
        let extend = |bounds: &mut Option<Rect>, p: Point| {
            let point_rect = Rect::from_points(p, p);
            *bounds = Some(match bounds.take() {
                Some(r) => r.union(point_rect),
                None => point_rect,
            });
        };

        for op in &self.ops {
            match op {
                PathOp::MoveTo(p) | PathOp::LineTo(p) => extend(&mut bounds, *p),
                PathOp::CurveTo { c1, c2, end } => {
                    extend(&mut bounds, *c1);
                    extend(&mut bounds, *c2);
                    extend(&mut bounds, *end);
                }
                PathOp::ClosePath => {}
            }
        }
        bounds
    }

    /// Iterate over subpaths: runs of operations split before each move-to
    /// and after each close.
    pub fn subpaths(&self) -> Subpaths<'_> {
        Subpaths { ops: &self.ops }
    }
}

/// Iterator returned by [`Path::subpaths`].
#[derive(Debug)]
pub struct Subpaths<'a> {
    ops: &'a [PathOp],
}

impl<'a> Iterator for Subpaths<'a> {
    type Item = &'a [PathOp];

    fn next(&mut self) -> Option<&'a [PathOp]> {
        if self.ops.is_empty() {
            return None;
        }
        let mut end = 1;
        while end < self.ops.len()
            && !matches!(self.ops[end], PathOp::MoveTo(_))
            && !matches!(self.ops[end - 1], PathOp::ClosePath)
        {
            end += 1;
        }
        let (subpath, rest) = self.ops.split_at(end);
        self.ops = rest;
        Some(subpath)
    }
}

/// Parse SVG path data, or `None` if it contains an invalid command.
///
/// Convenience wrapper over [`Path::parse`] for callers that only care about
/// pass/fail.
pub fn parse_svg_path(d: &str) -> Option<Path> {
    Path::parse(d).ok()
}
