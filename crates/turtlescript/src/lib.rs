//! Interprets turtle graphics scripts into line segments.
//!
//! A script is line oriented. The first line holds the viewing bounds `left right bottom top`,
//! and every following line holds one command:
//!
//! ```text
//! -100 100 -100 100
//! push
//! trace 50
//! pop
//! turn 90
//! move 10
//! ```
//!
//! `trace` and `move` both walk the turtle along its heading, but only `trace` draws. `turn`
//! rotates counterclockwise, in degrees. `push` saves the turtle's position and heading and `pop`
//! brings them back. Lines that don't start with one of these commands are ignored.

use kurbo::{Line, Point};

pub mod parse;
pub mod turtle;
pub mod typ;

pub use parse::{Commands, Script};
pub use turtle::{
    ExecError, Heading, HeadingModel, InvalidReach, Turtle, TurtleState, FAR_POINT_REACH,
};
pub use typ::{
    Bounds, Command, EmptyStack, Keyword, MalformedBounds, MalformedCommand, Span, Stmt,
};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Options {
    pub heading: HeadingModel,
}

/// Everything a script produced.
#[derive(Clone, Debug, PartialEq)]
pub struct Drawing {
    pub bounds: Bounds,
    /// Segment endpoints. Every consecutive pair is one segment.
    pub points: Vec<Point>,
    /// Lines that were skipped because they couldn't be carried out.
    pub skipped: Vec<MalformedCommand>,
    /// The fault that stopped the script early, if there was one.
    pub halt: Option<EmptyStack>,
}

impl Drawing {
    pub fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        self.points.chunks_exact(2).map(|p| Line::new(p[0], p[1]))
    }

    pub fn is_complete(&self) -> bool {
        self.halt.is_none()
    }
}

/// Reads the bounds of a script. Commands are parsed lazily, as the returned iterator is consumed.
pub fn parse(input: &str) -> Result<Script<'_>, MalformedBounds> {
    parse::script(input)
}

/// Runs a stream of parsed commands.
///
/// Malformed commands are skipped. A `pop` on an empty stack stops the run, but whatever was
/// drawn before it is kept.
pub fn interpret<I>(bounds: Bounds, stmts: I, opts: &Options) -> Drawing
where
    I: IntoIterator<Item = Result<Stmt, MalformedCommand>>,
{
    let mut turtle = Turtle::new(opts.heading);
    let mut skipped = Vec::new();
    let mut halt = None;

    for stmt in stmts {
        let stmt = match stmt {
            Ok(stmt) => stmt,
            Err(e) => {
                log::warn!("{e}, skipping");
                skipped.push(e);
                continue;
            }
        };
        if stmt.cmd.keyword().is_none() {
            log::debug!("line {}: not a command, skipping", stmt.span.line);
            continue;
        }

        match turtle.exec(&stmt.cmd) {
            Ok(()) => {}
            Err(ExecError::DegenerateHeading) => {
                let e = MalformedCommand::DegenerateHeading {
                    command: stmt.cmd,
                    span: stmt.span,
                };
                log::warn!("{e}, skipping");
                skipped.push(e);
            }
            Err(ExecError::EmptyStack) => {
                let e = EmptyStack { span: stmt.span };
                log::error!("{e}, stopping");
                halt = Some(e);
                break;
            }
        }
    }

    let points = turtle.into_points();
    log::debug!(
        "traced {} segments, skipped {} lines",
        points.len() / 2,
        skipped.len()
    );
    Drawing {
        bounds,
        points,
        skipped,
        halt,
    }
}

/// Parses and runs a whole script.
pub fn run(input: &str, opts: &Options) -> Result<Drawing, MalformedBounds> {
    let script = parse(input)?;
    Ok(interpret(script.bounds, script.commands, opts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_points(actual: &[Point], expected: &[(f64, f64)]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?}");
        for (a, &b) in actual.iter().zip(expected) {
            assert!((*a - Point::from(b)).hypot() < 1e-6, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn square_corner() {
        let drawing = run(
            "-100 100 -100 100\ntrace 50\nturn 90\ntrace 50\n",
            &Options::default(),
        )
        .unwrap();
        assert_eq!(
            drawing.bounds,
            Bounds {
                left: -100.0,
                right: 100.0,
                bottom: -100.0,
                top: 100.0
            }
        );
        assert_points(
            &drawing.points,
            &[(0.0, 0.0), (50.0, 0.0), (50.0, 0.0), (50.0, 50.0)],
        );
        assert!(drawing.is_complete());
        assert!(drawing.skipped.is_empty());
    }

    #[test]
    fn pop_first() {
        let drawing = run("0 1 0 1\npop\ntrace 1\n", &Options::default()).unwrap();
        assert!(drawing.points.is_empty());
        assert_eq!(drawing.halt.as_ref().map(|h| h.span.line), Some(2));
    }

    #[test]
    fn halt_keeps_earlier_segments() {
        let drawing = run(
            "0 1 0 1\ntrace 1\npush\npop\npop\ntrace 1\n",
            &Options::default(),
        )
        .unwrap();
        assert_points(&drawing.points, &[(0.0, 0.0), (1.0, 0.0)]);
        assert_eq!(drawing.halt.as_ref().map(|h| h.span.line), Some(5));
        assert!(!drawing.is_complete());
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let drawing = run(
            "0 1 0 1\ntrace\nturn ninety\nturn 90\ntrace 2\n",
            &Options::default(),
        )
        .unwrap();
        assert_points(&drawing.points, &[(0.0, 0.0), (0.0, 2.0)]);
        let lines: Vec<u32> = drawing.skipped.iter().map(|e| e.span().line).collect();
        assert_eq!(lines, vec![2, 3]);
        assert!(drawing.is_complete());
    }

    #[test]
    fn degenerate_heading_is_skipped() {
        let opts = Options {
            heading: HeadingModel::FarPoint { reach: 5.0 },
        };
        let drawing = run("0 1 0 1\nmove 5\ntrace 1\nturn 90\n", &opts).unwrap();
        assert!(drawing.points.is_empty());
        assert!(matches!(
            drawing.skipped.as_slice(),
            [
                MalformedCommand::DegenerateHeading {
                    command: Command::Trace(_),
                    ..
                },
                MalformedCommand::DegenerateHeading {
                    command: Command::Turn(_),
                    ..
                },
            ]
        ));
    }

    #[test]
    fn lines_pair_up_points() {
        let drawing = run("0 1 0 1\ntrace 1\nmove 1\ntrace 1\n", &Options::default()).unwrap();
        let lines: Vec<Line> = drawing.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!((lines[1].p0 - Point::new(2.0, 0.0)).hypot() < 1e-9);
    }

    #[test]
    fn bad_bounds_stop_before_running() {
        let err = run("left right bottom top\ntrace 1\n", &Options::default()).unwrap_err();
        assert_eq!(err.span.line, 1);
    }
}
