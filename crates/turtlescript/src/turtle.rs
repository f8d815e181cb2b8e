//! The turtle: a pen with a position and a heading, a stack of saved states, and the segments
//! it has traced so far.

use kurbo::{Line, Point, Vec2};

use crate::typ::Command;

/// How far away the heading point starts in [`HeadingModel::FarPoint`].
///
/// The far point doesn't follow the turtle when it moves, so the direction drifts a little after
/// every step. The further away the point, the smaller the drift.
pub const FAR_POINT_REACH: f64 = 1e7;

/// How the turtle remembers which way it is facing.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum HeadingModel {
    /// A direction vector, changed only by turning.
    #[default]
    Direction,
    /// A fixed point in the plane that the turtle faces, starting `reach` units along the x-axis.
    FarPoint { reach: f64 },
}

impl HeadingModel {
    pub fn far_point() -> Self {
        HeadingModel::FarPoint {
            reach: FAR_POINT_REACH,
        }
    }

    /// A far point `reach` units ahead. The point has to lie strictly ahead of the turtle.
    pub fn far_point_at(reach: f64) -> Result<Self, InvalidReach> {
        if reach.is_finite() && reach > 0.0 {
            Ok(HeadingModel::FarPoint { reach })
        } else {
            Err(InvalidReach(reach))
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
#[error("the heading point must be a positive, finite distance away, not {0}")]
pub struct InvalidReach(pub f64);

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Heading {
    Direction(Vec2),
    Toward(Point),
}

#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum ExecError {
    #[error("pop on empty stack")]
    EmptyStack,
    #[error("the turtle has no heading")]
    DegenerateHeading,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TurtleState {
    pub position: Point,
    pub heading: Heading,
}

impl TurtleState {
    /// At the origin, facing along the positive x-axis.
    ///
    /// A far point that isn't strictly ahead is replaced by one [`FAR_POINT_REACH`] away.
    pub fn new(model: HeadingModel) -> Self {
        let heading = match model {
            HeadingModel::Direction => Heading::Direction(Vec2::new(1.0, 0.0)),
            HeadingModel::FarPoint { reach } => {
                let reach = match HeadingModel::far_point_at(reach) {
                    Ok(_) => reach,
                    Err(e) => {
                        log::warn!("{e}, using {FAR_POINT_REACH}");
                        FAR_POINT_REACH
                    }
                };
                Heading::Toward(Point::new(reach, 0.0))
            }
        };
        TurtleState {
            position: Point::ORIGIN,
            heading,
        }
    }

    /// The vector whose angle is the turtle's heading, if it has one.
    fn displacement(&self) -> Option<Vec2> {
        let d = match self.heading {
            Heading::Direction(v) => v,
            Heading::Toward(p) => p - self.position,
        };
        let usable = d.x.is_finite() && d.y.is_finite() && (d.x != 0.0 || d.y != 0.0);
        usable.then_some(d)
    }

    /// The heading in radians, counterclockwise from the positive x-axis.
    pub fn angle(&self) -> Option<f64> {
        self.displacement().map(|d| d.atan2())
    }

    pub fn turn(&mut self, degrees: f64) -> Result<(), ExecError> {
        let d = self.displacement().ok_or(ExecError::DegenerateHeading)?;
        let (sin, cos) = degrees.to_radians().sin_cos();
        let rotated = Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos);
        self.heading = match self.heading {
            Heading::Direction(_) => Heading::Direction(rotated),
            Heading::Toward(_) => Heading::Toward(self.position + rotated),
        };
        Ok(())
    }

    /// Where the turtle ends up after moving `distance` along its heading.
    pub fn ahead(&self, distance: f64) -> Result<Point, ExecError> {
        let angle = self.angle().ok_or(ExecError::DegenerateHeading)?;
        Ok(self.position + Vec2::from_angle(angle) * distance)
    }
}

/// Runs commands against a single turtle.
#[derive(Clone, Debug)]
pub struct Turtle {
    state: TurtleState,
    stack: Vec<TurtleState>,
    // Every consecutive pair is one segment.
    points: Vec<Point>,
}

impl Default for Turtle {
    fn default() -> Self {
        Turtle::new(HeadingModel::default())
    }
}

impl Turtle {
    pub fn new(model: HeadingModel) -> Self {
        Turtle {
            state: TurtleState::new(model),
            stack: Vec::new(),
            points: Vec::new(),
        }
    }

    pub fn state(&self) -> &TurtleState {
        &self.state
    }

    /// How many states are saved on the stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    pub fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        self.points.chunks_exact(2).map(|p| Line::new(p[0], p[1]))
    }

    /// Carries out one command. On error the turtle is left as it was.
    pub fn exec(&mut self, cmd: &Command) -> Result<(), ExecError> {
        log::trace!("{cmd}");
        match *cmd {
            Command::Push => self.stack.push(self.state),
            Command::Pop => {
                self.state = self.stack.pop().ok_or(ExecError::EmptyStack)?;
            }
            Command::Turn(degrees) => self.state.turn(degrees)?,
            Command::Move(distance) => {
                self.state.position = self.state.ahead(distance)?;
            }
            Command::Trace(distance) => {
                let from = self.state.position;
                let to = self.state.ahead(distance)?;
                self.points.push(from);
                self.points.push(to);
                self.state.position = to;
            }
            Command::Unrecognized => {}
        }
        Ok(())
    }
}
