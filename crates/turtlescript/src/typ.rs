use kurbo::Rect;

/// Where a statement came from in the script.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Span {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column, in characters.
    pub column: usize,
    pub start: usize,
    pub end: usize,
}

impl From<crate::parse::Span<'_>> for Span {
    fn from(sp: crate::parse::Span) -> Self {
        Span {
            line: sp.location_line(),
            column: sp.get_utf8_column(),
            start: sp.location_offset(),
            end: sp.location_offset() + sp.fragment().len(),
        }
    }
}

/// The viewing region `[left, right] × [bottom, top]` declared on the first line of a script.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl Bounds {
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.left, self.bottom, self.right, self.top)
    }
}

impl std::fmt::Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} {}", self.left, self.right, self.bottom, self.top)
    }
}

/// The names of the commands a script understands.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Keyword {
    Push,
    Pop,
    Turn,
    Trace,
    Move,
}

impl Keyword {
    pub fn name(&self) -> &'static str {
        match self {
            Keyword::Push => "push",
            Keyword::Pop => "pop",
            Keyword::Turn => "turn",
            Keyword::Trace => "trace",
            Keyword::Move => "move",
        }
    }

    pub fn takes_arg(&self) -> bool {
        matches!(self, Keyword::Turn | Keyword::Trace | Keyword::Move)
    }

    /// Builds the command for this keyword. The argument is ignored by `push` and `pop`.
    pub fn with_arg(self, arg: f64) -> Command {
        match self {
            Keyword::Push => Command::Push,
            Keyword::Pop => Command::Pop,
            Keyword::Turn => Command::Turn(arg),
            Keyword::Trace => Command::Trace(arg),
            Keyword::Move => Command::Move(arg),
        }
    }
}

impl TryFrom<&str> for Keyword {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Ok(match value {
            "push" => Keyword::Push,
            "pop" => Keyword::Pop,
            "turn" => Keyword::Turn,
            "trace" => Keyword::Trace,
            "move" => Keyword::Move,
            _ => Err(())?,
        })
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    Push,
    Pop,
    /// Counterclockwise rotation, in degrees.
    Turn(f64),
    Trace(f64),
    Move(f64),
    Unrecognized,
}

impl Command {
    pub fn keyword(&self) -> Option<Keyword> {
        match self {
            Command::Push => Some(Keyword::Push),
            Command::Pop => Some(Keyword::Pop),
            Command::Turn(_) => Some(Keyword::Turn),
            Command::Trace(_) => Some(Keyword::Trace),
            Command::Move(_) => Some(Keyword::Move),
            Command::Unrecognized => None,
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Push => f.write_str("push"),
            Command::Pop => f.write_str("pop"),
            Command::Turn(x) => write!(f, "turn {x}"),
            Command::Trace(x) => write!(f, "trace {x}"),
            Command::Move(x) => write!(f, "move {x}"),
            Command::Unrecognized => f.write_str("<unrecognized>"),
        }
    }
}

/// A command together with the line it was read from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stmt {
    pub cmd: Command,
    pub span: Span,
}

/// The first line of a script didn't hold four numbers.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("line {}: expected four numbers `left right bottom top`, found {found:?}", .span.line)]
pub struct MalformedBounds {
    pub found: String,
    pub span: Span,
}

/// A recognized command that can't be carried out. The line is skipped and the run goes on.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum MalformedCommand {
    #[error("line {}: {command} needs a numeric argument", .span.line)]
    MissingArg { command: Keyword, span: Span },
    #[error("line {}: {command} doesn't like {arg:?} as input", .span.line)]
    BadArg {
        command: Keyword,
        arg: String,
        span: Span,
    },
    #[error("line {}: can't {command}, the turtle has no heading", .span.line)]
    DegenerateHeading { command: Command, span: Span },
}

impl MalformedCommand {
    pub fn span(&self) -> Span {
        match self {
            MalformedCommand::MissingArg { span, .. }
            | MalformedCommand::BadArg { span, .. }
            | MalformedCommand::DegenerateHeading { span, .. } => *span,
        }
    }
}

/// A `pop` with nothing saved. This ends the run.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
#[error("line {}: pop on empty stack", .span.line)]
pub struct EmptyStack {
    pub span: Span,
}
