use nom::{
    bytes::complete::{take_till, take_till1, take_while},
    character::complete::char,
    combinator::{all_consuming, opt},
    multi::many0,
    number::complete::double,
    sequence::{preceded, terminated},
    IResult,
};

use crate::typ::{Bounds, Command, Keyword, MalformedBounds, MalformedCommand, Stmt};

pub type Span<'a> = nom_locate::LocatedSpan<&'a str>;

/// One line of input, without its line ending.
fn line(input: Span) -> IResult<Span, Span> {
    terminated(take_till(|c: char| c == '\n'), opt(char('\n')))(input)
}

/// One whitespace-separated token. Any Unicode whitespace separates tokens.
fn token(input: Span) -> IResult<Span, Span> {
    preceded(
        take_while(|c: char| c.is_whitespace()),
        take_till1(|c: char| c.is_whitespace()),
    )(input)
}

fn tokens(input: Span) -> Vec<Span> {
    match many0(token)(input) {
        Ok((_, toks)) => toks,
        Err(_) => Vec::new(),
    }
}

/// The value of a token that is a number and nothing else. `nan` and `inf` don't count.
fn number(tok: Span) -> Option<f64> {
    let parsed: IResult<Span, f64> = all_consuming(double)(tok);
    parsed.ok().map(|(_, x)| x).filter(|x| x.is_finite())
}

pub fn bounds(line: Span) -> Result<Bounds, MalformedBounds> {
    let malformed = || MalformedBounds {
        found: line.fragment().trim().to_owned(),
        span: line.into(),
    };
    let toks = tokens(line);
    if toks.len() > 4 {
        log::debug!(
            "line {}: ignoring {} extra tokens after the bounds",
            line.location_line(),
            toks.len() - 4
        );
    }
    let nums = toks
        .into_iter()
        .take(4)
        .map(number)
        .collect::<Option<Vec<f64>>>()
        .ok_or_else(malformed)?;
    let [left, right, bottom, top] = nums.as_slice() else {
        return Err(malformed());
    };
    Ok(Bounds {
        left: *left,
        right: *right,
        bottom: *bottom,
        top: *top,
    })
}

pub fn stmt(line: Span) -> Result<Stmt, MalformedCommand> {
    let span = line.into();
    let unrecognized = Stmt {
        cmd: Command::Unrecognized,
        span,
    };
    let Ok((rest, name)) = token(line) else {
        return Ok(unrecognized);
    };
    let Ok(keyword) = Keyword::try_from(*name.fragment()) else {
        return Ok(unrecognized);
    };
    if !keyword.takes_arg() {
        return Ok(Stmt {
            cmd: keyword.with_arg(0.0),
            span,
        });
    }

    let Ok((_, arg)) = token(rest) else {
        return Err(MalformedCommand::MissingArg {
            command: keyword,
            span,
        });
    };
    let arg = number(arg).ok_or_else(|| MalformedCommand::BadArg {
        command: keyword,
        arg: arg.fragment().to_string(),
        span,
    })?;
    Ok(Stmt {
        cmd: keyword.with_arg(arg),
        span,
    })
}

/// The commands of a script, parsed one line at a time.
#[derive(Clone, Debug)]
pub struct Commands<'a> {
    rest: Span<'a>,
}

impl<'a> Iterator for Commands<'a> {
    type Item = Result<Stmt, MalformedCommand>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.fragment().is_empty() {
            return None;
        }
        let (rest, line) = line(self.rest).ok()?;
        self.rest = rest;
        Some(stmt(line))
    }
}

/// A script whose bounds have been read. The commands are parsed as they're consumed.
#[derive(Clone, Debug)]
pub struct Script<'a> {
    pub bounds: Bounds,
    pub commands: Commands<'a>,
}

pub fn script(input: &str) -> Result<Script<'_>, MalformedBounds> {
    let input = Span::new(input);
    // An empty script still has a (blank) first line to complain about.
    let (rest, first) = line(input).unwrap_or((input, input));
    let bounds = bounds(first)?;
    Ok(Script {
        bounds,
        commands: Commands { rest },
    })
}
