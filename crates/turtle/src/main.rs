use std::{
    io::Write,
    path::{Path, PathBuf},
    process::exit,
};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use turtlescript::{Drawing, HeadingModel, Options, FAR_POINT_REACH};

mod svg;

// Exit codes. Skipped lines don't change the exit code.
const EXIT_MISSING_INPUT: i32 = 1;
const EXIT_MALFORMED: i32 = 2;
const EXIT_HALTED: i32 = 3;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum HeadingArg {
    /// Keep a direction vector that only turning changes.
    Direction,
    /// Face a fixed point far away, like the original viewer.
    FarPoint,
}

#[derive(Parser, Debug)]
#[command(about = "Draws turtle graphics scripts")]
struct Args {
    /// The script to draw.
    #[arg(short, long)]
    input: PathBuf,

    /// Write the drawing to this file as an SVG image.
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Width and height of the SVG image, in pixels.
    #[arg(long, default_value_t = 500)]
    size: u32,

    #[arg(long, default_value_t = 1.0)]
    stroke_width: f64,

    /// Print the segment endpoints, one `x y` pair per line.
    #[arg(long)]
    dump: bool,

    #[arg(long, value_enum, default_value_t = HeadingArg::Direction)]
    heading: HeadingArg,

    /// How far away the heading point is, with `--heading far-point`.
    #[arg(long, default_value_t = FAR_POINT_REACH, value_parser = parse_reach)]
    reach: f64,
}

fn parse_reach(s: &str) -> Result<f64, String> {
    let reach: f64 = s.parse().map_err(|e| format!("{e}"))?;
    HeadingModel::far_point_at(reach).map_err(|e| e.to_string())?;
    Ok(reach)
}

impl Args {
    fn options(&self) -> Options {
        let heading = match self.heading {
            HeadingArg::Direction => HeadingModel::Direction,
            HeadingArg::FarPoint => HeadingModel::FarPoint { reach: self.reach },
        };
        Options { heading }
    }
}

fn dump(drawing: &Drawing) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    for p in &drawing.points {
        writeln!(out, "{} {}", p.x, p.y)?;
    }
    Ok(())
}

fn write_svg(drawing: &Drawing, path: &Path, opts: &svg::SvgOptions) -> anyhow::Result<()> {
    let doc = svg::render(drawing, opts);
    std::fs::write(path, doc).with_context(|| format!("failed to write {}", path.display()))?;
    log::info!("wrote {}", path.display());
    Ok(())
}

fn output(args: &Args, drawing: &Drawing) -> anyhow::Result<()> {
    if args.dump {
        dump(drawing)?;
    }
    if let Some(path) = &args.svg {
        let opts = svg::SvgOptions {
            size: args.size,
            stroke_width: args.stroke_width,
        };
        write_svg(drawing, path, &opts)?;
    }
    Ok(())
}

pub fn main() {
    pretty_env_logger::init();
    let args = Args::parse();

    let input = match std::fs::read_to_string(&args.input) {
        Ok(x) => x,
        Err(e) => {
            eprintln!(
                "Failed to open input file {}: {}",
                args.input.display(),
                e
            );
            exit(EXIT_MISSING_INPUT);
        }
    };

    let drawing = match turtlescript::run(&input, &args.options()) {
        Ok(drawing) => drawing,
        Err(e) => {
            eprintln!("{}: {e}", args.input.display());
            exit(EXIT_MALFORMED);
        }
    };

    for e in &drawing.skipped {
        eprintln!("{}: warning: {e}, skipped", args.input.display());
    }
    if let Err(e) = output(&args, &drawing) {
        eprintln!("{e:#}");
        exit(EXIT_MALFORMED);
    }
    log::info!(
        "{} segments in {}",
        drawing.points.len() / 2,
        drawing.bounds
    );

    if let Some(halt) = &drawing.halt {
        eprintln!("{}: {halt}, drawing stopped there", args.input.display());
        exit(EXIT_HALTED);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn args() {
        Args::command().debug_assert();

        let args = Args::parse_from(["turtle", "-i", "square.txt", "--heading", "far-point"]);
        assert_eq!(args.input, PathBuf::from("square.txt"));
        assert_eq!(
            args.options().heading,
            HeadingModel::FarPoint {
                reach: FAR_POINT_REACH
            }
        );
        assert!(!args.dump);
        assert_eq!(args.size, 500);

        let args = Args::parse_from(["turtle", "--input", "a", "--dump", "--svg", "a.svg"]);
        assert_eq!(args.options(), Options::default());
        assert_eq!(args.svg, Some(PathBuf::from("a.svg")));

        let args = Args::parse_from([
            "turtle",
            "-i",
            "a",
            "--heading",
            "far-point",
            "--reach",
            "250",
        ]);
        assert_eq!(args.options().heading, HeadingModel::FarPoint { reach: 250.0 });
    }

    #[test]
    fn reach_must_be_ahead() {
        for reach in ["0", "-5", "NaN", "inf", "far"] {
            let res = Args::try_parse_from(["turtle", "-i", "a", "--reach", reach]);
            assert!(res.is_err(), "{reach}");
        }
    }
}
