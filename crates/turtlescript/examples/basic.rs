use turtlescript::{run, Options};

fn main() {
    let script = "-100 100 -100 100
push
trace 50
pop
turn 120
trace 50
turn 120
trace 50
";
    let drawing = run(script, &Options::default()).unwrap();
    dbg!(drawing.lines().collect::<Vec<_>>());
}
