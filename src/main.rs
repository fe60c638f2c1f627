use std::io;

use anyhow::Context;
use blockgame::{CanvasPos, Config, Event, Fit, Game, Palette, PlacementRule, PointerState};
use clap::Parser;
use rand::{rngs::StdRng, Rng, SeedableRng};
use recap::Recap;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Feed one frame of pointer input per line to the game, collecting what happened.
fn run<R: Rng>(
    game: &mut Game<R>,
    lines: impl IntoIterator<Item = impl AsRef<str>>,
) -> anyhow::Result<Vec<String>> {
    let mut output = Vec::new();
    for line in lines {
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }
        let frame: InputFrame = line
            .parse()
            .with_context(|| format!("couldn't parse frame {line:?}"))?;
        output.extend(game.update(&frame.pointer()).into_iter().map(describe));
    }
    Ok(output)
}

fn describe(event: Event) -> String {
    match event {
        Event::DragStarted { slot } => format!("drag {slot}"),
        Event::Released { slot, fit } => {
            let why = match fit {
                Fit::Fits => "fits".to_string(),
                Fit::OutOfBounds => "out of bounds".to_string(),
                Fit::Overlaps { at } => format!("overlaps {},{}", at.x, at.y),
                Fit::EmptyShape => "empty shape".to_string(),
            };
            format!("release {slot}: {why}")
        }
        Event::Placed { slot, at } => format!("place {slot} at {},{}", at.x, at.y),
    }
}

#[derive(Debug, Parser)]
#[command(about, override_usage = "blockgame [OPTIONS] < frames.txt")]
struct Args {
    /// Seed for piece generation, drawn from the OS if not given
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = 1920)]
    monitor_width: i32,
    #[arg(long, default_value_t = 1080)]
    monitor_height: i32,
    /// Use this cell size in pixels instead of sizing cells to the monitor
    #[arg(long)]
    cell_size: Option<i32>,
    #[arg(long, value_enum, default_value_t = PlacementRule::BoundsOnly)]
    placement: PlacementRule,
    /// Chance, in percent, that each square of a new piece is filled
    #[arg(long, default_value_t = 35)]
    square_probability: u32,
    /// Hand out pieces with no squares instead of drawing again
    #[arg(long)]
    allow_empty: bool,
    #[arg(long)]
    debug: bool,
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let config = Config {
        square_probability: args.square_probability,
        reroll_empty: !args.allow_empty,
        placement: args.placement,
        ..Config::default()
    };
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut game = match args.cell_size {
        Some(cell_size) => Game::new(&config, cell_size, Palette::default(), rng),
        None => Game::for_monitor(
            &config,
            (args.monitor_width, args.monitor_height),
            Palette::default(),
            rng,
        ),
    }
    .context("couldn't set up game")?;
    info!(
        cell_size = game.mapper().cell_size(),
        window = ?game.mapper().window_size_px(),
        "ready"
    );

    let lines = io::stdin()
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .context("couldn't read line from stdin")?;
    for line in run(&mut game, lines)? {
        println!("{line}");
    }
    print!("{}", game.board());
    Ok(())
}

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum Action {
    Press,
    Move,
    Release,
}

#[derive(Debug, Deserialize, Recap, PartialEq, Eq, Clone, Copy)]
#[recap(regex = r#"^\s*(?P<action>\w+)\s+(?P<x>-?\d+)\s*,\s*(?P<y>-?\d+)\s*$"#)]
struct InputFrame {
    action: Action,
    x: i32,
    y: i32,
}

impl InputFrame {
    fn pointer(&self) -> PointerState {
        PointerState {
            position: CanvasPos::new(self.x, self.y),
            pressed: self.action == Action::Press,
            released: self.action == Action::Release,
        }
    }
}

#[cfg(test)]
mod tests {
    use blockgame::{Board, GridPos};
    use indoc::indoc;

    use super::*;

    fn game(placement: PlacementRule) -> Game<StdRng> {
        let config = Config {
            placement,
            square_probability: 100,
            ..Config::default()
        };
        Game::new(&config, 50, Palette::default(), StdRng::seed_from_u64(0)).unwrap()
    }

    #[test]
    fn parse_frames() -> anyhow::Result<()> {
        assert_eq!(
            "press 460,10".parse::<InputFrame>()?,
            InputFrame {
                action: Action::Press,
                x: 460,
                y: 10
            }
        );
        assert_eq!(
            "  release -5, 30 ".parse::<InputFrame>()?.pointer(),
            PointerState {
                position: CanvasPos::new(-5, 30),
                pressed: false,
                released: true
            }
        );
        assert!("jump 1,2".parse::<InputFrame>().is_err());
        assert!("press 1".parse::<InputFrame>().is_err());
        Ok(())
    }

    #[test]
    fn describe_events() {
        assert_eq!(describe(Event::DragStarted { slot: 2 }), "drag 2");
        assert_eq!(
            describe(Event::Released {
                slot: 1,
                fit: Fit::Overlaps {
                    at: GridPos::new(3, 4)
                }
            }),
            "release 1: overlaps 3,4"
        );
        assert_eq!(
            describe(Event::Placed {
                slot: 0,
                at: GridPos::new(0, 6)
            }),
            "place 0 at 0,6"
        );
    }

    #[test]
    fn bounds_only_springs_back() -> anyhow::Result<()> {
        let mut g = game(PlacementRule::BoundsOnly);
        let output = run(
            &mut g,
            indoc! {"
                press 460,10
                move 100,100

                release 100,100
            "}
            .lines(),
        )?;
        assert_eq!(output, vec!["drag 0", "release 0: fits"]);
        assert_eq!(g.board(), &Board::default());
        Ok(())
    }

    #[test]
    fn occupancy_fills_board() -> anyhow::Result<()> {
        let mut g = game(PlacementRule::Occupancy);
        let output = run(&mut g, ["press 460,10", "release 10,10"])?;
        assert_eq!(output, vec!["drag 0", "place 0 at 0,0"]);
        assert_eq!(
            g.board().to_string(),
            indoc! {"
                # # # . . . . . .
                # # # . . . . . .
                # # # . . . . . .
                . . . . . . . . .
                . . . . . . . . .
                . . . . . . . . .
                . . . . . . . . .
                . . . . . . . . .
                . . . . . . . . .
            "}
        );
        Ok(())
    }

    #[test]
    fn bad_line_is_an_error() {
        let mut g = game(PlacementRule::BoundsOnly);
        assert!(run(&mut g, ["press 460,10", "wiggle"]).is_err());
    }
}
