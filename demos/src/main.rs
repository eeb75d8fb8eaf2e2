//! navgrid playground.
//!
//! Builds a random board, searches a path across it and prints the result
//! as ASCII. With `--units`, also sends units to random cells, blocks a cell
//! on one of their routes and re-plans.
//!
//! Set `RUST_LOG=debug` (or `trace`) to see what the search is doing.

use anyhow::{Context, bail};
use clap::Parser;
use navgrid_core::Location;
use navgrid_field::{Field, FieldConfig, FieldEvent, Navigator, UnitId};
use navgrid_paths::{PartialPolicy, Pathfinder, SearchConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "navgrid-demo")]
#[command(about = "Search paths on a random board with walls")]
struct Cli {
    /// Board side in cells (random between 5 and 10 if omitted)
    #[arg(long)]
    size: Option<i32>,
    /// Probability that a cell starts out blocked
    #[arg(long, default_value = "0.25")]
    density: f64,
    /// RNG seed, for reproducible boards
    #[arg(long)]
    seed: Option<u64>,
    /// Start cell as X,Y (defaults to the bottom-left corner)
    #[arg(long, value_parser = parse_location)]
    start: Option<Location>,
    /// Goal cell as X,Y (defaults to the top-right corner)
    #[arg(long, value_parser = parse_location)]
    goal: Option<Location>,
    /// End partial paths at the cell closest to the goal
    #[arg(long)]
    closest: bool,
    /// Number of units to send to random cells
    #[arg(long, default_value = "0")]
    units: u32,
}

fn parse_location(s: &str) -> Result<Location, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x {x:?}: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y {y:?}: {e}"))?;
    Ok(Location::new(x, y))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if !(0.0..=1.0).contains(&cli.density) {
        bail!("density must be within [0, 1], got {}", cli.density);
    }

    let seed = cli.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = StdRng::seed_from_u64(seed);
    tracing::info!("seed {seed}");

    let config = FieldConfig::default();
    let mut field = match cli.size {
        Some(n) => Field::with_cell_count(n, &config),
        None => Field::new(&config, &mut rng),
    }
    .context("building the board")?;
    let n = field.cell_count();

    let start = cli.start.unwrap_or(Location::new(0, 0));
    let goal = cli.goal.unwrap_or(Location::new(n - 1, n - 1));

    let cells: Vec<_> = field.grid().locations().collect();
    for c in cells {
        if c != start && rng.random_bool(cli.density) {
            field.block(c)?;
        }
    }
    field.clear_events();

    let search_config = if cli.closest {
        SearchConfig::with_partial(PartialPolicy::ClosestToGoal)
    } else {
        SearchConfig::default()
    };

    let mut pf = Pathfinder::with_config(field.grid(), search_config);
    let result = pf
        .find_path(field.grid(), start, goal)
        .with_context(|| format!("searching {start} -> {goal}"))?;

    println!("{}", render(&field, &result.path, start, goal));
    if result.found {
        println!(
            "path found: {} steps, cost {}",
            result.path.len() - 1,
            result.cost
        );
    } else {
        println!(
            "goal unreachable; partial path of {} steps ends at {}",
            result.path.len() - 1,
            result.path[result.path.len() - 1]
        );
    }

    if cli.units > 0 {
        run_units(&mut field, cli.units, search_config, &mut rng)?;
    }
    Ok(())
}

/// Send units to random cells, then block a cell ahead of the first one and
/// re-plan everyone whose route crossed it.
fn run_units(
    field: &mut Field,
    count: u32,
    config: SearchConfig,
    rng: &mut StdRng,
) -> anyhow::Result<()> {
    let mut nav = Navigator::with_config(field, config);
    let mut units = Vec::new();
    for id in 0..count {
        let unit = UnitId(id);
        let Some(start) = field.pick_random_unblocked(rng) else {
            bail!("no free cell left for unit {id}");
        };
        field.occupy(start)?;
        if nav.request_path_to_random(field, unit, start, rng)? {
            units.push(unit);
        }
    }

    let Some(victim) = units
        .iter()
        .filter_map(|&u| nav.path(u))
        .find(|p| p.len() > 2)
        .map(|p| p[p.len() / 2])
    else {
        println!("no route long enough to cut");
        return Ok(());
    };

    if !field.block(victim)? {
        println!("could not block {victim}");
        return Ok(());
    }

    let events: Vec<_> = field.drain_events().collect();
    for ev in events {
        let FieldEvent::Blocked(cell) = ev else {
            continue;
        };
        for unit in nav.units_affected_by(cell, |_| 0) {
            let Some(&here) = nav.path(unit).and_then(|p| p.first()) else {
                continue;
            };
            if nav.replan(field, unit, here)? {
                tracing::info!("{unit:?} re-planned around {cell}");
            } else {
                tracing::warn!("{unit:?} lost its destination after {cell} was blocked");
            }
        }
    }

    for &unit in &units {
        match nav.path(unit) {
            Some(p) => {
                let (from, to) = (p[0], p[p.len() - 1]);
                println!("{unit:?}: {} steps {from} -> {to}", p.len() - 1);
                println!("{}", render(field, p, from, to));
            }
            None => println!("{unit:?}: idle"),
        }
    }
    Ok(())
}

/// Draw the board with north at the top.
fn render(field: &Field, path: &[Location], start: Location, goal: Location) -> String {
    let n = field.cell_count();
    let mut out = String::with_capacity(((n + 1) * n) as usize);
    for y in (0..n).rev() {
        for x in 0..n {
            let l = Location::new(x, y);
            let c = if l == start {
                'S'
            } else if l == goal {
                'G'
            } else if path.contains(&l) {
                '*'
            } else if field.is_blocked(l) {
                '#'
            } else {
                '.'
            };
            out.push(c);
        }
        out.push('\n');
    }
    out
}
