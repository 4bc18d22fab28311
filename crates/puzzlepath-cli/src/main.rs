use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use puzzlepath_lib::{GraphSearcher, Maze, Position};

#[derive(Parser, Debug)]
#[command(author, version, about = "Grid maze best-path utilities")]
struct Cli {
    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find one optimal route through a maze.
    Route {
        /// Maze file: rows of '.', '#', one 'S', and one 'E'.
        file: PathBuf,
    },
    /// Enumerate every tied-optimal route through a maze.
    Routes {
        /// Maze file: rows of '.', '#', one 'S', and one 'E'.
        file: PathBuf,
    },
    /// Print the cheapest cost to every cell reachable from the start.
    Costs {
        /// Maze file: rows of '.', '#', one 'S', and one 'E'.
        file: PathBuf,
    },
}

/// JSON body for `route`. Serialized directly so field order stays as
/// declared, matching the library's row-first `Position` objects.
#[derive(Serialize, Debug)]
struct RouteBody {
    path: Vec<Position>,
    cost: f64,
}

/// JSON body for `routes`. `cost` is `null` when no route exists.
#[derive(Serialize, Debug)]
struct RoutesBody {
    paths: Vec<Vec<Position>>,
    cost: Option<f64>,
}

/// One row of the `costs` JSON table.
#[derive(Serialize, Debug)]
struct CostRow {
    row: i32,
    col: i32,
    cost: f64,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Route { file } => handle_route(&file, cli.format),
        Command::Routes { file } => handle_routes(&file, cli.format),
        Command::Costs { file } => handle_costs(&file, cli.format),
    }
}

fn load_maze(file: &Path) -> Result<Maze> {
    let input = fs::read_to_string(file)
        .with_context(|| format!("failed to read maze from {}", file.display()))?;
    Maze::parse(&input).with_context(|| format!("failed to parse maze from {}", file.display()))
}

fn handle_route(file: &Path, format: Format) -> Result<()> {
    let maze = load_maze(file)?;
    let found = maze
        .solve()
        .with_context(|| format!("no route through {}", file.display()))?;

    match format {
        Format::Text => {
            println!("{}", maze.render_path(&found.nodes));
            println!("cost: {}", found.cost);
        }
        Format::Json => {
            let body = RouteBody {
                path: found.nodes,
                cost: found.cost,
            };
            println!("{}", serde_json::to_string(&body)?);
        }
    }
    Ok(())
}

fn handle_routes(file: &Path, format: Format) -> Result<()> {
    let maze = load_maze(file)?;
    let (paths, cost) = maze.all_best_paths(maze.start());

    match format {
        Format::Text => {
            if paths.is_empty() {
                println!("no routes");
                return Ok(());
            }
            println!("{} route(s) of cost {}", paths.len(), cost);
            for (idx, path) in paths.iter().enumerate() {
                println!();
                println!("route {}:", idx + 1);
                println!("{}", maze.render_path(path));
            }
        }
        Format::Json => {
            let body = RoutesBody {
                cost: if paths.is_empty() { None } else { Some(cost) },
                paths,
            };
            println!("{}", serde_json::to_string(&body)?);
        }
    }
    Ok(())
}

fn handle_costs(file: &Path, format: Format) -> Result<()> {
    let maze = load_maze(file)?;
    let costs = maze.all_reachable_costs(maze.start());

    let mut rows: Vec<(Position, f64)> = costs.into_iter().collect();
    rows.sort_by_key(|(pos, _)| *pos);

    match format {
        Format::Text => {
            for (pos, cost) in rows {
                println!("({}, {}): {}", pos.row, pos.col, cost);
            }
        }
        Format::Json => {
            let body: Vec<CostRow> = rows
                .into_iter()
                .map(|(pos, cost)| CostRow {
                    row: pos.row,
                    col: pos.col,
                    cost,
                })
                .collect();
            println!("{}", serde_json::to_string(&body)?);
        }
    }
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
