//! Pathboard CLI — scripted routing and replay without a canvas.
//!
//! Usage:
//!   pathboard route --edge 1-2:1 --edge 2-3:1 --from 1 --to 3 [--replay]
//!   pathboard demo

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use pathboard::{NodeId, Pathboard, Position, SinkError, VisualEvent, VisualSink};
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "pathboard",
    version,
    about = "Interactive weighted-graph workbench with animated shortest-path replay"
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a graph from an edge list and compute the shortest route
    Route {
        /// Edge spec `a-b:w`, repeatable (e.g. `--edge 1-2:4`)
        #[arg(long = "edge", required = true)]
        edges: Vec<String>,
        /// Source node id
        #[arg(long)]
        from: u64,
        /// Target node id
        #[arg(long)]
        to: u64,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Replay the run as timed events
        #[arg(long)]
        replay: bool,
        /// Delay between replay events, in milliseconds
        #[arg(long, default_value_t = 150)]
        step_delay: u64,
    },
    /// Run the built-in triangle demo with a replay
    Demo {
        /// Delay between replay events, in milliseconds
        #[arg(long, default_value_t = 150)]
        step_delay: u64,
    },
}

/// A sink that narrates replay events on stdout
struct ConsoleSink {
    json: bool,
}

#[async_trait]
impl VisualSink for ConsoleSink {
    async fn deliver(&self, event: VisualEvent) -> Result<(), SinkError> {
        if self.json {
            match serde_json::to_string(&event) {
                Ok(line) => println!("{}", line),
                Err(_) => return Err(SinkError::Closed),
            }
            return Ok(());
        }
        match event {
            VisualEvent::MarkVisited { node } => println!("visited node {}", node),
            VisualEvent::HighlightEdge { edge } => println!("path edge {}", edge),
            VisualEvent::Completed { found: true } => println!("done: path found"),
            VisualEvent::Completed { found: false } => println!("done: no path"),
        }
        Ok(())
    }
}

/// Parse one `a-b:w` edge spec
fn parse_edge_spec(spec: &str) -> Result<(u64, u64, i64), String> {
    let (pair, weight) = spec
        .split_once(':')
        .ok_or_else(|| format!("edge spec '{}' must look like 1-2:4", spec))?;
    let (a, b) = pair
        .split_once('-')
        .ok_or_else(|| format!("edge spec '{}' must look like 1-2:4", spec))?;
    let a: u64 = a
        .trim()
        .parse()
        .map_err(|_| format!("bad node id in '{}'", spec))?;
    let b: u64 = b
        .trim()
        .parse()
        .map_err(|_| format!("bad node id in '{}'", spec))?;
    let weight: i64 = weight
        .trim()
        .parse()
        .map_err(|_| format!("bad weight in '{}'", spec))?;
    Ok((a, b, weight))
}

/// Build a board holding nodes 1..=max and the given edges.
///
/// Node ids are allocated monotonically from 1, so adding `max` nodes
/// makes the DSL's ids line up with the board's.
fn build_board(edges: &[(u64, u64, i64)], max_id: u64, step_delay: u64) -> Result<Pathboard, String> {
    let board = Pathboard::with_step_delay(Duration::from_millis(step_delay));
    for i in 0..max_id {
        let column = (i % 8) as f64;
        let row = (i / 8) as f64;
        board.add_node(Position::new(40.0 + column * 90.0, 40.0 + row * 90.0));
    }
    for &(a, b, weight) in edges {
        board
            .add_edge(NodeId::from(a), NodeId::from(b), weight)
            .map_err(|e| e.to_string())?;
    }
    Ok(board)
}

async fn cmd_route(
    edge_specs: &[String],
    from: u64,
    to: u64,
    json: bool,
    replay: bool,
    step_delay: u64,
) -> i32 {
    let mut edges = Vec::new();
    for spec in edge_specs {
        match parse_edge_spec(spec) {
            Ok(edge) => edges.push(edge),
            Err(message) => {
                eprintln!("Error: {}", message);
                return 1;
            }
        }
    }
    let max_id = edges
        .iter()
        .flat_map(|&(a, b, _)| [a, b])
        .chain([from, to])
        .max()
        .unwrap_or(0);

    let board = match build_board(&edges, max_id, step_delay) {
        Ok(board) => board,
        Err(message) => {
            eprintln!("Error: {}", message);
            return 1;
        }
    };
    if let Err(e) = board
        .set_start(NodeId::from(from))
        .and_then(|_| board.set_end(NodeId::from(to)))
    {
        eprintln!("Error: {}", e);
        return 1;
    }

    let result = match board.route() {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    if json {
        match serde_json::to_string_pretty(&result) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        }
    } else if result.is_found() {
        let stops: Vec<String> = result.path.iter().map(|id| id.to_string()).collect();
        println!(
            "path: {} (cost {})",
            stops.join(" -> "),
            result.cost.unwrap_or(0)
        );
    } else {
        println!("no path from {} to {}", from, to);
    }

    if replay {
        match board.run_into(Box::new(ConsoleSink { json })) {
            Ok(run) => run.wait().await,
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        }
    }
    0
}

async fn cmd_demo(step_delay: u64) -> i32 {
    println!("triangle demo: edges 1-2:1, 2-3:1, 1-3:5, route 1 -> 3");
    cmd_route(
        &[
            "1-2:1".to_string(),
            "2-3:1".to_string(),
            "1-3:5".to_string(),
        ],
        1,
        3,
        false,
        true,
        step_delay,
    )
    .await
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match cli.command {
        Commands::Route {
            edges,
            from,
            to,
            json,
            replay,
            step_delay,
        } => cmd_route(&edges, from, to, json, replay, step_delay).await,
        Commands::Demo { step_delay } => cmd_demo(step_delay).await,
    };
    std::process::exit(code);
}
