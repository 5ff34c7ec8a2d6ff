//! gridgraph CLI - build lattices, query adjacency, scan pixel masks.

use clap::{Parser, Subcommand};
use colored::Colorize;
use gridgraph::{Direction, Lattice, scan_folder};
use serde_json::json;
use std::fmt;
use std::process;

#[derive(Parser)]
#[command(name = "gridgraph")]
#[command(about = "N-dimensional lattice graphs with directional adjacency")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a lattice and print a summary
    Build {
        /// Per-axis extents, comma separated (e.g. 3,4)
        #[arg(short, long)]
        extents: String,

        /// Also wire diagonal neighbors
        #[arg(short, long)]
        diagonal: bool,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Query the neighbors of one lattice point
    Neighbors {
        /// Coordinate of the point, comma separated (e.g. 0,1)
        coordinate: String,

        /// Per-axis extents, comma separated (e.g. 3,4)
        #[arg(short, long)]
        extents: String,

        /// Also wire diagonal neighbors
        #[arg(short, long)]
        diagonal: bool,

        /// Only neighbors in this exact direction (e.g. 0,-1)
        #[arg(long)]
        direction: Option<String>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Scan a pixel-mask folder (specs.txt, critical_raw.txt, tumor_raw.txt)
    Scan {
        /// Folder containing the mask files
        folder: String,

        /// Write the final grid to this file
        #[arg(short, long)]
        output: Option<String>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn die(detail: impl fmt::Display) -> ! {
    eprintln!("{}", format!("Error: {}", detail).red());
    process::exit(1);
}

fn parse_extents(input: &str) -> Vec<usize> {
    input
        .split(',')
        .map(|part| match part.trim().parse::<usize>() {
            Ok(extent) => extent,
            Err(_) => die(format!("invalid extent '{}'", part.trim())),
        })
        .collect()
}

fn parse_direction(input: &str) -> Direction {
    let components = input
        .split(',')
        .map(|part| match part.trim().parse::<i64>() {
            Ok(component) => component,
            Err(_) => die(format!("invalid direction component '{}'", part.trim())),
        })
        .collect();
    Direction::new(components)
}

/// CLI coordinates are comma lists; node names are tuple strings.
fn coordinate_to_name(input: &str) -> String {
    let coordinate: Vec<usize> = input
        .split(',')
        .map(|part| match part.trim().parse::<usize>() {
            Ok(value) => value,
            Err(_) => die(format!("invalid coordinate component '{}'", part.trim())),
        })
        .collect();
    gridgraph::coordinate_name(&coordinate)
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            extents,
            diagonal,
            format,
        } => {
            let extents = parse_extents(&extents);
            let lattice: Lattice = match Lattice::build(&extents, diagonal) {
                Ok(lattice) => lattice,
                Err(e) => die(e),
            };

            if format == "json" {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "extents": lattice.extents(),
                        "nodes": lattice.node_count(),
                        "edges": lattice.edge_count(),
                        "unique_directions": lattice.unique_directions(),
                    }))
                    .unwrap_or_default()
                );
            } else {
                println!("{}", "Lattice summary:".bold());
                println!("  {} {}", "nodes:".cyan(), lattice.node_count());
                println!("  {} {}", "edges:".cyan(), lattice.edge_count());
                println!("  {}", "unique directions:".cyan());
                for direction in lattice.unique_directions() {
                    println!("    {}", direction);
                }
            }
        }

        Commands::Neighbors {
            coordinate,
            extents,
            diagonal,
            direction,
            format,
        } => {
            let extents = parse_extents(&extents);
            let lattice: Lattice = match Lattice::build(&extents, diagonal) {
                Ok(lattice) => lattice,
                Err(e) => die(e),
            };

            let name = coordinate_to_name(&coordinate);
            let filter = direction.as_deref().map(parse_direction);
            let neighbors = match lattice.neighbors_of(&name, filter.as_ref()) {
                Ok(neighbors) => neighbors,
                Err(e) => die(e),
            };

            if format == "json" {
                let entries: Vec<_> = neighbors
                    .iter()
                    .map(|(neighbor, dir)| json!({"name": neighbor, "direction": dir}))
                    .collect();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "node": name,
                        "count": entries.len(),
                        "neighbors": entries,
                    }))
                    .unwrap_or_default()
                );
            } else {
                println!(
                    "{}",
                    format!("{} neighbors of {}:", neighbors.len(), name).bold()
                );
                for (neighbor, dir) in &neighbors {
                    println!("  {} {}", neighbor.cyan(), format!("{}", dir).dimmed());
                }
            }
        }

        Commands::Scan {
            folder,
            output,
            format,
        } => {
            let report = match scan_folder(folder.as_ref()) {
                Ok(report) => report,
                Err(e) => die(e),
            };

            if let Some(path) = &output {
                if let Err(e) = std::fs::write(path, &report.result) {
                    die(e);
                }
            }

            if format == "json" {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).unwrap_or_default()
                );
            } else {
                println!("{}", "Critical area:".bold());
                println!("{}", report.critical);
                println!("{}", "Border without tumor taken out:".bold());
                println!("{}", report.bordered);
                println!("{}", "Tumor:".bold());
                println!("{}", report.tumor);
                println!("{}", "Final result:".bold());
                println!("{}", report.result);
            }
        }
    }
}
