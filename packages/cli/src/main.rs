#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line host for the film location map.
//!
//! Loads a dataset once, owns the filter session, and hands views to the
//! renderer as JSON. Without a subcommand it starts the interactive
//! dropdown mode.

mod interactive;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use film_map_filter::FilterSession;
use film_map_filter_models::{Dimension, FilterCommand};
use film_map_ingest::{Loader, all_datasets, find_dataset, parse_dataset};
use film_map_ingest_models::DatasetDefinition;
use film_map_spatial::SectorIndex;

#[derive(Parser)]
#[command(name = "film_map_cli", about = "Film location map filter tool")]
struct Cli {
    /// Registered dataset to load
    #[arg(long, default_value = "valparaiso")]
    dataset: String,
    /// Load a dataset definition from a TOML file instead of the registry
    #[arg(long)]
    dataset_file: Option<PathBuf>,
    /// Directory that relative document paths resolve against
    #[arg(long, default_value = ".")]
    base_dir: PathBuf,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all registered datasets
    Datasets,
    /// Apply filters and print the render payload as JSON
    View {
        /// Date range key (e.g., "1951-1973", default "all-dates")
        #[arg(long)]
        date: Option<String>,
        /// Film title (default "all-films")
        #[arg(long)]
        film: Option<String>,
        /// Sector name (default "all-sectors")
        #[arg(long)]
        sector: Option<String>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Filter with interactive prompts
    Interactive,
}

fn resolve_dataset(cli: &Cli) -> Result<DatasetDefinition, Box<dyn std::error::Error>> {
    if let Some(path) = &cli.dataset_file {
        let toml_str = std::fs::read_to_string(path)?;
        return Ok(parse_dataset(&toml_str)?);
    }
    find_dataset(&cli.dataset).ok_or_else(|| format!("Unknown dataset: {}", cli.dataset).into())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    if matches!(cli.command, Some(Commands::Datasets)) {
        for dataset in all_datasets() {
            println!("{:<16} {}", dataset.id(), dataset.name());
        }
        return Ok(());
    }

    let dataset = resolve_dataset(&cli)?;
    let store = Loader::new(cli.base_dir.clone())
        .load_store_or_empty(&dataset)
        .await;
    let index = SectorIndex::build(store.sectors());
    let mut session = FilterSession::new(Arc::new(store), dataset.filter);

    match cli.command {
        Some(Commands::View {
            date,
            film,
            sector,
            pretty,
        }) => {
            let requested = [
                (Dimension::Date, date),
                (Dimension::Film, film),
                (Dimension::Sector, sector),
            ];
            for (dimension, key) in requested {
                if let Some(key) = key {
                    session.dispatch(&FilterCommand::set(dimension, &key)?);
                }
            }

            let payload = render::payload(&session, &index);
            let json = if pretty {
                serde_json::to_string_pretty(&payload)?
            } else {
                serde_json::to_string(&payload)?
            };
            println!("{json}");
        }
        Some(Commands::Interactive) | None => interactive::run(&mut session)?,
        Some(Commands::Datasets) => {}
    }

    log::debug!("Final selection: {:?}", session.selection());

    Ok(())
}
