//! `reelmatch`: content-based recommendations from the command line.

mod loader;
mod output;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use reelmatch_core::{
    compare_backends, fingerprint, BackendKind, Error, Recommender, ReelmatchConfig,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::output::{CatalogInfo, OutputFormat};

/// ReelMatch - content-based title recommendations
#[derive(Parser, Debug)]
#[command(name = "reelmatch")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, global = true, env = "REELMATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recommend titles similar to a given title
    Recommend {
        /// CSV catalog with `title` and `listed_in` (or `categories`) columns
        #[arg(long)]
        catalog: PathBuf,

        /// Exact title to find neighbors for
        #[arg(short, long)]
        title: String,

        /// Similarity backend: cosine or nn
        #[arg(short, long)]
        backend: Option<BackendKind>,

        /// Number of recommendations
        #[arg(short)]
        k: Option<usize>,
    },

    /// Time both backends on the same title
    Bench {
        /// CSV catalog
        #[arg(long)]
        catalog: PathBuf,

        /// Exact title to query
        #[arg(short, long)]
        title: String,

        /// Sequential calls per backend
        #[arg(short, long)]
        runs: Option<usize>,

        /// Number of recommendations per call
        #[arg(short)]
        k: Option<usize>,
    },

    /// Summarize a catalog and its feature matrix
    Info {
        /// CSV catalog
        #[arg(long)]
        catalog: PathBuf,
    },
}

fn init_tracing(config: &ReelmatchConfig) {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.level.clone());
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_engine(catalog: &Path, config: &ReelmatchConfig) -> Result<Recommender> {
    let table = loader::load_table(catalog)?;
    Recommender::from_table(&table, config)
        .with_context(|| format!("cannot build recommender from {}", catalog.display()))
}

fn run(args: Args, config: &ReelmatchConfig) -> Result<()> {
    match args.command {
        Command::Recommend {
            catalog,
            title,
            backend,
            k,
        } => {
            let engine = build_engine(&catalog, config)?;
            let backend = backend.unwrap_or(config.recommend.default_backend);
            let k = k.unwrap_or(config.recommend.default_k);
            let recs = engine.recommend(&title, backend, k)?;
            output::print_recommendation(&recs, args.format)
        }
        Command::Bench {
            catalog,
            title,
            runs,
            k,
        } => {
            let engine = build_engine(&catalog, config)?;
            let runs = runs.unwrap_or(config.bench.runs);
            let k = k.unwrap_or(config.recommend.default_k);
            let comparison = compare_backends(&engine, &title, k, runs)?;
            output::print_comparison(&comparison, args.format)
        }
        Command::Info { catalog } => {
            let table = loader::load_table(&catalog)?;
            let engine = Recommender::from_table(&table, config)?;
            let distinct_titles = engine
                .catalog()
                .items()
                .iter()
                .enumerate()
                .filter(|(row, item)| engine.catalog().resolve(item.title()) == Some(*row))
                .count();
            let features = engine.features();
            let info = CatalogInfo {
                path: catalog.display().to_string(),
                items: engine.catalog().len(),
                distinct_titles,
                vocabulary: features.n_cols(),
                nonzero_weights: features.nnz(),
                empty_rows: features.rows().iter().filter(|r| r.is_zero()).count(),
                neighbor_strategy: format!("{:?}", config.index.neighbor_strategy).to_lowercase(),
                fingerprint: fingerprint(&table),
            };
            output::print_info(&info, args.format)
        }
    }
}

/// Exit status for an unknown title, distinct from other failures.
const EXIT_NOT_FOUND: u8 = 2;

fn main() -> ExitCode {
    let args = Args::parse();
    let config = match ReelmatchConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{} {err}", "Error:".red().bold());
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config);
    tracing::debug!(?config, "Configuration loaded");

    match run(args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<Error>() {
            Some(not_found @ Error::NotFound(_)) => {
                eprintln!("{} {not_found}", "Not found:".yellow().bold());
                ExitCode::from(EXIT_NOT_FOUND)
            }
            _ => {
                eprintln!("{} {err:#}", "Error:".red().bold());
                ExitCode::FAILURE
            }
        },
    }
}
