use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

/// HUC12 subwatershed lookup CLI tool
#[derive(Parser)]
#[command(name = "huc12")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Feature service query endpoint
    #[arg(long, env = "HUC12_SERVICE_URL", global = true)]
    service_url: Option<String>,

    /// Log requests and match counts
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Which columns `query` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputKind {
    /// Both HUC12 and HUC12_Name
    Table,
    /// HUC12 only
    Codes,
    /// HUC12_Name only
    Names,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up one or more points
    Query {
        /// X coordinate(s), usually longitude
        #[arg(long, num_args = 1.., required = true, allow_negative_numbers = true)]
        x: Vec<f64>,

        /// Y coordinate(s), usually latitude
        #[arg(long, num_args = 1.., required = true, allow_negative_numbers = true)]
        y: Vec<f64>,

        /// CRS identifier(s), e.g. 4326 or EPSG:2992
        #[arg(long, num_args = 1.., default_value = "4326")]
        crs: Vec<String>,

        /// Columns to print
        #[arg(short, long, value_enum, default_value_t = OutputKind::Table)]
        output: OutputKind,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Add HUC12 columns to every point in a file
    Batch {
        /// Input file (CSV or GeoJSON)
        input: PathBuf,

        /// Output file (same format as input if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Column name for x (CSV only)
        #[arg(long, default_value = "x")]
        x_col: String,

        /// Column name for y (CSV only)
        #[arg(long, default_value = "y")]
        y_col: String,

        /// Column holding a per-row CRS (CSV only)
        #[arg(long)]
        crs_col: Option<String>,

        /// CRS used when no per-row CRS is given
        #[arg(long, default_value = "4326")]
        crs: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("warn,huc12=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Query {
            x,
            y,
            crs,
            output,
            json,
        } => commands::query::run(cli.service_url, x, y, crs, output, json),
        Commands::Batch {
            input,
            output,
            x_col,
            y_col,
            crs_col,
            crs,
        } => commands::batch::run(cli.service_url, input, output, x_col, y_col, crs_col, crs),
    }
}
