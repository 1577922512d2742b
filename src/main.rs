mod cli;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use cli::{list::list_cmd, resolve::parse_cmd, resolve::resolve_cmd, resolve_color_mode};
use modelref::color::configure_color;
use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "MODELREF_LOG";

#[derive(Default, Clone, Copy, ValueEnum, strum_macros::Display, strum_macros::EnumString)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum RequestedColorMode {
    #[default]
    Auto,
    On,
    Off,
}

#[derive(Parser)]
#[command(name = "modelref")]
#[command(about = "Parse, alias and resolve model references", version = "0.0.1")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(long, default_value_t = RequestedColorMode::default())]
    color: RequestedColorMode,
    /// Read the configuration from the specified file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a model reference without resolving it
    Parse(ParseArgs),
    /// Resolve a comma-separated list of model references
    Resolve(ResolveArgs),
    /// List models or aliases
    List(ListArgs),
}

/// Output formats
#[derive(ValueEnum, Default, Clone, Copy, strum_macros::Display, strum_macros::EnumString)]
#[strum(serialize_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub(crate) enum OutputFormat {
    /// Format the output as a table
    #[default]
    Table,
    /// Format the output as JSON
    Json,
    /// Format the output as a table without a header
    HeaderlessTable,
}

#[derive(Parser)]
pub(crate) struct ParseArgs {
    /// Output with the specified format
    #[arg(short, long, default_value_t = OutputFormat::default())]
    format: OutputFormat,
    /// The model reference, e.g. "test/model-1(reasoning,cost<1)"
    reference: String,
}

#[derive(Parser)]
pub(crate) struct ResolveArgs {
    /// Output with the specified format
    #[arg(short, long, default_value_t = OutputFormat::default())]
    format: OutputFormat,
    /// One or more comma-separated model references
    references: String,
}

/// Possible listings
#[derive(Subcommand)]
pub(crate) enum ListObject {
    /// Catalogued models
    Models(ListModelArgs),
    /// Registered aliases
    Aliases,
}

#[derive(Parser)]
pub(crate) struct ListArgs {
    /// Output the listing with the specified format
    #[arg(short, long, default_value_t = OutputFormat::default())]
    format: OutputFormat,
    /// List the specified object
    #[command(subcommand)]
    object: ListObject,
}

#[derive(Parser, Default)]
pub(crate) struct ListModelArgs {
    /// Limit listing to the specified author
    #[arg(short, long)]
    author: Option<String>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    init_tracing();
    configure_color(resolve_color_mode(cli.color));

    match &cli.command {
        Commands::Parse(args) => parse_cmd(args),
        Commands::Resolve(args) => resolve_cmd(cli.config.clone(), args),
        Commands::List(args) => list_cmd(cli.config.clone(), args),
    }
}
