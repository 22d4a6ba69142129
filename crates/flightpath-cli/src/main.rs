use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use flightpath_cli::commands::config::{handle_config_command, ConfigAction};
use flightpath_cli::commands::graph::{handle_graph_command, GraphCommandArgs};
use flightpath_cli::commands::route::{handle_route_command, AlgorithmArg, RouteCommandArgs};
use flightpath_cli::commands::search::handle_search_command;
use flightpath_cli::commands::CommandContext;
use flightpath_cli::output::OutputFormat;
use flightpath_cli::terminal::ColorPalette;
use flightpath_lib::{OutputMode, RecordFilter};

#[derive(Parser, Debug)]
#[command(author, version, about = "Range-limited flight route planning over airport datasets")]
struct Cli {
    /// Airport dataset (.json or OurAirports .csv). Defaults to FLIGHTPATH_DATASET
    /// or the platform data directory.
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Directory holding settings.json.
    #[arg(long, global = true, env = "FLIGHTPATH_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Keep only airports on this continent (NA, EU, ...).
    #[arg(long, global = true)]
    continent: Option<String>,

    /// Include small airports (by default only medium and large are loaded).
    #[arg(long, global = true)]
    include_small: bool,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan a route between two airport codes.
    Route(RouteArgs),
    /// Find airports whose name or code contains the query.
    Search {
        query: String,
    },
    /// Build the graph and report its size, optionally exporting it.
    Graph(GraphArgs),
    /// Show or change saved settings.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Args, Debug)]
struct RouteArgs {
    /// Departure airport code.
    #[arg(long = "from")]
    from: String,
    /// Arrival airport code.
    #[arg(long = "to")]
    to: String,
    /// Aircraft range in nautical miles (overrides the saved range).
    #[arg(long)]
    range: Option<u32>,
    #[arg(long, value_enum)]
    algorithm: Option<AlgorithmArg>,
    /// Hop-aware tolerance in nautical miles.
    #[arg(long)]
    buffer: Option<u32>,
    /// Print airport names instead of codes.
    #[arg(long)]
    names: bool,
    /// Build the graph on one thread.
    #[arg(long)]
    sequential: bool,
}

#[derive(Args, Debug)]
struct GraphArgs {
    #[arg(long)]
    range: Option<u32>,
    /// Write a Graphviz DOT file.
    #[arg(long)]
    dot: Option<PathBuf>,
    /// Print every airport's adjacency list.
    #[arg(long)]
    print: bool,
    #[arg(long)]
    sequential: bool,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print the current settings.
    Show,
    /// Save the aircraft range in nautical miles.
    SetRange { range: u32 },
    /// Save the path label mode (codes or names).
    SetMode { mode: OutputMode },
    /// Save the hop-aware buffer in nautical miles.
    SetBuffer { buffer: u32 },
    /// Save the default search algorithm.
    SetAlgorithm {
        #[arg(value_enum)]
        algorithm: AlgorithmArg,
    },
    /// Save whether graphs are built in parallel.
    SetParallel {
        #[arg(action = clap::ArgAction::Set)]
        parallel: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut filter = if cli.include_small {
        RecordFilter::all_categories()
    } else {
        RecordFilter::default()
    };
    if let Some(continent) = cli.continent {
        filter = filter.with_continent(continent);
    }

    let ctx = CommandContext {
        dataset: cli.dataset,
        config_dir: cli.config_dir,
        format: cli.format,
        filter,
        palette: ColorPalette::detect(),
    };

    match cli.command {
        Command::Route(args) => handle_route_command(
            &ctx,
            &RouteCommandArgs {
                from: args.from,
                to: args.to,
                range: args.range,
                algorithm: args.algorithm,
                buffer: args.buffer,
                names: args.names,
                sequential: args.sequential,
            },
        ),
        Command::Search { query } => handle_search_command(&ctx, &query),
        Command::Graph(args) => handle_graph_command(
            &ctx,
            &GraphCommandArgs {
                range: args.range,
                dot: args.dot,
                print: args.print,
                sequential: args.sequential,
            },
        ),
        Command::Config(command) => {
            let action = match command {
                ConfigCommand::Show => ConfigAction::Show,
                ConfigCommand::SetRange { range } => ConfigAction::SetRange(range),
                ConfigCommand::SetMode { mode } => ConfigAction::SetMode(mode),
                ConfigCommand::SetBuffer { buffer } => ConfigAction::SetBuffer(buffer),
                ConfigCommand::SetAlgorithm { algorithm } => {
                    ConfigAction::SetAlgorithm(algorithm.into())
                }
                ConfigCommand::SetParallel { parallel } => ConfigAction::SetParallel(parallel),
            };
            handle_config_command(&ctx, &action)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
