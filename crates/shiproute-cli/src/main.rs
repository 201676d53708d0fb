use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use shiproute_cli::commands::ports::handle_list_ports;
use shiproute_cli::commands::route::{handle_route_command, RouteCommandArgs};
use shiproute_cli::commands::ships::handle_list_ships;
use shiproute_cli::output::{print_logo, OutputFormat};

#[derive(Parser, Debug)]
#[command(author, version, about = "Shipping route cost and risk estimator")]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct GlobalOptions {
    /// Directory holding routes.csv, ship_fuel_efficiency.csv and Port_Data.csv.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format for results on stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Log line format on stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    /// Suppress the banner in text output.
    #[arg(long, global = true)]
    no_logo: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate cost and risk of the shortest route between two ports.
    Route {
        /// Departure port.
        #[arg(long = "from")]
        from: String,
        /// Destination port.
        #[arg(long = "to")]
        to: String,
        /// Ship type used to look up fuel consumption.
        #[arg(long = "ship-type")]
        ship_type: String,
        /// Do not contact fuel price, geocoding or weather services.
        #[arg(long)]
        offline: bool,
        /// Write the best route as a GeoJSON map to this file.
        #[arg(long)]
        map: Option<PathBuf>,
    },
    /// List the ports known to the route table.
    Ports,
    /// List ship types with a fuel profile.
    Ships,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.log_format);

    let data_dir = cli.global.data_dir.as_deref();
    let format = cli.global.format;
    if format.is_text() && !cli.global.no_logo {
        print_logo();
    }

    match cli.command {
        Command::Route {
            from,
            to,
            ship_type,
            offline,
            map,
        } => {
            let args = RouteCommandArgs {
                from,
                to,
                ship_type,
                offline,
                map,
            };
            handle_route_command(data_dir, format, &args)
        }
        Command::Ports => handle_list_ports(data_dir, format),
        Command::Ships => handle_list_ships(data_dir, format),
    }
}

fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    let _ = match format {
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish()),
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish()),
    };
}
