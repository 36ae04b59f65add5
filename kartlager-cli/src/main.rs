//! Kartlager CLI - Command-line interface
//!
//! This binary exposes each geodata tool operation as a subcommand.

use clap::{Parser, Subcommand};

mod commands;
mod error;

#[derive(Parser)]
#[command(name = "kartlager")]
#[command(version)]
#[command(about = "Swedish geodata tools: coordinates, properties, elevation, maps", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a position between WGS84 and SWEREF 99 TM
    Convert(commands::convert::ConvertArgs),

    /// Property parcel lookup and search
    Property {
        #[command(subcommand)]
        command: commands::property::PropertyCommands,
    },

    /// Elevation above sea level at a position
    Elevation(commands::elevation::ElevationArgs),

    /// Download the topographic map tile covering a position
    Tile(commands::tile::TileArgs),

    /// Render an orthophoto image for an extent
    Map(commands::map::MapArgs),

    /// Search the STAC catalog
    Stac(commands::stac::StacArgs),

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Keep the guard alive for the whole run so file logs are flushed.
    let _logging_guard = {
        let config = kartlager::config::ConfigFile::load().unwrap_or_default();
        match kartlager::logging::init_logging(&config.logging.file) {
            Ok(guard) => guard,
            Err(e) => error::CliError::LoggingInit(e.to_string()).exit(),
        }
    };

    let result = match cli.command {
        Commands::Convert(args) => commands::convert::run(args),
        Commands::Property { command } => commands::property::run(command).await,
        Commands::Elevation(args) => commands::elevation::run(args).await,
        Commands::Tile(args) => commands::tile::run(args).await,
        Commands::Map(args) => commands::map::run(args).await,
        Commands::Stac(args) => commands::stac::run(args).await,
        Commands::Config { command } => commands::config::run(command),
    };

    if let Err(e) = result {
        e.exit();
    }
}
