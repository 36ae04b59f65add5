//! Property parcel commands.

use clap::Subcommand;
use kartlager::api::PropertyParcel;

use super::common::{build_service, PositionArgs};
use crate::error::CliError;

/// Property subcommands.
#[derive(Debug, Subcommand)]
pub enum PropertyCommands {
    /// Find the parcel covering a position
    At {
        #[command(flatten)]
        position: PositionArgs,

        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Search parcels by registered designation
    Search {
        /// Designation query, e.g. "STOCKHOLM KLAMPARNA 6"
        query: String,

        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

/// Run a property subcommand.
pub async fn run(command: PropertyCommands) -> Result<(), CliError> {
    let service = build_service()?;

    match command {
        PropertyCommands::At { position, json } => {
            let parcels = service.property_at(position.position()?).await?;
            print_parcels(&parcels, json);
        }
        PropertyCommands::Search { query, json } => {
            let parcels = service.property_search(&query).await?;
            print_parcels(&parcels, json);
        }
    }

    Ok(())
}

fn print_parcels(parcels: &[PropertyParcel], json: bool) {
    if json {
        let items: Vec<_> = parcels
            .iter()
            .map(|p| {
                serde_json::json!({
                    "id": p.id,
                    "designation": p.designation,
                    "municipality": p.municipality,
                })
            })
            .collect();
        println!("{}", serde_json::Value::Array(items));
        return;
    }

    if parcels.is_empty() {
        println!("No parcels found.");
        return;
    }

    for parcel in parcels {
        match &parcel.municipality {
            Some(municipality) => {
                println!("{}  ({}, {})", parcel.designation, municipality, parcel.id)
            }
            None => println!("{}  ({})", parcel.designation, parcel.id),
        }
    }
}
