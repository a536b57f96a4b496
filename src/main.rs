use anyhow::Context;
use argos_importer::cli::{args::Args, commands};
use clap::Parser;
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let result = commands::run(args).context("ARGOS import failed");

    match result {
        Ok(_summary) => {
            // the command already reported its results
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("ARGOS Importer - Wildlife Telemetry to Point Features");
    println!("=====================================================");
    println!();
    println!("Convert directories of ARGOS satellite telemetry exports into a point");
    println!("feature collection (GeoJSON, Parquet or CSV), one feature per fix.");
    println!();
    println!("USAGE:");
    println!("    argos-importer <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    import      Import an export directory into a feature collection");
    println!("    inspect     Report per-tag fix counts without writing output");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Import into GeoJSON declared as WGS84:");
    println!("    argos-importer import ./argos_export tracks.geojson");
    println!();
    println!("    # Import into Parquet declared as Web Mercator:");
    println!("    argos-importer import ./argos_export tracks.parquet -s EPSG:3857");
    println!();
    println!("    # Check an export before importing:");
    println!("    argos-importer inspect ./argos_export --format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    argos-importer <COMMAND> --help");
}
