use clap::Parser;
use colored::*;
use csv_ingest::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(_summary) => {
            // Success - the summary has already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("{}", error.to_string().bright_red());
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("CSV Ingest - Two-Column Upload Validator");
    println!("========================================");
    println!();
    println!("Validate a CSV upload against the required 'field1,field2' header");
    println!("and store every data row as a record.");
    println!();
    println!("USAGE:");
    println!("    csv-ingest <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    ingest      Validate a CSV file and store its rows");
    println!("    schema      Print the required header line");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Store the rows of an upload in the default database:");
    println!("    csv-ingest ingest upload.csv");
    println!();
    println!("    # Check an upload without storing anything:");
    println!("    csv-ingest ingest upload.csv --dry-run -v");
    println!();
    println!("    # Store into a specific database and table, JSON result:");
    println!("    csv-ingest ingest upload.csv --database ./records.sqlite --table imports \\");
    println!("                      --output-format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    csv-ingest <COMMAND> --help");
}
