use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use ili_ingest::cli::{Args, Command, setup_logging};
use ili_ingest::{ingest_ili_with_config, ingest_numeric_column_with_config};
use std::process;

fn main() {
    let args = Args::parse();
    setup_logging(&args);

    if let Err(error) = run(&args) {
        eprintln!("{} {:#}", "Error:".bright_red().bold(), error);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.ingest_config();

    match &args.command {
        Command::Ili { path } => {
            let dataset = ingest_ili_with_config(path, &config)
                .with_context(|| format!("Error while reading file \"{}\"", path.display()))?;

            if !args.quiet {
                for (year, week, est_inc) in dataset.rows() {
                    println!("{}, {}, {}", year, week, est_inc);
                }
            }
            println!(
                "Data has {} entries.",
                dataset.size().to_string().bright_white().bold()
            );
        }
        Command::Column { path } => {
            let column = ingest_numeric_column_with_config(path, &config)
                .with_context(|| format!("Error while reading file \"{}\"", path.display()))?;

            if !args.quiet {
                for value in &column.values {
                    println!("{}", value);
                }
            }
            println!(
                "Data has {} entries.",
                column.size().to_string().bright_white().bold()
            );
        }
    }

    Ok(())
}
