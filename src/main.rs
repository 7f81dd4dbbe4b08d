use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use chrono::Utc;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use ecotrack_carbon::{
    record_entry, Calculator, Config, EntryPayload, FactorTables, InputGuard, Month,
    OutputFormat, RecordedEntry, Report,
};

/// EcoTrack carbon-footprint calculator.
#[derive(Parser, Debug)]
#[command(name = "ecotrack_carbon", version, about)]
struct Cli {
    /// Output format; overrides ECOTRACK_FORMAT.
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Compute the footprint of one JSON entry payload.
    Compute {
        /// e.g. '{"category":"Food","foodType":"Beef","quantity":1}'
        payload: String,
    },
    /// Record a JSON-lines file of entries and print statistics.
    Report {
        /// Entries file; overrides ECOTRACK_ENTRIES.
        #[arg(long)]
        entries: Option<PathBuf>,
        /// Also break totals down for this month (YYYY-MM).
        #[arg(long)]
        month: Option<String>,
    },
    /// List known appliance names.
    Appliances,
    /// List known transport types.
    TransportTypes,
    /// List known energy sources.
    EnergySources,
    /// List known food types.
    Foods,
}

fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let config = Config::load().context("loading configuration")?;
    let format = cli.format.unwrap_or(config.format);
    let calculator = Calculator::new(Arc::new(FactorTables::standard()));

    match cli.command {
        Commands::Compute { payload } => {
            let payload = EntryPayload::from_json(&payload)?;
            let request = InputGuard::validate_entry(&payload, calculator.tables())?;
            let result = calculator.compute(&request);
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                OutputFormat::Text => println!(
                    "{},{},{:.3} kg CO2",
                    result.category, result.source, result.kg_co2
                ),
            }
        }
        Commands::Report { entries, month } => {
            let month = match month {
                Some(raw) => match Month::parse(&raw) {
                    Some(m) => Some(m),
                    None => bail!("invalid month {raw:?}, expected YYYY-MM"),
                },
                None => None,
            };
            let path = entries.unwrap_or(config.entries_path);
            let recorded = load_entries(&path, calculator.tables())?;
            let report = Report::build(&recorded, month);
            print_report(&report, format)?;
        }
        Commands::Appliances => print_keys(calculator.tables().appliance_names(), format)?,
        Commands::TransportTypes => print_keys(calculator.tables().transport_types(), format)?,
        Commands::EnergySources => print_keys(calculator.tables().energy_sources(), format)?,
        Commands::Foods => print_keys(calculator.tables().food_types(), format)?,
    }

    Ok(())
}

/// Reads one payload per line. Invalid lines are logged and skipped.
fn load_entries(path: &Path, tables: &FactorTables) -> anyhow::Result<Vec<RecordedEntry>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = BufReader::new(file);
    let today = Utc::now().date_naive();

    let mut recorded = Vec::new();
    for (idx, line_res) in reader.lines().enumerate() {
        let line = line_res?;
        if line.trim().is_empty() {
            continue;
        }
        let entry = EntryPayload::from_json(&line)
            .and_then(|payload| record_entry(&payload, tables, today));
        match entry {
            Ok(entry) => recorded.push(entry),
            Err(e) => warn!(line = idx + 1, "skipping entry: {e}"),
        }
    }
    info!(count = recorded.len(), path = %path.display(), "entries recorded");
    Ok(recorded)
}

fn print_report(report: &Report, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let s = &report.summary;
    println!("total_kg,average_kg,count");
    println!(
        "{:.3},{:.3},{}",
        s.total,
        s.average.unwrap_or(0.0),
        s.count
    );

    println!("category,total_kg,count");
    for c in &report.categories {
        println!("{},{:.3},{}", c.category, c.total, c.count);
    }

    if let (Some(month), Some(monthly)) = (&report.month, &report.monthly) {
        println!("month,category,total_kg,count");
        for c in monthly {
            println!(
                "{}-{:02},{},{:.3},{}",
                month.year, month.month, c.category, c.total, c.count
            );
        }
    }
    Ok(())
}

fn print_keys(keys: Vec<&str>, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&keys)?),
        OutputFormat::Text => {
            for key in keys {
                println!("{key}");
            }
        }
    }
    Ok(())
}
