use anyhow::Context;
use colored::Colorize;
use neo_query::{NeoSearcher, Query, ReturnKind};
use neo_store::NeoDatabase;
use neo_writer::{NeoWriter, OutputFormat};

use crate::cli::*;
use crate::config::NeoConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = NeoConfig::load(cli.config.as_deref())?;
    let data_path = cli.file.clone().unwrap_or_else(|| config.data_path.clone());

    let mut db = NeoDatabase::new(Some(data_path.clone()));
    db.load_data(None)
        .with_context(|| format!("loading {}", data_path.display()))?;
    tracing::info!(
        neos = db.neo_count(),
        orbits = db.orbit_count(),
        dates = db.date_count(),
        "database ready"
    );

    match cli.command {
        Command::Search(args) => cmd_search(&db, &config, args).map(|_| ()),
        Command::Inspect(args) => cmd_inspect(&db, args),
        Command::Dates(args) => cmd_dates(&db, args),
    }
}

fn cmd_search(db: &NeoDatabase, config: &NeoConfig, args: SearchArgs) -> anyhow::Result<usize> {
    let format: OutputFormat = args
        .output
        .parse()
        .with_context(|| format!("--output must be one of {:?}", OutputFormat::list()))?;
    let query = Query {
        date: args.date,
        start_date: args.start_date,
        end_date: args.end_date,
        number: args.number.unwrap_or(config.default_number),
        filter: args.filter,
        return_object: args.return_object,
    };
    let selector = query
        .build_query()
        .with_context(|| {
            format!(
                "invalid search (return objects: {:?}, filters: field:operator:value)",
                ReturnKind::list()
            )
        })?;
    let results = NeoSearcher::new(db).get_objects(&selector);

    let output_path = args
        .output_path
        .unwrap_or_else(|| config.output_path.clone());
    let writer = NeoWriter::new(db, output_path);
    let count = writer.write(format, &results)?;

    if format == OutputFormat::CsvFile {
        println!(
            "{} Wrote {} {} record(s) to {}",
            "✓".green().bold(),
            count,
            selector.return_object,
            writer.csv_path().display().to_string().bold()
        );
    }
    Ok(count)
}

fn cmd_inspect(db: &NeoDatabase, args: InspectArgs) -> anyhow::Result<()> {
    let neo = db
        .get_neo(&args.name)
        .with_context(|| format!("no object named {:?}", args.name))?;

    println!("{} (id {})", neo.name.yellow().bold(), neo.id);
    println!("  Diameter (min): {:.3} km", neo.diameter_min_km);
    let hazard = if neo.is_potentially_hazardous_asteroid {
        "yes".red().bold()
    } else {
        "no".green()
    };
    println!("  Potentially hazardous: {hazard}");
    println!("  Close approaches: {}", neo.orbits.len().to_string().bold());
    for orbit in &neo.orbits {
        println!(
            "    {}  {:.3} km",
            orbit.close_approach_date.cyan(),
            orbit.miss_distance_kilometers
        );
    }
    Ok(())
}

fn cmd_dates(db: &NeoDatabase, args: DatesArgs) -> anyhow::Result<()> {
    let buckets = db.dates_between(args.start_date.as_deref(), args.end_date.as_deref());
    if buckets.is_empty() {
        println!("No approach dates in range.");
        return Ok(());
    }
    for (date, ids) in buckets {
        println!("{}  {}", date.cyan(), ids.len());
    }
    Ok(())
}
