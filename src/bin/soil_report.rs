// Soil report command-line tool
//
// Usage:
//   soil_report Nairobi, Kenya
//   soil_report --lat -1.29 --lon 36.82 --name "Home farm" --out reports/
//   soil_report --offline 48.85,2.35 --markdown

use anyhow::{bail, Context};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use soil_intel::report::markdown;
use soil_intel::report::sections::summary_lines;
use soil_intel::soil::parse_coordinates;
use soil_intel::{export_pdf, AppConfig, Location, ReportService, SoilMeasurement, SoilReport};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Soil analysis report for a place or coordinate",
    allow_negative_numbers = true
)]
struct Args {
    /// Place name or "<lat>, <lon>"
    query: Vec<String>,
    #[arg(long)]
    lat: Option<f64>,
    #[arg(long)]
    lon: Option<f64>,
    /// Display name used with --lat/--lon
    #[arg(long)]
    name: Option<String>,
    /// Directory the PDF is written to
    #[arg(long, default_value = ".")]
    out: PathBuf,
    /// Print the full markdown report instead of the summary
    #[arg(long, default_value_t = false)]
    markdown: bool,
    /// Skip all network calls and use estimated soil values
    #[arg(long, default_value_t = false)]
    offline: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "soil_intel=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let query = args.query.join(" ");
    let config = AppConfig::from_env();

    let (location, measurement) = if args.offline {
        let location = offline_location(&args, &query)?;
        let measurement = SoilMeasurement::estimated(location.latitude, location.longitude);
        (location, measurement)
    } else {
        let service = ReportService::new(&config)?;
        let location = match (args.lat, args.lon) {
            (Some(lat), Some(lon)) => named_location(lat, lon, args.name.as_deref())?,
            _ => service
                .locate(&query)
                .await
                .with_context(|| format!("Could not resolve '{}'", query))?,
        };
        let measurement = service.measure(&location).await;
        (location, measurement)
    };

    let report = SoilReport::build(location, measurement, chrono::Local::now().date_naive());

    if args.markdown {
        println!("{}", markdown::render(&report));
    } else {
        print_summary(&report);
    }

    let export = export_pdf(&report)?;
    let path = export
        .save_to(&args.out)
        .with_context(|| format!("Failed to write PDF into {}", args.out.display()))?;
    eprintln!("PDF report written to {}", path.display());

    Ok(())
}

fn named_location(lat: f64, lon: f64, name: Option<&str>) -> soil_intel::Result<Location> {
    match name {
        Some(name) => Location::new(lat, lon, name),
        None => Location::current(lat, lon),
    }
}

fn offline_location(args: &Args, query: &str) -> anyhow::Result<Location> {
    if let (Some(lat), Some(lon)) = (args.lat, args.lon) {
        return Ok(named_location(lat, lon, args.name.as_deref())?);
    }
    match parse_coordinates(query) {
        Some((lat, lon)) => Ok(named_location(lat, lon, args.name.as_deref())?),
        None => bail!("--offline needs coordinates (--lat/--lon or \"<lat>, <lon>\")"),
    }
}

fn print_summary(report: &SoilReport) {
    println!("Soil report for {}", report.location.display_name);
    println!(
        "  ({:.4}, {:.4}) - {}",
        report.location.latitude,
        report.location.longitude,
        report.source.label()
    );
    println!();
    for line in summary_lines(report) {
        println!("{}", line);
    }

    println!();
    println!("Amendments:");
    for (i, a) in report.amendments.iter().enumerate() {
        println!("  {}. {}", i + 1, a.action);
    }

    println!();
    println!("Recommended crops:");
    for (i, c) in report.recommended_crops.iter().enumerate() {
        println!("  {}. {} ({:.0}% match)", i + 1, c.crop, c.score);
    }

    println!();
    println!("Planting schedule ({}):", report.schedule.crop);
    for (phase, text) in report.schedule.phases() {
        println!("  {:<9} {}", format!("{}:", phase), text);
    }
}
