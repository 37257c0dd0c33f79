use chrono::{DateTime, FixedOffset, Local};
use clap::{Parser, Subcommand};
use guestguide::analytics::{AnalyticsSink, JsonLinesSink, LogSink};
use guestguide::{
    DirectorySink, ExportReport, Exporter, GuideConfig, GuideError, Image, PropertyGuideRecord,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about = "Printable guest guides, guest-view QR codes and page snapshots")]
struct Cli {
    /// JSON configuration file; defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory the artefacts are written to
    #[arg(long, global = true, default_value = ".")]
    out_dir: PathBuf,

    /// Append analytics events to this JSON-lines file instead of logging them
    #[arg(long, global = true)]
    events: Option<PathBuf>,

    /// Stamp PDFs with the current time as their creation date
    #[arg(long, global = true)]
    timestamp: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export the guest guide for a property record
    Guide {
        /// Property record as JSON
        record: PathBuf,
    },
    /// Export the QR code linking to a property's guest view
    Qr {
        #[arg(long)]
        property_id: String,

        /// Property name, printed on the poster
        #[arg(long)]
        name: Option<String>,

        /// Overrides the guest-view origin from the configuration
        #[arg(long)]
        origin: Option<String>,

        /// Write a PNG of this many pixels square
        #[arg(long, value_name = "PIXELS")]
        png: Option<u32>,

        /// Write a printable A4 poster
        #[arg(long)]
        poster: bool,
    },
    /// Paginate a captured image onto A4 pages
    Snapshot {
        image: PathBuf,

        #[arg(long, default_value = "document.pdf")]
        filename: String,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(reports) => {
            for report in reports {
                println!("{}", report.path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<Vec<ExportReport>, GuideError> {
    let mut config = match &cli.config {
        Some(path) => GuideConfig::load(path)?,
        None => GuideConfig::default(),
    };
    if let Command::Qr {
        origin: Some(origin),
        ..
    } = &cli.command
    {
        config.guest_view_origin = origin.clone();
    }

    let analytics: Box<dyn AnalyticsSink> = match &cli.events {
        Some(path) => Box::new(JsonLinesSink::new(path)),
        None => Box::new(LogSink),
    };
    let mut exporter = Exporter::new(config, DirectorySink::new(&cli.out_dir), analytics);
    if cli.timestamp {
        let now: DateTime<FixedOffset> = Local::now().into();
        exporter = exporter.with_creation_date(now);
    }

    match cli.command {
        Command::Guide { record } => {
            let record = PropertyGuideRecord::load(record)?;
            Ok(vec![exporter.export_guest_guide(&record)?])
        }
        Command::Qr {
            property_id,
            name,
            png,
            poster,
            ..
        } => {
            let mut reports = Vec::new();
            if png.is_some() || !poster {
                let size = png.unwrap_or(512);
                reports.push(exporter.export_qr_png(&property_id, size, "qr-code.png")?);
            }
            if poster {
                let name = name.unwrap_or_else(|| property_id.clone());
                reports.push(exporter.export_qr_poster(&property_id, &name, "qr-poster.pdf")?);
            }
            Ok(reports)
        }
        Command::Snapshot { image, filename } => {
            let image = Image::open(image)?;
            Ok(vec![exporter.export_snapshot(image, &filename)?])
        }
    }
}
