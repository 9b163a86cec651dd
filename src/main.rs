//! Scrape the Caltech holiday-observances page into an iCalendar file.

mod fetch;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use scraper::Html;
use tracing::{Level, error, info, warn};

use holidays_core::HolidayCalendar;
use holidays_core::diagnostics::TracingSink;
use holidays_core::event::build_event;
use holidays_core::extract::extract;
use holidays_core::merge::add_unique;

const ERROR_GET_PAGE_FAILED: u8 = 1;
const ERROR_PARSE_FAILED: u8 = 2;
const ERROR_NO_EVENTS: u8 = 3;
const ERROR_UNKNOWN: u8 = 255;

#[derive(Parser)]
#[command(name = "caltech-holidays")]
#[command(about = "Merge Caltech holiday observances into an iCalendar file")]
struct Cli {
    /// Disable writing the output file
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Name to write the icalendar file to
    #[arg(long, default_value = "caltech_holidays.ics")]
    icalendar: PathBuf,

    /// Print the resulting calendar
    #[arg(long)]
    display: bool,

    /// More log detail (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(&cli).await
}

async fn run(cli: &Cli) -> ExitCode {
    let diag = TracingSink;

    let page = match fetch::fetch_holiday_page(fetch::HOLIDAY_URL).await {
        Ok(page) => page,
        Err(err) => {
            error!("downloading holiday page failed: {err:#}");
            return ExitCode::from(ERROR_GET_PAGE_FAILED);
        }
    };

    let stamp = match &page.last_modified {
        Some(raw) => match fetch::parse_last_modified(raw) {
            Ok(stamp) => stamp,
            Err(err) => {
                error!("unparseable Last-Modified header {raw:?}: {err}");
                return ExitCode::from(ERROR_PARSE_FAILED);
            }
        },
        None => {
            info!("no Last-Modified header, stamping events with the current time");
            Utc::now()
        }
    };

    let document = Html::parse_document(&page.body);

    let mut calendar = match HolidayCalendar::load_or_create(&cli.icalendar, &diag) {
        Ok(calendar) => calendar,
        Err(err) => {
            error!("loading calendar {}: {err}", cli.icalendar.display());
            return ExitCode::from(ERROR_PARSE_FAILED);
        }
    };

    let records = match extract(&document.root_element(), &diag) {
        Ok(records) => records,
        Err(err) => {
            error!("{err}");
            return ExitCode::from(ERROR_PARSE_FAILED);
        }
    };

    for record in &records {
        add_unique(
            &mut calendar,
            build_event(record.date, &record.description, stamp),
            &diag,
        );
    }

    if !cli.dry_run {
        if let Err(err) = calendar.save(&cli.icalendar) {
            error!("writing {}: {err}", cli.icalendar.display());
            return ExitCode::from(ERROR_UNKNOWN);
        }
    }

    if cli.display {
        println!("{}", calendar.display());
    }

    if records.is_empty() {
        warn!("no entries found");
        return ExitCode::from(ERROR_NO_EVENTS);
    }

    ExitCode::SUCCESS
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}
