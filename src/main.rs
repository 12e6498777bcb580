use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

use campus_fest::calendar::{self, CalendarView};
use campus_fest::config::{Config, DEFAULT_CONFIG_PATH};
use campus_fest::dates::normalize_text;
use campus_fest::filter::{FilterPatch, FilterState};
use campus_fest::loader::load_festivals;
use campus_fest::logging;
use campus_fest::range::DateFilter;
use campus_fest::store::FestivalStore;

#[derive(Parser)]
#[command(name = "campus_fest")]
#[command(about = "Search and browse university festival listings")]
#[command(version = "0.1.0")]
struct Cli {
    /// Festival documents (JSON array or object with a `festivals` array)
    #[arg(long, global = true, default_value = "festivals.json")]
    file: PathBuf,

    /// TOML configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter festivals and print the matches with their status
    Search {
        #[arg(long)]
        school: Option<String>,
        #[arg(long)]
        artist: Option<String>,
        #[arg(long)]
        region: Option<String>,
        /// First day of the date window (YYYY-MM-DD or "2025년 5월 16일")
        #[arg(long)]
        from: Option<String>,
        /// Last day of the date window; defaults to a single day
        #[arg(long)]
        to: Option<String>,
        /// Show only ended festivals instead of active ones
        #[arg(long)]
        ended: bool,
    },
    /// Print per-day marker counts for one month
    Calendar {
        /// Month as YYYY-MM
        #[arg(long)]
        month: String,
        #[arg(long, value_enum, default_value_t = ViewArg::Artist)]
        view: ViewArg,
    },
    /// Print the artist and school roster for one day
    Day {
        #[arg(long)]
        date: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ViewArg {
    Artist,
    School,
}

impl From<ViewArg> for CalendarView {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::Artist => CalendarView::Artist,
            ViewArg::School => CalendarView::School,
        }
    }
}

fn parse_month(month: &str) -> anyhow::Result<(i32, u32)> {
    let (year, month_part) = month
        .split_once('-')
        .with_context(|| format!("month must look like YYYY-MM, got '{}'", month))?;
    let year: i32 = year.parse().with_context(|| format!("invalid year in '{}'", month))?;
    let month_number: u32 = month_part.parse().with_context(|| format!("invalid month in '{}'", month))?;
    if !(1..=12).contains(&month_number) {
        bail!("month out of range in '{}'", month);
    }
    Ok((year, month_number))
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config)?;
    let _guard = logging::init_logging(&config.logging);

    let offset = config.timezone.offset()?;
    let festivals = load_festivals(&cli.file, offset)
        .with_context(|| format!("failed to load festivals from {}", cli.file.display()))?;

    match cli.command {
        Commands::Search {
            school,
            artist,
            region,
            from,
            to,
            ended,
        } => {
            let mut store = FestivalStore::new(festivals).with_filters(FilterState {
                show_only_active: config.filters.show_only_active,
                ..FilterState::default()
            });

            let mut patch = FilterPatch::new();
            patch.school = school;
            patch.artist = artist;
            patch.region = region;
            if let Some(from) = from {
                patch.date = Some(DateFilter::range(from, to.unwrap_or_default()));
            }
            if ended {
                patch.show_only_active = Some(false);
            }
            store.update_filters(patch);

            let now = config.timezone.now()?;
            let listed = store.filtered(now);
            info!(matches = listed.len(), "Search finished");
            println!("{}", serde_json::to_string_pretty(&listed)?);
        }
        Commands::Calendar { month, view } => {
            let (year, month_number) = parse_month(&month)?;
            let events = calendar::aggregate(&festivals);
            let tiles: Vec<_> = calendar::month_tiles(&events, year, month_number, view.into())
                .into_iter()
                .map(|(day, count)| json!({"date": day.format("%Y-%m-%d").to_string(), "count": count}))
                .collect();
            println!("{}", serde_json::to_string_pretty(&tiles)?);
        }
        Commands::Day { date } => {
            let day = normalize_text(&date)
                .with_context(|| format!("could not read date '{}'", date))?
                .day();
            let roster = calendar::aggregate_for_date(&festivals, day);
            println!("{}", serde_json::to_string_pretty(&roster)?);
        }
    }

    Ok(())
}
