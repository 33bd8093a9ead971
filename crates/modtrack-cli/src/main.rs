//! modtrack CLI
//!
//! Command-line tool for exporting r2modman profiles to spreadsheets and
//! comparing two exports.

use clap::{ArgAction, Parser, Subcommand};
use modtrack_core::{
    candidate_profile_dirs, compare_snapshots, compute_stats, export_profile, find_profiles_dir,
    latest_pair, list_exports, list_profiles, load_profile, read_snapshot, sort_records,
    ExportReport, RichEncoding, Settings,
};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod menu;
mod report;

#[derive(Parser)]
#[command(name = "modtrack")]
#[command(about = "r2modman mod list exporter and comparer", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file (JSON); defaults are used if it does not exist
    #[arg(long, global = true, default_value = "modtrack.json")]
    config: PathBuf,

    /// Directory that holds csv_files/ and xlsx_files/
    #[arg(short, long, global = true)]
    output_dir: Option<PathBuf>,

    /// Use this profiles directory instead of searching for r2modman
    #[arg(long, global = true)]
    profiles_dir: Option<PathBuf>,

    /// More log output (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available profiles
    Profiles,

    /// Export a profile's mod list to CSV (and xlsx)
    Export {
        /// Profile name
        #[arg(short, long)]
        profile: String,

        /// Skip the xlsx export
        #[arg(long)]
        no_xlsx: bool,
    },

    /// List previous CSV exports, newest first
    Exports,

    /// Compare two CSV exports (defaults to the two most recent)
    Compare {
        /// Newer export
        #[arg(long, requires = "older")]
        newer: Option<PathBuf>,

        /// Older export
        #[arg(long, requires = "newer")]
        older: Option<PathBuf>,

        /// Print the comparison as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive menu (the default)
    Menu,
}

/// Settings and capabilities resolved once at startup
pub struct App {
    pub settings: Settings,
    pub profiles_dir_override: Option<PathBuf>,
    pub rich: RichEncoding,
}

impl App {
    /// The profiles directory, from the override or by probing the standard locations
    pub fn profiles_dir(&self) -> modtrack_core::Result<PathBuf> {
        let candidates = match &self.profiles_dir_override {
            Some(dir) => vec![dir.clone()],
            None => candidate_profile_dirs(&self.settings.game, &self.settings.extra_search_paths),
        };
        find_profiles_dir(&candidates)
    }

    /// Load, sort and export one profile
    pub fn export(&self, profiles_dir: &Path, profile: &str) -> modtrack_core::Result<ExportReport> {
        let mut records = load_profile(profiles_dir, profile)?;
        println!("Found {} mods", records.len());

        sort_records(&mut records);
        let stats = compute_stats(&records, profile);
        Ok(export_profile(
            &records,
            &stats,
            &self.settings.export_config(self.rich),
        ))
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> modtrack_core::Result<()> {
    let mut settings = Settings::load(&cli.config)?;
    if let Some(output_dir) = cli.output_dir {
        settings.output_dir = output_dir;
    }
    debug!("settings: {:?}", settings);

    let no_xlsx = matches!(cli.command, Some(Commands::Export { no_xlsx: true, .. }));
    let app = App {
        settings,
        profiles_dir_override: cli.profiles_dir,
        rich: if no_xlsx {
            RichEncoding::Unavailable
        } else {
            RichEncoding::detect()
        },
    };

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Profiles => cmd_profiles(&app),
        Commands::Export { profile, .. } => cmd_export(&app, &profile),
        Commands::Exports => cmd_exports(&app),
        Commands::Compare { newer, older, json } => cmd_compare(&app, newer, older, json),
        Commands::Menu => menu::run(&app),
    }
}

fn cmd_profiles(app: &App) -> modtrack_core::Result<()> {
    let dir = app.profiles_dir()?;
    let profiles = list_profiles(&dir)?;

    println!("Profiles in {} ({}):", dir.display(), profiles.len());
    for profile in &profiles {
        println!("  {}", profile);
    }

    Ok(())
}

fn cmd_export(app: &App, profile: &str) -> modtrack_core::Result<()> {
    let dir = app.profiles_dir()?;
    println!("Loading mods from profile: {}", profile);

    let report = app.export(&dir, profile)?;
    report::print_export(&report);

    // The xlsx side has already been reported; only a CSV failure fails the command
    report.csv.map(|_| ())
}

fn cmd_exports(app: &App) -> modtrack_core::Result<()> {
    let csv_dir = app.settings.csv_dir();
    let exports = list_exports(&csv_dir)?;

    if exports.is_empty() {
        println!("No exports in {}", csv_dir.display());
        return Ok(());
    }

    println!("Exports in {} ({}):", csv_dir.display(), exports.len());
    report::print_export_list(&exports, exports.len());

    Ok(())
}

fn cmd_compare(
    app: &App,
    newer: Option<PathBuf>,
    older: Option<PathBuf>,
    json: bool,
) -> modtrack_core::Result<()> {
    let (newer, older) = match (newer, older) {
        (Some(newer), Some(older)) => (newer, older),
        _ => {
            let (newer, older) = latest_pair(&app.settings.csv_dir())?;
            (newer.path, older.path)
        }
    };

    let newer_snapshot = read_snapshot(&newer)?;
    let older_snapshot = read_snapshot(&older)?;
    let comparison = compare_snapshots(&newer_snapshot, &older_snapshot);

    if json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
        return Ok(());
    }

    println!("Comparing:");
    println!("  Newer: {}", newer.display());
    println!("  Older: {}", older.display());
    report::print_comparison(&comparison, &newer_snapshot, &older_snapshot);

    Ok(())
}
