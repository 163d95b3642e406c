//! # CLI Module
//!
//! Command-line interface for the CodeReader store.
//!
//! ## Usage
//! ```bash
//! # Create or migrate the database
//! code-reader init
//!
//! # Work with the scan history
//! code-reader history add "4006381333931" --format EAN_13
//! code-reader history list --limit 20
//! code-reader history delete 3 4
//!
//! # Alternative storage location, JSON output
//! code-reader --storage /tmp/reader --output json settings
//! ```

use code_reader::core::cover::{CoverView, EventWindow};
use code_reader::core::database::{Database, MigrationReport, MigrationStep, StoragePaths};
use code_reader::core::history::HistoryPage;
use code_reader::core::settings::{Settings, SettingsStore};
use code_reader::error::{CodeReaderError, Result};
use code_reader::events::{DatabaseEvent, Event, EventChannel, WindowEvent};
use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use serde::Serialize;
use std::path::PathBuf;

/// CodeReader - scan history and settings store
#[derive(Parser, Debug)]
#[command(name = "code-reader")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Offline storage directory (defaults to the platform data dir)
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    /// Settings file (defaults to settings.json in the storage dir)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create or upgrade the database
    Init,

    /// Scan history
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },

    /// Show current settings
    Settings,

    /// Show the cover and trigger its scan action
    Cover,
}

#[derive(Subcommand, Debug)]
enum HistoryCommand {
    /// List records, newest first
    List {
        #[arg(short, long, default_value = "50")]
        limit: usize,

        #[arg(long, default_value = "0")]
        offset: usize,
    },

    /// Record a scan
    Add {
        value: String,

        /// Barcode format
        #[arg(short, long, default_value = "")]
        format: String,
    },

    /// Delete records by id
    Delete {
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// Delete all records
    Clear,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let paths = cli
        .storage
        .map(StoragePaths::new)
        .unwrap_or_default();
    let settings_path = cli.settings.unwrap_or_else(|| paths.settings_file());
    let mut settings = SettingsStore::open(&settings_path);

    let (sender, receiver) = EventChannel::new();
    let db = Database::initialize(&paths, &mut settings, &sender)?;
    let startup: Vec<Event> = receiver.drain();

    let term = Term::stdout();
    match cli.command {
        Commands::Init => match cli.output {
            OutputFormat::Pretty => print_report(&term, &db, &startup),
            OutputFormat::Json => print_json(&serde_json::json!({
                "path": db.path(),
                "report": db.report(),
            })),
        },
        Commands::History { command } => run_history(&term, &db, &settings, command, cli.output),
        Commands::Settings => match cli.output {
            OutputFormat::Pretty => {
                print_settings(&term, settings.settings());
                Ok(())
            }
            OutputFormat::Json => print_json(settings.settings()),
        },
        Commands::Cover => {
            let cover = CoverView::default();
            let mut window = EventWindow::new(sender.clone());
            for action in cover.actions() {
                cover.trigger(*action, &mut window);
            }
            let requests: Vec<WindowEvent> = receiver
                .drain()
                .into_iter()
                .filter_map(|e| match e {
                    Event::Window(w) => Some(w),
                    _ => None,
                })
                .collect();

            match cli.output {
                OutputFormat::Pretty => {
                    term.write_line(&format!(
                        "{} {}",
                        style(&cover.label).bold().cyan(),
                        style(&cover.icon).dim()
                    ))
                    .ok();
                    for request in requests {
                        term.write_line(&format!("  {} {:?}", style("→").green(), request))
                            .ok();
                    }
                    Ok(())
                }
                OutputFormat::Json => print_json(&serde_json::json!({
                    "cover": cover,
                    "requests": requests,
                })),
            }
        }
    }
}

fn run_history(
    term: &Term,
    db: &Database,
    settings: &SettingsStore,
    command: HistoryCommand,
    output: OutputFormat,
) -> Result<()> {
    let history = db.history();

    match command {
        HistoryCommand::List { limit, offset } => {
            let page = history.list(limit, offset)?;
            match output {
                OutputFormat::Pretty => {
                    print_history(term, &page);
                    Ok(())
                }
                OutputFormat::Json => print_json(&page),
            }
        }
        HistoryCommand::Add { value, format } => {
            let record = history.add(&value, &format)?;
            let pruned = history.prune(settings.settings().history_size)?;
            match output {
                OutputFormat::Pretty => {
                    term.write_line(&format!(
                        "{} Added #{} {}",
                        style("✓").green().bold(),
                        record.id,
                        record.value
                    ))
                    .ok();
                    if pruned > 0 {
                        term.write_line(&format!(
                            "  {} old records removed",
                            style(pruned).dim()
                        ))
                        .ok();
                    }
                    Ok(())
                }
                OutputFormat::Json => print_json(&serde_json::json!({
                    "record": record,
                    "pruned": pruned,
                })),
            }
        }
        HistoryCommand::Delete { ids } => {
            let removed = history.delete(&ids)?;
            print_count(term, output, "deleted", removed)
        }
        HistoryCommand::Clear => {
            let removed = history.clear()?;
            print_count(term, output, "cleared", removed)
        }
    }
}

fn print_report(term: &Term, db: &Database, events: &[Event]) -> Result<()> {
    term.write_line(&format!(
        "{} {}",
        style("CodeReader").bold().cyan(),
        style(db.path().display()).dim()
    ))
    .ok();

    for event in events {
        if let Event::Database(event) = event {
            let line = match event {
                DatabaseEvent::Warning { .. } => format!("  {} {}", style("!").yellow(), event),
                DatabaseEvent::Opened { .. } | DatabaseEvent::Completed => continue,
                _ => format!("  {} {}", style("•").green(), event),
            };
            term.write_line(&line).ok();
        }
    }

    let report: &MigrationReport = db.report();
    if report.is_noop() {
        term.write_line(&format!("  {}", style("Database is up to date").dim()))
            .ok();
    } else if let Some(applied) = report.steps.iter().find_map(|s| match s {
        MigrationStep::MigratedSettings { applied } => Some(applied.len()),
        _ => None,
    }) {
        term.write_line(&format!(
            "  {} legacy settings migrated",
            style(applied).cyan()
        ))
        .ok();
    }

    Ok(())
}

fn print_history(term: &Term, page: &HistoryPage) {
    if page.records.is_empty() {
        term.write_line(&format!("  {}", style("History is empty").dim()))
            .ok();
        return;
    }

    for record in &page.records {
        term.write_line(&format!(
            "{:>5}  {}  {:<12} {}",
            style(record.id).dim(),
            record.timestamp,
            style(&record.format).yellow(),
            record.value
        ))
        .ok();
    }

    term.write_line(&format!(
        "{} of {} records",
        style(page.records.len()).cyan(),
        page.total_count
    ))
    .ok();
}

fn print_settings(term: &Term, settings: &Settings) {
    let rows: [(&str, String); 7] = [
        ("sound", settings.sound.to_string()),
        ("digital_zoom", settings.digital_zoom.to_string()),
        ("scan_duration", settings.scan_duration.to_string()),
        ("result_view_duration", settings.result_view_duration.to_string()),
        ("marker_color", settings.marker_color.clone()),
        ("history_size", settings.history_size.to_string()),
        ("scan_on_start", settings.scan_on_start.to_string()),
    ];

    for (key, value) in rows {
        term.write_line(&format!("  {:<22} {}", style(key).bold(), value))
            .ok();
    }
}

fn print_count(term: &Term, output: OutputFormat, what: &str, count: usize) -> Result<()> {
    match output {
        OutputFormat::Pretty => {
            term.write_line(&format!(
                "{} {} {} records",
                style("✓").green().bold(),
                what,
                count
            ))
            .ok();
            Ok(())
        }
        OutputFormat::Json => print_json(&serde_json::json!({ "action": what, "count": count })),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CodeReaderError::Config(format!("Failed to serialize output: {}", e)))?;
    println!("{}", json);
    Ok(())
}
