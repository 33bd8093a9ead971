//! Interactive menu loop
//!
//! Entering `0`, Ctrl-C or closing stdin at any prompt backs out to the
//! previous level. At the main menu they exit.

use crate::{report, App};
use modtrack_core::{compare_snapshots, list_exports, list_profiles, read_snapshot, Error};
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::warn;

const RULE_WIDTH: usize = 60;

/// Set by the Ctrl-C handler, cleared by the next prompt that sees it
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Line input plus the interrupt flag it honours
struct Console<'f, R> {
    input: R,
    interrupted: &'f AtomicBool,
}

impl<'f, R: BufRead> Console<'f, R> {
    fn new(input: R, interrupted: &'f AtomicBool) -> Self {
        Self { input, interrupted }
    }

    /// Drop an interrupt that arrived while no prompt was waiting
    fn clear_interrupt(&self) {
        self.interrupted.store(false, Ordering::SeqCst);
    }

    fn take_interrupt(&self) -> bool {
        self.interrupted.swap(false, Ordering::SeqCst)
    }

    /// Print a prompt and read one trimmed line.
    ///
    /// None at end of input, on a read error, or when interrupted.
    fn prompt(&mut self, message: &str) -> Option<String> {
        if self.take_interrupt() {
            return None;
        }
        print!("{}", message);
        io::stdout().flush().ok();

        let mut line = String::new();
        let read = self.input.read_line(&mut line);
        if self.take_interrupt() {
            println!();
            return None;
        }
        match read {
            // Includes io::ErrorKind::Interrupted
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

fn install_interrupt_handler() {
    let installed = ctrlc::set_handler(|| {
        INTERRUPTED.store(true, Ordering::SeqCst);
        print!("\n(interrupted, press Enter to go back) ");
        io::stdout().flush().ok();
    });
    if let Err(e) = installed {
        warn!("Ctrl-C handler not installed: {}", e);
    }
}

pub fn run(app: &App) -> modtrack_core::Result<()> {
    println!();
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("  modtrack for {}", app.settings.game);
    println!("{}", "=".repeat(RULE_WIDTH));

    let profiles_dir = app.profiles_dir()?;
    let profiles = list_profiles(&profiles_dir)?;

    install_interrupt_handler();
    let mut console = Console::new(io::stdin().lock(), &INTERRUPTED);

    loop {
        console.clear_interrupt();
        println!("\n=== Main Menu ===");
        println!("  1. Export mod list");
        println!("  2. Compare two exports");
        println!("  3. Exit");

        let Some(choice) = console.prompt("\nSelect option (1-3): ") else {
            break;
        };

        let result = match choice.as_str() {
            "1" => export_mode(app, &mut console, &profiles_dir, &profiles),
            "2" => compare_mode(app, &mut console),
            "3" => break,
            _ => {
                println!("Please enter 1, 2, or 3");
                Ok(())
            }
        };

        if let Err(e) = result {
            if e.is_fatal() {
                return Err(e);
            }
            println!("\nError: {}", e);
        }
    }

    println!();
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("  Thanks for using modtrack!");
    println!("{}", "=".repeat(RULE_WIDTH));
    Ok(())
}

fn export_mode(
    app: &App,
    console: &mut Console<'_, impl BufRead>,
    profiles_dir: &Path,
    profiles: &[String],
) -> modtrack_core::Result<()> {
    let Some(profile) = select_profile(console, profiles) else {
        return Ok(());
    };

    println!("\nLoading mods from profile: {}", profile);
    let report = app.export(profiles_dir, profile)?;
    report::print_export(&report);
    Ok(())
}

fn select_profile<'a>(
    console: &mut Console<'_, impl BufRead>,
    profiles: &'a [String],
) -> Option<&'a str> {
    println!("\n=== Profile Selector ===");
    println!("\nAvailable profiles:");
    for (i, profile) in profiles.iter().enumerate() {
        println!("  {}. {}", i + 1, profile);
    }
    println!("  0. Go back");

    loop {
        let choice = console.prompt(&format!("\nSelect profile (0-{}): ", profiles.len()))?;
        match choice.parse::<usize>() {
            Ok(0) => return None,
            Ok(n) if n <= profiles.len() => return profiles.get(n - 1).map(String::as_str),
            Ok(_) => println!("Please enter a number between 0 and {}", profiles.len()),
            Err(_) => println!("Please enter a valid number"),
        }
    }
}

fn compare_mode(app: &App, console: &mut Console<'_, impl BufRead>) -> modtrack_core::Result<()> {
    let csv_dir = app.settings.csv_dir();
    let exports = list_exports(&csv_dir)?;
    if exports.len() < 2 {
        return Err(Error::InsufficientSnapshots {
            found: exports.len(),
            dir: csv_dir,
        });
    }

    let shown = exports.len().min(app.settings.compare_list_limit.max(2));
    println!("\n=== Available CSV files ===");
    report::print_export_list(&exports, shown);
    println!("  0. Go back");
    println!("\nSelect two files to compare (or 0 to go back):");

    let Some(newer) = select_index(console, "First file (newer): ", shown) else {
        return Ok(());
    };
    let Some(older) = select_index(console, "Second file (older): ", shown) else {
        return Ok(());
    };
    let (Some(newer), Some(older)) = (newer, older) else {
        println!("Invalid selection!");
        return Ok(());
    };
    let (newer, older) = (&exports[newer], &exports[older]);

    println!("\nComparing:");
    println!("  Newer: {}", newer.file_name());
    println!("  Older: {}", older.file_name());

    let newer_snapshot = read_snapshot(&newer.path)?;
    let older_snapshot = read_snapshot(&older.path)?;
    let comparison = compare_snapshots(&newer_snapshot, &older_snapshot);
    report::print_comparison(&comparison, &newer_snapshot, &older_snapshot);
    Ok(())
}

/// Read a 1-based list position.
///
/// Outer None means go back; inner None means the entry was out of range.
fn select_index(
    console: &mut Console<'_, impl BufRead>,
    message: &str,
    len: usize,
) -> Option<Option<usize>> {
    let choice = console.prompt(message)?;
    match choice.parse::<usize>() {
        Ok(0) => None,
        Ok(n) if n <= len => Some(Some(n - 1)),
        _ => Some(None),
    }
}
