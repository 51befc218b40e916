use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use dapsweep::{
    execute, plan_deletions, reclaimable_bytes, remove_empty_dirs, scan, Aggressiveness,
    Category, Finding, RuleTables, ScanOptions, ScanResult,
};
use humansize::{format_size, BINARY};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Junk directories are listed with a fixed cap
const JUNK_DIR_SAMPLE: usize = 30;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Scan a music folder for files and names that confuse digital audio players, and optionally delete the junk",
    long_about = None
)]
struct Args {
    /// Music folder to scan (prompted for when omitted)
    path: Option<PathBuf>,

    /// What to delete (shows a menu when omitted)
    #[arg(long, short, value_enum)]
    mode: Option<Aggressiveness>,

    /// Show what would be deleted, but don't delete anything
    #[arg(long)]
    dry_run: bool,

    /// Skip the DELETE confirmation
    #[arg(long, short)]
    yes: bool,

    /// Remove empty folders after deleting, without asking
    #[arg(long)]
    remove_empty_dirs: bool,

    /// Maximum entries listed per section
    #[arg(long, default_value_t = 50)]
    limit: usize,

    /// Show debug logging
    #[arg(long, short)]
    verbose: bool,
}

const LOG_ENV: &str = "DAPSWEEP_LOG";

/// Filter directives: `--verbose` wins, then `DAPSWEEP_LOG`, then `warn`
fn log_directives(verbose: bool, env: Option<String>) -> String {
    if verbose {
        return "debug".to_string();
    }
    env.filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "warn".to_string())
}

fn init_logging(verbose: bool) {
    let directives = log_directives(verbose, std::env::var(LOG_ENV).ok());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .init();
}

/// Print a prompt and read one trimmed line from stdin
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush().context("Failed to flush stdout")?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim().to_string())
}

/// Accept a pasted path: strip quotes and expand `~` or a leading `~/`.
/// `~user` forms are left as typed.
fn parse_pasted_path(raw: &str, home: Option<&Path>) -> PathBuf {
    let raw = raw.trim().trim_matches('"').trim_matches('\'');
    if let Some(home) = home {
        if raw == "~" {
            return home.to_path_buf();
        }
        if let Some(rest) = raw.strip_prefix("~/") {
            return home.join(rest.trim_start_matches('/'));
        }
    }
    PathBuf::from(raw)
}

fn print_samples(title: &str, items: &[Finding], root: &Path, limit: usize) {
    println!();
    println!("{} (showing up to {}):", title.bold(), limit);
    for finding in items.iter().take(limit) {
        println!(
            "  - {}  {}",
            finding.display_path(root).display(),
            format!("[{}]", finding.reason).bright_black()
        );
    }
    if items.len() > limit {
        println!("  ...and {} more", items.len() - limit);
    }
}

fn print_report(result: &ScanResult, limit: usize) {
    let root = result.root();

    println!();
    println!("{}", "=== Summary ===".bold());
    println!(
        "Allowed (audio/art):                 {}",
        result.count(Category::Allowed).to_string().green()
    );
    println!(
        "Junk (safe to delete):               {}",
        result.count(Category::Junk).to_string().red()
    );
    println!(
        "Potentially problematic (optional):  {}",
        result.count(Category::Maybe).to_string().yellow()
    );
    println!(
        "Unknown file types:                  {}",
        result.count(Category::Unknown).to_string().cyan()
    );
    println!(
        "Path/filename/zero-byte issues:      {}",
        result.issues().len()
    );
    if !result.junk_dirs().is_empty() {
        println!(
            "Junk directories detected:           {}",
            result.junk_dirs().len()
        );
    }
    if result.is_interrupted() {
        println!("{}", "Scan was interrupted; results are partial.".yellow());
    }

    for (category, title) in [
        (Category::Junk, "Junk files"),
        (Category::Maybe, "Potentially problematic files"),
        (Category::Unknown, "Unknown files"),
    ] {
        let items = result.bucket(category);
        if !items.is_empty() {
            print_samples(title, items, root, limit);
        }
    }
    if !result.issues().is_empty() {
        print_samples("Name/path issues", result.issues(), root, limit);
    }

    if !result.junk_dirs().is_empty() {
        println!();
        println!("{}", "Junk directories found (often created by macOS):".bold());
        for dir in result.junk_dirs().iter().take(JUNK_DIR_SAMPLE) {
            println!("  - {}", dir.strip_prefix(root).unwrap_or(dir).display());
        }
        if result.junk_dirs().len() > JUNK_DIR_SAMPLE {
            println!("  ...and {} more", result.junk_dirs().len() - JUNK_DIR_SAMPLE);
        }
    }
}

/// Ask for a level on the menu. `None` means the choice was not recognized.
fn choose_level() -> Result<Option<Aggressiveness>> {
    println!();
    println!("{}", "=== Deletion options ===".bold());
    for level in Aggressiveness::MENU {
        println!("{}", level.menu_entry());
    }
    let choice = prompt("\nChoose 1/2/3/4: ")?;
    match choice.parse() {
        Ok(level) => Ok(Some(level)),
        Err(err) => {
            println!();
            println!("{} {}", "Invalid choice.".red(), err);
            Ok(None)
        }
    }
}

fn run(args: Args) -> Result<()> {
    println!("{}", "=== DAP Library Cleaner + Compatibility Scanner ===".bold());

    let raw_root = match args.path {
        Some(path) => path,
        None => {
            let home = std::env::var_os("HOME").map(PathBuf::from);
            parse_pasted_path(
                &prompt("Paste the FULL path to your Music folder:\n> ")?,
                home.as_deref(),
            )
        }
    };

    let rules = RuleTables::load()?;

    println!();
    println!("Scanning: {}", raw_root.display());
    let options = ScanOptions {
        progress: true,
        cancel: None,
    };
    let result = scan(&raw_root, &rules, &options)
        .with_context(|| format!("Invalid folder: {}", raw_root.display()))?;

    print_report(&result, args.limit);

    let level = match args.mode {
        Some(level) => level,
        None => match choose_level()? {
            Some(level) => level,
            None => return Ok(()),
        },
    };

    if level == Aggressiveness::ReportOnly {
        println!();
        println!("{}", "Report complete. No files were deleted.".green());
        return Ok(());
    }

    let plan = plan_deletions(&result, level);
    if plan.is_empty() {
        println!();
        println!("Nothing selected for deletion.");
        return Ok(());
    }

    let bytes = format_size(reclaimable_bytes(&plan), BINARY);

    if args.dry_run {
        println!();
        for path in plan.paths() {
            println!("Would remove: {}", path.display());
        }
        println!(
            "{} {} file(s) would be deleted ({})",
            "Dry run:".cyan().bold(),
            plan.len(),
            bytes
        );
        return Ok(());
    }

    println!();
    println!(
        "You are about to permanently delete {} file(s) ({}).",
        plan.len(),
        bytes
    );
    if !args.yes && prompt("Type DELETE to confirm: ")? != "DELETE" {
        println!();
        println!("Cancelled. No files were deleted.");
        return Ok(());
    }

    let outcome = execute(plan);
    for (path, err) in &outcome.failures {
        eprintln!("{} {} -> {}", "FAILED:".red(), path.display(), err);
    }
    println!();
    println!(
        "Done. Deleted {} file(s). Failed: {}",
        outcome.deleted,
        if outcome.failed > 0 {
            outcome.failed.to_string().red().to_string()
        } else {
            "0".to_string()
        }
    );

    let sweep = args.remove_empty_dirs
        || prompt("\nRemove empty folders too? (y/n): ")?.eq_ignore_ascii_case("y");
    if sweep {
        let removed = remove_empty_dirs(result.root());
        println!("Removed {} empty folder(s).", removed);
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    run(args)
}
