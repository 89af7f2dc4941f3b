//! Vault promotion CLI.
//!
//! # Responsibility
//! - Parse invocation arguments and wire them into the core batch runner.
//! - Keep exit codes stable: per-note skips and errors exit 0, structural
//!   failures exit non-zero.

use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::process;

use zettel_core::{
    default_log_level, init_logging, render_summary, BatchOptions, BatchRunner, FsNoteRepository,
    VaultLayout, DEFAULT_INBOX_DIR, DEFAULT_QUALITY_THRESHOLD,
};

#[derive(Parser)]
#[command(
    name = "zettel",
    version,
    about = "Promote scored inbox notes into categorized vault folders"
)]
struct Cli {
    /// Vault root directory
    vault_root: PathBuf,

    /// Intake directory, resolved against the vault root when relative
    #[arg(long, default_value = DEFAULT_INBOX_DIR, value_name = "DIR")]
    source: PathBuf,

    /// Minimum quality score a note needs to be promoted
    #[arg(long, default_value_t = DEFAULT_QUALITY_THRESHOLD, value_name = "FLOAT")]
    quality_threshold: f64,

    /// Compute and report decisions without moving anything
    #[arg(long)]
    dry_run: bool,

    /// Emit the summary as JSON instead of the human-readable listing
    #[arg(long)]
    json: bool,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Write rolling log files under this directory instead of stderr
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("{err}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let level = cli
        .log_level
        .unwrap_or_else(|| default_log_level().to_string());
    init_logging(&level, cli.log_dir.as_deref())?;

    if !(0.0..=1.0).contains(&cli.quality_threshold) {
        return Err(format!(
            "--quality-threshold must lie in [0.0, 1.0], got {}",
            cli.quality_threshold
        ));
    }
    if !cli.vault_root.is_dir() {
        return Err(format!(
            "vault root `{}` is not a directory",
            cli.vault_root.display()
        ));
    }

    let layout = VaultLayout::new(&cli.vault_root).with_inbox(&cli.source);
    let options = BatchOptions {
        threshold: cli.quality_threshold,
        dry_run: cli.dry_run,
    };

    info!(
        "event=cli_start module=cli status=ok vault={} source={} threshold={} dry_run={}",
        cli.vault_root.display(),
        layout.inbox_dir().display(),
        options.threshold,
        options.dry_run
    );

    let repo = FsNoteRepository::new();
    let runner = BatchRunner::new(&repo, &layout);
    let summary = runner
        .run(layout.inbox_dir(), &options)
        .map_err(|err| err.to_string())?;

    if cli.json {
        let json = serde_json::to_string_pretty(&summary)
            .map_err(|err| format!("json encode: {err}"))?;
        println!("{json}");
    } else {
        println!("{}", render_summary(&summary));
    }

    // Per-note skips and errors are reported in the summary, not the exit
    // code; only structural failures reach the Err path above.
    Ok(())
}
