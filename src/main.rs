use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use log::{LevelFilter, debug, error, info, warn};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

use hash_assets::utils::relative_to_cwd;
use hash_assets::{Cli, Generator, format_human_elapsed, format_number};

fn init_logger(cli: &Cli) -> Result<()> {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else if cli.quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let mut builder = ConfigBuilder::new();
    builder.set_target_level(LevelFilter::Off);
    builder.set_thread_level(LevelFilter::Off);
    // Falls back to UTC when the local offset cannot be determined.
    let _ = builder.set_time_offset_to_local();

    TermLogger::init(level, builder.build(), TerminalMode::Mixed, ColorChoice::Auto)
        .context("Failed to initialize logger")
}

fn run(cli: &Cli) -> Result<()> {
    let start_time = Instant::now();

    let config = cli.resolve().context("Invalid configuration")?;
    debug!("Resolved configuration: {:?}", config);

    info!(
        "{}",
        format!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")).green()
    );
    info!("hashing build assets...");
    info!(
        "included file extensions: {}",
        config
            .extensions
            .iter()
            .map(|e| e.cyan().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let cancel = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&cancel);
    ctrlc::set_handler(move || {
        handler_flag.store(true, Ordering::SeqCst);
    })
    .context("Failed to install Ctrl-C handler")?;

    let summary = Generator::new(&config)
        .with_progress(!cli.no_progress && !cli.quiet)
        .with_cancel_flag(cancel)
        .run()
        .with_context(|| format!("Hashing assets in '{}' failed", config.assets_dir.display()))?;

    if summary.skipped > 0 {
        info!("{} files already hashed", format_number(summary.skipped));
    }
    if summary.manifest.is_none() {
        warn!("No asset files hashed, manifest not written");
    }
    info!(
        "{} asset files hashed in {}",
        format_number(summary.hashed),
        relative_to_cwd(&config.assets_dir).cyan()
    );
    info!("Completed in {}", format_human_elapsed(start_time.elapsed()));
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logger(&cli) {
        eprintln!("{e:#}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
