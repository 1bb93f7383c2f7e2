mod cli;

use anyhow::{Context, Result};
use audiogate::batch::{BatchRun, Tally};
use audiogate::orchestrator;
use audiogate_av::{engine, probe};
use clap::Parser;
use cli::Cli;
use colored::Colorize;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version are informational; anything else is usage
            // misuse and exits 1.
            let is_info = matches!(
                e.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            );
            let _ = e.print();
            std::process::exit(if is_info { 0 } else { 1 });
        }
    };

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "audiogate=debug,audiogate_av=debug".to_string()
        } else {
            "audiogate=info,audiogate_av=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    ensure_tools()?;

    if cli.verbose {
        for tool in audiogate_av::check_tools() {
            tracing::debug!(
                "{}: {}",
                tool.name,
                tool.version.as_deref().unwrap_or("unknown version")
            );
        }
    }

    let run = BatchRun {
        input: cli.input,
        output_dir: cli.output,
        dry_run: cli.dry_run,
        verbose: cli.verbose,
    };

    let tally = orchestrator::run_batch(&run)?;
    print_summary(&tally);

    Ok(())
}

/// Verify the external tools the pipeline shells out to are reachable.
///
/// ffmpeg is never invoked directly, but the engine needs it to merge
/// separate streams, so its absence is still fatal.
fn ensure_tools() -> Result<()> {
    for name in [engine::ENGINE, "ffmpeg", probe::PROBER] {
        audiogate_av::require_tool(name)
            .with_context(|| format!("required external tool is missing: {}", name))?;
    }
    Ok(())
}

fn print_summary(tally: &Tally) {
    println!(
        "\n{} ({} URL(s) processed)",
        "Batch complete".bold(),
        tally.total()
    );
    println!("  {} {}", "succeeded:".green(), tally.succeeded);
    println!("  {} {}", "skipped:".yellow(), tally.skipped);
    println!("  {} {}", "failed:".red(), tally.failed);
}
