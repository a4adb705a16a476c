use std::io::Write;

use anyhow::Result;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sequence::{LinkedSequence, Sequence};
use tracing_subscriber::EnvFilter;

use tasks::{Board, Registry, generate, run};

/// Generate random tasks and execute them front to back.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Number of tasks to generate.
    #[arg(long, default_value_t = 20)]
    count: usize,

    /// Generator seed. Drawn from OS entropy when absent.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let registry = Registry::new();
    let mut board = Board::new(registry.clone());
    for _ in 0..cli.count {
        board.push(generate(&mut rng, &registry));
    }
    tracing::info!(tasks = board.len(), live = registry.live(), "tasks generated");

    let mut out = std::io::stdout().lock();
    writeln!(out, "Task list size: {}", board.len())?;

    let mut report = LinkedSequence::new();
    let summary = run(&mut board, &mut report);
    tracing::info!(
        executed = summary.executed,
        failed = summary.failed,
        pending = board.pending_len(),
        "run finished"
    );

    writeln!(out, "Task list size after run: {}", board.len())?;
    for line in &report {
        writeln!(out, "{line}")?;
    }

    board.clear();
    report.clear();
    writeln!(out, "Task list size after clearing: {}", board.len())?;
    writeln!(out, "Report size after clearing: {}", report.len())?;
    tracing::info!(live = registry.live(), "cleared");
    Ok(())
}
