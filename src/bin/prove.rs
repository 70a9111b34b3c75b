use std::path::PathBuf;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use gridlunge::{
    winner_id, BatchConfig, BatchDriver, BatchOutcome, CacheStore, GameState, SearchConfig,
    SearchResult,
};

#[derive(Debug, Parser)]
#[command(name = "prove", about = "Prove the opening position with MCTS + proof propagation")]
struct Args {
    /// Iteration budget per run
    #[arg(long, default_value_t = 100_000)]
    iterations: u64,

    /// Maximum number of runs before giving up
    #[arg(long, default_value_t = 10)]
    runs: u32,

    /// Proof cache file, reloaded at the start of every run
    #[arg(long, default_value = "proofs.bin")]
    cache: PathBuf,

    /// Keep proofs in memory only
    #[arg(long)]
    no_cache: bool,

    /// UCT exploration constant
    #[arg(long, default_value_t = std::f64::consts::SQRT_2)]
    exploration: f64,

    /// Base RNG seed (each run derives its own)
    #[arg(long, default_value_t = 0x00C0_FFEEu64)]
    seed: u64,

    /// Progress report period in iterations (0 disables)
    #[arg(long, default_value_t = 1_000)]
    report_interval: u64,

    /// Cache save period in iterations (0 saves only at the end of a run)
    #[arg(long, default_value_t = 10_000)]
    save_interval: u64,

    /// Moves per rollout before it counts as a draw
    #[arg(long, default_value_t = 500)]
    rollout_cap: u32,
}

impl Args {
    fn batch_config(&self) -> BatchConfig {
        BatchConfig {
            runs: self.runs,
            search: SearchConfig {
                iterations: self.iterations,
                exploration: self.exploration,
                report_interval: self.report_interval,
                save_interval: self.save_interval,
                rollout_cap: self.rollout_cap,
                seed: self.seed,
            },
        }
    }
}

fn print_result(result: &SearchResult) {
    println!("  win rate (P1):     {:.2}%", result.win_rate * 100.0);
    println!("  simulations:       {}", result.total_simulations);
    println!(
        "  P1 / P2 / draws:   {} / {} / {}",
        result.player1_wins, result.player2_wins, result.draws
    );
    println!(
        "  best move:         {}",
        result.best_move.as_deref().unwrap_or("-")
    );
    match result.proof {
        Some(p) => println!(
            "  proof:             {:?} for P{} (winner P{})",
            p.status,
            p.player.id(),
            p.winner().id()
        ),
        None => println!("  proof:             none"),
    }
    println!("  proven nodes:      {}", result.proven_nodes);
    println!(
        "  cache:             {} entries, {} hits",
        result.cache_size, result.cache_hits
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.batch_config();

    let mut driver = BatchDriver::new(config);
    if !args.no_cache {
        driver = driver.with_store(CacheStore::new(&args.cache));
    }

    let pb = ProgressBar::new(u64::from(config.runs));
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] runs {bar:40.cyan/blue} {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let initial = GameState::initial();
    let outcome = driver.run_with(&initial, |_, result| {
        pb.inc(1);
        pb.set_message(format!("win rate {:.1}%", result.win_rate * 100.0));
    });
    pb.finish_and_clear();

    match &outcome {
        BatchOutcome::Proven { runs, result } => {
            println!(
                "[prove] Proven after {runs} run(s): winner P{}",
                winner_id(result.winner())
            );
            print_result(result);
        }
        BatchOutcome::Unresolved { runs, last } => {
            println!("[prove] Unresolved after {runs} run(s)");
            if let Some(result) = last {
                print_result(result);
            }
        }
    }
    Ok(())
}
