use std::path::PathBuf;

use clap::Parser;

use gridlunge::persist::load_cache;
use gridlunge::{state_key, Fighter, GameState, Player, Pos, StateKey};

#[derive(Debug, Parser)]
#[command(name = "tt-cli", about = "Inspect a gridlunge proof cache")]
struct Args {
    /// Proof cache file (produced by prove)
    #[arg(long, default_value = "proofs.bin")]
    cache: PathBuf,

    /// Position to look up: "MOVER|hp,ap,row,col,stunned|hp,ap,row,col,stunned".
    /// Defaults to the opening position.
    #[arg(long)]
    state: Option<String>,

    /// Print every entry
    #[arg(long)]
    dump: bool,
}

fn parse_fighter(s: &str) -> Result<Fighter, String> {
    let vals: Vec<u8> = s
        .split(',')
        .map(|x| x.trim().parse::<u8>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("Invalid fighter '{s}': {e}"))?;
    if vals.len() != 5 {
        return Err(format!("Expected 5 fields for fighter '{s}', got {}", vals.len()));
    }
    if vals[2] > 2 || vals[3] > 2 {
        return Err(format!("Square out of range in '{s}'"));
    }
    let mut f = Fighter::new(Pos::new(vals[2], vals[3]));
    f.hp = vals[0].min(f.max_hp);
    f.ap = vals[1].min(gridlunge::rules::AP_CAP);
    f.stunned = vals[4] != 0;
    Ok(f)
}

fn parse_state(s: &str) -> Result<GameState, String> {
    let parts: Vec<&str> = s.split('|').collect();
    if parts.len() != 3 {
        return Err(format!("Expected MOVER|P1|P2, got '{s}'"));
    }
    let mover = parts[0]
        .trim()
        .parse::<u8>()
        .ok()
        .and_then(Player::from_id)
        .ok_or_else(|| format!("Invalid mover '{}', expected 1 or 2", parts[0]))?;
    let p1 = parse_fighter(parts[1])?;
    let p2 = parse_fighter(parts[2])?;
    if p1.pos == p2.pos {
        return Err("Fighters cannot share a square".into());
    }
    Ok(GameState::with_fighters(p1, p2, mover))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let Some(file) = load_cache(&args.cache).map_err(|e| format!("Cache load error: {e}"))? else {
        println!("[tt-cli] No cache at {}", args.cache.display());
        return Ok(());
    };

    println!(
        "[tt-cli] {} entries (size field {}), proven nodes {}, saved at {}",
        file.entries.len(),
        file.size,
        file.proven_nodes,
        file.saved_at
    );

    let state = match &args.state {
        Some(s) => parse_state(s).map_err(|e| format!("State parse error: {e}"))?,
        None => GameState::initial(),
    };
    let key: StateKey = state_key(&state);
    match file.entries.get(&key) {
        Some(rec) => println!(
            "[tt-cli] {key}: {:?} for P{} (winner P{})",
            rec.status,
            rec.player.id(),
            rec.winner().id()
        ),
        None => println!("[tt-cli] {key}: not in cache"),
    }

    if args.dump {
        for (k, rec) in &file.entries {
            println!("{k}\t{:?}\tP{}", rec.status, rec.player.id());
        }
    }
    Ok(())
}
