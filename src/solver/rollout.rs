use rand::seq::SliceRandom;
use rand::Rng;

use crate::engine::apply::apply_generated;
use crate::state::{GameState, Move};
use crate::types::Player;

const P_STRIKE: f64 = 0.7;
const P_LUNGE: f64 = 0.3;
const LUNGE_MIN_AP: u8 = 4;
const P_END_LOW_AP: f64 = 0.6;
const P_ACTIVE: f64 = 0.7;

/// Draw one move from `moves` with the rollout bias.
pub fn pick_rollout_move<R: Rng + ?Sized>(state: &GameState, moves: &[Move], rng: &mut R) -> Option<Move> {
    let ap = state.mover().ap;

    let strikes: Vec<Move> = moves.iter().copied().filter(Move::is_strike).collect();
    if !strikes.is_empty() && rng.gen_bool(P_STRIKE) {
        return strikes.choose(rng).copied();
    }

    if ap >= LUNGE_MIN_AP && moves.contains(&Move::Lunging) && rng.gen_bool(P_LUNGE) {
        return Some(Move::Lunging);
    }

    if moves.contains(&Move::EndTurn)
        && (ap == 0 || (ap == 1 && strikes.is_empty() && rng.gen_bool(P_END_LOW_AP)))
    {
        return Some(Move::EndTurn);
    }

    let active: Vec<Move> = moves.iter().copied().filter(|m| *m != Move::EndTurn).collect();
    if !active.is_empty() && rng.gen_bool(P_ACTIVE) {
        return active.choose(rng).copied();
    }

    moves.choose(rng).copied()
}

/// Play `state` out with the biased policy.
///
/// Returns the winner, or None (a draw) once `action_cap` moves have been applied.
pub fn rollout<R: Rng + ?Sized>(state: &GameState, action_cap: u32, rng: &mut R) -> Option<Player> {
    let mut s = *state;
    for _ in 0..action_cap {
        if s.is_terminal() {
            return s.winner();
        }
        let moves = s.legal_moves();
        let Some(mv) = pick_rollout_move(&s, &moves, rng) else {
            return None;
        };
        s = apply_generated(&s, mv, rng);
    }
    s.winner()
}
