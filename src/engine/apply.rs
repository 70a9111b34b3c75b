use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Error, Result};
use crate::rules::{
    END_TURN_AP, LUNGE_COMBOS, LUNGE_COST, LUNGE_DAMAGE, MOVE_COST, REST_AP, REST_HEAL,
    STRIKE_COST, STRIKE_DAMAGE,
};
use crate::state::{GameState, Move};
use crate::types::Pos;

/// Finish the mover's turn in place.
///
/// Clears a stun unless it was applied this turn, grants the mover +1 ap, hands the
/// turn over and records the new mover's starting ap.
pub fn end_turn(state: &mut GameState) {
    let me = state.fighter_mut(state.current);
    if !me.stunned_this_turn {
        me.stunned = false;
    }
    me.stunned_this_turn = false;
    me.gain_ap(END_TURN_AP);

    state.current = state.current.other();
    state.turn_start_ap = state.mover().ap;
    state.last_position = None;
}

/// Deal `amount` to the opponent; returns true if that ended the game.
fn hit_opponent(state: &mut GameState, amount: u8) -> bool {
    let foe = state.current.other();
    let f = state.fighter_mut(foe);
    f.damage(amount);
    if f.hp == 0 {
        state.game_over = true;
    }
    state.game_over
}

fn relocate_mover(state: &mut GameState, to: Pos) {
    let from = state.mover().pos;
    state.board.relocate(from, to);
    state.fighter_mut(state.current).pos = to;
}

/// The lunging combo, without ending the turn.
///
/// Costs 3 ap up front, then three combos: hit the opponent if adjacent, then reposition
/// to a random 1-2 square destination. When the opening hit connects, repositioning waits
/// for the final combo. Leaves the mover stunned for their next turn unless a hit ends
/// the game.
pub fn lunge_sequence<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    state.fighter_mut(state.current).spend_ap(LUNGE_COST);
    let first_strike_hit = state.opponent_adjacent();

    for combo in 0..LUNGE_COMBOS {
        if state.opponent_adjacent() && hit_opponent(state, LUNGE_DAMAGE) {
            return;
        }
        let deferred = first_strike_hit && combo + 1 < LUNGE_COMBOS;
        if !deferred {
            let options = state.destinations_from(state.mover().pos);
            if let Some(&to) = options.choose(rng) {
                relocate_mover(state, to);
            }
        }
    }

    let me = state.fighter_mut(state.current);
    me.stunned = true;
    me.stunned_this_turn = true;
}

/// Apply a move as a pure transform: returns a new GameState on success.
/// Rejects anything `legal_moves` would not generate.
pub fn apply_move<R: Rng + ?Sized>(state: &GameState, mv: Move, rng: &mut R) -> Result<GameState> {
    if state.is_terminal() || !state.legal_moves().contains(&mv) {
        return Err(Error::IllegalMove {
            mv,
            player: state.current.id(),
        });
    }

    let mut ns = *state;
    match mv {
        Move::Rest => {
            let me = ns.fighter_mut(ns.current);
            me.heal(REST_HEAL);
            me.gain_ap(REST_AP);
            end_turn(&mut ns);
        }
        Move::Move(to) => {
            ns.last_position = Some(ns.mover().pos);
            relocate_mover(&mut ns, to);
            ns.fighter_mut(ns.current).spend_ap(MOVE_COST);
        }
        Move::Strike(_) => {
            ns.fighter_mut(ns.current).spend_ap(STRIKE_COST);
            hit_opponent(&mut ns, STRIKE_DAMAGE);
        }
        Move::Lunging => {
            lunge_sequence(&mut ns, rng);
            if !ns.game_over {
                end_turn(&mut ns);
            }
        }
        Move::EndTurn => end_turn(&mut ns),
    }
    Ok(ns)
}

/// Apply a move taken from `legal_moves`. A rejection means move generation and
/// application disagree, which is a bug, so it panics.
pub fn apply_generated<R: Rng + ?Sized>(state: &GameState, mv: Move, rng: &mut R) -> GameState {
    match apply_move(state, mv, rng) {
        Ok(ns) => ns,
        Err(e) => unreachable!("generated move rejected: {e}"),
    }
}
