use crate::rules::{LETHAL_AP_ADJACENT, LETHAL_AP_APPROACH, LETHAL_HP};
use crate::state::{GameState, Move};

/// Cheap sufficient condition for the mover having a forced win this turn.
///
/// Adjacent with 4+ ap against an opponent at 7 hp or less (four strikes deal 8), or
/// 5+ ap and a legal move that lands adjacent first. Never reports a win that the
/// arithmetic does not guarantee; misses every other pattern.
pub fn has_instant_win(state: &GameState) -> bool {
    if state.is_terminal() {
        return false;
    }
    let me = state.mover();
    let foe = state.opponent();
    if me.stunned || foe.hp > LETHAL_HP {
        return false;
    }

    if me.pos.is_adjacent(foe.pos) {
        return me.ap >= LETHAL_AP_ADJACENT;
    }
    if me.ap < LETHAL_AP_APPROACH {
        return false;
    }
    state.legal_moves().iter().any(|mv| match mv {
        Move::Move(to) => to.is_adjacent(foe.pos),
        _ => false,
    })
}
