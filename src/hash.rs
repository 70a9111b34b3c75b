use std::fmt;

use serde::{Deserialize, Serialize};

use crate::state::{Fighter, GameState};
use crate::types::{Player, Pos};

/// Canonical transposition key.
///
/// Packs `(current, p1{hp, ap, row, col, stunned}, p2{...})` into a u64: 16 bits per
/// fighter (hp:8, ap:3, row:2, col:2, stunned:1) and the mover id above them.
/// `last_position` and `turn_start_ap` are not part of the key, so positions that differ
/// only in turn-local bookkeeping share one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateKey(pub u64);

const FIGHTER_BITS: u32 = 16;

#[inline]
fn pack_fighter(f: &Fighter) -> u64 {
    (f.hp as u64)
        | ((f.ap as u64 & 0x7) << 8)
        | ((f.pos.row as u64 & 0x3) << 11)
        | ((f.pos.col as u64 & 0x3) << 13)
        | ((f.stunned as u64) << 15)
}

#[inline]
fn unpack_fighter(bits: u64) -> (u8, u8, Pos, bool) {
    let hp = (bits & 0xFF) as u8;
    let ap = ((bits >> 8) & 0x7) as u8;
    let row = ((bits >> 11) & 0x3) as u8;
    let col = ((bits >> 13) & 0x3) as u8;
    let stunned = (bits >> 15) & 1 == 1;
    (hp, ap, Pos::new(row, col), stunned)
}

/// Full recomputation from state components.
#[inline]
pub fn state_key(state: &GameState) -> StateKey {
    let p1 = pack_fighter(&state.players[0]);
    let p2 = pack_fighter(&state.players[1]);
    let mover = state.current.id() as u64;
    StateKey(p1 | (p2 << FIGHTER_BITS) | (mover << (2 * FIGHTER_BITS)))
}

impl StateKey {
    #[inline]
    pub fn current(self) -> Option<Player> {
        Player::from_id((self.0 >> (2 * FIGHTER_BITS)) as u8)
    }
}

impl fmt::Display for StateKey {
    /// Field list in key order, e.g. `1|7,0,0,1,0|7,0,2,1,0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mover = (self.0 >> (2 * FIGHTER_BITS)) & 0x3;
        write!(f, "{mover}")?;
        for shift in [0, FIGHTER_BITS] {
            let (hp, ap, pos, stunned) = unpack_fighter(self.0 >> shift);
            write!(f, "|{hp},{ap},{},{},{}", pos.row, pos.col, stunned as u8)?;
        }
        Ok(())
    }
}
