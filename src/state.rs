use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::rules::{AP_CAP, LUNGE_COST, MAX_STEP, MOVE_COST, START_HP, STRIKE_COST};
use crate::types::{Player, Pos};

/// One fighter's stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fighter {
    pub hp: u8,
    pub max_hp: u8,
    pub ap: u8, // 0..=AP_CAP
    pub pos: Pos,
    pub stunned: bool,
    /// Stun applied during the current turn; survives the end of that turn.
    pub stunned_this_turn: bool,
}

impl Fighter {
    #[inline]
    pub const fn new(pos: Pos) -> Self {
        Self {
            hp: START_HP,
            max_hp: START_HP,
            ap: 0,
            pos,
            stunned: false,
            stunned_this_turn: false,
        }
    }

    #[inline]
    pub fn heal(&mut self, amount: u8) {
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }

    #[inline]
    pub fn damage(&mut self, amount: u8) {
        self.hp = self.hp.saturating_sub(amount);
    }

    #[inline]
    pub fn gain_ap(&mut self, amount: u8) {
        self.ap = self.ap.saturating_add(amount).min(AP_CAP);
    }

    #[inline]
    pub fn spend_ap(&mut self, amount: u8) {
        debug_assert!(self.ap >= amount, "spending {amount} ap with only {}", self.ap);
        self.ap = self.ap.saturating_sub(amount);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Rest,
    Move(Pos),
    Strike(Pos),
    Lunging,
    EndTurn,
}

impl Move {
    /// Human-readable description used in reports.
    #[inline]
    pub fn description(&self) -> String {
        self.to_string()
    }

    #[inline]
    pub fn is_strike(&self) -> bool {
        matches!(self, Move::Strike(_))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Rest => write!(f, "Rest"),
            Move::Move(p) => write!(f, "Move to {p}"),
            Move::Strike(p) => write!(f, "Strike {p}"),
            Move::Lunging => write!(f, "Lunging"),
            Move::EndTurn => write!(f, "End turn"),
        }
    }
}

/// Full game snapshot. Always copied when advanced; nodes never share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    pub board: Board,
    pub players: [Fighter; 2],
    pub current: Player,
    pub game_over: bool,
    /// Mover's ap when their turn began; an idle end-turn is illegal.
    pub turn_start_ap: u8,
    /// Square the mover vacated earlier this turn; cleared when a turn ends.
    pub last_position: Option<Pos>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

impl GameState {
    /// Fixed opening: P1 at (0,1), P2 at (2,1), both 7 hp and 0 ap, P1 to move.
    pub fn initial() -> Self {
        Self::with_fighters(
            Fighter::new(Pos::new(0, 1)),
            Fighter::new(Pos::new(2, 1)),
            Player::One,
        )
    }

    /// Build a position from two fighters; the board is derived from their squares.
    pub fn with_fighters(p1: Fighter, p2: Fighter, current: Player) -> Self {
        debug_assert_ne!(p1.pos, p2.pos, "fighters share a square");
        let mut board = Board::new();
        board.set(p1.pos, Some(Player::One));
        board.set(p2.pos, Some(Player::Two));
        let mover_ap = match current {
            Player::One => p1.ap,
            Player::Two => p2.ap,
        };
        Self {
            board,
            players: [p1, p2],
            current,
            game_over: p1.hp == 0 || p2.hp == 0,
            turn_start_ap: mover_ap,
            last_position: None,
        }
    }

    #[inline]
    pub fn fighter(&self, player: Player) -> &Fighter {
        &self.players[player.index()]
    }

    #[inline]
    pub fn fighter_mut(&mut self, player: Player) -> &mut Fighter {
        &mut self.players[player.index()]
    }

    #[inline]
    pub fn mover(&self) -> &Fighter {
        self.fighter(self.current)
    }

    #[inline]
    pub fn opponent(&self) -> &Fighter {
        self.fighter(self.current.other())
    }

    #[inline]
    pub fn opponent_adjacent(&self) -> bool {
        self.mover().pos.is_adjacent(self.opponent().pos)
    }

    /// Empty cells reachable from `from` in 1-2 squares along a rank, file or diagonal.
    /// Order: dr ascending, then dc ascending.
    pub fn destinations_from(&self, from: Pos) -> Vec<Pos> {
        let mut out = Vec::with_capacity(16);
        for dr in -MAX_STEP..=MAX_STEP {
            for dc in -MAX_STEP..=MAX_STEP {
                if dr == 0 && dc == 0 {
                    continue;
                }
                if dr != 0 && dc != 0 && dr.abs() != dc.abs() {
                    continue;
                }
                if let Some(to) = from.offset(dr, dc) {
                    if self.board.is_empty(to) {
                        out.push(to);
                    }
                }
            }
        }
        out
    }

    /// Returns ordered legal moves for the current player.
    /// Order: Rest, moves, strikes, Lunging, EndTurn. A stunned mover may only end the turn.
    pub fn legal_moves(&self) -> Vec<Move> {
        let me = self.mover();
        if me.stunned {
            return vec![Move::EndTurn];
        }

        let mut moves = Vec::with_capacity(20);
        moves.push(Move::Rest);

        if me.ap >= MOVE_COST {
            for to in self.destinations_from(me.pos) {
                if self.last_position != Some(to) {
                    moves.push(Move::Move(to));
                }
            }
        }

        if me.ap >= STRIKE_COST {
            let foe = self.opponent().pos;
            if me.pos.is_adjacent(foe) {
                moves.push(Move::Strike(foe));
            }
        }

        if me.ap >= LUNGE_COST {
            moves.push(Move::Lunging);
        }

        if me.ap != self.turn_start_ap || me.ap == AP_CAP {
            moves.push(Move::EndTurn);
        }
        moves
    }

    /// Game over flag, or either fighter out of hp.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.game_over || self.players.iter().any(|f| f.hp == 0)
    }

    /// Winner by hp of a terminal position.
    #[inline]
    pub fn winner(&self) -> Option<Player> {
        if !self.is_terminal() {
            return None;
        }
        if self.players[0].hp == 0 {
            Some(Player::Two)
        } else {
            Some(Player::One)
        }
    }
}

#[inline]
pub fn legal_moves(state: &GameState) -> Vec<Move> {
    state.legal_moves()
}

#[inline]
pub fn is_terminal(state: &GameState) -> bool {
    state.is_terminal()
}
