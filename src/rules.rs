//! Fixed combat constants.

/// Hit points both fighters start with (and their cap).
pub const START_HP: u8 = 7;
/// Action point ceiling.
pub const AP_CAP: u8 = 6;

pub const MOVE_COST: u8 = 1;
pub const STRIKE_COST: u8 = 1;
pub const STRIKE_DAMAGE: u8 = 2;
pub const REST_HEAL: u8 = 1;
pub const REST_AP: u8 = 1;
/// Granted to the player whose turn is ending.
pub const END_TURN_AP: u8 = 1;

pub const LUNGE_COST: u8 = 3;
pub const LUNGE_COMBOS: usize = 3;
pub const LUNGE_DAMAGE: u8 = 2;

/// Maximum squares covered by one move along a rank, file or diagonal.
pub const MAX_STEP: i8 = 2;

/// Instant-win thresholds: four strikes (or lunge + strike) deal at least 8.
pub const LETHAL_AP_ADJACENT: u8 = 4;
pub const LETHAL_AP_APPROACH: u8 = 5;
pub const LETHAL_HP: u8 = 7;
