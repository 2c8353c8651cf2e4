//! Battle system constants - all tunable values in one place

use crate::core::types::Position;

// Field geometry
pub const DEFAULT_FIELD_WIDTH: i32 = 7;
pub const DEFAULT_FIELD_HEIGHT: i32 = 5;

// Bases sit at opposite ends of the middle row
pub const DEFAULT_PLAYER_BASE: Position = Position { x: 6, y: 2 };
pub const DEFAULT_ENEMY_BASE: Position = Position { x: 0, y: 2 };

// Consecutive post-action checks on the opposing base that win the match
pub const BASE_CONTROL_TO_WIN: u32 = 3;

/// The only legal movement vectors: one cell along a single axis
pub const STEP_VECTORS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Is `(dx, dy)` a single orthogonal step?
pub fn is_step_vector(dx: i32, dy: i32) -> bool {
    STEP_VECTORS.contains(&(dx, dy))
}
