//! Maze chase game
//!
//! Discrete and deterministic:
//! - Pursuers update in fixed order (by id)
//! - No randomness, no pathfinding beyond one greedy step
//! - No rendering or platform dependencies

pub mod engine;
pub mod grid;
pub mod state;
pub mod tick;

pub use engine::PursuitEngine;
pub use grid::{GridCell, MazeGrid, REFERENCE_MAZE};
pub use state::{Direction, GamePhase, PursuitLayout, PursuitState, Token};
pub use tick::{MoveOutcome, PursuitOutcome, advance_pursuers, greedy_step, move_player, pursuit_path, reset};
