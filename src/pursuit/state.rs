//! Chase game state
//!
//! Everything the renderer needs to draw a frame lives in [`PursuitState`].

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::grid::MazeGrid;
use crate::error::{ArcadeError, Result};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// A pursuer caught the player; only a reset leaves this phase
    Over,
}

/// Directional input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step in grid space (y grows downward)
    pub fn offset(&self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    /// Map a key name to a direction; anything else is ignored
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Direction::Up),
            "ArrowDown" | "s" | "S" => Some(Direction::Down),
            "ArrowLeft" | "a" | "A" => Some(Direction::Left),
            "ArrowRight" | "d" | "D" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// A grid occupant (the player or a pursuer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub id: u32,
    pub pos: IVec2,
}

impl Token {
    pub fn new(id: u32, x: i32, y: i32) -> Self {
        Self {
            id,
            pos: IVec2::new(x, y),
        }
    }
}

/// Initial layout a run starts from and resets to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PursuitLayout {
    grid: MazeGrid,
    player_spawn: IVec2,
    pursuer_spawns: Vec<IVec2>,
}

impl PursuitLayout {
    /// Build a layout, checking every spawn is on a passable cell
    pub fn new(grid: MazeGrid, player_spawn: IVec2, pursuer_spawns: Vec<IVec2>) -> Result<Self> {
        for spawn in std::iter::once(&player_spawn).chain(&pursuer_spawns) {
            if !grid.is_passable(*spawn) {
                return Err(ArcadeError::InvalidMaze(format!(
                    "spawn ({}, {}) is outside the maze or on a wall",
                    spawn.x, spawn.y
                )));
            }
        }
        if pursuer_spawns.contains(&player_spawn) {
            return Err(ArcadeError::InvalidMaze(
                "player spawns on a pursuer".to_string(),
            ));
        }
        Ok(Self {
            grid,
            player_spawn,
            pursuer_spawns,
        })
    }

    /// Reference maze: player just left of the pen, three pursuers stacked inside it
    pub fn reference() -> Self {
        Self {
            grid: MazeGrid::reference(),
            player_spawn: IVec2::new(8, 6),
            pursuer_spawns: vec![IVec2::new(9, 5), IVec2::new(9, 6), IVec2::new(9, 7)],
        }
    }

    pub fn grid(&self) -> &MazeGrid {
        &self.grid
    }

    pub fn player_spawn(&self) -> IVec2 {
        self.player_spawn
    }

    pub fn pursuer_spawns(&self) -> &[IVec2] {
        &self.pursuer_spawns
    }
}

impl Default for PursuitLayout {
    fn default() -> Self {
        Self::reference()
    }
}

/// Complete chase game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PursuitState {
    pub grid: MazeGrid,
    pub player: Token,
    /// Pursuers in fixed update order (by id)
    pub pursuers: Vec<Token>,
    pub score: u32,
    pub phase: GamePhase,
}

impl PursuitState {
    /// Fresh state for a layout: grid copy, tokens on their spawns, score 0
    pub fn new(layout: &PursuitLayout) -> Self {
        Self {
            grid: layout.grid.clone(),
            player: Token {
                id: 0,
                pos: layout.player_spawn,
            },
            pursuers: layout
                .pursuer_spawns
                .iter()
                .enumerate()
                .map(|(i, pos)| Token {
                    id: i as u32 + 1,
                    pos: *pos,
                })
                .collect(),
            score: 0,
            phase: GamePhase::Playing,
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.phase == GamePhase::Over
    }

    /// Every collectible has been taken (not a terminal condition)
    pub fn is_cleared(&self) -> bool {
        self.grid.collectibles_left() == 0
    }

    /// Any pursuer shares the player's cell
    pub fn player_caught(&self) -> bool {
        self.pursuers.iter().any(|p| p.pos == self.player.pos)
    }
}
