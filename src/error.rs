//! Error types for mini-arcade.
//!
//! Nothing on the tick path can fail; these cover loading settings and
//! authoring mazes.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArcadeError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid maze: {0}")]
    InvalidMaze(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, ArcadeError>;
