//! Maze grid for the chase game
//!
//! Cells are authored as ASCII: `#` wall, `.` collectible, space open.
//! Topology is fixed once built; the only transition is Collectible -> Open.

use std::fmt;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::error::{ArcadeError, Result};

/// One maze cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridCell {
    Wall,
    Open,
    Collectible,
}

impl GridCell {
    pub fn from_glyph(c: char) -> Option<Self> {
        match c {
            '#' => Some(GridCell::Wall),
            ' ' => Some(GridCell::Open),
            '.' => Some(GridCell::Collectible),
            _ => None,
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            GridCell::Wall => '#',
            GridCell::Open => ' ',
            GridCell::Collectible => '.',
        }
    }

    #[inline]
    pub fn is_passable(&self) -> bool {
        !matches!(self, GridCell::Wall)
    }
}

/// The 19x13 reference maze with an open pen in the middle
pub const REFERENCE_MAZE: &str = "\
###################
#........#........#
#.##.###.#.###.##.#
#.................#
#.##.#.## ##.#.##.#
#....#... ...#....#
####.###   ###.####
#....#... ...#....#
#.##.#.#####.#.##.#
#.................#
#.##.###.#.###.##.#
#........#........#
###################";

/// Fixed-size grid, row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeGrid {
    width: usize,
    height: usize,
    cells: Vec<GridCell>,
}

impl MazeGrid {
    /// Parse a rectangular ASCII maze. Blank lines are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let rows: Vec<&str> = text.lines().filter(|line| !line.is_empty()).collect();
        let Some(first) = rows.first() else {
            return Err(ArcadeError::InvalidMaze("maze has no rows".to_string()));
        };

        let width = first.chars().count();
        let mut cells = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row_width = row.chars().count();
            if row_width != width {
                return Err(ArcadeError::InvalidMaze(format!(
                    "row {y} is {row_width} cells wide, expected {width}"
                )));
            }
            for (x, c) in row.chars().enumerate() {
                let cell = GridCell::from_glyph(c).ok_or_else(|| {
                    ArcadeError::InvalidMaze(format!("unknown glyph {c:?} at ({x}, {y})"))
                })?;
                cells.push(cell);
            }
        }

        Ok(Self {
            width,
            height: rows.len(),
            cells,
        })
    }

    pub fn reference() -> Self {
        // The reference layout is a compile-time constant known to be well formed
        match Self::parse(REFERENCE_MAZE) {
            Ok(grid) => grid,
            Err(e) => unreachable!("reference maze is malformed: {e}"),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, pos: IVec2) -> Option<usize> {
        let (x, y) = (usize::try_from(pos.x).ok()?, usize::try_from(pos.y).ok()?);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Cell at `pos`, or None when out of bounds
    pub fn get(&self, pos: IVec2) -> Option<GridCell> {
        self.index(pos).map(|i| self.cells[i])
    }

    pub fn in_bounds(&self, pos: IVec2) -> bool {
        self.index(pos).is_some()
    }

    /// In bounds and not a wall
    pub fn is_passable(&self, pos: IVec2) -> bool {
        self.get(pos).is_some_and(|cell| cell.is_passable())
    }

    /// Turn a collectible at `pos` into open floor. Returns true if one was taken.
    pub fn collect(&mut self, pos: IVec2) -> bool {
        match self.index(pos) {
            Some(i) if self.cells[i] == GridCell::Collectible => {
                self.cells[i] = GridCell::Open;
                true
            }
            _ => false,
        }
    }

    pub fn collectibles_left(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == GridCell::Collectible)
            .count()
    }

    /// Rows of cells, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(self.width)
    }
}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.glyph())?;
            }
        }
        Ok(())
    }
}
