//! Plain-text maze layouts used by the command line adapter and tests.
//!
//! Each line is a row of cells, the first line being the northernmost one:
//!
//! * `#` wall object (blocks the guardian, outlines the maze)
//! * `P` wall object the player is standing on
//! * `.` open floor
//! * `G` open floor holding the guardian
//! * `F` open floor holding the finish marker

use telekinesis_core::{Cell, CollisionFlags, CollisionGrid};
use thiserror::Error;

use crate::{BuildError, Maze};

/// Reasons a text layout cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The text contained no rows.
    #[error("layout is empty")]
    Empty,
    /// A row was shorter or longer than the first one.
    #[error("row {line} has {found} cells, expected {expected}")]
    Ragged {
        /// Zero-based row index, counted from the top.
        line: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A character did not name a known tile.
    #[error("unknown tile '{tile}' at row {line}, column {column}")]
    UnknownTile {
        /// Offending character.
        tile: char,
        /// Zero-based row index, counted from the top.
        line: usize,
        /// Zero-based column index.
        column: usize,
    },
    /// A marker that may appear once was found again.
    #[error("marker '{marker}' appears more than once")]
    DuplicateMarker {
        /// Repeated marker character.
        marker: char,
    },
}

/// Maze description parsed from text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    origin: Cell,
    rows: Vec<String>,
    grid: CollisionGrid,
    walls: Vec<Cell>,
    finish: Option<Cell>,
    guardian: Option<Cell>,
    player: Option<Cell>,
}

impl Layout {
    /// Parses a layout whose south-west cell sits at the world origin.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        Self::parse_at(text, Cell::new(0, 0))
    }

    /// Parses a layout whose south-west cell sits at `origin`.
    pub fn parse_at(text: &str, origin: Cell) -> Result<Self, LayoutError> {
        let rows: Vec<String> = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect();

        let Some(first) = rows.first() else {
            return Err(LayoutError::Empty);
        };
        let width = first.chars().count();
        let height = rows.len();

        let mut grid = CollisionGrid::open(
            origin,
            u32::try_from(width).unwrap_or(u32::MAX),
            u32::try_from(height).unwrap_or(u32::MAX),
        );
        let mut walls = Vec::new();
        let mut finish = None;
        let mut guardian = None;
        let mut player = None;

        for (line, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(LayoutError::Ragged {
                    line,
                    expected: width,
                    found,
                });
            }

            for (column, tile) in row.chars().enumerate() {
                let cell = cell_at(origin, height, line, column);
                match tile {
                    '#' | 'P' => {
                        let _ = grid.set(cell, CollisionFlags::BLOCK_OBJECT);
                        walls.push(cell);
                        if tile == 'P' {
                            place_marker(&mut player, cell, tile)?;
                        }
                    }
                    '.' => {}
                    'G' => place_marker(&mut guardian, cell, tile)?,
                    'F' => place_marker(&mut finish, cell, tile)?,
                    _ => return Err(LayoutError::UnknownTile { tile, line, column }),
                }
            }
        }

        Ok(Self {
            origin,
            rows,
            grid,
            walls,
            finish,
            guardian,
            player,
        })
    }

    /// South-west cell of the layout.
    #[must_use]
    pub fn origin(&self) -> Cell {
        self.origin
    }

    /// Rows as written, north first.
    #[must_use]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Collision flags derived from the tiles.
    #[must_use]
    pub fn grid(&self) -> &CollisionGrid {
        &self.grid
    }

    /// Mutable access to the collision flags, for adding edge walls.
    pub fn grid_mut(&mut self) -> &mut CollisionGrid {
        &mut self.grid
    }

    /// Cells holding wall objects.
    #[must_use]
    pub fn walls(&self) -> &[Cell] {
        &self.walls
    }

    /// Finish marker, if the layout has one.
    #[must_use]
    pub fn finish(&self) -> Option<Cell> {
        self.finish
    }

    /// Guardian start, if the layout has one.
    #[must_use]
    pub fn guardian(&self) -> Option<Cell> {
        self.guardian
    }

    /// Player position, if the layout has one.
    #[must_use]
    pub fn player(&self) -> Option<Cell> {
        self.player
    }

    /// Builds the maze snapshot the layout describes.
    pub fn maze(&self) -> Result<Maze, BuildError> {
        Maze::build(&self.grid, &self.walls, self.finish)
    }

    /// Renders the layout with the provided cells overdrawn.
    ///
    /// Later marks win when several target the same cell.
    #[must_use]
    pub fn render(&self, marks: &[(Cell, char)]) -> String {
        let height = self.rows.len();
        let mut rendered = Vec::with_capacity(height);

        for (line, row) in self.rows.iter().enumerate() {
            let drawn: String = row
                .chars()
                .enumerate()
                .map(|(column, tile)| {
                    let cell = cell_at(self.origin, height, line, column);
                    marks
                        .iter()
                        .rev()
                        .find(|(marked, _)| *marked == cell)
                        .map_or(tile, |(_, mark)| *mark)
                })
                .collect();
            rendered.push(drawn);
        }

        rendered.join("\n")
    }
}

fn cell_at(origin: Cell, height: usize, line: usize, column: usize) -> Cell {
    let dx = i32::try_from(column).unwrap_or(i32::MAX);
    let dy = i32::try_from(height - 1 - line).unwrap_or(i32::MAX);
    Cell::new(origin.x().saturating_add(dx), origin.y().saturating_add(dy))
}

fn place_marker(slot: &mut Option<Cell>, cell: Cell, marker: char) -> Result<(), LayoutError> {
    if slot.is_some() {
        return Err(LayoutError::DuplicateMarker { marker });
    }
    *slot = Some(cell);
    Ok(())
}
