#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Breadth-first path solver over guardian slides.
//!
//! Every edge of the search graph is a complete slide as answered by
//! [`Maze::step`], so path length counts pulls rather than cells.

use std::collections::{HashMap, HashSet, VecDeque};

use telekinesis_core::{Cell, Direction};
use telekinesis_world::{Maze, SlideError};

/// Shortest sequence of slides from a start cell to the maze finish.
///
/// Waypoints hold the start followed by the landing cell of every slide;
/// `directions[i]` is the slide leading from `waypoints[i]` to
/// `waypoints[i + 1]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    waypoints: Vec<Cell>,
    directions: Vec<Direction>,
}

impl Path {
    /// Path that stays on `start` without moving.
    #[must_use]
    pub fn empty(start: Cell) -> Self {
        Self {
            waypoints: vec![start],
            directions: Vec::new(),
        }
    }

    /// Cell the path starts on.
    #[must_use]
    pub fn start(&self) -> Cell {
        self.waypoints[0]
    }

    /// Cell the path ends on.
    #[must_use]
    pub fn end(&self) -> Cell {
        self.waypoints[self.waypoints.len() - 1]
    }

    /// Number of slides in the path.
    #[must_use]
    pub fn moves(&self) -> usize {
        self.directions.len()
    }

    /// Reports whether the path contains no slides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }

    /// Slides in travel order.
    #[must_use]
    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    /// Start cell followed by every landing cell.
    #[must_use]
    pub fn waypoints(&self) -> &[Cell] {
        &self.waypoints
    }
}

/// Read position over a solved [`Path`].
///
/// The path itself is never consumed; advancing only moves the cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathCursor {
    path: Path,
    position: usize,
}

impl PathCursor {
    /// Places a cursor at the start of the path.
    #[must_use]
    pub fn new(path: Path) -> Self {
        Self { path, position: 0 }
    }

    /// Underlying path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of slides already taken.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Waypoint the guardian should currently rest on.
    #[must_use]
    pub fn current(&self) -> Cell {
        self.path.waypoints[self.position]
    }

    /// Slides still to take.
    #[must_use]
    pub fn remaining(&self) -> &[Direction] {
        &self.path.directions[self.position..]
    }

    /// Next slide to take, if any.
    #[must_use]
    pub fn next_direction(&self) -> Option<Direction> {
        self.remaining().first().copied()
    }

    /// Reports whether every slide has been taken.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.position >= self.path.moves()
    }

    /// Moves past the next slide, returning it.
    pub fn advance(&mut self) -> Option<Direction> {
        let next = self.next_direction()?;
        self.position += 1;
        Some(next)
    }
}

/// Breadth-first search over slides with reusable scratch buffers.
#[derive(Debug, Default)]
pub struct PathSolver {
    frontier: VecDeque<Cell>,
    closed: HashSet<Cell>,
    scores: HashMap<Cell, u32>,
    edges: HashMap<Cell, (Cell, Direction)>,
}

impl PathSolver {
    /// Creates a solver with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shortest path from `start` to the maze finish.
    ///
    /// An unreachable finish, or a start already on it, yields an empty path.
    /// Errors only surface when the maze is not enclosed.
    pub fn solve(&mut self, maze: &Maze, start: Cell) -> Result<Path, SlideError> {
        self.explore(maze, start)?;
        let path = self.reconstruct(start, maze.finish());

        log::debug!(
            "solved {} slide(s) from {} to {} after visiting {} cell(s)",
            path.moves(),
            start,
            maze.finish(),
            self.closed.len()
        );

        Ok(path)
    }

    fn explore(&mut self, maze: &Maze, start: Cell) -> Result<(), SlideError> {
        self.frontier.clear();
        self.closed.clear();
        self.scores.clear();
        self.edges.clear();

        let _ = self.scores.insert(start, 0);
        self.frontier.push_back(start);

        while let Some(cell) = self.frontier.pop_front() {
            let _ = self.closed.insert(cell);
            let Some(&score) = self.scores.get(&cell) else {
                continue;
            };
            let next_score = score + 1;

            for direction in Direction::SEARCH_ORDER {
                let neighbour = maze.step(cell, direction)?;
                if neighbour == cell || self.closed.contains(&neighbour) {
                    continue;
                }

                let improves = self
                    .scores
                    .get(&neighbour)
                    .map_or(true, |&known| known > next_score);
                if improves {
                    let _ = self.scores.insert(neighbour, next_score);
                    let _ = self.edges.insert(neighbour, (cell, direction));
                    self.frontier.push_back(neighbour);
                }
            }
        }

        Ok(())
    }

    fn reconstruct(&self, start: Cell, finish: Cell) -> Path {
        let mut waypoints = Vec::new();
        let mut directions = Vec::new();
        let mut current = finish;

        while let Some(&(previous, direction)) = self.edges.get(&current) {
            waypoints.push(current);
            directions.push(direction);
            current = previous;
        }

        if waypoints.is_empty() {
            return Path::empty(start);
        }

        waypoints.push(start);
        waypoints.reverse();
        directions.reverse();

        Path {
            waypoints,
            directions,
        }
    }
}

/// Shortest path from `start` to the maze finish using fresh scratch buffers.
pub fn solve(maze: &Maze, start: Cell) -> Result<Path, SlideError> {
    PathSolver::new().solve(maze, start)
}
