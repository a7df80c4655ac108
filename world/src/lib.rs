#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative maze model for the telekinetic room.
//!
//! A [`Maze`] is an immutable snapshot taken from the host: the collision
//! flags, the box outlined by the wall objects and the finish marker. It is
//! replaced wholesale whenever the host reports a different number of wall
//! objects and answers slide queries for the path solver.

mod layout;

use telekinesis_core::{
    Bounds, Cell, CollisionFlags, CollisionGrid, Direction, GuardianSnapshot, IndicatorSegment,
};
use thiserror::Error;

pub use layout::{Layout, LayoutError};

/// Reasons a maze snapshot cannot be assembled from host state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The host reported no finish marker.
    #[error("no finish marker is present")]
    MissingFinish,
    /// The host reported no wall objects to outline the maze.
    #[error("no wall objects outline the maze")]
    NoWalls,
}

/// Malformed collision data detected while sliding.
///
/// A maze enclosed by walls never produces these; they indicate that the
/// snapshot does not describe the room the solver was asked about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SlideError {
    /// The slide started on a cell the collision grid does not cover.
    #[error("slide origin {cell} lies outside the collision grid")]
    OutsideGrid {
        /// Requested origin of the slide.
        cell: Cell,
    },
    /// The slide ran off the collision grid without meeting an obstacle.
    #[error("slide {direction:?} from {from} leaves the collision grid after {edge}")]
    LeftGrid {
        /// Origin of the slide.
        from: Cell,
        /// Direction of travel.
        direction: Direction,
        /// Last cell on the grid reached by the slide.
        edge: Cell,
    },
}

/// Immutable snapshot of the telekinetic maze.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    grid: CollisionGrid,
    bounds: Bounds,
    finish: Cell,
    walls: usize,
}

impl Maze {
    /// Assembles a maze from the host's collision flags, wall locations and
    /// finish marker.
    pub fn build(
        grid: &CollisionGrid,
        walls: &[Cell],
        finish: Option<Cell>,
    ) -> Result<Self, BuildError> {
        let finish = finish.ok_or(BuildError::MissingFinish)?;
        let bounds = Bounds::from_cells(walls.iter().copied()).ok_or(BuildError::NoWalls)?;

        log::debug!(
            "built maze from {} walls: bounds {:?}, finish {}",
            walls.len(),
            bounds,
            finish
        );

        Ok(Self {
            grid: grid.clone(),
            bounds,
            finish,
            walls: walls.len(),
        })
    }

    /// Collision flags captured when the maze was built.
    #[must_use]
    pub fn grid(&self) -> &CollisionGrid {
        &self.grid
    }

    /// Box outlined by the wall objects.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Cell the guardian has to reach.
    #[must_use]
    pub fn finish(&self) -> Cell {
        self.finish
    }

    /// Number of wall objects the maze was built from.
    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.walls
    }

    /// Cell a slide starting at `from` comes to rest on.
    ///
    /// The guardian keeps travelling in `direction` until the next cell is
    /// blocked or a wall edge separates the two cells.
    pub fn step(&self, from: Cell, direction: Direction) -> Result<Cell, SlideError> {
        let mut current = from;
        let mut current_flags = self
            .grid
            .get(from)
            .ok_or(SlideError::OutsideGrid { cell: from })?;

        loop {
            let next = current.offset(direction);
            let Some(next_flags) = self.grid.get(next) else {
                return Err(SlideError::LeftGrid {
                    from,
                    direction,
                    edge: current,
                });
            };

            if is_blocked(current_flags, next_flags, direction) {
                return Ok(current);
            }

            current = next;
            current_flags = next_flags;
        }
    }

    /// Landing cell of a guardian that is currently sliding.
    ///
    /// Resting guardians and guardians without a known facing yield `None`.
    pub fn destination(&self, guardian: &GuardianSnapshot) -> Result<Option<Cell>, SlideError> {
        match guardian.facing {
            Some(facing) if guardian.moving => self.step(guardian.cell, facing).map(Some),
            _ => Ok(None),
        }
    }

    /// Cells a player stands on to pull the guardian in `direction`.
    #[must_use]
    pub fn indicator_line(&self, direction: Direction) -> IndicatorSegment {
        self.bounds.indicator_line(direction)
    }

    /// Direction a cast from `cell` would pull the guardian, if any.
    #[must_use]
    pub fn side_of(&self, cell: Cell) -> Option<Direction> {
        self.bounds.side_of(cell)
    }
}

/// Reports whether a move from a cell flagged `from` into a neighbour
/// flagged `to` is stopped.
///
/// Floor and object blocking on the destination always stop the move;
/// otherwise the wall on the leaving edge of `from` or the entering edge of
/// `to` decides.
#[must_use]
pub fn is_blocked(from: CollisionFlags, to: CollisionFlags, direction: Direction) -> bool {
    if to.contains(CollisionFlags::BLOCK_FLOOR) || to.contains(CollisionFlags::BLOCK_OBJECT) {
        return true;
    }

    from.contains(CollisionFlags::wall(direction))
        || to.contains(CollisionFlags::wall(direction.opposite()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_maze(width: u32, height: u32) -> Maze {
        let grid = CollisionGrid::open(Cell::new(0, 0), width, height);
        let corner = Cell::new(0, 0);
        let far = Cell::new(width as i32 - 1, height as i32 - 1);
        Maze::build(&grid, &[corner, far], Some(far)).expect("maze builds")
    }

    #[test]
    fn build_requires_finish() {
        let grid = CollisionGrid::open(Cell::new(0, 0), 3, 3);
        let result = Maze::build(&grid, &[Cell::new(0, 0)], None);
        assert_eq!(result, Err(BuildError::MissingFinish));
    }

    #[test]
    fn build_requires_walls() {
        let grid = CollisionGrid::open(Cell::new(0, 0), 3, 3);
        let result = Maze::build(&grid, &[], Some(Cell::new(1, 1)));
        assert_eq!(result, Err(BuildError::NoWalls));
    }

    #[test]
    fn build_derives_bounds_from_walls() {
        let grid = CollisionGrid::open(Cell::new(0, 0), 8, 8);
        let walls = [Cell::new(1, 2), Cell::new(6, 2), Cell::new(3, 7)];
        let maze = Maze::build(&grid, &walls, Some(Cell::new(3, 3))).expect("maze builds");
        assert_eq!(maze.bounds(), Bounds::new(1, 2, 5, 5));
        assert_eq!(maze.wall_count(), 3);
        assert_eq!(maze.finish(), Cell::new(3, 3));
    }

    #[test]
    fn blocked_by_destination_floor_or_object() {
        for direction in Direction::SEARCH_ORDER {
            assert!(is_blocked(
                CollisionFlags::OPEN,
                CollisionFlags::BLOCK_OBJECT,
                direction
            ));
            assert!(is_blocked(
                CollisionFlags::OPEN,
                CollisionFlags::BLOCK_FLOOR,
                direction
            ));
            assert!(!is_blocked(
                CollisionFlags::BLOCK_OBJECT,
                CollisionFlags::FLOOR_DECORATION,
                direction
            ));
        }
    }

    #[test]
    fn blocked_by_walls_on_either_side_of_the_edge() {
        assert!(is_blocked(
            CollisionFlags::BLOCK_NORTH,
            CollisionFlags::OPEN,
            Direction::North
        ));
        assert!(is_blocked(
            CollisionFlags::OPEN,
            CollisionFlags::BLOCK_SOUTH,
            Direction::North
        ));
        assert!(!is_blocked(
            CollisionFlags::BLOCK_SOUTH,
            CollisionFlags::BLOCK_NORTH,
            Direction::North
        ));
        assert!(is_blocked(
            CollisionFlags::BLOCK_WEST,
            CollisionFlags::OPEN,
            Direction::West
        ));
        assert!(is_blocked(
            CollisionFlags::OPEN,
            CollisionFlags::BLOCK_WEST,
            Direction::East
        ));
    }

    #[test]
    fn open_grid_slide_reports_the_grid_edge() {
        let maze = open_maze(5, 4);
        let from = Cell::new(2, 1);
        let expected = [
            (Direction::North, Cell::new(2, 3)),
            (Direction::South, Cell::new(2, 0)),
            (Direction::East, Cell::new(4, 1)),
            (Direction::West, Cell::new(0, 1)),
        ];

        for (direction, edge) in expected {
            assert_eq!(
                maze.step(from, direction),
                Err(SlideError::LeftGrid {
                    from,
                    direction,
                    edge
                }),
            );
        }
    }

    #[test]
    fn slide_outside_grid_is_rejected() {
        let maze = open_maze(3, 3);
        let cell = Cell::new(-1, 0);
        assert_eq!(
            maze.step(cell, Direction::East),
            Err(SlideError::OutsideGrid { cell })
        );
    }

    #[test]
    fn resting_guardian_has_no_destination() {
        let maze = open_maze(3, 3);
        let guardian = GuardianSnapshot {
            cell: Cell::new(1, 1),
            facing: Some(Direction::North),
            moving: false,
        };
        assert_eq!(maze.destination(&guardian), Ok(None));
    }
}
