#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the telekinetic maze helper.
//!
//! This crate defines the vocabulary that connects the host adapter, the
//! maze grid model, and the pure systems. Adapters expose the game client
//! through the [`MazeHost`] trait and forward discrete [`Event`] values; the
//! room system reads immutable snapshots through that trait and responds
//! exclusively with [`OverlayCommand`] batches for the host to render.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Identifier of a scene object as reported by the host client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(u32);

impl ObjectId {
    /// Creates a new object identifier.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identifier of a non-player character as reported by the host client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NpcId(u32);

impl NpcId {
    /// Creates a new npc identifier.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identifier of a projectile graphic as reported by the host client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Wall objects whose locations outline the maze.
pub const TELEKINETIC_WALL: ObjectId = ObjectId::new(10_755);
/// Ground object marking the maze finish.
pub const TELEKINETIC_FINISH: ObjectId = ObjectId::new(23_672);
/// Projectile emitted while a telekinetic grab is travelling.
pub const TELEKINETIC_SPELL: ProjectileId = ProjectileId::new(143);
/// Guardian statue resting on a cell.
pub const MAZE_GUARDIAN: NpcId = NpcId::new(6_777);
/// Guardian statue sliding between cells.
pub const MAZE_GUARDIAN_MOVING: NpcId = NpcId::new(6_778);

/// Cardinal directions a slide can travel in.
///
/// World coordinates grow toward the east on the X axis and toward the north
/// on the Y axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward increasing Y.
    North,
    /// Movement toward increasing X.
    East,
    /// Movement toward decreasing Y.
    South,
    /// Movement toward decreasing X.
    West,
}

impl Direction {
    /// Order in which neighbours are expanded by the path solver.
    ///
    /// Equal-length paths resolve in favour of the direction listed first.
    pub const SEARCH_ORDER: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Unit offset travelled by a single cell step in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::East => (1, 0),
            Self::South => (0, -1),
            Self::West => (-1, 0),
        }
    }

    /// Direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Direction leading from `from` to `to` along a single axis.
    ///
    /// Returns `None` when the cells coincide or differ on both axes.
    #[must_use]
    pub fn between(from: Cell, to: Cell) -> Option<Self> {
        match (to.x().cmp(&from.x()), to.y().cmp(&from.y())) {
            (Ordering::Greater, Ordering::Equal) => Some(Self::East),
            (Ordering::Less, Ordering::Equal) => Some(Self::West),
            (Ordering::Equal, Ordering::Greater) => Some(Self::North),
            (Ordering::Equal, Ordering::Less) => Some(Self::South),
            _ => None,
        }
    }

    /// Nearest cardinal direction for a host orientation angle.
    ///
    /// Orientations span `0..2048`, starting at south and turning clockwise
    /// through west, north and east. Values outside the range wrap.
    #[must_use]
    pub const fn from_orientation(orientation: u32) -> Self {
        let mut quadrant = (orientation & 2047) >> 9;
        if orientation & 256 != 0 {
            quadrant += 1;
        }

        match quadrant & 3 {
            0 => Self::South,
            1 => Self::West,
            2 => Self::North,
            _ => Self::East,
        }
    }

    /// Host orientation angle of a guardian facing this direction.
    #[must_use]
    pub const fn orientation(self) -> u32 {
        match self {
            Self::South => 0,
            Self::West => 512,
            Self::North => 1024,
            Self::East => 1536,
        }
    }
}

/// Location of a single world cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    x: i32,
    y: i32,
}

impl Cell {
    /// Creates a new world cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// World X coordinate, growing toward the east.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// World Y coordinate, growing toward the north.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Cell adjacent to this one in the provided direction.
    #[must_use]
    pub const fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Computes the Manhattan distance between two cells.
    #[must_use]
    pub fn manhattan_distance(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Movement blocking bits recorded for a single cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollisionFlags(u32);

impl CollisionFlags {
    /// No blocking at all.
    pub const OPEN: Self = Self(0);
    /// Wall along the north edge of the cell.
    pub const BLOCK_NORTH: Self = Self(0x2);
    /// Wall along the east edge of the cell.
    pub const BLOCK_EAST: Self = Self(0x8);
    /// Wall along the south edge of the cell.
    pub const BLOCK_SOUTH: Self = Self(0x20);
    /// Wall along the west edge of the cell.
    pub const BLOCK_WEST: Self = Self(0x80);
    /// Solid object occupying the cell.
    pub const BLOCK_OBJECT: Self = Self(0x100);
    /// Floor decoration occupying the cell; does not stop a slide.
    pub const FLOOR_DECORATION: Self = Self(0x4_0000);
    /// Impassable floor.
    pub const BLOCK_FLOOR: Self = Self(0x20_0000);

    /// Wall bit guarding the edge facing `direction`.
    #[must_use]
    pub const fn wall(direction: Direction) -> Self {
        match direction {
            Direction::North => Self::BLOCK_NORTH,
            Direction::East => Self::BLOCK_EAST,
            Direction::South => Self::BLOCK_SOUTH,
            Direction::West => Self::BLOCK_WEST,
        }
    }

    /// Reports whether every bit of `mask` is set.
    #[must_use]
    pub const fn contains(&self, mask: Self) -> bool {
        self.0 & mask.0 == mask.0
    }

    /// Combines two flag sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

/// Dense snapshot of the host's collision flags.
///
/// Flags are stored in row-major order starting at `origin`, the south-west
/// corner of the covered area.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionGrid {
    origin: Cell,
    width: u32,
    height: u32,
    flags: Vec<CollisionFlags>,
}

impl CollisionGrid {
    /// Creates a grid with every cell open.
    #[must_use]
    pub fn open(origin: Cell, width: u32, height: u32) -> Self {
        let len = usize::try_from(u64::from(width) * u64::from(height)).unwrap_or(0);
        Self {
            origin,
            width,
            height,
            flags: vec![CollisionFlags::OPEN; len],
        }
    }

    /// South-west corner covered by the grid.
    #[must_use]
    pub const fn origin(&self) -> Cell {
        self.origin
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether the cell lies within the grid.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.index(cell).is_some()
    }

    /// Flags recorded for the cell, or `None` when it lies outside the grid.
    #[must_use]
    pub fn get(&self, cell: Cell) -> Option<CollisionFlags> {
        self.index(cell)
            .and_then(|index| self.flags.get(index).copied())
    }

    /// Overwrites the flags of a cell, returning `false` when it lies outside.
    pub fn set(&mut self, cell: Cell, flags: CollisionFlags) -> bool {
        match self.index(cell).and_then(|index| self.flags.get_mut(index)) {
            Some(slot) => {
                *slot = flags;
                true
            }
            None => false,
        }
    }

    /// Adds flags to a cell, returning `false` when it lies outside.
    pub fn insert(&mut self, cell: Cell, flags: CollisionFlags) -> bool {
        match self.get(cell) {
            Some(existing) => self.set(cell, existing.union(flags)),
            None => false,
        }
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        let column = u32::try_from(i64::from(cell.x()) - i64::from(self.origin.x())).ok()?;
        let row = u32::try_from(i64::from(cell.y()) - i64::from(self.origin.y())).ok()?;
        if column >= self.width || row >= self.height {
            return None;
        }

        let width = usize::try_from(self.width).ok()?;
        let row = usize::try_from(row).ok()?;
        let column = usize::try_from(column).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}

/// Axis-aligned box enclosing the maze's wall objects.
///
/// `width` and `height` measure the distance between the outermost wall
/// cells, so [`Bounds::max_x`] and [`Bounds::max_y`] are themselves wall
/// cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
}

impl Bounds {
    /// Creates bounds from an explicit corner and size.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounding box of the provided cells, or `None` when there are none.
    #[must_use]
    pub fn from_cells<I>(cells: I) -> Option<Self>
    where
        I: IntoIterator<Item = Cell>,
    {
        let mut cells = cells.into_iter();
        let first = cells.next()?;
        let (mut min_x, mut min_y) = (first.x(), first.y());
        let (mut max_x, mut max_y) = (first.x(), first.y());

        for cell in cells {
            min_x = min_x.min(cell.x());
            min_y = min_y.min(cell.y());
            max_x = max_x.max(cell.x());
            max_y = max_y.max(cell.y());
        }

        Some(Self::new(
            min_x,
            min_y,
            max_x.abs_diff(min_x),
            max_y.abs_diff(min_y),
        ))
    }

    /// Western edge.
    #[must_use]
    pub const fn min_x(&self) -> i32 {
        self.x
    }

    /// Southern edge.
    #[must_use]
    pub const fn min_y(&self) -> i32 {
        self.y
    }

    /// Eastern edge.
    #[must_use]
    pub const fn max_x(&self) -> i32 {
        self.x.saturating_add_unsigned(self.width)
    }

    /// Northern edge.
    #[must_use]
    pub const fn max_y(&self) -> i32 {
        self.y.saturating_add_unsigned(self.height)
    }

    /// Horizontal extent.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Vertical extent.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Row or column a mover stands on to pull the guardian in `direction`.
    ///
    /// Corners are excluded, so a side spans `width - 1` or `height - 1`
    /// cells.
    #[must_use]
    pub fn indicator_line(&self, direction: Direction) -> IndicatorSegment {
        let across = self.width.saturating_sub(1);
        let along = self.height.saturating_sub(1);
        let (inner_x, inner_y) = (self.min_x() + 1, self.min_y() + 1);
        let (origin, width, height) = match direction {
            Direction::North => (Cell::new(inner_x, self.max_y()), across, 1),
            Direction::South => (Cell::new(inner_x, self.min_y()), across, 1),
            Direction::West => (Cell::new(self.min_x(), inner_y), 1, along),
            Direction::East => (Cell::new(self.max_x(), inner_y), 1, along),
        };
        IndicatorSegment::new(direction, origin, width, height)
    }

    /// Side of the box the cell stands on, if any.
    #[must_use]
    pub fn side_of(&self, cell: Cell) -> Option<Direction> {
        let within_x = cell.x() < self.max_x() && cell.x() > self.min_x();
        let within_y = cell.y() < self.max_y() && cell.y() > self.min_y();

        if cell.y() >= self.max_y() && within_x {
            Some(Direction::North)
        } else if cell.y() <= self.min_y() && within_x {
            Some(Direction::South)
        } else if cell.x() >= self.max_x() && within_y {
            Some(Direction::East)
        } else if cell.x() <= self.min_x() && within_y {
            Some(Direction::West)
        } else {
            None
        }
    }
}

/// One-cell-thick strip along a side of the maze [`Bounds`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndicatorSegment {
    direction: Direction,
    origin: Cell,
    width: u32,
    height: u32,
}

impl IndicatorSegment {
    /// Creates a segment starting at its south-west cell.
    #[must_use]
    pub const fn new(direction: Direction, origin: Cell, width: u32, height: u32) -> Self {
        Self {
            direction,
            origin,
            width,
            height,
        }
    }

    /// Direction the guardian travels when pulled from this segment.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// South-west cell of the segment.
    #[must_use]
    pub const fn origin(&self) -> Cell {
        self.origin
    }

    /// Reports whether the segment covers no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Cells covered by the segment, west to east then south to north.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let origin = self.origin;
        let height = self.height;
        (0..self.width).flat_map(move |dx| {
            (0..height).map(move |dy| {
                Cell::new(
                    origin.x().saturating_add_unsigned(dx),
                    origin.y().saturating_add_unsigned(dy),
                )
            })
        })
    }

    /// Segment cell closest to `cell` by Manhattan distance.
    #[must_use]
    pub fn nearest_to(&self, cell: Cell) -> Option<Cell> {
        self.cells()
            .min_by_key(|candidate| candidate.manhattan_distance(cell))
    }
}

/// State of the guardian statue captured by the host during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GuardianSnapshot {
    /// Cell the guardian currently occupies.
    pub cell: Cell,
    /// Direction the guardian faces, when the host can resolve one.
    pub facing: Option<Direction>,
    /// Indicates whether the guardian is mid-slide.
    pub moving: bool,
}

impl GuardianSnapshot {
    /// Builds a snapshot from the npc the host reports, if it is a guardian.
    #[must_use]
    pub fn from_npc(npc: NpcId, cell: Cell, orientation: u32) -> Option<Self> {
        let moving = if npc == MAZE_GUARDIAN_MOVING {
            true
        } else if npc == MAZE_GUARDIAN {
            false
        } else {
            return None;
        };

        Some(Self {
            cell,
            facing: Some(Direction::from_orientation(orientation)),
            moving,
        })
    }
}

/// Read-only access to the host client, valid for the duration of one tick.
pub trait MazeHost {
    /// Reports whether the player is logged in and inside the telekinetic room.
    fn in_room(&self) -> bool;

    /// Collision flags for the plane the player stands on.
    fn collision_grid(&self) -> Option<&CollisionGrid>;

    /// Locations of every wall object with the provided identifier.
    fn wall_cells(&self, object: ObjectId) -> Vec<Cell>;

    /// Location of the first ground object with the provided identifier.
    fn finish_cell(&self, object: ObjectId) -> Option<Cell>;

    /// Current guardian state, if one is loaded.
    fn guardian(&self) -> Option<GuardianSnapshot>;

    /// Cell occupied by the local player.
    fn player_cell(&self) -> Option<Cell>;

    /// Reports whether a projectile with the identifier is currently travelling.
    fn is_projectile_in_flight(&self, projectile: ProjectileId) -> bool;
}

/// Discrete notifications forwarded by the host adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// The host advanced one game tick.
    GameTick,
    /// A guardian statue appeared.
    GuardianSpawned,
    /// The tracked guardian statue disappeared.
    GuardianDespawned,
    /// A projectile left the caster.
    ProjectileLaunched {
        /// Graphic identifier of the projectile.
        projectile: ProjectileId,
    },
}

/// Instructions for the host's overlay layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OverlayCommand {
    /// Highlights the cell the player should cast from next.
    HighlightCell {
        /// Cell to stand on for the next pull.
        cell: Cell,
        /// Cell to stand on for the pull after that, when one is planned.
        follow_up: Option<Cell>,
        /// Indicates whether the host should also point a hint arrow at `cell`.
        hint_arrow: bool,
    },
    /// Removes the highlight and any hint arrow.
    ClearHighlight,
    /// Reports whether the player already stands on the expected side.
    SetPathValidity {
        /// `true` when the next cast would pull the guardian the right way.
        valid: bool,
    },
    /// Marks the cell a sliding guardian will come to rest on.
    MarkDestination {
        /// Landing cell of the slide in progress.
        cell: Cell,
    },
    /// Removes the destination marker.
    ClearDestination,
    /// Outlines the cells the player may cast from.
    ShowIndicatorLines {
        /// One segment per side of the maze.
        segments: Vec<IndicatorSegment>,
    },
    /// Removes the indicator line outline.
    HideIndicatorLines,
}

/// Toggles for the telekinetic room helper.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// Enables the helper entirely.
    pub enabled: bool,
    /// Requests hint arrows alongside the highlighted cell.
    pub hint_arrows: bool,
    /// Outlines the cells the player may cast from.
    pub indicator_lines: bool,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            hint_arrows: true,
            indicator_lines: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Bounds, Cell, CollisionFlags, CollisionGrid, Direction, GuardianSnapshot, NpcId,
        RoomConfig, MAZE_GUARDIAN, MAZE_GUARDIAN_MOVING,
    };
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = Cell::new(-1, 1);
        let destination = Cell::new(3, -2);
        assert_eq!(origin.manhattan_distance(destination), 7);
        assert_eq!(destination.manhattan_distance(origin), 7);
    }

    #[test]
    fn offsets_follow_world_axes() {
        let cell = Cell::new(4, 4);
        assert_eq!(cell.offset(Direction::North), Cell::new(4, 5));
        assert_eq!(cell.offset(Direction::South), Cell::new(4, 3));
        assert_eq!(cell.offset(Direction::East), Cell::new(5, 4));
        assert_eq!(cell.offset(Direction::West), Cell::new(3, 4));
    }

    #[test]
    fn between_agrees_with_offsets() {
        let origin = Cell::new(10, 10);
        for direction in Direction::SEARCH_ORDER {
            let far = Cell::new(
                origin.x() + direction.delta().0 * 3,
                origin.y() + direction.delta().1 * 3,
            );
            assert_eq!(Direction::between(origin, far), Some(direction));
            assert_eq!(Direction::between(far, origin), Some(direction.opposite()));
        }
        assert_eq!(Direction::between(origin, origin), None);
        assert_eq!(Direction::between(origin, Cell::new(11, 11)), None);
    }

    #[test]
    fn orientation_rounds_to_nearest_direction() {
        assert_eq!(Direction::from_orientation(0), Direction::South);
        assert_eq!(Direction::from_orientation(200), Direction::South);
        assert_eq!(Direction::from_orientation(300), Direction::West);
        assert_eq!(Direction::from_orientation(512), Direction::West);
        assert_eq!(Direction::from_orientation(1024), Direction::North);
        assert_eq!(Direction::from_orientation(1536), Direction::East);
        assert_eq!(Direction::from_orientation(1900), Direction::South);
        assert_eq!(Direction::from_orientation(2048 + 1024), Direction::North);
    }

    #[test]
    fn orientation_round_trips_through_directions() {
        for direction in Direction::SEARCH_ORDER {
            assert_eq!(Direction::from_orientation(direction.orientation()), direction);
        }
    }

    #[test]
    fn guardian_npcs_map_to_snapshots() {
        let cell = Cell::new(5, 7);

        let resting = GuardianSnapshot::from_npc(MAZE_GUARDIAN, cell, 1024).expect("guardian");
        assert_eq!(resting.cell, cell);
        assert_eq!(resting.facing, Some(Direction::North));
        assert!(!resting.moving);

        let sliding =
            GuardianSnapshot::from_npc(MAZE_GUARDIAN_MOVING, cell, 1536).expect("guardian");
        assert_eq!(sliding.facing, Some(Direction::East));
        assert!(sliding.moving);

        assert_eq!(GuardianSnapshot::from_npc(NpcId::new(1), cell, 0), None);
    }

    #[test]
    fn collision_grid_rejects_cells_outside() {
        let mut grid = CollisionGrid::open(Cell::new(100, 200), 3, 2);
        assert!(grid.contains(Cell::new(102, 201)));
        assert!(!grid.contains(Cell::new(103, 201)));
        assert!(!grid.contains(Cell::new(99, 200)));
        assert_eq!(grid.get(Cell::new(100, 202)), None);
        assert!(!grid.set(Cell::new(100, 202), CollisionFlags::BLOCK_OBJECT));

        assert!(grid.insert(Cell::new(101, 201), CollisionFlags::BLOCK_NORTH));
        assert!(grid.insert(Cell::new(101, 201), CollisionFlags::BLOCK_EAST));
        let flags = grid.get(Cell::new(101, 201)).expect("inside");
        assert!(flags.contains(CollisionFlags::BLOCK_NORTH));
        assert!(flags.contains(CollisionFlags::BLOCK_EAST));
        assert!(!flags.contains(CollisionFlags::BLOCK_SOUTH));
    }

    #[test]
    fn bounds_cover_every_cell() {
        let bounds = Bounds::from_cells([Cell::new(3, 9), Cell::new(-2, 4), Cell::new(7, 5)])
            .expect("non-empty");
        assert_eq!(bounds, Bounds::new(-2, 4, 9, 5));
        assert_eq!(bounds.min_x(), -2);
        assert_eq!(bounds.min_y(), 4);
        assert_eq!(bounds.max_x(), 7);
        assert_eq!(bounds.max_y(), 9);
        assert_eq!(Bounds::from_cells(Vec::new()), None);
    }

    #[test]
    fn indicator_lines_skip_corners() {
        let bounds = Bounds::new(0, 0, 4, 3);

        let north: Vec<_> = bounds.indicator_line(Direction::North).cells().collect();
        assert_eq!(north, vec![Cell::new(1, 3), Cell::new(2, 3), Cell::new(3, 3)]);

        let east: Vec<_> = bounds.indicator_line(Direction::East).cells().collect();
        assert_eq!(east, vec![Cell::new(4, 1), Cell::new(4, 2)]);

        for direction in Direction::SEARCH_ORDER {
            assert_eq!(bounds.indicator_line(direction).direction(), direction);
        }

        let degenerate = Bounds::new(0, 0, 0, 3);
        assert!(degenerate.indicator_line(Direction::South).is_empty());
        assert_eq!(
            degenerate.indicator_line(Direction::South).nearest_to(Cell::new(0, 0)),
            None
        );
    }

    #[test]
    fn side_of_matches_indicator_lines() {
        let bounds = Bounds::new(0, 0, 6, 6);
        for direction in Direction::SEARCH_ORDER {
            for cell in bounds.indicator_line(direction).cells() {
                assert_eq!(bounds.side_of(cell), Some(direction), "cell {cell}");
            }
        }
        assert_eq!(bounds.side_of(Cell::new(0, 0)), None);
        assert_eq!(bounds.side_of(Cell::new(3, 3)), None);
        assert_eq!(bounds.side_of(Cell::new(3, 8)), Some(Direction::North));
    }

    #[test]
    fn nearest_picks_closest_cell() {
        let segment = Bounds::new(0, 0, 4, 4).indicator_line(Direction::North);
        assert_eq!(segment.nearest_to(Cell::new(2, 10)), Some(Cell::new(2, 4)));
        assert_eq!(segment.nearest_to(Cell::new(-5, 4)), Some(Cell::new(1, 4)));
    }

    #[test]
    fn config_defaults_enable_helper() {
        let config = RoomConfig::default();
        assert!(config.enabled);
        assert!(config.hint_arrows);
        assert!(!config.indicator_lines);
    }

    #[test]
    fn cell_round_trips_through_bincode() {
        assert_round_trip(&Cell::new(3_104, -9));
    }

    #[test]
    fn direction_round_trips_through_bincode() {
        assert_round_trip(&Direction::West);
    }
}
