#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Telekinetic room controller.
//!
//! The room owns every piece of derived state (maze snapshot, solved route,
//! last guidance) and mutates it only from [`TelekineticRoom::handle`], which
//! processes host events in order. Within a tick the maze is rebuilt before
//! the route is recomputed, and the route before guidance is selected.

use telekinesis_core::{
    Cell, Direction, Event, IndicatorSegment, MazeHost, OverlayCommand, RoomConfig,
    TELEKINETIC_FINISH, TELEKINETIC_SPELL, TELEKINETIC_WALL,
};
use telekinesis_system_guidance::GuidanceSelector;
use telekinesis_system_solver::{PathCursor, PathSolver};
use telekinesis_world::Maze;

/// Lifecycle of the room helper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoomPhase {
    /// No maze snapshot is available.
    Unbuilt,
    /// A maze is built but there is no route to follow.
    Built,
    /// A route to the finish is being followed.
    Guiding,
}

/// Telekinetic room helper driven by host events.
#[derive(Debug)]
pub struct TelekineticRoom {
    config: RoomConfig,
    maze: Option<Maze>,
    navigator: Navigator,
    lines: Option<Vec<IndicatorSegment>>,
}

impl Default for TelekineticRoom {
    fn default() -> Self {
        Self::new(RoomConfig::default())
    }
}

impl TelekineticRoom {
    /// Creates a room helper with the provided toggles.
    #[must_use]
    pub fn new(config: RoomConfig) -> Self {
        Self {
            config,
            maze: None,
            navigator: Navigator::default(),
            lines: None,
        }
    }

    /// Maze snapshot currently in use.
    #[must_use]
    pub fn maze(&self) -> Option<&Maze> {
        self.maze.as_ref()
    }

    /// Route currently being followed.
    #[must_use]
    pub fn route(&self) -> Option<&PathCursor> {
        self.navigator.route.as_ref()
    }

    /// Landing cell of the guardian's slide in progress.
    #[must_use]
    pub fn destination(&self) -> Option<Cell> {
        self.navigator.destination
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> RoomPhase {
        match (&self.maze, &self.navigator.route) {
            (None, _) => RoomPhase::Unbuilt,
            (Some(_), None) => RoomPhase::Built,
            (Some(_), Some(_)) => RoomPhase::Guiding,
        }
    }

    /// Processes host events in order and emits overlay updates.
    pub fn handle<H>(&mut self, events: &[Event], host: &H, out: &mut Vec<OverlayCommand>)
    where
        H: MazeHost + ?Sized,
    {
        for event in events {
            match *event {
                Event::GameTick => self.tick(host, out),
                Event::GuardianSpawned => self.navigator.solved_from = None,
                Event::GuardianDespawned => {
                    log::debug!("guardian despawned");
                    self.navigator.forget(out);
                }
                Event::ProjectileLaunched { projectile } => {
                    if projectile != TELEKINETIC_SPELL {
                        continue;
                    }
                    if let Some(maze) = self.maze.as_ref() {
                        self.navigator.spell_cast(maze, host);
                    }
                }
            }
        }
    }

    fn tick<H>(&mut self, host: &H, out: &mut Vec<OverlayCommand>)
    where
        H: MazeHost + ?Sized,
    {
        if !self.config.enabled || !host.in_room() {
            self.leave(out);
            return;
        }

        let walls = host.wall_cells(TELEKINETIC_WALL);
        let stale = self
            .maze
            .as_ref()
            .map_or(true, |maze| maze.wall_count() != walls.len());
        if stale && !self.rebuild(host, &walls, out) {
            return;
        }

        let Some(maze) = self.maze.as_ref() else {
            return;
        };

        if self.config.indicator_lines {
            let segments: Vec<IndicatorSegment> = Direction::SEARCH_ORDER
                .iter()
                .map(|&direction| maze.indicator_line(direction))
                .collect();
            if self.lines.as_ref() != Some(&segments) {
                out.push(OverlayCommand::ShowIndicatorLines {
                    segments: segments.clone(),
                });
                self.lines = Some(segments);
            }
        }

        self.navigator
            .update(maze, host, self.config.hint_arrows, out);
    }

    fn rebuild<H>(&mut self, host: &H, walls: &[Cell], out: &mut Vec<OverlayCommand>) -> bool
    where
        H: MazeHost + ?Sized,
    {
        let Some(grid) = host.collision_grid() else {
            log::debug!("collision flags unavailable; maze not built");
            self.leave(out);
            return false;
        };

        match Maze::build(grid, walls, host.finish_cell(TELEKINETIC_FINISH)) {
            Ok(maze) => {
                // The overlay stays up; the route is re-solved against the new
                // snapshot once the guardian is at rest.
                self.maze = Some(maze);
                self.navigator.solved_from = None;
                true
            }
            Err(error) => {
                log::debug!("telekinetic maze not ready: {error}");
                self.leave(out);
                false
            }
        }
    }

    fn leave(&mut self, out: &mut Vec<OverlayCommand>) {
        self.maze = None;
        self.navigator.forget(out);
        self.hide_lines(out);
    }

    fn hide_lines(&mut self, out: &mut Vec<OverlayCommand>) {
        if self.lines.take().is_some() {
            out.push(OverlayCommand::HideIndicatorLines);
        }
    }
}

/// Route and guidance state for the guardian currently in the maze.
#[derive(Debug, Default)]
struct Navigator {
    solver: PathSolver,
    selector: GuidanceSelector,
    route: Option<PathCursor>,
    solved_from: Option<Cell>,
    destination: Option<Cell>,
}

impl Navigator {
    fn forget(&mut self, out: &mut Vec<OverlayCommand>) {
        self.route = None;
        self.solved_from = None;
        self.selector.reset(out);
        self.set_destination(None, out);
    }

    fn update<H>(&mut self, maze: &Maze, host: &H, hint_arrow: bool, out: &mut Vec<OverlayCommand>)
    where
        H: MazeHost + ?Sized,
    {
        let Some(guardian) = host.guardian() else {
            self.forget(out);
            return;
        };

        let destination = match maze.destination(&guardian) {
            Ok(destination) => destination,
            Err(error) => {
                log::error!("guardian slide is not enclosed by the maze: {error}");
                self.forget(out);
                return;
            }
        };
        self.set_destination(destination, out);

        let start = destination.unwrap_or(guardian.cell);
        if self.solved_from != Some(start) {
            if start == maze.finish() {
                log::debug!("guardian reached the finish at {start}");
                self.route = None;
                self.solved_from = Some(start);
            } else if !host.is_projectile_in_flight(TELEKINETIC_SPELL) {
                self.solve_from(maze, start);
            }
        }

        match (self.route.as_ref(), host.player_cell()) {
            (Some(route), Some(player)) => self.selector.handle(
                &maze.bounds(),
                route.remaining(),
                player,
                hint_arrow,
                out,
            ),
            _ => self.selector.reset(out),
        }
    }

    fn spell_cast<H>(&mut self, maze: &Maze, host: &H)
    where
        H: MazeHost + ?Sized,
    {
        let Some(route) = self.route.as_mut() else {
            return;
        };

        if self.selector.current().is_some_and(|guidance| guidance.valid) {
            let _ = route.advance();
            return;
        }

        let Some(side) = host.player_cell().and_then(|cell| maze.side_of(cell)) else {
            return;
        };
        let Some(guardian) = host.guardian() else {
            return;
        };

        match maze.step(guardian.cell, side) {
            Ok(landing) => {
                log::debug!("pulled {side:?} off route; replanning from {landing}");
                self.solve_from(maze, landing);
            }
            Err(error) => log::error!("guardian slide is not enclosed by the maze: {error}"),
        }
    }

    fn solve_from(&mut self, maze: &Maze, start: Cell) {
        self.solved_from = Some(start);
        self.route = match self.solver.solve(maze, start) {
            Ok(path) if path.is_empty() => {
                log::warn!("finish {} is unreachable from {start}", maze.finish());
                None
            }
            Ok(path) => Some(PathCursor::new(path)),
            Err(error) => {
                log::error!("failed to solve maze from {start}: {error}");
                None
            }
        };
    }

    fn set_destination(&mut self, destination: Option<Cell>, out: &mut Vec<OverlayCommand>) {
        if self.destination == destination {
            return;
        }

        self.destination = destination;
        out.push(match destination {
            Some(cell) => OverlayCommand::MarkDestination { cell },
            None => OverlayCommand::ClearDestination,
        });
    }
}
