//! Scripted host that plays the telekinetic room by following the overlay.
//!
//! The scripted player walks straight onto the highlighted cell, casts as
//! soon as it stands on the side the next slide needs, and the guardian
//! lands one tick after every cast.

use anyhow::{Context, Result};
use telekinesis_core::{
    Cell, CollisionGrid, Direction, Event, GuardianSnapshot, MazeHost, NpcId, ObjectId,
    OverlayCommand, ProjectileId, RoomConfig, MAZE_GUARDIAN, MAZE_GUARDIAN_MOVING,
    TELEKINETIC_FINISH, TELEKINETIC_SPELL, TELEKINETIC_WALL,
};
use telekinesis_system_room::{RoomPhase, TelekineticRoom};
use telekinesis_system_solver::PathCursor;
use telekinesis_world::{Layout, Maze};

/// How a simulation ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// The guardian came to rest on the finish.
    Finished {
        /// Ticks processed, including the landing tick.
        ticks: u32,
        /// Telekinetic spells cast.
        casts: u32,
    },
    /// The room stopped guiding before the finish was reached.
    Stalled {
        /// Ticks processed.
        ticks: u32,
    },
    /// The tick limit was reached first.
    OutOfTicks,
}

/// Guardian npc as the host reports it: id, location and orientation angle.
struct ScriptedGuardian {
    npc: NpcId,
    cell: Cell,
    orientation: u32,
}

struct ScriptedHost {
    layout: Layout,
    guardian: ScriptedGuardian,
    player: Cell,
    in_flight: bool,
}

impl MazeHost for ScriptedHost {
    fn in_room(&self) -> bool {
        true
    }

    fn collision_grid(&self) -> Option<&CollisionGrid> {
        Some(self.layout.grid())
    }

    fn wall_cells(&self, object: ObjectId) -> Vec<Cell> {
        if object == TELEKINETIC_WALL {
            self.layout.walls().to_vec()
        } else {
            Vec::new()
        }
    }

    fn finish_cell(&self, object: ObjectId) -> Option<Cell> {
        if object == TELEKINETIC_FINISH {
            self.layout.finish()
        } else {
            None
        }
    }

    fn guardian(&self) -> Option<GuardianSnapshot> {
        let guardian = &self.guardian;
        GuardianSnapshot::from_npc(guardian.npc, guardian.cell, guardian.orientation)
    }

    fn player_cell(&self) -> Option<Cell> {
        Some(self.player)
    }

    fn is_projectile_in_flight(&self, projectile: ProjectileId) -> bool {
        projectile == TELEKINETIC_SPELL && self.in_flight
    }
}

/// Room helper wired to a scripted host.
pub(crate) struct Simulation {
    host: ScriptedHost,
    maze: Maze,
    room: TelekineticRoom,
    target: Option<Cell>,
    casts: u32,
}

impl Simulation {
    /// Prepares a simulation for the layout.
    ///
    /// The player starts on the `P` tile, or on the first cell of the southern
    /// indicator line when the layout has none.
    pub(crate) fn new(layout: Layout, config: RoomConfig) -> Result<Self> {
        let maze = layout.maze().context("layout does not describe a maze")?;
        let start = layout
            .guardian()
            .context("layout has no guardian marker `G`")?;
        let player = layout
            .player()
            .unwrap_or_else(|| maze.indicator_line(Direction::South).origin());

        Ok(Self {
            host: ScriptedHost {
                layout,
                guardian: ScriptedGuardian {
                    npc: MAZE_GUARDIAN,
                    cell: start,
                    orientation: Direction::South.orientation(),
                },
                player,
                in_flight: false,
            },
            maze,
            room: TelekineticRoom::new(config),
            target: None,
            casts: 0,
        })
    }

    /// Runs ticks until the guardian rests on the finish, the room stops
    /// guiding, or `max_ticks` is reached. `on_tick` sees every tick's output.
    pub(crate) fn run<F>(&mut self, max_ticks: u32, mut on_tick: F) -> Result<Outcome>
    where
        F: FnMut(u32, &[OverlayCommand]),
    {
        for tick in 1..=max_ticks {
            let events = self.script()?;
            let mut out = Vec::new();
            self.room.handle(&events, &self.host, &mut out);
            self.observe(&out);
            on_tick(tick, &out);

            let guardian = &self.host.guardian;
            if guardian.npc == MAZE_GUARDIAN && guardian.cell == self.maze.finish() {
                return Ok(Outcome::Finished {
                    ticks: tick,
                    casts: self.casts,
                });
            }
            if !self.host.in_flight && self.room.phase() != RoomPhase::Guiding {
                return Ok(Outcome::Stalled { ticks: tick });
            }
        }

        Ok(Outcome::OutOfTicks)
    }

    /// Rendered layout with the guardian and player at their current cells.
    pub(crate) fn render(&self) -> String {
        self.host
            .layout
            .render(&[(self.host.guardian.cell, 'G'), (self.host.player, 'P')])
    }

    fn script(&mut self) -> Result<Vec<Event>> {
        if self.host.in_flight {
            let snapshot = self
                .host
                .guardian()
                .context("scripted guardian is not a maze guardian")?;
            let landing = self.maze.destination(&snapshot)?.unwrap_or(snapshot.cell);
            self.host.guardian.cell = landing;
            self.host.guardian.npc = MAZE_GUARDIAN;
            self.host.in_flight = false;
            return Ok(vec![Event::GameTick]);
        }

        let next = self.room.route().and_then(PathCursor::next_direction);
        let side = self.maze.side_of(self.host.player);
        if let Some(direction) = next.filter(|&next| side == Some(next)) {
            self.host.guardian.npc = MAZE_GUARDIAN_MOVING;
            self.host.guardian.orientation = direction.orientation();
            self.host.in_flight = true;
            self.casts += 1;
            return Ok(vec![
                Event::ProjectileLaunched {
                    projectile: TELEKINETIC_SPELL,
                },
                Event::GameTick,
            ]);
        }

        if let Some(target) = self.target {
            self.host.player = target;
        }
        Ok(vec![Event::GameTick])
    }

    fn observe(&mut self, out: &[OverlayCommand]) {
        for command in out {
            match command {
                OverlayCommand::HighlightCell { cell, .. } => self.target = Some(*cell),
                OverlayCommand::ClearHighlight => self.target = None,
                _ => {}
            }
        }
    }
}
