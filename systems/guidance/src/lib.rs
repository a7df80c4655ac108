#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Chooses where the player should stand to cast the next pulls.

use telekinesis_core::{Bounds, Cell, Direction, OverlayCommand};

/// Casting position derived from the remaining slides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Guidance {
    /// Cell on the next slide's indicator line to cast from.
    pub target: Cell,
    /// Cell on the following slide's indicator line, when another slide
    /// remains.
    pub follow_up: Option<Cell>,
    /// Indicates whether the mover already stands on the next slide's side.
    pub valid: bool,
}

/// Picks the casting cell for the next slide, looking one slide ahead.
///
/// The target is the cell on the next slide's indicator line that is
/// closest to where the player will have to walk for the slide after it,
/// so a single walk covers both casts. With one slide left it is simply the
/// closest cell to the mover. Returns `None` when nothing remains or the
/// indicator line is degenerate.
#[must_use]
pub fn select_guidance(bounds: &Bounds, remaining: &[Direction], mover: Cell) -> Option<Guidance> {
    let (&next, rest) = remaining.split_first()?;
    let line = bounds.indicator_line(next);
    let nearest = line.nearest_to(mover)?;
    let valid = bounds.side_of(mover) == Some(line.direction());

    let follow_up = rest
        .first()
        .and_then(|&after| bounds.indicator_line(after).nearest_to(nearest));
    let target = follow_up
        .and_then(|after| line.nearest_to(after))
        .unwrap_or(nearest);

    Some(Guidance {
        target,
        follow_up,
        valid,
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Shown {
    Unknown,
    Cleared,
    Guiding(Guidance),
}

/// Guidance selector that only reports changes to the overlay.
#[derive(Debug)]
pub struct GuidanceSelector {
    shown: Shown,
}

impl Default for GuidanceSelector {
    fn default() -> Self {
        Self {
            shown: Shown::Unknown,
        }
    }
}

impl GuidanceSelector {
    /// Creates a selector that has not emitted anything yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Guidance currently on display, if any.
    #[must_use]
    pub fn current(&self) -> Option<Guidance> {
        match self.shown {
            Shown::Guiding(guidance) => Some(guidance),
            Shown::Unknown | Shown::Cleared => None,
        }
    }

    /// Selects guidance for the remaining slides and emits overlay updates.
    pub fn handle(
        &mut self,
        bounds: &Bounds,
        remaining: &[Direction],
        mover: Cell,
        hint_arrow: bool,
        out: &mut Vec<OverlayCommand>,
    ) {
        let Some(guidance) = select_guidance(bounds, remaining, mover) else {
            self.reset(out);
            return;
        };

        let previous = self.current();
        let moved = previous.map_or(true, |shown| {
            shown.target != guidance.target || shown.follow_up != guidance.follow_up
        });
        if moved {
            log::debug!(
                "guiding {:?} from {} (follow-up {:?})",
                remaining.first(),
                guidance.target,
                guidance.follow_up
            );
            out.push(OverlayCommand::HighlightCell {
                cell: guidance.target,
                follow_up: guidance.follow_up,
                hint_arrow,
            });
        }

        if previous.map_or(true, |shown| shown.valid != guidance.valid) {
            out.push(OverlayCommand::SetPathValidity {
                valid: guidance.valid,
            });
        }

        self.shown = Shown::Guiding(guidance);
    }

    /// Clears the overlay unless it is already known to be clear.
    pub fn reset(&mut self, out: &mut Vec<OverlayCommand>) {
        if self.shown != Shown::Cleared {
            out.push(OverlayCommand::ClearHighlight);
            self.shown = Shown::Cleared;
        }
    }
}
