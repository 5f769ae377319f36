use core::num::Saturating;
use serde::{Deserialize, Serialize};

use crate::*;

/// A loaded game: the grid plus the running move counter.
///
/// Loading performs the implicit initial move (full propagation and solved
/// evaluation) with the counter at zero; every in-bounds rotation afterwards
/// counts as one move. Solved-ness is a query over tile power, not a
/// separate state: a finished grid keeps accepting rotations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    grid: Grid,
    moves: Saturating<MoveCount>,
}

impl PlayEngine {
    pub fn load(level: &Level) -> Result<Self> {
        let mut grid = Grid::from_level(level)?;
        let powered = propagate(&mut grid);

        let (width, height) = grid.size();
        log::debug!(
            "Loaded {}x{} level, power reaches {} of {} tiles",
            width,
            height,
            powered,
            grid.total_tiles()
        );

        Ok(Self {
            grid,
            moves: Saturating(0),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn moves(&self) -> MoveCount {
        self.moves.0
    }

    pub fn tile_at(&self, coords: Coord2) -> Option<&Tile> {
        self.grid.tile(coords)
    }

    pub fn powered_count(&self) -> CellCount {
        self.grid.powered_count()
    }

    pub fn is_solved(&self) -> bool {
        self.grid.is_fully_powered()
    }

    /// Spins the tile at `coords`, then recomputes power over the whole grid
    /// and re-evaluates the solved predicate.
    ///
    /// Rotating outside the grid changes nothing and does not count as a
    /// move. `Solved` is returned on every move that leaves the grid fully
    /// powered, so an already-solved grid reports it again harmlessly.
    pub fn rotate(&mut self, coords: Coord2, spin: Spin) -> MoveOutcome {
        let Some(tile) = self.grid.tile_mut(coords) else {
            return MoveOutcome::NoChange;
        };

        match spin {
            Spin::Left => tile.rotate_left(),
            Spin::Right => tile.rotate_right(),
        }
        self.moves += 1;
        log::trace!("Rotated tile at {:?} ({:?}), move {}", coords, spin, self.moves.0);

        propagate(&mut self.grid);

        if self.grid.is_fully_powered() {
            MoveOutcome::Solved
        } else {
            MoveOutcome::Rotated
        }
    }
}

/// Owner of the current game, if any: the level lifecycle around
/// [`PlayEngine`].
///
/// An empty session is the unloaded state; `load` replaces the grid
/// wholesale and `reset` discards it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    engine: Option<PlayEngine>,
}

impl GameSession {
    pub const fn new() -> Self {
        Self { engine: None }
    }

    pub const fn is_loaded(&self) -> bool {
        self.engine.is_some()
    }

    pub fn engine(&self) -> Option<&PlayEngine> {
        self.engine.as_ref()
    }

    /// Starts a fresh game from `level`. A failed load reports the violated
    /// rule and leaves any current game untouched.
    pub fn load(&mut self, level: &Level) -> Result<()> {
        self.engine = Some(PlayEngine::load(level)?);
        Ok(())
    }

    pub fn rotate(&mut self, coords: Coord2, spin: Spin) -> MoveOutcome {
        match &mut self.engine {
            Some(engine) => engine.rotate(coords, spin),
            None => MoveOutcome::NoChange,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.engine.as_ref().is_some_and(PlayEngine::is_solved)
    }

    /// Back to the unloaded state.
    pub fn reset(&mut self) {
        if self.engine.take().is_some() {
            log::debug!("Game discarded");
        }
    }
}
