//! Stateful wrapper owning one run of the chase game

use super::state::{Direction, PursuitLayout, PursuitState};
use super::tick::{MoveOutcome, PursuitOutcome, advance_pursuers, move_player, reset};
use crate::settings::PursuitTuning;

#[derive(Debug, Clone)]
pub struct PursuitEngine {
    layout: PursuitLayout,
    tuning: PursuitTuning,
    state: PursuitState,
}

impl PursuitEngine {
    pub fn new(layout: PursuitLayout, tuning: PursuitTuning) -> Self {
        let state = PursuitState::new(&layout);
        Self {
            layout,
            tuning,
            state,
        }
    }

    /// Read-only snapshot for the renderer
    pub fn state(&self) -> &PursuitState {
        &self.state
    }

    pub fn layout(&self) -> &PursuitLayout {
        &self.layout
    }

    pub fn tuning(&self) -> &PursuitTuning {
        &self.tuning
    }

    pub fn move_player(&mut self, direction: Direction) -> MoveOutcome {
        move_player(&mut self.state, direction, &self.tuning)
    }

    pub fn advance(&mut self) -> PursuitOutcome {
        advance_pursuers(&mut self.state, &self.tuning)
    }

    pub fn reset(&mut self) {
        reset(&mut self.state, &self.layout);
        log::info!(
            "Pursuit engine reset ({} pursuers, {} collectibles)",
            self.state.pursuers.len(),
            self.state.grid.collectibles_left()
        );
    }
}

impl Default for PursuitEngine {
    fn default() -> Self {
        Self::new(PursuitLayout::reference(), PursuitTuning::default())
    }
}
