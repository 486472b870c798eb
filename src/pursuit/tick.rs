//! Chase game transitions
//!
//! Two independent entry points mutate the state: `move_player` on each
//! directional input, `advance_pursuers` on each pursuit tick. Either can end
//! the run; neither does anything once it has ended.

use glam::IVec2;

use super::grid::MazeGrid;
use super::state::{Direction, GamePhase, PursuitLayout, PursuitState};
use crate::settings::{PursuitTuning, StepPolicy};

/// Result of a player move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Run is over, input dropped
    Ignored,
    /// Destination is a wall or outside the maze
    Blocked,
    Moved,
    Collected { reward: u32 },
    /// Stepped onto a pursuer; the run is over
    Caught,
}

/// Result of a pursuit tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PursuitOutcome {
    /// Run is over, tick dropped
    Skipped,
    /// Number of pursuers that changed cell
    Advanced { moved: usize },
    /// A pursuer reached the player; the run is over
    Caught,
}

/// Move the player one cell
pub fn move_player(state: &mut PursuitState, direction: Direction, tuning: &PursuitTuning) -> MoveOutcome {
    if state.is_terminal() {
        return MoveOutcome::Ignored;
    }

    let target = state.player.pos + direction.offset();
    if !state.grid.is_passable(target) {
        log::trace!("Player move {direction:?} blocked at ({}, {})", target.x, target.y);
        return MoveOutcome::Blocked;
    }

    state.player.pos = target;

    // Defeat short-circuits collection
    if state.player_caught() {
        end_run(state);
        return MoveOutcome::Caught;
    }

    if state.grid.collect(target) {
        state.score += tuning.reward;
        log::debug!(
            "Collected at ({}, {}), score {} ({} left)",
            target.x,
            target.y,
            state.score,
            state.grid.collectibles_left()
        );
        return MoveOutcome::Collected {
            reward: tuning.reward,
        };
    }

    MoveOutcome::Moved
}

/// Advance every pursuer one greedy step toward the player
pub fn advance_pursuers(state: &mut PursuitState, tuning: &PursuitTuning) -> PursuitOutcome {
    if state.is_terminal() {
        return PursuitOutcome::Skipped;
    }

    let player = state.player.pos;
    let mut moved = 0;
    for pursuer in &mut state.pursuers {
        let candidate = greedy_step(pursuer.pos, player, tuning.step_policy);
        if candidate != pursuer.pos && state.grid.is_passable(candidate) {
            pursuer.pos = candidate;
            moved += 1;
        } else if candidate != pursuer.pos {
            log::trace!("Pursuer {} blocked at ({}, {})", pursuer.id, pursuer.pos.x, pursuer.pos.y);
        }
    }

    if state.player_caught() {
        end_run(state);
        return PursuitOutcome::Caught;
    }

    PursuitOutcome::Advanced { moved }
}

/// The cell a pursuer at `from` wants to enter to close on `target`
///
/// With `AxisPriority` the column gap is closed before the row gap, one axis
/// per tick. There is no fallback axis: a blocked pursuer waits.
pub fn greedy_step(from: IVec2, target: IVec2, policy: StepPolicy) -> IVec2 {
    let toward = (target - from).signum();
    match policy {
        StepPolicy::AxisPriority if toward.x != 0 => from + IVec2::new(toward.x, 0),
        StepPolicy::AxisPriority => from + IVec2::new(0, toward.y),
        StepPolicy::Diagonal => from + toward,
    }
}

/// Rebuild the initial state from `layout`
pub fn reset(state: &mut PursuitState, layout: &PursuitLayout) {
    *state = PursuitState::new(layout);
}

fn end_run(state: &mut PursuitState) {
    state.phase = GamePhase::Over;
    log::info!(
        "Caught at ({}, {}) - game over, final score {}",
        state.player.pos.x,
        state.player.pos.y,
        state.score
    );
}

/// Cells a pursuer would visit chasing a stationary player, until it stops moving
///
/// Useful for previews and for checking that a layout lets pursuers reach the player.
pub fn pursuit_path(grid: &MazeGrid, from: IVec2, target: IVec2, policy: StepPolicy) -> Vec<IVec2> {
    let mut path = Vec::new();
    let mut pos = from;
    // Each step strictly shrinks the Manhattan distance, so this terminates
    loop {
        let next = greedy_step(pos, target, policy);
        if next == pos || !grid.is_passable(next) {
            break;
        }
        pos = next;
        path.push(pos);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pursuit::grid::GridCell;
    use crate::pursuit::state::Token;
    use proptest::prelude::*;

    fn open_box() -> MazeGrid {
        MazeGrid::parse(
            "\
#########
#.......#
#.......#
#.......#
#.......#
#.......#
#.......#
#########",
        )
        .unwrap()
    }

    fn state_on(grid: MazeGrid, player: (i32, i32), pursuers: &[(i32, i32)]) -> PursuitState {
        let layout = PursuitLayout::new(
            grid,
            IVec2::new(player.0, player.1),
            pursuers.iter().map(|&(x, y)| IVec2::new(x, y)).collect(),
        )
        .unwrap();
        PursuitState::new(&layout)
    }

    #[test]
    fn test_move_into_wall_is_noop() {
        let tuning = PursuitTuning::default();
        let mut state = state_on(open_box(), (1, 1), &[(7, 6)]);
        let before = state.clone();

        assert_eq!(move_player(&mut state, Direction::Up, &tuning), MoveOutcome::Blocked);
        assert_eq!(move_player(&mut state, Direction::Left, &tuning), MoveOutcome::Blocked);
        assert_eq!(state, before);
    }

    #[test]
    fn test_collect_once() {
        let tuning = PursuitTuning::default();
        let mut state = state_on(open_box(), (1, 1), &[(7, 6)]);

        assert_eq!(
            move_player(&mut state, Direction::Right, &tuning),
            MoveOutcome::Collected { reward: 10 }
        );
        assert_eq!(state.score, 10);
        assert_eq!(state.grid.get(IVec2::new(2, 1)), Some(GridCell::Open));

        move_player(&mut state, Direction::Left, &tuning);
        let score = state.score;
        assert_eq!(move_player(&mut state, Direction::Right, &tuning), MoveOutcome::Moved);
        assert_eq!(state.score, score);
    }

    #[test]
    fn test_move_onto_pursuer_ends_run_without_collecting() {
        let tuning = PursuitTuning::default();
        let mut state = state_on(open_box(), (1, 1), &[(2, 1)]);

        assert_eq!(move_player(&mut state, Direction::Right, &tuning), MoveOutcome::Caught);
        assert!(state.is_terminal());
        assert_eq!(state.score, 0);
        assert_eq!(state.grid.get(IVec2::new(2, 1)), Some(GridCell::Collectible));
    }

    #[test]
    fn test_axis_priority_closes_column_first() {
        assert_eq!(
            greedy_step(IVec2::new(1, 1), IVec2::new(4, 5), StepPolicy::AxisPriority),
            IVec2::new(2, 1)
        );
        assert_eq!(
            greedy_step(IVec2::new(4, 1), IVec2::new(4, 5), StepPolicy::AxisPriority),
            IVec2::new(4, 2)
        );
        assert_eq!(
            greedy_step(IVec2::new(4, 5), IVec2::new(4, 5), StepPolicy::AxisPriority),
            IVec2::new(4, 5)
        );
        assert_eq!(
            greedy_step(IVec2::new(1, 1), IVec2::new(4, 5), StepPolicy::Diagonal),
            IVec2::new(2, 2)
        );
    }

    #[test]
    fn test_pursuer_closes_row_gap_each_tick() {
        let tuning = PursuitTuning::default();
        let mut state = state_on(open_box(), (1, 5), &[(1, 1)]);

        let mut last = (state.pursuers[0].pos.y - state.player.pos.y).abs();
        while !state.is_terminal() {
            advance_pursuers(&mut state, &tuning);
            let gap = (state.pursuers[0].pos.y - state.player.pos.y).abs();
            assert!(gap < last);
            last = gap;
        }
        assert_eq!(state.pursuers[0].pos, IVec2::new(1, 5));
    }

    #[test]
    fn test_blocked_pursuer_waits_without_fallback() {
        // Wall directly right of the pursuer; the row gap is never tried
        let grid = MazeGrid::parse(
            "\
#######
#.#...#
#.....#
#######",
        )
        .unwrap();
        let tuning = PursuitTuning::default();
        let mut state = state_on(grid, (4, 2), &[(1, 1)]);

        assert_eq!(
            advance_pursuers(&mut state, &tuning),
            PursuitOutcome::Advanced { moved: 0 }
        );
        assert_eq!(state.pursuers[0].pos, IVec2::new(1, 1));
    }

    #[test]
    fn test_pursuers_may_share_cells() {
        let grid = MazeGrid::parse(
            "\
#####
#...#
#...#
##..#
#...#
#####",
        )
        .unwrap();
        let tuning = PursuitTuning::default();
        let mut state = state_on(grid, (1, 4), &[(1, 1), (1, 2)]);

        // The second pursuer is walled in; the first steps onto its cell
        assert_eq!(
            advance_pursuers(&mut state, &tuning),
            PursuitOutcome::Advanced { moved: 1 }
        );
        assert_eq!(state.pursuers[0].pos, IVec2::new(1, 2));
        assert_eq!(state.pursuers[1].pos, IVec2::new(1, 2));
    }

    #[test]
    fn test_pursuer_catch_ends_run() {
        let tuning = PursuitTuning::default();
        let mut state = state_on(open_box(), (3, 1), &[(1, 1)]);

        assert_eq!(
            advance_pursuers(&mut state, &tuning),
            PursuitOutcome::Advanced { moved: 1 }
        );
        assert_eq!(advance_pursuers(&mut state, &tuning), PursuitOutcome::Caught);
        assert!(state.is_terminal());
    }

    #[test]
    fn test_reference_layout_diagonal_policy() {
        let tuning = PursuitTuning {
            step_policy: StepPolicy::Diagonal,
            ..PursuitTuning::default()
        };
        let layout = PursuitLayout::reference();
        let mut state = PursuitState::new(&layout);
        // Player to (8, 5): pursuer 1 at (9, 5) steps left onto it
        assert_eq!(move_player(&mut state, Direction::Up, &tuning), MoveOutcome::Collected { reward: 10 });
        assert_eq!(advance_pursuers(&mut state, &tuning), PursuitOutcome::Caught);
    }

    #[test]
    fn test_reset_restores_layout() {
        let tuning = PursuitTuning::default();
        let layout = PursuitLayout::reference();
        let mut state = PursuitState::new(&layout);
        move_player(&mut state, Direction::Up, &tuning);
        advance_pursuers(&mut state, &tuning);

        reset(&mut state, &layout);
        let once = state.clone();
        reset(&mut state, &layout);
        assert_eq!(state, once);
        assert_eq!(state, PursuitState::new(&layout));
    }

    #[test]
    fn test_pursuit_path_stops_at_wall() {
        let grid = MazeGrid::reference();
        // From the pen toward the bottom-left: (9,7) -> left (8,7), (7,7), (6,7), then wall at (5,7)
        let path = pursuit_path(&grid, IVec2::new(9, 7), IVec2::new(1, 11), StepPolicy::AxisPriority);
        assert_eq!(path, vec![IVec2::new(8, 7), IVec2::new(7, 7), IVec2::new(6, 7)]);
    }

    proptest! {
        #[test]
        fn prop_terminal_state_is_frozen(
            moves in proptest::collection::vec(0u8..5, 1..40),
        ) {
            let tuning = PursuitTuning::default();
            let mut state = PursuitState::new(&PursuitLayout::reference());
            state.phase = GamePhase::Over;
            let frozen = state.clone();

            for m in moves {
                match m {
                    0 => { move_player(&mut state, Direction::Up, &tuning); }
                    1 => { move_player(&mut state, Direction::Down, &tuning); }
                    2 => { move_player(&mut state, Direction::Left, &tuning); }
                    3 => { move_player(&mut state, Direction::Right, &tuning); }
                    _ => { advance_pursuers(&mut state, &tuning); }
                }
            }
            prop_assert_eq!(state, frozen);
        }

        #[test]
        fn prop_tokens_stay_on_passable_cells(
            moves in proptest::collection::vec(0u8..5, 1..80),
        ) {
            let tuning = PursuitTuning::default();
            let mut state = PursuitState::new(&PursuitLayout::reference());
            let mut last_score = 0;

            for m in moves {
                match m {
                    0 => { move_player(&mut state, Direction::Up, &tuning); }
                    1 => { move_player(&mut state, Direction::Down, &tuning); }
                    2 => { move_player(&mut state, Direction::Left, &tuning); }
                    3 => { move_player(&mut state, Direction::Right, &tuning); }
                    _ => { advance_pursuers(&mut state, &tuning); }
                }
                prop_assert!(state.grid.is_passable(state.player.pos));
                for p in &state.pursuers {
                    prop_assert!(state.grid.is_passable(p.pos));
                }
                prop_assert!(state.score >= last_score);
                prop_assert_eq!(state.score % 10, 0);
                last_score = state.score;
            }
        }
    }

    #[test]
    fn test_token_helper() {
        assert_eq!(Token::new(4, 2, 3).pos, IVec2::new(2, 3));
    }
}
