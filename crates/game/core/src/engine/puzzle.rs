//! Grid puzzle simulator.

use tracing::{debug, info, warn};

use crate::action::Action;
use crate::env::{LevelData, LevelIndex};
use crate::geometry::Position;
use crate::state::PuzzleState;

/// Which win conditions held when a puzzle run ended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WinConditionsMet {
    pub reach_goal: bool,
    pub collect_all_coins: bool,
}

/// Outcome of a full puzzle run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PuzzleResult {
    pub success: bool,
    pub final_state: PuzzleState,
    pub turn_states: Vec<PuzzleState>,
    pub win_conditions_met: WinConditionsMet,
    pub error: Option<String>,
}

/// Runs move/wait programs on a grid level.
#[derive(Clone, Debug)]
pub struct PuzzleSimulator {
    level: LevelData,
    index: LevelIndex,
}

impl PuzzleSimulator {
    pub fn new(level: LevelData) -> Self {
        let index = LevelIndex::build(&level);
        Self { level, index }
    }

    pub fn level(&self) -> &LevelData {
        &self.level
    }

    /// Hero on the start cell at turn 0. A coin on the start cell is
    /// collected immediately.
    pub fn create_initial_state(&self) -> PuzzleState {
        let mut state = PuzzleState::new(self.level.start_position);
        self.collect_coin(&mut state);
        state
    }

    /// In bounds and not a wall.
    pub fn is_valid_position(&self, position: Position) -> bool {
        self.level.contains(position) && !self.index.walls.contains(&position)
    }

    /// True when a hazard on `position` is active at `turn`.
    pub fn hazard_at(&self, position: Position, turn: u64) -> bool {
        self.level
            .hazards
            .iter()
            .any(|hazard| hazard.position() == position && hazard.is_active(turn))
    }

    /// Executes one action.
    ///
    /// Every action, accepted or not, is recorded and advances the turn. A
    /// blocked move leaves the hero in place. Actions other than `move` and
    /// `wait` act as `wait`. After moving, a coin underfoot is collected, an
    /// active hazard underfoot kills the hero, and the win conditions are
    /// checked for a living hero.
    pub fn execute_action(&self, state: &PuzzleState, action: &Action) -> PuzzleState {
        let mut next = state.clone();
        next.action_history.push(action.clone());
        if !next.is_alive {
            return next;
        }

        match action {
            Action::Move { direction } => {
                let target = next.hero_position.step(*direction);
                if self.is_valid_position(target) {
                    next.hero_position = target;
                } else {
                    debug!(turn = next.current_turn, %target, "move blocked");
                }
            }
            Action::Wait => {}
            other => warn!(action = %other.kind(), "puzzle levels only move and wait"),
        }

        next.current_turn += 1;
        self.collect_coin(&mut next);

        if self.hazard_at(next.hero_position, next.current_turn) {
            debug!(turn = next.current_turn, position = %next.hero_position, "hero hit a hazard");
            next.is_alive = false;
        }
        if next.is_alive {
            next.has_won = self.check_win_conditions(&next);
        }
        next
    }

    /// Every enabled win condition holds. With none enabled any state wins.
    pub fn check_win_conditions(&self, state: &PuzzleState) -> bool {
        let conditions = self.level.win_conditions;
        if conditions.reach_goal && !self.index.goals.contains(&state.hero_position) {
            return false;
        }
        if conditions.collect_all_coins && !self.all_coins_collected(state) {
            return false;
        }
        true
    }

    /// Runs `actions` from a fresh state, at most `max_actions` of them,
    /// stopping at the first win or death.
    pub fn simulate(&self, actions: &[Action], max_actions: usize) -> PuzzleResult {
        let mut state = self.create_initial_state();
        let mut turn_states = vec![state.clone()];

        for action in actions.iter().take(max_actions) {
            state = self.execute_action(&state, action);
            turn_states.push(state.clone());
            if state.is_finished() {
                break;
            }
        }

        let win_conditions_met = WinConditionsMet {
            reach_goal: self.index.goals.contains(&state.hero_position),
            collect_all_coins: self.all_coins_collected(&state),
        };
        info!(
            turns = state.current_turn,
            won = state.has_won,
            alive = state.is_alive,
            "puzzle simulation finished"
        );

        PuzzleResult {
            success: state.has_won,
            error: (!state.is_alive).then(|| "Hero was destroyed by a hazard!".to_string()),
            final_state: state,
            turn_states,
            win_conditions_met,
        }
    }

    fn collect_coin(&self, state: &mut PuzzleState) {
        if self.index.coins.contains(&state.hero_position) {
            state.collected_coins.insert(state.hero_position);
        }
    }

    fn all_coins_collected(&self, state: &PuzzleState) -> bool {
        state.collected_coins.len() == self.index.coins.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{Hazard, HazardPattern, HazardType};
    use crate::geometry::Direction;

    fn moves(directions: &[Direction]) -> Vec<Action> {
        directions.iter().copied().map(Action::move_to).collect()
    }

    #[test]
    fn walking_to_the_goal_wins() {
        let sim = PuzzleSimulator::new(LevelData::open(
            5,
            5,
            Position::new(0, 2),
            Position::new(4, 2),
        ));
        let result = sim.simulate(&moves(&[Direction::Right; 6]), 200);

        assert!(result.success);
        assert_eq!(result.final_state.current_turn, 4);
        assert_eq!(result.turn_states.len(), 5);
        assert!(result.win_conditions_met.reach_goal);
        assert_eq!(result.error, None);
    }

    #[test]
    fn walls_and_edges_cost_a_turn() {
        let mut level = LevelData::open(3, 3, Position::ORIGIN, Position::new(2, 2));
        level.walls.push(Position::new(1, 0));
        let sim = PuzzleSimulator::new(level);
        let state = sim.create_initial_state();

        let state = sim.execute_action(&state, &Action::move_to(Direction::Right));
        assert_eq!(state.hero_position, Position::ORIGIN);
        let state = sim.execute_action(&state, &Action::move_to(Direction::Up));
        assert_eq!(state.hero_position, Position::ORIGIN);
        assert_eq!(state.current_turn, 2);
        assert_eq!(state.action_history.len(), 2);
    }

    #[test]
    fn coins_count_once_and_start_coin_is_taken() {
        let mut level = LevelData::open(4, 1, Position::ORIGIN, Position::new(3, 0));
        level.coins = vec![Position::ORIGIN, Position::new(1, 0)];
        level.win_conditions.collect_all_coins = true;
        level.win_conditions.reach_goal = false;
        let sim = PuzzleSimulator::new(level);

        let state = sim.create_initial_state();
        assert_eq!(state.collected_coins.len(), 1);
        assert!(!sim.check_win_conditions(&state));

        let state = sim.execute_action(&state, &Action::move_to(Direction::Right));
        assert!(state.has_won);
        let state = sim.execute_action(&state, &Action::move_to(Direction::Left));
        assert_eq!(state.collected_coins.len(), 2);
    }

    #[test]
    fn toggle_hazard_kills_on_active_frame() {
        let mut level = LevelData::open(5, 1, Position::ORIGIN, Position::new(4, 0));
        level.hazards.push(Hazard {
            x: 2,
            y: 0,
            pattern: HazardPattern::Toggle,
            active_frames: vec![0, 1],
            hazard_type: HazardType::Spike,
        });
        let sim = PuzzleSimulator::new(level);

        // Period 3: the hazard is off on turn 2 and on at turn 3.
        let safe = sim.simulate(&moves(&[Direction::Right; 4]), 200);
        assert!(safe.success);

        let mut actions = vec![Action::Wait];
        actions.extend(moves(&[Direction::Right; 4]));
        let result = sim.simulate(&actions, 200);
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Hero was destroyed by a hazard!"));
        assert_eq!(result.final_state.hero_position, Position::new(2, 0));
        assert_eq!(result.turn_states.len(), 4);
    }

    #[test]
    fn non_grid_actions_act_as_wait() {
        let sim = PuzzleSimulator::new(LevelData::open(
            3,
            3,
            Position::ORIGIN,
            Position::new(2, 2),
        ));
        let state = sim.execute_action(&sim.create_initial_state(), &Action::Defend);
        assert_eq!(state.hero_position, Position::ORIGIN);
        assert_eq!(state.current_turn, 1);
    }

    #[test]
    fn action_cap_limits_the_run() {
        let sim = PuzzleSimulator::new(LevelData::open(
            10,
            1,
            Position::ORIGIN,
            Position::new(9, 0),
        ));
        let result = sim.simulate(&vec![Action::Wait; 50], 5);
        assert!(!result.success);
        assert_eq!(result.final_state.current_turn, 5);
        assert_eq!(result.error, None);
    }
}
