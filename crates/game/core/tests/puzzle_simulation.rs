//! Puzzle scenarios run end to end through `PuzzleSimulator::simulate`.

use quest_core::env::{Hazard, HazardPattern, HazardType, LevelData};
use quest_core::{Action, Direction, Position, PuzzleSimulator};

fn actions(directions: &[Direction]) -> Vec<Action> {
    directions.iter().copied().map(Action::move_to).collect()
}

fn corridor_with_coin() -> LevelData {
    let mut level = LevelData::open(5, 1, Position::ORIGIN, Position::new(4, 0));
    level.coins = vec![Position::new(1, 0)];
    level
}

#[test]
fn five_by_five_reach_goal() {
    let sim = PuzzleSimulator::new(LevelData::open(
        5,
        5,
        Position::ORIGIN,
        Position::new(4, 4),
    ));
    let mut path = vec![Direction::Right; 4];
    path.extend([Direction::Down; 4]);

    let result = sim.simulate(&actions(&path), 200);

    assert!(result.success);
    assert!(result.final_state.has_won);
    assert_eq!(result.final_state.hero_position, Position::new(4, 4));
    assert_eq!(result.turn_states.len(), 9);
    assert_eq!(result.turn_states[0].hero_position, Position::ORIGIN);
}

#[test]
fn revisiting_a_coin_collects_it_once() {
    let sim = PuzzleSimulator::new(corridor_with_coin());
    let result = sim.simulate(
        &actions(&[Direction::Right, Direction::Left, Direction::Right]),
        200,
    );

    assert_eq!(result.final_state.collected_coins.len(), 1);
    assert!(result.win_conditions_met.collect_all_coins);
    assert!(!result.success);
}

#[test]
fn both_conditions_fail_with_a_coin_left() {
    let mut level = LevelData::open(5, 3, Position::ORIGIN, Position::new(4, 0));
    level.coins = vec![Position::new(2, 2)];
    level.win_conditions.collect_all_coins = true;
    let sim = PuzzleSimulator::new(level);

    let result = sim.simulate(&actions(&[Direction::Right; 4]), 200);

    assert!(!result.success);
    assert!(result.win_conditions_met.reach_goal);
    assert!(!result.win_conditions_met.collect_all_coins);
    assert_eq!(result.error, None);
}

#[test]
fn toggle_hazard_follows_its_cycle() {
    let hazard = Hazard {
        x: 0,
        y: 0,
        pattern: HazardPattern::Toggle,
        active_frames: vec![0, 2, 4],
        hazard_type: HazardType::Fire,
    };
    for turn in 0..24 {
        assert_eq!(hazard.is_active(turn), [0, 2, 4].contains(&(turn % 6)), "turn {turn}");
    }
}

#[test]
fn toggle_hazard_kills_only_on_its_active_frames() {
    let mut level = LevelData::open(5, 1, Position::ORIGIN, Position::new(4, 0));
    level.hazards.push(Hazard {
        x: 2,
        y: 0,
        pattern: HazardPattern::Toggle,
        active_frames: vec![0, 2, 4],
        hazard_type: HazardType::Fire,
    });
    let sim = PuzzleSimulator::new(level);

    // Arrives on turn 2, an active frame.
    let rushed = sim.simulate(&actions(&[Direction::Right; 4]), 200);
    assert!(!rushed.success);
    assert!(!rushed.final_state.is_alive);
    assert_eq!(rushed.final_state.hero_position, Position::new(2, 0));
    assert_eq!(rushed.final_state.current_turn, 2);
    assert_eq!(rushed.error.as_deref(), Some("Hero was destroyed by a hazard!"));

    // One wait shifts the arrival to turn 3, which is safe.
    let mut timed = vec![Action::Wait];
    timed.extend(actions(&[Direction::Right; 4]));
    let result = sim.simulate(&timed, 200);
    assert!(result.success);
    assert_eq!(result.final_state.current_turn, 5);
    assert_eq!(result.error, None);

    // Two waits land on turn 4, active again.
    let mut late = vec![Action::Wait, Action::Wait];
    late.extend(actions(&[Direction::Right; 4]));
    let result = sim.simulate(&late, 200);
    assert!(!result.success);
    assert_eq!(result.final_state.current_turn, 4);
}

#[test]
fn stepping_on_an_active_hazard_ends_the_run() {
    let mut level = LevelData::open(4, 1, Position::ORIGIN, Position::new(3, 0));
    level.hazards.push(Hazard {
        x: 1,
        y: 0,
        pattern: HazardPattern::Static,
        active_frames: Vec::new(),
        hazard_type: HazardType::Spike,
    });
    let sim = PuzzleSimulator::new(level);

    let result = sim.simulate(&actions(&[Direction::Right; 3]), 200);

    assert!(!result.success);
    assert!(!result.final_state.is_alive);
    assert!(!result.final_state.has_won);
    assert_eq!(result.error.as_deref(), Some("Hero was destroyed by a hazard!"));
    assert_eq!(result.turn_states.len(), 2);
}

#[test]
fn intermediate_states_are_snapshots() {
    let sim = PuzzleSimulator::new(corridor_with_coin());
    let result = sim.simulate(&actions(&[Direction::Right, Direction::Right]), 200);

    let positions: Vec<_> = result.turn_states.iter().map(|s| s.hero_position).collect();
    assert_eq!(
        positions,
        vec![Position::ORIGIN, Position::new(1, 0), Position::new(2, 0)]
    );
    assert!(result.turn_states[0].collected_coins.is_empty());
    assert_eq!(result.turn_states[1].collected_coins.len(), 1);
    assert_eq!(result.turn_states[2].action_history.len(), 2);
}
