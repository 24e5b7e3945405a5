//! Structural checks for puzzle level files.
//!
//! Problems are reported as `path: message` lines, one per problem, so a level
//! author can fix every issue in one pass.

use quest_core::env::{HazardPattern, LevelData};
use quest_core::{ActionKind, EngineConfig, Position};

const MIN_GRID: u32 = EngineConfig::MIN_GRID_SIZE;
const MAX_GRID: u32 = EngineConfig::MAX_GRID_SIZE;

/// Returns every problem found in `level`. An empty list means the level is
/// playable.
pub fn validate_level(level: &LevelData) -> Vec<String> {
    let mut problems = Vec::new();

    check_dimension(&mut problems, "gridWidth", level.grid_width);
    check_dimension(&mut problems, "gridHeight", level.grid_height);

    check_position(&mut problems, level, "startPosition", level.start_position);
    if level.goals.is_empty() {
        problems.push("goals: Array must contain at least 1 element(s)".to_string());
    }
    for (i, goal) in level.goals.iter().enumerate() {
        check_position(&mut problems, level, &format!("goals.{i}"), *goal);
    }
    for (i, wall) in level.walls.iter().enumerate() {
        check_position(&mut problems, level, &format!("walls.{i}"), *wall);
    }
    for (i, coin) in level.coins.iter().enumerate() {
        check_position(&mut problems, level, &format!("coins.{i}"), *coin);
    }
    for (i, hazard) in level.hazards.iter().enumerate() {
        check_position(&mut problems, level, &format!("hazards.{i}"), hazard.position());
        if hazard.pattern == HazardPattern::Toggle && hazard.active_frames.is_empty() {
            problems.push(format!(
                "hazards.{i}.activeFrames: toggle hazard has no active frames"
            ));
        }
    }

    if level.walls.contains(&level.start_position) {
        problems.push("startPosition: start cell is a wall".to_string());
    }
    for (i, goal) in level.goals.iter().enumerate() {
        if level.walls.contains(goal) {
            problems.push(format!("goals.{i}: goal cell is a wall"));
        }
    }

    for (i, method) in level.allowed_methods.iter().enumerate() {
        if !ActionKind::PUZZLE_METHODS.contains(method) {
            problems.push(format!(
                "allowedMethods.{i}: Invalid enum value. Expected 'move' | 'wait', received '{method}'"
            ));
        }
    }

    if level.instructions.is_empty() {
        problems.push("instructions: String must contain at least 1 character(s)".to_string());
    }

    problems
}

fn check_dimension(problems: &mut Vec<String>, path: &str, value: u32) {
    if value < MIN_GRID {
        problems.push(format!(
            "{path}: Number must be greater than or equal to {MIN_GRID}"
        ));
    } else if value > MAX_GRID {
        problems.push(format!("{path}: Number must be less than or equal to {MAX_GRID}"));
    }
}

fn check_position(problems: &mut Vec<String>, level: &LevelData, path: &str, position: Position) {
    if position.x < 0 {
        problems.push(format!("{path}.x: Number must be greater than or equal to 0"));
    }
    if position.y < 0 {
        problems.push(format!("{path}.y: Number must be greater than or equal to 0"));
    }
    if position.x >= 0 && position.y >= 0 && !level.contains(position) {
        problems.push(format!(
            "{path}: cell {position} is outside the {}x{} grid",
            level.grid_width, level.grid_height
        ));
    }
}
