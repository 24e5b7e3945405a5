//! Hero movement, zone transitions and pathfinding.

use std::collections::{BTreeMap, VecDeque};

use arrayvec::ArrayVec;

use crate::action::{ActionError, ActionOutcome};
use crate::env::{WorldEnv, ZoneData};
use crate::geometry::{Direction, Position};
use crate::state::{RpgState, StateDelta};
use crate::systems::SystemResult;

/// Moves the hero one cell.
///
/// Stepping onto a transition cell also requests a zone change, which the
/// engine applies after the move.
///
/// # Errors
///
/// - `ActionError::PathBlocked` when the target cell is outside the zone or blocked
/// - `ActionError::PassageLocked` when a locked transition's key is not carried
pub fn move_hero(state: &RpgState, env: &WorldEnv<'_>, direction: Direction) -> SystemResult {
    let zone = env.zone(&state.world.current_zone_id)?;
    let target = state.hero_position.step(direction);
    if !zone.is_walkable(target) {
        return Err(ActionError::PathBlocked(direction));
    }

    let moved = StateDelta::PositionChanged { position: target };

    let Some(transition) = zone.transition_at(target) else {
        return Ok(ActionOutcome::new(format!("Moved {direction}")).with(moved));
    };
    if transition.is_locked {
        if let Some(key) = &transition.required_key_id {
            if !state.inventory.has_key(key) {
                return Err(ActionError::PassageLocked);
            }
        }
    }
    Ok(ActionOutcome::new(format!("Moving to {direction}"))
        .with(moved)
        .with(StateDelta::ZoneTransition {
            zone_id: transition.target_zone_id.clone(),
            position: transition.target_position,
        }))
}

/// The four orthogonal neighbours in up, down, left, right order.
pub fn adjacent_positions(position: Position) -> ArrayVec<Position, 4> {
    position.neighbors()
}

/// Shortest walkable path from `start` to `goal`, both included.
///
/// Breadth-first over walkable cells; paths longer than `max_steps` cells are
/// not explored. Returns `None` when the goal is unreachable within the budget.
pub fn find_path(
    zone: &ZoneData,
    start: Position,
    goal: Position,
    max_steps: usize,
) -> Option<Vec<Position>> {
    let mut parents: BTreeMap<Position, Position> = BTreeMap::new();
    let mut queue = VecDeque::from([(start, 1_usize)]);
    parents.insert(start, start);

    while let Some((current, length)) = queue.pop_front() {
        if current == goal {
            return Some(trace_path(&parents, start, goal));
        }
        if length >= max_steps {
            continue;
        }
        for next in current.neighbors() {
            if !parents.contains_key(&next) && zone.is_walkable(next) {
                parents.insert(next, current);
                queue.push_back((next, length + 1));
            }
        }
    }

    None
}

fn trace_path(parents: &BTreeMap<Position, Position>, start: Position, goal: Position) -> Vec<Position> {
    let mut path = vec![goal];
    let mut cursor = goal;
    while cursor != start {
        match parents.get(&cursor) {
            Some(parent) => {
                cursor = *parent;
                path.push(cursor);
            }
            None => break,
        }
    }
    path.reverse();
    path
}
