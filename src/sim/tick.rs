//! Sub-stepped simulation tick
//!
//! Advances a level deterministically. Per sub-step:
//! 1. Every non-player actor acts against the (static) terrain grid
//! 2. The player box is checked against terrain, then against actors
//! 3. Once the status is terminal, the finish delay counts down

use serde::{Deserialize, Serialize};

use super::actor::{ActorId, ActorKind};
use super::level::{Level, LevelStatus, ObstacleMap, Terrain};
use crate::consts::{MAX_FRAME_DT, MAX_STEP};

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    CoinCollected { id: ActorId },
    /// Player touched lava terrain
    PlayerBurned,
    /// Player touched a fireball
    PlayerHit { id: ActorId },
    LevelWon,
    LevelLost,
}

/// Advance the level by `dt` seconds, returning events in order
pub fn tick(level: &mut Level, dt: f64) -> Vec<GameEvent> {
    tick_with_step(level, dt, MAX_STEP)
}

/// [`tick`] with an explicit maximum sub-step
pub fn tick_with_step(level: &mut Level, dt: f64, max_step: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let max_step = if max_step > 0.0 { max_step } else { MAX_STEP };

    let mut remaining = dt.clamp(0.0, MAX_FRAME_DT);
    while remaining > 0.0 {
        let step = remaining.min(max_step);
        remaining -= step;
        step_level(level, step, &mut events);
    }

    events
}

fn step_level(level: &mut Level, step: f64, events: &mut Vec<GameEvent>) {
    if level.status.is_terminal() {
        level.count_down(step);
        return;
    }

    // 1. Move actors; terrain is immutable so move order doesn't matter
    {
        let (grid, actors) = level.parts_mut();
        for actor in actors.iter_mut().filter(|a| a.kind() != ActorKind::Player) {
            actor.act(step, grid);
        }
    }

    // 2. Player contact
    let Some(player) = level.player().cloned() else {
        return;
    };

    if let Some(terrain) = level.obstacle_at(player.pos, player.size) {
        level.player_touched(terrain, None);
        if terrain == Terrain::Lava {
            events.push(GameEvent::PlayerBurned);
        }
    }

    if !level.status.is_terminal() {
        if let Some(other) = level.actor_at(&player).cloned() {
            level.player_touched(other.kind(), Some(&other));
            match (other.kind(), other.id) {
                (ActorKind::Coin, Some(id)) => events.push(GameEvent::CoinCollected { id }),
                (ActorKind::Fireball, Some(id)) => events.push(GameEvent::PlayerHit { id }),
                _ => {}
            }
        }
    }

    match level.status {
        LevelStatus::Won => events.push(GameEvent::LevelWon),
        LevelStatus::Lost => events.push(GameEvent::LevelLost),
        LevelStatus::InProgress => {}
    }
}
