//! Entity constructors: player, coin and the fireball family
//!
//! Each constructor takes the nominal spawn cell (the plan column/row) and
//! applies the variant's fixed size, offset and velocity.

use std::f64::consts::TAU;

use rand::Rng;

use super::actor::{Actor, Behavior, Fireball, ObstacleResponse, Spring};
use super::vector::Vector;
use crate::consts::*;

impl Actor {
    /// User-controlled box; the spawn cell marks the player's feet
    pub fn player(spawn: Vector) -> Self {
        Self::with_behavior(
            spawn.plus(Vector::new(0.0, PLAYER_SPAWN_OFFSET_Y)),
            Vector::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            Vector::ZERO,
            Behavior::Player,
        )
    }

    /// Bobbing coin with a random phase so coins don't move in lock-step
    pub fn coin<R: Rng>(spawn: Vector, rng: &mut R) -> Self {
        let pos = spawn.plus(Vector::new(COIN_OFFSET_X, COIN_OFFSET_Y));
        let phase = rng.random_range(0.0..TAU * COIN_SIZE);
        Self::with_behavior(
            pos,
            Vector::new(COIN_SIZE, COIN_SIZE),
            Vector::ZERO,
            Behavior::Coin(Spring {
                start_pos: pos,
                phase,
                speed: SPRING_SPEED,
                dist: SPRING_DIST,
            }),
        )
    }

    /// Plain 1x1 fireball that bounces off terrain
    pub fn fireball(pos: Vector, speed: Vector) -> Self {
        Self::fireball_with(pos, speed, ObstacleResponse::Bounce)
    }

    pub fn horizontal_fireball(pos: Vector) -> Self {
        Self::fireball(pos, Vector::new(HORIZONTAL_FIREBALL_SPEED, 0.0))
    }

    pub fn vertical_fireball(pos: Vector) -> Self {
        Self::fireball(pos, Vector::new(0.0, VERTICAL_FIREBALL_SPEED))
    }

    /// Falls and restarts from its spawn cell on contact
    pub fn fire_rain(pos: Vector) -> Self {
        Self::fireball_with(pos, Vector::new(0.0, FIRE_RAIN_SPEED), ObstacleResponse::Reset)
    }

    fn fireball_with(pos: Vector, speed: Vector, response: ObstacleResponse) -> Self {
        Self::with_behavior(
            pos,
            Vector::new(1.0, 1.0),
            speed,
            Behavior::Fireball(Fireball {
                start_pos: pos,
                response,
            }),
        )
    }

    /// Spring state for coins
    pub fn spring(&self) -> Option<&Spring> {
        match &self.behavior {
            Behavior::Coin(spring) => Some(spring),
            _ => None,
        }
    }

    /// Spawn position recorded by fireballs
    pub fn start_pos(&self) -> Option<Vector> {
        match &self.behavior {
            Behavior::Fireball(fireball) => Some(fireball.start_pos),
            Behavior::Coin(spring) => Some(spring.start_pos),
            _ => None,
        }
    }
}
