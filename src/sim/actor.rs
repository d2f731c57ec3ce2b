//! Actors: axis-aligned boxes with a velocity and a per-variant behaviour
//!
//! Every movable or static game object is an [`Actor`]. Variant-specific
//! state lives in [`Behavior`], and [`Actor::act`] dispatches on it once per
//! sub-step.

use serde::{Deserialize, Serialize};

use super::level::ObstacleMap;
use super::vector::Vector;
use crate::error::EngineError;

/// Stable handle of an actor placed in a level
///
/// The generation is unique per [`Level`](super::Level) instance, so ids from
/// two parses of the same plan never compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId {
    pub generation: u32,
    /// Spawn order within the level, from 1
    pub index: u32,
}

impl ActorId {
    pub const fn new(generation: u32, index: u32) -> Self {
        Self { generation, index }
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.generation, self.index)
    }
}

/// Variant classification, usable without inspecting behaviour state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    Actor,
    Player,
    Coin,
    Fireball,
}

impl ActorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorKind::Actor => "actor",
            ActorKind::Player => "player",
            ActorKind::Coin => "coin",
            ActorKind::Fireball => "fireball",
        }
    }
}

impl std::fmt::Display for ActorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a fireball does when its next position hits terrain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleResponse {
    /// Reverse velocity, stay in place
    Bounce,
    /// Teleport back to the spawn position, keep velocity
    Reset,
}

/// Projectile hazard state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fireball {
    /// Construction position
    pub start_pos: Vector,
    pub response: ObstacleResponse,
}

/// Vertical bobbing of a coin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    /// Resting position (x never changes)
    pub start_pos: Vector,
    /// Current phase (radians)
    pub phase: f64,
    /// Phase advance per unit of time
    pub speed: f64,
    /// Amplitude of the vertical offset
    pub dist: f64,
}

impl Spring {
    pub fn update(&mut self, time: f64) {
        self.phase += time * self.speed;
    }

    /// Current offset from the resting position
    pub fn vector(&self) -> Vector {
        Vector::new(0.0, self.phase.sin() * self.dist)
    }

    /// Advance the phase and return the resulting position
    pub fn next_position(&mut self, time: f64) -> Vector {
        self.update(time);
        Vector::new(self.start_pos.x, self.start_pos.y + self.vector().y)
    }
}

/// Per-variant behaviour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    /// Generic actor, never moves on its own
    Inert,
    /// Driven by the run loop, no autonomous motion
    Player,
    Coin(Spring),
    Fireball(Fireball),
}

impl Behavior {
    pub fn kind(&self) -> ActorKind {
        match self {
            Behavior::Inert => ActorKind::Actor,
            Behavior::Player => ActorKind::Player,
            Behavior::Coin(_) => ActorKind::Coin,
            Behavior::Fireball(_) => ActorKind::Fireball,
        }
    }
}

/// An axis-aligned game entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Assigned when the actor is placed into a level
    #[serde(default)]
    pub id: Option<ActorId>,
    /// Top-left corner
    pub pos: Vector,
    pub size: Vector,
    /// Units per unit of time
    pub speed: Vector,
    pub behavior: Behavior,
}

impl Default for Actor {
    fn default() -> Self {
        Self::with_behavior(
            Vector::ZERO,
            Vector::new(1.0, 1.0),
            Vector::ZERO,
            Behavior::Inert,
        )
    }
}

impl Actor {
    /// Create a generic actor, rejecting negative sizes
    pub fn new(pos: Vector, size: Vector, speed: Vector) -> Result<Self, EngineError> {
        if size.x < 0.0 || size.y < 0.0 {
            return Err(EngineError::NegativeSize {
                width: size.x,
                height: size.y,
            });
        }
        Ok(Self::with_behavior(pos, size, speed, Behavior::Inert))
    }

    pub(crate) fn with_behavior(
        pos: Vector,
        size: Vector,
        speed: Vector,
        behavior: Behavior,
    ) -> Self {
        Self {
            id: None,
            pos,
            size,
            speed,
            behavior,
        }
    }

    #[inline]
    pub fn kind(&self) -> ActorKind {
        self.behavior.kind()
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.pos.x
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.pos.y
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.pos.y + self.size.y
    }

    /// Same reference, or the same placed actor (clones keep their id)
    pub fn is_same(&self, other: &Actor) -> bool {
        std::ptr::eq(self, other) || (self.id.is_some() && self.id == other.id)
    }

    /// Positive-area overlap; shared edges do not count
    pub fn is_intersect(&self, other: &Actor) -> bool {
        if self.is_same(other) {
            return false;
        }
        !(other.left() >= self.right()
            || other.right() <= self.left()
            || other.top() >= self.bottom()
            || other.bottom() <= self.top())
    }

    /// Linear motion over `time`
    pub fn next_position(&self, time: f64) -> Vector {
        self.pos.plus(self.speed.times(time))
    }

    /// Variant reaction to running into terrain
    pub fn handle_obstacle(&mut self) {
        if let Behavior::Fireball(fireball) = self.behavior {
            match fireball.response {
                ObstacleResponse::Bounce => self.speed = self.speed.times(-1.0),
                ObstacleResponse::Reset => self.pos = fireball.start_pos,
            }
        }
    }

    /// Advance this actor by `time` against static terrain
    pub fn act(&mut self, time: f64, terrain: &dyn ObstacleMap) {
        match self.behavior {
            Behavior::Inert | Behavior::Player => {}
            Behavior::Coin(ref mut spring) => {
                self.pos = spring.next_position(time);
            }
            Behavior::Fireball(_) => {
                let next = self.next_position(time);
                if terrain.obstacle_at(next, self.size).is_some() {
                    self.handle_obstacle();
                } else {
                    self.pos = next;
                }
            }
        }
    }
}
