//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-driven timesteps only
//! - Seeded RNG only
//! - Stable iteration order (actor collection order)
//! - No rendering or platform dependencies

pub mod actor;
pub mod campaign;
pub mod entities;
pub mod level;
pub mod parser;
pub mod tick;
pub mod vector;

pub use actor::{Actor, ActorId, ActorKind, Behavior, Fireball, ObstacleResponse, Spring};
pub use campaign::{Campaign, CampaignProgress};
pub use level::{Contact, Grid, Level, LevelStatus, ObstacleMap, Terrain};
pub use parser::{ActorFactory, ActorRegistry, LevelParser};
pub use tick::{GameEvent, tick};
pub use vector::Vector;
