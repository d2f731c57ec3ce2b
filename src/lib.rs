//! Tile Runner - A tile-based 2D platformer engine core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, actors, levels, ticking)
//! - `plans`: Textual level plans and their JSON source
//! - `display`: Read-only rendering collaborator (text frames)
//! - `settings`: Data-driven engine configuration
//! - `error`: Engine error type

pub mod display;
pub mod error;
pub mod plans;
pub mod settings;
pub mod sim;

pub use display::{Display, TextDisplay};
pub use error::EngineError;
pub use plans::{LevelPlans, Plan};
pub use settings::Settings;

/// Engine configuration constants
pub mod consts {
    /// Nominal simulation timestep for a headless driver (60 Hz)
    pub const SIM_DT: f64 = 1.0 / 60.0;
    /// Largest sub-step a single actor update may cover
    pub const MAX_STEP: f64 = 0.05;
    /// Frames longer than this are clamped (tab switches, debugger pauses)
    pub const MAX_FRAME_DT: f64 = 0.1;

    /// Delay between the first terminal status and `is_finished`
    pub const FINISH_DELAY: f64 = 1.0;

    /// Player box, spawn symbol marks the feet
    pub const PLAYER_WIDTH: f64 = 0.8;
    pub const PLAYER_HEIGHT: f64 = 1.5;
    pub const PLAYER_SPAWN_OFFSET_Y: f64 = -0.5;

    /// Coin box and its offset inside the nominal cell
    pub const COIN_SIZE: f64 = 0.6;
    pub const COIN_OFFSET_X: f64 = 0.2;
    pub const COIN_OFFSET_Y: f64 = 0.1;
    /// Coin bobbing: phase advance per second and vertical amplitude
    pub const SPRING_SPEED: f64 = 8.0;
    pub const SPRING_DIST: f64 = 0.07;

    /// Fireball speeds (tiles per second)
    pub const HORIZONTAL_FIREBALL_SPEED: f64 = 2.0;
    pub const VERTICAL_FIREBALL_SPEED: f64 = 2.0;
    pub const FIRE_RAIN_SPEED: f64 = 3.0;
}
