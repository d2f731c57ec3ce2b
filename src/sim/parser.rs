//! Level plan parsing
//!
//! A plan is a list of text rows. Each character is either a terrain symbol
//! (`x` wall, `!` lava) or an actor symbol looked up in an [`ActorRegistry`].
//! Unknown characters are empty space.

use std::collections::HashMap;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::actor::Actor;
use super::level::{Grid, Level, Terrain};
use super::vector::Vector;
use crate::consts::FINISH_DELAY;
use crate::error::EngineError;

/// Builds an actor at a plan cell
pub type ActorFactory = fn(Vector, &mut Pcg32) -> Actor;

/// Symbols reserved for terrain
const TERRAIN_SYMBOLS: [char; 2] = ['x', '!'];

/// Symbol -> actor factory table, validated as entries are added
#[derive(Clone, Default)]
pub struct ActorRegistry {
    factories: HashMap<char, ActorFactory>,
}

impl std::fmt::Debug for ActorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut symbols: Vec<_> = self.factories.keys().collect();
        symbols.sort();
        f.debug_struct("ActorRegistry").field("symbols", &symbols).finish()
    }
}

impl ActorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard bindings: `@` player, `=` horizontal fireball, `v` fire rain,
    /// `o` coin, `|` vertical fireball
    pub fn default_bindings() -> Self {
        let bindings: [(char, ActorFactory); 5] = [
            ('@', |pos, _| Actor::player(pos)),
            ('=', |pos, _| Actor::horizontal_fireball(pos)),
            ('v', |pos, _| Actor::fire_rain(pos)),
            ('o', |pos, rng| Actor::coin(pos, rng)),
            ('|', |pos, _| Actor::vertical_fireball(pos)),
        ];
        Self {
            factories: bindings.into_iter().collect(),
        }
    }

    pub fn register(&mut self, symbol: char, factory: ActorFactory) -> Result<(), EngineError> {
        if TERRAIN_SYMBOLS.contains(&symbol) {
            return Err(EngineError::ReservedSymbol(symbol));
        }
        if self.factories.contains_key(&symbol) {
            return Err(EngineError::DuplicateSymbol(symbol));
        }
        log::debug!("Bound actor symbol '{}'", symbol);
        self.factories.insert(symbol, factory);
        Ok(())
    }

    /// Builder form of [`register`](Self::register)
    pub fn with(mut self, symbol: char, factory: ActorFactory) -> Result<Self, EngineError> {
        self.register(symbol, factory)?;
        Ok(self)
    }

    pub fn get(&self, symbol: char) -> Option<ActorFactory> {
        self.factories.get(&symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

/// Turns plans into levels using one immutable symbol table
#[derive(Debug, Clone)]
pub struct LevelParser {
    registry: ActorRegistry,
    /// Seeds the RNG used by actor factories (coin phases)
    seed: u64,
    finish_delay: f64,
}

impl LevelParser {
    pub fn new(registry: ActorRegistry) -> Self {
        Self {
            registry,
            seed: 0,
            finish_delay: FINISH_DELAY,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_finish_delay(mut self, finish_delay: f64) -> Self {
        self.finish_delay = finish_delay;
        self
    }

    pub fn registry(&self) -> &ActorRegistry {
        &self.registry
    }

    pub fn actor_from_symbol(&self, symbol: char) -> Option<ActorFactory> {
        self.registry.get(symbol)
    }

    pub fn obstacle_from_symbol(&self, symbol: char) -> Option<Terrain> {
        match symbol {
            'x' => Some(Terrain::Wall),
            '!' => Some(Terrain::Lava),
            _ => None,
        }
    }

    pub fn create_grid<S: AsRef<str>>(&self, plan: &[S]) -> Grid {
        Grid::new(
            plan.iter()
                .map(|row| {
                    row.as_ref()
                        .chars()
                        .map(|symbol| self.obstacle_from_symbol(symbol))
                        .collect()
                })
                .collect(),
        )
    }

    /// Actors in row-major plan order, spawned at (column, row)
    pub fn create_actors<S: AsRef<str>>(&self, plan: &[S], rng: &mut Pcg32) -> Vec<Actor> {
        let mut actors = Vec::new();
        if self.registry.is_empty() {
            return actors;
        }
        for (y, row) in plan.iter().enumerate() {
            for (x, symbol) in row.as_ref().chars().enumerate() {
                if let Some(factory) = self.actor_from_symbol(symbol) {
                    actors.push(factory(Vector::new(x as f64, y as f64), rng));
                }
            }
        }
        actors
    }

    pub fn parse<S: AsRef<str>>(&self, plan: &[S]) -> Level {
        let mut rng = Pcg32::seed_from_u64(self.seed);
        let grid = self.create_grid(plan);
        let actors = self.create_actors(plan, &mut rng);
        log::debug!(
            "Parsed level {}x{} with {} actors",
            grid.width(),
            grid.height(),
            actors.len()
        );
        Level::with_finish_delay(grid, actors, self.finish_delay)
    }
}
