//! Level state: static terrain grid, live actors and the completion protocol
//!
//! The grid never changes after construction. Actors are removed when
//! consumed, and the player handle stays valid across removals.

use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId, ActorKind};
use super::vector::Vector;
use crate::consts::FINISH_DELAY;

/// Next level generation; every constructed level takes a fresh one
static NEXT_GENERATION: AtomicU32 = AtomicU32::new(1);

/// Terrain tag attached to a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    Wall,
    Lava,
}

impl Terrain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Terrain::Wall => "wall",
            Terrain::Lava => "lava",
        }
    }
}

/// Static terrain query used by actors while they move
pub trait ObstacleMap {
    /// Terrain overlapped by a box at `pos` with dimensions `size`
    fn obstacle_at(&self, pos: Vector, size: Vector) -> Option<Terrain>;
}

/// Row-major terrain cells; rows may differ in length
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    rows: Vec<Vec<Option<Terrain>>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Option<Terrain>>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Option<Terrain>>] {
        &self.rows
    }

    /// Row count
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Longest row, 0 for an empty grid
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Cell lookup; cells past the end of a short row are empty
    pub fn cell(&self, x: usize, y: usize) -> Option<Terrain> {
        self.rows.get(y).and_then(|row| row.get(x).copied().flatten())
    }
}

impl ObstacleMap for Grid {
    fn obstacle_at(&self, pos: Vector, size: Vector) -> Option<Terrain> {
        // Round outward so any partial overlap occupies the cell
        let left = pos.x.floor();
        let right = (pos.x + size.x).ceil();
        let top = pos.y.floor();
        let bottom = (pos.y + size.y).ceil();

        if left < 0.0 || top < 0.0 || right > self.width() as f64 {
            return Some(Terrain::Wall);
        }
        if bottom > self.height() as f64 {
            return Some(Terrain::Lava);
        }

        let (left, right) = (left as usize, right as usize);
        let (top, bottom) = (top as usize, bottom as usize);
        (top..bottom)
            .flat_map(|y| (left..right).map(move |x| (x, y)))
            .find_map(|(x, y)| self.cell(x, y))
    }
}

/// Completion status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LevelStatus {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl LevelStatus {
    pub fn is_terminal(&self) -> bool {
        *self != LevelStatus::InProgress
    }
}

/// What the player just touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contact {
    Terrain(Terrain),
    Actor(ActorKind),
}

impl From<Terrain> for Contact {
    fn from(terrain: Terrain) -> Self {
        Contact::Terrain(terrain)
    }
}

impl From<ActorKind> for Contact {
    fn from(kind: ActorKind) -> Self {
        Contact::Actor(kind)
    }
}

/// A playable level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    grid: Grid,
    /// Live actors (collection order is spawn order)
    actors: Vec<Actor>,
    /// Captured once from the initial actors
    player: Option<ActorId>,
    pub status: LevelStatus,
    /// Counts down once status is terminal
    pub finish_delay: f64,
}

impl Level {
    /// Build a level, assigning actor ids in collection order under a fresh
    /// generation
    pub fn new(grid: Grid, actors: Vec<Actor>) -> Self {
        Self::with_finish_delay(grid, actors, FINISH_DELAY)
    }

    pub fn with_finish_delay(grid: Grid, mut actors: Vec<Actor>, finish_delay: f64) -> Self {
        let generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);
        for (index, actor) in actors.iter_mut().enumerate() {
            actor.id = Some(ActorId::new(generation, index as u32 + 1));
        }
        let player = actors
            .iter()
            .find(|a| a.kind() == ActorKind::Player)
            .and_then(|a| a.id);

        Self {
            grid,
            actors,
            player,
            status: LevelStatus::InProgress,
            finish_delay,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn player_id(&self) -> Option<ActorId> {
        self.player
    }

    pub fn player(&self) -> Option<&Actor> {
        let id = self.player?;
        self.actors.iter().find(|a| a.id == Some(id))
    }

    /// Mutable access for the run loop that drives the player
    pub fn player_mut(&mut self) -> Option<&mut Actor> {
        let id = self.player?;
        self.actors.iter_mut().find(|a| a.id == Some(id))
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == Some(id))
    }

    /// Split borrow: immutable terrain plus mutable actors
    pub(crate) fn parts_mut(&mut self) -> (&Grid, &mut [Actor]) {
        (&self.grid, self.actors.as_mut_slice())
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_terminal() && self.finish_delay < 0.0
    }

    /// Run the completion countdown; no-op while in progress
    pub fn count_down(&mut self, dt: f64) {
        if self.status.is_terminal() {
            self.finish_delay -= dt;
        }
    }

    /// First other actor overlapping `actor`
    pub fn actor_at(&self, actor: &Actor) -> Option<&Actor> {
        self.actors.iter().find(|other| other.is_intersect(actor))
    }

    /// Remove the first actor at exactly the same left/top coordinates
    pub fn remove_actor(&mut self, actor: &Actor) -> &[Actor] {
        if let Some(index) = self
            .actors
            .iter()
            .position(|a| a.left() == actor.left() && a.top() == actor.top())
        {
            let removed = self.actors.remove(index);
            log::debug!("Removed {} at ({}, {})", removed.kind(), removed.left(), removed.top());
        }
        &self.actors
    }

    /// Identity-based removal
    pub fn remove_actor_by_id(&mut self, id: ActorId) -> Option<Actor> {
        let index = self.actors.iter().position(|a| a.id == Some(id))?;
        let removed = self.actors.remove(index);
        log::debug!("Removed {} #{}", removed.kind(), id);
        Some(removed)
    }

    pub fn no_more_actors(&self, kind: ActorKind) -> bool {
        self.actors.iter().all(|a| a.kind() != kind)
    }

    /// Touch-reaction policy for player contact with terrain or an actor
    pub fn player_touched(&mut self, contact: impl Into<Contact>, actor: Option<&Actor>) {
        match contact.into() {
            Contact::Terrain(Terrain::Lava) | Contact::Actor(ActorKind::Fireball) => {
                if self.status != LevelStatus::Lost {
                    log::info!("Level lost");
                }
                self.status = LevelStatus::Lost;
            }
            Contact::Actor(ActorKind::Coin) => {
                let Some(coin) = actor.filter(|a| a.kind() == ActorKind::Coin) else {
                    return;
                };
                match coin.id {
                    Some(id) => {
                        // Already collected, or placed in another level
                        if self.remove_actor_by_id(id).is_none() {
                            return;
                        }
                    }
                    None => {
                        self.remove_actor(coin);
                    }
                }
                if self.no_more_actors(ActorKind::Coin) {
                    log::info!("Level won");
                    self.status = LevelStatus::Won;
                }
            }
            _ => {}
        }
    }
}

impl ObstacleMap for Level {
    fn obstacle_at(&self, pos: Vector, size: Vector) -> Option<Terrain> {
        self.grid.obstacle_at(pos, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from(rows: &[&str]) -> Grid {
        Grid::new(
            rows.iter()
                .map(|row| {
                    row.chars()
                        .map(|c| match c {
                            'x' => Some(Terrain::Wall),
                            '!' => Some(Terrain::Lava),
                            _ => None,
                        })
                        .collect()
                })
                .collect(),
        )
    }

    fn boxed(x: f64, y: f64) -> Actor {
        Actor::new(Vector::new(x, y), Vector::new(1.0, 1.0), Vector::ZERO).unwrap()
    }

    fn coin_at(x: f64, y: f64) -> Actor {
        use crate::sim::actor::{Behavior, Spring};
        Actor::with_behavior(
            Vector::new(x, y),
            Vector::new(0.6, 0.6),
            Vector::ZERO,
            Behavior::Coin(Spring {
                start_pos: Vector::new(x, y),
                phase: 0.0,
                speed: 8.0,
                dist: 0.07,
            }),
        )
    }

    fn player_at(x: f64, y: f64) -> Actor {
        use crate::sim::actor::Behavior;
        Actor::with_behavior(
            Vector::new(x, y),
            Vector::new(0.8, 1.5),
            Vector::ZERO,
            Behavior::Player,
        )
    }

    #[test]
    fn test_dimensions() {
        let empty = Level::new(Grid::default(), vec![]);
        assert_eq!(empty.height(), 0);
        assert_eq!(empty.width(), 0);

        let jagged = Level::new(grid_from(&["xx", "xxxxx", ""]), vec![]);
        assert_eq!(jagged.height(), 3);
        assert_eq!(jagged.width(), 5);
    }

    #[test]
    fn test_obstacle_out_of_bounds_is_wall() {
        let grid = grid_from(&["   ", "   ", "   "]);
        let size = Vector::new(1.0, 1.0);
        assert_eq!(grid.obstacle_at(Vector::new(-1.0, 1.0), size), Some(Terrain::Wall));
        assert_eq!(grid.obstacle_at(Vector::new(-0.5, 1.0), size), Some(Terrain::Wall));
        assert_eq!(grid.obstacle_at(Vector::new(1.0, -0.1), size), Some(Terrain::Wall));
        assert_eq!(grid.obstacle_at(Vector::new(2.5, 1.0), size), Some(Terrain::Wall));
    }

    #[test]
    fn test_obstacle_below_is_lava() {
        let grid = grid_from(&["   ", "   "]);
        let size = Vector::new(1.0, 1.0);
        assert_eq!(grid.obstacle_at(Vector::new(1.0, 1.5), size), Some(Terrain::Lava));
        // Horizontal bounds win over the bottom check
        assert_eq!(grid.obstacle_at(Vector::new(-1.0, 5.0), size), Some(Terrain::Wall));
    }

    #[test]
    fn test_obstacle_cells() {
        let grid = grid_from(&["   ", " x ", " ! "]);
        let size = Vector::new(1.0, 1.0);
        assert_eq!(grid.obstacle_at(Vector::new(1.0, 1.0), size), Some(Terrain::Wall));
        assert_eq!(grid.obstacle_at(Vector::new(1.0, 2.0), size), Some(Terrain::Lava));
        assert_eq!(grid.obstacle_at(Vector::new(0.0, 0.0), size), None);
        // Touching the cell edge does not occupy it
        assert_eq!(grid.obstacle_at(Vector::new(2.0, 1.0), size), None);
        // Partial overlap rounds outward
        let sliver = Vector::new(0.2, 0.2);
        assert_eq!(grid.obstacle_at(Vector::new(1.9, 0.9), sliver), Some(Terrain::Wall));
    }

    #[test]
    fn test_obstacle_scan_order() {
        // Lava above wall: the upper row is scanned first
        let grid = grid_from(&["!", "x"]);
        let tall = Vector::new(1.0, 2.0);
        assert_eq!(grid.obstacle_at(Vector::ZERO, tall), Some(Terrain::Lava));

        // Same row: leftmost wins
        let grid = grid_from(&["x!"]);
        let wide = Vector::new(2.0, 1.0);
        assert_eq!(grid.obstacle_at(Vector::ZERO, wide), Some(Terrain::Wall));
    }

    #[test]
    fn test_obstacle_short_row_is_empty() {
        let grid = grid_from(&["xxx", "x"]);
        assert_eq!(grid.obstacle_at(Vector::new(2.0, 1.0), Vector::new(1.0, 1.0)), None);
    }

    #[test]
    fn test_actor_at() {
        let level = Level::new(Grid::default(), vec![boxed(0.0, 0.0), boxed(5.0, 5.0)]);
        let probe = boxed(0.5, 0.5);
        assert_eq!(level.actor_at(&probe).map(|a| a.left()), Some(0.0));
        assert!(level.actor_at(&boxed(10.0, 10.0)).is_none());

        // An actor never finds itself
        let first = level.actors()[0].clone();
        assert!(level.actor_at(&first).is_none());
    }

    #[test]
    fn test_player_captured() {
        let level = Level::new(Grid::default(), vec![boxed(0.0, 0.0), player_at(3.0, 3.0)]);
        assert_eq!(level.player_id(), level.actors()[1].id);
        assert_eq!(level.player_id().map(|id| id.index), Some(2));
        assert_eq!(level.player().map(|p| p.left()), Some(3.0));

        let no_player = Level::new(Grid::default(), vec![boxed(0.0, 0.0)]);
        assert!(no_player.player().is_none());
    }

    #[test]
    fn test_player_survives_removals() {
        let mut level = Level::new(
            Grid::default(),
            vec![coin_at(0.0, 0.0), player_at(3.0, 3.0), coin_at(6.0, 0.0)],
        );
        let first = level.actors()[0].id.unwrap();
        level.remove_actor_by_id(first);
        assert_eq!(level.player().map(|p| p.left()), Some(3.0));
    }

    #[test]
    fn test_remove_actor_by_coordinates() {
        let mut level = Level::new(Grid::default(), vec![coin_at(1.0, 1.0), coin_at(2.0, 1.0)]);
        let probe = coin_at(2.0, 1.0);
        let remaining = level.remove_actor(&probe);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].left(), 1.0);

        // No exact match: nothing removed
        assert_eq!(level.remove_actor(&coin_at(1.0000001, 1.0)).len(), 1);
    }

    #[test]
    fn test_ids_unique_across_levels() {
        let a = Level::new(Grid::default(), vec![boxed(0.0, 0.0)]);
        let b = Level::new(Grid::default(), vec![boxed(0.0, 0.0)]);
        let (a_id, b_id) = (a.actors()[0].id.unwrap(), b.actors()[0].id.unwrap());
        assert_eq!((a_id.index, b_id.index), (1, 1));
        assert_ne!(a_id, b_id);
        assert!(b.actor(a_id).is_none());
    }

    #[test]
    fn test_remove_actor_same_cell_takes_first() {
        let mut level = Level::new(Grid::default(), vec![coin_at(1.0, 1.0), coin_at(1.0, 1.0)]);
        let second = level.actors()[1].id;

        let remaining = level.remove_actor(&coin_at(1.0, 1.0));
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, second);
    }

    #[test]
    fn test_touched_coin_removed_by_id_in_shared_cell() {
        let mut level = Level::new(Grid::default(), vec![coin_at(1.0, 1.0), coin_at(1.0, 1.0)]);
        let first = level.actors()[0].id;
        let second = level.actors()[1].clone();

        level.player_touched(ActorKind::Coin, Some(&second));
        assert_eq!(level.actors().len(), 1);
        assert_eq!(level.actors()[0].id, first);
        assert_eq!(level.status, LevelStatus::InProgress);

        // Touching the collected coin again leaves its neighbour alone
        level.player_touched(ActorKind::Coin, Some(&second));
        assert_eq!(level.actors().len(), 1);
        assert_eq!(level.actors()[0].id, first);
        assert_eq!(level.status, LevelStatus::InProgress);
    }

    #[test]
    fn test_unplaced_coin_removed_by_coordinates() {
        let mut level = Level::new(Grid::default(), vec![coin_at(1.0, 1.0)]);
        level.player_touched(ActorKind::Coin, Some(&coin_at(1.0, 1.0)));
        assert!(level.actors().is_empty());
        assert_eq!(level.status, LevelStatus::Won);
    }

    #[test]
    fn test_no_more_actors() {
        let empty = Level::new(Grid::default(), vec![]);
        assert!(empty.no_more_actors(ActorKind::Coin));

        let mut level = Level::new(Grid::default(), vec![coin_at(1.0, 1.0), boxed(4.0, 4.0)]);
        assert!(!level.no_more_actors(ActorKind::Coin));
        assert!(level.no_more_actors(ActorKind::Fireball));

        let coin = level.actors()[0].clone();
        level.remove_actor(&coin);
        assert!(level.no_more_actors(ActorKind::Coin));
    }

    #[test]
    fn test_lava_and_fireball_lose() {
        let mut level = Level::new(Grid::default(), vec![]);
        level.player_touched(Terrain::Lava, None);
        assert_eq!(level.status, LevelStatus::Lost);

        let mut level = Level::new(Grid::default(), vec![]);
        level.player_touched(ActorKind::Fireball, Some(&boxed(0.0, 0.0)));
        assert_eq!(level.status, LevelStatus::Lost);
    }

    #[test]
    fn test_wall_has_no_effect() {
        let mut level = Level::new(Grid::default(), vec![coin_at(1.0, 1.0)]);
        level.player_touched(Terrain::Wall, None);
        level.player_touched(ActorKind::Actor, Some(&boxed(0.0, 0.0)));
        assert_eq!(level.status, LevelStatus::InProgress);
        assert_eq!(level.actors().len(), 1);
    }

    #[test]
    fn test_coin_collection_wins() {
        let mut level = Level::new(Grid::default(), vec![coin_at(1.0, 1.0), coin_at(3.0, 1.0)]);

        let first = level.actors()[0].clone();
        level.player_touched(ActorKind::Coin, Some(&first));
        assert_eq!(level.actors().len(), 1);
        assert_eq!(level.status, LevelStatus::InProgress);

        let second = level.actors()[0].clone();
        level.player_touched(ActorKind::Coin, Some(&second));
        assert!(level.actors().is_empty());
        assert_eq!(level.status, LevelStatus::Won);
    }

    #[test]
    fn test_coin_contact_with_non_coin_actor() {
        let mut level = Level::new(Grid::default(), vec![coin_at(1.0, 1.0), boxed(1.0, 1.0)]);
        let other = level.actors()[1].clone();
        level.player_touched(ActorKind::Coin, Some(&other));
        assert_eq!(level.actors().len(), 2);
        assert_eq!(level.status, LevelStatus::InProgress);
    }

    #[test]
    fn test_lost_overwrites_won() {
        let mut level = Level::new(Grid::default(), vec![coin_at(1.0, 1.0)]);
        let coin = level.actors()[0].clone();
        level.player_touched(ActorKind::Coin, Some(&coin));
        assert_eq!(level.status, LevelStatus::Won);
        level.player_touched(Terrain::Lava, None);
        assert_eq!(level.status, LevelStatus::Lost);
    }

    #[test]
    fn test_finish_delay() {
        let mut level = Level::new(Grid::default(), vec![]);
        level.count_down(5.0);
        assert_eq!(level.finish_delay, FINISH_DELAY);
        assert!(!level.is_finished());

        level.player_touched(Terrain::Lava, None);
        assert!(!level.is_finished());
        level.count_down(0.6);
        assert!(!level.is_finished());
        level.count_down(0.6);
        assert!(level.is_finished());
        assert!(level.is_finished());
    }
}
