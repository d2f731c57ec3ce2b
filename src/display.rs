//! Display collaborator
//!
//! Displays only read the level (grid plus actors). [`TextDisplay`] draws a
//! character frame, handy for logs and the headless driver.

use crate::sim::{ActorKind, Behavior, Level, ObstacleResponse, Terrain};

/// Consumes the current level once per frame
pub trait Display {
    fn draw(&mut self, level: &Level);
}

/// Renders levels as text, one character per tile
#[derive(Debug, Default, Clone)]
pub struct TextDisplay {
    frame: String,
}

impl TextDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last drawn frame
    pub fn frame(&self) -> &str {
        &self.frame
    }
}

fn terrain_glyph(cell: Option<Terrain>) -> char {
    match cell {
        Some(Terrain::Wall) => 'x',
        Some(Terrain::Lava) => '!',
        None => ' ',
    }
}

impl Display for TextDisplay {
    fn draw(&mut self, level: &Level) {
        let (width, height) = (level.width(), level.height());
        let mut cells: Vec<Vec<char>> = (0..height)
            .map(|y| (0..width).map(|x| terrain_glyph(level.grid().cell(x, y))).collect())
            .collect();

        for actor in level.actors() {
            let glyph = match (actor.kind(), &actor.behavior) {
                (ActorKind::Player, _) => '@',
                (ActorKind::Coin, _) => 'o',
                (_, Behavior::Fireball(f)) if f.response == ObstacleResponse::Reset => 'v',
                (ActorKind::Fireball, _) if actor.speed.x != 0.0 => '=',
                (ActorKind::Fireball, _) => '|',
                _ => '#',
            };
            // Anchor at the box's bottom-left tile so the player shows at its feet
            let x = actor.left().floor();
            let y = (actor.bottom() - 0.5).floor();
            if x < 0.0 || y < 0.0 {
                continue;
            }
            if let Some(cell) = cells
                .get_mut(y as usize)
                .and_then(|row| row.get_mut(x as usize))
            {
                *cell = glyph;
            }
        }

        self.frame = cells
            .into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
    }
}
