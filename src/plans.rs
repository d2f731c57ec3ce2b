//! Level plan source
//!
//! Plans are stored as a JSON array of levels, each level an array of row
//! strings:
//!
//! ```json
//! [["     ", " @ o ", "xxxxx"], ["..."]]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// One level: rows of symbols, top to bottom
pub type Plan = Vec<String>;

/// Ordered list of level plans
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelPlans {
    levels: Vec<Plan>,
}

impl LevelPlans {
    pub fn new(levels: Vec<Plan>) -> Self {
        Self { levels }
    }

    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let plans: Self = serde_json::from_str(json)?;
        log::info!("Loaded {} level plans", plans.len());
        Ok(plans)
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Demo levels bundled with the engine
    pub fn builtin() -> Self {
        let levels: [&[&str]; 3] = [
            &[
                "                      ",
                "                      ",
                "  |                   ",
                "                  o   ",
                "     !xxxxx       =   ",
                "  @                   ",
                "xxxxx                 ",
                "                      ",
            ],
            &[
                "     v                 ",
                "                       ",
                "                       ",
                "                       ",
                "                       ",
                "  |                    ",
                "  o                 o  ",
                "  x               = x  ",
                "  x          o o    x  ",
                "  x  @       xxxxx  x  ",
                "  xxxxx             x  ",
                "      x!!!!!!!!!!!!!x  ",
                "      xxxxxxxxxxxxxxx  ",
                "                       ",
            ],
            &[
                "        |           |  ",
                "                       ",
                "                       ",
                "                       ",
                "                       ",
                "                       ",
                "                       ",
                "                       ",
                "                       ",
                "     |                 ",
                "                       ",
                "         =      |      ",
                " @ |  o            o   ",
                "xxxxxxxxx!!!!!!!xxxxxxx",
                "                       ",
            ],
        ];
        Self::new(
            levels
                .iter()
                .map(|rows| rows.iter().map(|row| row.to_string()).collect())
                .collect(),
        )
    }

    pub fn get(&self, index: usize) -> Option<&[String]> {
        self.levels.get(index).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Plan> {
        self.levels.iter()
    }
}
