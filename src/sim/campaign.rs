//! Level sequencing
//!
//! Plays plans in order: a lost level restarts, a won level advances, and
//! winning the last plan completes the campaign.

use super::level::{Level, LevelStatus};
use super::parser::LevelParser;
use super::tick::{GameEvent, tick_with_step};
use crate::consts::MAX_STEP;
use crate::plans::LevelPlans;

/// Result of a campaign update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignProgress {
    /// Current level still running (or waiting out its finish delay)
    Playing,
    /// Current level was lost and has been re-parsed
    Restarted { index: usize },
    /// Moved on to the next plan
    Advanced { index: usize },
    /// Every plan has been won
    Completed,
}

pub struct Campaign {
    plans: LevelPlans,
    parser: LevelParser,
    index: usize,
    level: Level,
    max_step: f64,
    completed: bool,
    attempts: u32,
}

impl Campaign {
    /// Start at the first plan; `None` when there are no plans
    pub fn new(plans: LevelPlans, parser: LevelParser) -> Option<Self> {
        let level = parser.parse(plans.get(0)?);
        log::info!("Campaign started with {} levels", plans.len());
        Some(Self {
            plans,
            parser,
            index: 0,
            level,
            max_step: MAX_STEP,
            completed: false,
            attempts: 1,
        })
    }

    pub fn with_max_step(mut self, max_step: f64) -> Self {
        self.max_step = max_step;
        self
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    /// For the run loop that drives the player
    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Attempts at the current level, including the current one
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Tick the current level and handle a finished one
    pub fn update(&mut self, dt: f64) -> (CampaignProgress, Vec<GameEvent>) {
        if self.completed {
            return (CampaignProgress::Completed, Vec::new());
        }

        let events = tick_with_step(&mut self.level, dt, self.max_step);
        if !self.level.is_finished() {
            return (CampaignProgress::Playing, events);
        }

        let progress = match self.level.status {
            LevelStatus::Lost => {
                self.attempts += 1;
                log::info!("Level {} lost, attempt {}", self.index + 1, self.attempts);
                self.load(self.index);
                CampaignProgress::Restarted { index: self.index }
            }
            LevelStatus::Won if self.index + 1 < self.plans.len() => {
                self.index += 1;
                self.attempts = 1;
                log::info!("Advancing to level {}", self.index + 1);
                self.load(self.index);
                CampaignProgress::Advanced { index: self.index }
            }
            LevelStatus::Won => {
                log::info!("All {} levels won", self.plans.len());
                self.completed = true;
                CampaignProgress::Completed
            }
            LevelStatus::InProgress => CampaignProgress::Playing,
        };
        (progress, events)
    }

    fn load(&mut self, index: usize) {
        if let Some(plan) = self.plans.get(index) {
            self.level = self.parser.parse(plan);
        }
    }
}
