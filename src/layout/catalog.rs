//! Pixel layout of the 1920x1080 player card.
//!
//! Stats sit on a grid of 10 rows and 3 columns. Goalies use a subset of the
//! grid, skaters use most of it. All coordinates are calibrated against the
//! one supported capture size; any other size invalidates every bound.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::bounds::Bound;

pub const REQUIRED_WIDTH: u32 = 1920;
pub const REQUIRED_HEIGHT: u32 = 1080;

const ROW_1_PX: u32 = 430;
const ROW_2_PX: u32 = 460;
const ROW_3_PX: u32 = 495;
const ROW_4_PX: u32 = 525;
const ROW_5_PX: u32 = 550;
const ROW_6_PX: u32 = 694;
const ROW_7_PX: u32 = 725;
const ROW_8_PX: u32 = 752;
const ROW_9_PX: u32 = 786;
const ROW_10_PX: u32 = 812;

const COL_1_PX: u32 = 1085;
const COL_2_PX: u32 = 1377;
const COL_3_PX: u32 = 1670;

/// Heading text of the first stat group on a goalie card.
pub const GOALIE_PROBE_TEXT: &str = "HIGH";

/// The two attribute schemas a card can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Goalie,
    Skater,
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardType::Goalie => write!(f, "goalie"),
            CardType::Skater => write!(f, "skater"),
        }
    }
}

/// Complete field catalog for both card types.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    /// Read first; its text decides the card type.
    pub probe: Bound,
    pub name: Bound,
    pub height_feet: Bound,
    pub height_inches: Bound,
    pub metadata: Bound,
    pub synergies: [Bound; 2],
    pub goalie_stats: Vec<Bound>,
    pub skater_stats: Vec<Bound>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: REQUIRED_WIDTH,
            height: REQUIRED_HEIGHT,
            probe: Bound::text("first_category", 937, 376, 1137, 407),
            name: Bound::text("name", 693, 175, 1800, 246),
            height_feet: Bound::numeric_rect("height_ft", 700, 277, 723, 308),
            height_inches: Bound::height("height_inches", 730, 277, 767, 315),
            metadata: Bound::any("metadata", 695, 281, 1913, 320),
            synergies: [
                Bound::any("synergy_1", 771, 430, 905, 460),
                Bound::any("synergy_2", 771, 527, 905, 556),
            ],
            goalie_stats: goalie_stat_bounds(),
            skater_stats: skater_stat_bounds(),
        }
    }
}

impl Layout {
    /// Loads a layout from a JSON file. The file replaces the built-in
    /// layout entirely.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse layout file {}", path.display()))
    }

    /// Stat bounds for the given card type, in output order.
    pub fn stat_bounds(&self, card_type: CardType) -> &[Bound] {
        match card_type {
            CardType::Goalie => &self.goalie_stats,
            CardType::Skater => &self.skater_stats,
        }
    }
}

fn goalie_stat_bounds() -> Vec<Bound> {
    vec![
        // High
        Bound::numeric("glove_high", COL_1_PX, ROW_1_PX),
        Bound::numeric("stick_high", COL_1_PX, ROW_2_PX),
        // Low
        Bound::numeric("glove_low", COL_2_PX, ROW_1_PX),
        Bound::numeric("poke_check", COL_2_PX, ROW_2_PX),
        Bound::numeric("stick_low", COL_2_PX, ROW_3_PX),
        Bound::numeric("passing", COL_2_PX, ROW_4_PX),
        // Quickness
        Bound::numeric("speed", COL_3_PX, ROW_1_PX),
        Bound::numeric("vision", COL_3_PX, ROW_2_PX),
        Bound::numeric("agility", COL_3_PX, ROW_3_PX),
        // Position
        Bound::numeric("positioning", COL_1_PX, ROW_6_PX),
        Bound::numeric("five_hole", COL_1_PX, ROW_7_PX),
        Bound::numeric("breakaway", COL_1_PX, ROW_8_PX),
        // Rebound control
        Bound::numeric("aggression", COL_2_PX, ROW_6_PX),
        Bound::numeric("rebound_control", COL_2_PX, ROW_7_PX),
        Bound::numeric("shot_recovery", COL_2_PX, ROW_8_PX),
    ]
}

fn skater_stat_bounds() -> Vec<Bound> {
    vec![
        // Skating
        Bound::numeric("acceleration", COL_1_PX, ROW_1_PX),
        Bound::numeric("agility", COL_1_PX, ROW_2_PX),
        Bound::numeric("balance", COL_1_PX, ROW_3_PX),
        Bound::numeric("endurance", COL_1_PX, ROW_4_PX),
        Bound::numeric("speed", COL_1_PX, ROW_5_PX),
        // Shooting
        Bound::numeric("slap_shot_accuracy", COL_2_PX, ROW_1_PX),
        Bound::numeric("slap_shot_power", COL_2_PX, ROW_2_PX),
        Bound::numeric("wrist_shot_accuracy", COL_2_PX, ROW_3_PX),
        Bound::numeric("wrist_shot_power", COL_2_PX, ROW_4_PX),
        // Hands
        Bound::numeric("deking", COL_3_PX, ROW_1_PX),
        Bound::numeric("off_awareness", COL_3_PX, ROW_2_PX),
        Bound::numeric("hand_eye", COL_3_PX, ROW_3_PX),
        Bound::numeric("passing", COL_3_PX, ROW_4_PX),
        Bound::numeric("puck_control", COL_3_PX, ROW_5_PX),
        // Physicality
        Bound::numeric("body_checking", COL_1_PX, ROW_6_PX),
        Bound::numeric("strength", COL_1_PX, ROW_7_PX),
        Bound::numeric("aggression", COL_1_PX, ROW_8_PX),
        Bound::numeric("durability", COL_1_PX, ROW_9_PX),
        Bound::numeric("fighting_skill", COL_1_PX, ROW_10_PX),
        // Defense
        Bound::numeric("def_awareness", COL_2_PX, ROW_6_PX),
        Bound::numeric("shot_blocking", COL_2_PX, ROW_7_PX),
        Bound::numeric("stick_checking", COL_2_PX, ROW_8_PX),
        Bound::numeric("faceoffs", COL_2_PX, ROW_9_PX),
        Bound::numeric("discipline", COL_2_PX, ROW_10_PX),
    ]
}
