//! Output columns per card type and the record that fills them.

use std::collections::HashMap;

use crate::layout::{CardType, Layout};

/// Columns shared by both card types, ahead of the stat columns.
pub const SHARED_COLUMNS: [&str; 9] = [
    "first_name",
    "last_name",
    "height",
    "weight",
    "handedness",
    "nationality",
    "age",
    "salary",
    "synergies",
];

/// The metadata block fills these columns, in order.
pub const METADATA_COLUMNS: [&str; 5] = ["weight", "handedness", "nationality", "age", "salary"];

/// Ordered output column names for each card type.
///
/// Names come from the shared fields and the stat bound categories, then go
/// through an optional alias map so output columns can be renamed without
/// touching the layout.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertySchema {
    goalie: Vec<String>,
    skater: Vec<String>,
}

impl PropertySchema {
    pub fn new(layout: &Layout, aliases: &HashMap<String, String>) -> Self {
        let build = |card_type: CardType| -> Vec<String> {
            SHARED_COLUMNS
                .iter()
                .copied()
                .chain(layout.stat_bounds(card_type).iter().map(|b| b.category.as_str()))
                .map(|name| aliases.get(name).cloned().unwrap_or_else(|| name.to_string()))
                .collect()
        };

        Self {
            goalie: build(CardType::Goalie),
            skater: build(CardType::Skater),
        }
    }

    pub fn columns(&self, card_type: CardType) -> &[String] {
        match card_type {
            CardType::Goalie => &self.goalie,
            CardType::Skater => &self.skater,
        }
    }
}

/// One extracted card: its type and the values aligned with the schema
/// columns for that type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractedCardStats {
    card_type: CardType,
    values: Vec<String>,
}

impl ExtractedCardStats {
    pub fn new(card_type: CardType, values: Vec<String>) -> Self {
        Self { card_type, values }
    }

    pub fn card_type(&self) -> CardType {
        self.card_type
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}
