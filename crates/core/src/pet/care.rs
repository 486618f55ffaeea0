//! Pet care: stat bars, the item catalogue and worn accessories.

use serde::{Deserialize, Serialize};

use crate::config::PetCfg;
use crate::types::{Accessory, DisplayMood, ItemKind, Stat};

/// Stat value at or above which a bar counts as healthy.
const BAND_HIGH: u8 = 70;
/// Stat value at or above which a bar counts as middling.
const BAND_MEDIUM: u8 = 40;

/// Coarse health of a single stat bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatBand {
    High,
    Medium,
    Low,
}

pub fn band(value: u8) -> StatBand {
    if value >= BAND_HIGH {
        StatBand::High
    } else if value >= BAND_MEDIUM {
        StatBand::Medium
    } else {
        StatBand::Low
    }
}

/// The three stat bars, each in `0..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PetStats {
    pub happiness: u8,
    pub hunger: u8,
    pub energy: u8,
    max: u8,
}

impl Default for PetStats {
    fn default() -> Self {
        Self::from_cfg(&PetCfg::default())
    }
}

impl PetStats {
    pub fn from_cfg(cfg: &PetCfg) -> Self {
        let max = cfg.stat_max;
        Self {
            happiness: cfg.initial_happiness.min(max),
            hunger: cfg.initial_hunger.min(max),
            energy: cfg.initial_energy.min(max),
            max,
        }
    }

    pub fn get(&self, stat: Stat) -> u8 {
        match stat {
            Stat::Happiness => self.happiness,
            Stat::Hunger => self.hunger,
            Stat::Energy => self.energy,
        }
    }

    /// Raise a stat, saturating at the maximum. Returns the new value.
    pub fn boost(&mut self, stat: Stat, amount: u8) -> u8 {
        let max = self.max;
        let slot = match stat {
            Stat::Happiness => &mut self.happiness,
            Stat::Hunger => &mut self.hunger,
            Stat::Energy => &mut self.energy,
        };
        *slot = slot.saturating_add(amount).min(max);
        *slot
    }

    pub fn max(&self) -> u8 {
        self.max
    }

    pub fn average(&self) -> f32 {
        (self.happiness as f32 + self.hunger as f32 + self.energy as f32) / 3.0
    }

    /// Mood implied by the stat average.
    pub fn mood(&self, happy_threshold: f32, neutral_threshold: f32) -> DisplayMood {
        let average = self.average();
        if average >= happy_threshold {
            DisplayMood::Happy
        } else if average >= neutral_threshold {
            DisplayMood::Neutral
        } else {
            DisplayMood::Sad
        }
    }
}

/// A usable inventory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: ItemKind,
    pub icon: &'static str,
    pub effect: Option<Stat>,
    pub value: u8,
}

impl Item {
    /// Accessory worn when this item is used, if any.
    pub fn accessory(&self) -> Option<Accessory> {
        match self.name {
            "Bow" => Some(Accessory::Bow),
            "Crown" => Some(Accessory::Hat),
            "Star" => Some(Accessory::Star),
            _ => None,
        }
    }
}

const CATALOGUE: &[Item] = &[
    Item { id: "1", name: "Berry", kind: ItemKind::Food, icon: "🫐", effect: Some(Stat::Hunger), value: 20 },
    Item { id: "2", name: "Cookie", kind: ItemKind::Food, icon: "🍪", effect: Some(Stat::Happiness), value: 15 },
    Item { id: "3", name: "Energy Drink", kind: ItemKind::Food, icon: "⚡", effect: Some(Stat::Energy), value: 25 },
    Item { id: "4", name: "Bow", kind: ItemKind::Accessory, icon: "🎀", effect: Some(Stat::Happiness), value: 10 },
    Item { id: "5", name: "Crown", kind: ItemKind::Accessory, icon: "👑", effect: Some(Stat::Happiness), value: 15 },
    Item { id: "6", name: "Star", kind: ItemKind::Accessory, icon: "⭐", effect: Some(Stat::Happiness), value: 10 },
];

pub fn catalogue() -> &'static [Item] {
    CATALOGUE
}

/// Find an item by exact id or case-insensitive name.
pub fn find_item(key: &str) -> Option<&'static Item> {
    let key = key.trim();
    CATALOGUE
        .iter()
        .find(|item| item.id == key || item.name.eq_ignore_ascii_case(key))
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CareError {
    #[error("no item named '{0}'")]
    UnknownItem(String),
    #[error("'{0}' is not being worn")]
    NotWorn(String),
}

/// What using an item did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    Fed { stat: Stat, value: u8 },
    Wore { accessory: Accessory, stat: Option<Stat>, value: u8 },
    AlreadyWorn(Accessory),
}

/// Pet-care state: stats plus worn accessories.
#[derive(Debug, Clone)]
pub struct PetCare {
    stats: PetStats,
    accessories: Vec<Accessory>,
    happy_threshold: f32,
    neutral_threshold: f32,
}

impl Default for PetCare {
    fn default() -> Self {
        Self::new(&PetCfg::default())
    }
}

impl PetCare {
    pub fn new(cfg: &PetCfg) -> Self {
        Self {
            stats: PetStats::from_cfg(cfg),
            accessories: Vec::new(),
            happy_threshold: cfg.mood_happy_threshold,
            neutral_threshold: cfg.mood_neutral_threshold,
        }
    }

    pub fn stats(&self) -> &PetStats {
        &self.stats
    }

    pub fn accessories(&self) -> &[Accessory] {
        &self.accessories
    }

    pub fn mood(&self) -> DisplayMood {
        self.stats.mood(self.happy_threshold, self.neutral_threshold)
    }

    /// Use an item by id or name. Food always applies its effect; an
    /// accessory applies its effect only when first put on.
    pub fn use_item(&mut self, key: &str) -> Result<ItemOutcome, CareError> {
        let item = find_item(key).ok_or_else(|| CareError::UnknownItem(key.trim().to_owned()))?;
        let outcome = match item.kind {
            ItemKind::Food => {
                let stat = item.effect.unwrap_or(Stat::Hunger);
                let value = self.stats.boost(stat, item.value);
                ItemOutcome::Fed { stat, value }
            }
            ItemKind::Accessory => {
                let accessory = item
                    .accessory()
                    .ok_or_else(|| CareError::UnknownItem(item.name.to_owned()))?;
                if self.accessories.contains(&accessory) {
                    return Ok(ItemOutcome::AlreadyWorn(accessory));
                }
                self.accessories.push(accessory);
                let value = item
                    .effect
                    .map(|stat| self.stats.boost(stat, item.value))
                    .unwrap_or_default();
                ItemOutcome::Wore { accessory, stat: item.effect, value }
            }
        };
        tracing::debug!(item = item.name, ?outcome, "item used");
        Ok(outcome)
    }

    /// Take an accessory off. Stats are left as they are.
    pub fn remove_accessory(&mut self, name: &str) -> Result<Accessory, CareError> {
        let accessory = Accessory::parse(name)
            .filter(|a| self.accessories.contains(a))
            .ok_or_else(|| CareError::NotWorn(name.trim().to_owned()))?;
        self.accessories.retain(|a| *a != accessory);
        Ok(accessory)
    }

    /// Status line matching the current mood.
    pub fn status_line(&self) -> &'static str {
        match self.mood() {
            DisplayMood::Happy => "✨ Your pet is thriving and happy!",
            DisplayMood::Neutral => "💭 Your pet could use some attention.",
            DisplayMood::Sad => "💙 Your pet needs your care and love.",
        }
    }
}
