//! Immutable lookup data consumed by the calculators.
//!
//! [`CombatTables::standard`] is built once per process and shared by reference. Tests and callers
//! that want a different rule set build their own [`CombatTables`] and pass that in instead.

use crate::error::Result;
use crate::model::normalize_id;
use crate::types::TypeChart;
use once_cell::sync::Lazy;
use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Stage -6..=+6 mapped to index 0..=12.
pub const STANDARD_STAGE_MULTIPLIERS: [f64; 13] = [
    0.25, 0.2857, 0.333, 0.4, 0.5, 0.667, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0,
];

pub const STAGE_MIN: i8 = -6;
pub const STAGE_MAX: i8 = 6;

pub const WEATHER_BOOST: f64 = 1.5;

static ITEM_BONUSES: phf::Map<&'static str, f64> = phf_map! {
    "assaultvest" => 1.1,
    "choicespecs" => 1.5,
    "choiceband" => 1.5,
    "lifeorb" => 1.3,
};

static ABILITY_BONUSES: phf::Map<&'static str, f64> = phf_map! {
    "adaptability" => 2.0,
    "technician" => 1.5,
    "moxie" => 1.2,
};

static STANDARD: Lazy<CombatTables> = Lazy::new(CombatTables::build_standard);

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Sun,
    Rain,
    Sand,
    Hail,
}

impl Weather {
    pub fn from_name(name: &str) -> Option<Self> {
        match normalize_id(name).as_str() {
            "sun" | "sunnyday" | "harshsunlight" => Some(Weather::Sun),
            "rain" | "raindance" => Some(Weather::Rain),
            "sand" | "sandstorm" => Some(Weather::Sand),
            "hail" | "snow" => Some(Weather::Hail),
            _ => None,
        }
    }

    /// Move type this weather powers up, if any.
    pub fn boosted_type(self) -> Option<&'static str> {
        match self {
            Weather::Sun => Some("fire"),
            Weather::Rain => Some("water"),
            Weather::Sand | Weather::Hail => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CombatTables {
    pub type_chart: TypeChart,
    pub stage_multipliers: [f64; 13],
    pub item_bonuses: HashMap<String, f64>,
    pub ability_bonuses: HashMap<String, f64>,
}

impl Default for CombatTables {
    fn default() -> Self {
        CombatTables::standard().clone()
    }
}

impl CombatTables {
    /// Shared standard tables.
    pub fn standard() -> &'static CombatTables {
        &STANDARD
    }

    fn build_standard() -> Self {
        Self {
            type_chart: TypeChart::standard(),
            stage_multipliers: STANDARD_STAGE_MULTIPLIERS,
            item_bonuses: ITEM_BONUSES
                .entries()
                .map(|(name, bonus)| (name.to_string(), *bonus))
                .collect(),
            ability_bonuses: ABILITY_BONUSES
                .entries()
                .map(|(name, bonus)| (name.to_string(), *bonus))
                .collect(),
        }
    }

    /// Parses tables from JSON. Sections left out keep their standard values.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let mut tables: CombatTables = serde_json::from_str(raw)?;
        tables.item_bonuses = normalize_keys(tables.item_bonuses);
        tables.ability_bonuses = normalize_keys(tables.ability_bonuses);
        Ok(tables)
    }

    pub fn from_json_path(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read tables file at {}", path.display()))?;
        let tables = Self::from_json_str(&raw)
            .with_context(|| format!("Failed to parse tables from {}", path.display()))?;
        Ok(tables)
    }

    /// Multiplier for a stat stage. Stages outside -6..=6 are treated as neutral.
    pub fn stage_multiplier(&self, stage: i8) -> f64 {
        if !(STAGE_MIN..=STAGE_MAX).contains(&stage) {
            return 1.0;
        }
        self.stage_multipliers[(stage - STAGE_MIN) as usize]
    }

    pub fn item_multiplier(&self, item: &str) -> f64 {
        self.item_bonuses
            .get(&normalize_id(item))
            .copied()
            .unwrap_or(1.0)
    }

    pub fn ability_multiplier(&self, ability: &str) -> f64 {
        self.ability_bonuses
            .get(&normalize_id(ability))
            .copied()
            .unwrap_or(1.0)
    }

    pub fn weather_multiplier(&self, weather: Option<Weather>, move_type: &str) -> f64 {
        match weather.and_then(Weather::boosted_type) {
            Some(boosted) if boosted.eq_ignore_ascii_case(move_type.trim()) => WEATHER_BOOST,
            _ => 1.0,
        }
    }
}

fn normalize_keys(map: HashMap<String, f64>) -> HashMap<String, f64> {
    map.into_iter()
        .map(|(name, bonus)| (normalize_id(&name), bonus))
        .collect()
}

/// Accuracy-stage table of the ruleset: (3 + n) / 3 when raised, 3 / (3 - n) when lowered.
pub fn accuracy_stage_multiplier(stage: i8) -> f64 {
    let stage = stage.clamp(STAGE_MIN, STAGE_MAX) as f64;
    if stage >= 0.0 {
        (3.0 + stage) / 3.0
    } else {
        3.0 / (3.0 - stage)
    }
}
