use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCondition {
    Burn,
    Poison,
    BadlyPoisoned,
    Paralysis,
    Sleep,
    Freeze,
}

impl StatusCondition {
    /// Parses a status name from move data. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match normalize_id(name).as_str() {
            "burn" | "brn" => Some(StatusCondition::Burn),
            "poison" | "psn" => Some(StatusCondition::Poison),
            "badlypoisoned" | "tox" | "toxic" => Some(StatusCondition::BadlyPoisoned),
            "paralysis" | "par" => Some(StatusCondition::Paralysis),
            "sleep" | "slp" => Some(StatusCondition::Sleep),
            "freeze" | "frz" => Some(StatusCondition::Freeze),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusCondition::Burn => "burn",
            StatusCondition::Poison => "poison",
            StatusCondition::BadlyPoisoned => "badly_poisoned",
            StatusCondition::Paralysis => "paralysis",
            StatusCondition::Sleep => "sleep",
            StatusCondition::Freeze => "freeze",
        }
    }
}

/// Stats that carry a battle stage.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
    Accuracy,
    Evasion,
}

impl Stat {
    pub fn from_name(name: &str) -> Option<Self> {
        match normalize_id(name).as_str() {
            "atk" | "attack" => Some(Stat::Atk),
            "def" | "defense" => Some(Stat::Def),
            "spa" | "specialattack" => Some(Stat::Spa),
            "spd" | "specialdefense" => Some(Stat::Spd),
            "spe" | "speed" => Some(Stat::Spe),
            "acc" | "accuracy" => Some(Stat::Accuracy),
            "eva" | "evasion" => Some(Stat::Evasion),
            _ => None,
        }
    }

    /// Name used in log lines.
    pub fn display_name(self) -> &'static str {
        match self {
            Stat::Atk => "Attack",
            Stat::Def => "Defense",
            Stat::Spa => "Sp. Atk",
            Stat::Spd => "Sp. Def",
            Stat::Spe => "Speed",
            Stat::Accuracy => "accuracy",
            Stat::Evasion => "evasiveness",
        }
    }
}

/// Per-stat block used for base stats, IVs and EVs.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StatBlock {
    #[serde(default)]
    pub hp: u16,
    #[serde(default)]
    pub atk: u16,
    #[serde(default)]
    pub def: u16,
    #[serde(default)]
    pub spa: u16,
    #[serde(default)]
    pub spd: u16,
    #[serde(default)]
    pub spe: u16,
}

impl StatBlock {
    pub fn uniform(value: u16) -> Self {
        Self {
            hp: value,
            atk: value,
            def: value,
            spa: value,
            spd: value,
            spe: value,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesProfile {
    pub species_id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub base_stats: StatBlock,
    #[serde(default)]
    pub abilities: Vec<String>,
    #[serde(default)]
    pub learnset: Vec<String>,
}

impl SpeciesProfile {
    /// Stand-in for a species the data provider does not know: zero base stats and no types.
    pub fn unknown(species_id: u32) -> Self {
        Self {
            species_id,
            name: format!("#{species_id}"),
            types: Vec::new(),
            base_stats: StatBlock::default(),
            abilities: Vec::new(),
            learnset: Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectTarget {
    #[serde(alias = "user")]
    #[serde(rename = "self")]
    User,
    #[default]
    Opponent,
}

/// Payload of a secondary effect. Names stay as authored; they are resolved when applied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EffectKind {
    Status { status: String },
    Stat { stat: String, change: i8 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    #[serde(flatten)]
    pub kind: EffectKind,
    /// Trigger chance in [0, 1]; `None` always triggers.
    #[serde(default)]
    pub chance: Option<f64>,
    #[serde(default)]
    pub target: EffectTarget,
}

impl Effect {
    pub fn status(status: &str) -> Self {
        Self {
            kind: EffectKind::Status {
                status: status.to_string(),
            },
            chance: None,
            target: EffectTarget::Opponent,
        }
    }

    pub fn stat(stat: &str, change: i8) -> Self {
        Self {
            kind: EffectKind::Stat {
                stat: stat.to_string(),
                change,
            },
            chance: None,
            target: EffectTarget::Opponent,
        }
    }

    pub fn with_chance(mut self, chance: f64) -> Self {
        self.chance = Some(chance);
        self
    }

    pub fn on_user(mut self) -> Self {
        self.target = EffectTarget::User;
        self
    }

    pub fn trigger_chance(&self) -> f64 {
        self.chance.unwrap_or(1.0)
    }
}

fn default_accuracy() -> u8 {
    100
}

fn default_pp() -> u8 {
    10
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: String,
    pub category: MoveCategory,
    #[serde(default)]
    pub power: u16,
    /// Percent; 0 never misses.
    #[serde(default = "default_accuracy")]
    pub accuracy: u8,
    #[serde(default)]
    pub priority: i8,
    #[serde(default = "default_pp")]
    pub pp: u8,
    #[serde(default)]
    pub effects: Vec<Effect>,
}

impl Move {
    pub fn new(name: &str, move_type: &str, category: MoveCategory, power: u16, accuracy: u8) -> Self {
        Self {
            name: name.to_string(),
            move_type: move_type.to_string(),
            category,
            power,
            accuracy,
            priority: 0,
            pp: default_pp(),
            effects: Vec::new(),
        }
    }

    pub fn with_priority(mut self, priority: i8) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Used by a side that has no usable move left.
    pub fn struggle() -> Self {
        Self::new("Struggle", "typeless", MoveCategory::Physical, 50, 0)
    }

    pub fn is_damaging(&self) -> bool {
        self.power > 0
    }
}

pub(crate) fn normalize_id(name: &str) -> String {
    name.to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_defaults_follow_data_conventions() {
        let mv: Move = serde_json::from_str(
            r#"{"name": "Growl", "type": "normal", "category": "status",
                "effects": [{"type": "stat", "stat": "atk", "change": -1}]}"#,
        )
        .expect("move parses");
        assert_eq!(mv.power, 0);
        assert_eq!(mv.accuracy, 100);
        assert_eq!(mv.priority, 0);
        assert_eq!(mv.effects.len(), 1);
        assert_eq!(mv.effects[0].target, EffectTarget::Opponent);
        assert_eq!(mv.effects[0].trigger_chance(), 1.0);
    }

    #[test]
    fn effect_target_accepts_self_and_user() {
        let a: Effect =
            serde_json::from_str(r#"{"type": "stat", "stat": "atk", "change": 2, "target": "self"}"#)
                .expect("effect");
        let b: Effect =
            serde_json::from_str(r#"{"type": "stat", "stat": "atk", "change": 2, "target": "user"}"#)
                .expect("effect");
        assert_eq!(a.target, EffectTarget::User);
        assert_eq!(b.target, EffectTarget::User);
    }

    #[test]
    fn status_names_resolve_loosely() {
        assert_eq!(StatusCondition::from_name("badly_poisoned"), Some(StatusCondition::BadlyPoisoned));
        assert_eq!(StatusCondition::from_name("Burn"), Some(StatusCondition::Burn));
        assert_eq!(StatusCondition::from_name("confusion"), None);
        assert_eq!(Stat::from_name("Special Attack"), Some(Stat::Spa));
        assert_eq!(Stat::from_name("luck"), None);
    }

    #[test]
    fn unknown_species_has_zero_stats() {
        let profile = SpeciesProfile::unknown(999);
        assert_eq!(profile.base_stats, StatBlock::default());
        assert!(profile.types.is_empty());
    }
}
