use crate::model::{Move, MoveCategory};
use crate::rng::RandomSource;
use crate::sim::combatant::Combatant;
use crate::sim::stats::EffectiveStats;
use crate::tables::{CombatTables, Weather};

pub const STAB_MULTIPLIER: f64 = 1.5;
pub const CRIT_MULTIPLIER: f64 = 1.5;
pub const CRIT_CHANCE: f64 = 1.0 / 16.0;
pub const RANDOM_DAMAGE_RANGE: (f64, f64) = (0.85, 1.0);

/// Lookup data and field state a damage roll reads.
#[derive(Clone, Copy, Debug)]
pub struct DamageEnv<'a> {
    pub tables: &'a CombatTables,
    pub weather: Option<Weather>,
}

impl<'a> DamageEnv<'a> {
    pub fn new(tables: &'a CombatTables) -> Self {
        Self {
            tables,
            weather: None,
        }
    }

    pub fn with_weather(mut self, weather: Option<Weather>) -> Self {
        self.weather = weather;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageRoll {
    pub damage: u32,
    pub critical: bool,
    /// Product of the type matchups against every defender type.
    pub effectiveness: f64,
}

pub fn is_stab(attacker: &Combatant, mv: &Move) -> bool {
    attacker.has_type(&mv.move_type)
}

/// Level/power/stat part of the formula, before any multiplier.
pub fn base_damage(level: u8, power: u16, attack: f64, defense: f64) -> f64 {
    let level = level as f64;
    ((2.0 * level / 5.0 + 2.0) * power as f64 * (attack / defense)) / 50.0 + 2.0
}

/// Full damage roll. Multipliers are applied in a fixed order and the result is floored once at
/// the end: STAB, type matchup, critical hit, weather, held item, ability, random variance.
///
/// Status moves (power 0) deal 0 and draw nothing. Any other move deals at least 1.
pub fn roll_damage(
    attacker: &Combatant,
    defender: &Combatant,
    mv: &Move,
    attacker_stats: &EffectiveStats,
    defender_stats: &EffectiveStats,
    env: &DamageEnv<'_>,
    rng: &mut impl RandomSource,
) -> DamageRoll {
    let effectiveness = env
        .tables
        .type_chart
        .against(&mv.move_type, &defender.types);
    if !mv.is_damaging() {
        return DamageRoll {
            damage: 0,
            critical: false,
            effectiveness,
        };
    }

    let (attack, defense) = match mv.category {
        MoveCategory::Physical => (attacker_stats.atk, defender_stats.def),
        MoveCategory::Special | MoveCategory::Status => (attacker_stats.spa, defender_stats.spd),
    };
    let mut damage = base_damage(attacker.level, mv.power, attack, defense);

    if is_stab(attacker, mv) {
        damage *= STAB_MULTIPLIER;
    }
    damage *= effectiveness;

    let critical = rng.next_unit() < CRIT_CHANCE;
    if critical {
        damage *= CRIT_MULTIPLIER;
    }

    damage *= env.tables.weather_multiplier(env.weather, &mv.move_type);
    if let Some(item) = attacker.held_item.as_deref() {
        damage *= env.tables.item_multiplier(item);
    }
    if let Some(ability) = attacker.ability.as_deref() {
        damage *= env.tables.ability_multiplier(ability);
    }

    let (low, high) = RANDOM_DAMAGE_RANGE;
    damage *= low + rng.next_unit() * (high - low);

    DamageRoll {
        damage: (damage.floor() as u32).max(1),
        critical,
        effectiveness,
    }
}

pub fn compute_damage(
    attacker: &Combatant,
    defender: &Combatant,
    mv: &Move,
    attacker_stats: &EffectiveStats,
    defender_stats: &EffectiveStats,
    env: &DamageEnv<'_>,
    rng: &mut impl RandomSource,
) -> u32 {
    roll_damage(attacker, defender, mv, attacker_stats, defender_stats, env, rng).damage
}
