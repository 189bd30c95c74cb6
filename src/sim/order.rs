use crate::model::Move;
use crate::rng::RandomSource;
use crate::sim::stats::EffectiveStats;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOrder {
    AttackerFirst,
    DefenderFirst,
}

/// How equal speeds at equal priority are settled.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedTieRule {
    /// The side passed as the attacker moves first.
    #[default]
    FavorAttacker,
    /// One draw from the battle's random source.
    CoinFlip,
}

impl SpeedTieRule {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "attacker" | "favor_attacker" => Some(SpeedTieRule::FavorAttacker),
            "coin" | "coin_flip" | "random" => Some(SpeedTieRule::CoinFlip),
            _ => None,
        }
    }
}

/// Higher priority first, then higher speed. Draws only on a true tie under
/// [`SpeedTieRule::CoinFlip`].
pub fn resolve_order(
    attacker: &EffectiveStats,
    defender: &EffectiveStats,
    attacker_move: &Move,
    defender_move: &Move,
    tie_rule: SpeedTieRule,
    rng: &mut impl RandomSource,
) -> TurnOrder {
    if attacker_move.priority != defender_move.priority {
        return if attacker_move.priority > defender_move.priority {
            TurnOrder::AttackerFirst
        } else {
            TurnOrder::DefenderFirst
        };
    }
    if attacker.spe > defender.spe {
        return TurnOrder::AttackerFirst;
    }
    if attacker.spe < defender.spe {
        return TurnOrder::DefenderFirst;
    }
    match tie_rule {
        SpeedTieRule::FavorAttacker => TurnOrder::AttackerFirst,
        SpeedTieRule::CoinFlip if rng.next_unit() < 0.5 => TurnOrder::AttackerFirst,
        SpeedTieRule::CoinFlip => TurnOrder::DefenderFirst,
    }
}
