//! Secondary move effects.
//!
//! These functions mutate the combatant they are given: status fields for status effects and
//! stage fields for stat effects. Nothing else is touched.

use crate::model::{Effect, EffectKind, EffectTarget, Stat, StatusCondition};
use crate::rng::RandomSource;
use crate::sim::combatant::Combatant;
use serde::Serialize;

pub const SLEEP_TURNS: (u32, u32) = (1, 3);

/// What an effect actually changed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EffectChange {
    Status { status: StatusCondition },
    /// `change` is the clamped delta, so 0 when the stage was already at its limit.
    Stage { stat: Stat, change: i8 },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AppliedEffect {
    pub effect: Effect,
    pub change: EffectChange,
}

/// Sets `status`, replacing any previous one and resetting its counters.
pub fn apply_status(target: &mut Combatant, status: StatusCondition, rng: &mut impl RandomSource) {
    target.clear_status();
    match status {
        StatusCondition::Sleep => {
            let (low, high) = SLEEP_TURNS;
            target.sleep_turns = rng.next_in(low, high) as u8;
        }
        StatusCondition::BadlyPoisoned => target.bad_poison_counter = 1,
        _ => {}
    }
    target.status = Some(status);
}

pub fn apply_stage_change(target: &mut Combatant, stat: Stat, delta: i8) -> i8 {
    target.stages.adjust(stat, delta)
}

/// Rolls the trigger chance, then applies the effect to the side it names.
///
/// Unknown status or stat names are skipped, as is an effect aimed at a fainted combatant.
pub fn apply_effect(
    effect: &Effect,
    user: &mut Combatant,
    opponent: &mut Combatant,
    rng: &mut impl RandomSource,
) -> Option<AppliedEffect> {
    if rng.next_unit() >= effect.trigger_chance() {
        return None;
    }
    let target = match effect.target {
        EffectTarget::User => user,
        EffectTarget::Opponent => opponent,
    };
    if target.is_fainted() {
        return None;
    }
    let change = match &effect.kind {
        EffectKind::Status { status } => {
            let Some(status) = StatusCondition::from_name(status) else {
                tracing::warn!(status = %status, "ignoring unknown status in move effect");
                return None;
            };
            apply_status(target, status, rng);
            EffectChange::Status { status }
        }
        EffectKind::Stat { stat, change } => {
            let Some(stat) = Stat::from_name(stat) else {
                tracing::warn!(stat = %stat, "ignoring unknown stat in move effect");
                return None;
            };
            let change = apply_stage_change(target, stat, *change);
            EffectChange::Stage { stat, change }
        }
    };
    Some(AppliedEffect {
        effect: effect.clone(),
        change,
    })
}
