use crate::model::StatusCondition;
use crate::sim::combatant::Combatant;

/// End-of-turn damage caused by the combatant's status. The caller applies it and advances the
/// bad-poison counter.
pub fn status_damage(combatant: &Combatant) -> u32 {
    let eighth = combatant.max_hp() / 8;
    match combatant.status {
        Some(StatusCondition::Burn) | Some(StatusCondition::Poison) => eighth,
        Some(StatusCondition::BadlyPoisoned) => {
            eighth.saturating_mul(combatant.bad_poison_counter.max(1) as u32)
        }
        Some(StatusCondition::Paralysis)
        | Some(StatusCondition::Sleep)
        | Some(StatusCondition::Freeze)
        | None => 0,
    }
}
