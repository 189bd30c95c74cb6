use crate::model::Move;
use crate::rng::RandomSource;
use crate::sim::combatant::Combatant;
use crate::tables::accuracy_stage_multiplier;

/// Probability in [0, 1] that `mv` lands, or `None` for moves that never miss.
pub fn hit_chance(mv: &Move, attacker: &Combatant, defender: &Combatant) -> Option<f64> {
    if mv.accuracy == 0 {
        return None;
    }
    let accuracy = accuracy_stage_multiplier(attacker.stages.accuracy);
    let evasion = accuracy_stage_multiplier(defender.stages.evasion.saturating_neg());
    Some((mv.accuracy as f64 / 100.0) * accuracy * evasion)
}

/// Rolls accuracy. Never-miss moves consume no draw.
pub fn check_hit(
    mv: &Move,
    attacker: &Combatant,
    defender: &Combatant,
    rng: &mut impl RandomSource,
) -> bool {
    match hit_chance(mv, attacker, defender) {
        None => true,
        Some(chance) => rng.next_unit() < chance,
    }
}
