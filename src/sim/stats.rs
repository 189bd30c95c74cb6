use crate::model::{SpeciesProfile, Stat};
use crate::sim::combatant::Combatant;
use crate::tables::CombatTables;

/// Battle stat from species base, level, IV and EV. HP uses the same formula.
///
/// A base of 0 yields 1, which is also what every stat of an unknown species becomes.
pub fn derive_stat(base: u16, level: u8, iv: u16, ev: u16) -> u32 {
    if base == 0 {
        return 1;
    }
    let base_value = 2 * base as u32 + iv as u32 + ev as u32 / 4;
    let stat = base_value * level as u32 / 100 + level as u32 + 5;
    stat.max(1)
}

/// Stats after stage multipliers. Non-HP stats are fractional once a stage is applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectiveStats {
    pub hp: u32,
    pub atk: f64,
    pub def: f64,
    pub spa: f64,
    pub spd: f64,
    pub spe: f64,
}

pub fn effective_stats(
    combatant: &Combatant,
    profile: &SpeciesProfile,
    tables: &CombatTables,
) -> EffectiveStats {
    let base = profile.base_stats;
    let level = combatant.level;
    let ivs = combatant.ivs;
    let evs = combatant.evs;
    let staged = |base_stat: u16, iv: u16, ev: u16, stat: Stat| {
        derive_stat(base_stat, level, iv, ev) as f64 * tables.stage_multiplier(combatant.stages.get(stat))
    };
    EffectiveStats {
        hp: derive_stat(base.hp, level, ivs.hp, evs.hp),
        atk: staged(base.atk, ivs.atk, evs.atk, Stat::Atk),
        def: staged(base.def, ivs.def, evs.def, Stat::Def),
        spa: staged(base.spa, ivs.spa, evs.spa, Stat::Spa),
        spd: staged(base.spd, ivs.spd, evs.spd, Stat::Spd),
        spe: staged(base.spe, ivs.spe, evs.spe, Stat::Spe),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StatBlock;

    #[test]
    fn zero_base_is_always_one() {
        for level in [1u8, 50, 100] {
            for iv in [0u16, 31] {
                for ev in [0u16, 252] {
                    assert_eq!(derive_stat(0, level, iv, ev), 1);
                }
            }
        }
    }

    #[test]
    fn level_50_attack_scenario() {
        assert_eq!(derive_stat(100, 50, 31, 0), 170);
    }

    #[test]
    fn evs_count_in_quarters() {
        assert_eq!(derive_stat(100, 100, 31, 252), derive_stat(100, 100, 31, 0) + 63);
        assert_eq!(derive_stat(100, 100, 0, 3), derive_stat(100, 100, 0, 0));
    }

    #[test]
    fn stages_scale_everything_but_hp() {
        let profile = SpeciesProfile {
            species_id: 1,
            name: "Testmon".to_string(),
            types: vec!["normal".to_string()],
            base_stats: StatBlock::uniform(100),
            abilities: Vec::new(),
            learnset: Vec::new(),
        };
        let mut mon = Combatant::new(&profile, 50, StatBlock::uniform(31), StatBlock::default())
            .expect("valid level");
        mon.stages.atk = 2;
        mon.stages.def = -1;
        let stats = effective_stats(&mon, &profile, CombatTables::standard());
        assert_eq!(stats.hp, 170);
        assert_eq!(stats.atk, 340.0);
        assert!((stats.def - 170.0 * 0.667).abs() < 1e-9);
        assert_eq!(stats.spe, 170.0);
    }

    #[test]
    fn unknown_species_degrades_to_ones() {
        let profile = SpeciesProfile::unknown(404);
        let mon = Combatant::new(&profile, 50, StatBlock::uniform(31), StatBlock::uniform(252))
            .expect("valid level");
        let stats = effective_stats(&mon, &profile, CombatTables::standard());
        assert_eq!(stats.hp, 1);
        assert_eq!(stats.atk, 1.0);
        assert_eq!(stats.spe, 1.0);
    }
}
