use crate::dex::DataProvider;
use crate::error::{EngineError, Result};
use crate::model::{SpeciesProfile, Stat, StatBlock, StatusCondition};
use crate::sim::stats::derive_stat;
use crate::tables::{STAGE_MAX, STAGE_MIN};
use serde::{Deserialize, Serialize};

pub const MAX_LEVEL: u8 = 100;
pub const MAX_MOVES: usize = 4;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StatStages {
    pub atk: i8,
    pub def: i8,
    pub spa: i8,
    pub spd: i8,
    pub spe: i8,
    pub accuracy: i8,
    pub evasion: i8,
}

impl StatStages {
    pub fn get(&self, stat: Stat) -> i8 {
        match stat {
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::Spa => self.spa,
            Stat::Spd => self.spd,
            Stat::Spe => self.spe,
            Stat::Accuracy => self.accuracy,
            Stat::Evasion => self.evasion,
        }
    }

    fn slot_mut(&mut self, stat: Stat) -> &mut i8 {
        match stat {
            Stat::Atk => &mut self.atk,
            Stat::Def => &mut self.def,
            Stat::Spa => &mut self.spa,
            Stat::Spd => &mut self.spd,
            Stat::Spe => &mut self.spe,
            Stat::Accuracy => &mut self.accuracy,
            Stat::Evasion => &mut self.evasion,
        }
    }

    /// Adds `delta` clamped to [-6, 6] and returns the change actually made.
    pub fn adjust(&mut self, stat: Stat, delta: i8) -> i8 {
        let slot = self.slot_mut(stat);
        let before = *slot;
        let after = before.saturating_add(delta).clamp(STAGE_MIN, STAGE_MAX);
        *slot = after;
        after - before
    }

    pub fn reset(&mut self) {
        *self = StatStages::default();
    }
}

/// One monster taking part in a battle.
///
/// Level, IVs and EVs are fixed for the battle. Combat only touches HP, status, stages and the
/// status counters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub species_id: u32,
    pub species_name: String,
    pub nickname: Option<String>,
    pub types: Vec<String>,
    pub level: u8,
    pub ivs: StatBlock,
    pub evs: StatBlock,
    max_hp: u32,
    current_hp: u32,
    pub status: Option<StatusCondition>,
    pub stages: StatStages,
    pub held_item: Option<String>,
    pub ability: Option<String>,
    pub sleep_turns: u8,
    pub bad_poison_counter: u8,
    pub moves: Vec<String>,
}

impl Combatant {
    pub fn new(profile: &SpeciesProfile, level: u8, ivs: StatBlock, evs: StatBlock) -> Result<Self> {
        if level == 0 || level > MAX_LEVEL {
            return Err(EngineError::InvalidLevel { level });
        }
        let max_hp = derive_stat(profile.base_stats.hp, level, ivs.hp, evs.hp);
        Ok(Self {
            species_id: profile.species_id,
            species_name: profile.name.clone(),
            nickname: None,
            types: profile.types.clone(),
            level,
            ivs,
            evs,
            max_hp,
            current_hp: max_hp,
            status: None,
            stages: StatStages::default(),
            held_item: None,
            ability: profile.abilities.first().cloned(),
            sleep_turns: 0,
            bad_poison_counter: 0,
            moves: profile.learnset.iter().take(MAX_MOVES).cloned().collect(),
        })
    }

    /// Builds a combatant from a provider lookup, degrading to zero base stats for an unknown
    /// species.
    pub fn from_dex(
        dex: &dyn DataProvider,
        species_id: u32,
        level: u8,
        ivs: StatBlock,
        evs: StatBlock,
    ) -> Result<Self> {
        let profile = dex.profile(species_id);
        Self::new(&profile, level, ivs, evs)
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.held_item = Some(item.into());
        self
    }

    pub fn with_ability(mut self, ability: impl Into<String>) -> Self {
        self.ability = Some(ability.into());
        self
    }

    pub fn with_moves<I, S>(mut self, moves: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.moves = moves.into_iter().map(Into::into).take(MAX_MOVES).collect();
        self
    }

    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.species_name)
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn current_hp(&self) -> u32 {
        self.current_hp
    }

    /// Sets HP, clamped to [0, max HP]. Used by collaborators that heal or revive.
    pub fn set_current_hp(&mut self, hp: u32) {
        self.current_hp = hp.min(self.max_hp);
    }

    /// Removes up to `amount` HP and returns how much was actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.current_hp);
        self.current_hp -= lost;
        lost
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn has_type(&self, type_name: &str) -> bool {
        self.types
            .iter()
            .any(|t| t.trim().eq_ignore_ascii_case(type_name.trim()))
    }

    pub fn clear_status(&mut self) {
        self.status = None;
        self.sleep_turns = 0;
        self.bad_poison_counter = 0;
    }
}
