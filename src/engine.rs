use crate::error::Result;
use crate::model::Move;
use crate::rng::{BattleRng, RandomSource};
use crate::sim::accuracy;
use crate::sim::combatant::Combatant;
use crate::sim::damage::{self, DamageEnv};
use crate::sim::order::{self, SpeedTieRule, TurnOrder};
use crate::sim::stats::EffectiveStats;
use crate::sim::status;
use crate::sim::turn::{self, TurnContext, TurnResult};
use crate::tables::CombatTables;

/// Owns the random source for one battle and borrows the lookup tables.
///
/// Independent battles each get their own engine; turns of one battle must go through the same
/// engine one at a time.
pub struct BattleEngine<'t, R: RandomSource = BattleRng> {
    tables: &'t CombatTables,
    rng: R,
}

impl<'t> BattleEngine<'t, BattleRng> {
    pub fn seeded(tables: &'t CombatTables, seed: u64) -> Self {
        Self::with_rng(tables, BattleRng::seeded(seed))
    }

    /// Seeds from OS entropy. This is the only place a missing entropy source surfaces.
    pub fn from_entropy(tables: &'t CombatTables) -> Result<Self> {
        Ok(Self::with_rng(tables, BattleRng::from_entropy()?))
    }
}

impl<'t, R: RandomSource> BattleEngine<'t, R> {
    pub fn with_rng(tables: &'t CombatTables, rng: R) -> Self {
        Self { tables, rng }
    }

    pub fn tables(&self) -> &'t CombatTables {
        self.tables
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn execute_turn(
        &mut self,
        ctx: &TurnContext<'_>,
        attacker: &mut Combatant,
        defender: &mut Combatant,
        attacker_move: &Move,
        defender_move: &Move,
    ) -> Result<TurnResult> {
        turn::execute_turn(
            self.tables,
            ctx,
            attacker,
            defender,
            attacker_move,
            defender_move,
            &mut self.rng,
        )
    }

    pub fn check_hit(&mut self, mv: &Move, attacker: &Combatant, defender: &Combatant) -> bool {
        accuracy::check_hit(mv, attacker, defender, &mut self.rng)
    }

    pub fn compute_damage(
        &mut self,
        attacker: &Combatant,
        defender: &Combatant,
        mv: &Move,
        attacker_stats: &EffectiveStats,
        defender_stats: &EffectiveStats,
    ) -> u32 {
        let env = DamageEnv::new(self.tables);
        damage::compute_damage(
            attacker,
            defender,
            mv,
            attacker_stats,
            defender_stats,
            &env,
            &mut self.rng,
        )
    }

    pub fn status_damage(&self, combatant: &Combatant) -> u32 {
        status::status_damage(combatant)
    }

    pub fn resolve_order(
        &mut self,
        attacker: &EffectiveStats,
        defender: &EffectiveStats,
        attacker_move: &Move,
        defender_move: &Move,
        tie_rule: SpeedTieRule,
    ) -> TurnOrder {
        order::resolve_order(
            attacker,
            defender,
            attacker_move,
            defender_move,
            tie_rule,
            &mut self.rng,
        )
    }
}
