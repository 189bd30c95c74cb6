//! One turn of a duel: two attacks in priority/speed order, stopping early when the second actor
//! has fainted.
//!
//! `execute_turn` mutates both combatants in place: HP, status and stages. It refuses to start
//! when either side has already fainted, so a failed call leaves both untouched.

use crate::battle_logger::TurnLog;
use crate::dex::DataProvider;
use crate::error::{EngineError, Result};
use crate::model::{EffectTarget, Move, SpeciesProfile};
use crate::rng::RandomSource;
use crate::sim::accuracy::check_hit;
use crate::sim::combatant::Combatant;
use crate::sim::damage::{roll_damage, DamageEnv};
use crate::sim::effects::{apply_effect, AppliedEffect, EffectChange};
use crate::sim::order::{resolve_order, SpeedTieRule, TurnOrder};
use crate::sim::stats::effective_stats;
use crate::tables::{CombatTables, Weather};
use serde::Serialize;

/// Per-turn inputs besides the combatants and their moves.
#[derive(Clone, Copy)]
pub struct TurnContext<'a> {
    pub dex: &'a dyn DataProvider,
    pub weather: Option<Weather>,
    pub speed_tie: SpeedTieRule,
}

impl<'a> TurnContext<'a> {
    pub fn new(dex: &'a dyn DataProvider) -> Self {
        Self {
            dex,
            weather: None,
            speed_tie: SpeedTieRule::default(),
        }
    }

    pub fn with_weather(mut self, weather: Option<Weather>) -> Self {
        self.weather = weather;
        self
    }

    pub fn with_speed_tie(mut self, rule: SpeedTieRule) -> Self {
        self.speed_tie = rule;
        self
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Attacker,
    Defender,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Attacker => Side::Defender,
            Side::Defender => Side::Attacker,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    NotStarted,
    FirstAttackResolved,
    TurnComplete,
    SecondAttackSkipped,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AttackReport {
    pub side: Side,
    pub move_name: String,
    pub hit: bool,
    /// Damage rolled against the target. 0 for misses and status moves.
    pub damage: u32,
    pub critical: bool,
    pub effectiveness: f64,
    pub effects: Vec<AppliedEffect>,
    pub target_fainted: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TurnResult {
    pub order: TurnOrder,
    pub phase: TurnPhase,
    /// Attacks in execution order. Holds one entry when the second was skipped.
    pub attacks: Vec<AttackReport>,
    pub log: Vec<String>,
}

impl TurnResult {
    pub fn attack_by(&self, side: Side) -> Option<&AttackReport> {
        self.attacks.iter().find(|attack| attack.side == side)
    }

    pub fn damage_dealt_by(&self, side: Side) -> u32 {
        self.attack_by(side).map(|attack| attack.damage).unwrap_or(0)
    }

    pub fn damage_taken_by(&self, side: Side) -> u32 {
        self.damage_dealt_by(side.opponent())
    }

    /// Effects that landed on `side`, whichever side's move caused them.
    pub fn effects_on(&self, side: Side) -> Vec<&AppliedEffect> {
        self.attacks
            .iter()
            .flat_map(|attack| {
                attack.effects.iter().filter(move |applied| {
                    let landed_on = match applied.effect.target {
                        EffectTarget::User => attack.side,
                        EffectTarget::Opponent => attack.side.opponent(),
                    };
                    landed_on == side
                })
            })
            .collect()
    }

    pub fn second_attack_skipped(&self) -> bool {
        self.phase == TurnPhase::SecondAttackSkipped
    }
}

pub fn execute_turn(
    tables: &CombatTables,
    ctx: &TurnContext<'_>,
    attacker: &mut Combatant,
    defender: &mut Combatant,
    attacker_move: &Move,
    defender_move: &Move,
    rng: &mut impl RandomSource,
) -> Result<TurnResult> {
    for side in [&*attacker, &*defender] {
        if side.is_fainted() {
            return Err(EngineError::FaintedCombatant {
                name: side.display_name().to_string(),
            });
        }
    }

    let attacker_profile = ctx.dex.profile(attacker.species_id);
    let defender_profile = ctx.dex.profile(defender.species_id);
    let order = resolve_order(
        &effective_stats(attacker, &attacker_profile, tables),
        &effective_stats(defender, &defender_profile, tables),
        attacker_move,
        defender_move,
        ctx.speed_tie,
        rng,
    );

    let attacker_side = Actor {
        side: Side::Attacker,
        profile: &*attacker_profile,
        mv: attacker_move,
    };
    let defender_side = Actor {
        side: Side::Defender,
        profile: &*defender_profile,
        mv: defender_move,
    };
    let (first, second, first_mon, second_mon) = match order {
        TurnOrder::AttackerFirst => (attacker_side, defender_side, attacker, defender),
        TurnOrder::DefenderFirst => (defender_side, attacker_side, defender, attacker),
    };

    let mut log = TurnLog::new();
    let mut attacks = Vec::with_capacity(2);
    let mut phase = TurnPhase::NotStarted;

    attacks.push(resolve_attack(
        tables, ctx, &first, first_mon, second.profile, second_mon, &mut log, rng,
    ));
    phase = advance(phase, false);
    phase = advance(phase, second_mon.is_fainted());

    if phase == TurnPhase::TurnComplete {
        attacks.push(resolve_attack(
            tables, ctx, &second, second_mon, first.profile, first_mon, &mut log, rng,
        ));
    }

    Ok(TurnResult {
        order,
        phase,
        attacks,
        log: log.into_lines(),
    })
}

fn advance(phase: TurnPhase, second_fainted: bool) -> TurnPhase {
    match phase {
        TurnPhase::NotStarted => TurnPhase::FirstAttackResolved,
        TurnPhase::FirstAttackResolved if second_fainted => TurnPhase::SecondAttackSkipped,
        TurnPhase::FirstAttackResolved => TurnPhase::TurnComplete,
        done => done,
    }
}

struct Actor<'p> {
    side: Side,
    profile: &'p SpeciesProfile,
    mv: &'p Move,
}

#[allow(clippy::too_many_arguments)]
fn resolve_attack(
    tables: &CombatTables,
    ctx: &TurnContext<'_>,
    actor: &Actor<'_>,
    user: &mut Combatant,
    target_profile: &SpeciesProfile,
    target: &mut Combatant,
    log: &mut TurnLog,
    rng: &mut impl RandomSource,
) -> AttackReport {
    let mv = actor.mv;
    let user_name = user.display_name().to_string();
    let target_name = target.display_name().to_string();
    let mut report = AttackReport {
        side: actor.side,
        move_name: mv.name.clone(),
        hit: false,
        damage: 0,
        critical: false,
        effectiveness: 1.0,
        effects: Vec::new(),
        target_fainted: false,
    };

    if !check_hit(mv, user, target, rng) {
        log.log_miss(&user_name, &mv.name);
        tracing::debug!(side = ?actor.side, move_name = %mv.name, "attack missed");
        return report;
    }
    report.hit = true;

    let user_stats = effective_stats(user, actor.profile, tables);
    let target_stats = effective_stats(target, target_profile, tables);
    let env = DamageEnv::new(tables).with_weather(ctx.weather);
    let roll = roll_damage(user, target, mv, &user_stats, &target_stats, &env, rng);
    report.effectiveness = roll.effectiveness;

    if mv.is_damaging() {
        target.take_damage(roll.damage);
        report.damage = roll.damage;
        report.critical = roll.critical;
        log.log_hit(&user_name, &mv.name, roll.damage);
        if roll.critical {
            log.log_critical();
        }
        log.log_effectiveness(&target_name, roll.effectiveness);
    } else {
        log.log_status_move(&user_name, &mv.name);
    }

    for effect in &mv.effects {
        let Some(applied) = apply_effect(effect, user, target, rng) else {
            continue;
        };
        let affected = match effect.target {
            EffectTarget::User => &user_name,
            EffectTarget::Opponent => &target_name,
        };
        match applied.change {
            EffectChange::Status { status } => log.log_status(affected, status),
            EffectChange::Stage { stat, change } => log.log_stage(affected, stat, change),
        }
        report.effects.push(applied);
    }

    if target.is_fainted() {
        report.target_fainted = true;
        log.log_faint(&target_name);
    }

    tracing::debug!(
        side = ?actor.side,
        move_name = %mv.name,
        damage = report.damage,
        critical = report.critical,
        effectiveness = report.effectiveness,
        target_hp = target.current_hp(),
        "attack resolved"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dex::Dex;
    use crate::model::{Effect, MoveCategory, Stat, StatBlock, StatusCondition};
    use crate::rng::ScriptedRng;

    fn profile(id: u32, name: &str, types: &[&str], base: u16) -> SpeciesProfile {
        SpeciesProfile {
            species_id: id,
            name: name.to_string(),
            types: types.iter().map(|t| t.to_string()).collect(),
            base_stats: StatBlock::uniform(base),
            abilities: Vec::new(),
            learnset: Vec::new(),
        }
    }

    fn dex() -> Dex {
        let mut dex = Dex::new();
        dex.insert_species(profile(1, "Alpha", &["normal"], 80));
        dex.insert_species(profile(2, "Beta", &["normal"], 80));
        dex
    }

    fn mon(dex: &Dex, id: u32) -> Combatant {
        Combatant::from_dex(dex, id, 50, StatBlock::default(), StatBlock::default())
            .expect("valid level")
    }

    fn tackle() -> Move {
        Move::new("Tackle", "normal", MoveCategory::Physical, 40, 100)
    }

    #[test]
    fn both_sides_act_when_nobody_faints() {
        let dex = dex();
        let (mut a, mut b) = (mon(&dex, 1), mon(&dex, 2));
        let ctx = TurnContext::new(&dex);
        let mut rng = ScriptedRng::new(vec![0.5]).expect("draws");
        let result = execute_turn(
            CombatTables::standard(),
            &ctx,
            &mut a,
            &mut b,
            &tackle(),
            &tackle(),
            &mut rng,
        )
        .expect("turn runs");
        assert_eq!(result.phase, TurnPhase::TurnComplete);
        assert_eq!(result.order, TurnOrder::AttackerFirst);
        assert_eq!(result.attacks.len(), 2);
        assert!(result.damage_dealt_by(Side::Attacker) > 0);
        assert_eq!(b.current_hp(), b.max_hp() - result.damage_dealt_by(Side::Attacker));
        assert_eq!(a.current_hp(), a.max_hp() - result.damage_dealt_by(Side::Defender));
        assert!(result.log[0].starts_with("Alpha used Tackle! It dealt"));
    }

    #[test]
    fn fainted_actor_is_rejected_without_changes() {
        let dex = dex();
        let (mut a, mut b) = (mon(&dex, 1), mon(&dex, 2));
        b.take_damage(u32::MAX);
        let before = a.clone();
        let ctx = TurnContext::new(&dex);
        let mut rng = ScriptedRng::new(vec![0.5]).expect("draws");
        let err = execute_turn(
            CombatTables::standard(),
            &ctx,
            &mut a,
            &mut b,
            &tackle(),
            &tackle(),
            &mut rng,
        )
        .unwrap_err();
        assert_eq!(err, EngineError::FaintedCombatant { name: "Beta".to_string() });
        assert_eq!(a, before);
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn missed_attack_deals_nothing_and_skips_effects() {
        let dex = dex();
        let (mut a, mut b) = (mon(&dex, 1), mon(&dex, 2));
        let hypnosis = Move::new("Hypnosis", "psychic", MoveCategory::Status, 0, 60)
            .with_effect(Effect::status("sleep"));
        let growl = Move::new("Growl", "normal", MoveCategory::Status, 0, 100)
            .with_effect(Effect::stat("atk", -1));
        let ctx = TurnContext::new(&dex);
        // Attacker misses (0.9 >= 0.6); defender hits, effect triggers.
        let mut rng = ScriptedRng::new(vec![0.9, 0.0, 0.0]).expect("draws");
        let result = execute_turn(
            CombatTables::standard(),
            &ctx,
            &mut a,
            &mut b,
            &hypnosis,
            &growl,
            &mut rng,
        )
        .expect("turn runs");
        assert_eq!(
            result.log,
            vec![
                "Alpha used Hypnosis, but it missed!".to_string(),
                "Beta used Growl!".to_string(),
                "Alpha's Attack fell!".to_string(),
            ]
        );
        assert_eq!(b.status, None);
        assert_eq!(a.stages.atk, -1);
        assert!(!result.attacks[0].hit);
        assert_eq!(result.attacks[0].damage, 0);
    }

    #[test]
    fn status_effect_is_logged_on_its_target() {
        let dex = dex();
        let (mut a, mut b) = (mon(&dex, 1), mon(&dex, 2));
        let toxic = Move::new("Toxic", "poison", MoveCategory::Status, 0, 0)
            .with_effect(Effect::status("badly_poisoned"));
        let splash = Move::new("Splash", "normal", MoveCategory::Status, 0, 0);
        let ctx = TurnContext::new(&dex);
        let mut rng = ScriptedRng::new(vec![0.0]).expect("draws");
        let result = execute_turn(
            CombatTables::standard(),
            &ctx,
            &mut a,
            &mut b,
            &toxic,
            &splash,
            &mut rng,
        )
        .expect("turn runs");
        assert_eq!(b.status, Some(StatusCondition::BadlyPoisoned));
        assert_eq!(result.log[1], "Beta was badly poisoned!");
        assert_eq!(result.attack_by(Side::Attacker).map(|attack| attack.effects.len()), Some(1));
    }

    #[test]
    fn first_knockout_stops_the_turn() {
        let dex = dex();
        let (mut a, mut b) = (mon(&dex, 1), mon(&dex, 2));
        b.set_current_hp(1);
        let ctx = TurnContext::new(&dex);
        let mut rng = ScriptedRng::new(vec![0.5]).expect("draws");
        let result = execute_turn(
            CombatTables::standard(),
            &ctx,
            &mut a,
            &mut b,
            &tackle(),
            &tackle(),
            &mut rng,
        )
        .expect("turn runs");
        assert_eq!(result.phase, TurnPhase::SecondAttackSkipped);
        assert_eq!(result.attacks.len(), 1);
        assert!(b.is_fainted());
        assert_eq!(a.current_hp(), a.max_hp());
        assert_eq!(result.damage_taken_by(Side::Attacker), 0);
        assert_eq!(result.log.last().map(String::as_str), Some("Beta fainted!"));
        assert!(result.log.iter().all(|line| !line.starts_with("Beta used")));
    }

    #[test]
    fn effects_are_grouped_by_the_side_they_land_on() {
        let dex = dex();
        let (mut a, mut b) = (mon(&dex, 1), mon(&dex, 2));
        let swords_dance = Move::new("Swords Dance", "normal", MoveCategory::Status, 0, 0)
            .with_effect(Effect::stat("atk", 2).on_user());
        let growl = Move::new("Growl", "normal", MoveCategory::Status, 0, 100)
            .with_effect(Effect::stat("atk", -1));
        let ctx = TurnContext::new(&dex);
        let mut rng = ScriptedRng::new(vec![0.0]).expect("draws");
        let result = execute_turn(
            CombatTables::standard(),
            &ctx,
            &mut a,
            &mut b,
            &swords_dance,
            &growl,
            &mut rng,
        )
        .expect("turn runs");
        let on_attacker: Vec<EffectChange> =
            result.effects_on(Side::Attacker).iter().map(|applied| applied.change).collect();
        assert_eq!(
            on_attacker,
            vec![
                EffectChange::Stage { stat: Stat::Atk, change: 2 },
                EffectChange::Stage { stat: Stat::Atk, change: -1 },
            ]
        );
        assert!(result.effects_on(Side::Defender).is_empty());
        assert_eq!(result.damage_taken_by(Side::Defender), 0);
    }

    #[test]
    fn damage_taken_mirrors_the_opposing_attack() {
        let dex = dex();
        let (mut a, mut b) = (mon(&dex, 1), mon(&dex, 2));
        let ctx = TurnContext::new(&dex);
        let mut rng = ScriptedRng::new(vec![0.5]).expect("draws");
        let result = execute_turn(
            CombatTables::standard(),
            &ctx,
            &mut a,
            &mut b,
            &tackle(),
            &tackle(),
            &mut rng,
        )
        .expect("turn runs");
        assert_eq!(result.damage_taken_by(Side::Defender), b.max_hp() - b.current_hp());
        assert_eq!(result.damage_taken_by(Side::Attacker), a.max_hp() - a.current_hp());
    }

    #[test]
    fn phases_advance_in_order() {
        assert_eq!(advance(TurnPhase::NotStarted, false), TurnPhase::FirstAttackResolved);
        assert_eq!(advance(TurnPhase::FirstAttackResolved, true), TurnPhase::SecondAttackSkipped);
        assert_eq!(advance(TurnPhase::FirstAttackResolved, false), TurnPhase::TurnComplete);
        assert_eq!(advance(TurnPhase::TurnComplete, true), TurnPhase::TurnComplete);
    }
}
