//! Reference match driver: one combatant per side, random move choice, fixed turn cap.

use crate::battle_logger::TurnLog;
use crate::dex::DataProvider;
use crate::model::{Move, StatusCondition};
use crate::rng::{BattleRng, RandomSource};
use crate::sim::combatant::Combatant;
use crate::sim::order::SpeedTieRule;
use crate::sim::status::status_damage;
use crate::sim::turn::{execute_turn, TurnContext};
use crate::tables::{CombatTables, Weather};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

pub const DEFAULT_MAX_TURNS: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DuelOptions {
    pub max_turns: u32,
    pub weather: Option<Weather>,
    pub speed_tie: SpeedTieRule,
}

impl Default for DuelOptions {
    fn default() -> Self {
        Self {
            max_turns: DEFAULT_MAX_TURNS,
            weather: None,
            speed_tie: SpeedTieRule::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum DuelOutcome {
    SideAWins,
    SideBWins,
    /// Turn limit reached, or both sides fainted in the same turn.
    Draw,
    /// The engine rejected a turn. No progress is recorded.
    Aborted { reason: String },
}

#[derive(Clone, Debug, Serialize)]
pub struct DuelReport {
    pub outcome: DuelOutcome,
    pub turns: u32,
    pub log: Vec<String>,
    /// Final state of each side. `None` when the duel was aborted.
    pub final_a: Option<Combatant>,
    pub final_b: Option<Combatant>,
}

impl DuelReport {
    fn aborted(reason: String, turns: u32, log: TurnLog) -> Self {
        Self {
            outcome: DuelOutcome::Aborted { reason },
            turns,
            log: log.into_lines(),
            final_a: None,
            final_b: None,
        }
    }
}

/// Status upkeep after both sides have acted: tick damage, the bad-poison counter and the sleep
/// countdown. Returns the HP lost.
pub fn end_of_turn(combatant: &mut Combatant, log: &mut TurnLog) -> u32 {
    if combatant.is_fainted() {
        return 0;
    }
    let name = combatant.display_name().to_string();
    match combatant.status {
        Some(status @ (StatusCondition::Burn | StatusCondition::Poison | StatusCondition::BadlyPoisoned)) => {
            let tick = status_damage(combatant);
            let damage = combatant.take_damage(tick);
            log.log_residual(&name, status, damage);
            if status == StatusCondition::BadlyPoisoned {
                combatant.bad_poison_counter = combatant.bad_poison_counter.saturating_add(1);
            }
            if combatant.is_fainted() {
                log.log_faint(&name);
            }
            damage
        }
        Some(StatusCondition::Sleep) => {
            combatant.sleep_turns = combatant.sleep_turns.saturating_sub(1);
            if combatant.sleep_turns == 0 {
                combatant.clear_status();
                log.log_wake(&name);
            }
            0
        }
        _ => 0,
    }
}

/// Picks uniformly among the moves the provider knows. Falls back to Struggle.
pub fn choose_move(
    combatant: &Combatant,
    dex: &dyn DataProvider,
    rng: &mut impl RandomSource,
) -> Move {
    let known: Vec<&Move> = combatant
        .moves
        .iter()
        .filter_map(|name| {
            let found = dex.move_by_name(name);
            if found.is_none() {
                tracing::warn!(move_name = %name, combatant = combatant.display_name(), "skipping unknown move");
            }
            found
        })
        .collect();
    if known.is_empty() {
        return Move::struggle();
    }
    let pick = rng.next_in(0, known.len() as u32 - 1) as usize;
    known[pick].clone()
}

/// Runs a duel on copies of `a` and `b`; the caller's instances are never modified.
pub fn run_duel(
    tables: &CombatTables,
    dex: &dyn DataProvider,
    a: &Combatant,
    b: &Combatant,
    options: &DuelOptions,
    rng: &mut impl RandomSource,
) -> DuelReport {
    let ctx = TurnContext::new(dex)
        .with_weather(options.weather)
        .with_speed_tie(options.speed_tie);
    let mut side_a = a.clone();
    let mut side_b = b.clone();
    let mut log = TurnLog::new();
    let mut outcome = DuelOutcome::Draw;
    let mut turns = 0;

    while turns < options.max_turns {
        turns += 1;
        log.log_turn(turns);
        let move_a = choose_move(&side_a, dex, rng);
        let move_b = choose_move(&side_b, dex, rng);
        match execute_turn(tables, &ctx, &mut side_a, &mut side_b, &move_a, &move_b, rng) {
            Ok(result) => log.extend(result.log),
            Err(err) => {
                tracing::warn!(error = %err, turn = turns, "duel aborted");
                return DuelReport::aborted(err.to_string(), turns, log);
            }
        }
        end_of_turn(&mut side_a, &mut log);
        end_of_turn(&mut side_b, &mut log);

        match (side_a.is_fainted(), side_b.is_fainted()) {
            (false, false) => continue,
            (true, true) => outcome = DuelOutcome::Draw,
            (false, true) => outcome = DuelOutcome::SideAWins,
            (true, false) => outcome = DuelOutcome::SideBWins,
        }
        break;
    }

    match outcome {
        DuelOutcome::SideAWins => log.log_win(side_a.display_name()),
        DuelOutcome::SideBWins => log.log_win(side_b.display_name()),
        _ => log.log_draw(),
    }
    tracing::debug!(?outcome, turns, "duel finished");
    DuelReport {
        outcome,
        turns,
        log: log.into_lines(),
        final_a: Some(side_a),
        final_b: Some(side_b),
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SeriesSummary {
    pub sims: usize,
    pub a_wins: usize,
    pub b_wins: usize,
    pub draws: usize,
    pub aborted: usize,
}

impl SeriesSummary {
    /// Side A's win rate with draws counted as half a win.
    pub fn a_win_rate(&self) -> f64 {
        if self.sims == 0 {
            return 0.0;
        }
        (self.a_wins as f64 + 0.5 * self.draws as f64) / self.sims as f64
    }

    fn record(&mut self, outcome: &DuelOutcome) {
        self.sims += 1;
        match outcome {
            DuelOutcome::SideAWins => self.a_wins += 1,
            DuelOutcome::SideBWins => self.b_wins += 1,
            DuelOutcome::Draw => self.draws += 1,
            DuelOutcome::Aborted { .. } => self.aborted += 1,
        }
    }
}

/// Runs `sims` independent duels in parallel. Each duel gets its own generator derived from `seed`
/// and its index, so the summary does not depend on thread scheduling.
pub fn simulate_series(
    tables: &CombatTables,
    dex: &dyn DataProvider,
    a: &Combatant,
    b: &Combatant,
    options: &DuelOptions,
    sims: usize,
    seed: u64,
) -> SeriesSummary {
    let outcomes: Vec<DuelOutcome> = (0..sims)
        .into_par_iter()
        .map(|idx| {
            let duel_seed = SmallRng::seed_from_u64(seed ^ idx as u64).gen::<u64>();
            let mut rng = BattleRng::seeded(duel_seed);
            run_duel(tables, dex, a, b, options, &mut rng).outcome
        })
        .collect();

    let mut summary = SeriesSummary::default();
    for outcome in &outcomes {
        summary.record(outcome);
    }
    summary
}
