pub mod battle_logger;
pub mod dex;
pub mod duel;
pub mod engine;
pub mod error;
pub mod model;
pub mod rng;
pub mod sim;
pub mod tables;
pub mod types;

use crate::dex::Dex;
use crate::duel::{run_duel, simulate_series, DuelOptions, DuelOutcome};
use crate::model::StatBlock;
use crate::rng::BattleRng;
use crate::sim::Combatant;
use crate::tables::CombatTables;
use anyhow::Context;
use std::path::PathBuf;

pub mod prelude {
    pub use crate::battle_logger::TurnLog;
    pub use crate::dex::{DataProvider, Dex};
    pub use crate::duel::{run_duel, simulate_series, DuelOptions, DuelOutcome, DuelReport, SeriesSummary};
    pub use crate::engine::BattleEngine;
    pub use crate::error::{EngineError, Result};
    pub use crate::model::{Effect, Move, MoveCategory, SpeciesProfile, Stat, StatBlock, StatusCondition};
    pub use crate::rng::{BattleRng, RandomSource, ScriptedRng};
    pub use crate::sim::order::{SpeedTieRule, TurnOrder};
    pub use crate::sim::{Combatant, Side, TurnContext, TurnPhase, TurnResult};
    pub use crate::tables::{CombatTables, Weather};
}

#[derive(Debug, Clone)]
pub struct CliOptions {
    pub data_path: PathBuf,
    pub tables_path: Option<PathBuf>,
    pub species_a: u32,
    pub species_b: u32,
    pub level: u8,
    pub seed: u64,
    pub sims: usize,
    pub duel: DuelOptions,
}

pub fn run(opts: CliOptions) -> anyhow::Result<()> {
    if opts.sims == 0 {
        anyhow::bail!("--sims must be > 0");
    }
    let dex = Dex::from_json_path(&opts.data_path)?;
    let tables = match &opts.tables_path {
        Some(path) => CombatTables::from_json_path(path)?,
        None => CombatTables::standard().clone(),
    };
    let ivs = StatBlock::uniform(31);
    let a = Combatant::from_dex(&dex, opts.species_a, opts.level, ivs, StatBlock::default())
        .with_context(|| format!("Failed to build side A (species {})", opts.species_a))?;
    let b = Combatant::from_dex(&dex, opts.species_b, opts.level, ivs, StatBlock::default())
        .with_context(|| format!("Failed to build side B (species {})", opts.species_b))?;

    if opts.sims == 1 {
        let mut rng = BattleRng::seeded(opts.seed);
        let report = run_duel(&tables, &dex, &a, &b, &opts.duel, &mut rng);
        for line in &report.log {
            println!("{line}");
        }
        if let DuelOutcome::Aborted { reason } = &report.outcome {
            anyhow::bail!("Battle aborted after {} turns: {reason}", report.turns);
        }
        return Ok(());
    }

    let summary = simulate_series(&tables, &dex, &a, &b, &opts.duel, opts.sims, opts.seed);
    println!(
        "{} vs {}: {} sims, A wins {}, B wins {}, draws {}, aborted {} (A win rate {:.4})",
        a.display_name(),
        b.display_name(),
        summary.sims,
        summary.a_wins,
        summary.b_wins,
        summary.draws,
        summary.aborted,
        summary.a_win_rate()
    );
    Ok(())
}
