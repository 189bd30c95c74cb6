use auralis_combat::duel::{choose_move, end_of_turn};
use auralis_combat::prelude::*;
use pretty_assertions::assert_eq;

const DEX_JSON: &str = include_str!("../data/dex.json");

fn dex() -> Dex {
    Dex::from_json_str(DEX_JSON).expect("sample dex parses")
}

fn mon(dex: &Dex, id: u32) -> Combatant {
    Combatant::from_dex(dex, id, 50, StatBlock::uniform(31), StatBlock::default())
        .expect("valid level")
}

#[test]
fn duel_is_reproducible_from_its_seed() {
    let dex = dex();
    let (a, b) = (mon(&dex, 6), mon(&dex, 9));
    let options = DuelOptions::default();
    let first = run_duel(CombatTables::standard(), &dex, &a, &b, &options, &mut BattleRng::seeded(42));
    let second = run_duel(CombatTables::standard(), &dex, &a, &b, &options, &mut BattleRng::seeded(42));
    assert_eq!(first.outcome, second.outcome);
    assert_eq!(first.turns, second.turns);
    assert_eq!(first.log, second.log);
}

#[test]
fn duel_ends_with_a_faint_or_the_turn_cap() {
    let dex = dex();
    let (a, b) = (mon(&dex, 25), mon(&dex, 3));
    let options = DuelOptions::default();
    for seed in 0..20 {
        let report = run_duel(CombatTables::standard(), &dex, &a, &b, &options, &mut BattleRng::seeded(seed));
        assert!(report.turns >= 1 && report.turns <= options.max_turns);
        let final_a = report.final_a.as_ref().expect("not aborted");
        let final_b = report.final_b.as_ref().expect("not aborted");
        match report.outcome {
            DuelOutcome::SideAWins => assert!(final_b.is_fainted() && !final_a.is_fainted()),
            DuelOutcome::SideBWins => assert!(final_a.is_fainted() && !final_b.is_fainted()),
            DuelOutcome::Draw => assert!(
                (final_a.is_fainted() && final_b.is_fainted()) || report.turns == options.max_turns
            ),
            DuelOutcome::Aborted { .. } => panic!("seed {seed} aborted"),
        }
        assert_eq!(report.log.first().map(String::as_str), Some("Turn 1"));
    }
}

#[test]
fn caller_instances_are_left_untouched() {
    let dex = dex();
    let (a, b) = (mon(&dex, 6), mon(&dex, 3));
    let (a_before, b_before) = (a.clone(), b.clone());
    run_duel(
        CombatTables::standard(),
        &dex,
        &a,
        &b,
        &DuelOptions::default(),
        &mut BattleRng::seeded(5),
    );
    assert_eq!(a, a_before);
    assert_eq!(b, b_before);
}

#[test]
fn turn_cap_without_damage_is_a_draw() {
    let dex = dex();
    let a = mon(&dex, 9).with_moves(["Growl"]);
    let b = mon(&dex, 9).with_moves(["Growl"]);
    let options = DuelOptions {
        max_turns: 3,
        ..DuelOptions::default()
    };
    let report = run_duel(CombatTables::standard(), &dex, &a, &b, &options, &mut BattleRng::seeded(1));
    assert_eq!(report.outcome, DuelOutcome::Draw);
    assert_eq!(report.turns, 3);
    assert_eq!(report.log.last().map(String::as_str), Some("The battle ended in a draw."));
}

#[test]
fn fainted_starter_aborts_without_progress() {
    let dex = dex();
    let a = mon(&dex, 6);
    let mut b = mon(&dex, 9);
    b.take_damage(u32::MAX);
    let report = run_duel(
        CombatTables::standard(),
        &dex,
        &a,
        &b,
        &DuelOptions::default(),
        &mut BattleRng::seeded(9),
    );
    assert!(matches!(report.outcome, DuelOutcome::Aborted { .. }));
    assert!(report.final_a.is_none() && report.final_b.is_none());
}

#[test]
fn move_choice_skips_unknown_names() {
    let dex = dex();
    let attacker = mon(&dex, 25).with_moves(["Volt Tackle", "Thunderbolt"]);
    let mut rng = BattleRng::seeded(11);
    for _ in 0..10 {
        assert_eq!(choose_move(&attacker, &dex, &mut rng).name, "Thunderbolt");
    }
}

#[test]
fn toxic_damage_escalates_between_turns() {
    let dex = dex();
    let mut target = mon(&dex, 9);
    let mut log = TurnLog::new();
    target.status = Some(StatusCondition::BadlyPoisoned);
    target.bad_poison_counter = 1;
    let eighth = target.max_hp() / 8;
    assert_eq!(end_of_turn(&mut target, &mut log), eighth);
    assert_eq!(end_of_turn(&mut target, &mut log), eighth * 2);
}

#[test]
fn series_counts_every_simulation() {
    let dex = dex();
    let (a, b) = (mon(&dex, 6), mon(&dex, 3));
    let options = DuelOptions::default();
    let summary = simulate_series(CombatTables::standard(), &dex, &a, &b, &options, 64, 7);
    assert_eq!(summary.sims, 64);
    assert_eq!(
        summary.a_wins + summary.b_wins + summary.draws + summary.aborted,
        64
    );
    assert_eq!(summary.aborted, 0);
    let again = simulate_series(CombatTables::standard(), &dex, &a, &b, &options, 64, 7);
    assert_eq!(summary, again);
    // Fire against a grass/poison species wins most of the time.
    assert!(summary.a_win_rate() > 0.5);
}
