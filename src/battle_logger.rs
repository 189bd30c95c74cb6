use crate::model::{Stat, StatusCondition};
use serde_json::json;

/// Ordered, append-only list of plain-text battle events, safe to show verbatim.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TurnLog {
    lines: Vec<String>,
}

impl TurnLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn log_turn(&mut self, turn: u32) {
        self.push(format!("Turn {turn}"));
    }

    pub fn log_miss(&mut self, source: &str, move_name: &str) {
        self.push(format!("{source} used {move_name}, but it missed!"));
    }

    pub fn log_hit(&mut self, source: &str, move_name: &str, damage: u32) {
        self.push(format!("{source} used {move_name}! It dealt {damage} damage!"));
    }

    pub fn log_status_move(&mut self, source: &str, move_name: &str) {
        self.push(format!("{source} used {move_name}!"));
    }

    pub fn log_critical(&mut self) {
        self.push("A critical hit!");
    }

    pub fn log_effectiveness(&mut self, target: &str, effectiveness: f64) {
        if effectiveness == 0.0 {
            self.push(format!("It doesn't affect {target}..."));
        } else if effectiveness > 1.0 {
            self.push("It's super effective!");
        } else if effectiveness < 1.0 {
            self.push("It's not very effective...");
        }
    }

    pub fn log_status(&mut self, target: &str, status: StatusCondition) {
        let verb = match status {
            StatusCondition::Burn => "was burned!",
            StatusCondition::Poison => "was poisoned!",
            StatusCondition::BadlyPoisoned => "was badly poisoned!",
            StatusCondition::Paralysis => "is paralyzed! It may be unable to move!",
            StatusCondition::Sleep => "fell asleep!",
            StatusCondition::Freeze => "was frozen solid!",
        };
        self.push(format!("{target} {verb}"));
    }

    pub fn log_stage(&mut self, target: &str, stat: Stat, change: i8) {
        let stat = stat.display_name();
        let line = match change {
            c if c >= 2 => format!("{target}'s {stat} rose sharply!"),
            1 => format!("{target}'s {stat} rose!"),
            0 => format!("{target}'s {stat} won't change any further!"),
            -1 => format!("{target}'s {stat} fell!"),
            _ => format!("{target}'s {stat} harshly fell!"),
        };
        self.push(line);
    }

    pub fn log_residual(&mut self, target: &str, status: StatusCondition, damage: u32) {
        let cause = match status {
            StatusCondition::Burn => "its burn",
            _ => "poison",
        };
        self.push(format!("{target} is hurt by {cause}! ({damage} damage)"));
    }

    pub fn log_wake(&mut self, target: &str) {
        self.push(format!("{target} woke up!"));
    }

    pub fn log_faint(&mut self, target: &str) {
        self.push(format!("{target} fainted!"));
    }

    pub fn log_win(&mut self, winner: &str) {
        self.push(format!("{winner} won the battle!"));
    }

    pub fn log_draw(&mut self) {
        self.push("The battle ended in a draw.");
    }

    pub fn extend(&mut self, lines: impl IntoIterator<Item = String>) {
        self.lines.extend(lines);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({ "log": self.lines })
    }
}
