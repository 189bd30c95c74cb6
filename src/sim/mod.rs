pub mod accuracy;
pub mod combatant;
pub mod damage;
pub mod effects;
pub mod order;
pub mod stats;
pub mod status;
pub mod turn;

pub use combatant::{Combatant, StatStages};
pub use turn::{execute_turn, AttackReport, Side, TurnContext, TurnPhase, TurnResult};
