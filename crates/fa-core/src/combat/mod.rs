//! Combat system
//!
//! Implements player melee and missile attacks against monsters: hit
//! determination, criticals, slay/brand/deadliness damage and the per-round
//! state machines. Results are reported as [`CombatEvent`]s; nothing here
//! formats text except [`describe_event`].

mod critical;
mod damage;
mod events;
mod hit;
mod melee;
mod missile;

use crate::tables::GameTables;
use fa_rng::RandomSource;

pub use critical::{critical_melee, critical_shot, Critical, CriticalTier};
pub use damage::{
    adjust_damage, compute_damage, Adjustment, DamageComputation, DamageSource,
    HOLY_SLAY_MULTIPLE, TEMP_BRAND_MULTIPLE,
};
pub use events::{
    describe_event, ChaosEffect, CombatEvent, CombatSink, ItemRef, MessageKind, MessageLog,
    Notifier, Presenter,
};
pub use hit::{
    effective_armour, fire_chance, melee_chance, sleep_bonus, test_hit, throw_chance, HitRoll,
    BTH_PLUS_ADJ,
};
pub use melee::{py_attack, MeleeOutcome, UNLIGHT_BONUS};
pub use missile::{breakage_chance, fire, throw, MissileOutcome};

/// The collaborators every attack needs: randomness, tables and a place to
/// report what happened
pub struct CombatContext<'a> {
    pub rng: &'a mut dyn RandomSource,
    pub tables: &'a GameTables,
    pub sink: &'a mut dyn CombatSink,
}

impl<'a> CombatContext<'a> {
    pub fn new(
        rng: &'a mut dyn RandomSource,
        tables: &'a GameTables,
        sink: &'a mut dyn CombatSink,
    ) -> Self {
        Self { rng, tables, sink }
    }
}
