//! Session/оркестрация уровня
//!
//! ECS ответственность:
//! - per-session контекст: IntentMap, SimulationTick, DeferredQueue, Score
//! - реакция на смерть (corpse removal, respawn, прогресс-счётчики)
//! - объекты уровня: bounce/pushable препятствия, границы поля
//!
//! Ядро никогда не удаляет entity из ростера посреди тика: combat только
//! ставит маркер Dead, фактический despawn — через DeferredQueue.

use bevy::prelude::*;

pub mod resources;
pub mod spawn;
pub mod systems;

pub use resources::{
    DeferredAction, DeferredQueue, IntentMap, Score, SimulationConfig, SimulationTick,
};
pub use spawn::{spawn_boss, spawn_bounce_obstacle, spawn_player, spawn_pushable, spawn_spider};
pub use systems::ProgressChanged;

use crate::SimSet;

/// Session Plugin
///
/// Порядок внутри тика:
/// 1. advance_tick — счётчик кадров (SimSet::Tick)
/// 2. grab_pushable — замедление игрока у pushable-объекта (SimSet::Input)
/// 3. push_pushable / bounce_obstacles / clamp_level_bounds — после движения
/// 4. handle_deaths — реакция на EntityDied этого тика (SimSet::Session)
/// 5. drain_deferred — fire-once отложенные колбэки (SimSet::Session)
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ProgressChanged>();

        app.add_systems(FixedUpdate, systems::advance_tick.in_set(SimSet::Tick));
        app.add_systems(
            FixedUpdate,
            systems::grab_pushable
                .in_set(SimSet::Input)
                .after(crate::movement::apply_player_intent),
        );
        app.add_systems(
            FixedUpdate,
            (
                systems::push_pushable,
                systems::bounce_obstacles,
                systems::clamp_level_bounds,
            )
                .chain()
                .in_set(SimSet::Movement)
                .after(crate::movement::advance_kinematics)
                .after(crate::combat::tick_knockback),
        );
        app.add_systems(
            FixedUpdate,
            (systems::handle_deaths, systems::drain_deferred)
                .chain()
                .in_set(SimSet::Session),
        );
    }
}
